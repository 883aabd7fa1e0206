use molsift::oracle::{FingerprintOracle, TabulatedScores};
use molsift::sample::ReservoirSampler;
use molsift::stream::{
    create_output, open_lines, sample_lines, source_list, write_ranked, LabelListSink, LineSink,
    SearchOutcome, SimilaritySearch,
};
use molsift::{SiftConfig, SiftError};
use std::error::Error;
use std::fs::File;
use std::io::{self, BufReader, Write};
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Debug)]
enum Command {
    Sample { input: PathBuf, num_lines: Option<i64> },
    Similar { reference: String, list: PathBuf, top_count: Option<i64> },
    Top { scores: PathBuf, top_count: Option<i64> },
}

#[derive(Debug)]
struct Args {
    command: Command,
    output: Option<PathBuf>,
    config: Option<PathBuf>,
    seed: Option<u64>,
    overwrite: bool,
    with_scores: bool,
    with_reference: bool,
    max_sources: Option<u64>,
}

impl Command {
    fn name(&self) -> &'static str {
        match self {
            Command::Sample { .. } => "sample",
            Command::Similar { .. } => "similar",
            Command::Top { .. } => "top",
        }
    }
}

fn main() -> Result<(), Box<dyn Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(io::stderr)
        .init();

    let args = parse_args_from(std::env::args().skip(1))?;
    let config = build_config(&args)?;

    match &args.command {
        Command::Sample { input, .. } => {
            let mut sampler = ReservoirSampler::try_new(config.sample_size, config.seed)?;
            let read = sample_lines(open_lines(input)?, &mut sampler)?;
            info!(read, kept = sampler.len(), "sampling finished");

            let mut sink = LineSink::new(open_output(&args, &config)?);
            sink.extend(sampler.sample())?;
            sink.finish()?;
        }
        Command::Similar { reference, list, .. } => {
            let mut search = SimilaritySearch::new(FingerprintOracle::new(), reference)?
                .with_progress_interval(config.progress_interval);
            let sources = source_list(BufReader::new(File::open(list)?));
            let outcome = search.search_limited(sources, config.top_count, args.max_sources);
            let reference = (search.reference_label(), search.reference());
            report(&args, &config, Some(reference), outcome)?;
        }
        Command::Top { scores, .. } => {
            let mut search = SimilaritySearch::with_reference(
                TabulatedScores,
                TabulatedScores::reference(),
                scores.display().to_string(),
            )
            .with_progress_interval(config.progress_interval);
            let rows = source_list(BufReader::new(File::open(scores)?));
            let outcome = search.search_limited(rows, config.top_count, args.max_sources);
            report(&args, &config, None, outcome)?;
        }
    }

    Ok(())
}

/// Load `--config` and merge the command-line overrides into it.
///
/// Counts given on the command line are held to the same limits as
/// counts read from the file.
fn build_config(args: &Args) -> Result<SiftConfig, SiftError> {
    let mut config = match &args.config {
        Some(path) => SiftConfig::from_file(path)?,
        None => SiftConfig::default(),
    };
    if let Some(seed) = args.seed {
        config = config.with_seed(seed);
    }
    if args.overwrite {
        config = config.with_overwrite(true);
    }
    match &args.command {
        Command::Sample { num_lines, .. } => config.with_count_overrides(None, *num_lines),
        Command::Similar { top_count, .. } | Command::Top { top_count, .. } => {
            config.with_count_overrides(*top_count, None)
        }
    }
}

fn open_output(args: &Args, config: &SiftConfig) -> Result<Box<dyn Write>, SiftError> {
    Ok(match &args.output {
        Some(path) => Box::new(create_output(path, config.overwrite)?),
        None => Box::new(io::stdout().lock()),
    })
}

fn report<T>(
    args: &Args,
    config: &SiftConfig,
    reference: Option<(&str, &T)>,
    outcome: SearchOutcome<T>,
) -> Result<(), Box<dyn Error>> {
    for candidate in &outcome.top {
        info!(label = %candidate.label, score = candidate.score, "top candidate");
    }
    eprintln!("{}", outcome.summary);

    let mut sink = LabelListSink::new(open_output(args, config)?);
    if args.with_scores {
        sink = sink.with_scores();
    }
    if args.with_reference {
        sink = sink.with_reference();
    }
    write_ranked(&mut sink, reference, &outcome.top)?;
    Ok(())
}

fn parse_args_from<I>(raw: I) -> Result<Args, Box<dyn Error>>
where
    I: IntoIterator<Item = String>,
{
    let mut it = raw.into_iter();
    let mut positional: Vec<String> = Vec::new();
    let mut args = Args {
        command: Command::Top {
            scores: PathBuf::new(),
            top_count: None,
        },
        output: None,
        config: None,
        seed: None,
        overwrite: false,
        with_scores: false,
        with_reference: false,
        max_sources: None,
    };

    while let Some(arg) = it.next() {
        match arg.as_str() {
            "--output" | "-o" => {
                args.output = Some(PathBuf::from(required_value(&arg, it.next())?));
            }
            "--config" => {
                args.config = Some(PathBuf::from(required_value(&arg, it.next())?));
            }
            "--seed" => {
                args.seed = Some(required_value(&arg, it.next())?.parse()?);
            }
            "--max-sources" => {
                args.max_sources = Some(required_value(&arg, it.next())?.parse()?);
            }
            "--overwrite" => args.overwrite = true,
            "--scores" => args.with_scores = true,
            "--with-reference" => args.with_reference = true,
            "--help" | "-h" => {
                print_help();
                std::process::exit(0);
            }
            _ if arg.starts_with("--") => {
                return Err(format!("unknown argument: {arg}").into());
            }
            _ => positional.push(arg),
        }
    }

    let required = |i: usize, name: &str| -> Result<String, Box<dyn Error>> {
        positional
            .get(i)
            .cloned()
            .ok_or_else(|| format!("missing <{name}>").into())
    };
    let count = |i: usize| -> Result<Option<i64>, Box<dyn Error>> {
        Ok(positional.get(i).map(|v| v.parse::<i64>()).transpose()?)
    };

    let command = required(0, "command")?;
    let (command, arity) = match command.as_str() {
        "sample" => (
            Command::Sample {
                input: PathBuf::from(required(1, "input")?),
                num_lines: count(2)?,
            },
            3,
        ),
        "similar" => (
            Command::Similar {
                reference: required(1, "reference")?,
                list: PathBuf::from(required(2, "list")?),
                top_count: count(3)?,
            },
            4,
        ),
        "top" => (
            Command::Top {
                scores: PathBuf::from(required(1, "scores")?),
                top_count: count(2)?,
            },
            3,
        ),
        other => return Err(format!("unknown command: {other}").into()),
    };
    if let Some(extra) = positional.get(arity) {
        return Err(format!("unexpected argument: {extra}").into());
    }
    args.command = command;
    check_flags(&args)?;

    Ok(args)
}

/// Reject flags that have no effect on the chosen command.
fn check_flags(args: &Args) -> Result<(), Box<dyn Error>> {
    let given = [
        ("--seed", args.seed.is_some()),
        ("--max-sources", args.max_sources.is_some()),
        ("--scores", args.with_scores),
        ("--with-reference", args.with_reference),
    ];
    let allowed: &[&str] = match args.command {
        Command::Sample { .. } => &["--seed"],
        Command::Similar { .. } => &["--max-sources", "--scores", "--with-reference"],
        Command::Top { .. } => &["--max-sources", "--scores"],
    };
    for (flag, present) in given {
        if present && !allowed.contains(&flag) {
            return Err(format!("{flag} does not apply to `{}`", args.command.name()).into());
        }
    }
    Ok(())
}

fn required_value(flag: &str, value: Option<String>) -> Result<String, Box<dyn Error>> {
    value.ok_or_else(|| format!("missing value for {flag}").into())
}

fn print_help() {
    println!(
        "\
molsift - streaming top-k selection and reservoir sampling

USAGE:
    molsift sample <input> [num_lines] [--seed S]
    molsift similar <reference.fp> <list> [top_count] [--max-sources N] [--scores] [--with-reference]
    molsift top <scores.tsv> [top_count] [--max-sources N] [--scores]

    Omitted counts fall back to sample_size / top_count from --config.
    Counts above 67108864 are rejected. Flags that do not apply to the
    chosen command are rejected.

COMMANDS:
    sample     Print a uniform random sample of lines from <input>
    similar    Rank fingerprint files listed in <list> by Tanimoto similarity
    top        Rank label<TAB>score rows by score

OPTIONS:
    -o, --output PATH    Write results to PATH instead of stdout
        --overwrite      Allow replacing an existing output file
        --scores         Print scores next to labels (similar, top)
        --with-reference Print the reference label first (similar)
        --config FILE    JSON configuration (see SiftConfig)
        --seed S         Seed for sampling (sample)
        --max-sources N  Stop after N sources (similar, top)
    -h, --help           Print this help

Set RUST_LOG=info for progress logs."
    );
}
