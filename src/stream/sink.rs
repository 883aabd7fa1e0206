//! Output sinks for selected candidates and sampled lines.

use crate::error::{Result, SiftError};
use crate::types::ScoredCandidate;
use std::fs::{File, OpenOptions};
use std::io::{BufWriter, Write};
use std::path::Path;

/// Destination for ranked candidates.
///
/// Implementations decide the persisted format; drivers only call these
/// methods in order: `write_reference` (at most once), `append` per
/// candidate best first, then `finish`.
pub trait CandidateSink<T> {
    /// Record the reference item ahead of the candidates.
    fn write_reference(&mut self, _label: &str, _reference: &T) -> Result<()> {
        Ok(())
    }

    /// Append one candidate.
    fn append(&mut self, candidate: &ScoredCandidate<T>) -> Result<()>;

    /// Flush buffered output.
    fn finish(&mut self) -> Result<()> {
        Ok(())
    }
}

/// Writes one label per line, optionally followed by a tab and the score.
///
/// With [`with_reference`](Self::with_reference) the reference label is
/// written first, so the output opens with the query it was ranked against.
#[derive(Debug)]
pub struct LabelListSink<W: Write> {
    writer: W,
    with_scores: bool,
    with_reference: bool,
    written: usize,
}

impl<W: Write> LabelListSink<W> {
    /// Create a sink writing bare labels.
    pub fn new(writer: W) -> Self {
        Self {
            writer,
            with_scores: false,
            with_reference: false,
            written: 0,
        }
    }

    /// Also write each candidate's score.
    pub fn with_scores(mut self) -> Self {
        self.with_scores = true;
        self
    }

    /// Write the reference label ahead of the candidates.
    pub fn with_reference(mut self) -> Self {
        self.with_reference = true;
        self
    }

    /// Number of candidates written.
    pub fn written(&self) -> usize {
        self.written
    }

    /// Recover the writer.
    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl<T, W: Write> CandidateSink<T> for LabelListSink<W> {
    fn write_reference(&mut self, label: &str, _reference: &T) -> Result<()> {
        if self.with_reference {
            writeln!(self.writer, "{label}")?;
        }
        Ok(())
    }

    fn append(&mut self, candidate: &ScoredCandidate<T>) -> Result<()> {
        if self.with_scores {
            writeln!(self.writer, "{}\t{}", candidate.label, candidate.score)?;
        } else {
            writeln!(self.writer, "{}", candidate.label)?;
        }
        self.written += 1;
        Ok(())
    }

    fn finish(&mut self) -> Result<()> {
        self.writer.flush()?;
        Ok(())
    }
}

/// Writes sampled lines verbatim.
#[derive(Debug)]
pub struct LineSink<W: Write> {
    writer: W,
}

impl<W: Write> LineSink<W> {
    /// Create a new line sink.
    pub fn new(writer: W) -> Self {
        Self { writer }
    }

    /// Write one line.
    pub fn append(&mut self, line: &str) -> Result<()> {
        writeln!(self.writer, "{line}")?;
        Ok(())
    }

    /// Write every line of `lines`.
    pub fn extend<S: AsRef<str>>(&mut self, lines: &[S]) -> Result<()> {
        for line in lines {
            self.append(line.as_ref())?;
        }
        Ok(())
    }

    /// Flush and recover the writer.
    pub fn finish(mut self) -> Result<W> {
        self.writer.flush()?;
        Ok(self.writer)
    }
}

/// Write `candidates` best first, with an optional leading reference.
pub fn write_ranked<T, S>(
    sink: &mut S,
    reference: Option<(&str, &T)>,
    candidates: &[ScoredCandidate<T>],
) -> Result<()>
where
    S: CandidateSink<T> + ?Sized,
{
    if let Some((label, item)) = reference {
        sink.write_reference(label, item)?;
    }
    for candidate in candidates {
        sink.append(candidate)?;
    }
    sink.finish()
}

/// Create an output file, refusing to replace an existing one unless
/// `overwrite` is set.
pub fn create_output(path: impl AsRef<Path>, overwrite: bool) -> Result<BufWriter<File>> {
    let path = path.as_ref();
    let mut options = OpenOptions::new();
    options.write(true);
    if overwrite {
        options.create(true).truncate(true);
    } else {
        options.create_new(true);
    }
    let file = options.open(path).map_err(|e| {
        if e.kind() == std::io::ErrorKind::AlreadyExists {
            SiftError::already_exists(format!(
                "{} already exists and overwrite is not allowed",
                path.display()
            ))
        } else {
            e.into()
        }
    })?;
    Ok(BufWriter::new(file))
}
