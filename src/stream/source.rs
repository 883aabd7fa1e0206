//! Lazy line sources.

use crate::error::Result;
use crate::sample::{ReservoirSampler, SlotDraw};
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

/// Lines of `reader` with trailing whitespace stripped.
pub fn read_lines<R: BufRead>(reader: R) -> impl Iterator<Item = Result<String>> {
    reader.lines().map(|line| -> Result<String> {
        let mut line = line?;
        let keep = line.trim_end().len();
        line.truncate(keep);
        Ok(line)
    })
}

/// Trimmed, non-blank entries of a "one source per line" listing.
pub fn source_list<R: BufRead>(reader: R) -> impl Iterator<Item = Result<String>> {
    read_lines(reader).filter_map(|line| match line {
        Ok(line) => {
            let entry = line.trim();
            (!entry.is_empty()).then(|| Ok(entry.to_string()))
        }
        Err(e) => Some(Err(e)),
    })
}

/// Open a file and stream its lines.
pub fn open_lines(path: impl AsRef<Path>) -> Result<impl Iterator<Item = Result<String>>> {
    let file = File::open(path)?;
    Ok(read_lines(BufReader::new(file)))
}

/// Feed every line into `sampler`, in order.
///
/// Returns the number of lines read. Stops at the first I/O error; the
/// sampler keeps what it saw until then.
pub fn sample_lines<I, R>(lines: I, sampler: &mut ReservoirSampler<String, R>) -> Result<u64>
where
    I: IntoIterator<Item = Result<String>>,
    R: SlotDraw,
{
    let mut read = 0u64;
    for line in lines {
        sampler.offer(line?)?;
        read += 1;
    }
    Ok(read)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn test_read_lines_strips_trailing_whitespace() {
        let lines: Vec<String> = read_lines(Cursor::new("  a \nb\t\r\n\nc"))
            .collect::<Result<_>>()
            .unwrap();
        assert_eq!(lines, vec!["  a", "b", "", "c"]);
    }

    #[test]
    fn test_source_list_skips_blanks() {
        let entries: Vec<String> = source_list(Cursor::new("x.mol\n\n  y.mol  \n   \n"))
            .collect::<Result<_>>()
            .unwrap();
        assert_eq!(entries, vec!["x.mol", "y.mol"]);
    }

    #[test]
    fn test_sample_lines_counts() {
        let mut sampler = ReservoirSampler::with_seed(2, 5);
        let read = sample_lines(read_lines(Cursor::new("1\n2\n3\n4\n")), &mut sampler).unwrap();
        assert_eq!(read, 4);
        assert_eq!(sampler.count_seen(), 4);
        assert_eq!(sampler.len(), 2);
    }
}
