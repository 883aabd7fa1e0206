//! Tanimoto scoring of on-bit fingerprints.
//!
//! A fingerprint file holds the indices of set bits separated by commas
//! and/or whitespace, e.g. `3,17,42,1021`.

use super::ScoringOracle;
use crate::error::{Result, SiftError};
use crate::types::Score;
use std::fs;
use std::path::Path;

/// Sorted, de-duplicated set-bit indices.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Fingerprint {
    bits: Vec<u32>,
}

impl Fingerprint {
    /// Build from arbitrary bit indices.
    pub fn from_bits(mut bits: Vec<u32>) -> Self {
        bits.sort_unstable();
        bits.dedup();
        Self { bits }
    }

    /// Parse a comma or whitespace separated on-bit list.
    pub fn parse(text: &str) -> Result<Self> {
        let bits = text
            .split(|c: char| c == ',' || c.is_whitespace())
            .filter(|tok| !tok.is_empty())
            .map(|tok| {
                tok.parse::<u32>()
                    .map_err(|_| SiftError::load(format!("bad fingerprint bit '{tok}'")))
            })
            .collect::<Result<Vec<_>>>()?;
        Ok(Self::from_bits(bits))
    }

    /// Read and parse a fingerprint file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = fs::read_to_string(path)
            .map_err(|e| SiftError::load(format!("{}: {e}", path.display())))?;
        Self::parse(&text)
            .map_err(|e| SiftError::load(format!("{}: {}", path.display(), e.message())))
    }

    /// Set-bit indices in ascending order.
    pub fn bits(&self) -> &[u32] {
        &self.bits
    }

    /// Number of set bits.
    pub fn count_ones(&self) -> usize {
        self.bits.len()
    }

    /// Check if no bit is set.
    pub fn is_empty(&self) -> bool {
        self.bits.is_empty()
    }
}

/// Tanimoto similarity `|A ∩ B| / |A ∪ B|`.
///
/// Returns `None` when both fingerprints are empty.
pub fn tanimoto(a: &Fingerprint, b: &Fingerprint) -> Option<Score> {
    let (a, b) = (a.bits(), b.bits());
    let mut intersection = 0usize;
    let mut i = 0;
    let mut j = 0;

    while i < a.len() && j < b.len() {
        if a[i] == b[j] {
            intersection += 1;
            i += 1;
            j += 1;
        } else if a[i] < b[j] {
            i += 1;
        } else {
            j += 1;
        }
    }

    let union = a.len() + b.len() - intersection;
    if union == 0 {
        return None;
    }
    Some(intersection as Score / union as Score)
}

/// Oracle over fingerprint files: sources are file paths.
#[derive(Debug, Default, Clone)]
pub struct FingerprintOracle {
    loaded: u64,
}

impl FingerprintOracle {
    /// Create a new oracle.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of fingerprints loaded successfully.
    pub fn loaded(&self) -> u64 {
        self.loaded
    }
}

impl ScoringOracle for FingerprintOracle {
    type Item = Fingerprint;

    fn load(&mut self, source: &str) -> Result<Fingerprint> {
        let fp = Fingerprint::from_file(source)?;
        self.loaded += 1;
        Ok(fp)
    }

    fn score(&mut self, reference: &Fingerprint, candidate: &Fingerprint) -> Option<Score> {
        // An empty candidate has no usable fingerprint.
        if candidate.is_empty() {
            return None;
        }
        tanimoto(reference, candidate)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorCode;

    #[test]
    fn test_parse_mixed_separators() {
        let fp = Fingerprint::parse("5, 3,3\n9 1").unwrap();
        assert_eq!(fp.bits(), &[1, 3, 5, 9]);
        assert_eq!(fp.count_ones(), 4);
    }

    #[test]
    fn test_parse_rejects_garbage() {
        let err = Fingerprint::parse("1,x,3").unwrap_err();
        assert_eq!(err.code(), ErrorCode::LoadError);
    }

    #[test]
    fn test_tanimoto() {
        let a = Fingerprint::from_bits(vec![1, 2, 3, 4]);
        let b = Fingerprint::from_bits(vec![3, 4, 5, 6]);
        let sim = tanimoto(&a, &b).unwrap();
        assert!((sim - 2.0 / 6.0).abs() < 1e-12);
        assert_eq!(tanimoto(&a, &a), Some(1.0));
    }

    #[test]
    fn test_tanimoto_empty() {
        let empty = Fingerprint::default();
        let a = Fingerprint::from_bits(vec![7]);
        assert_eq!(tanimoto(&empty, &empty), None);
        assert_eq!(tanimoto(&empty, &a), Some(0.0));
    }

    #[test]
    fn test_oracle_skips_empty_candidate() {
        let mut oracle = FingerprintOracle::new();
        let reference = Fingerprint::from_bits(vec![1, 2]);
        assert_eq!(oracle.score(&reference, &Fingerprint::default()), None);
    }

    #[test]
    fn test_oracle_missing_file_is_load_error() {
        let mut oracle = FingerprintOracle::new();
        let err = oracle.load("/nonexistent/molsift/none.fp").unwrap_err();
        assert_eq!(err.code(), ErrorCode::LoadError);
        assert_eq!(oracle.loaded(), 0);
    }
}
