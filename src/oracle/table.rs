//! Scores computed upstream, streamed as `label<TAB>score` rows.

use super::ScoringOracle;
use crate::error::{Result, SiftError};
use crate::types::Score;

/// Tokens treated as "no score" in the score column.
const MISSING_SCORE: [&str; 4] = ["", "NA", "NaN", "None"];

/// One parsed row.
#[derive(Debug, Clone, PartialEq)]
pub struct ScoreRecord {
    /// Candidate label (first column).
    pub label: String,
    /// Score, or `None` if the row carries no score.
    pub score: Option<Score>,
}

/// Oracle whose sources are table rows.
///
/// The reference plays no part in scoring; each row already carries its
/// score against it.
#[derive(Debug, Default, Clone, Copy)]
pub struct TabulatedScores;

impl TabulatedScores {
    /// Placeholder reference for [`crate::stream::SimilaritySearch::with_reference`].
    pub fn reference() -> ScoreRecord {
        ScoreRecord {
            label: String::from("reference"),
            score: None,
        }
    }

    /// Parse one `label<TAB>score` row.
    pub fn parse_row(row: &str) -> Result<ScoreRecord> {
        let (label, raw) = row
            .split_once('\t')
            .ok_or_else(|| SiftError::load(format!("row without a tab: '{row}'")))?;
        let label = label.trim();
        if label.is_empty() {
            return Err(SiftError::load(format!("row without a label: '{row}'")));
        }
        let raw = raw.trim();
        let score = if MISSING_SCORE.contains(&raw) {
            None
        } else {
            Some(
                raw.parse::<Score>()
                    .map_err(|_| SiftError::load(format!("bad score '{raw}' for {label}")))?,
            )
        };
        Ok(ScoreRecord {
            label: label.to_string(),
            score,
        })
    }
}

impl ScoringOracle for TabulatedScores {
    type Item = ScoreRecord;

    fn load(&mut self, source: &str) -> Result<ScoreRecord> {
        Self::parse_row(source)
    }

    fn score(&mut self, _reference: &ScoreRecord, candidate: &ScoreRecord) -> Option<Score> {
        candidate.score
    }

    fn label(&self, _source: &str, item: &ScoreRecord) -> String {
        item.label.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorCode;

    #[test]
    fn test_parse_row() {
        let rec = TabulatedScores::parse_row("mol-3.mol\t0.75").unwrap();
        assert_eq!(rec.label, "mol-3.mol");
        assert_eq!(rec.score, Some(0.75));
    }

    #[test]
    fn test_missing_score() {
        let rec = TabulatedScores::parse_row("mol-4.mol\tNA").unwrap();
        assert_eq!(rec.score, None);
        let rec = TabulatedScores::parse_row("mol-5.mol\t").unwrap();
        assert_eq!(rec.score, None);
    }

    #[test]
    fn test_malformed_rows() {
        for row in ["no-tab 0.5", "\t0.5", "mol\tabc"] {
            let err = TabulatedScores::parse_row(row).unwrap_err();
            assert_eq!(err.code(), ErrorCode::LoadError, "row {row:?}");
        }
    }

    #[test]
    fn test_label_comes_from_row() {
        let mut oracle = TabulatedScores;
        let rec = oracle.load("a.mol\t1").unwrap();
        assert_eq!(oracle.label("a.mol\t1", &rec), "a.mol");
        assert_eq!(oracle.score(&TabulatedScores::reference(), &rec), Some(1.0));
    }
}
