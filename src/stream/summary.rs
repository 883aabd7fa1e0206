//! Run summaries for driver loops.

use crate::types::{Score, ScoredCandidate};
use std::fmt;

/// Skipped candidates kept verbatim; beyond this only the count grows.
pub const MAX_RECORDED_SKIPS: usize = 1000;

/// Why a candidate never reached the selector.
#[derive(Debug, Clone, PartialEq)]
pub enum SkipReason {
    /// The oracle could not load the source.
    LoadFailed(String),
    /// The oracle had no score for the candidate.
    ScoreUnavailable,
    /// The oracle returned a NaN score.
    InvalidScore(Score),
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SkipReason::LoadFailed(msg) => write!(f, "load failed: {msg}"),
            SkipReason::ScoreUnavailable => write!(f, "no score available"),
            SkipReason::InvalidScore(s) => write!(f, "invalid score {s}"),
        }
    }
}

/// A candidate that was skipped.
#[derive(Debug, Clone, PartialEq)]
pub struct SkippedCandidate {
    /// Source identifier as given to the driver.
    pub source: String,
    /// Reason for skipping.
    pub reason: SkipReason,
}

/// Counts for one driver run.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RunSummary {
    /// Sources pulled from the input.
    pub seen: u64,
    /// Candidates offered to the selector.
    pub scored: u64,
    /// Total number of skipped candidates.
    pub skip_count: u64,
    /// The first [`MAX_RECORDED_SKIPS`] skipped candidates.
    pub skipped: Vec<SkippedCandidate>,
    /// Set when the source stream failed before its end.
    pub interrupted: Option<String>,
}

impl RunSummary {
    /// Record a skipped candidate.
    pub fn skip(&mut self, source: &str, reason: SkipReason) {
        self.skip_count += 1;
        if self.skipped.len() < MAX_RECORDED_SKIPS {
            self.skipped.push(SkippedCandidate {
                source: source.to_string(),
                reason,
            });
        }
    }

    /// Check if every source was scored and the stream ran to its end.
    pub fn is_clean(&self) -> bool {
        self.skip_count == 0 && self.interrupted.is_none()
    }
}

impl fmt::Display for RunSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "seen {}, scored {}, skipped {}",
            self.seen, self.scored, self.skip_count
        )?;
        if let Some(reason) = &self.interrupted {
            write!(f, " (input interrupted: {reason})")?;
        }
        for skipped in &self.skipped {
            write!(f, "\n  {}: {}", skipped.source, skipped.reason)?;
        }
        let unlisted = self.skip_count - self.skipped.len() as u64;
        if unlisted > 0 {
            write!(f, "\n  ... and {unlisted} more")?;
        }
        Ok(())
    }
}

/// Result of a similarity search: ranked survivors plus the run summary.
#[derive(Debug, Clone)]
pub struct SearchOutcome<T> {
    /// Best candidates, highest score first.
    pub top: Vec<ScoredCandidate<T>>,
    /// What happened along the way.
    pub summary: RunSummary,
}

impl<T> SearchOutcome<T> {
    /// Labels of the ranked candidates.
    pub fn labels(&self) -> Vec<&str> {
        self.top.iter().map(|c| c.label.as_str()).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_summary_display() {
        let mut summary = RunSummary {
            seen: 3,
            scored: 1,
            ..Default::default()
        };
        summary.skip("a.fp", SkipReason::LoadFailed("unreadable".into()));
        summary.skip("b.fp", SkipReason::ScoreUnavailable);

        let text = summary.to_string();
        assert!(text.starts_with("seen 3, scored 1, skipped 2"));
        assert!(text.contains("a.fp: load failed: unreadable"));
        assert!(text.contains("b.fp: no score available"));
        assert!(!summary.is_clean());
    }

    #[test]
    fn test_skip_list_is_capped() {
        let mut summary = RunSummary::default();
        for i in 0..MAX_RECORDED_SKIPS + 5 {
            summary.skip(&format!("m{i}"), SkipReason::ScoreUnavailable);
        }
        assert_eq!(summary.skipped.len(), MAX_RECORDED_SKIPS);
        assert_eq!(summary.skip_count, (MAX_RECORDED_SKIPS + 5) as u64);
        assert!(summary.to_string().ends_with("... and 5 more"));
    }
}
