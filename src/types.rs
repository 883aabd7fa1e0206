//! Core type definitions for molsift.

use serde::{Deserialize, Serialize};

/// Similarity or ranking value attached to a candidate.
pub type Score = f64;

/// A candidate paired with its score and provenance label.
///
/// `item` is an opaque payload: a molecule handle, a numeric record id,
/// or nothing at all. `label` identifies where the candidate came from
/// (a file name, an SDF record index) and never takes part in ordering.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoredCandidate<T> {
    /// Similarity score. Never NaN once accepted by a selector.
    pub score: Score,
    /// Caller-owned payload.
    pub item: T,
    /// Provenance identifier used for reporting.
    pub label: String,
}

impl<T> ScoredCandidate<T> {
    /// Create a new scored candidate.
    pub fn new(score: Score, item: T, label: impl Into<String>) -> Self {
        Self {
            score,
            item,
            label: label.into(),
        }
    }

    /// Replace the payload, keeping score and label.
    pub fn map_item<U>(self, f: impl FnOnce(T) -> U) -> ScoredCandidate<U> {
        ScoredCandidate {
            score: self.score,
            item: f(self.item),
            label: self.label,
        }
    }
}
