//! Scoring oracles.
//!
//! An oracle turns a source identifier (a file path, a table row) into an
//! item and scores items against a reference. Oracles are handed to the
//! drivers in [`crate::stream`] explicitly, so independent runs never share
//! state.
//!
//! - [`FingerprintOracle`]: Tanimoto similarity of on-bit fingerprint files
//! - [`TabulatedScores`]: scores computed upstream, one `label<TAB>score` row
//!   per source

mod fingerprint;
mod table;

pub use fingerprint::{Fingerprint, FingerprintOracle, tanimoto};
pub use table::{ScoreRecord, TabulatedScores};

use crate::error::Result;
use crate::types::Score;

/// External scorer of (reference, candidate) pairs.
pub trait ScoringOracle {
    /// Loaded representation of a source.
    type Item;

    /// Load an item. Failures use `ErrorCode::LoadError` and are skipped by
    /// drivers.
    fn load(&mut self, source: &str) -> Result<Self::Item>;

    /// Score a candidate against the reference.
    ///
    /// `None` means no score is computable for this pair (for example the
    /// candidate has no fingerprint); drivers skip such candidates.
    fn score(&mut self, reference: &Self::Item, candidate: &Self::Item) -> Option<Score>;

    /// Label used when reporting the candidate. Defaults to the source.
    fn label(&self, source: &str, _item: &Self::Item) -> String {
        source.to_string()
    }
}

impl<O: ScoringOracle + ?Sized> ScoringOracle for &mut O {
    type Item = O::Item;

    fn load(&mut self, source: &str) -> Result<Self::Item> {
        (**self).load(source)
    }

    fn score(&mut self, reference: &Self::Item, candidate: &Self::Item) -> Option<Score> {
        (**self).score(reference, candidate)
    }

    fn label(&self, source: &str, item: &Self::Item) -> String {
        (**self).label(source, item)
    }
}
