//! Similarity search driver.
//!
//! Pulls source identifiers one at a time, asks the oracle to load and
//! score each against the reference, and feeds survivors to a
//! [`TopKSelector`]. Per-candidate failures are recorded in the
//! [`RunSummary`] and never stop the stream.

use super::summary::{RunSummary, SearchOutcome, SkipReason};
use crate::error::Result;
use crate::oracle::ScoringOracle;
use crate::select::TopKSelector;
use tracing::{debug, info, instrument, warn};

/// Default number of sources between progress log lines.
pub const DEFAULT_PROGRESS_INTERVAL: u64 = 10_000;

/// Streams candidates through an oracle into a top-k selector.
pub struct SimilaritySearch<O: ScoringOracle> {
    oracle: O,
    reference: O::Item,
    reference_label: String,
    progress_interval: u64,
}

impl<O: ScoringOracle> SimilaritySearch<O> {
    /// Load the reference through `oracle`.
    ///
    /// Unlike candidate failures, a reference that cannot be loaded is an
    /// error: there is nothing to compare against.
    pub fn new(mut oracle: O, reference_source: &str) -> Result<Self> {
        let reference = oracle.load(reference_source)?;
        let reference_label = oracle.label(reference_source, &reference);
        Ok(Self {
            oracle,
            reference,
            reference_label,
            progress_interval: DEFAULT_PROGRESS_INTERVAL,
        })
    }

    /// Use an already loaded reference.
    pub fn with_reference(oracle: O, reference: O::Item, label: impl Into<String>) -> Self {
        Self {
            oracle,
            reference,
            reference_label: label.into(),
            progress_interval: DEFAULT_PROGRESS_INTERVAL,
        }
    }

    /// Log progress every `interval` sources (0 disables).
    pub fn with_progress_interval(mut self, interval: u64) -> Self {
        self.progress_interval = interval;
        self
    }

    /// Get the reference item.
    pub fn reference(&self) -> &O::Item {
        &self.reference
    }

    /// Get the reference label.
    pub fn reference_label(&self) -> &str {
        &self.reference_label
    }

    /// Get the oracle.
    pub fn oracle(&self) -> &O {
        &self.oracle
    }

    /// Split into oracle and reference.
    pub fn into_parts(self) -> (O, O::Item) {
        (self.oracle, self.reference)
    }

    /// Keep the `top_count` best candidates of `sources`.
    pub fn search<I, S>(&mut self, sources: I, top_count: usize) -> SearchOutcome<O::Item>
    where
        I: IntoIterator<Item = Result<S>>,
        S: AsRef<str>,
    {
        self.search_limited(sources, top_count, None)
    }

    /// Like [`search`](Self::search), but stop after `max_sources` sources.
    ///
    /// Stopping early yields the best of what was read so far.
    #[instrument(skip(self, sources), fields(reference = %self.reference_label))]
    pub fn search_limited<I, S>(
        &mut self,
        sources: I,
        top_count: usize,
        max_sources: Option<u64>,
    ) -> SearchOutcome<O::Item>
    where
        I: IntoIterator<Item = Result<S>>,
        S: AsRef<str>,
    {
        let mut selector = TopKSelector::new(top_count);
        let mut summary = RunSummary::default();

        for source in sources {
            if max_sources.is_some_and(|max| summary.seen >= max) {
                info!(seen = summary.seen, "source limit reached");
                break;
            }
            let source = match source {
                Ok(source) => source,
                Err(e) => {
                    warn!(error = %e, "source stream failed, keeping partial results");
                    summary.interrupted = Some(e.to_string());
                    break;
                }
            };
            let source = source.as_ref();
            summary.seen += 1;

            self.process(source, &mut selector, &mut summary);

            if self.progress_interval > 0 && summary.seen % self.progress_interval == 0 {
                info!(
                    seen = summary.seen,
                    scored = summary.scored,
                    skipped = summary.skip_count,
                    "progress"
                );
            }
        }

        info!(
            seen = summary.seen,
            scored = summary.scored,
            skipped = summary.skip_count,
            kept = selector.len(),
            "search finished"
        );

        SearchOutcome {
            top: selector.into_sorted_vec(),
            summary,
        }
    }

    fn process(
        &mut self,
        source: &str,
        selector: &mut TopKSelector<O::Item>,
        summary: &mut RunSummary,
    ) {
        let item = match self.oracle.load(source) {
            Ok(item) => item,
            Err(e) => {
                warn!(source, error = %e, "skipping candidate");
                summary.skip(source, SkipReason::LoadFailed(e.message().to_string()));
                return;
            }
        };

        let Some(score) = self.oracle.score(&self.reference, &item) else {
            debug!(source, "no score available, skipping");
            summary.skip(source, SkipReason::ScoreUnavailable);
            return;
        };
        if score.is_nan() {
            debug!(source, "NaN score, skipping");
            summary.skip(source, SkipReason::InvalidScore(score));
            return;
        }

        let label = self.oracle.label(source, &item);
        match selector.offer(score, item, label) {
            Ok(kept) => {
                summary.scored += 1;
                debug!(source, score, kept, "scored");
            }
            Err(_) => summary.skip(source, SkipReason::InvalidScore(score)),
        }
    }
}
