//! Glue between external collaborators and the core components.
//!
//! - [`SimilaritySearch`]: oracle-driven top-k search with skip-and-continue
//! - [`read_lines`], [`source_list`], [`sample_lines`]: lazy line sources
//! - [`CandidateSink`], [`LabelListSink`], [`LineSink`]: result writers

mod search;
mod sink;
mod source;
mod summary;

pub use search::{SimilaritySearch, DEFAULT_PROGRESS_INTERVAL};
pub use sink::{CandidateSink, LabelListSink, LineSink, create_output, write_ranked};
pub use source::{open_lines, read_lines, sample_lines, source_list};
pub use summary::{RunSummary, SearchOutcome, SkipReason, SkippedCandidate, MAX_RECORDED_SKIPS};
