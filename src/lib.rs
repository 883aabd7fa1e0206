//! # molsift
//!
//! Single-pass selection over very large molecule collections.
//!
//! ## Overview
//!
//! - **Top-k selection**: keep the K most similar candidates of an unbounded
//!   stream in O(K) memory and O(log K) per candidate
//! - **Reservoir sampling**: keep a uniform random sample of N lines from a
//!   stream of unknown length
//! - **Drivers**: feed either component from an injected scoring oracle or
//!   line source, skipping bad candidates instead of aborting
//!
//! ## Quick Start
//!
//! ```rust
//! use molsift::prelude::*;
//!
//! let mut top = TopKSelector::new(2);
//! top.offer(0.9, (), "x").unwrap();
//! top.offer(0.2, (), "y").unwrap();
//! top.offer(0.95, (), "z").unwrap();
//! top.offer(0.5, (), "w").unwrap();
//!
//! let labels: Vec<&str> = top.top().iter().map(|c| c.label.as_str()).collect();
//! assert_eq!(labels, ["z", "x"]);
//! ```
//!
//! ## Sampling
//!
//! ```rust
//! use molsift::prelude::*;
//!
//! let mut sampler = ReservoirSampler::with_seed(3, 42);
//! for line in ["A", "B", "C", "D", "E"] {
//!     sampler.offer(line).unwrap();
//! }
//! assert_eq!(sampler.sample().len(), 3);
//! assert_eq!(sampler.count_seen(), 5);
//! ```
//!
//! ## Module Overview
//!
//! - [`select`]: bounded top-k selector
//! - [`sample`]: reservoir sampler
//! - [`oracle`]: scoring oracle trait and two implementations
//! - [`stream`]: driver loops, line sources and sinks

pub mod oracle;
pub mod sample;
pub mod select;
pub mod stream;

mod config;
mod error;
mod types;

pub use config::{SiftConfig, MAX_CAPACITY};
pub use error::{ErrorCode, Result, SiftError};
pub use types::*;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::config::SiftConfig;
    pub use crate::error::{ErrorCode, Result, SiftError};
    pub use crate::oracle::{Fingerprint, FingerprintOracle, ScoringOracle, TabulatedScores};
    pub use crate::sample::{ReservoirSampler, SlotDraw};
    pub use crate::select::TopKSelector;
    pub use crate::stream::{
        CandidateSink, LabelListSink, LineSink, RunSummary, SearchOutcome, SimilaritySearch,
        SkipReason,
    };
    pub use crate::types::*;
}
