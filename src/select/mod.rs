//! Streaming top-k selection.
//!
//! This module keeps the best-scoring candidates of an unbounded stream in
//! bounded memory.

mod top_k;

pub use top_k::TopKSelector;
