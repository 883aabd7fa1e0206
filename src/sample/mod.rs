//! Single-pass uniform sampling.

mod reservoir;

pub use reservoir::{ReservoirSampler, SlotDraw};
