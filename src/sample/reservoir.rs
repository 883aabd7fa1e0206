//! Reservoir sampling for streaming data (Algorithm R).

use crate::error::{Result, SiftError, checked_capacity};
use rand::prelude::*;
use std::fmt;

/// Upper bound on the slots reserved up front.
const PREALLOC_LIMIT: usize = 4096;

/// Source of uniform slot indices.
///
/// Implemented for every [`rand::Rng`]; tests can supply a scripted source
/// to check the exact bound requested for each element.
pub trait SlotDraw {
    /// Draw uniformly from `[0, upper)`. `upper` is always at least 1.
    fn draw_below(&mut self, upper: u64) -> u64;
}

impl<R: Rng + ?Sized> SlotDraw for R {
    #[inline]
    fn draw_below(&mut self, upper: u64) -> u64 {
        self.gen_range(0..upper)
    }
}

/// Uniform fixed-size sample of a stream of unknown length.
///
/// After `m >= capacity` offers every offered item is in the sample with
/// probability `capacity / m`. Items must be offered exactly once, in
/// arrival order.
pub struct ReservoirSampler<T, R = StdRng> {
    items: Vec<T>,
    capacity: usize,
    count_seen: u64,
    closed: bool,
    rng: R,
}

impl<T> ReservoirSampler<T, StdRng> {
    /// Create a sampler seeded from OS entropy.
    pub fn new(capacity: usize) -> Self {
        Self::with_rng(capacity, StdRng::from_entropy())
    }

    /// Create a sampler with a specific seed.
    pub fn with_seed(capacity: usize, seed: u64) -> Self {
        Self::with_rng(capacity, StdRng::seed_from_u64(seed))
    }

    /// Create a sampler from a signed capacity, rejecting negatives.
    pub fn try_new<N>(capacity: N, seed: Option<u64>) -> Result<Self>
    where
        N: TryInto<usize> + Copy + fmt::Display,
    {
        let capacity = checked_capacity(capacity)?;
        Ok(match seed {
            Some(s) => Self::with_seed(capacity, s),
            None => Self::new(capacity),
        })
    }
}

impl<T, R: SlotDraw> ReservoirSampler<T, R> {
    /// Create a sampler drawing slots from `rng`.
    pub fn with_rng(capacity: usize, rng: R) -> Self {
        Self {
            items: Vec::with_capacity(capacity.min(PREALLOC_LIMIT)),
            capacity,
            count_seen: 0,
            closed: false,
            rng,
        }
    }

    /// Offer the next stream element.
    ///
    /// Returns `Ok(true)` if the item entered the reservoir, either by
    /// filling a free slot or by replacing an earlier one.
    pub fn offer(&mut self, item: T) -> Result<bool> {
        if self.closed {
            return Err(SiftError::sampler_closed());
        }
        self.count_seen += 1;

        if self.items.len() < self.capacity {
            self.items.push(item);
            return Ok(true);
        }
        if self.capacity == 0 {
            return Ok(false);
        }

        // count_seen is the 1-indexed position of this item.
        let slot = self.rng.draw_below(self.count_seen);
        if slot < self.capacity as u64 {
            self.items[slot as usize] = item;
            Ok(true)
        } else {
            Ok(false)
        }
    }

    /// The current sample, `min(count_seen, capacity)` items long.
    ///
    /// Items are in slot order, not arrival order: a late replacement sits
    /// wherever the slot it overwrote was.
    pub fn sample(&self) -> &[T] {
        &self.items
    }

    /// Take the sample.
    pub fn into_sample(self) -> Vec<T> {
        self.items
    }

    /// Get the number of items seen.
    pub fn count_seen(&self) -> u64 {
        self.count_seen
    }

    /// Get the maximum sample size.
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Number of items currently held.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Check if the sample is empty.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Refuse further offers. The sample stays readable.
    pub fn close(&mut self) {
        self.closed = true;
    }

    /// Check if the sampler has been closed.
    pub fn is_closed(&self) -> bool {
        self.closed
    }
}

impl<T: fmt::Debug, R> fmt::Debug for ReservoirSampler<T, R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ReservoirSampler")
            .field("capacity", &self.capacity)
            .field("count_seen", &self.count_seen)
            .field("closed", &self.closed)
            .field("items", &self.items)
            .finish()
    }
}
