//! Bounded top-k selection over a stream of scored candidates.
//!
//! The retained set lives in a max-heap whose root is the *worst* survivor,
//! so each offer costs O(log k). Output is ordered by descending score with
//! earlier arrivals first on exact ties, which is the order produced by
//! appending every candidate to a list, stable-sorting it by descending
//! score and truncating to k.

use crate::error::{Result, SiftError, checked_capacity};
use crate::types::{Score, ScoredCandidate};
use ordered_float::OrderedFloat;
use std::cmp::Ordering;
use std::collections::BinaryHeap;
use std::fmt;

/// Upper bound on the slots reserved up front.
const PREALLOC_LIMIT: usize = 4096;

/// Heap entry. Orders "worse" candidates as greater so the heap root is
/// the next eviction victim.
#[derive(Debug)]
struct Entry<T> {
    rank: OrderedFloat<Score>,
    seq: u64,
    candidate: ScoredCandidate<T>,
}

impl<T> PartialEq for Entry<T> {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl<T> Eq for Entry<T> {}

impl<T> PartialOrd for Entry<T> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<T> Ord for Entry<T> {
    fn cmp(&self, other: &Self) -> Ordering {
        // Lower score is worse; among equal scores the later arrival is worse.
        other
            .rank
            .cmp(&self.rank)
            .then_with(|| self.seq.cmp(&other.seq))
    }
}

/// Keeps the `k` highest-scoring candidates seen so far.
///
/// Payloads are moved in and never cloned or mutated. The selector is not
/// synchronized; callers feeding it from several workers must funnel
/// offers through a single owner.
pub struct TopKSelector<T> {
    heap: BinaryHeap<Entry<T>>,
    k: usize,
    offered: u64,
}

impl<T> TopKSelector<T> {
    /// Create a selector that retains at most `k` candidates.
    pub fn new(k: usize) -> Self {
        Self {
            // The heap grows on demand; len() never exceeds k.
            heap: BinaryHeap::with_capacity(k.min(PREALLOC_LIMIT)),
            k,
            offered: 0,
        }
    }

    /// Create a selector from a signed capacity, rejecting negatives.
    pub fn try_new<N>(k: N) -> Result<Self>
    where
        N: TryInto<usize> + Copy + fmt::Display,
    {
        Ok(Self::new(checked_capacity(k)?))
    }

    /// Number of retained candidates.
    pub fn len(&self) -> usize {
        self.heap.len()
    }

    /// Check if nothing is retained.
    pub fn is_empty(&self) -> bool {
        self.heap.is_empty()
    }

    /// Get the capacity (k).
    pub fn capacity(&self) -> usize {
        self.k
    }

    /// Number of successful `offer` calls so far.
    pub fn offered(&self) -> u64 {
        self.offered
    }

    /// Lowest retained score once the selector is full.
    ///
    /// Returns `None` while fewer than `k` candidates are held, or when
    /// `k == 0`.
    pub fn threshold(&self) -> Option<Score> {
        if self.k > 0 && self.heap.len() >= self.k {
            self.heap.peek().map(|e| e.rank.0)
        } else {
            None
        }
    }

    /// Check if a candidate with this score would be retained.
    #[inline]
    pub fn would_accept(&self, score: Score) -> bool {
        if score.is_nan() || self.k == 0 {
            return false;
        }
        match self.threshold() {
            Some(worst) => score > worst,
            None => true,
        }
    }

    /// Offer a candidate to the selector.
    ///
    /// Returns `Ok(true)` if the candidate is now among the retained set.
    /// A candidate that only ties the current worst score is dropped, since
    /// the earlier arrival wins. NaN scores fail with `InvalidScore` and
    /// leave the selector untouched.
    pub fn offer(&mut self, score: Score, item: T, label: impl Into<String>) -> Result<bool> {
        if score.is_nan() {
            return Err(SiftError::invalid_score(score));
        }
        let seq = self.offered;
        self.offered += 1;

        if self.k == 0 {
            return Ok(false);
        }

        let entry = Entry {
            rank: OrderedFloat(score),
            seq,
            candidate: ScoredCandidate::new(score, item, label),
        };

        if self.heap.len() < self.k {
            self.heap.push(entry);
            return Ok(true);
        }

        match self.heap.peek_mut() {
            Some(mut worst) if entry < *worst => {
                // PeekMut restores the heap property on drop.
                *worst = entry;
                Ok(true)
            }
            _ => Ok(false),
        }
    }

    /// Retained candidates, best first.
    ///
    /// Scores are non-increasing; equal scores appear in arrival order.
    /// Has no side effects and reflects every offer made so far.
    pub fn top(&self) -> Vec<&ScoredCandidate<T>> {
        let mut entries: Vec<&Entry<T>> = self.heap.iter().collect();
        entries.sort_unstable();
        entries.into_iter().map(|e| &e.candidate).collect()
    }

    /// Consume the selector and return owned candidates, best first.
    pub fn into_sorted_vec(self) -> Vec<ScoredCandidate<T>> {
        self.heap
            .into_sorted_vec()
            .into_iter()
            .map(|e| e.candidate)
            .collect()
    }

    /// Drop all retained candidates and reset the arrival counter.
    pub fn clear(&mut self) {
        self.heap.clear();
        self.offered = 0;
    }
}

impl<T: fmt::Debug> fmt::Debug for TopKSelector<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TopKSelector")
            .field("k", &self.k)
            .field("offered", &self.offered)
            .field("top", &self.top())
            .finish()
    }
}
