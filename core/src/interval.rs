//! Interval partitioning of the simulation horizon.
//!
//! The partition is a sorted boundary list `0 = b0 < b1 < ... < bk = T`.
//! Interior cut points are whole seconds. Rates are attached later by
//! the arrival stage, never here.

use crate::{rng::SimRng, types::SimTime};
use serde::{Deserialize, Serialize};

/// Upper bound (exclusive) on the number of intervals.
pub const MAX_INTERVALS: u64 = 10;

/// Contiguous, non-overlapping cover of `[0, horizon]`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Partition {
    boundaries: Vec<SimTime>,
}

impl Partition {
    /// The single trivial interval `[0, horizon]`.
    pub fn single(horizon: SimTime) -> Self {
        Self { boundaries: vec![0.0, horizon] }
    }

    /// All boundary values including `0` and the horizon.
    pub fn boundaries(&self) -> &[SimTime] {
        &self.boundaries
    }

    pub fn interval_count(&self) -> usize {
        self.boundaries.len() - 1
    }

    pub fn horizon(&self) -> SimTime {
        self.boundaries[self.boundaries.len() - 1]
    }

    /// `(start, end)` pairs in ascending order.
    pub fn spans(&self) -> impl Iterator<Item = (SimTime, SimTime)> + '_ {
        self.boundaries.windows(2).map(|w| (w[0], w[1]))
    }
}

/// Half-open span `[start, end)` with its homogeneous arrival rate.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Interval {
    pub start: SimTime,
    pub end:   SimTime,
    pub rate:  f64,
}

impl Interval {
    pub fn is_degenerate(&self) -> bool {
        self.end <= self.start
    }
}

/// Split `[0, horizon]` into `k` intervals, `k` uniform in `[2, min(10, T+1))`.
///
/// Falls back to a single interval when the horizon is too short to
/// choose any `k`.
pub fn partition(horizon: SimTime, rng: &mut SimRng) -> Partition {
    // k-range is [2, min(10, floor(T) + 1)).
    let whole = horizon.floor().max(0.0) as u64;
    let k_upper = MAX_INTERVALS.min(whole.saturating_add(1));
    if k_upper <= 2 {
        log::debug!("partition: horizon {horizon} too short to split, using [0, {horizon}]");
        return Partition::single(horizon);
    }
    let k = 2 + rng.next_u64_below(k_upper - 2);
    partition_into(horizon, k as usize, rng)
}

/// Split `[0, horizon]` into exactly `k` intervals with whole-second cut
/// points drawn without replacement from `{1, ..., ceil(T) - 1}`.
///
/// When fewer than `k - 1` candidates exist the result is the single
/// interval `[0, horizon]`; no randomness is consumed in that case.
pub fn partition_into(horizon: SimTime, k: usize, rng: &mut SimRng) -> Partition {
    let candidates = (horizon.ceil().max(0.0) as u64).saturating_sub(1) as usize;
    let cuts_needed = k.saturating_sub(1);
    if cuts_needed == 0 || candidates < cuts_needed {
        log::debug!(
            "partition: {candidates} cut points available, {cuts_needed} needed; single interval"
        );
        return Partition::single(horizon);
    }

    let mut cuts: Vec<u64> = rng
        .sample_distinct(candidates, cuts_needed)
        .into_iter()
        .map(|i| i as u64 + 1)
        .collect();
    cuts.sort_unstable();

    let mut boundaries = Vec::with_capacity(cuts.len() + 2);
    boundaries.push(0.0);
    boundaries.extend(cuts.into_iter().map(|c| c as SimTime));
    boundaries.push(horizon);

    log::debug!("partition: {k} intervals, boundaries={boundaries:?}");
    Partition { boundaries }
}
