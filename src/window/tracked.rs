//! Per-size window state
//!
//! A [`TrackedWindow`] holds the most recent `k` readings in a bounded FIFO
//! together with their running sum, and the best complete-window sum seen
//! across the whole history.

use super::{average, max_window_sum};

#[cfg(feature = "std")]
use std::collections::VecDeque;

#[cfg(not(feature = "std"))]
extern crate alloc;
#[cfg(not(feature = "std"))]
use alloc::collections::VecDeque;

/// Running state for one window size
///
/// Sums are kept as integers, so the only rounding happens at the final
/// division when an average is reported.
#[derive(Clone, Debug)]
pub struct TrackedWindow {
    /// Window size k
    size: usize,
    /// Up to `size` most recent readings, oldest first
    window: VecDeque<i64>,
    /// Sum of `window`
    sum: i128,
    /// Best sum over any complete window so far
    max_sum: i128,
}

impl TrackedWindow {
    /// Build the state for size `k` from an existing history
    ///
    /// Scans every complete window of the history for the initial maximum
    /// and seeds the FIFO with the last `k` readings. Returns `None` when the
    /// history holds fewer than `k` readings.
    pub fn backfill(history: &[i64], k: usize) -> Option<Self> {
        let max_sum = max_window_sum(history, k)?;

        let mut window = VecDeque::with_capacity(k + 1);
        window.extend(history[history.len() - k..].iter().copied());
        let sum = window.iter().map(|&r| r as i128).sum();

        Some(Self {
            size: k,
            window,
            sum,
            max_sum,
        })
    }

    /// Fold a new reading into the window
    ///
    /// Evicts the oldest reading once the FIFO grows past `size`, and raises
    /// the historical maximum whenever the window is complete.
    pub fn push(&mut self, value: i64) {
        self.window.push_back(value);
        self.sum += value as i128;

        if self.window.len() > self.size {
            if let Some(oldest) = self.window.pop_front() {
                self.sum -= oldest as i128;
            }
        }

        if self.window.len() == self.size {
            self.max_sum = self.max_sum.max(self.sum);
        }
    }

    /// Window size k
    pub fn size(&self) -> usize {
        self.size
    }

    /// Sum of the readings currently in the window
    pub fn sum(&self) -> i128 {
        self.sum
    }

    /// Number of readings currently in the window
    pub fn len(&self) -> usize {
        self.window.len()
    }

    /// Check if the window holds no readings
    pub fn is_empty(&self) -> bool {
        self.window.is_empty()
    }

    /// Average of the current window, if it is complete
    pub fn current_average(&self) -> Option<f64> {
        if self.window.len() == self.size {
            Some(average(self.sum, self.size))
        } else {
            None
        }
    }

    /// Largest average over any complete window seen so far
    pub fn max_average(&self) -> f64 {
        average(self.max_sum, self.size)
    }

    /// Iterate the window contents, oldest first
    pub fn iter(&self) -> impl Iterator<Item = &i64> {
        self.window.iter()
    }

    pub(crate) fn size_bytes(&self) -> usize {
        core::mem::size_of::<Self>() + self.window.capacity() * core::mem::size_of::<i64>()
    }
}
