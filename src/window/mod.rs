//! Sliding-window averages over a bounded integer feed
//!
//! This module tracks the mean of the most recent `k` readings and the best
//! mean ever seen over any `k` consecutive readings, for any number of
//! window sizes chosen at query time.
//!
//! # Algorithms
//!
//! - [`WindowTracker`]: full history plus one [`TrackedWindow`] per queried
//!   size, each updated in O(1) per reading
//!
//! # Example
//!
//! ```
//! use windowstats::window::WindowTracker;
//!
//! let mut tracker = WindowTracker::new();
//!
//! for temp in [5, -2, 8, 1, -3, 7, 0, 4, -1, 6] {
//!     tracker.add_reading(temp).unwrap();
//! }
//!
//! assert!((tracker.average(3).unwrap() - 3.0).abs() < 1e-9);
//! assert!((tracker.max_window(3).unwrap() - 11.0 / 3.0).abs() < 1e-9);
//! ```

mod tracked;
mod tracker;

pub use tracked::TrackedWindow;
pub use tracker::{TrackerStats, WindowTracker};

/// Lowest reading accepted by [`WindowTracker::new`]
pub const MIN_READING: i64 = -10;

/// Highest reading accepted by [`WindowTracker::new`]
pub const MAX_READING: i64 = 10;

/// Number of complete windows of size `k` in a history of `len` readings
pub fn window_count(len: usize, k: usize) -> usize {
    if k == 0 || k > len {
        0
    } else {
        len - k + 1
    }
}

/// Largest sum over any `k` consecutive readings
///
/// Slides a single running sum across the history, so the scan is
/// O(readings.len()) regardless of `k`. Returns `None` when no complete
/// window exists.
pub(crate) fn max_window_sum(readings: &[i64], k: usize) -> Option<i128> {
    if window_count(readings.len(), k) == 0 {
        return None;
    }

    let mut sum: i128 = readings[..k].iter().map(|&r| r as i128).sum();
    let mut best = sum;
    for i in k..readings.len() {
        sum += readings[i] as i128 - readings[i - k] as i128;
        best = best.max(sum);
    }
    Some(best)
}

/// Largest average over any `k` consecutive readings
///
/// Reference scan over the whole slice. [`WindowTracker::max_window`] uses
/// the same scan once per window size and then updates incrementally.
pub fn max_window_average(readings: &[i64], k: usize) -> Option<f64> {
    max_window_sum(readings, k).map(|sum| average(sum, k))
}

#[inline]
pub(crate) fn average(sum: i128, k: usize) -> f64 {
    sum as f64 / k as f64
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_window_count() {
        assert_eq!(window_count(10, 3), 8);
        assert_eq!(window_count(3, 3), 1);
        assert_eq!(window_count(2, 3), 0);
        assert_eq!(window_count(5, 0), 0);
    }

    #[test]
    fn test_max_window_average() {
        let readings = [5, -2, 8, 1, -3, 7, 0, 4, -1, 6];
        let best = max_window_average(&readings, 3).unwrap();
        assert!((best - 11.0 / 3.0).abs() < 1e-9);

        // k == len gives the overall mean
        let all = max_window_average(&readings, readings.len()).unwrap();
        assert!((all - 2.5).abs() < 1e-9);
    }

    #[test]
    fn test_max_window_average_too_short() {
        assert_eq!(max_window_average(&[1, 2], 3), None);
        assert_eq!(max_window_average(&[], 1), None);
    }

    #[test]
    fn test_max_window_sum_negative() {
        assert_eq!(max_window_sum(&[-5, -8, -2, -10, -1], 2), Some(-10));
    }
}
