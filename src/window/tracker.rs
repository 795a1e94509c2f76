//! Multi-window tracker over a bounded reading feed
//!
//! Keeps the full reading history and a table of [`TrackedWindow`]s keyed by
//! window size. A window size is added to the table the first time its
//! historical maximum is requested, and every later reading is folded into
//! all tracked sizes.

use super::{average, window_count, TrackedWindow, MAX_READING, MIN_READING};
use crate::traits::{check_window, TrackerError, WindowSketch};

#[cfg(feature = "std")]
use std::{collections::BTreeMap, vec::Vec};

#[cfg(not(feature = "std"))]
extern crate alloc;
#[cfg(not(feature = "std"))]
use alloc::{collections::BTreeMap, vec::Vec};

/// Sliding-window average tracker with lazily tracked historical maxima
///
/// `add_reading` costs O(W) for W tracked window sizes. `average(k)` costs
/// O(k). `max_window(k)` scans the whole history the first time a size is
/// requested and is a table lookup afterwards.
///
/// # Example
///
/// ```
/// use windowstats::window::WindowTracker;
///
/// let mut tracker = WindowTracker::new();
///
/// for temp in [10, -10, 5, -5, 8, -8, 3, -3] {
///     tracker.add_reading(temp).unwrap();
/// }
///
/// assert!((tracker.average(4).unwrap() - 0.0).abs() < 1e-9);
/// assert!((tracker.max_window(2).unwrap() - 1.5).abs() < 1e-9);
///
/// // Out-of-range readings are rejected without touching the history
/// assert!(tracker.add_reading(15).is_err());
/// assert_eq!(tracker.len(), 8);
/// ```
///
/// # Concurrency
///
/// The tracker is a plain single-writer structure. Share it across threads
/// by wrapping the whole instance in one lock.
#[derive(Clone, Debug)]
pub struct WindowTracker {
    /// Lowest accepted reading, inclusive
    range_min: i64,
    /// Highest accepted reading, inclusive
    range_max: i64,
    /// Every reading in arrival order
    history: Vec<i64>,
    /// Window size -> tracking state; entries are never removed
    windows: BTreeMap<usize, TrackedWindow>,
    /// Smallest reading seen
    low: Option<i64>,
    /// Largest reading seen
    high: Option<i64>,
}

impl Default for WindowTracker {
    fn default() -> Self {
        Self::new()
    }
}

impl WindowTracker {
    /// Create an empty tracker accepting readings in
    /// [`MIN_READING`, `MAX_READING`]
    pub fn new() -> Self {
        Self::with_range(MIN_READING, MAX_READING)
    }

    /// Create an empty tracker accepting readings in `[min, max]`
    ///
    /// # Panics
    ///
    /// Panics if `min > max`.
    pub fn with_range(min: i64, max: i64) -> Self {
        assert!(min <= max, "min reading must not exceed max reading");

        Self {
            range_min: min,
            range_max: max,
            history: Vec::new(),
            windows: BTreeMap::new(),
            low: None,
            high: None,
        }
    }

    /// Accepted reading range as `(min, max)`, both inclusive
    pub fn range(&self) -> (i64, i64) {
        (self.range_min, self.range_max)
    }

    /// Record a new reading
    ///
    /// The value is checked before anything is mutated, so a rejected
    /// reading leaves the tracker exactly as it was.
    pub fn add_reading(&mut self, value: i64) -> Result<(), TrackerError> {
        if value < self.range_min || value > self.range_max {
            return Err(TrackerError::InvalidReading {
                value,
                min: self.range_min,
                max: self.range_max,
            });
        }

        self.history.push(value);
        self.low = Some(self.low.map_or(value, |low| low.min(value)));
        self.high = Some(self.high.map_or(value, |high| high.max(value)));

        for window in self.windows.values_mut() {
            window.push(value);
        }

        log::trace!(
            "reading {} folded into {} tracked windows",
            value,
            self.windows.len()
        );
        Ok(())
    }

    /// Average of the last `k` readings
    ///
    /// Reads straight from the history and never touches the tracking table.
    pub fn average(&self, k: i64) -> Result<f64, TrackerError> {
        let k = check_window(k, self.history.len())?;
        let sum: i128 = self.history[self.history.len() - k..]
            .iter()
            .map(|&r| r as i128)
            .sum();
        Ok(average(sum, k))
    }

    /// Largest average over any `k` consecutive readings seen so far
    ///
    /// Includes windows that have already scrolled out of the recent
    /// history. The first request for a given `k` backfills from the full
    /// history; later requests are answered from the tracking table.
    pub fn max_window(&mut self, k: i64) -> Result<f64, TrackerError> {
        let available = self.history.len();
        let k = check_window(k, available)?;

        if let Some(window) = self.windows.get(&k) {
            return Ok(window.max_average());
        }

        let window = TrackedWindow::backfill(&self.history, k).ok_or(
            TrackerError::InsufficientData {
                requested: k,
                available,
            },
        )?;
        log::debug!(
            "tracking window size {} after scanning {} historical windows",
            k,
            window_count(available, k)
        );

        let max = window.max_average();
        self.windows.insert(k, window);
        Ok(max)
    }

    /// Tracking state for window size `k`, if it has been requested before
    pub fn window(&self, k: usize) -> Option<&TrackedWindow> {
        self.windows.get(&k)
    }

    /// Check whether window size `k` is being tracked
    pub fn is_tracked(&self, k: usize) -> bool {
        self.windows.contains_key(&k)
    }

    /// Tracked window sizes in ascending order
    pub fn tracked_windows(&self) -> Vec<usize> {
        self.windows.keys().copied().collect()
    }

    /// Every reading recorded so far, oldest first
    pub fn readings(&self) -> &[i64] {
        &self.history
    }

    /// Number of readings recorded
    pub fn len(&self) -> usize {
        self.history.len()
    }

    /// Check if no readings have been recorded
    pub fn is_empty(&self) -> bool {
        self.history.is_empty()
    }

    /// Most recent reading
    pub fn latest(&self) -> Option<i64> {
        self.history.last().copied()
    }

    /// Mean of the entire history
    pub fn overall_average(&self) -> Option<f64> {
        if self.history.is_empty() {
            None
        } else {
            let sum: i128 = self.history.iter().map(|&r| r as i128).sum();
            Some(average(sum, self.history.len()))
        }
    }

    /// Snapshot of the tracker's current state
    pub fn stats(&self) -> TrackerStats {
        TrackerStats {
            total_readings: self.history.len(),
            tracked_windows: self.tracked_windows(),
            latest_reading: self.latest(),
            min_reading: self.low,
            max_reading: self.high,
        }
    }
}

impl WindowSketch for WindowTracker {
    type Item = i64;

    fn update(&mut self, item: Self::Item) -> Result<(), TrackerError> {
        self.add_reading(item)
    }

    fn size_bytes(&self) -> usize {
        core::mem::size_of::<Self>()
            + self.history.capacity() * core::mem::size_of::<i64>()
            + self
                .windows
                .values()
                .map(|w| core::mem::size_of::<usize>() + w.size_bytes())
                .sum::<usize>()
    }

    fn count(&self) -> u64 {
        self.history.len() as u64
    }
}

/// Point-in-time summary of a [`WindowTracker`]
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TrackerStats {
    /// Number of readings recorded
    pub total_readings: usize,
    /// Tracked window sizes, ascending
    pub tracked_windows: Vec<usize>,
    /// Most recent reading
    pub latest_reading: Option<i64>,
    /// Smallest reading seen
    pub min_reading: Option<i64>,
    /// Largest reading seen
    pub max_reading: Option<i64>,
}

impl core::fmt::Display for TrackerStats {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(
            f,
            "readings={} tracked={:?} latest={} min={} max={}",
            self.total_readings,
            self.tracked_windows,
            OrNone(self.latest_reading),
            OrNone(self.min_reading),
            OrNone(self.max_reading)
        )
    }
}

/// Prints `none` for a missing reading
struct OrNone(Option<i64>);

impl core::fmt::Display for OrNone {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self.0 {
            Some(v) => write!(f, "{}", v),
            None => f.write_str("none"),
        }
    }
}

#[cfg(feature = "serde")]
impl serde::Serialize for TrackerStats {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        use serde::ser::SerializeStruct;
        let mut state = serializer.serialize_struct("TrackerStats", 5)?;
        state.serialize_field("total_readings", &self.total_readings)?;
        state.serialize_field("tracked_windows", &self.tracked_windows)?;
        state.serialize_field("latest_reading", &self.latest_reading)?;
        state.serialize_field("min_reading", &self.min_reading)?;
        state.serialize_field("max_reading", &self.max_reading)?;
        state.end()
    }
}

#[cfg(feature = "serde")]
impl serde::Serialize for WindowTracker {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        use serde::ser::SerializeStruct;

        let maxima: BTreeMap<usize, f64> = self
            .windows
            .iter()
            .map(|(&k, w)| (k, w.max_average()))
            .collect();

        let mut state = serializer.serialize_struct("WindowTracker", 4)?;
        state.serialize_field("range_min", &self.range_min)?;
        state.serialize_field("range_max", &self.range_max)?;
        state.serialize_field("readings", &self.history)?;
        state.serialize_field("window_maxima", &maxima)?;
        state.end()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f64 = 1e-9;

    fn tracker_with(readings: &[i64]) -> WindowTracker {
        let mut tracker = WindowTracker::new();
        for &r in readings {
            tracker.add_reading(r).unwrap();
        }
        tracker
    }

    #[test]
    fn test_basic() {
        let mut tracker = tracker_with(&[5, -2, 8, 1, -3, 7, 0, 4, -1, 6]);

        assert_eq!(tracker.len(), 10);
        assert!((tracker.average(3).unwrap() - 3.0).abs() < EPS);
        assert!((tracker.average(5).unwrap() - 16.0 / 5.0).abs() < EPS);
        assert!((tracker.max_window(3).unwrap() - 11.0 / 3.0).abs() < EPS);
        // Best 5-window is the most recent one, [7, 0, 4, -1, 6]
        assert!((tracker.max_window(5).unwrap() - 16.0 / 5.0).abs() < EPS);
    }

    #[test]
    fn test_single_reading() {
        let mut tracker = tracker_with(&[7]);
        assert_eq!(tracker.average(1).unwrap(), 7.0);
        assert_eq!(tracker.max_window(1).unwrap(), 7.0);
    }

    #[test]
    fn test_identical_readings() {
        let mut tracker = tracker_with(&[3; 5]);
        assert_eq!(tracker.average(3).unwrap(), 3.0);
        assert_eq!(tracker.max_window(3).unwrap(), 3.0);
    }

    #[test]
    fn test_rejects_out_of_range() {
        let mut tracker = tracker_with(&[1, 2]);

        assert_eq!(
            tracker.add_reading(11),
            Err(TrackerError::InvalidReading {
                value: 11,
                min: -10,
                max: 10
            })
        );
        assert!(tracker.add_reading(-11).is_err());

        assert_eq!(tracker.readings(), &[1, 2]);
        assert_eq!(tracker.stats().max_reading, Some(2));
    }

    #[test]
    fn test_window_size_errors() {
        let mut tracker = tracker_with(&[1, 2, 3, 4, 5]);

        assert_eq!(tracker.average(0), Err(TrackerError::InvalidWindowSize(0)));
        assert_eq!(tracker.average(-1), Err(TrackerError::InvalidWindowSize(-1)));
        assert_eq!(
            tracker.average(10),
            Err(TrackerError::InsufficientData {
                requested: 10,
                available: 5
            })
        );
        assert_eq!(tracker.max_window(0), Err(TrackerError::InvalidWindowSize(0)));
        assert!(tracker.max_window(6).is_err());

        // Failed queries never start tracking
        assert!(tracker.tracked_windows().is_empty());
    }

    #[test]
    fn test_empty_tracker() {
        let mut tracker = WindowTracker::new();

        assert!(tracker.is_empty());
        assert_eq!(tracker.latest(), None);
        assert_eq!(tracker.overall_average(), None);
        assert!(tracker.average(1).is_err());
        assert!(tracker.max_window(1).is_err());

        let stats = tracker.stats();
        assert_eq!(stats.total_readings, 0);
        assert_eq!(stats.min_reading, None);
        assert_eq!(stats.to_string(), "readings=0 tracked=[] latest=none min=none max=none");
    }

    #[test]
    fn test_lazy_tracking() {
        let mut tracker = tracker_with(&[1, 5, 2]);
        assert!(!tracker.is_tracked(2));

        // average never creates tracking state
        tracker.average(2).unwrap();
        assert!(!tracker.is_tracked(2));

        assert!((tracker.max_window(2).unwrap() - 3.5).abs() < EPS);
        assert!(tracker.is_tracked(2));

        tracker.add_reading(8).unwrap();
        assert!((tracker.max_window(2).unwrap() - 5.0).abs() < EPS);

        let window = tracker.window(2).unwrap();
        assert_eq!(window.iter().copied().collect::<Vec<_>>(), vec![2, 8]);
        assert_eq!(window.sum(), 10);
    }

    #[test]
    fn test_max_window_idempotent() {
        let mut tracker = tracker_with(&[4, -6, 9, 9, -1, 0, 2]);
        let first = tracker.max_window(3).unwrap();
        let second = tracker.max_window(3).unwrap();
        assert_eq!(first, second);
        assert_eq!(tracker.tracked_windows(), vec![3]);
    }

    #[test]
    fn test_stats() {
        let mut tracker = tracker_with(&[-5, 8, 2]);
        tracker.max_window(2).unwrap();
        tracker.max_window(1).unwrap();

        let stats = tracker.stats();
        assert_eq!(
            stats,
            TrackerStats {
                total_readings: 3,
                tracked_windows: vec![1, 2],
                latest_reading: Some(2),
                min_reading: Some(-5),
                max_reading: Some(8),
            }
        );
        assert_eq!(stats.to_string(), "readings=3 tracked=[1, 2] latest=2 min=-5 max=8");
    }

    #[test]
    fn test_custom_range() {
        let mut tracker = WindowTracker::with_range(0, 100);
        assert_eq!(tracker.range(), (0, 100));

        tracker.add_reading(100).unwrap();
        tracker.add_reading(0).unwrap();
        assert!(tracker.add_reading(-1).is_err());
        assert!(tracker.add_reading(101).is_err());
        assert!((tracker.overall_average().unwrap() - 50.0).abs() < EPS);
    }

    #[test]
    #[should_panic]
    fn test_inverted_range_panics() {
        let _ = WindowTracker::with_range(5, -5);
    }

    #[test]
    fn test_sketch_trait() {
        let mut tracker = WindowTracker::new();
        assert!(WindowSketch::is_empty(&tracker));

        tracker.update(3).unwrap();
        assert!(tracker.update(99).is_err());
        assert_eq!(tracker.count(), 1);

        let bare = tracker.size_bytes();
        tracker.max_window(1).unwrap();
        assert!(tracker.size_bytes() > bare);
    }

    #[cfg(feature = "serde")]
    #[test]
    fn test_serialize_stats() {
        let mut tracker = tracker_with(&[1, -1, 4]);
        tracker.max_window(2).unwrap();

        let json = serde_json::to_value(tracker.stats()).unwrap();
        assert_eq!(json["total_readings"], 3);
        assert_eq!(json["tracked_windows"], serde_json::json!([2]));
        assert_eq!(json["min_reading"], -1);

        let json = serde_json::to_value(&tracker).unwrap();
        assert_eq!(json["readings"], serde_json::json!([1, -1, 4]));
        assert_eq!(json["window_maxima"]["2"], 1.5);
    }

    #[cfg(feature = "serde")]
    #[test]
    fn test_serialize_range_apart_from_seen_extremes() {
        let mut tracker = WindowTracker::with_range(-20, 30);
        tracker.add_reading(2).unwrap();
        tracker.add_reading(5).unwrap();

        let json = serde_json::to_value(&tracker).unwrap();
        assert_eq!(json["range_min"], -20);
        assert_eq!(json["range_max"], 30);
        assert!(json.get("min_reading").is_none());
        assert!(json.get("max_reading").is_none());

        let json = serde_json::to_value(tracker.stats()).unwrap();
        assert_eq!(json["min_reading"], 2);
        assert_eq!(json["max_reading"], 5);
    }
}
