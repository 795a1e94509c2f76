//! Core traits for sliding-window trackers
//!
//! Every tracker implements the base [`WindowSketch`] trait and reports
//! caller mistakes through [`TrackerError`].

use core::fmt::Debug;

/// Error returned by tracker operations
///
/// Every variant is a caller-correctable usage error, detected from the
/// arguments and current state before anything is mutated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TrackerError {
    /// Reading falls outside the tracker's inclusive range
    InvalidReading {
        value: i64,
        min: i64,
        max: i64,
    },
    /// Window size was zero or negative
    InvalidWindowSize(i64),
    /// Window is longer than the recorded history
    InsufficientData {
        requested: usize,
        available: usize,
    },
}

impl core::fmt::Display for TrackerError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            TrackerError::InvalidReading { value, min, max } => {
                write!(f, "invalid reading {}: must be between {} and {}", value, min, max)
            }
            TrackerError::InvalidWindowSize(k) => {
                write!(f, "invalid window size {}: must be a positive integer", k)
            }
            TrackerError::InsufficientData {
                requested,
                available,
            } => write!(
                f,
                "not enough readings: have {}, need {}",
                available, requested
            ),
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for TrackerError {}

/// Core trait for streaming window trackers
pub trait WindowSketch: Clone + Debug {
    /// The type of reading this tracker ingests
    type Item;

    /// Record a reading
    ///
    /// Either fully applies the reading or rejects it without side effects.
    fn update(&mut self, item: Self::Item) -> Result<(), TrackerError>;

    /// Memory usage in bytes
    fn size_bytes(&self) -> usize;

    /// Number of readings recorded
    fn count(&self) -> u64;

    /// Check if nothing has been recorded yet
    fn is_empty(&self) -> bool {
        self.count() == 0
    }
}

/// Validate a caller-supplied window size against the history length
///
/// Shared by every query that reads a window of `k` most recent readings.
pub fn check_window(k: i64, available: usize) -> Result<usize, TrackerError> {
    if k <= 0 {
        return Err(TrackerError::InvalidWindowSize(k));
    }
    // k > 0 here, so the conversion only fails past usize::MAX
    let requested = usize::try_from(k).unwrap_or(usize::MAX);
    if requested > available {
        return Err(TrackerError::InsufficientData {
            requested,
            available,
        });
    }
    Ok(requested)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_check_window() {
        assert_eq!(check_window(3, 5), Ok(3));
        assert_eq!(check_window(5, 5), Ok(5));
        assert_eq!(check_window(0, 5), Err(TrackerError::InvalidWindowSize(0)));
        assert_eq!(check_window(-1, 5), Err(TrackerError::InvalidWindowSize(-1)));
        assert_eq!(
            check_window(6, 5),
            Err(TrackerError::InsufficientData {
                requested: 6,
                available: 5
            })
        );
    }

    #[test]
    fn test_invalid_size_wins_over_missing_data() {
        // Empty history still reports the bad size first
        assert_eq!(check_window(0, 0), Err(TrackerError::InvalidWindowSize(0)));
    }

    #[cfg(feature = "std")]
    #[test]
    fn test_error_display() {
        let err = TrackerError::InvalidReading {
            value: 15,
            min: -10,
            max: 10,
        };
        assert_eq!(err.to_string(), "invalid reading 15: must be between -10 and 10");

        let err = TrackerError::InsufficientData {
            requested: 10,
            available: 5,
        };
        assert_eq!(err.to_string(), "not enough readings: have 5, need 10");
    }
}
