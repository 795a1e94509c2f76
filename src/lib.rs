//! # Windowstats
//!
//! Streaming sliding-window averages for bounded integer sensor feeds.
//!
//! Windowstats ingests one reading at a time and answers two questions for
//! any window size `k` a caller cares about: what is the mean of the last `k`
//! readings, and what is the best mean ever seen over `k` consecutive
//! readings, including windows that have long since scrolled out.
//!
//! ## Features
//!
//! - **Recent averages**: mean of the last `k` readings straight from history
//! - **Historical maxima**: best `k`-window mean, backfilled on first request
//! - **Incremental updates**: every tracked size updated in O(1) per reading
//! - **Atomic validation**: rejected readings never touch the tracker
//!
//! ## Quick Start
//!
//! ```rust
//! use windowstats::prelude::*;
//!
//! let mut tracker = WindowTracker::new();
//! for temp in [3, -1, 5, 2, -4, 8, 0] {
//!     tracker.add_reading(temp).unwrap();
//! }
//!
//! println!("last 5: {:.2}", tracker.average(5).unwrap());
//! println!("best 5: {:.2}", tracker.max_window(5).unwrap());
//! println!("{}", tracker.stats());
//! ```
//!
//! ## Error Handling
//!
//! Every operation returns [`TrackerError`](traits::TrackerError) for bad
//! input:
//!
//! ```rust
//! use windowstats::prelude::*;
//!
//! let mut tracker = WindowTracker::new();
//! tracker.add_reading(1).unwrap();
//!
//! assert!(matches!(tracker.add_reading(11), Err(TrackerError::InvalidReading { .. })));
//! assert!(matches!(tracker.average(0), Err(TrackerError::InvalidWindowSize(0))));
//! assert!(matches!(tracker.max_window(2), Err(TrackerError::InsufficientData { .. })));
//! ```
//!
//! ## Feature Flags
//!
//! - `window` (default): [`WindowTracker`] and friends
//! - `std` (default): Standard library support
//! - `serde`: Serialize trackers and stats snapshots
//! - `cli`: The `windowstats` demo binary
//! - `full`: Everything except the binary

#![cfg_attr(not(feature = "std"), no_std)]
#![cfg_attr(docsrs, feature(doc_cfg))]

#[cfg(not(feature = "std"))]
extern crate alloc;

// Core traits always available
pub mod traits;

#[cfg(feature = "window")]
#[cfg_attr(docsrs, doc(cfg(feature = "window")))]
pub mod window;

pub mod prelude {
    pub use crate::traits::*;

    #[cfg(feature = "window")]
    pub use crate::window::{TrackedWindow, TrackerStats, WindowTracker};
}

#[cfg(feature = "window")]
pub use window::{TrackerStats, WindowTracker};
