//! Slotwatch: vaccination-slot availability watcher
//!
//! Polls a slot-availability API on a fixed interval for a configured set of
//! location codes and fires a paging trigger when a bookable slot appears.
//!
//! # Design
//!
//! - **Sequential loop**: one location fetched and evaluated at a time; the
//!   only suspension points are the inter-cycle sleep and the HTTP calls.
//! - **Full-cycle abort**: a fetch failure skips the rest of the cycle and
//!   the loop sleeps and retries; nothing inside the loop is ever fatal.
//! - **Cooldown**: after any cycle that paged, the next sleep is the long
//!   cooldown interval, then timing returns to normal.
//!
//! # Example
//!
//! ```
//! use slotwatch::availability::model::AvailabilityReport;
//! use slotwatch::availability::select_available;
//!
//! let report = AvailabilityReport { centers: vec![] };
//! assert!(select_available(&report).is_empty());
//! ```

pub mod availability;
pub mod config;
pub mod pager;
pub mod watcher;

// Re-export commonly used types
pub use availability::{AvailabilityClient, FetchError};
pub use config::{Config, ConfigError};
pub use pager::{PagerClient, SendError};
pub use watcher::{CycleOutcome, LoopState, Watcher, WatcherConfig};
