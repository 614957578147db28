//! Availability querying and eligibility selection
//!
//! The client fetches the raw report for one location code; the filter is a
//! pure pass over it that picks out bookable centers.

pub mod client;
pub mod filter;
pub mod model;

pub use client::{AvailabilityClient, FetchError};
pub use filter::select_available;
pub use model::{AvailabilityReport, Center, Session};
