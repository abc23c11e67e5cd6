//! Remote payload ingestion: CSV parsing, file-store fetch, and the
//! multi-source fetch coordinator.

pub mod coordinator;
pub mod csv;
pub mod fetch;

pub use coordinator::{fetch_all, FetchOutcome};
pub use csv::parse_points;
pub use fetch::{FetchError, HttpPayloadFetch, PayloadFetch};
