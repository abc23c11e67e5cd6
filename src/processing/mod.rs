//! Pure numeric processing: aggregation, mood classification, windowing.
//!
//! Nothing in this module performs I/O or holds state — every function is a
//! pure transformation over parsed samples, which keeps the whole layer
//! unit-testable without a runtime.

pub mod aggregate;
pub mod classify;
pub mod window;

pub use aggregate::{average, combine};
pub use classify::classify;
pub use window::window;
