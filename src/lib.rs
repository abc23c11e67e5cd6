//! Neuropulse: brainwave mood intelligence pipeline.
//!
//! Ingests multi-channel EEG band-power time series from remote files,
//! aggregates them into a mood classification, replays them as a continuous
//! live feed, and sends fixed-duration windows of the raw series to a
//! language model for free-text pattern description.
//!
//! ## Architecture
//!
//! - **Ingest**: concurrent per-source fetch with a tolerant join barrier
//! - **Processing**: pure aggregation, windowing, and mood classification
//! - **Annotate**: per-window language-model fan-out joined into a summary
//! - **Playback**: fixed-rate cyclic replay publishing a live snapshot

pub mod annotate;
pub mod config;
pub mod ingest;
pub mod pipeline;
pub mod playback;
pub mod processing;
pub mod types;

// Re-export the core data model
pub use types::{Band, BandSample, BandSnapshot, Mood, MoodResult, SourceDescriptor};

// Re-export configuration
pub use config::Config;

// Re-export pipeline entry points
pub use ingest::{fetch_all, FetchOutcome, HttpPayloadFetch, PayloadFetch};
pub use annotate::{annotate, AnalysisBackend, HttpAnalysisClient};
pub use pipeline::{run_cycle, LiveState};
pub use playback::{PlaybackScheduler, PlaybackState};
