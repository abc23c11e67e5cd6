//! Shared live state for the pipeline.
//!
//! One owned struct behind `Arc<RwLock<>>`, mutated only by the cycle
//! runner and the live-snapshot mirror task — never by ambient observers.

use crate::types::{BandSnapshot, Mood, MoodResult};
use serde::Serialize;

/// Live view of the pipeline, as consumed by a display surface.
#[derive(Debug, Clone, Serialize)]
pub struct LiveState {
    /// Snapshot published by the most recent playback tick.
    pub live_snapshot: BandSnapshot,

    /// Mood classified from the latest fetch cycle's global average.
    pub mood: MoodResult,

    /// Combined pattern-annotation summary from the latest cycle.
    pub summary: String,

    /// Sources that produced a payload in the latest cycle.
    pub sources_fetched: usize,

    /// Sources that failed in the latest cycle.
    pub sources_failed: usize,

    /// Points in the merged playback sequence.
    pub points_merged: usize,

    /// Wall-clock time the latest cycle settled.
    pub last_cycle_time: Option<chrono::DateTime<chrono::Utc>>,
}

impl Default for LiveState {
    fn default() -> Self {
        Self {
            live_snapshot: BandSnapshot::default(),
            mood: MoodResult {
                mood: Mood::Calm,
                emoji: Mood::Calm.emoji_key(),
            },
            summary: String::new(),
            sources_fetched: 0,
            sources_failed: 0,
            points_merged: 0,
            last_cycle_time: None,
        }
    }
}
