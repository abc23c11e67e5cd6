//! Multi-source fetch coordinator.
//!
//! Fetches every configured source concurrently, tolerating individual
//! failures, and runs aggregation + classification exactly once after the
//! join barrier — all sources settled, not all succeeded.

use crate::ingest::csv::parse_points;
use crate::ingest::fetch::PayloadFetch;
use crate::processing::{average, classify, combine};
use crate::types::{BandSample, BandSnapshot, Mood, MoodResult, SourceDescriptor};
use futures::future::join_all;
use tracing::{info, warn};

/// Result of one full fetch cycle across all sources.
#[derive(Debug, Clone)]
pub struct FetchOutcome {
    /// All collected points across sources, sorted ascending by timestamp.
    /// Ready for playback.
    pub merged_points: Vec<BandSample>,
    /// Raw payload text of each source that fetched successfully, in
    /// source order. Input to the pattern annotation dispatcher.
    pub raw_texts: Vec<String>,
    /// Global mean-of-means snapshot (zero when every source failed).
    pub snapshot: BandSnapshot,
    /// Mood classified from the global snapshot.
    pub mood: MoodResult,
    /// Sources that produced a payload.
    pub sources_fetched: usize,
    /// Sources that failed and contributed nothing.
    pub sources_failed: usize,
}

/// One source's contribution after its fetch settled.
struct SourceResult {
    points: Vec<BandSample>,
    raw_text: String,
    snapshot: BandSnapshot,
}

/// Fetch all sources concurrently and aggregate the survivors.
///
/// Resolves once every source has either succeeded or failed; a failed
/// source is logged and skipped, never aborting its siblings. An all-failed
/// cycle degrades to empty points, the zero snapshot, and Calm.
pub async fn fetch_all(
    fetcher: &dyn PayloadFetch,
    sources: &[SourceDescriptor],
) -> FetchOutcome {
    let settled = join_all(sources.iter().map(|source| fetch_one(fetcher, source))).await;

    let mut merged_points = Vec::new();
    let mut raw_texts = Vec::new();
    let mut snapshots = Vec::new();
    let mut sources_failed = 0usize;

    for result in settled {
        match result {
            Some(source) => {
                merged_points.extend_from_slice(&source.points);
                raw_texts.push(source.raw_text);
                snapshots.push(source.snapshot);
            }
            None => sources_failed += 1,
        }
    }

    // Playback requires a globally time-ordered sequence; individual
    // sources keep their natural order everywhere else.
    merged_points.sort_by(|a, b| a.timestamp.total_cmp(&b.timestamp));

    let (snapshot, mood) = if snapshots.is_empty() {
        (
            BandSnapshot::default(),
            MoodResult {
                mood: Mood::Calm,
                emoji: Mood::Calm.emoji_key(),
            },
        )
    } else {
        let snapshot = combine(&snapshots);
        (snapshot, classify(&snapshot))
    };

    info!(
        sources_fetched = raw_texts.len(),
        sources_failed,
        points_merged = merged_points.len(),
        mood = %mood.mood,
        "Fetch cycle settled"
    );

    FetchOutcome {
        merged_points,
        raw_texts,
        snapshot,
        mood,
        sources_fetched: snapshots.len(),
        sources_failed,
    }
}

/// Fetch and parse one source; `None` on any failure.
async fn fetch_one(
    fetcher: &dyn PayloadFetch,
    source: &SourceDescriptor,
) -> Option<SourceResult> {
    let raw_text = match fetcher.fetch(source).await {
        Ok(text) => text,
        Err(e) => {
            warn!(source = %source.id, error = %e, "Source fetch failed — skipping");
            return None;
        }
    };

    let points = parse_points(&raw_text);
    let snapshot = average(&points);

    Some(SourceResult {
        points,
        raw_text,
        snapshot,
    })
}
