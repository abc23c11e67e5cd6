//! Cycle orchestration: fetch → classify → playback → annotate.

mod state;

pub use state::LiveState;

use crate::annotate::{annotate, AnalysisBackend};
use crate::ingest::coordinator::fetch_all;
use crate::ingest::fetch::PayloadFetch;
use crate::playback::PlaybackScheduler;
use crate::types::SourceDescriptor;
use std::sync::Arc;
use tokio::sync::RwLock;
use tokio_util::sync::CancellationToken;
use tracing::info;

/// Run one full pipeline cycle.
///
/// Fetches all sources, updates the shared state with the classified mood,
/// arms and starts cyclic playback over the merged points, then dispatches
/// pattern annotation over the successfully fetched payloads and stores the
/// combined summary. Playback begins before annotation settles — the live
/// feed never waits on the language model.
pub async fn run_cycle(
    fetcher: &dyn PayloadFetch,
    backend: &dyn AnalysisBackend,
    scheduler: &mut PlaybackScheduler,
    state: &Arc<RwLock<LiveState>>,
    sources: &[SourceDescriptor],
    window_interval: f64,
) {
    let outcome = fetch_all(fetcher, sources).await;

    {
        let mut s = state.write().await;
        s.mood = outcome.mood;
        s.sources_fetched = outcome.sources_fetched;
        s.sources_failed = outcome.sources_failed;
        s.points_merged = outcome.merged_points.len();
        s.last_cycle_time = Some(chrono::Utc::now());
    }

    scheduler.arm(outcome.merged_points);
    scheduler.start();

    let summary = annotate(backend, &outcome.raw_texts, window_interval).await;
    {
        let mut s = state.write().await;
        s.summary = summary;
    }

    let s = state.read().await;
    info!("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━");
    info!("CYCLE COMPLETE");
    info!("   Sources fetched: {}/{}", s.sources_fetched, sources.len());
    info!("   Points merged:   {}", s.points_merged);
    info!("   Mood:            {} ({})", s.mood.mood, s.mood.emoji);
    info!("   Summary length:  {} chars", s.summary.len());
    info!("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━");
}

/// Mirror playback-tick snapshots into the shared state.
///
/// Spawned once at startup; runs until cancellation. Keeps `LiveState`
/// authoritative for consumers that poll state instead of subscribing to
/// the watch channel directly.
pub fn spawn_live_mirror(
    scheduler: &PlaybackScheduler,
    state: Arc<RwLock<LiveState>>,
    cancel: CancellationToken,
) -> tokio::task::JoinHandle<()> {
    let mut rx = scheduler.subscribe();
    tokio::spawn(async move {
        loop {
            tokio::select! {
                _ = cancel.cancelled() => break,
                changed = rx.changed() => {
                    if changed.is_err() {
                        break;
                    }
                    let snapshot = *rx.borrow_and_update();
                    state.write().await.live_snapshot = snapshot;
                }
            }
        }
    })
}
