//! Live replay scheduler.
//!
//! Drives a fixed-rate cursor over the merged, time-sorted point sequence
//! and publishes one live [`BandSnapshot`] per tick — an infinite cyclic
//! replay, not a one-shot iterator. Consumers subscribe through a watch
//! channel instead of observing ambient mutable state, and cancellation is
//! an explicit token rather than a dropped timer.

use crate::types::{BandSample, BandSnapshot};
use std::time::Duration;
use tokio::sync::watch;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

/// Scheduler lifecycle: `Idle → Armed → Running`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlaybackState {
    /// No point sequence loaded.
    Idle,
    /// Points loaded, cursor at zero, tick not started.
    Armed,
    /// Tick task active, publishing one sample per period.
    Running,
}

/// Cursor over a non-empty point sequence, wrapping at the end.
///
/// Owns the `{points, cursor}` pair exclusively so the tick task never
/// shares a mutable index with anyone.
struct Reel {
    points: Vec<BandSample>,
    cursor: usize,
}

impl Reel {
    fn new(points: Vec<BandSample>) -> Self {
        Self { points, cursor: 0 }
    }

    /// Sample at the cursor; advances modulo length.
    fn next(&mut self) -> BandSample {
        let sample = self.points[self.cursor];
        self.cursor = (self.cursor + 1) % self.points.len();
        sample
    }
}

/// Fixed-rate playback over a merged point sequence.
///
/// `arm()` loads a sequence and resets the cursor, `start()` begins the
/// periodic tick, `stop()` cancels it. Re-arming while running cancels the
/// prior tick task first — two concurrent cursors can never publish to the
/// same channel.
pub struct PlaybackScheduler {
    tick_period: Duration,
    state: PlaybackState,
    reel: Option<Reel>,
    cancel: Option<CancellationToken>,
    tx: watch::Sender<BandSnapshot>,
}

impl PlaybackScheduler {
    /// Create an idle scheduler with the given tick period.
    ///
    /// The live value starts at the zero snapshot until the first tick.
    pub fn new(tick_period: Duration) -> Self {
        let (tx, _) = watch::channel(BandSnapshot::default());
        Self {
            tick_period,
            state: PlaybackState::Idle,
            reel: None,
            cancel: None,
            tx,
        }
    }

    /// Subscribe to live snapshot updates.
    pub fn subscribe(&self) -> watch::Receiver<BandSnapshot> {
        self.tx.subscribe()
    }

    /// Current lifecycle state.
    pub fn state(&self) -> PlaybackState {
        self.state
    }

    /// Load a point sequence and reset the cursor.
    ///
    /// Ignored for an empty sequence. Cancels any running tick task, so an
    /// `arm()` mid-playback atomically swaps the reel.
    pub fn arm(&mut self, points: Vec<BandSample>) {
        if points.is_empty() {
            debug!("arm() with no points — ignoring");
            return;
        }

        self.cancel_active();
        info!(points = points.len(), "Playback armed");
        self.reel = Some(Reel::new(points));
        self.state = PlaybackState::Armed;
    }

    /// Begin the periodic tick. Only valid from `Armed`.
    pub fn start(&mut self) {
        if self.state != PlaybackState::Armed {
            warn!(state = ?self.state, "start() outside Armed state — ignoring");
            return;
        }
        let Some(mut reel) = self.reel.take() else {
            warn!("start() with no armed reel — ignoring");
            return;
        };

        let token = CancellationToken::new();
        let child = token.clone();
        let tx = self.tx.clone();
        let period = self.tick_period;

        tokio::spawn(async move {
            let mut ticker = tokio::time::interval(period);
            loop {
                tokio::select! {
                    _ = child.cancelled() => break,
                    _ = ticker.tick() => {
                        let sample = reel.next();
                        // Send failure just means no subscribers yet.
                        let _ = tx.send(sample.as_snapshot());
                    }
                }
            }
        });

        self.cancel = Some(token);
        self.state = PlaybackState::Running;
        info!(period_ms = period.as_millis() as u64, "Playback running");
    }

    /// Cancel the active tick task and return to `Idle`.
    pub fn stop(&mut self) {
        self.cancel_active();
        self.reel = None;
        self.state = PlaybackState::Idle;
        info!("Playback stopped");
    }

    fn cancel_active(&mut self) {
        if let Some(token) = self.cancel.take() {
            token.cancel();
        }
    }
}

impl Drop for PlaybackScheduler {
    fn drop(&mut self) {
        self.cancel_active();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn at(ts: f64, delta: f64) -> BandSample {
        BandSample {
            timestamp: ts,
            delta,
            theta: 0.0,
            alpha: 0.0,
            beta: 0.0,
            gamma: 0.0,
        }
    }

    #[test]
    fn test_reel_wraps_cyclically() {
        let mut reel = Reel::new(vec![at(0.0, 1.0), at(1.0, 2.0), at(2.0, 3.0)]);
        let emitted: Vec<f64> = (0..7).map(|_| reel.next().delta).collect();
        assert_eq!(emitted, vec![1.0, 2.0, 3.0, 1.0, 2.0, 3.0, 1.0]);
    }

    #[tokio::test]
    async fn test_arm_empty_is_noop() {
        let mut scheduler = PlaybackScheduler::new(Duration::from_millis(100));
        scheduler.arm(Vec::new());
        assert_eq!(scheduler.state(), PlaybackState::Idle);
    }

    #[tokio::test]
    async fn test_start_requires_armed() {
        let mut scheduler = PlaybackScheduler::new(Duration::from_millis(100));
        scheduler.start();
        assert_eq!(scheduler.state(), PlaybackState::Idle);
    }

    #[tokio::test(start_paused = true)]
    async fn test_ticks_emit_cyclically() {
        let mut scheduler = PlaybackScheduler::new(Duration::from_millis(100));
        let mut rx = scheduler.subscribe();

        scheduler.arm(vec![at(0.0, 1.0), at(1.0, 2.0), at(2.0, 3.0)]);
        assert_eq!(scheduler.state(), PlaybackState::Armed);
        scheduler.start();
        assert_eq!(scheduler.state(), PlaybackState::Running);

        let mut seen = Vec::new();
        for _ in 0..5 {
            rx.changed().await.expect("playback task alive");
            seen.push(rx.borrow_and_update().delta);
        }
        assert_eq!(seen, vec![1.0, 2.0, 3.0, 1.0, 2.0]);
    }

    #[tokio::test(start_paused = true)]
    async fn test_rearm_cancels_prior_cycle() {
        let mut scheduler = PlaybackScheduler::new(Duration::from_millis(100));
        let mut rx = scheduler.subscribe();

        scheduler.arm(vec![at(0.0, 1.0)]);
        scheduler.start();
        rx.changed().await.expect("first tick");
        assert_eq!(rx.borrow_and_update().delta, 1.0);

        // Re-arm without starting: the old tick task must stop publishing.
        scheduler.arm(vec![at(0.0, 9.0)]);
        assert_eq!(scheduler.state(), PlaybackState::Armed);

        tokio::time::sleep(Duration::from_millis(500)).await;
        assert!(!rx.has_changed().expect("channel alive"));

        // Starting the new reel publishes the new points.
        scheduler.start();
        rx.changed().await.expect("second reel tick");
        assert_eq!(rx.borrow_and_update().delta, 9.0);
    }

    #[tokio::test(start_paused = true)]
    async fn test_stop_cancels_ticks() {
        let mut scheduler = PlaybackScheduler::new(Duration::from_millis(100));
        let mut rx = scheduler.subscribe();

        scheduler.arm(vec![at(0.0, 1.0), at(1.0, 2.0)]);
        scheduler.start();
        rx.changed().await.expect("tick");
        let _ = rx.borrow_and_update();

        scheduler.stop();
        assert_eq!(scheduler.state(), PlaybackState::Idle);

        tokio::time::sleep(Duration::from_millis(500)).await;
        assert!(!rx.has_changed().expect("channel alive"));
    }
}
