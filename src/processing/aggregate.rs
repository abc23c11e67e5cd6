//! Per-band mean aggregation.

use crate::types::{BandSample, BandSnapshot};

/// Arithmetic mean of each band across all points.
///
/// Returns the all-zero snapshot for empty input — playback and
/// classification both treat "no data" as a flat zero signal.
pub fn average(points: &[BandSample]) -> BandSnapshot {
    if points.is_empty() {
        return BandSnapshot::default();
    }

    let n = points.len() as f64;
    let mut sum = BandSnapshot::default();
    for p in points {
        sum.delta += p.delta;
        sum.theta += p.theta;
        sum.alpha += p.alpha;
        sum.beta += p.beta;
        sum.gamma += p.gamma;
    }

    BandSnapshot {
        delta: sum.delta / n,
        theta: sum.theta / n,
        alpha: sum.alpha / n,
        beta: sum.beta / n,
        gamma: sum.gamma / n,
    }
}

/// Unweighted mean-of-means across per-source snapshots.
///
/// NOT equivalent to a pooled per-sample mean when sources have unequal
/// point counts. That asymmetry is deliberate: each source contributes
/// equally to the global mood regardless of recording length. Returns the
/// zero snapshot for empty input.
pub fn combine(snapshots: &[BandSnapshot]) -> BandSnapshot {
    if snapshots.is_empty() {
        return BandSnapshot::default();
    }

    let n = snapshots.len() as f64;
    let mut sum = BandSnapshot::default();
    for s in snapshots {
        sum.delta += s.delta;
        sum.theta += s.theta;
        sum.alpha += s.alpha;
        sum.beta += s.beta;
        sum.gamma += s.gamma;
    }

    BandSnapshot {
        delta: sum.delta / n,
        theta: sum.theta / n,
        alpha: sum.alpha / n,
        beta: sum.beta / n,
        gamma: sum.gamma / n,
    }
}
