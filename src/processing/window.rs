//! Fixed-duration windowing of a sample sequence.

use crate::types::BandSample;

/// Partition `points` into contiguous windows of at most `interval` seconds.
///
/// Sliding start: the first point of each window sets its boundary at
/// `point.timestamp + interval`; the first point at or past the boundary
/// closes the window and seeds the next one. Windows follow the source's
/// natural order — input is never sorted. The final partial window is
/// emitted whenever non-empty; empty input yields no windows at all.
///
/// Concatenating the returned windows reproduces the input exactly.
pub fn window(points: &[BandSample], interval: f64) -> Vec<Vec<BandSample>> {
    let mut windows = Vec::new();
    let mut current: Vec<BandSample> = Vec::new();
    let mut boundary = 0.0;

    for &point in points {
        if current.is_empty() {
            boundary = point.timestamp + interval;
            current.push(point);
            continue;
        }

        if point.timestamp < boundary {
            current.push(point);
        } else {
            windows.push(std::mem::take(&mut current));
            boundary = point.timestamp + interval;
            current.push(point);
        }
    }

    if !current.is_empty() {
        windows.push(current);
    }

    windows
}
