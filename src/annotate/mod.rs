//! Pattern annotation dispatcher.
//!
//! Re-windows each source's raw payload, serializes every window back into
//! the wire CSV shape, and fans one analysis request out per window. All
//! requests run concurrently under a tolerant join; failed or empty
//! responses are dropped and the survivors are joined into one summary.
//! The result is advisory text only — it never feeds back into mood
//! classification or playback.

pub mod client;

pub use client::{AnalysisBackend, AnalysisError, HttpAnalysisClient};

use crate::ingest::csv::parse_points;
use crate::processing::window;
use crate::types::BandSample;
use futures::future::join_all;
use tracing::{debug, info, warn};

/// Instructional prompt prefixed to every serialized window.
const PATTERN_PROMPT: &str = "The following is a short window of EEG band-power \
readings (columns: timestamp seconds, then Delta, Theta, Alpha, Beta, Gamma \
power). Describe any notable pattern in one or two plain sentences. No \
preamble.\n\n";

/// Header line of a serialized window chunk.
const CHUNK_HEADER: &str = "timestamps,Delta,Theta,Alpha,Beta,Gamma";

/// Annotate every window of every raw payload, joining the answers.
///
/// Settles only after every request for every window across every source
/// has completed; individual failures are logged and dropped. Non-empty
/// answers are joined with a blank line. An all-failed run yields the
/// empty string.
pub async fn annotate(
    backend: &dyn AnalysisBackend,
    raw_texts: &[String],
    interval: f64,
) -> String {
    let mut chunks = Vec::new();
    for raw in raw_texts {
        let points = parse_points(raw);
        for win in window(&points, interval) {
            chunks.push(serialize_window(&win));
        }
    }

    if chunks.is_empty() {
        debug!("No windows to annotate");
        return String::new();
    }

    let total = chunks.len();
    let settled = join_all(chunks.iter().map(|chunk| analyze_one(backend, chunk))).await;

    let answers: Vec<String> = settled.into_iter().flatten().collect();
    info!(
        windows = total,
        answered = answers.len(),
        "Pattern annotation settled"
    );

    answers.join("\n\n")
}

/// Run one analysis request; `None` on failure or an empty answer.
async fn analyze_one(backend: &dyn AnalysisBackend, chunk: &str) -> Option<String> {
    let prompt = format!("{}{}", PATTERN_PROMPT, chunk);
    match backend.analyze(&prompt).await {
        Ok(answer) if !answer.trim().is_empty() => Some(answer),
        Ok(_) => {
            debug!("Empty analysis answer — dropping window");
            None
        }
        Err(e) => {
            warn!(error = %e, "Window analysis failed — dropping window");
            None
        }
    }
}

/// Serialize one window back into the wire CSV shape.
///
/// Fixed header, then one comma-joined row per point with the band order
/// delta/theta/alpha/beta/gamma after the timestamp.
pub fn serialize_window(points: &[BandSample]) -> String {
    let mut out = String::from(CHUNK_HEADER);
    for p in points {
        out.push('\n');
        out.push_str(&format!(
            "{},{},{},{},{},{}",
            p.timestamp, p.delta, p.theta, p.alpha, p.beta, p.gamma
        ));
    }
    out
}
