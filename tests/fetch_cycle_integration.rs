//! Fetch-cycle integration tests.
//!
//! Drives the multi-source coordinator and the annotation dispatcher with
//! in-memory collaborators, asserting the tolerant-join behavior: partial
//! failure degrades the result, never aborts or hangs it.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};

use neuropulse::annotate::{annotate, AnalysisBackend, AnalysisError};
use neuropulse::ingest::{fetch_all, FetchError, PayloadFetch};
use neuropulse::types::{Mood, SourceDescriptor};

/// In-memory file store: canned payload per source id, everything else 404s.
struct MockStore {
    payloads: HashMap<String, String>,
}

#[async_trait]
impl PayloadFetch for MockStore {
    async fn fetch(&self, source: &SourceDescriptor) -> Result<String, FetchError> {
        self.payloads
            .get(&source.id)
            .cloned()
            .ok_or(FetchError::Status(reqwest::StatusCode::NOT_FOUND))
    }
}

/// Analysis backend that answers with a fixed string, or fails for prompts
/// containing a marker substring.
struct MockAnalysis {
    fail_on: Option<&'static str>,
    calls: AtomicUsize,
}

impl MockAnalysis {
    fn answering() -> Self {
        Self {
            fail_on: None,
            calls: AtomicUsize::new(0),
        }
    }

    fn failing_on(marker: &'static str) -> Self {
        Self {
            fail_on: Some(marker),
            calls: AtomicUsize::new(0),
        }
    }
}

#[async_trait]
impl AnalysisBackend for MockAnalysis {
    async fn analyze(&self, prompt: &str) -> Result<String, AnalysisError> {
        let call = self.calls.fetch_add(1, Ordering::SeqCst);
        if let Some(marker) = self.fail_on {
            if prompt.contains(marker) {
                return Err(AnalysisError::Status(
                    reqwest::StatusCode::INTERNAL_SERVER_ERROR,
                ));
            }
        }
        Ok(format!("pattern {}", call))
    }
}

fn sources(ids: &[&str]) -> Vec<SourceDescriptor> {
    ids.iter()
        .map(|id| SourceDescriptor::new("https://store.test", id))
        .collect()
}

fn payload(rows: &[(f64, f64)]) -> String {
    let mut out = String::from("timestamps,Delta,Theta,Alpha,Beta,Gamma\n");
    for (ts, theta) in rows {
        out.push_str(&format!("{},0.0,{},0.0,0.0,0.0\n", ts, theta));
    }
    out
}

#[tokio::test]
async fn fetch_all_merges_and_sorts_across_sources() {
    let mut payloads = HashMap::new();
    payloads.insert("a".to_string(), payload(&[(3.0, 0.1), (1.0, 0.1)]));
    payloads.insert("b".to_string(), payload(&[(2.0, 0.1), (0.5, 0.1)]));
    let store = MockStore { payloads };

    let outcome = fetch_all(&store, &sources(&["a", "b"])).await;

    assert_eq!(outcome.sources_fetched, 2);
    assert_eq!(outcome.sources_failed, 0);
    let timestamps: Vec<f64> = outcome
        .merged_points
        .iter()
        .map(|p| p.timestamp)
        .collect();
    assert_eq!(timestamps, vec![0.5, 1.0, 2.0, 3.0]);
    assert_eq!(outcome.raw_texts.len(), 2);
}

#[tokio::test]
async fn fetch_all_tolerates_partial_failure() {
    // 2 of 4 sources fail; the cycle still settles and reflects only the
    // survivors' points.
    let mut payloads = HashMap::new();
    payloads.insert("ok-1".to_string(), payload(&[(1.0, 0.2)]));
    payloads.insert("ok-2".to_string(), payload(&[(0.5, 0.2)]));
    let store = MockStore { payloads };

    let outcome = fetch_all(&store, &sources(&["ok-1", "bad-1", "ok-2", "bad-2"])).await;

    assert_eq!(outcome.sources_fetched, 2);
    assert_eq!(outcome.sources_failed, 2);
    assert_eq!(outcome.merged_points.len(), 2);
    assert_eq!(outcome.merged_points[0].timestamp, 0.5);
    assert_eq!(outcome.raw_texts.len(), 2);
}

#[tokio::test]
async fn fetch_all_with_all_failures_degrades_to_neutral() {
    let store = MockStore {
        payloads: HashMap::new(),
    };

    let outcome = fetch_all(&store, &sources(&["x", "y"])).await;

    assert_eq!(outcome.sources_fetched, 0);
    assert_eq!(outcome.sources_failed, 2);
    assert!(outcome.merged_points.is_empty());
    assert!(outcome.raw_texts.is_empty());
    assert_eq!(outcome.mood.mood, Mood::Calm);
    assert_eq!(outcome.snapshot.theta, 0.0);
}

#[tokio::test]
async fn fetch_all_classifies_combined_mood() {
    // One source with high theta and low alpha across the board → Sad.
    let mut payloads = HashMap::new();
    payloads.insert("a".to_string(), payload(&[(0.0, 2.0), (1.0, 2.0)]));
    let store = MockStore { payloads };

    let outcome = fetch_all(&store, &sources(&["a"])).await;

    assert_eq!(outcome.snapshot.theta, 2.0);
    assert_eq!(outcome.mood.mood, Mood::Sad);
    assert_eq!(outcome.mood.emoji, "sad");
}

#[tokio::test]
async fn annotate_joins_window_answers_with_blank_line() {
    let backend = MockAnalysis::answering();
    // Two windows: 0.0–2.9 and 3.0–... at a 3 s interval.
    let raw = payload(&[(0.0, 0.1), (1.0, 0.1), (3.5, 0.1)]);

    let summary = annotate(&backend, &[raw], 3.0).await;

    assert_eq!(summary, "pattern 0\n\npattern 1");
    assert_eq!(backend.calls.load(Ordering::SeqCst), 2);
}

#[tokio::test]
async fn annotate_drops_failed_windows() {
    // The second window's chunk contains the timestamp 3.5 — make its
    // request fail and assert only the surviving answer is joined.
    let backend = MockAnalysis::failing_on("3.5,");
    let raw = payload(&[(0.0, 0.1), (1.0, 0.1), (3.5, 0.1)]);

    let summary = annotate(&backend, &[raw], 3.0).await;

    assert_eq!(summary, "pattern 0");
}

#[tokio::test]
async fn annotate_with_no_windows_yields_empty_summary() {
    let backend = MockAnalysis::answering();

    let summary = annotate(&backend, &[], 3.0).await;
    assert!(summary.is_empty());

    // Header-only payload parses to zero points, so no windows either.
    let header_only = "timestamps,Delta,Theta,Alpha,Beta,Gamma\n".to_string();
    let summary = annotate(&backend, &[header_only], 3.0).await;
    assert!(summary.is_empty());
    assert_eq!(backend.calls.load(Ordering::SeqCst), 0);
}
