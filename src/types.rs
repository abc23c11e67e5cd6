//! Core data types for the brainwave pipeline.
//!
//! Everything here is transient: samples, snapshots, and mood results are
//! recomputed on every fetch cycle. Nothing in this module owns I/O.

use serde::{Deserialize, Serialize};

/// One of the five classical EEG frequency bands.
///
/// Used as a typed accessor key into [`BandSample`] / [`BandSnapshot`] —
/// unknown band names are a compile error, not a silent 0.0 fallback.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Band {
    Delta,
    Theta,
    Alpha,
    Beta,
    Gamma,
}

impl Band {
    /// All bands in canonical (wire) order.
    pub const ALL: [Band; 5] = [
        Band::Delta,
        Band::Theta,
        Band::Alpha,
        Band::Beta,
        Band::Gamma,
    ];

    /// Display name as used in serialized chunk headers.
    pub fn name(self) -> &'static str {
        match self {
            Band::Delta => "Delta",
            Band::Theta => "Theta",
            Band::Alpha => "Alpha",
            Band::Beta => "Beta",
            Band::Gamma => "Gamma",
        }
    }
}

impl std::fmt::Display for Band {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// One time-stamped band-power reading from a single source.
///
/// Timestamps are source-relative seconds, not wall-clock. Duplicate and
/// non-monotonic timestamps are tolerated — the parser never sorts.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BandSample {
    /// Seconds since the start of the source recording
    pub timestamp: f64,
    pub delta: f64,
    pub theta: f64,
    pub alpha: f64,
    pub beta: f64,
    pub gamma: f64,
}

impl BandSample {
    /// Typed band lookup.
    pub fn band(&self, band: Band) -> f64 {
        match band {
            Band::Delta => self.delta,
            Band::Theta => self.theta,
            Band::Alpha => self.alpha,
            Band::Beta => self.beta,
            Band::Gamma => self.gamma,
        }
    }

    /// The five band powers as a snapshot, dropping the timestamp.
    pub fn as_snapshot(&self) -> BandSnapshot {
        BandSnapshot {
            delta: self.delta,
            theta: self.theta,
            alpha: self.alpha,
            beta: self.beta,
            gamma: self.gamma,
        }
    }
}

/// Five band means — both "average over a source" and "current live value".
///
/// Same shape, different lifecycle: per-source averages are computed once
/// per fetch cycle, the live value is replaced once per playback tick.
/// Band values are non-negative whenever all inputs are (the classifier
/// assumes this).
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct BandSnapshot {
    pub delta: f64,
    pub theta: f64,
    pub alpha: f64,
    pub beta: f64,
    pub gamma: f64,
}

impl BandSnapshot {
    /// Typed band lookup.
    pub fn band(&self, band: Band) -> f64 {
        match band {
            Band::Delta => self.delta,
            Band::Theta => self.theta,
            Band::Alpha => self.alpha,
            Band::Beta => self.beta,
            Band::Gamma => self.gamma,
        }
    }
}

/// Discrete mood label derived from an aggregated snapshot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Mood {
    Sad,
    Depressed,
    Stressed,
    Anxious,
    Calm,
}

impl Mood {
    /// Iconography key for the display surface.
    pub fn emoji_key(self) -> &'static str {
        match self {
            Mood::Sad => "sad",
            Mood::Depressed => "depressed",
            Mood::Stressed => "stressed",
            Mood::Anxious => "anxious",
            Mood::Calm => "calm",
        }
    }
}

impl std::fmt::Display for Mood {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Mood::Sad => write!(f, "Sad"),
            Mood::Depressed => write!(f, "Depressed"),
            Mood::Stressed => write!(f, "Stressed"),
            Mood::Anxious => write!(f, "Anxious"),
            Mood::Calm => write!(f, "Calm"),
        }
    }
}

/// Classification output: mood label plus its iconography key.
///
/// Derived, never stored — a pure function of one [`BandSnapshot`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct MoodResult {
    pub mood: Mood,
    pub emoji: &'static str,
}

/// An opaque fetch handle for one remote payload.
///
/// Stateless; built from configuration at startup, never discovered at
/// runtime.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceDescriptor {
    /// Content identifier within the file store
    pub id: String,
    /// Fully-resolved retrieval URL
    pub url: String,
}

impl SourceDescriptor {
    /// Resolve a source id against the file-store base URL.
    pub fn new(base_url: &str, id: &str) -> Self {
        Self {
            id: id.to_string(),
            url: format!("{}/{}", base_url.trim_end_matches('/'), id),
        }
    }
}
