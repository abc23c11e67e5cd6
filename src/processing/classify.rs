//! Mood classification from an aggregated band snapshot.
//!
//! Ordered first-match rule chain. The rules overlap by construction
//! (e.g. high theta / low alpha satisfies both the Sad and Anxious
//! preconditions when beta is also high), so evaluation order is observable
//! behavior and must not be rearranged.

use crate::types::{BandSnapshot, Mood, MoodResult};

/// Band power considered "elevated".
const HIGH: f64 = 1.0;

/// Band power considered "suppressed".
const LOW: f64 = 0.5;

/// Classify a snapshot into a mood label, first matching rule wins.
pub fn classify(s: &BandSnapshot) -> MoodResult {
    let mood = mood_for(s);
    MoodResult {
        mood,
        emoji: mood.emoji_key(),
    }
}

fn mood_for(s: &BandSnapshot) -> Mood {
    // Elevated theta with suppressed alpha
    if s.theta > HIGH && s.alpha < LOW {
        return Mood::Sad;
    }

    // Elevated theta and alpha, suppressed gamma
    if s.theta > HIGH && s.alpha > HIGH && s.gamma < LOW {
        return Mood::Depressed;
    }

    // Elevated beta with everything else suppressed
    if s.beta > HIGH && s.alpha < LOW && s.delta < LOW && s.theta < LOW {
        return Mood::Stressed;
    }

    // Suppressed alpha with elevated beta
    if s.alpha < LOW && s.beta > HIGH {
        return Mood::Anxious;
    }

    Mood::Calm
}

#[cfg(test)]
mod tests {
    use super::*;

    fn snapshot(d: f64, t: f64, a: f64, b: f64, g: f64) -> BandSnapshot {
        BandSnapshot {
            delta: d,
            theta: t,
            alpha: a,
            beta: b,
            gamma: g,
        }
    }

    #[test]
    fn test_sad_rule() {
        let result = classify(&snapshot(0.0, 1.5, 0.2, 0.0, 0.0));
        assert_eq!(result.mood, Mood::Sad);
        assert_eq!(result.emoji, "sad");
    }

    #[test]
    fn test_depressed_rule_requires_high_alpha() {
        // Alpha is high here, so the Sad rule's alpha < 0.5 fails and the
        // Depressed rule fires instead.
        let result = classify(&snapshot(0.0, 1.5, 1.5, 0.0, 0.1));
        assert_eq!(result.mood, Mood::Depressed);
    }

    #[test]
    fn test_stressed_rule() {
        let result = classify(&snapshot(0.1, 0.1, 0.1, 1.5, 0.0));
        assert_eq!(result.mood, Mood::Stressed);
    }

    #[test]
    fn test_anxious_when_stressed_preconditions_fail() {
        // High beta + low alpha but elevated delta: Stressed requires
        // delta < 0.5, so Anxious picks it up.
        let result = classify(&snapshot(0.8, 0.1, 0.1, 1.5, 0.0));
        assert_eq!(result.mood, Mood::Anxious);
    }

    #[test]
    fn test_sad_wins_over_anxious_on_overlap() {
        // Satisfies both rule 1 (theta high, alpha low) and rule 4
        // (alpha low, beta high) — order resolves to Sad.
        let result = classify(&snapshot(0.0, 1.5, 0.2, 1.5, 0.0));
        assert_eq!(result.mood, Mood::Sad);
    }

    #[test]
    fn test_calm_default() {
        let result = classify(&BandSnapshot::default());
        assert_eq!(result.mood, Mood::Calm);
        assert_eq!(result.emoji, "calm");
    }

    #[test]
    fn test_thresholds_are_strict() {
        // theta exactly 1.0 is not "elevated"
        let result = classify(&snapshot(0.0, 1.0, 0.2, 0.0, 0.0));
        assert_eq!(result.mood, Mood::Calm);
    }
}
