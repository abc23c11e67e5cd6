//! Delimited-text payload parser.
//!
//! Payload format: a header line followed by one sample per line,
//! comma-separated, field order `timestamp,delta,theta,alpha,beta,gamma`.
//! Extra trailing fields are ignored.

use crate::types::BandSample;

/// Number of leading fields a data line must carry.
const REQUIRED_FIELDS: usize = 6;

/// Parse one raw payload into ordered samples.
///
/// The first non-empty line is treated as a header and discarded. A data
/// line is accepted only if it has at least six fields and fields 0–5 all
/// parse as finite numbers; malformed lines are dropped individually and
/// never fail the payload. Output order matches input order — no sorting.
pub fn parse_points(raw: &str) -> Vec<BandSample> {
    let mut lines = raw.lines().filter(|l| !l.trim().is_empty());

    // Header line — column names, not data.
    if lines.next().is_none() {
        return Vec::new();
    }

    let mut points = Vec::new();
    for line in lines {
        match parse_line(line) {
            Some(point) => points.push(point),
            None => {
                tracing::debug!(line = %line.trim(), "Dropping malformed sample row");
            }
        }
    }
    points
}

/// Parse a single data line; `None` on any field failure.
fn parse_line(line: &str) -> Option<BandSample> {
    let mut values = [0.0f64; REQUIRED_FIELDS];
    let mut fields = line.split(',');

    for slot in &mut values {
        let field = fields.next()?;
        let value: f64 = field.trim().parse().ok()?;
        if !value.is_finite() {
            return None;
        }
        *slot = value;
    }

    Some(BandSample {
        timestamp: values[0],
        delta: values[1],
        theta: values[2],
        alpha: values[3],
        beta: values[4],
        gamma: values[5],
    })
}
