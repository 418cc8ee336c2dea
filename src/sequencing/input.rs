//! Input-boundary coercion
//!
//! Numeric fields arrive as free text. Nothing here fails: an unusable value
//! falls back to a safe default. Parsing reads a leading integer the way a
//! lenient number field does ("12abc" reads as 12), and zero counts as
//! "no value".

/// Default tempo when the field is empty or unusable.
pub const DEFAULT_BPM: u32 = 120;
/// Default resolution when the field is empty or unusable.
pub const DEFAULT_RESOLUTION: usize = 16;
/// Slowest accepted tempo.
pub const MIN_BPM: u32 = 1;
/// Fastest accepted tempo. Faster tempos would queue thousands of ticks per pass.
pub const MAX_BPM: u32 = 999;
/// Longest accepted cycle.
pub const MAX_RESOLUTION: usize = 1024;

/// Parse the leading signed integer of `text`, ignoring surrounding spaces.
pub fn parse_leading_int(text: &str) -> Option<i64> {
    let text = text.trim();
    let (sign, digits) = match text.as_bytes().first() {
        Some(b'-') => (-1, &text[1..]),
        Some(b'+') => (1, &text[1..]),
        _ => (1, text),
    };
    let end = digits
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(digits.len());
    digits[..end].parse::<i64>().ok().map(|n| sign * n)
}

/// Tempo: unparsable, zero or negative becomes 120. Capped at 999.
pub fn coerce_bpm(text: &str) -> u32 {
    (positive_or(text, DEFAULT_BPM as i64) as u32).min(MAX_BPM)
}

/// Period, gate "on" and gate "total": unparsable, zero or negative becomes 1.
pub fn coerce_count(text: &str) -> u32 {
    positive_or(text, 1) as u32
}

/// Offsets: unparsable or negative becomes 0.
pub fn coerce_offset(text: &str) -> u32 {
    match parse_leading_int(text) {
        Some(n) if n > 0 => n.min(u32::MAX as i64) as u32,
        _ => 0,
    }
}

/// Global resolution: unparsable, zero or negative becomes 16. Capped at 1024.
pub fn coerce_resolution(text: &str) -> usize {
    clamp_resolution(positive_or(text, DEFAULT_RESOLUTION as i64) as usize)
}

/// Groove seed: unparsable becomes 0. Negative seeds are allowed.
pub fn coerce_seed(text: &str) -> i64 {
    parse_leading_int(text).unwrap_or(0)
}

/// Tempo from a numeric control: non-positive or non-finite becomes 120,
/// anything else is held to `MIN_BPM..=MAX_BPM`.
pub fn clamp_bpm(bpm: f64) -> f64 {
    if bpm.is_finite() && bpm > 0.0 {
        bpm.clamp(MIN_BPM as f64, MAX_BPM as f64)
    } else {
        DEFAULT_BPM as f64
    }
}

/// Resolution from a numeric control: zero becomes 16, capped at 1024.
pub fn clamp_resolution(resolution: usize) -> usize {
    match resolution {
        0 => DEFAULT_RESOLUTION,
        n => n.min(MAX_RESOLUTION),
    }
}

fn positive_or(text: &str, default: i64) -> i64 {
    match parse_leading_int(text) {
        Some(n) if n > 0 => n.min(u32::MAX as i64),
        _ => default,
    }
}
