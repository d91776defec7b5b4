//! Human-friendly number formatting for cards and stats panels.

/// Compact play count: `2.5M`, `1.5K`, or the plain number below 1,000.
pub fn format_play_count(plays: u64) -> String {
    if plays >= 1_000_000 {
        format!("{:.1}M", plays as f64 / 1_000_000.0)
    } else if plays >= 1_000 {
        format!("{:.1}K", plays as f64 / 1_000.0)
    } else {
        plays.to_string()
    }
}

/// Integer with comma group separators (`22,108`).
pub fn format_thousands(value: u64) -> String {
    let digits = value.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (idx, ch) in digits.chars().enumerate() {
        if idx > 0 && (digits.len() - idx) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

/// Rating with a single decimal.
pub fn format_rating(rating: f64) -> String {
    format!("{rating:.1}")
}
