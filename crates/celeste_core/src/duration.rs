//! Save files store durations as .NET ticks (100 ns each).

use log::debug;

pub const TICKS_PER_MILLISECOND: u64 = 10_000;

const MILLISECONDS_PER_SECOND: u64 = 1_000;
const MILLISECONDS_PER_MINUTE: u64 = 60 * MILLISECONDS_PER_SECOND;
const MILLISECONDS_PER_HOUR: u64 = 60 * MILLISECONDS_PER_MINUTE;

/// Format a raw tick string as `HH:MM:SS.mmm`.
///
/// Absent, blank, non-numeric and negative inputs all format as zero.
pub fn format_ticks(raw: Option<&str>) -> String {
    format_tick_count(parse_ticks(raw))
}

/// Format a tick count as `HH:MM:SS.mmm`.
///
/// Every component is floored, including milliseconds, so a sub-millisecond
/// remainder is dropped. Hours are padded to two digits but never capped.
pub fn format_tick_count(ticks: u64) -> String {
    let total_ms = ticks / TICKS_PER_MILLISECOND;
    let hours = total_ms / MILLISECONDS_PER_HOUR;
    let minutes = (total_ms / MILLISECONDS_PER_MINUTE) % 60;
    let seconds = (total_ms / MILLISECONDS_PER_SECOND) % 60;
    let milliseconds = total_ms % MILLISECONDS_PER_SECOND;
    format!("{hours:02}:{minutes:02}:{seconds:02}.{milliseconds:03}")
}

pub fn parse_ticks(raw: Option<&str>) -> u64 {
    let Some(raw) = raw else {
        return 0;
    };
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return 0;
    }

    if let Ok(ticks) = trimmed.parse::<u64>() {
        return ticks;
    }
    if let Ok(ticks) = trimmed.parse::<i64>() {
        debug!("negative duration {ticks} clamped to 0");
        return 0;
    }

    match trimmed.parse::<f64>() {
        Ok(ticks) if ticks.is_finite() && ticks >= 0.0 => ticks.floor() as u64,
        _ => {
            debug!("unusable duration {raw:?} treated as 0");
            0
        }
    }
}
