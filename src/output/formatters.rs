//! Reusable formatting utilities for CLI output

/// Placeholder for missing values
pub const NONE: &str = "--";

/// Format a remaining lifetime in seconds.
///
/// # Example output
/// - `1h 5m` (hours, minutes)
/// - `5m 10s` (minutes, seconds)
/// - `45s` (seconds only)
/// - `expired` when zero
pub fn format_remaining(secs: u64) -> String {
    if secs == 0 {
        return "expired".to_string();
    }

    let hours = secs / 3600;
    let mins = (secs % 3600) / 60;
    let secs = secs % 60;

    if hours > 0 {
        format!("{}h {}m", hours, mins)
    } else if mins > 0 {
        format!("{}m {}s", mins, secs)
    } else {
        format!("{}s", secs)
    }
}

/// `Active`/`Inactive` for the service's 0/1 flags.
pub fn format_enabled(flag: i32) -> String {
    if flag == 1 { "Active" } else { "Inactive" }.to_string()
}

/// Date part of an ISO date or datetime string.
pub fn format_date(value: Option<&str>) -> String {
    match value {
        Some(v) if !v.is_empty() => v.split('T').next().unwrap_or(v).to_string(),
        _ => NONE.to_string(),
    }
}

/// Value or the placeholder.
pub fn or_none(value: Option<&str>) -> String {
    value
        .filter(|v| !v.is_empty())
        .unwrap_or(NONE)
        .to_string()
}
