//! Duration text helpers
//!
//! Durations travel as milliseconds internally; users type and read them as
//! HH:MM or HH:MM:SS.

/// Parse "HH:MM" or "HH:MM:SS" into milliseconds
pub fn parse_duration_ms(text: &str) -> Option<u64> {
    let parts: Vec<&str> = text.split(':').collect();
    if parts.len() != 2 && parts.len() != 3 {
        return None;
    }

    let mut values = Vec::with_capacity(3);
    for part in &parts {
        if part.is_empty() {
            return None;
        }
        values.push(part.parse::<u64>().ok()?);
    }

    let (hours, minutes) = (values[0], values[1]);
    let seconds = values.get(2).copied().unwrap_or(0);
    if minutes >= 60 || seconds >= 60 {
        return None;
    }

    Some((hours * 3600 + minutes * 60 + seconds) * 1000)
}

/// Format milliseconds as "hh:mm:ss"
pub fn format_hms(ms: u64) -> String {
    let total_seconds = ms / 1000;
    let hours = total_seconds / 3600;
    let minutes = (total_seconds % 3600) / 60;
    let seconds = total_seconds % 60;
    format!("{hours:02}:{minutes:02}:{seconds:02}")
}

/// Format milliseconds as "hh:mm", seconds dropped
pub fn format_hm(ms: u64) -> String {
    let total_seconds = ms / 1000;
    let hours = total_seconds / 3600;
    let minutes = (total_seconds % 3600) / 60;
    format!("{hours:02}:{minutes:02}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_hours_and_minutes() {
        assert_eq!(parse_duration_ms("01:30"), Some(5_400_000));
        assert_eq!(parse_duration_ms("00:00"), Some(0));
        assert_eq!(parse_duration_ms("100:00"), Some(360_000_000));
    }

    #[test]
    fn parses_optional_seconds() {
        assert_eq!(parse_duration_ms("00:01:30"), Some(90_000));
        assert_eq!(parse_duration_ms("02:00:05"), Some(7_205_000));
    }

    #[test]
    fn rejects_malformed_input() {
        assert_eq!(parse_duration_ms(""), None);
        assert_eq!(parse_duration_ms("90"), None);
        assert_eq!(parse_duration_ms("1:2:3:4"), None);
        assert_eq!(parse_duration_ms("aa:bb"), None);
        assert_eq!(parse_duration_ms("-1:30"), None);
        assert_eq!(parse_duration_ms("00:75"), None);
        assert_eq!(parse_duration_ms("00:10:75"), None);
        assert_eq!(parse_duration_ms("1:"), None);
    }

    #[test]
    fn formats_both_widths() {
        assert_eq!(format_hms(5_400_000), "01:30:00");
        assert_eq!(format_hms(90_500), "00:01:30");
        assert_eq!(format_hm(5_400_000), "01:30");
        assert_eq!(format_hm(59_000), "00:00");
    }
}
