//! Time formatting helpers.

/// Format a duration in milliseconds to a human-readable string.
pub fn format_duration_millis(millis: u64) -> String {
    let secs = millis / 1000;
    if millis < 1000 {
        format!("{}ms", millis)
    } else if secs < 60 {
        format!("{}.{}s", secs, (millis % 1000) / 100)
    } else if secs < 3600 {
        format!("{}m {}s", secs / 60, secs % 60)
    } else if secs < 86400 {
        format!("{}h {}m", secs / 3600, (secs % 3600) / 60)
    } else {
        format!("{}d {}h", secs / 86400, (secs % 86400) / 3600)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn formats_each_scale() {
        assert_eq!(format_duration_millis(250), "250ms");
        assert_eq!(format_duration_millis(1500), "1.5s");
        assert_eq!(format_duration_millis(125_000), "2m 5s");
        assert_eq!(format_duration_millis(7_260_000), "2h 1m");
        assert_eq!(format_duration_millis(90_000_000), "1d 1h");
    }
}
