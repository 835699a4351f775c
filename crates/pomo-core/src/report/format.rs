//! Human-readable durations.

/// `H:MM:SS`, hours unpadded.
pub fn format_clock(secs: u64) -> String {
    let (minutes, seconds) = (secs / 60, secs % 60);
    let (hours, minutes) = (minutes / 60, minutes % 60);
    format!("{hours}:{minutes:02}:{seconds:02}")
}

/// `MM:SS`, or `H:MM:SS` once an hour is involved.
pub fn format_remaining(secs: u64) -> String {
    if secs >= 3600 {
        format_clock(secs)
    } else {
        format!("{:02}:{:02}", secs / 60, secs % 60)
    }
}

/// `N minutes`, with ` S seconds` appended when not a whole minute.
pub fn format_minutes(secs: u64) -> String {
    let (minutes, seconds) = (secs / 60, secs % 60);
    if seconds == 0 {
        format!("{minutes} minutes")
    } else {
        format!("{minutes} minutes {seconds} seconds")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clock_format() {
        assert_eq!(format_clock(0), "0:00:00");
        assert_eq!(format_clock(65), "0:01:05");
        assert_eq!(format_clock(3600 + 61), "1:01:01");
        assert_eq!(format_clock(36 * 3600), "36:00:00");
    }

    #[test]
    fn remaining_format() {
        assert_eq!(format_remaining(0), "00:00");
        assert_eq!(format_remaining(1199), "19:59");
        assert_eq!(format_remaining(3600), "1:00:00");
    }

    #[test]
    fn minutes_format() {
        assert_eq!(format_minutes(0), "0 minutes");
        assert_eq!(format_minutes(1500), "25 minutes");
        assert_eq!(format_minutes(1501), "25 minutes 1 seconds");
    }
}
