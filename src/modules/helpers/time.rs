use chrono::{Duration, NaiveTime};

/// format the timestamps are written in
pub const TIME_FORMAT: &str = "%H:%M:%S%.3f";

/// strict version of `TIME_FORMAT` for reading, the dot and all 3 digits are required
const PARSE_FORMAT: &str = "%H:%M:%S.%3f";

/// `HH:MM:SS.mmm`
const TIMESTAMP_LENGTH: usize = 12;

pub struct TimeHelper {}

impl TimeHelper {
    /// # parse timestamp
    /// parse a `HH:MM:SS.mmm` timestamp
    ///
    /// ## Arguments
    /// * `value` - the timestamp as written in a log file
    ///
    /// ## Returns
    /// * `Option<NaiveTime>` - none when the value does not follow the format
    pub fn parse_timestamp(value: &str) -> Option<NaiveTime> {
        if !TimeHelper::has_timestamp_shape(value) {
            return None;
        }

        NaiveTime::parse_from_str(value, PARSE_FORMAT).ok()
    }

    /// chrono is lenient about padding, so the layout is checked byte by byte first
    fn has_timestamp_shape(value: &str) -> bool {
        value.len() == TIMESTAMP_LENGTH
            && value.bytes().enumerate().all(|(position, byte)| match position {
                2 | 5 => byte == b':',
                8 => byte == b'.',
                _ => byte.is_ascii_digit(),
            })
    }

    pub fn format_timestamp(time: &NaiveTime) -> String {
        time.format(TIME_FORMAT).to_string()
    }

    /// # format lap time
    /// render a lap duration as `H:MM:SS.mmm`, e.g. `0:01:12.434`.
    /// sub-millisecond precision is dropped, not rounded.
    pub fn format_lap(lap: &Duration) -> String {
        let total = lap.num_milliseconds();
        let sign = if total < 0 { "-" } else { "" };
        let total = total.abs();

        format!(
            "{}{}:{:02}:{:02}.{:03}",
            sign,
            total / 3_600_000,
            (total / 60_000) % 60,
            (total / 1000) % 60,
            total % 1000
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_log_timestamp() {
        let time = TimeHelper::parse_timestamp("12:11:32.585").unwrap();
        assert_eq!(TimeHelper::format_timestamp(&time), "12:11:32.585");
    }

    #[test]
    fn rejects_timestamp_without_milliseconds() {
        assert!(TimeHelper::parse_timestamp("12:11:32").is_none());
        assert!(TimeHelper::parse_timestamp("25:11:32.585").is_none());
        assert!(TimeHelper::parse_timestamp("").is_none());
    }

    #[test]
    fn rejects_loose_timestamps() {
        assert!(TimeHelper::parse_timestamp("1:11:32.585").is_none());
        assert!(TimeHelper::parse_timestamp(" 1:11:32.585").is_none());
        assert!(TimeHelper::parse_timestamp("12:11:32.58").is_none());
        assert!(TimeHelper::parse_timestamp("12:11:32.5850").is_none());
        assert!(TimeHelper::parse_timestamp("12:11:32,585").is_none());
        assert!(TimeHelper::parse_timestamp("12:61:32.585").is_none());
        assert!(TimeHelper::parse_timestamp("00:00:00.000").is_some());
    }

    #[test]
    fn formats_lap_times() {
        assert_eq!(TimeHelper::format_lap(&Duration::milliseconds(407_540)), "0:06:47.540");
        assert_eq!(TimeHelper::format_lap(&Duration::milliseconds(64_000)), "0:01:04.000");
        assert_eq!(TimeHelper::format_lap(&Duration::milliseconds(3_723_004)), "1:02:03.004");
        assert_eq!(TimeHelper::format_lap(&Duration::microseconds(72_434_999)), "0:01:12.434");
    }
}
