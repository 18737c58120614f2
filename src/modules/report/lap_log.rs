use std::collections::HashMap;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use chrono::NaiveTime;
use log::debug;
use snafu::ResultExt;

use crate::errors::{CustomResult, FileAccessSnafu, MalformedRecordSnafu};
use crate::modules::helpers::time::TimeHelper;
use crate::modules::models::driver::PartialDriver;
use crate::modules::report::roster::{decode_line, ABBREVIATION_LENGTH, FIELD_SEPARATOR};

/// which of the two times a log file provides
#[derive(PartialEq, Eq, Debug, Clone, Copy)]
pub enum LapEvent {
    Start,
    Stop,
}

pub struct LapLogParser {}

impl LapLogParser {
    /// # apply lap logs
    /// fill in the start and stop times of the roster from the two log files.
    ///
    /// a log line starts with the 3 character abbreviation of the driver, the timestamp
    /// follows the first `_`. lines of unknown drivers are skipped, and when a driver
    /// shows up more than once in a log only the first line counts. the timestamp of
    /// every line of a known driver has to be valid, repeated lines included.
    ///
    /// ## Arguments
    /// * `roster` - the drivers read from the roster file, left untouched
    /// * `start_log` - path to the log with the start events
    /// * `stop_log` - path to the log with the stop events
    ///
    /// ## Returns
    /// * `Vec<PartialDriver>` - a copy of the roster with the times filled in
    pub fn apply(
        roster: &[PartialDriver],
        start_log: &Path,
        stop_log: &Path,
    ) -> CustomResult<Vec<PartialDriver>> {
        let mut drivers = roster.to_vec();
        let index: HashMap<String, usize> = drivers
            .iter()
            .enumerate()
            .map(|(position, driver)| (driver.abbreviation.clone(), position))
            .collect();

        LapLogParser::read_events(&mut drivers, &index, start_log, LapEvent::Start)?;
        LapLogParser::read_events(&mut drivers, &index, stop_log, LapEvent::Stop)?;

        Ok(drivers)
    }

    fn read_events(
        drivers: &mut [PartialDriver],
        index: &HashMap<String, usize>,
        path: &Path,
        event: LapEvent,
    ) -> CustomResult<()> {
        let file = File::open(path).context(FileAccessSnafu { path })?;
        let reader = BufReader::new(file);

        for (line_index, bytes) in reader.split(b'\n').enumerate() {
            let bytes = bytes.context(FileAccessSnafu { path })?;
            let line = decode_line(path, line_index + 1, bytes)?;
            if line.trim().is_empty() {
                continue;
            }

            let abbreviation: String = line.chars().take(ABBREVIATION_LENGTH).collect();
            let driver = match index.get(&abbreviation) {
                Some(position) => &mut drivers[*position],
                None => {
                    debug!(target:"report/lap_log:read_events", "skipping unknown driver {:?} in {}", abbreviation, path.display());
                    continue;
                }
            };

            let time = LapLogParser::parse_timestamp(path, line_index + 1, &line)?;
            let slot: &mut Option<NaiveTime> = match event {
                LapEvent::Start => &mut driver.start_time,
                LapEvent::Stop => &mut driver.stop_time,
            };
            if slot.is_some() {
                debug!(target:"report/lap_log:read_events", "ignoring repeated {:?} event for {}", event, abbreviation);
                continue;
            }

            *slot = Some(time);
        }

        Ok(())
    }

    fn parse_timestamp(path: &Path, line_number: usize, line: &str) -> CustomResult<NaiveTime> {
        let field = match line.split(FIELD_SEPARATOR).nth(1) {
            Some(field) => field.trim_end(),
            None => {
                return MalformedRecordSnafu {
                    path,
                    line_number,
                    line,
                    reason: "missing timestamp",
                }
                .fail()
            }
        };

        match TimeHelper::parse_timestamp(field) {
            Some(time) => Ok(time),
            None => MalformedRecordSnafu {
                path,
                line_number,
                line,
                reason: format!("timestamp {:?} is not HH:MM:SS.mmm", field),
            }
            .fail(),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::fs;

    use pretty_assertions::assert_eq;
    use tempfile::TempDir;

    use super::*;
    use crate::errors::Error;

    fn logs(start: &str, stop: &str) -> TempDir {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("start.log"), start).unwrap();
        fs::write(dir.path().join("end.log"), stop).unwrap();
        dir
    }

    fn roster() -> Vec<PartialDriver> {
        vec![
            PartialDriver::new("SVF", "Sebastian Vettel", "FERRARI"),
            PartialDriver::new("LHM", "Lewis Hamilton", "MERCEDES"),
        ]
    }

    fn apply(dir: &TempDir, roster: &[PartialDriver]) -> CustomResult<Vec<PartialDriver>> {
        LapLogParser::apply(roster, &dir.path().join("start.log"), &dir.path().join("end.log"))
    }

    #[test]
    fn fills_in_times_without_touching_the_roster() {
        let dir = logs(
            "SVF2018-05-24_12:02:58.917\n\nLHM2018-05-24_12:18:20.125\n",
            "LHM2018-05-24_12:11:32.585\nSVF2018-05-24_12:04:03.332\n",
        );
        let roster = roster();
        let drivers = apply(&dir, &roster).unwrap();

        assert_eq!(drivers[0].start_time, TimeHelper::parse_timestamp("12:02:58.917"));
        assert_eq!(drivers[0].stop_time, TimeHelper::parse_timestamp("12:04:03.332"));
        assert_eq!(drivers[1].start_time, TimeHelper::parse_timestamp("12:18:20.125"));
        assert_eq!(drivers[1].stop_time, TimeHelper::parse_timestamp("12:11:32.585"));

        assert!(roster.iter().all(|d| d.start_time.is_none() && d.stop_time.is_none()));
    }

    #[test]
    fn unknown_drivers_are_skipped() {
        let dir = logs(
            "XYZ2018-05-24_not a time\nSVF2018-05-24_12:02:58.917\nLHM2018-05-24_12:18:20.125\n",
            "SVF2018-05-24_12:04:03.332\nLHM2018-05-24_12:11:32.585\nXY\n",
        );
        let drivers = apply(&dir, &roster()).unwrap();
        assert!(drivers.iter().all(|d| d.start_time.is_some() && d.stop_time.is_some()));
    }

    #[test]
    fn first_event_of_a_driver_wins() {
        let dir = logs(
            "SVF2018-05-24_12:02:58.917\nSVF2018-05-24_12:30:00.000\nLHM2018-05-24_12:18:20.125\n",
            "SVF2018-05-24_12:04:03.332\nLHM2018-05-24_12:11:32.585\nLHM2018-05-24_12:59:59.999\n",
        );
        let drivers = apply(&dir, &roster()).unwrap();

        assert_eq!(drivers[0].start_time, TimeHelper::parse_timestamp("12:02:58.917"));
        assert_eq!(drivers[1].stop_time, TimeHelper::parse_timestamp("12:11:32.585"));
    }

    #[test]
    fn bad_timestamp_is_malformed() {
        let dir = logs(
            "SVF2018-05-24_12:02:58.917\nLHM2018-05-24_12:18\n",
            "SVF2018-05-24_12:04:03.332\nLHM2018-05-24_12:11:32.585\n",
        );

        match apply(&dir, &roster()) {
            Err(Error::MalformedRecordError { line_number, path, .. }) => {
                assert_eq!(line_number, 2);
                assert!(path.ends_with("start.log"));
            }
            other => panic!("unexpected result: {:?}", other),
        }
    }

    #[test]
    fn timestamp_without_milliseconds_is_malformed() {
        let dir = logs(
            "SVF2018-05-24_12:02:58.917\nLHM2018-05-24_12:18:20.125\n",
            "SVF2018-05-24_12:04:03.332\nLHM2018-05-24_12:11:32\n",
        );

        match apply(&dir, &roster()) {
            Err(Error::MalformedRecordError { line_number, path, .. }) => {
                assert_eq!(line_number, 2);
                assert!(path.ends_with("end.log"));
            }
            other => panic!("unexpected result: {:?}", other),
        }
    }

    #[test]
    fn repeated_line_with_bad_timestamp_is_malformed() {
        let dir = logs(
            "SVF2018-05-24_12:02:58.917\nSVF2018-05-24_garbage\nLHM2018-05-24_12:18:20.125\n",
            "SVF2018-05-24_12:04:03.332\nLHM2018-05-24_12:11:32.585\n",
        );

        assert!(matches!(
            apply(&dir, &roster()),
            Err(Error::MalformedRecordError { line_number: 2, .. })
        ));
    }

    #[test]
    fn invalid_utf8_is_malformed() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("start.log"), b"SVF2018-05-24_12:02:58.917\nLHM\xff_12:18:20.125\n").unwrap();
        fs::write(dir.path().join("end.log"), "SVF2018-05-24_12:04:03.332\n").unwrap();

        match apply(&dir, &roster()) {
            Err(Error::MalformedRecordError { line_number, path, .. }) => {
                assert_eq!(line_number, 2);
                assert!(path.ends_with("start.log"));
            }
            other => panic!("unexpected result: {:?}", other),
        }
    }

    #[test]
    fn line_without_separator_is_malformed() {
        let dir = logs("SVF 12:02:58.917\n", "SVF2018-05-24_12:04:03.332\n");
        assert!(matches!(
            apply(&dir, &roster()),
            Err(Error::MalformedRecordError { line_number: 1, .. })
        ));
    }

    #[test]
    fn missing_stop_log() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("start.log"), "SVF2018-05-24_12:02:58.917\n").unwrap();

        match apply(&dir, &roster()) {
            Err(Error::FileAccessError { path, .. }) => assert!(path.ends_with("end.log")),
            other => panic!("unexpected result: {:?}", other),
        }
    }
}
