use chrono::{Duration, NaiveTime};

use crate::errors::{CustomResult, MissingTimestampSnafu};

/// a driver as read from the roster, with the lap events that were found for it so far.
/// only exists while a report is being built.
#[derive(PartialEq, Eq, Debug, Clone)]
pub struct PartialDriver {
    pub abbreviation: String,
    pub name: String,
    pub team: String,
    pub start_time: Option<NaiveTime>,
    pub stop_time: Option<NaiveTime>,
}

impl PartialDriver {
    pub fn new(abbreviation: &str, name: &str, team: &str) -> PartialDriver {
        PartialDriver {
            abbreviation: abbreviation.to_string(),
            name: name.to_string(),
            team: team.to_string(),
            start_time: None,
            stop_time: None,
        }
    }
}

#[derive(PartialEq, Eq, Debug, Clone)]
pub struct DriverRecord {
    pub abbreviation: String,
    pub name: String,
    pub team: String,
    pub start_time: NaiveTime,
    pub stop_time: NaiveTime,
    pub best_lap: Duration,
}

impl DriverRecord {
    /// # create driver record
    /// create a complete record out of the given start and stop times.
    /// when the start time lies after the stop time the two are swapped, so
    /// the best lap is never negative.
    ///
    /// ## Arguments
    /// * `abbreviation` - the 3 character key of the driver
    /// * `name` - the full name of the driver
    /// * `team` - the team of the driver
    /// * `start_time` - the logged start time
    /// * `stop_time` - the logged stop time
    ///
    /// ## Returns
    /// * `DriverRecord` - the record with the best lap filled in
    pub fn new(
        abbreviation: &str,
        name: &str,
        team: &str,
        start_time: NaiveTime,
        stop_time: NaiveTime,
    ) -> DriverRecord {
        let (start_time, stop_time) = if start_time > stop_time {
            (stop_time, start_time)
        } else {
            (start_time, stop_time)
        };

        DriverRecord {
            abbreviation: abbreviation.to_string(),
            name: name.to_string(),
            team: team.to_string(),
            start_time,
            stop_time,
            best_lap: stop_time.signed_duration_since(start_time),
        }
    }

    /// # complete partial driver
    /// turn a partial driver into a record. fails when either of the times was never logged.
    pub fn from_partial(partial: &PartialDriver) -> CustomResult<DriverRecord> {
        let start_time = match partial.start_time {
            Some(time) => time,
            None => {
                return MissingTimestampSnafu {
                    abbreviation: partial.abbreviation.clone(),
                    kind: "start",
                }
                .fail()
            }
        };
        let stop_time = match partial.stop_time {
            Some(time) => time,
            None => {
                return MissingTimestampSnafu {
                    abbreviation: partial.abbreviation.clone(),
                    kind: "stop",
                }
                .fail()
            }
        };

        Ok(DriverRecord::new(
            &partial.abbreviation,
            &partial.name,
            &partial.team,
            start_time,
            stop_time,
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::Error;

    fn time(s: &str) -> NaiveTime {
        NaiveTime::parse_from_str(s, "%H:%M:%S%.3f").unwrap()
    }

    #[test]
    fn best_lap_is_stop_minus_start() {
        let driver = DriverRecord::new(
            "SVF",
            "Sebastian Vettel",
            "FERRARI",
            time("12:02:58.917"),
            time("12:04:03.332"),
        );
        assert_eq!(driver.best_lap, Duration::milliseconds(64_415));
    }

    #[test]
    fn reversed_times_are_swapped() {
        let driver = DriverRecord::new(
            "LHM",
            "Lewis Hamilton",
            "MERCEDES",
            time("12:18:20.125"),
            time("12:11:32.585"),
        );
        assert_eq!(driver.start_time, time("12:11:32.585"));
        assert_eq!(driver.stop_time, time("12:18:20.125"));
        assert_eq!(driver.best_lap, Duration::milliseconds(407_540));
    }

    #[test]
    fn missing_stop_time_is_reported() {
        let mut partial = PartialDriver::new("KRF", "Kimi Räikkönen", "FERRARI");
        partial.start_time = Some(time("12:03:01.250"));

        match DriverRecord::from_partial(&partial) {
            Err(Error::MissingTimestampError { abbreviation, kind }) => {
                assert_eq!(abbreviation, "KRF");
                assert_eq!(kind, "stop");
            }
            other => panic!("unexpected result: {:?}", other),
        }
    }
}
