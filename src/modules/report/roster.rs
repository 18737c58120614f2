use std::collections::HashSet;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use log::debug;
use snafu::ResultExt;

use crate::errors::{CustomResult, FileAccessSnafu, MalformedRecordSnafu};
use crate::modules::models::driver::PartialDriver;

/// separator between the fields of a roster line
pub const FIELD_SEPARATOR: char = '_';

/// length of every driver abbreviation
pub const ABBREVIATION_LENGTH: usize = 3;

/// # decode line
/// turn the raw bytes of a source line into text without the line ending.
/// a line that is not UTF-8 is a malformed record, the file itself was readable.
pub(crate) fn decode_line(path: &Path, line_number: usize, mut bytes: Vec<u8>) -> CustomResult<String> {
    if bytes.last() == Some(&b'\r') {
        bytes.pop();
    }

    match String::from_utf8(bytes) {
        Ok(line) => Ok(line),
        Err(err) => MalformedRecordSnafu {
            path,
            line_number,
            line: String::from_utf8_lossy(err.as_bytes()).into_owned(),
            reason: "line is not valid UTF-8",
        }
        .fail(),
    }
}

pub struct RosterParser {}

impl RosterParser {
    /// # parse roster
    /// read the drivers from a roster file. every line is `abbreviation_name_team`.
    ///
    /// there is no quoting, a `_` inside a name or a team makes the line malformed.
    /// blank lines are skipped.
    ///
    /// ## Arguments
    /// * `path` - path to the roster file
    ///
    /// ## Returns
    /// * `Vec<PartialDriver>` - the drivers in file order, without any times
    pub fn parse(path: &Path) -> CustomResult<Vec<PartialDriver>> {
        let file = File::open(path).context(FileAccessSnafu { path })?;
        let reader = BufReader::new(file);

        let mut drivers: Vec<PartialDriver> = Vec::new();
        let mut seen: HashSet<String> = HashSet::new();

        for (index, bytes) in reader.split(b'\n').enumerate() {
            let bytes = bytes.context(FileAccessSnafu { path })?;
            let line = decode_line(path, index + 1, bytes)?;
            if line.trim().is_empty() {
                continue;
            }

            let driver = RosterParser::parse_line(path, index + 1, &line)?;
            if !seen.insert(driver.abbreviation.clone()) {
                return MalformedRecordSnafu {
                    path,
                    line_number: index + 1,
                    line,
                    reason: format!("duplicate abbreviation {}", driver.abbreviation),
                }
                .fail();
            }

            drivers.push(driver);
        }

        debug!(target:"report/roster:parse", "read {} drivers from {}", drivers.len(), path.display());
        Ok(drivers)
    }

    fn parse_line(path: &Path, line_number: usize, line: &str) -> CustomResult<PartialDriver> {
        let fields: Vec<&str> = line.split(FIELD_SEPARATOR).collect();
        let (abbreviation, name, team) = match fields.as_slice() {
            [abbreviation, name, team] => (*abbreviation, *name, team.trim_end()),
            _ => {
                return MalformedRecordSnafu {
                    path,
                    line_number,
                    line,
                    reason: format!("expected 3 fields, found {}", fields.len()),
                }
                .fail()
            }
        };

        if abbreviation.chars().count() != ABBREVIATION_LENGTH {
            return MalformedRecordSnafu {
                path,
                line_number,
                line,
                reason: format!("abbreviation must be {} characters", ABBREVIATION_LENGTH),
            }
            .fail();
        }

        Ok(PartialDriver::new(abbreviation, name, team))
    }
}
