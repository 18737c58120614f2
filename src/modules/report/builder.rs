use std::path::{Path, PathBuf};

use log::info;

use crate::errors::CustomResult;
use crate::modules::models::driver::DriverRecord;
use crate::modules::report::lap_log::LapLogParser;
use crate::modules::report::roster::RosterParser;

pub const ABBREVIATIONS_FILE: &str = "abbreviations.txt";
pub const START_LOG_FILE: &str = "start.log";
pub const END_LOG_FILE: &str = "end.log";

/// the three files a report is built from
#[derive(PartialEq, Eq, Debug, Clone)]
pub struct ReportSources {
    pub roster: PathBuf,
    pub start_log: PathBuf,
    pub stop_log: PathBuf,
}

impl ReportSources {
    pub fn new(roster: PathBuf, start_log: PathBuf, stop_log: PathBuf) -> ReportSources {
        ReportSources {
            roster,
            start_log,
            stop_log,
        }
    }

    /// the source files with their default names inside `dir`
    pub fn in_dir(dir: &Path) -> ReportSources {
        ReportSources::new(
            dir.join(ABBREVIATIONS_FILE),
            dir.join(START_LOG_FILE),
            dir.join(END_LOG_FILE),
        )
    }
}

pub struct ReportBuilder {}

impl ReportBuilder {
    /// # build report
    /// read the roster and both lap logs and compute the best lap of every driver.
    /// any failure aborts the whole build.
    ///
    /// ## Arguments
    /// * `sources` - the roster and log files
    ///
    /// ## Returns
    /// * `Vec<DriverRecord>` - one record per roster line, in roster order
    pub fn build(sources: &ReportSources) -> CustomResult<Vec<DriverRecord>> {
        let roster = RosterParser::parse(&sources.roster)?;
        let timed = LapLogParser::apply(&roster, &sources.start_log, &sources.stop_log)?;

        let drivers = timed
            .iter()
            .map(DriverRecord::from_partial)
            .collect::<CustomResult<Vec<DriverRecord>>>()?;

        info!(target:"report/builder:build", "built report with {} drivers from {}", drivers.len(), sources.roster.display());
        Ok(drivers)
    }
}
