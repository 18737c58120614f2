use log::{error, info};

use crate::errors::CustomResult;
use crate::modules::models::driver::DriverRecord;
use crate::modules::report::builder::{ReportBuilder, ReportSources};

/// the drivers of the last successfully built report.
/// a rebuild replaces the whole set, a failed rebuild leaves it untouched.
#[derive(Debug, Clone, Default)]
pub struct ReportStore {
    drivers: Option<Vec<DriverRecord>>,
}

impl ReportStore {
    pub fn new() -> ReportStore {
        ReportStore::default()
    }

    /// a store holding an already built set of drivers
    pub fn with_drivers(drivers: Vec<DriverRecord>) -> ReportStore {
        ReportStore {
            drivers: Some(drivers),
        }
    }

    /// # rebuild
    /// build a new report from the source files and publish it in place of the current one
    ///
    /// ## Arguments
    /// * `sources` - the roster and log files
    ///
    /// ## Returns
    /// * `&[DriverRecord]` - the newly published drivers
    pub fn rebuild(&mut self, sources: &ReportSources) -> CustomResult<&[DriverRecord]> {
        let drivers = match ReportBuilder::build(sources) {
            Ok(drivers) => drivers,
            Err(err) => {
                error!(target:"report/store:rebuild", "report build failed, keeping previous report: {}", err);
                return Err(err);
            }
        };

        info!(target:"report/store:rebuild", "publishing report with {} drivers", drivers.len());
        Ok(self.drivers.insert(drivers).as_slice())
    }

    pub fn is_built(&self) -> bool {
        self.drivers.is_some()
    }

    /// the current drivers in build order. empty when nothing was built yet
    pub fn drivers(&self) -> &[DriverRecord] {
        self.drivers.as_deref().unwrap_or(&[])
    }
}
