use crate::modules::models::driver::DriverRecord;
use crate::modules::report::store::ReportStore;

pub struct DriverLookup {}

impl DriverLookup {
    /// # all drivers
    /// the drivers of the current report ordered by name.
    /// descending is the exact reverse of ascending.
    pub fn all(store: &ReportStore, ascending: bool) -> Vec<DriverRecord> {
        let mut drivers = store.drivers().to_vec();
        drivers.sort_by(|a, b| a.name.cmp(&b.name));
        if !ascending {
            drivers.reverse();
        }

        drivers
    }

    /// # get driver by id
    /// find a driver by (part of) its name or abbreviation, ignoring case
    ///
    /// ## Arguments
    /// * `store` - the current report
    /// * `query` - the text to search for
    ///
    /// ## Returns
    /// * `Option<DriverRecord>` - the first matching driver in report order
    pub fn get_by_id(store: &ReportStore, query: &str) -> Option<DriverRecord> {
        let query = query.to_lowercase();
        store
            .drivers()
            .iter()
            .find(|driver| {
                driver.name.to_lowercase().contains(&query)
                    || driver.abbreviation.to_lowercase().contains(&query)
            })
            .cloned()
    }
}
