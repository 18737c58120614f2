use serde::Serialize;
use serde_json::{json, Map, Value};
use snafu::ResultExt;

use crate::api::single_key_document;
use crate::errors::{CustomResult, SerializeSnafu};
use crate::modules::helpers::time::TimeHelper;
use crate::modules::models::driver::DriverRecord;
use crate::modules::report::lookup::DriverLookup;
use crate::modules::report::store::ReportStore;

/// a driver as shown to clients, every field is text
#[derive(Serialize, PartialEq, Eq, Debug, Clone)]
pub struct DriverInfo {
    pub name: String,
    pub abbr: String,
    pub team: String,
    pub start_time: String,
    pub stop_time: String,
    pub best_lap_time: String,
}

impl From<&DriverRecord> for DriverInfo {
    fn from(driver: &DriverRecord) -> Self {
        DriverInfo {
            name: driver.name.clone(),
            abbr: driver.abbreviation.clone(),
            team: driver.team.clone(),
            start_time: TimeHelper::format_timestamp(&driver.start_time),
            stop_time: TimeHelper::format_timestamp(&driver.stop_time),
            best_lap_time: TimeHelper::format_lap(&driver.best_lap),
        }
    }
}

/// number the drivers as `<prefix>1`, `<prefix>2`, ... under `key`
pub(crate) fn numbered_document(key: &str, prefix: &str, drivers: &[DriverRecord]) -> CustomResult<Value> {
    let mut entries = Map::new();
    for (index, driver) in drivers.iter().enumerate() {
        let info = serde_json::to_value(DriverInfo::from(driver)).context(SerializeSnafu)?;
        entries.insert(format!("{}{}", prefix, index + 1), info);
    }

    single_key_document(key, &entries)
}

/// # drivers document
/// `{"drivers": {"driver1": {...}, ...}}` with the drivers ordered by name
pub fn drivers_document(store: &ReportStore) -> CustomResult<Value> {
    numbered_document("drivers", "driver", &DriverLookup::all(store, true))
}

/// # driver document
/// `{"driver": {...}}` for the first driver matching `query`
///
/// ## Returns
/// * `(u16, Value)` - status 200 with the driver, or 404 with an error document
pub fn driver_document(store: &ReportStore, query: &str) -> CustomResult<(u16, Value)> {
    match DriverLookup::get_by_id(store, query) {
        Some(driver) => Ok((200, single_key_document("driver", &DriverInfo::from(&driver))?)),
        None => Ok((404, json!({ "error": format!("driver '{}' not found", query) }))),
    }
}
