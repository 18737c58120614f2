use log::{error, info, warn};
use snafu::ensure;

use crate::errors::{CustomResult, EmptyReportSnafu, UnknownTeamSnafu};
use crate::macros::database_error_handeler::db_skip_duplicate;
use crate::modules::models::database::RaceDatabase;
use crate::modules::models::driver::DriverRecord;

#[derive(PartialEq, Eq, Debug, Clone, Copy, Default)]
pub struct ExportSummary {
    pub teams_saved: usize,
    pub teams_skipped: usize,
    pub drivers_saved: usize,
    pub drivers_skipped: usize,
}

/// # export report
/// save the teams and drivers of a report to the database.
/// teams are saved first, every driver is linked to its team by name.
/// records that already exist are skipped with a warning, other errors abort the export.
///
/// ## Arguments
/// * `db` - the database to save to
/// * `drivers` - the drivers of the report
///
/// ## Returns
/// * `ExportSummary` - how many records were saved and skipped
pub fn export_report<D: RaceDatabase>(db: &mut D, drivers: &[DriverRecord]) -> CustomResult<ExportSummary> {
    ensure!(!drivers.is_empty(), EmptyReportSnafu);

    let mut summary = ExportSummary::default();

    let mut teams: Vec<&str> = Vec::new();
    for driver in drivers {
        if !teams.contains(&driver.team.as_str()) {
            teams.push(&driver.team);
        }
    }

    for team in teams {
        match db_skip_duplicate!(db.create_team(team), "export:export_report", "team") {
            Some(_) => summary.teams_saved += 1,
            None => summary.teams_skipped += 1,
        }
    }

    for driver in drivers {
        let team_id = match db.team_id_by_name(&driver.team)? {
            Some(team_id) => team_id,
            None => return UnknownTeamSnafu { name: driver.team.as_str() }.fail(),
        };

        match db_skip_duplicate!(db.create_driver(driver, team_id), "export:export_report", "driver") {
            Some(_) => summary.drivers_saved += 1,
            None => summary.drivers_skipped += 1,
        }
    }

    info!(target:"export:export_report", "saved {} teams and {} drivers ({} teams and {} drivers skipped)",
        summary.teams_saved, summary.drivers_saved, summary.teams_skipped, summary.drivers_skipped);
    Ok(summary)
}

#[cfg(test)]
mod tests {
    use chrono::NaiveTime;
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::errors::Error;
    use crate::modules::models::database::SqliteDatabase;

    fn driver(abbreviation: &str, name: &str, team: &str) -> DriverRecord {
        DriverRecord::new(
            abbreviation,
            name,
            team,
            NaiveTime::from_hms_milli_opt(12, 0, 0, 0).unwrap(),
            NaiveTime::from_hms_milli_opt(12, 1, 12, 434).unwrap(),
        )
    }

    fn database() -> SqliteDatabase {
        let mut db = SqliteDatabase::in_memory().unwrap();
        db.create_tables().unwrap();
        db
    }

    #[test]
    fn nothing_to_export() {
        assert!(matches!(export_report(&mut database(), &[]), Err(Error::EmptyReportError)));
    }

    #[test]
    fn teams_are_saved_once() {
        let mut db = database();
        let drivers = vec![
            driver("SVF", "Sebastian Vettel", "FERRARI"),
            driver("LHM", "Lewis Hamilton", "MERCEDES"),
            driver("KRF", "Kimi Räikkönen", "FERRARI"),
        ];

        let summary = export_report(&mut db, &drivers).unwrap();
        assert_eq!(
            summary,
            ExportSummary {
                teams_saved: 2,
                teams_skipped: 0,
                drivers_saved: 3,
                drivers_skipped: 0,
            }
        );
        assert_eq!(db.count_teams().unwrap(), 2);
        assert_eq!(db.count_drivers().unwrap(), 3);
    }

    #[test]
    fn existing_records_are_skipped() {
        let mut db = database();
        db.create_team("MERCEDES").unwrap();
        export_report(&mut db, &[driver("LHM", "Lewis Hamilton", "MERCEDES")]).unwrap();

        let summary = export_report(
            &mut db,
            &[
                driver("LHM", "Lewis Hamilton", "MERCEDES"),
                driver("VBM", "Valtteri Bottas", "MERCEDES"),
            ],
        )
        .unwrap();

        assert_eq!(summary.teams_skipped, 1);
        assert_eq!(summary.drivers_saved, 1);
        assert_eq!(summary.drivers_skipped, 1);
        assert_eq!(db.count_drivers().unwrap(), 2);
    }
}
