use diesel::prelude::*;
use diesel::result::{DatabaseErrorKind, Error as DieselError};
use diesel::sql_query;
use diesel::sqlite::SqliteConnection;
use log::{debug, error};
use snafu::ResultExt;

use crate::errors::{
    CustomResult, DatabaseConnectionSnafu, DuplicateKeySnafu, StoredRecordSnafu,
};
use crate::models::{DriverRow, NewDriver, NewTeam};
use crate::modules::helpers::time::TimeHelper;
use crate::modules::models::driver::DriverRecord;
use crate::schema::{drivers, teams};

#[derive(PartialEq, Eq, Debug, Clone, Copy)]
pub enum OrderBy {
    Name,
    BestLap,
}

#[derive(PartialEq, Eq, Debug, Clone, Copy)]
pub enum Direction {
    Asc,
    Desc,
}

impl Direction {
    pub fn from_ascending(ascending: bool) -> Direction {
        if ascending {
            Direction::Asc
        } else {
            Direction::Desc
        }
    }
}

/// storage for exported reports. teams have to exist before the drivers that race for them.
pub trait RaceDatabase {
    fn create_tables(&mut self) -> CustomResult<()>;

    /// fails with a duplicate key error when a team with this name exists
    fn create_team(&mut self, name: &str) -> CustomResult<i32>;

    fn team_id_by_name(&mut self, name: &str) -> CustomResult<Option<i32>>;

    /// fails with a duplicate key error when the name or abbreviation exists
    fn create_driver(&mut self, driver: &DriverRecord, team_id: i32) -> CustomResult<()>;

    fn select_all(&mut self, order_by: OrderBy, direction: Direction) -> CustomResult<Vec<DriverRecord>>;

    /// the first stored driver whose abbreviation or name contains `query`, ignoring case
    fn select_by_abbr_or_name_contains(&mut self, query: &str) -> CustomResult<Option<DriverRecord>>;

    fn count_teams(&mut self) -> CustomResult<i64>;

    fn count_drivers(&mut self) -> CustomResult<i64>;
}

pub struct SqliteDatabase {
    conn: SqliteConnection,
}

impl SqliteDatabase {
    /// # connect
    /// open the sqlite database at the given url, `:memory:` gives a private in-memory database
    pub fn connect(url: &str) -> CustomResult<SqliteDatabase> {
        let mut conn = SqliteConnection::establish(url).context(DatabaseConnectionSnafu { url })?;
        sql_query("PRAGMA foreign_keys = ON").execute(&mut conn)?;

        debug!(target:"models/database:connect", "connected to {}", url);
        Ok(SqliteDatabase { conn })
    }

    pub fn in_memory() -> CustomResult<SqliteDatabase> {
        SqliteDatabase::connect(":memory:")
    }

    fn to_record(row: DriverRow) -> CustomResult<DriverRecord> {
        let start_time = match TimeHelper::parse_timestamp(&row.start_time) {
            Some(time) => time,
            None => {
                return StoredRecordSnafu {
                    abbreviation: row.abbr,
                    field: "start_time",
                    value: row.start_time,
                }
                .fail()
            }
        };
        let stop_time = match TimeHelper::parse_timestamp(&row.stop_time) {
            Some(time) => time,
            None => {
                return StoredRecordSnafu {
                    abbreviation: row.abbr,
                    field: "stop_time",
                    value: row.stop_time,
                }
                .fail()
            }
        };

        Ok(DriverRecord::new(&row.abbr, &row.name, &row.team, start_time, stop_time))
    }
}

/// escape the wildcards of a LIKE pattern, `\` is the escape character
fn escape_like(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for c in value.chars() {
        if matches!(c, '\\' | '%' | '_') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}

impl RaceDatabase for SqliteDatabase {
    fn create_tables(&mut self) -> CustomResult<()> {
        sql_query(
            "CREATE TABLE IF NOT EXISTS teams (
                id INTEGER PRIMARY KEY AUTOINCREMENT NOT NULL,
                name TEXT NOT NULL UNIQUE
            )",
        )
        .execute(&mut self.conn)?;

        sql_query(
            "CREATE TABLE IF NOT EXISTS drivers (
                id INTEGER PRIMARY KEY AUTOINCREMENT NOT NULL,
                name TEXT NOT NULL UNIQUE,
                abbr TEXT NOT NULL UNIQUE,
                team_id INTEGER NOT NULL REFERENCES teams (id),
                start_time TEXT NOT NULL,
                stop_time TEXT NOT NULL,
                best_lap_ms BIGINT NOT NULL
            )",
        )
        .execute(&mut self.conn)?;

        Ok(())
    }

    fn create_team(&mut self, name: &str) -> CustomResult<i32> {
        let new_team = NewTeam {
            name: name.to_string(),
        };

        match diesel::insert_into(teams::table)
            .values(&new_team)
            .execute(&mut self.conn)
        {
            Ok(_) => {}
            Err(DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, _)) => {
                return DuplicateKeySnafu { entity: "team", key: name }.fail();
            }
            Err(err) => {
                error!(target:"models/database:create_team", "Error creating team {}: {}", name, err);
                return Err(err.into());
            }
        }

        let team_id = teams::table
            .filter(teams::name.eq(name))
            .select(teams::id)
            .first::<i32>(&mut self.conn)?;

        Ok(team_id)
    }

    fn team_id_by_name(&mut self, name: &str) -> CustomResult<Option<i32>> {
        let team_id = teams::table
            .filter(teams::name.eq(name))
            .select(teams::id)
            .first::<i32>(&mut self.conn)
            .optional()?;

        Ok(team_id)
    }

    fn create_driver(&mut self, driver: &DriverRecord, team_id: i32) -> CustomResult<()> {
        let new_driver = NewDriver {
            name: driver.name.clone(),
            abbr: driver.abbreviation.clone(),
            team_id,
            start_time: TimeHelper::format_timestamp(&driver.start_time),
            stop_time: TimeHelper::format_timestamp(&driver.stop_time),
            best_lap_ms: driver.best_lap.num_milliseconds(),
        };

        match diesel::insert_into(drivers::table)
            .values(&new_driver)
            .execute(&mut self.conn)
        {
            Ok(_) => Ok(()),
            Err(DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, _)) => {
                DuplicateKeySnafu {
                    entity: "driver",
                    key: driver.name.as_str(),
                }
                .fail()
            }
            Err(err) => {
                error!(target:"models/database:create_driver", "Error creating driver {}: {}", driver.name, err);
                Err(err.into())
            }
        }
    }

    fn select_all(&mut self, order_by: OrderBy, direction: Direction) -> CustomResult<Vec<DriverRecord>> {
        let mut query = drivers::table
            .inner_join(teams::table)
            .select((
                drivers::name,
                drivers::abbr,
                teams::name,
                drivers::start_time,
                drivers::stop_time,
                drivers::best_lap_ms,
            ))
            .into_boxed();

        query = match (order_by, direction) {
            (OrderBy::Name, Direction::Asc) => query.order(drivers::name.asc()),
            (OrderBy::Name, Direction::Desc) => query.order(drivers::name.desc()),
            (OrderBy::BestLap, Direction::Asc) => {
                query.order((drivers::best_lap_ms.asc(), drivers::id.asc()))
            }
            (OrderBy::BestLap, Direction::Desc) => {
                query.order((drivers::best_lap_ms.desc(), drivers::id.desc()))
            }
        };

        let rows = query.load::<DriverRow>(&mut self.conn)?;
        rows.into_iter().map(SqliteDatabase::to_record).collect()
    }

    fn select_by_abbr_or_name_contains(&mut self, query: &str) -> CustomResult<Option<DriverRecord>> {
        let pattern = format!("%{}%", escape_like(query));

        let row = drivers::table
            .inner_join(teams::table)
            .select((
                drivers::name,
                drivers::abbr,
                teams::name,
                drivers::start_time,
                drivers::stop_time,
                drivers::best_lap_ms,
            ))
            .filter(
                drivers::abbr
                    .like(pattern.clone())
                    .escape('\\')
                    .or(drivers::name.like(pattern).escape('\\')),
            )
            .order(drivers::id.asc())
            .first::<DriverRow>(&mut self.conn)
            .optional()?;

        row.map(SqliteDatabase::to_record).transpose()
    }

    fn count_teams(&mut self) -> CustomResult<i64> {
        Ok(teams::table.count().get_result::<i64>(&mut self.conn)?)
    }

    fn count_drivers(&mut self) -> CustomResult<i64> {
        Ok(drivers::table.count().get_result::<i64>(&mut self.conn)?)
    }
}

#[cfg(test)]
mod tests {
    use chrono::NaiveTime;
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::errors::Error;

    fn database() -> SqliteDatabase {
        let mut db = SqliteDatabase::in_memory().unwrap();
        db.create_tables().unwrap();
        db
    }

    fn driver(abbreviation: &str, name: &str, team: &str, stop_ms: u32) -> DriverRecord {
        DriverRecord::new(
            abbreviation,
            name,
            team,
            NaiveTime::from_hms_milli_opt(12, 0, 0, 0).unwrap(),
            NaiveTime::from_hms_milli_opt(12, 1, stop_ms / 1000, stop_ms % 1000).unwrap(),
        )
    }

    #[test]
    fn like_wildcards_are_escaped() {
        assert_eq!(escape_like("unknown_driver"), "unknown\\_driver");
        assert_eq!(escape_like("100%"), "100\\%");
        assert_eq!(escape_like("ham"), "ham");
    }

    #[test]
    fn duplicate_team_is_reported() {
        let mut db = database();
        let id = db.create_team("FERRARI").unwrap();

        assert_eq!(db.team_id_by_name("FERRARI").unwrap(), Some(id));
        assert!(matches!(db.create_team("FERRARI"), Err(Error::DuplicateKeyError { .. })));
        assert_eq!(db.count_teams().unwrap(), 1);
    }

    #[test]
    fn stores_and_reads_drivers() {
        let mut db = database();
        let ferrari = db.create_team("FERRARI").unwrap();
        let mercedes = db.create_team("MERCEDES").unwrap();

        let vettel = driver("SVF", "Sebastian Vettel", "FERRARI", 4_415);
        let bottas = driver("VBM", "Valtteri Bottas", "MERCEDES", 12_434);
        let raikkonen = driver("KRF", "Kimi Räikkönen", "FERRARI", 12_639);
        db.create_driver(&vettel, ferrari).unwrap();
        db.create_driver(&bottas, mercedes).unwrap();
        db.create_driver(&raikkonen, ferrari).unwrap();

        assert_eq!(
            db.select_all(OrderBy::Name, Direction::Asc).unwrap(),
            vec![raikkonen.clone(), vettel.clone(), bottas.clone()]
        );
        assert_eq!(
            db.select_all(OrderBy::BestLap, Direction::Desc).unwrap(),
            vec![raikkonen, bottas.clone(), vettel.clone()]
        );

        assert_eq!(db.select_by_abbr_or_name_contains("vbm").unwrap(), Some(bottas));
        assert_eq!(db.select_by_abbr_or_name_contains("VETT").unwrap(), Some(vettel));
        assert_eq!(db.select_by_abbr_or_name_contains("unknown_driver").unwrap(), None);
    }

    #[test]
    fn duplicate_driver_is_reported() {
        let mut db = database();
        let ferrari = db.create_team("FERRARI").unwrap();
        let vettel = driver("SVF", "Sebastian Vettel", "FERRARI", 4_415);

        db.create_driver(&vettel, ferrari).unwrap();
        assert!(matches!(
            db.create_driver(&vettel, ferrari),
            Err(Error::DuplicateKeyError { entity: "driver", .. })
        ));
        assert_eq!(db.count_drivers().unwrap(), 1);
    }
}
