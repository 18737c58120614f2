use diesel::prelude::*;
use crate::schema::*;


#[derive(Insertable, Debug, Clone)]
#[diesel(table_name = teams)]
pub struct NewTeam {
    pub name: String,
}

#[derive(Insertable, Debug, Clone)]
#[diesel(table_name = drivers)]
pub struct NewDriver {
    pub name: String,
    pub abbr: String,
    pub team_id: i32,
    pub start_time: String,
    pub stop_time: String,
    pub best_lap_ms: i64,
}

/// a driver joined with the name of its team
#[derive(Queryable, Debug, Clone)]
pub struct DriverRow {
    pub name: String,
    pub abbr: String,
    pub team: String,
    pub start_time: String,
    pub stop_time: String,
    pub best_lap_ms: i64,
}
