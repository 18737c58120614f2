diesel::table! {
    teams (id) {
        id -> Integer,
        name -> Text,
    }
}

diesel::table! {
    drivers (id) {
        id -> Integer,
        name -> Text,
        abbr -> Text,
        team_id -> Integer,
        start_time -> Text,
        stop_time -> Text,
        best_lap_ms -> BigInt,
    }
}

diesel::joinable!(drivers -> teams (team_id));

diesel::allow_tables_to_appear_in_same_query!(drivers, teams,);
