pub mod biography;
pub mod export;

pub mod report {
    pub mod roster;
    pub mod lap_log;
    pub mod builder;
    pub mod store;

    pub mod ranking;
    pub mod lookup;
}

pub mod models {
    pub mod driver;
    pub mod database;
}

pub mod helpers {
    pub mod config;
    pub mod logging;
    pub mod time;
}
