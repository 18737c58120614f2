use std::env;
use std::path::PathBuf;

use dotenvy::dotenv;

use crate::modules::report::builder::{ReportSources, ABBREVIATIONS_FILE, END_LOG_FILE, START_LOG_FILE};

pub const DEFAULT_DATA_PATH: &str = "./data";
pub const DEFAULT_DATABASE_URL: &str = "./data/racing.db";
pub const DEFAULT_LOGGING_LEVEL: &str = "INFO";
pub const DEFAULT_LOG_FILE: &str = "program.log";

#[derive(PartialEq, Eq, Debug, Clone)]
pub struct Config {
    pub data_path: PathBuf,
    pub abbreviations_file: String,
    pub start_log_file: String,
    pub end_log_file: String,
    pub database_url: String,
    pub logging_level: String,
    pub log_file: PathBuf,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            data_path: PathBuf::from(DEFAULT_DATA_PATH),
            abbreviations_file: ABBREVIATIONS_FILE.to_string(),
            start_log_file: START_LOG_FILE.to_string(),
            end_log_file: END_LOG_FILE.to_string(),
            database_url: DEFAULT_DATABASE_URL.to_string(),
            logging_level: DEFAULT_LOGGING_LEVEL.to_string(),
            log_file: PathBuf::from(DEFAULT_LOG_FILE),
        }
    }
}

impl Config {
    /// # load config
    /// read the configuration from the environment and the `.env` file,
    /// unset variables fall back to their defaults
    pub fn from_env() -> Config {
        dotenv().ok();
        Config::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup<F: Fn(&str) -> Option<String>>(lookup: F) -> Config {
        let defaults = Config::default();

        Config {
            data_path: lookup("DATA_PATH").map(PathBuf::from).unwrap_or(defaults.data_path),
            abbreviations_file: lookup("ABBREVIATIONS_FILE").unwrap_or(defaults.abbreviations_file),
            start_log_file: lookup("START_LOG_FILE").unwrap_or(defaults.start_log_file),
            end_log_file: lookup("END_LOG_FILE").unwrap_or(defaults.end_log_file),
            database_url: lookup("DATABASE_URL").unwrap_or(defaults.database_url),
            logging_level: lookup("LOGGING_LEVEL").unwrap_or(defaults.logging_level),
            log_file: lookup("LOG_FILE").map(PathBuf::from).unwrap_or(defaults.log_file),
        }
    }

    pub fn report_sources(&self) -> ReportSources {
        ReportSources::new(
            self.data_path.join(&self.abbreviations_file),
            self.data_path.join(&self.start_log_file),
            self.data_path.join(&self.end_log_file),
        )
    }
}
