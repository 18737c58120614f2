use std::fs;
use std::io::{self, BufRead, Write};
use std::path::Path;
use std::process;

use clap::{Parser, Subcommand};
use log::{error, info};

use race_report::api::{driver_document, drivers_document, report_document, ApiResponse, ResponseFormat};
use race_report::modules::biography::{driver_profile, WikipediaClient};
use race_report::modules::export::export_report;
use race_report::modules::helpers::config::Config;
use race_report::modules::helpers::logging::setup_logging;
use race_report::modules::helpers::time::TimeHelper;
use race_report::modules::models::database::{Direction, OrderBy, RaceDatabase, SqliteDatabase};
use race_report::{CustomResult, DriverLookup, DriverRecord, Error, RankingView, ReportStore};

/// Drivers statistics and reports
#[derive(Debug, Parser)]
#[command(author, version, about)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Rebuild the drivers database from the data files
    Rebuild {
        /// Remove an existing database without asking
        #[arg(short, long)]
        yes: bool,
    },
    /// Print the ranking by best lap
    Report {
        /// Slowest driver first
        #[arg(long)]
        desc: bool,
    },
    /// List the drivers by name, or show a single driver
    Drivers {
        /// Reverse alphabetical order
        #[arg(long)]
        desc: bool,
        /// Abbreviation or (part of) the name of a driver
        #[arg(short, long)]
        driver: Option<String>,
        /// Also look up the biography of the driver
        #[arg(long, requires = "driver")]
        wiki: bool,
    },
    /// Print an api document
    Api {
        #[command(subcommand)]
        resource: Resource,
        /// json or xml
        #[arg(short, long, global = true)]
        format: Option<String>,
    },
    /// Read the drivers back from the database
    Stored {
        #[arg(long)]
        desc: bool,
        /// Order by best lap instead of name
        #[arg(long)]
        by_lap: bool,
        /// Abbreviation or (part of) the name of a driver
        #[arg(short, long)]
        query: Option<String>,
    },
}

#[derive(Debug, Subcommand)]
enum Resource {
    Drivers,
    Report,
    Driver { query: String },
}

fn main() {
    let cli = Cli::parse();
    let config = Config::from_env();

    if let Err(err) = setup_logging(&config.logging_level, &config.log_file) {
        eprintln!("failed to setup logging: {}", err);
    }

    if let Err(err) = run(cli.command, &config) {
        if err.is_build_error() {
            error!(target:"main", "could not build the report from {}: {}", config.data_path.display(), err);
        } else {
            error!(target:"main", "{}", err);
        }
        eprintln!("error: {}", err);
        process::exit(1);
    }
}

fn run(command: Command, config: &Config) -> CustomResult<()> {
    let mut store = ReportStore::new();

    match command {
        Command::Rebuild { yes } => {
            store.rebuild(&config.report_sources())?;
            if !remove_old_database(&config.database_url, yes)? {
                println!("Exiting");
                return Ok(());
            }

            let mut db = SqliteDatabase::connect(&config.database_url)?;
            db.create_tables()?;
            let summary = export_report(&mut db, store.drivers())?;
            println!(
                "{} teams and {} drivers saved to {}",
                summary.teams_saved, summary.drivers_saved, config.database_url
            );
        }
        Command::Report { desc } => {
            store.rebuild(&config.report_sources())?;
            for line in RankingView::rank(&store, !desc) {
                println!("{}", line);
            }
        }
        Command::Drivers { desc, driver, wiki } => {
            store.rebuild(&config.report_sources())?;
            match driver {
                Some(query) if wiki => match driver_profile(&store, &query, &WikipediaClient::new()) {
                    Some(profile) => {
                        print_driver(&profile.driver);
                        println!();
                        println!("{}", profile.biography.unwrap_or_else(|| "No biography found".to_string()));
                    }
                    None => println!("Driver '{}' not found", query),
                },
                Some(query) => match DriverLookup::get_by_id(&store, &query) {
                    Some(driver) => print_driver(&driver),
                    None => println!("Driver '{}' not found", query),
                },
                None => {
                    for driver in DriverLookup::all(&store, !desc) {
                        print_driver(&driver);
                    }
                }
            }
        }
        Command::Api { resource, format } => {
            store.rebuild(&config.report_sources())?;
            let format = ResponseFormat::from_query(format.as_deref());
            let (status, document) = match resource {
                Resource::Drivers => (200, drivers_document(&store)?),
                Resource::Report => (200, report_document(&store)?),
                Resource::Driver { query } => driver_document(&store, &query)?,
            };

            let response = ApiResponse::new(status, &document, format)?;
            println!("{} {}", response.status, response.content_type);
            println!("{}", response.body);
        }
        Command::Stored { desc, by_lap, query } => {
            let mut db = SqliteDatabase::connect(&config.database_url)?;
            match query {
                Some(query) => match db.select_by_abbr_or_name_contains(&query)? {
                    Some(driver) => print_driver(&driver),
                    None => println!("Driver '{}' not found", query),
                },
                None => {
                    let order_by = if by_lap { OrderBy::BestLap } else { OrderBy::Name };
                    for driver in db.select_all(order_by, Direction::from_ascending(!desc))? {
                        print_driver(&driver);
                    }
                }
            }
        }
    }

    Ok(())
}

fn print_driver(driver: &DriverRecord) {
    println!(
        "{} {:<20} | {:<25} | {}",
        driver.abbreviation,
        driver.name,
        driver.team,
        TimeHelper::format_lap(&driver.best_lap)
    );
}

/// remove the database file when it exists. returns false when the user declined
fn remove_old_database(database_url: &str, yes: bool) -> CustomResult<bool> {
    let path = Path::new(database_url);
    if database_url == ":memory:" || !path.exists() {
        return Ok(true);
    }

    if !yes {
        print!("Delete old version file: {}\n(y/n)? ", path.display());
        let _ = io::stdout().flush();

        let mut answer = String::new();
        if io::stdin().lock().read_line(&mut answer).is_err() || answer.trim() != "y" {
            return Ok(false);
        }
    }

    fs::remove_file(path).map_err(|source| Error::DatabaseRemoveError {
        path: path.to_path_buf(),
        source,
    })?;
    info!(target:"main:remove_old_database", "removed old database {}", path.display());
    Ok(true)
}
