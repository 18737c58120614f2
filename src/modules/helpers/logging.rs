use std::path::Path;

use fern::Dispatch;
use log::LevelFilter;

/// the log level for a `LOGGING_LEVEL` value, info when the value is unknown
pub fn parse_level(verbosity: &str) -> LevelFilter {
    match verbosity.to_uppercase().as_str() {
        "OFF" => LevelFilter::Off,
        "ERROR" => LevelFilter::Error,
        "WARN" => LevelFilter::Warn,
        "DEBUG" => LevelFilter::Debug,
        "TRACE" => LevelFilter::Trace,
        _ => LevelFilter::Info,
    }
}

pub fn setup_logging(verbosity: &str, log_file: &Path) -> Result<(), fern::InitError> {
    let base_config = Dispatch::new().level(parse_level(verbosity));

    let file_logger_config = Dispatch::new()
        .format(|out, message, record| {
            out.finish(format_args!(
                "{} [{}][{}] {}",
                chrono::Local::now().format("[%Y-%m-%d][%H:%M:%S]"),
                record.target(),
                record.level(),
                message
            ))
        })
        .chain(fern::log_file(log_file)?);

    let stderr_config = Dispatch::new()
        .format(|out, message, record| {
            out.finish(format_args!("[{}][{}] {}", record.level(), record.target(), message))
        })
        .level(LevelFilter::Warn)
        .chain(std::io::stderr());

    base_config
        .chain(file_logger_config)
        .chain(stderr_config)
        .apply()?;

    Ok(())
}
