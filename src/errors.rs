use std::path::PathBuf;

use snafu::Snafu;

pub type CustomResult<T> = Result<T, Error>;

#[derive(Debug, Snafu)]
#[snafu(visibility(pub(crate)))]
pub enum Error {
    #[snafu(display("Could not open {}: {}", path.display(), source))]
    FileAccessError {
        path: PathBuf,
        source: std::io::Error,
    },

    #[snafu(display(
        "Malformed record in {} on line {}: {} (line: {:?})",
        path.display(),
        line_number,
        reason,
        line
    ))]
    MalformedRecordError {
        path: PathBuf,
        line_number: usize,
        line: String,
        reason: String,
    },

    #[snafu(display("No {} time logged for driver {}", kind, abbreviation))]
    MissingTimestampError {
        abbreviation: String,
        kind: &'static str,
    },

    #[snafu(display("{} '{}' already exists", entity, key))]
    DuplicateKeyError { entity: &'static str, key: String },

    #[snafu(display("Nothing to save to the database. Build the report first"))]
    EmptyReportError,

    #[snafu(display("Team '{}' is not in the database", name))]
    UnknownTeamError { name: String },

    #[snafu(display("Stored driver {} has an invalid {}: {:?}", abbreviation, field, value))]
    StoredRecordError {
        abbreviation: String,
        field: &'static str,
        value: String,
    },

    #[snafu(context(false), display("Database error: {}", source))]
    DatabaseError { source: diesel::result::Error },

    #[snafu(display("Could not delete old database {}: {}", path.display(), source))]
    DatabaseRemoveError {
        path: PathBuf,
        source: std::io::Error,
    },

    #[snafu(display("Could not connect to database {}: {}", url, source))]
    DatabaseConnectionError {
        url: String,
        source: diesel::ConnectionError,
    },

    #[snafu(display("Biography request for '{}' failed: {}", name, source))]
    BiographyRequestError { name: String, source: reqwest::Error },

    #[snafu(display("Biography response for '{}' could not be read: {}", name, source))]
    BiographyFormatError {
        name: String,
        source: serde_json::Error,
    },

    #[snafu(display("No biography found for '{}'", name))]
    BiographyNotFoundError { name: String },

    #[snafu(display("Could not serialize payload: {}", source))]
    SerializeError { source: serde_json::Error },
}

impl Error {
    /// true for the errors that come from reading the source files of a report
    pub fn is_build_error(&self) -> bool {
        matches!(
            self,
            Error::FileAccessError { .. }
                | Error::MalformedRecordError { .. }
                | Error::MissingTimestampError { .. }
        )
    }
}
