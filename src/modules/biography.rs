use std::collections::HashMap;
use std::sync::OnceLock;

use log::{info, warn};
use regex::Regex;
use reqwest::blocking::Client;
use reqwest::header::USER_AGENT;
use serde::Deserialize;
use snafu::{OptionExt, ResultExt};

use crate::errors::{
    BiographyFormatSnafu, BiographyNotFoundSnafu, BiographyRequestSnafu, CustomResult,
};
use crate::modules::models::driver::DriverRecord;
use crate::modules::report::lookup::DriverLookup;
use crate::modules::report::store::ReportStore;

pub const WIKIPEDIA_API_URL: &str = "https://en.wikipedia.org/w/api.php";
const CLIENT_USER_AGENT: &str = concat!("race_report/", env!("CARGO_PKG_VERSION"));

/// source of free text about a driver
pub trait BiographyLookup {
    fn biography(&self, name: &str) -> CustomResult<String>;
}

pub struct WikipediaClient {
    client: Client,
    api_url: String,
}

impl WikipediaClient {
    pub fn new() -> WikipediaClient {
        WikipediaClient::with_api_url(WIKIPEDIA_API_URL)
    }

    pub fn with_api_url(api_url: &str) -> WikipediaClient {
        WikipediaClient {
            client: Client::new(),
            api_url: api_url.to_string(),
        }
    }

    /// # parse extract
    /// get the plain text of the page out of a MediaWiki extracts response
    pub fn parse_extract(name: &str, body: &str) -> CustomResult<String> {
        let response: ExtractResponse = serde_json::from_str(body).context(BiographyFormatSnafu { name })?;

        response
            .query
            .and_then(|query| query.pages.into_values().find_map(|page| page.extract))
            .filter(|extract| !extract.trim().is_empty())
            .context(BiographyNotFoundSnafu { name })
    }

    /// # format headings
    /// replace the `== heading ==` markers of a page with bold text
    pub fn format_headings(text: &str) -> String {
        static HEADING: OnceLock<Regex> = OnceLock::new();
        let heading = HEADING.get_or_init(|| Regex::new(r"=+\s*(.*?)\s*=+").expect("heading pattern is valid"));

        heading.replace_all(text, "<b>$1</b>").into_owned()
    }
}

impl Default for WikipediaClient {
    fn default() -> Self {
        WikipediaClient::new()
    }
}

impl BiographyLookup for WikipediaClient {
    fn biography(&self, name: &str) -> CustomResult<String> {
        info!(target: "biography:biography", "Getting biography of {} from wikipedia", name);

        let body = self
            .client
            .get(&self.api_url)
            .header(USER_AGENT, CLIENT_USER_AGENT)
            .query(&[
                ("action", "query"),
                ("prop", "extracts"),
                ("explaintext", "1"),
                ("redirects", "1"),
                ("format", "json"),
                ("titles", name),
            ])
            .send()
            .and_then(|response| response.error_for_status())
            .and_then(|response| response.text())
            .context(BiographyRequestSnafu { name })?;

        let extract = WikipediaClient::parse_extract(name, &body)?;
        Ok(WikipediaClient::format_headings(&extract))
    }
}

#[derive(Deserialize, Debug)]
struct ExtractResponse {
    query: Option<ExtractQuery>,
}

#[derive(Deserialize, Debug)]
struct ExtractQuery {
    pages: HashMap<String, ExtractPage>,
}

#[derive(Deserialize, Debug)]
struct ExtractPage {
    extract: Option<String>,
}

#[derive(PartialEq, Eq, Debug, Clone)]
pub struct DriverProfile {
    pub driver: DriverRecord,
    pub biography: Option<String>,
}

/// # driver profile
/// look up a driver in the current report and attach its biography.
/// a failing biography lookup only leaves the biography empty.
///
/// ## Arguments
/// * `store` - the current report
/// * `query` - (part of) the name or abbreviation of the driver
/// * `lookup` - where to get the biography from
///
/// ## Returns
/// * `Option<DriverProfile>` - none when no driver matches
pub fn driver_profile<B: BiographyLookup>(store: &ReportStore, query: &str, lookup: &B) -> Option<DriverProfile> {
    let driver = DriverLookup::get_by_id(store, query)?;

    let biography = match lookup.biography(&driver.name) {
        Ok(text) => Some(text),
        Err(err) => {
            warn!(target: "biography:driver_profile", "no biography for {}: {}", driver.name, err);
            None
        }
    };

    Some(DriverProfile { driver, biography })
}
