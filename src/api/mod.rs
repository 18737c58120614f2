//! Payloads for the drivers and report resources, rendered as json or xml.

use serde::Serialize;
use serde_json::Value;
use snafu::ResultExt;

use crate::errors::{CustomResult, SerializeSnafu};

pub mod driver;
pub mod report;
pub mod xml;

pub use driver::{driver_document, drivers_document, DriverInfo};
pub use report::report_document;

#[derive(PartialEq, Eq, Debug, Clone, Copy, Default)]
pub enum ResponseFormat {
    #[default]
    Json,
    Xml,
}

impl ResponseFormat {
    /// the format asked for with a `format` query value, json unless it is `xml`
    pub fn from_query(format: Option<&str>) -> ResponseFormat {
        match format {
            Some("xml") => ResponseFormat::Xml,
            _ => ResponseFormat::Json,
        }
    }

    pub fn content_type(&self) -> &'static str {
        match self {
            ResponseFormat::Json => "application/json",
            ResponseFormat::Xml => "application/xml",
        }
    }

    pub fn render(&self, document: &Value) -> CustomResult<String> {
        match self {
            ResponseFormat::Json => serde_json::to_string_pretty(document).context(SerializeSnafu),
            ResponseFormat::Xml => Ok(xml::to_xml(document)),
        }
    }
}

/// a rendered document with the status a web layer should answer with
#[derive(PartialEq, Eq, Debug, Clone)]
pub struct ApiResponse {
    pub status: u16,
    pub content_type: &'static str,
    pub body: String,
}

impl ApiResponse {
    pub fn new(status: u16, document: &Value, format: ResponseFormat) -> CustomResult<ApiResponse> {
        Ok(ApiResponse {
            status,
            content_type: format.content_type(),
            body: format.render(document)?,
        })
    }
}

/// wrap `value` into a document with a single top level key
pub(crate) fn single_key_document<T: Serialize>(key: &str, value: &T) -> CustomResult<Value> {
    let mut document = serde_json::Map::new();
    document.insert(key.to_string(), serde_json::to_value(value).context(SerializeSnafu)?);
    Ok(Value::Object(document))
}
