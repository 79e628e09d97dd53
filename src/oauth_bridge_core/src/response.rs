//! In-memory HTTP response used as the default [`ResponseSink`].

use std::str::FromStr;

use serde::Deserialize;

use crate::{
    http_abstraction::ResponseSink,
    params::{Headers, Parameters},
    status::{StatusClass, reason_phrase},
};

/// Serialization format for a response body.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BodyFormat {
    #[default]
    Json,
    Xml,
}

impl BodyFormat {
    pub fn content_type(self) -> &'static str {
        match self {
            BodyFormat::Json => "application/json",
            BodyFormat::Xml => "text/xml",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Unknown body format: {0}")]
pub struct BodyFormatParseError(String);

impl FromStr for BodyFormat {
    type Err = BodyFormatParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "json" => Ok(BodyFormat::Json),
            "xml" => Ok(BodyFormat::Xml),
            _ => Err(BodyFormatParseError(s.to_string())),
        }
    }
}

/// Status line, headers and parameters of a response under construction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpResponse {
    status: u16,
    headers: Headers,
    parameters: Parameters,
}

impl Default for HttpResponse {
    fn default() -> Self {
        Self::new()
    }
}

impl HttpResponse {
    /// An empty `200 OK` response.
    pub fn new() -> Self {
        Self {
            status: 200,
            headers: Headers::new(),
            parameters: Parameters::new(),
        }
    }

    pub fn headers(&self) -> &Headers {
        &self.headers
    }

    pub fn status_class(&self) -> StatusClass {
        StatusClass::of(self.status)
    }

    pub fn is_invalid(&self) -> bool {
        self.status_class() == StatusClass::Invalid
    }

    pub fn is_informational(&self) -> bool {
        self.status_class() == StatusClass::Informational
    }

    pub fn is_successful(&self) -> bool {
        self.status_class() == StatusClass::Successful
    }

    pub fn is_redirection(&self) -> bool {
        self.status_class() == StatusClass::Redirection
    }

    pub fn is_client_error(&self) -> bool {
        self.status_class() == StatusClass::ClientError
    }

    pub fn is_server_error(&self) -> bool {
        self.status_class() == StatusClass::ServerError
    }

    /// Reason phrase for the current status, empty if unknown.
    pub fn status_text(&self) -> &'static str {
        reason_phrase(self.status).unwrap_or_default()
    }

    /// Serialize the parameters in the given format.
    pub fn body(&self, format: BodyFormat) -> Result<String, serde_json::Error> {
        match format {
            BodyFormat::Json => serde_json::to_string(&self.parameters),
            BodyFormat::Xml => Ok(self.xml_body()),
        }
    }

    fn xml_body(&self) -> String {
        let mut xml = String::from("<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n<response>");
        for (key, value) in self.parameters.iter() {
            if !is_xml_name(key) {
                tracing::debug!(key = %key, "Skipping parameter that is not a valid XML element name");
                continue;
            }
            xml.push_str(&format!("<{key}>{}</{key}>", escape_xml(value)));
        }
        xml.push_str("</response>");
        xml
    }
}

/// Element names: a letter or `_`, then letters, digits, `-`, `_` or `.`.
fn is_xml_name(name: &str) -> bool {
    let mut chars = name.chars();
    chars
        .next()
        .is_some_and(|c| c.is_alphabetic() || c == '_')
        && chars.all(|c| c.is_alphanumeric() || matches!(c, '-' | '_' | '.'))
}

fn escape_xml(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&apos;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

impl ResponseSink for HttpResponse {
    fn status_code(&self) -> u16 {
        self.status
    }

    fn set_status_code(&mut self, code: u16) {
        self.status = code;
    }

    fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name)
    }

    fn set_header(&mut self, name: &str, value: &str) {
        self.headers.insert(name, value);
    }

    fn set_parameter(&mut self, name: &str, value: &str) {
        self.parameters.insert(name, value);
    }

    fn parameters(&self) -> &Parameters {
        &self.parameters
    }
}
