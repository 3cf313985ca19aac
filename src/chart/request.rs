use serde::{Deserialize, Deserializer};
use url::form_urlencoded;

use crate::error::ChartError;

/// Chart parameters as submitted, before any validation.
///
/// Missing or `null` parameters decode to empty strings; the validator
/// decides what an empty value means.
#[derive(Deserialize, Debug, Clone, Default, PartialEq, Eq)]
#[serde(default)]
pub struct ChartRequest {
    /// Chart type, i.e. the graphviz layout engine
    #[serde(deserialize_with = "null_as_empty")]
    cht: String,

    /// Chart output format
    #[serde(deserialize_with = "null_as_empty")]
    chof: String,

    /// Chart definition in the DOT language
    #[serde(deserialize_with = "null_as_empty")]
    chl: String,
}

fn null_as_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

/// Rejects a `%` that does not start a two hex digit escape.
fn check_escapes(raw: &[u8]) -> Result<(), ChartError> {
    for (i, _) in raw.iter().enumerate().filter(|(_, b)| **b == b'%') {
        let escape = &raw[i..raw.len().min(i + 3)];
        if escape.len() < 3 || !escape[1..].iter().all(u8::is_ascii_hexdigit) {
            return Err(ChartError::MalformedForm(format!(
                "invalid URL escape {:?}",
                String::from_utf8_lossy(escape)
            )));
        }
    }
    Ok(())
}

/// Body encodings understood by the chart endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RequestEncoding {
    Json,
    Form,
}

impl RequestEncoding {
    pub fn from_content_type(content_type: Option<&str>) -> Result<Self, ChartError> {
        let raw = content_type.unwrap_or_default();
        let essence = raw.split(';').next().unwrap_or_default().trim();

        if essence.eq_ignore_ascii_case("application/json") {
            Ok(RequestEncoding::Json)
        } else if essence.eq_ignore_ascii_case("application/x-www-form-urlencoded") {
            Ok(RequestEncoding::Form)
        } else {
            Err(ChartError::UnsupportedContentType(raw.to_string()))
        }
    }
}

impl ChartRequest {
    pub fn new(
        cht: impl Into<String>,
        chof: impl Into<String>,
        chl: impl Into<String>,
    ) -> Self {
        Self {
            cht: cht.into(),
            chof: chof.into(),
            chl: chl.into(),
        }
    }

    pub fn chart_type(&self) -> &str {
        &self.cht
    }

    pub fn output_format(&self) -> &str {
        &self.chof
    }

    pub fn chart_definition(&self) -> &str {
        &self.chl
    }

    /// Build a request from the raw `Content-Type` header, URL query and body.
    pub fn decode(
        content_type: Option<&str>,
        query: Option<&str>,
        body: &[u8],
    ) -> Result<Self, ChartError> {
        match RequestEncoding::from_content_type(content_type)? {
            RequestEncoding::Json => Self::from_json(body),
            RequestEncoding::Form => Self::from_form(body, query),
        }
    }

    fn from_json(body: &[u8]) -> Result<Self, ChartError> {
        serde_json::from_slice(body).map_err(|e| ChartError::MalformedBody(e.to_string()))
    }

    /// Body values win; the query string only fills parameters the body lacks.
    fn from_form(body: &[u8], query: Option<&str>) -> Result<Self, ChartError> {
        check_escapes(body)?;
        if let Some(query) = query {
            check_escapes(query.as_bytes())?;
        }

        let mut cht = None;
        let mut chof = None;
        let mut chl = None;

        let query_pairs = query
            .map(|q| form_urlencoded::parse(q.as_bytes()))
            .into_iter()
            .flatten();

        for (key, value) in form_urlencoded::parse(body).chain(query_pairs) {
            let slot = match key.as_ref() {
                "cht" => &mut cht,
                "chof" => &mut chof,
                "chl" => &mut chl,
                _ => continue,
            };
            if slot.is_none() {
                *slot = Some(value.into_owned());
            }
        }

        Ok(Self {
            cht: cht.unwrap_or_default(),
            chof: chof.unwrap_or_default(),
            chl: chl.unwrap_or_default(),
        })
    }
}
