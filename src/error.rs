use poem::http::StatusCode;
use thiserror::Error;

use crate::params::CHART_TYPE_ERROR;

/// Every way a chart request can fail. The display text is the response body.
#[derive(Debug, Error)]
pub enum ChartError {
    #[error("unexpected content-type: {0}")]
    UnsupportedContentType(String),

    #[error("failed to read request body: {0}")]
    UnreadableBody(String),

    #[error("failed to parse request body: {0}")]
    MalformedBody(String),

    #[error("failed to parse request form: {0}")]
    MalformedForm(String),

    #[error("{}", CHART_TYPE_ERROR.as_str())]
    InvalidChartType,

    #[error("output format ('chof') must be 'png'")]
    InvalidOutputFormat,

    #[error("chart definition ('chl') must not be empty")]
    EmptyChartDefinition,

    #[error("failed to parse input: {0}")]
    ParseFailed(String),

    /// The engine reported success but produced no graph.
    #[error("failed to parse input")]
    NoGraph,

    #[error("failed to render input: {0}")]
    RenderFailed(String),
}

impl ChartError {
    pub fn status(&self) -> StatusCode {
        match self {
            ChartError::UnsupportedContentType(_)
            | ChartError::UnreadableBody(_)
            | ChartError::MalformedBody(_)
            | ChartError::MalformedForm(_)
            | ChartError::InvalidChartType
            | ChartError::InvalidOutputFormat
            | ChartError::EmptyChartDefinition => StatusCode::BAD_REQUEST,
            ChartError::ParseFailed(_) | ChartError::NoGraph | ChartError::RenderFailed(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}
