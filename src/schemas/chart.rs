use poem_openapi::{
    ApiResponse,
    payload::{Binary, Json, PlainText},
};

use super::common::OkResponse;
use crate::error::ChartError;

#[derive(ApiResponse)]
pub enum ChartResponse {
    /// Rendered chart
    #[oai(status = 200, content_type = "image/png")]
    Image(Binary<Vec<u8>>),

    /// Unsupported body encoding or invalid chart parameters
    #[oai(status = 400)]
    BadRequest(PlainText<String>),

    /// The chart definition could not be parsed or rendered
    #[oai(status = 500)]
    InternalServerError(PlainText<String>),
}

impl From<ChartError> for ChartResponse {
    fn from(err: ChartError) -> Self {
        let message = PlainText(err.to_string());
        if err.status().is_server_error() {
            ChartResponse::InternalServerError(message)
        } else {
            ChartResponse::BadRequest(message)
        }
    }
}

#[derive(ApiResponse)]
pub enum HealthResponse {
    #[oai(status = 200, content_type = "application/json")]
    Ok(Json<OkResponse>),
}
