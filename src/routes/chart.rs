use std::sync::Arc;

use poem::{Body, Request, web::Data};
use poem_openapi::{
    OpenApi, Tags,
    payload::{Binary, Json},
};

use crate::{
    AppState,
    chart::{ChartRequest, render_chart},
    error::ChartError,
    schemas::{
        chart::{ChartResponse, HealthResponse},
        common::OkResponse,
    },
};

#[derive(Tags)]
enum ApiChartTags {
    Chart,
}

pub struct ApiChart;

#[OpenApi()]
impl ApiChart {
    /// Render Chart
    ///
    /// Render a graph described in the DOT language to an image, using the
    /// Google Chart API style `cht`, `chof` and `chl` parameters.
    /// The body may be `application/x-www-form-urlencoded` or `application/json`.
    ///
    /// # Example Request
    /// ```text
    /// cht=gv:circo&chof=png&chl=graph{a--b;b--c;a--c;}
    /// ```
    #[oai(path = "/chart", method = "post", tag = "ApiChartTags::Chart")]
    async fn chart(
        &self,
        req: &Request,
        body: Body,
        state: Data<&Arc<AppState>>,
    ) -> ChartResponse {
        let body = match body.into_vec().await {
            Ok(body) => body,
            Err(e) => {
                let err = ChartError::UnreadableBody(e.to_string());
                tracing::error!("{}", err);
                return err.into();
            }
        };

        let request = match ChartRequest::decode(req.content_type(), req.uri().query(), &body) {
            Ok(request) => request,
            Err(e) => {
                tracing::error!("failed to read request payload: {}", e);
                return e.into();
            }
        };

        match render_chart(state.engine.clone(), request).await {
            Ok(image) => ChartResponse::Image(Binary(image)),
            Err(e) => e.into(),
        }
    }

    #[oai(path = "/health", method = "get")]
    async fn health(&self) -> HealthResponse {
        HealthResponse::Ok(Json(OkResponse::default()))
    }
}
