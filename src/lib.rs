use std::sync::Arc;

use poem::{
    EndpointExt, Route,
    middleware::{AddData, AddDataEndpoint, Cors, CorsEndpoint},
};
use poem_openapi::OpenApiService;

use crate::engine::GraphEngine;
use crate::routes::chart::ApiChart;
use crate::settings::Config;

pub mod chart;
pub mod engine;
pub mod error;
pub mod params;
pub mod routes;
pub mod schemas;
pub mod settings;

/// Shared by every request; the engine is the only state and it is read-only.
pub struct AppState {
    pub engine: Arc<dyn GraphEngine>,
}

impl AppState {
    pub fn new(engine: impl GraphEngine + 'static) -> Self {
        Self {
            engine: Arc::new(engine),
        }
    }
}

pub type ChartEndpoint = CorsEndpoint<AddDataEndpoint<Route, Arc<AppState>>>;

/// Chart and health routes under `config.prefix`, plus the OpenAPI
/// document at `/openapi.json` and Swagger UI at `/docs`.
pub fn init_openapi_route(app_state: Arc<AppState>, config: &Config) -> ChartEndpoint {
    let prefix = config.prefix.as_deref().unwrap_or("/");
    let chart_api = OpenApiService::new(ApiChart, "Graphviz Chart API", env!("CARGO_PKG_VERSION"))
        .description(
            "Render Graphviz DOT charts to PNG with Google Chart API style \
             `cht`, `chof` and `chl` parameters.",
        )
        .server(prefix);

    let spec = chart_api.spec_endpoint();
    let docs = chart_api.swagger_ui();

    tracing::debug!(
        "chart routes mounted at {} using the {} engine",
        prefix,
        app_state.engine.name()
    );

    Route::new()
        .nest(prefix, chart_api)
        .nest("/docs", docs)
        .at("/openapi.json", spec)
        .with(AddData::new(app_state))
        .with(Cors::new())
}
