use std::str::FromStr;
use std::sync::Arc;

use graphviz_chart_service::engine::GraphvizEngine;
use graphviz_chart_service::settings::{Config, get_config};
use graphviz_chart_service::{AppState, init_openapi_route};
use poem::listener::TcpListener;
use tracing::Level;
use tracing_appender::non_blocking::WorkerGuard;

fn init_logging(config: &Config) -> WorkerGuard {
    let log_level = Level::from_str(&config.log_level).unwrap_or(Level::INFO);

    let (writer, guard) = match &config.log_dir {
        // Logging to File
        Some(dir) => {
            let file_appender = tracing_appender::rolling::daily(dir, "chart.log");
            tracing_appender::non_blocking(file_appender)
        }
        None => tracing_appender::non_blocking(std::io::stdout()),
    };

    let builder = tracing_subscriber::fmt()
        .with_writer(writer)
        .with_max_level(log_level);

    if config.log_json() {
        builder.json().init();
    } else {
        builder.init();
    }

    guard
}

#[tokio::main]
async fn main() {
    let config = match get_config() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("invalid configuration: {}", e);
            std::process::exit(1);
        }
    };

    let _guard = init_logging(&config);

    tracing::info!("Chart server starting up");
    tracing::info!("run with config: {:?}", config);

    let engine = GraphvizEngine::new(config.graphviz_bin.clone());
    match engine.version() {
        Ok(version) => tracing::info!("using {}", version),
        Err(e) => tracing::warn!("Graphviz is not usable yet, renders will fail: {}", e),
    }

    // Init App State
    let app_state = Arc::new(AppState::new(engine));

    let app = init_openapi_route(app_state, &config);
    tracing::info!("run server on {}:{}", config.host, config.port);
    if let Err(e) = poem::Server::new(TcpListener::bind(format!(
        "{}:{}",
        config.host, config.port
    )))
    .run(app)
    .await
    {
        tracing::error!("server stopped: {}", e);
        std::process::exit(1);
    }
}
