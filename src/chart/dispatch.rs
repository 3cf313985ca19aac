use std::sync::Arc;

use crate::{
    chart::{request::ChartRequest, validate::ValidatedChart},
    engine::GraphEngine,
    error::ChartError,
};

/// Validate a chart request and render it with `engine`.
///
/// The image is fully buffered before returning so an engine failure can
/// never leave a half-written response behind.
pub async fn render_chart(
    engine: Arc<dyn GraphEngine>,
    request: ChartRequest,
) -> Result<Vec<u8>, ChartError> {
    let chart = match request.validate() {
        Ok(chart) => chart,
        Err(e) => {
            tracing::warn!(
                chart_type = request.chart_type(),
                output_format = request.output_format(),
                "Rejected chart request: {}",
                e
            );
            return Err(e);
        }
    };

    tracing::info!(
        "Rendering: engine={}, layout={}, format={}, definition_len={}",
        engine.name(),
        chart.layout,
        chart.format,
        chart.definition.len()
    );

    let result = tokio::task::spawn_blocking(move || render_validated(engine.as_ref(), &chart))
        .await
        .map_err(|e| ChartError::RenderFailed(format!("task join error: {}", e)))?;

    match &result {
        Ok(image) => tracing::info!("Render completed successfully, size: {} bytes", image.len()),
        Err(e) => tracing::error!(status = %e.status(), "Render error: {}", e),
    }

    result
}

/// Parse, apply the layout and render. Blocks on the engine.
pub fn render_validated(
    engine: &dyn GraphEngine,
    chart: &ValidatedChart,
) -> Result<Vec<u8>, ChartError> {
    let graph = engine
        .parse(&chart.definition)
        .map_err(|e| ChartError::ParseFailed(e.to_string()))?
        .ok_or(ChartError::NoGraph)?
        .with_layout(chart.layout);

    let mut image = Vec::new();
    engine
        .render(&graph, chart.format, &mut image)
        .map_err(|e| ChartError::RenderFailed(e.to_string()))?;

    Ok(image)
}
