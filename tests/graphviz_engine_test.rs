use graphviz_chart_service::engine::{GraphEngine, GraphvizEngine};
use graphviz_chart_service::params::{LayoutEngine, OutputFormat};
use graphviz_chart_service::settings::Config;
use graphviz_chart_service::{AppState, init_openapi_route};
use poem::{http::StatusCode, test::TestClient};
use std::sync::Arc;

const TEST_GRAPH: &str = "
graph {
    a -- b;
    b -- c;
    a -- c;
    d -- c;
    e -- c;
    e -- a;
}
";

const PNG_MAGIC: &[u8] = b"\x89PNG\r\n\x1a\n";

/// These tests need a Graphviz installation and are skipped without one.
fn graphviz() -> Option<GraphvizEngine> {
    let engine = GraphvizEngine::default();
    match engine.version() {
        Ok(version) => {
            println!("running against {}", version);
            Some(engine)
        }
        Err(e) => {
            println!("skipping, Graphviz not available: {}", e);
            None
        }
    }
}

#[test]
fn test_parse_and_render_png() {
    let Some(engine) = graphviz() else { return };

    let graph = engine
        .parse(TEST_GRAPH)
        .expect("graph should parse")
        .expect("graph should not be empty")
        .with_layout(LayoutEngine::Circo);

    let mut image = Vec::new();
    engine
        .render(&graph, OutputFormat::Png, &mut image)
        .expect("graph should render");

    assert!(image.starts_with(PNG_MAGIC));
}

#[test]
fn test_parse_error_carries_graphviz_message() {
    let Some(engine) = graphviz() else { return };

    let broken = TEST_GRAPH.replacen(';', "{", 2);
    let err = engine.parse(&broken).unwrap_err();

    assert!(!err.to_string().is_empty());
}

#[test]
fn test_input_without_graph_parses_to_nothing() {
    let Some(engine) = graphviz() else { return };

    let graph = engine.parse(" \n").expect("blank input is accepted by dot");
    assert!(graph.is_none());
}

fn render_png(engine: &GraphvizEngine, definition: &str, layout: LayoutEngine) -> Vec<u8> {
    let graph = engine
        .parse(definition)
        .expect("graph should parse")
        .expect("graph should not be empty")
        .with_layout(layout);

    let mut image = Vec::new();
    engine
        .render(&graph, OutputFormat::Png, &mut image)
        .expect("graph should render");
    image
}

#[test]
fn test_requested_layout_overrides_layout_attribute() {
    let Some(engine) = graphviz() else { return };

    let with_attribute = TEST_GRAPH.replacen("graph {", "graph {\n    layout=neato;", 1);
    let circo = render_png(&engine, TEST_GRAPH, LayoutEngine::Circo);
    let neato = render_png(&engine, TEST_GRAPH, LayoutEngine::Neato);

    let overridden = render_png(&engine, &with_attribute, LayoutEngine::Circo);
    assert_eq!(overridden, circo);
    assert_ne!(overridden, neato);
}

#[test]
fn test_only_first_graph_is_kept() {
    let Some(engine) = graphviz() else { return };

    let two_graphs = format!("{}\ndigraph second {{ x -> y; }}\n", TEST_GRAPH);
    let graph = engine.parse(&two_graphs).unwrap().unwrap();

    assert!(graph.source().contains("a -- b"));
    assert!(!graph.source().contains("second"));

    let single = render_png(&engine, TEST_GRAPH, LayoutEngine::Dot);
    assert_eq!(render_png(&engine, &two_graphs, LayoutEngine::Dot), single);
}

#[test]
fn test_many_graphs_do_not_block_the_pipes() {
    let Some(engine) = graphviz() else { return };

    // enough canonical output to fill a pipe before all input is read
    let input: String = (0..5000)
        .map(|i| format!("graph g{i} {{ node_{i}_a -- node_{i}_b; }}\n"))
        .collect();
    let graph = engine.parse(&input).unwrap().unwrap();

    assert!(graph.source().contains("node_0_a"));
    assert!(!graph.source().contains("node_1_a"));
}

#[test]
fn test_missing_binary_fails_to_parse() {
    let engine = GraphvizEngine::new("/nonexistent/graphviz/dot");

    let err = engine.parse(TEST_GRAPH).unwrap_err();
    assert!(err.to_string().contains("Failed to spawn"));
    assert!(engine.version().is_err());
}

#[tokio::test]
async fn test_chart_endpoint_renders_with_graphviz() {
    let Some(engine) = graphviz() else { return };

    let app_state = Arc::new(AppState::new(engine));
    let cli = TestClient::new(init_openapi_route(app_state, &Config::default()));

    let mut bodies = vec![];
    for cht in ["circo", "gv:circo", "circo"] {
        let resp = cli
            .post("/chart")
            .body_json(&serde_json::json!({ "cht": cht, "chof": "png", "chl": TEST_GRAPH }))
            .send()
            .await;
        resp.assert_status_is_ok();
        bodies.push(resp.0.into_body().into_vec().await.unwrap());
    }

    assert!(bodies[0].starts_with(PNG_MAGIC));
    assert_eq!(bodies[0], bodies[1]);
    assert_eq!(bodies[0], bodies[2]);
}

#[tokio::test]
async fn test_chart_endpoint_reports_parse_failure() {
    let Some(engine) = graphviz() else { return };

    let app_state = Arc::new(AppState::new(engine));
    let cli = TestClient::new(init_openapi_route(app_state, &Config::default()));

    let broken = TEST_GRAPH.replacen(';', "{", 2);
    let resp = cli
        .post("/chart")
        .body_json(&serde_json::json!({ "cht": "circo", "chof": "png", "chl": broken }))
        .send()
        .await;

    resp.assert_status(StatusCode::INTERNAL_SERVER_ERROR);
    let body = resp.0.into_body().into_string().await.unwrap();
    assert!(body.starts_with("failed to parse input"));
}
