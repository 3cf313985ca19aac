use std::io::Write;

use anyhow::Result;

use crate::params::{LayoutEngine, OutputFormat};

pub mod graphviz;

pub use graphviz::GraphvizEngine;

/// A graph the engine has parsed and can render.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Graph {
    source: String,
    layout: Option<LayoutEngine>,
}

impl Graph {
    pub fn new(source: impl Into<String>) -> Self {
        Self {
            source: source.into(),
            layout: None,
        }
    }

    pub fn with_layout(mut self, layout: LayoutEngine) -> Self {
        self.layout = Some(layout);
        self
    }

    /// Engine-specific text of the parsed graph.
    pub fn source(&self) -> &str {
        &self.source
    }

    pub fn layout(&self) -> Option<LayoutEngine> {
        self.layout
    }
}

/// Parses DOT text and renders graphs to images.
///
/// Both calls may block; callers run them off the async executor.
pub trait GraphEngine: Send + Sync {
    fn name(&self) -> &str;

    /// `Ok(None)` means the engine reported no error but produced no graph,
    /// which callers treat as a parse failure.
    fn parse(&self, definition: &str) -> Result<Option<Graph>>;

    fn render(&self, graph: &Graph, format: OutputFormat, sink: &mut dyn Write) -> Result<()>;
}
