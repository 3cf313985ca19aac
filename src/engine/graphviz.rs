use anyhow::{Result, anyhow};
use std::io::{ErrorKind, Write};
use std::process::{Command, Stdio};
use std::thread;

use crate::engine::{Graph, GraphEngine};
use crate::params::{LayoutEngine, OutputFormat};

/// Renders through the Graphviz `dot` executable.
#[derive(Clone, Debug)]
pub struct GraphvizEngine {
    binary: String,
}

impl Default for GraphvizEngine {
    fn default() -> Self {
        Self::new("dot")
    }
}

impl GraphvizEngine {
    pub fn new(binary: impl Into<String>) -> Self {
        Self {
            binary: binary.into(),
        }
    }

    /// Reports the Graphviz version string, failing if the binary is unusable.
    pub fn version(&self) -> Result<String> {
        let output = Command::new(&self.binary)
            .arg("-V")
            .output()
            .map_err(|e| anyhow!("Failed to spawn {}: {}", self.binary, e))?;

        if !output.status.success() {
            return Err(anyhow!("{} -V exited with {}", self.binary, output.status));
        }

        // dot prints its version on stderr
        Ok(String::from_utf8_lossy(&output.stderr).trim().to_string())
    }

    fn run(&self, args: &[String], input: &str) -> Result<Vec<u8>> {
        let mut child = Command::new(&self.binary)
            .args(args)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(|e| {
                anyhow!(
                    "Failed to spawn {}: {}. Make sure Graphviz is installed.",
                    self.binary,
                    e
                )
            })?;

        let mut stdin = child
            .stdin
            .take()
            .ok_or_else(|| anyhow!("{} stdin was not captured", self.binary))?;

        // dot may write output before it has read all of its input, so stdin
        // is fed from its own thread while the pipes are drained here.
        let (output, written) = thread::scope(|scope| {
            let writer = scope.spawn(move || stdin.write_all(input.as_bytes()));
            let output = child.wait_with_output();
            (output, writer.join())
        });

        let output = output.map_err(|e| anyhow!("Failed to read {} output: {}", self.binary, e))?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            let stderr = stderr.trim();
            if stderr.is_empty() {
                return Err(anyhow!("{} exited with {}", self.binary, output.status));
            }
            return Err(anyhow!("{}", stderr));
        }

        match written {
            Ok(Ok(())) => {}
            // dot stopped reading once it had what it needed
            Ok(Err(e)) if e.kind() == ErrorKind::BrokenPipe => {}
            Ok(Err(e)) => return Err(anyhow!("Failed to write to {} stdin: {}", self.binary, e)),
            Err(_) => return Err(anyhow!("{} stdin writer panicked", self.binary)),
        }

        Ok(output.stdout)
    }
}

/// The first top-level graph of canonical DOT output, `None` if there is none.
///
/// Braces inside quoted strings and HTML labels do not count.
pub fn first_graph(canonical: &str) -> Option<&str> {
    let mut depth = 0usize;
    let mut html_depth = 0usize;
    let mut in_quotes = false;
    let mut escaped = false;

    for (i, c) in canonical.char_indices() {
        if in_quotes {
            match c {
                _ if escaped => escaped = false,
                '\\' => escaped = true,
                '"' => in_quotes = false,
                _ => {}
            }
            continue;
        }
        if html_depth > 0 {
            match c {
                '<' => html_depth += 1,
                '>' => html_depth -= 1,
                _ => {}
            }
            continue;
        }
        match c {
            '"' => in_quotes = true,
            '<' => html_depth = 1,
            '{' => depth += 1,
            '}' if depth > 0 => {
                depth -= 1;
                if depth == 0 {
                    return Some(&canonical[..=i]);
                }
            }
            _ => {}
        }
    }

    None
}

/// Set `layout` as the last graph attribute so it wins over any `layout`
/// the definition carries itself.
pub fn apply_layout(graph: &str, layout: LayoutEngine) -> String {
    match graph.rfind('}') {
        Some(end) => format!(
            "{}\tlayout=\"{}\";\n{}",
            &graph[..end],
            layout,
            &graph[end..]
        ),
        None => graph.to_string(),
    }
}

impl GraphEngine for GraphvizEngine {
    fn name(&self) -> &str {
        "graphviz"
    }

    fn parse(&self, definition: &str) -> Result<Option<Graph>> {
        let canonical = self.run(&["-Tcanon".to_string()], definition)?;
        let canonical = String::from_utf8(canonical)
            .map_err(|e| anyhow!("Graphviz produced invalid UTF-8: {}", e))?;

        // dot accepts input with no graph in it and prints nothing.
        // Only the first graph is kept when the input holds several.
        Ok(first_graph(&canonical).map(|graph| Graph::new(format!("{}\n", graph.trim_start()))))
    }

    fn render(&self, graph: &Graph, format: OutputFormat, sink: &mut dyn Write) -> Result<()> {
        let layout = graph.layout().unwrap_or(LayoutEngine::Dot);
        let args = [format!("-K{}", layout), format!("-T{}", format)];

        let image = self.run(&args, &apply_layout(graph.source(), layout))?;
        sink.write_all(&image)?;

        Ok(())
    }
}
