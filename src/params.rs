use std::fmt;
use std::str::FromStr;

use once_cell::sync::Lazy;

/// Prefix some legacy chart clients put in front of the chart type (`gv:dot`).
pub const CHART_TYPE_PREFIX: &str = "gv:";

/// Graphviz layout engines accepted in the `cht` parameter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LayoutEngine {
    Circo,
    Dot,
    Fdp,
    Neato,
    Nop,
    Nop1,
    Nop2,
    Osage,
    Patchwork,
    Sfdp,
    Twopi,
}

pub static CHART_TYPE_ERROR: Lazy<String> = Lazy::new(|| {
    let names: Vec<&str> = LayoutEngine::ALL.iter().map(|l| l.as_str()).collect();
    format!("chart type ('cht') must be one of: {}", names.join(", "))
});

impl LayoutEngine {
    /// Canonical order, used when listing the accepted values.
    pub const ALL: [LayoutEngine; 11] = [
        LayoutEngine::Circo,
        LayoutEngine::Dot,
        LayoutEngine::Fdp,
        LayoutEngine::Neato,
        LayoutEngine::Nop,
        LayoutEngine::Nop1,
        LayoutEngine::Nop2,
        LayoutEngine::Osage,
        LayoutEngine::Patchwork,
        LayoutEngine::Sfdp,
        LayoutEngine::Twopi,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            LayoutEngine::Circo => "circo",
            LayoutEngine::Dot => "dot",
            LayoutEngine::Fdp => "fdp",
            LayoutEngine::Neato => "neato",
            LayoutEngine::Nop => "nop",
            LayoutEngine::Nop1 => "nop1",
            LayoutEngine::Nop2 => "nop2",
            LayoutEngine::Osage => "osage",
            LayoutEngine::Patchwork => "patchwork",
            LayoutEngine::Sfdp => "sfdp",
            LayoutEngine::Twopi => "twopi",
        }
    }

    /// Parse a raw `cht` value, dropping a single leading `gv:` first.
    pub fn from_chart_type(raw: &str) -> Option<Self> {
        let name = raw.strip_prefix(CHART_TYPE_PREFIX).unwrap_or(raw);
        name.parse().ok()
    }
}

impl FromStr for LayoutEngine {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        LayoutEngine::ALL
            .iter()
            .copied()
            .find(|layout| layout.as_str() == s)
            .ok_or(())
    }
}

impl fmt::Display for LayoutEngine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Output encodings accepted in the `chof` parameter. Only PNG for now.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Png,
}

impl OutputFormat {
    pub fn as_str(&self) -> &'static str {
        match self {
            OutputFormat::Png => "png",
        }
    }
}

impl FromStr for OutputFormat {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "png" => Ok(OutputFormat::Png),
            _ => Err(()),
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
