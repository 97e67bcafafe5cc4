use std::collections::BTreeMap;
use std::path::Path;

use serde::Serialize;

use crate::pipeline::boxplot::GroupLegend;
use crate::pipeline::motif_map::LegendEntry;
use crate::report::write_text;

pub const TOOL_NAME: &str = "phytoplot";

#[derive(Debug, Clone, Serialize)]
pub struct RunSummary {
    pub tool: &'static str,
    pub version: &'static str,
    pub command: &'static str,
    pub inputs: BTreeMap<String, String>,
    pub counts: BTreeMap<String, usize>,
    pub warnings: Vec<String>,
    pub outputs: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub groups: Option<Vec<GroupLegend>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub motifs: Option<Vec<LegendEntry>>,
}

impl RunSummary {
    pub fn new(command: &'static str) -> Self {
        Self {
            tool: TOOL_NAME,
            version: env!("CARGO_PKG_VERSION"),
            command,
            inputs: BTreeMap::new(),
            counts: BTreeMap::new(),
            warnings: Vec::new(),
            outputs: Vec::new(),
            groups: None,
            motifs: None,
        }
    }

    pub fn input(&mut self, key: &str, path: &Path) {
        self.inputs
            .insert(key.to_string(), path.display().to_string());
    }

    pub fn count(&mut self, key: &str, value: usize) {
        self.counts.insert(key.to_string(), value);
    }

    /// Records the warning and emits it to the log.
    pub fn warn(&mut self, message: impl Into<String>) {
        let message = message.into();
        tracing::warn!("{message}");
        self.warnings.push(message);
    }

    pub fn output(&mut self, path: &Path) {
        self.outputs.push(path.display().to_string());
    }
}

pub fn render_summary_json(summary: &RunSummary) -> serde_json::Result<String> {
    serde_json::to_string_pretty(summary)
}

pub fn write_summary_json(summary: &RunSummary, path: &Path) -> std::io::Result<()> {
    let json = render_summary_json(summary)?;
    write_text(path, &json)
}

#[cfg(test)]
#[path = "../../tests/src_inline/report/json.rs"]
mod tests;
