//! JSON output formatter

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::Formatter;
use crate::core::{Severity, WorkflowAnalysis};

/// JSON formatter.
///
/// A single workflow renders as one object; a batch renders as an array of
/// such objects. Each object is the analysis itself plus a `metadata` block.
pub struct JsonFormatter;

impl JsonFormatter {
    pub fn new() -> Self {
        Self
    }

    /// Read a rendered report back into analyses. The `metadata` block is ignored.
    pub fn parse(content: &str) -> Result<Vec<WorkflowAnalysis>, serde_json::Error> {
        match serde_json::from_str::<JsonDocument>(content)? {
            JsonDocument::One(analysis) => Ok(vec![analysis]),
            JsonDocument::Many(analyses) => Ok(analyses),
        }
    }

    fn report<'a>(&self, analysis: &'a WorkflowAnalysis, generated: DateTime<Utc>) -> JsonReport<'a> {
        JsonReport {
            metadata: JsonMetadata {
                tool: env!("CARGO_PKG_NAME"),
                version: env!("CARGO_PKG_VERSION"),
                generated,
                rating: analysis.rating().as_str(),
                summary: JsonSummary {
                    total: analysis.issues.len(),
                    critical: analysis.count_by_severity(Severity::Critical),
                    high: analysis.count_by_severity(Severity::High),
                    medium: analysis.count_by_severity(Severity::Medium),
                    low: analysis.count_by_severity(Severity::Low),
                },
            },
            analysis,
        }
    }
}

impl Default for JsonFormatter {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Serialize)]
struct JsonReport<'a> {
    metadata: JsonMetadata,
    #[serde(flatten)]
    analysis: &'a WorkflowAnalysis,
}

#[derive(Serialize)]
struct JsonMetadata {
    tool: &'static str,
    version: &'static str,
    generated: DateTime<Utc>,
    rating: &'static str,
    summary: JsonSummary,
}

#[derive(Serialize)]
struct JsonSummary {
    total: usize,
    critical: usize,
    high: usize,
    medium: usize,
    low: usize,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum JsonDocument {
    One(WorkflowAnalysis),
    Many(Vec<WorkflowAnalysis>),
}

impl Formatter for JsonFormatter {
    fn format(&self, analyses: &[WorkflowAnalysis]) -> String {
        let generated = Utc::now();
        let reports: Vec<JsonReport> = analyses.iter().map(|a| self.report(a, generated)).collect();

        let rendered = match reports.as_slice() {
            [single] => serde_json::to_string_pretty(single),
            _ => serde_json::to_string_pretty(&reports),
        };
        rendered.unwrap_or_else(|e| format!("{{\"error\": \"{}\"}}", e))
    }
}
