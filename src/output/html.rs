//! HTML output formatter for standalone reports
//!
//! Generates one self-contained page with inline styling, one section per workflow.

use super::{Formatter, REPORT_TITLE};
use crate::core::{HealthRating, Issue, Severity, WorkflowAnalysis};

/// HTML formatter
pub struct HtmlFormatter;

impl HtmlFormatter {
    pub fn new() -> Self {
        Self
    }

    fn format_workflow(&self, analysis: &WorkflowAnalysis) -> String {
        let rating = analysis.rating();
        let rating_class = match rating {
            HealthRating::Excellent => "excellent",
            HealthRating::Good => "good",
            HealthRating::NeedsImprovement => "poor",
        };

        let mut issues: Vec<&Issue> = analysis.issues.iter().collect();
        // Most severe first, rule order kept within a severity
        issues.sort_by(|a, b| b.severity.cmp(&a.severity));
        let rows: String = issues
            .iter()
            .map(|issue| format_row(issue))
            .collect::<Vec<_>>()
            .join("\n");

        let legend: String = Severity::descending()
            .iter()
            .map(|s| {
                format!(
                    r#"<span class="legend-item"><span class="dot {cls}"></span> {name}: {count}</span>"#,
                    cls = severity_class(*s),
                    name = s.as_str(),
                    count = analysis.count_by_severity(*s)
                )
            })
            .collect::<Vec<_>>()
            .join("\n            ");

        let recommendations = list_items(&analysis.recommendations);
        let variables = list_items(&analysis.variables);
        let urls = list_items(&analysis.urls.iter().cloned().collect::<Vec<_>>());
        let dependencies: String = analysis
            .dependencies
            .iter()
            .map(|(name, version)| {
                format!("<tr><td>{}</td><td>{}</td></tr>", html_escape(name), html_escape(version))
            })
            .collect::<Vec<_>>()
            .join("\n");

        format!(
            r#"<section class="workflow">
        <h2>{file}</h2>
        <div class="stats-grid">
            <div class="stat-card score {rating_class}">
                <span class="stat-value">{score:.1}</span>
                <span class="stat-label">Health Score ({rating})</span>
            </div>
            <div class="stat-card">
                <span class="stat-value">{activities}</span>
                <span class="stat-label">Activities</span>
            </div>
            <div class="stat-card">
                <span class="stat-value">{issue_count}</span>
                <span class="stat-label">Issues</span>
            </div>
        </div>
        <p><strong>Workflow:</strong> {name}</p>
        <p><strong>Purpose:</strong> {purpose}</p>
        <p class="summary-text">{summary}</p>
        <div class="severity-legend">
            {legend}
        </div>

        <h3>Issues</h3>
        <table>
            <thead>
                <tr>
                    <th>Severity</th>
                    <th>Rule</th>
                    <th>Category</th>
                    <th>Location</th>
                    <th>Problem</th>
                    <th>Solution</th>
                </tr>
            </thead>
            <tbody>
                {rows}
            </tbody>
        </table>

        <h3>Recommendations</h3>
        <ul>{recommendations}</ul>

        <h3>Variables</h3>
        <ul>{variables}</ul>

        <h3>Dependencies</h3>
        <table>
            <thead><tr><th>Package</th><th>Version</th></tr></thead>
            <tbody>{dependencies}</tbody>
        </table>

        <h3>URLs</h3>
        <ul>{urls}</ul>
    </section>"#,
            file = html_escape(&analysis.file.display().to_string()),
            rating_class = rating_class,
            score = analysis.health_score,
            rating = rating.as_str(),
            activities = analysis.activities.len(),
            issue_count = analysis.issues.len(),
            name = html_escape(&analysis.workflow_name),
            purpose = html_escape(&analysis.workflow_purpose),
            summary = html_escape(&analysis.prose_summary),
            legend = legend,
            rows = rows,
            recommendations = recommendations,
            variables = variables,
            dependencies = dependencies,
            urls = urls,
        )
    }
}

impl Default for HtmlFormatter {
    fn default() -> Self {
        Self::new()
    }
}

impl Formatter for HtmlFormatter {
    fn format(&self, analyses: &[WorkflowAnalysis]) -> String {
        let sections: String = analyses
            .iter()
            .map(|a| self.format_workflow(a))
            .collect::<Vec<_>>()
            .join("\n    ");

        format!(
            r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>{title}</title>
    <style>{css}</style>
</head>
<body>
    <header>
        <h1>{title}</h1>
        <p class="timestamp">Generated: {timestamp}</p>
    </header>

    {sections}

    <footer>
        <p>Generated by xaml-analyzer v{version}</p>
    </footer>
</body>
</html>"#,
            title = REPORT_TITLE,
            css = CSS,
            timestamp = chrono::Utc::now().format("%Y-%m-%d %H:%M:%S UTC"),
            sections = sections,
            version = env!("CARGO_PKG_VERSION"),
        )
    }
}

fn severity_class(severity: Severity) -> &'static str {
    match severity {
        Severity::Critical => "critical",
        Severity::High => "high",
        Severity::Medium => "medium",
        Severity::Low => "low",
    }
}

fn format_row(issue: &Issue) -> String {
    format!(
        r#"<tr class="severity-{sev}">
    <td><span class="badge {sev}">{sev_display}</span></td>
    <td>{rule}</td>
    <td>{category}</td>
    <td class="location">{location}</td>
    <td class="message"><strong>{title}</strong><br>{description}</td>
    <td>{solution}</td>
</tr>"#,
        sev = severity_class(issue.severity),
        sev_display = issue.severity.as_str(),
        rule = html_escape(&issue.rule_id),
        category = issue.category.as_str(),
        location = html_escape(&issue.location),
        title = html_escape(&issue.title),
        description = html_escape(&issue.description),
        solution = html_escape(&issue.solution),
    )
}

fn list_items(items: &[String]) -> String {
    items
        .iter()
        .map(|item| format!("<li>{}</li>", html_escape(item)))
        .collect()
}

fn html_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}

const CSS: &str = r#"
:root {
    --color-critical: #b71c1c;
    --color-high: #f44336;
    --color-medium: #ff9800;
    --color-low: #2196f3;
}

* {
    box-sizing: border-box;
    margin: 0;
    padding: 0;
}

body {
    font-family: -apple-system, BlinkMacSystemFont, 'Segoe UI', Roboto, Oxygen, Ubuntu, sans-serif;
    line-height: 1.6;
    color: #333;
    max-width: 1400px;
    margin: 0 auto;
    padding: 20px;
    background: #f5f5f5;
}

header {
    background: linear-gradient(135deg, #fa4616 0%, #c62828 100%);
    color: white;
    padding: 30px;
    border-radius: 8px;
    margin-bottom: 20px;
}

h2, h3 {
    margin: 16px 0 8px;
}

.workflow {
    background: white;
    padding: 20px;
    border-radius: 8px;
    margin-bottom: 20px;
    box-shadow: 0 1px 3px rgba(0, 0, 0, 0.12);
}

.stats-grid {
    display: grid;
    grid-template-columns: repeat(auto-fit, minmax(160px, 1fr));
    gap: 12px;
    margin-bottom: 12px;
}

.stat-card {
    background: #fafafa;
    border-radius: 6px;
    padding: 12px;
    text-align: center;
}

.stat-value {
    display: block;
    font-size: 2em;
    font-weight: bold;
}

.score.excellent .stat-value { color: #2e7d32; }
.score.good .stat-value { color: #f9a825; }
.score.poor .stat-value { color: #c62828; }

.severity-legend {
    margin: 8px 0;
}

.legend-item {
    margin-right: 16px;
}

.dot {
    display: inline-block;
    width: 10px;
    height: 10px;
    border-radius: 50%;
}

.dot.critical, .badge.critical { background: var(--color-critical); }
.dot.high, .badge.high { background: var(--color-high); }
.dot.medium, .badge.medium { background: var(--color-medium); }
.dot.low, .badge.low { background: var(--color-low); }

.badge {
    color: white;
    padding: 2px 8px;
    border-radius: 4px;
    font-size: 0.85em;
}

table {
    width: 100%;
    border-collapse: collapse;
    margin-bottom: 12px;
}

th, td {
    text-align: left;
    padding: 8px;
    border-bottom: 1px solid #eee;
    vertical-align: top;
}

ul {
    margin-left: 20px;
}

footer {
    text-align: center;
    color: #777;
    margin-top: 20px;
}
"#;
