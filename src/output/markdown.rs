//! Markdown report formatter

use chrono::Utc;
use std::collections::BTreeMap;

use super::{Formatter, REPORT_TITLE};
use crate::core::{Activity, Severity, WorkflowAnalysis};

/// Markdown formatter
pub struct MarkdownFormatter;

impl MarkdownFormatter {
    pub fn new() -> Self {
        Self
    }

    fn format_analysis(&self, analysis: &WorkflowAnalysis, out: &mut String) {
        out.push_str(&format!("## {}\n\n", analysis.file.display()));

        out.push_str("| | |\n|---|---|\n");
        out.push_str(&format!("| Workflow | {} |\n", escape_cell(&analysis.workflow_name)));
        out.push_str(&format!(
            "| Health score | {:.1}/100 ({}) |\n",
            analysis.health_score,
            analysis.rating().as_str()
        ));
        out.push_str(&format!("| Activities | {} |\n", analysis.activities.len()));
        out.push_str(&format!("| Variables | {} |\n", analysis.variables.len()));
        out.push_str(&format!("| Issues | {} |\n", analysis.issues.len()));
        out.push_str(&format!("| Recommendations | {} |\n\n", analysis.recommendations.len()));

        out.push_str("### Purpose\n\n");
        out.push_str(&format!("**{}**\n\n", analysis.workflow_purpose));
        out.push_str(&format!("{}\n\n", analysis.prose_summary));

        if !analysis.activities.is_empty() {
            out.push_str("### Activities\n\n");
            for (activity_type, group) in group_by_type(&analysis.activities) {
                out.push_str(&format!("- **{}** ({})\n", activity_type, group.len()));
                for activity in group {
                    out.push_str(&format!("  - {}: {}\n", activity.name, activity.purpose));
                }
            }
            out.push('\n');
        }

        if !analysis.variables.is_empty() {
            out.push_str("### Variables\n\n");
            for variable in &analysis.variables {
                out.push_str(&format!("- `{}`\n", variable));
            }
            out.push('\n');
        }

        if !analysis.issues.is_empty() {
            out.push_str("### Issues\n\n");
            for severity in Severity::descending() {
                let issues: Vec<_> = analysis.issues_with_severity(severity).collect();
                if issues.is_empty() {
                    continue;
                }
                out.push_str(&format!("#### {} ({})\n\n", severity, issues.len()));
                for issue in issues {
                    out.push_str(&format!("- **{}** `{}`\n", issue.title, issue.rule_id));
                    out.push_str(&format!("  - Category: {}\n", issue.category));
                    out.push_str(&format!("  - Location: {}\n", issue.location));
                    out.push_str(&format!("  - Problem: {}\n", issue.description));
                    out.push_str(&format!("  - Solution: {}\n", issue.solution));
                }
                out.push('\n');
            }
        }

        if !analysis.recommendations.is_empty() {
            out.push_str("### Recommendations\n\n");
            for (i, rec) in analysis.recommendations.iter().enumerate() {
                out.push_str(&format!("{}. {}\n", i + 1, rec));
            }
            out.push('\n');
        }

        if !analysis.dependencies.is_empty() {
            out.push_str("### Dependencies\n\n| Package | Version |\n|---|---|\n");
            for (name, version) in &analysis.dependencies {
                out.push_str(&format!("| {} | {} |\n", escape_cell(name), escape_cell(version)));
            }
            out.push('\n');
        }

        if !analysis.urls.is_empty() || !analysis.database_connections.is_empty() {
            out.push_str("### External Resources\n\n");
            for url in &analysis.urls {
                out.push_str(&format!("- <{}>\n", url));
            }
            for connection in &analysis.database_connections {
                out.push_str(&format!("- Database: `{}`\n", connection));
            }
            out.push('\n');
        }
    }
}

impl Default for MarkdownFormatter {
    fn default() -> Self {
        Self::new()
    }
}

impl Formatter for MarkdownFormatter {
    fn format(&self, analyses: &[WorkflowAnalysis]) -> String {
        let mut out = format!("# {}\n\n", REPORT_TITLE);
        out.push_str(&format!(
            "_Generated {}_\n\n",
            Utc::now().format("%Y-%m-%d %H:%M:%S UTC")
        ));

        for analysis in analyses {
            self.format_analysis(analysis, &mut out);
        }

        out
    }
}

/// Activities grouped by type, types sorted, document order kept within a group
fn group_by_type(activities: &[Activity]) -> BTreeMap<&str, Vec<&Activity>> {
    let mut groups: BTreeMap<&str, Vec<&Activity>> = BTreeMap::new();
    for activity in activities {
        groups.entry(activity.activity_type.as_str()).or_default().push(activity);
    }
    groups
}

fn escape_cell(text: &str) -> String {
    text.replace('|', "\\|")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::output::fixtures::sample_analysis;

    #[test]
    fn test_format_sections() {
        let output = MarkdownFormatter::new().format(&[sample_analysis()]);
        assert!(output.starts_with("# UiPath Workflow Analysis Report\n"));
        assert!(output.contains("## Flows/Main.xaml"));
        assert!(output.contains("| Health score | 90.0/100 (Excellent) |"));
        assert!(output.contains("**Web Automation**"));
        assert!(output.contains("- **NClick** (1)"));
        assert!(output.contains("- `customerName (x:String)`"));
        assert!(output.contains("#### Critical (1)"));
        assert!(output.contains("1. Add logging for process tracking."));
        assert!(output.contains("| UiPath.UIAutomation.Activities | [23.10.3] |"));
        assert!(output.contains("- <https://portal.example.com>"));
    }

    #[test]
    fn test_issue_severity_order() {
        let output = MarkdownFormatter::new().format(&[sample_analysis()]);
        assert!(output.find("#### Critical").unwrap() < output.find("#### Medium").unwrap());
    }

    #[test]
    fn test_group_by_type() {
        let analysis = sample_analysis();
        let groups = group_by_type(&analysis.activities);
        assert_eq!(groups.keys().copied().collect::<Vec<_>>(), vec!["NClick", "Sequence"]);
    }

    #[test]
    fn test_format_empty_batch() {
        let output = MarkdownFormatter::new().format(&[]);
        assert!(output.starts_with("# UiPath Workflow Analysis Report\n\n_Generated "));
        assert!(!output.contains("## "));
    }

    #[test]
    fn test_escape_cell() {
        assert_eq!(escape_cell("a|b"), "a\\|b");
    }
}
