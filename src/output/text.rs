//! Human-readable text output formatter

use colored::{ColoredString, Colorize};

use super::Formatter;
use crate::core::{HealthRating, Issue, Severity, WorkflowAnalysis};

/// Text formatter with optional color support
pub struct TextFormatter {
    colored: bool,
}

impl TextFormatter {
    pub fn new(colored: bool) -> Self {
        Self { colored }
    }

    fn paint_severity(&self, text: &str, severity: Severity) -> String {
        if !self.colored {
            return text.to_string();
        }
        let painted: ColoredString = match severity {
            Severity::Critical => text.magenta().bold(),
            Severity::High => text.red().bold(),
            Severity::Medium => text.yellow().bold(),
            Severity::Low => text.cyan(),
        };
        painted.to_string()
    }

    fn paint_rating(&self, text: &str, rating: HealthRating) -> String {
        if !self.colored {
            return text.to_string();
        }
        match rating {
            HealthRating::Excellent => text.green().bold().to_string(),
            HealthRating::Good => text.yellow().bold().to_string(),
            HealthRating::NeedsImprovement => text.red().bold().to_string(),
        }
    }

    fn bold(&self, text: &str) -> String {
        if self.colored {
            text.bold().to_string()
        } else {
            text.to_string()
        }
    }

    fn dim(&self, text: &str) -> String {
        if self.colored {
            text.dimmed().to_string()
        } else {
            text.to_string()
        }
    }

    fn format_issue(&self, issue: &Issue) -> String {
        let mut output = format!(
            "    {}[{}]: {}",
            self.paint_severity(&issue.severity.as_str().to_lowercase(), issue.severity),
            issue.rule_id,
            issue.title
        );
        if !issue.location.is_empty() {
            output.push_str(&format!(" {}", self.dim(&format!("({})", issue.location))));
        }
        if !issue.description.is_empty() {
            output.push_str(&format!("\n      {}", issue.description));
        }
        if !issue.solution.is_empty() {
            output.push_str(&format!("\n      {}", self.dim(&format!("fix: {}", issue.solution))));
        }
        output
    }

    fn format_analysis(&self, analysis: &WorkflowAnalysis) -> String {
        let mut output = String::new();
        let rating = analysis.rating();

        output.push_str(&format!("{}\n", self.bold(&analysis.file.display().to_string())));
        output.push_str(&format!("  Workflow: {}\n", analysis.workflow_name));
        output.push_str(&format!("  Purpose: {}\n", analysis.workflow_purpose));
        output.push_str(&format!(
            "  Health score: {}\n",
            self.paint_rating(
                &format!("{:.1}/100 ({})", analysis.health_score, rating.as_str()),
                rating
            )
        ));
        output.push_str(&format!(
            "  Activities: {}, variables: {}\n",
            analysis.activities.len(),
            analysis.variables.len()
        ));

        for severity in Severity::descending() {
            let issues: Vec<&Issue> = analysis.issues_with_severity(severity).collect();
            if issues.is_empty() {
                continue;
            }
            output.push('\n');
            output.push_str(&format!(
                "  {}\n",
                self.paint_severity(&format!("{} ({})", severity, issues.len()), severity)
            ));
            for issue in issues {
                output.push_str(&self.format_issue(issue));
                output.push('\n');
            }
        }

        if !analysis.recommendations.is_empty() {
            output.push_str(&format!("\n  {}\n", self.bold("Recommendations")));
            for rec in &analysis.recommendations {
                output.push_str(&format!("    - {}\n", rec));
            }
        }

        output
    }
}

impl Formatter for TextFormatter {
    fn format(&self, analyses: &[WorkflowAnalysis]) -> String {
        let mut output = String::new();
        let mut counts = [0usize; 4];

        for analysis in analyses {
            output.push_str(&self.format_analysis(analysis));
            output.push('\n');
            for (slot, severity) in Severity::descending().into_iter().enumerate() {
                counts[slot] += analysis.count_by_severity(severity);
            }
        }

        let parts: Vec<String> = Severity::descending()
            .into_iter()
            .zip(counts)
            .map(|(severity, n)| {
                self.paint_severity(&format!("{} {}", n, severity.as_str().to_lowercase()), severity)
            })
            .collect();
        output.push_str(&format!(
            "Found {} in {} workflow{}\n",
            parts.join(", "),
            analyses.len(),
            if analyses.len() == 1 { "" } else { "s" }
        ));

        // Verdict follows the weakest workflow
        if let Some(worst) = analyses
            .iter()
            .min_by(|a, b| a.health_score.total_cmp(&b.health_score))
        {
            let rating = worst.rating();
            output.push_str(&format!(
                "Verdict: {}\n",
                self.paint_rating(
                    &format!("{} (lowest score {:.1})", rating.as_str(), worst.health_score),
                    rating
                )
            ));
        }

        output
    }
}
