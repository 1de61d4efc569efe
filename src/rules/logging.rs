//! Logging checks

use super::{RuleContext, WHOLE_WORKFLOW};
use crate::core::{ActivityKind, Category, Issue, NodeExt, Severity};

/// Levels that hide an error when used inside a Catch
const QUIET_LEVELS: &[&str] = &["Info", "Trace"];

/// LOG-001: no log messages, or fewer than the minimum
pub fn check_log_volume(ctx: &RuleContext) -> Vec<Issue> {
    if ctx.facts.activities.is_empty() {
        return Vec::new();
    }

    let count = ctx.doc.count_kind(ActivityKind::LogMessage);
    let minimum = ctx.thresholds.min_log_messages;

    let issue = if count == 0 {
        Issue::new("LOG-001", Severity::Critical, Category::Logging, "No logging")
            .with_description("The workflow contains no Log Message activity.")
            .with_solution(
                "Log the start and end of the process, every loop iteration, \
                 error paths and important decisions.",
            )
    } else if count < minimum {
        Issue::new("LOG-001", Severity::Medium, Category::Logging, "Insufficient logging")
            .with_description(format!("Only {} log message(s) in the whole workflow.", count))
            .with_solution("Add more log messages for debugging and production monitoring.")
    } else {
        return Vec::new();
    };

    vec![issue.at(WHOLE_WORKFLOW)]
}

/// LOG-002: errors logged at Info/Trace level inside a Catch
pub fn check_catch_log_level(ctx: &RuleContext) -> Vec<Issue> {
    let mut issues = Vec::new();

    for try_catch in ctx.doc.find_kind(ActivityKind::TryCatch) {
        let Some(catches) = try_catch.child_named("TryCatch.Catches") else {
            continue;
        };
        let try_catch_name = try_catch.display_name_or("Try Catch");

        let catch_blocks = catches
            .children()
            .filter(|c| c.is_element() && c.tag_name().name().ends_with("Catch"));

        for catch in catch_blocks {
            for log in ctx.doc.find_nested_within(catch, ActivityKind::LogMessage.tag_names()) {
                // An absent level defaults to Info
                let quiet = match log.attribute("Level") {
                    None => true,
                    Some(level) => QUIET_LEVELS.iter().any(|q| level.contains(q)),
                };
                if !quiet {
                    continue;
                }

                let log_name = log.display_name_or("Log Message");
                issues.push(
                    Issue::new("LOG-002", Severity::Medium, Category::Logging, "Miscategorized error log")
                        .with_description(format!(
                            "A Catch block of '{}' logs the error with '{}' at Info or Trace level, so real failures are easy to miss.",
                            try_catch_name, log_name
                        ))
                        .at(format!("TryCatch '{}' > Catch ({})", try_catch_name, ctx.locate(log)))
                        .with_solution(format!("Set the Level of '{}' to Warn or Error.", log_name)),
                );
            }
        }
    }

    issues
}
