//! Row loop checks

use super::RuleContext;
use crate::core::{ActivityKind, Category, Issue, NodeExt, Severity};

/// LOOP-001: a failing row aborts the whole loop
pub fn check_loop_try_catch(ctx: &RuleContext) -> Vec<Issue> {
    ctx.doc
        .find_kind(ActivityKind::ForEachRow)
        .into_iter()
        .filter(|l| ctx.doc.find_nested_within(*l, ActivityKind::TryCatch.tag_names()).is_empty())
        .map(|l| {
            Issue::new("LOOP-001", Severity::Critical, Category::ErrorHandling, "Loop without try-catch")
                .with_description(format!(
                    "'{}' has no Try Catch inside, so one bad row stops every remaining row.",
                    l.display_name_or("For Each Row")
                ))
                .at(ctx.locate(l))
                .with_solution("Wrap the loop body in a Try Catch so a failure only skips the current row.")
        })
        .collect()
}

/// LOOP-002: fewer log messages inside a loop than the configured minimum
pub fn check_loop_logging(ctx: &RuleContext) -> Vec<Issue> {
    let minimum = ctx.thresholds.min_loop_log_messages;
    let mut issues = Vec::new();

    for l in ctx.doc.find_kind(ActivityKind::ForEachRow) {
        let logs = ctx.doc.find_nested_within(l, ActivityKind::LogMessage.tag_names()).len();
        if logs >= minimum {
            continue;
        }
        issues.push(
            Issue::new("LOOP-002", Severity::Medium, Category::Logging, "Loop under-logged")
                .with_description(format!(
                    "'{}' contains {} log message(s); at least {} are expected.",
                    l.display_name_or("For Each Row"),
                    logs,
                    minimum
                ))
                .at(ctx.locate(l))
                .with_solution("Log at the start and end of every iteration."),
        );
    }

    issues
}
