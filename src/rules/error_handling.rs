//! Workflow-level exception handling coverage

use super::{RuleContext, WHOLE_WORKFLOW};
use crate::core::{ActivityKind, Category, Issue, Severity};

fn container_count(ctx: &RuleContext) -> usize {
    ctx.facts
        .activities
        .iter()
        .filter(|a| ActivityKind::from_tag(&a.activity_type).is_container())
        .count()
}

/// ERR-001: no TryCatch anywhere
pub fn check_missing_error_handling(ctx: &RuleContext) -> Vec<Issue> {
    if ctx.doc.count_kind(ActivityKind::TryCatch) > 0 {
        return Vec::new();
    }

    let containers = container_count(ctx);
    let activities = ctx.facts.activities.len();
    let limit = ctx.thresholds.max_activities_without_try_catch;

    let severity = if containers > 0 {
        Severity::Critical
    } else if activities > limit {
        Severity::High
    } else {
        return Vec::new();
    };

    vec![Issue::new("ERR-001", severity, Category::ErrorHandling, "Missing error handling")
        .with_description(format!(
            "The workflow contains no Try Catch activity ({} activities, {} sequences/flowcharts). \
             Any unexpected exception stops the whole process.",
            activities, containers
        ))
        .at(WHOLE_WORKFLOW)
        .with_solution(
            "Wrap the main steps and anything that can fail (UI interaction, Excel, API calls) \
             in Try Catch blocks, and protect loop bodies individually.",
        )]
}

/// ERR-002: some TryCatch, but fewer than one per two containers
pub fn check_sparse_error_handling(ctx: &RuleContext) -> Vec<Issue> {
    let try_catches = ctx.doc.count_kind(ActivityKind::TryCatch);
    let containers = container_count(ctx);

    if try_catches == 0 || (try_catches as f64) >= containers as f64 / 2.0 {
        return Vec::new();
    }

    vec![Issue::new("ERR-002", Severity::Medium, Category::ErrorHandling, "Sparse error handling")
        .with_description(format!(
            "Only {} Try Catch block(s) for {} sequences/flowcharts.",
            try_catches, containers
        ))
        .at(WHOLE_WORKFLOW)
        .with_solution("Add error handling around the critical operations.")]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rules::test_support::{ids, run_check};

    #[test]
    fn test_missing_with_containers_is_critical() {
        let issues = run_check(
            "<Activity><Sequence><Assign /></Sequence></Activity>",
            check_missing_error_handling,
        );
        assert_eq!(ids(&issues), vec!["ERR-001"]);
        assert_eq!(issues[0].severity, Severity::Critical);
        assert_eq!(issues[0].location, WHOLE_WORKFLOW);
    }

    #[test]
    fn test_missing_without_containers_many_activities_is_high() {
        let issues = run_check(
            "<Activity><A /><B /><C /><D /><E /><F /></Activity>",
            check_missing_error_handling,
        );
        assert_eq!(ids(&issues), vec!["ERR-001"]);
        assert_eq!(issues[0].severity, Severity::High);
    }

    #[test]
    fn test_few_activities_without_containers() {
        let issues = run_check(
            "<Activity><A /><B /><C /></Activity>",
            check_missing_error_handling,
        );
        assert!(issues.is_empty());
    }

    #[test]
    fn test_present_try_catch() {
        let issues = run_check(
            "<Activity><Sequence><TryCatch /></Sequence></Activity>",
            check_missing_error_handling,
        );
        assert!(issues.is_empty());
    }

    #[test]
    fn test_sparse() {
        // 1 TryCatch for 4 containers
        let source = "<Activity><Sequence><Sequence /><Sequence /><Flowchart /><TryCatch /></Sequence></Activity>";
        let issues = run_check(source, check_sparse_error_handling);
        assert_eq!(ids(&issues), vec!["ERR-002"]);
        assert_eq!(issues[0].severity, Severity::Medium);
    }

    #[test]
    fn test_sparse_at_half_is_fine() {
        let source = "<Activity><Sequence><Sequence /><TryCatch /></Sequence></Activity>";
        assert!(run_check(source, check_sparse_error_handling).is_empty());
    }

    #[test]
    fn test_sparse_not_reported_without_try_catch() {
        let source = "<Activity><Sequence><Sequence /><Sequence /></Sequence></Activity>";
        assert!(run_check(source, check_sparse_error_handling).is_empty());
    }
}
