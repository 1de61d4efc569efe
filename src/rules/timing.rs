//! Timing checks

use super::{RuleContext, WHOLE_WORKFLOW};
use crate::core::{ActivityKind, Category, Issue, Severity};

/// TIME-001: the workflow never waits
pub fn check_no_delays(ctx: &RuleContext) -> Vec<Issue> {
    if ctx.facts.activities.is_empty() || ctx.doc.count_kind(ActivityKind::Delay) > 0 {
        return Vec::new();
    }

    vec![Issue::new("TIME-001", Severity::Medium, Category::Timing, "No delays")
        .with_description("The workflow contains no Delay activity.")
        .at(WHOLE_WORKFLOW)
        .with_solution("Add delays where pages load or forms are submitted.")]
}
