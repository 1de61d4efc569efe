//! Structure and naming checks

use regex::Regex;
use std::sync::LazyLock;

use super::{RuleContext, WHOLE_WORKFLOW};
use crate::core::{Category, Issue, Severity};

/// camelCase or PascalCase
static NAMING_CONVENTION: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[a-z]+([A-Z][a-z0-9]+)*$|^[A-Z][a-z0-9]+([A-Z][a-z0-9]+)*$").unwrap()
});

/// Names this short (i, dt, row) are exempt from the convention
const MIN_CHECKED_NAME_LENGTH: usize = 4;

/// MAINT-001: nesting deeper than the configured limit
pub fn check_nesting_depth(ctx: &RuleContext) -> Vec<Issue> {
    let depth = ctx.doc.max_depth();
    if depth <= ctx.thresholds.max_nesting_depth {
        return Vec::new();
    }

    vec![Issue::new("MAINT-001", Severity::Medium, Category::Performance, "Excessive nesting")
        .with_description(format!(
            "Activities are nested {} levels deep (limit {}).",
            depth, ctx.thresholds.max_nesting_depth
        ))
        .at(WHOLE_WORKFLOW)
        .with_solution("Split deep branches into separate workflows and call them with Invoke Workflow File.")]
}

/// MAINT-002: variable names that are neither camelCase nor PascalCase
pub fn check_variable_naming(ctx: &RuleContext) -> Vec<Issue> {
    ctx.facts
        .variables
        .iter()
        .filter(|v| v.name.chars().count() >= MIN_CHECKED_NAME_LENGTH)
        .filter(|v| !NAMING_CONVENTION.is_match(&v.name))
        .map(|v| {
            Issue::new("MAINT-002", Severity::Low, Category::NamingConvention, "Naming convention")
                .with_description(format!("Variable '{}' does not follow the naming convention.", v.name))
                .at("Variable declarations")
                .with_solution("Use camelCase (customerName) or PascalCase (CustomerName).")
        })
        .collect()
}
