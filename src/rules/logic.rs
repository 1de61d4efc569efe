//! Logic flaws: empty branches and unused variables

use regex::Regex;

use super::RuleContext;
use crate::core::{ActivityKind, Category, Issue, NodeExt, Severity};

/// LOGIC-001: Try section missing or without activities
pub fn check_empty_try(ctx: &RuleContext) -> Vec<Issue> {
    ctx.doc
        .find_kind(ActivityKind::TryCatch)
        .into_iter()
        .filter(|tc| {
            tc.child_named("TryCatch.Try")
                .map_or(true, |section| section.element_count() == 0)
        })
        .map(|tc| {
            let name = tc.display_name_or("Try Catch");
            Issue::new("LOGIC-001", Severity::Medium, Category::LogicError, "Empty Try block")
                .with_description(format!("The Try section of '{}' is empty, so nothing is protected.", name))
                .at(ctx.locate(tc))
                .with_solution("Move the activities to protect into the Try section, or remove the Try Catch.")
        })
        .collect()
}

/// LOGIC-002: Catch handlers that swallow the exception
pub fn check_empty_catch(ctx: &RuleContext) -> Vec<Issue> {
    let mut issues = Vec::new();

    for tc in ctx.doc.find_kind(ActivityKind::TryCatch) {
        let Some(catches) = tc.child_named("TryCatch.Catches") else {
            continue;
        };
        let name = tc.display_name_or("Try Catch");

        for catch in catches.children().filter(|c| c.is_element()) {
            let hollow = catch
                .child_named("ActivityAction")
                .map_or(true, |action| action.is_hollow());
            if !hollow {
                continue;
            }
            issues.push(
                Issue::new("LOGIC-002", Severity::High, Category::LogicError, "Empty Catch block")
                    .with_description(format!(
                        "A Catch block of '{}' is empty. Silently swallowed errors make failures impossible to trace.",
                        name
                    ))
                    .at(ctx.locate(catch))
                    .with_solution("Handle the error, or at least log it with a Log Message at Error level."),
            );
        }
    }

    issues
}

/// LOGIC-003: If without anything to do when the condition holds
pub fn check_empty_then(ctx: &RuleContext) -> Vec<Issue> {
    ctx.doc
        .find_kind(ActivityKind::If)
        .into_iter()
        .filter(|node| node.child_named("If.Then").map_or(true, |then| then.is_hollow()))
        .map(|node| {
            let name = node.display_name_or("If");
            Issue::new("LOGIC-003", Severity::Low, Category::LogicError, "Empty Then block")
                .with_description(format!("The Then branch of '{}' is empty, which suggests unfinished logic.", name))
                .at(ctx.locate(node))
                .with_solution("Add the activities for the true branch, or rethink the condition.")
        })
        .collect()
}

/// LOGIC-004: an Else branch declared but left empty
pub fn check_empty_else(ctx: &RuleContext) -> Vec<Issue> {
    ctx.doc
        .find_kind(ActivityKind::If)
        .into_iter()
        .filter(|node| node.child_named("If.Else").is_some_and(|e| e.element_count() == 0))
        .map(|node| {
            let name = node.display_name_or("If");
            Issue::new("LOGIC-004", Severity::Low, Category::LogicError, "Empty Else block")
                .with_description(format!("The Else branch of '{}' is empty.", name))
                .at(ctx.locate(node))
                .with_solution("Remove the Else branch if no logic is needed there.")
        })
        .collect()
}

/// LOGIC-005: declared variables the workflow never mentions again.
///
/// This is a plain word-boundary count over the raw source. A declaration
/// accounts for one occurrence, so anything at or below one is unused.
/// Mentions in comments or unrelated strings count as uses.
pub fn check_unused_variables(ctx: &RuleContext) -> Vec<Issue> {
    let source = ctx.doc.source();
    let mut issues = Vec::new();

    for variable in &ctx.facts.variables {
        let pattern = format!(r"\b{}\b", regex::escape(&variable.name));
        let Ok(re) = Regex::new(&pattern) else {
            continue;
        };
        if re.find_iter(source).count() > 1 {
            continue;
        }
        issues.push(
            Issue::new("LOGIC-005", Severity::Low, Category::CodeSmell, "Unused variable")
                .with_description(format!(
                    "Variable '{}' ({}) is declared but never used.",
                    variable.name, variable.declared_type
                ))
                .at("Variable declarations")
                .with_solution("Remove the variable to keep the workflow clean."),
        );
    }

    issues
}
