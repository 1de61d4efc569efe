//! Browser and UI automation checks

use super::RuleContext;
use crate::core::{ActivityKind, Category, Issue, NodeExt, Severity};

/// Click display names that usually trigger a page round-trip
const SLOW_CLICK_WORDS: &[&str] = &["calculate", "submit"];

/// WEB-001: application card nested in another one
pub fn check_nested_scopes(ctx: &RuleContext) -> Vec<Issue> {
    ctx.doc
        .find_kind(ActivityKind::NApplicationCard)
        .into_iter()
        .filter(|scope| {
            !ctx.doc
                .find_nested_within(*scope, ActivityKind::NApplicationCard.tag_names())
                .is_empty()
        })
        .map(|scope| {
            Issue::new("WEB-001", Severity::Medium, Category::BrowserOperations, "Nested browser scope")
                .with_description(format!(
                    "'{}' contains another application card.",
                    scope.display_name_or("Use Application/Browser")
                ))
                .at(ctx.locate(scope))
                .with_solution("Remove the inner scope. A single application card is enough.")
        })
        .collect()
}

/// WEB-002: type-into without clearing the field first
pub fn check_empty_field_mode(ctx: &RuleContext) -> Vec<Issue> {
    ctx.doc
        .find_kind(ActivityKind::NTypeInto)
        .into_iter()
        .filter(|node| node.attribute("EmptyFieldMode") != Some("SingleLine"))
        .map(|node| {
            Issue::new("WEB-002", Severity::Low, Category::BrowserOperations, "Missing field-clear mode")
                .with_description(format!(
                    "'{}' does not clear the field before typing.",
                    node.display_name_or("Type Into")
                ))
                .at(ctx.locate(node))
                .with_solution("Set EmptyFieldMode to 'SingleLine' so the field is cleared first.")
        })
        .collect()
}

/// WEB-003: submit-like click followed directly by something other than a Delay
pub fn check_post_click_delay(ctx: &RuleContext) -> Vec<Issue> {
    let root = ctx.doc.root();
    let mut issues = Vec::new();

    let clicks = root.descendants().filter(|n| n.is_element() && n.kind_of().is_click());
    for click in clicks {
        let name = click.display_name_or("");
        let lowered = name.to_lowercase();
        if !SLOW_CLICK_WORDS.iter().any(|w| lowered.contains(w)) {
            continue;
        }

        if ctx.doc.find_parent(root, click).is_none() {
            continue;
        }

        // Last child of its parent: nothing follows, nothing to wait for
        let Some(next) = click.next_sibling_element() else {
            continue;
        };
        if next.kind_of() == ActivityKind::Delay {
            continue;
        }

        issues.push(
            Issue::new("WEB-003", Severity::Medium, Category::BrowserOperations, "Missing post-click delay")
                .with_description(format!(
                    "'{}' is followed by '{}' without waiting for the page to respond.",
                    name,
                    next.display_name_or(next.tag_name().name())
                ))
                .at(ctx.locate(click))
                .with_solution("Add a 2-3 second Delay (or a wait-for-element) after the click."),
        );
    }

    issues
}
