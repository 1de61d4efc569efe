//! Selector robustness checks

use super::RuleContext;
use crate::core::{ActivityKind, Category, Issue, Severity};

/// SEL-001: long query string baked into a target's browser URL
pub fn check_url_query_length(ctx: &RuleContext) -> Vec<Issue> {
    let limit = ctx.thresholds.max_url_query_length;

    ctx.doc
        .find_kind(ActivityKind::TargetAnchorable)
        .into_iter()
        .filter_map(|target| {
            let url = target.attribute("BrowserURL")?;
            let query = url.split('?').nth(1)?;
            let length = query.chars().count();
            (length > limit).then(|| {
                Issue::new("SEL-001", Severity::Medium, Category::Selectors, "Long URL query in selector")
                    .with_description(format!(
                        "The target URL carries a {}-character query string. Dynamic parameters break the selector between runs.",
                        length
                    ))
                    .at(ctx.locate(target))
                    .with_solution("Match on the base URL only, or replace the parameters with a wildcard.")
            })
        })
        .collect()
}

/// SEL-002: strict selector with no fuzzy fallback
pub fn check_fuzzy_selector(ctx: &RuleContext) -> Vec<Issue> {
    ctx.doc
        .find_kind(ActivityKind::TargetAnchorable)
        .into_iter()
        .filter(|target| {
            let full = target.attribute("FullSelectorArgument").unwrap_or("");
            let fuzzy = target.attribute("FuzzySelectorArgument").unwrap_or("");
            !full.is_empty() && fuzzy.is_empty()
        })
        .map(|target| {
            Issue::new("SEL-002", Severity::Low, Category::Selectors, "Full selector without fuzzy")
                .with_description("Only a strict selector is defined for this target.")
                .at(ctx.locate(target))
                .with_solution("Add a fuzzy selector so the target survives small UI changes.")
        })
        .collect()
}
