//! Excel activity checks

use super::RuleContext;
use crate::core::{ActivityKind, Category, Issue, NodeExt, Severity};

/// XL-001: workbook scope opened inside a row loop, one issue per loop
pub fn check_scope_in_loop(ctx: &RuleContext) -> Vec<Issue> {
    ctx.doc
        .find_kind(ActivityKind::ForEachRow)
        .into_iter()
        .filter_map(|loop_node| {
            let scopes = ctx.doc.find_nested_matching(loop_node, |k| k.is_excel_scope());
            let first = scopes.first()?;
            Some(
                Issue::new("XL-001", Severity::Critical, Category::Performance, "Excel scope inside loop")
                    .with_description(format!(
                        "'{}' is opened inside the row loop '{}', so the workbook is opened and closed on every iteration.",
                        first.display_name_or(first.tag_name().name()),
                        loop_node.display_name_or("For Each Row"),
                    ))
                    .at(ctx.locate(loop_node))
                    .with_solution(
                        "Open the workbook once outside the loop and keep only the write operations inside it.",
                    ),
            )
        })
        .collect()
}

/// XL-002: write-cell activities that auto-increment the row
pub fn check_auto_increment(ctx: &RuleContext) -> Vec<Issue> {
    ctx.doc
        .find_kind(ActivityKind::WriteCell)
        .into_iter()
        .filter(|node| node.attribute("AutoIncrementRow") == Some("True"))
        .map(|node| {
            Issue::new("XL-002", Severity::Medium, Category::ExcelOperations, "Risky auto-increment")
                .with_description(format!(
                    "'{}' uses AutoIncrementRow, which makes the written row depend on previous runs.",
                    node.display_name_or("Write Cell")
                ))
                .at(ctx.locate(node))
                .with_solution("Write to an explicit row index instead of relying on AutoIncrementRow.")
        })
        .collect()
}
