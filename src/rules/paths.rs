//! Workbook path checks

use regex::Regex;
use roxmltree::Node;
use std::sync::LazyLock;

use super::RuleContext;
use crate::core::{Category, Issue, Severity};

/// Drive-letter path anywhere in the value
static DRIVE_PATH: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"[a-zA-Z]:\\").unwrap());

const PATH_ATTRIBUTE: &str = "WorkbookPath";

/// Common misspellings and their corrections
const MISSPELLINGS: &[(&str, &str)] = &[("Auxilliary", "Auxiliary")];

fn workbook_paths<'d, 'a>(ctx: &RuleContext<'d, 'a>) -> Vec<(Node<'d, 'a>, &'d str)> {
    ctx.doc
        .root()
        .descendants()
        .filter_map(|n| n.attribute(PATH_ATTRIBUTE).map(|p| (n, p)))
        .collect()
}

/// PATH-001: absolute drive or UNC path
pub fn check_hardcoded_paths(ctx: &RuleContext) -> Vec<Issue> {
    workbook_paths(ctx)
        .into_iter()
        .filter(|(_, path)| DRIVE_PATH.is_match(path) || path.starts_with(r"\\"))
        .map(|(node, path)| {
            Issue::new("PATH-001", Severity::Medium, Category::FilePaths, "Hardcoded file path")
                .with_description(format!("The workbook path '{}' only exists on one machine.", path))
                .at(ctx.locate(node))
                .with_solution(
                    "Build the path from a config value or with Path.Combine(Environment.CurrentDirectory, ...).",
                )
        })
        .collect()
}

/// PATH-002: known misspelled folder names
pub fn check_known_misspellings(ctx: &RuleContext) -> Vec<Issue> {
    let mut issues = Vec::new();

    for (node, path) in workbook_paths(ctx) {
        for (wrong, right) in MISSPELLINGS {
            if path.contains(wrong) {
                issues.push(
                    Issue::new("PATH-002", Severity::Low, Category::FilePaths, "Misspelled path")
                        .with_description(format!("'{}' in '{}' should be '{}'.", wrong, path, right))
                        .at(ctx.locate(node))
                        .with_solution("Rename the folder and update the path."),
                );
            }
        }
    }

    issues
}
