//! Detection rules
//!
//! Every rule is a plain function over a [`RuleContext`]. Rules never see each
//! other's output; the engine runs them in table order and concatenates the
//! issues, so issue order is rule order.

mod browser;
mod error_handling;
mod excel;
mod logging;
mod logic;
mod loops;
mod maintainability;
mod paths;
mod selectors;
mod timing;

use roxmltree::Node;

use crate::config::{Config, Thresholds};
use crate::core::{ExtractedFacts, Issue, WorkflowDocument};

/// Location used by whole-workflow checks
pub const WHOLE_WORKFLOW: &str = "Entire workflow";

/// Everything a rule may inspect
pub struct RuleContext<'d, 'a> {
    pub doc: &'d WorkflowDocument<'a>,
    pub facts: &'d ExtractedFacts,
    pub thresholds: &'d Thresholds,
}

impl<'d, 'a> RuleContext<'d, 'a> {
    pub fn new(
        doc: &'d WorkflowDocument<'a>,
        facts: &'d ExtractedFacts,
        thresholds: &'d Thresholds,
    ) -> Self {
        Self {
            doc,
            facts,
            thresholds,
        }
    }

    /// Human-readable location of an element: tag, display name and line
    pub fn locate(&self, node: Node) -> String {
        let (line, _) = self.doc.node_position(&node);
        let tag = node.tag_name().name();
        match node.attribute("DisplayName") {
            Some(name) => format!("{} '{}' (line {})", tag, name, line),
            None => format!("{} (line {})", tag, line),
        }
    }
}

/// Signature shared by every rule
pub type CheckFn = fn(&RuleContext<'_, '_>) -> Vec<Issue>;

/// A registered rule
pub struct Rule {
    pub id: &'static str,
    pub name: &'static str,
    pub check: CheckFn,
}

/// All rules in execution order: error handling, domain rules, then hygiene
pub static RULES: &[Rule] = &[
    Rule { id: "ERR-001", name: "Missing error handling", check: error_handling::check_missing_error_handling },
    Rule { id: "ERR-002", name: "Sparse error handling", check: error_handling::check_sparse_error_handling },
    Rule { id: "XL-001", name: "Scope-in-loop hazard", check: excel::check_scope_in_loop },
    Rule { id: "XL-002", name: "Risky auto-increment", check: excel::check_auto_increment },
    Rule { id: "WEB-001", name: "Nested browser scope", check: browser::check_nested_scopes },
    Rule { id: "WEB-002", name: "Missing field-clear mode", check: browser::check_empty_field_mode },
    Rule { id: "WEB-003", name: "Missing post-click delay", check: browser::check_post_click_delay },
    Rule { id: "LOOP-001", name: "Loop without try-catch", check: loops::check_loop_try_catch },
    Rule { id: "LOOP-002", name: "Loop under-logged", check: loops::check_loop_logging },
    Rule { id: "SEL-001", name: "Long URL query", check: selectors::check_url_query_length },
    Rule { id: "SEL-002", name: "Full selector without fuzzy", check: selectors::check_fuzzy_selector },
    Rule { id: "TIME-001", name: "No delays", check: timing::check_no_delays },
    Rule { id: "LOG-001", name: "No or low logging", check: logging::check_log_volume },
    Rule { id: "PATH-001", name: "Hardcoded file path", check: paths::check_hardcoded_paths },
    Rule { id: "PATH-002", name: "Known misspelling", check: paths::check_known_misspellings },
    Rule { id: "MAINT-001", name: "Excessive nesting", check: maintainability::check_nesting_depth },
    Rule { id: "MAINT-002", name: "Naming convention", check: maintainability::check_variable_naming },
    Rule { id: "LOG-002", name: "Miscategorized error log", check: logging::check_catch_log_level },
    Rule { id: "LOGIC-001", name: "Empty Try", check: logic::check_empty_try },
    Rule { id: "LOGIC-002", name: "Empty Catch", check: logic::check_empty_catch },
    Rule { id: "LOGIC-003", name: "Empty Then", check: logic::check_empty_then },
    Rule { id: "LOGIC-004", name: "Empty Else", check: logic::check_empty_else },
    Rule { id: "LOGIC-005", name: "Unused variable", check: logic::check_unused_variables },
];

/// Run every enabled rule in table order
pub fn run_rules(ctx: &RuleContext<'_, '_>, config: &Config) -> Vec<Issue> {
    let mut issues = Vec::new();

    for rule in RULES {
        if !config.is_rule_enabled(rule.id) {
            log::debug!("Skipping disabled rule {}", rule.id);
            continue;
        }

        let found = (rule.check)(ctx);
        log::debug!("{} ({}): {} issue(s)", rule.id, rule.name, found.len());
        issues.extend(found);
    }

    issues
}

#[cfg(test)]
pub(crate) mod test_support {
    use super::*;
    use std::path::Path;

    /// Parse a fixture and run one check against default thresholds
    pub fn run_check(source: &str, check: CheckFn) -> Vec<Issue> {
        let doc = WorkflowDocument::parse(source, Path::new("Test.xaml")).unwrap();
        let facts = ExtractedFacts::from_document(&doc);
        let thresholds = Thresholds::default();
        let ctx = RuleContext::new(&doc, &facts, &thresholds);
        check(&ctx)
    }

    /// Rule ids of a list of issues
    pub fn ids(issues: &[Issue]) -> Vec<&str> {
        issues.iter().map(|i| i.rule_id.as_str()).collect()
    }
}
