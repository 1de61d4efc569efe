//! Workflow-level conclusions: purpose, summary, score and recommendations

use std::collections::HashSet;

use crate::config::Thresholds;
use crate::core::{Activity, ActivityKind, Issue, Severity};

/// Purpose label when no specific indicator is present
pub const GENERAL_PURPOSE: &str = "General Workflow";

/// Closing sentence of every prose summary
pub const SUMMARY_DISCLAIMER: &str = "This summary is an automatic inference based on activity types \
     and may not fully reflect the workflow's logic.";

/// Score deducted per High issue
const HIGH_PENALTY: f64 = 15.0;
/// Score deducted per Medium issue
const MEDIUM_PENALTY: f64 = 10.0;

/// Which broad kinds of work a workflow does
struct Indicators<'a> {
    kinds: HashSet<ActivityKind<'a>>,
}

impl<'a> Indicators<'a> {
    fn new(activities: &'a [Activity]) -> Self {
        let kinds = activities
            .iter()
            .map(|a| ActivityKind::from_tag(&a.activity_type))
            .collect();
        Self { kinds }
    }

    fn any(&self, predicate: impl Fn(&ActivityKind) -> bool) -> bool {
        self.kinds.iter().any(predicate)
    }

    fn has(&self, kind: ActivityKind<'a>) -> bool {
        self.kinds.contains(&kind)
    }

    fn web(&self) -> bool {
        self.any(|k| k.is_web_automation())
    }

    fn spreadsheet(&self) -> bool {
        self.any(|k| k.is_spreadsheet())
    }

    fn bulk(&self) -> bool {
        self.has(ActivityKind::ForEachRow)
    }
}

/// Short purpose label, e.g. "Web Automation, Bulk Processing"
pub fn purpose(activities: &[Activity]) -> String {
    let indicators = Indicators::new(activities);
    let mut labels = Vec::new();

    if indicators.web() {
        labels.push("Web Automation");
    }
    if indicators.spreadsheet() {
        labels.push("Spreadsheet Processing");
    }
    if indicators.bulk() {
        labels.push("Bulk Processing");
    }

    if labels.is_empty() {
        GENERAL_PURPOSE.to_string()
    } else {
        labels.join(", ")
    }
}

/// Plain-English paragraph describing what the workflow appears to do
pub fn prose_summary(activities: &[Activity]) -> String {
    if activities.is_empty() {
        return format!(
            "Not enough activities were found to summarize the workflow. {}",
            SUMMARY_DISCLAIMER
        );
    }

    let ind = Indicators::new(activities);
    let mut parts: Vec<String> = Vec::new();

    let opening = match (ind.web(), ind.spreadsheet()) {
        (true, true) => {
            "This workflow looks like a mixed automation that moves data between an Excel file \
             and a web application."
        }
        (true, false) => {
            "This workflow is a UI automation that interacts with a website or desktop application."
        }
        (false, true) => "This workflow reads, writes or edits data in an Excel file.",
        (false, false) => "This is a general workflow that runs its steps in a defined order.",
    };
    parts.push(opening.to_string());

    if ind.has(ActivityKind::OpenBrowser) || ind.has(ActivityKind::UseApplicationBrowser) {
        parts.push("The process starts by opening a web browser or attaching to an existing one.".to_string());
    } else if ind.any(|k| k.is_excel_scope()) || ind.has(ActivityKind::UseExcelFile) {
        parts.push("The process starts by opening an Excel file.".to_string());
    }

    if ind.bulk() {
        parts.push("It then repeats a series of actions for every row of a data table.".to_string());
    }

    // Fixed order keeps the summary deterministic
    let action_checks: [(bool, &str); 5] = [
        (ind.any(|k| k.is_click()), "clicking buttons"),
        (
            ind.has(ActivityKind::TypeInto) || ind.has(ActivityKind::NTypeInto),
            "entering data into form fields",
        ),
        (
            ind.has(ActivityKind::GetText) || ind.has(ActivityKind::NGetText),
            "reading text from the screen",
        ),
        (ind.has(ActivityKind::ReadRange), "reading ranges from Excel"),
        (ind.has(ActivityKind::WriteCell), "writing single cells to Excel"),
    ];
    let actions: Vec<&str> = action_checks
        .iter()
        .filter(|(present, _)| *present)
        .map(|(_, label)| *label)
        .collect();
    if !actions.is_empty() {
        parts.push(format!("Key operations include {}.", actions.join(", ")));
    }

    if ind.has(ActivityKind::TryCatch) {
        parts.push(
            "It uses Try Catch blocks to handle errors, which makes it more resilient to runtime failures."
                .to_string(),
        );
    }

    parts.push(SUMMARY_DISCLAIMER.to_string());
    parts.join(" ")
}

/// 100 minus 15 per High and 10 per Medium issue, never below 0.
///
/// Critical and Low issues do not affect the score.
pub fn health_score(issues: &[Issue]) -> f64 {
    let penalty: f64 = issues
        .iter()
        .map(|issue| match issue.severity {
            Severity::High => HIGH_PENALTY,
            Severity::Medium => MEDIUM_PENALTY,
            Severity::Critical | Severity::Low => 0.0,
        })
        .sum();
    (100.0 - penalty).max(0.0)
}

/// Improvement suggestions derived from activity facts alone
pub fn recommendations(activities: &[Activity], thresholds: &Thresholds) -> Vec<String> {
    let mut recs = Vec::new();
    let count = |kind: ActivityKind| {
        activities
            .iter()
            .filter(|a| ActivityKind::from_tag(&a.activity_type) == kind)
            .count()
    };

    if count(ActivityKind::TryCatch) == 0 && activities.len() > thresholds.max_activities_without_try_catch {
        recs.push(
            "Add global error handling: wrap the main steps in a Try Catch so crashes and missing \
             selectors do not stop the process. Log the error in the Catch and end the run in a \
             controlled way or start an alternative path."
                .to_string(),
        );
    }

    let logs = count(ActivityKind::LogMessage);
    if logs == 0 {
        recs.push(
            "Add logging for process tracking: log the start and end of the workflow at Info level \
             and log after important steps such as processing a file or calling an API."
                .to_string(),
        );
    } else if logs < thresholds.min_log_messages {
        recs.push(
            "Log in more detail: log exception details (Exception.Message, Exception.Source) at \
             Error level inside Catch blocks, and log key parameters and decision points."
                .to_string(),
        );
    }

    let ui_activities: Vec<&Activity> = activities
        .iter()
        .filter(|a| ActivityKind::from_tag(&a.activity_type).is_ui_interaction())
        .collect();
    if !ui_activities.is_empty() {
        let missing: Vec<String> = ui_activities
            .iter()
            .filter(|a| a.attribute("TimeoutMS").is_none() && a.attribute("Timeout").is_none())
            .map(|a| format!("'{}'", a.name))
            .collect();

        if missing.is_empty() {
            recs.push(
                "Review timeout settings: every UI activity has a timeout, but check that the values \
                 match the application's real response times. Too short causes instability, too \
                 long slows the process down."
                    .to_string(),
            );
        } else {
            recs.push(format!(
                "Set explicit timeouts: UI activities such as {} have no timeout. Give them a \
                 reasonable TimeoutMS (for example 10000 for 10 seconds) so the robot neither \
                 waits too long nor fails too early.",
                missing.join(", ")
            ));
        }
    }

    if recs.is_empty() {
        recs.push("No general recommendations. The workflow looks good!".to_string());
    }

    recs
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Category;
    use std::collections::BTreeMap;

    fn activity(activity_type: &str) -> Activity {
        Activity {
            name: activity_type.to_string(),
            activity_type: activity_type.to_string(),
            purpose: String::new(),
            attributes: BTreeMap::new(),
        }
    }

    fn activities(types: &[&str]) -> Vec<Activity> {
        types.iter().map(|t| activity(t)).collect()
    }

    fn issue(severity: Severity) -> Issue {
        Issue::new("TEST-001", severity, Category::LogicError, "test")
    }

    #[test]
    fn test_purpose_labels() {
        assert_eq!(purpose(&[]), GENERAL_PURPOSE);
        assert_eq!(purpose(&activities(&["Sequence", "Assign"])), GENERAL_PURPOSE);
        assert_eq!(purpose(&activities(&["NClick"])), "Web Automation");
        assert_eq!(
            purpose(&activities(&["ForEachRow", "WriteCellX", "NTypeInto"])),
            "Web Automation, Spreadsheet Processing, Bulk Processing"
        );
    }

    #[test]
    fn test_prose_summary_ends_with_disclaimer() {
        for types in [&[][..], &["Sequence"][..], &["OpenBrowser", "NClick", "ReadRange"][..]] {
            let summary = prose_summary(&activities(types));
            assert!(summary.ends_with(SUMMARY_DISCLAIMER), "{}", summary);
        }
    }

    #[test]
    fn test_prose_summary_mixed() {
        let summary = prose_summary(&activities(&[
            "WriteCell", "OpenBrowser", "ForEachRow", "NTypeInto", "NClick", "TryCatch",
        ]));
        assert!(summary.starts_with("This workflow looks like a mixed automation"));
        assert!(summary.contains("opening a web browser"));
        assert!(summary.contains("every row of a data table"));
        assert!(summary.contains(
            "Key operations include clicking buttons, entering data into form fields, writing single cells to Excel."
        ));
        assert!(summary.contains("Try Catch"));
    }

    #[test]
    fn test_prose_summary_deterministic() {
        let a = prose_summary(&activities(&["NGetText", "ReadRange", "Click"]));
        let b = prose_summary(&activities(&["Click", "ReadRange", "NGetText"]));
        assert_eq!(a, b);
    }

    #[test]
    fn test_health_score() {
        assert_eq!(health_score(&[]), 100.0);
        assert_eq!(health_score(&[issue(Severity::High), issue(Severity::Medium)]), 75.0);
        // Critical and Low do not count
        assert_eq!(health_score(&[issue(Severity::Critical), issue(Severity::Low)]), 100.0);
    }

    #[test]
    fn test_health_score_floor() {
        let issues: Vec<_> = (0..10).map(|_| issue(Severity::High)).collect();
        assert_eq!(health_score(&issues), 0.0);
    }

    #[test]
    fn test_recommendations_fallback() {
        let recs = recommendations(&activities(&["Sequence"]), &Thresholds::default());
        // A single Sequence has no log messages, so logging is still recommended
        assert_eq!(recs.len(), 1);
        assert!(recs[0].starts_with("Add logging"));

        let logged = activities(&["LogMessage", "LogMessage", "LogMessage"]);
        let recs = recommendations(&logged, &Thresholds::default());
        assert_eq!(recs, vec!["No general recommendations. The workflow looks good!"]);
    }

    #[test]
    fn test_recommendations_try_catch_and_logging() {
        let acts = activities(&["Sequence", "Assign", "Assign", "Assign", "Assign", "LogMessage"]);
        let recs = recommendations(&acts, &Thresholds::default());
        assert_eq!(recs.len(), 2);
        assert!(recs[0].starts_with("Add global error handling"));
        assert!(recs[1].starts_with("Log in more detail"));
    }

    #[test]
    fn test_recommendations_timeouts() {
        let mut with_timeout = activity("NClick");
        with_timeout.attributes.insert("TimeoutMS".to_string(), "10000".to_string());
        let mut without = activity("NTypeInto");
        without.name = "Enter name".to_string();
        let logs = activities(&["LogMessage", "LogMessage", "LogMessage"]);

        let mut acts = logs.clone();
        acts.push(with_timeout.clone());
        acts.push(without);
        let recs = recommendations(&acts, &Thresholds::default());
        assert_eq!(recs.len(), 1);
        assert!(recs[0].contains("'Enter name'"));
        assert!(!recs[0].contains("'NClick'"));

        let mut acts = logs;
        acts.push(with_timeout);
        let recs = recommendations(&acts, &Thresholds::default());
        assert!(recs[0].starts_with("Review timeout settings"));
    }
}
