//! XAML Analyzer - static analysis for UiPath workflow files
//!
//! This library inspects UiPath XAML workflows without running them:
//! - Error handling: missing, sparse or empty Try Catch blocks
//! - Excel and browser automation hazards
//! - Logging coverage and log levels
//! - Selector robustness, hardcoded paths, naming and unused variables
//!
//! Every run produces one immutable [`WorkflowAnalysis`] with the detected
//! issues, recommendations and a health score.
//!
//! # Example
//!
//! ```no_run
//! use xaml_analyzer::{analyze_source, Config, ProjectInfo};
//! use std::path::Path;
//!
//! let source = r#"<Activity><Sequence DisplayName="Main" /></Activity>"#;
//! let analysis = analyze_source(source, Path::new("Main.xaml"), ProjectInfo::default(), &Config::default()).unwrap();
//!
//! for issue in &analysis.issues {
//!     println!("{} [{}]: {}", issue.rule_id, issue.severity, issue.title);
//! }
//! println!("score: {}", analysis.health_score);
//! ```

pub mod config;
pub mod core;
pub mod error;
pub mod insights;
pub mod output;
pub mod rules;

pub use crate::config::{Config, ConfigError, Thresholds, CONFIG_FILE_NAME};
pub use crate::core::{
    find_project_file, load_project_info, Activity, ActivityKind, Category, ExtractedFacts,
    HealthRating, Issue, NamespaceTable, ProjectInfo, Severity, Variable, WorkflowAnalysis,
    WorkflowDocument,
};
pub use crate::error::{AnalyzeError, MetadataError};
pub use crate::output::{get_formatter, Formatter, OutputFormat};

use std::path::Path;

use crate::rules::{run_rules, RuleContext};

/// Analyze a workflow file with the default configuration
pub fn analyze(
    workflow_path: &Path,
    metadata_path: Option<&Path>,
) -> Result<WorkflowAnalysis, AnalyzeError> {
    analyze_with_config(workflow_path, metadata_path, &Config::default())
}

/// Analyze a workflow file.
///
/// Metadata problems are logged and replaced by defaults; only an unreadable
/// or malformed workflow is an error.
pub fn analyze_with_config(
    workflow_path: &Path,
    metadata_path: Option<&Path>,
    config: &Config,
) -> Result<WorkflowAnalysis, AnalyzeError> {
    let source = std::fs::read_to_string(workflow_path).map_err(|e| AnalyzeError::Read {
        path: workflow_path.to_path_buf(),
        source: e,
    })?;
    let project = load_project_info(metadata_path);
    analyze_source(&source, workflow_path, project, config)
}

/// Analyze workflow source text
pub fn analyze_source(
    source: &str,
    path: &Path,
    project: ProjectInfo,
    config: &Config,
) -> Result<WorkflowAnalysis, AnalyzeError> {
    let doc = WorkflowDocument::parse(source, path)?;
    let facts = ExtractedFacts::from_document(&doc);
    log::debug!(
        "{}: {} activities, {} variables, {} namespaces",
        doc.file().display(),
        facts.activities.len(),
        facts.variables.len(),
        doc.namespaces().len()
    );

    let ctx = RuleContext::new(&doc, &facts, &config.thresholds);
    let issues = run_rules(&ctx, config);

    let components = facts.components();
    let ExtractedFacts {
        activities,
        variables,
        urls,
        database_connections,
    } = facts;

    Ok(WorkflowAnalysis {
        file: path.to_path_buf(),
        workflow_name: project.name,
        workflow_purpose: insights::purpose(&activities),
        prose_summary: insights::prose_summary(&activities),
        recommendations: insights::recommendations(&activities, &config.thresholds),
        health_score: insights::health_score(&issues),
        variables: variables.iter().map(|v| v.to_string()).collect(),
        activities,
        issues,
        dependencies: project.dependencies,
        urls,
        database_connections,
        components,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::fs;
    use tempfile::TempDir;

    fn run(source: &str) -> WorkflowAnalysis {
        analyze_source(source, Path::new("Main.xaml"), ProjectInfo::default(), &Config::default())
            .unwrap()
    }

    fn rule_ids(analysis: &WorkflowAnalysis) -> Vec<&str> {
        analysis.issues.iter().map(|i| i.rule_id.as_str()).collect()
    }

    const LOOP_SCENARIO: &str = r#"<Activity
        xmlns="http://schemas.microsoft.com/netfx/2009/xaml/activities"
        xmlns:ui="http://schemas.uipath.com/workflow/activities"
        xmlns:ue="http://schemas.uipath.com/workflow/activities/excel">
        <ui:ForEachRow DisplayName="For Each Invoice">
            <Sequence DisplayName="Body">
                <ue:ExcelApplicationCard DisplayName="Use Excel File">
                    <ue:WriteCell DisplayName="Write Status" AutoIncrementRow="True" />
                </ue:ExcelApplicationCard>
            </Sequence>
        </ui:ForEachRow>
    </Activity>"#;

    #[test]
    fn test_loop_scenario_issues() {
        let analysis = run(LOOP_SCENARIO);
        let ids = rule_ids(&analysis);
        for expected in ["ERR-001", "XL-001", "XL-002", "LOOP-001", "LOOP-002", "LOG-001"] {
            assert!(ids.contains(&expected), "missing {} in {:?}", expected, ids);
        }
        assert!(analysis.issues.len() >= 6);
        assert_eq!(analysis.workflow_purpose, "Spreadsheet Processing, Bulk Processing");
    }

    #[test]
    fn test_empty_document() {
        let analysis = run("<Activity />");
        assert!(analysis.activities.is_empty());
        assert!(analysis.variables.is_empty());
        assert!(!rule_ids(&analysis).contains(&"MAINT-001"));
        assert!(analysis.issues.is_empty());
        assert_eq!(analysis.health_score, 100.0);
        assert_eq!(analysis.workflow_purpose, "General Workflow");
        assert!(analysis.prose_summary.ends_with(insights::SUMMARY_DISCLAIMER));
    }

    #[test]
    fn test_malformed_metadata_falls_back() {
        let dir = TempDir::new().unwrap();
        let workflow = dir.path().join("Main.xaml");
        let metadata = dir.path().join("project.json");
        fs::write(&workflow, LOOP_SCENARIO).unwrap();
        fs::write(&metadata, "{ \"name\": ").unwrap();

        let analysis = analyze(&workflow, Some(&metadata)).unwrap();
        assert_eq!(analysis.workflow_name, "Unknown");
        assert!(analysis.dependencies.is_empty());
        assert!(!analysis.issues.is_empty());
    }

    #[test]
    fn test_metadata_used() {
        let dir = TempDir::new().unwrap();
        let workflow = dir.path().join("Main.xaml");
        let metadata = dir.path().join("project.json");
        fs::write(&workflow, "<Activity><Sequence /></Activity>").unwrap();
        fs::write(
            &metadata,
            r#"{"name": "InvoiceBot", "dependencies": {"UiPath.Excel.Activities": "[2.22.4]"}}"#,
        )
        .unwrap();

        let analysis = analyze(&workflow, Some(&metadata)).unwrap();
        assert_eq!(analysis.workflow_name, "InvoiceBot");
        assert_eq!(analysis.dependencies["UiPath.Excel.Activities"], "[2.22.4]");
    }

    #[test]
    fn test_unused_variable_single_issue() {
        let source = r#"<Activity xmlns:x="http://schemas.microsoft.com/winfx/2006/xaml">
            <Sequence>
                <Sequence.Variables>
                    <Variable x:TypeArguments="x:String" Name="neverRead" />
                </Sequence.Variables>
            </Sequence>
        </Activity>"#;
        let analysis = run(source);
        let unused: Vec<_> = analysis
            .issues
            .iter()
            .filter(|i| i.rule_id == "LOGIC-005")
            .collect();
        assert_eq!(unused.len(), 1);
        assert!(unused[0].description.contains("neverRead"));
        assert_eq!(analysis.variables, vec!["neverRead (x:String)"]);
    }

    #[test]
    fn test_many_activities_without_try_catch() {
        let source = "<Activity><Assign /><Assign /><Assign /><Assign /><Assign /><Assign /></Activity>";
        let analysis = run(source);
        let issue = analysis.issues.iter().find(|i| i.rule_id == "ERR-001").unwrap();
        assert!(matches!(issue.severity, Severity::High | Severity::Critical));
    }

    #[test]
    fn test_score_bounds() {
        let mut source = String::from("<Activity><Sequence>");
        for i in 0..20 {
            source.push_str(&format!(
                r#"<NTypeInto DisplayName="Type {i}" /><NApplicationCard><NApplicationCard /></NApplicationCard><Variable Name="bad_name_{i}" />"#
            ));
        }
        source.push_str("</Sequence></Activity>");

        let analysis = run(&source);
        assert!(analysis.health_score >= 0.0 && analysis.health_score <= 100.0);
        assert_eq!(analysis.health_score, 0.0);
    }

    #[test]
    fn test_parse_error_carries_path() {
        let result = analyze_source(
            "<Activity><Sequence></Activity>",
            Path::new("flows/Broken.xaml"),
            ProjectInfo::default(),
            &Config::default(),
        );
        match result {
            Err(AnalyzeError::Parse { path, .. }) => assert_eq!(path, Path::new("flows/Broken.xaml")),
            other => panic!("expected parse error, got {:?}", other.map(|a| a.health_score)),
        }
    }

    #[test]
    fn test_missing_file() {
        let result = analyze(Path::new("/nonexistent/Main.xaml"), None);
        assert!(matches!(result, Err(AnalyzeError::Read { .. })));
    }

    #[test]
    fn test_disabled_rules_not_reported() {
        let mut config = Config::default();
        config.rules.disable.push("LOOP-*".to_string());
        let analysis =
            analyze_source(LOOP_SCENARIO, Path::new("Main.xaml"), ProjectInfo::default(), &config).unwrap();
        assert!(!rule_ids(&analysis).iter().any(|id| id.starts_with("LOOP-")));
    }

    #[test]
    fn test_components_and_urls() {
        let source = r#"<Activity>
            <Sequence>
                <OpenBrowser Url="https://portal.example.com" />
                <DatabaseConnect ConnectionString="Server=db" />
            </Sequence>
        </Activity>"#;
        let analysis = run(source);
        assert_eq!(
            analysis.components.iter().map(String::as_str).collect::<Vec<_>>(),
            vec!["DatabaseConnect", "OpenBrowser", "Sequence"]
        );
        assert!(analysis.urls.contains("https://portal.example.com"));
        assert!(analysis.database_connections.contains("Server=db"));
    }

    #[test]
    fn test_analysis_is_deterministic() {
        assert_eq!(run(LOOP_SCENARIO), run(LOOP_SCENARIO));
    }
}
