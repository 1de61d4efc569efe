//! Core types for workflow analysis

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use std::fmt;
use std::path::PathBuf;

/// Issue severity, ordered from lowest to highest priority
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Severity {
    /// Cosmetic or advisory, fix when convenient
    Low = 1,
    /// Moderate issue, should fix
    Medium = 2,
    /// Serious issue, fix before release
    High = 3,
    /// Must fix immediately
    Critical = 4,
}

impl Severity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Critical => "Critical",
            Severity::High => "High",
            Severity::Medium => "Medium",
            Severity::Low => "Low",
        }
    }

    /// All severities, most severe first
    pub fn descending() -> [Severity; 4] {
        [Severity::Critical, Severity::High, Severity::Medium, Severity::Low]
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Issue category
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Category {
    #[serde(rename = "Error Handling")]
    ErrorHandling,
    #[serde(rename = "Performance")]
    Performance,
    #[serde(rename = "Excel Operations")]
    ExcelOperations,
    #[serde(rename = "Browser Operations")]
    BrowserOperations,
    #[serde(rename = "Logging")]
    Logging,
    #[serde(rename = "Selectors")]
    Selectors,
    #[serde(rename = "Timing")]
    Timing,
    #[serde(rename = "File Paths")]
    FilePaths,
    #[serde(rename = "Naming Convention")]
    NamingConvention,
    #[serde(rename = "Logic Error")]
    LogicError,
    #[serde(rename = "Code Smell")]
    CodeSmell,
}

impl Category {
    pub fn as_str(&self) -> &'static str {
        match self {
            Category::ErrorHandling => "Error Handling",
            Category::Performance => "Performance",
            Category::ExcelOperations => "Excel Operations",
            Category::BrowserOperations => "Browser Operations",
            Category::Logging => "Logging",
            Category::Selectors => "Selectors",
            Category::Timing => "Timing",
            Category::FilePaths => "File Paths",
            Category::NamingConvention => "Naming Convention",
            Category::LogicError => "Logic Error",
            Category::CodeSmell => "Code Smell",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A detected problem in a workflow
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Issue {
    /// Rule identifier (e.g., "ERR-001", "LOGIC-005")
    pub rule_id: String,
    pub severity: Severity,
    pub category: Category,
    /// Short headline
    pub title: String,
    /// What is wrong and why it matters
    pub description: String,
    /// Where in the workflow the problem sits
    pub location: String,
    /// How to fix it
    pub solution: String,
}

impl Issue {
    pub fn new(
        rule_id: impl Into<String>,
        severity: Severity,
        category: Category,
        title: impl Into<String>,
    ) -> Self {
        Self {
            rule_id: rule_id.into(),
            severity,
            category,
            title: title.into(),
            description: String::new(),
            location: String::new(),
            solution: String::new(),
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn at(mut self, location: impl Into<String>) -> Self {
        self.location = location.into();
        self
    }

    pub fn with_solution(mut self, solution: impl Into<String>) -> Self {
        self.solution = solution.into();
        self
    }
}

/// A workflow activity (one element of the activity tree)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Activity {
    /// DisplayName, or "Unknown"
    pub name: String,
    /// Local tag name with the namespace stripped
    #[serde(rename = "type")]
    pub activity_type: String,
    /// Short description of what this kind of activity does
    pub purpose: String,
    /// Attributes keyed by local name
    #[serde(default)]
    pub attributes: BTreeMap<String, String>,
}

impl Activity {
    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes.get(name).map(|s| s.as_str())
    }
}

/// A declared workflow variable
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Variable {
    pub name: String,
    pub declared_type: String,
}

impl Variable {
    pub fn new(name: impl Into<String>, declared_type: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            declared_type: declared_type.into(),
        }
    }
}

impl fmt::Display for Variable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.name, self.declared_type)
    }
}

/// Health band derived from the score
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HealthRating {
    Excellent,
    Good,
    NeedsImprovement,
}

impl HealthRating {
    pub fn from_score(score: f64) -> Self {
        if score >= 80.0 {
            HealthRating::Excellent
        } else if score >= 60.0 {
            HealthRating::Good
        } else {
            HealthRating::NeedsImprovement
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            HealthRating::Excellent => "Excellent",
            HealthRating::Good => "Good",
            HealthRating::NeedsImprovement => "Needs Improvement",
        }
    }
}

/// Complete result of analyzing one workflow
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorkflowAnalysis {
    /// Workflow file that was analyzed
    pub file: PathBuf,
    /// Project name from metadata, or "Unknown"
    pub workflow_name: String,
    pub workflow_purpose: String,
    pub activities: Vec<Activity>,
    /// Variables rendered as "name (type)"
    pub variables: Vec<String>,
    pub issues: Vec<Issue>,
    pub recommendations: Vec<String>,
    pub dependencies: BTreeMap<String, String>,
    pub urls: BTreeSet<String>,
    #[serde(default)]
    pub database_connections: BTreeSet<String>,
    /// Distinct activity types
    pub components: BTreeSet<String>,
    pub prose_summary: String,
    pub health_score: f64,
}

impl WorkflowAnalysis {
    pub fn rating(&self) -> HealthRating {
        HealthRating::from_score(self.health_score)
    }

    pub fn count_by_severity(&self, severity: Severity) -> usize {
        self.issues.iter().filter(|i| i.severity == severity).count()
    }

    pub fn issues_with_severity(&self, severity: Severity) -> impl Iterator<Item = &Issue> {
        self.issues.iter().filter(move |i| i.severity == severity)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_severity_ordering() {
        assert!(Severity::Critical > Severity::High);
        assert!(Severity::High > Severity::Medium);
        assert!(Severity::Medium > Severity::Low);
    }


    #[test]
    fn test_category_serializes_as_label() {
        let json = serde_json::to_string(&Category::ErrorHandling).unwrap();
        assert_eq!(json, "\"Error Handling\"");
        let back: Category = serde_json::from_str(&json).unwrap();
        assert_eq!(back, Category::ErrorHandling);
    }

    #[test]
    fn test_issue_builder() {
        let issue = Issue::new("ERR-001", Severity::High, Category::ErrorHandling, "Missing")
            .with_description("desc")
            .at("Main")
            .with_solution("fix");
        assert_eq!(issue.rule_id, "ERR-001");
        assert_eq!(issue.description, "desc");
        assert_eq!(issue.location, "Main");
        assert_eq!(issue.solution, "fix");
    }

    #[test]
    fn test_variable_display() {
        assert_eq!(Variable::new("rowIndex", "x:Int32").to_string(), "rowIndex (x:Int32)");
    }

    #[test]
    fn test_activity_type_serialized_as_type() {
        let activity = Activity {
            name: "Log".to_string(),
            activity_type: "LogMessage".to_string(),
            purpose: "Writes a log entry".to_string(),
            attributes: BTreeMap::new(),
        };
        let json = serde_json::to_value(&activity).unwrap();
        assert_eq!(json["type"], "LogMessage");
    }

    #[test]
    fn test_health_rating_bands() {
        assert_eq!(HealthRating::from_score(100.0), HealthRating::Excellent);
        assert_eq!(HealthRating::from_score(80.0), HealthRating::Excellent);
        assert_eq!(HealthRating::from_score(79.0), HealthRating::Good);
        assert_eq!(HealthRating::from_score(60.0), HealthRating::Good);
        assert_eq!(HealthRating::from_score(59.9), HealthRating::NeedsImprovement);
    }
}
