//! Fact extraction from workflow documents

use regex::Regex;
use std::collections::{BTreeMap, BTreeSet};
use std::sync::LazyLock;

use super::document::{NodeExt, WorkflowDocument};
use super::kind::ActivityKind;
use super::types::{Activity, Variable};

/// URL occurrences inside arbitrary strings
static URL_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"https?://[^\s"'\]]+"#).unwrap()
});

/// Attribute name fragments that usually carry an address
const URL_ATTRIBUTE_HINTS: &[&str] = &["Url", "Uri", "Endpoint"];

/// Facts pulled out of a document once and shared by all rules
#[derive(Debug, Default, Clone)]
pub struct ExtractedFacts {
    pub activities: Vec<Activity>,
    pub variables: Vec<Variable>,
    pub urls: BTreeSet<String>,
    pub database_connections: BTreeSet<String>,
}

impl ExtractedFacts {
    pub fn from_document(doc: &WorkflowDocument) -> Self {
        Self {
            activities: extract_activities(doc),
            variables: extract_variables(doc),
            urls: extract_urls(doc),
            database_connections: extract_database_connections(doc),
        }
    }

    /// Distinct activity types
    pub fn components(&self) -> BTreeSet<String> {
        self.activities
            .iter()
            .map(|a| a.activity_type.clone())
            .collect()
    }
}

/// Every element below the root element, in document order
pub fn extract_activities(doc: &WorkflowDocument) -> Vec<Activity> {
    doc.root()
        .descendants()
        .skip(1)
        .filter(|n| n.is_element())
        .map(|node| {
            let kind = node.kind_of();
            let attributes: BTreeMap<String, String> = node
                .attributes()
                .map(|a| (a.name().to_string(), a.value().to_string()))
                .collect();
            Activity {
                name: node.display_name_or("Unknown").to_string(),
                activity_type: node.tag_name().name().to_string(),
                purpose: kind.purpose().to_string(),
                attributes,
            }
        })
        .collect()
}

/// Variable declarations anywhere in the tree.
///
/// Property elements such as `Sequence.Variables` also contain "Variable" in
/// their tag but only wrap declarations, so they are skipped.
pub fn extract_variables(doc: &WorkflowDocument) -> Vec<Variable> {
    let xaml_ns = doc.namespaces().xaml_uri();
    doc.root()
        .descendants()
        .filter(|n| {
            n.is_element() && !n.is_property_element() && n.tag_name().name().contains("Variable")
        })
        .map(|node| {
            let name = node.attribute("Name").unwrap_or("Unknown");
            let declared_type = node
                .attribute((xaml_ns, "TypeArguments"))
                .unwrap_or("Unknown");
            Variable::new(name, declared_type)
        })
        .collect()
}

/// Every http(s) address found in attributes and string literals, sorted
pub fn extract_urls(doc: &WorkflowDocument) -> BTreeSet<String> {
    let mut urls = BTreeSet::new();
    let xaml_ns = doc.namespaces().xaml_uri();

    for node in doc.root().descendants().filter(|n| n.is_element()) {
        for attr in node.attributes() {
            let value = attr.value();
            if URL_ATTRIBUTE_HINTS.iter().any(|hint| attr.name().contains(hint))
                && is_plain_url(value)
            {
                urls.insert(value.to_string());
            }
            urls.extend(URL_REGEX.find_iter(value).map(|m| m.as_str().to_string()));
        }

        let is_string_literal = node.tag_name().name() == "String"
            && node.tag_name().namespace().map_or(true, |ns| ns == xaml_ns);
        if is_string_literal {
            if let Some(text) = node.text() {
                urls.extend(URL_REGEX.find_iter(text).map(|m| m.as_str().to_string()));
            }
        }
    }

    urls
}

/// Connection strings of database connect activities
pub fn extract_database_connections(doc: &WorkflowDocument) -> BTreeSet<String> {
    doc.find_kind(ActivityKind::DatabaseConnect)
        .into_iter()
        .filter_map(|node| node.attribute("ConnectionString"))
        .filter(|s| !s.trim().is_empty())
        .map(|s| s.to_string())
        .collect()
}

fn is_plain_url(value: &str) -> bool {
    (value.starts_with("http://") || value.starts_with("https://"))
        && !value.chars().any(char::is_whitespace)
}
