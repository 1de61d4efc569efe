//! Namespace table discovered from a workflow document

use roxmltree::Document;
use std::collections::BTreeMap;

/// XAML language namespace (`x:` prefix in UiPath workflows)
pub const XAML_NAMESPACE: &str = "http://schemas.microsoft.com/winfx/2006/xaml";

/// Key used for the default (unprefixed) namespace
pub const DEFAULT_PREFIX: &str = "default";

/// Prefix -> URI mapping for every namespace declared in a document.
///
/// UiPath freely mixes legacy and modern activity namespaces, so lookups in
/// [`super::WorkflowDocument`] never require a caller to know which URI a tag
/// lives under. The table is used where a specific namespace matters, such as
/// `x:TypeArguments`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NamespaceTable {
    entries: BTreeMap<String, String>,
}

impl NamespaceTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Scan all namespace declarations in the document
    pub fn from_document(doc: &Document) -> Self {
        let mut table = Self::new();
        for node in doc.descendants().filter(|n| n.is_element()) {
            for ns in node.namespaces() {
                let prefix = ns.name().unwrap_or(DEFAULT_PREFIX);
                // roxmltree reports the implicit xml namespace on every element
                if prefix == "xml" {
                    continue;
                }
                table
                    .entries
                    .entry(prefix.to_string())
                    .or_insert_with(|| ns.uri().to_string());
            }
        }
        table
    }

    /// URI bound to a prefix
    pub fn uri(&self, prefix: &str) -> Option<&str> {
        self.entries.get(prefix).map(|s| s.as_str())
    }

    /// URI of the XAML language namespace, falling back to the well-known one
    pub fn xaml_uri(&self) -> &str {
        self.uri("x").unwrap_or(XAML_NAMESPACE)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_collects_default_and_prefixed() {
        let source = r#"<Activity xmlns="http://schemas.microsoft.com/netfx/2009/xaml/activities"
            xmlns:x="http://schemas.microsoft.com/winfx/2006/xaml"
            xmlns:ui="http://schemas.uipath.com/workflow/activities">
            <Sequence />
        </Activity>"#;
        let doc = Document::parse(source).unwrap();
        let table = NamespaceTable::from_document(&doc);

        assert_eq!(
            table.uri("default"),
            Some("http://schemas.microsoft.com/netfx/2009/xaml/activities")
        );
        assert_eq!(table.uri("ui"), Some("http://schemas.uipath.com/workflow/activities"));
        assert_eq!(table.xaml_uri(), XAML_NAMESPACE);
        assert_eq!(table.len(), 3);
    }

    #[test]
    fn test_nested_declarations() {
        let source = r#"<Root><Inner xmlns:ue="urn:excel"><ue:WriteCellX /></Inner></Root>"#;
        let doc = Document::parse(source).unwrap();
        let table = NamespaceTable::from_document(&doc);
        assert_eq!(table.uri("ue"), Some("urn:excel"));
    }

    #[test]
    fn test_no_namespaces() {
        let doc = Document::parse("<Activity />").unwrap();
        let table = NamespaceTable::from_document(&doc);
        assert!(table.is_empty());
        assert_eq!(table.xaml_uri(), XAML_NAMESPACE);
    }
}
