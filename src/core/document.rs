//! Workflow document wrapper for XML parsing

use roxmltree::{Document, Node};
use std::path::{Path, PathBuf};

use super::kind::ActivityKind;
use super::namespaces::NamespaceTable;
use crate::error::AnalyzeError;

/// A parsed UiPath workflow (.xaml)
pub struct WorkflowDocument<'a> {
    source: &'a str,
    doc: Document<'a>,
    namespaces: NamespaceTable,
    file: PathBuf,
}

impl<'a> WorkflowDocument<'a> {
    /// Parse a workflow source file
    pub fn parse(source: &'a str, file: &Path) -> Result<Self, AnalyzeError> {
        let doc = Document::parse(source).map_err(|e| AnalyzeError::Parse {
            path: file.to_path_buf(),
            message: e.to_string(),
        })?;
        let namespaces = NamespaceTable::from_document(&doc);
        Ok(Self {
            source,
            doc,
            namespaces,
            file: file.to_path_buf(),
        })
    }

    /// Raw source text
    pub fn source(&self) -> &'a str {
        self.source
    }

    pub fn file(&self) -> &Path {
        &self.file
    }

    pub fn namespaces(&self) -> &NamespaceTable {
        &self.namespaces
    }

    /// The document (root) element
    pub fn root(&self) -> Node<'_, 'a> {
        self.doc.root_element()
    }

    /// All elements with the given local name, in any namespace, in document order
    pub fn find_all(&self, local_name: &str) -> Vec<Node<'_, 'a>> {
        self.doc
            .descendants()
            .filter(|n| n.is_element() && n.tag_name().name() == local_name)
            .collect()
    }

    /// All elements of an activity kind, including its alias spellings
    pub fn find_kind(&self, kind: ActivityKind) -> Vec<Node<'_, 'a>> {
        self.doc
            .descendants()
            .filter(|n| n.is_element() && n.kind_of() == kind)
            .collect()
    }

    /// Count of elements of an activity kind
    pub fn count_kind(&self, kind: ActivityKind) -> usize {
        self.doc
            .descendants()
            .filter(|n| n.is_element() && n.kind_of() == kind)
            .count()
    }

    /// Elements below `subtree_root` (excluding it) whose local name is in `local_names`
    pub fn find_nested_within<'d>(
        &self,
        subtree_root: Node<'d, 'a>,
        local_names: &[&str],
    ) -> Vec<Node<'d, 'a>> {
        subtree_root
            .descendants()
            .skip(1)
            .filter(|n| n.is_element() && local_names.contains(&n.tag_name().name()))
            .collect()
    }

    /// Elements below `subtree_root` (excluding it) whose activity kind satisfies `matches`
    pub fn find_nested_matching<'d>(
        &self,
        subtree_root: Node<'d, 'a>,
        matches: impl Fn(&ActivityKind) -> bool,
    ) -> Vec<Node<'d, 'a>> {
        subtree_root
            .descendants()
            .skip(1)
            .filter(|n| n.is_element() && matches(&n.kind_of()))
            .collect()
    }

    /// Parent element of `target`, provided `target` lies strictly under `root`.
    ///
    /// roxmltree keeps parent ids in its node arena, so this walks ancestors
    /// instead of rescanning the tree.
    pub fn find_parent<'d>(&self, root: Node<'d, 'a>, target: Node<'d, 'a>) -> Option<Node<'d, 'a>> {
        if target == root || !target.ancestors().any(|a| a == root) {
            return None;
        }
        target.parent_element()
    }

    /// Depth of the deepest element below the root element (root alone is 0)
    pub fn max_depth(&self) -> usize {
        depth_below(self.root())
    }

    /// Line and column (1-based) of a node, for locations
    pub fn node_position(&self, node: &Node) -> (usize, usize) {
        let pos = self.doc.text_pos_at(node.range().start);
        (pos.row as usize, pos.col as usize)
    }
}

fn depth_below(node: Node) -> usize {
    node.children()
        .filter(|c| c.is_element())
        .map(|c| 1 + depth_below(c))
        .max()
        .unwrap_or(0)
}

/// Extension trait for workflow nodes
pub trait NodeExt<'a, 'input> {
    /// Activity kind of this element
    fn kind_of(&self) -> ActivityKind<'a>;

    /// DisplayName attribute, or a fallback
    fn display_name_or(&self, fallback: &'a str) -> &'a str;

    /// First child element with the given local name
    fn child_named(&self, local_name: &str) -> Option<Node<'a, 'input>>;

    /// Number of element children
    fn element_count(&self) -> usize;

    /// True for XAML property elements such as `Sequence.Variables`
    fn is_property_element(&self) -> bool;

    /// Empty body check: no children, or a single child that has no children
    fn is_hollow(&self) -> bool;
}

impl<'a, 'input> NodeExt<'a, 'input> for Node<'a, 'input> {
    fn kind_of(&self) -> ActivityKind<'a> {
        ActivityKind::from_tag(self.tag_name().name())
    }

    fn display_name_or(&self, fallback: &'a str) -> &'a str {
        self.attribute("DisplayName").unwrap_or(fallback)
    }

    fn child_named(&self, local_name: &str) -> Option<Node<'a, 'input>> {
        self.children()
            .find(|c| c.is_element() && c.tag_name().name() == local_name)
    }

    fn element_count(&self) -> usize {
        self.children().filter(|c| c.is_element()).count()
    }

    fn is_property_element(&self) -> bool {
        self.tag_name().name().contains('.')
    }

    fn is_hollow(&self) -> bool {
        let mut children = self.children().filter(|c| c.is_element());
        match (children.next(), children.next()) {
            (None, _) => true,
            (Some(only), None) => only.element_count() == 0,
            _ => false,
        }
    }
}
