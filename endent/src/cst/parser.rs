//! Tree-sitter based CST parser for Python source code.
//!
//! Provides precise byte-range information for safe code rewriting.

use thiserror::Error;
use tree_sitter::{Node, Parser};

/// Node kind of a Python list literal.
pub const KIND_LIST: &str = "list";

/// Node kind of a Python dictionary literal.
pub const KIND_DICTIONARY: &str = "dictionary";

/// A CST node with exact source location.
#[derive(Debug, Clone)]
pub struct CstNode {
    /// Node kind (e.g., "list", "dictionary", "identifier").
    pub kind: String,
    /// Start byte offset (inclusive).
    pub start_byte: usize,
    /// End byte offset (exclusive).
    pub end_byte: usize,
    /// Whether this is a named node (vs anonymous like punctuation).
    pub is_named: bool,
    /// Child nodes.
    pub children: Vec<CstNode>,
}

impl CstNode {
    /// Create a `CstNode` from a tree-sitter `Node`.
    fn from_ts_node(node: Node<'_>) -> Self {
        let children = (0..node.child_count() as u32)
            .filter_map(|i| node.child(i))
            .map(Self::from_ts_node)
            .collect();

        Self {
            kind: node.kind().to_string(),
            start_byte: node.start_byte(),
            end_byte: node.end_byte(),
            is_named: node.is_named(),
            children,
        }
    }

    /// Byte length of the node.
    #[must_use]
    pub fn len(&self) -> usize {
        self.end_byte.saturating_sub(self.start_byte)
    }

    /// Whether the node spans zero bytes.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Whether this node is a list or dictionary literal.
    #[must_use]
    pub fn is_collection_literal(&self) -> bool {
        self.kind == KIND_LIST || self.kind == KIND_DICTIONARY
    }

    /// The element children of the node.
    ///
    /// Brackets, commas and other punctuation are anonymous nodes in the
    /// tree-sitter grammar; comments are named but are never literal
    /// elements, so both are filtered out here.
    pub fn elements(&self) -> impl Iterator<Item = &CstNode> {
        self.children
            .iter()
            .filter(|c| c.is_named && c.kind != "comment")
    }

    /// Find all nodes of a specific kind, in document order.
    #[must_use]
    pub fn find_by_kind(&self, kind: &str) -> Vec<&CstNode> {
        let mut result = Vec::new();
        self.find_by_kind_recursive(kind, &mut result);
        result
    }

    fn find_by_kind_recursive<'a>(&'a self, kind: &str, result: &mut Vec<&'a CstNode>) {
        if self.kind == kind {
            result.push(self);
        }
        for child in &self.children {
            child.find_by_kind_recursive(kind, result);
        }
    }
}

/// A parsed CST tree.
#[derive(Debug)]
pub struct CstTree {
    /// Root node of the CST.
    pub root: CstNode,
}

/// Error during CST parsing.
#[derive(Debug, Error)]
pub enum CstError {
    /// Failed to create parser.
    #[error("Failed to create CST parser: {0}")]
    ParserCreation(String),
    /// Failed to parse source.
    #[error("Failed to parse source as Python")]
    ParseFailed,
}

/// Tree-sitter based CST parser.
pub struct CstParser {
    parser: Parser,
}

impl CstParser {
    /// Create a new CST parser for Python.
    ///
    /// # Errors
    /// Returns error if parser creation fails.
    pub fn new() -> Result<Self, CstError> {
        let mut parser = Parser::new();

        // Use the LANGUAGE constant exported by tree-sitter-python crate
        parser
            .set_language(&tree_sitter_python::LANGUAGE.into())
            .map_err(|e| CstError::ParserCreation(e.to_string()))?;

        Ok(Self { parser })
    }

    /// Parse source code into a CST.
    ///
    /// # Errors
    /// Returns error if parsing fails.
    pub fn parse(&mut self, source: &str) -> Result<CstTree, CstError> {
        let tree = self
            .parser
            .parse(source, None)
            .ok_or(CstError::ParseFailed)?;

        Ok(CstTree {
            root: CstNode::from_ts_node(tree.root_node()),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_list_literal() {
        let source = "x = [1, 2, 3]\n";
        let mut parser = CstParser::new().unwrap();
        let tree = parser.parse(source).unwrap();

        assert_eq!(tree.root.kind, "module");
        let lists = tree.root.find_by_kind(KIND_LIST);
        assert_eq!(lists.len(), 1);
        assert!(lists[0].is_collection_literal());
        assert_eq!(lists[0].elements().count(), 3);
    }

    #[test]
    fn test_parse_dictionary_literal() {
        let source = "d = {'a': 1, 'b': 2}\n";
        let mut parser = CstParser::new().unwrap();
        let tree = parser.parse(source).unwrap();

        let dicts = tree.root.find_by_kind(KIND_DICTIONARY);
        assert_eq!(dicts.len(), 1);
        // Elements of a dictionary are its key/value pairs.
        assert_eq!(dicts[0].elements().count(), 2);
    }

    #[test]
    fn test_byte_ranges_accurate() {
        let source = "x = [1]";
        let mut parser = CstParser::new().unwrap();
        let tree = parser.parse(source).unwrap();

        assert_eq!(tree.root.start_byte, 0);
        assert_eq!(tree.root.end_byte, source.len());

        let lists = tree.root.find_by_kind(KIND_LIST);
        assert_eq!(lists[0].start_byte, source.find('[').unwrap());
        assert_eq!(lists[0].end_byte, source.find(']').unwrap() + 1);
    }

    #[test]
    fn test_empty_list_has_no_elements() {
        let source = "x = []\n";
        let mut parser = CstParser::new().unwrap();
        let tree = parser.parse(source).unwrap();

        let lists = tree.root.find_by_kind(KIND_LIST);
        assert_eq!(lists[0].elements().count(), 0);
    }

    #[test]
    fn test_comment_inside_list_is_not_an_element() {
        let source = "x = [\n    1,  # first\n]\n";
        let mut parser = CstParser::new().unwrap();
        let tree = parser.parse(source).unwrap();

        let lists = tree.root.find_by_kind(KIND_LIST);
        assert_eq!(lists[0].elements().count(), 1);
    }

    #[test]
    fn test_nested_literals_found_in_document_order() {
        let source = "x = [[1], {'k': [2]}]\n";
        let mut parser = CstParser::new().unwrap();
        let tree = parser.parse(source).unwrap();

        let lists = tree.root.find_by_kind(KIND_LIST);
        assert_eq!(lists.len(), 3);
        assert!(lists[0].start_byte < lists[1].start_byte);
        assert!(lists[1].start_byte < lists[2].start_byte);
    }
}
