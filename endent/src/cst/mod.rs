//! Tree-sitter based CST layer.
//!
//! The rule never parses source text itself; it consumes the owned node
//! tree produced here, which carries a kind tag and exact byte ranges for
//! every node.

pub mod parser;

pub use parser::{CstError, CstNode, CstParser, CstTree};
