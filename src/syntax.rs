//! Post-render check of a command string against the tree-sitter bash grammar.

use tree_sitter::{Node, Parser};

use crate::error::SyntaxError;

/// Parse `command` as bash and report the first ERROR or MISSING node.
pub fn check(command: &str) -> Result<(), SyntaxError> {
    let mut parser = Parser::new();
    parser
        .set_language(&tree_sitter_bash::LANGUAGE.into())
        .map_err(|e| SyntaxError::Grammar(e.to_string()))?;
    let tree = parser.parse(command, None).ok_or(SyntaxError::NoTree)?;

    let root = tree.root_node();
    if !root.has_error() {
        return Ok(());
    }
    match first_problem(root) {
        Some(node) if node.is_missing() => Err(SyntaxError::Missing {
            offset: node.start_byte(),
            expected: node.kind().to_string(),
        }),
        Some(node) => Err(SyntaxError::Invalid {
            offset: node.start_byte(),
            snippet: snippet(command, node),
        }),
        None => Err(SyntaxError::Invalid {
            offset: 0,
            snippet: snippet(command, root),
        }),
    }
}

/// Depth-first search for the earliest ERROR or MISSING node.
fn first_problem(node: Node<'_>) -> Option<Node<'_>> {
    if node.is_error() || node.is_missing() {
        return Some(node);
    }
    if !node.has_error() {
        return None;
    }
    let mut cursor = node.walk();
    let children: Vec<Node<'_>> = node.children(&mut cursor).collect();
    children.into_iter().find_map(first_problem)
}

fn snippet(source: &str, node: Node<'_>) -> String {
    let text = source.get(node.byte_range()).unwrap_or_default();
    text.chars().take(40).collect()
}
