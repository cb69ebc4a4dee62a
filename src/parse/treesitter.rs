//! Tree-sitter front end
//!
//! Parses source text with the TSX grammar, which accepts TypeScript type
//! syntax and JSX in the same pass. A tree is only handed on when it is free
//! of ERROR and MISSING nodes.

use tree_sitter::{Language, Node, Parser, Tree};

/// Why the front end refused a document
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FrontEndError {
    /// The grammar could not be loaded into the parser
    Language(String),
    /// The parser gave up without producing a tree
    NoTree,
    /// The tree contains a syntax error at this 1-based position
    Syntax { line: usize, column: usize },
}

/// Grammar used for every document
pub fn language() -> Language {
    tree_sitter_typescript::LANGUAGE_TSX.into()
}

/// Create a parser configured for the TSX grammar
fn get_parser() -> Result<Parser, FrontEndError> {
    let mut parser = Parser::new();
    parser
        .set_language(&language())
        .map_err(|e| FrontEndError::Language(e.to_string()))?;
    Ok(parser)
}

/// Parse `source` into a syntax-error-free tree
pub fn parse(source: &str) -> Result<Tree, FrontEndError> {
    let mut parser = get_parser()?;
    let tree = parser.parse(source, None).ok_or(FrontEndError::NoTree)?;

    let root = tree.root_node();
    if root.has_error() {
        let (line, column) = first_error(root)
            .map(|node| {
                let pos = node.start_position();
                (pos.row + 1, pos.column + 1)
            })
            .unwrap_or((1, 1));
        tracing::debug!(line, column, "Syntax error in document");
        return Err(FrontEndError::Syntax { line, column });
    }

    Ok(tree)
}

/// Find the first ERROR or MISSING node in document order
fn first_error(root: Node) -> Option<Node> {
    let mut cursor = root.walk();
    loop {
        let node = cursor.node();
        if node.is_error() || node.is_missing() {
            return Some(node);
        }

        // Only descend into subtrees that contain the error
        if node.has_error() && cursor.goto_first_child() {
            continue;
        }

        loop {
            if cursor.goto_next_sibling() {
                break;
            }
            if !cursor.goto_parent() {
                return None;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_plain_javascript() {
        let tree = parse("const a = 1;\nfoo(a);\n").unwrap();
        assert_eq!(tree.root_node().kind(), "program");
    }

    #[test]
    fn test_parse_typescript_and_jsx_together() {
        let source = r#"
interface Props { label: string }
const render = (props: Props): JSX.Element => <span>{props.label as string}</span>;
"#;
        assert!(parse(source).is_ok());
    }

    #[test]
    fn test_unterminated_call_is_rejected() {
        let err = parse("console.log(").unwrap_err();
        assert!(matches!(err, FrontEndError::Syntax { .. }));
    }

    #[test]
    fn test_error_position_points_at_broken_line() {
        let err = parse("const ok = 1;\nconst = ;\n").unwrap_err();
        match err {
            FrontEndError::Syntax { line, .. } => assert_eq!(line, 2),
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[test]
    fn test_empty_document_parses() {
        assert!(parse("").is_ok());
    }
}
