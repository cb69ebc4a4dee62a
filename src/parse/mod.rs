//! Parsing front end and syntax arena

mod ast;
pub mod treesitter;

pub use ast::{NodeId, NodeKind, PreOrder, Span, SyntaxNode, SyntaxTree};
pub use treesitter::FrontEndError;
