//! unlog - strip `console.log` calls from TypeScript and JavaScript
//!
//! Parses a document with tree-sitter (TSX grammar, so type annotations and
//! JSX are both accepted), finds logging calls by syntax, and deletes them
//! while keeping side-effecting call arguments in place. Strings, template
//! literals and comments are never touched.
//!
//! The engine lives in [`strip`]; [`cli`] and [`output`] are a thin
//! single-document host around it.

pub mod cli;
pub mod core;
pub mod output;
pub mod parse;
pub mod strip;

pub use crate::core::config::Config;
pub use crate::core::error::{Error, Result};
pub use strip::{run, Engine, Matcher, Outcome, ParseFailure};
