//! Log removal engine
//!
//! `source -> parse -> walk -> resolve -> edited source`. The engine is a
//! pure function over its input: it does no I/O and keeps no state between
//! calls, so independent documents can be processed concurrently.
//!
//! ```
//! let outcome = unlog::strip::run("console.log(save(1));\nrun();").unwrap();
//! assert_eq!(outcome.text, "save(1)\nrun();");
//! assert_eq!(outcome.removed, 1);
//! ```

pub mod classify;
pub mod plan;
pub mod resolve;
pub mod walker;

pub use classify::Matcher;
pub use plan::{DeleteRange, EditPlan, KeepFragment, ReferenceSite};
pub use walker::{WalkResult, Walker};

use crate::parse::{treesitter, FrontEndError, SyntaxTree};
use thiserror::Error;
use tracing::debug;

/// The document could not be parsed; nothing was edited
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseFailure {
    #[error("syntax error at line {line}, column {column}")]
    Syntax { line: usize, column: usize },

    #[error("parser produced no syntax tree")]
    NoTree,

    #[error("failed to load grammar: {0}")]
    Grammar(String),
}

impl From<FrontEndError> for ParseFailure {
    fn from(err: FrontEndError) -> Self {
        match err {
            FrontEndError::Syntax { line, column } => Self::Syntax { line, column },
            FrontEndError::NoTree => Self::NoTree,
            FrontEndError::Language(message) => Self::Grammar(message),
        }
    }
}

/// Result of a successful run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Outcome {
    /// Edited document; equal to the input when nothing was removed
    pub text: String,
    /// Number of top-level ranges removed
    pub removed: usize,
    /// Logging references that were left in place
    pub references: Vec<ReferenceSite>,
}

impl Outcome {
    pub fn changed(&self) -> bool {
        self.removed > 0
    }
}

/// Log remover configured with a [`Matcher`]
#[derive(Debug, Clone, Default)]
pub struct Engine {
    matcher: Matcher,
}

impl Engine {
    pub fn new(matcher: Matcher) -> Self {
        Self { matcher }
    }

    pub fn matcher(&self) -> &Matcher {
        &self.matcher
    }

    /// Build the edit plan for `source` without applying it
    pub fn plan(&self, source: &str) -> Result<WalkResult, ParseFailure> {
        let tree = treesitter::parse(source)?;
        let syntax = SyntaxTree::lower(&tree, source);
        Ok(Walker::new(&syntax, source, &self.matcher).walk())
    }

    /// Remove logging calls from `source`
    pub fn run(&self, source: &str) -> Result<Outcome, ParseFailure> {
        let WalkResult { plan, references } = self.plan(source)?;

        let removed = resolve::top_level_count(source, &plan);
        let text = resolve::apply(source, &plan);
        debug!(
            ranges = plan.len(),
            removed,
            references = references.len(),
            "Applied edit plan"
        );

        Ok(Outcome {
            text,
            removed,
            references,
        })
    }
}

/// Remove `console.log` calls from `source` with the default matcher
pub fn run(source: &str) -> Result<Outcome, ParseFailure> {
    Engine::default().run(source)
}
