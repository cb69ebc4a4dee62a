//! Tree walker
//!
//! Visits every call expression once, in pre-order, and decides what to
//! delete:
//!
//! | Call                          | Parent                | Deleted range      |
//! |-------------------------------|-----------------------|--------------------|
//! | logging                       | arrow, as its body    | the call           |
//! | logging                       | expression statement  | the statement      |
//! | logging                       | sequence expression   | the call           |
//! | logging, argument of a call   | non-logging call      | the argument       |
//!
//! Arguments of a removed logging call that are themselves non-logging calls
//! are kept as fragments of the deleted range, so `console.log(save(x));`
//! becomes `save(x)`.
//!
//! Bare references such as `event.register(console.log)` are left alone and
//! reported back to the caller.

use super::classify::Matcher;
use super::plan::{EditPlan, KeepFragment, ReferenceSite};
use crate::parse::{NodeId, NodeKind, SyntaxTree};
use tracing::debug;

/// Everything the walker learned about one document
#[derive(Debug, Default)]
pub struct WalkResult {
    pub plan: EditPlan,
    /// Logging references that no rule removes
    pub references: Vec<ReferenceSite>,
}

/// Walks a syntax tree and builds the edit plan
pub struct Walker<'a> {
    tree: &'a SyntaxTree,
    source: &'a str,
    matcher: &'a Matcher,
    result: WalkResult,
}

impl<'a> Walker<'a> {
    pub fn new(tree: &'a SyntaxTree, source: &'a str, matcher: &'a Matcher) -> Self {
        Self {
            tree,
            source,
            matcher,
            result: WalkResult::default(),
        }
    }

    /// Visit the whole tree and return the plan
    pub fn walk(mut self) -> WalkResult {
        let tree = self.tree;
        for id in tree.pre_order() {
            match tree.kind(id) {
                NodeKind::Call { arguments, .. } => {
                    if self.matcher.is_logging_call(tree, id) {
                        self.visit_logging_call(id);
                    } else {
                        self.scan_arguments(arguments);
                    }
                }
                NodeKind::Member { .. } => self.visit_member(id),
                _ => {}
            }
        }
        self.result
    }

    /// Logging calls passed straight to another call are deleted in place
    fn scan_arguments(&mut self, arguments: &[NodeId]) {
        for &arg in arguments {
            if self.matcher.is_logging_call(self.tree, arg) {
                self.mark(arg, arg);
            }
        }
    }

    fn visit_logging_call(&mut self, id: NodeId) {
        let tree = self.tree;
        let Some(parent) = tree.parent(id) else {
            return;
        };

        match tree.kind(parent) {
            // `() => console.log(x)` keeps the arrow, loses the body
            NodeKind::Arrow { body: Some(body) } if *body == id => self.mark(id, id),
            NodeKind::ExpressionStatement => self.mark(parent, id),
            NodeKind::Sequence => self.mark(id, id),
            // Handled by the argument scan of the enclosing call
            NodeKind::Call { arguments, .. } if arguments.contains(&id) => {}
            other => {
                debug!(parent = ?other, span = ?tree.span(id), "Logging call left in place");
            }
        }
    }

    /// Record `console.log` used as a value rather than called
    fn visit_member(&mut self, id: NodeId) {
        let tree = self.tree;
        if !self.matcher.is_logging_reference(tree, id) {
            return;
        }
        let called = tree.parent(id).is_some_and(|parent| {
            matches!(tree.kind(parent), NodeKind::Call { callee, .. } if *callee == id)
        });
        if called {
            return;
        }
        if let Some(span) = tree.span(id) {
            let site = ReferenceSite::at(self.source, span.start);
            debug!(line = site.line, column = site.column, "Logging reference preserved");
            self.result.references.push(site);
        }
    }

    /// Delete `target` and keep the side-effecting arguments of `call`
    fn mark(&mut self, target: NodeId, call: NodeId) {
        let Some(range) = self.tree.span(target) else {
            return;
        };
        if range.slice(self.source).is_none() {
            return;
        }

        self.result.plan.delete(range);
        let fragments = self.keep_fragments(call);
        self.result.plan.retain(range, fragments);
    }

    fn keep_fragments(&self, call: NodeId) -> Vec<KeepFragment> {
        let NodeKind::Call { arguments, .. } = self.tree.kind(call) else {
            return Vec::new();
        };

        arguments
            .iter()
            .filter(|&&arg| matches!(self.tree.kind(arg), NodeKind::Call { .. }))
            .filter(|&&arg| !self.matcher.is_logging_call(self.tree, arg))
            .filter_map(|&arg| {
                let span = self.tree.span(arg)?;
                let text = span.slice(self.source)?;
                Some(KeepFragment {
                    span,
                    text: text.to_string(),
                })
            })
            .collect()
    }
}
