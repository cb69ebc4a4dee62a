//! Call classifier
//!
//! Purely syntactic: `console.log` is recognised by the identifier and
//! property names alone, never by resolving bindings. Aliases,
//! destructured references, computed access (`console["log"]`), chained
//! access (`a.console.log`) and optional chaining are not recognised.

use crate::core::config::{DEFAULT_METHOD, DEFAULT_NAMESPACE};
use crate::parse::{NodeId, NodeKind, SyntaxTree};
use compact_str::CompactString;
use smallvec::SmallVec;

/// Names that identify a logging call
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Matcher {
    namespace: CompactString,
    methods: SmallVec<[CompactString; 2]>,
}

impl Default for Matcher {
    fn default() -> Self {
        Self::new(DEFAULT_NAMESPACE, [DEFAULT_METHOD])
    }
}

impl Matcher {
    pub fn new<I, S>(namespace: &str, methods: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            namespace: CompactString::new(namespace),
            methods: methods
                .into_iter()
                .map(|m| CompactString::new(m.as_ref()))
                .collect(),
        }
    }

    pub fn namespace(&self) -> &str {
        &self.namespace
    }

    pub fn methods(&self) -> impl Iterator<Item = &str> {
        self.methods.iter().map(|m| m.as_str())
    }

    /// True for `console.log` itself or for a call whose callee is `console.log`
    pub fn is_logging_reference(&self, tree: &SyntaxTree, id: NodeId) -> bool {
        match tree.kind(id) {
            NodeKind::Member { .. } => self.is_logging_member(tree, id),
            NodeKind::Call { callee, .. } => self.is_logging_member(tree, *callee),
            _ => false,
        }
    }

    /// True only for calls of `console.log`
    pub fn is_logging_call(&self, tree: &SyntaxTree, id: NodeId) -> bool {
        matches!(tree.kind(id), NodeKind::Call { .. }) && self.is_logging_reference(tree, id)
    }

    fn is_logging_member(&self, tree: &SyntaxTree, id: NodeId) -> bool {
        let NodeKind::Member {
            object,
            property,
            optional: false,
        } = tree.kind(id)
        else {
            return false;
        };

        let object_matches =
            matches!(tree.kind(*object), NodeKind::Identifier(name) if *name == self.namespace);
        let property_matches = matches!(
            tree.kind(*property),
            NodeKind::Identifier(name) if self.methods.iter().any(|m| m == name)
        );

        object_matches && property_matches
    }
}
