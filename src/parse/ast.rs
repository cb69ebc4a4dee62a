//! Syntax arena
//!
//! Lowers a tree-sitter tree into a flat arena of [`SyntaxNode`]s. Each node
//! owns its ordered children by index and keeps a non-owning index back to
//! its parent, so the walker can ask "what encloses this call" without
//! holding tree-sitter cursors.
//!
//! Only the node shapes the log remover inspects get their own
//! [`NodeKind`] variant. Everything else is [`NodeKind::Other`] carrying the
//! grammar's kind name.
//!
//! Two grammar nodes are transparent in the arena:
//! - `parenthesized_expression` with a single inner expression: the inner
//!   expression is attached to the enclosing node instead.
//! - the `arguments` list of a call: each argument is a direct child of
//!   the call.
//!
//! Comments and anonymous tokens are not lowered.

use compact_str::CompactString;
use smallvec::SmallVec;
use tree_sitter::{Node, Tree};

/// Half-open byte range `[start, end)` into the source text
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Span {
    pub start: usize,
    pub end: usize,
}

impl Span {
    pub fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }

    pub fn len(&self) -> usize {
        self.end.saturating_sub(self.start)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// True if `other` lies entirely inside this span (equal spans included)
    pub fn contains(&self, other: &Span) -> bool {
        self.start <= other.start && other.end <= self.end
    }

    /// Slice the span out of `text`, if it is in bounds and on char boundaries
    pub fn slice<'a>(&self, text: &'a str) -> Option<&'a str> {
        if self.start > self.end {
            return None;
        }
        text.get(self.start..self.end)
    }
}

/// Index of a node in a [`SyntaxTree`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct NodeId(u32);

impl NodeId {
    fn index(self) -> usize {
        self.0 as usize
    }
}

/// Node shapes the log remover distinguishes
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NodeKind {
    /// `callee(arguments...)`
    Call {
        callee: NodeId,
        arguments: SmallVec<[NodeId; 4]>,
    },
    /// `object.property` or `object?.property`
    Member {
        object: NodeId,
        property: NodeId,
        optional: bool,
    },
    /// Plain identifier or property name
    Identifier(CompactString),
    /// Arrow function; `body` is the expression or block after `=>`
    Arrow { body: Option<NodeId> },
    /// Expression used as a statement, terminator included
    ExpressionStatement,
    /// Comma-operator list
    Sequence,
    /// Any other grammar node, by tree-sitter kind name
    Other(&'static str),
}

/// One node of the arena
#[derive(Debug, Clone)]
pub struct SyntaxNode {
    pub kind: NodeKind,
    /// Absent for synthetic nodes, which are never edited
    pub span: Option<Span>,
    pub parent: Option<NodeId>,
    pub children: SmallVec<[NodeId; 4]>,
}

/// Arena-allocated syntax tree
#[derive(Debug, Clone)]
pub struct SyntaxTree {
    nodes: Vec<SyntaxNode>,
}

impl SyntaxTree {
    /// Create a tree holding only a root node
    pub fn new(root_kind: NodeKind, root_span: Option<Span>) -> Self {
        Self {
            nodes: vec![SyntaxNode {
                kind: root_kind,
                span: root_span,
                parent: None,
                children: SmallVec::new(),
            }],
        }
    }

    /// Lower a parsed tree-sitter tree over `source`
    ///
    /// Nodes are created from a worklist in pre-order, so nesting depth is
    /// bounded by the heap rather than the call stack. Shapes that depend on
    /// field children are settled in a second pass over the arena.
    pub fn lower(tree: &Tree, source: &str) -> Self {
        let root = tree.root_node();
        let mut arena = Self::new(NodeKind::Other(root.kind()), span_of(root));
        let mut fields = vec![Fields::default()];
        let mut pending = Vec::new();
        push_children(root, arena.root(), &mut fields[0], &mut pending);

        while let Some(Pending { node, parent, slot }) = pending.pop() {
            if node.is_extra() || !node.is_named() {
                continue;
            }
            if node.kind() == "parenthesized_expression" {
                if let Some(inner) = sole_named_child(node) {
                    pending.push(Pending {
                        node: inner,
                        parent,
                        slot,
                    });
                    continue;
                }
            }

            let kind = match node.kind() {
                "identifier" | "property_identifier" => match node.utf8_text(source.as_bytes()) {
                    Ok(text) => NodeKind::Identifier(CompactString::new(text)),
                    Err(_) => NodeKind::Other(node.kind()),
                },
                other => NodeKind::Other(other),
            };
            let id = arena.push(kind, span_of(node), parent);
            fields[parent.index()].record(slot, id);

            let mut own = Fields::default();
            push_children(node, id, &mut own, &mut pending);
            fields.push(own);
        }

        for (index, node_fields) in fields.into_iter().enumerate() {
            let id = NodeId(index as u32);
            let name = match arena.kind(id) {
                NodeKind::Other(name) => *name,
                _ => continue,
            };
            if let Some(kind) = node_fields.settle(name) {
                arena.set_kind(id, kind);
            }
        }

        tracing::trace!(nodes = arena.len(), "Lowered syntax tree");
        arena
    }

    pub fn root(&self) -> NodeId {
        NodeId(0)
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn node(&self, id: NodeId) -> &SyntaxNode {
        &self.nodes[id.index()]
    }

    pub fn kind(&self, id: NodeId) -> &NodeKind {
        &self.node(id).kind
    }

    pub fn span(&self, id: NodeId) -> Option<Span> {
        self.node(id).span
    }

    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.node(id).parent
    }

    /// Append a node under `parent` and return its id
    pub fn push(&mut self, kind: NodeKind, span: Option<Span>, parent: NodeId) -> NodeId {
        let id = NodeId(self.nodes.len() as u32);
        self.nodes.push(SyntaxNode {
            kind,
            span,
            parent: Some(parent),
            children: SmallVec::new(),
        });
        self.nodes[parent.index()].children.push(id);
        id
    }

    /// Replace the kind of an existing node
    pub fn set_kind(&mut self, id: NodeId, kind: NodeKind) {
        self.nodes[id.index()].kind = kind;
    }

    /// Iterate all nodes in pre-order (parents before children, children in source order)
    pub fn pre_order(&self) -> PreOrder<'_> {
        PreOrder {
            tree: self,
            stack: vec![self.root()],
        }
    }
}

/// Where a lowered node attaches to its parent's shape
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Slot {
    Function,
    Argument,
    Object,
    Property,
    Body,
    Plain,
}

impl Slot {
    fn of_field(field: Option<&str>) -> Self {
        match field {
            Some("function") => Self::Function,
            Some("object") => Self::Object,
            Some("property") => Self::Property,
            Some("body") => Self::Body,
            _ => Self::Plain,
        }
    }
}

/// A tree-sitter node waiting to be lowered under `parent`
struct Pending<'t> {
    node: Node<'t>,
    parent: NodeId,
    slot: Slot,
}

/// Field children collected while lowering one node
#[derive(Default)]
struct Fields {
    function: Option<NodeId>,
    arguments: SmallVec<[NodeId; 4]>,
    object: Option<NodeId>,
    property: Option<NodeId>,
    body: Option<NodeId>,
    optional: bool,
    tagged: bool,
}

impl Fields {
    fn record(&mut self, slot: Slot, id: NodeId) {
        match slot {
            Slot::Function => self.function = Some(id),
            Slot::Argument => self.arguments.push(id),
            Slot::Object => self.object = Some(id),
            Slot::Property => self.property = Some(id),
            Slot::Body => self.body = Some(id),
            Slot::Plain => {}
        }
    }

    /// Final kind of a node named `name`, or `None` to keep `Other(name)`
    fn settle(self, name: &'static str) -> Option<NodeKind> {
        let kind = match name {
            "call_expression" => match self.function {
                // Optional calls and tagged templates are not plain calls
                Some(callee) if !self.optional && !self.tagged => NodeKind::Call {
                    callee,
                    arguments: self.arguments,
                },
                _ => return None,
            },
            "member_expression" => match (self.object, self.property) {
                (Some(object), Some(property)) => NodeKind::Member {
                    object,
                    property,
                    optional: self.optional,
                },
                _ => return None,
            },
            "arrow_function" => NodeKind::Arrow { body: self.body },
            "expression_statement" => NodeKind::ExpressionStatement,
            "sequence_expression" => NodeKind::Sequence,
            _ => return None,
        };
        Some(kind)
    }
}

/// Queue the children of `node` (lowered as `id`) in source order, noting
/// flags that belong to `node` itself in `fields`
fn push_children<'t>(
    node: Node<'t>,
    id: NodeId,
    fields: &mut Fields,
    pending: &mut Vec<Pending<'t>>,
) {
    let mut queued = Vec::new();
    let mut cursor = node.walk();
    if cursor.goto_first_child() {
        loop {
            let child = cursor.node();
            let field = cursor.field_name();

            if child.kind() == "optional_chain" {
                fields.optional = true;
            } else if field == Some("arguments") && child.kind() == "arguments" {
                let mut args = child.walk();
                queued.extend(child.named_children(&mut args).map(|arg| Pending {
                    node: arg,
                    parent: id,
                    slot: Slot::Argument,
                }));
            } else {
                if field == Some("arguments") {
                    fields.tagged = true;
                }
                queued.push(Pending {
                    node: child,
                    parent: id,
                    slot: Slot::of_field(field),
                });
            }

            if !cursor.goto_next_sibling() {
                break;
            }
        }
    }
    // Popped from the back, so the first child is lowered first
    pending.extend(queued.into_iter().rev());
}

/// Pre-order iterator over a [`SyntaxTree`]
pub struct PreOrder<'a> {
    tree: &'a SyntaxTree,
    stack: Vec<NodeId>,
}

impl Iterator for PreOrder<'_> {
    type Item = NodeId;

    fn next(&mut self) -> Option<NodeId> {
        let id = self.stack.pop()?;
        self.stack
            .extend(self.tree.node(id).children.iter().rev().copied());
        Some(id)
    }
}

fn span_of(node: Node<'_>) -> Option<Span> {
    if node.is_missing() {
        return None;
    }
    Some(Span::new(node.start_byte(), node.end_byte()))
}

/// The only named, non-comment child of `node`, if there is exactly one
fn sole_named_child(node: Node<'_>) -> Option<Node<'_>> {
    let mut cursor = node.walk();
    let mut named = node
        .named_children(&mut cursor)
        .filter(|child| !child.is_extra());
    let first = named.next()?;
    if named.next().is_some() {
        return None;
    }
    Some(first)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parse::treesitter;

    fn lower(source: &str) -> SyntaxTree {
        let tree = treesitter::parse(source).unwrap();
        SyntaxTree::lower(&tree, source)
    }

    fn calls(tree: &SyntaxTree) -> Vec<NodeId> {
        tree.pre_order()
            .filter(|&id| matches!(tree.kind(id), NodeKind::Call { .. }))
            .collect()
    }

    #[test]
    fn test_span_helpers() {
        let span = Span::new(2, 5);
        assert_eq!(span.len(), 3);
        assert!(span.contains(&Span::new(2, 5)));
        assert!(span.contains(&Span::new(3, 4)));
        assert!(!span.contains(&Span::new(1, 4)));
        assert_eq!(span.slice("abcdefg"), Some("cde"));
        assert_eq!(Span::new(5, 9).slice("abcdefg"), None);
    }

    #[test]
    fn test_call_shape() {
        let source = "console.log(a, b());";
        let tree = lower(source);
        let found = calls(&tree);
        assert_eq!(found.len(), 2);

        let NodeKind::Call { callee, arguments } = tree.kind(found[0]) else {
            panic!("expected call");
        };
        assert_eq!(arguments.len(), 2);
        assert!(matches!(
            tree.kind(*callee),
            NodeKind::Member { optional: false, .. }
        ));
        // Arguments hang directly off the call
        assert_eq!(tree.parent(arguments[1]), Some(found[0]));
        assert_eq!(
            tree.span(found[0]).and_then(|s| s.slice(source)),
            Some("console.log(a, b())")
        );
    }

    #[test]
    fn test_statement_encloses_call_with_terminator() {
        let source = "console.log(1);";
        let tree = lower(source);
        let call = calls(&tree)[0];
        let parent = tree.parent(call).unwrap();
        assert_eq!(tree.kind(parent), &NodeKind::ExpressionStatement);
        assert_eq!(tree.span(parent), Some(Span::new(0, source.len())));
    }

    #[test]
    fn test_parentheses_are_transparent() {
        let tree = lower("const f = () => (g(1));");
        let call = calls(&tree)[0];
        let parent = tree.parent(call).unwrap();
        assert_eq!(tree.kind(parent), &NodeKind::Arrow { body: Some(call) });
    }

    #[test]
    fn test_optional_call_and_member() {
        let tree = lower("a?.b(); c.d?.();");
        let members: Vec<_> = tree
            .pre_order()
            .filter_map(|id| match tree.kind(id) {
                NodeKind::Member { optional, .. } => Some(*optional),
                _ => None,
            })
            .collect();
        assert!(members.contains(&true));
        // `c.d?.()` is an optional call, so only `a?.b()` stays a plain call
        assert_eq!(calls(&tree).len(), 1);
    }

    #[test]
    fn test_tagged_template_is_not_a_call() {
        let tree = lower("tag`x ${y}`;");
        assert!(calls(&tree).is_empty());
    }

    #[test]
    fn test_comments_are_not_lowered() {
        let tree = lower("// hello\nfoo(); /* x */");
        assert!(tree
            .pre_order()
            .all(|id| tree.kind(id) != &NodeKind::Other("comment")));
    }

    #[test]
    fn test_pre_order_visits_parents_first() {
        let tree = lower("outer(inner());");
        let found = calls(&tree);
        assert_eq!(found.len(), 2);
        assert_eq!(tree.parent(found[1]), Some(found[0]));
    }

    #[test]
    fn test_arguments_keep_source_order() {
        let source = "f(a(), (b()), /* c */ d);";
        let tree = lower(source);
        let NodeKind::Call { arguments, .. } = tree.kind(calls(&tree)[0]) else {
            panic!("expected call");
        };
        let texts: Vec<_> = arguments
            .iter()
            .map(|&id| tree.span(id).and_then(|s| s.slice(source)).unwrap())
            .collect();
        assert_eq!(texts, ["a()", "b()", "d"]);
    }

    #[test]
    fn test_deep_nesting_lowers_without_recursion() {
        let depth = 50_000;
        let source = format!("{}console.log(1){};", "f(".repeat(depth), ")".repeat(depth));
        let tree = lower(&source);

        let found = calls(&tree);
        assert_eq!(found.len(), depth + 1);
        let innermost = *found.last().unwrap();
        assert_eq!(
            tree.span(innermost).and_then(|s| s.slice(&source)),
            Some("console.log(1)")
        );
        assert_eq!(tree.parent(innermost), Some(found[depth - 1]));
    }

    #[test]
    fn test_push_builds_synthetic_nodes() {
        let mut tree = SyntaxTree::new(NodeKind::Other("program"), None);
        let root = tree.root();
        let id = tree.push(NodeKind::Identifier("console".into()), None, root);
        assert_eq!(tree.parent(id), Some(root));
        assert_eq!(tree.span(id), None);
        assert_eq!(tree.node(root).children.as_slice(), &[id]);
    }
}
