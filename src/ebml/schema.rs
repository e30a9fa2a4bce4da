// Declarative EBML element schema
//
// A schema is a static table of element IDs. Each entry is either a
// container with its own child table or a leaf with a value type. IDs not
// listed in a table are skipped by the parser.

/// Value type of a leaf element.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueType {
    UnsignedInt,
    String,
    Binary,
    Float,
    Flag,
    Uid,
}

/// What an element ID maps to.
#[derive(Debug, Clone, Copy)]
pub enum NodeKind {
    Container(SchemaTree),
    Leaf(ValueType),
}

/// One schema entry.
#[derive(Debug, Clone, Copy)]
pub struct SchemaNode {
    pub id: u64,
    pub name: &'static str,
    pub kind: NodeKind,
    pub repeatable: bool,
}

impl SchemaNode {
    pub const fn container(id: u64, name: &'static str, children: &'static [SchemaNode]) -> Self {
        SchemaNode {
            id,
            name,
            kind: NodeKind::Container(SchemaTree::new(children)),
            repeatable: false,
        }
    }

    pub const fn leaf(id: u64, name: &'static str, value_type: ValueType) -> Self {
        SchemaNode {
            id,
            name,
            kind: NodeKind::Leaf(value_type),
            repeatable: false,
        }
    }

    /// Mark the entry as repeatable; occurrences collect in document order.
    pub const fn repeated(mut self) -> Self {
        self.repeatable = true;
        self
    }
}

/// Immutable element table for one container level.
#[derive(Debug, Clone, Copy)]
pub struct SchemaTree {
    nodes: &'static [SchemaNode],
}

impl SchemaTree {
    pub const fn new(nodes: &'static [SchemaNode]) -> Self {
        SchemaTree { nodes }
    }

    /// Find the entry for `id`.
    pub fn lookup(&self, id: u64) -> Option<&'static SchemaNode> {
        self.nodes.iter().find(|node| node.id == id)
    }

    pub fn nodes(&self) -> &'static [SchemaNode] {
        self.nodes
    }
}
