pub type NodeIndex = u32;

/// Handle to a slot in a [`Document`] arena.
///
/// Handles stay valid for the lifetime of the document. A detached node keeps
/// its slot; it simply has no parent and is unreachable from the root.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub(crate) NodeIndex);

impl NodeId {
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Token {
    Doctype(String),
    StartTag {
        name: String,
        attributes: Vec<(String, Option<String>)>,
        self_closing: bool,
    },
    EndTag(String),
    Comment(String),
    Text(String),
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ElementData {
    pub name: String,
    pub attributes: Vec<(String, Option<String>)>,
    pub style: Vec<(String, String)>,
}

impl ElementData {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            attributes: Vec::new(),
            style: Vec::new(),
        }
    }

    pub fn is(&self, name: &str) -> bool {
        self.name.eq_ignore_ascii_case(name)
    }

    pub fn attr(&self, key: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(key))
            .and_then(|(_, v)| v.as_deref())
    }

    pub fn has_attr(&self, key: &str) -> bool {
        self.attributes.iter().any(|(k, _)| k.eq_ignore_ascii_case(key))
    }

    pub fn class_names(&self) -> impl Iterator<Item = &str> {
        self.attr("class").unwrap_or("").split_ascii_whitespace()
    }

    pub fn has_class(&self, class: &str) -> bool {
        self.class_names().any(|c| c == class)
    }

    /// Value of an inline style property. Property names are stored lowercased.
    pub fn style(&self, property: &str) -> Option<&str> {
        self.style
            .iter()
            .rev()
            .find(|(k, _)| k.eq_ignore_ascii_case(property))
            .map(|(_, v)| v.as_str())
    }

    pub fn has_style(&self, property: &str) -> bool {
        self.style(property).is_some()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NodeKind {
    Fragment,
    Element(ElementData),
    Text(String),
}

#[derive(Debug, Clone)]
pub(crate) struct Slot {
    pub(crate) kind: NodeKind,
    pub(crate) parent: Option<NodeId>,
    pub(crate) children: Vec<NodeId>,
}

/// Arena-backed node tree.
///
/// Every node has at most one parent and appears in exactly one parent's child
/// list. Parent links are kept for traversal only; ownership is the arena's.
/// Structural changes go through [`crate::TreeWriter`].
#[derive(Debug, Clone)]
pub struct Document {
    pub(crate) slots: Vec<Slot>,
    root: NodeId,
}

impl Default for Document {
    fn default() -> Self {
        Self::new_fragment()
    }
}

impl Document {
    pub fn new_fragment() -> Self {
        Self {
            slots: vec![Slot {
                kind: NodeKind::Fragment,
                parent: None,
                children: Vec::new(),
            }],
            root: NodeId(0),
        }
    }

    pub fn root(&self) -> NodeId {
        self.root
    }

    pub(crate) fn alloc(&mut self, kind: NodeKind) -> NodeId {
        let id = NodeId(self.slots.len() as NodeIndex);
        self.slots.push(Slot {
            kind,
            parent: None,
            children: Vec::new(),
        });
        id
    }

    pub(crate) fn slot(&self, id: NodeId) -> &Slot {
        &self.slots[id.index()]
    }

    pub(crate) fn slot_mut(&mut self, id: NodeId) -> &mut Slot {
        &mut self.slots[id.index()]
    }

    pub fn kind(&self, id: NodeId) -> &NodeKind {
        &self.slot(id).kind
    }

    pub fn element(&self, id: NodeId) -> Option<&ElementData> {
        match &self.slot(id).kind {
            NodeKind::Element(data) => Some(data),
            _ => None,
        }
    }

    pub fn text(&self, id: NodeId) -> Option<&str> {
        match &self.slot(id).kind {
            NodeKind::Text(text) => Some(text),
            _ => None,
        }
    }

    pub fn is_element(&self, id: NodeId) -> bool {
        self.element(id).is_some()
    }

    pub fn is_text(&self, id: NodeId) -> bool {
        self.text(id).is_some()
    }

    /// True when `id` is an element whose name matches `name` (ASCII case-insensitive).
    pub fn is_named(&self, id: NodeId, name: &str) -> bool {
        self.element(id).is_some_and(|e| e.is(name))
    }

    pub fn name(&self, id: NodeId) -> Option<&str> {
        self.element(id).map(|e| e.name.as_str())
    }

    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.slot(id).parent
    }

    pub fn children(&self, id: NodeId) -> &[NodeId] {
        &self.slot(id).children
    }

    pub fn child_count(&self, id: NodeId) -> usize {
        self.slot(id).children.len()
    }

    pub fn first_child(&self, id: NodeId) -> Option<NodeId> {
        self.slot(id).children.first().copied()
    }

    pub fn last_child(&self, id: NodeId) -> Option<NodeId> {
        self.slot(id).children.last().copied()
    }

    pub fn child_index(&self, id: NodeId) -> Option<usize> {
        let parent = self.parent(id)?;
        self.children(parent).iter().position(|&c| c == id)
    }

    pub fn previous_sibling(&self, id: NodeId) -> Option<NodeId> {
        let parent = self.parent(id)?;
        let index = self.child_index(id)?;
        index
            .checked_sub(1)
            .map(|i| self.children(parent)[i])
    }

    pub fn next_sibling(&self, id: NodeId) -> Option<NodeId> {
        let parent = self.parent(id)?;
        let index = self.child_index(id)?;
        self.children(parent).get(index + 1).copied()
    }

    /// True when `ancestor` is `node` or contains it.
    pub fn contains(&self, ancestor: NodeId, node: NodeId) -> bool {
        let mut current = Some(node);
        while let Some(id) = current {
            if id == ancestor {
                return true;
            }
            current = self.parent(id);
        }
        false
    }

    /// True when the node is reachable from the root.
    pub fn is_attached(&self, id: NodeId) -> bool {
        self.contains(self.root, id)
    }

    pub fn attr(&self, id: NodeId, key: &str) -> Option<&str> {
        self.element(id).and_then(|e| e.attr(key))
    }

    pub fn style(&self, id: NodeId, property: &str) -> Option<&str> {
        self.element(id).and_then(|e| e.style(property))
    }

    /// Concatenated text of all descendant text nodes.
    pub fn text_content(&self, id: NodeId) -> String {
        let mut out = String::new();
        for node in crate::traverse::descendants(self, id) {
            if let Some(text) = self.text(node) {
                out.push_str(text);
            }
        }
        out
    }

    /// Copy the given top-level nodes (and their subtrees) into a fresh fragment.
    pub fn extract(&self, nodes: &[NodeId]) -> Document {
        let mut out = Document::new_fragment();
        let out_root = out.root();
        let mut stack: Vec<(NodeId, NodeId)> = nodes.iter().rev().map(|&n| (n, out_root)).collect();
        while let Some((source, parent)) = stack.pop() {
            let kind = match self.kind(source) {
                NodeKind::Fragment => continue,
                kind => kind.clone(),
            };
            let copy = out.alloc(kind);
            out.slot_mut(parent).children.push(copy);
            out.slot_mut(copy).parent = Some(parent);
            stack.extend(self.children(source).iter().rev().map(|&c| (c, copy)));
        }
        out
    }
}
