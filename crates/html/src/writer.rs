use crate::types::{Document, ElementData, NodeId, NodeKind};

/// The single place where a [`Document`] is structurally mutated.
///
/// Invariants kept here:
/// - a node appears in at most one child list, and its parent link names that list's owner;
/// - the tree stays acyclic (a node is never inserted into itself or a descendant);
/// - the root is never detached.
///
/// Requests that would break an invariant are rejected with a debug assertion and
/// otherwise ignored.
pub struct TreeWriter<'a> {
    doc: &'a mut Document,
}

impl<'a> TreeWriter<'a> {
    pub fn new(doc: &'a mut Document) -> Self {
        Self { doc }
    }

    pub fn document(&self) -> &Document {
        self.doc
    }

    // Creation

    pub fn create_element(&mut self, name: &str) -> NodeId {
        self.doc
            .alloc(NodeKind::Element(ElementData::new(name.to_ascii_lowercase())))
    }

    pub fn create_element_with(
        &mut self,
        name: &str,
        attributes: Vec<(String, Option<String>)>,
    ) -> NodeId {
        let mut data = ElementData::new(name.to_ascii_lowercase());
        data.attributes = attributes;
        self.doc.alloc(NodeKind::Element(data))
    }

    pub fn create_text(&mut self, text: impl Into<String>) -> NodeId {
        self.doc.alloc(NodeKind::Text(text.into()))
    }

    // Structure

    /// Detach `node` from its parent. The node and its subtree stay in the arena.
    pub fn remove(&mut self, node: NodeId) {
        if node == self.doc.root() {
            debug_assert!(false, "cannot detach the document root");
            return;
        }
        let Some(parent) = self.doc.slot(node).parent else {
            return;
        };
        self.doc.slot_mut(parent).children.retain(|&c| c != node);
        self.doc.slot_mut(node).parent = None;
    }

    pub fn remove_all(&mut self, nodes: &[NodeId]) {
        for &node in nodes {
            self.remove(node);
        }
    }

    /// Insert `child` at `index` in `parent`'s children, moving it from any previous parent.
    /// `index` is clamped to the child count after detaching.
    pub fn insert_child(&mut self, index: usize, child: NodeId, parent: NodeId) {
        if !self.can_adopt(child, parent) {
            return;
        }
        self.remove(child);
        let children = &mut self.doc.slot_mut(parent).children;
        let index = index.min(children.len());
        children.insert(index, child);
        self.doc.slot_mut(child).parent = Some(parent);
    }

    /// Insert several nodes starting at `index`, preserving their relative order.
    pub fn insert_children(&mut self, index: usize, nodes: &[NodeId], parent: NodeId) {
        let mut at = index;
        for &node in nodes {
            // Moving a node that already sits before `at` in the same parent shifts the tail.
            if self.doc.parent(node) == Some(parent)
                && self.doc.child_index(node).is_some_and(|i| i < at)
            {
                at -= 1;
            }
            self.insert_child(at, node, parent);
            at += 1;
        }
    }

    pub fn append_child(&mut self, child: NodeId, parent: NodeId) {
        if !self.can_adopt(child, parent) {
            return;
        }
        self.remove(child);
        self.doc.slot_mut(parent).children.push(child);
        self.doc.slot_mut(child).parent = Some(parent);
    }

    /// Insert `node` right after `reference` within the reference's parent.
    pub fn insert_after(&mut self, node: NodeId, reference: NodeId) {
        let Some(parent) = self.doc.parent(reference) else {
            return;
        };
        self.remove(node);
        let Some(index) = self.doc.child_index(reference) else {
            return;
        };
        self.insert_child(index + 1, node, parent);
    }

    pub fn insert_before(&mut self, node: NodeId, reference: NodeId) {
        let Some(parent) = self.doc.parent(reference) else {
            return;
        };
        self.remove(node);
        let Some(index) = self.doc.child_index(reference) else {
            return;
        };
        self.insert_child(index, node, parent);
    }

    /// Put `new` where `old` is and detach `old`.
    pub fn replace(&mut self, old: NodeId, new: NodeId) {
        let (Some(parent), Some(index)) = (self.doc.parent(old), self.doc.child_index(old)) else {
            return;
        };
        self.remove(old);
        self.insert_child(index, new, parent);
    }

    /// Replace `element` with its children.
    pub fn unwrap(&mut self, element: NodeId) {
        let (Some(parent), Some(index)) = (self.doc.parent(element), self.doc.child_index(element))
        else {
            return;
        };
        let children = self.doc.children(element).to_vec();
        self.remove(element);
        self.insert_children(index, &children, parent);
    }

    /// Move every child of `from` to the end of `to`.
    pub fn move_children(&mut self, from: NodeId, to: NodeId) {
        for child in self.doc.children(from).to_vec() {
            self.append_child(child, to);
        }
    }

    // Content

    pub fn rename(&mut self, element: NodeId, name: &str) {
        if let Some(data) = self.element_mut(element) {
            data.name = name.to_ascii_lowercase();
        }
    }

    pub fn set_text(&mut self, node: NodeId, text: impl Into<String>) {
        if let NodeKind::Text(current) = &mut self.doc.slot_mut(node).kind {
            *current = text.into();
        }
    }

    pub fn set_attribute(&mut self, element: NodeId, key: &str, value: impl Into<String>) {
        let value = value.into();
        if let Some(data) = self.element_mut(element) {
            match data
                .attributes
                .iter_mut()
                .find(|(k, _)| k.eq_ignore_ascii_case(key))
            {
                Some((_, v)) => *v = Some(value),
                None => data.attributes.push((key.to_ascii_lowercase(), Some(value))),
            }
        }
    }

    pub fn remove_attribute(&mut self, element: NodeId, key: &str) {
        if let Some(data) = self.element_mut(element) {
            data.attributes.retain(|(k, _)| !k.eq_ignore_ascii_case(key));
        }
    }

    pub fn set_style(&mut self, element: NodeId, property: &str, value: impl Into<String>) {
        let value = value.into();
        if let Some(data) = self.element_mut(element) {
            let property = property.to_ascii_lowercase();
            match data.style.iter().position(|(k, _)| *k == property) {
                Some(index) => {
                    data.style[index].1 = value;
                    let mut seen = false;
                    data.style.retain(|(k, _)| {
                        if *k != property {
                            return true;
                        }
                        let keep = !seen;
                        seen = true;
                        keep
                    });
                }
                None => data.style.push((property, value)),
            }
        }
    }

    pub fn remove_style(&mut self, element: NodeId, property: &str) {
        if let Some(data) = self.element_mut(element) {
            data.style.retain(|(k, _)| !k.eq_ignore_ascii_case(property));
        }
    }

    pub fn add_class(&mut self, element: NodeId, class: &str) {
        let Some(data) = self.doc.element(element) else {
            return;
        };
        if data.has_class(class) {
            return;
        }
        let mut classes: Vec<&str> = data.class_names().collect();
        classes.push(class);
        let joined = classes.join(" ");
        self.set_attribute(element, "class", joined);
    }

    pub fn remove_class(&mut self, element: NodeId, class: &str) {
        let Some(data) = self.doc.element(element) else {
            return;
        };
        let remaining: Vec<&str> = data.class_names().filter(|c| *c != class).collect();
        if remaining.is_empty() {
            self.remove_attribute(element, "class");
        } else {
            let joined = remaining.join(" ");
            self.set_attribute(element, "class", joined);
        }
    }

    fn element_mut(&mut self, id: NodeId) -> Option<&mut ElementData> {
        match &mut self.doc.slot_mut(id).kind {
            NodeKind::Element(data) => Some(data),
            _ => None,
        }
    }

    fn can_adopt(&self, child: NodeId, parent: NodeId) -> bool {
        if matches!(self.doc.kind(parent), NodeKind::Text(_)) {
            debug_assert!(false, "text nodes cannot have children");
            return false;
        }
        if child == self.doc.root() || self.doc.contains(child, parent) {
            debug_assert!(false, "insertion would create a cycle");
            return false;
        }
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::to_html;

    fn fragment_with(names: &[&str]) -> (Document, Vec<NodeId>) {
        let mut doc = Document::new_fragment();
        let root = doc.root();
        let mut ids = Vec::new();
        let mut writer = TreeWriter::new(&mut doc);
        for name in names {
            let id = writer.create_element(name);
            writer.append_child(id, root);
            ids.push(id);
        }
        (doc, ids)
    }

    #[test]
    fn append_moves_node_between_parents() {
        let (mut doc, ids) = fragment_with(&["div", "p"]);
        let mut writer = TreeWriter::new(&mut doc);
        writer.append_child(ids[1], ids[0]);

        assert_eq!(doc.parent(ids[1]), Some(ids[0]));
        assert_eq!(doc.children(doc.root()), &[ids[0]]);
        assert_eq!(to_html(&doc), "<div><p></p></div>");
    }

    #[test]
    fn unwrap_splices_children_in_place() {
        let (mut doc, ids) = fragment_with(&["p", "b", "p"]);
        let mut writer = TreeWriter::new(&mut doc);
        let text = writer.create_text("x");
        let span = writer.create_element("span");
        writer.append_child(text, ids[1]);
        writer.append_child(span, ids[1]);
        writer.unwrap(ids[1]);

        assert_eq!(to_html(&doc), "<p></p>x<span></span><p></p>");
        assert_eq!(doc.parent(ids[1]), None);
    }

    #[test]
    fn insert_children_keeps_order_when_moving_within_parent() {
        let (mut doc, ids) = fragment_with(&["a", "b", "c", "d"]);
        let root = doc.root();
        let mut writer = TreeWriter::new(&mut doc);
        writer.insert_children(3, &[ids[0], ids[1]], root);

        assert_eq!(to_html(&doc), "<c></c><a></a><b></b><d></d>");
    }

    #[test]
    fn replace_puts_new_node_at_old_position() {
        let (mut doc, ids) = fragment_with(&["p", "br", "p"]);
        let mut writer = TreeWriter::new(&mut doc);
        let para = writer.create_element("p");
        writer.replace(ids[1], para);

        assert_eq!(to_html(&doc), "<p></p><p></p><p></p>");
        assert_eq!(doc.parent(ids[1]), None);
    }

    #[test]
    #[cfg(not(debug_assertions))]
    fn cycle_creating_append_is_ignored() {
        let (mut doc, ids) = fragment_with(&["div"]);
        let mut writer = TreeWriter::new(&mut doc);
        let inner = writer.create_element("span");
        writer.append_child(inner, ids[0]);
        writer.append_child(ids[0], inner);
        assert_eq!(doc.parent(inner), Some(ids[0]));
    }

    #[test]
    fn style_and_class_edits() {
        let (mut doc, ids) = fragment_with(&["p"]);
        let mut writer = TreeWriter::new(&mut doc);
        writer.set_style(ids[0], "Margin-Left", "10px");
        writer.set_style(ids[0], "margin-left", "12px");
        writer.add_class(ids[0], "one");
        writer.add_class(ids[0], "two");
        writer.add_class(ids[0], "one");
        writer.remove_class(ids[0], "one");

        assert_eq!(doc.style(ids[0], "margin-left"), Some("12px"));
        assert_eq!(doc.attr(ids[0], "class"), Some("two"));
    }
}
