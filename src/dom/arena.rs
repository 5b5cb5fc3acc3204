//! Arena-based DOM for HTML parsing.
//!
//! Nodes are stored in one `Vec` and refer to each other by index. Each node
//! knows its parent, its first and last child, and its two siblings, so html5ever
//! can splice nodes anywhere while the tree is built and every later pass can
//! walk children in source order without extra allocation.

use html5ever::QualName;

/// Index of a node in its [`ArenaDom`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ArenaNodeId(pub u32);

impl ArenaNodeId {
    /// Null link.
    pub const NONE: ArenaNodeId = ArenaNodeId(u32::MAX);

    pub fn is_some(&self) -> bool {
        *self != Self::NONE
    }

    pub fn is_none(&self) -> bool {
        *self == Self::NONE
    }
}

/// Node kinds the HTML tree builder can produce.
#[derive(Debug, Clone)]
pub enum ArenaNodeData {
    Document,
    /// Attributes are kept in source order.
    Element {
        name: QualName,
        attrs: Vec<Attribute>,
    },
    Text(String),
    Comment(String),
    Doctype {
        name: String,
        public_id: String,
        system_id: String,
    },
    ProcessingInstruction {
        target: String,
        data: String,
    },
}

/// One `name="value"` pair of an element.
#[derive(Debug, Clone)]
pub struct Attribute {
    pub name: QualName,
    pub value: String,
}

/// Node payload plus its tree links.
#[derive(Debug)]
pub struct ArenaNode {
    pub data: ArenaNodeData,
    pub parent: ArenaNodeId,
    pub first_child: ArenaNodeId,
    pub last_child: ArenaNodeId,
    pub prev_sibling: ArenaNodeId,
    pub next_sibling: ArenaNodeId,
}

impl From<ArenaNodeData> for ArenaNode {
    fn from(data: ArenaNodeData) -> Self {
        Self {
            data,
            parent: ArenaNodeId::NONE,
            first_child: ArenaNodeId::NONE,
            last_child: ArenaNodeId::NONE,
            prev_sibling: ArenaNodeId::NONE,
            next_sibling: ArenaNodeId::NONE,
        }
    }
}

/// Document tree whose nodes live in a single arena.
///
/// Nodes are never freed. A node the tree builder removes is only unlinked,
/// so ids stay valid for the lifetime of the DOM.
pub struct ArenaDom {
    nodes: Vec<ArenaNode>,
}

impl ArenaDom {
    /// A DOM holding only the document node, at index 0.
    pub fn new() -> Self {
        Self {
            nodes: vec![ArenaNode::from(ArenaNodeData::Document)],
        }
    }

    pub fn document(&self) -> ArenaNodeId {
        ArenaNodeId(0)
    }

    pub fn get(&self, id: ArenaNodeId) -> Option<&ArenaNode> {
        self.nodes.get(usize::try_from(id.0).ok()?)
    }

    pub fn get_mut(&mut self, id: ArenaNodeId) -> Option<&mut ArenaNode> {
        self.nodes.get_mut(usize::try_from(id.0).ok()?)
    }

    fn push(&mut self, data: ArenaNodeData) -> ArenaNodeId {
        let id = ArenaNodeId(self.nodes.len() as u32);
        self.nodes.push(ArenaNode::from(data));
        id
    }

    /// Allocate an element that is not yet linked into the tree.
    pub fn create_element(&mut self, name: QualName, attrs: Vec<Attribute>) -> ArenaNodeId {
        self.push(ArenaNodeData::Element { name, attrs })
    }

    pub fn create_text(&mut self, text: String) -> ArenaNodeId {
        self.push(ArenaNodeData::Text(text))
    }

    pub fn create_comment(&mut self, text: String) -> ArenaNodeId {
        self.push(ArenaNodeData::Comment(text))
    }

    pub fn create_doctype(
        &mut self,
        name: String,
        public_id: String,
        system_id: String,
    ) -> ArenaNodeId {
        self.push(ArenaNodeData::Doctype {
            name,
            public_id,
            system_id,
        })
    }

    pub fn create_pi(&mut self, target: String, data: String) -> ArenaNodeId {
        self.push(ArenaNodeData::ProcessingInstruction { target, data })
    }

    /// Link `child` as the new last child of `parent`.
    pub fn append(&mut self, parent: ArenaNodeId, child: ArenaNodeId) {
        let Some(prev) = self.get(parent).map(|p| p.last_child) else {
            return;
        };

        if let Some(node) = self.get_mut(child) {
            node.parent = parent;
            node.prev_sibling = prev;
            node.next_sibling = ArenaNodeId::NONE;
        }
        match self.get_mut(prev) {
            Some(prev_node) => prev_node.next_sibling = child,
            None => {
                if let Some(p) = self.get_mut(parent) {
                    p.first_child = child;
                }
            }
        }
        if let Some(p) = self.get_mut(parent) {
            p.last_child = child;
        }
    }

    /// Link `new_node` directly in front of `sibling`, under the same parent.
    pub fn insert_before(&mut self, sibling: ArenaNodeId, new_node: ArenaNodeId) {
        let Some((parent, prev)) = self.get(sibling).map(|s| (s.parent, s.prev_sibling)) else {
            return;
        };

        if let Some(node) = self.get_mut(new_node) {
            node.parent = parent;
            node.prev_sibling = prev;
            node.next_sibling = sibling;
        }
        if let Some(s) = self.get_mut(sibling) {
            s.prev_sibling = new_node;
        }
        match self.get_mut(prev) {
            Some(prev_node) => prev_node.next_sibling = new_node,
            None => {
                if let Some(p) = self.get_mut(parent) {
                    p.first_child = new_node;
                }
            }
        }
    }

    /// Unlink a node from its parent and siblings. Its subtree stays attached to it.
    pub fn detach(&mut self, id: ArenaNodeId) {
        let Some((parent, prev, next)) = self
            .get(id)
            .map(|n| (n.parent, n.prev_sibling, n.next_sibling))
        else {
            return;
        };

        match self.get_mut(prev) {
            Some(p) => p.next_sibling = next,
            None => {
                if let Some(p) = self.get_mut(parent) {
                    p.first_child = next;
                }
            }
        }
        match self.get_mut(next) {
            Some(n) => n.prev_sibling = prev,
            None => {
                if let Some(p) = self.get_mut(parent) {
                    p.last_child = prev;
                }
            }
        }

        if let Some(node) = self.get_mut(id) {
            node.parent = ArenaNodeId::NONE;
            node.prev_sibling = ArenaNodeId::NONE;
            node.next_sibling = ArenaNodeId::NONE;
        }
    }

    /// Append text under `parent`, extending its last child if that is already text.
    pub fn append_text(&mut self, parent: ArenaNodeId, text: &str) {
        let last = self
            .get(parent)
            .map_or(ArenaNodeId::NONE, |p| p.last_child);
        if !self.extend_text(last, text) {
            let node = self.create_text(text.to_string());
            self.append(parent, node);
        }
    }

    /// Insert text before `sibling`, extending the preceding node if that is text.
    pub fn insert_text_before(&mut self, sibling: ArenaNodeId, text: &str) {
        let prev = self
            .get(sibling)
            .map_or(ArenaNodeId::NONE, |s| s.prev_sibling);
        if !self.extend_text(prev, text) {
            let node = self.create_text(text.to_string());
            self.insert_before(sibling, node);
        }
    }

    fn extend_text(&mut self, id: ArenaNodeId, text: &str) -> bool {
        match self.get_mut(id).map(|n| &mut n.data) {
            Some(ArenaNodeData::Text(existing)) => {
                existing.push_str(text);
                true
            }
            _ => false,
        }
    }

    /// Children of `parent`, left to right.
    pub fn children(&self, parent: ArenaNodeId) -> ChildrenIter<'_> {
        ChildrenIter {
            dom: self,
            next: self.get(parent).map_or(ArenaNodeId::NONE, |p| p.first_child),
        }
    }

    /// `root` and its whole subtree, depth-first pre-order.
    pub fn descendants(&self, root: ArenaNodeId) -> Descendants<'_> {
        Descendants {
            dom: self,
            stack: vec![root],
        }
    }

    /// Value of the first attribute called `attr_name`, if this is an element.
    pub fn get_attr(&self, id: ArenaNodeId, attr_name: &str) -> Option<&str> {
        match &self.get(id)?.data {
            ArenaNodeData::Element { attrs, .. } => attrs
                .iter()
                .find(|a| a.name.local.as_ref() == attr_name)
                .map(|a| a.value.as_str()),
            _ => None,
        }
    }

    /// Overwrite the value of the first attribute called `attr_name`.
    ///
    /// Returns `false` when there is no such attribute. Attribute order and
    /// every other attribute are left alone.
    pub fn set_attr(&mut self, id: ArenaNodeId, attr_name: &str, value: String) -> bool {
        let Some(ArenaNodeData::Element { attrs, .. }) = self.get_mut(id).map(|n| &mut n.data)
        else {
            return false;
        };
        let Some(attr) = attrs.iter_mut().find(|a| a.name.local.as_ref() == attr_name) else {
            return false;
        };
        attr.value = value;
        true
    }

    pub fn is_element(&self, id: ArenaNodeId) -> bool {
        self.get(id)
            .is_some_and(|n| matches!(n.data, ArenaNodeData::Element { .. }))
    }
}

impl Default for ArenaDom {
    fn default() -> Self {
        Self::new()
    }
}

/// Iterator over the children of one node.
pub struct ChildrenIter<'a> {
    dom: &'a ArenaDom,
    next: ArenaNodeId,
}

impl Iterator for ChildrenIter<'_> {
    type Item = ArenaNodeId;

    fn next(&mut self) -> Option<Self::Item> {
        let id = self.next;
        self.next = self.dom.get(id)?.next_sibling;
        Some(id)
    }
}

/// Pre-order subtree iterator driven by an explicit stack.
pub struct Descendants<'a> {
    dom: &'a ArenaDom,
    stack: Vec<ArenaNodeId>,
}

impl Iterator for Descendants<'_> {
    type Item = ArenaNodeId;

    fn next(&mut self) -> Option<Self::Item> {
        let id = self.stack.pop()?;
        // Last child goes on the stack first so the leftmost pops next
        let mut child = self.dom.get(id).map_or(ArenaNodeId::NONE, |n| n.last_child);
        while let Some(node) = self.dom.get(child) {
            self.stack.push(child);
            child = node.prev_sibling;
        }
        Some(id)
    }
}

#[cfg(test)]
impl ArenaDom {
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn find_by_tag(&self, tag: &str) -> Option<ArenaNodeId> {
        self.descendants(self.document()).find(|&id| {
            matches!(&self.get(id).map(|n| &n.data),
                Some(ArenaNodeData::Element { name, .. }) if name.local.as_ref() == tag)
        })
    }

    pub fn text_content(&self, id: ArenaNodeId) -> Option<&str> {
        match &self.get(id)?.data {
            ArenaNodeData::Text(s) => Some(s),
            _ => None,
        }
    }

    pub fn attr_names(&self, id: ArenaNodeId) -> Vec<&str> {
        match self.get(id).map(|n| &n.data) {
            Some(ArenaNodeData::Element { attrs, .. }) => {
                attrs.iter().map(|a| a.name.local.as_ref()).collect()
            }
            _ => Vec::new(),
        }
    }
}
