//! HTML serialization of the arena DOM through html5ever's serializer.

use std::io::{self, Write};

use html5ever::QualName;
use html5ever::serialize::{Serialize, SerializeOpts, Serializer, TraversalScope, serialize};

use super::arena::{ArenaDom, ArenaNodeData, ArenaNodeId};

/// A node of an [`ArenaDom`] that html5ever can serialize.
#[derive(Clone, Copy)]
pub struct SerializableNode<'a> {
    dom: &'a ArenaDom,
    id: ArenaNodeId,
}

impl<'a> SerializableNode<'a> {
    pub fn new(dom: &'a ArenaDom, id: ArenaNodeId) -> Self {
        Self { dom, id }
    }
}

enum SerializeOp {
    Open(ArenaNodeId),
    Close(QualName),
}

impl Serialize for SerializableNode<'_> {
    fn serialize<S>(&self, serializer: &mut S, traversal_scope: TraversalScope) -> io::Result<()>
    where
        S: Serializer,
    {
        let dom = self.dom;
        let mut ops = match traversal_scope {
            TraversalScope::IncludeNode => vec![SerializeOp::Open(self.id)],
            TraversalScope::ChildrenOnly(_) => children_rev(dom, self.id),
        };

        while let Some(op) = ops.pop() {
            match op {
                SerializeOp::Open(id) => {
                    let Some(node) = dom.get(id) else {
                        continue;
                    };
                    match &node.data {
                        ArenaNodeData::Element { name, attrs } => {
                            serializer.start_elem(
                                name.clone(),
                                attrs.iter().map(|a| (&a.name, a.value.as_str())),
                            )?;
                            ops.push(SerializeOp::Close(name.clone()));
                            ops.extend(children_rev(dom, id));
                        }
                        ArenaNodeData::Document => ops.extend(children_rev(dom, id)),
                        ArenaNodeData::Text(text) => serializer.write_text(text)?,
                        ArenaNodeData::Comment(text) => serializer.write_comment(text)?,
                        ArenaNodeData::Doctype { name, .. } => serializer.write_doctype(name)?,
                        ArenaNodeData::ProcessingInstruction { target, data } => {
                            serializer.write_processing_instruction(target, data)?
                        }
                    }
                }
                SerializeOp::Close(name) => serializer.end_elem(name)?,
            }
        }

        Ok(())
    }
}

/// Children of `id` as open ops, last child first so popping yields document order.
fn children_rev(dom: &ArenaDom, id: ArenaNodeId) -> Vec<SerializeOp> {
    let mut ops: Vec<_> = dom.children(id).map(SerializeOp::Open).collect();
    ops.reverse();
    ops
}

/// Write the whole document as HTML.
pub fn write_html<W: Write>(dom: &ArenaDom, writer: W) -> io::Result<()> {
    let document = SerializableNode::new(dom, dom.document());
    serialize(writer, &document, SerializeOpts::default())
}

/// Serialize the whole document to an HTML string.
pub fn to_html_string(dom: &ArenaDom) -> io::Result<String> {
    let mut bytes = Vec::new();
    write_html(dom, &mut bytes)?;
    String::from_utf8(bytes).map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))
}
