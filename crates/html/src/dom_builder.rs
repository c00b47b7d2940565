use crate::traverse::is_block_element;
use crate::types::{Document, ElementData, NodeId, NodeKind, Token};

/// Build a document from a token stream.
///
/// The returned document's root is a fragment node holding the top-level nodes.
/// Comments and doctypes are dropped. Recovery rules:
/// - an end tag with no matching open element is ignored;
/// - opening a block element while a `<p>` is open closes that `<p>` first;
/// - void and self-closing elements never become open elements.
pub fn build_document(tokens: &[Token]) -> Document {
    let mut doc = Document::new_fragment();
    let root = doc.root();
    let mut open_elements: Vec<NodeId> = Vec::new();

    for token in tokens {
        match token {
            Token::Doctype(_) | Token::Comment(_) => {}
            Token::Text(text) => {
                if text.is_empty() {
                    continue;
                }
                let parent = open_elements.last().copied().unwrap_or(root);
                // Coalesce with a preceding text sibling, the way a DOM parser would.
                if let Some(last) = doc.last_child(parent)
                    && let NodeKind::Text(existing) = &mut doc.slot_mut(last).kind
                {
                    existing.push_str(text);
                    continue;
                }
                let id = doc.alloc(NodeKind::Text(text.clone()));
                attach(&mut doc, id, parent);
            }
            Token::StartTag {
                name,
                attributes,
                self_closing,
            } => {
                if is_block_element(name) {
                    close_open_paragraph(&doc, &mut open_elements);
                }
                let parent = open_elements.last().copied().unwrap_or(root);
                let mut data = ElementData::new(name.clone());
                data.attributes = attributes.clone();
                let id = doc.alloc(NodeKind::Element(data));
                attach(&mut doc, id, parent);
                if !*self_closing {
                    open_elements.push(id);
                }
            }
            Token::EndTag(name) => {
                let Some(position) = open_elements
                    .iter()
                    .rposition(|&id| doc.is_named(id, name))
                else {
                    log::trace!(target: "html.builder", "ignoring unmatched </{name}>");
                    continue;
                };
                open_elements.truncate(position);
            }
        }
    }

    doc
}

fn attach(doc: &mut Document, child: NodeId, parent: NodeId) {
    doc.slot_mut(parent).children.push(child);
    doc.slot_mut(child).parent = Some(parent);
}

fn close_open_paragraph(doc: &Document, open_elements: &mut Vec<NodeId>) {
    // A `<p>` only closes implicitly when nothing block-level sits above it.
    for (position, &id) in open_elements.iter().enumerate().rev() {
        let Some(name) = doc.name(id) else {
            continue;
        };
        if name == "p" {
            open_elements.truncate(position);
            return;
        }
        if is_block_element(name) {
            return;
        }
    }
}
