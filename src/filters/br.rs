//! Line breaks that sit directly next to a block.
//!
//! Google Docs separates blocks with a bare `<br>` where an empty paragraph
//! was meant. Such breaks are found by looking through the neighbouring
//! inline formatting elements for the nearest node that is not one.

use html::traverse::{descendants, is_block_element, is_inline_object_element};
use html::{Document, NodeId, TreeWriter};

const INTERCHANGE_NEWLINE: &str = "Apple-interchange-newline";

/// Replace `<br>`s adjacent to a block with empty paragraphs.
///
/// Apple's interchange newline marker is removed instead.
pub fn transform_block_brs_to_paragraphs(doc: &mut Document) {
    let brs: Vec<NodeId> = descendants(doc, doc.root())
        .into_iter()
        .filter(|&id| doc.is_named(id, "br"))
        .filter(|&id| {
            [Direction::Backward, Direction::Forward]
                .into_iter()
                .any(|dir| neighbour(doc, id, dir).is_some_and(|n| is_block(doc, n)))
        })
        .collect();

    let mut writer = TreeWriter::new(doc);
    for br in brs {
        if writer
            .document()
            .element(br)
            .is_some_and(|e| e.has_class(INTERCHANGE_NEWLINE))
        {
            writer.remove(br);
        } else {
            let paragraph = writer.create_element("p");
            writer.replace(br, paragraph);
        }
    }
}

#[derive(Clone, Copy)]
enum Direction {
    Backward,
    Forward,
}

/// An element the scan walks through: inline, and not an atomic object.
fn is_transparent(doc: &Document, id: NodeId) -> bool {
    doc.name(id)
        .is_some_and(|n| !is_block_element(n) && !is_inline_object_element(n))
}

fn is_block(doc: &Document, id: NodeId) -> bool {
    doc.name(id).is_some_and(is_block_element)
}

/// First node next to `node` in `dir` that is not a transparent inline element,
/// entering and leaving such elements along the way.
fn neighbour(doc: &Document, node: NodeId, dir: Direction) -> Option<NodeId> {
    let mut parent = doc.parent(node)?;
    let index = doc.child_index(node)?;
    // Boundary between children `pos - 1` and `pos`.
    let mut pos = match dir {
        Direction::Backward => index,
        Direction::Forward => index + 1,
    };
    loop {
        let children = doc.children(parent);
        let next = match dir {
            Direction::Backward => pos.checked_sub(1).map(|i| children[i]),
            Direction::Forward => children.get(pos).copied(),
        };
        match next {
            Some(child) if is_transparent(doc, child) => {
                parent = child;
                pos = match dir {
                    Direction::Backward => doc.child_count(child),
                    Direction::Forward => 0,
                };
            }
            Some(child) => return Some(child),
            None => {
                if !is_transparent(doc, parent) {
                    return None;
                }
                let index = doc.child_index(parent)?;
                parent = doc.parent(parent)?;
                pos = match dir {
                    Direction::Backward => index,
                    Direction::Forward => index + 1,
                };
            }
        }
    }
}
