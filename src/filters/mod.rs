//! Tree transforms shared by the source normalizers.
//!
//! Every filter takes the fragment by `&mut Document` and funnels its edits
//! through [`html::TreeWriter`]. None of them fail; unexpected input leaves
//! the tree as it was.

pub mod bookmark;
pub mod br;
pub mod docs;
pub mod footnote;
pub mod image;
pub mod list;
pub mod list_style;
pub mod ms_attributes;
pub mod parse;
pub mod pre;
pub mod rtf;
pub mod sheets;
pub mod space;
pub mod table;

use html::{Document, NodeId};

/// Element children of the fragment root.
pub(crate) fn top_level_elements(doc: &Document) -> Vec<NodeId> {
    doc.children(doc.root())
        .iter()
        .copied()
        .filter(|&id| doc.is_element(id))
        .collect()
}
