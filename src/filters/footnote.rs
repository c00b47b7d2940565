//! Footnotes carried by Google Docs in a JSON side channel.
//!
//! Docs does not put footnote text in the pasted markup. It tags an element
//! with `data-docs-footnotes` holding
//! `{"footnotes":[{"id":"ftnt1","content":"..."}]}` and links each reference
//! with `<a href="#ftnt1">`. The format is undocumented, so decoding is the
//! one fallible step in the pipeline.

use serde::Deserialize;

use html::traverse::descendants;
use html::{Document, NodeId, TreeWriter};

use crate::error::FootnoteError;

pub const SIDE_CHANNEL_ATTRIBUTE: &str = "data-docs-footnotes";

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct FootnoteEntry {
    pub id: String,
    #[serde(default)]
    pub content: String,
}

#[derive(Debug, Deserialize)]
struct SideChannel {
    footnotes: Vec<FootnoteEntry>,
}

/// Footnotes by id, in side-channel order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FootnoteMap {
    entries: Vec<FootnoteEntry>,
}

impl FootnoteMap {
    pub fn get(&self, id: &str) -> Option<&FootnoteEntry> {
        self.entries.iter().find(|entry| entry.id == id)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

pub fn parse_footnote_side_channel(raw: &str) -> Result<FootnoteMap, FootnoteError> {
    let channel: SideChannel = serde_json::from_str(raw)?;
    if channel.footnotes.iter().any(|entry| entry.id.is_empty()) {
        return Err(FootnoteError::UnexpectedShape("footnote without an id"));
    }
    Ok(FootnoteMap {
        entries: channel.footnotes,
    })
}

/// Rebuild footnote references and the footnote list. Returns how many
/// footnotes were referenced.
///
/// The side-channel attribute is always removed, even when decoding fails.
pub fn reconstruct_footnotes(doc: &mut Document) -> Result<usize, FootnoteError> {
    let carriers: Vec<NodeId> = descendants(doc, doc.root())
        .into_iter()
        .filter(|&id| doc.element(id).is_some_and(|e| e.has_attr(SIDE_CHANNEL_ATTRIBUTE)))
        .collect();
    let Some(&first) = carriers.first() else {
        return Ok(0);
    };
    let raw = doc.attr(first, SIDE_CHANNEL_ATTRIBUTE).unwrap_or_default().to_string();
    {
        let mut writer = TreeWriter::new(doc);
        for &carrier in &carriers {
            writer.remove_attribute(carrier, SIDE_CHANNEL_ATTRIBUTE);
        }
    }

    let footnotes = parse_footnote_side_channel(&raw)?;

    let references: Vec<(NodeId, String)> = descendants(doc, doc.root())
        .into_iter()
        .filter(|&id| doc.is_named(id, "a"))
        .filter_map(|id| {
            let target = doc.attr(id, "href")?.strip_prefix('#')?;
            footnotes.get(target).map(|_| (id, target.to_string()))
        })
        .collect();
    if references.is_empty() {
        return Ok(0);
    }

    let mut order: Vec<String> = Vec::new();
    let mut writer = TreeWriter::new(doc);
    for (anchor, id) in references {
        let number = match order.iter().position(|seen| *seen == id) {
            Some(index) => index + 1,
            None => {
                order.push(id.clone());
                order.len()
            }
        };
        let sup = writer.create_element_with(
            "sup",
            vec![
                ("class".to_string(), Some("footnote-reference".to_string())),
                ("data-footnote-id".to_string(), Some(id)),
            ],
        );
        let label = writer.create_text(format!("[{number}]"));
        writer.append_child(label, sup);

        let doc = writer.document();
        let target = match doc.parent(anchor) {
            Some(parent) if doc.is_named(parent, "sup") && doc.child_count(parent) == 1 => parent,
            _ => anchor,
        };
        writer.replace(target, sup);
    }

    let root = writer.document().root();
    let list = writer.create_element_with(
        "ol",
        vec![("class".to_string(), Some("footnotes".to_string()))],
    );
    for id in &order {
        let content = footnotes.get(id).map(|f| f.content.clone()).unwrap_or_default();
        let item = writer.create_element_with("li", vec![("id".to_string(), Some(id.clone()))]);
        let text = writer.create_text(content);
        writer.append_child(text, item);
        writer.append_child(item, list);
    }
    writer.append_child(list, root);

    log::debug!(target: "office_paste.footnote", "rebuilt {} footnote reference(s)", order.len());
    Ok(order.len())
}
