use html::{Document, NodeId, TreeWriter};

use crate::filters::top_level_elements;

fn top_level_named(doc: &Document, name: &str) -> Vec<NodeId> {
    top_level_elements(doc)
        .into_iter()
        .filter(|&id| doc.is_named(id, name))
        .collect()
}

/// Unwrap the `<google-sheets-html-origin>` element around a Sheets selection.
pub fn remove_google_sheets_tag(doc: &mut Document) {
    let tags = top_level_named(doc, "google-sheets-html-origin");
    let mut writer = TreeWriter::new(doc);
    for tag in tags {
        writer.unwrap(tag);
    }
}

pub fn remove_xmlns_attribute(doc: &mut Document) {
    let tables = top_level_named(doc, "table");
    let mut writer = TreeWriter::new(doc);
    for table in tables {
        writer.remove_attribute(table, "xmlns");
    }
}

/// Remove top-level `<style>` blocks; their rules only make sense inside Sheets.
pub fn remove_style_block(doc: &mut Document) {
    let styles = top_level_named(doc, "style");
    TreeWriter::new(doc).remove_all(&styles);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sheets_wrapper_is_cleaned() {
        let mut doc = html::parse_fragment(concat!(
            "<google-sheets-html-origin><style>td{border:1px solid #ccc}</style>",
            r#"<table xmlns="http://www.w3.org/1999/xhtml" cellspacing="0"><tr><td>1</td></tr></table>"#,
            "</google-sheets-html-origin>"
        ));
        remove_google_sheets_tag(&mut doc);
        remove_xmlns_attribute(&mut doc);
        remove_style_block(&mut doc);
        assert_eq!(
            html::to_html(&doc),
            r#"<table cellspacing="0"><tr><td>1</td></tr></table>"#
        );
    }
}
