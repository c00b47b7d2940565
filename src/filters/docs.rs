use html::traverse::elements_named;
use html::{Document, NodeId, TreeWriter};

use crate::filters::top_level_elements;

/// Unwrap the `<b style="font-weight:normal">` Google Docs wraps around the whole paste.
pub fn remove_bold_wrapper(doc: &mut Document) {
    let wrappers: Vec<NodeId> = top_level_elements(doc)
        .into_iter()
        .filter(|&id| doc.is_named(id, "b") && doc.style(id, "font-weight") == Some("normal"))
        .collect();
    let mut writer = TreeWriter::new(doc);
    for wrapper in wrappers {
        writer.unwrap(wrapper);
    }
}

/// Unwrap a `<p>` that opens a list item; Docs wraps every item's text in one.
pub fn unwrap_paragraph_in_list_item(doc: &mut Document) {
    let paragraphs: Vec<NodeId> = elements_named(doc, doc.root(), "li")
        .into_iter()
        .filter_map(|li| doc.first_child(li))
        .filter(|&child| doc.is_named(child, "p"))
        .collect();
    let mut writer = TreeWriter::new(doc);
    for paragraph in paragraphs {
        writer.unwrap(paragraph);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn styled(markup: &str) -> Document {
        let mut doc = html::parse_fragment(markup);
        css::attach_inline_styles(&mut doc);
        doc
    }

    #[test]
    fn normal_weight_wrapper_is_unwrapped() {
        let mut doc = styled(
            r#"<b style="font-weight:normal;" id="docs-internal-guid-1"><p>a</p><p>b</p></b>"#,
        );
        remove_bold_wrapper(&mut doc);
        assert_eq!(html::to_html(&doc), "<p>a</p><p>b</p>");
    }

    #[test]
    fn real_bold_is_kept() {
        let mut doc = styled(r#"<b>a</b><p><b style="font-weight:normal">b</b></p>"#);
        remove_bold_wrapper(&mut doc);
        assert_eq!(
            html::to_html(&doc),
            r#"<b>a</b><p><b style="font-weight:normal">b</b></p>"#
        );
    }

    #[test]
    fn first_paragraph_in_list_item_is_unwrapped() {
        let mut doc = styled("<ul><li><p>a</p><p>b</p></li><li>c</li></ul>");
        unwrap_paragraph_in_list_item(&mut doc);
        assert_eq!(html::to_html(&doc), "<ul><li>a<p>b</p></li><li>c</li></ul>");
    }
}
