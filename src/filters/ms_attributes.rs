use std::sync::LazyLock;

use html::traverse::descendants;
use html::{Document, NodeId, TreeWriter};
use regex::Regex;

static MSO_NAME: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\bmso").expect("static regex is valid"));

/// Strip Office-only presentation: `mso*` classes and style properties, the
/// structured-document-tag wrappers (`w:sdt`) and empty `w:sdtPr` / `o:p` elements.
pub fn remove_ms_attributes(doc: &mut Document) {
    let nodes = descendants(doc, doc.root());
    let mut edits: Vec<(NodeId, Vec<String>, Vec<String>)> = Vec::new();
    let mut unwraps: Vec<NodeId> = Vec::new();

    for &id in &nodes {
        let Some(element) = doc.element(id) else {
            continue;
        };
        let classes: Vec<String> = element
            .class_names()
            .filter(|c| MSO_NAME.is_match(c))
            .map(str::to_string)
            .collect();
        let styles: Vec<String> = element
            .style
            .iter()
            .filter(|(name, _)| MSO_NAME.is_match(name))
            .map(|(name, _)| name.clone())
            .collect();
        if !classes.is_empty() || !styles.is_empty() {
            edits.push((id, classes, styles));
        }

        let empty = doc.child_count(id) == 0;
        if element.is("w:sdt") || ((element.is("w:sdtpr") || element.is("o:p")) && empty) {
            unwraps.push(id);
        }
    }

    let mut writer = TreeWriter::new(doc);
    for (id, classes, styles) in edits {
        for class in classes {
            writer.remove_class(id, &class);
        }
        for style in styles {
            writer.remove_style(id, &style);
        }
    }
    for id in unwraps {
        writer.unwrap(id);
    }
}
