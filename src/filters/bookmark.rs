use html::traverse::descendants;
use html::{Document, NodeId, TreeWriter};

/// Turn Word bookmark anchors (`<a name>` without `href`) into empty `<a id>` markers.
///
/// The anchor's content is moved out after it so the marker does not swallow text.
pub fn transform_bookmarks(doc: &mut Document) {
    let anchors: Vec<NodeId> = descendants(doc, doc.root())
        .into_iter()
        .filter(|&id| {
            doc.element(id).is_some_and(|a| {
                a.is("a") && !a.has_attr("href") && (a.has_attr("name") || a.has_attr("id"))
            })
        })
        .collect();

    for anchor in anchors {
        let name = doc.attr(anchor, "name").map(str::to_string);
        let children = doc.children(anchor).to_vec();
        let mut writer = TreeWriter::new(doc);
        if let Some(name) = name {
            writer.remove_attribute(anchor, "name");
            writer.set_attribute(anchor, "id", name);
        }
        for child in children.into_iter().rev() {
            writer.insert_after(child, anchor);
        }
    }
}
