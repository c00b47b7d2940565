use crate::{Document, NodeId};

/// All nodes below `root` in document (pre-)order, excluding `root` itself.
///
/// The result is a snapshot: callers may mutate the tree while iterating it.
pub fn descendants(doc: &Document, root: NodeId) -> Vec<NodeId> {
    let mut out = Vec::new();
    let mut stack: Vec<NodeId> = doc.children(root).iter().rev().copied().collect();
    while let Some(id) = stack.pop() {
        out.push(id);
        stack.extend(doc.children(id).iter().rev().copied());
    }
    out
}

/// Element descendants of `root` named `name`, in document order.
pub fn elements_named(doc: &Document, root: NodeId, name: &str) -> Vec<NodeId> {
    descendants(doc, root)
        .into_iter()
        .filter(|&id| doc.is_named(id, name))
        .collect()
}

/// Ancestors of `node`, nearest first, excluding `node`.
pub fn ancestors(doc: &Document, node: NodeId) -> impl Iterator<Item = NodeId> + '_ {
    std::iter::successors(doc.parent(node), move |&id| doc.parent(id))
}

pub fn is_heading(name: &str) -> bool {
    let b = name.as_bytes();
    b.len() == 2 && (b[0] | 0x20) == b'h' && (b'1'..=b'6').contains(&b[1])
}

/// Elements the editing view treats as blocks.
pub fn is_block_element(name: &str) -> bool {
    matches!(
        name.to_ascii_lowercase().as_str(),
        "address"
            | "article"
            | "aside"
            | "blockquote"
            | "caption"
            | "center"
            | "dd"
            | "details"
            | "dir"
            | "div"
            | "dl"
            | "dt"
            | "figcaption"
            | "figure"
            | "footer"
            | "header"
            | "hgroup"
            | "legend"
            | "li"
            | "main"
            | "menu"
            | "nav"
            | "ol"
            | "p"
            | "pre"
            | "section"
            | "summary"
            | "table"
            | "tbody"
            | "td"
            | "tfoot"
            | "th"
            | "thead"
            | "tr"
            | "ul"
    ) || is_heading(name)
}

/// Inline elements that behave like a single object (never entered when scanning for siblings).
pub fn is_inline_object_element(name: &str) -> bool {
    matches!(
        name.to_ascii_lowercase().as_str(),
        "object" | "iframe" | "input" | "button" | "textarea" | "select" | "option" | "video"
            | "embed" | "audio" | "img" | "canvas"
    )
}

pub fn is_void_element(name: &str) -> bool {
    matches!(
        name,
        "area"
            | "base"
            | "br"
            | "col"
            | "embed"
            | "hr"
            | "img"
            | "input"
            | "link"
            | "meta"
            | "param"
            | "source"
            | "track"
            | "wbr"
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parse_fragment;

    #[test]
    fn descendants_are_in_document_order() {
        let doc = parse_fragment("<p>a<b>b</b></p><ul><li>c</li></ul>");
        let names: Vec<String> = descendants(&doc, doc.root())
            .into_iter()
            .map(|id| match doc.name(id) {
                Some(name) => name.to_string(),
                None => format!("#{}", doc.text(id).unwrap_or("")),
            })
            .collect();
        assert_eq!(names, ["p", "#a", "b", "#b", "ul", "li", "#c"]);
    }

    #[test]
    fn ancestors_walk_to_root() {
        let doc = parse_fragment("<div><p><span>x</span></p></div>");
        let span = elements_named(&doc, doc.root(), "span")[0];
        let names: Vec<&str> = ancestors(&doc, span).filter_map(|id| doc.name(id)).collect();
        assert_eq!(names, ["p", "div"]);
    }

    #[test]
    fn heading_detection() {
        assert!(is_heading("h1"));
        assert!(is_heading("H6"));
        assert!(!is_heading("h7"));
        assert!(!is_heading("hr"));
    }
}
