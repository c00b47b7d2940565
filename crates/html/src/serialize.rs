use crate::traverse::is_void_element;
use crate::types::{Document, ElementData, NodeId, NodeKind};

/// Serialize the whole document (the root's children).
pub fn to_html(doc: &Document) -> String {
    inner_html(doc, doc.root())
}

/// Serialize the children of `node`.
pub fn inner_html(doc: &Document, node: NodeId) -> String {
    let mut out = String::new();
    for &child in doc.children(node) {
        write_node(doc, child, &mut out);
    }
    out
}

/// Serialize `node` itself, including its own tag.
pub fn outer_html(doc: &Document, node: NodeId) -> String {
    let mut out = String::new();
    write_node(doc, node, &mut out);
    out
}

enum Step {
    Enter(NodeId),
    Close(NodeId),
}

fn write_node(doc: &Document, node: NodeId, out: &mut String) {
    let mut stack = vec![Step::Enter(node)];
    while let Some(step) = stack.pop() {
        match step {
            Step::Enter(id) => match doc.kind(id) {
                NodeKind::Fragment => {
                    stack.extend(doc.children(id).iter().rev().map(|&c| Step::Enter(c)));
                }
                NodeKind::Text(text) => {
                    let raw = doc
                        .parent(id)
                        .and_then(|p| doc.name(p))
                        .is_some_and(|n| n == "style" || n == "script");
                    if raw {
                        out.push_str(text);
                    } else {
                        escape_text(text, out);
                    }
                }
                NodeKind::Element(data) => {
                    write_start_tag(data, out);
                    if is_void_element(&data.name) {
                        continue;
                    }
                    stack.push(Step::Close(id));
                    stack.extend(doc.children(id).iter().rev().map(|&c| Step::Enter(c)));
                }
            },
            Step::Close(id) => {
                if let Some(name) = doc.name(id) {
                    out.push_str("</");
                    out.push_str(name);
                    out.push('>');
                }
            }
        }
    }
}

fn write_start_tag(data: &ElementData, out: &mut String) {
    out.push('<');
    out.push_str(&data.name);
    for (key, value) in &data.attributes {
        out.push(' ');
        out.push_str(key);
        if let Some(value) = value {
            out.push_str("=\"");
            escape_attribute(value, out);
            out.push('"');
        }
    }
    if !data.style.is_empty() {
        let style = data
            .style
            .iter()
            .map(|(k, v)| format!("{k}:{v}"))
            .collect::<Vec<_>>()
            .join(";");
        out.push_str(" style=\"");
        escape_attribute(&style, out);
        out.push('"');
    }
    out.push('>');
}

fn escape_text(text: &str, out: &mut String) {
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '\u{00A0}' => out.push_str("&nbsp;"),
            _ => out.push(ch),
        }
    }
}

fn escape_attribute(value: &str, out: &mut String) {
    for ch in value.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '"' => out.push_str("&quot;"),
            '\u{00A0}' => out.push_str("&nbsp;"),
            _ => out.push(ch),
        }
    }
}
