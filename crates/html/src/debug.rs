use crate::{Document, NodeId, NodeKind};
use std::fmt::Write;

const INDENT_STEP: &str = "  ";
const PREVIEW_CHARS: usize = 40;

pub fn first_styles(style: &[(String, String)]) -> String {
    let mut out = String::new();
    for (i, (k, v)) in style.iter().take(3).enumerate() {
        if i != 0 {
            out.push(' ');
        }
        let _ = write!(&mut out, "{k}: {v};");
    }
    out
}

fn push_preview(out: &mut String, s: &str) {
    for (i, ch) in s.chars().enumerate() {
        if i == PREVIEW_CHARS {
            out.push('…');
            break;
        }
        out.push(if ch == '\n' { ' ' } else { ch });
    }
}

/// Indented one-line-per-node outline of the tree, at most `cap` lines.
/// Whitespace-only text nodes are skipped.
pub fn outline(doc: &Document, cap: usize) -> Vec<String> {
    let mut out = Vec::new();
    let mut stack: Vec<(NodeId, usize)> = vec![(doc.root(), 0)];
    while let Some((id, depth)) = stack.pop() {
        if out.len() == cap {
            break;
        }
        let indent = INDENT_STEP.repeat(depth);
        match doc.kind(id) {
            NodeKind::Fragment => out.push(format!("{indent}#fragment")),
            NodeKind::Element(data) => {
                let mut line = format!("{indent}<{}", data.name);
                if let Some(class) = data.attr("class") {
                    let _ = write!(&mut line, r#" class="{class}""#);
                }
                line.push('>');
                let styles = first_styles(&data.style);
                if !styles.is_empty() {
                    let _ = write!(&mut line, "  /* {styles} */");
                }
                out.push(line);
            }
            NodeKind::Text(text) => {
                let trimmed = text.trim();
                if trimmed.is_empty() {
                    continue;
                }
                let mut line = format!("{indent}\"");
                push_preview(&mut line, trimmed);
                line.push('"');
                out.push(line);
            }
        }
        stack.extend(doc.children(id).iter().rev().map(|&c| (c, depth + 1)));
    }
    out
}
