use html::traverse::{ancestors, descendants, elements_named};
use html::{Document, TreeWriter};

/// Expand tabs inside `<pre>` to spaces, aligned to `tab_width` columns.
///
/// The column carries across text nodes and restarts after a newline or `<br>`.
pub fn expand_tabs_in_preformatted(doc: &mut Document, tab_width: usize) {
    let tab_width = tab_width.max(1);
    let outermost: Vec<_> = elements_named(doc, doc.root(), "pre")
        .into_iter()
        .filter(|&pre| !ancestors(doc, pre).any(|id| doc.is_named(id, "pre")))
        .collect();
    for pre in outermost {
        let mut column = 0;
        let mut rewrites = Vec::new();
        for id in descendants(doc, pre) {
            if doc.is_named(id, "br") {
                column = 0;
                continue;
            }
            let Some(text) = doc.text(id) else {
                continue;
            };
            if !text.contains('\t') {
                column = advance(column, text);
                continue;
            }
            let mut expanded = String::with_capacity(text.len() + tab_width);
            for ch in text.chars() {
                match ch {
                    '\t' => {
                        let spaces = tab_width - column % tab_width;
                        expanded.extend(std::iter::repeat_n(' ', spaces));
                        column += spaces;
                    }
                    '\n' => {
                        expanded.push(ch);
                        column = 0;
                    }
                    _ => {
                        expanded.push(ch);
                        column += 1;
                    }
                }
            }
            rewrites.push((id, expanded));
        }
        let mut writer = TreeWriter::new(doc);
        for (id, text) in rewrites {
            writer.set_text(id, text);
        }
    }
}

fn advance(column: usize, text: &str) -> usize {
    match text.rfind('\n') {
        Some(i) => text[i + 1..].chars().count(),
        None => column + text.chars().count(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run(markup: &str, width: usize) -> String {
        let mut doc = html::parse_fragment(markup);
        expand_tabs_in_preformatted(&mut doc, width);
        html::to_html(&doc)
    }

    #[test]
    fn tabs_align_to_stops() {
        assert_eq!(run("<pre>a\tb\n\tc</pre>", 4), "<pre>a   b\n    c</pre>");
        assert_eq!(run("<pre>abcd\te</pre>", 4), "<pre>abcd    e</pre>");
    }

    #[test]
    fn column_carries_across_inline_elements() {
        assert_eq!(run("<pre><b>ab</b>\tc</pre>", 4), "<pre><b>ab</b>  c</pre>");
        assert_eq!(run("<pre>ab<br>\tc</pre>", 2), "<pre>ab<br>  c</pre>");
    }

    #[test]
    fn tabs_outside_pre_are_untouched() {
        assert_eq!(run("<p>a\tb</p>", 4), "<p>a\tb</p>");
    }
}
