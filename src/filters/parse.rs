//! Fragment extraction from raw clipboard markup.

use std::sync::LazyLock;

use html::traverse::{descendants, elements_named};
use html::{Document, NodeId};
use regex::Regex;

use crate::filters::space::{normalize_spacerun_spans, normalize_spacing};

/// Word hides its VML drawing markup behind this conditional comment opener.
const VML_CONDITIONAL: &str = "<!--[if gte vml 1]>";

static SMART_TAG_TYPE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?i)<o:SmartTagType(?:\s+[^\s>=]+(?:="[^"]*")?)*\s*/?>"#)
        .expect("static regex is valid")
});

/// Elements a browser would hoist into `<head>` when the markup has no `<body>`.
const HEAD_ONLY: &[&str] = &["head", "meta", "title", "link", "base", "style", "script"];

/// The parsed clipboard markup.
#[derive(Debug, Clone)]
pub struct ParsedDocument {
    /// Children of the source `<body>`, with inline styles parsed.
    pub fragment: Document,
    /// Inner markup of the source body after whitespace fixes.
    pub body_string: String,
    /// Text of every `<style>` element, in document order.
    pub stylesheets: Vec<String>,
    /// `stylesheets` joined with single spaces.
    pub stylesheet_text: String,
}

impl ParsedDocument {
    pub fn to_html(&self) -> String {
        html::to_html(&self.fragment)
    }
}

/// Parse raw clipboard markup into a body fragment plus stylesheet text.
///
/// Never fails: markup the tokenizer cannot make sense of ends up as text,
/// and empty input gives an empty fragment.
pub fn parse_html(raw: &str) -> ParsedDocument {
    let cleaned = raw.replace(VML_CONDITIONAL, "");
    let cleaned = SMART_TAG_TYPE.replace_all(&cleaned, "");
    let cleaned = clean_content_after_body(&cleaned);
    let cleaned = normalize_spacing(cleaned);

    let document = html::parse_fragment(&cleaned);

    let stylesheets: Vec<String> = elements_named(&document, document.root(), "style")
        .into_iter()
        .map(|id| document.text_content(id))
        .collect();
    let stylesheet_text = stylesheets.join(" ");

    let mut fragment = document.extract(&body_nodes(&document));
    css::attach_inline_styles(&mut fragment);
    normalize_spacerun_spans(&mut fragment);
    let body_string = html::to_html(&fragment);

    log::debug!(
        target: "office_paste.parse",
        "parsed {} bytes into {} top-level nodes, {} stylesheet(s)",
        raw.len(),
        fragment.child_count(fragment.root()),
        stylesheets.len()
    );

    ParsedDocument {
        fragment,
        body_string,
        stylesheets,
        stylesheet_text,
    }
}

/// Drop anything after `</body>`; some browsers append junk there.
fn clean_content_after_body(html: &str) -> &str {
    const BODY_CLOSE: &[u8] = b"</body>";
    let Some(start) = html::find_ignore_ascii_case(html, BODY_CLOSE) else {
        return html;
    };
    let end = start + BODY_CLOSE.len();
    if end < html.len() {
        log::trace!(
            target: "office_paste.parse",
            "dropping {} bytes after </body>",
            html.len() - end
        );
    }
    &html[..end]
}

fn body_nodes(document: &Document) -> Vec<NodeId> {
    let root = document.root();
    if let Some(body) = descendants(document, root)
        .into_iter()
        .find(|&id| document.is_named(id, "body"))
    {
        return document.children(body).to_vec();
    }

    let container = document
        .children(root)
        .iter()
        .copied()
        .find(|&id| document.is_named(id, "html"))
        .unwrap_or(root);
    document
        .children(container)
        .iter()
        .copied()
        .filter(|&id| {
            document
                .name(id)
                .is_none_or(|name| !HEAD_ONLY.iter().any(|h| name.eq_ignore_ascii_case(h)))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extracts_body_and_stylesheets() {
        let parsed = parse_html(
            "<html><head><style>p { color: red; }</style></head>\
             <body><p>Hello</p><style>@list l0:level1 {}</style></body></html>",
        );
        assert_eq!(
            parsed.stylesheets,
            ["p { color: red; }", "@list l0:level1 {}"]
        );
        assert_eq!(parsed.stylesheet_text, "p { color: red; } @list l0:level1 {}");
        assert_eq!(
            parsed.to_html(),
            "<p>Hello</p><style>@list l0:level1 {}</style>"
        );
    }

    #[test]
    fn fragment_without_body_skips_head_content() {
        let parsed = parse_html(r#"<meta charset="utf-8"><b id="x">a</b>"#);
        assert_eq!(parsed.to_html(), r#"<b id="x">a</b>"#);
    }

    #[test]
    fn content_after_body_is_dropped() {
        let parsed = parse_html("<body><p>a</p></body><p>junk</p>");
        assert_eq!(parsed.to_html(), "<p>a</p>");
    }

    #[test]
    fn vml_conditional_and_smart_tags_are_removed() {
        let parsed = parse_html(
            r#"<body><o:SmartTagType namespaceuri="urn:x" name="place"/><!--[if gte vml 1]><v:shape id="s"></v:shape><![endif]--><p>x</p></body>"#,
        );
        assert_eq!(parsed.to_html(), r#"<v:shape id="s"></v:shape><p>x</p>"#);
    }

    #[test]
    fn inline_styles_are_parsed() {
        let parsed = parse_html(r#"<p style="MARGIN-LEFT: 36pt; mso-list: l0 level1 lfo1">x</p>"#);
        let p = parsed.fragment.first_child(parsed.fragment.root()).unwrap();
        assert_eq!(parsed.fragment.style(p, "margin-left"), Some("36pt"));
        assert_eq!(parsed.fragment.style(p, "mso-list"), Some("l0 level1 lfo1"));
        assert_eq!(parsed.fragment.attr(p, "style"), None);
    }

    #[test]
    fn empty_input_gives_empty_fragment() {
        let parsed = parse_html("");
        assert_eq!(parsed.fragment.child_count(parsed.fragment.root()), 0);
        assert!(parsed.stylesheet_text.is_empty());
        assert!(parsed.body_string.is_empty());
    }
}
