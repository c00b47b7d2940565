//! Whitespace preservation for office markup.
//!
//! Office applications rely on styled spans and `&nbsp;` to keep runs of
//! spaces visible. These fixes run before and after parsing so those runs
//! survive an editor's whitespace collapsing.

use std::sync::LazyLock;

use html::traverse::descendants;
use html::{Document, TreeWriter};
use regex::{Captures, Regex};

const NBSP: char = '\u{00A0}';

static SAFARI_SPACE_SPAN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"<span(?: class="Apple-converted-space"|)>(\s+)</span>"#)
        .expect("static regex is valid")
});

static SPACERUN_LINE_BREAK: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(<span\s+style=['"]mso-spacerun:yes['"]>[^\S\r\n]*?)[\r\n]+([^\S\r\n]*</span>)"#)
        .expect("static regex is valid")
});

static EMPTY_SPACERUN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"<span\s+style=['"]mso-spacerun:yes['"]></span>"#).expect("static regex is valid")
});

static LETTER_SPACING_LINE_BREAK: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(<span\s+style=['"]letter-spacing:[^'"]+?['"]>)[\r\n]+(</span>)"#)
        .expect("static regex is valid")
});

static NBSP_FILLER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new("<o:p>(&nbsp;|\u{00A0})</o:p>").expect("static regex is valid")
});

static LINE_BREAK_BETWEEN_TAGS: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r">([^\S\r\n]*[\r\n]\s*)<").expect("static regex is valid")
});

/// Alternating NBSP and space run of `length` characters, starting with NBSP.
pub fn space_run(length: usize) -> String {
    (0..length)
        .map(|i| if i % 2 == 0 { NBSP } else { ' ' })
        .collect()
}

/// Source-level whitespace fixes applied before the markup is parsed.
pub fn normalize_spacing(html: &str) -> String {
    // Twice, since Safari nests these spans.
    let html = replace_safari_space_spans(html);
    let html = replace_safari_space_spans(&html);

    let html = SPACERUN_LINE_BREAK.replace_all(&html, "${1}${2}");
    let html = EMPTY_SPACERUN.replace_all(&html, "");
    let html = LETTER_SPACING_LINE_BREAK.replace_all(&html, "${1} ${2}");
    let html = html.replace(" </", "\u{00A0}</");
    let html = html.replace(" <o:p></o:p>", "\u{00A0}<o:p></o:p>");
    let html = NBSP_FILLER.replace_all(&html, "");
    LINE_BREAK_BETWEEN_TAGS.replace_all(&html, "><").into_owned()
}

fn replace_safari_space_spans(html: &str) -> String {
    SAFARI_SPACE_SPAN
        .replace_all(html, |caps: &Captures<'_>| {
            let length = caps[1].chars().count();
            if length == 1 {
                " ".to_string()
            } else {
                space_run(length)
            }
        })
        .into_owned()
}

/// Replace the text of every `mso-spacerun` span with a visible space run of the same length.
///
/// Runs after inline styles are attached.
pub fn normalize_spacerun_spans(doc: &mut Document) {
    let root = doc.root();
    let spans: Vec<_> = descendants(doc, root)
        .into_iter()
        .filter(|&id| doc.is_named(id, "span") && doc.style(id, "mso-spacerun").is_some())
        .collect();

    for span in spans {
        let length = doc.text_content(span).chars().count();
        let children = doc.children(span).to_vec();
        let mut writer = TreeWriter::new(doc);
        writer.remove_all(&children);
        if length > 0 {
            let text = writer.create_text(space_run(length));
            writer.append_child(text, span);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn space_run_alternates_starting_with_nbsp() {
        assert_eq!(space_run(0), "");
        assert_eq!(space_run(3), "\u{00A0} \u{00A0}");
    }

    #[test]
    fn safari_space_spans_are_unwrapped() {
        assert_eq!(
            normalize_spacing(r#"a<span class="Apple-converted-space"> </span>b"#),
            "a b"
        );
        assert_eq!(
            normalize_spacing("a<span>   </span>b"),
            "a\u{00A0} \u{00A0}b"
        );
    }

    #[test]
    fn spacerun_cleanup() {
        assert_eq!(
            normalize_spacing("<p>a<span style='mso-spacerun:yes'></span>b</p>"),
            "<p>ab</p>"
        );
        assert_eq!(
            normalize_spacing("<span style=\"mso-spacerun:yes\">  \n </span>"),
            "<span style=\"mso-spacerun:yes\">  \u{00A0}</span>"
        );
    }

    #[test]
    fn trailing_space_before_close_becomes_nbsp() {
        assert_eq!(normalize_spacing("<b>bold </b>"), "<b>bold\u{00A0}</b>");
        assert_eq!(
            normalize_spacing("<p>x <o:p></o:p></p>"),
            "<p>x\u{00A0}<o:p></o:p></p>"
        );
    }

    #[test]
    fn nbsp_paragraph_fillers_are_removed() {
        assert_eq!(normalize_spacing("<p><o:p>&nbsp;</o:p></p>"), "<p></p>");
    }

    #[test]
    fn line_breaks_between_tags_are_dropped() {
        assert_eq!(
            normalize_spacing("<p>a</p>\r\n  <p>b</p> <i>c</i>"),
            "<p>a</p><p>b</p> <i>c</i>"
        );
    }

    #[test]
    fn spacerun_span_text_is_rewritten() {
        let mut doc = html::parse_fragment(r#"<p>a<span style="mso-spacerun:yes">    </span>b</p>"#);
        css::attach_inline_styles(&mut doc);
        normalize_spacerun_spans(&mut doc);
        let span = html::traverse::elements_named(&doc, doc.root(), "span")[0];
        assert_eq!(doc.text_content(span), "\u{00A0} \u{00A0} ");
    }
}
