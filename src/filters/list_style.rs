//! Numbering style lookup for Word list paragraphs.
//!
//! Word describes each list level in its embedded stylesheet:
//!
//! ```text
//! @list l0:level1 { mso-level-number-format:roman-upper; mso-level-start-at:3; ... }
//! ```
//!
//! Every pattern here is bounded or built from simple character classes, and
//! the regex engine runs in linear time, so a hostile stylesheet cannot make
//! a lookup blow up.

use std::sync::LazyLock;

use html::{Document, NodeId};
use regex::Regex;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListKind {
    Ordered,
    Unordered,
}

impl ListKind {
    pub fn tag(self) -> &'static str {
        match self {
            ListKind::Ordered => "ol",
            ListKind::Unordered => "ul",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListStyle {
    pub kind: ListKind,
    /// CSS `list-style-type`; `None` leaves the browser default.
    pub style_type: Option<&'static str>,
    pub start_index: Option<u32>,
    /// Outline numbering such as `1.1.2`.
    pub legal: bool,
}

impl Default for ListStyle {
    fn default() -> Self {
        Self {
            kind: ListKind::Ordered,
            style_type: None,
            start_index: None,
            legal: false,
        }
    }
}

/// Resolve the style of list `list_id` at Word level `indent` (1-based).
///
/// `element` is the paragraph that opens the list; for bullets its marker glyph
/// refines the CSS bullet style.
pub fn detect_list_style(
    doc: &Document,
    element: NodeId,
    list_id: Option<&str>,
    indent: usize,
    stylesheet_text: &str,
) -> ListStyle {
    let mut style = ListStyle::default();
    let Some(id) = list_id else {
        return style;
    };
    let rule = level_rule(id, indent)
        .and_then(|re| re.captures(stylesheet_text))
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str());

    if let Some(rule) = rule {
        match capture(&NUMBER_FORMAT, rule).map(str::trim) {
            Some("bullet") => {
                style.kind = ListKind::Unordered;
                style.style_type = bulleted_list_style(doc, element)
                    .as_deref()
                    .and_then(map_list_style_definition);
            }
            // Picture bullets have no CSS counterpart.
            Some("image") => style.kind = ListKind::Unordered,
            format => {
                style.kind = ListKind::Ordered;
                style.style_type = format.and_then(map_list_style_definition);
                style.start_index = capture(&START_AT, rule).and_then(|s| s.parse().ok());
            }
        }
    }

    if has_legal_numbering(id, stylesheet_text) && !has_multi_level_number_format(id, stylesheet_text) {
        style.kind = ListKind::Ordered;
        style.legal = true;
    }

    log::trace!(
        target: "office_paste.list",
        "l{id} level{indent}: {:?} {:?} start={:?} legal={}",
        style.kind,
        style.style_type,
        style.start_index,
        style.legal
    );
    style
}

static NUMBER_FORMAT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)mso-level-number-format:([^;]{0,100});").expect("static regex is valid")
});

static START_AT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)mso-level-start-at:\s{0,100}([0-9]{1,10})\s{0,100};")
        .expect("static regex is valid")
});

fn capture<'h>(re: &Regex, haystack: &'h str) -> Option<&'h str> {
    re.captures(haystack)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str())
}

fn level_rule(id: &str, indent: usize) -> Option<Regex> {
    let pattern = format!(r"(?i)@list l{}:level{indent}\s*(\{{[^}}]*)", regex::escape(id));
    compile(&pattern)
}

fn has_legal_numbering(id: &str, stylesheet_text: &str) -> bool {
    let pattern = format!(
        r#"(?i)@list\s+l{}:level\d\s*\{{[^{{]*mso-level-text:"%\d\\."#,
        regex::escape(id)
    );
    compile(&pattern).is_some_and(|re| re.is_match(stylesheet_text))
}

fn has_multi_level_number_format(id: &str, stylesheet_text: &str) -> bool {
    let pattern = format!(
        r"(?i)@list l{}:level\d\s*\{{[^{{]*mso-level-number-format:",
        regex::escape(id)
    );
    compile(&pattern).is_some_and(|re| re.is_match(stylesheet_text))
}

fn compile(pattern: &str) -> Option<Regex> {
    match Regex::new(pattern) {
        Ok(re) => Some(re),
        Err(err) => {
            log::debug!(target: "office_paste.list", "skipping list style lookup: {err}");
            None
        }
    }
}

/// Map a Word numbering format (or an HTML `type` value) to `list-style-type`.
pub fn map_list_style_definition(value: &str) -> Option<&'static str> {
    if value.starts_with("arabic-leading-zero") {
        return Some("decimal-leading-zero");
    }
    match value {
        "alpha-upper" => Some("upper-alpha"),
        "alpha-lower" => Some("lower-alpha"),
        "roman-upper" => Some("upper-roman"),
        "roman-lower" => Some("lower-roman"),
        "circle" => Some("circle"),
        "disc" => Some("disc"),
        "square" => Some("square"),
        _ => None,
    }
}

/// Bullet style spelled by the marker glyph, or by `<ul type>` for a real list item.
fn bulleted_list_style(doc: &Document, element: NodeId) -> Option<String> {
    if doc.is_named(element, "li")
        && let Some(parent) = doc.parent(element)
        && doc.is_named(parent, "ul")
        && let Some(kind) = doc.attr(parent, "type")
    {
        return Some(kind.to_string());
    }

    let glyph = list_marker_text(doc, element)?;
    let style = match glyph {
        "o" => "circle",
        "\u{00B7}" => "disc",
        "\u{00A7}" => "square",
        _ => return None,
    };
    Some(style.to_string())
}

/// Text of the marker span Word puts at the start of a list paragraph.
fn list_marker_text(doc: &Document, element: NodeId) -> Option<&str> {
    if doc.first_child(element).is_none_or(|first| doc.is_text(first)) {
        return None;
    }
    for &child in doc.children(element) {
        if !doc.is_named(child, "span") {
            continue;
        }
        let Some(inner) = doc.first_child(child) else {
            continue;
        };
        if doc.is_text(inner) {
            return doc.text(inner);
        }
        return doc.first_child(inner).and_then(|glyph| doc.text(glyph));
    }
    None
}
