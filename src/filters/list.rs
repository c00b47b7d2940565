//! Rebuilds real list markup from Word's list paragraphs.
//!
//! Word exports every list item as a standalone block carrying
//! `mso-list: l<id> level<n> lfo<order>`, with the bullet or number rendered
//! as ordinary text in a `mso-list: Ignore` span. Items are regrouped into
//! nested `<ol>`/`<ul>` trees here, with a stack holding one frame per open
//! nesting level.

use std::collections::{HashMap, HashSet};
use std::sync::LazyLock;

use css::{convert_length_to_px, is_px, parse_float_prefix, to_px};
use html::traverse::descendants;
use html::{Document, ElementData, NodeId, TreeWriter};
use regex::Regex;

use crate::filters::list_style::{ListKind, ListStyle, detect_list_style};

static LIST_ID: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)(?:^|\s+)l(\d+)").expect("static regex is valid"));
static LIST_ORDER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\s*lfo(\d+)").expect("static regex is valid"));
static LIST_LEVEL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\s*level(\d+)").expect("static regex is valid"));

/// A block that takes part in list reconstruction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListItemCandidate {
    pub element: NodeId,
    pub list_id: Option<String>,
    pub order: Option<String>,
    /// Word level (1-based). `None` marks a continuation block with no marker of its own.
    pub indent: Option<usize>,
    pub margin_left: Option<String>,
}

/// One open nesting level.
#[derive(Debug, Clone)]
struct ListFrame {
    list_id: Option<String>,
    margin_left: Option<String>,
    container: NodeId,
    kind: ListKind,
    items: Vec<NodeId>,
}

/// Replace Word list paragraphs in `doc` with nested list markup.
///
/// `legal_lists` tags outline-numbered lists with the `legal-list` class.
pub fn reconstruct_lists(doc: &mut Document, stylesheet_text: &str, legal_lists: bool) {
    let candidates = find_list_item_candidates(doc);
    if candidates.is_empty() {
        return;
    }
    log::debug!(target: "office_paste.list", "{} list item candidate(s)", candidates.len());

    // Next ordinal per (list id, Word level), used to resume numbering.
    let mut counters: HashMap<(String, usize), u32> = HashMap::new();
    let mut stack: Vec<ListFrame> = Vec::new();

    for candidate in candidates {
        let Some(raw_indent) = candidate.indent else {
            attach_continuation(doc, &mut stack, &candidate);
            continue;
        };

        if !is_list_continuation(doc, candidate.element) {
            stack.clear();
        }

        let indent = raw_indent.saturating_sub(1).min(stack.len());
        let counter_key = candidate.list_id.clone().map(|id| (id, raw_indent));

        if indent < stack.len() && stack[indent].list_id != candidate.list_id {
            stack.truncate(indent);
        }

        if !stack.is_empty() && indent + 1 < stack.len() {
            stack.truncate(indent + 1);
        } else {
            let mut style = detect_list_style(
                doc,
                candidate.element,
                candidate.list_id.as_deref(),
                raw_indent,
                stylesheet_text,
            );
            if indent >= stack.len() || stack[indent].kind != style.kind {
                if indent == 0
                    && style.kind == ListKind::Ordered
                    && style.start_index.is_none()
                    && let Some(key) = &counter_key
                    && let Some(&next) = counters.get(key)
                {
                    style.start_index = Some(next);
                }
                let container = open_list(doc, &stack, indent, &candidate, &style, legal_lists);
                let frame = ListFrame {
                    list_id: candidate.list_id.clone(),
                    margin_left: candidate.margin_left.clone(),
                    container,
                    kind: style.kind,
                    items: Vec::new(),
                };
                if indent < stack.len() {
                    stack[indent] = frame;
                } else {
                    stack.push(frame);
                }
                if indent == 0
                    && let Some(key) = &counter_key
                {
                    counters.insert(key.clone(), style.start_index.unwrap_or(1));
                }
            }
        }

        let li = if doc.is_named(candidate.element, "li") {
            candidate.element
        } else {
            TreeWriter::new(doc).create_element("li")
        };
        let mut writer = TreeWriter::new(doc);
        writer.append_child(li, stack[indent].container);
        stack[indent].items.push(li);
        if li != candidate.element {
            writer.append_child(candidate.element, li);
        }

        if indent == 0
            && let Some(key) = counter_key
        {
            *counters.entry(key).or_insert(1) += 1;
        }

        remove_bullet_element(doc, candidate.element);
        let mut writer = TreeWriter::new(doc);
        writer.remove_style(candidate.element, "text-indent");
        writer.remove_style(candidate.element, "margin-left");
    }
}

/// Create the list container for a new level and put it in place.
fn open_list(
    doc: &mut Document,
    stack: &[ListFrame],
    indent: usize,
    candidate: &ListItemCandidate,
    style: &ListStyle,
    legal_lists: bool,
) -> NodeId {
    let mut writer = TreeWriter::new(doc);
    let list = writer.create_element(style.kind.tag());
    if let Some(style_type) = style.style_type {
        writer.set_style(list, "list-style-type", style_type);
    }
    if let Some(start) = style.start_index
        && start > 1
    {
        writer.set_attribute(list, "start", start.to_string());
    }
    if style.legal && legal_lists {
        writer.add_class(list, "legal-list");
    }

    let margin = candidate.margin_left.as_deref();
    let parent_margin = indent
        .checked_sub(1)
        .and_then(|i| stack.get(i))
        .and_then(|frame| frame.margin_left.as_deref());
    if let Some(margin) = margin
        && is_px(Some(margin))
        && (indent == 0 || is_px(parent_margin))
    {
        let own = parse_float_prefix(margin).unwrap_or(0.0);
        let base = parent_margin.and_then(parse_float_prefix).unwrap_or(0.0);
        writer.set_style(list, "padding-left", to_px(own - base));
    }

    match indent.checked_sub(1).and_then(|i| stack.get(i)) {
        Some(parent) => match parent.items.last() {
            Some(&li) => writer.append_child(list, li),
            None => writer.insert_after(list, candidate.element),
        },
        // A new top-level list replacing an open one of another kind goes after it.
        None => match stack.first() {
            Some(open) if indent < stack.len() => writer.insert_after(list, open.container),
            _ => writer.insert_after(list, candidate.element),
        },
    }

    log::trace!(
        target: "office_paste.list",
        "opened <{}> at depth {indent} for {:?}",
        style.kind.tag(),
        candidate.list_id
    );
    list
}

/// A block with no marker of its own joins the frame whose margin it shares.
fn attach_continuation(doc: &mut Document, stack: &mut Vec<ListFrame>, candidate: &ListItemCandidate) {
    let item = stack
        .iter()
        .find(|frame| frame.margin_left == candidate.margin_left)
        .and_then(|frame| frame.items.last().copied());
    match item {
        Some(li) => {
            let mut writer = TreeWriter::new(doc);
            writer.append_child(candidate.element, li);
            writer.remove_style(candidate.element, "margin-left");
        }
        None => stack.clear(),
    }
}

/// Blocks that are list items, or continuation paragraphs indented like one.
pub fn find_list_item_candidates(doc: &Document) -> Vec<ListItemCandidate> {
    let mut found_margins: HashSet<String> = HashSet::new();
    let mut candidates = Vec::new();

    for id in descendants(doc, doc.root()) {
        let Some(element) = doc.element(id) else {
            continue;
        };
        if !is_list_block(&element.name) {
            continue;
        }

        let mut margin_left = element.style("margin-left").map(convert_length_to_px);
        if margin_left
            .as_deref()
            .and_then(parse_float_prefix)
            .is_some_and(|m| m == 0.0)
            && !element.class_names().any(|c| c.starts_with("MsoList"))
        {
            margin_left = None;
        }

        let has_list_style = element.style("mso-list").is_some_and(|v| v != "none");
        let shares_margin = margin_left
            .as_ref()
            .is_some_and(|m| found_margins.contains(m));

        if has_list_style || shares_margin {
            let (list_id, order, indent) = list_item_data(element);
            if let Some(margin) = &margin_left {
                found_margins.insert(margin.clone());
            }
            candidates.push(ListItemCandidate {
                element: id,
                list_id,
                order,
                indent,
                margin_left,
            });
        } else {
            found_margins.clear();
        }
    }
    candidates
}

fn is_list_block(name: &str) -> bool {
    match name {
        "p" | "li" | "div" => true,
        _ => {
            let bytes = name.as_bytes();
            bytes.len() > 1 && bytes[0] == b'h' && bytes[1..].iter().all(u8::is_ascii_digit)
        }
    }
}

/// `(list id, order, indent)` from the `mso-list` descriptor.
fn list_item_data(element: &ElementData) -> (Option<String>, Option<String>, Option<usize>) {
    let Some(descriptor) = element.style("mso-list") else {
        return (None, None, None);
    };
    let first_group = |re: &Regex| {
        re.captures(descriptor)
            .and_then(|caps| caps.get(1))
            .map(|m| m.as_str().to_string())
    };
    let id = first_group(&LIST_ID);
    let order = first_group(&LIST_ORDER);
    let level = first_group(&LIST_LEVEL).and_then(|l| l.parse::<usize>().ok());

    match (id, order, level) {
        (Some(id), Some(order), Some(level)) => (Some(id), Some(order), Some(level)),
        _ => (None, None, Some(1)),
    }
}

/// Whether an explicit list item may extend the lists opened before it.
fn is_list_continuation(doc: &Document, element: NodeId) -> bool {
    match doc.previous_sibling(element) {
        Some(previous) => is_list(doc, previous),
        None => {
            let Some(parent) = doc.parent(element) else {
                return false;
            };
            is_list(doc, parent) && doc.previous_sibling(parent).is_none_or(|p| is_list(doc, p))
        }
    }
}

fn is_list(doc: &Document, id: NodeId) -> bool {
    doc.is_named(id, "ol") || doc.is_named(id, "ul")
}

/// Drop the rendered marker (`mso-list: Ignore` spans).
fn remove_bullet_element(doc: &mut Document, element: NodeId) {
    let markers: Vec<NodeId> = descendants(doc, element)
        .into_iter()
        .filter(|&id| {
            doc.is_named(id, "span")
                && doc
                    .style(id, "mso-list")
                    .is_some_and(|v| v.eq_ignore_ascii_case("ignore"))
        })
        .collect();
    TreeWriter::new(doc).remove_all(&markers);
}
