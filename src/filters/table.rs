//! Table styling that office applications leave implicit.

use css::{BORDER_SIDES, border_side_style, convert_length_to_px, convert_lengths_in_value};
use html::traverse::descendants;
use html::{Document, NodeId, TreeWriter};

use crate::filters::top_level_elements;

/// Longhand length properties converted to pixels.
const LENGTH_PROPERTIES: &[&str] = &[
    "width",
    "height",
    "border-left-width",
    "border-top-width",
    "border-right-width",
    "border-bottom-width",
    "padding-left",
    "padding-top",
    "padding-right",
    "padding-bottom",
];

/// Shorthands whose length tokens are converted to pixels.
const LENGTH_SHORTHANDS: &[&str] = &[
    "border",
    "border-left",
    "border-top",
    "border-right",
    "border-bottom",
    "border-width",
    "padding",
];

/// Make default borders, alignment and pixel lengths explicit on tables and cells.
pub fn transform_tables(doc: &mut Document, default_alignment: bool) {
    let targets: Vec<NodeId> = descendants(doc, doc.root())
        .into_iter()
        .filter(|&id| doc.is_named(id, "table") || doc.is_named(id, "td") || doc.is_named(id, "th"))
        .collect();

    for id in targets {
        let unset_sides: Vec<&str> = match doc.element(id) {
            Some(element) => BORDER_SIDES
                .iter()
                .copied()
                .filter(|side| border_side_style(element, side).is_none())
                .collect(),
            None => continue,
        };
        let align_table = default_alignment && doc.is_named(id, "table") && !has_explicit_alignment(doc, id);
        let conversions = length_conversions(doc, id);

        let mut writer = TreeWriter::new(doc);
        if unset_sides.len() == BORDER_SIDES.len() {
            writer.set_style(id, "border-style", "none");
        } else {
            for side in unset_sides {
                writer.set_style(id, &format!("border-{side}-style"), "none");
            }
        }
        if align_table {
            writer.set_style(id, "margin-left", "0");
            writer.set_style(id, "margin-right", "auto");
        }
        for (property, value) in conversions {
            writer.set_style(id, property, value);
        }
    }
}

/// An `align` attribute, a float, or explicit horizontal margins, on the
/// table or on a wrapping `<div align>`.
fn has_explicit_alignment(doc: &Document, table: NodeId) -> bool {
    let Some(element) = doc.element(table) else {
        return false;
    };
    if element.has_attr("align")
        || element.has_style("float")
        || element.has_style("margin-left")
        || element.has_style("margin-right")
    {
        return true;
    }
    doc.parent(table)
        .is_some_and(|parent| doc.is_named(parent, "div") && doc.element(parent).is_some_and(|p| p.has_attr("align")))
}

fn length_conversions(doc: &Document, id: NodeId) -> Vec<(&'static str, String)> {
    let Some(element) = doc.element(id) else {
        return Vec::new();
    };
    let mut out = Vec::new();
    for &property in LENGTH_PROPERTIES {
        if let Some(value) = element.style(property) {
            let converted = convert_length_to_px(value);
            if converted != value {
                out.push((property, converted));
            }
        }
    }
    for &property in LENGTH_SHORTHANDS {
        if let Some(value) = element.style(property) {
            let converted = convert_lengths_in_value(value);
            if converted != value {
                out.push((property, converted));
            }
        }
    }
    out
}

/// Drop `width: 0px` from top-level tables; some sources emit it for auto-sized tables.
pub fn remove_invalid_table_width(doc: &mut Document) {
    let tables: Vec<NodeId> = top_level_elements(doc)
        .into_iter()
        .filter(|&id| doc.is_named(id, "table") && doc.style(id, "width") == Some("0px"))
        .collect();
    let mut writer = TreeWriter::new(doc);
    for table in tables {
        writer.remove_style(table, "width");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run(markup: &str, default_alignment: bool) -> String {
        let mut doc = html::parse_fragment(markup);
        css::attach_inline_styles(&mut doc);
        transform_tables(&mut doc, default_alignment);
        html::to_html(&doc)
    }

    #[test]
    fn cell_without_borders_gets_border_style_none() {
        assert_eq!(
            run("<table><tr><td>x</td></tr></table>", false),
            r#"<table style="border-style:none"><tr><td style="border-style:none">x</td></tr></table>"#
        );
    }

    #[test]
    fn partial_borders_are_kept() {
        assert_eq!(
            run(r#"<table><tr><td style="border-top:solid 1px">x</td></tr></table>"#, false),
            concat!(
                r#"<table style="border-style:none"><tr><td style="border-top:solid 1px;"#,
                r#"border-left-style:none;border-right-style:none;border-bottom-style:none">x</td></tr></table>"#
            )
        );
    }

    #[test]
    fn default_alignment_is_opt_in_and_respects_align() {
        assert_eq!(
            run("<table></table>", true),
            r#"<table style="border-style:none;margin-left:0;margin-right:auto"></table>"#
        );
        assert_eq!(
            run(r#"<table align="center"></table>"#, true),
            r#"<table align="center" style="border-style:none"></table>"#
        );
        assert_eq!(
            run(r#"<div align="right"><table></table></div>"#, true),
            r#"<div align="right"><table style="border-style:none"></table></div>"#
        );
    }

    #[test]
    fn lengths_are_converted_to_pixels() {
        assert_eq!(
            run(
                r#"<table style="border:none"><tr><td style="width:225.4pt;border:solid windowtext 1.0pt;padding:0cm 5.4pt 0cm 5.4pt">x</td></tr></table>"#,
                false
            ),
            concat!(
                r#"<table style="border:none"><tr><td style="width:300.53px;border:solid windowtext 1.33px;"#,
                r#"padding:0px 7.2px 0px 7.2px">x</td></tr></table>"#
            )
        );
    }

    #[test]
    fn zero_width_is_removed_from_top_level_tables() {
        let mut doc = html::parse_fragment(
            r#"<table style="width:0px;border:0"></table><div><table style="width:0px"></table></div>"#,
        );
        css::attach_inline_styles(&mut doc);
        remove_invalid_table_width(&mut doc);
        assert_eq!(
            html::to_html(&doc),
            r#"<table style="border:0"></table><div><table style="width:0px"></table></div>"#
        );
    }
}
