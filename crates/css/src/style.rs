use crate::syntax::parse_declarations;
use crate::values::{convert_length_to_px, parse_length};
use html::traverse::descendants;
use html::{Document, ElementData, TreeWriter};

pub const BORDER_SIDES: [&str; 4] = ["left", "top", "right", "bottom"];

const BORDER_STYLE_KEYWORDS: &[&str] = &[
    "none", "hidden", "dotted", "dashed", "solid", "double", "groove", "ridge", "inset", "outset",
];

// If the element has an inline style attribute, return its value
pub fn get_inline_style(attributes: &[(String, Option<String>)]) -> Option<&str> {
    attributes
        .iter()
        .find(|(k, _)| k.eq_ignore_ascii_case("style"))
        .and_then(|(_, v)| v.as_deref())
}

/// Move every element's `style="..."` attribute into its parsed style list.
pub fn attach_inline_styles(doc: &mut Document) {
    let root = doc.root();
    let targets: Vec<_> = descendants(doc, root)
        .into_iter()
        .filter_map(|id| {
            let element = doc.element(id)?;
            let inline = get_inline_style(&element.attributes)?;
            Some((id, parse_declarations(inline)))
        })
        .collect();
    log::trace!(target: "css.style", "{} inline style attribute(s)", targets.len());

    let mut writer = TreeWriter::new(doc);
    for (id, declarations) in targets {
        writer.remove_attribute(id, "style");
        for declaration in declarations {
            writer.set_style(id, &declaration.name, declaration.value);
        }
    }
}

fn is_border_style_keyword(token: &str) -> bool {
    BORDER_STYLE_KEYWORDS
        .iter()
        .any(|k| k.eq_ignore_ascii_case(token))
}

fn style_keyword_in(value: &str) -> Option<&str> {
    value.split_ascii_whitespace().find(|t| is_border_style_keyword(t))
}

/// Border style for one side, read from the longhand or any shorthand that sets it.
pub fn border_side_style<'a>(element: &'a ElementData, side: &str) -> Option<&'a str> {
    if let Some(value) = element.style(&format!("border-{side}-style")) {
        return Some(value);
    }
    if let Some(value) = element.style(&format!("border-{side}"))
        && let Some(keyword) = style_keyword_in(value)
    {
        return Some(keyword);
    }
    if let Some(value) = element.style("border-style") {
        let parts: Vec<&str> = value.split_ascii_whitespace().collect();
        // top right bottom left, with the usual 1-4 value expansion.
        let index = match side {
            "top" => 0,
            "right" => 1,
            "bottom" => 2,
            _ => 3,
        };
        let picked = match parts.len() {
            0 => None,
            1 => Some(parts[0]),
            2 => Some(parts[index % 2]),
            3 => Some(parts[if index == 3 { 1 } else { index }]),
            _ => Some(parts[index]),
        };
        if picked.is_some() {
            return picked;
        }
    }
    element.style("border").and_then(style_keyword_in)
}

/// Convert every length token of a (possibly shorthand) value to pixels.
pub fn convert_lengths_in_value(value: &str) -> String {
    value
        .split_ascii_whitespace()
        .map(|token| {
            if parse_length(token).is_some() {
                convert_length_to_px(token)
            } else {
                token.to_string()
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use html::parse_fragment;

    fn first_element(doc: &Document) -> &ElementData {
        let id = doc.first_child(doc.root()).unwrap();
        doc.element(id).unwrap()
    }

    #[test]
    fn attach_inline_styles_moves_attribute_into_style_list() {
        let mut doc = parse_fragment(
            r#"<p class=MsoListParagraph style="mso-list:l0 level1 lfo1;margin-left:36.0pt">x</p>"#,
        );
        attach_inline_styles(&mut doc);
        let p = first_element(&doc);
        assert!(!p.has_attr("style"));
        assert_eq!(p.style("mso-list"), Some("l0 level1 lfo1"));
        assert_eq!(p.style("margin-left"), Some("36.0pt"));
        assert_eq!(
            html::to_html(&doc),
            r#"<p class="MsoListParagraph" style="mso-list:l0 level1 lfo1;margin-left:36.0pt">x</p>"#
        );
    }

    #[test]
    fn border_side_style_reads_shorthands() {
        let mut doc = parse_fragment(
            r#"<td style="border:solid windowtext 1.0pt"></td><td style="border-style:none dotted"></td><td style="border-top:1px dashed red"></td>"#,
        );
        attach_inline_styles(&mut doc);
        let cells = doc.children(doc.root()).to_vec();
        let td = |i: usize| doc.element(cells[i]).unwrap();

        assert_eq!(border_side_style(td(0), "left"), Some("solid"));
        assert_eq!(border_side_style(td(1), "top"), Some("none"));
        assert_eq!(border_side_style(td(1), "left"), Some("dotted"));
        assert_eq!(border_side_style(td(2), "top"), Some("dashed"));
        assert_eq!(border_side_style(td(2), "left"), None);
    }

    #[test]
    fn convert_lengths_in_shorthand() {
        assert_eq!(
            convert_lengths_in_value("solid windowtext 1.0pt"),
            "solid windowtext 1.33px"
        );
        assert_eq!(convert_lengths_in_value("0cm 5.4pt 0cm 5.4pt"), "0px 7.2px 0px 7.2px");
    }
}
