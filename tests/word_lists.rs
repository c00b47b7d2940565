mod common;

use common::{init_logging, normalize, normalize_with, word_document};
use office_paste::PasteOptions;

fn item(list: u32, level: u32, marker: &str, text: &str) -> String {
    format!(
        r#"<p class=MsoListParagraphCxSpMiddle style="mso-list:l{list} level{level} lfo1"><span style="mso-list:Ignore">{marker}</span>{text}</p>"#
    )
}

#[test]
fn outline_with_mixed_levels_and_formats() {
    init_logging();
    let stylesheet = concat!(
        "@list l0:level1 { mso-level-number-format:alpha-lower; mso-level-tab-stop:none; } ",
        "@list l0:level2 { mso-level-number-format:bullet; }"
    );
    let body = [
        item(0, 1, "a.", "First"),
        item(0, 2, "o", "Nested"),
        item(0, 2, "o", "Nested again"),
        item(0, 1, "b.", "Second"),
    ]
    .concat();
    let out = normalize(&word_document(stylesheet, &body)).to_html();

    assert!(out.starts_with(r#"<ol style="list-style-type:lower-alpha"><li>"#), "{out}");
    assert_eq!(out.matches("<ul").count(), 1, "{out}");
    assert!(out.contains(r#"<ul style="list-style-type:circle"><li>"#), "{out}");
    assert_eq!(out.matches("<li>").count(), 4, "{out}");
    assert!(out.ends_with("Second</p></li></ol>"), "{out}");
    assert!(!out.contains("mso-list:Ignore"), "{out}");
}

#[test]
fn numbering_resumes_across_interrupting_paragraph() {
    let body = [
        item(0, 1, "1.", "One"),
        item(0, 1, "2.", "Two"),
        "<p class=MsoNormal>Interruption</p>".to_string(),
        item(0, 1, "3.", "Three"),
    ]
    .concat();
    let out = normalize(&word_document("", &body)).to_html();
    assert!(
        out.contains(r#"<p class="MsoNormal">Interruption</p><ol start="3"><li>"#),
        "{out}"
    );
}

#[test]
fn start_at_is_taken_from_the_stylesheet() {
    let stylesheet = "@list l3:level1 { mso-level-start-at:4; mso-level-number-format:roman-upper; }";
    let out = normalize(&word_document(stylesheet, &item(3, 1, "IV.", "Four"))).to_html();
    assert!(
        out.starts_with(r#"<ol start="4" style="list-style-type:upper-roman"><li>"#),
        "{out}"
    );
}

#[test]
fn legal_numbering_gets_class_only_when_enabled() {
    let stylesheet = r#"@list l0:level1 { mso-level-text:"%1\.%2"; }"#;
    let markup = word_document(stylesheet, &item(0, 1, "1.1", "Clause"));

    assert!(normalize(&markup).to_html().starts_with("<ol><li>"));

    let options = PasteOptions {
        legal_lists: true,
        ..PasteOptions::default()
    };
    let out = normalize_with(&markup, &options).to_html();
    assert!(out.starts_with(r#"<ol class="legal-list"><li>"#), "{out}");
}

#[test]
fn headings_can_be_list_items() {
    let body = r#"<h1 style="mso-list:l0 level1 lfo1"><span style="mso-list:Ignore">1.</span>Intro</h1>"#;
    let out = normalize(&word_document("", body)).to_html();
    assert_eq!(
        out,
        r#"<ol><li><h1 style="mso-list:l0 level1 lfo1">Intro</h1></li></ol>"#
    );
}
