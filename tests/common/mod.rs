#![allow(dead_code)]

use office_paste::{ClipboardPayload, PasteData, PasteOptions, normalize_clipboard};

pub fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

pub fn normalize(html: &str) -> PasteData {
    normalize_with(html, &PasteOptions::default())
}

pub fn normalize_with(html: &str, options: &PasteOptions) -> PasteData {
    normalize_clipboard(ClipboardPayload::from_html(html), options)
}

pub fn normalize_with_rtf(html: &str, rtf: &str) -> PasteData {
    normalize_clipboard(
        ClipboardPayload::from_html(html).with_rtf(rtf),
        &PasteOptions::default(),
    )
}

/// Wrap body markup in the document shell Word puts on the clipboard.
pub fn word_document(stylesheet: &str, body: &str) -> String {
    format!(
        concat!(
            r#"<html xmlns:v="urn:schemas-microsoft-com:vml" xmlns:o="urn:schemas-microsoft-com:office:office" "#,
            r#"xmlns:w="urn:schemas-microsoft-com:office:word">"#,
            r#"<head><meta name=Generator content="Microsoft Word 15"><style>{}</style></head>"#,
            "<body lang=EN-US>{}</body></html>"
        ),
        stylesheet, body
    )
}
