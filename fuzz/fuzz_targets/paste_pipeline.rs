#![no_main]

use libfuzzer_sys::fuzz_target;
use office_paste::{ClipboardPayload, Dispatcher, PasteData, PasteOptions};

// Prefixes that switch on each normalizer, so the fuzzer reaches them quickly.
const MARKERS: &[&str] = &[
    r#"<html xmlns:o="urn:schemas-microsoft-com:office:office">"#,
    r#"<b style="font-weight:normal;" id="docs-internal-guid-1">"#,
    "<google-sheets-html-origin>",
    "<pre>",
];

fuzz_target!(|data: &[u8]| {
    let Some((&selector, rest)) = data.split_first() else {
        return;
    };
    let body = String::from_utf8_lossy(rest);
    let html = format!("{}{body}", MARKERS[selector as usize % MARKERS.len()]);

    let options = PasteOptions {
        legal_lists: selector & 0x10 != 0,
        strip_ms_attributes: selector & 0x20 != 0,
        ..PasteOptions::default()
    };
    let dispatcher = Dispatcher::with_default_normalizers(options);
    let mut paste = PasteData::new(ClipboardPayload::from_html(html).with_rtf(&*body));
    dispatcher.process(&mut paste);
    let first = paste.to_html();
    assert!(!dispatcher.process(&mut paste));
    assert_eq!(paste.to_html(), first);
});
