//! Picks the normalizers for a paste and runs them.

use crate::filters::parse::{ParsedDocument, parse_html};
use crate::normalizers::{
    GenericNormalizer, GoogleDocsNormalizer, GoogleSheetsNormalizer, MsWordNormalizer,
    NormalizationContext, Normalizer,
};
use crate::options::PasteOptions;
use crate::payload::ClipboardPayload;

/// Tree lines included in the trace dump after a run.
const OUTLINE_LINES: usize = 64;

/// One paste as it moves through the pipeline.
#[derive(Debug, Clone)]
pub struct PasteData {
    pub payload: ClipboardPayload,
    /// Parsed on first use, so payloads no normalizer claims are never parsed.
    pub parsed: Option<ParsedDocument>,
    /// Set once normalizers ran; later dispatches leave the data alone.
    pub transformed: bool,
}

impl PasteData {
    pub fn new(payload: ClipboardPayload) -> Self {
        Self {
            payload,
            parsed: None,
            transformed: false,
        }
    }

    pub fn stylesheet_text(&self) -> Option<&str> {
        self.parsed.as_ref().map(|p| p.stylesheet_text.as_str())
    }

    /// The normalized fragment, or the raw markup when nothing claimed the paste.
    pub fn to_html(&self) -> String {
        match &self.parsed {
            Some(parsed) => parsed.to_html(),
            None => self.payload.html.clone(),
        }
    }
}

struct Registered {
    normalizer: Box<dyn Normalizer>,
    priority: i32,
}

/// Priority-ordered normalizer registry.
pub struct Dispatcher {
    normalizers: Vec<Registered>,
    options: PasteOptions,
}

impl Default for Dispatcher {
    fn default() -> Self {
        Self::with_default_normalizers(PasteOptions::default())
    }
}

impl Dispatcher {
    /// A dispatcher with no normalizers.
    pub fn new(options: PasteOptions) -> Self {
        Self {
            normalizers: Vec::new(),
            options,
        }
    }

    /// Word, Docs, Sheets and the generic normalizer.
    pub fn with_default_normalizers(options: PasteOptions) -> Self {
        let mut dispatcher = Self::new(options);
        dispatcher.register(Box::new(MsWordNormalizer), 30);
        dispatcher.register(Box::new(GoogleDocsNormalizer), 20);
        dispatcher.register(Box::new(GoogleSheetsNormalizer), 20);
        dispatcher.register(Box::new(GenericNormalizer), 0);
        dispatcher
    }

    pub fn options(&self) -> &PasteOptions {
        &self.options
    }

    /// Higher priorities run first; equal priorities keep registration order.
    pub fn register(&mut self, normalizer: Box<dyn Normalizer>, priority: i32) {
        self.normalizers.push(Registered {
            normalizer,
            priority,
        });
        self.normalizers.sort_by(|a, b| b.priority.cmp(&a.priority));
    }

    /// Names of the normalizers that claim `html`, in run order.
    pub fn active_normalizers(&self, html: &str) -> Vec<&'static str> {
        self.matching(html).map(|n| n.name()).collect()
    }

    fn matching<'s>(&'s self, html: &str) -> impl Iterator<Item = &'s dyn Normalizer> {
        self.normalizers
            .iter()
            .map(|r| r.normalizer.as_ref())
            .filter(move |n| n.is_active(html))
    }

    /// Run every matching normalizer over `data`. Returns whether anything ran.
    pub fn process(&self, data: &mut PasteData) -> bool {
        if data.transformed {
            log::trace!(target: "office_paste.dispatch", "paste already normalized");
            return false;
        }
        let matched: Vec<&dyn Normalizer> = self.matching(&data.payload.html).collect();
        if matched.is_empty() {
            log::debug!(target: "office_paste.dispatch", "no normalizer matched");
            return false;
        }

        let PasteData {
            payload, parsed, ..
        } = data;
        let parsed = parsed.get_or_insert_with(|| parse_html(&payload.html));
        let mut ctx = NormalizationContext {
            payload,
            parsed,
            options: &self.options,
        };
        for normalizer in matched {
            log::debug!(target: "office_paste.dispatch", "running {}", normalizer.name());
            normalizer.execute(&mut ctx);
        }
        data.transformed = true;

        if log::log_enabled!(target: "office_paste.dispatch", log::Level::Trace)
            && let Some(parsed) = &data.parsed
        {
            for line in html::debug::outline(&parsed.fragment, OUTLINE_LINES) {
                log::trace!(target: "office_paste.dispatch", "{line}");
            }
        }
        true
    }
}

/// Normalize one clipboard payload with the default normalizers.
pub fn normalize_clipboard(payload: ClipboardPayload, options: &PasteOptions) -> PasteData {
    let dispatcher = Dispatcher::with_default_normalizers(options.clone());
    let mut data = PasteData::new(payload);
    dispatcher.process(&mut data);
    data
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    struct Recording {
        name: &'static str,
        marker: &'static str,
        log: Rc<RefCell<Vec<&'static str>>>,
    }

    impl Normalizer for Recording {
        fn name(&self) -> &'static str {
            self.name
        }

        fn is_active(&self, html: &str) -> bool {
            html.contains(self.marker)
        }

        fn execute(&self, _ctx: &mut NormalizationContext<'_>) {
            self.log.borrow_mut().push(self.name);
        }
    }

    fn recording(
        dispatcher: &mut Dispatcher,
        log: &Rc<RefCell<Vec<&'static str>>>,
        name: &'static str,
        marker: &'static str,
        priority: i32,
    ) {
        dispatcher.register(
            Box::new(Recording {
                name,
                marker,
                log: Rc::clone(log),
            }),
            priority,
        );
    }

    #[test]
    fn matching_normalizers_run_by_priority_then_registration() {
        let log = Rc::new(RefCell::new(Vec::new()));
        let mut dispatcher = Dispatcher::new(PasteOptions::default());
        recording(&mut dispatcher, &log, "low", "x", 0);
        recording(&mut dispatcher, &log, "first-mid", "x", 10);
        recording(&mut dispatcher, &log, "second-mid", "x", 10);
        recording(&mut dispatcher, &log, "high", "x", 50);
        recording(&mut dispatcher, &log, "inactive", "never", 100);

        let mut data = PasteData::new(ClipboardPayload::from_html("<p>x</p>"));
        assert!(dispatcher.process(&mut data));
        assert_eq!(*log.borrow(), ["high", "first-mid", "second-mid", "low"]);
        assert!(data.transformed);
    }

    #[test]
    fn second_dispatch_is_a_no_op() {
        let log = Rc::new(RefCell::new(Vec::new()));
        let mut dispatcher = Dispatcher::new(PasteOptions::default());
        recording(&mut dispatcher, &log, "only", "x", 0);

        let mut data = PasteData::new(ClipboardPayload::from_html("x"));
        assert!(dispatcher.process(&mut data));
        assert!(!dispatcher.process(&mut data));
        assert_eq!(log.borrow().len(), 1);
    }

    #[test]
    fn unmatched_payload_is_not_parsed() {
        let dispatcher = Dispatcher::default();
        let mut data = PasteData::new(ClipboardPayload::from_html("<p>plain</p>"));
        assert!(!dispatcher.process(&mut data));
        assert!(data.parsed.is_none());
        assert!(!data.transformed);
        assert_eq!(data.to_html(), "<p>plain</p>");
    }

    #[test]
    fn default_registry_order() {
        let dispatcher = Dispatcher::default();
        let html = r#"<html xmlns:o="urn:schemas-microsoft-com:office:office"><google-sheets-html-origin><b id="docs-internal-guid-1"><pre>x</pre>"#;
        assert_eq!(
            dispatcher.active_normalizers(html),
            ["ms-word", "google-docs", "google-sheets", "generic"]
        );
    }
}
