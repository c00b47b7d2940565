use std::sync::LazyLock;

use regex::Regex;

use crate::filters::br::transform_block_brs_to_paragraphs;
use crate::filters::docs::{remove_bold_wrapper, unwrap_paragraph_in_list_item};
use crate::filters::footnote::reconstruct_footnotes;
use crate::normalizers::{NormalizationContext, Normalizer};

static DOCS_GUID: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"id=("|')docs-internal-guid-[-0-9a-f]+("|')"#).expect("static regex is valid")
});

/// Markup copied from Google Docs.
pub struct GoogleDocsNormalizer;

impl Normalizer for GoogleDocsNormalizer {
    fn name(&self) -> &'static str {
        "google-docs"
    }

    fn is_active(&self, html: &str) -> bool {
        DOCS_GUID.is_match(html)
    }

    fn execute(&self, ctx: &mut NormalizationContext<'_>) {
        let fragment = &mut ctx.parsed.fragment;

        // The side channel rides on the bold wrapper.
        if ctx.options.footnotes
            && let Err(err) = reconstruct_footnotes(fragment)
        {
            log::warn!(target: "office_paste.footnote", "skipping footnotes: {err}");
        }
        remove_bold_wrapper(fragment);
        unwrap_paragraph_in_list_item(fragment);
        transform_block_brs_to_paragraphs(fragment);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn detects_docs_guid() {
        let n = GoogleDocsNormalizer;
        assert!(n.is_active(r#"<b style="font-weight:normal;" id="docs-internal-guid-30d8-7fff-a1b2">"#));
        assert!(n.is_active("<b id='docs-internal-guid-1f'>"));
        assert!(!n.is_active(r#"<b id="docs-internal-guid-">"#));
        assert!(!n.is_active("<p>x</p>"));
    }
}
