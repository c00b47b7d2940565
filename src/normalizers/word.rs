use std::sync::LazyLock;

use regex::Regex;

use crate::filters::bookmark::transform_bookmarks;
use crate::filters::image::replace_images_source_with_base64;
use crate::filters::list::reconstruct_lists;
use crate::filters::ms_attributes::remove_ms_attributes;
use crate::filters::table::{remove_invalid_table_width, transform_tables};
use crate::normalizers::{NormalizationContext, Normalizer};

static GENERATOR_META: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?i)<meta\s*name="?generator"?\s*content="?microsoft\s*word\s*\d+"?/?>"#)
        .expect("static regex is valid")
});

static OFFICE_NAMESPACE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?i)xmlns:o="urn:schemas-microsoft-com"#).expect("static regex is valid")
});

/// Markup copied from Microsoft Word (and other Office apps exporting Word HTML).
pub struct MsWordNormalizer;

impl Normalizer for MsWordNormalizer {
    fn name(&self) -> &'static str {
        "ms-word"
    }

    fn is_active(&self, html: &str) -> bool {
        GENERATOR_META.is_match(html) || OFFICE_NAMESPACE.is_match(html)
    }

    fn execute(&self, ctx: &mut NormalizationContext<'_>) {
        let options = ctx.options;
        let parsed = &mut *ctx.parsed;
        let fragment = &mut parsed.fragment;

        transform_bookmarks(fragment);
        reconstruct_lists(fragment, &parsed.stylesheet_text, options.legal_lists);
        replace_images_source_with_base64(fragment, ctx.payload.rtf.as_deref());
        transform_tables(fragment, options.table_default_alignment);
        remove_invalid_table_width(fragment);
        if options.strip_ms_attributes {
            remove_ms_attributes(fragment);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn detects_word_markup() {
        let n = MsWordNormalizer;
        assert!(n.is_active(r#"<meta name=Generator content="Microsoft Word 15">"#));
        assert!(n.is_active(r#"<meta name="generator" content="Microsoft Word 16"/>"#));
        assert!(n.is_active(
            r#"<html xmlns:v="urn:schemas-microsoft-com:vml" xmlns:o="urn:schemas-microsoft-com:office:office">"#
        ));
        assert!(!n.is_active(r#"<meta name="generator" content="LibreOffice">"#));
        assert!(!n.is_active("<p>plain</p>"));
    }
}
