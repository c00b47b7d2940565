use crate::filters::pre::expand_tabs_in_preformatted;
use crate::normalizers::{NormalizationContext, Normalizer};

/// Source-independent fixes; runs for any markup with preformatted text.
pub struct GenericNormalizer;

impl Normalizer for GenericNormalizer {
    fn name(&self) -> &'static str {
        "generic"
    }

    fn is_active(&self, html: &str) -> bool {
        html::contains_ignore_ascii_case(html, b"<pre")
    }

    fn execute(&self, ctx: &mut NormalizationContext<'_>) {
        expand_tabs_in_preformatted(&mut ctx.parsed.fragment, ctx.options.tab_width);
    }
}
