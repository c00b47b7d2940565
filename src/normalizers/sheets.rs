use crate::filters::sheets::{remove_google_sheets_tag, remove_style_block, remove_xmlns_attribute};
use crate::filters::table::remove_invalid_table_width;
use crate::normalizers::{NormalizationContext, Normalizer};

/// Markup copied from Google Sheets.
pub struct GoogleSheetsNormalizer;

impl Normalizer for GoogleSheetsNormalizer {
    fn name(&self) -> &'static str {
        "google-sheets"
    }

    fn is_active(&self, html: &str) -> bool {
        html::contains_ignore_ascii_case(html, b"<google-sheets-html-origin")
    }

    fn execute(&self, ctx: &mut NormalizationContext<'_>) {
        let fragment = &mut ctx.parsed.fragment;
        remove_google_sheets_tag(fragment);
        remove_xmlns_attribute(fragment);
        remove_invalid_table_width(fragment);
        remove_style_block(fragment);
    }
}
