//! Source-specific normalizers.
//!
//! Each normalizer recognizes one clipboard source by a signature in the raw
//! markup and composes the filters in [`crate::filters`] into that source's
//! cleanup.

mod docs;
mod generic;
mod sheets;
mod word;

pub use docs::GoogleDocsNormalizer;
pub use generic::GenericNormalizer;
pub use sheets::GoogleSheetsNormalizer;
pub use word::MsWordNormalizer;

use crate::filters::parse::ParsedDocument;
use crate::options::PasteOptions;
use crate::payload::ClipboardPayload;

/// What a normalizer gets to work with.
pub struct NormalizationContext<'a> {
    pub payload: &'a ClipboardPayload,
    pub parsed: &'a mut ParsedDocument,
    pub options: &'a PasteOptions,
}

pub trait Normalizer {
    fn name(&self) -> &'static str;

    /// Whether the raw clipboard markup comes from this normalizer's source.
    fn is_active(&self, html: &str) -> bool;

    /// Rewrite the parsed fragment in place.
    fn execute(&self, ctx: &mut NormalizationContext<'_>);
}
