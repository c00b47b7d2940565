//! Clipboard normalization for content pasted from office suites.
//!
//! A paste runs through three stages:
//! - [`parse_html`] extracts the body fragment and stylesheet text from the raw markup;
//! - a [`Dispatcher`] sniffs the markup and picks the matching [`Normalizer`]s;
//! - each normalizer rewrites the fragment in place through [`html::TreeWriter`].
//!
//! ```
//! use office_paste::{ClipboardPayload, PasteOptions, normalize_clipboard};
//!
//! let html = r#"<html xmlns:o="urn:schemas-microsoft-com:office:office"><body>
//! <p style="mso-list:l0 level1 lfo0"><span style="mso-list:Ignore">1.</span>Item 1</p>
//! </body></html>"#;
//! let data = normalize_clipboard(ClipboardPayload::from_html(html), &PasteOptions::default());
//! assert!(data.transformed);
//! assert!(data.to_html().starts_with("<ol><li>"));
//! ```

pub mod dispatcher;
pub mod error;
pub mod filters;
pub mod normalizers;
pub mod options;
pub mod payload;

pub use crate::dispatcher::{Dispatcher, PasteData, normalize_clipboard};
pub use crate::error::FootnoteError;
pub use crate::filters::parse::{ParsedDocument, parse_html};
pub use crate::normalizers::{NormalizationContext, Normalizer};
pub use crate::options::PasteOptions;
pub use crate::payload::ClipboardPayload;
