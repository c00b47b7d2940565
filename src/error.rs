//! Error types for the paste pipeline.
//!
//! Almost every step degrades to a default instead of failing. The footnote
//! side channel is the exception: it is opaque JSON embedded by the source
//! application and gets a real error type so the caller can log and move on.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum FootnoteError {
    #[error("footnote data is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("footnote data has an unexpected shape: {0}")]
    UnexpectedShape(&'static str),
}
