pub mod debug;
pub mod serialize;
pub mod traverse;

mod dom_builder;
mod entities;
mod tokenizer;
mod types;
mod writer;

use memchr::{memchr, memchr2};

/// True for `text/html` (and XHTML) clipboard or content types.
pub fn is_html(ct: Option<&str>) -> bool {
    let Some(value) = ct else {
        return false;
    };
    contains_ignore_ascii_case(value, b"text/html")
        || contains_ignore_ascii_case(value, b"application/xhtml")
}

/// ASCII case-insensitive substring search.
pub fn contains_ignore_ascii_case(haystack: &str, needle: &[u8]) -> bool {
    find_ignore_ascii_case(haystack, needle).is_some()
}

/// Byte offset of the first ASCII case-insensitive occurrence of `needle`.
pub fn find_ignore_ascii_case(haystack: &str, needle: &[u8]) -> Option<usize> {
    let hay = haystack.as_bytes();
    let n = needle.len();
    if n == 0 {
        return Some(0);
    }
    let hay_len = hay.len();
    if hay_len < n {
        return None;
    }
    let first = needle[0];
    let (a, b) = if first.is_ascii_alphabetic() {
        (first.to_ascii_lowercase(), first.to_ascii_uppercase())
    } else {
        (first, first)
    };
    let mut i = 0;
    while i + n <= hay_len {
        let rel = if a == b {
            memchr(a, &hay[i..])
        } else {
            memchr2(a, b, &hay[i..])
        }?;
        let pos = i + rel;
        if pos + n <= hay_len && hay[pos..pos + n].eq_ignore_ascii_case(needle) {
            return Some(pos);
        }
        i = pos + 1;
    }
    None
}

/// Tokenize and build `input` into a fragment document.
pub fn parse_fragment(input: &str) -> Document {
    build_document(&tokenize(input))
}

pub use crate::dom_builder::build_document;
pub use crate::serialize::{inner_html, outer_html, to_html};
pub use crate::tokenizer::tokenize;
pub use crate::types::{Document, ElementData, NodeId, NodeKind, Token};
pub use crate::writer::TreeWriter;
