//! Lenient HTML tokenizer for clipboard markup.
//!
//! Tag and attribute names are ASCII `[A-Za-z0-9:_.-]` and are lowercased, so vendor
//! namespaced names such as `o:p`, `v:shape` or `o:gfxdata` survive as-is.
//!
//! Known limitations (intentional):
//! - Not an HTML5 state machine: no parse-error recovery beyond what clipboard
//!   producers actually emit.
//! - `<!...>` and `<?...>` constructs other than comments and doctypes are bogus
//!   comments and are dropped (this covers leftover `<![endif]-->` markers).
//! - A `<` not followed by a name start, `/` or `!` is literal text.
use crate::entities::decode_entities;
use crate::traverse::is_void_element;
use crate::types::Token;
use memchr::memchr;

const HTML_COMMENT_START: &str = "<!--";
const HTML_COMMENT_END: &str = "-->";

// it only attempts matches starting at ASCII <
// < cannot appear in UTF-8 continuation bytes
const SCRIPT_CLOSE_TAG: &[u8] = b"</script";
const STYLE_CLOSE_TAG: &[u8] = b"</style";

fn starts_with_ignore_ascii_case_at(haystack: &[u8], start: usize, needle: &[u8]) -> bool {
    haystack.len() >= start + needle.len()
        && haystack[start..start + needle.len()].eq_ignore_ascii_case(needle)
}

fn is_name_char(c: u8) -> bool {
    c.is_ascii_alphanumeric() || c == b'-' || c == b'_' || c == b':' || c == b'.'
}

fn find_rawtext_close_tag(haystack: &str, close_tag: &[u8]) -> Option<(usize, usize)> {
    let hay_bytes = haystack.as_bytes();
    let len = hay_bytes.len();
    let n = close_tag.len();
    debug_assert!(n >= 2 && close_tag[0] == b'<' && close_tag[1] == b'/');
    let mut i = 0;
    while i + n <= len {
        let rel = memchr(b'<', &hay_bytes[i..])?;
        i += rel;
        if i + n > len {
            return None;
        }
        if hay_bytes[i + 1] == b'/' && starts_with_ignore_ascii_case_at(hay_bytes, i, close_tag) {
            let mut k = i + n;
            // Only ASCII whitespace is accepted before `>`.
            while k < len && hay_bytes[k].is_ascii_whitespace() {
                k += 1;
            }
            if k < len && hay_bytes[k] == b'>' {
                return Some((i, k + 1));
            }
        }
        i += 1;
    }
    None
}

fn skip_past_gt(bytes: &[u8], from: usize) -> usize {
    match memchr(b'>', &bytes[from.min(bytes.len())..]) {
        Some(rel) => from + rel + 1,
        None => bytes.len(),
    }
}

/// Tokenizes markup into a flat token stream.
pub fn tokenize(input: &str) -> Vec<Token> {
    let mut out = Vec::new();
    let bytes = input.as_bytes();
    let len = bytes.len();
    let mut i = 0;
    let mut text_start = 0;

    let flush_text = |out: &mut Vec<Token>, start: usize, end: usize| {
        if start < end {
            let decoded = decode_entities(&input[start..end]);
            if !decoded.is_empty() {
                out.push(Token::Text(decoded));
            }
        }
    };

    // Invariant: slice endpoints are only taken at ASCII structural bytes, which are
    // always UTF-8 char boundaries.
    while i < len {
        let Some(rel) = memchr(b'<', &bytes[i..]) else {
            break;
        };
        i += rel;
        let next = bytes.get(i + 1).copied();

        if input[i..].starts_with(HTML_COMMENT_START) {
            flush_text(&mut out, text_start, i);
            let body_start = i + HTML_COMMENT_START.len();
            match input[body_start..].find(HTML_COMMENT_END) {
                Some(end) => {
                    out.push(Token::Comment(input[body_start..body_start + end].to_string()));
                    i = body_start + end + HTML_COMMENT_END.len();
                }
                None => {
                    out.push(Token::Comment(input[body_start..].to_string()));
                    i = len;
                }
            }
            text_start = i;
            continue;
        }

        if next == Some(b'!') || next == Some(b'?') {
            flush_text(&mut out, text_start, i);
            if starts_with_ignore_ascii_case_at(bytes, i, b"<!doctype") {
                let end = skip_past_gt(bytes, i + 2);
                let inner = input[i + 2..end].trim_end_matches('>').trim();
                out.push(Token::Doctype(inner.to_string()));
                i = end;
            } else {
                log::trace!(target: "html.tokenizer", "dropping bogus comment at {i}");
                i = skip_past_gt(bytes, i + 2);
            }
            text_start = i;
            continue;
        }

        if next == Some(b'/') {
            let start = i + 2;
            let mut j = start;
            while j < len && is_name_char(bytes[j]) {
                j += 1;
            }
            if j == start {
                // `</>` and `</ ...>` carry nothing.
                flush_text(&mut out, text_start, i);
                i = skip_past_gt(bytes, j);
                text_start = i;
                continue;
            }
            flush_text(&mut out, text_start, i);
            let name = input[start..j].to_ascii_lowercase();
            i = skip_past_gt(bytes, j);
            out.push(Token::EndTag(name));
            text_start = i;
            continue;
        }

        if !next.is_some_and(|c| c.is_ascii_alphabetic()) {
            // Literal `<`; keep it in the pending text run.
            i += 1;
            continue;
        }

        flush_text(&mut out, text_start, i);
        let start = i + 1;
        let mut k = start;
        while k < len && is_name_char(bytes[k]) {
            k += 1;
        }
        let name = input[start..k].to_ascii_lowercase();
        let mut attributes: Vec<(String, Option<String>)> = Vec::new();
        let mut self_closing = false;

        loop {
            while k < len && bytes[k].is_ascii_whitespace() {
                k += 1;
            }
            if k >= len {
                break;
            }
            if bytes[k] == b'>' {
                k += 1;
                break;
            }
            if bytes[k] == b'/' {
                if k + 1 < len && bytes[k + 1] == b'>' {
                    self_closing = true;
                    k += 2;
                    break;
                }
                k += 1;
                continue;
            }
            let name_start = k;
            while k < len && is_name_char(bytes[k]) {
                k += 1;
            }
            if name_start == k {
                k += 1;
                continue;
            }
            let attribute_name = input[name_start..k].to_ascii_lowercase();

            while k < len && bytes[k].is_ascii_whitespace() {
                k += 1;
            }
            let value = if k < len && bytes[k] == b'=' {
                k += 1;
                while k < len && bytes[k].is_ascii_whitespace() {
                    k += 1;
                }
                if k < len && (bytes[k] == b'"' || bytes[k] == b'\'') {
                    let quote = bytes[k];
                    k += 1;
                    let vstart = k;
                    while k < len && bytes[k] != quote {
                        k += 1;
                    }
                    let raw = &input[vstart..k];
                    if k < len {
                        k += 1;
                    }
                    Some(decode_entities(raw))
                } else {
                    let vstart = k;
                    while k < len && !bytes[k].is_ascii_whitespace() && bytes[k] != b'>' {
                        if bytes[k] == b'/' && k + 1 < len && bytes[k + 1] == b'>' {
                            break;
                        }
                        k += 1;
                    }
                    Some(decode_entities(&input[vstart..k]))
                }
            } else {
                None
            };
            // First occurrence wins, as in browsers.
            if !attributes.iter().any(|(n, _)| *n == attribute_name) {
                attributes.push((attribute_name, value));
            }
        }

        if is_void_element(&name) {
            self_closing = true;
        }
        let rawtext = !self_closing && (name == "script" || name == "style");
        out.push(Token::StartTag {
            name: name.clone(),
            attributes,
            self_closing,
        });
        i = k;
        text_start = i;

        if rawtext {
            let close_tag = if name == "script" {
                SCRIPT_CLOSE_TAG
            } else {
                STYLE_CLOSE_TAG
            };
            match find_rawtext_close_tag(&input[i..], close_tag) {
                Some((rel_start, rel_end)) => {
                    let raw = &input[i..i + rel_start];
                    if !raw.is_empty() {
                        out.push(Token::Text(raw.to_string()));
                    }
                    out.push(Token::EndTag(name));
                    i += rel_end;
                }
                None => {
                    // Missing close tag: the remainder is rawtext.
                    let raw = &input[i..];
                    if !raw.is_empty() {
                        out.push(Token::Text(raw.to_string()));
                    }
                    out.push(Token::EndTag(name));
                    i = len;
                }
            }
            text_start = i;
        }
    }
    flush_text(&mut out, text_start, len);
    out
}
