/// Named entities office clipboard producers emit. Anything else passes through.
const NAMED_ENTITIES: &[(&str, char)] = &[
    ("amp", '&'),
    ("lt", '<'),
    ("gt", '>'),
    ("quot", '"'),
    ("apos", '\''),
    ("nbsp", '\u{00A0}'),
    ("ensp", '\u{2002}'),
    ("emsp", '\u{2003}'),
    ("shy", '\u{00AD}'),
    ("middot", '\u{00B7}'),
    ("sect", '\u{00A7}'),
    ("bull", '\u{2022}'),
    ("ndash", '\u{2013}'),
    ("mdash", '\u{2014}'),
    ("hellip", '\u{2026}'),
    ("lsquo", '\u{2018}'),
    ("rsquo", '\u{2019}'),
    ("ldquo", '\u{201C}'),
    ("rdquo", '\u{201D}'),
    ("copy", '\u{00A9}'),
    ("reg", '\u{00AE}'),
    ("trade", '\u{2122}'),
    ("deg", '\u{00B0}'),
];

const MAX_ENTITY_NAME: usize = 6;

/// Match `&name;` at `start`, returning the decoded char and the consumed byte count.
fn match_named_entity(bytes: &[u8], start: usize) -> Option<(char, usize)> {
    let name_start = start + 1;
    let mut j = name_start;
    while j < bytes.len() && j - name_start <= MAX_ENTITY_NAME && bytes[j].is_ascii_alphabetic() {
        j += 1;
    }
    if bytes.get(j) != Some(&b';') || j == name_start {
        return None;
    }
    let name = &bytes[name_start..j];
    NAMED_ENTITIES
        .iter()
        .find(|(n, _)| n.as_bytes() == name)
        .map(|&(_, ch)| (ch, j + 1 - start))
}

const MAX_HEX_DIGITS: usize = 6; // 0x10FFFF
const MAX_DEC_DIGITS: usize = 7; // 1114111

/// End index (the `;`) of a digit run starting at `start`, bounded by `max_digits`.
fn scan_numeric_entity(bytes: &[u8], start: usize, max_digits: usize, radix: u32) -> Option<usize> {
    let run = bytes[start.min(bytes.len())..]
        .iter()
        .take(max_digits + 1)
        .position(|&b| !(b as char).is_digit(radix))?;
    (run > 0 && run <= max_digits && bytes[start + run] == b';').then_some(start + run)
}

/// Match `&#...;` at `start`. `Err` carries the end of a well-delimited but
/// undecodable reference so it can be copied through whole.
fn match_numeric_entity(s: &str, start: usize) -> Option<Result<(char, usize), usize>> {
    let bytes = s.as_bytes();
    let (digits_start, max_digits, radix) = match bytes.get(start + 1..start + 3) {
        Some([b'#', b'x' | b'X']) => (start + 3, MAX_HEX_DIGITS, 16),
        Some([b'#', _]) => (start + 2, MAX_DEC_DIGITS, 10),
        _ if bytes.get(start + 1) == Some(&b'#') => (start + 2, MAX_DEC_DIGITS, 10),
        _ => return None,
    };
    let end = scan_numeric_entity(bytes, digits_start, max_digits, radix)?;
    let decoded = u32::from_str_radix(&s[digits_start..end], radix)
        .ok()
        .and_then(char::from_u32);
    Some(match decoded {
        Some(ch) => Ok((ch, end + 1 - start)),
        None => Err(end + 1),
    })
}

/// End of a reference-like run that failed to decode. Stops after `;` or
/// before whitespace and `&`, so a following reference still decodes.
fn malformed_entity_end(bytes: &[u8], start: usize) -> usize {
    for (offset, &b) in bytes[start + 1..].iter().enumerate() {
        let j = start + 1 + offset;
        match b {
            b';' => return j + 1,
            b'&' => return j,
            b if b.is_ascii_whitespace() => return j,
            _ => {}
        }
    }
    bytes.len()
}

/// Decode the named entities in [`NAMED_ENTITIES`] plus numeric references.
///
/// Named references are case-sensitive and need their semicolon. Numeric
/// references (`&#183;`, `&#xB7;`) decode only when semicolon-terminated,
/// within the digit limits, and naming a Unicode scalar value. Everything
/// else is copied through unchanged.
pub(crate) fn decode_entities(s: &str) -> String {
    let bytes = s.as_bytes();
    let mut out = String::with_capacity(s.len());
    let mut copy_start = 0;
    let mut i = 0;

    while let Some(rel) = bytes[i..].iter().position(|&b| b == b'&') {
        let amp = i + rel;
        out.push_str(&s[copy_start..amp]);

        i = if let Some((ch, consumed)) = match_named_entity(bytes, amp) {
            out.push(ch);
            amp + consumed
        } else {
            match match_numeric_entity(s, amp) {
                Some(Ok((ch, consumed))) => {
                    out.push(ch);
                    amp + consumed
                }
                Some(Err(end)) => {
                    out.push_str(&s[amp..end]);
                    end
                }
                None if bytes.get(amp + 1) == Some(&b'#') => {
                    let end = malformed_entity_end(bytes, amp);
                    out.push_str(&s[amp..end]);
                    end
                }
                None => {
                    out.push('&');
                    amp + 1
                }
            }
        };
        copy_start = i;
    }

    out.push_str(&s[copy_start..]);
    out
}
