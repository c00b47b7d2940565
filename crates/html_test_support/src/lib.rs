//! Helpers shared by the paste integration tests.

/// Escape control characters and NBSP so diff lines stay on one line and show invisible spaces.
pub fn escape_text(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '\\' => out.push_str("\\\\"),
            '"' => out.push_str("\\\""),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            '\u{00A0}' => out.push_str("\\u{A0}"),
            ch if ch < ' ' => {
                use std::fmt::Write;
                let _ = write!(&mut out, "\\u{{{:02X}}}", ch as u32);
            }
            _ => out.push(ch),
        }
    }
    out
}

/// Report the first differing line with two lines of context on each side.
pub fn diff_lines(expected: &[String], actual: &[String]) -> String {
    use std::fmt::Write;

    fn line(lines: &[String], i: usize) -> &str {
        lines.get(i).map_or("<missing>", String::as_str)
    }
    let max = expected.len().max(actual.len());
    let mut out = String::new();

    match (0..max).find(|&i| line(expected, i) != line(actual, i)) {
        Some(first) => {
            let start = first.saturating_sub(2);
            let end = (first + 3).min(max);
            let _ = writeln!(out, "first mismatch at line {} (showing {}..={end}):", first + 1, start + 1);
            for i in start..end {
                let marker = if i == first { ">" } else { " " };
                let _ = writeln!(out, "{marker} {:>4}  expected: {}", i + 1, line(expected, i));
                let _ = writeln!(out, "{marker} {:>4}    actual: {}", i + 1, line(actual, i));
            }
        }
        None if expected.len() != actual.len() => {
            let _ = writeln!(out, "prefix matched but lengths differ");
        }
        None => {}
    }
    let _ = writeln!(out, "expected {} lines, actual {} lines", expected.len(), actual.len());
    out
}

pub mod fixtures;

/// Markup re-serialized through the parser, so quoting and entity spelling
/// do not matter when comparing.
pub fn canonical_html(markup: &str) -> String {
    html::to_html(&html::parse_fragment(markup))
}

/// One line per tag boundary, for readable diffs of single-line markup.
pub fn split_tags(markup: &str) -> Vec<String> {
    let mut lines = Vec::new();
    let mut current = String::new();
    for ch in markup.chars() {
        if ch == '<' && !current.is_empty() {
            lines.push(std::mem::take(&mut current));
        }
        current.push(ch);
        if ch == '>' {
            lines.push(std::mem::take(&mut current));
        }
    }
    if !current.is_empty() {
        lines.push(current);
    }
    lines
}

#[track_caller]
pub fn assert_html_eq(expected: &str, actual: &str) {
    let expected = canonical_html(expected);
    let actual = canonical_html(actual);
    if expected == actual {
        return;
    }
    let expected_lines: Vec<String> = split_tags(&expected).iter().map(|l| escape_text(l)).collect();
    let actual_lines: Vec<String> = split_tags(&actual).iter().map(|l| escape_text(l)).collect();
    panic!(
        "markup mismatch\n{}\nexpected: {expected}\n  actual: {actual}",
        diff_lines(&expected_lines, &actual_lines)
    );
}
