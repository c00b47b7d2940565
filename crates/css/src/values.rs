/// CSS length with the absolute units office applications write.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Length {
    Px(f64),
    Pt(f64),
    Pc(f64),
    In(f64),
    Cm(f64),
    Mm(f64),
}

impl Length {
    /// Pixel value at 96 CSS pixels per inch.
    pub fn to_px(self) -> f64 {
        match self {
            Length::Px(v) => v,
            Length::Pt(v) => v * 96.0 / 72.0,
            Length::Pc(v) => v * 12.0 * 96.0 / 72.0,
            Length::In(v) => v * 96.0,
            Length::Cm(v) => v * 96.0 / 2.54,
            Length::Mm(v) => v / 10.0 * 96.0 / 2.54,
        }
    }
}

/// Leading decimal number of `value`, the way `parseFloat` reads it:
/// optional sign, digits, optional fraction. `".5in"` reads as `0.5`.
pub fn parse_float_prefix(value: &str) -> Option<f64> {
    let v = value.trim_start();
    let bytes = v.as_bytes();
    let mut end = 0;
    if matches!(bytes.first(), Some(b'+' | b'-')) {
        end += 1;
    }
    let digits_start = end;
    while end < bytes.len() && bytes[end].is_ascii_digit() {
        end += 1;
    }
    if end < bytes.len() && bytes[end] == b'.' {
        let dot = end;
        end += 1;
        while end < bytes.len() && bytes[end].is_ascii_digit() {
            end += 1;
        }
        if end == dot + 1 {
            end = dot;
        }
    }
    if end == digits_start {
        return None;
    }
    v[..end].parse::<f64>().ok().filter(|n| n.is_finite())
}

/// Parse `<number><unit>` for the supported absolute units.
pub fn parse_length(value: &str) -> Option<Length> {
    let v = value.trim();
    let num = parse_float_prefix(v)?;
    let unit = v.get(v.len().checked_sub(2)?..)?.to_ascii_lowercase();
    let length = match unit.as_str() {
        "px" => Length::Px(num),
        "pt" => Length::Pt(num),
        "pc" => Length::Pc(num),
        "in" => Length::In(num),
        "cm" => Length::Cm(num),
        "mm" => Length::Mm(num),
        _ => return None,
    };
    Some(length)
}

/// Format a pixel amount: rounded half-up to two decimals, trailing zeros dropped.
///
/// `16.0` -> `"16px"`, `37.795` -> `"37.8px"`.
pub fn to_px(value: f64) -> String {
    let rounded = (value * 100.0).round() / 100.0;
    if rounded == 0.0 {
        return "0px".to_string();
    }
    let fixed = format!("{rounded:.2}");
    let trimmed = fixed.trim_end_matches('0').trim_end_matches('.');
    format!("{trimmed}px")
}

pub fn is_px(value: Option<&str>) -> bool {
    value.is_some_and(|v| v.trim_end().ends_with("px"))
}

/// Convert a length in pt, pc, in, cm or mm to pixels. Values already in pixels,
/// other units and keywords come back unchanged.
pub fn convert_length_to_px(value: &str) -> String {
    match parse_length(value) {
        Some(Length::Px(_)) | None => value.to_string(),
        Some(length) => to_px(length.to_px()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn converts_each_unit() {
        assert_eq!(convert_length_to_px("12pt"), "16px");
        assert_eq!(convert_length_to_px("1pc"), "16px");
        assert_eq!(convert_length_to_px("0.5in"), "48px");
        assert_eq!(convert_length_to_px("1cm"), "37.8px");
        assert_eq!(convert_length_to_px("10mm"), "37.8px");
        assert_eq!(convert_length_to_px(".75pt"), "1px");
    }

    #[test]
    fn keeps_unconvertible_values() {
        assert_eq!(convert_length_to_px("13px"), "13px");
        assert_eq!(convert_length_to_px("50%"), "50%");
        assert_eq!(convert_length_to_px("auto"), "auto");
        assert_eq!(convert_length_to_px(""), "");
    }

    #[test]
    fn to_px_trims_trailing_zeros() {
        assert_eq!(to_px(100.0), "100px");
        assert_eq!(to_px(1.5), "1.5px");
        assert_eq!(to_px(0.125), "0.13px");
        assert_eq!(to_px(-0.001), "0px");
    }

    #[test]
    fn parse_float_prefix_matches_leading_number() {
        assert_eq!(parse_float_prefix("36.0pt"), Some(36.0));
        assert_eq!(parse_float_prefix("-.5in"), Some(-0.5));
        assert_eq!(parse_float_prefix("7."), Some(7.0));
        assert_eq!(parse_float_prefix("pt"), None);
        assert_eq!(parse_float_prefix("-"), None);
    }

    #[test]
    fn is_px_checks_suffix() {
        assert!(is_px(Some("48px")));
        assert!(!is_px(Some("36pt")));
        assert!(!is_px(None));
    }
}
