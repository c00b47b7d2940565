//! Picture extraction from the RTF clipboard flavor.
//!
//! Word puts a `{\pict ...}` group for every image of the selection into the
//! RTF flavor, in document order, with the bitmap as hex digits.

use std::sync::LazyLock;

use base64::Engine as _;
use base64::engine::general_purpose::STANDARD;
use regex::Regex;

const PICTURE_HEADER: &str =
    r"\{\\pict(?s:.)+?\\bliptag-?\d+(?:\\blipupi-?\d+)?(?:\{\\\*\\blipuid\s?[\da-fA-F]+)?[\s}]*?";

static PICTURE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!(r"(?:{PICTURE_HEADER})([\da-fA-F\s]+)\}}")).expect("static regex is valid")
});

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageMime {
    Png,
    Jpeg,
}

impl ImageMime {
    pub fn as_str(self) -> &'static str {
        match self {
            ImageMime::Png => "image/png",
            ImageMime::Jpeg => "image/jpeg",
        }
    }
}

/// One embedded picture, still hex encoded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HexImageBlob {
    pub hex: String,
    pub mime: ImageMime,
}

impl HexImageBlob {
    pub fn to_data_uri(&self) -> String {
        format!("data:{};base64,{}", self.mime.as_str(), hex_to_base64(&self.hex))
    }
}

/// Every PNG or JPEG picture of `rtf`, in order. Other picture kinds
/// (metafiles, bitmaps) are skipped.
pub fn extract_image_blobs(rtf: &str) -> Vec<HexImageBlob> {
    let mut blobs = Vec::new();
    for caps in PICTURE.captures_iter(rtf) {
        let whole = caps.get(0).map_or("", |m| m.as_str());
        let mime = if whole.contains(r"\pngblip") {
            ImageMime::Png
        } else if whole.contains(r"\jpegblip") {
            ImageMime::Jpeg
        } else {
            continue;
        };
        let body = caps.get(1).map_or("", |m| m.as_str());
        blobs.push(HexImageBlob {
            hex: body.chars().filter(char::is_ascii_hexdigit).collect(),
            mime,
        });
    }
    log::debug!(target: "office_paste.image", "{} picture(s) in RTF payload", blobs.len());
    blobs
}

/// Decode hex digit pairs and encode the bytes as standard base64.
///
/// A trailing odd digit is ignored. Input with non-hex characters encodes to
/// an empty string.
pub fn hex_to_base64(digits: &str) -> String {
    let pairs = &digits.as_bytes()[..digits.len() & !1];
    match hex::decode(pairs) {
        Ok(bytes) => STANDARD.encode(bytes),
        Err(err) => {
            log::debug!(target: "office_paste.image", "undecodable picture data: {err}");
            String::new()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hex_to_base64_vectors() {
        assert_eq!(hex_to_base64("48656c6c6f20576f726c6421"), "SGVsbG8gV29ybGQh");
        assert_eq!(hex_to_base64(""), "");
        assert_eq!(hex_to_base64("ff"), "/w==");
        assert_eq!(hex_to_base64("FFfe00"), "//4A");
    }

    #[test]
    fn odd_trailing_digit_is_dropped() {
        assert_eq!(hex_to_base64("414"), "QQ==");
    }

    #[test]
    fn invalid_digits_give_empty_payload() {
        assert_eq!(hex_to_base64("4gzz"), "");
    }

    #[test]
    fn picture_body_keeps_only_hex_digits() {
        let rtf = "{\\pict\\pngblip\\bliptag1 89 50\r\n4e47}";
        let blobs = extract_image_blobs(rtf);
        assert_eq!(blobs.len(), 1);
        assert_eq!(blobs[0].hex, "89504e47");
    }

    #[test]
    fn extracts_png_and_jpeg_in_order() {
        let rtf = concat!(
            r"{\rtf1{\*\shppict{\pict{\*\picprop}\picw100\pngblip\bliptag-12345{\*\blipuid 00ff}",
            "\n89504e47\n0d0a}}",
            r"{\pict\wmetafile8\picw10\bliptag7 0102}",
            r"{\pict\jpegblip\bliptag42\blipupi96{\*\blipuid abc}ffd8 ffe0}}"
        );
        let blobs = extract_image_blobs(rtf);
        assert_eq!(
            blobs,
            vec![
                HexImageBlob {
                    hex: "89504e470d0a".into(),
                    mime: ImageMime::Png
                },
                HexImageBlob {
                    hex: "ffd8ffe0".into(),
                    mime: ImageMime::Jpeg
                },
            ]
        );
    }

    #[test]
    fn data_uri_uses_mime() {
        let blob = HexImageBlob {
            hex: "48656c6c6f".into(),
            mime: ImageMime::Jpeg,
        };
        assert_eq!(blob.to_data_uri(), "data:image/jpeg;base64,SGVsbG8=");
    }

    #[test]
    fn rtf_without_pictures_is_empty() {
        assert!(extract_image_blobs(r"{\rtf1\ansi hello}").is_empty());
    }
}
