/// The MIME flavors of one clipboard read.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ClipboardPayload {
    pub html: String,
    pub rtf: Option<String>,
    pub plain: Option<String>,
}

impl ClipboardPayload {
    pub fn from_html(html: impl Into<String>) -> Self {
        Self {
            html: html.into(),
            ..Self::default()
        }
    }

    pub fn with_rtf(mut self, rtf: impl Into<String>) -> Self {
        self.rtf = Some(rtf.into());
        self
    }

    /// Build a payload from `(mime type, data)` pairs as a clipboard API reports them.
    /// The first entry of each flavor wins; unknown flavors are ignored.
    pub fn from_mime_entries<I, K, V>(entries: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: Into<String>,
    {
        let mut html = None;
        let mut rtf = None;
        let mut plain = None;
        for (mime, data) in entries {
            let mime = mime.as_ref();
            let slot = if html::is_html(Some(mime)) {
                &mut html
            } else if is_rtf(mime) {
                &mut rtf
            } else if html::contains_ignore_ascii_case(mime, b"text/plain") {
                &mut plain
            } else {
                log::trace!(target: "office_paste.payload", "ignoring clipboard flavor {mime}");
                continue;
            };
            if slot.is_none() {
                *slot = Some(data.into());
            }
        }
        Self {
            html: html.unwrap_or_default(),
            rtf,
            plain,
        }
    }
}

fn is_rtf(mime: &str) -> bool {
    html::contains_ignore_ascii_case(mime, b"text/rtf")
        || html::contains_ignore_ascii_case(mime, b"application/rtf")
}
