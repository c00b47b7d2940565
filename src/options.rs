/// Capabilities the host editor declares for a paste.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PasteOptions {
    /// Honor outline ("legal") numbering by tagging such lists with `legal-list`.
    pub legal_lists: bool,
    /// Spell out the implicit left block alignment of pasted tables.
    pub table_default_alignment: bool,
    /// Drop `mso*` classes and styles after the Word transforms.
    pub strip_ms_attributes: bool,
    /// Rebuild footnote references from the Docs side channel.
    pub footnotes: bool,
    /// Tab stop width used inside `<pre>`.
    pub tab_width: usize,
}

impl Default for PasteOptions {
    fn default() -> Self {
        Self {
            legal_lists: false,
            table_default_alignment: true,
            strip_ms_attributes: false,
            footnotes: true,
            tab_width: 4,
        }
    }
}
