//! Golden paste fixtures stored as TOML.
//!
//! ```toml
//! format = "office-paste-fixtures-v1"
//!
//! [[cases]]
//! id = "word-single-item"
//! html = '''<p style="mso-list:l0 level1 lfo0">...</p>'''
//! expected = '''<ol><li>...</li></ol>'''
//! ```

use std::collections::BTreeSet;
use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;

pub const FIXTURE_FORMAT_V1: &str = "office-paste-fixtures-v1";

#[derive(Clone, Debug, Deserialize, PartialEq, Eq)]
struct FixtureManifest {
    format: String,
    #[serde(default)]
    cases: Vec<PasteCase>,
}

/// One clipboard payload and the markup it must normalize to.
#[derive(Clone, Debug, Deserialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct PasteCase {
    pub id: String,
    pub html: String,
    #[serde(default)]
    pub rtf: Option<String>,
    pub expected: String,
    /// Expected `transformed` flag; most cases are claimed by some normalizer.
    #[serde(default = "default_true")]
    pub transformed: bool,
    #[serde(default)]
    pub options: CaseOptions,
}

/// Per-case overrides of the paste options; unset fields keep the defaults.
#[derive(Clone, Debug, Default, Deserialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct CaseOptions {
    pub legal_lists: Option<bool>,
    pub table_default_alignment: Option<bool>,
    pub strip_ms_attributes: Option<bool>,
    pub footnotes: Option<bool>,
    pub tab_width: Option<usize>,
}

fn default_true() -> bool {
    true
}

/// Every case from the `*.toml` files in `dir`, sorted by file name.
pub fn load_fixture_dir(dir: &Path) -> Vec<(PathBuf, PasteCase)> {
    let mut files: Vec<PathBuf> = fs::read_dir(dir)
        .unwrap_or_else(|err| panic!("failed to read fixture dir {dir:?}: {err}"))
        .filter_map(|entry| entry.ok().map(|e| e.path()))
        .filter(|path| path.extension().is_some_and(|ext| ext == "toml"))
        .collect();
    files.sort();
    assert!(!files.is_empty(), "no fixture files in {dir:?}");

    let mut seen = BTreeSet::new();
    let mut out = Vec::new();
    for path in files {
        for case in load_fixture_file(&path) {
            assert!(
                seen.insert(case.id.clone()),
                "duplicate fixture id '{}' in {path:?}",
                case.id
            );
            out.push((path.clone(), case));
        }
    }
    out
}

pub fn load_fixture_file(path: &Path) -> Vec<PasteCase> {
    let content = fs::read_to_string(path)
        .unwrap_or_else(|err| panic!("failed to read fixture file {path:?}: {err}"));
    parse_fixtures(&content, path)
}

fn parse_fixtures(content: &str, path: &Path) -> Vec<PasteCase> {
    let manifest: FixtureManifest = toml::from_str(content)
        .unwrap_or_else(|err| panic!("failed to parse fixture TOML {path:?}: {err}"));
    assert_eq!(
        manifest.format, FIXTURE_FORMAT_V1,
        "unsupported fixture format in {path:?}"
    );
    for case in &manifest.cases {
        assert!(!case.id.trim().is_empty(), "fixture with empty id in {path:?}");
    }
    manifest.cases
}
