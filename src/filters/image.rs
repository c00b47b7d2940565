//! Image cleanup for Word markup.
//!
//! Word pastes every picture twice: as VML (`<v:shape>`, `<v:imagedata>`)
//! and as a plain `<img>` linked through `v:shapes`. Drawings made of shapes
//! carry their rendering in `o:gfxdata` and have no usable image at all. The
//! pass below keeps one `<img>` per real picture and then inlines pictures
//! that point at the local disk with bytes from the RTF flavor.

use std::collections::HashSet;

use html::traverse::descendants;
use html::{Document, NodeId, TreeWriter};
use url::Url;

use crate::filters::rtf::extract_image_blobs;

/// Shape ids containing one of these are images even when they carry `o:gfxdata`.
const SHAPE_ID_EXCEPTIONS: &[&str] = &["Chart"];

/// An `<img>` and its position among all images of the fragment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ImageCandidate {
    pub element: NodeId,
    pub position: usize,
}

/// Strip VML shapes and inline local images using pictures from `rtf`.
pub fn replace_images_source_with_base64(doc: &mut Document, rtf: Option<&str>) {
    let shape_ids = find_shape_ids(doc);
    remove_images_representing_shapes(doc, &shape_ids);
    insert_missing_images(doc, &shape_ids);
    remove_shape_elements(doc);

    let local = find_local_images(doc);
    if local.is_empty() {
        return;
    }
    let Some(rtf) = rtf else {
        log::debug!(
            target: "office_paste.image",
            "{} local image(s) left unresolved: no RTF payload",
            local.len()
        );
        return;
    };

    let blobs = extract_image_blobs(rtf);
    let mut writer = TreeWriter::new(doc);
    for candidate in local {
        match blobs.get(candidate.position) {
            Some(blob) => writer.set_attribute(candidate.element, "src", blob.to_data_uri()),
            None => log::debug!(
                target: "office_paste.image",
                "no RTF picture for image #{}",
                candidate.position
            ),
        }
    }
}

fn is_shape_element(doc: &Document, id: NodeId) -> bool {
    doc.name(id).is_some_and(|n| n.len() > 2 && n.starts_with("v:"))
}

/// Ids of VML elements that are drawings rather than pictures.
pub fn find_shape_ids(doc: &Document) -> HashSet<String> {
    let mut ids = HashSet::new();
    for id in descendants(doc, doc.root()) {
        if !is_shape_element(doc, id) {
            continue;
        }
        if doc.attr(id, "o:gfxdata").is_none_or(str::is_empty) {
            continue;
        }
        let Some(shape_id) = doc.attr(id, "id") else {
            continue;
        };
        let after_shape_type = doc
            .previous_sibling(id)
            .is_some_and(|prev| doc.is_named(prev, "v:shapetype"));
        let excepted = SHAPE_ID_EXCEPTIONS.iter().any(|e| shape_id.contains(e));
        if !after_shape_type && !excepted {
            ids.insert(shape_id.to_string());
        }
    }
    ids
}

/// Drop images that only render drawings, and images without a source.
fn remove_images_representing_shapes(doc: &mut Document, shape_ids: &HashSet<String>) {
    let doomed: Vec<NodeId> = descendants(doc, doc.root())
        .into_iter()
        .filter(|&id| doc.is_named(id, "img"))
        .filter(|&id| {
            let refs: Vec<&str> = doc
                .attr(id, "v:shapes")
                .map(|v| v.split(' ').filter(|s| !s.is_empty()).collect())
                .unwrap_or_default();
            let only_shapes = !refs.is_empty() && refs.iter().all(|r| shape_ids.contains(*r));
            only_shapes || doc.attr(id, "src").is_none_or(str::is_empty)
        })
        .collect();
    TreeWriter::new(doc).remove_all(&doomed);
}

/// Give each picture shape without a paired `<img>` a plain image next to it.
fn insert_missing_images(doc: &mut Document, shape_ids: &HashSet<String>) {
    let shapes: Vec<NodeId> = descendants(doc, doc.root())
        .into_iter()
        .filter(|&id| doc.is_named(id, "v:shape"))
        .filter(|&id| doc.attr(id, "id").is_none_or(|s| !shape_ids.contains(s)))
        .collect();

    for shape in shapes {
        let shape_id = doc.attr(shape, "id").map(str::to_string);
        if has_matching_image(doc, shape, shape_id.as_deref()) {
            continue;
        }
        let Some(src) = descendants(doc, shape)
            .into_iter()
            .find_map(|id| doc.attr(id, "src").filter(|s| !s.is_empty()))
            .map(str::to_string)
        else {
            continue;
        };
        let mut attributes = vec![("src".to_string(), Some(src))];
        if let Some(alt) = doc.attr(shape, "alt") {
            attributes.push(("alt".to_string(), Some(alt.to_string())));
        }
        let mut writer = TreeWriter::new(doc);
        let img = writer.create_element_with("img", attributes);
        writer.insert_after(img, shape);
        log::trace!(target: "office_paste.image", "synthesized <img> for shape {shape_id:?}");
    }
}

/// Whether an `<img>` among the shape's siblings (or their subtrees) references it.
fn has_matching_image(doc: &Document, shape: NodeId, shape_id: Option<&str>) -> bool {
    let Some(parent) = doc.parent(shape) else {
        return false;
    };
    descendants(doc, parent)
        .into_iter()
        .any(|id| doc.is_named(id, "img") && doc.attr(id, "v:shapes") == shape_id)
}

fn remove_shape_elements(doc: &mut Document) {
    let shapes: Vec<NodeId> = descendants(doc, doc.root())
        .into_iter()
        .filter(|&id| is_shape_element(doc, id))
        .collect();
    TreeWriter::new(doc).remove_all(&shapes);
}

/// Images whose source only resolves on the machine that produced the paste.
pub fn find_local_images(doc: &Document) -> Vec<ImageCandidate> {
    descendants(doc, doc.root())
        .into_iter()
        .filter(|&id| doc.is_named(id, "img"))
        .enumerate()
        .filter(|&(_, id)| doc.attr(id, "src").is_some_and(is_local_source))
        .map(|(position, element)| ImageCandidate { element, position })
        .collect()
}

fn is_local_source(src: &str) -> bool {
    let src = src.trim();
    src.get(..7).is_some_and(|p| p.eq_ignore_ascii_case("file://"))
        || Url::parse(src).is_ok_and(|url| url.scheme() == "file")
}
