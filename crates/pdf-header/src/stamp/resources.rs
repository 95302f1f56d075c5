//! Page-level plumbing: page boxes, resource dictionaries, content arrays

use crate::constants::MIN_PAGE_DIMENSION;
use crate::types::*;
use lopdf::{Dictionary, Document, Object, ObjectId, Stream};

/// Visible area of a page in user space
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PageBox {
    pub x0: f32,
    pub y0: f32,
    pub width: f32,
    pub height: f32,
}

impl PageBox {
    /// A4 portrait, used when a page declares no box at all
    pub const FALLBACK: PageBox = PageBox {
        x0: 0.0,
        y0: 0.0,
        width: 595.0,
        height: 842.0,
    };
}

/// Dereference once if `object` is a reference
fn resolve<'a>(doc: &'a Document, object: &'a Object) -> Result<&'a Object> {
    match object {
        Object::Reference(id) => Ok(doc.get_object(*id)?),
        other => Ok(other),
    }
}

/// Look up a page attribute, following the `/Parent` chain for inherited keys
fn inherited<'a>(doc: &'a Document, page_id: ObjectId, key: &[u8]) -> Option<&'a Object> {
    let mut current = Some(page_id);
    // Bounded walk in case of a cyclic page tree
    for _ in 0..64 {
        let dict = doc.get_dictionary(current?).ok()?;
        if let Ok(value) = dict.get(key) {
            return Some(value);
        }
        current = dict.get(b"Parent").and_then(Object::as_reference).ok();
    }
    None
}

fn parse_box(doc: &Document, object: &Object) -> Option<PageBox> {
    let array = resolve(doc, object).ok()?.as_array().ok()?;
    if array.len() != 4 {
        return None;
    }
    let mut values = [0.0_f32; 4];
    for (slot, item) in values.iter_mut().zip(array) {
        *slot = resolve(doc, item).ok()?.as_float().ok()?;
    }
    let [llx, lly, urx, ury] = values;
    Some(PageBox {
        x0: llx.min(urx),
        y0: lly.min(ury),
        width: (urx - llx).abs().max(MIN_PAGE_DIMENSION),
        height: (ury - lly).abs().max(MIN_PAGE_DIMENSION),
    })
}

/// The crop box of a page, or its media box when it has none
pub fn page_box(doc: &Document, page_id: ObjectId) -> PageBox {
    [b"CropBox".as_slice(), b"MediaBox".as_slice()]
        .iter()
        .find_map(|key| inherited(doc, page_id, key).and_then(|obj| parse_box(doc, obj)))
        .unwrap_or_else(|| {
            log::warn!("Page {:?} has no usable MediaBox, assuming A4", page_id);
            PageBox::FALLBACK
        })
}

/// Resolved copy of a page's resources, inherited ones included
fn page_resources(doc: &Document, page_id: ObjectId) -> Result<Dictionary> {
    match inherited(doc, page_id, b"Resources") {
        Some(object) => Ok(resolve(doc, object)?.as_dict()?.clone()),
        None => Ok(Dictionary::new()),
    }
}

/// A resource name not yet used in `dict`: `base`, then `base1`, `base2`...
fn unused_name(dict: &Dictionary, base: &str) -> String {
    if !dict.has(base.as_bytes()) {
        return base.to_string();
    }
    (1..)
        .map(|n| format!("{}{}", base, n))
        .find(|name| !dict.has(name.as_bytes()))
        .unwrap_or_else(|| base.to_string())
}

/// Adds entries to one page's resources.
///
/// The page ends up with an inline `/Resources` dictionary, so shared
/// dictionaries of other pages are never modified.
pub struct ResourceEditor<'a> {
    doc: &'a mut Document,
    page_id: ObjectId,
    resources: Dictionary,
}

impl<'a> ResourceEditor<'a> {
    pub fn open(doc: &'a mut Document, page_id: ObjectId) -> Result<Self> {
        let resources = page_resources(doc, page_id)?;
        Ok(Self {
            doc,
            page_id,
            resources,
        })
    }

    /// Register `value` under `category` (e.g. `Font`) and return its name
    pub fn add(&mut self, category: &str, base_name: &str, value: Object) -> Result<String> {
        let mut entries = match self.resources.get(category.as_bytes()) {
            Ok(object) => resolve(self.doc, object)?.as_dict()?.clone(),
            Err(_) => Dictionary::new(),
        };
        let name = unused_name(&entries, base_name);
        entries.set(name.as_str(), value);
        self.resources.set(category, Object::Dictionary(entries));
        Ok(name)
    }

    /// Write the merged dictionary back onto the page
    pub fn commit(self) -> Result<()> {
        let page = self.doc.get_dictionary_mut(self.page_id)?;
        page.set("Resources", Object::Dictionary(self.resources));
        Ok(())
    }
}

/// Append `overlay` to a page, fencing the existing content in `q`/`Q`.
///
/// `prologue_id` must be a stream holding a lone `q`; it can be shared
/// between pages.
pub fn wrap_and_append(
    doc: &mut Document,
    page_id: ObjectId,
    prologue_id: ObjectId,
    overlay: &str,
) -> Result<()> {
    let existing = doc.get_page_contents(page_id);
    let overlay_id = doc.add_object(Stream::new(
        Dictionary::new(),
        format!("\nQ\n{}", overlay).into_bytes(),
    ));

    let mut contents = Vec::with_capacity(existing.len() + 2);
    contents.push(Object::Reference(prologue_id));
    contents.extend(existing.into_iter().map(Object::Reference));
    contents.push(Object::Reference(overlay_id));

    let page = doc.get_dictionary_mut(page_id)?;
    page.set("Contents", Object::Array(contents));
    Ok(())
}
