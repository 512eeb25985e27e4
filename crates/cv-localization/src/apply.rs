//! Writes the active dictionary into the page.
//!
//! Each pass only touches an element when the key actually resolved and the
//! page does not already show the translated value, so re-applying an
//! unchanged dictionary performs no writes at all.

use crate::{
    page::{ATTR_MARKER, HTML_MARKER, PLACEHOLDER_MARKER, PageView, TEXT_MARKER, TITLE_MARKER},
    Config, Dictionary,
};

const DESCRIPTION_KEY: &str = "meta.description";

/// A translation worth writing: found, and not just the key echoed back.
fn resolved(dictionary: &Dictionary, key: &str) -> Option<String> {
    dictionary
        .text(key)
        .filter(|text| !text.is_empty() && text != key)
}

struct Applier<'a, P: PageView> {
    page: &'a mut P,
    dictionary: &'a Dictionary,
    writes: usize,
}

impl<P: PageView> Applier<'_, P> {
    fn translation_for(&self, node: &P::Node, marker: &str) -> Option<String> {
        let key = self.page.attribute(node, marker)?;
        resolved(self.dictionary, &key)
    }

    fn set_attribute(&mut self, node: &P::Node, name: &str, value: &str) {
        if self.page.attribute(node, name).as_deref() != Some(value) {
            self.page.set_attribute(node, name, value);
            self.writes += 1;
        }
    }

    fn set_text(&mut self, node: &P::Node, text: &str) {
        if self.page.text(node) != text {
            self.page.set_text(node, text);
            self.writes += 1;
        }
    }

    fn set_markup(&mut self, node: &P::Node, markup: &str) {
        if self.page.markup(node) != markup {
            self.page.set_markup(node, markup);
            self.writes += 1;
        }
    }

    fn texts(&mut self) {
        for node in self.page.marked(TEXT_MARKER) {
            // Attribute-targeted elements (meta tags) are handled separately.
            if self.page.attribute(&node, ATTR_MARKER).is_some() {
                continue;
            }
            if let Some(text) = self.translation_for(&node, TEXT_MARKER) {
                self.set_text(&node, &text);
            }
        }
    }

    fn markups(&mut self, allow_markup: bool) {
        for node in self.page.marked(HTML_MARKER) {
            if let Some(text) = self.translation_for(&node, HTML_MARKER) {
                if allow_markup {
                    self.set_markup(&node, &text);
                } else {
                    self.set_text(&node, &text);
                }
            }
        }
    }

    fn attributes(&mut self, marker: &str, target: &str) {
        for node in self.page.marked(marker) {
            if let Some(text) = self.translation_for(&node, marker) {
                self.set_attribute(&node, target, &text);
            }
        }
    }

    fn document_title(&mut self, default_key: &str) {
        let key = self
            .page
            .root_attribute(TITLE_MARKER)
            .filter(|key| !key.is_empty())
            .unwrap_or_else(|| default_key.to_owned());
        if let Some(title) = resolved(self.dictionary, &key) {
            if self.page.title() != title {
                self.page.set_title(&title);
                self.writes += 1;
            }
        }
    }

    fn named_attributes(&mut self) {
        for node in self.page.marked(ATTR_MARKER) {
            let Some(target) = self
                .page
                .attribute(&node, ATTR_MARKER)
                .filter(|attr| !attr.is_empty())
            else {
                continue;
            };
            if let Some(text) = self.translation_for(&node, TEXT_MARKER) {
                self.set_attribute(&node, &target, &text);
            }
        }
    }

    fn legacy_description(&mut self) {
        let Some(meta) = self.page.meta_description() else {
            return;
        };
        if self.page.attribute(&meta, ATTR_MARKER).is_some() {
            return;
        }
        if let Some(text) = resolved(self.dictionary, DESCRIPTION_KEY) {
            self.set_attribute(&meta, "content", &text);
        }
    }
}

/// Applies `dictionary` to every marked element of `page`. Returns the
/// number of writes made.
pub fn apply_translations<P: PageView>(
    page: &mut P,
    dictionary: &Dictionary,
    config: &Config,
) -> usize {
    let mut applier = Applier {
        page,
        dictionary,
        writes: 0,
    };
    applier.texts();
    applier.markups(config.allow_markup);
    applier.attributes(PLACEHOLDER_MARKER, "placeholder");
    applier.attributes(TITLE_MARKER, "title");
    applier.document_title(&config.title_key);
    applier.named_attributes();
    applier.legacy_description();
    log::debug!("Applied translations ({} writes)", applier.writes);
    applier.writes
}
