use crate::{Lang, SwitchButton};

pub const TEXT_MARKER: &str = "data-i18n";
pub const HTML_MARKER: &str = "data-i18n-html";
pub const PLACEHOLDER_MARKER: &str = "data-i18n-placeholder";
pub const TITLE_MARKER: &str = "data-i18n-title";
pub const ATTR_MARKER: &str = "data-i18n-attr";

/// The slice of the document the localizer needs. The browser runtime
/// implements it over `web-sys`; tests implement it over a plain vector.
pub trait PageView {
    type Node;

    /// All elements carrying the `marker` attribute, in document order.
    fn marked(&self, marker: &str) -> Vec<Self::Node>;
    fn attribute(&self, node: &Self::Node, name: &str) -> Option<String>;
    fn set_attribute(&mut self, node: &Self::Node, name: &str, value: &str);
    fn text(&self, node: &Self::Node) -> String;
    fn set_text(&mut self, node: &Self::Node, text: &str);
    fn markup(&self, node: &Self::Node) -> String;
    /// Replaces the element's children with parsed `markup`, unescaped.
    fn set_markup(&mut self, node: &Self::Node, markup: &str);
    /// Attribute of the document's root (`<html>`) element.
    fn root_attribute(&self, name: &str) -> Option<String>;
    fn title(&self) -> String;
    fn set_title(&mut self, title: &str);
    /// The `<meta name="description">` element, if the page has one.
    fn meta_description(&self) -> Option<Self::Node>;
    /// True while the document is still being parsed.
    fn is_parsing(&self) -> bool;
    /// Clears the container matched by `selector` and fills it with
    /// `buttons`. Returns false when no such container exists.
    fn replace_switcher(&mut self, selector: &str, buttons: &[SwitchButton]) -> bool;
    /// Announces a completed language switch to other page components.
    fn language_changed(&mut self, lang: Lang);
}
