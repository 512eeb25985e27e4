use cv_localization::{ButtonPosition, Lang, PageView, SwitchButton};
use wasm_bindgen::{closure::Closure, JsCast, JsValue};
use web_sys::{
    CssStyleDeclaration, CustomEvent, CustomEventInit, Document, Element,
    HtmlElement,
};

pub const LANGUAGE_CHANGED_EVENT: &str = "i18nLanguageChanged";

const BUTTON_CLASS: &str = "lang-switch-btn";

/// Inline styles, so the switcher looks right even before the stylesheet
/// has loaded.
const BUTTON_CSS: &str = "padding: 0.5rem 0.75rem; font-size: 0.875rem; font-weight: 500; \
    border: 1px solid #d1d5db; cursor: pointer; transition: all 0.2s; background: white; \
    color: #6b7280;";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Look {
    Idle,
    Hover,
    Active,
}

impl Look {
    /// Background, text and border colours.
    fn colors(self) -> (&'static str, &'static str, &'static str) {
        match self {
            Look::Idle => ("white", "#6b7280", "#d1d5db"),
            Look::Hover => ("#f9fafb", "#374151", "#9ca3af"),
            Look::Active => ("#374151", "white", "#374151"),
        }
    }

    fn paint(self, style: &CssStyleDeclaration) {
        let (background, color, border) = self.colors();
        for (property, value) in [
            ("background-color", background),
            ("color", color),
            ("border-color", border),
        ] {
            if let Err(e) = style.set_property(property, value) {
                log::debug!("Could not set {}: {:?}", property, e);
            }
        }
    }
}

fn button_css(position: ButtonPosition) -> String {
    let mut css = String::from(BUTTON_CSS);
    if position.rounds_left() {
        css.push_str(" border-top-left-radius: 0.375rem; border-bottom-left-radius: 0.375rem;");
    }
    if position.rounds_right() {
        css.push_str(" border-top-right-radius: 0.375rem; border-bottom-right-radius: 0.375rem;");
    }
    if !position.rounds_left() {
        css.push_str(" border-left: none;");
    }
    css
}

fn pressed(active: bool) -> &'static str {
    if active { "true" } else { "false" }
}

/// The live document.
pub struct DomPage {
    document: Document,
}

impl DomPage {
    pub fn current() -> Option<Self> {
        match web_sys::window().and_then(|window| window.document()) {
            Some(document) => Some(Self { document }),
            None => {
                log::error!("No document available, localization disabled");
                None
            }
        }
    }

    /// Runs `callback` once the document has finished parsing.
    pub fn on_ready(&self, callback: impl FnOnce() + 'static) {
        let handler = Closure::once(callback);
        if let Err(e) = self
            .document
            .add_event_listener_with_callback("DOMContentLoaded", handler.as_ref().unchecked_ref())
        {
            log::error!("Could not wait for DOMContentLoaded: {:?}", e);
        }
        handler.forget();
    }

    fn button(&self, selector: &str, button: &SwitchButton) -> Result<HtmlElement, JsValue> {
        let element: HtmlElement = self.document.create_element("button")?.dyn_into()?;
        element.set_text_content(Some(&button.label));
        element.style().set_css_text(&button_css(button.position));
        if button.active {
            Look::Active.paint(&element.style());
        }
        element.set_class_name(BUTTON_CLASS);
        element.set_attribute("type", "button")?;
        element.set_attribute("aria-label", &button.aria_label)?;
        element.set_attribute("aria-pressed", pressed(button.active))?;
        element.set_attribute("data-lang", button.lang.code())?;

        let lang = button.lang;
        let container = selector.to_owned();
        let document = self.document.clone();
        let on_click = Closure::<dyn FnMut()>::new(move || {
            wasm_bindgen_futures::spawn_local(crate::set_lang(lang.code().to_owned()));
            mark_active(&document, &container, lang);
        });
        element.add_event_listener_with_callback("click", on_click.as_ref().unchecked_ref())?;
        on_click.forget();

        for (event, look) in [("mouseenter", Look::Hover), ("mouseleave", Look::Idle)] {
            let target = element.clone();
            let on_hover = Closure::<dyn FnMut()>::new(move || {
                if crate::SESSION.read().language() != lang {
                    look.paint(&target.style());
                }
            });
            element.add_event_listener_with_callback(event, on_hover.as_ref().unchecked_ref())?;
            on_hover.forget();
        }
        Ok(element)
    }
}

/// Restyles the buttons of a switcher for `lang` without rebuilding it.
fn mark_active(document: &Document, selector: &str, lang: Lang) {
    let Ok(buttons) = document.query_selector_all(&format!("{} .{}", selector, BUTTON_CLASS)) else {
        return;
    };
    for button in (0..buttons.length())
        .filter_map(|i| buttons.item(i))
        .filter_map(|node| node.dyn_into::<HtmlElement>().ok())
    {
        let active = button.get_attribute("data-lang").as_deref() == Some(lang.code());
        let look = if active { Look::Active } else { Look::Idle };
        look.paint(&button.style());
        if let Err(e) = button.set_attribute("aria-pressed", pressed(active)) {
            log::debug!("Could not update aria-pressed: {:?}", e);
        }
    }
}

impl PageView for DomPage {
    type Node = Element;

    fn marked(&self, marker: &str) -> Vec<Element> {
        let Ok(nodes) = self.document.query_selector_all(&format!("[{}]", marker)) else {
            return Vec::new();
        };
        (0..nodes.length())
            .filter_map(|i| nodes.item(i))
            .filter_map(|node| node.dyn_into::<Element>().ok())
            .collect()
    }

    fn attribute(&self, node: &Element, name: &str) -> Option<String> {
        node.get_attribute(name)
    }

    fn set_attribute(&mut self, node: &Element, name: &str, value: &str) {
        if let Err(e) = node.set_attribute(name, value) {
            log::warn!("Could not set the {} attribute: {:?}", name, e);
        }
    }

    fn text(&self, node: &Element) -> String {
        node.text_content().unwrap_or_default()
    }

    fn set_text(&mut self, node: &Element, text: &str) {
        node.set_text_content(Some(text));
    }

    fn markup(&self, node: &Element) -> String {
        node.inner_html()
    }

    fn set_markup(&mut self, node: &Element, markup: &str) {
        node.set_inner_html(markup);
    }

    fn root_attribute(&self, name: &str) -> Option<String> {
        self.document.document_element()?.get_attribute(name)
    }

    fn title(&self) -> String {
        self.document.title()
    }

    fn set_title(&mut self, title: &str) {
        self.document.set_title(title);
    }

    fn meta_description(&self) -> Option<Element> {
        self.document
            .query_selector(r#"meta[name="description"]"#)
            .ok()
            .flatten()
    }

    fn is_parsing(&self) -> bool {
        self.document.ready_state() == "loading"
    }

    fn replace_switcher(&mut self, selector: &str, buttons: &[SwitchButton]) -> bool {
        let Some(container) = self.document.query_selector(selector).ok().flatten() else {
            return false;
        };
        container.set_inner_html("");
        for button in buttons {
            let appended = self
                .button(selector, button)
                .and_then(|element| container.append_child(&element));
            if let Err(e) = appended {
                log::warn!("Could not add the {} button: {:?}", button.label, e);
            }
        }
        true
    }

    fn language_changed(&mut self, lang: Lang) {
        let Some(window) = web_sys::window() else {
            return;
        };
        let detail = js_sys::Object::new();
        let dispatched = js_sys::Reflect::set(&detail, &"lang".into(), &lang.code().into())
            .and_then(|_| {
                let init = CustomEventInit::new();
                init.set_detail(&detail);
                CustomEvent::new_with_event_init_dict(LANGUAGE_CHANGED_EVENT, &init)
            })
            .and_then(|event| window.dispatch_event(&event));
        if let Err(e) = dispatched {
            log::warn!("Could not dispatch {}: {:?}", LANGUAGE_CHANGED_EVENT, e);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{button_css, pressed, Look};
    use cv_localization::ButtonPosition;

    #[test]
    fn segment_corners() {
        let first = button_css(ButtonPosition::First);
        assert!(first.contains("border-top-left-radius"));
        assert!(!first.contains("border-top-right-radius"));
        assert!(!first.contains("border-left: none"));

        let last = button_css(ButtonPosition::Last);
        assert!(last.contains("border-bottom-right-radius"));
        assert!(last.contains("border-left: none"));

        let middle = button_css(ButtonPosition::Middle);
        assert!(!middle.contains("radius"));

        let only = button_css(ButtonPosition::Only);
        assert!(only.contains("border-top-left-radius"));
        assert!(only.contains("border-top-right-radius"));
    }

    #[test]
    fn looks() {
        assert_eq!(Look::Active.colors().0, "#374151");
        assert_eq!(Look::Idle.colors(), ("white", "#6b7280", "#d1d5db"));
        assert_eq!(pressed(true), "true");
    }
}
