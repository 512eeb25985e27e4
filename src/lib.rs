//! Browser entry points for the résumé page.
//!
//! The page script loads this module and gets the same surface the old
//! hand-written helper offered (`t`, `setLang`, `getCurrentLang`, ...). The
//! module initializes itself on load: it reads an optional configuration from
//! `<html data-i18n-config="...">`, resolves the language from the URL or the
//! browser, fetches the matching dictionary and swaps the page text.
//!
//! All state lives in [`SESSION`]. The lock is never held across an `.await`
//! or while the change event is dispatched, so listeners may call back into
//! any entry point.

mod browser;
mod dom;

use std::sync::LazyLock;

use cv_localization::{loader::load_dictionary, Config, Init, Lang, Localizer, PageView};
use parking_lot::RwLock;
use wasm_bindgen::prelude::*;

use browser::{BrowserEnv, WindowFetch};
use dom::DomPage;

pub static SESSION: LazyLock<RwLock<Localizer>> =
    LazyLock::new(|| RwLock::new(Localizer::default()));

/// Root element attribute holding the configuration applied before `init`.
const CONFIG_ATTRIBUTE: &str = "data-i18n-config";

#[wasm_bindgen(start)]
pub fn start() {
    let level = if cfg!(debug_assertions) {
        log::Level::Debug
    } else {
        log::Level::Info
    };
    if console_log::init_with_level(level).is_err() {
        log::debug!("A logger is already installed");
    }
    let page_config = DomPage::current().and_then(|page| page.root_attribute(CONFIG_ATTRIBUTE));
    if let Some(json) = page_config {
        if let Err(e) = configure(&json) {
            log::warn!("Ignoring {}: {:?}", CONFIG_ATTRIBUTE, e);
        }
    }
    wasm_bindgen_futures::spawn_local(init());
}

/// Translation for a dotted key, or `fallback`, or the key itself.
#[wasm_bindgen]
pub fn t(key: &str, fallback: Option<String>) -> String {
    SESSION.read().translate(key, fallback.as_deref())
}

/// Loads `lang` with the current configuration and hands the result to the
/// session. The lock is only taken around the synchronous steps.
async fn load_into(page: &mut DomPage, env: &BrowserEnv, lang: Lang) -> Option<Init> {
    let config = SESSION.read().config().clone();
    let loaded = load_dictionary(&config, &WindowFetch, env, lang).await;
    SESSION.write().finish_load(page, lang, loaded)
}

#[wasm_bindgen(js_name = setLang)]
pub async fn set_lang(lang: String) {
    let (Some(env), Some(mut page)) = (BrowserEnv::current(), DomPage::current()) else {
        return;
    };
    let Some(target) = SESSION.write().switch_to(&env, &lang) else {
        return;
    };
    if load_into(&mut page, &env, target).await.is_some() {
        page.language_changed(target);
    }
}

#[wasm_bindgen(js_name = getCurrentLang)]
pub fn get_current_lang() -> String {
    SESSION.read().language().code().to_owned()
}

#[wasm_bindgen(js_name = getSupportedLangs)]
pub fn get_supported_langs() -> js_sys::Array {
    Localizer::supported()
        .iter()
        .map(|lang| JsValue::from_str(lang.code()))
        .collect()
}

/// The raw dictionary of the active language as a plain JS object.
#[wasm_bindgen(js_name = getTranslations)]
pub fn get_translations() -> Result<JsValue, JsValue> {
    let text = serde_json::to_string(SESSION.read().dictionary())
        .map_err(|e| JsValue::from_str(&e.to_string()))?;
    js_sys::JSON::parse(&text)
}

#[wasm_bindgen(js_name = hasTranslation)]
pub fn has_translation(key: &str) -> bool {
    SESSION.read().has_key(key)
}

/// Re-applies the current dictionary. Returns the number of writes made.
#[wasm_bindgen(js_name = updatePageText)]
pub fn update_page_text() -> usize {
    match DomPage::current() {
        Some(mut page) => SESSION.write().apply(&mut page),
        None => 0,
    }
}

#[wasm_bindgen(js_name = createLanguageSwitcher)]
pub fn create_language_switcher(selector: &str) -> bool {
    match DomPage::current() {
        Some(mut page) => SESSION.read().build_switcher(&mut page, selector),
        None => false,
    }
}

/// Replaces the configuration with a JSON object such as
/// `{"localesPath": "/i18n/", "defaultLang": "de"}`. Once the page has been
/// initialized the active language is kept and its dictionary is reloaded
/// from the new location.
#[wasm_bindgen]
pub fn configure(json: &str) -> Result<(), JsValue> {
    let config = Config::from_json(json).map_err(|e| JsValue::from_str(&e.to_string()))?;
    let reload = SESSION.write().configure(config);
    if let Some(lang) = reload {
        wasm_bindgen_futures::spawn_local(show_language(lang));
    }
    Ok(())
}

/// Loads `lang` into the page, waiting for the document if it is still being
/// parsed.
async fn show_language(lang: Lang) {
    let (Some(env), Some(mut page)) = (BrowserEnv::current(), DomPage::current()) else {
        return;
    };
    if let Some(Init::Deferred) = load_into(&mut page, &env, lang).await {
        page.on_ready(|| {
            update_page_text();
        });
    }
}

#[wasm_bindgen]
pub async fn init() {
    let Some(env) = BrowserEnv::current() else {
        return;
    };
    let lang = SESSION.write().resolve(&env);
    show_language(lang).await;
}
