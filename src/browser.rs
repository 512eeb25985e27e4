use cv_localization::{Environment, Fetch, LoadError};
use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_futures::JsFuture;
use web_sys::{Response, Url, UrlSearchParams, Window};

pub struct BrowserEnv {
    window: Window,
}

impl BrowserEnv {
    pub fn current() -> Option<Self> {
        match web_sys::window() {
            Some(window) => Some(Self { window }),
            None => {
                log::error!("No window available, localization disabled");
                None
            }
        }
    }

    fn rewrite_url(&self, name: &str, value: &str) -> Result<(), JsValue> {
        let url = Url::new(&self.window.location().href()?)?;
        url.search_params().set(name, value);
        self.window
            .history()?
            .replace_state_with_url(&JsValue::NULL, "", Some(&url.href()))
    }
}

impl Environment for BrowserEnv {
    fn query_param(&self, name: &str) -> Option<String> {
        let search = self.window.location().search().ok()?;
        UrlSearchParams::new_with_str(&search).ok()?.get(name)
    }

    fn locale(&self) -> Option<String> {
        self.window.navigator().language()
    }

    fn replace_query_param(&self, name: &str, value: &str) {
        if let Err(e) = self.rewrite_url(name, value) {
            log::warn!("Could not update the '{}' URL parameter: {}", name, describe(&e));
        }
    }

    fn timestamp(&self) -> u64 {
        js_sys::Date::now() as u64
    }
}

/// `window.fetch`, reading the body as text.
pub struct WindowFetch;

impl Fetch for WindowFetch {
    async fn fetch_text(&self, url: &str) -> Result<String, LoadError> {
        let window = web_sys::window().ok_or_else(|| LoadError::network(url, "no window"))?;
        let response: Response = JsFuture::from(window.fetch_with_str(url))
            .await
            .and_then(|value| value.dyn_into::<Response>())
            .map_err(|e| LoadError::network(url, describe(&e)))?;
        if !response.ok() {
            return Err(LoadError::Status {
                url: url.into(),
                status: response.status(),
            });
        }
        let body = response
            .text()
            .map_err(|e| LoadError::network(url, describe(&e)))?;
        JsFuture::from(body)
            .await
            .map_err(|e| LoadError::network(url, describe(&e)))?
            .as_string()
            .ok_or_else(|| LoadError::network(url, "response body is not text"))
    }
}

fn describe(value: &JsValue) -> String {
    if let Some(text) = value.as_string() {
        return text;
    }
    match value.dyn_ref::<js_sys::Error>() {
        Some(error) => String::from(error.message()),
        None => format!("{:?}", value),
    }
}
