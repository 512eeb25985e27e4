use serde::{Deserialize, Serialize};

use crate::Lang;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Config {
    /// Directory the per-language `{lang}.json` files are served from,
    /// relative to the page.
    pub locales_path: String,
    pub default_lang: Lang,
    /// Query parameter carrying the selected language.
    pub param_name: String,
    /// Dictionary key for the document title, unless the root element
    /// overrides it with `data-i18n-title`.
    pub title_key: String,
    /// Whether `data-i18n-html` elements receive translations as markup.
    /// Dictionary content is injected unescaped, so only enable this for
    /// first-party dictionaries.
    pub allow_markup: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            locales_path: "./locales/".into(),
            default_lang: Lang::En,
            param_name: "lang".into(),
            title_key: "meta.title".into(),
            allow_markup: true,
        }
    }
}

impl Config {
    /// Parses a (possibly partial) JSON object; absent fields keep their
    /// defaults.
    pub fn from_json(text: &str) -> serde_json::Result<Self> {
        serde_json::from_str(text)
    }

    pub fn dictionary_url(&self, lang: Lang, stamp: u64) -> String {
        format!("{}{}.json?v={}", self.locales_path, lang.code(), stamp)
    }
}

#[cfg(test)]
mod tests {
    use super::Config;
    use crate::Lang;

    #[test]
    fn partial_json() {
        let config = Config::from_json(r#"{ "defaultLang": "de", "allowMarkup": false }"#).unwrap();
        assert_eq!(config.default_lang, Lang::De);
        assert!(!config.allow_markup);
        assert_eq!(config.param_name, "lang");
        assert_eq!(config.locales_path, "./locales/");
    }

    #[test]
    fn unsupported_default_is_rejected() {
        assert!(Config::from_json(r#"{ "defaultLang": "fr" }"#).is_err());
    }

    #[test]
    fn url() {
        let config = Config::default();
        assert_eq!(config.dictionary_url(Lang::De, 42), "./locales/de.json?v=42");
    }
}
