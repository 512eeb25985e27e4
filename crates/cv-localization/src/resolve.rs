use crate::{Config, Lang};

/// The ambient browser state the localizer reads and writes besides the
/// document itself.
pub trait Environment {
    /// Value of a query parameter of the current page URL.
    fn query_param(&self, name: &str) -> Option<String>;
    /// The locale the browser reports, e.g. `de-DE`.
    fn locale(&self) -> Option<String>;
    /// Rewrites a query parameter in place, without navigating or pushing a
    /// history entry.
    fn replace_query_param(&self, name: &str, value: &str);
    /// Milliseconds since the epoch, used to bust caches on dictionary
    /// requests.
    fn timestamp(&self) -> u64;
}

pub fn lang_from_query(env: &impl Environment, config: &Config) -> Option<Lang> {
    env.query_param(&config.param_name)
        .as_deref()
        .and_then(Lang::from_code)
}

pub fn lang_from_locale(env: &impl Environment) -> Option<Lang> {
    env.locale().as_deref().and_then(Lang::from_locale)
}

/// URL parameter, then browser locale, then the configured default.
pub fn resolve_language(env: &impl Environment, config: &Config) -> Lang {
    lang_from_query(env, config)
        .or_else(|| lang_from_locale(env))
        .unwrap_or(config.default_lang)
}

#[cfg(test)]
mod tests {
    use super::resolve_language;
    use crate::{tests::FakeEnv, Config, Lang};

    #[test]
    fn query_beats_locale() {
        let env = FakeEnv::new("?lang=de", Some("en-US"));
        assert_eq!(resolve_language(&env, &Config::default()), Lang::De);
    }

    #[test]
    fn locale_when_no_query() {
        let env = FakeEnv::new("", Some("de-CH"));
        assert_eq!(resolve_language(&env, &Config::default()), Lang::De);
    }

    #[test]
    fn unsupported_locale_falls_back_to_default() {
        let env = FakeEnv::new("", Some("fr"));
        assert_eq!(resolve_language(&env, &Config::default()), Lang::En);

        let config = Config {
            default_lang: Lang::De,
            ..Default::default()
        };
        assert_eq!(resolve_language(&env, &config), Lang::De);
    }

    #[test]
    fn invalid_query_is_ignored() {
        let env = FakeEnv::new("?lang=fr", Some("de-DE"));
        assert_eq!(resolve_language(&env, &Config::default()), Lang::De);

        let env = FakeEnv::new("?lang=DE", None);
        assert_eq!(resolve_language(&env, &Config::default()), Lang::En);
    }

    #[test]
    fn custom_param_name() {
        let config = Config {
            param_name: "hl".into(),
            ..Default::default()
        };
        let env = FakeEnv::new("?lang=en&hl=de", None);
        assert_eq!(resolve_language(&env, &config), Lang::De);
    }
}
