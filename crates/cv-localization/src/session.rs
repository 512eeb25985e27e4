use crate::{
    apply::apply_translations,
    loader::{load_dictionary, Fetch, Loaded, Source},
    resolve::resolve_language,
    switcher::switch_buttons,
    Config, Dictionary, Environment, Lang, PageView,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Phase {
    #[default]
    Uninitialized,
    Resolving,
    Loading,
    /// Dictionary installed, page not yet written.
    Loaded,
    Applied,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Init {
    Applied(usize),
    /// The document was still parsing; the host applies once it is ready.
    Deferred,
}

/// The localization state of one page: which language is active and the
/// dictionary currently loaded for it.
#[derive(Debug, Clone)]
pub struct Localizer {
    config: Config,
    language: Lang,
    dictionary: Dictionary,
    source: Option<Source>,
    phase: Phase,
}

impl Default for Localizer {
    fn default() -> Self {
        Self::new(Config::default())
    }
}

impl Localizer {
    pub fn new(config: Config) -> Self {
        Self {
            language: config.default_lang,
            config,
            dictionary: Dictionary::default(),
            source: None,
            phase: Phase::Uninitialized,
        }
    }

    #[inline]
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Replaces the configuration. Before [`Self::init`] the active language
    /// follows the new default. Afterwards the active language is kept and
    /// returned, since its dictionary must be reloaded from the new location.
    pub fn configure(&mut self, config: Config) -> Option<Lang> {
        self.config = config;
        if self.phase == Phase::Uninitialized {
            self.language = self.config.default_lang;
            None
        } else {
            log::info!("Reconfigured after initialization, keeping {}", self.language);
            Some(self.language)
        }
    }

    #[inline]
    pub fn language(&self) -> Lang {
        self.language
    }

    pub fn supported() -> &'static [Lang] {
        Lang::all()
    }

    #[inline]
    pub fn dictionary(&self) -> &Dictionary {
        &self.dictionary
    }

    /// Where the current dictionary came from; `None` before the first load.
    #[inline]
    pub fn source(&self) -> Option<Source> {
        self.source
    }

    #[inline]
    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn translate(&self, key: &str, fallback: Option<&str>) -> String {
        self.dictionary.translate(key, fallback)
    }

    pub fn has_key(&self, key: &str) -> bool {
        self.dictionary.has_key(key)
    }

    /// Sets the active language from the environment. The session then
    /// waits for that language's dictionary.
    pub fn resolve(&mut self, env: &impl Environment) -> Lang {
        self.phase = Phase::Resolving;
        self.language = resolve_language(env, &self.config);
        self.phase = Phase::Loading;
        self.language
    }

    /// Validates `code`, makes it the active language and rewrites the URL
    /// parameter. Returns the language whose dictionary must now be loaded,
    /// or `None` if the code is not supported.
    pub fn switch_to(&mut self, env: &impl Environment, code: &str) -> Option<Lang> {
        let Some(lang) = Lang::from_code(code) else {
            log::warn!("Language '{}' not supported", code);
            return None;
        };
        log::info!("Switching language to {}", lang);
        self.language = lang;
        self.phase = Phase::Loading;
        env.replace_query_param(&self.config.param_name, lang.code());
        Some(lang)
    }

    /// Installs a dictionary loaded for `lang`. Ignored when another switch
    /// has made a different language active in the meantime.
    pub fn install(&mut self, lang: Lang, loaded: Loaded) -> bool {
        if lang != self.language {
            log::debug!(
                "Discarding {} dictionary, {} is now active",
                lang,
                self.language
            );
            return false;
        }
        self.dictionary = loaded.dictionary;
        self.source = Some(loaded.source);
        self.phase = Phase::Loaded;
        true
    }

    /// Writes the current dictionary into the page. Safe to call repeatedly.
    pub fn apply<P: PageView>(&mut self, page: &mut P) -> usize {
        let writes = apply_translations(page, &self.dictionary, &self.config);
        self.phase = Phase::Applied;
        writes
    }

    /// Rebuilds the language switcher inside `selector`.
    pub fn build_switcher<P: PageView>(&self, page: &mut P, selector: &str) -> bool {
        let built = page.replace_switcher(selector, &switch_buttons(self.language));
        if !built {
            log::debug!("No switcher container matches '{}'", selector);
        }
        built
    }

    pub async fn load<F: Fetch, E: Environment>(&self, fetch: &F, env: &E, lang: Lang) -> Loaded {
        load_dictionary(&self.config, fetch, env, lang).await
    }

    /// Installs a dictionary loaded for `lang` and writes it into the page,
    /// or defers the write while the document is still parsing. `None` when
    /// the dictionary was stale and nothing changed.
    pub fn finish_load<P: PageView>(
        &mut self,
        page: &mut P,
        lang: Lang,
        loaded: Loaded,
    ) -> Option<Init> {
        if !self.install(lang, loaded) {
            return None;
        }
        if page.is_parsing() {
            Some(Init::Deferred)
        } else {
            Some(Init::Applied(self.apply(page)))
        }
    }

    /// Switches to `code`, reloads and re-applies, then notifies the page.
    /// Unsupported codes leave everything untouched and return false.
    pub async fn set_language<P, E, F>(
        &mut self,
        page: &mut P,
        env: &E,
        fetch: &F,
        code: &str,
    ) -> bool
    where
        P: PageView,
        E: Environment,
        F: Fetch,
    {
        let Some(lang) = self.switch_to(env, code) else {
            return false;
        };
        let loaded = self.load(fetch, env, lang).await;
        if self.finish_load(page, lang, loaded).is_none() {
            return false;
        }
        page.language_changed(lang);
        true
    }

    /// Resolves the language, loads its dictionary and applies it unless the
    /// document is still being parsed.
    pub async fn init<P, E, F>(&mut self, page: &mut P, env: &E, fetch: &F) -> Init
    where
        P: PageView,
        E: Environment,
        F: Fetch,
    {
        let lang = self.resolve(env);
        let loaded = self.load(fetch, env, lang).await;
        self.finish_load(page, lang, loaded).unwrap_or(Init::Deferred)
    }
}

#[cfg(test)]
mod tests {
    use super::{Init, Localizer, Phase};
    use crate::{
        loader::{Loaded, Source},
        tests::{FakeEnv, FakeFetch, FakePage},
        Config, Dictionary, Lang,
    };

    const DE_JSON: &str = r#"{"meta":{"title":"Lebenslauf"},"about":{"title":"ÜBER MICH"}}"#;
    const EN_JSON: &str = r#"{"meta":{"title":"Resume"},"about":{"title":"ABOUT ME"}}"#;

    fn fetch() -> FakeFetch {
        FakeFetch::default()
            .serve("./locales/de.json", DE_JSON)
            .serve("./locales/en.json", EN_JSON)
    }

    fn page() -> FakePage {
        let mut page = FakePage::default();
        page.element("h2", &[("data-i18n", "about.title")], "");
        page
    }

    #[tokio::test]
    async fn every_supported_language() {
        let env = FakeEnv::new("", None);
        let fetch = fetch();
        let mut page = page();
        let mut loc = Localizer::default();
        for &lang in Localizer::supported() {
            assert!(loc.set_language(&mut page, &env, &fetch, lang.code()).await);
            assert_eq!(loc.language(), lang);
            assert_eq!(env.param("lang").as_deref(), Some(lang.code()));
            assert_eq!(loc.phase(), Phase::Applied);
        }
        assert_eq!(page.events, vec![Lang::En, Lang::De]);
        assert_eq!(page.nodes[0].text, "ÜBER MICH");
        assert_eq!(loc.translate("meta.title", None), "Lebenslauf");
    }

    #[tokio::test]
    async fn unsupported_language_is_a_noop() {
        let env = FakeEnv::new("?lang=de", None);
        let fetch = fetch();
        let mut page = page();
        let mut loc = Localizer::default();
        loc.init(&mut page, &env, &fetch).await;
        let mutations = page.mutations;

        assert!(!loc.set_language(&mut page, &env, &fetch, "fr").await);
        assert_eq!(loc.language(), Lang::De);
        assert_eq!(env.param("lang").as_deref(), Some("de"));
        assert_eq!(env.replacements(), 0);
        assert_eq!(page.mutations, mutations);
        assert!(page.events.is_empty());
    }

    #[tokio::test]
    async fn init_applies_when_ready() {
        let env = FakeEnv::new("", Some("de-DE"));
        let fetch = fetch();
        let mut page = page();
        let mut loc = Localizer::default();
        assert_eq!(loc.phase(), Phase::Uninitialized);
        assert_eq!(loc.init(&mut page, &env, &fetch).await, Init::Applied(2));
        assert_eq!(loc.language(), Lang::De);
        assert_eq!(loc.source(), Some(Source::Remote(Lang::De)));
        assert_eq!(page.title, "Lebenslauf");
        assert!(page.events.is_empty());
        assert_eq!(env.replacements(), 0);
    }

    #[tokio::test]
    async fn init_defers_while_parsing() {
        let env = FakeEnv::new("", None);
        let fetch = fetch();
        let mut page = page();
        page.parsing = true;
        let mut loc = Localizer::default();
        assert_eq!(loc.init(&mut page, &env, &fetch).await, Init::Deferred);
        assert_eq!(loc.phase(), Phase::Loaded);
        assert_eq!(page.mutations, 0);

        page.parsing = false;
        assert_eq!(loc.apply(&mut page), 2);
        assert_eq!(page.nodes[0].text, "ABOUT ME");
    }

    #[tokio::test]
    async fn offline_init_uses_embedded_default() {
        let env = FakeEnv::new("?lang=de", None);
        let fetch = FakeFetch::default();
        let mut page = page();
        let mut loc = Localizer::default();
        loc.init(&mut page, &env, &fetch).await;
        assert_eq!(loc.language(), Lang::De);
        assert_eq!(loc.source(), Some(Source::Embedded(Lang::En)));
        assert_eq!(page.nodes[0].text, "ABOUT ME");
        assert!(loc.has_key("experience.positions"));
    }

    #[test]
    fn stale_dictionary_is_discarded() {
        let env = FakeEnv::new("", None);
        let mut loc = Localizer::default();
        loc.switch_to(&env, "de");
        loc.switch_to(&env, "en");
        let stale = Loaded {
            dictionary: Dictionary::from_json(DE_JSON).unwrap(),
            source: Source::Remote(Lang::De),
        };
        assert!(!loc.install(Lang::De, stale));
        assert_eq!(loc.translate("meta.title", None), "meta.title");
        assert_eq!(env.param("lang").as_deref(), Some("en"));
    }

    #[test]
    fn switcher_marks_active_language() {
        let env = FakeEnv::new("", None);
        let mut page = FakePage::default();
        let mut loc = Localizer::default();
        assert!(!loc.build_switcher(&mut page, "#lang-switcher"));

        page.containers.push("#lang-switcher".into());
        loc.switch_to(&env, "de");
        assert!(loc.build_switcher(&mut page, "#lang-switcher"));
        let buttons = &page.switchers["#lang-switcher"];
        assert_eq!(buttons.len(), 2);
        assert!(buttons.iter().find(|b| b.lang == Lang::De).unwrap().active);

        loc.switch_to(&env, "en");
        loc.build_switcher(&mut page, "#lang-switcher");
        let buttons = &page.switchers["#lang-switcher"];
        assert!(buttons.iter().find(|b| b.lang == Lang::En).unwrap().active);
        assert_eq!(buttons.iter().filter(|b| b.active).count(), 1);
    }

    #[test]
    fn configure_resets_language() {
        let mut loc = Localizer::default();
        let reload = loc.configure(Config {
            default_lang: Lang::De,
            ..Default::default()
        });
        assert_eq!(reload, None);
        assert_eq!(loc.language(), Lang::De);
        assert_eq!(loc.config().default_lang, Lang::De);
    }

    #[tokio::test]
    async fn configure_after_init_keeps_language() {
        let env = FakeEnv::new("?lang=de", None);
        let fetch = fetch().serve("/i18n/de.json", r#"{"about":{"title":"PROFIL"}}"#);
        let mut page = page();
        let mut loc = Localizer::default();
        loc.init(&mut page, &env, &fetch).await;

        let reload = loc.configure(Config {
            locales_path: "/i18n/".into(),
            ..Default::default()
        });
        assert_eq!(reload, Some(Lang::De));
        assert_eq!(loc.language(), Lang::De);
        assert_eq!(env.param("lang").as_deref(), Some("de"));
        assert_eq!(page.title, "Lebenslauf");

        let loaded = loc.load(&fetch, &env, Lang::De).await;
        assert_eq!(
            loc.finish_load(&mut page, Lang::De, loaded),
            Some(Init::Applied(1))
        );
        assert_eq!(page.nodes[0].text, "PROFIL");
        assert!(page.events.is_empty());
    }

    #[tokio::test]
    async fn configure_during_load_keeps_dictionary() {
        let env = FakeEnv::new("?lang=de", None);
        let fetch = fetch();
        let mut page = page();
        let mut loc = Localizer::default();
        let lang = loc.resolve(&env);
        let loaded = loc.load(&fetch, &env, lang).await;
        loc.configure(Config::default());
        assert_eq!(
            loc.finish_load(&mut page, lang, loaded),
            Some(Init::Applied(2))
        );
        assert_eq!(page.nodes[0].text, "ÜBER MICH");
    }

    #[test]
    fn finish_load_defers_while_parsing() {
        let mut page = page();
        page.parsing = true;
        let mut loc = Localizer::default();
        let loaded = Loaded {
            dictionary: Dictionary::from_json(EN_JSON).unwrap(),
            source: Source::Remote(Lang::En),
        };
        assert_eq!(
            loc.finish_load(&mut page, Lang::En, loaded.clone()),
            Some(Init::Deferred)
        );
        assert_eq!(page.mutations, 0);
        assert_eq!(loc.finish_load(&mut page, Lang::De, loaded), None);
        assert_eq!(loc.phase(), Phase::Loaded);
    }
}
