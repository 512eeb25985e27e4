use crate::{Config, Dictionary, Environment, Lang, LoadError};

/// Retrieves dictionary documents. Implementations report non-success
/// responses as [`LoadError::Status`].
#[allow(async_fn_in_trait)]
pub trait Fetch {
    async fn fetch_text(&self, url: &str) -> Result<String, LoadError>;
}

/// One step of the loading fallback chain.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Source {
    /// `{locales_path}{lang}.json`, fetched over the network.
    Remote(Lang),
    /// The dictionary compiled into the binary.
    Embedded(Lang),
    Empty,
}

impl std::fmt::Display for Source {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Source::Remote(lang) => write!(f, "{}.json", lang),
            Source::Embedded(lang) => write!(f, "embedded {}", lang),
            Source::Empty => f.write_str("empty dictionary"),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Loaded {
    pub dictionary: Dictionary,
    pub source: Source,
}

/// The ordered strategies tried for `lang`. The default language's remote
/// file is skipped when it is the requested one, since it already failed.
pub fn fallback_chain(lang: Lang, default: Lang) -> Vec<Source> {
    let mut chain = vec![Source::Remote(lang)];
    if lang != default {
        chain.push(Source::Remote(default));
    }
    chain.push(Source::Embedded(default));
    chain.push(Source::Empty);
    chain
}

async fn attempt(
    source: Source,
    config: &Config,
    fetch: &impl Fetch,
    env: &impl Environment,
) -> Result<Dictionary, LoadError> {
    match source {
        Source::Remote(lang) => {
            let url = config.dictionary_url(lang, env.timestamp());
            let text = fetch.fetch_text(&url).await?;
            Dictionary::from_json(&text).map_err(|source| LoadError::Parse {
                origin: url,
                source,
            })
        }
        Source::Embedded(lang) => {
            Dictionary::from_json(lang.embedded()).map_err(|source| LoadError::Parse {
                origin: source_name(lang),
                source,
            })
        }
        Source::Empty => Ok(Dictionary::default()),
    }
}

fn source_name(lang: Lang) -> String {
    Source::Embedded(lang).to_string()
}

/// Loads the dictionary for `lang`, walking the fallback chain until a step
/// succeeds. Never fails; the last resort is an empty dictionary.
pub async fn load_dictionary(
    config: &Config,
    fetch: &impl Fetch,
    env: &impl Environment,
    lang: Lang,
) -> Loaded {
    for source in fallback_chain(lang, config.default_lang) {
        match attempt(source, config, fetch, env).await {
            Ok(dictionary) => {
                match source {
                    Source::Remote(l) if l == lang => {
                        log::info!("Loaded {} translations successfully", source)
                    }
                    Source::Empty => log::error!("No translations available"),
                    _ => log::warn!("Using {} as fallback for '{}'", source, lang),
                }
                return Loaded { dictionary, source };
            }
            Err(e) => log::warn!("Error loading translations from {}: {}", source, e),
        }
    }
    Loaded {
        dictionary: Dictionary::default(),
        source: Source::Empty,
    }
}
