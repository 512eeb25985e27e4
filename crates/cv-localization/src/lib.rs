pub mod apply;
pub mod config;
pub mod dictionary;
pub mod error;
pub mod loader;
pub mod page;
pub mod resolve;
pub mod session;
pub mod switcher;


use serde::{Deserialize, Serialize};

pub use config::Config;
pub use dictionary::Dictionary;
pub use error::LoadError;
pub use loader::{Fetch, Loaded, Source};
pub use page::PageView;
pub use resolve::Environment;
pub use session::{Init, Localizer, Phase};
pub use switcher::{ButtonPosition, SwitchButton};

static EN: &str = include_str!("../localization/en.json");
static DE: &str = include_str!("../localization/de.json");

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "lowercase")]
pub enum Lang {
    #[default]
    En,
    De,
}

impl From<Lang> for &str {
    fn from(value: Lang) -> Self {
        match value {
            Lang::En => "en",
            Lang::De => "de",
        }
    }
}

impl std::fmt::Display for Lang {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.code())
    }
}

impl std::str::FromStr for Lang {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_code(s).ok_or_else(|| format!("Language '{}' not supported", s))
    }
}

impl Lang {
    pub fn iter() -> std::slice::Iter<'static, Self> {
        Self::all().iter()
    }

    pub const fn all() -> &'static [Self] {
        &[Self::En, Self::De]
    }

    #[inline(always)]
    pub fn code(self) -> &'static str {
        self.into()
    }

    /// Exact match against the supported codes. URL parameters go through
    /// here, so `DE` is rejected just like `fr`.
    pub fn from_code(code: &str) -> Option<Self> {
        Self::iter().copied().find(|lang| lang.code() == code)
    }

    /// Maps a browser locale tag such as `de-AT` or `en_US` onto a
    /// supported language by its primary subtag.
    pub fn from_locale(tag: &str) -> Option<Self> {
        let primary = tag.split(['-', '_']).next().unwrap_or_default();
        Self::from_code(&primary.to_ascii_lowercase())
    }

    pub fn native_name(self) -> &'static str {
        match self {
            Self::En => "English",
            Self::De => "Deutsch",
        }
    }

    /// Label shown on the switcher button.
    pub fn label(self) -> String {
        self.code().to_uppercase()
    }

    /// The dictionary compiled into the binary for this language, used when
    /// the page is opened without a server and fetches are refused. Only the
    /// configured default's copy is part of the loading fallback chain; the
    /// others are reached by configuring that language as the default.
    pub(crate) fn embedded(self) -> &'static str {
        match self {
            Self::En => EN,
            Self::De => DE,
        }
    }
}
