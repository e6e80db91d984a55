use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::record::WeddingRecord;

/// Theme key used when a record names a theme the provider does not know.
pub const DEFAULT_THEME: &str = "classic";

/// A named bundle of presentation tokens (colours, gradients, fonts).
///
/// The token vocabulary belongs to the presentation layer; this crate only
/// carries it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Palette {
    tokens: BTreeMap<String, String>,
}

impl Palette {
    /// Builds a palette from `(token, value)` pairs.
    pub fn from_tokens<K, V>(tokens: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: Into<String>,
        V: Into<String>,
    {
        Self {
            tokens: tokens
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }

    /// Looks up a single token.
    #[must_use]
    pub fn token(&self, name: &str) -> Option<&str> {
        self.tokens.get(name).map(String::as_str)
    }

    /// The accent colour, if the palette defines one.
    #[must_use]
    pub fn accent(&self) -> Option<&str> {
        self.token("accent")
    }
}

/// Supplies palettes by theme key.
pub trait ThemeProvider {
    /// The palette registered under `key`.
    fn palette(&self, key: &str) -> Option<&Palette>;
}

/// A [`ThemeProvider`] backed by a map, typically loaded from configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ThemeRegistry {
    themes: BTreeMap<String, Palette>,
}

impl ThemeRegistry {
    /// Creates a registry from keyed palettes.
    #[must_use]
    pub const fn new(themes: BTreeMap<String, Palette>) -> Self {
        Self { themes }
    }

    /// Registered theme keys, in order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.themes.keys().map(String::as_str)
    }
}

impl ThemeProvider for ThemeRegistry {
    fn palette(&self, key: &str) -> Option<&Palette> {
        self.themes.get(key)
    }
}

/// Threads a record's theme key into the provider.
///
/// Falls back to [`DEFAULT_THEME`] when the record's key is unknown.
pub fn select_theme<'a, P>(provider: &'a P, record: &WeddingRecord) -> Option<&'a Palette>
where
    P: ThemeProvider + ?Sized,
{
    provider.palette(&record.theme).or_else(|| {
        tracing::debug!(theme = %record.theme, "unknown theme, using {DEFAULT_THEME}");
        provider.palette(DEFAULT_THEME)
    })
}
