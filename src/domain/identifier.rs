use std::{collections::HashMap, fmt, ops::Deref};

use non_empty_string::NonEmptyString;

/// Route parameter carrying a custom slug.
pub const CUSTOM_URL_PARAM: &str = "customUrl";
/// Catch-all route parameter; treated as a slug.
pub const CATCH_ALL_PARAM: &str = "*";
/// Route parameter carrying a raw owner id.
pub const WEDDING_ID_PARAM: &str = "weddingId";

/// Which lookup a [`LookupKey`] is for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyKind {
    /// A human-chosen public alias.
    Slug,
    /// A system-assigned owner identifier.
    OwnerId,
}

impl fmt::Display for KeyKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Slug => f.write_str("slug"),
            Self::OwnerId => f.write_str("owner id"),
        }
    }
}

/// A non-empty identifier together with the branch that produced it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LookupKey {
    kind: KeyKind,
    value: NonEmptyString,
}

impl LookupKey {
    /// Creates a key, or `None` if `value` is empty.
    #[must_use]
    pub fn new(kind: KeyKind, value: impl Into<String>) -> Option<Self> {
        let value = NonEmptyString::new(value.into()).ok()?;
        Some(Self { kind, value })
    }

    /// Shorthand for a slug key.
    #[must_use]
    pub fn slug(value: impl Into<String>) -> Option<Self> {
        Self::new(KeyKind::Slug, value)
    }

    /// Shorthand for an owner id key.
    #[must_use]
    pub fn owner_id(value: impl Into<String>) -> Option<Self> {
        Self::new(KeyKind::OwnerId, value)
    }

    /// The branch that produced this key.
    #[must_use]
    pub const fn kind(&self) -> KeyKind {
        self.kind
    }

    /// The identifier itself.
    #[must_use]
    pub fn as_str(&self) -> &str {
        self.value.as_str()
    }
}

impl Deref for LookupKey {
    type Target = str;

    fn deref(&self) -> &Self::Target {
        self.as_str()
    }
}

impl fmt::Display for LookupKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} '{}'", self.kind, self.value)
    }
}

/// The identifier-bearing parameters of a page route.
///
/// At most one of them is expected to be meaningful per navigation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct RouteParams {
    /// Explicit custom slug parameter.
    pub custom_url: Option<String>,
    /// Catch-all segment, used when no explicit slug is present.
    pub catch_all: Option<String>,
    /// Raw owner id parameter.
    pub wedding_id: Option<String>,
}

impl RouteParams {
    /// Picks the recognised parameters out of a router's parameter map.
    #[must_use]
    pub fn from_map(params: &HashMap<String, String>) -> Self {
        Self {
            custom_url: params.get(CUSTOM_URL_PARAM).cloned(),
            catch_all: params.get(CATCH_ALL_PARAM).cloned(),
            wedding_id: params.get(WEDDING_ID_PARAM).cloned(),
        }
    }

    /// Route for a slug.
    #[must_use]
    pub fn with_slug(slug: impl Into<String>) -> Self {
        Self {
            custom_url: Some(slug.into()),
            ..Self::default()
        }
    }

    /// Route for an owner id.
    #[must_use]
    pub fn with_owner_id(owner_id: impl Into<String>) -> Self {
        Self {
            wedding_id: Some(owner_id.into()),
            ..Self::default()
        }
    }

    /// Derives the lookup key.
    ///
    /// A non-empty slug (explicit, then catch-all) wins over the owner id.
    /// Returns `None` when no parameter carries a value, meaning the page
    /// shows the baseline only.
    #[must_use]
    pub fn lookup_key(&self) -> Option<LookupKey> {
        let slug = [&self.custom_url, &self.catch_all]
            .into_iter()
            .flatten()
            .find_map(|value| LookupKey::slug(value.clone()));

        slug.or_else(|| {
            self.wedding_id
                .as_ref()
                .and_then(|value| LookupKey::owner_id(value.clone()))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn slug_wins_over_owner_id() {
        let params = RouteParams {
            custom_url: Some("sarah-michael".to_string()),
            catch_all: None,
            wedding_id: Some("u1".to_string()),
        };

        let key = params.lookup_key().unwrap();
        assert_eq!(key.kind(), KeyKind::Slug);
        assert_eq!(key.as_str(), "sarah-michael");
    }

    #[test]
    fn catch_all_counts_as_slug() {
        let params = RouteParams {
            catch_all: Some("priya-and-dev".to_string()),
            wedding_id: Some("u1".to_string()),
            ..RouteParams::default()
        };

        let key = params.lookup_key().unwrap();
        assert_eq!(key.kind(), KeyKind::Slug);
        assert_eq!(&*key, "priya-and-dev");
    }

    #[test]
    fn empty_slug_falls_back_to_owner_id() {
        let params = RouteParams {
            custom_url: Some(String::new()),
            catch_all: Some(String::new()),
            wedding_id: Some("u9".to_string()),
        };

        assert_eq!(params.lookup_key(), LookupKey::owner_id("u9"));
    }

    #[test]
    fn no_parameters_means_no_key() {
        assert_eq!(RouteParams::default().lookup_key(), None);

        let empty = RouteParams {
            wedding_id: Some(String::new()),
            ..RouteParams::default()
        };
        assert_eq!(empty.lookup_key(), None);
    }

    #[test]
    fn from_map_reads_router_names() {
        let map = HashMap::from([
            ("weddingId".to_string(), "u3".to_string()),
            ("unrelated".to_string(), "x".to_string()),
        ]);

        let params = RouteParams::from_map(&map);
        assert_eq!(params, RouteParams::with_owner_id("u3"));
    }

    #[test]
    fn display_names_the_branch() {
        assert_eq!(
            LookupKey::slug("a-b").unwrap().to_string(),
            "slug 'a-b'"
        );
        assert_eq!(
            LookupKey::owner_id("u1").unwrap().to_string(),
            "owner id 'u1'"
        );
    }
}
