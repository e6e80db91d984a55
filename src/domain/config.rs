use std::{
    collections::BTreeMap,
    path::{Path, PathBuf},
    time::Duration,
};

use serde::{Deserialize, Serialize};

use super::theme::{Palette, ThemeRegistry};

/// Backend used when neither the environment nor the config file names one.
pub const DEFAULT_BACKEND_URL: &str = "http://localhost:8001";

/// Configuration for resolving wedding pages.
///
/// This struct holds the deployment settings: where the authoritative backend
/// lives, where the local fallback registry is kept, and which theme palettes
/// are available.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Versions", into = "Versions")]
pub struct Config {
    /// Base URL of the authoritative backend.
    backend_url: String,

    /// Directory holding the local fallback registry.
    ///
    /// One JSON file per storage key, e.g. `wedding_users.json` and
    /// `wedding_data_{owner}.json`.
    data_dir: PathBuf,

    /// How long a single backend request may take before it counts as a
    /// network failure.
    request_timeout_secs: u64,

    /// Palettes keyed by theme key.
    themes: BTreeMap<String, Palette>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            backend_url: default_backend_url(),
            data_dir: default_data_dir(),
            request_timeout_secs: default_request_timeout_secs(),
            themes: BTreeMap::new(),
        }
    }
}

impl Config {
    /// Loads the configuration from a TOML file at the given path.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or if the TOML content is
    /// invalid.
    pub fn load(path: &Path) -> Result<Self, String> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| format!("Failed to read config file: {e}"))?;
        toml::from_str(&content).map_err(|e| format!("Failed to parse config file: {e}"))
    }

    /// Loads the configuration, using defaults when the file does not exist.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be read or parsed.
    pub fn load_or_default(path: &Path) -> Result<Self, String> {
        if path.exists() {
            Self::load(path)
        } else {
            tracing::debug!("No config file at {}, using defaults", path.display());
            Ok(Self::default())
        }
    }

    /// Saves the configuration to a TOML file at the given path.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration cannot be serialized to TOML or if
    /// the file cannot be written.
    pub fn save(&self, path: &Path) -> Result<(), String> {
        let content =
            toml::to_string_pretty(self).map_err(|e| format!("Failed to serialize config: {e}"))?;
        std::fs::write(path, content).map_err(|e| format!("Failed to write config file: {e}"))
    }

    /// Returns the backend base URL.
    #[must_use]
    pub fn backend_url(&self) -> &str {
        &self.backend_url
    }

    /// Overrides the backend base URL.
    pub fn set_backend_url(&mut self, url: String) {
        self.backend_url = url;
    }

    /// Returns the local registry directory.
    #[must_use]
    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    /// Overrides the local registry directory.
    pub fn set_data_dir(&mut self, dir: PathBuf) {
        self.data_dir = dir;
    }

    /// Returns the per-request timeout.
    #[must_use]
    pub const fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    /// Builds a theme provider from the configured palettes.
    #[must_use]
    pub fn themes(&self) -> ThemeRegistry {
        ThemeRegistry::new(self.themes.clone())
    }
}

fn default_backend_url() -> String {
    DEFAULT_BACKEND_URL.to_string()
}

fn default_data_dir() -> PathBuf {
    PathBuf::from(".wedcard")
}

const fn default_request_timeout_secs() -> u64 {
    10
}

/// The serialized versions of the configuration.
/// This allows for future changes to the configuration format and to the domain
/// type without breaking compatibility.
#[derive(Debug, Serialize, Deserialize)]
#[serde(tag = "_version")]
enum Versions {
    #[serde(rename = "1")]
    V1 {
        #[serde(default = "default_backend_url")]
        backend_url: String,

        #[serde(default = "default_data_dir")]
        data_dir: PathBuf,

        #[serde(default = "default_request_timeout_secs")]
        request_timeout_secs: u64,

        #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
        themes: BTreeMap<String, Palette>,
    },
}

impl From<Versions> for super::Config {
    fn from(versions: Versions) -> Self {
        match versions {
            Versions::V1 {
                backend_url,
                data_dir,
                request_timeout_secs,
                themes,
            } => Self {
                backend_url,
                data_dir,
                request_timeout_secs,
                themes,
            },
        }
    }
}

impl From<super::Config> for Versions {
    fn from(config: super::Config) -> Self {
        Self::V1 {
            backend_url: config.backend_url,
            data_dir: config.data_dir,
            request_timeout_secs: config.request_timeout_secs,
            themes: config.themes,
        }
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;
    use crate::domain::ThemeProvider;

    #[test]
    fn load_reads_valid_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(
            b"_version = \"1\"\nbackend_url = \"https://cards.example\"\ndata_dir = \"/var/lib/wedcard\"\nrequest_timeout_secs = 3\n\n[themes.classic]\naccent = \"#d4af37\"\n",
        )
        .unwrap();

        let config = Config::load(file.path()).unwrap();

        assert_eq!(config.backend_url(), "https://cards.example");
        assert_eq!(config.data_dir(), Path::new("/var/lib/wedcard"));
        assert_eq!(config.request_timeout(), Duration::from_secs(3));
        assert_eq!(
            config.themes().palette("classic").unwrap().accent(),
            Some("#d4af37")
        );
    }

    #[test]
    fn load_missing_file_returns_error() {
        let tmp = tempfile::tempdir().unwrap();
        let missing = tmp.path().join("missing.toml");

        let error = Config::load(&missing).unwrap_err();
        assert!(error.starts_with("Failed to read config file:"));
    }

    #[test]
    fn load_or_default_tolerates_missing_file() {
        let tmp = tempfile::tempdir().unwrap();
        let missing = tmp.path().join("missing.toml");

        assert_eq!(Config::load_or_default(&missing).unwrap(), Config::default());
    }

    #[test]
    fn load_invalid_toml_returns_error() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(b"_version = \"1\"\nrequest_timeout_secs = \"ten\"\n")
            .unwrap();

        let error = Config::load(file.path()).unwrap_err();
        assert!(error.starts_with("Failed to parse config file:"));
    }

    #[test]
    fn empty_file_returns_default() {
        // Tests that deserialising an empty file returns the default configuration.
        let expected = Config::default();
        let actual: Config = toml::from_str(r#"_version = "1""#).unwrap();
        assert_eq!(actual, expected);
        assert_eq!(actual.backend_url(), DEFAULT_BACKEND_URL);
    }

    #[test]
    fn save_then_load_keeps_overrides() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("wedcard.toml");

        let mut config = Config::default();
        config.set_backend_url("https://cards.example".to_string());
        config.set_data_dir(tmp.path().join("data"));
        config.save(&path).unwrap();

        assert_eq!(Config::load(&path).unwrap(), config);
    }
}
