//! User preferences
//!
//! Stored as JSON in the platform config directory under fixed keys so a
//! theme or font size chosen once is applied on every start.

use anyhow::Result;
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

/// Environment variable overriding the service address
pub const SERVER_URL_ENV: &str = "TRIAGEM_SERVER_URL";

pub const DEFAULT_SERVER_URL: &str = "http://127.0.0.1:5000";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Theme {
    #[default]
    Dark,
    Light,
    HighContrast,
}

impl Theme {
    pub fn next(&self) -> Self {
        match self {
            Self::Dark => Self::Light,
            Self::Light => Self::HighContrast,
            Self::HighContrast => Self::Dark,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Dark => "dark",
            Self::Light => "light",
            Self::HighContrast => "high contrast",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FontScale {
    Small,
    #[default]
    Normal,
    Large,
}

impl FontScale {
    /// One step larger, saturating
    pub fn larger(&self) -> Self {
        match self {
            Self::Small => Self::Normal,
            Self::Normal | Self::Large => Self::Large,
        }
    }

    /// One step smaller, saturating
    pub fn smaller(&self) -> Self {
        match self {
            Self::Large => Self::Normal,
            Self::Normal | Self::Small => Self::Small,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Small => "small",
            Self::Normal => "normal",
            Self::Large => "large",
        }
    }
}

/// Persisted user preferences
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct Preferences {
    #[serde(default)]
    pub theme: Theme,
    #[serde(default)]
    pub font_size: FontScale,
    /// Triage service base URL
    #[serde(skip_serializing_if = "Option::is_none")]
    pub server_url: Option<String>,
    /// Where exported and printed results are written
    #[serde(skip_serializing_if = "Option::is_none")]
    pub export_dir: Option<PathBuf>,
    /// Extra key bindings, e.g. `"Alt+M": "navigate:triage"`
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub key_bindings: BTreeMap<String, String>,
}

impl Preferences {
    /// Get the preferences file path
    pub fn config_path() -> Option<PathBuf> {
        ProjectDirs::from("br", "triagem", "triage-tui")
            .map(|dirs| dirs.config_dir().join("preferences.json"))
    }

    /// Load preferences, defaults when no file exists
    pub fn load() -> Result<Self> {
        match Self::config_path() {
            Some(path) => Self::load_from(&path),
            None => Ok(Self::default()),
        }
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let content = fs::read_to_string(path)?;
        Ok(serde_json::from_str(&content)?)
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        let content = serde_json::to_string_pretty(self)?;
        fs::write(path, content)?;
        Ok(())
    }

    /// Service base URL: environment, then file, then the local default.
    /// A trailing slash is dropped.
    pub fn server_url(&self, env_override: Option<String>) -> String {
        env_override
            .filter(|url| !url.trim().is_empty())
            .or_else(|| self.server_url.clone())
            .unwrap_or_else(|| DEFAULT_SERVER_URL.to_string())
            .trim()
            .trim_end_matches('/')
            .to_string()
    }

    pub fn export_dir(&self) -> PathBuf {
        self.export_dir
            .clone()
            .unwrap_or_else(|| PathBuf::from("."))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use tempfile::tempdir;

    #[test]
    fn test_default_preferences() {
        let prefs = Preferences::default();
        assert_eq!(prefs.theme, Theme::Dark);
        assert_eq!(prefs.font_size, FontScale::Normal);
        assert!(prefs.server_url.is_none());
        assert!(prefs.export_dir.is_none());
        assert!(prefs.key_bindings.is_empty());
    }

    #[test]
    fn test_fixed_storage_keys() {
        let prefs = Preferences {
            theme: Theme::HighContrast,
            font_size: FontScale::Large,
            ..Default::default()
        };
        let value = serde_json::to_value(&prefs).unwrap();
        assert_eq!(value["theme"], "high-contrast");
        assert_eq!(value["fontSize"], "large");
        assert!(value.get("serverUrl").is_none());
    }

    #[test]
    fn test_deserialize_from_empty_json() {
        let parsed: Preferences = serde_json::from_str("{}").unwrap();
        assert_eq!(parsed, Preferences::default());
    }

    #[test]
    fn test_deserialize_with_extra_fields() {
        let json = r#"{"theme": "light", "unknown_field": "value"}"#;
        let parsed: Preferences = serde_json::from_str(json).unwrap();
        assert_eq!(parsed.theme, Theme::Light);
    }

    #[test]
    fn test_unknown_theme_is_an_error() {
        assert!(serde_json::from_str::<Preferences>(r#"{"theme": "neon"}"#).is_err());
    }

    #[test]
    fn test_save_and_load_roundtrip() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("nested").join("preferences.json");
        let prefs = Preferences {
            theme: Theme::Light,
            font_size: FontScale::Small,
            server_url: Some("http://triage.local:8080".to_string()),
            export_dir: Some(dir.path().to_path_buf()),
            key_bindings: BTreeMap::from([("Alt+M".to_string(), "navigate:triage".to_string())]),
        };
        prefs.save_to(&path).unwrap();
        assert_eq!(Preferences::load_from(&path).unwrap(), prefs);
    }

    #[test]
    fn test_load_missing_file_gives_defaults() {
        let dir = tempdir().unwrap();
        let prefs = Preferences::load_from(&dir.path().join("absent.json")).unwrap();
        assert_eq!(prefs, Preferences::default());
    }

    #[test]
    fn test_load_corrupt_file_is_an_error() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("preferences.json");
        fs::write(&path, "{not json").unwrap();
        assert!(Preferences::load_from(&path).is_err());
    }

    #[test]
    fn test_config_path_returns_option() {
        let _path = Preferences::config_path();
    }

    mod server_url {
        use super::*;
        use pretty_assertions::assert_eq;

        #[test]
        fn test_default() {
            assert_eq!(Preferences::default().server_url(None), DEFAULT_SERVER_URL);
        }

        #[test]
        fn test_file_value() {
            let prefs = Preferences {
                server_url: Some("http://triage.local/".to_string()),
                ..Default::default()
            };
            assert_eq!(prefs.server_url(None), "http://triage.local");
        }

        #[test]
        fn test_env_wins() {
            let prefs = Preferences {
                server_url: Some("http://file".to_string()),
                ..Default::default()
            };
            assert_eq!(prefs.server_url(Some("http://env".to_string())), "http://env");
            assert_eq!(prefs.server_url(Some("  ".to_string())), "http://file");
        }
    }

    mod scales {
        use super::*;
        use pretty_assertions::assert_eq;

        #[test]
        fn test_theme_cycles() {
            assert_eq!(Theme::Dark.next(), Theme::Light);
            assert_eq!(Theme::HighContrast.next(), Theme::Dark);
        }

        #[test]
        fn test_font_saturates() {
            assert_eq!(FontScale::Large.larger(), FontScale::Large);
            assert_eq!(FontScale::Small.smaller(), FontScale::Small);
            assert_eq!(FontScale::Small.larger().larger(), FontScale::Large);
        }
    }
}
