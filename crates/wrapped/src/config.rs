use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::warn;

use crate::gesture::DEFAULT_SWIPE_THRESHOLD;
use crate::progress::ProgressStyle;
use crate::shell::ShellOptions;

const FILENAME: &str = "config.yaml";
const APP_DIR: &str = "wrapped";
const KEYS: [&str; 4] = [
    "defaults.progress",
    "defaults.start_slide",
    "defaults.swipe_threshold",
    "defaults.cta_url",
];

/// Where the call-to-action points unless the config or command line says
/// otherwise. An empty URL hides the button.
pub const DEFAULT_CTA_URL: &str = "https://example.com/wrapped-answers";

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub defaults: Option<DefaultsConfig>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DefaultsConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub progress: Option<String>,

    /// 1-indexed slide to open on.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_slide: Option<usize>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub swipe_threshold: Option<f32>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cta_url: Option<String>,
}

/// Values given on the command line. They win over the config file.
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    pub progress: Option<String>,
    pub start_slide: Option<usize>,
    pub swipe_threshold: Option<f32>,
    pub cta_url: Option<String>,
}

/// Fully resolved launch settings.
#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
    pub shell: ShellOptions,
    pub cta_url: Option<String>,
}

impl Config {
    pub fn path() -> Result<PathBuf> {
        dirs::config_dir()
            .map(|d| d.join(APP_DIR).join(FILENAME))
            .ok_or_else(|| anyhow::anyhow!("Could not determine config directory"))
    }

    pub fn load() -> Result<Self> {
        let path = Self::path()?;
        Self::load_from(&path)
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path).map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                anyhow::anyhow!("No config found. Run `wrapped config show` to see defaults.")
            } else {
                anyhow::anyhow!("Failed to read config: {e}")
            }
        })?;
        Self::from_yaml(&contents)
    }

    pub fn from_yaml(contents: &str) -> Result<Self> {
        let config: Config = serde_yaml::from_str(contents)?;
        Ok(config)
    }

    pub fn load_or_default() -> Self {
        Self::load().unwrap_or_default()
    }

    pub fn save(&self) -> Result<PathBuf> {
        let path = Self::path()?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let yaml = serde_yaml::to_string(self)?;
        let contents = format!("# Wrapped configuration\n{yaml}");
        std::fs::write(&path, contents)?;
        Ok(path)
    }

    pub fn set(&mut self, key: &str, value: &str) -> Result<()> {
        let defaults = self.defaults.get_or_insert_with(DefaultsConfig::default);
        match key {
            "defaults.progress" => {
                if ProgressStyle::from_name(value).is_none() {
                    anyhow::bail!("Invalid progress style: {value}. Must be 'dots' or 'bar'.");
                }
                defaults.progress = Some(value.to_string());
            }
            "defaults.start_slide" => {
                let slide = value
                    .parse::<usize>()
                    .ok()
                    .filter(|n| *n >= 1)
                    .ok_or_else(|| {
                        anyhow::anyhow!(
                            "Invalid start_slide: {value}. Must be a slide number (1 or higher)."
                        )
                    })?;
                defaults.start_slide = Some(slide);
            }
            "defaults.swipe_threshold" => {
                let threshold = value
                    .parse::<f32>()
                    .ok()
                    .filter(|t| t.is_finite() && *t > 0.0)
                    .ok_or_else(|| {
                        anyhow::anyhow!(
                            "Invalid swipe_threshold: {value}. Must be a positive number."
                        )
                    })?;
                defaults.swipe_threshold = Some(threshold);
            }
            "defaults.cta_url" => {
                let is_web = value.starts_with("https://") || value.starts_with("http://");
                if !value.is_empty() && !is_web {
                    anyhow::bail!(
                        "Invalid cta_url: {value}. Must be an http(s) URL, or empty to hide it."
                    );
                }
                defaults.cta_url = Some(value.to_string());
            }
            _ => anyhow::bail!("Unknown config key: {key}. Valid keys: {}", KEYS.join(", ")),
        }
        Ok(())
    }

    /// Merge built-in defaults, this config and `overrides`, in increasing
    /// order of precedence. Invalid values are skipped with a warning.
    pub fn resolve(&self, overrides: &Overrides) -> Settings {
        let defaults = self.defaults.clone().unwrap_or_default();

        let progress = overrides
            .progress
            .as_deref()
            .or(defaults.progress.as_deref())
            .and_then(|name| {
                let style = ProgressStyle::from_name(name);
                if style.is_none() {
                    warn!(name, "ignoring unknown progress style");
                }
                style
            })
            .unwrap_or_default();

        let swipe_threshold = overrides
            .swipe_threshold
            .or(defaults.swipe_threshold)
            .filter(|t| {
                let valid = t.is_finite() && *t > 0.0;
                if !valid {
                    warn!(threshold = t, "ignoring invalid swipe threshold");
                }
                valid
            })
            .unwrap_or(DEFAULT_SWIPE_THRESHOLD);

        let start_slide = overrides
            .start_slide
            .or(defaults.start_slide)
            .map(|n| n.saturating_sub(1))
            .unwrap_or(0);

        let cta_url = overrides
            .cta_url
            .clone()
            .or(defaults.cta_url)
            .unwrap_or_else(|| DEFAULT_CTA_URL.to_string());
        let cta_url = Some(cta_url).filter(|url| !url.trim().is_empty());

        Settings {
            shell: ShellOptions {
                progress,
                swipe_threshold,
                start_slide,
            },
            cta_url,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_full_config() {
        let yaml = "defaults:\n  progress: bar\n  start_slide: 3\n  \
                    swipe_threshold: 80.0\n  cta_url: https://example.com/next\n";
        let config = Config::from_yaml(yaml).unwrap();
        let defaults = config.defaults.unwrap();
        assert_eq!(defaults.progress.as_deref(), Some("bar"));
        assert_eq!(defaults.start_slide, Some(3));
        assert_eq!(defaults.swipe_threshold, Some(80.0));
        assert_eq!(defaults.cta_url.as_deref(), Some("https://example.com/next"));
    }

    #[test]
    fn test_empty_config_resolves_to_defaults() {
        let settings = Config::default().resolve(&Overrides::default());
        assert_eq!(settings.shell, ShellOptions::default());
        assert_eq!(settings.cta_url.as_deref(), Some(DEFAULT_CTA_URL));
    }

    #[test]
    fn test_empty_cta_url_hides_button() {
        let mut config = Config::default();
        config.set("defaults.cta_url", "").unwrap();
        assert_eq!(config.resolve(&Overrides::default()).cta_url, None);

        let overrides = Overrides {
            cta_url: Some("https://example.com/c".to_string()),
            ..Overrides::default()
        };
        let settings = config.resolve(&overrides);
        assert_eq!(settings.cta_url.as_deref(), Some("https://example.com/c"));
    }

    #[test]
    fn test_overrides_win_over_config() {
        let mut config = Config::default();
        config.set("defaults.progress", "bar").unwrap();
        config.set("defaults.start_slide", "4").unwrap();
        config.set("defaults.cta_url", "https://example.com/a").unwrap();

        let from_config = config.resolve(&Overrides::default());
        assert_eq!(from_config.shell.progress, ProgressStyle::Bar);
        assert_eq!(from_config.shell.start_slide, 3);
        assert_eq!(from_config.cta_url.as_deref(), Some("https://example.com/a"));

        let overrides = Overrides {
            progress: Some("dots".to_string()),
            start_slide: Some(1),
            swipe_threshold: Some(75.0),
            cta_url: Some("https://example.com/b".to_string()),
        };
        let settings = config.resolve(&overrides);
        assert_eq!(settings.shell.progress, ProgressStyle::Dots);
        assert_eq!(settings.shell.start_slide, 0);
        assert_eq!(settings.shell.swipe_threshold, 75.0);
        assert_eq!(settings.cta_url.as_deref(), Some("https://example.com/b"));
    }

    #[test]
    fn test_invalid_values_fall_back() {
        let yaml = "defaults:\n  progress: spiral\n  swipe_threshold: -5.0\n";
        let config = Config::from_yaml(yaml).unwrap();
        let settings = config.resolve(&Overrides::default());
        assert_eq!(settings.shell.progress, ProgressStyle::Dots);
        assert_eq!(settings.shell.swipe_threshold, DEFAULT_SWIPE_THRESHOLD);
    }

    #[test]
    fn test_set_validates_values() {
        let mut config = Config::default();
        assert!(config.set("defaults.progress", "ring").is_err());
        assert!(config.set("defaults.start_slide", "0").is_err());
        assert!(config.set("defaults.swipe_threshold", "abc").is_err());
        assert!(config.set("defaults.cta_url", "example.com").is_err());
        assert!(config.set("defaults.theme", "dark").is_err());
        assert!(config.set("defaults.swipe_threshold", "64").is_ok());
        assert_eq!(config.defaults.and_then(|d| d.swipe_threshold), Some(64.0));
    }

    #[test]
    fn test_round_trips_through_yaml() {
        let mut config = Config::default();
        config.set("defaults.progress", "bar").unwrap();
        let yaml = serde_yaml::to_string(&config).unwrap();
        assert_eq!(Config::from_yaml(&yaml).unwrap(), config);
    }
}
