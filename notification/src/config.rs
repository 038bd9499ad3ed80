use once_cell::sync::Lazy;
use regex::{Captures, Regex};
use serde::Deserialize;
use std::path::Path;

use crate::error::{NotifyError, Result};

/// Default configuration file looked up by the CLI
pub const DEFAULT_CONFIG_FILE: &str = "release-notify.toml";

/// Placeholders the field templates may use
pub const PLACEHOLDERS: [&str; 4] = ["tag", "repository", "author", "url"];

static PLACEHOLDER_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\{([a-z_]+)\}").expect("Failed to compile placeholder regex"));

/// Which fields the attachment carries
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LayoutMode {
    /// Release Information, Changes and Release Details
    #[default]
    Full,
    /// Changes only
    Minimal,
}

/// Whether the changelog is grouped by category before conversion
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChangesPolicy {
    /// Group `## heading` sections, falling back to the raw body when there are none
    #[default]
    Categorized,
    /// Convert the body as written
    Raw,
}

/// Static texts of the notification
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct MessageTemplates {
    pub text: String,
    pub pretext: String,
    pub fallback: String,
    /// Value of the "Release Information" field
    pub release_information: String,
    /// Value of the "Release Details" field
    pub release_details: String,
}

impl MessageTemplates {
    /// Substitutes `{name}` placeholders in one pass.
    ///
    /// Placeholders without a value are left as written, and substituted
    /// values are never expanded again.
    #[must_use]
    pub fn fill(template: &str, values: &[(&str, &str)]) -> String {
        PLACEHOLDER_PATTERN
            .replace_all(template, |caps: &Captures| {
                values
                    .iter()
                    .find(|(name, _)| *name == &caps[1])
                    .map_or_else(|| caps[0].to_string(), |(_, value)| value.to_string())
            })
            .into_owned()
    }

    fn validate(&self) -> Result<()> {
        let templates = [
            ("release_information", &self.release_information),
            ("release_details", &self.release_details),
        ];

        for (field, template) in templates {
            for caps in PLACEHOLDER_PATTERN.captures_iter(template) {
                if !PLACEHOLDERS.iter().any(|name| *name == &caps[1]) {
                    return Err(NotifyError::invalid_config(format!(
                        "message.{field} uses unknown placeholder {}, expected one of {}",
                        &caps[0],
                        PLACEHOLDERS.join(", ")
                    )));
                }
            }
        }
        Ok(())
    }
}

impl Default for MessageTemplates {
    fn default() -> Self {
        Self {
            text: "A release is published.".to_string(),
            pretext: ":alert: *New Release Alert!* :alert:".to_string(),
            fallback: ":alert: *New Release Alert!* :alert:".to_string(),
            release_information:
                "*Version:* `{tag}` :label:\n*Repository:* `{repository}`\n*Author:* {author}"
                    .to_string(),
            release_details: ":eyes: *View on GitHub:* <{url}>".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ChangesConfig {
    pub policy: ChangesPolicy,
    pub layout: LayoutMode,
    pub skip_empty_categories: bool,
}

impl Default for ChangesConfig {
    fn default() -> Self {
        Self {
            policy: ChangesPolicy::default(),
            layout: LayoutMode::default(),
            skip_empty_categories: true,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct DeliveryConfig {
    pub timeout_seconds: u64,
}

impl Default for DeliveryConfig {
    fn default() -> Self {
        Self { timeout_seconds: 30 }
    }
}

/// Contents of `release-notify.toml`
#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize)]
#[serde(default)]
pub struct NotifyConfig {
    pub message: MessageTemplates,
    pub changes: ChangesConfig,
    pub delivery: DeliveryConfig,
}

impl NotifyConfig {
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: NotifyConfig = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a TOML file
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path_ref = path.as_ref();

        if !path_ref.exists() {
            return Err(NotifyError::ConfigNotFound {
                path: path_ref.to_path_buf(),
            });
        }

        let content = std::fs::read_to_string(path_ref)?;

        Self::from_toml_str(&content).map_err(|e| match e {
            NotifyError::ConfigParse(parse) => NotifyError::invalid_config(format!(
                "Failed to parse TOML in {}: {}",
                path_ref.display(),
                parse
            )),
            other => other,
        })
    }

    /// Load the file if it exists, otherwise use the defaults
    pub fn load_or_default<P: AsRef<Path>>(path: P) -> Result<Self> {
        if path.as_ref().exists() {
            Self::load_from_file(path)
        } else {
            Ok(Self::default())
        }
    }

    fn validate(&self) -> Result<()> {
        self.message.validate()?;
        if self.delivery.timeout_seconds == 0 {
            return Err(NotifyError::invalid_config(
                "delivery.timeout_seconds must be greater than zero",
            ));
        }
        Ok(())
    }
}
