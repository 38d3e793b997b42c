use std::{borrow::Cow, path::Path};

use anyhow::{Context, Result};
use figment::{
    providers::{Format, Toml},
    Figment,
};
use serde::{Deserialize, Serialize};

use super::{Settings, FILE_NAME};
use crate::utils::get_app_config_path;

/// The type used by the application / the latest config version
///
/// This type exists so that it is easier to differentiate when the explicit type is meant, or later meant to be changed as a whole
type ApplicationType = Settings;

/// Top-Level struct that wraps [`SettingsVersioned`] and a default version thereof if no `version` field exists.
///
/// This is required as serde does not have a concept of `default_tag` yet, see <https://github.com/serde-rs/serde/issues/2231>
#[derive(Debug, Clone, Serialize)]
#[serde(untagged)]
pub enum SettingsVersionedDefaulted<'a> {
    /// Case if config contains a `version` field
    Versioned(SettingsVersioned<'a>),
    /// Case if the config does not contain a `version` field, assume type of [`SettingsVersioned::V1`]
    Unversioned(Settings),
}

/// The field that decides between [`SettingsVersionedDefaulted::Versioned`] and [`SettingsVersionedDefaulted::Unversioned`]
const VERSION_KEY: &str = "version";

// Manual implementation because deserialize "serde(untagged)" error are *really* bad
// and a unknown "version" would silently be read as unversioned
impl<'a, 'de> Deserialize<'de> for SettingsVersionedDefaulted<'a> {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let content = toml::Value::deserialize(deserializer)?;

        if content.get(VERSION_KEY).is_some() {
            SettingsVersioned::deserialize(content)
                .map(SettingsVersionedDefaulted::Versioned)
                .map_err(<D::Error as serde::de::Error>::custom)
        } else {
            Settings::deserialize(content)
                .map(SettingsVersionedDefaulted::Unversioned)
                .map_err(<D::Error as serde::de::Error>::custom)
        }
    }
}

impl<'a> SettingsVersionedDefaulted<'a> {
    /// Read a config file, needs to be toml formatted
    ///
    /// A non-existing file results in the default config
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let data: Self = Figment::new().merge(Toml::file(path)).extract()?;

        Ok(data)
    }

    /// Read a config from a toml formatted string
    pub fn from_toml_str(data: &str) -> Result<Self> {
        let data: Self = Figment::new().merge(Toml::string(data)).extract()?;

        Ok(data)
    }

    /// Read the config from the default location, creating it with defaults if it does not exist yet
    pub fn from_config_path() -> Result<Self> {
        Self::from_config_dir(&get_app_config_path()?)
    }

    /// Read the config file from `dir`, creating it with defaults if it does not exist yet
    pub fn from_config_dir(dir: &Path) -> Result<Self> {
        let config_path = dir.join(FILE_NAME);

        if !config_path.exists() {
            info!(
                "Config file \"{}\" does not exist, creating a default one",
                config_path.display()
            );
            let default = ApplicationType::default();
            SettingsVersionedDefaulted::save_file(&config_path, &default)?;
        }

        Self::from_file(&config_path)
            .with_context(|| format!("config path: \"{}\"", config_path.display()))
    }

    /// Save type used by the application as a config file
    ///
    /// Will only save the latest version
    pub fn save_file<P: AsRef<Path>>(path: P, config: &'a ApplicationType) -> Result<()> {
        // wrap the data in the latest version for saving
        let data = Self::Versioned(SettingsVersioned::V1(Cow::Borrowed(config)));
        std::fs::write(path, toml::to_string(&data)?)?;

        Ok(())
    }

    /// Convert Into the type used by the application, instead of what is parsed
    ///
    /// Will convert any version into the latest
    pub fn into_settings(self) -> ApplicationType {
        let versioned = match self {
            SettingsVersionedDefaulted::Versioned(versioned) => versioned,
            SettingsVersionedDefaulted::Unversioned(v) => return v,
        };

        versioned.into_settings()
    }
}

/// Enum that contains all versions for the config
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(tag = "version")]
pub enum SettingsVersioned<'a> {
    // Cow data so that we can use a reference for saving instead of cloning
    #[serde(rename = "1")]
    V1(Cow<'a, Settings>),
}

impl SettingsVersioned<'_> {
    /// Convert Into the type used by the application, instead of what is parsed
    ///
    /// Will convert any version into the latest
    pub fn into_settings(self) -> ApplicationType {
        match self {
            SettingsVersioned::V1(v) => v.into_owned(),
        }
    }
}
