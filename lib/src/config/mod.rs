use std::fmt::Display;

use serde::{Deserialize, Serialize};

/// Extra things necessary for a config file, like wrappers for versioning
pub mod config_extra;

mod overlay;

pub use overlay::SettingsOverlay;

/// The file name of the config inside the app config dir
pub const FILE_NAME: &str = "config.toml";

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize, Default)]
#[serde(default)] // allow missing fields and fill them with the `..Self::default()` in this struct
pub struct Settings {
    pub output: OutputSettings,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)] // allow missing fields and fill them with the `..Self::default()` in this struct
pub struct OutputSettings {
    /// How extracted links are written out
    pub format: OutputFormat,
    /// Pretty-print json output, has no effect on [`OutputFormat::Plain`]
    pub pretty: bool,
}

impl Default for OutputSettings {
    fn default() -> Self {
        Self {
            format: OutputFormat::default(),
            pretty: true,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// A json array of `{"quality": "", "url": ""}` objects
    #[default]
    Json,
    /// One `quality<TAB>url` line per link
    Plain,
}

impl Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}",
            match self {
                OutputFormat::Json => "json",
                OutputFormat::Plain => "plain",
            }
        )
    }
}
