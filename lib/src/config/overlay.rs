use super::{OutputFormat, Settings};

/// The Settings to use, with possible overwrite (like from CLI)
#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[allow(clippy::module_name_repetitions)]
pub struct SettingsOverlay {
    /// The saved Settings
    pub settings: Settings,

    /// Overwrite the output format
    ///
    /// This will not be saved to the config
    pub format_overwrite: Option<OutputFormat>,
    /// Overwrite whether json output is pretty-printed
    pub pretty_overwrite: Option<bool>,
}

impl SettingsOverlay {
    /// Get the output format, either the overwrite if present, otherwise the config itself
    #[must_use]
    pub fn get_format(&self) -> OutputFormat {
        if let Some(v) = self.format_overwrite {
            v
        } else {
            self.settings.output.format
        }
    }

    /// Get whether to pretty-print, either the overwrite if present, otherwise the config itself
    #[must_use]
    pub fn get_pretty(&self) -> bool {
        self.pretty_overwrite.unwrap_or(self.settings.output.pretty)
    }
}
