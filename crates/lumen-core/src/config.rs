use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::common::{ButtonVariant, Color, FieldVariant, Size};
use crate::error::LumenError;
use crate::modal::DEFAULT_SCROLL_LOCK;

/// Library-wide settings, typically read from a `lumen.toml` next to the
/// application. Every field has a default, so an empty file is valid.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct LumenConfig {
    pub defaults: ComponentDefaults,
    pub select: SelectConfig,
    pub modal: ModalConfig,
}

/// Fallbacks used when a component prop is left unset.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ComponentDefaults {
    pub size: Size,
    pub color: Color,
    pub field_variant: FieldVariant,
    pub button_variant: ButtonVariant,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SelectConfig {
    /// Placeholder row rendered when a menu has no options.
    pub no_options_text: String,
}

impl Default for SelectConfig {
    fn default() -> Self {
        Self {
            no_options_text: "No options available".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ModalConfig {
    /// Body overflow style applied while any modal is open.
    pub scroll_lock: String,
}

impl Default for ModalConfig {
    fn default() -> Self {
        Self {
            scroll_lock: DEFAULT_SCROLL_LOCK.to_string(),
        }
    }
}

impl LumenConfig {
    pub fn from_toml_str(contents: &str) -> Result<Self, LumenError> {
        Ok(toml::from_str(contents)?)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, LumenError> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path).map_err(|source| LumenError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config = Self::from_toml_str(&contents)?;
        tracing::debug!(path = %path.display(), "loaded lumen configuration");
        Ok(config)
    }

    /// Like [`LumenConfig::load`], falling back to defaults when the file is
    /// missing or invalid.
    pub fn load_or_default(path: impl AsRef<Path>) -> Self {
        Self::load(path).unwrap_or_else(|err| {
            tracing::warn!(%err, "using default lumen configuration");
            Self::default()
        })
    }
}
