use std::fmt;
use std::path::PathBuf;

/// Errors raised while loading library configuration.
///
/// Components themselves never fail; misuse degrades to a rendered
/// fallback instead.
#[derive(Debug)]
pub enum LumenError {
    /// The configuration file could not be read.
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    /// The configuration text is not valid TOML for [`crate::LumenConfig`].
    Parse(toml::de::Error),
}

impl fmt::Display for LumenError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LumenError::Io { path, source } => {
                write!(f, "failed to read {}: {source}", path.display())
            }
            LumenError::Parse(err) => write!(f, "invalid lumen configuration: {err}"),
        }
    }
}

impl std::error::Error for LumenError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            LumenError::Io { source, .. } => Some(source),
            LumenError::Parse(err) => Some(err),
        }
    }
}

impl From<toml::de::Error> for LumenError {
    fn from(err: toml::de::Error) -> Self {
        LumenError::Parse(err)
    }
}
