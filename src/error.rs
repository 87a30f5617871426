use std::boxed::Box;
use core::fmt;

/// The error type item generators return.
pub type GenerateError = Box<dyn core::error::Error + Send + Sync>;

/// Invalid list configuration, reported by construction and refresh.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum ConfigError {
    /// No item generator was configured.
    MissingGenerator,
    /// The default item size is not a finite, positive number.
    InvalidItemSize(f64),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingGenerator => f.write_str("no item generator configured"),
            Self::InvalidItemSize(size) => {
                write!(f, "item size must be finite and greater than zero, got {size}")
            }
        }
    }
}

impl core::error::Error for ConfigError {}

/// Errors surfaced by [`crate::VirtualList`] operations.
#[derive(Debug)]
pub enum Error {
    Config(ConfigError),
    /// The item generator failed; the render pass that needed the item was aborted.
    Generate {
        index: usize,
        source: GenerateError,
    },
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Config(err) => write!(f, "invalid configuration: {err}"),
            Self::Generate { index, source } => {
                write!(f, "failed to generate item {index}: {source}")
            }
        }
    }
}

impl core::error::Error for Error {
    fn source(&self) -> Option<&(dyn core::error::Error + 'static)> {
        match self {
            Self::Config(err) => Some(err),
            Self::Generate { source, .. } => Some(&**source),
        }
    }
}

impl From<ConfigError> for Error {
    fn from(err: ConfigError) -> Self {
        Self::Config(err)
    }
}
