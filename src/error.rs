use thiserror::Error;

use crate::core::LoadInterval;

pub type TeleperiodResult<T> = Result<T, TeleperiodError>;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum TeleperiodError {
    #[error("invalid viewport size: width={width}, height={height}")]
    InvalidViewport { width: u32, height: u32 },

    #[error("invalid data: {0}")]
    InvalidData(String),

    #[error("invalid configuration: {0}")]
    Config(String),

    #[error("fetch failed for {interval}: {message}")]
    Fetch {
        interval: LoadInterval,
        message: String,
    },
}

impl TeleperiodError {
    /// Builds the error reported by a data collaborator for one load interval.
    #[must_use]
    pub fn fetch(interval: LoadInterval, message: impl Into<String>) -> Self {
        Self::Fetch {
            interval,
            message: message.into(),
        }
    }
}
