use thiserror::Error;

/// Top-level error type used across the entire application.
#[derive(Debug, Error)]
pub enum SpeedoError {
    #[error("config error: {0}")]
    Config(String),

    #[error("poll error: {0}")]
    Poll(String),

    #[error("render error: {0}")]
    Render(String),

    #[error("I/O error: {source}")]
    Io {
        #[from]
        source: std::io::Error,
    },
}

pub type Result<T, E = SpeedoError> = std::result::Result<T, E>;
