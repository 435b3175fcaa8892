use thiserror::Error;

#[derive(Error, Debug)]
pub enum EtlError {
    #[error("Page fetch failed: {0}")]
    Network(#[from] reqwest::Error),

    #[error("Unexpected page structure: {message}")]
    Structure { message: String },

    #[error("Unparseable numeric text {value:?}: {source}")]
    Format {
        value: String,
        source: std::num::ParseFloatError,
    },

    #[error("CSV processing error: {0}")]
    Csv(#[from] csv::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    #[error("Invalid value for {field} ({value:?}): {reason}")]
    InvalidConfigValue {
        field: String,
        value: String,
        reason: String,
    },
}

pub type Result<T> = std::result::Result<T, EtlError>;
