use thiserror::Error;

#[derive(Error, Debug)]
pub enum ReportBuildError {
    #[error("Report drafting failed: {0}")]
    DraftFailed(String),

    #[error("Draft rejected after {attempts} attempts: {details}")]
    DraftRejected { attempts: usize, details: String },

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[cfg(feature = "gemini")]
    #[error("HTTP error: {0}")]
    HttpError(#[from] reqwest::Error),
}

pub type Result<T> = std::result::Result<T, ReportBuildError>;
