use thiserror::Error;

pub type AppResult<T> = Result<T, AppError>;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Validation error: {0}")]
    ValidationError(String),

    #[error("Auth error: {0}")]
    AuthError(String),

    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Gateway error: {0}")]
    GatewayError(String),

    #[error("Config error: {0}")]
    ConfigError(String),

    #[error("Internal error: {0}")]
    InternalError(String),

    #[error("HTTP request error: {0}")]
    ReqwestError(#[from] reqwest::Error),

    #[error("JSON serialization/deserialization error: {0}")]
    SerdeJsonError(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

impl AppError {
    /// Short human-readable message suitable for a user-facing notice.
    /// Internal detail (HTTP bodies, serde paths) stays in the log only.
    pub fn notice_message(&self) -> String {
        match self {
            AppError::ValidationError(msg) => msg.clone(),
            AppError::AuthError(msg) => msg.clone(),
            AppError::Unauthorized(msg) => msg.clone(),
            AppError::NotFound(msg) => msg.clone(),
            AppError::GatewayError(_) | AppError::ReqwestError(_) => {
                "Request failed. Please try again.".to_string()
            }
            AppError::ConfigError(msg) => msg.clone(),
            _ => "Something went wrong. Please try again.".to_string(),
        }
    }
}
