use thiserror::Error;

#[derive(Error, Debug)]
pub enum PortfolioError {
    #[error("GitHub API error: {0}")]
    ApiError(String),

    #[error("Network error: {0}")]
    NetworkError(#[from] reqwest::Error),

    #[error("JSON parsing error: {0}")]
    JsonError(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("Resource not found: {0}")]
    NotFound(String),
}

impl PortfolioError {
    /// True for the errors the page reports as "fetch failed": a non-success
    /// status, a transport failure or an unreadable response body.
    pub fn is_fetch_failure(&self) -> bool {
        matches!(
            self,
            PortfolioError::ApiError(_)
                | PortfolioError::NotFound(_)
                | PortfolioError::NetworkError(_)
                | PortfolioError::JsonError(_)
        )
    }
}

pub type Result<T> = std::result::Result<T, PortfolioError>;
