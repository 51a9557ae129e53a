use thiserror::Error;

pub type Result<T> = std::result::Result<T, ApiError>;

/// Classified failures surfaced by the data layer.
///
/// Every request resolves into exactly one of these, so callers can route
/// on the variant: re-authenticate on [`SessionExpired`], show the message
/// on [`Validation`], suggest checking the setup on [`Connectivity`].
///
/// [`SessionExpired`]: ApiError::SessionExpired
/// [`Validation`]: ApiError::Validation
/// [`Connectivity`]: ApiError::Connectivity
#[derive(Debug, Error)]
pub enum ApiError {
    /// The backend could not be reached at all.
    #[error(
        "Cannot connect to backend. Please ensure:\n1. The backend server is running\n2. CORS is configured for this origin\n3. The API base URL is correct"
    )]
    Connectivity(#[source] reqwest::Error),
    /// A 401 with the refresh path exhausted. Local session state has
    /// already been cleared when this surfaces.
    #[error("Session expired. Please login again.")]
    SessionExpired,
    /// The backend rejected the request; carries its own message.
    #[error("{0}")]
    Validation(String),
    /// The response body did not match the expected envelope.
    #[error("response could not be interpreted")]
    Parse,
    #[error("config error: {0}")]
    Config(#[from] config::ConfigError),
    #[error("invalid url: {0}")]
    InvalidUrl(String),
}
