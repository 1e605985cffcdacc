use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Settings error: {0}")]
    Settings(String),

    #[error("Locale error: {0}")]
    Locale(String),

    #[error("Preferences error: {0}")]
    Preferences(String),
}

/// Convenience type alias for Results with AppError
pub type Result<T> = std::result::Result<T, AppError>;

/// Failure to turn a requested path into a route record.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RouteError {
    #[error("no route matches {path}")]
    NotFound { path: String },

    #[error("too many redirects while resolving {path}")]
    RedirectLoop { path: String },
}

/// Failure to produce a page view for a matched route.
///
/// Cloneable so it can be carried through the UI message channel.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("failed to load page {route}: {reason}")]
pub struct PageLoadError {
    pub route: String,
    pub reason: String,
}

impl PageLoadError {
    pub fn new(route: impl Into<String>, reason: impl Into<String>) -> Self {
        Self {
            route: route.into(),
            reason: reason.into(),
        }
    }
}
