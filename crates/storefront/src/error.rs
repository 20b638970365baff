//! Unified error handling with Sentry integration.
//!
//! Provides a unified `AppError` type for front ends. Call [`AppError::report`]
//! before showing the error so server-side failures reach Sentry.

use thiserror::Error;

use crate::cart::StorageError;
use crate::checkout::CheckoutError;
use crate::config::ConfigError;
use crate::repository::RepositoryError;

/// Application-level error type for the storefront.
#[derive(Debug, Error)]
pub enum AppError {
    /// Cart slot could not be read or written.
    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    /// Repository operation failed.
    #[error("Repository error: {0}")]
    Repository(RepositoryError),

    /// Checkout was rejected.
    #[error("Checkout error: {0}")]
    Checkout(#[from] CheckoutError),

    /// Configuration could not be loaded.
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Resource not found.
    #[error("Not found: {0}")]
    NotFound(String),

    /// Bad input from the shopper.
    #[error("Bad request: {0}")]
    BadRequest(String),

    /// Internal error.
    #[error("Internal error: {0}")]
    Internal(String),
}

impl From<RepositoryError> for AppError {
    fn from(err: RepositoryError) -> Self {
        match err {
            RepositoryError::NotFound(what) => Self::NotFound(what),
            other => Self::Repository(other),
        }
    }
}

impl AppError {
    /// Whether the front end should offer a retry.
    #[must_use]
    pub const fn is_retryable(&self) -> bool {
        matches!(
            self,
            Self::NotFound(_)
                | Self::Repository(_)
                | Self::Storage(StorageError::Io { .. })
                | Self::Internal(_)
        )
    }

    /// Whether this is a server-side failure rather than a shopper mistake.
    #[must_use]
    pub const fn is_server_error(&self) -> bool {
        matches!(
            self,
            Self::Storage(_)
                | Self::Repository(RepositoryError::DataCorruption(_) | RepositoryError::Storage(_))
                | Self::Checkout(CheckoutError::Repository(
                    RepositoryError::DataCorruption(_) | RepositoryError::Storage(_)
                ))
                | Self::Config(_)
                | Self::Internal(_)
        )
    }

    /// Log the error and capture server-side failures to Sentry.
    pub fn report(&self) {
        if self.is_server_error() {
            let event_id = sentry::capture_error(self);
            tracing::error!(
                error = %self,
                sentry_event_id = %event_id,
                "Storefront error"
            );
        } else {
            tracing::warn!(error = %self, "Storefront request rejected");
        }
    }

    /// Message safe to show the shopper.
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            Self::Storage(_)
            | Self::Repository(RepositoryError::Storage(_))
            | Self::Internal(_) => {
                "Something went wrong, please try again".to_string()
            }
            Self::Config(_) => "The storefront is misconfigured".to_string(),
            Self::Repository(RepositoryError::DataCorruption(_)) => {
                "Catalog data is unavailable".to_string()
            }
            Self::Repository(RepositoryError::NotFound(what)) | Self::NotFound(what) => {
                format!("{what} not found")
            }
            Self::Checkout(CheckoutError::Repository(
                RepositoryError::DataCorruption(_) | RepositoryError::Storage(_),
            )) => "Failed to place order, please try again".to_string(),
            Self::Checkout(err) => err.to_string(),
            Self::BadRequest(msg) => msg.clone(),
        }
    }
}

/// Result type alias for `AppError`.
pub type Result<T> = std::result::Result<T, AppError>;

/// Add a breadcrumb for shopper actions.
///
/// Breadcrumbs appear in Sentry error reports to show the trail of actions
/// leading up to an error.
///
/// # Example
///
/// ```rust,ignore
/// add_breadcrumb("cart", "Added item", Some(&[("product_id", "3")]));
/// ```
pub fn add_breadcrumb(category: &str, message: &str, data: Option<&[(&str, &str)]>) {
    let mut breadcrumb = sentry::Breadcrumb {
        category: Some(category.to_string()),
        message: Some(message.to_string()),
        level: sentry::Level::Info,
        ..Default::default()
    };

    if let Some(pairs) = data {
        for (key, value) in pairs {
            breadcrumb.data.insert(
                (*key).to_string(),
                serde_json::Value::String((*value).to_string()),
            );
        }
    }

    sentry::add_breadcrumb(breadcrumb);
}
