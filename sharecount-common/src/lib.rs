//! Common types shared across the sharecount crates.
//!
//! This crate owns the workspace-wide error type and the logging initializer.
//! Everything a caller of `sharecount-social` can fail with is a
//! [`ShareCountError`]; transport failures from `sharecount-http` pass through
//! it untouched.
//!
//! # Overview
//!
//! - [`ShareCountError`] and [`Result`]: shared error handling
//! - [`observability`]: tracing/logging initialisation
//!
//! # Examples
//!
//! ```rust
//! use sharecount_common::ShareCountError;
//!
//! let err = ShareCountError::UnknownNetwork("myspace".into());
//! assert_eq!(err.to_string(), "Network myspace is not available");
//! ```
pub mod observability;

pub use sharecount_http::HttpError;

/// Errors surfaced by the stats client and its fetchers.
#[derive(thiserror::Error, Debug)]
pub enum ShareCountError {
    /// An argument had the wrong shape, e.g. a bare name where a list of
    /// networks was expected.
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// A requested network identifier is not registered.
    #[error("Network {0} is not available")]
    UnknownNetwork(String),

    /// A list of URLs was passed where exactly one is accepted.
    #[error("Only one URL can be used at once")]
    MultipleUrls,

    /// The upstream answered with an empty payload.
    #[error("No {network} data found for the URL")]
    NoData { network: &'static str },

    /// The upstream payload could not be turned into a stats record.
    #[error("Could not decode {network} response: {message}")]
    Decode {
        network: &'static str,
        message: String,
    },

    /// Transport failure, passed through from the HTTP layer.
    #[error(transparent)]
    Http(#[from] HttpError),

    /// A spawned fetch task ended without producing a result.
    #[error("Fetch task failed: {0}")]
    Task(String),

    /// Configuration was incomplete or invalid.
    #[error("Configuration error: {0}")]
    Config(String),
}

/// Convenient alias for results that use [`ShareCountError`].
pub type Result<T> = std::result::Result<T, ShareCountError>;
