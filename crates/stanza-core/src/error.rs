//! Error types for stanza-core

use thiserror::Error;

/// Result type alias for stanza-core operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in stanza-core
#[derive(Error, Debug)]
pub enum Error {
    /// Configuration file could not be found
    #[error("configuration file not found: {path}")]
    ConfigNotFound {
        /// Path that was searched
        path: String,
    },

    /// Failed to parse YAML configuration
    #[error("failed to parse configuration: {0}")]
    ConfigParse(#[from] serde_yaml::Error),

    /// Invalid configuration value
    #[error("invalid configuration: {message}")]
    ConfigInvalid {
        /// Description of what's invalid
        message: String,
    },

    /// Requested profile is not defined
    #[error("profile '{profile_name}' is not defined")]
    ProfileNotFound {
        /// Name of the profile
        profile_name: String,
    },

    /// The API answered with an empty poem list
    #[error("response contained no poems")]
    EmptyResponse,

    /// PoetryDB answered with a status object instead of poems
    #[error("poetry API returned {status}: {reason}")]
    Api {
        /// Status code reported in the body
        status: u16,
        /// Reason reported in the body
        reason: String,
    },

    /// Transport failure talking to the poem API
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Template rendering error
    #[error("template error: {0}")]
    Template(#[from] minijinja::Error),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization/deserialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}
