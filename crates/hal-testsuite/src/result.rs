//! Result and error types for the HAL test suite.

use thiserror::Error;

/// Result type for test-suite operations
pub type SuiteResult<T> = Result<T, SuiteError>;

/// Errors that can occur while locating UI regions or verifying the model
#[derive(Debug, Error)]
pub enum SuiteError {
    /// Bad input handed to a constructor or builder
    #[error("Invalid argument: {message}")]
    InvalidArgument {
        /// Error message
        message: String,
    },

    /// Operation called in a state that cannot serve it
    #[error("Invalid state: {message}")]
    InvalidState {
        /// Error message
        message: String,
    },

    /// Resource existence differs from what the test expected
    #[error("Assertion failed: {message}")]
    ResourceExistence {
        /// Resource path that was queried
        resource: String,
        /// Whether the resource was expected to exist
        expected: bool,
        /// Error message
        message: String,
    },

    /// Attribute value in the model differs from the expected one
    #[error(
        "Assertion failed: attribute '{attribute}' of {resource} is different in model, \
         expected <{expected}> but was <{actual}>"
    )]
    AttributeMismatch {
        /// Resource path the attribute was read from
        resource: String,
        /// Model-facing (dash-case) attribute name
        attribute: String,
        /// Expected value
        expected: String,
        /// Value found in the model
        actual: String,
    },

    /// No element matched the selector under the root
    #[error("Element not found: {selector}")]
    ElementNotFound {
        /// Selector that was queried
        selector: String,
    },

    /// A strict locator matched more than one element
    #[error("Element not found: {selector} matched {count} elements, expected exactly one")]
    AmbiguousMatch {
        /// Selector that was queried
        selector: String,
        /// Number of matching elements
        count: usize,
    },

    /// Configuration error
    #[error("Configuration error: {message}")]
    Config {
        /// Error message
        message: String,
    },

    /// I/O error, including transport failures of the management client
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// YAML error
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml_ng::Error),

    /// JSON error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl SuiteError {
    /// Create an invalid argument error
    #[must_use]
    pub fn invalid_argument(message: impl Into<String>) -> Self {
        Self::InvalidArgument {
            message: message.into(),
        }
    }

    /// Create an invalid state error
    #[must_use]
    pub fn invalid_state(message: impl Into<String>) -> Self {
        Self::InvalidState {
            message: message.into(),
        }
    }

    /// Create a configuration error
    #[must_use]
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// True for value or existence mismatches, false for misuse and environment errors
    #[must_use]
    pub const fn is_assertion_failure(&self) -> bool {
        matches!(
            self,
            Self::ResourceExistence { .. } | Self::AttributeMismatch { .. }
        )
    }

    /// True when no single element could be resolved under a root
    #[must_use]
    pub const fn is_not_found(&self) -> bool {
        matches!(
            self,
            Self::ElementNotFound { .. } | Self::AmbiguousMatch { .. }
        )
    }
}
