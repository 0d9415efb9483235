//! # Error Handling
//!
//! This module defines the centralized error handling mechanism for the
//! `tagver` application. It uses the `thiserror` library to create a
//! comprehensive `Error` enum that covers all anticipated failure modes,
//! providing clear and descriptive error messages.
//!
//! ## Failure taxonomy
//!
//! - **`ConfigParse`**: a project descriptor is unreadable or unparsable.
//!   This is the one *recoverable* failure: callers log it and proceed with
//!   an empty configuration.
//! - **`Vcs`**: a version-control command failed (not a work tree, ambiguous
//!   reference, timed out, git missing). Fatal for the project being
//!   resolved; carries the git subcommand and stderr for diagnosis.
//! - **`Template`**: a version template failed to parse or render. Parse and
//!   render failures carry distinct messages; neither may terminate the
//!   process.
//! - **`Identity`**: the host username lookup failed. Cached by the identity
//!   cache, so repeated calls fail identically without retrying.
//! - **`Merge`**: applying default inheritance to a project configuration
//!   failed. Always surfaced, never discarded.
//! - **`Io` / `Yaml`**: wrapped `std::io::Error` and `serde_yaml::Error`.
//!
//! The `Result<T>` alias is used throughout the library to keep signatures
//! short and error propagation uniform.

use thiserror::Error;

/// Main error type for tagver operations
#[derive(Error, Debug)]
pub enum Error {
    /// A project descriptor could not be read or parsed.
    ///
    /// Recoverable: the project proceeds with an empty configuration.
    #[error("Configuration parsing error for {path}: {message}")]
    ConfigParse { path: String, message: String },

    /// A version-control command failed.
    #[error("Git command failed: git {command} - {stderr}")]
    Vcs { command: String, stderr: String },

    /// A version template failed to parse or render.
    ///
    /// May include the offending token when applicable.
    #[error("Template error: {message}{}", token.as_ref().map(|t| format!(" (token: {})", t)).unwrap_or_default())]
    Template {
        message: String,
        /// The template token that caused the error, if applicable
        token: Option<String>,
    },

    /// The host identity lookup failed.
    #[error("Identity lookup error: {message}")]
    Identity { message: String },

    /// Applying configuration defaults failed.
    #[error("Configuration merge error: {message}")]
    Merge { message: String },

    /// An I/O error, wrapped from `std::io::Error`.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A YAML parsing error, wrapped from `serde_yaml::Error`.
    #[error("YAML parsing error: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

impl Error {
    /// Build a `Vcs` error from a failed git invocation.
    pub fn vcs(command: impl Into<String>, stderr: impl Into<String>) -> Self {
        Error::Vcs {
            command: command.into(),
            stderr: stderr.into(),
        }
    }
}

/// A convenient type alias for `Result<T, Error>`.
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display_config_parse() {
        let error = Error::ConfigParse {
            path: "services/api/tagver.yml".to_string(),
            message: "invalid YAML".to_string(),
        };
        let display = format!("{}", error);
        assert!(display.contains("Configuration parsing error"));
        assert!(display.contains("services/api/tagver.yml"));
        assert!(display.contains("invalid YAML"));
    }

    #[test]
    fn test_error_display_vcs() {
        let error = Error::vcs("rev-list --count HEAD", "fatal: not a git repository");
        let display = format!("{}", error);
        assert!(display.contains("Git command failed"));
        assert!(display.contains("rev-list --count HEAD"));
        assert!(display.contains("not a git repository"));
    }

    #[test]
    fn test_error_display_template() {
        let error = Error::Template {
            message: "unknown field".to_string(),
            token: None,
        };
        let display = format!("{}", error);
        assert!(display.contains("Template error"));
        assert!(display.contains("unknown field"));
    }

    #[test]
    fn test_error_display_template_with_token() {
        let error = Error::Template {
            message: "unknown field".to_string(),
            token: Some("{{.Bogus}}".to_string()),
        };
        let display = format!("{}", error);
        assert!(display.contains("unknown field"));
        assert!(display.contains("(token: {{.Bogus}})"));
    }

    #[test]
    fn test_error_display_identity() {
        let error = Error::Identity {
            message: "no username in environment".to_string(),
        };
        let display = format!("{}", error);
        assert!(display.contains("Identity lookup error"));
        assert!(display.contains("no username in environment"));
    }

    #[test]
    fn test_error_display_merge() {
        let error = Error::Merge {
            message: "conflicting build_args".to_string(),
        };
        let display = format!("{}", error);
        assert!(display.contains("Configuration merge error"));
        assert!(display.contains("conflicting build_args"));
    }

    #[test]
    fn test_error_from_io_error() {
        let io_error = std::io::Error::new(std::io::ErrorKind::NotFound, "File not found");
        let error: Error = io_error.into();
        let display = format!("{}", error);
        assert!(display.contains("I/O error"));
        assert!(display.contains("File not found"));
    }

    #[test]
    fn test_error_from_yaml_error() {
        let yaml_str = "invalid: [unclosed";
        let yaml_error = serde_yaml::from_str::<serde_yaml::Value>(yaml_str).unwrap_err();
        let error: Error = yaml_error.into();
        let display = format!("{}", error);
        assert!(display.contains("YAML parsing error"));
    }
}
