//! Error types for Tether Core

use thiserror::Error;

/// Errors that can occur while rendering a path template
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TemplateError {
    #[error("Missing value for placeholder '{{{name}}}' in template '{template}'")]
    MissingParam { name: String, template: String },

    #[error("Empty placeholder '{{}}' in template '{0}'")]
    EmptyPlaceholder(String),

    #[error("Unclosed placeholder in template '{0}'")]
    UnclosedPlaceholder(String),
}

/// Errors that can occur while loading or validating configuration
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Service '{0}' has neither a base address nor a discovery name")]
    MissingAddress(String),

    #[error("Configuration contains a service entry with an empty logical name")]
    EmptyServiceName,

    #[error("Invalid configuration JSON: {0}")]
    Parse(#[from] serde_json::Error),
}
