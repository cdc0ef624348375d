//! Error types for the virtual list.
//!
//! Nothing here is raised while the list is running: drawing, ticking and
//! input degrade locally instead of failing. These errors come from the setup
//! APIs that parse or write configuration and template descriptions, and
//! from explicit formatting calls.

use thiserror::Error;

use crate::binding::FormatError;

/// Errors that can occur while configuring a virtual list.
#[derive(Error, Debug)]
pub enum VScrollError {
    /// The list has no template to draw items with.
    #[error("virtual list template not found")]
    TemplateMissing,

    /// The list configuration could not be parsed.
    #[error("invalid list configuration: {0}")]
    Config(#[source] toml::de::Error),

    /// The list configuration could not be written out.
    #[error("failed to serialize list configuration: {0}")]
    ConfigSerialize(#[source] toml::ser::Error),

    /// A TOML template description could not be parsed.
    #[error("invalid TOML template: {0}")]
    TemplateToml(#[source] toml::de::Error),

    /// A JSON template description could not be parsed.
    #[error("invalid JSON template: {0}")]
    TemplateJson(#[from] serde_json::Error),

    /// A template description parsed but describes an unusable tree.
    #[error("invalid template node `{node}`: {reason}")]
    InvalidTemplate { node: String, reason: String },

    /// A bound label's format string is malformed.
    #[error(transparent)]
    Format(#[from] FormatError),
}

/// Result type for virtual list operations.
pub type Result<T> = std::result::Result<T, VScrollError>;
