//! Error types for the pipeline configuration codec

use thiserror::Error;

/// Errors that can occur while encoding or decoding Jenkins job configuration
/// XML.
///
/// Malformed XML and missing required structure are fatal and surfaced to the
/// caller; recoverable oddities (unknown parameter classes, unknown trust
/// names) are handled locally by the codec and never reach this type.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CodecError {
    /// The input is not well-formed XML
    #[error("invalid config XML: {0}")]
    Xml(String),

    /// The document does not carry a `flow-definition` root
    #[error("cannot find pipeline definition in config XML")]
    MissingPipelineDefinition,

    /// The document does not carry a `WorkflowMultiBranchProject` root
    #[error("cannot parse multibranch pipeline config: missing project root")]
    MissingMultiBranchProject,

    /// A required element is absent from an otherwise well-formed document
    #[error("config XML is missing required element '{element}'")]
    MissingElement {
        /// Path of the element that was expected.
        element: String,
    },

    /// The embedded `class` attribute of a branch source matches no known
    /// SCM provider
    #[error("unsupported SCM source class '{0}'")]
    UnsupportedSourceClass(String),
}

impl From<quick_xml::Error> for CodecError {
    fn from(err: quick_xml::Error) -> Self {
        Self::Xml(err.to_string())
    }
}

impl From<quick_xml::events::attributes::AttrError> for CodecError {
    fn from(err: quick_xml::events::attributes::AttrError) -> Self {
        Self::Xml(err.to_string())
    }
}

/// Validation errors for pipeline domain objects
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// Pipeline script cannot be empty
    #[error("Pipeline script cannot be empty")]
    EmptyScript,

    /// Multi-branch script path cannot be empty
    #[error("Script path cannot be empty")]
    EmptyScriptPath,

    /// Invalid characters in a parameter name
    #[error("Invalid characters in parameter name: '{name}'")]
    InvalidParameterName {
        /// The invalid name.
        name: String,
    },

    /// Branch filter is not a valid regular expression
    #[error("Invalid branch filter regex '{pattern}': {reason}")]
    InvalidBranchFilter {
        /// The rejected pattern.
        pattern: String,
        /// Why the regex engine rejected it.
        reason: String,
    },

    /// Webhook trigger carries an empty token
    #[error("Webhook trigger token cannot be empty")]
    EmptyWebhookToken,
}
