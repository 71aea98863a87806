//! Build parameter definitions
//!
//! Jenkins identifies parameter kinds by fully qualified Java class names
//! (`hudson.model.StringParameterDefinition` and friends); the domain model
//! uses short tags. Class names outside the known set are carried verbatim
//! and re-emitted unchanged, so configurations built with parameter plugins
//! this crate does not know about survive an edit/save cycle.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::errors::ValidationError;
use super::types::Validate;

/// Type tag of a build parameter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum ParameterKind {
    /// Single-line string parameter
    String,
    /// Boolean checkbox parameter
    Boolean,
    /// Multi-line text parameter
    Text,
    /// Choice (enumeration) parameter
    Choice,
    /// File upload parameter
    File,
    /// Masked password parameter
    Password,
    /// Any tag outside the closed set, preserved verbatim
    Custom(String),
}

impl ParameterKind {
    /// Returns the short tag for this kind.
    ///
    /// For [`ParameterKind::Custom`] the stored tag is returned as-is.
    #[must_use]
    pub fn as_tag(&self) -> &str {
        match self {
            Self::String => "string",
            Self::Boolean => "boolean",
            Self::Text => "text",
            Self::Choice => "choice",
            Self::File => "file",
            Self::Password => "password",
            Self::Custom(tag) => tag,
        }
    }

    /// Parses a short tag. Unrecognized tags become [`ParameterKind::Custom`].
    #[must_use]
    pub fn from_tag(tag: &str) -> Self {
        match tag {
            "string" => Self::String,
            "boolean" => Self::Boolean,
            "text" => Self::Text,
            "choice" => Self::Choice,
            "file" => Self::File,
            "password" => Self::Password,
            other => Self::Custom(other.to_string()),
        }
    }
}

impl fmt::Display for ParameterKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_tag())
    }
}

impl From<String> for ParameterKind {
    fn from(tag: String) -> Self {
        Self::from_tag(&tag)
    }
}

impl From<ParameterKind> for String {
    fn from(kind: ParameterKind) -> Self {
        kind.as_tag().to_string()
    }
}

/// A single typed build parameter.
///
/// Choice parameters store their options in `default_value`, one per line,
/// matching the wire encoding.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParameterDefinition {
    /// Parameter name as exposed to the build environment.
    pub name: String,

    /// Human-readable description.
    #[serde(default)]
    pub description: String,

    /// Default value (options joined by `\n` for choice parameters).
    #[serde(default)]
    pub default_value: String,

    /// Type tag.
    #[serde(rename = "type")]
    pub kind: ParameterKind,
}

impl ParameterDefinition {
    /// Creates a parameter of the given kind with empty description and
    /// default value.
    pub fn new(name: impl Into<String>, kind: ParameterKind) -> Self {
        Self {
            name: name.into(),
            description: String::new(),
            default_value: String::new(),
            kind,
        }
    }

    /// Sets the description.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Sets the default value.
    #[must_use]
    pub fn with_default_value(mut self, value: impl Into<String>) -> Self {
        self.default_value = value.into();
        self
    }
}

impl Validate for ParameterDefinition {
    type Error = ValidationError;

    fn validate(&self) -> Result<(), Self::Error> {
        let valid = !self.name.is_empty()
            && !self.name.contains(' ')
            && self
                .name
                .chars()
                .all(|c| c.is_alphanumeric() || c == '_' || c == '-');
        if valid {
            Ok(())
        } else {
            Err(ValidationError::InvalidParameterName {
                name: self.name.clone(),
            })
        }
    }
}
