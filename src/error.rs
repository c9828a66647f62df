//! Error types for project loading and integrity checking.

use std::path::PathBuf;

use thiserror::Error;

/// Errors that can occur while loading a model project or its documents.
///
/// Every variant is fatal: the checker makes a single pass and any load or
/// parse failure aborts the run. Failed *resolutions* are not errors — they
/// are reported as [`Diagnostic`](crate::check::Diagnostic) values.
#[derive(Debug, Error)]
pub enum CheckError {
    /// XML parsing error.
    #[error("XML error: {0}")]
    Xml(String),

    /// IO error while reading a manifest or document file.
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Missing required element or attribute.
    #[error("missing required {kind}: {name}")]
    Missing { kind: &'static str, name: String },

    /// Malformed node selector.
    #[error("invalid selector: {0}")]
    Selector(String),
}

impl CheckError {
    /// Create an XML error.
    pub fn xml(message: impl Into<String>) -> Self {
        Self::Xml(message.into())
    }

    /// Create an IO error carrying the offending path.
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    /// Create a missing element error.
    pub fn missing_element(name: impl Into<String>) -> Self {
        Self::Missing {
            kind: "element",
            name: name.into(),
        }
    }

    /// Create a missing attribute error.
    pub fn missing_attribute(name: impl Into<String>) -> Self {
        Self::Missing {
            kind: "attribute",
            name: name.into(),
        }
    }

    /// Create a selector error.
    pub fn selector(message: impl Into<String>) -> Self {
        Self::Selector(message.into())
    }
}
