//! Error types for resource resolution and endpoint derivation
//!
//! Every failure in the engine is fatal for the top-level call that raised it.
//! Variants carry the file path or resource key needed to locate the bad input.
//!
//! Copyright (c) 2025 Apidef Team
//! Licensed under the Apache-2.0 license

use crate::model::PropertyType;
use std::path::PathBuf;
use thiserror::Error;

/// Result type for engine operations
pub type Result<T> = std::result::Result<T, Error>;

/// Underlying serializer failure for a definition file or sample body
#[derive(Error, Debug)]
pub enum SerdeSource {
    #[error(transparent)]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    Yaml(#[from] serde_yaml::Error),
}

/// Error taxonomy for the resolution and derivation pipeline
#[derive(Error, Debug)]
pub enum Error {
    /// Malformed definition file
    #[error("Failed to decode definition file '{}': {source}", path.display())]
    Decode {
        path: PathBuf,
        #[source]
        source: SerdeSource,
    },

    /// Directory traversal or file read failure
    #[error("Failed to read '{}': {source}", path.display())]
    Filesystem {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A cross-namespace import failed
    #[error("Resource '{resource}' failed to import '{}': {source}", target.display())]
    Import {
        resource: String,
        target: PathBuf,
        #[source]
        source: Box<Error>,
    },

    /// Parent key absent from the merged graph
    #[error("Resource '{child}' references unknown parent '{parent}'")]
    UnresolvedParent { child: String, parent: String },

    /// Ancestor chain revisits a resource
    #[error("Cyclic ancestry detected for '{resource}': {chain}")]
    CyclicAncestry { resource: String, chain: String },

    /// Two definition files produced the same key
    #[error("Resource '{key}' is defined in both '{}' and '{}'", first.display(), second.display())]
    DuplicateResource {
        key: String,
        first: PathBuf,
        second: PathBuf,
    },

    #[error("Interaction '{interaction}' on '{resource}' uses unsupported verb '{verb}'")]
    UnsupportedVerb {
        resource: String,
        interaction: String,
        verb: String,
    },

    #[error("Cannot generate sample values for property '{property}' of type '{property_type}'")]
    UnsupportedType {
        property: String,
        property_type: PropertyType,
    },

    #[error("Property '{property}' has unusable bounds (minimum: {minimum:?}, maximum: {maximum:?})")]
    InvalidBounds {
        property: String,
        minimum: Option<i64>,
        maximum: Option<i64>,
    },

    /// The random source failed
    #[error("Random value generation failed: {source}")]
    RandomGeneration {
        #[source]
        source: rand::Error,
    },

    #[error("Failed to encode: {source}")]
    Encode {
        #[source]
        source: SerdeSource,
    },
}

impl Error {
    /// Create a decode error for a JSON definition file
    pub fn json_decode(path: PathBuf, error: serde_json::Error) -> Self {
        Self::Decode {
            path,
            source: SerdeSource::Json(error),
        }
    }

    /// Create a decode error for a YAML definition file
    pub fn yaml_decode(path: PathBuf, error: serde_yaml::Error) -> Self {
        Self::Decode {
            path,
            source: SerdeSource::Yaml(error),
        }
    }

    /// Create an encode error from either serializer
    pub fn encode(error: impl Into<SerdeSource>) -> Self {
        Self::Encode {
            source: error.into(),
        }
    }

    /// Create a filesystem error with path context
    pub fn filesystem(path: PathBuf, error: std::io::Error) -> Self {
        Self::Filesystem {
            path,
            source: error,
        }
    }

    /// Wrap an import failure with the importing resource and target directory
    pub fn import(resource: impl Into<String>, target: PathBuf, cause: Error) -> Self {
        Self::Import {
            resource: resource.into(),
            target,
            source: Box::new(cause),
        }
    }

    pub fn unresolved_parent(child: impl Into<String>, parent: impl Into<String>) -> Self {
        Self::UnresolvedParent {
            child: child.into(),
            parent: parent.into(),
        }
    }

    /// Create a cyclic ancestry error from the offending chain of keys
    pub fn cyclic_ancestry(resource: impl Into<String>, chain: &[&str]) -> Self {
        Self::CyclicAncestry {
            resource: resource.into(),
            chain: chain.join(" -> "),
        }
    }

    /// Get the file path associated with this error, if any
    pub fn path(&self) -> Option<&PathBuf> {
        match self {
            Self::Decode { path, .. } => Some(path),
            Self::Filesystem { path, .. } => Some(path),
            Self::Import { target, .. } => Some(target),
            Self::DuplicateResource { second, .. } => Some(second),
            _ => None,
        }
    }

    /// Follow import wrappers down to the error that started the failure
    pub fn root_cause(&self) -> &Error {
        match self {
            Self::Import { source, .. } => source.root_cause(),
            other => other,
        }
    }
}
