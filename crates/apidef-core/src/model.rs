//! Declarative resource definition records
//!
//! These are the shapes decoded from definition files, one resource per file.
//! They carry the parent reference as an unresolved key; linking into a graph
//! happens in [`crate::graph`].
//!
//! Copyright (c) 2025 Apidef Team
//! Licensed under the Apache-2.0 license

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;
use std::str::FromStr;

/// Permission token granting read access to a property
pub const READ_PERMISSION: &str = "r";

/// Permission token granting write access to a property
pub const WRITE_PERMISSION: &str = "w";

/// A resource as written in a definition file
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResourceDefinition {
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub description: String,
    /// Composite key of the parent resource, `<namespace>/<id>` or a bare local id
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent: Option<String>,
    /// When set, the parent is a collection and contributes no slug segment
    #[serde(default)]
    pub parent_is_collection: bool,
    #[serde(default)]
    pub url_slug: String,
    #[serde(default)]
    pub url_prefix: String,
    #[serde(default)]
    pub properties: Vec<Property>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub interactions: Vec<Interaction>,
}

/// A field of a resource, or a query parameter of an interaction
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Property {
    pub id: String,
    #[serde(rename = "type")]
    pub property_type: PropertyType,
    #[serde(default)]
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub values: Option<Vec<Value>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub maximum: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub minimum: Option<i64>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub permissions: Vec<String>,
    /// Whether the property may appear more than once in a query string
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub repeated: bool,
}

impl Property {
    /// Case-insensitive exact match against the granted permission tokens
    pub fn has_permission(&self, permission: &str) -> bool {
        self.permissions
            .iter()
            .any(|granted| granted.eq_ignore_ascii_case(permission))
    }

    pub fn is_writable(&self) -> bool {
        self.has_permission(WRITE_PERMISSION)
    }

    /// The enumerated value set, ignoring an empty list
    pub fn allowed_values(&self) -> Option<&[Value]> {
        match self.values.as_deref() {
            Some(values) if !values.is_empty() => Some(values),
            _ => None,
        }
    }
}

/// One operation available against a resource
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Interaction {
    pub id: String,
    #[serde(default)]
    pub name: String,
    /// Raw verb token; see [`Interaction::verb`]
    pub verb: String,
    #[serde(default)]
    pub description: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub params: Vec<Property>,
    /// Addresses a batch of instances rather than one
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub accept_many: bool,
}

impl Interaction {
    /// The recognised verb, or `None` for an unknown token
    pub fn verb(&self) -> Option<Verb> {
        self.verb.parse().ok()
    }
}

/// Declared type of a property
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum PropertyType {
    Text,
    Binary,
    Duration,
    Timestamp,
    Integer,
    Float,
    Boolean,
}

impl PropertyType {
    /// Canonical token used when writing definitions back out
    pub fn as_str(&self) -> &'static str {
        match self {
            PropertyType::Text => "text",
            PropertyType::Binary => "binary",
            PropertyType::Duration => "duration",
            PropertyType::Timestamp => "timestamp",
            PropertyType::Integer => "integer",
            PropertyType::Float => "float",
            PropertyType::Boolean => "boolean",
        }
    }
}

impl FromStr for PropertyType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "text" | "string" => Ok(PropertyType::Text),
            "binary" | "bytes" => Ok(PropertyType::Binary),
            "duration" => Ok(PropertyType::Duration),
            "timestamp" | "datetime" => Ok(PropertyType::Timestamp),
            "integer" | "int" => Ok(PropertyType::Integer),
            "float" => Ok(PropertyType::Float),
            "boolean" | "bool" => Ok(PropertyType::Boolean),
            _ => Err(format!("unknown property type '{}'", s)),
        }
    }
}

impl TryFrom<String> for PropertyType {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<PropertyType> for String {
    fn from(value: PropertyType) -> Self {
        value.as_str().to_string()
    }
}

impl fmt::Display for PropertyType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Interaction verbs understood by the synthesizer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Verb {
    List,
    Get,
    Update,
    Create,
    Destroy,
}

impl Verb {
    /// Verbs that carry a request body
    pub fn expects_body(&self) -> bool {
        matches!(self, Verb::Create | Verb::Update)
    }

    /// Verbs that address one instance by slug
    pub fn expects_slug(&self) -> bool {
        matches!(self, Verb::Get | Verb::Update | Verb::Destroy)
    }
}

impl FromStr for Verb {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "list" => Ok(Verb::List),
            "get" => Ok(Verb::Get),
            "update" => Ok(Verb::Update),
            "create" => Ok(Verb::Create),
            "destroy" => Ok(Verb::Destroy),
            _ => Err(format!("unknown verb '{}'", s)),
        }
    }
}
