//! Definition file decoding for YAML and JSON formats
//!
//! Copyright (c) 2025 Apidef Team
//! Licensed under the Apache-2.0 license

use crate::error::{Error, Result};
use crate::model::ResourceDefinition;
use std::path::Path;

/// Supported definition file formats
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Format {
    /// YAML format (.yaml, .yml)
    Yaml,
    /// JSON format (.json)
    Json,
}

impl Format {
    /// Detect format from file extension
    pub fn from_path(path: &Path) -> Option<Self> {
        let extension = path.extension().and_then(|ext| ext.to_str())?;
        match extension.to_lowercase().as_str() {
            "yaml" | "yml" => Some(Format::Yaml),
            "json" => Some(Format::Json),
            _ => None,
        }
    }

    /// Get the primary file extension for this format
    pub fn primary_extension(&self) -> &'static str {
        match self {
            Format::Yaml => "yml",
            Format::Json => "json",
        }
    }
}

/// Decoder turning one definition file into a [`ResourceDefinition`]
#[derive(Debug, Default)]
pub struct DefinitionParser;

impl DefinitionParser {
    pub fn new() -> Self {
        Self
    }

    /// Decode a definition file, detecting format from extension.
    ///
    /// Files without a recognised extension are decoded as JSON.
    pub fn parse_file(&self, path: &Path) -> Result<ResourceDefinition> {
        let format = Format::from_path(path).unwrap_or(Format::Json);
        let content = std::fs::read_to_string(path)
            .map_err(|e| Error::filesystem(path.to_path_buf(), e))?;

        self.parse_content(&content, format, path)
    }

    /// Decode definition content with an explicit format
    pub fn parse_content(
        &self,
        content: &str,
        format: Format,
        path: &Path,
    ) -> Result<ResourceDefinition> {
        match format {
            Format::Yaml => serde_yaml::from_str(content)
                .map_err(|e| Error::yaml_decode(path.to_path_buf(), e)),
            Format::Json => serde_json::from_str(content)
                .map_err(|e| Error::json_decode(path.to_path_buf(), e)),
        }
    }

    /// Serialize a definition back to text
    pub fn serialize(&self, resource: &ResourceDefinition, format: Format) -> Result<String> {
        match format {
            Format::Json => serde_json::to_string_pretty(resource).map_err(Error::encode),
            Format::Yaml => serde_yaml::to_string(resource).map_err(Error::encode),
        }
    }
}
