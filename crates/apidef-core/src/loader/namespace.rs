//! Namespace enumeration
//!
//! A namespace is a directory under the definition root. Every definition
//! file below it, at any depth, belongs to that namespace and is keyed as
//! `<namespace>/<id>`.
//!
//! Copyright (c) 2025 Apidef Team
//! Licensed under the Apache-2.0 license

use crate::error::{Error, Result};
use crate::loader::parser::{DefinitionParser, Format};
use crate::model::ResourceDefinition;
use std::path::{Path, PathBuf};
use tracing::{debug, trace};
use walkdir::WalkDir;

/// A decoded definition together with where it came from
#[derive(Debug, Clone, PartialEq)]
pub struct LoadedResource {
    /// `<namespace>/<id>`
    pub key: String,
    pub namespace: String,
    /// Fully qualified parent key, if the definition names a parent
    pub parent_key: Option<String>,
    pub source: PathBuf,
    pub definition: ResourceDefinition,
}

impl LoadedResource {
    pub fn new(namespace: &str, source: PathBuf, definition: ResourceDefinition) -> Self {
        let parent_key = definition
            .parent
            .as_deref()
            .map(|parent| qualify_parent(namespace, parent));
        Self {
            key: qualify(namespace, &definition.id),
            namespace: namespace.to_string(),
            parent_key,
            source,
            definition,
        }
    }
}

/// Strip surrounding separators and a leading `./` from a namespace path
pub fn normalize_namespace(namespace: &str) -> String {
    let trimmed = namespace.trim_start_matches("./");
    trimmed.trim_matches('/').to_string()
}

/// Build the key of `id` inside `namespace`
pub fn qualify(namespace: &str, id: &str) -> String {
    if namespace.is_empty() {
        id.to_string()
    } else {
        format!("{}/{}", namespace, id)
    }
}

/// Qualify a parent reference; a bare id refers to the child's own namespace
pub fn qualify_parent(namespace: &str, parent: &str) -> String {
    if parent.contains('/') {
        parent.trim_matches('/').to_string()
    } else {
        qualify(namespace, parent)
    }
}

/// The namespace part of a key: everything before the last `/`
pub fn namespace_of(key: &str) -> &str {
    key.rsplit_once('/').map(|(namespace, _)| namespace).unwrap_or("")
}

/// Decode every definition file under `root/namespace`.
///
/// Any traversal or decode failure aborts the whole namespace.
pub fn load_namespace(
    parser: &DefinitionParser,
    root: &Path,
    namespace: &str,
) -> Result<Vec<LoadedResource>> {
    let dir = root.join(namespace);
    let mut loaded = Vec::new();

    for entry in WalkDir::new(&dir).follow_links(true).sort_by_file_name() {
        let entry = entry.map_err(|e| {
            let path = e.path().map(Path::to_path_buf).unwrap_or_else(|| dir.clone());
            Error::filesystem(path, e.into())
        })?;

        if !entry.file_type().is_file() {
            continue;
        }
        let path = entry.path();
        if is_hidden(path) {
            trace!(path = %path.display(), "Skipping hidden file");
            continue;
        }
        if Format::from_path(path).is_none() {
            debug!(path = %path.display(), "Skipping file without a definition extension");
            continue;
        }

        let definition = parser.parse_file(path)?;
        debug!(namespace, id = %definition.id, path = %path.display(), "Decoded definition");
        loaded.push(LoadedResource::new(namespace, path.to_path_buf(), definition));
    }

    Ok(loaded)
}

fn is_hidden(path: &Path) -> bool {
    path.file_name()
        .and_then(|name| name.to_str())
        .map(|name| name.starts_with('.'))
        .unwrap_or(false)
}
