//! Top-level resolution: namespace loading, cross-namespace imports and linking
//!
//! A parent reference that points outside the namespace being loaded pulls in
//! the foreign namespace in full. The [`ImportCache`] owned by the call makes
//! sure each namespace is merged at most once, which also bounds the recursion
//! for cyclic or diamond-shaped import graphs.
//!
//! Copyright (c) 2025 Apidef Team
//! Licensed under the Apache-2.0 license

use crate::error::{Error, Result};
use crate::graph::{ResourceGraph, ResourceTable};
use crate::loader::cache::{CacheStats, ImportCache};
use crate::loader::namespace::{load_namespace, namespace_of, normalize_namespace};
use crate::loader::parser::DefinitionParser;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Outcome of a resolution call
#[derive(Debug)]
pub struct Resolution {
    pub graph: ResourceGraph,
    /// Every namespace merged, requested or imported
    pub namespaces: Vec<String>,
    pub cache: CacheStats,
}

/// Resolves namespaces below a definition root into a linked graph
#[derive(Debug)]
pub struct Resolver {
    root: PathBuf,
    parser: DefinitionParser,
}

impl Resolver {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            parser: DefinitionParser::new(),
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Load, import and link the given namespaces into one graph
    pub fn resolve<S: AsRef<str>>(&self, namespaces: &[S]) -> Result<ResourceGraph> {
        self.resolve_detailed(namespaces).map(|resolution| resolution.graph)
    }

    /// Like [`Resolver::resolve`], also reporting which namespaces were merged
    pub fn resolve_detailed<S: AsRef<str>>(&self, namespaces: &[S]) -> Result<Resolution> {
        let mut cache = ImportCache::new();
        let mut table = ResourceTable::new();

        for namespace in namespaces {
            let namespace = normalize_namespace(namespace.as_ref());
            self.merge_namespace(&namespace, &mut table, &mut cache)?;
        }

        let graph = ResourceGraph::link(table)?;
        let merged: Vec<String> = cache.namespaces().map(str::to_string).collect();
        info!(
            root = %self.root.display(),
            namespaces = ?merged,
            resources = graph.len(),
            "Resolved resource graph"
        );

        Ok(Resolution {
            graph,
            namespaces: merged,
            cache: cache.stats(),
        })
    }

    fn merge_namespace(
        &self,
        namespace: &str,
        table: &mut ResourceTable,
        cache: &mut ImportCache,
    ) -> Result<()> {
        if !cache.begin(namespace) {
            debug!(namespace, "Namespace already merged");
            return Ok(());
        }

        let loaded = load_namespace(&self.parser, &self.root, namespace)?;
        let count = loaded.len();

        let mut imports = Vec::new();
        for resource in loaded {
            if let Some(parent_key) = resource.parent_key.as_deref() {
                let target = namespace_of(parent_key);
                if target != namespace {
                    imports.push((resource.key.clone(), target.to_string()));
                }
            }
            table.insert(resource)?;
        }
        debug!(namespace, resources = count, merged = table.len(), "Loaded namespace");

        for (importer, target) in imports {
            debug!(importer = %importer, target = %target, "Importing namespace");
            self.merge_namespace(&target, table, cache)
                .map_err(|e| Error::import(importer, self.root.join(&target), e))?;
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    fn write(root: &Path, relative: &str, content: &str) {
        let path = root.join(relative);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, content).unwrap();
    }

    #[test]
    fn test_foreign_parent_triggers_import() -> Result<()> {
        let dir = tempdir().unwrap();
        write(dir.path(), "auth/projects.json", r#"{"id": "projects", "url_prefix": "projects"}"#);
        write(
            dir.path(),
            "mq/queues.json",
            r#"{"id": "queues", "parent": "auth/projects", "url_prefix": "queues"}"#,
        );

        let resolution = Resolver::new(dir.path()).resolve_detailed(&["mq"])?;
        assert_eq!(resolution.namespaces, vec!["auth", "mq"]);

        let graph = resolution.graph;
        let queues = graph.find("mq/queues").unwrap();
        assert_eq!(graph.parent(queues).map(|r| r.key.as_str()), Some("auth/projects"));
        Ok(())
    }

    #[test]
    fn test_mutual_imports_terminate() -> Result<()> {
        let dir = tempdir().unwrap();
        write(dir.path(), "a/one.json", r#"{"id": "one", "parent": "b/two", "url_prefix": "one"}"#);
        write(dir.path(), "a/root.json", r#"{"id": "root", "url_prefix": "roots"}"#);
        write(dir.path(), "b/two.json", r#"{"id": "two", "parent": "a/root", "url_prefix": "two"}"#);

        let resolution = Resolver::new(dir.path()).resolve_detailed(&["a"])?;
        assert_eq!(resolution.graph.len(), 3);
        assert_eq!(resolution.cache.loaded, 2);
        Ok(())
    }

    #[test]
    fn test_import_failure_is_wrapped() {
        let dir = tempdir().unwrap();
        write(
            dir.path(),
            "mq/queues.json",
            r#"{"id": "queues", "parent": "missing/projects", "url_prefix": "queues"}"#,
        );

        let err = Resolver::new(dir.path()).resolve(&["mq"]).unwrap_err();
        match &err {
            Error::Import { resource, target, .. } => {
                assert_eq!(resource, "mq/queues");
                assert_eq!(target, &dir.path().join("missing"));
            }
            other => panic!("unexpected error: {other}"),
        }
        assert!(matches!(err.root_cause(), Error::Filesystem { .. }));
    }
}
