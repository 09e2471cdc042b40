//! Linked resource graph
//!
//! Resources live in a flat, key-sorted table and refer to their parent by
//! [`ResourceId`]. Linking runs once over the fully merged table, after which
//! the graph is read-only and guaranteed acyclic.
//!
//! Copyright (c) 2025 Apidef Team
//! Licensed under the Apache-2.0 license

use crate::error::{Error, Result};
use crate::loader::namespace::LoadedResource;
use crate::model::{Interaction, Property, ResourceDefinition};
use std::collections::{BTreeMap, HashMap, HashSet};
use std::path::{Path, PathBuf};
use tracing::debug;

/// Index of a resource inside a [`ResourceGraph`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ResourceId(usize);

/// Merged, not yet linked, resource records keyed by `<namespace>/<id>`
#[derive(Debug, Default)]
pub struct ResourceTable {
    entries: BTreeMap<String, LoadedResource>,
}

impl ResourceTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a record, rejecting a key that is already present
    pub fn insert(&mut self, resource: LoadedResource) -> Result<()> {
        if let Some(existing) = self.entries.get(&resource.key) {
            return Err(Error::DuplicateResource {
                key: resource.key.clone(),
                first: existing.source.clone(),
                second: resource.source,
            });
        }
        self.entries.insert(resource.key.clone(), resource);
        Ok(())
    }

    pub(crate) fn len(&self) -> usize {
        self.entries.len()
    }
}

/// A resource with its parent relation attached
#[derive(Debug, Clone)]
pub struct Resource {
    pub key: String,
    pub namespace: String,
    pub source: PathBuf,
    pub definition: ResourceDefinition,
    parent_key: Option<String>,
    parent: Option<ResourceId>,
}

impl Resource {
    pub fn id(&self) -> &str {
        &self.definition.id
    }

    pub fn name(&self) -> &str {
        &self.definition.name
    }

    pub fn description(&self) -> &str {
        &self.definition.description
    }

    pub fn url_slug(&self) -> &str {
        &self.definition.url_slug
    }

    pub fn url_prefix(&self) -> &str {
        &self.definition.url_prefix
    }

    pub fn parent_is_collection(&self) -> bool {
        self.definition.parent_is_collection
    }

    pub fn properties(&self) -> &[Property] {
        &self.definition.properties
    }

    pub fn interactions(&self) -> &[Interaction] {
        &self.definition.interactions
    }

    /// Fully qualified key of the parent, as declared
    pub fn parent_key(&self) -> Option<&str> {
        self.parent_key.as_deref()
    }

    pub fn parent(&self) -> Option<ResourceId> {
        self.parent
    }
}

/// Read-only, validated resource graph
#[derive(Debug, Default)]
pub struct ResourceGraph {
    resources: Vec<Resource>,
    index: HashMap<String, ResourceId>,
}

impl ResourceGraph {
    /// Attach every parent reference and verify the ancestry is acyclic.
    ///
    /// Fails on the first parent key that is absent from the table, or on the
    /// first ancestor chain that revisits a resource.
    pub fn link(table: ResourceTable) -> Result<Self> {
        let resources: Vec<Resource> = table
            .entries
            .into_values()
            .map(|loaded| Resource {
                key: loaded.key,
                namespace: loaded.namespace,
                source: loaded.source,
                definition: loaded.definition,
                parent_key: loaded.parent_key,
                parent: None,
            })
            .collect();

        let index: HashMap<String, ResourceId> = resources
            .iter()
            .enumerate()
            .map(|(i, resource)| (resource.key.clone(), ResourceId(i)))
            .collect();

        let mut graph = Self { resources, index };
        graph.attach_parents()?;
        graph.check_acyclic()?;

        debug!(resources = graph.len(), "Linked resource graph");
        Ok(graph)
    }

    /// Build a graph from in-memory definitions that all share one namespace
    pub fn from_definitions(
        namespace: &str,
        definitions: impl IntoIterator<Item = ResourceDefinition>,
    ) -> Result<Self> {
        let mut table = ResourceTable::new();
        for definition in definitions {
            let source = Path::new(namespace).join(format!("{}.json", definition.id));
            table.insert(LoadedResource::new(namespace, source, definition))?;
        }
        Self::link(table)
    }

    fn attach_parents(&mut self) -> Result<()> {
        for i in 0..self.resources.len() {
            let Some(parent_key) = self.resources[i].parent_key.as_deref() else {
                continue;
            };
            let parent = self
                .index
                .get(parent_key)
                .copied()
                .ok_or_else(|| Error::unresolved_parent(&self.resources[i].key, parent_key))?;
            self.resources[i].parent = Some(parent);
        }
        Ok(())
    }

    fn check_acyclic(&self) -> Result<()> {
        for (i, resource) in self.resources.iter().enumerate() {
            let mut visited = HashSet::new();
            let mut chain = Vec::new();
            let mut current = Some(ResourceId(i));

            while let Some(id) = current {
                let key = self.get(id).key.as_str();
                chain.push(key);
                if !visited.insert(id) {
                    return Err(Error::cyclic_ancestry(&resource.key, &chain));
                }
                current = self.get(id).parent;
            }
        }
        Ok(())
    }

    pub fn get(&self, id: ResourceId) -> &Resource {
        &self.resources[id.0]
    }

    pub fn find(&self, key: &str) -> Option<ResourceId> {
        self.index.get(key).copied()
    }

    pub fn resource(&self, key: &str) -> Option<&Resource> {
        self.find(key).map(|id| self.get(id))
    }

    /// The linked parent of a resource
    pub fn parent(&self, id: ResourceId) -> Option<&Resource> {
        self.get(id).parent.map(|parent| self.get(parent))
    }

    /// Ancestors from the immediate parent up to the root
    pub fn ancestors(&self, id: ResourceId) -> impl Iterator<Item = &Resource> + '_ {
        std::iter::successors(self.get(id).parent, move |&current| self.get(current).parent)
            .map(move |ancestor| self.get(ancestor))
    }

    /// Resources in key order
    pub fn iter(&self) -> impl Iterator<Item = (ResourceId, &Resource)> {
        self.resources
            .iter()
            .enumerate()
            .map(|(i, resource)| (ResourceId(i), resource))
    }

    pub fn len(&self) -> usize {
        self.resources.len()
    }

    pub fn is_empty(&self) -> bool {
        self.resources.is_empty()
    }
}
