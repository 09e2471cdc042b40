//! Endpoint synthesis
//!
//! Each interaction of a resource becomes one [`Endpoint`]: an HTTP method,
//! the path derived from the resource's ancestry, the interaction's query
//! parameters and, for body-bearing verbs, a randomized sample request.
//!
//! Copyright (c) 2025 Apidef Team
//! Licensed under the Apache-2.0 license

use crate::error::{Error, Result};
use crate::graph::{Resource, ResourceGraph, ResourceId};
use crate::model::{Interaction, Property, Verb};
use crate::path;
use crate::sample::SampleGenerator;
use rand::rngs::OsRng;
use rand::{CryptoRng, RngCore};
use serde::Serialize;
use serde_json::Value;
use std::fmt;
use tracing::debug;

/// HTTP method of a derived endpoint
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum HttpMethod {
    Get,
    Put,
    Post,
    Delete,
}

impl HttpMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            HttpMethod::Get => "GET",
            HttpMethod::Put => "PUT",
            HttpMethod::Post => "POST",
            HttpMethod::Delete => "DELETE",
        }
    }
}

impl From<Verb> for HttpMethod {
    fn from(verb: Verb) -> Self {
        match verb {
            Verb::List | Verb::Get => HttpMethod::Get,
            Verb::Update => HttpMethod::Put,
            Verb::Create => HttpMethod::Post,
            Verb::Destroy => HttpMethod::Delete,
        }
    }
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One derived HTTP operation
#[derive(Debug, Clone, PartialEq)]
pub struct Endpoint {
    pub method: HttpMethod,
    /// Path without a leading `/`, e.g. `roots/{id}/children`
    pub path: String,
    pub params: Vec<Property>,
    pub name: String,
    pub description: String,
    /// Encoded JSON sample body, present only for create and update
    pub sample_request: Option<Vec<u8>>,
    /// Never populated: response samples are not generated.
    pub sample_response: Option<Vec<u8>>,
}

impl Endpoint {
    /// Decode the sample request back into a structured value
    pub fn sample_request_value(&self) -> Result<Option<Value>> {
        self.sample_request
            .as_deref()
            .map(|bytes| serde_json::from_slice(bytes).map_err(Error::encode))
            .transpose()
    }
}

/// A resource together with its ordered endpoints
#[derive(Debug, Clone)]
pub struct ResourceSurface<'g> {
    pub resource: &'g Resource,
    pub endpoints: Vec<Endpoint>,
}

/// Turns linked resources into endpoint lists
#[derive(Debug)]
pub struct EndpointSynthesizer<R = OsRng> {
    samples: SampleGenerator<R>,
}

impl EndpointSynthesizer<OsRng> {
    pub fn new() -> Self {
        Self {
            samples: SampleGenerator::new(),
        }
    }
}

impl Default for EndpointSynthesizer<OsRng> {
    fn default() -> Self {
        Self::new()
    }
}

impl<R: RngCore + CryptoRng> EndpointSynthesizer<R> {
    /// Use a specific sample generator, e.g. one with a seeded source
    pub fn with_generator(samples: SampleGenerator<R>) -> Self {
        Self { samples }
    }

    /// Endpoints for every interaction of one resource, in declaration order
    pub fn endpoints(&mut self, graph: &ResourceGraph, id: ResourceId) -> Result<Vec<Endpoint>> {
        let resource = graph.get(id);
        resource
            .interactions()
            .iter()
            .map(|interaction| self.endpoint(graph, id, interaction))
            .collect()
    }

    /// Endpoints for every resource in the graph, in key order
    pub fn surface<'g>(&mut self, graph: &'g ResourceGraph) -> Result<Vec<ResourceSurface<'g>>> {
        let mut surfaces = Vec::with_capacity(graph.len());
        for (id, resource) in graph.iter() {
            let endpoints = self.endpoints(graph, id)?;
            debug!(resource = %resource.key, endpoints = endpoints.len(), "Synthesized endpoints");
            surfaces.push(ResourceSurface { resource, endpoints });
        }
        Ok(surfaces)
    }

    fn endpoint(
        &mut self,
        graph: &ResourceGraph,
        id: ResourceId,
        interaction: &Interaction,
    ) -> Result<Endpoint> {
        let resource = graph.get(id);
        let verb = interaction.verb().ok_or_else(|| Error::UnsupportedVerb {
            resource: resource.key.clone(),
            interaction: interaction.id.clone(),
            verb: interaction.verb.clone(),
        })?;

        let sample_request = if verb.expects_body() {
            match self.samples.request_body(&resource.definition, interaction)? {
                Some(body) => Some(serde_json::to_vec(&body).map_err(Error::encode)?),
                None => None,
            }
        } else {
            None
        };

        Ok(Endpoint {
            method: verb.into(),
            path: path::path(graph, id, Some(interaction)),
            params: interaction.params.clone(),
            name: interaction.name.clone(),
            description: interaction.description.clone(),
            sample_request,
            sample_response: None,
        })
    }
}
