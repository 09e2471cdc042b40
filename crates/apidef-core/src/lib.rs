//! Apidef Core - API surface derivation from declarative resource definitions
//!
//! This crate turns a directory tree of resource definitions into the HTTP
//! surface those resources expose: endpoints with derived paths, query
//! parameters and randomized sample request bodies.
//!
//! # Main Components
//!
//! - **Loader**: decode JSON/YAML definitions and import foreign namespaces
//! - **Graph**: link parents by key and reject missing or cyclic ancestry
//! - **Path Algebra**: compose URL paths from the ancestor chain
//! - **Endpoint Synthesizer**: map interactions to HTTP endpoints
//! - **Sample Generator**: build request bodies from property constraints
//!
//! # Example
//!
//! ```no_run
//! use apidef_core::{EndpointSynthesizer, Resolver, Result};
//!
//! fn example() -> Result<()> {
//!     let graph = Resolver::new("definitions").resolve(&["mq"])?;
//!     for surface in EndpointSynthesizer::new().surface(&graph)? {
//!         for endpoint in &surface.endpoints {
//!             println!("{} /{}", endpoint.method, endpoint.path);
//!         }
//!     }
//!     Ok(())
//! }
//! ```
//!
//! Copyright (c) 2025 Apidef Team
//! Licensed under the Apache-2.0 license

pub mod endpoint;
pub mod error;
pub mod graph;
pub mod loader;
pub mod model;
pub mod path;
pub mod sample;

pub use endpoint::{Endpoint, EndpointSynthesizer, HttpMethod, ResourceSurface};
pub use error::{Error, Result};
pub use graph::{Resource, ResourceGraph, ResourceId};
pub use loader::{DefinitionParser, Format, Resolution, Resolver};
pub use model::{Interaction, Property, PropertyType, ResourceDefinition, Verb};
pub use sample::SampleGenerator;

/// Version of the apidef-core library
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
