//! Definition loading and resolution
//!
//! This module provides:
//! - YAML and JSON decoding of one-resource-per-file definitions
//! - Recursive enumeration of a namespace directory
//! - Automatic import of foreign namespaces named by parent references
//! - A per-call visited-namespace cache
//!
//! # Example Usage
//!
//! ```no_run
//! use apidef_core::loader::Resolver;
//!
//! let graph = Resolver::new("definitions").resolve(&["mq"])?;
//! for (_, resource) in graph.iter() {
//!     println!("{}", resource.key);
//! }
//! # Ok::<(), apidef_core::Error>(())
//! ```
//!
//! Copyright (c) 2025 Apidef Team
//! Licensed under the Apache-2.0 license

pub mod cache;
pub mod namespace;
pub mod parser;
pub mod resolver;

pub use cache::{CacheStats, ImportCache};
pub use namespace::{load_namespace, LoadedResource};
pub use parser::{DefinitionParser, Format};
pub use resolver::{Resolution, Resolver};
