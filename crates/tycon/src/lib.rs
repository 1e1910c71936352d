// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! # tycon - type-contract resolution for object/text serialization
//!
//! Given a registered type, `tycon` produces and caches a *contract*: a
//! declarative description of how instances of that type are constructed,
//! read, and written by a generic serializer. Contracts reconcile
//! descriptor-derived structure, user annotations, inheritance,
//! generic-type quirks, and lifecycle callbacks into one immutable,
//! cache-stable artifact, safe under concurrent access.
//!
//! ## Quick Start
//!
//! ```rust
//! use tycon::descriptor::{
//!     DescriptorRegistry, MemberDescriptor, TypeDescriptorBuilder, well_known,
//! };
//! use tycon::resolver::ContractResolver;
//! use std::sync::Arc;
//!
//! let registry = Arc::new(DescriptorRegistry::new());
//! registry.install_primitives();
//!
//! let movie = registry.register(
//!     TypeDescriptorBuilder::new("Movie")
//!         .member(MemberDescriptor::property("title", well_known::STRING))
//!         .member(MemberDescriptor::property("release_year", well_known::I32))
//!         .build(),
//! );
//!
//! let resolver = ContractResolver::with_registry(Default::default(), registry);
//! let contract = resolver.resolve_contract(movie)?;
//!
//! let properties = contract.properties().expect("object contract");
//! assert_eq!(properties.names(), vec!["title", "release_year"]);
//! # Ok::<(), tycon::ResolveError>(())
//! ```
//!
//! ## Architecture
//!
//! ```text
//! +--------------------------------------------------------------------+
//! |                            Resolver                                |
//! |   resolve_contract -> cache hit (lock-free)  |  miss -> build      |
//! +--------------------------------------------------------------------+
//! |                        Contract Builder                            |
//! |   ordered classification rules -> shared init -> kind payload      |
//! |   members -> annotations -> properties -> constructors -> hooks    |
//! +--------------------------------------------------------------------+
//! |                      Descriptor Registry                           |
//! |   per-type descriptors, cached ancestry chains, accessor closures  |
//! +--------------------------------------------------------------------+
//! ```
//!
//! ## Key Types
//!
//! | Type | Description |
//! |------|-------------|
//! | [`resolver::ContractResolver`] | Entry point: classifies, builds, caches |
//! | [`contract::Contract`] | Immutable resolved description of one type |
//! | [`contract::Property`] | Metadata + accessor for one serializable member |
//! | [`descriptor::DescriptorRegistry`] | Init-time registry replacing live reflection |
//! | [`descriptor::TypeDescriptorBuilder`] | Fluent registration of type descriptions |
//!
//! ## Concurrency
//!
//! Any number of threads may resolve concurrently. Cache hits are lock-free
//! snapshot reads; misses build outside any lock (racing builds are wasted
//! work, not a hazard) and publish through a single copy-on-write swap, so
//! readers never observe a partially-updated mapping.

pub mod access;
pub mod annotations;
pub mod context;
pub mod contract;
pub mod convert;
pub mod descriptor;
pub mod error;
pub mod handling;
pub mod resolver;
pub mod value;

pub use contract::{Contract, ContractKind, Property, PropertyCollection};
pub use descriptor::{DescriptorRegistry, TypeDescriptorBuilder, TypeId};
pub use error::ResolveError;
pub use handling::{MemberSerialization, NamingConvention, Required};
pub use resolver::{ContractResolver, ResolverSettings};
pub use value::Value;

/// Convenience alias for resolution results.
pub type Result<T> = std::result::Result<T, ResolveError>;
