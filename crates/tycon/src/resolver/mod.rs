// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! The contract resolver: classification, assembly, and caching.
//!
//! `ContractResolver` is the single public entry point. Configuration is
//! fixed at construction time, including which cache scope the resolver
//! reads and writes for its entire lifetime: the process-wide cache shared
//! by all resolvers with the same configuration fingerprint, or a cache
//! private to this instance.
//!
//! # Example
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
//! let movie = registry.register(
//!     TypeDescriptorBuilder::new("Movie")
//!         .member(MemberDescriptor::property("title", well_known::STRING))
//!         .build(),
//! );
//!
//! let resolver = ContractResolver::with_registry(Default::default(), registry);
//! let contract = resolver.resolve_contract(movie)?;
//! assert_eq!(contract.kind_name(), "object");
//! # Ok::<(), tycon::ResolveError>(())
//! ```

mod cache;
pub(crate) mod callbacks;
mod classify;
pub(crate) mod constructors;
pub(crate) mod members;
pub(crate) mod properties;

pub use cache::LookupStats;

use crate::contract::Contract;
use crate::descriptor::{fnv1a, AccessFilter, DescriptorRegistry, TypeId};
use crate::error::ResolveError;
use crate::handling::NamingConvention;
use cache::{CacheKey, ContractCache};
use std::sync::{Arc, OnceLock};

/// Stable fingerprint of a resolver configuration.
///
/// Resolvers configured alike share cache entries; differently-configured
/// resolvers can never cross-contaminate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ResolverId(u64);

impl ResolverId {
    #[cfg(test)]
    pub(crate) fn from_raw(raw: u64) -> Self {
        Self(raw)
    }
}

/// Resolver configuration, fixed at construction time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResolverSettings {
    /// Use the process-wide cache instead of an instance-private one.
    pub shared_cache: bool,
    /// Default member search breadth includes non-public members.
    pub search_non_public: bool,
    /// Serialize compiler-synthesized members.
    pub serialize_synthesized_members: bool,
    /// Never classify types by their custom-serialization capability.
    pub ignore_custom_serialization: bool,
    /// Ignore the serializable marker when resolving the member-selection
    /// mode.
    pub ignore_serializable_marker: bool,
    /// Convention applied to serialized property names.
    pub naming: NamingConvention,
}

impl Default for ResolverSettings {
    fn default() -> Self {
        Self {
            shared_cache: false,
            search_non_public: false,
            serialize_synthesized_members: false,
            ignore_custom_serialization: false,
            ignore_serializable_marker: true,
            naming: NamingConvention::AsIs,
        }
    }
}

impl ResolverSettings {
    #[must_use]
    pub fn with_shared_cache(mut self, shared: bool) -> Self {
        self.shared_cache = shared;
        self
    }

    #[must_use]
    pub fn with_search_non_public(mut self, search: bool) -> Self {
        self.search_non_public = search;
        self
    }

    #[must_use]
    pub fn with_serialize_synthesized_members(mut self, serialize: bool) -> Self {
        self.serialize_synthesized_members = serialize;
        self
    }

    #[must_use]
    pub fn with_ignore_custom_serialization(mut self, ignore: bool) -> Self {
        self.ignore_custom_serialization = ignore;
        self
    }

    #[must_use]
    pub fn with_ignore_serializable_marker(mut self, ignore: bool) -> Self {
        self.ignore_serializable_marker = ignore;
        self
    }

    #[must_use]
    pub fn with_naming(mut self, naming: NamingConvention) -> Self {
        self.naming = naming;
        self
    }

    fn fingerprint(&self, registry_id: u64) -> ResolverId {
        let bits = [
            u8::from(self.search_non_public),
            u8::from(self.serialize_synthesized_members),
            u8::from(self.ignore_custom_serialization),
            u8::from(self.ignore_serializable_marker),
            self.naming.discriminant() as u8,
        ];
        let mut hash = fnv1a(&bits);
        hash ^= registry_id;
        ResolverId(hash)
    }
}

/// Resolves and caches contracts for registered types.
pub struct ContractResolver {
    settings: ResolverSettings,
    registry: Arc<DescriptorRegistry>,
    id: ResolverId,
    instance_cache: Option<ContractCache>,
}

impl Default for ContractResolver {
    fn default() -> Self {
        Self::new()
    }
}

impl ContractResolver {
    /// A resolver with default settings over the global registry.
    #[must_use]
    pub fn new() -> Self {
        Self::with_settings(ResolverSettings::default())
    }

    /// A resolver with the given settings over the global registry.
    #[must_use]
    pub fn with_settings(settings: ResolverSettings) -> Self {
        Self::with_registry(settings, Arc::clone(DescriptorRegistry::global()))
    }

    /// A resolver over an explicit registry.
    #[must_use]
    pub fn with_registry(settings: ResolverSettings, registry: Arc<DescriptorRegistry>) -> Self {
        let id = settings.fingerprint(registry.id());
        let instance_cache = if settings.shared_cache {
            None
        } else {
            Some(ContractCache::new())
        };
        Self {
            settings,
            registry,
            id,
            instance_cache,
        }
    }

    /// The process-wide default resolver, backed by the shared cache.
    pub fn shared() -> &'static ContractResolver {
        static SHARED: OnceLock<ContractResolver> = OnceLock::new();
        SHARED.get_or_init(|| {
            ContractResolver::with_settings(ResolverSettings::default().with_shared_cache(true))
        })
    }

    #[must_use]
    pub fn settings(&self) -> &ResolverSettings {
        &self.settings
    }

    #[must_use]
    pub fn registry(&self) -> &Arc<DescriptorRegistry> {
        &self.registry
    }

    #[must_use]
    pub fn resolver_id(&self) -> ResolverId {
        self.id
    }

    /// Resolve the contract for `type_id`.
    ///
    /// Fails only when the type has no registered descriptor. The cache hit
    /// path is lock-free and returns the same `Arc<Contract>` to every
    /// caller; misses build the contract outside any lock and publish it
    /// copy-on-write.
    pub fn resolve_contract(&self, type_id: TypeId) -> Result<Arc<Contract>, ResolveError> {
        if !self.registry.contains(type_id) {
            return Err(ResolveError::UnknownType(type_id));
        }

        let key = CacheKey {
            resolver: self.id,
            type_id,
        };
        let cache = self.cache();
        if let Some(contract) = cache.get(&key) {
            return Ok(contract);
        }

        let contract = Arc::new(classify::create_contract(self, &self.registry, type_id)?);
        cache.publish(key, Arc::clone(&contract));
        Ok(contract)
    }

    /// The serialized name the resolver's naming convention produces.
    #[must_use]
    pub fn resolved_property_name(&self, name: &str) -> String {
        self.settings.naming.apply(name)
    }

    /// Hit/miss statistics of this resolver's cache scope.
    #[must_use]
    pub fn cache_stats(&self) -> LookupStats {
        self.cache().stats()
    }

    /// Number of contracts in this resolver's cache scope.
    #[must_use]
    pub fn cached_contracts(&self) -> usize {
        self.cache().len()
    }

    pub(crate) fn default_member_filter(&self) -> AccessFilter {
        if self.settings.search_non_public {
            AccessFilter::PUBLIC_INSTANCE.include_non_public()
        } else {
            AccessFilter::PUBLIC_INSTANCE
        }
    }

    fn cache(&self) -> &ContractCache {
        match &self.instance_cache {
            Some(cache) => cache,
            None => ContractCache::shared(),
        }
    }
}
