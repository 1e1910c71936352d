// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! The descriptor registry: concurrent store of type descriptors plus
//! cached root-first ancestry chains.
//!
//! Registration happens at init time; resolution afterwards operates purely
//! over registered descriptors. The ancestry chain of a type is built once
//! and cached so discovery and callback resolution iterate a flat list
//! instead of re-walking base links on every call.

use crate::descriptor::{PrimitiveKind, TypeDescriptor, TypeId};
use dashmap::DashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, OnceLock};

/// Well-known identities of the primitive descriptors installed by
/// [`DescriptorRegistry::install_primitives`].
pub mod well_known {
    use crate::descriptor::TypeId;

    pub const BOOL: TypeId = TypeId::of("bool");
    pub const I8: TypeId = TypeId::of("i8");
    pub const I16: TypeId = TypeId::of("i16");
    pub const I32: TypeId = TypeId::of("i32");
    pub const I64: TypeId = TypeId::of("i64");
    pub const U8: TypeId = TypeId::of("u8");
    pub const U16: TypeId = TypeId::of("u16");
    pub const U32: TypeId = TypeId::of("u32");
    pub const U64: TypeId = TypeId::of("u64");
    pub const F32: TypeId = TypeId::of("f32");
    pub const F64: TypeId = TypeId::of("f64");
    pub const DECIMAL: TypeId = TypeId::of("Decimal");
    pub const CHAR: TypeId = TypeId::of("char");
    pub const STRING: TypeId = TypeId::of("String");
    pub const TIMESTAMP: TypeId = TypeId::of("Timestamp");
    pub const DURATION: TypeId = TypeId::of("Duration");
    pub const UUID: TypeId = TypeId::of("Uuid");
    pub const URI: TypeId = TypeId::of("Uri");
    pub const BYTES: TypeId = TypeId::of("Bytes");
}

static NEXT_REGISTRY_ID: AtomicU64 = AtomicU64::new(1);

/// Concurrent store of registered type descriptors.
pub struct DescriptorRegistry {
    id: u64,
    types: DashMap<TypeId, Arc<TypeDescriptor>>,
    ancestry: DashMap<TypeId, Arc<[TypeId]>>,
}

impl Default for DescriptorRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl DescriptorRegistry {
    #[must_use]
    pub fn new() -> Self {
        Self {
            id: NEXT_REGISTRY_ID.fetch_add(1, Ordering::Relaxed),
            types: DashMap::new(),
            ancestry: DashMap::new(),
        }
    }

    /// The process-wide registry, with primitives pre-installed.
    pub fn global() -> &'static Arc<DescriptorRegistry> {
        static GLOBAL: OnceLock<Arc<DescriptorRegistry>> = OnceLock::new();
        GLOBAL.get_or_init(|| {
            let registry = DescriptorRegistry::new();
            registry.install_primitives();
            Arc::new(registry)
        })
    }

    /// Unique identity of this registry instance.
    #[must_use]
    pub fn id(&self) -> u64 {
        self.id
    }

    /// Register a descriptor, returning its type identity.
    ///
    /// Re-registering a type replaces its descriptor. Cached ancestry chains
    /// are dropped because a late-registered base can change them.
    pub fn register(&self, descriptor: TypeDescriptor) -> TypeId {
        let type_id = descriptor.type_id;
        log::trace!("registry {}: register {}", self.id, descriptor.name);
        self.types.insert(type_id, Arc::new(descriptor));
        self.ancestry.clear();
        type_id
    }

    #[must_use]
    pub fn get(&self, type_id: TypeId) -> Option<Arc<TypeDescriptor>> {
        self.types.get(&type_id).map(|e| Arc::clone(e.value()))
    }

    #[must_use]
    pub fn contains(&self, type_id: TypeId) -> bool {
        self.types.contains_key(&type_id)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.types.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }

    /// Root-first inheritance chain ending at `type_id` itself.
    ///
    /// Unregistered links terminate the walk; a repeated link does too, so a
    /// miswired base cycle cannot hang resolution.
    #[must_use]
    pub fn ancestry(&self, type_id: TypeId) -> Arc<[TypeId]> {
        if let Some(chain) = self.ancestry.get(&type_id) {
            return Arc::clone(chain.value());
        }

        let mut chain = Vec::new();
        let mut current = Some(type_id);
        while let Some(id) = current {
            if chain.contains(&id) {
                break;
            }
            chain.push(id);
            current = self.get(id).and_then(|d| d.base);
        }
        chain.reverse();

        let chain: Arc<[TypeId]> = Arc::from(chain.into_boxed_slice());
        self.ancestry.insert(type_id, Arc::clone(&chain));
        chain
    }

    /// Strip one level of nullable wrapping, if any.
    #[must_use]
    pub fn strip_nullable(&self, type_id: TypeId) -> TypeId {
        self.get(type_id)
            .and_then(|d| d.nullable_inner)
            .unwrap_or(type_id)
    }

    /// Whether the type or any ancestor satisfies `predicate`.
    #[must_use]
    pub fn is_or_derives(
        &self,
        type_id: TypeId,
        predicate: impl Fn(&TypeDescriptor) -> bool,
    ) -> bool {
        self.ancestry(type_id)
            .iter()
            .filter_map(|id| self.get(*id))
            .any(|d| predicate(&d))
    }

    /// Register descriptors for the primitive kinds the serializer
    /// recognizes directly.
    pub fn install_primitives(&self) {
        let primitives: &[(&str, PrimitiveKind)] = &[
            ("bool", PrimitiveKind::Bool),
            ("i8", PrimitiveKind::I8),
            ("i16", PrimitiveKind::I16),
            ("i32", PrimitiveKind::I32),
            ("i64", PrimitiveKind::I64),
            ("u8", PrimitiveKind::U8),
            ("u16", PrimitiveKind::U16),
            ("u32", PrimitiveKind::U32),
            ("u64", PrimitiveKind::U64),
            ("f32", PrimitiveKind::F32),
            ("f64", PrimitiveKind::F64),
            ("Decimal", PrimitiveKind::Decimal),
            ("char", PrimitiveKind::Char),
            ("String", PrimitiveKind::Str),
            ("Timestamp", PrimitiveKind::Timestamp),
            ("Duration", PrimitiveKind::Duration),
            ("Uuid", PrimitiveKind::Uuid),
            ("Uri", PrimitiveKind::Uri),
            ("Bytes", PrimitiveKind::Bytes),
        ];
        for (name, kind) in primitives {
            self.register(TypeDescriptor::primitive(*name, *kind));
        }
    }
}
