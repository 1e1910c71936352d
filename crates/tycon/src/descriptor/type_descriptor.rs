// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Type descriptors: the registered, immutable runtime description of a
//! type that replaces live reflection during contract resolution.

use crate::access::DynamicAccessTable;
use crate::annotations::TypeAnnotations;
use crate::convert::TextConverterKind;
use crate::descriptor::{
    ConstructorDescriptor, CreateFn, MemberDescriptor, MethodDescriptor, TypeId, Visibility,
};
use std::sync::Arc;

/// Primitive kinds the serializer recognizes directly.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PrimitiveKind {
    Bool,
    I8,
    I16,
    I32,
    I64,
    U8,
    U16,
    U32,
    U64,
    F32,
    F64,
    Decimal,
    Char,
    Str,
    Timestamp,
    Duration,
    Uuid,
    Uri,
    Bytes,
}

/// Keyed-enumeration (dictionary) shape.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyedShape {
    pub key: TypeId,
    pub value: TypeId,
}

/// Sequential-enumeration shape.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SequenceShape {
    pub element: TypeId,
}

/// Custom-serialization capability: the type renders itself and exposes a
/// dedicated creator for reading back.
#[derive(Clone, Default)]
pub struct CustomSerialization {
    pub creator: Option<CreateFn>,
}

/// Structural and explicit capabilities used to classify a type.
#[derive(Clone, Default)]
pub struct Capabilities {
    pub keyed: Option<KeyedShape>,
    pub sequence: Option<SequenceShape>,
    pub dynamic_members: bool,
    pub custom_serialization: Option<CustomSerialization>,
    /// The type is (part of) the library's tree-node token family.
    pub tree_node: bool,
    pub text_converter: Option<TextConverterKind>,
    pub key_value: Option<(TypeId, TypeId)>,
    /// Container whose deserialize-completion hook is known to throw;
    /// such types never receive an auto-discovered on-deserialized hook.
    pub completion_hook_unsafe: bool,
}

/// The registered description of one type.
#[derive(Clone)]
pub struct TypeDescriptor {
    pub type_id: TypeId,
    pub name: Arc<str>,
    pub base: Option<TypeId>,
    pub is_value_type: bool,
    /// `Some(inner)` when this type is a nullable wrapper around `inner`.
    pub nullable_inner: Option<TypeId>,
    pub primitive: Option<PrimitiveKind>,
    pub capabilities: Capabilities,
    pub annotations: TypeAnnotations,
    /// Members declared on this type only; inherited members come from the
    /// base chain during discovery.
    pub members: Vec<MemberDescriptor>,
    pub constructors: Vec<ConstructorDescriptor>,
    pub methods: Vec<MethodDescriptor>,
    /// Reflection-style accessor fallback for members without compiled
    /// closures.
    pub dynamic_access: Option<DynamicAccessTable>,
}

impl TypeDescriptor {
    /// A primitive descriptor with no members.
    #[must_use]
    pub fn primitive(name: impl Into<String>, kind: PrimitiveKind) -> Self {
        let name = name.into();
        Self {
            type_id: TypeId::of(&name),
            name: Arc::from(name.as_str()),
            base: None,
            is_value_type: true,
            nullable_inner: None,
            primitive: Some(kind),
            capabilities: Capabilities::default(),
            annotations: TypeAnnotations::default(),
            members: Vec::new(),
            constructors: Vec::new(),
            methods: Vec::new(),
            dynamic_access: None,
        }
    }

    /// The parameterless constructor visible under the given access level.
    #[must_use]
    pub fn default_constructor(&self, non_public: bool) -> Option<&ConstructorDescriptor> {
        self.constructors.iter().find(|c| {
            c.is_parameterless() && (c.visibility == Visibility::Public || non_public)
        })
    }

    #[must_use]
    pub fn has_default_constructor(&self, non_public: bool) -> bool {
        self.default_constructor(non_public).is_some()
    }

    pub(crate) fn public_parameterized_constructors(
        &self,
    ) -> impl Iterator<Item = &ConstructorDescriptor> {
        self.constructors
            .iter()
            .filter(|c| c.visibility == Visibility::Public && !c.is_parameterless())
    }

    pub(crate) fn designated_constructors(&self) -> Vec<&ConstructorDescriptor> {
        self.constructors.iter().filter(|c| c.designated).collect()
    }
}

impl std::fmt::Debug for TypeDescriptor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TypeDescriptor")
            .field("type_id", &self.type_id)
            .field("name", &self.name)
            .field("base", &self.base)
            .field("is_value_type", &self.is_value_type)
            .field("primitive", &self.primitive)
            .field("members", &self.members.len())
            .field("constructors", &self.constructors.len())
            .field("methods", &self.methods.len())
            .finish_non_exhaustive()
    }
}
