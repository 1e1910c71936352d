// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Contracts: the resolved, immutable description of how a type is
//! constructed, read, and written.
//!
//! A contract is built once per (resolver configuration, type) pair and
//! shared behind an `Arc`; it is never mutated after publication.

mod property;

pub use property::{Property, PropertyCollection};

use crate::context::{ErrorContext, SerializationContext};
use crate::convert::ConverterRef;
use crate::descriptor::{CreateFn, DefaultCreateFn, HookKind, MethodBody, PrimitiveKind, TypeId};
use crate::handling::{MemberSerialization, NamingConvention, Required};
use std::any::Any;
use std::sync::Arc;

/// A lifecycle hook method bound into a contract.
#[derive(Clone)]
pub struct CallbackMethod {
    pub declaring_type: TypeId,
    pub name: Arc<str>,
    pub hook: HookKind,
    body: Option<MethodBody>,
}

impl CallbackMethod {
    pub(crate) fn new(
        declaring_type: TypeId,
        name: Arc<str>,
        hook: HookKind,
        body: Option<MethodBody>,
    ) -> Self {
        Self {
            declaring_type,
            name,
            hook,
            body,
        }
    }

    /// Invoke a context hook on `instance`.
    pub fn invoke(&self, instance: &mut dyn Any, context: &mut SerializationContext) {
        if let Some(MethodBody::Context(body)) = &self.body {
            body(instance, context);
        }
    }

    /// Invoke an on-error hook on `instance`.
    pub fn invoke_error(
        &self,
        instance: &mut dyn Any,
        context: &mut SerializationContext,
        error: &mut ErrorContext,
    ) {
        if let Some(MethodBody::Error(body)) = &self.body {
            body(instance, context, error);
        }
    }
}

impl std::fmt::Debug for CallbackMethod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CallbackMethod")
            .field("declaring_type", &self.declaring_type)
            .field("name", &self.name)
            .field("hook", &self.hook)
            .finish_non_exhaustive()
    }
}

/// How the constructor of a plan was chosen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CreatorSource {
    /// Explicitly marked as the deserialization constructor.
    Designated,
    /// The unique public parameterized constructor, used as fallback.
    SoleParameterized,
}

/// The constructor chosen to build instances, with its parameters mapped to
/// properties.
#[derive(Clone)]
pub struct CreatorPlan {
    pub source: CreatorSource,
    pub declaring_type: TypeId,
    /// Properties synthesized from the constructor's parameters, in
    /// parameter order. Parameters without a surviving match are dropped.
    pub parameters: PropertyCollection,
    pub invoke: Option<CreateFn>,
}

impl std::fmt::Debug for CreatorPlan {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CreatorPlan")
            .field("source", &self.source)
            .field("declaring_type", &self.declaring_type)
            .field("parameters", &self.parameters.names())
            .finish_non_exhaustive()
    }
}

/// Object-contract payload.
#[derive(Clone, Debug, Default)]
pub struct ObjectContract {
    pub member_serialization: MemberSerialization,
    pub properties: PropertyCollection,
    pub creator: Option<CreatorPlan>,
    pub item_required: Option<Required>,
}

/// Array-contract payload.
#[derive(Clone, Copy, Debug, Default)]
pub struct ArrayContract {
    pub element_type: Option<TypeId>,
}

/// Dictionary-contract payload.
#[derive(Clone, Copy, Debug, Default)]
pub struct DictionaryContract {
    pub key_type: Option<TypeId>,
    pub value_type: Option<TypeId>,
    /// Convention the serializer applies to runtime-provided keys.
    pub naming: NamingConvention,
}

/// Dynamic-contract payload.
#[derive(Clone, Debug, Default)]
pub struct DynamicContract {
    pub properties: PropertyCollection,
    pub naming: NamingConvention,
}

/// Externally-serializable contract payload.
#[derive(Clone, Default)]
pub struct ExternalContract {
    pub creator: Option<CreateFn>,
}

impl std::fmt::Debug for ExternalContract {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ExternalContract")
            .field("creator", &self.creator.is_some())
            .finish()
    }
}

/// Kind-specific contract payload.
#[derive(Clone, Debug)]
pub enum ContractKind {
    Object(ObjectContract),
    Array(ArrayContract),
    Dictionary(DictionaryContract),
    Primitive(PrimitiveKind),
    String,
    /// The library's DOM/token family.
    Tree,
    ExternallySerializable(ExternalContract),
    Dynamic(DynamicContract),
}

/// The resolved metadata description of one type.
#[derive(Clone)]
pub struct Contract {
    pub underlying_type: TypeId,
    pub non_nullable_type: TypeId,
    /// Explicit converter from the type annotation.
    pub converter: Option<ConverterRef>,
    /// First structural match from the built-in converter table.
    pub internal_converter: Option<ConverterRef>,
    /// Absent when the type cannot be default-constructed.
    pub default_creator: Option<DefaultCreateFn>,
    /// Whether the default creator required non-public access.
    pub default_creator_non_public: bool,
    /// Reference-preservation tri-state; `None` means unset.
    pub is_reference: Option<bool>,
    pub on_serializing: Option<CallbackMethod>,
    pub on_serialized: Option<CallbackMethod>,
    pub on_deserializing: Option<CallbackMethod>,
    pub on_deserialized: Option<CallbackMethod>,
    pub on_error: Option<CallbackMethod>,
    pub kind: ContractKind,
}

impl Contract {
    pub(crate) fn new(underlying_type: TypeId, non_nullable_type: TypeId, kind: ContractKind) -> Self {
        Self {
            underlying_type,
            non_nullable_type,
            converter: None,
            internal_converter: None,
            default_creator: None,
            default_creator_non_public: false,
            is_reference: None,
            on_serializing: None,
            on_serialized: None,
            on_deserializing: None,
            on_deserialized: None,
            on_error: None,
            kind,
        }
    }

    /// Short label of the contract kind.
    #[must_use]
    pub fn kind_name(&self) -> &'static str {
        match &self.kind {
            ContractKind::Object(_) => "object",
            ContractKind::Array(_) => "array",
            ContractKind::Dictionary(_) => "dictionary",
            ContractKind::Primitive(_) => "primitive",
            ContractKind::String => "string",
            ContractKind::Tree => "tree",
            ContractKind::ExternallySerializable(_) => "externally-serializable",
            ContractKind::Dynamic(_) => "dynamic",
        }
    }

    #[must_use]
    pub fn as_object(&self) -> Option<&ObjectContract> {
        match &self.kind {
            ContractKind::Object(object) => Some(object),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_array(&self) -> Option<&ArrayContract> {
        match &self.kind {
            ContractKind::Array(array) => Some(array),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_dictionary(&self) -> Option<&DictionaryContract> {
        match &self.kind {
            ContractKind::Dictionary(dictionary) => Some(dictionary),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_dynamic(&self) -> Option<&DynamicContract> {
        match &self.kind {
            ContractKind::Dynamic(dynamic) => Some(dynamic),
            _ => None,
        }
    }

    /// Properties, for kinds that carry them.
    #[must_use]
    pub fn properties(&self) -> Option<&PropertyCollection> {
        match &self.kind {
            ContractKind::Object(object) => Some(&object.properties),
            ContractKind::Dynamic(dynamic) => Some(&dynamic.properties),
            _ => None,
        }
    }
}

impl std::fmt::Debug for Contract {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Contract")
            .field("underlying_type", &self.underlying_type)
            .field("non_nullable_type", &self.non_nullable_type)
            .field("kind", &self.kind_name())
            .field("is_reference", &self.is_reference)
            .field("default_creator", &self.default_creator.is_some())
            .field("default_creator_non_public", &self.default_creator_non_public)
            .finish_non_exhaustive()
    }
}
