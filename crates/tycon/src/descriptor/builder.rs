// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Fluent builder for [`TypeDescriptor`].

use crate::access::DynamicAccessTable;
use crate::annotations::TypeAnnotations;
use crate::convert::TextConverterKind;
use crate::descriptor::{
    Capabilities, ConstructorDescriptor, CustomSerialization, KeyedShape, MemberDescriptor,
    MethodDescriptor, PrimitiveKind, SequenceShape, TypeDescriptor, TypeId,
};
use crate::value::Value;
use std::any::Any;
use std::sync::Arc;

/// Builder for registering a type description.
pub struct TypeDescriptorBuilder {
    name: String,
    base: Option<TypeId>,
    is_value_type: bool,
    nullable_inner: Option<TypeId>,
    primitive: Option<PrimitiveKind>,
    capabilities: Capabilities,
    annotations: TypeAnnotations,
    members: Vec<MemberDescriptor>,
    constructors: Vec<ConstructorDescriptor>,
    methods: Vec<MethodDescriptor>,
    dynamic_access: Option<DynamicAccessTable>,
}

impl TypeDescriptorBuilder {
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            base: None,
            is_value_type: false,
            nullable_inner: None,
            primitive: None,
            capabilities: Capabilities::default(),
            annotations: TypeAnnotations::default(),
            members: Vec::new(),
            constructors: Vec::new(),
            methods: Vec::new(),
            dynamic_access: None,
        }
    }

    #[must_use]
    pub fn base(mut self, base: TypeId) -> Self {
        self.base = Some(base);
        self
    }

    #[must_use]
    pub fn value_type(mut self) -> Self {
        self.is_value_type = true;
        self
    }

    /// Mark this type as a nullable wrapper around `inner`.
    #[must_use]
    pub fn nullable_of(mut self, inner: TypeId) -> Self {
        self.nullable_inner = Some(inner);
        self
    }

    #[must_use]
    pub fn primitive(mut self, kind: PrimitiveKind) -> Self {
        self.primitive = Some(kind);
        self
    }

    #[must_use]
    pub fn keyed(mut self, key: TypeId, value: TypeId) -> Self {
        self.capabilities.keyed = Some(KeyedShape { key, value });
        self
    }

    #[must_use]
    pub fn sequence_of(mut self, element: TypeId) -> Self {
        self.capabilities.sequence = Some(SequenceShape { element });
        self
    }

    #[must_use]
    pub fn dynamic_members(mut self) -> Self {
        self.capabilities.dynamic_members = true;
        self
    }

    #[must_use]
    pub fn custom_serialization(mut self) -> Self {
        self.capabilities.custom_serialization = Some(CustomSerialization::default());
        self
    }

    #[must_use]
    pub fn custom_serialization_creator(
        mut self,
        creator: impl Fn(&[Value]) -> Box<dyn Any> + Send + Sync + 'static,
    ) -> Self {
        self.capabilities.custom_serialization = Some(CustomSerialization {
            creator: Some(Arc::new(creator)),
        });
        self
    }

    #[must_use]
    pub fn tree_node(mut self) -> Self {
        self.capabilities.tree_node = true;
        self
    }

    #[must_use]
    pub fn text_converter(mut self, kind: TextConverterKind) -> Self {
        self.capabilities.text_converter = Some(kind);
        self
    }

    #[must_use]
    pub fn key_value(mut self, key: TypeId, value: TypeId) -> Self {
        self.capabilities.key_value = Some((key, value));
        self
    }

    #[must_use]
    pub fn completion_hook_unsafe(mut self) -> Self {
        self.capabilities.completion_hook_unsafe = true;
        self
    }

    #[must_use]
    pub fn annotations(mut self, annotations: TypeAnnotations) -> Self {
        self.annotations = annotations;
        self
    }

    #[must_use]
    pub fn member(mut self, member: MemberDescriptor) -> Self {
        self.members.push(member);
        self
    }

    #[must_use]
    pub fn constructor(mut self, constructor: ConstructorDescriptor) -> Self {
        self.constructors.push(constructor);
        self
    }

    #[must_use]
    pub fn method(mut self, method: MethodDescriptor) -> Self {
        self.methods.push(method);
        self
    }

    #[must_use]
    pub fn dynamic_access(
        mut self,
        get: impl Fn(&dyn Any, &str) -> Option<Value> + Send + Sync + 'static,
        set: impl Fn(&mut dyn Any, &str, Value) -> bool + Send + Sync + 'static,
    ) -> Self {
        self.dynamic_access = Some(DynamicAccessTable::new(get, set));
        self
    }

    #[must_use]
    pub fn build(self) -> TypeDescriptor {
        TypeDescriptor {
            type_id: TypeId::of(&self.name),
            name: Arc::from(self.name.as_str()),
            base: self.base,
            is_value_type: self.is_value_type,
            nullable_inner: self.nullable_inner,
            primitive: self.primitive,
            capabilities: self.capabilities,
            annotations: self.annotations,
            members: self.members,
            constructors: self.constructors,
            methods: self.methods,
            dynamic_access: self.dynamic_access,
        }
    }
}
