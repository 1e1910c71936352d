// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Method descriptors and lifecycle hook markers.

use crate::context::{ErrorContext, SerializationContext};
use crate::descriptor::TypeId;
use std::any::Any;
use std::sync::Arc;

/// The five lifecycle hook kinds a method can claim.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HookKind {
    OnSerializing,
    OnSerialized,
    OnDeserializing,
    OnDeserialized,
    OnError,
}

impl HookKind {
    pub(crate) fn index(self) -> usize {
        match self {
            Self::OnSerializing => 0,
            Self::OnSerialized => 1,
            Self::OnDeserializing => 2,
            Self::OnDeserialized => 3,
            Self::OnError => 4,
        }
    }

    pub(crate) fn label(self) -> &'static str {
        match self {
            Self::OnSerializing => "on-serializing",
            Self::OnSerialized => "on-serialized",
            Self::OnDeserializing => "on-deserializing",
            Self::OnDeserialized => "on-deserialized",
            Self::OnError => "on-error",
        }
    }
}

impl std::fmt::Display for HookKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// Invokable body of a context hook.
pub type HookFn = Arc<dyn Fn(&mut dyn Any, &mut SerializationContext) + Send + Sync>;
/// Invokable body of an on-error hook.
pub type ErrorHookFn =
    Arc<dyn Fn(&mut dyn Any, &mut SerializationContext, &mut ErrorContext) + Send + Sync>;

/// Registered body of a hook method.
#[derive(Clone)]
pub enum MethodBody {
    Context(HookFn),
    Error(ErrorHookFn),
}

/// One registered method, as far as contract resolution cares.
#[derive(Clone)]
pub struct MethodDescriptor {
    pub name: Arc<str>,
    /// Parameter types, in declaration order.
    pub params: Vec<TypeId>,
    pub returns_value: bool,
    pub is_virtual: bool,
    /// Generic methods are never considered as callbacks.
    pub is_generic: bool,
    /// Hook annotations the method carries, in declaration order.
    pub hooks: Vec<HookKind>,
    pub body: Option<MethodBody>,
}

impl MethodDescriptor {
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: Arc::from(name.into().as_str()),
            params: Vec::new(),
            returns_value: false,
            is_virtual: false,
            is_generic: false,
            hooks: Vec::new(),
            body: None,
        }
    }

    /// A well-formed context hook: one serialization-context parameter,
    /// no return value.
    #[must_use]
    pub fn context_hook(
        name: impl Into<String>,
        hook: HookKind,
        body: impl Fn(&mut dyn Any, &mut SerializationContext) + Send + Sync + 'static,
    ) -> Self {
        let mut method = Self::new(name);
        method.params = vec![SerializationContext::TYPE_ID];
        method.hooks = vec![hook];
        method.body = Some(MethodBody::Context(Arc::new(body)));
        method
    }

    /// A well-formed on-error hook: context plus error-context parameters,
    /// no return value.
    #[must_use]
    pub fn error_hook(
        name: impl Into<String>,
        body: impl Fn(&mut dyn Any, &mut SerializationContext, &mut ErrorContext)
            + Send
            + Sync
            + 'static,
    ) -> Self {
        let mut method = Self::new(name);
        method.params = vec![SerializationContext::TYPE_ID, ErrorContext::TYPE_ID];
        method.hooks = vec![HookKind::OnError];
        method.body = Some(MethodBody::Error(Arc::new(body)));
        method
    }

    #[must_use]
    pub fn with_params(mut self, params: Vec<TypeId>) -> Self {
        self.params = params;
        self
    }

    #[must_use]
    pub fn returning_value(mut self) -> Self {
        self.returns_value = true;
        self
    }

    #[must_use]
    pub fn virtual_method(mut self) -> Self {
        self.is_virtual = true;
        self
    }

    #[must_use]
    pub fn generic_method(mut self) -> Self {
        self.is_generic = true;
        self
    }

    #[must_use]
    pub fn with_hook(mut self, hook: HookKind) -> Self {
        self.hooks.push(hook);
        self
    }
}

impl std::fmt::Debug for MethodDescriptor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MethodDescriptor")
            .field("name", &self.name)
            .field("params", &self.params)
            .field("returns_value", &self.returns_value)
            .field("is_virtual", &self.is_virtual)
            .field("hooks", &self.hooks)
            .finish_non_exhaustive()
    }
}
