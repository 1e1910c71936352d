// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Constructor descriptors.

use crate::annotations::MemberAnnotations;
use crate::descriptor::{TypeId, Visibility};
use crate::value::Value;
use std::any::Any;
use std::sync::Arc;

/// Builds an instance from positional argument values.
pub type CreateFn = Arc<dyn Fn(&[Value]) -> Box<dyn Any> + Send + Sync>;
/// Builds an instance with no arguments.
pub type DefaultCreateFn = Arc<dyn Fn() -> Box<dyn Any> + Send + Sync>;

/// One constructor parameter.
#[derive(Clone)]
pub struct ConstructorParam {
    pub name: Arc<str>,
    pub param_type: TypeId,
    /// Parameters can carry the same annotations as members.
    pub annotations: MemberAnnotations,
}

impl ConstructorParam {
    #[must_use]
    pub fn new(name: impl Into<String>, param_type: TypeId) -> Self {
        Self {
            name: Arc::from(name.into().as_str()),
            param_type,
            annotations: MemberAnnotations::default(),
        }
    }

    #[must_use]
    pub fn with_annotations(mut self, annotations: MemberAnnotations) -> Self {
        self.annotations = annotations;
        self
    }
}

/// One registered constructor.
#[derive(Clone)]
pub struct ConstructorDescriptor {
    pub visibility: Visibility,
    /// Marked as the designated deserialization constructor.
    pub designated: bool,
    pub params: Vec<ConstructorParam>,
    pub invoke: Option<CreateFn>,
}

impl ConstructorDescriptor {
    /// A public parameterless constructor.
    #[must_use]
    pub fn parameterless() -> Self {
        Self {
            visibility: Visibility::Public,
            designated: false,
            params: Vec::new(),
            invoke: None,
        }
    }

    /// A public constructor with the given parameters.
    #[must_use]
    pub fn with_params(params: Vec<ConstructorParam>) -> Self {
        Self {
            params,
            ..Self::parameterless()
        }
    }

    #[must_use]
    pub fn non_public(mut self) -> Self {
        self.visibility = Visibility::NonPublic;
        self
    }

    #[must_use]
    pub fn designated(mut self) -> Self {
        self.designated = true;
        self
    }

    #[must_use]
    pub fn with_invoke(
        mut self,
        invoke: impl Fn(&[Value]) -> Box<dyn Any> + Send + Sync + 'static,
    ) -> Self {
        self.invoke = Some(Arc::new(invoke));
        self
    }

    #[must_use]
    pub fn is_parameterless(&self) -> bool {
        self.params.is_empty()
    }
}

impl std::fmt::Debug for ConstructorDescriptor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let params: Vec<&str> = self.params.iter().map(|p| p.name.as_ref()).collect();
        f.debug_struct("ConstructorDescriptor")
            .field("visibility", &self.visibility)
            .field("designated", &self.designated)
            .field("params", &params)
            .finish_non_exhaustive()
    }
}
