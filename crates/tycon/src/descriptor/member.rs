// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Member descriptors: the registered shape of one field or property.

use crate::access::{GetFn, PredicateFn, SetFn, SetSpecifiedFn, SpecifiedAccessor};
use crate::annotations::{MemberAnnotations, PropertyAnnotation};
use crate::descriptor::TypeId;
use crate::value::Value;
use std::any::Any;
use std::sync::Arc;

/// Visibility of a member, constructor, or accessor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Visibility {
    Public,
    NonPublic,
}

/// Structural kind of a member.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MemberKind {
    Field,
    Property {
        /// Indexed (parameterized) properties are never discovered.
        indexed: bool,
    },
}

/// Which visibility/static levels a member search includes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AccessFilter {
    pub public: bool,
    pub non_public: bool,
    pub instance: bool,
    pub statics: bool,
}

impl AccessFilter {
    /// Default member search breadth: public instance members.
    pub const PUBLIC_INSTANCE: Self = Self {
        public: true,
        non_public: false,
        instance: true,
        statics: false,
    };

    /// The widest search: every visibility, instance and static.
    pub const ALL: Self = Self {
        public: true,
        non_public: true,
        instance: true,
        statics: true,
    };

    #[must_use]
    pub const fn include_non_public(mut self) -> Self {
        self.non_public = true;
        self
    }

    pub(crate) fn admits(&self, member: &MemberDescriptor) -> bool {
        let static_ok = if member.is_static {
            self.statics
        } else {
            self.instance
        };
        let visibility_ok = match member.visibility() {
            Visibility::Public => self.public,
            Visibility::NonPublic => self.non_public,
        };
        static_ok && visibility_ok
    }
}

/// One registered field or property.
#[derive(Clone)]
pub struct MemberDescriptor {
    pub name: Arc<str>,
    pub kind: MemberKind,
    pub value_type: TypeId,
    pub is_static: bool,
    /// Getter visibility; `None` means the member cannot be read.
    pub get_access: Option<Visibility>,
    /// Setter visibility; `None` means the member cannot be written.
    pub set_access: Option<Visibility>,
    /// Compiler-synthesized members are skipped unless the resolver opts in.
    pub synthesized: bool,
    /// Re-declaration artifact of a generic base class, typed by a generic
    /// parameter rather than a concrete type.
    pub generic_artifact: bool,
    pub annotations: MemberAnnotations,
    /// Compiled accessor fast path.
    pub getter: Option<GetFn>,
    pub setter: Option<SetFn>,
    /// Explicit conditional-serialization predicate the type opted into.
    pub should_serialize: Option<PredicateFn>,
    /// Explicit is-specified companion accessor the type opted into.
    pub specified: Option<SpecifiedAccessor>,
}

impl MemberDescriptor {
    /// A public field.
    #[must_use]
    pub fn field(name: impl Into<String>, value_type: TypeId) -> Self {
        Self {
            name: Arc::from(name.into().as_str()),
            kind: MemberKind::Field,
            value_type,
            is_static: false,
            get_access: Some(Visibility::Public),
            set_access: Some(Visibility::Public),
            synthesized: false,
            generic_artifact: false,
            annotations: MemberAnnotations::default(),
            getter: None,
            setter: None,
            should_serialize: None,
            specified: None,
        }
    }

    /// A public property with getter and setter.
    #[must_use]
    pub fn property(name: impl Into<String>, value_type: TypeId) -> Self {
        Self {
            kind: MemberKind::Property { indexed: false },
            ..Self::field(name, value_type)
        }
    }

    /// Most permissive visibility across the member's accessors.
    #[must_use]
    pub fn visibility(&self) -> Visibility {
        if self.get_access == Some(Visibility::Public) || self.set_access == Some(Visibility::Public)
        {
            Visibility::Public
        } else {
            Visibility::NonPublic
        }
    }

    #[must_use]
    pub fn is_field(&self) -> bool {
        matches!(self.kind, MemberKind::Field)
    }

    #[must_use]
    pub fn is_indexed(&self) -> bool {
        matches!(self.kind, MemberKind::Property { indexed: true })
    }

    #[must_use]
    pub fn non_public(mut self) -> Self {
        if self.get_access.is_some() {
            self.get_access = Some(Visibility::NonPublic);
        }
        if self.set_access.is_some() {
            self.set_access = Some(Visibility::NonPublic);
        }
        self
    }

    #[must_use]
    pub fn read_only(mut self) -> Self {
        self.set_access = None;
        self
    }

    #[must_use]
    pub fn private_setter(mut self) -> Self {
        self.set_access = Some(Visibility::NonPublic);
        self
    }

    #[must_use]
    pub fn static_member(mut self) -> Self {
        self.is_static = true;
        self
    }

    #[must_use]
    pub fn indexed(mut self) -> Self {
        self.kind = MemberKind::Property { indexed: true };
        self
    }

    #[must_use]
    pub fn synthesized(mut self) -> Self {
        self.synthesized = true;
        self
    }

    #[must_use]
    pub fn generic_artifact(mut self) -> Self {
        self.generic_artifact = true;
        self
    }

    #[must_use]
    pub fn with_annotations(mut self, annotations: MemberAnnotations) -> Self {
        self.annotations = annotations;
        self
    }

    #[must_use]
    pub fn with_property_annotation(mut self, annotation: PropertyAnnotation) -> Self {
        self.annotations.property = Some(annotation);
        self
    }

    #[must_use]
    pub fn ignored(mut self) -> Self {
        self.annotations.ignored = true;
        self
    }

    #[must_use]
    pub fn with_default_value(mut self, value: Value) -> Self {
        self.annotations.default_value = Some(value);
        self
    }

    #[must_use]
    pub fn with_getter(
        mut self,
        get: impl Fn(&dyn Any) -> Result<Value, crate::access::AccessError> + Send + Sync + 'static,
    ) -> Self {
        self.getter = Some(Arc::new(get));
        self
    }

    #[must_use]
    pub fn with_setter(
        mut self,
        set: impl Fn(&mut dyn Any, Value) -> Result<(), crate::access::AccessError>
            + Send
            + Sync
            + 'static,
    ) -> Self {
        self.setter = Some(Arc::new(set));
        self
    }

    #[must_use]
    pub fn with_should_serialize(
        mut self,
        predicate: impl Fn(&dyn Any) -> bool + Send + Sync + 'static,
    ) -> Self {
        self.should_serialize = Some(Arc::new(predicate));
        self
    }

    #[must_use]
    pub fn with_specified(
        mut self,
        get: impl Fn(&dyn Any) -> bool + Send + Sync + 'static,
        set: Option<SetSpecifiedFn>,
    ) -> Self {
        self.specified = Some(SpecifiedAccessor {
            get: Arc::new(get),
            set,
        });
        self
    }
}

impl std::fmt::Debug for MemberDescriptor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MemberDescriptor")
            .field("name", &self.name)
            .field("kind", &self.kind)
            .field("value_type", &self.value_type)
            .field("is_static", &self.is_static)
            .field("get_access", &self.get_access)
            .field("set_access", &self.set_access)
            .finish_non_exhaustive()
    }
}
