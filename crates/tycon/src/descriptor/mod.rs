// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Explicit type-descriptor registry.
//!
//! The resolution engine never touches live reflection. Types are described
//! once, at init time, by registering a [`TypeDescriptor`] carrying members,
//! constructors, methods, annotations, capabilities, and accessor closures.
//! Everything the resolver learns about a type it learns from here.
//!
//! # Example
//!
//! ```rust
//! use tycon::descriptor::{
//!     DescriptorRegistry, MemberDescriptor, TypeDescriptorBuilder, well_known,
//! };
//!
//! let registry = DescriptorRegistry::new();
//! registry.install_primitives();
//!
//! let movie = registry.register(
//!     TypeDescriptorBuilder::new("Movie")
//!         .member(MemberDescriptor::property("title", well_known::STRING))
//!         .member(MemberDescriptor::property("release_year", well_known::I32))
//!         .build(),
//! );
//! assert!(registry.contains(movie));
//! ```

mod builder;
mod constructor;
mod member;
mod method;
mod registry;
mod type_descriptor;
mod type_id;

pub use builder::TypeDescriptorBuilder;
pub use constructor::{ConstructorDescriptor, ConstructorParam, CreateFn, DefaultCreateFn};
pub use member::{AccessFilter, MemberDescriptor, MemberKind, Visibility};
pub use method::{ErrorHookFn, HookFn, HookKind, MethodBody, MethodDescriptor};
pub use registry::{well_known, DescriptorRegistry};
pub use type_descriptor::{
    Capabilities, CustomSerialization, KeyedShape, PrimitiveKind, SequenceShape, TypeDescriptor,
};
pub use type_id::TypeId;

pub(crate) use type_id::fnv1a;
