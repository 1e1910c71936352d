// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Error types for contract resolution.
//!
//! Configuration errors indicate an authoring mistake in the target type and
//! abort resolution for that type; precondition errors indicate misuse of
//! the resolver itself. Neither is transient, so no retry applies.

use crate::descriptor::{HookKind, TypeId};
use std::sync::Arc;

/// Resolution failure modes.
#[derive(Debug)]
pub enum ResolveError {
    /// The requested type has no registered descriptor.
    UnknownType(TypeId),
    /// More than one constructor carries the designated-deserialization
    /// marker.
    MultipleDesignatedConstructors {
        /// Type whose constructors conflict.
        type_name: Arc<str>,
    },
    /// Two methods at the same inspection level claim the same hook kind.
    DuplicateCallback {
        type_name: Arc<str>,
        hook: HookKind,
        method: Arc<str>,
        /// Method that already claimed the hook.
        existing: Arc<str>,
    },
    /// One method carries more than one hook annotation.
    ConflictingCallbacks {
        type_name: Arc<str>,
        method: Arc<str>,
        first: HookKind,
        second: HookKind,
    },
    /// A hook method is virtual.
    VirtualCallback {
        type_name: Arc<str>,
        method: Arc<str>,
        hook: HookKind,
    },
    /// A hook method returns a value.
    CallbackReturnsValue {
        type_name: Arc<str>,
        method: Arc<str>,
        hook: HookKind,
    },
    /// A hook method has the wrong parameter list for its hook kind.
    CallbackSignature {
        type_name: Arc<str>,
        method: Arc<str>,
        hook: HookKind,
    },
}

impl std::fmt::Display for ResolveError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::UnknownType(type_id) => {
                write!(f, "no descriptor registered for type {type_id}")
            }
            Self::MultipleDesignatedConstructors { type_name } => {
                write!(
                    f,
                    "multiple constructors of '{type_name}' are marked as the deserialization constructor"
                )
            }
            Self::DuplicateCallback {
                type_name,
                hook,
                method,
                existing,
            } => {
                write!(
                    f,
                    "both '{existing}' and '{method}' in type '{type_name}' claim the {hook} hook"
                )
            }
            Self::ConflictingCallbacks {
                type_name,
                method,
                first,
                second,
            } => {
                write!(
                    f,
                    "method '{method}' in type '{type_name}' carries both {first} and {second} hooks"
                )
            }
            Self::VirtualCallback {
                type_name,
                method,
                hook,
            } => {
                write!(
                    f,
                    "virtual method '{method}' of type '{type_name}' cannot be a {hook} hook"
                )
            }
            Self::CallbackReturnsValue {
                type_name,
                method,
                hook,
            } => {
                write!(
                    f,
                    "{hook} hook '{method}' in type '{type_name}' must not return a value"
                )
            }
            Self::CallbackSignature {
                type_name,
                method,
                hook,
            } => {
                write!(
                    f,
                    "{hook} hook '{method}' in type '{type_name}' has the wrong parameter list"
                )
            }
        }
    }
}

impl std::error::Error for ResolveError {}
