// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Lifecycle callback resolution.
//!
//! Walks the ancestry chain root-first so a derived type's hook replaces a
//! base type's hook of the same kind. Validation failures are configuration
//! errors: they indicate an authoring mistake in the target type.

use crate::context::{ErrorContext, SerializationContext};
use crate::contract::CallbackMethod;
use crate::descriptor::{DescriptorRegistry, HookKind, MethodDescriptor, TypeDescriptor, TypeId};
use crate::error::ResolveError;
use std::sync::Arc;

/// Hooks resolved across the whole hierarchy.
#[derive(Default)]
pub(crate) struct ResolvedCallbacks {
    pub on_serializing: Option<CallbackMethod>,
    pub on_serialized: Option<CallbackMethod>,
    pub on_deserializing: Option<CallbackMethod>,
    pub on_deserialized: Option<CallbackMethod>,
    pub on_error: Option<CallbackMethod>,
}

pub(crate) fn resolve_callbacks(
    registry: &DescriptorRegistry,
    type_id: TypeId,
) -> Result<ResolvedCallbacks, ResolveError> {
    let mut resolved = ResolvedCallbacks::default();

    for level in registry.ancestry(type_id).iter() {
        let Some(descriptor) = registry.get(*level) else {
            continue;
        };
        let found = scan_level(&descriptor)?;

        let [serializing, serialized, deserializing, deserialized, error] = found;
        if let Some(method) = serializing {
            resolved.on_serializing = Some(bind(&descriptor, method, HookKind::OnSerializing));
        }
        if let Some(method) = serialized {
            resolved.on_serialized = Some(bind(&descriptor, method, HookKind::OnSerialized));
        }
        if let Some(method) = deserializing {
            resolved.on_deserializing = Some(bind(&descriptor, method, HookKind::OnDeserializing));
        }
        if let Some(method) = deserialized {
            // completion hooks of flagged containers are known to throw
            if descriptor.capabilities.completion_hook_unsafe {
                log::debug!(
                    "skipping {} hook '{}' on '{}': container completion hook suppressed",
                    HookKind::OnDeserialized,
                    method.name,
                    descriptor.name
                );
            } else {
                resolved.on_deserialized =
                    Some(bind(&descriptor, method, HookKind::OnDeserialized));
            }
        }
        if let Some(method) = error {
            resolved.on_error = Some(bind(&descriptor, method, HookKind::OnError));
        }
    }

    Ok(resolved)
}

fn bind(descriptor: &TypeDescriptor, method: &MethodDescriptor, hook: HookKind) -> CallbackMethod {
    CallbackMethod::new(
        descriptor.type_id,
        Arc::clone(&method.name),
        hook,
        method.body.clone(),
    )
}

/// Scan one hierarchy level's declared methods for hook annotations.
fn scan_level(descriptor: &TypeDescriptor) -> Result<[Option<&MethodDescriptor>; 5], ResolveError> {
    let mut current: [Option<&MethodDescriptor>; 5] = [None; 5];

    for method in &descriptor.methods {
        if method.is_generic {
            continue;
        }
        let mut previous: Option<HookKind> = None;
        for hook in &method.hooks {
            let slot = hook.index();
            if let Some(existing) = current[slot] {
                return Err(ResolveError::DuplicateCallback {
                    type_name: Arc::clone(&descriptor.name),
                    hook: *hook,
                    method: Arc::clone(&method.name),
                    existing: Arc::clone(&existing.name),
                });
            }
            if let Some(first) = previous {
                return Err(ResolveError::ConflictingCallbacks {
                    type_name: Arc::clone(&descriptor.name),
                    method: Arc::clone(&method.name),
                    first,
                    second: *hook,
                });
            }
            validate_callback(descriptor, method, *hook)?;
            previous = Some(*hook);
            current[slot] = Some(method);
        }
    }

    Ok(current)
}

fn validate_callback(
    descriptor: &TypeDescriptor,
    method: &MethodDescriptor,
    hook: HookKind,
) -> Result<(), ResolveError> {
    if method.is_virtual {
        return Err(ResolveError::VirtualCallback {
            type_name: Arc::clone(&descriptor.name),
            method: Arc::clone(&method.name),
            hook,
        });
    }
    if method.returns_value {
        return Err(ResolveError::CallbackReturnsValue {
            type_name: Arc::clone(&descriptor.name),
            method: Arc::clone(&method.name),
            hook,
        });
    }
    let signature_ok = match hook {
        HookKind::OnError => {
            method.params == [SerializationContext::TYPE_ID, ErrorContext::TYPE_ID]
        }
        _ => method.params == [SerializationContext::TYPE_ID],
    };
    if !signature_ok {
        return Err(ResolveError::CallbackSignature {
            type_name: Arc::clone(&descriptor.name),
            method: Arc::clone(&method.name),
            hook,
        });
    }
    Ok(())
}
