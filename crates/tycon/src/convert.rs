// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Converter references and the built-in converter table.
//!
//! Converters themselves live outside this crate; contracts only carry
//! references to them. The fixed, ordered built-in table is consulted during
//! contract initialization and the first structural match wins.

use crate::descriptor::{DescriptorRegistry, PrimitiveKind, TypeId};
use std::sync::{Arc, OnceLock};

/// A value converter the serializer can invoke for a type.
pub trait Converter: Send + Sync {
    /// Stable display name, used in logs.
    fn name(&self) -> &'static str;

    /// Whether this converter handles values of `type_id`.
    fn can_convert(&self, registry: &DescriptorRegistry, type_id: TypeId) -> bool;
}

/// Shared handle to a converter.
pub type ConverterRef = Arc<dyn Converter>;

/// Kind of text converter a type exposes.
///
/// Only `Display` converters qualify a type for a string contract;
/// `Component` and `Reference` are the known non-string-like kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextConverterKind {
    Display,
    Component,
    Reference,
}

const NON_STRING_TEXT_KINDS: &[TextConverterKind] =
    &[TextConverterKind::Component, TextConverterKind::Reference];

pub(crate) fn renders_as_string(kind: TextConverterKind) -> bool {
    !NON_STRING_TEXT_KINDS.contains(&kind)
}

fn primitive_of(registry: &DescriptorRegistry, type_id: TypeId) -> Option<PrimitiveKind> {
    registry.get(type_id).and_then(|d| d.primitive)
}

/// Converts key/value-pair shaped types.
pub struct KeyValuePairConverter;

impl Converter for KeyValuePairConverter {
    fn name(&self) -> &'static str {
        "key_value_pair"
    }

    fn can_convert(&self, registry: &DescriptorRegistry, type_id: TypeId) -> bool {
        registry
            .get(type_id)
            .is_some_and(|d| d.capabilities.key_value.is_some())
    }
}

/// Converts raw byte buffers.
pub struct ByteBufferConverter;

impl Converter for ByteBufferConverter {
    fn name(&self) -> &'static str {
        "byte_buffer"
    }

    fn can_convert(&self, registry: &DescriptorRegistry, type_id: TypeId) -> bool {
        primitive_of(registry, type_id) == Some(PrimitiveKind::Bytes)
    }
}

/// Converts calendar timestamps.
pub struct TimestampConverter;

impl Converter for TimestampConverter {
    fn name(&self) -> &'static str {
        "timestamp"
    }

    fn can_convert(&self, registry: &DescriptorRegistry, type_id: TypeId) -> bool {
        primitive_of(registry, type_id) == Some(PrimitiveKind::Timestamp)
    }
}

/// Converts elapsed-time durations.
pub struct DurationConverter;

impl Converter for DurationConverter {
    fn name(&self) -> &'static str {
        "duration"
    }

    fn can_convert(&self, registry: &DescriptorRegistry, type_id: TypeId) -> bool {
        primitive_of(registry, type_id) == Some(PrimitiveKind::Duration)
    }
}

/// Converts UUIDs.
pub struct UuidConverter;

impl Converter for UuidConverter {
    fn name(&self) -> &'static str {
        "uuid"
    }

    fn can_convert(&self, registry: &DescriptorRegistry, type_id: TypeId) -> bool {
        primitive_of(registry, type_id) == Some(PrimitiveKind::Uuid)
    }
}

/// The fixed built-in converter table, in match priority order.
pub fn built_in_converters() -> &'static [ConverterRef] {
    static BUILT_IN: OnceLock<Vec<ConverterRef>> = OnceLock::new();
    BUILT_IN.get_or_init(|| {
        vec![
            Arc::new(KeyValuePairConverter),
            Arc::new(ByteBufferConverter),
            Arc::new(TimestampConverter),
            Arc::new(DurationConverter),
            Arc::new(UuidConverter),
        ]
    })
}

/// First built-in converter whose structural match accepts `type_id`.
pub(crate) fn matching_built_in(
    registry: &DescriptorRegistry,
    type_id: TypeId,
) -> Option<ConverterRef> {
    built_in_converters()
        .iter()
        .find(|c| c.can_convert(registry, type_id))
        .map(Arc::clone)
}
