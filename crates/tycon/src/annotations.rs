// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Declarative markers attached to descriptors.
//!
//! Annotations are registered alongside a type's descriptor and influence
//! contract construction: naming, ignoring, ordering, required-ness,
//! converters, handling overrides, and container classification. Every
//! override is optional so "unset" never collapses into "set to default".

use crate::convert::ConverterRef;
use crate::handling::{
    DefaultValueHandling, MemberSerialization, NullValueHandling, ObjectCreationHandling,
    ReferenceLoopHandling, Required, TypeNameHandling,
};
use crate::value::Value;

/// Per-member serialization annotation (the explicit include marker).
#[derive(Clone, Default)]
pub struct PropertyAnnotation {
    pub name: Option<String>,
    pub required: Option<Required>,
    pub order: Option<i32>,
    pub null_value_handling: Option<NullValueHandling>,
    pub default_value_handling: Option<DefaultValueHandling>,
    pub reference_loop_handling: Option<ReferenceLoopHandling>,
    pub object_creation_handling: Option<ObjectCreationHandling>,
    pub type_name_handling: Option<TypeNameHandling>,
    pub is_reference: Option<bool>,
    pub item_converter: Option<ConverterRef>,
    pub item_is_reference: Option<bool>,
    pub item_reference_loop_handling: Option<ReferenceLoopHandling>,
    pub item_type_name_handling: Option<TypeNameHandling>,
}

impl PropertyAnnotation {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_required(mut self, required: Required) -> Self {
        self.required = Some(required);
        self
    }

    #[must_use]
    pub fn with_order(mut self, order: i32) -> Self {
        self.order = Some(order);
        self
    }

    #[must_use]
    pub fn with_is_reference(mut self, is_reference: bool) -> Self {
        self.is_reference = Some(is_reference);
        self
    }

    #[must_use]
    pub fn with_null_value_handling(mut self, handling: NullValueHandling) -> Self {
        self.null_value_handling = Some(handling);
        self
    }

    #[must_use]
    pub fn with_reference_loop_handling(mut self, handling: ReferenceLoopHandling) -> Self {
        self.reference_loop_handling = Some(handling);
        self
    }

    #[must_use]
    pub fn with_item_converter(mut self, converter: ConverterRef) -> Self {
        self.item_converter = Some(converter);
        self
    }
}

/// Member marker of the cross-cutting data-contract annotation framework.
///
/// Only honored when the declaring type carries [`DataContractAnnotation`].
#[derive(Clone)]
pub struct DataMemberAnnotation {
    pub name: Option<String>,
    pub required: bool,
    /// `-1` means unset.
    pub order: i32,
}

impl Default for DataMemberAnnotation {
    fn default() -> Self {
        Self {
            name: None,
            required: false,
            order: -1,
        }
    }
}

impl DataMemberAnnotation {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    #[must_use]
    pub fn with_order(mut self, order: i32) -> Self {
        self.order = order;
        self
    }
}

/// All annotations a member can carry.
#[derive(Clone, Default)]
pub struct MemberAnnotations {
    pub property: Option<PropertyAnnotation>,
    pub data_member: Option<DataMemberAnnotation>,
    /// Explicit exclude marker.
    pub ignored: bool,
    /// Converter override; beats any type-level default.
    pub converter: Option<ConverterRef>,
    /// Fallback value for default-value handling.
    pub default_value: Option<Value>,
}

impl MemberAnnotations {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_property(mut self, annotation: PropertyAnnotation) -> Self {
        self.property = Some(annotation);
        self
    }

    #[must_use]
    pub fn with_data_member(mut self, annotation: DataMemberAnnotation) -> Self {
        self.data_member = Some(annotation);
        self
    }

    #[must_use]
    pub fn ignored(mut self) -> Self {
        self.ignored = true;
        self
    }

    #[must_use]
    pub fn with_converter(mut self, converter: ConverterRef) -> Self {
        self.converter = Some(converter);
        self
    }

    #[must_use]
    pub fn with_default_value(mut self, value: Value) -> Self {
        self.default_value = Some(value);
        self
    }
}

/// Shared payload of the object/array/dictionary container annotations.
#[derive(Clone, Copy, Default, Debug)]
pub struct ContainerAnnotation {
    pub is_reference: Option<bool>,
}

impl ContainerAnnotation {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_is_reference(mut self, is_reference: bool) -> Self {
        self.is_reference = Some(is_reference);
        self
    }
}

/// "This is an object" marker with member-selection and item overrides.
#[derive(Clone, Copy, Default, Debug)]
pub struct ObjectAnnotation {
    pub container: ContainerAnnotation,
    pub member_serialization: Option<MemberSerialization>,
    pub item_required: Option<Required>,
}

impl ObjectAnnotation {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_member_serialization(mut self, mode: MemberSerialization) -> Self {
        self.member_serialization = Some(mode);
        self
    }

    #[must_use]
    pub fn with_item_required(mut self, required: Required) -> Self {
        self.item_required = Some(required);
        self
    }

    #[must_use]
    pub fn with_is_reference(mut self, is_reference: bool) -> Self {
        self.container.is_reference = Some(is_reference);
        self
    }
}

/// Type marker of the cross-cutting data-contract annotation framework.
///
/// Switches member selection to opt-in and may force reference preservation.
#[derive(Clone, Copy, Default, Debug)]
pub struct DataContractAnnotation {
    pub is_reference: bool,
}

/// All annotations a type can carry.
#[derive(Clone, Default)]
pub struct TypeAnnotations {
    pub object: Option<ObjectAnnotation>,
    pub array: Option<ContainerAnnotation>,
    pub dictionary: Option<ContainerAnnotation>,
    pub data_contract: Option<DataContractAnnotation>,
    /// Marker switching member selection to fields-only, unless the resolver
    /// is configured to ignore it.
    pub serializable_marker: bool,
    /// Type-level converter; member-level overrides take precedence.
    pub converter: Option<ConverterRef>,
}

impl TypeAnnotations {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// The container annotation present on the type, if any.
    ///
    /// Object wins over array wins over dictionary, mirroring annotation
    /// lookup order.
    #[must_use]
    pub fn container(&self) -> Option<&ContainerAnnotation> {
        if let Some(object) = &self.object {
            return Some(&object.container);
        }
        self.array.as_ref().or(self.dictionary.as_ref())
    }

    #[must_use]
    pub fn with_object(mut self, annotation: ObjectAnnotation) -> Self {
        self.object = Some(annotation);
        self
    }

    #[must_use]
    pub fn with_array(mut self, annotation: ContainerAnnotation) -> Self {
        self.array = Some(annotation);
        self
    }

    #[must_use]
    pub fn with_dictionary(mut self, annotation: ContainerAnnotation) -> Self {
        self.dictionary = Some(annotation);
        self
    }

    #[must_use]
    pub fn with_data_contract(mut self, annotation: DataContractAnnotation) -> Self {
        self.data_contract = Some(annotation);
        self
    }

    #[must_use]
    pub fn serializable(mut self) -> Self {
        self.serializable_marker = true;
        self
    }

    #[must_use]
    pub fn with_converter(mut self, converter: ConverterRef) -> Self {
        self.converter = Some(converter);
        self
    }
}
