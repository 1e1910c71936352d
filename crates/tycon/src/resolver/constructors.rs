// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Constructor selection and parameter-to-property matching.

use crate::contract::{CreatorPlan, CreatorSource, Property, PropertyCollection};
use crate::descriptor::{ConstructorDescriptor, ConstructorParam, TypeDescriptor};
use crate::error::ResolveError;
use crate::handling::MemberSerialization;
use crate::resolver::properties::apply_member_annotations;
use crate::resolver::ContractResolver;
use std::sync::Arc;

/// Choose the constructor plan for an object contract.
///
/// Priority: the designated constructor when exactly one is marked (more
/// than one is a configuration error); else, when the type has no usable
/// parameterless constructor, the unique public parameterized constructor;
/// else no plan.
pub(crate) fn resolve_creator_plan(
    resolver: &ContractResolver,
    descriptor: &TypeDescriptor,
    needs_fallback: bool,
    properties: &PropertyCollection,
) -> Result<Option<CreatorPlan>, ResolveError> {
    let designated = descriptor.designated_constructors();
    if designated.len() > 1 {
        return Err(ResolveError::MultipleDesignatedConstructors {
            type_name: Arc::clone(&descriptor.name),
        });
    }
    if let Some(constructor) = designated.first() {
        return Ok(Some(build_plan(
            resolver,
            descriptor,
            constructor,
            CreatorSource::Designated,
            properties,
        )));
    }

    if needs_fallback {
        let mut parameterized = descriptor.public_parameterized_constructors();
        if let (Some(constructor), None) = (parameterized.next(), parameterized.next()) {
            return Ok(Some(build_plan(
                resolver,
                descriptor,
                constructor,
                CreatorSource::SoleParameterized,
                properties,
            )));
        }
    }

    Ok(None)
}

fn build_plan(
    resolver: &ContractResolver,
    descriptor: &TypeDescriptor,
    constructor: &ConstructorDescriptor,
    source: CreatorSource,
    properties: &PropertyCollection,
) -> CreatorPlan {
    let mut parameters = PropertyCollection::new();
    for param in &constructor.params {
        // name must match and the type must match exactly; no coercion
        let matching = properties
            .closest_match(&param.name)
            .filter(|p| p.value_type == param.param_type);
        match matching {
            Some(matching) => {
                parameters.add(create_property_from_parameter(
                    resolver, descriptor, param, matching,
                ));
            }
            None => {
                log::debug!(
                    "constructor parameter '{}' of '{}' dropped: no matching property",
                    param.name,
                    descriptor.name
                );
            }
        }
    }

    CreatorPlan {
        source,
        declaring_type: descriptor.type_id,
        parameters,
        invoke: constructor.invoke.clone(),
    }
}

/// A constructor parameter becomes a non-readable, writable property that
/// inherits unset fields from its matching instance property.
fn create_property_from_parameter(
    resolver: &ContractResolver,
    descriptor: &TypeDescriptor,
    param: &ConstructorParam,
    matching: &Property,
) -> Property {
    let mut property = Property::new(
        Arc::clone(&param.name),
        Arc::clone(&param.name),
        param.param_type,
    );
    property.declaring_type = Some(descriptor.type_id);

    apply_member_annotations(
        &mut property,
        &param.annotations,
        &param.name,
        descriptor.annotations.data_contract.is_some(),
        MemberSerialization::OptOut,
        resolver,
    );

    property.readable = false;
    property.writable = true;

    if property.name.as_ref() == param.name.as_ref() {
        property.name = Arc::clone(&matching.name);
    }
    if property.converter.is_none() {
        property.converter = matching.converter.clone();
    }
    if property.default_value.is_none() {
        property.default_value = matching.default_value.clone();
    }
    if property.required.is_none() {
        property.required = matching.required;
    }
    if property.is_reference.is_none() {
        property.is_reference = matching.is_reference;
    }
    if property.null_value_handling.is_none() {
        property.null_value_handling = matching.null_value_handling;
    }
    if property.default_value_handling.is_none() {
        property.default_value_handling = matching.default_value_handling;
    }
    if property.reference_loop_handling.is_none() {
        property.reference_loop_handling = matching.reference_loop_handling;
    }
    if property.object_creation_handling.is_none() {
        property.object_creation_handling = matching.object_creation_handling;
    }
    if property.type_name_handling.is_none() {
        property.type_name_handling = matching.type_name_handling;
    }

    property
}
