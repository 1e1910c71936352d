// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Property building: turns discovered members and their annotations into
//! resolved properties.

use crate::access::ValueProvider;
use crate::annotations::MemberAnnotations;
use crate::contract::{Property, PropertyCollection};
use crate::descriptor::{DescriptorRegistry, MemberDescriptor, TypeDescriptor, TypeId, Visibility};
use crate::handling::{MemberSerialization, Required};
use crate::resolver::members::{serializable_members, DiscoveredMember};
use crate::resolver::ContractResolver;
use std::sync::Arc;

/// Access conclusions of the annotation interpreter.
pub(crate) struct AppliedSettings {
    pub allow_non_public: bool,
    pub has_explicit_attribute: bool,
}

/// Interpret a member's (or parameter's) annotations onto `property`.
///
/// The data-member annotation is honored only when the declaring type
/// carries the data-contract annotation.
pub(crate) fn apply_member_annotations(
    property: &mut Property,
    annotations: &MemberAnnotations,
    member_name: &str,
    data_contract: bool,
    mode: MemberSerialization,
    resolver: &ContractResolver,
) -> AppliedSettings {
    let property_annotation = annotations.property.as_ref();
    let data_member = if data_contract {
        annotations.data_member.as_ref()
    } else {
        None
    };
    let mut has_explicit_attribute = property_annotation.is_some();

    let mapped = property_annotation
        .and_then(|a| a.name.as_deref())
        .or_else(|| data_member.and_then(|d| d.name.as_deref()))
        .unwrap_or(member_name);
    property.name = Arc::from(resolver.resolved_property_name(mapped).as_str());
    property.underlying_name = Arc::from(member_name);

    let mut has_member_annotation = false;
    if let Some(annotation) = property_annotation {
        property.required = annotation.required;
        property.order = annotation.order;
        has_member_annotation = true;
    } else if let Some(data_member) = data_member {
        property.required = Some(if data_member.required {
            Required::AllowNull
        } else {
            Required::Default
        });
        property.order = (data_member.order != -1).then_some(data_member.order);
        has_member_annotation = true;
    }

    property.ignored = if mode == MemberSerialization::OptIn {
        // opt-in: anything without an explicit include marker is ignored
        annotations.ignored || !has_member_annotation
    } else {
        annotations.ignored
    };

    // member-level converter beats any type-level default
    property.converter = annotations.converter.clone();
    property.default_value = annotations.default_value.clone();

    property.null_value_handling = property_annotation.and_then(|a| a.null_value_handling);
    property.default_value_handling = property_annotation.and_then(|a| a.default_value_handling);
    property.reference_loop_handling = property_annotation.and_then(|a| a.reference_loop_handling);
    property.object_creation_handling =
        property_annotation.and_then(|a| a.object_creation_handling);
    property.type_name_handling = property_annotation.and_then(|a| a.type_name_handling);
    property.is_reference = property_annotation.and_then(|a| a.is_reference);

    property.item_converter = property_annotation.and_then(|a| a.item_converter.clone());
    property.item_is_reference = property_annotation.and_then(|a| a.item_is_reference);
    property.item_reference_loop_handling =
        property_annotation.and_then(|a| a.item_reference_loop_handling);
    property.item_type_name_handling =
        property_annotation.and_then(|a| a.item_type_name_handling);

    let mut allow_non_public = resolver.default_member_filter().non_public;
    if property_annotation.is_some() {
        allow_non_public = true;
    }
    if mode == MemberSerialization::Fields {
        allow_non_public = true;
    }
    if data_member.is_some() {
        allow_non_public = true;
        has_explicit_attribute = true;
    }

    AppliedSettings {
        allow_non_public,
        has_explicit_attribute,
    }
}

/// Build the sorted property collection for a type.
pub(crate) fn create_properties(
    resolver: &ContractResolver,
    registry: &DescriptorRegistry,
    type_id: TypeId,
    mode: MemberSerialization,
) -> PropertyCollection {
    let members = serializable_members(resolver, registry, type_id, mode);
    let target = registry.get(type_id);

    let mut properties = PropertyCollection::new();
    for discovered in &members {
        properties.add(create_property(
            resolver,
            registry,
            target.as_deref(),
            discovered,
            mode,
        ));
    }
    properties.sort_for_serialization();
    properties
}

fn create_property(
    resolver: &ContractResolver,
    registry: &DescriptorRegistry,
    target: Option<&TypeDescriptor>,
    discovered: &DiscoveredMember,
    mode: MemberSerialization,
) -> Property {
    let member = &discovered.member;
    let declaring = registry.get(discovered.declaring);
    let data_contract = declaring
        .as_ref()
        .is_some_and(|d| d.annotations.data_contract.is_some());

    let mut property = Property::new(
        Arc::clone(&member.name),
        Arc::clone(&member.name),
        member.value_type,
    );
    property.declaring_type = Some(discovered.declaring);

    let applied = apply_member_annotations(
        &mut property,
        &member.annotations,
        &member.name,
        data_contract,
        mode,
        resolver,
    );

    property.readable = can_read(member, applied.allow_non_public);
    property.writable = can_write(
        member,
        applied.allow_non_public,
        applied.has_explicit_attribute,
    );
    property.value_provider = member_value_provider(member, target, declaring.as_deref());
    property.should_serialize = member.should_serialize.clone();
    if let Some(specified) = &member.specified {
        property.get_specified = Some(Arc::clone(&specified.get));
        property.set_specified = specified.set.clone();
    }

    property
}

fn can_read(member: &MemberDescriptor, allow_non_public: bool) -> bool {
    match member.get_access {
        Some(Visibility::Public) => true,
        Some(Visibility::NonPublic) => allow_non_public,
        None => false,
    }
}

fn can_write(member: &MemberDescriptor, allow_non_public: bool, has_explicit_attribute: bool) -> bool {
    match member.set_access {
        Some(Visibility::Public) => true,
        Some(Visibility::NonPublic) => allow_non_public || has_explicit_attribute,
        None => false,
    }
}

/// Pick the accessor strategy: compiled member closures when registered,
/// else the type's dynamic access table.
fn member_value_provider(
    member: &MemberDescriptor,
    target: Option<&TypeDescriptor>,
    declaring: Option<&TypeDescriptor>,
) -> Option<ValueProvider> {
    if member.getter.is_some() || member.setter.is_some() {
        return Some(ValueProvider::Compiled {
            get: member.getter.clone(),
            set: member.setter.clone(),
        });
    }
    target
        .and_then(|t| t.dynamic_access.clone())
        .or_else(|| declaring.and_then(|d| d.dynamic_access.clone()))
        .map(|table| ValueProvider::Dynamic {
            member: Arc::clone(&member.name),
            table,
        })
}
