// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Contract classification and assembly.
//!
//! A type is classified by an ordered list of (predicate, builder) rules
//! evaluated top to bottom; the first match wins. The order encodes policy
//! and must be preserved: explicit annotations beat structural shapes, the
//! tree-node family beats both structural rules, and dictionary beats
//! sequence.

use crate::contract::{
    ArrayContract, Contract, ContractKind, DictionaryContract, DynamicContract, ExternalContract,
    ObjectContract,
};
use crate::convert::{self, renders_as_string};
use crate::descriptor::{DefaultCreateFn, DescriptorRegistry, TypeDescriptor, TypeId};
use crate::error::ResolveError;
use crate::handling::MemberSerialization;
use crate::resolver::callbacks::resolve_callbacks;
use crate::resolver::constructors::resolve_creator_plan;
use crate::resolver::properties::create_properties;
use crate::resolver::ContractResolver;
use std::sync::Arc;

pub(crate) struct ClassifyInput<'a> {
    pub resolver: &'a ContractResolver,
    pub registry: &'a DescriptorRegistry,
    /// The type as requested.
    pub type_id: TypeId,
    /// The nullable-stripped type all classification runs against.
    pub stripped: TypeId,
    pub descriptor: &'a TypeDescriptor,
}

struct ContractRule {
    label: &'static str,
    applies: fn(&ClassifyInput<'_>) -> bool,
    build: fn(&ClassifyInput<'_>) -> Result<Contract, ResolveError>,
}

const CONTRACT_RULES: &[ContractRule] = &[
    ContractRule {
        label: "primitive",
        applies: |input| input.descriptor.primitive.is_some(),
        build: build_primitive,
    },
    ContractRule {
        label: "annotated-object",
        applies: |input| input.descriptor.annotations.object.is_some(),
        build: build_object,
    },
    ContractRule {
        label: "annotated-array",
        applies: |input| input.descriptor.annotations.array.is_some(),
        build: build_array,
    },
    ContractRule {
        label: "annotated-dictionary",
        applies: |input| input.descriptor.annotations.dictionary.is_some(),
        build: build_dictionary,
    },
    ContractRule {
        label: "tree-node",
        applies: |input| {
            input
                .registry
                .is_or_derives(input.stripped, |d| d.capabilities.tree_node)
        },
        build: build_tree,
    },
    ContractRule {
        label: "keyed-enumeration",
        applies: |input| input.descriptor.capabilities.keyed.is_some(),
        build: build_dictionary,
    },
    ContractRule {
        label: "sequential-enumeration",
        applies: |input| input.descriptor.capabilities.sequence.is_some(),
        build: build_array,
    },
    ContractRule {
        label: "string-convertible",
        applies: |input| {
            input
                .descriptor
                .capabilities
                .text_converter
                .is_some_and(renders_as_string)
        },
        build: build_string,
    },
    ContractRule {
        label: "externally-serializable",
        applies: |input| {
            input.descriptor.capabilities.custom_serialization.is_some()
                && !input.resolver.settings().ignore_custom_serialization
        },
        build: build_external,
    },
    ContractRule {
        label: "dynamic-members",
        applies: |input| input.descriptor.capabilities.dynamic_members,
        build: build_dynamic,
    },
    ContractRule {
        label: "object",
        applies: |_| true,
        build: build_object,
    },
];

/// Classify and build the contract for one type.
pub(crate) fn create_contract(
    resolver: &ContractResolver,
    registry: &DescriptorRegistry,
    type_id: TypeId,
) -> Result<Contract, ResolveError> {
    let stripped = registry.strip_nullable(type_id);
    let descriptor = registry
        .get(stripped)
        .ok_or(ResolveError::UnknownType(stripped))?;

    let descriptor = &*descriptor;
    let input = ClassifyInput {
        resolver,
        registry,
        type_id,
        stripped,
        descriptor,
    };

    for rule in CONTRACT_RULES {
        if (rule.applies)(&input) {
            log::debug!(
                "type '{}' classified as {}",
                descriptor.name,
                rule.label
            );
            return (rule.build)(&input);
        }
    }
    // the final rule matches unconditionally
    Err(ResolveError::UnknownType(type_id))
}

/// Member-selection mode of an object contract.
pub(crate) fn member_serialization_mode(
    descriptor: &TypeDescriptor,
    resolver: &ContractResolver,
) -> MemberSerialization {
    if let Some(mode) = descriptor
        .annotations
        .object
        .and_then(|o| o.member_serialization)
    {
        return mode;
    }
    if descriptor.annotations.data_contract.is_some() {
        return MemberSerialization::OptIn;
    }
    if descriptor.annotations.serializable_marker
        && !resolver.settings().ignore_serializable_marker
    {
        return MemberSerialization::Fields;
    }
    MemberSerialization::OptOut
}

/// Shared initialization every contract kind passes through.
fn init_contract(input: &ClassifyInput<'_>, kind: ContractKind) -> Result<Contract, ResolveError> {
    let descriptor = input.descriptor;
    let mut contract = Contract::new(input.type_id, input.stripped, kind);

    if let Some(container) = descriptor.annotations.container() {
        contract.is_reference = container.is_reference;
    } else if let Some(data_contract) = &descriptor.annotations.data_contract {
        if data_contract.is_reference {
            contract.is_reference = Some(true);
        }
    }

    contract.converter = descriptor.annotations.converter.clone();
    contract.internal_converter = convert::matching_built_in(input.registry, input.stripped);

    let (creator, non_public) = default_creator(descriptor);
    contract.default_creator = creator;
    contract.default_creator_non_public = non_public;

    let callbacks = resolve_callbacks(input.registry, input.stripped)?;
    contract.on_serializing = callbacks.on_serializing;
    contract.on_serialized = callbacks.on_serialized;
    contract.on_deserializing = callbacks.on_deserializing;
    contract.on_deserialized = callbacks.on_deserialized;
    contract.on_error = callbacks.on_error;

    Ok(contract)
}

fn default_creator(descriptor: &TypeDescriptor) -> (Option<DefaultCreateFn>, bool) {
    if !descriptor.has_default_constructor(true) && !descriptor.is_value_type {
        return (None, false);
    }
    let non_public = !descriptor.is_value_type && descriptor.default_constructor(false).is_none();
    let creator = descriptor
        .default_constructor(true)
        .and_then(|c| c.invoke.clone())
        .map(|invoke| {
            let creator: DefaultCreateFn = Arc::new(move || invoke(&[]));
            creator
        });
    (creator, non_public)
}

fn build_primitive(input: &ClassifyInput<'_>) -> Result<Contract, ResolveError> {
    let kind = input
        .descriptor
        .primitive
        .ok_or(ResolveError::UnknownType(input.stripped))?;
    init_contract(input, ContractKind::Primitive(kind))
}

fn build_object(input: &ClassifyInput<'_>) -> Result<Contract, ResolveError> {
    let mut contract = init_contract(input, ContractKind::Object(ObjectContract::default()))?;
    let descriptor = input.descriptor;

    let mode = member_serialization_mode(descriptor, input.resolver);
    let properties = create_properties(input.resolver, input.registry, input.stripped, mode);
    // a non-public parameterless constructor is usable when non-public
    // access is globally permitted
    let needs_fallback = contract.default_creator.is_none()
        || (contract.default_creator_non_public && !input.resolver.settings().search_non_public);
    let creator = resolve_creator_plan(input.resolver, descriptor, needs_fallback, &properties)?;
    let item_required = descriptor.annotations.object.and_then(|o| o.item_required);

    if let ContractKind::Object(object) = &mut contract.kind {
        object.member_serialization = mode;
        object.properties = properties;
        object.creator = creator;
        object.item_required = item_required;
    }
    Ok(contract)
}

fn build_array(input: &ClassifyInput<'_>) -> Result<Contract, ResolveError> {
    let element_type = input
        .descriptor
        .capabilities
        .sequence
        .map(|s| s.element);
    init_contract(input, ContractKind::Array(ArrayContract { element_type }))
}

fn build_dictionary(input: &ClassifyInput<'_>) -> Result<Contract, ResolveError> {
    let keyed = input.descriptor.capabilities.keyed;
    init_contract(
        input,
        ContractKind::Dictionary(DictionaryContract {
            key_type: keyed.map(|k| k.key),
            value_type: keyed.map(|k| k.value),
            naming: input.resolver.settings().naming,
        }),
    )
}

fn build_string(input: &ClassifyInput<'_>) -> Result<Contract, ResolveError> {
    init_contract(input, ContractKind::String)
}

fn build_tree(input: &ClassifyInput<'_>) -> Result<Contract, ResolveError> {
    init_contract(input, ContractKind::Tree)
}

fn build_external(input: &ClassifyInput<'_>) -> Result<Contract, ResolveError> {
    let creator = input
        .descriptor
        .capabilities
        .custom_serialization
        .as_ref()
        .and_then(|c| c.creator.clone());
    init_contract(
        input,
        ContractKind::ExternallySerializable(ExternalContract { creator }),
    )
}

fn build_dynamic(input: &ClassifyInput<'_>) -> Result<Contract, ResolveError> {
    let mut contract = init_contract(input, ContractKind::Dynamic(DynamicContract::default()))?;
    let properties = create_properties(
        input.resolver,
        input.registry,
        input.stripped,
        MemberSerialization::OptOut,
    );
    if let ContractKind::Dynamic(dynamic) = &mut contract.kind {
        dynamic.properties = properties;
        dynamic.naming = input.resolver.settings().naming;
    }
    Ok(contract)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::annotations::{ContainerAnnotation, ObjectAnnotation, TypeAnnotations};
    use crate::convert::TextConverterKind;
    use crate::descriptor::{well_known, TypeDescriptorBuilder};
    use crate::resolver::ResolverSettings;

    fn resolve(builder: TypeDescriptorBuilder) -> Contract {
        let registry = Arc::new(DescriptorRegistry::new());
        registry.install_primitives();
        let id = registry.register(builder.build());
        let resolver =
            ContractResolver::with_registry(ResolverSettings::default(), Arc::clone(&registry));
        create_contract(&resolver, &registry, id).expect("contract")
    }

    #[test]
    fn test_dictionary_shape_beats_sequence_shape() {
        let contract = resolve(
            TypeDescriptorBuilder::new("OrderedMap")
                .keyed(well_known::STRING, well_known::I64)
                .sequence_of(well_known::I64),
        );
        assert_eq!(contract.kind_name(), "dictionary");
    }

    #[test]
    fn test_explicit_object_annotation_beats_sequence_shape() {
        let contract = resolve(
            TypeDescriptorBuilder::new("ListLike")
                .annotations(TypeAnnotations::new().with_object(ObjectAnnotation::new()))
                .sequence_of(well_known::I64),
        );
        assert_eq!(contract.kind_name(), "object");
    }

    #[test]
    fn test_tree_node_beats_structural_rules() {
        let registry = Arc::new(DescriptorRegistry::new());
        registry.install_primitives();
        let token = registry.register(TypeDescriptorBuilder::new("Token").tree_node().build());
        let id = registry.register(
            TypeDescriptorBuilder::new("ArrayToken")
                .base(token)
                .sequence_of(well_known::I64)
                .build(),
        );
        let resolver =
            ContractResolver::with_registry(ResolverSettings::default(), Arc::clone(&registry));

        let contract = create_contract(&resolver, &registry, id).expect("contract");
        assert_eq!(contract.kind_name(), "tree");
    }

    #[test]
    fn test_component_text_converter_not_string() {
        let contract = resolve(
            TypeDescriptorBuilder::new("Widget").text_converter(TextConverterKind::Component),
        );
        assert_eq!(contract.kind_name(), "object");

        let contract = resolve(
            TypeDescriptorBuilder::new("Money").text_converter(TextConverterKind::Display),
        );
        assert_eq!(contract.kind_name(), "string");
    }

    #[test]
    fn test_custom_serialization_respects_ignore_setting() {
        let registry = Arc::new(DescriptorRegistry::new());
        registry.install_primitives();
        let id = registry.register(
            TypeDescriptorBuilder::new("SelfWriting")
                .custom_serialization()
                .build(),
        );

        let resolver =
            ContractResolver::with_registry(ResolverSettings::default(), Arc::clone(&registry));
        let contract = create_contract(&resolver, &registry, id).expect("contract");
        assert_eq!(contract.kind_name(), "externally-serializable");

        let ignoring = ContractResolver::with_registry(
            ResolverSettings::default().with_ignore_custom_serialization(true),
            Arc::clone(&registry),
        );
        let contract = create_contract(&ignoring, &registry, id).expect("contract");
        assert_eq!(contract.kind_name(), "object");
    }

    #[test]
    fn test_dynamic_members_contract() {
        let contract = resolve(
            TypeDescriptorBuilder::new("Bag")
                .dynamic_members()
                .member(crate::descriptor::MemberDescriptor::property(
                    "fixed",
                    well_known::I32,
                )),
        );
        let dynamic = contract.as_dynamic().expect("dynamic");
        assert!(dynamic.properties.get("fixed").is_some());
    }

    #[test]
    fn test_fallback_is_object() {
        let contract = resolve(TypeDescriptorBuilder::new("Plain"));
        assert_eq!(contract.kind_name(), "object");
    }

    #[test]
    fn test_nullable_wrapper_classified_by_inner() {
        let registry = Arc::new(DescriptorRegistry::new());
        registry.install_primitives();
        let id = registry.register(
            TypeDescriptorBuilder::new("Option<i32>")
                .nullable_of(well_known::I32)
                .value_type()
                .build(),
        );
        let resolver =
            ContractResolver::with_registry(ResolverSettings::default(), Arc::clone(&registry));

        let contract = create_contract(&resolver, &registry, id).expect("contract");
        assert_eq!(contract.kind_name(), "primitive");
        assert_eq!(contract.underlying_type, id);
        assert_eq!(contract.non_nullable_type, well_known::I32);
    }

    #[test]
    fn test_is_reference_from_container_annotation() {
        let contract = resolve(
            TypeDescriptorBuilder::new("Shared").annotations(
                TypeAnnotations::new()
                    .with_array(ContainerAnnotation::new().with_is_reference(true)),
            ),
        );
        assert_eq!(contract.is_reference, Some(true));
        assert_eq!(contract.kind_name(), "array");
    }
}
