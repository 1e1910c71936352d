// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! End-to-end contract resolution tests over registered fixture types.

use std::any::Any;
use std::sync::Arc;

use tycon::access::AccessError;
use tycon::annotations::{MemberAnnotations, PropertyAnnotation, TypeAnnotations};
use tycon::context::{ErrorContext, SerializationContext};
use tycon::convert::Converter;
use tycon::descriptor::{
    well_known, ConstructorDescriptor, ConstructorParam, DescriptorRegistry, HookKind,
    MemberDescriptor, MethodDescriptor, TypeDescriptorBuilder, TypeId,
};
use tycon::resolver::{ContractResolver, ResolverSettings};
use tycon::value::Value;

struct Movie {
    title: String,
    release_year: i32,
}

struct YearConverter;

impl Converter for YearConverter {
    fn name(&self) -> &'static str {
        "year"
    }

    fn can_convert(&self, _registry: &DescriptorRegistry, type_id: TypeId) -> bool {
        type_id == well_known::I32
    }
}

fn fresh_registry() -> Arc<DescriptorRegistry> {
    let registry = Arc::new(DescriptorRegistry::new());
    registry.install_primitives();
    registry
}

fn register_movie(registry: &DescriptorRegistry, converter: Arc<dyn Converter>) -> TypeId {
    registry.register(
        TypeDescriptorBuilder::new("Movie")
            .member(
                MemberDescriptor::property("title", well_known::STRING)
                    .with_getter(|instance: &dyn Any| {
                        let movie = instance
                            .downcast_ref::<Movie>()
                            .ok_or(AccessError::WrongInstanceType)?;
                        Ok(Value::from(movie.title.clone()))
                    })
                    .with_setter(|instance: &mut dyn Any, value: Value| {
                        let movie = instance
                            .downcast_mut::<Movie>()
                            .ok_or(AccessError::WrongInstanceType)?;
                        movie.title = value
                            .as_str()
                            .ok_or(AccessError::IncompatibleValue)?
                            .to_string();
                        Ok(())
                    }),
            )
            .member(
                MemberDescriptor::property("release_year", well_known::I32)
                    .read_only()
                    .with_annotations(MemberAnnotations::new().with_converter(converter))
                    .with_getter(|instance: &dyn Any| {
                        let movie = instance
                            .downcast_ref::<Movie>()
                            .ok_or(AccessError::WrongInstanceType)?;
                        Ok(Value::from(movie.release_year))
                    }),
            )
            .constructor(ConstructorDescriptor::parameterless().with_invoke(|_| {
                Box::new(Movie {
                    title: String::new(),
                    release_year: 0,
                })
            }))
            .build(),
    )
}

#[test]
fn test_object_contract_shape() {
    let registry = fresh_registry();
    let movie = register_movie(&registry, Arc::new(YearConverter));
    let resolver = ContractResolver::with_registry(ResolverSettings::default(), registry);

    let contract = resolver.resolve_contract(movie).expect("contract");
    assert_eq!(contract.kind_name(), "object");

    let properties = contract.properties().expect("properties");
    assert_eq!(properties.names(), vec!["title", "release_year"]);

    let year = properties.get("release_year").expect("release_year");
    assert!(year.converter.is_some());
    assert!(year.readable);
    assert!(!year.writable);
}

#[test]
fn test_accessors_read_and_write_instances() {
    let registry = fresh_registry();
    let movie_type = register_movie(&registry, Arc::new(YearConverter));
    let resolver = ContractResolver::with_registry(ResolverSettings::default(), registry);

    let contract = resolver.resolve_contract(movie_type).expect("contract");
    let title = contract
        .properties()
        .and_then(|p| p.get("title"))
        .expect("title");
    let provider = title.value_provider.as_ref().expect("provider");

    let mut movie = Movie {
        title: "Heat".to_string(),
        release_year: 1995,
    };
    assert_eq!(
        provider.get_value(&movie).expect("get").as_str(),
        Some("Heat")
    );
    provider
        .set_value(&mut movie, Value::from("Ronin"))
        .expect("set");
    assert_eq!(movie.title, "Ronin");
}

#[test]
fn test_default_creator_builds_instances() {
    let registry = fresh_registry();
    let movie_type = register_movie(&registry, Arc::new(YearConverter));
    let resolver = ContractResolver::with_registry(ResolverSettings::default(), registry);

    let contract = resolver.resolve_contract(movie_type).expect("contract");
    let creator = contract.default_creator.as_ref().expect("creator");
    assert!(!contract.default_creator_non_public);

    let instance = creator();
    let movie = instance.downcast_ref::<Movie>().expect("movie");
    assert_eq!(movie.release_year, 0);
}

#[test]
fn test_non_public_default_creator_flagged() {
    let registry = fresh_registry();
    let id = registry.register(
        TypeDescriptorBuilder::new("Hidden")
            .constructor(
                ConstructorDescriptor::parameterless()
                    .non_public()
                    .with_invoke(|_| Box::new(42_i32)),
            )
            .build(),
    );
    let resolver = ContractResolver::with_registry(ResolverSettings::default(), registry);

    let contract = resolver.resolve_contract(id).expect("contract");
    assert!(contract.default_creator.is_some());
    assert!(contract.default_creator_non_public);
}

#[test]
fn test_idempotent_resolution_and_warm_cache_identity() {
    let registry = fresh_registry();
    let movie = register_movie(&registry, Arc::new(YearConverter));
    let resolver = ContractResolver::with_registry(ResolverSettings::default(), registry);

    let first = resolver.resolve_contract(movie).expect("contract");
    let second = resolver.resolve_contract(movie).expect("contract");

    assert!(Arc::ptr_eq(&first, &second));
    assert_eq!(
        first.properties().expect("properties").names(),
        second.properties().expect("properties").names()
    );
    assert_eq!(resolver.cached_contracts(), 1);
}

#[test]
fn test_scope_isolation_between_differently_configured_resolvers() {
    let registry = fresh_registry();
    let id = registry.register(
        TypeDescriptorBuilder::new("Snapshot")
            .annotations(TypeAnnotations::new().serializable())
            .member(MemberDescriptor::field("state", well_known::I32).non_public())
            .member(MemberDescriptor::property("label", well_known::STRING))
            .build(),
    );

    let default_resolver =
        ContractResolver::with_registry(ResolverSettings::default(), Arc::clone(&registry));
    let fields_resolver = ContractResolver::with_registry(
        ResolverSettings::default().with_ignore_serializable_marker(false),
        Arc::clone(&registry),
    );

    let default_contract = default_resolver.resolve_contract(id).expect("contract");
    let fields_contract = fields_resolver.resolve_contract(id).expect("contract");

    // default: marker ignored, opt-out over public members
    assert_eq!(
        default_contract.properties().expect("properties").names(),
        vec!["label"]
    );
    // marker honored: fields-only selection
    assert_eq!(
        fields_contract.properties().expect("properties").names(),
        vec!["state"]
    );

    assert_eq!(default_resolver.cached_contracts(), 1);
    assert_eq!(fields_resolver.cached_contracts(), 1);
}

#[test]
fn test_classification_order_dictionary_before_sequence() {
    let registry = fresh_registry();
    let id = registry.register(
        TypeDescriptorBuilder::new("OrderedMap")
            .keyed(well_known::STRING, well_known::I64)
            .sequence_of(well_known::I64)
            .build(),
    );
    let resolver = ContractResolver::with_registry(ResolverSettings::default(), registry);

    let contract = resolver.resolve_contract(id).expect("contract");
    let dictionary = contract.as_dictionary().expect("dictionary");
    assert_eq!(dictionary.key_type, Some(well_known::STRING));
    assert_eq!(dictionary.value_type, Some(well_known::I64));
}

#[test]
fn test_ordering_law() {
    let registry = fresh_registry();
    let id = registry.register(
        TypeDescriptorBuilder::new("Ordered")
            .member(
                MemberDescriptor::property("second", well_known::I32)
                    .with_property_annotation(PropertyAnnotation::new().with_order(2)),
            )
            .member(MemberDescriptor::property("third", well_known::I32))
            .member(
                MemberDescriptor::property("first", well_known::I32)
                    .with_property_annotation(PropertyAnnotation::new().with_order(0)),
            )
            .member(MemberDescriptor::property("fourth", well_known::I32))
            .build(),
    );
    let resolver = ContractResolver::with_registry(ResolverSettings::default(), registry);

    let contract = resolver.resolve_contract(id).expect("contract");
    assert_eq!(
        contract.properties().expect("properties").names(),
        vec!["first", "second", "third", "fourth"]
    );
}

#[test]
fn test_constructor_parameter_inherits_converter_on_exact_type_match() {
    let registry = fresh_registry();
    let converter: Arc<dyn Converter> = Arc::new(YearConverter);
    let id = registry.register(
        TypeDescriptorBuilder::new("Counted")
            .member(
                MemberDescriptor::property("count", well_known::I32)
                    .with_annotations(MemberAnnotations::new().with_converter(Arc::clone(&converter))),
            )
            .constructor(
                ConstructorDescriptor::with_params(vec![ConstructorParam::new(
                    "count",
                    well_known::I32,
                )])
                .designated(),
            )
            .build(),
    );
    let resolver = ContractResolver::with_registry(ResolverSettings::default(), registry);

    let contract = resolver.resolve_contract(id).expect("contract");
    let plan = contract
        .as_object()
        .and_then(|o| o.creator.as_ref())
        .expect("plan");
    let parameter = plan.parameters.get("count").expect("parameter");

    let inherited = parameter.converter.as_ref().expect("converter");
    assert!(Arc::ptr_eq(inherited, &converter));
    assert!(!parameter.readable);
    assert!(parameter.writable);
}

#[test]
fn test_constructor_parameter_type_mismatch_not_matched() {
    let registry = fresh_registry();
    let id = registry.register(
        TypeDescriptorBuilder::new("Mismatched")
            .member(MemberDescriptor::property("count", well_known::I32))
            .constructor(
                ConstructorDescriptor::with_params(vec![ConstructorParam::new(
                    "count",
                    well_known::STRING,
                )])
                .designated(),
            )
            .build(),
    );
    let resolver = ContractResolver::with_registry(ResolverSettings::default(), registry);

    let contract = resolver.resolve_contract(id).expect("contract");
    let plan = contract
        .as_object()
        .and_then(|o| o.creator.as_ref())
        .expect("plan");
    assert!(plan.parameters.get("count").is_none());
}

#[test]
fn test_parameterized_fallback_used_without_default_constructor() {
    let registry = fresh_registry();
    let id = registry.register(
        TypeDescriptorBuilder::new("NoDefault")
            .member(MemberDescriptor::property("count", well_known::I32))
            .constructor(ConstructorDescriptor::with_params(vec![
                ConstructorParam::new("count", well_known::I32),
            ]))
            .build(),
    );
    let resolver = ContractResolver::with_registry(ResolverSettings::default(), registry);

    let contract = resolver.resolve_contract(id).expect("contract");
    assert!(contract.default_creator.is_none());
    let plan = contract
        .as_object()
        .and_then(|o| o.creator.as_ref())
        .expect("plan");
    assert!(plan.parameters.get("count").is_some());
}

#[test]
fn test_non_public_parameterless_usable_when_search_widened() {
    let registry = fresh_registry();
    let id = registry.register(
        TypeDescriptorBuilder::new("Guarded")
            .member(MemberDescriptor::property("count", well_known::I32))
            .constructor(
                ConstructorDescriptor::parameterless()
                    .non_public()
                    .with_invoke(|_| Box::new(0_i32)),
            )
            .constructor(ConstructorDescriptor::with_params(vec![
                ConstructorParam::new("count", well_known::I32),
            ]))
            .build(),
    );

    let narrow =
        ContractResolver::with_registry(ResolverSettings::default(), Arc::clone(&registry));
    let contract = narrow.resolve_contract(id).expect("contract");
    assert!(contract
        .as_object()
        .and_then(|o| o.creator.as_ref())
        .is_some());

    let widened = ContractResolver::with_registry(
        ResolverSettings::default().with_search_non_public(true),
        registry,
    );
    let contract = widened.resolve_contract(id).expect("contract");
    assert!(contract.as_object().expect("object").creator.is_none());
    assert!(contract.default_creator.is_some());
}

#[test]
fn test_derived_callback_overrides_base() {
    let registry = fresh_registry();
    let base = registry.register(
        TypeDescriptorBuilder::new("Record")
            .method(MethodDescriptor::context_hook(
                "record_loaded",
                HookKind::OnDeserialized,
                |_, _| {},
            ))
            .build(),
    );
    let derived = registry.register(
        TypeDescriptorBuilder::new("AuditedRecord")
            .base(base)
            .method(MethodDescriptor::context_hook(
                "audited_loaded",
                HookKind::OnDeserialized,
                |instance, _| {
                    if let Some(count) = instance.downcast_mut::<i32>() {
                        *count += 1;
                    }
                },
            ))
            .build(),
    );
    let resolver = ContractResolver::with_registry(ResolverSettings::default(), registry);

    let contract = resolver.resolve_contract(derived).expect("contract");
    let hook = contract.on_deserialized.as_ref().expect("hook");
    assert_eq!(hook.name.as_ref(), "audited_loaded");
    assert_eq!(hook.declaring_type, derived);

    let mut instance: i32 = 0;
    let mut context = SerializationContext::new();
    hook.invoke(&mut instance, &mut context);
    assert_eq!(instance, 1);
}

#[test]
fn test_error_hook_sets_handled() {
    let registry = fresh_registry();
    let id = registry.register(
        TypeDescriptorBuilder::new("Forgiving")
            .method(MethodDescriptor::error_hook("swallow", |_, _, error| {
                error.set_handled(true);
            }))
            .build(),
    );
    let resolver = ContractResolver::with_registry(ResolverSettings::default(), registry);

    let contract = resolver.resolve_contract(id).expect("contract");
    let hook = contract.on_error.as_ref().expect("hook");

    let mut instance: i32 = 0;
    let mut context = SerializationContext::new();
    let mut error = ErrorContext::new("write failed".into());
    hook.invoke_error(&mut instance, &mut context, &mut error);
    assert!(error.handled());
}

#[test]
fn test_should_serialize_and_specified_attach() {
    let registry = fresh_registry();
    let id = registry.register(
        TypeDescriptorBuilder::new("Partial")
            .member(
                MemberDescriptor::property("nickname", well_known::STRING)
                    .with_should_serialize(|instance: &dyn Any| {
                        instance
                            .downcast_ref::<Movie>()
                            .is_some_and(|m| !m.title.is_empty())
                    })
                    .with_specified(|_| true, None),
            )
            .build(),
    );
    let resolver = ContractResolver::with_registry(ResolverSettings::default(), registry);

    let contract = resolver.resolve_contract(id).expect("contract");
    let nickname = contract
        .properties()
        .and_then(|p| p.get("nickname"))
        .expect("nickname");

    let should_serialize = nickname.should_serialize.as_ref().expect("predicate");
    let empty = Movie {
        title: String::new(),
        release_year: 0,
    };
    assert!(!should_serialize(&empty));

    let get_specified = nickname.get_specified.as_ref().expect("specified");
    assert!(get_specified(&empty));
    assert!(nickname.set_specified.is_none());
}

#[test]
fn test_duplicate_serialized_names_first_wins() {
    let registry = fresh_registry();
    let id = registry.register(
        TypeDescriptorBuilder::new("Colliding")
            .member(
                MemberDescriptor::property("primary", well_known::I32)
                    .with_property_annotation(PropertyAnnotation::named("value")),
            )
            .member(
                MemberDescriptor::property("secondary", well_known::I64)
                    .with_property_annotation(PropertyAnnotation::named("value")),
            )
            .build(),
    );
    let resolver = ContractResolver::with_registry(ResolverSettings::default(), registry);

    let contract = resolver.resolve_contract(id).expect("contract");
    let properties = contract.properties().expect("properties");
    assert_eq!(properties.len(), 1);
    assert_eq!(
        properties.get("value").expect("value").underlying_name.as_ref(),
        "primary"
    );
}

#[test]
fn test_internal_converter_from_built_in_table() {
    let registry = fresh_registry();
    let resolver = ContractResolver::with_registry(ResolverSettings::default(), registry);

    let contract = resolver
        .resolve_contract(well_known::TIMESTAMP)
        .expect("contract");
    assert_eq!(contract.kind_name(), "primitive");
    let internal = contract.internal_converter.as_ref().expect("converter");
    assert_eq!(internal.name(), "timestamp");
}
