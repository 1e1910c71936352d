// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Member discovery across the inheritance chain.
//!
//! Walks the cached ancestry leaf-first so a derived declaration shadows a
//! base one, includes non-public base members when the filter asks for
//! them, and filters out the duplicate same-named members a generic base
//! class re-declaration leaves behind.

use crate::descriptor::{AccessFilter, DescriptorRegistry, MemberDescriptor, TypeId};
use crate::handling::MemberSerialization;
use crate::resolver::ContractResolver;
use std::collections::{HashMap, HashSet};
use std::sync::Arc;

/// Members whose name matches the indexer convention keep all same-named
/// declarations.
const INDEXER_NAME: &str = "Item";

/// A discovered member together with the type that declared it.
#[derive(Clone, Debug)]
pub(crate) struct DiscoveredMember {
    pub declaring: TypeId,
    pub member: MemberDescriptor,
}

/// Deduplicated fields and properties of `type_id`, in discovery order.
///
/// Indexed properties are excluded. Returns an empty list for memberless
/// types.
pub(crate) fn discover_members(
    registry: &DescriptorRegistry,
    type_id: TypeId,
    filter: AccessFilter,
) -> Vec<DiscoveredMember> {
    let chain = registry.ancestry(type_id);
    let mut collected: Vec<DiscoveredMember> = Vec::new();
    let mut seen_at: HashMap<Arc<str>, usize> = HashMap::new();

    for (depth, level) in chain.iter().rev().enumerate() {
        let Some(descriptor) = registry.get(*level) else {
            continue;
        };
        for member in &descriptor.members {
            if member.is_indexed() {
                continue;
            }
            if !filter.admits(member) {
                continue;
            }
            // a more derived declaration already took this name
            if seen_at.get(member.name.as_ref()).is_some_and(|d| *d < depth) {
                continue;
            }
            seen_at.insert(Arc::clone(&member.name), depth);
            collected.push(DiscoveredMember {
                declaring: *level,
                member: member.clone(),
            });
        }
    }

    let mut name_counts: HashMap<Arc<str>, usize> = HashMap::new();
    for discovered in &collected {
        *name_counts
            .entry(Arc::clone(&discovered.member.name))
            .or_insert(0) += 1;
    }

    collected.retain(|discovered| {
        let name = discovered.member.name.as_ref();
        if name_counts[name] == 1 || name == INDEXER_NAME {
            return true;
        }
        !discovered.member.generic_artifact
    });

    collected
}

/// Members that participate in serialization for the given mode.
pub(crate) fn serializable_members(
    resolver: &ContractResolver,
    registry: &DescriptorRegistry,
    type_id: TypeId,
    mode: MemberSerialization,
) -> Vec<DiscoveredMember> {
    let all = discover_members(registry, type_id, AccessFilter::ALL);

    if mode == MemberSerialization::Fields {
        return all
            .into_iter()
            .filter(|d| d.member.is_field())
            .collect();
    }

    let default_names: HashSet<Arc<str>> =
        discover_members(registry, type_id, resolver.default_member_filter())
            .into_iter()
            .map(|d| d.member.name)
            .collect();
    let data_contract = registry
        .get(type_id)
        .is_some_and(|d| d.annotations.data_contract.is_some());
    let serialize_synthesized = resolver.settings().serialize_synthesized_members;

    all.into_iter()
        .filter(|discovered| {
            let member = &discovered.member;
            if member.synthesized && !serialize_synthesized {
                return false;
            }
            if default_names.contains(member.name.as_ref()) {
                return true;
            }
            // outside the default search breadth: only explicitly marked
            // members participate
            if member.annotations.property.is_some() {
                return true;
            }
            data_contract && member.annotations.data_member.is_some()
        })
        .collect()
}
