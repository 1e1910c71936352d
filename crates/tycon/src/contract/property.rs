// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Resolved properties and the name-keyed, insertion-ordered collection
//! they live in.

use crate::access::{PredicateFn, SetSpecifiedFn, ValueProvider};
use crate::convert::ConverterRef;
use crate::descriptor::TypeId;
use crate::handling::{
    DefaultValueHandling, NullValueHandling, ObjectCreationHandling, ReferenceLoopHandling,
    Required, TypeNameHandling,
};
use crate::value::Value;
use std::collections::HashMap;
use std::sync::Arc;

/// Metadata plus accessor for one serializable member.
#[derive(Clone)]
pub struct Property {
    /// Serialized name, after naming-convention resolution.
    pub name: Arc<str>,
    /// Original member (or parameter) name.
    pub underlying_name: Arc<str>,
    pub value_type: TypeId,
    pub declaring_type: Option<TypeId>,
    /// Explicit ordering key; unset properties keep discovery order.
    pub order: Option<i32>,
    /// Unset falls back to [`Required::Default`].
    pub required: Option<Required>,
    pub ignored: bool,
    pub readable: bool,
    pub writable: bool,
    pub converter: Option<ConverterRef>,
    pub default_value: Option<Value>,
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
    pub value_provider: Option<ValueProvider>,
    pub should_serialize: Option<PredicateFn>,
    pub get_specified: Option<PredicateFn>,
    pub set_specified: Option<SetSpecifiedFn>,
}

impl Property {
    pub(crate) fn new(name: Arc<str>, underlying_name: Arc<str>, value_type: TypeId) -> Self {
        Self {
            name,
            underlying_name,
            value_type,
            declaring_type: None,
            order: None,
            required: None,
            ignored: false,
            readable: false,
            writable: false,
            converter: None,
            default_value: None,
            null_value_handling: None,
            default_value_handling: None,
            reference_loop_handling: None,
            object_creation_handling: None,
            type_name_handling: None,
            is_reference: None,
            item_converter: None,
            item_is_reference: None,
            item_reference_loop_handling: None,
            item_type_name_handling: None,
            value_provider: None,
            should_serialize: None,
            get_specified: None,
            set_specified: None,
        }
    }

    /// Effective required-ness tier.
    #[must_use]
    pub fn effective_required(&self) -> Required {
        self.required.unwrap_or_default()
    }
}

impl std::fmt::Debug for Property {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Property")
            .field("name", &self.name)
            .field("underlying_name", &self.underlying_name)
            .field("value_type", &self.value_type)
            .field("order", &self.order)
            .field("ignored", &self.ignored)
            .field("readable", &self.readable)
            .field("writable", &self.writable)
            .finish_non_exhaustive()
    }
}

/// Insertion-ordered property collection keyed by serialized name.
///
/// Adding a duplicate name silently keeps the first-added entry; annotation
/// name collisions are tolerated, not errors.
#[derive(Clone, Debug, Default)]
pub struct PropertyCollection {
    entries: Vec<Property>,
    by_name: HashMap<Arc<str>, usize>,
}

impl PropertyCollection {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a property; first-wins on duplicate serialized names.
    ///
    /// Returns whether the property was actually added.
    pub fn add(&mut self, property: Property) -> bool {
        if self.by_name.contains_key(property.name.as_ref()) {
            log::debug!(
                "property '{}' dropped: serialized name already taken",
                property.name
            );
            return false;
        }
        self.by_name
            .insert(Arc::clone(&property.name), self.entries.len());
        self.entries.push(property);
        true
    }

    #[must_use]
    pub fn get(&self, name: &str) -> Option<&Property> {
        self.by_name.get(name).map(|i| &self.entries[*i])
    }

    /// Closest match for a constructor parameter name: exact first, then
    /// the first case-insensitive hit in insertion order.
    #[must_use]
    pub fn closest_match(&self, name: &str) -> Option<&Property> {
        if let Some(exact) = self.get(name) {
            return Some(exact);
        }
        self.entries
            .iter()
            .find(|p| p.name.eq_ignore_ascii_case(name))
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Property> {
        self.entries.iter()
    }

    /// Serialized names, in serialization order.
    #[must_use]
    pub fn names(&self) -> Vec<&str> {
        self.entries.iter().map(|p| p.name.as_ref()).collect()
    }

    /// Apply the ordering law: explicitly ordered properties first,
    /// ascending by order key; unordered properties follow in their
    /// discovery order.
    pub(crate) fn sort_for_serialization(&mut self) {
        self.entries.sort_by_key(|p| match p.order {
            Some(order) => (0_u8, order),
            None => (1_u8, 0_i32),
        });
        self.reindex();
    }

    fn reindex(&mut self) {
        self.by_name = self
            .entries
            .iter()
            .enumerate()
            .map(|(i, p)| (Arc::clone(&p.name), i))
            .collect();
    }
}

impl<'a> IntoIterator for &'a PropertyCollection {
    type Item = &'a Property;
    type IntoIter = std::slice::Iter<'a, Property>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::descriptor::well_known;

    fn property(name: &str, order: Option<i32>) -> Property {
        let mut p = Property::new(Arc::from(name), Arc::from(name), well_known::I32);
        p.order = order;
        p
    }

    #[test]
    fn test_first_wins_on_duplicate_name() {
        let mut collection = PropertyCollection::new();
        let mut first = property("count", None);
        first.readable = true;
        assert!(collection.add(first));
        assert!(!collection.add(property("count", None)));

        assert_eq!(collection.len(), 1);
        assert!(collection.get("count").expect("property").readable);
    }

    #[test]
    fn test_closest_match_prefers_exact() {
        let mut collection = PropertyCollection::new();
        collection.add(property("COUNT", None));
        collection.add(property("count", None));

        let matched = collection.closest_match("count").expect("match");
        assert_eq!(matched.name.as_ref(), "count");
    }

    #[test]
    fn test_closest_match_case_insensitive_fallback() {
        let mut collection = PropertyCollection::new();
        collection.add(property("Count", None));

        let matched = collection.closest_match("count").expect("match");
        assert_eq!(matched.name.as_ref(), "Count");
        assert!(collection.closest_match("missing").is_none());
    }

    #[test]
    fn test_ordering_law() {
        let mut collection = PropertyCollection::new();
        collection.add(property("a", Some(2)));
        collection.add(property("b", None));
        collection.add(property("c", Some(0)));
        collection.add(property("d", None));

        collection.sort_for_serialization();
        assert_eq!(collection.names(), vec!["c", "a", "b", "d"]);
    }

    #[test]
    fn test_lookup_survives_sort() {
        let mut collection = PropertyCollection::new();
        collection.add(property("a", Some(5)));
        collection.add(property("b", Some(1)));
        collection.sort_for_serialization();

        assert_eq!(collection.get("a").expect("a").order, Some(5));
        assert_eq!(collection.names(), vec!["b", "a"]);
    }
}
