// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Member accessor machinery.
//!
//! Two strategies exist for getting and setting member values on an
//! instance: compiled per-member closures registered with the descriptor
//! (the fast path), and a type-level dynamic access table keyed by member
//! name (the fallback). Strategy selection is an optimization axis, not a
//! correctness one; both observe the same values.

use crate::value::Value;
use std::any::Any;
use std::sync::Arc;

/// Compiled getter for one member.
pub type GetFn = Arc<dyn Fn(&dyn Any) -> Result<Value, AccessError> + Send + Sync>;
/// Compiled setter for one member.
pub type SetFn = Arc<dyn Fn(&mut dyn Any, Value) -> Result<(), AccessError> + Send + Sync>;
/// Name-keyed getter of a type's dynamic access table.
pub type DynGetFn = Arc<dyn Fn(&dyn Any, &str) -> Option<Value> + Send + Sync>;
/// Name-keyed setter of a type's dynamic access table.
pub type DynSetFn = Arc<dyn Fn(&mut dyn Any, &str, Value) -> bool + Send + Sync>;
/// Zero-argument predicate over an instance.
pub type PredicateFn = Arc<dyn Fn(&dyn Any) -> bool + Send + Sync>;
/// Setter for a property's is-specified companion flag.
pub type SetSpecifiedFn = Arc<dyn Fn(&mut dyn Any, bool) + Send + Sync>;

/// Name-keyed get/set closures registered once per type.
#[derive(Clone)]
pub struct DynamicAccessTable {
    pub get: DynGetFn,
    pub set: DynSetFn,
}

impl DynamicAccessTable {
    pub fn new(
        get: impl Fn(&dyn Any, &str) -> Option<Value> + Send + Sync + 'static,
        set: impl Fn(&mut dyn Any, &str, Value) -> bool + Send + Sync + 'static,
    ) -> Self {
        Self {
            get: Arc::new(get),
            set: Arc::new(set),
        }
    }
}

/// Getter plus optional setter for an is-specified companion flag.
#[derive(Clone)]
pub struct SpecifiedAccessor {
    pub get: PredicateFn,
    pub set: Option<SetSpecifiedFn>,
}

/// Accessor attached to a resolved property.
#[derive(Clone)]
pub enum ValueProvider {
    /// Direct closures compiled for the member.
    Compiled {
        get: Option<GetFn>,
        set: Option<SetFn>,
    },
    /// Lookup through the declaring type's dynamic access table.
    Dynamic {
        member: Arc<str>,
        table: DynamicAccessTable,
    },
}

impl ValueProvider {
    /// Read the member value from `instance`.
    pub fn get_value(&self, instance: &dyn Any) -> Result<Value, AccessError> {
        match self {
            Self::Compiled { get, .. } => match get {
                Some(f) => f(instance),
                None => Err(AccessError::NotReadable),
            },
            Self::Dynamic { member, table } => {
                (table.get)(instance, member.as_ref()).ok_or_else(|| {
                    AccessError::MissingMember {
                        member: Arc::clone(member),
                    }
                })
            }
        }
    }

    /// Write the member value on `instance`.
    pub fn set_value(&self, instance: &mut dyn Any, value: Value) -> Result<(), AccessError> {
        match self {
            Self::Compiled { set, .. } => match set {
                Some(f) => f(instance, value),
                None => Err(AccessError::NotWritable),
            },
            Self::Dynamic { member, table } => {
                if (table.set)(instance, member.as_ref(), value) {
                    Ok(())
                } else {
                    Err(AccessError::MissingMember {
                        member: Arc::clone(member),
                    })
                }
            }
        }
    }
}

impl std::fmt::Debug for ValueProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Compiled { get, set } => f
                .debug_struct("Compiled")
                .field("get", &get.is_some())
                .field("set", &set.is_some())
                .finish(),
            Self::Dynamic { member, .. } => {
                f.debug_struct("Dynamic").field("member", member).finish()
            }
        }
    }
}

/// Accessor failure modes.
#[derive(Debug)]
pub enum AccessError {
    /// The member has no readable accessor.
    NotReadable,
    /// The member has no writable accessor.
    NotWritable,
    /// The dynamic access table does not know the member.
    MissingMember {
        /// Member name that failed to resolve.
        member: Arc<str>,
    },
    /// The instance is not of the declaring type.
    WrongInstanceType,
    /// The value shape does not fit the member.
    IncompatibleValue,
}

impl std::fmt::Display for AccessError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NotReadable => write!(f, "member is not readable"),
            Self::NotWritable => write!(f, "member is not writable"),
            Self::MissingMember { member } => {
                write!(f, "dynamic access table has no member '{member}'")
            }
            Self::WrongInstanceType => write!(f, "instance is not of the declaring type"),
            Self::IncompatibleValue => write!(f, "value shape does not fit the member"),
        }
    }
}

impl std::error::Error for AccessError {}

#[cfg(test)]
mod tests {
    use super::*;

    struct Probe {
        count: i32,
    }

    #[test]
    fn test_compiled_provider_roundtrip() {
        let provider = ValueProvider::Compiled {
            get: Some(Arc::new(|inst: &dyn Any| {
                let probe = inst
                    .downcast_ref::<Probe>()
                    .ok_or(AccessError::WrongInstanceType)?;
                Ok(Value::from(probe.count))
            })),
            set: Some(Arc::new(|inst: &mut dyn Any, value: Value| {
                let probe = inst
                    .downcast_mut::<Probe>()
                    .ok_or(AccessError::WrongInstanceType)?;
                probe.count = value.as_i64().ok_or(AccessError::IncompatibleValue)? as i32;
                Ok(())
            })),
        };

        let mut probe = Probe { count: 3 };
        assert_eq!(provider.get_value(&probe).unwrap().as_i64(), Some(3));
        provider.set_value(&mut probe, Value::from(9)).unwrap();
        assert_eq!(probe.count, 9);
    }

    #[test]
    fn test_dynamic_provider_missing_member() {
        let table = DynamicAccessTable::new(|_, _| None, |_, _, _| false);
        let provider = ValueProvider::Dynamic {
            member: Arc::from("count"),
            table,
        };
        let probe = Probe { count: 0 };
        assert!(matches!(
            provider.get_value(&probe),
            Err(AccessError::MissingMember { .. })
        ));
    }

    #[test]
    fn test_compiled_provider_write_only() {
        let provider = ValueProvider::Compiled {
            get: None,
            set: None,
        };
        let probe = Probe { count: 0 };
        assert!(matches!(
            provider.get_value(&probe),
            Err(AccessError::NotReadable)
        ));
    }
}
