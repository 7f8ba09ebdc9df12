//! Deep-merge and null stripping over [`RawMapping`].

use crate::value::{RawMapping, RawValue};

/// Merge `other` into `target`.
///
/// When both sides hold a mapping under the same key the two mappings are
/// merged recursively. Any other value from `other` replaces the one in
/// `target` outright, sequences included.
pub fn deep_merge(target: &mut RawMapping, other: RawMapping) {
    for (key, value) in other {
        match value {
            RawValue::Mapping(incoming) => match target.get_mut(&key) {
                Some(RawValue::Mapping(existing)) => deep_merge(existing, incoming),
                _ => {
                    target.insert(key, RawValue::Mapping(incoming));
                }
            },
            value => {
                target.insert(key, value);
            }
        }
    }
}

/// Remove null values, then remove mappings left empty by that removal.
///
/// A mapping that was already empty before stripping is removed as well.
pub fn drop_nulls(map: &mut RawMapping) {
    map.retain(|_, value| match value {
        RawValue::Null => false,
        RawValue::Mapping(inner) => {
            drop_nulls(inner);
            !inner.is_empty()
        }
        _ => true,
    });
}
