//! Recursive merge of editor overrides into generated schema mappings.

use serde_json::Value;

use crate::page::JsonMap;

/// Merge `overrides` into `base` in place.
///
/// Keys holding an object on both sides merge recursively; any other
/// override value replaces the base value outright. Base keys missing
/// from `overrides` are left untouched.
pub fn deep_merge(base: &mut JsonMap, overrides: &JsonMap) {
    for (key, value) in overrides {
        match (base.get_mut(key), value) {
            (Some(Value::Object(nested)), Value::Object(patch)) => deep_merge(nested, patch),
            _ => {
                base.insert(key.clone(), value.clone());
            }
        }
    }
}
