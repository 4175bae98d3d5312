use serde_json::{Map, Value};

/// Directional deep merge of `src` into `dest`.
///
/// Where `dest` holds an object, the matching `src` object is merged into it field by
/// field (a non-object `src` value has no fields and leaves it untouched). Anywhere
/// else the `src` value replaces `dest`'s. Keys only in `dest` are kept.
pub fn deep_merge(dest: &mut Map<String, Value>, src: Map<String, Value>) {
    for (key, value) in src {
        if let Some(Value::Object(existing)) = dest.get_mut(&key) {
            if let Value::Object(incoming) = value {
                deep_merge(existing, incoming);
            }
            continue;
        }
        dest.insert(key, value);
    }
}
