//! Fill-down of storage-compressed record groups.
//!
//! Ingested experiment data often arrives compressed: inside a sequence of
//! sibling records, fields whose values repeat the first record's are simply
//! omitted from the later records. Before any serialization the tree is
//! decompressed in place, copying each omitted text field forward from that
//! first ("template") record so every record in the group carries the full
//! field set.
//!
//! Only text-typed template fields propagate. Numeric and composite values
//! are never copied, and a field a later record carries itself is never
//! overwritten.
use serde_json::Value;
use tracing::debug;

/// Recursively fill omitted fields throughout a composite tree, in place.
///
/// Children are decompressed before their enclosing sequence runs its own
/// fill-down pass, so nested groups are complete before a parent reads any
/// child's field set. Leaf values and sequence entries that are neither
/// records nor sequences are left untouched. Calling this twice is the same
/// as calling it once.
pub fn decompress(node: &mut Value) {
    match node {
        Value::Array(items) => fill_group(items),
        Value::Object(record) => {
            for value in record.values_mut() {
                if value.is_array() || value.is_object() {
                    decompress(value);
                }
            }
        }
        _ => {}
    }
}

/// Run one sequence's template-group pass.
///
/// The first record element becomes the template; every later record
/// element receives the template's text fields it does not already have.
fn fill_group(items: &mut [Value]) {
    let mut template: Option<Vec<(String, Value)>> = None;
    let mut filled = 0usize;

    for item in items.iter_mut() {
        if !item.is_array() && !item.is_object() {
            continue;
        }
        decompress(item);

        if let Value::Object(record) = item {
            match &template {
                None => {
                    let fields: Vec<(String, Value)> = record
                        .iter()
                        .filter(|(_, v)| v.is_string())
                        .map(|(k, v)| (k.clone(), v.clone()))
                        .collect();
                    template = Some(fields);
                }
                Some(fields) => {
                    for (key, value) in fields {
                        if !record.contains_key(key) {
                            record.insert(key.clone(), value.clone());
                            filled += 1;
                        }
                    }
                }
            }
        }
    }

    if filled > 0 {
        debug!(filled, "restored omitted fields from template record");
    }
}
