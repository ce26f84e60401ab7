//! YAML helpers shared by the config and template loaders.

use serde_yaml::value::TaggedValue;
use serde_yaml::Value;

/// Replace every tagged node with a plain string `"<tag> <value>"`.
///
/// Configuration files carry template intrinsics such as `!Ref` or
/// `!GetAtt`; these are kept as text instead of failing the load.
pub fn normalize_tags(value: Value) -> Value {
    match value {
        Value::Tagged(tagged) => {
            let TaggedValue { tag, value } = *tagged;
            Value::String(format!("{} {}", tag, scalar_text(normalize_tags(value))))
        }
        Value::Sequence(items) => Value::Sequence(items.into_iter().map(normalize_tags).collect()),
        Value::Mapping(mapping) => Value::Mapping(
            mapping
                .into_iter()
                .map(|(k, v)| (normalize_tags(k), normalize_tags(v)))
                .collect(),
        ),
        other => other,
    }
}

/// Text form of a node: scalars verbatim, collections as compact JSON.
fn scalar_text(value: Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => n.to_string(),
        Value::String(s) => s,
        other => serde_json::to_string(&other).unwrap_or_default(),
    }
}

/// Name of a mapping key as used in parameter comparisons.
pub fn key_name(key: &Value) -> String {
    match key {
        Value::String(s) => s.clone(),
        other => scalar_text(normalize_tags(other.clone())),
    }
}
