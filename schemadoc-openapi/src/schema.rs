//! Schema fragment generation.
//!
//! A fragment is the JSON Schema of one model, as produced by `schemars`,
//! with its `$ref`s pointing at the document's component table. Sub-schemas
//! the model references travel alongside in a `definitions` side-table until
//! [`split_definitions`] pops them off.

use schemadoc_core::casing::camelize;
use schemadoc_core::{ModelType, SerializationConfig};
use schemars::generate::SchemaSettings;
use serde_json::{Map, Value};

use crate::error::SchemaError;

/// Stable prefix of every `$ref` in the generated document.
pub const REF_PREFIX: &str = "#/components/schemas/";

/// Prefix `schemars` uses for the definitions it collects under `definitions`.
const LOCAL_REF_PREFIX: &str = "#/definitions/";

/// OpenAPI 3.0 generator settings, collecting sub-schemas under `definitions`.
pub fn schema_settings() -> SchemaSettings {
    SchemaSettings::openapi3().with(|settings| {
        settings.definitions_path = "/definitions".into();
    })
}

/// Generate the fragment for `model`, with references under `ref_prefix`.
///
/// A model that refers to itself gets its root schema moved into the
/// definitions under its own name, and the fragment becomes a `$ref` to it.
///
/// With casing conversion enabled, the fragment and its definitions are
/// camelized as a whole. Reference targets and `required` entries follow the
/// same conversion so they keep matching the converted keys.
pub fn generate(
    model: &ModelType,
    ref_prefix: &str,
    serialization: &SerializationConfig,
) -> Result<Value, SchemaError> {
    let root = model.root_schema(schema_settings().into_generator());
    let mut fragment = serde_json::to_value(root)?;

    let Some(object) = fragment.as_object_mut() else {
        return Err(SchemaError::NotAnObject(model.name().into_owned()));
    };
    object.shift_remove("$schema");

    let name = model.name();
    let local_ref = format!("{LOCAL_REF_PREFIX}{name}");
    if retarget_root_refs(&mut fragment, &local_ref) {
        fragment = hoist_root(fragment, &name, local_ref);
    }

    rewrite_refs(&mut fragment, ref_prefix);
    if serialization.convert_casing {
        fragment = camelize_schema(&fragment, ref_prefix);
    }
    Ok(fragment)
}

/// Pop the `definitions` side-table off `fragment`.
///
/// Returns `(definitions, remainder)`; definitions default to empty and the
/// remainder keeps its key order.
pub fn split_definitions(mut fragment: Value) -> (Map<String, Value>, Value) {
    let definitions = match fragment.as_object_mut().and_then(|obj| obj.shift_remove("definitions")) {
        Some(Value::Object(definitions)) => definitions,
        _ => Map::new(),
    };
    (definitions, fragment)
}

/// Point every root reference (`"$ref": "#"`) at `target`. Returns whether
/// any was found.
fn retarget_root_refs(value: &mut Value, target: &str) -> bool {
    match value {
        Value::Object(obj) => {
            let mut found = false;
            if let Some(Value::String(reference)) = obj.get_mut("$ref") {
                if reference.as_str() == "#" {
                    *reference = target.to_string();
                    found = true;
                }
            }
            for (_, v) in obj.iter_mut() {
                found |= retarget_root_refs(v, target);
            }
            found
        }
        Value::Array(items) => items
            .iter_mut()
            .fold(false, |found, v| retarget_root_refs(v, target) | found),
        _ => false,
    }
}

/// Move the root schema into `definitions[name]` and leave a `$ref` to it.
fn hoist_root(fragment: Value, name: &str, local_ref: String) -> Value {
    let mut root = match fragment {
        Value::Object(root) => root,
        other => return other,
    };
    let mut definitions = match root.shift_remove("definitions") {
        Some(Value::Object(definitions)) => definitions,
        _ => Map::new(),
    };
    definitions.insert(name.to_string(), Value::Object(root));

    let mut hoisted = Map::new();
    hoisted.insert("$ref".into(), Value::String(local_ref));
    hoisted.insert("definitions".into(), Value::Object(definitions));
    Value::Object(hoisted)
}

/// Recursively rewrite `$ref`s from the generator's local prefix to `ref_prefix`.
fn rewrite_refs(value: &mut Value, ref_prefix: &str) {
    match value {
        Value::Object(obj) => {
            if let Some(Value::String(target)) = obj.get_mut("$ref") {
                if let Some(name) = target.strip_prefix(LOCAL_REF_PREFIX) {
                    *target = format!("{ref_prefix}{name}");
                }
            }
            for (_, v) in obj.iter_mut() {
                rewrite_refs(v, ref_prefix);
            }
        }
        Value::Array(items) => {
            for v in items.iter_mut() {
                rewrite_refs(v, ref_prefix);
            }
        }
        _ => {}
    }
}

fn camelize_schema(value: &Value, ref_prefix: &str) -> Value {
    match value {
        Value::Object(obj) => {
            let mut out = Map::with_capacity(obj.len());
            for (key, v) in obj {
                // Vendor extensions keep their spelling and content.
                if key.starts_with("x-") {
                    out.insert(key.clone(), v.clone());
                    continue;
                }
                let converted = match (key.as_str(), v) {
                    ("$ref", Value::String(target)) => match target.strip_prefix(ref_prefix) {
                        Some(name) => Value::String(format!("{ref_prefix}{}", camelize(name))),
                        None => v.clone(),
                    },
                    ("required", Value::Array(names)) if names.iter().all(Value::is_string) => {
                        Value::Array(
                            names
                                .iter()
                                .filter_map(Value::as_str)
                                .map(|name| Value::String(camelize(name)))
                                .collect(),
                        )
                    }
                    _ => camelize_schema(v, ref_prefix),
                };
                out.insert(camelize(key), converted);
            }
            Value::Object(out)
        }
        Value::Array(items) => Value::Array(
            items
                .iter()
                .map(|item| camelize_schema(item, ref_prefix))
                .collect(),
        ),
        other => other.clone(),
    }
}
