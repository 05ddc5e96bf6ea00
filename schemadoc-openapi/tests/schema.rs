use schemadoc_core::{ModelType, SerializationConfig};
use schemadoc_openapi::schema::{generate, split_definitions};
use schemadoc_openapi::REF_PREFIX;
use schemars::JsonSchema;
use serde_json::{json, Value};

/// Postal address of an owner.
#[derive(JsonSchema)]
#[allow(dead_code)]
struct HomeAddress {
    zip_code: String,
    street_name: String,
}

/// Owner of a pet.
#[derive(JsonSchema)]
#[allow(dead_code)]
struct PetOwner {
    display_name: String,
    home_address: HomeAddress,
    nick_name: Option<String>,
}

#[derive(JsonSchema)]
#[allow(dead_code)]
struct Flat {
    a: u8,
}

/// A tree node.
#[derive(JsonSchema)]
#[allow(dead_code)]
struct Node {
    label: String,
    children: Vec<Node>,
}

#[derive(JsonSchema)]
#[schemars(extend("x-rate_limit" = { "per_minute": 10 }))]
#[allow(dead_code)]
struct Throttled {
    retry_after: u32,
}

// ── Helpers ─────────────────────────────────────────────────────────────────

fn collect_refs(value: &Value, out: &mut Vec<String>) {
    match value {
        Value::Object(obj) => {
            if let Some(Value::String(target)) = obj.get("$ref") {
                out.push(target.clone());
            }
            obj.values().for_each(|v| collect_refs(v, out));
        }
        Value::Array(items) => items.iter().for_each(|v| collect_refs(v, out)),
        _ => {}
    }
}

fn refs(value: &Value) -> Vec<String> {
    let mut out = Vec::new();
    collect_refs(value, &mut out);
    out
}

fn plain() -> SerializationConfig {
    SerializationConfig::new()
}

fn camel() -> SerializationConfig {
    SerializationConfig::new().with_convert_casing(true)
}

// ── generate ────────────────────────────────────────────────────────────────

#[test]
fn fragment_has_no_meta_schema() {
    let fragment = generate(&ModelType::of::<PetOwner>(), REF_PREFIX, &plain()).unwrap();
    assert!(fragment.get("$schema").is_none());
    assert_eq!(fragment["type"], "object");
}

#[test]
fn fragment_carries_model_doc_as_description() {
    let fragment = generate(&ModelType::of::<PetOwner>(), REF_PREFIX, &plain()).unwrap();
    assert_eq!(fragment["description"], "Owner of a pet.");

    let undocumented = generate(&ModelType::of::<Flat>(), REF_PREFIX, &plain()).unwrap();
    assert!(undocumented.get("description").is_none());
}

#[test]
fn refs_use_the_component_prefix() {
    let fragment = generate(&ModelType::of::<PetOwner>(), REF_PREFIX, &plain()).unwrap();
    let targets = refs(&fragment);
    assert!(!targets.is_empty());
    assert!(targets.iter().all(|t| t == "#/components/schemas/HomeAddress"));
    assert!(fragment["definitions"]["HomeAddress"].is_object());
}

#[test]
fn custom_prefix_is_honoured() {
    let fragment = generate(&ModelType::of::<PetOwner>(), "#/x/", &plain()).unwrap();
    assert!(refs(&fragment).iter().all(|t| t == "#/x/HomeAddress"));
}

#[test]
fn property_order_follows_declaration() {
    let fragment = generate(&ModelType::of::<PetOwner>(), REF_PREFIX, &plain()).unwrap();
    let keys: Vec<&String> = fragment["properties"].as_object().unwrap().keys().collect();
    assert_eq!(keys, ["display_name", "home_address", "nick_name"]);
}

#[test]
fn casing_converts_keys_refs_and_required() {
    let fragment = generate(&ModelType::of::<PetOwner>(), REF_PREFIX, &camel()).unwrap();

    let keys: Vec<&String> = fragment["properties"].as_object().unwrap().keys().collect();
    assert_eq!(keys, ["displayName", "homeAddress", "nickName"]);
    assert_eq!(fragment["required"], json!(["displayName", "homeAddress"]));

    let address = &fragment["definitions"]["HomeAddress"];
    assert!(address["properties"]["zipCode"].is_object());
    assert_eq!(address["required"], json!(["zipCode", "streetName"]));
    assert!(refs(&fragment).iter().all(|t| t == "#/components/schemas/HomeAddress"));
}

#[test]
fn casing_keeps_schema_keywords() {
    let fragment = generate(&ModelType::of::<PetOwner>(), REF_PREFIX, &camel()).unwrap();
    assert_eq!(fragment["type"], "object");
    assert_eq!(fragment["title"], "PetOwner");
    assert_eq!(fragment["description"], "Owner of a pet.");
}

#[test]
fn casing_keeps_vendor_extensions() {
    let fragment = generate(&ModelType::of::<Throttled>(), REF_PREFIX, &camel()).unwrap();
    assert!(fragment["properties"]["retryAfter"].is_object());
    assert_eq!(fragment["x-rate_limit"], json!({ "per_minute": 10 }));
    assert!(fragment.get("xRateLimit").is_none());
}

// ── Recursive models ────────────────────────────────────────────────────────

#[test]
fn recursive_model_is_hoisted_into_definitions() {
    let fragment = generate(&ModelType::of::<Node>(), REF_PREFIX, &plain()).unwrap();
    let (definitions, rest) = split_definitions(fragment);

    assert_eq!(rest, json!({ "$ref": "#/components/schemas/Node" }));
    let node = &definitions["Node"];
    assert_eq!(node["description"], "A tree node.");
    assert_eq!(node["properties"]["children"]["items"]["$ref"], "#/components/schemas/Node");
    assert!(refs(node).iter().all(|t| t == "#/components/schemas/Node"));
}

#[test]
fn recursive_model_in_casing_mode() {
    let fragment = generate(&ModelType::of::<Node>(), REF_PREFIX, &camel()).unwrap();
    let (definitions, rest) = split_definitions(fragment);

    assert_eq!(rest["$ref"], "#/components/schemas/Node");
    assert!(definitions["Node"]["properties"]["children"].is_object());
}

#[test]
fn non_recursive_models_are_not_hoisted() {
    let fragment = generate(&ModelType::of::<PetOwner>(), REF_PREFIX, &plain()).unwrap();
    assert!(fragment.get("$ref").is_none());
    assert!(fragment["definitions"].get("PetOwner").is_none());
}

// ── split_definitions ───────────────────────────────────────────────────────

#[test]
fn split_pops_definitions() {
    let fragment = generate(&ModelType::of::<PetOwner>(), REF_PREFIX, &plain()).unwrap();
    let (definitions, rest) = split_definitions(fragment);

    assert!(definitions.contains_key("HomeAddress"));
    assert!(rest.get("definitions").is_none());
    assert!(rest["properties"].is_object());
}

#[test]
fn split_without_definitions_is_empty() {
    let (definitions, rest) = split_definitions(json!({ "type": "object", "title": "Flat" }));
    assert!(definitions.is_empty());
    assert_eq!(rest, json!({ "type": "object", "title": "Flat" }));
}

#[test]
fn split_keeps_remainder_order() {
    let (_, rest) = split_definitions(json!({
        "title": "T",
        "definitions": { "A": {} },
        "type": "object",
        "required": []
    }));
    let keys: Vec<&String> = rest.as_object().unwrap().keys().collect();
    assert_eq!(keys, ["title", "type", "required"]);
}
