//! Key case conversion between snake_case and camelCase.
//!
//! Only object keys are rewritten; string values, numbers and the shape of
//! the value are left as they are. Keys that are entirely upper-case
//! (`"API_KEY"`) or purely numeric (`"200"`) are never touched.
//!
//! The conversion is lossy for a few key shapes and these are not corrected:
//! consecutive single-letter segments (`x_y_z` -> `xYZ` -> `x_yz`) and
//! segments starting with a digit (`item_2` -> `item2` -> `item2`).

use serde_json::{Map, Value};

/// Recursively camelize every object key of `value`.
pub fn to_camel(value: &Value) -> Value {
    convert_keys(value, camelize)
}

/// Recursively snake_case every object key of `value`.
pub fn to_snake(value: &Value) -> Value {
    convert_keys(value, decamelize)
}

fn convert_keys(value: &Value, convert: fn(&str) -> String) -> Value {
    match value {
        Value::Object(map) => Value::Object(
            map.iter()
                .map(|(key, inner)| (convert(key), convert_keys(inner, convert)))
                .collect::<Map<String, Value>>(),
        ),
        Value::Array(items) => {
            Value::Array(items.iter().map(|item| convert_keys(item, convert)).collect())
        }
        other => other.clone(),
    }
}

/// Convert a single snake_case (or kebab-case) key to camelCase.
///
/// A run of `_` / `-` that follows a word character is dropped and the next
/// character is upper-cased. Leading and trailing separators are kept, and
/// the first character keeps its case, so `"Error"` stays `"Error"`.
pub fn camelize(key: &str) -> String {
    if is_upper(key) || is_numeric(key) {
        return key.to_string();
    }

    let chars: Vec<char> = key.chars().collect();
    let mut out = String::with_capacity(key.len());
    let mut i = 0;
    while i < chars.len() {
        let c = chars[i];
        if is_separator(c) && i > 0 && !is_separator(chars[i - 1]) {
            let start = i;
            while i < chars.len() && is_separator(chars[i]) {
                i += 1;
            }
            match chars.get(i) {
                Some(next) => {
                    out.extend(next.to_uppercase());
                    i += 1;
                }
                None => out.extend(&chars[start..]),
            }
            continue;
        }
        out.push(c);
        i += 1;
    }
    out
}

/// Convert a single camelCase key to snake_case.
///
/// An underscore is inserted before every upper-case letter that starts a
/// word: one preceded by a lower-case letter or a digit, or the last letter
/// of an acronym that is followed by a lower-case letter
/// (`"HTTPResponse"` -> `"http_response"`).
pub fn decamelize(key: &str) -> String {
    if is_upper(key) || is_numeric(key) {
        return key.to_string();
    }

    let chars: Vec<char> = key.chars().collect();
    let mut out = String::with_capacity(key.len() + 4);
    for (i, &c) in chars.iter().enumerate() {
        if c.is_uppercase() && i > 0 {
            let prev = chars[i - 1];
            let next_is_lower = chars.get(i + 1).is_some_and(|n| n.is_lowercase());
            if prev.is_lowercase() || prev.is_ascii_digit() || (prev.is_uppercase() && next_is_lower) {
                out.push('_');
            }
        }
        out.extend(c.to_lowercase());
    }
    out
}

fn is_separator(c: char) -> bool {
    c == '_' || c == '-'
}

fn is_upper(key: &str) -> bool {
    key.chars().any(char::is_uppercase) && !key.chars().any(char::is_lowercase)
}

fn is_numeric(key: &str) -> bool {
    !key.is_empty() && key.chars().all(char::is_numeric)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn camelize_keeps_leading_separators() {
        assert_eq!(camelize("_private_field"), "_privateField");
        assert_eq!(camelize("trailing_"), "trailing_");
    }

    #[test]
    fn camelize_collapses_separator_runs() {
        assert_eq!(camelize("a__b"), "aB");
        assert_eq!(camelize("content-type"), "contentType");
    }

    #[test]
    fn decamelize_splits_acronyms() {
        assert_eq!(decamelize("HTTPResponse"), "http_response");
        assert_eq!(decamelize("userID"), "user_id");
        assert_eq!(decamelize("item2Id"), "item2_id");
    }
}
