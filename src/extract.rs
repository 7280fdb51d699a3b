//! Value extraction from response payloads
//!
//! Paths are either simple dot notation (`$.data.items`, `data[0].id`,
//! `items[-1]`) or full JSONPath expressions when they contain wildcards.

use crate::error::{Error, Result};
use crate::types::JsonValue;

/// Extract the value at `path`, `None` when it does not resolve
pub fn extract_value(value: &JsonValue, path: &str) -> Result<Option<JsonValue>> {
    if path.is_empty() || path == "$" {
        return Ok(Some(value.clone()));
    }
    if path.contains('*') && !path.contains("[-") {
        return match extract_with_jsonpath(value, path)? {
            JsonValue::Null => Ok(None),
            JsonValue::Array(arr) if arr.is_empty() => Ok(None),
            found => Ok(Some(found)),
        };
    }
    Ok(extract_simple_path(value, path))
}

/// Extract records at `path` (or the whole payload when `path` is `None`).
///
/// Arrays yield their elements, a single value yields itself, and a missing
/// path yields no records.
pub fn extract_records(value: &JsonValue, path: Option<&str>) -> Result<Vec<JsonValue>> {
    let found = match path {
        Some(path) => extract_value(value, path)?,
        None => Some(value.clone()),
    };
    Ok(match found {
        Some(JsonValue::Array(arr)) => arr,
        Some(JsonValue::Null) | None => Vec::new(),
        Some(other) => vec![other],
    })
}

/// Extract a scalar at `path` as a string (cursor tokens, counts, ...)
pub fn extract_string(value: &JsonValue, path: &str) -> Result<Option<String>> {
    Ok(match extract_value(value, path)? {
        Some(JsonValue::String(s)) => Some(s),
        Some(JsonValue::Number(n)) => Some(n.to_string()),
        Some(JsonValue::Bool(b)) => Some(b.to_string()),
        _ => None,
    })
}

/// Extract a value using simple dot-notation path
fn extract_simple_path(value: &JsonValue, path: &str) -> Option<JsonValue> {
    let path = path.strip_prefix("$.").unwrap_or(path);
    let mut current = value;

    for part in path.split('.') {
        // Handle array indexing like "data[0]" or "items[-1]"
        if let Some(bracket_pos) = part.find('[') {
            let name = &part[..bracket_pos];
            let index_str = part[bracket_pos + 1..].strip_suffix(']')?;

            if !name.is_empty() {
                current = current.get(name)?;
            }

            let index = index_str.parse::<i64>().ok()?;
            let JsonValue::Array(arr) = current else {
                return None;
            };
            #[allow(clippy::cast_possible_wrap)]
            let idx = if index < 0 {
                usize::try_from(arr.len() as i64 + index).ok()?
            } else {
                usize::try_from(index).ok()?
            };
            current = arr.get(idx)?;
        } else {
            current = current.get(part)?;
        }
    }

    Some(current.clone())
}

/// Extract values using jsonpath-rust
fn extract_with_jsonpath(value: &JsonValue, path: &str) -> Result<JsonValue> {
    use jsonpath_rust::JsonPath;

    let jp = JsonPath::try_from(path).map_err(|e| Error::JsonPath {
        message: format!("Invalid JSONPath: {e}"),
    })?;

    Ok(jp.find(value))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_extract_simple_paths() {
        let body = json!({
            "data": {"items": [{"id": 1}, {"id": 2}, {"id": 3}]},
            "meta": {"next": "abc"}
        });

        assert_eq!(
            extract_value(&body, "$.meta.next").unwrap(),
            Some(json!("abc"))
        );
        assert_eq!(
            extract_value(&body, "data.items[0].id").unwrap(),
            Some(json!(1))
        );
        assert_eq!(
            extract_value(&body, "data.items[-1]").unwrap(),
            Some(json!({"id": 3}))
        );
        assert_eq!(extract_value(&body, "data.items[7]").unwrap(), None);
        assert_eq!(extract_value(&body, "missing.path").unwrap(), None);
        assert_eq!(extract_value(&body, "$").unwrap(), Some(body.clone()));
    }

    #[test]
    fn test_extract_records() {
        let body = json!({"data": [{"id": 1}, {"id": 2}], "one": {"id": 9}});

        assert_eq!(extract_records(&body, Some("$.data")).unwrap().len(), 2);
        assert_eq!(
            extract_records(&body, Some("one")).unwrap(),
            vec![json!({"id": 9})]
        );
        assert!(extract_records(&body, Some("absent")).unwrap().is_empty());
        assert_eq!(
            extract_records(&json!([1, 2, 3]), None).unwrap(),
            vec![json!(1), json!(2), json!(3)]
        );
        assert!(extract_records(&JsonValue::Null, None).unwrap().is_empty());
    }

    #[test]
    fn test_extract_records_with_wildcard() {
        let body = json!({"pages": [{"rows": [1, 2]}, {"rows": [3]}]});
        let records = extract_records(&body, Some("$.pages[*].rows")).unwrap();
        assert_eq!(records, vec![json!([1, 2]), json!([3])]);
    }

    #[test]
    fn test_extract_string() {
        let body = json!({"next": "c2", "page": 3, "done": false, "none": null});

        assert_eq!(extract_string(&body, "next").unwrap(), Some("c2".into()));
        assert_eq!(extract_string(&body, "page").unwrap(), Some("3".into()));
        assert_eq!(extract_string(&body, "done").unwrap(), Some("false".into()));
        assert_eq!(extract_string(&body, "none").unwrap(), None);
        assert_eq!(extract_string(&body, "absent").unwrap(), None);
    }
}
