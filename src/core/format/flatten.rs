use serde_json::{Map, Value};

use super::pretty_printer::repr;
use super::FormatError;

/// Flattens a mapping into a list of strings.
///
/// With `keys`, returns the values stored under those keys, in that order.
/// Without, walks the mapping depth-first and returns every leaf value.
/// Strings are returned as-is, everything else in repr form.
pub fn value_to_list(value: &Value, keys: Option<&[&str]>) -> Result<Vec<String>, FormatError> {
    let map = value.as_object().ok_or(FormatError::NotAMapping)?;

    match keys {
        Some(keys) => keys
            .iter()
            .map(|key| {
                map.get(*key)
                    .map(display)
                    .ok_or_else(|| FormatError::MissingKey((*key).to_string()))
            })
            .collect(),
        None => {
            let mut out = Vec::new();
            collect_leaves(map, &mut out);
            Ok(out)
        }
    }
}

fn collect_leaves(map: &Map<String, Value>, out: &mut Vec<String>) {
    for value in map.values() {
        match value {
            Value::Object(inner) => collect_leaves(inner, out),
            other => out.push(display(other)),
        }
    }
}

fn display(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => repr(other),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_projection_keeps_key_order() {
        let value = json!({"a": 1, "b": 2, "c": 3});
        assert_eq!(
            value_to_list(&value, Some(&["a", "b"])).unwrap(),
            vec!["1", "2"]
        );
        assert_eq!(
            value_to_list(&value, Some(&["c", "a"])).unwrap(),
            vec!["3", "1"]
        );
    }

    #[test]
    fn test_missing_key_is_an_error() {
        let value = json!({"a": 1});
        assert_eq!(
            value_to_list(&value, Some(&["a", "z"])),
            Err(FormatError::MissingKey("z".to_string()))
        );
    }

    #[test]
    fn test_full_flatten_is_depth_first() {
        let value = json!({
            "title": "Budget",
            "owner": {"name": "Ana", "team": {"id": 7}},
            "tags": ["q1", "q2"],
            "done": false
        });
        assert_eq!(
            value_to_list(&value, None).unwrap(),
            vec!["Budget", "Ana", "7", "['q1', 'q2']", "False"]
        );
    }

    #[test]
    fn test_non_mapping_is_rejected() {
        assert_eq!(
            value_to_list(&json!([1, 2]), None),
            Err(FormatError::NotAMapping)
        );
    }
}
