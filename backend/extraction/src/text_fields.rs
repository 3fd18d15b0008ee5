//! Deep collector for text fields in a vision-provider response.
//!
//! Provider responses nest lines and words arbitrarily deep under
//! regions, and the shape varies across API versions. The collector
//! searches the whole value tree for a key instead of assuming any
//! particular nesting.

use serde_json::Value;

/// Collect every string value stored under a `"text"` key anywhere in
/// `body`, in depth-first discovery order.
pub fn collect_text_fields(body: &Value) -> Vec<String> {
    collect_fields(body, "text")
}

/// Collect all string values under `key` anywhere in `body`.
///
/// The walk is iterative (explicit stack) so a degenerate response
/// cannot overflow the call stack. A matching key's value is
/// collected when it is a string and is not descended into; missing
/// keys, scalar leaves, and non-string matches are skipped without
/// error. No matches yields an empty list.
pub fn collect_fields(body: &Value, key: &str) -> Vec<String> {
    let mut out = Vec::new();
    let mut stack = vec![body];

    while let Some(value) = stack.pop() {
        match value {
            Value::Object(map) => {
                // Entries pushed in reverse so they pop in map order.
                for (k, v) in map.iter().rev() {
                    if k == key {
                        if let Value::String(s) = v {
                            out.push(s.clone());
                        }
                    } else {
                        stack.push(v);
                    }
                }
            }
            Value::Array(items) => {
                for item in items.iter().rev() {
                    stack.push(item);
                }
            }
            _ => {}
        }
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn collects_from_nested_regions() {
        let body = json!({
            "language": "en",
            "regions": [{
                "lines": [
                    { "words": [{ "text": "ABCDE1234F" }, { "text": "INCOME" }] },
                    { "words": [{ "text": "TAX" }] },
                ]
            }]
        });
        assert_eq!(
            collect_text_fields(&body),
            vec!["ABCDE1234F", "INCOME", "TAX"]
        );
    }

    #[test]
    fn discovery_order_follows_array_order() {
        let body = json!([
            { "text": "first" },
            { "inner": [{ "text": "second" }] },
            { "text": "third" }
        ]);
        assert_eq!(collect_text_fields(&body), vec!["first", "second", "third"]);
    }

    #[test]
    fn tolerates_scalars_and_non_string_matches() {
        let body = json!({
            "code": 200,
            "text": 42,
            "nested": { "text": "kept", "flag": true },
            "list": [1, "two", null]
        });
        assert_eq!(collect_text_fields(&body), vec!["kept"]);
    }

    #[test]
    fn absent_key_yields_empty() {
        let body = json!({ "description": { "captions": [] } });
        assert!(collect_text_fields(&body).is_empty());
    }

    #[test]
    fn scalar_root_yields_empty() {
        assert!(collect_text_fields(&json!("just a string")).is_empty());
        assert!(collect_text_fields(&Value::Null).is_empty());
    }

    #[test]
    fn generic_key_lookup() {
        let body = json!({ "a": { "name": "x" }, "b": [{ "name": "y" }] });
        assert_eq!(collect_fields(&body, "name"), vec!["x", "y"]);
    }
}
