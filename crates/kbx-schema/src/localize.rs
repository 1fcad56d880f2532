//! # Reference Localization
//!
//! Rewrites relative `$ref` values to absolute local identifiers by
//! prefixing the schema directory's base URI. Network references
//! (`http...`) and already-local references (`file://...`) are left
//! untouched, which makes the rewrite idempotent: applying it twice with
//! the same base produces the same document as applying it once.

use serde_json::Value;

/// Returns a copy of `doc` with every relative `$ref` prefixed by
/// `base_uri`.
pub fn localize_refs(doc: &Value, base_uri: &str) -> Value {
    match doc {
        Value::Object(map) => {
            let mut out = serde_json::Map::with_capacity(map.len());
            for (key, value) in map {
                if key == "$ref" {
                    if let Value::String(target) = value {
                        out.insert(key.clone(), Value::String(localize_one(target, base_uri)));
                        continue;
                    }
                }
                out.insert(key.clone(), localize_refs(value, base_uri));
            }
            Value::Object(out)
        }
        Value::Array(items) => {
            Value::Array(items.iter().map(|v| localize_refs(v, base_uri)).collect())
        }
        other => other.clone(),
    }
}

fn localize_one(target: &str, base_uri: &str) -> String {
    if target.starts_with("http") || target.starts_with("file://") {
        target.to_string()
    } else {
        format!("{base_uri}{target}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    const BASE: &str = "file:///ws/schema/";

    #[test]
    fn relative_ref_gets_prefixed() {
        let doc = json!({"$ref": "subtypes/address.json"});
        let out = localize_refs(&doc, BASE);
        assert_eq!(out, json!({"$ref": "file:///ws/schema/subtypes/address.json"}));
    }

    #[test]
    fn network_ref_untouched() {
        let doc = json!({"$ref": "https://example.com/s.json"});
        assert_eq!(localize_refs(&doc, BASE), doc);
    }

    #[test]
    fn local_ref_untouched() {
        let doc = json!({"$ref": "file:///elsewhere/s.json"});
        assert_eq!(localize_refs(&doc, BASE), doc);
    }

    #[test]
    fn rewrites_refs_at_any_depth() {
        let doc = json!({
            "type": "object",
            "properties": {
                "home": {"$ref": "subtypes/address.json"},
                "jobs": {"type": "array", "items": {"$ref": "subtypes/job.json"}}
            }
        });
        let out = localize_refs(&doc, BASE);
        assert_eq!(
            out["properties"]["home"]["$ref"],
            json!("file:///ws/schema/subtypes/address.json")
        );
        assert_eq!(
            out["properties"]["jobs"]["items"]["$ref"],
            json!("file:///ws/schema/subtypes/job.json")
        );
    }

    #[test]
    fn idempotent() {
        let doc = json!({
            "properties": {
                "a": {"$ref": "subtypes/address.json"},
                "b": {"$ref": "https://example.com/s.json"}
            }
        });
        let once = localize_refs(&doc, BASE);
        let twice = localize_refs(&once, BASE);
        assert_eq!(once, twice);
    }

    #[test]
    fn non_string_ref_value_recursed_not_rewritten() {
        // A property literally named "$ref" holding a non-string is data,
        // not a reference.
        let doc = json!({"$ref": {"$ref": "subtypes/address.json"}});
        let out = localize_refs(&doc, BASE);
        assert_eq!(
            out,
            json!({"$ref": {"$ref": "file:///ws/schema/subtypes/address.json"}})
        );
    }

    #[test]
    fn scalars_and_arrays_preserved() {
        let doc = json!({"required": ["name"], "minimum": 3, "title": "Person"});
        assert_eq!(localize_refs(&doc, BASE), doc);
    }
}
