//! Content-addressed identity derivation
//!
//! Record identifiers are the MD5 hash of a canonical form of the
//! record's attributes. Strings naming existing files are replaced by
//! their content hash first, so identity follows content rather than
//! location: the same bytes at two paths, or reached twice in separate
//! runs, derive the same identifier.

use std::collections::{BTreeMap, BTreeSet};
use std::path::Path;

use serde_json::Value;
use uuid::Uuid;

use provtrace_model::{AttrValue, Attributes, QualifiedName};

use crate::config;
use crate::encode::canonical_float;
use crate::error::Result;
use crate::hash::{hash_file_md5, md5_hex};

/// Mint a fresh identifier that is not content-derived
///
/// Used for activities and collections, whose identity is the occurrence
/// itself rather than any content.
pub fn mint_id() -> QualifiedName {
    config::pid(Uuid::new_v4().simple().to_string())
}

/// Derive the content-addressed identifier for a record's attributes
///
/// Keys in `skip` are excluded from the derivation; a file entity passes
/// its location here so that identity rides on the content hash alone.
pub fn derive_attr_id(attrs: &Attributes, skip: &[QualifiedName]) -> Result<QualifiedName> {
    let skip: BTreeSet<String> = skip.iter().map(QualifiedName::curie).collect();
    let lowered: BTreeMap<String, Value> = attrs
        .iter()
        .map(|(key, value)| (key.curie(), lowered_json(value)))
        .collect();
    Ok(config::pid(hash_attrs(&lowered, &skip)?))
}

/// Attribute values lower to their lexical form for hashing
fn lowered_json(value: &AttrValue) -> Value {
    match value {
        AttrValue::Literal(lit) => Value::String(lit.value.clone()),
        AttrValue::QName(q) => Value::String(q.curie()),
    }
}

/// Stable 128-bit hash of an attribute mapping, as lowercase hex
///
/// The mapping is canonicalized, the skip-listed keys dropped, and the
/// sorted key/value pairs serialized deterministically before hashing.
pub fn hash_attrs(attrs: &BTreeMap<String, Value>, skip: &BTreeSet<String>) -> Result<String> {
    let mut pairs: Vec<(&String, Value)> = Vec::with_capacity(attrs.len());
    for (key, value) in attrs {
        if skip.contains(key) {
            continue;
        }
        pairs.push((key, canonicalize(value)?));
    }
    let serialized = serde_json::to_string(&pairs)?;
    Ok(md5_hex(serialized.as_bytes()))
}

/// Canonical form of a value for hashing
///
/// - map entries and list elements that are falsy (null, false, 0, "",
///   empty containers) are dropped, the rest recursed
/// - strings naming existing files are replaced by their MD5 content hash
/// - non-integral numbers are rendered at fixed 10-decimal precision
pub fn canonicalize(value: &Value) -> Result<Value> {
    match value {
        Value::Object(map) => {
            let mut out = serde_json::Map::new();
            for (key, val) in map {
                if is_falsy(val) {
                    continue;
                }
                out.insert(key.clone(), canonicalize(val)?);
            }
            Ok(Value::Object(out))
        }
        Value::Array(items) => {
            let mut out = Vec::new();
            for item in items {
                if is_falsy(item) {
                    continue;
                }
                out.push(canonicalize(item)?);
            }
            Ok(Value::Array(out))
        }
        Value::String(s) => {
            let path = Path::new(s);
            if path.is_file() {
                Ok(Value::String(hash_file_md5(path)?))
            } else {
                Ok(value.clone())
            }
        }
        Value::Number(n) => {
            if n.is_i64() || n.is_u64() {
                Ok(value.clone())
            } else {
                let f = n.as_f64().unwrap_or_default();
                Ok(Value::String(canonical_float(f)))
            }
        }
        _ => Ok(value.clone()),
    }
}

fn is_falsy(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::Bool(b) => !b,
        Value::Number(n) => n.as_f64() == Some(0.0),
        Value::String(s) => s.is_empty(),
        Value::Array(items) => items.is_empty(),
        Value::Object(map) => map.is_empty(),
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use serde_json::json;
    use tempfile::NamedTempFile;

    use super::*;

    fn hash_of(value: Value) -> String {
        let attrs = BTreeMap::from([("k".to_string(), value)]);
        hash_attrs(&attrs, &BTreeSet::new()).unwrap()
    }

    #[test]
    fn test_mint_id_is_unique() {
        let a = mint_id();
        let b = mint_id();
        assert_eq!(a.prefix, "pid");
        assert_eq!(a.localpart.len(), 32);
        assert_ne!(a, b);
    }

    #[test]
    fn test_hash_is_deterministic() {
        let attrs = BTreeMap::from([
            ("b".to_string(), json!("two")),
            ("a".to_string(), json!(1)),
        ]);
        let skip = BTreeSet::new();
        assert_eq!(hash_attrs(&attrs, &skip).unwrap(), hash_attrs(&attrs, &skip).unwrap());
    }

    #[test]
    fn test_skip_keys_do_not_contribute() {
        let base = BTreeMap::from([("a".to_string(), json!(1))]);
        let mut extended = base.clone();
        extended.insert("transient".to_string(), json!("anything"));

        let skip = BTreeSet::from(["transient".to_string()]);
        assert_eq!(
            hash_attrs(&base, &BTreeSet::new()).unwrap(),
            hash_attrs(&extended, &skip).unwrap()
        );
    }

    #[test]
    fn test_file_content_replaces_path() {
        let mut one = NamedTempFile::new().unwrap();
        one.write_all(b"same bytes").unwrap();
        let mut two = NamedTempFile::new().unwrap();
        two.write_all(b"same bytes").unwrap();

        let h1 = hash_of(json!(one.path().to_str().unwrap()));
        let h2 = hash_of(json!(two.path().to_str().unwrap()));
        assert_eq!(h1, h2);

        let mut other = NamedTempFile::new().unwrap();
        other.write_all(b"different bytes").unwrap();
        assert_ne!(h1, hash_of(json!(other.path().to_str().unwrap())));
    }

    #[test]
    fn test_falsy_entries_dropped() {
        let canonical = canonicalize(&json!({
            "keep": 1,
            "zero": 0,
            "empty": "",
            "none": null,
            "off": false,
            "list": [1, null, 2, "", 3],
        }))
        .unwrap();

        assert_eq!(canonical, json!({ "keep": 1, "list": [1, 2, 3] }));
    }

    #[test]
    fn test_floats_canonicalized() {
        let canonical = canonicalize(&json!({ "x": 0.1 })).unwrap();
        assert_eq!(canonical, json!({ "x": "0.1000000000" }));
    }

    #[test]
    fn test_integers_untouched() {
        let canonical = canonicalize(&json!({ "x": 42 })).unwrap();
        assert_eq!(canonical, json!({ "x": 42 }));
    }

    #[test]
    fn test_derive_attr_id_lowers_values() {
        use provtrace_model::Literal;

        let attrs = Attributes::new()
            .with(QualifiedName::prov("label"), Literal::string("demo"))
            .with(QualifiedName::prov("type"), QualifiedName::prov("Person"));
        let id = derive_attr_id(&attrs, &[]).unwrap();
        assert_eq!(id.prefix, "pid");

        // same attributes, same id
        let again = derive_attr_id(&attrs, &[]).unwrap();
        assert_eq!(id, again);
    }

    #[test]
    fn test_derive_attr_id_skip() {
        use provtrace_model::Literal;

        let base = Attributes::new().with(QualifiedName::prov("label"), Literal::string("demo"));
        let extended = base
            .clone()
            .with(QualifiedName::prov("location"), Literal::string("/tmp/somewhere"));

        let id_base = derive_attr_id(&base, &[]).unwrap();
        let id_skipped = derive_attr_id(&extended, &[QualifiedName::prov("location")]).unwrap();
        assert_eq!(id_base, id_skipped);
    }
}
