//! Value encoding into provenance literals
//!
//! Encoding is total over [`CaptureValue`]: every value produces output,
//! and values that could not be represented upstream degrade to a
//! diagnostic literal rather than failing the capture.

use std::collections::BTreeMap;
use std::path::Path;

use serde_json::Value;
use tracing::debug;

use provtrace_model::{Literal, QualifiedName};

use crate::config::{self, CLIP_MARKER, MAX_TEXT_LEN};
use crate::value::CaptureValue;

/// Result of encoding a value: a typed literal, or the plain form used
/// when the value is embedded inside a composite
#[derive(Debug, Clone, PartialEq)]
pub enum EncodedValue {
    /// A typed literal
    Literal(Literal),
    /// The plain JSON form
    Plain(Value),
}

impl EncodedValue {
    /// The literal carried by this encoding, if it is one
    pub fn as_literal(&self) -> Option<&Literal> {
        match self {
            EncodedValue::Literal(lit) => Some(lit),
            EncodedValue::Plain(_) => None,
        }
    }
}

/// Encode a runtime value
///
/// With `as_literal` the result is a typed literal ready to attach to a
/// record; without it the result is the plain form composites embed.
pub fn safe_encode(value: &CaptureValue, as_literal: bool) -> EncodedValue {
    if as_literal {
        EncodedValue::Literal(encode_literal(value))
    } else {
        EncodedValue::Plain(encode_plain(value))
    }
}

/// Encode a runtime value as a typed literal
pub fn encode_literal(value: &CaptureValue) -> Literal {
    match value {
        CaptureValue::Null => Literal::string("Unknown"),
        CaptureValue::Bool(b) => Literal::boolean(*b),
        CaptureValue::Int(i) => Literal::integer(*i),
        CaptureValue::Float(f) => {
            Literal::new(canonical_float(*f), QualifiedName::xsd("double"))
        }
        CaptureValue::Str(s) => match file_uri(s) {
            Some(uri) => Literal::any_uri(uri),
            None => Literal::string(clip(s)),
        },
        CaptureValue::List(items) => Literal::string(list_json_text(items)),
        CaptureValue::Map(map) => Literal::string(map_json_text(map)),
        CaptureValue::Opaque(reason) => Literal::string(format!("Could not encode: {reason}")),
    }
}

/// Encode a runtime value in the plain form used inside composites
pub fn encode_plain(value: &CaptureValue) -> Value {
    match value {
        CaptureValue::Null => Value::String("Unknown".to_string()),
        CaptureValue::Bool(b) => Value::Bool(*b),
        CaptureValue::Int(i) => Value::from(*i),
        CaptureValue::Float(f) => Value::String(canonical_float(*f)),
        CaptureValue::Str(s) => match file_uri(s) {
            Some(uri) => Value::String(uri),
            None => Value::String(clip(s)),
        },
        CaptureValue::List(items) => Value::String(list_json_text(items)),
        CaptureValue::Map(map) => Value::String(map_json_text(map)),
        CaptureValue::Opaque(reason) => Value::String(format!("Could not encode: {reason}")),
    }
}

/// Canonical 10-decimal-place rendering of a float
pub fn canonical_float(value: f64) -> String {
    format!("{value:.10}")
}

/// `file://<host><absolute-path>` for strings naming existing paths
pub(crate) fn file_uri(s: &str) -> Option<String> {
    let path = Path::new(s);
    if !path.exists() {
        return None;
    }
    let abs = std::path::absolute(path).unwrap_or_else(|_| path.to_path_buf());
    Some(format!("file://{}{}", config::local_host(), abs.display()))
}

/// Clip oversized text, keeping the result under [`MAX_TEXT_LEN`]
fn clip(s: &str) -> String {
    if s.chars().count() <= MAX_TEXT_LEN {
        return s.to_string();
    }
    debug!(chars = s.chars().count(), "clipping oversized text literal");
    let kept: String = s.chars().take(MAX_TEXT_LEN - CLIP_MARKER.len()).collect();
    format!("{kept}{CLIP_MARKER}")
}

/// JSON text of a list
///
/// A list whose elements all share one primitive variant is serialized
/// as-is; anything else has its elements encoded plain first. Nested
/// composites therefore appear as embedded JSON strings.
fn list_json_text(items: &[CaptureValue]) -> String {
    let parts: Vec<Value> = if is_uniform_primitive(items) {
        items.iter().map(raw_json).collect()
    } else {
        items.iter().map(encode_plain).collect()
    };
    serde_json::to_string(&parts).unwrap_or_else(|_| "[]".to_string())
}

/// JSON text of a map, with every value encoded plain
fn map_json_text(map: &BTreeMap<String, CaptureValue>) -> String {
    let encoded: serde_json::Map<String, Value> = map
        .iter()
        .map(|(key, value)| (key.clone(), encode_plain(value)))
        .collect();
    serde_json::to_string(&Value::Object(encoded)).unwrap_or_else(|_| "{}".to_string())
}

/// Whether every element is the same primitive variant
fn is_uniform_primitive(items: &[CaptureValue]) -> bool {
    let Some(first) = items.first() else {
        return true;
    };
    if !matches!(
        first,
        CaptureValue::Bool(_) | CaptureValue::Int(_) | CaptureValue::Float(_) | CaptureValue::Str(_)
    ) {
        return false;
    }
    let tag = std::mem::discriminant(first);
    items.iter().all(|item| std::mem::discriminant(item) == tag)
}

/// JSON form of a primitive kept as-is by the uniformity probe
fn raw_json(value: &CaptureValue) -> Value {
    match value {
        CaptureValue::Bool(b) => Value::Bool(*b),
        CaptureValue::Int(i) => Value::from(*i),
        CaptureValue::Float(f) => Value::from(*f),
        CaptureValue::Str(s) => Value::String(s.clone()),
        other => encode_plain(other),
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use tempfile::NamedTempFile;

    use super::*;

    #[test]
    fn test_null_is_unknown() {
        assert_eq!(encode_literal(&CaptureValue::Null), Literal::string("Unknown"));
        assert_eq!(encode_plain(&CaptureValue::Null), Value::String("Unknown".into()));
    }

    #[test]
    fn test_primitives() {
        assert_eq!(encode_literal(&CaptureValue::Int(-4)), Literal::integer(-4));
        assert_eq!(encode_literal(&CaptureValue::Bool(true)), Literal::boolean(true));
        assert_eq!(
            encode_literal(&CaptureValue::Float(0.1 + 0.2)),
            Literal::new("0.3000000000", QualifiedName::xsd("double"))
        );
    }

    #[test]
    fn test_plain_string_stays_plain() {
        assert_eq!(
            encode_plain(&CaptureValue::Str("hello".into())),
            Value::String("hello".into())
        );
    }

    #[test]
    fn test_existing_path_becomes_file_uri() {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(b"data").unwrap();
        let path = file.path().to_str().unwrap().to_string();

        let lit = encode_literal(&CaptureValue::Str(path.clone()));
        assert_eq!(lit.datatype, QualifiedName::xsd("anyURI"));
        assert!(lit.value.starts_with("file://"));
        assert!(lit.value.ends_with(&path));
    }

    #[test]
    fn test_missing_path_is_plain_text() {
        let lit = encode_literal(&CaptureValue::Str("/no/such/path".into()));
        assert_eq!(lit, Literal::string("/no/such/path"));
    }

    #[test]
    fn test_oversized_text_is_clipped() {
        let text = "x".repeat(MAX_TEXT_LEN + 100);
        let lit = encode_literal(&CaptureValue::Str(text));
        assert!(lit.value.chars().count() <= MAX_TEXT_LEN);
        assert!(lit.value.ends_with(CLIP_MARKER));
    }

    #[test]
    fn test_text_at_limit_is_untouched() {
        let text = "y".repeat(MAX_TEXT_LEN);
        let lit = encode_literal(&CaptureValue::Str(text.clone()));
        assert_eq!(lit.value, text);
    }

    #[test]
    fn test_uniform_list_kept_raw() {
        let value = CaptureValue::List(vec![
            CaptureValue::Int(1),
            CaptureValue::Int(2),
            CaptureValue::Int(3),
        ]);
        assert_eq!(encode_literal(&value), Literal::string("[1,2,3]"));
    }

    #[test]
    fn test_mixed_list_encoded_elementwise() {
        let value = CaptureValue::List(vec![
            CaptureValue::Int(1),
            CaptureValue::Null,
        ]);
        assert_eq!(encode_literal(&value), Literal::string("[1,\"Unknown\"]"));
    }

    #[test]
    fn test_map_is_canonical_json() {
        let value = CaptureValue::Map(
            [
                ("b".to_string(), CaptureValue::Int(2)),
                ("a".to_string(), CaptureValue::Int(1)),
            ]
            .into(),
        );
        assert_eq!(encode_literal(&value), Literal::string("{\"a\":1,\"b\":2}"));
    }

    #[test]
    fn test_nested_map_embeds_as_string() {
        let inner = CaptureValue::Map([("k".to_string(), CaptureValue::Int(1))].into());
        let outer = CaptureValue::Map([("nested".to_string(), inner)].into());
        assert_eq!(
            encode_literal(&outer),
            Literal::string("{\"nested\":\"{\\\"k\\\":1}\"}")
        );
    }

    #[test]
    fn test_opaque_becomes_diagnostic() {
        let value = CaptureValue::Opaque("unpicklable handle".into());
        assert_eq!(
            encode_literal(&value),
            Literal::string("Could not encode: unpicklable handle")
        );
    }

    #[test]
    fn test_float_encoding_is_stable() {
        let a = encode_literal(&CaptureValue::Float(1.0 / 3.0));
        let b = encode_literal(&CaptureValue::Float(1.0 / 3.0));
        assert_eq!(a, b);
        assert_eq!(a.value, "0.3333333333");
    }

    #[test]
    fn test_safe_encode_modes() {
        let lit = safe_encode(&CaptureValue::Int(5), true);
        assert_eq!(lit.as_literal().map(|l| l.value.as_str()), Some("5"));

        let plain = safe_encode(&CaptureValue::Int(5), false);
        assert_eq!(plain, EncodedValue::Plain(Value::from(5)));
    }
}
