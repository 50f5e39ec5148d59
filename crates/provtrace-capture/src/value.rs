//! Runtime values delivered by the execution layer

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// A runtime value handed to the capture layer
///
/// This is the closed set of shapes the encoder accepts; encoding is total
/// over it. Values the execution layer cannot express here arrive as
/// [`CaptureValue::Opaque`] carrying the reason they could not be
/// represented, and degrade to a diagnostic literal instead of failing the
/// capture.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CaptureValue {
    /// No value
    Null,
    /// Boolean
    Bool(bool),
    /// Integer
    Int(i64),
    /// Floating point number
    Float(f64),
    /// Text, possibly naming a filesystem path
    Str(String),
    /// Ordered sequence of values
    List(Vec<CaptureValue>),
    /// String-keyed mapping
    Map(BTreeMap<String, CaptureValue>),
    /// A value that could not be represented, with the reason
    Opaque(String),
}

impl From<bool> for CaptureValue {
    fn from(value: bool) -> Self {
        CaptureValue::Bool(value)
    }
}

impl From<i64> for CaptureValue {
    fn from(value: i64) -> Self {
        CaptureValue::Int(value)
    }
}

impl From<i32> for CaptureValue {
    fn from(value: i32) -> Self {
        CaptureValue::Int(value.into())
    }
}

impl From<f64> for CaptureValue {
    fn from(value: f64) -> Self {
        CaptureValue::Float(value)
    }
}

impl From<&str> for CaptureValue {
    fn from(value: &str) -> Self {
        CaptureValue::Str(value.to_string())
    }
}

impl From<String> for CaptureValue {
    fn from(value: String) -> Self {
        CaptureValue::Str(value)
    }
}

impl From<Vec<CaptureValue>> for CaptureValue {
    fn from(value: Vec<CaptureValue>) -> Self {
        CaptureValue::List(value)
    }
}

impl From<BTreeMap<String, CaptureValue>> for CaptureValue {
    fn from(value: BTreeMap<String, CaptureValue>) -> Self {
        CaptureValue::Map(value)
    }
}
