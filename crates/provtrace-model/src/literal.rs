//! Typed literals and record attributes

use serde::{Deserialize, Serialize};

use crate::namespace::QualifiedName;

/// A typed literal: a lexical form paired with an XSD datatype
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Literal {
    /// Lexical form of the value
    pub value: String,

    /// Datatype of the literal (e.g., `xsd:string`)
    pub datatype: QualifiedName,
}

impl Literal {
    /// Create a literal with an explicit datatype
    pub fn new(value: impl Into<String>, datatype: QualifiedName) -> Self {
        Self {
            value: value.into(),
            datatype,
        }
    }

    /// Create an `xsd:string` literal
    pub fn string(value: impl Into<String>) -> Self {
        Self::new(value, QualifiedName::xsd("string"))
    }

    /// Create an `xsd:integer` literal
    pub fn integer(value: i64) -> Self {
        Self::new(value.to_string(), QualifiedName::xsd("integer"))
    }

    /// Create an `xsd:boolean` literal
    pub fn boolean(value: bool) -> Self {
        Self::new(value.to_string(), QualifiedName::xsd("boolean"))
    }

    /// Create an `xsd:anyURI` literal
    pub fn any_uri(value: impl Into<String>) -> Self {
        Self::new(value, QualifiedName::xsd("anyURI"))
    }
}

/// An attribute value: either a typed literal or a reference to a
/// vocabulary term
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AttrValue {
    /// A typed literal value
    Literal(Literal),
    /// A qualified name referring to a term
    QName(QualifiedName),
}

impl AttrValue {
    /// The literal carried by this value, if it is one
    pub fn as_literal(&self) -> Option<&Literal> {
        match self {
            AttrValue::Literal(lit) => Some(lit),
            AttrValue::QName(_) => None,
        }
    }

    /// The qualified name carried by this value, if it is one
    pub fn as_qname(&self) -> Option<&QualifiedName> {
        match self {
            AttrValue::Literal(_) => None,
            AttrValue::QName(q) => Some(q),
        }
    }
}

impl From<Literal> for AttrValue {
    fn from(lit: Literal) -> Self {
        AttrValue::Literal(lit)
    }
}

impl From<QualifiedName> for AttrValue {
    fn from(q: QualifiedName) -> Self {
        AttrValue::QName(q)
    }
}

/// Attribute list attached to a record, in insertion order
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Attributes(Vec<(QualifiedName, AttrValue)>);

impl Attributes {
    /// Create an empty attribute list
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an attribute, builder style
    pub fn with(mut self, key: QualifiedName, value: impl Into<AttrValue>) -> Self {
        self.insert(key, value);
        self
    }

    /// Add an attribute
    pub fn insert(&mut self, key: QualifiedName, value: impl Into<AttrValue>) {
        self.0.push((key, value.into()));
    }

    /// Look up the first attribute with the given key
    pub fn get(&self, key: &QualifiedName) -> Option<&AttrValue> {
        self.0.iter().find(|(k, _)| k == key).map(|(_, v)| v)
    }

    /// Number of attributes
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether the list is empty
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterate over attributes in insertion order
    pub fn iter(&self) -> impl Iterator<Item = &(QualifiedName, AttrValue)> {
        self.0.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_literal_constructors() {
        assert_eq!(Literal::string("hi").datatype, QualifiedName::xsd("string"));
        assert_eq!(Literal::integer(-3).value, "-3");
        assert_eq!(Literal::boolean(true).value, "true");
        assert_eq!(Literal::any_uri("file://h/p").datatype, QualifiedName::xsd("anyURI"));
    }

    #[test]
    fn test_attributes_builder() {
        let attrs = Attributes::new()
            .with(QualifiedName::prov("label"), Literal::string("demo"))
            .with(QualifiedName::prov("type"), QualifiedName::new("ex", "Thing"));

        assert_eq!(attrs.len(), 2);
        let label = attrs.get(&QualifiedName::prov("label"));
        assert_eq!(label.and_then(AttrValue::as_literal).map(|l| l.value.as_str()), Some("demo"));
        let ty = attrs.get(&QualifiedName::prov("type"));
        assert_eq!(ty.and_then(AttrValue::as_qname).map(QualifiedName::curie), Some("ex:Thing".into()));
    }

    #[test]
    fn test_insertion_order_preserved() {
        let attrs = Attributes::new()
            .with(QualifiedName::new("z", "last"), Literal::string("1"))
            .with(QualifiedName::new("a", "first"), Literal::string("2"));

        let keys: Vec<&str> = attrs.iter().map(|(k, _)| k.localpart.as_str()).collect();
        assert_eq!(keys, ["last", "first"]);
    }
}
