//! Namespaces and qualified names

use std::fmt;

use serde::{Deserialize, Serialize};

/// A namespace declaration binding a short prefix to a base URI
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Namespace {
    /// Short prefix (e.g., "foaf")
    pub prefix: String,

    /// Base URI the prefix expands to
    pub uri: String,
}

impl Namespace {
    /// Create a new namespace declaration
    pub fn new(prefix: impl Into<String>, uri: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
            uri: uri.into(),
        }
    }

    /// Qualified name for `localpart` under this namespace
    pub fn qname(&self, localpart: impl Into<String>) -> QualifiedName {
        QualifiedName::new(self.prefix.clone(), localpart)
    }
}

/// A `prefix:localpart` name referring to a term in some namespace
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct QualifiedName {
    /// Namespace prefix
    pub prefix: String,

    /// Local part within the namespace
    pub localpart: String,
}

impl QualifiedName {
    /// Create a new qualified name
    pub fn new(prefix: impl Into<String>, localpart: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
            localpart: localpart.into(),
        }
    }

    /// Term in the reserved `prov:` vocabulary
    pub fn prov(localpart: impl Into<String>) -> Self {
        Self::new("prov", localpart)
    }

    /// Term in the reserved `xsd:` datatype vocabulary
    pub fn xsd(localpart: impl Into<String>) -> Self {
        Self::new("xsd", localpart)
    }

    /// Compact `prefix:localpart` form
    pub fn curie(&self) -> String {
        format!("{}:{}", self.prefix, self.localpart)
    }
}

impl fmt::Display for QualifiedName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.prefix, self.localpart)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_qname_display() {
        let q = QualifiedName::new("foaf", "name");
        assert_eq!(q.to_string(), "foaf:name");
        assert_eq!(q.curie(), "foaf:name");
    }

    #[test]
    fn test_reserved_vocabularies() {
        assert_eq!(QualifiedName::prov("type").to_string(), "prov:type");
        assert_eq!(QualifiedName::xsd("integer").to_string(), "xsd:integer");
    }

    #[test]
    fn test_namespace_qname() {
        let ns = Namespace::new("crypto", "http://id.loc.gov/vocabulary/preservation/cryptographicHashFunctions/");
        assert_eq!(ns.qname("sha512").to_string(), "crypto:sha512");
    }

    #[test]
    fn test_qname_ordering() {
        let a = QualifiedName::new("a", "z");
        let b = QualifiedName::new("b", "a");
        let c = QualifiedName::new("a", "a");
        assert!(c < a);
        assert!(a < b);
    }
}
