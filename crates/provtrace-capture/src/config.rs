//! Process-wide capture configuration
//!
//! Namespace bindings, the environment allow-list, the text clipping limit
//! and the local host/user identity are fixed for the lifetime of the
//! process. Everything here is immutable after first use.

use std::collections::BTreeMap;
use std::env;
use std::sync::LazyLock;

use provtrace_model::{Namespace, QualifiedName};

/// Maximum number of characters kept in a single text literal
pub const MAX_TEXT_LEN: usize = 1_024_000;

/// Marker appended to clipped text literals
pub const CLIP_MARKER: &str = "...Clipped...";

/// Label recorded for the capturing software agent
pub const SOFTWARE_LABEL: &str = "provtrace";

/// Environment variables recorded in the Environment collection
///
/// Only these names are captured; everything else in the process
/// environment is ignored.
pub const ENV_ALLOWLIST: &[&str] = &[
    "PATH",
    "FSLDIR",
    "FREESURFER_HOME",
    "ANTSPATH",
    "CAMINOPATH",
    "CLASSPATH",
    "LD_LIBRARY_PATH",
    "DYLD_LIBRARY_PATH",
    "FIX_VERTEX_AREA",
    "FSF_OUTPUT_FORMAT",
    "FSLCONFDIR",
    "FSLOUTPUTTYPE",
    "LOGNAME",
    "USER",
    "MKL_NUM_THREADS",
    "OMP_NUM_THREADS",
];

/// Namespaces declared in every capture document
///
/// `prov` and `xsd` are reserved vocabularies and are not declared here.
pub fn namespaces() -> [Namespace; 5] {
    [
        Namespace::new("provtrace", "http://provtrace.dev/terms/"),
        Namespace::new("pid", "http://provtrace.dev/id/"),
        Namespace::new("foaf", "http://xmlns.com/foaf/0.1/"),
        Namespace::new("dcterms", "http://purl.org/dc/terms/"),
        Namespace::new(
            "crypto",
            "http://id.loc.gov/vocabulary/preservation/cryptographicHashFunctions/",
        ),
    ]
}

/// Term in the domain vocabulary
pub fn domain(localpart: impl Into<String>) -> QualifiedName {
    QualifiedName::new("provtrace", localpart)
}

/// Identifier in the minting namespace
pub fn pid(localpart: impl Into<String>) -> QualifiedName {
    QualifiedName::new("pid", localpart)
}

/// Term in the FOAF vocabulary
pub fn foaf(localpart: impl Into<String>) -> QualifiedName {
    QualifiedName::new("foaf", localpart)
}

/// Term in the cryptographic hash function vocabulary
pub fn crypto(localpart: impl Into<String>) -> QualifiedName {
    QualifiedName::new("crypto", localpart)
}

static LOCAL_HOST: LazyLock<String> = LazyLock::new(|| {
    env::var("HOSTNAME")
        .or_else(|_| env::var("HOST"))
        .unwrap_or_else(|_| "localhost".to_string())
});

static LOCAL_USER: LazyLock<String> = LazyLock::new(|| {
    env::var("USER")
        .or_else(|_| env::var("LOGNAME"))
        .or_else(|_| env::var("USERNAME"))
        .unwrap_or_else(|_| "unknown".to_string())
});

static BUILD_INFO: LazyLock<BTreeMap<String, String>> = LazyLock::new(|| {
    BTreeMap::from([
        ("version".to_string(), env!("CARGO_PKG_VERSION").to_string()),
        ("os".to_string(), env::consts::OS.to_string()),
        ("arch".to_string(), env::consts::ARCH.to_string()),
    ])
});

/// Hostname used in `file://` URIs and agent attributes
pub fn local_host() -> &'static str {
    &LOCAL_HOST
}

/// Login name of the user running the capture
pub fn local_user() -> &'static str {
    &LOCAL_USER
}

/// Build facts recorded on the software agent
pub fn build_info() -> &'static BTreeMap<String, String> {
    &BUILD_INFO
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_allowlist_shape() {
        assert_eq!(ENV_ALLOWLIST.len(), 16);
        assert!(ENV_ALLOWLIST.contains(&"PATH"));
        assert!(ENV_ALLOWLIST.contains(&"USER"));
    }

    #[test]
    fn test_namespace_prefixes() {
        let prefixes: Vec<String> = namespaces().iter().map(|ns| ns.prefix.clone()).collect();
        assert_eq!(prefixes, ["provtrace", "pid", "foaf", "dcterms", "crypto"]);
    }

    #[test]
    fn test_qname_helpers() {
        assert_eq!(domain("duration").to_string(), "provtrace:duration");
        assert_eq!(pid("abc").to_string(), "pid:abc");
        assert_eq!(foaf("host").to_string(), "foaf:host");
        assert_eq!(crypto("sha512").to_string(), "crypto:sha512");
    }

    #[test]
    fn test_local_identity_nonempty() {
        assert!(!local_host().is_empty());
        assert!(!local_user().is_empty());
    }

    #[test]
    fn test_build_info_has_version() {
        assert_eq!(build_info().get("version").map(String::as_str), Some(env!("CARGO_PKG_VERSION")));
    }
}
