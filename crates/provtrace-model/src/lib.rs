//! # Provtrace Model
//!
//! Data model for provenance documents in the W3C PROV style: typed records,
//! the relations that link them, and textual renderings of the whole graph.
//!
//! ## Key Concepts
//!
//! - **Entity**: A value node (a file, a scalar, a composite datum)
//! - **Activity**: One execution of a computational step, bounded in time
//! - **Agent**: A responsible party (a person or the capturing software)
//! - **Collection**: An entity grouping other entities via `hadMember`
//! - **Document**: The container holding all records plus namespace declarations
//!
//! Documents render to PROV-N notation ([`ProvDocument::to_provn`]) and to the
//! PROV-JSON interchange form ([`ProvDocument::to_json`]). Both renderings are
//! deterministic: the same document always produces byte-identical output.

pub mod document;
pub mod literal;
pub mod namespace;
pub mod record;
pub mod relation;

mod json;
mod provn;

pub use document::ProvDocument;
pub use literal::{AttrValue, Attributes, Literal};
pub use namespace::{Namespace, QualifiedName};
pub use record::{Activity, Agent, Collection, Entity};
pub use relation::{Association, Generation, Membership, Usage};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Get the library version
pub fn version() -> &'static str {
    VERSION
}
