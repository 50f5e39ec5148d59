//! # Provtrace Capture
//!
//! Provenance capture for computational steps. Takes the uniform record
//! of one executed step (which interface ran, runtime facts, named input
//! and output values) and produces a W3C-PROV-style document describing
//! it, written as PROV-N text and/or PROV-JSON.
//!
//! ## Key Concepts
//!
//! - **Content addressing**: value entities derive their identifier from
//!   a canonical hash of their attributes, with file paths replaced by
//!   content hashes first, so identical content collapses to one node
//!   across ports, steps and runs
//! - **Total encoding**: every [`CaptureValue`] encodes to a literal;
//!   unrepresentable values degrade to a diagnostic, never an error
//! - **One activity per result**: each [`ExecutionResult`] becomes an
//!   activity linked to environment, input, output and runtime
//!   collections and to the responsible agents
//!
//! ```no_run
//! use std::path::Path;
//! use provtrace_capture::{write_provenance, ExecutionResult, InterfaceId, ProvFormat};
//! # fn runtime() -> provtrace_capture::RuntimeInfo { unimplemented!() }
//!
//! # fn main() -> provtrace_capture::Result<()> {
//! let result = ExecutionResult::new(InterfaceId::new("pipeline.tools", "Resample"), runtime())
//!     .with_input("in_file", "/data/subject1.nii")
//!     .with_output("out_file", "/data/subject1_resampled.nii");
//! write_provenance(&result, Path::new("provenance"), ProvFormat::All)?;
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod encode;
pub mod error;
pub mod hash;
pub mod ident;
pub mod result;
pub mod store;
pub mod value;

pub use encode::{encode_literal, encode_plain, safe_encode, EncodedValue};
pub use error::{CaptureError, Result};
pub use hash::{hash_file_md5, hash_file_sha512};
pub use ident::{derive_attr_id, hash_attrs, mint_id};
pub use result::{ExecutionResult, InterfaceId, RuntimeInfo};
pub use store::{write_provenance, ProvFormat, ProvStore};
pub use value::CaptureValue;

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Get the library version
pub fn version() -> &'static str {
    VERSION
}
