//! Execution results delivered by the wrapper layer
//!
//! [`ExecutionResult`] is the uniform record the capture layer consumes:
//! which interface ran, the runtime facts observed around the run, and
//! the named input and output values.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use provtrace_model::ProvDocument;

use crate::value::CaptureValue;

/// Identity of the interface (tool wrapper) that ran
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InterfaceId {
    /// Dotted module path (e.g., "pipeline.tools.fsl")
    pub module: String,

    /// Interface name within the module (e.g., "SkullStrip")
    pub name: String,
}

impl InterfaceId {
    /// Create a new interface identity
    pub fn new(module: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            module: module.into(),
            name: name.into(),
        }
    }

    /// Full dotted path, `module.name`
    pub fn path(&self) -> String {
        format!("{}.{}", self.module, self.name)
    }

    /// Activity type term: each dotted segment capitalized, concatenated
    pub fn activity_type(&self) -> String {
        self.path().split('.').map(capitalize).collect()
    }
}

/// First character uppercased, the rest lowercased
fn capitalize(segment: &str) -> String {
    let mut chars = segment.chars();
    match chars.next() {
        Some(first) => first
            .to_uppercase()
            .chain(chars.flat_map(char::to_lowercase))
            .collect(),
        None => String::new(),
    }
}

/// Runtime facts observed around one execution
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RuntimeInfo {
    /// When the execution started
    pub start_time: DateTime<Utc>,

    /// When the execution ended
    pub end_time: DateTime<Utc>,

    /// Wall-clock duration in seconds
    pub duration: f64,

    /// Host the execution ran on
    pub hostname: String,

    /// Platform description (OS, release)
    pub platform: String,

    /// Version of the wrapped software
    pub version: String,

    /// Working directory of the execution
    pub cwd: String,

    /// Process environment observed at execution time
    pub environ: BTreeMap<String, String>,

    /// Exit status, when the step produced one
    pub return_code: Option<i32>,

    /// Full command line, for command-line interfaces
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cmdline: Option<String>,

    /// Resolved path of the executed command
    #[serde(skip_serializing_if = "Option::is_none")]
    pub command_path: Option<String>,

    /// Versioned dependencies of the executed command
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dependencies: Option<String>,

    /// Captured standard output
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stdout: Option<String>,

    /// Captured standard error
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stderr: Option<String>,

    /// Captured interleaved output, when streams were merged
    #[serde(skip_serializing_if = "Option::is_none")]
    pub merged: Option<String>,
}

/// The record the capture layer consumes for one executed step
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExecutionResult {
    /// Which interface ran
    pub interface: InterfaceId,

    /// Runtime facts observed around the run
    pub runtime: RuntimeInfo,

    /// Named input values
    pub inputs: BTreeMap<String, CaptureValue>,

    /// Named output values
    pub outputs: BTreeMap<String, CaptureValue>,

    /// A previously captured graph for this step, if one exists
    #[serde(skip_serializing_if = "Option::is_none")]
    pub provenance: Option<ProvDocument>,
}

impl ExecutionResult {
    /// Create a result with no inputs, outputs or prior graph
    pub fn new(interface: InterfaceId, runtime: RuntimeInfo) -> Self {
        Self {
            interface,
            runtime,
            inputs: BTreeMap::new(),
            outputs: BTreeMap::new(),
            provenance: None,
        }
    }

    /// Add a named input value
    pub fn with_input(mut self, name: impl Into<String>, value: impl Into<CaptureValue>) -> Self {
        self.inputs.insert(name.into(), value.into());
        self
    }

    /// Add a named output value
    pub fn with_output(mut self, name: impl Into<String>, value: impl Into<CaptureValue>) -> Self {
        self.outputs.insert(name.into(), value.into());
        self
    }

    /// Attach a previously captured graph
    pub fn with_provenance(mut self, document: ProvDocument) -> Self {
        self.provenance = Some(document);
        self
    }
}
