//! Graph construction and output writing
//!
//! [`ProvStore`] turns [`ExecutionResult`]s into a provenance document:
//! one activity per result, collections for environment, inputs, outputs
//! and runtime streams, content-addressed entities for the values, and
//! agents for the user and the capturing software.

use std::fmt;
use std::fs::File;
use std::io::Write as _;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use provtrace_model::{Attributes, Literal, ProvDocument, QualifiedName};

use crate::config::{self, ENV_ALLOWLIST, SOFTWARE_LABEL};
use crate::encode::encode_literal;
use crate::error::{CaptureError, Result};
use crate::hash::hash_file_sha512;
use crate::ident::{derive_attr_id, mint_id};
use crate::result::ExecutionResult;
use crate::value::CaptureValue;

/// Output representations a document can be written in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProvFormat {
    /// PROV-N text notation (`.provn`)
    Provn,
    /// PROV-JSON interchange form (`.json`)
    Json,
    /// Both representations
    All,
}

impl ProvFormat {
    fn includes_provn(self) -> bool {
        matches!(self, ProvFormat::Provn | ProvFormat::All)
    }

    fn includes_json(self) -> bool {
        matches!(self, ProvFormat::Json | ProvFormat::All)
    }
}

impl fmt::Display for ProvFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProvFormat::Provn => write!(f, "provn"),
            ProvFormat::Json => write!(f, "json"),
            ProvFormat::All => write!(f, "all"),
        }
    }
}

impl FromStr for ProvFormat {
    type Err = CaptureError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "provn" => Ok(ProvFormat::Provn),
            "json" => Ok(ProvFormat::Json),
            "all" => Ok(ProvFormat::All),
            other => Err(CaptureError::UnsupportedFormat(other.to_string())),
        }
    }
}

/// Accumulates a provenance document across execution results
#[derive(Debug, Clone)]
pub struct ProvStore {
    document: ProvDocument,
}

impl ProvStore {
    /// Create a store with the standard namespaces declared
    pub fn new() -> Self {
        let mut document = ProvDocument::new();
        for namespace in config::namespaces() {
            document.add_namespace(namespace);
        }
        Self { document }
    }

    /// The accumulated document
    pub fn document(&self) -> &ProvDocument {
        &self.document
    }

    /// Consume the store, returning the document
    pub fn into_document(self) -> ProvDocument {
        self.document
    }

    /// Add one execution result to the document
    ///
    /// With `keep_provenance`, a prior graph attached to the result
    /// replaces the document wholesale and nothing is re-derived.
    pub fn add_result(
        &mut self,
        result: &ExecutionResult,
        keep_provenance: bool,
    ) -> Result<&ProvDocument> {
        if keep_provenance {
            if let Some(prior) = &result.provenance {
                self.document = prior.clone();
                return Ok(&self.document);
            }
        }

        let runtime = &result.runtime;
        let interface = &result.interface;

        let mut activity_attrs = Attributes::new()
            .with(config::domain("module"), Literal::string(&interface.module))
            .with(config::domain("interface"), Literal::string(&interface.name))
            .with(QualifiedName::prov("type"), config::domain(interface.activity_type()))
            .with(QualifiedName::prov("label"), Literal::string(&interface.name))
            .with(
                config::domain("duration"),
                encode_literal(&CaptureValue::Float(runtime.duration)),
            )
            .with(
                config::domain("workingDirectory"),
                encode_literal(&CaptureValue::Str(runtime.cwd.clone())),
            )
            .with(
                config::domain("returnCode"),
                encode_literal(&match runtime.return_code {
                    Some(code) => CaptureValue::Int(code.into()),
                    None => CaptureValue::Null,
                }),
            )
            .with(
                config::domain("platform"),
                encode_literal(&CaptureValue::Str(runtime.platform.clone())),
            )
            .with(
                config::domain("version"),
                encode_literal(&CaptureValue::Str(runtime.version.clone())),
            )
            .with(config::foaf("host"), Literal::any_uri(&runtime.hostname));
        if let Some(cmdline) = &runtime.cmdline {
            activity_attrs.insert(
                config::domain("command"),
                encode_literal(&CaptureValue::Str(cmdline.clone())),
            );
        }
        if let Some(command_path) = &runtime.command_path {
            activity_attrs.insert(
                config::domain("commandPath"),
                encode_literal(&CaptureValue::Str(command_path.clone())),
            );
        }
        if let Some(dependencies) = &runtime.dependencies {
            activity_attrs.insert(
                config::domain("dependencies"),
                encode_literal(&CaptureValue::Str(dependencies.clone())),
            );
        }
        let activity = self.document.activity(
            mint_id(),
            runtime.start_time,
            runtime.end_time,
            activity_attrs,
        );

        // environment
        let environment = self.document.collection(
            mint_id(),
            Attributes::new()
                .with(QualifiedName::prov("type"), config::domain("Environment"))
                .with(QualifiedName::prov("label"), Literal::string("Environment")),
        );
        self.document.used(activity.clone(), environment.clone(), Attributes::new());
        for (key, value) in &runtime.environ {
            if !ENV_ALLOWLIST.contains(&key.as_str()) {
                continue;
            }
            let attrs = Attributes::new()
                .with(QualifiedName::prov("label"), Literal::string(key))
                .with(config::domain("environmentVariable"), Literal::string(key))
                .with(
                    QualifiedName::prov("value"),
                    encode_literal(&CaptureValue::Str(value.clone())),
                );
            let id = derive_attr_id(&attrs, &[])?;
            self.document.entity(id.clone(), attrs);
            self.document.had_member(environment.clone(), id);
        }

        // inputs
        if !result.inputs.is_empty() {
            let inputs = self.document.collection(
                mint_id(),
                Attributes::new()
                    .with(QualifiedName::prov("type"), config::domain("Inputs"))
                    .with(QualifiedName::prov("label"), Literal::string("Inputs")),
            );
            for (name, value) in &result.inputs {
                let entity = self.encode_entity(value)?;
                self.document.had_member(inputs.clone(), entity.clone());
                let used_attrs = Attributes::new()
                    .with(QualifiedName::prov("label"), Literal::string(name))
                    .with(config::domain("inPort"), Literal::string(name));
                self.document.used(activity.clone(), entity, used_attrs);
            }
        }

        // outputs
        if !result.outputs.is_empty() {
            let outputs = self.document.collection(
                mint_id(),
                Attributes::new()
                    .with(QualifiedName::prov("type"), config::domain("Outputs"))
                    .with(QualifiedName::prov("label"), Literal::string("Outputs")),
            );
            self.document
                .was_generated_by(outputs.clone(), activity.clone(), Attributes::new());
            for (name, value) in &result.outputs {
                let entity = self.encode_entity(value)?;
                self.document.had_member(outputs.clone(), entity.clone());
                let gen_attrs = Attributes::new()
                    .with(QualifiedName::prov("label"), Literal::string(name))
                    .with(config::domain("outPort"), Literal::string(name));
                self.document.was_generated_by(entity, activity.clone(), gen_attrs);
            }
        }

        // runtime streams
        let streams = self.document.collection(
            mint_id(),
            Attributes::new()
                .with(QualifiedName::prov("type"), config::domain("Runtime"))
                .with(QualifiedName::prov("label"), Literal::string("RuntimeInfo")),
        );
        self.document
            .was_generated_by(streams.clone(), activity.clone(), Attributes::new());
        for (key, text) in [
            ("merged", &runtime.merged),
            ("stderr", &runtime.stderr),
            ("stdout", &runtime.stdout),
        ] {
            let Some(text) = text else { continue };
            if text.is_empty() {
                continue;
            }
            let attrs = Attributes::new()
                .with(QualifiedName::prov("label"), Literal::string(key))
                .with(config::domain(key), encode_literal(&CaptureValue::Str(text.clone())));
            let id = self.document.entity(mint_id(), attrs);
            self.document.had_member(streams.clone(), id);
        }

        // agents
        let user = config::local_user();
        let user_attrs = Attributes::new()
            .with(QualifiedName::prov("type"), QualifiedName::prov("Person"))
            .with(QualifiedName::prov("label"), Literal::string(user))
            .with(
                config::foaf("name"),
                encode_literal(&CaptureValue::Str(user.to_string())),
            );
        let user_id = derive_attr_id(&user_attrs, &[])?;
        let user_agent = self.document.agent(user_id, user_attrs);

        let mut software_attrs = Attributes::new()
            .with(QualifiedName::prov("type"), QualifiedName::prov("SoftwareAgent"))
            .with(QualifiedName::prov("label"), Literal::string(SOFTWARE_LABEL))
            .with(
                config::foaf("name"),
                encode_literal(&CaptureValue::Str(SOFTWARE_LABEL.to_string())),
            );
        for (key, value) in config::build_info() {
            software_attrs.insert(
                config::domain(key.clone()),
                encode_literal(&CaptureValue::Str(value.clone())),
            );
        }
        let software_id = derive_attr_id(&software_attrs, &[])?;
        let software_agent = self.document.agent(software_id, software_attrs);

        self.document.was_associated_with(
            activity.clone(),
            user_agent,
            Attributes::new().with(QualifiedName::prov("hadRole"), config::domain("LoggedInUser")),
        );
        self.document
            .was_associated_with(activity.clone(), software_agent, Attributes::new());

        debug!(activity = %activity, interface = %interface.path(), "captured execution result");
        Ok(&self.document)
    }

    /// Encode a value as a graph entity, returning its identifier
    ///
    /// Multi-element groups become a collection of member entities when
    /// every element is itself a group or an existing file; any other
    /// group is flattened to a single entity.
    fn encode_entity(&mut self, value: &CaptureValue) -> Result<QualifiedName> {
        if let CaptureValue::List(items) = value {
            return match items.len() {
                0 => self.encode_leaf(value),
                1 => self.encode_entity(&items[0]),
                _ if is_file_group(items) => {
                    let members: Vec<QualifiedName> = items
                        .iter()
                        .map(|item| self.encode_entity(item))
                        .collect::<Result<_>>()?;
                    let collection = self.document.collection(mint_id(), Attributes::new());
                    for member in members {
                        self.document.had_member(collection.clone(), member);
                    }
                    Ok(collection)
                }
                _ => {
                    debug!("value group is not all files; flattening to one entity");
                    self.encode_leaf(value)
                }
            };
        }
        self.encode_leaf(value)
    }

    /// Encode a value as a single entity
    ///
    /// Existing paths additionally carry `prov:location`, and files a
    /// `crypto:sha512` digest; file identity is derived from the digest
    /// alone, directory identity from the location URI.
    fn encode_leaf(&mut self, value: &CaptureValue) -> Result<QualifiedName> {
        let encoded = encode_literal(value);
        let mut attrs = Attributes::new().with(QualifiedName::prov("value"), encoded.clone());

        let id = match value {
            CaptureValue::Str(s) if Path::new(s).exists() => {
                attrs.insert(QualifiedName::prov("location"), encoded);
                let path = Path::new(s);
                if path.is_dir() {
                    derive_attr_id(&attrs, &[QualifiedName::prov("location")])?
                } else {
                    let digest = hash_file_sha512(path)?;
                    attrs.insert(config::crypto("sha512"), Literal::string(digest));
                    derive_attr_id(
                        &attrs,
                        &[QualifiedName::prov("location"), QualifiedName::prov("value")],
                    )?
                }
            }
            _ => derive_attr_id(&attrs, &[])?,
        };

        Ok(self.document.entity(id, attrs))
    }

    /// Write the document next to `prefix`, one file per representation
    ///
    /// `<prefix>.provn` and/or `<prefix>.json` depending on `format`.
    pub fn write(&self, prefix: &Path, format: ProvFormat) -> Result<()> {
        if format.includes_provn() {
            write_text(&append_extension(prefix, "provn"), &self.document.to_provn())?;
        }
        if format.includes_json() {
            let json = serde_json::to_string_pretty(&self.document.to_json())?;
            write_text(&append_extension(prefix, "json"), &json)?;
        }
        Ok(())
    }
}

impl Default for ProvStore {
    fn default() -> Self {
        Self::new()
    }
}

/// Capture one result and write it out, returning the document
pub fn write_provenance(
    result: &ExecutionResult,
    prefix: &Path,
    format: ProvFormat,
) -> Result<ProvDocument> {
    let mut store = ProvStore::new();
    store.add_result(result, false)?;
    store.write(prefix, format)?;
    Ok(store.into_document())
}

/// Whether every element is a nested group or an existing file
fn is_file_group(items: &[CaptureValue]) -> bool {
    items.iter().all(|item| match item {
        CaptureValue::List(_) => true,
        CaptureValue::Str(s) => Path::new(s).exists(),
        _ => false,
    })
}

fn append_extension(prefix: &Path, ext: &str) -> PathBuf {
    let mut name = prefix.as_os_str().to_os_string();
    name.push(".");
    name.push(ext);
    PathBuf::from(name)
}

fn write_text(path: &Path, contents: &str) -> Result<()> {
    let mut file = File::create(path).map_err(|source| CaptureError::Write {
        path: path.to_path_buf(),
        source,
    })?;
    file.write_all(contents.as_bytes())
        .map_err(|source| CaptureError::Write {
            path: path.to_path_buf(),
            source,
        })?;
    info!(path = %path.display(), bytes = contents.len(), "wrote provenance document");
    Ok(())
}
