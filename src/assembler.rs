use std::collections::{BTreeMap, HashMap};
use std::path::PathBuf;

use clap::ValueEnum;
use log::debug;
use serde::{Deserialize, Serialize};
use serde_yaml::Value;

use crate::classifier::{DefinitionEntry, Entry, HttpMethod, OperationEntry};
use crate::diagnostics::Diagnostic;

/// The Swagger version this tool emits.
pub const SWAGGER_VERSION: &str = "2.0";

/// Swagger Info object.
///
/// Supplied by the caller at configuration time; blocks never contribute
/// to it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Info {
    /// API title
    pub title: String,
    /// API version
    pub version: String,
    /// API description
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl Default for Info {
    fn default() -> Self {
        Info {
            title: "Generated API".to_string(),
            version: "1.0.0".to_string(),
            description: None,
        }
    }
}

/// All operations of a single path, keyed by method.
///
/// The map key order is the Swagger path item key order, so `get` always
/// precedes `post` in the emitted document.
pub type PathItem = BTreeMap<HttpMethod, Value>;

/// Complete Swagger 2.0 document.
///
/// `paths` and `definitions` are always emitted, even when empty, so the
/// document is structurally complete for downstream tools.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SwaggerDocument {
    /// Swagger version, always `"2.0"`
    pub swagger: String,
    /// API info
    pub info: Info,
    /// API host, e.g. `api.example.com`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub host: Option<String>,
    /// Path prefix for every operation
    #[serde(rename = "basePath", skip_serializing_if = "Option::is_none")]
    pub base_path: Option<String>,
    /// API paths, sorted lexically
    pub paths: BTreeMap<String, PathItem>,
    /// Named schemas, sorted lexically
    pub definitions: BTreeMap<String, Value>,
}

/// What to do when two blocks claim the same operation or definition name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum ConflictPolicy {
    /// The block seen last wins.
    #[default]
    Overwrite,
    /// The block seen first wins; later duplicates are dropped.
    KeepFirst,
}

/// Accumulates classified entries into a Swagger document.
///
/// Every conflict is reported, whichever side wins; the assembler
/// remembers which file contributed each entry so the diagnostic can name
/// both.
pub struct DocumentAssembler {
    info: Info,
    host: Option<String>,
    base_path: Option<String>,
    policy: ConflictPolicy,
    paths: BTreeMap<String, PathItem>,
    definitions: BTreeMap<String, Value>,
    operation_sources: HashMap<(String, HttpMethod), PathBuf>,
    definition_sources: HashMap<String, PathBuf>,
}

impl DocumentAssembler {
    pub fn new() -> Self {
        Self {
            info: Info::default(),
            host: None,
            base_path: None,
            policy: ConflictPolicy::default(),
            paths: BTreeMap::new(),
            definitions: BTreeMap::new(),
            operation_sources: HashMap::new(),
            definition_sources: HashMap::new(),
        }
    }

    /// Set the document info.
    pub fn with_info(mut self, info: Info) -> Self {
        self.info = info;
        self
    }

    /// Set the API host.
    pub fn with_host(mut self, host: Option<String>) -> Self {
        self.host = host;
        self
    }

    /// Set the base path prefix.
    pub fn with_base_path(mut self, base_path: Option<String>) -> Self {
        self.base_path = base_path;
        self
    }

    /// Set the duplicate handling policy.
    pub fn with_conflict_policy(mut self, policy: ConflictPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Folds one classified entry into the document.
    ///
    /// Returns a diagnostic when the entry collided with an earlier one,
    /// whichever of the two the policy kept.
    pub fn insert(&mut self, entry: Entry) -> Option<Diagnostic> {
        match entry {
            Entry::Operation(operation) => self.insert_operation(operation),
            Entry::Definition(definition) => self.insert_definition(definition),
        }
    }

    fn insert_operation(&mut self, entry: OperationEntry) -> Option<Diagnostic> {
        let OperationEntry {
            path,
            method,
            spec,
            source,
        } = entry;
        debug!("Adding operation: {} {}", method, path);

        let key = (path.clone(), method);
        let previous = self.operation_sources.get(&key).cloned();
        if let Some(previous) = previous {
            let replaced = self.policy == ConflictPolicy::Overwrite;
            if replaced {
                self.paths.entry(path.clone()).or_default().insert(method, spec);
                self.operation_sources.insert(key, source.clone());
            }
            return Some(Diagnostic::OperationConflict {
                path,
                method,
                previous,
                current: source,
                replaced,
            });
        }

        self.paths.entry(path.clone()).or_default().insert(method, spec);
        self.operation_sources.insert(key, source);
        None
    }

    fn insert_definition(&mut self, entry: DefinitionEntry) -> Option<Diagnostic> {
        let DefinitionEntry {
            name,
            schema,
            source,
        } = entry;
        debug!("Adding definition: {}", name);

        let previous = self.definition_sources.get(&name).cloned();
        if let Some(previous) = previous {
            let replaced = self.policy == ConflictPolicy::Overwrite;
            if replaced {
                self.definitions.insert(name.clone(), schema);
                self.definition_sources.insert(name.clone(), source.clone());
            }
            return Some(Diagnostic::DefinitionConflict {
                name,
                previous,
                current: source,
                replaced,
            });
        }

        self.definitions.insert(name.clone(), schema);
        self.definition_sources.insert(name, source);
        None
    }

    /// Build the final Swagger document.
    pub fn build(self) -> SwaggerDocument {
        debug!(
            "Building Swagger document with {} paths and {} definitions",
            self.paths.len(),
            self.definitions.len()
        );
        SwaggerDocument {
            swagger: SWAGGER_VERSION.to_string(),
            info: self.info,
            host: self.host,
            base_path: self.base_path,
            paths: self.paths,
            definitions: self.definitions,
        }
    }
}

impl Default for DocumentAssembler {
    fn default() -> Self {
        Self::new()
    }
}
