//! Host manifest parsing (memberscope.toml / .json)
//!
//! A manifest declares modules and the types they define. Types may name
//! their base before or after the base itself appears in the file.

use std::path::Path;

use rustc_hash::FxHashSet;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;
use tracing::debug;

use memberscope_core::{Marker, Visibility};

use crate::registry::{MemberDef, RegistryError, TypeDef, TypeKind, TypeRegistry};

/// Errors that can occur while loading a manifest
#[derive(Debug, Error)]
pub enum ManifestError {
    /// Failed to read manifest file
    #[error("Failed to read manifest file: {0}")]
    IoError(#[from] std::io::Error),

    /// Failed to parse TOML
    #[error("Failed to parse manifest: {0}")]
    TomlError(#[from] toml::de::Error),

    /// Failed to parse JSON
    #[error("Failed to parse manifest: {0}")]
    JsonError(#[from] serde_json::Error),

    /// Type references a module the manifest does not declare
    #[error("Type '{type_name}' references unknown module '{module}'")]
    UnknownModule {
        /// Type full name
        type_name: String,
        /// Module name
        module: String,
    },

    /// Type references a base the manifest does not declare
    #[error("Type '{type_name}' references unknown base type '{base}'")]
    UnknownBase {
        /// Type full name
        type_name: String,
        /// Base type name
        base: String,
    },

    /// Same full name declared twice in one module
    #[error("Duplicate type '{type_name}' in module '{module}'")]
    DuplicateType {
        /// Type full name
        type_name: String,
        /// Module name
        module: String,
    },

    /// Base chain loops back on itself
    #[error("Inheritance cycle involving '{0}'")]
    InheritanceCycle(String),

    /// Registry rejected a type
    #[error("Failed to register type: {0}")]
    Registry(#[from] RegistryError),
}

/// Host manifest
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct Manifest {
    /// Modules
    #[serde(default)]
    pub modules: Vec<ModuleEntry>,

    /// Types
    #[serde(default)]
    pub types: Vec<TypeEntry>,
}

/// Module declaration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ModuleEntry {
    /// Module name
    pub name: String,

    /// Loaded at startup (default: true)
    #[serde(default = "default_true")]
    pub preloaded: bool,
}

/// Type declaration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TypeEntry {
    /// Fully-qualified name
    pub name: String,

    /// Defining module
    pub module: String,

    /// Base type full name
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub base: Option<String>,

    /// Type category (default: class)
    #[serde(default)]
    pub kind: TypeKind,

    /// Abstract type
    #[serde(default, rename = "abstract")]
    pub is_abstract: bool,

    /// Declared fields
    #[serde(default)]
    pub fields: Vec<MemberEntry>,

    /// Declared properties
    #[serde(default)]
    pub properties: Vec<MemberEntry>,
}

/// Field or property declaration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MemberEntry {
    /// Raw member name
    pub name: String,

    /// Accessibility (default: public)
    #[serde(default)]
    pub visibility: Visibility,

    /// Type-level member
    #[serde(default, rename = "static")]
    pub is_static: bool,

    /// Getter present (properties only, default: true)
    #[serde(default = "default_true")]
    pub get: bool,

    /// Setter present (properties only, default: true)
    #[serde(default = "default_true")]
    pub set: bool,

    /// Annotations
    #[serde(default)]
    pub markers: Vec<Marker>,

    /// Initial value
    #[serde(default)]
    pub default: Value,
}

fn default_true() -> bool {
    true
}

impl MemberEntry {
    fn to_def(&self) -> MemberDef {
        MemberDef {
            name: self.name.clone(),
            visibility: self.visibility,
            is_static: self.is_static,
            can_read: self.get,
            can_write: self.set,
            markers: self.markers.clone(),
            default: self.default.clone(),
        }
    }
}

impl Manifest {
    /// Parse a TOML manifest
    pub fn from_toml_str(source: &str) -> Result<Self, ManifestError> {
        Ok(toml::from_str(source)?)
    }

    /// Parse a JSON manifest
    pub fn from_json_str(source: &str) -> Result<Self, ManifestError> {
        Ok(serde_json::from_str(source)?)
    }

    /// Load a manifest file; `.json` files are parsed as JSON, anything else
    /// as TOML
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ManifestError> {
        let path = path.as_ref();
        let source = std::fs::read_to_string(path)?;
        let is_json = path
            .extension()
            .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));

        debug!(path = %path.display(), json = is_json, "loading manifest");
        if is_json {
            Self::from_json_str(&source)
        } else {
            Self::from_toml_str(&source)
        }
    }

    fn validate(&self) -> Result<(), ManifestError> {
        let modules: FxHashSet<&str> = self.modules.iter().map(|m| m.name.as_str()).collect();
        let mut declared: FxHashSet<(&str, &str)> = FxHashSet::default();
        let names: FxHashSet<&str> = self.types.iter().map(|t| t.name.as_str()).collect();

        for entry in &self.types {
            if !modules.contains(entry.module.as_str()) {
                return Err(ManifestError::UnknownModule {
                    type_name: entry.name.clone(),
                    module: entry.module.clone(),
                });
            }
            if !declared.insert((entry.module.as_str(), entry.name.as_str())) {
                return Err(ManifestError::DuplicateType {
                    type_name: entry.name.clone(),
                    module: entry.module.clone(),
                });
            }
            if let Some(base) = &entry.base {
                if !names.contains(base.as_str()) {
                    return Err(ManifestError::UnknownBase {
                        type_name: entry.name.clone(),
                        base: base.clone(),
                    });
                }
            }
        }
        Ok(())
    }
}

impl TypeRegistry {
    /// Build a registry from a manifest.
    ///
    /// Types are registered base-first. A base name that appears in several
    /// modules resolves to the first registered type of that name.
    pub fn from_manifest(manifest: &Manifest) -> Result<Self, ManifestError> {
        manifest.validate()?;

        let mut registry = TypeRegistry::new();
        for module in &manifest.modules {
            registry.add_module(module.name.clone(), module.preloaded);
        }

        let mut pending: Vec<&TypeEntry> = manifest.types.iter().collect();
        while let Some(first) = pending.first() {
            let stalled = first.name.clone();
            let before = pending.len();
            let mut deferred = Vec::with_capacity(before);

            for entry in pending {
                let base = match &entry.base {
                    None => None,
                    Some(name) => match registry.type_by_name(name) {
                        Some(id) => Some(id),
                        None => {
                            deferred.push(entry);
                            continue;
                        }
                    },
                };
                let module = registry.modules().find(&entry.module).ok_or_else(|| {
                    ManifestError::UnknownModule {
                        type_name: entry.name.clone(),
                        module: entry.module.clone(),
                    }
                })?;

                let mut def = TypeDef::new(entry.name.clone(), module, entry.kind);
                def.base = base;
                def.is_abstract = entry.is_abstract;
                def.fields = entry.fields.iter().map(MemberEntry::to_def).collect();
                def.properties = entry.properties.iter().map(MemberEntry::to_def).collect();
                registry.register(def)?;
            }

            if deferred.len() == before {
                return Err(ManifestError::InheritanceCycle(stalled));
            }
            pending = deferred;
        }

        debug!(
            modules = registry.modules().len(),
            types = registry.len(),
            "built registry from manifest"
        );
        Ok(registry)
    }
}
