//! Type registry for the in-memory host

use parking_lot::RwLock;
use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

use memberscope_core::{walk, Marker, Member, MemberKind, Visibility};

use crate::instance::Instance;
use crate::modules::{ModuleId, ModuleSet};

/// Type identifier (index into the registry)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TypeId(pub(crate) usize);

impl TypeId {
    /// Index into the registry
    pub fn index(self) -> usize {
        self.0
    }
}

/// Type category
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TypeKind {
    /// Reference type
    #[default]
    Class,
    /// Value type
    Struct,
    /// Interface
    Interface,
}

/// Field or property definition
#[derive(Debug, Clone, PartialEq)]
pub struct MemberDef {
    /// Raw member name
    pub name: String,
    /// Accessibility
    pub visibility: Visibility,
    /// Type-level member
    pub is_static: bool,
    /// Getter present (properties only)
    pub can_read: bool,
    /// Setter present (properties only)
    pub can_write: bool,
    /// Annotations
    pub markers: Vec<Marker>,
    /// Initial value for new instances
    pub default: Value,
}

impl MemberDef {
    /// Public, instance-level, readable and writable member
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            visibility: Visibility::Public,
            is_static: false,
            can_read: true,
            can_write: true,
            markers: Vec::new(),
            default: Value::Null,
        }
    }

    /// Set accessibility
    pub fn with_visibility(mut self, visibility: Visibility) -> Self {
        self.visibility = visibility;
        self
    }

    /// Make non-public
    pub fn non_public(self) -> Self {
        self.with_visibility(Visibility::NonPublic)
    }

    /// Make static
    pub fn static_(mut self) -> Self {
        self.is_static = true;
        self
    }

    /// Drop the setter
    pub fn read_only(mut self) -> Self {
        self.can_write = false;
        self
    }

    /// Drop the getter
    pub fn write_only(mut self) -> Self {
        self.can_read = false;
        self
    }

    /// Attach a marker
    pub fn with_marker(mut self, marker: Marker) -> Self {
        self.markers.push(marker);
        self
    }

    /// Set the initial value
    pub fn with_default(mut self, value: impl Into<Value>) -> Self {
        self.default = value.into();
        self
    }

    /// Describe this definition as declared on `declaring_type`
    pub(crate) fn describe(&self, declaring_type: TypeId, kind: MemberKind) -> Member<TypeId> {
        let (can_read, can_write) = match kind {
            MemberKind::Field => (true, true),
            MemberKind::Property => (self.can_read, self.can_write),
        };
        Member {
            name: self.name.clone(),
            declaring_type,
            kind,
            visibility: self.visibility,
            is_static: self.is_static,
            can_read,
            can_write,
            markers: self.markers.clone(),
        }
    }
}

/// Type definition
#[derive(Debug, Clone, PartialEq)]
pub struct TypeDef {
    /// Assigned on registration
    pub id: TypeId,
    /// Fully-qualified name
    pub full_name: String,
    /// Defining module
    pub module: ModuleId,
    /// Base type (None for roots)
    pub base: Option<TypeId>,
    /// Type category
    pub kind: TypeKind,
    /// Cannot be instantiated directly
    pub is_abstract: bool,
    /// Fields declared on this type
    pub fields: Vec<MemberDef>,
    /// Properties declared on this type
    pub properties: Vec<MemberDef>,
}

impl TypeDef {
    /// Create a definition of the given kind
    pub fn new(full_name: impl Into<String>, module: ModuleId, kind: TypeKind) -> Self {
        Self {
            id: TypeId(usize::MAX),
            full_name: full_name.into(),
            module,
            base: None,
            kind,
            is_abstract: false,
            fields: Vec::new(),
            properties: Vec::new(),
        }
    }

    /// Create a class definition
    pub fn class(full_name: impl Into<String>, module: ModuleId) -> Self {
        Self::new(full_name, module, TypeKind::Class)
    }

    /// Set the base type
    pub fn with_base(mut self, base: TypeId) -> Self {
        self.base = Some(base);
        self
    }

    /// Mark abstract
    pub fn abstract_(mut self) -> Self {
        self.is_abstract = true;
        self
    }

    /// Declare a field
    pub fn with_field(mut self, field: MemberDef) -> Self {
        self.fields.push(field);
        self
    }

    /// Declare a property
    pub fn with_property(mut self, property: MemberDef) -> Self {
        self.properties.push(property);
        self
    }
}

/// Errors raised when registering a type
#[derive(Debug, Clone, Error, PartialEq)]
pub enum RegistryError {
    /// Base type id is not registered here
    #[error("Type '{type_name}' has base id {base} which is not registered")]
    UnknownBase {
        /// Type full name
        type_name: String,
        /// Offending base index
        base: usize,
    },

    /// Module id is not registered here
    #[error("Type '{type_name}' has module id {module} which is not registered")]
    UnknownModule {
        /// Type full name
        type_name: String,
        /// Offending module index
        module: usize,
    },
}

/// Slot key: declaring type plus raw member name
pub(crate) type SlotKey = (TypeId, String);

/// Registry of types, modules, and static member storage
#[derive(Debug, Default)]
pub struct TypeRegistry {
    types: Vec<TypeDef>,
    modules: ModuleSet,
    statics: RwLock<FxHashMap<SlotKey, Value>>,
}

impl TypeRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a module
    pub fn add_module(&mut self, name: impl Into<String>, preloaded: bool) -> ModuleId {
        self.modules.register(name, preloaded)
    }

    /// Module table
    pub fn modules(&self) -> &ModuleSet {
        &self.modules
    }

    /// Register a type and return its id.
    ///
    /// The base (if any) and the module must already be registered in this
    /// registry, which also rules out inheritance cycles.
    pub fn register(&mut self, mut def: TypeDef) -> Result<TypeId, RegistryError> {
        if let Some(base) = def.base {
            if base.0 >= self.types.len() {
                return Err(RegistryError::UnknownBase {
                    type_name: def.full_name,
                    base: base.0,
                });
            }
        }
        if self.modules.get(def.module).is_none() {
            return Err(RegistryError::UnknownModule {
                type_name: def.full_name,
                module: def.module.index(),
            });
        }

        let id = TypeId(self.types.len());
        def.id = id;

        let statics = self.statics.get_mut();
        for member in def.fields.iter().chain(def.properties.iter()) {
            if member.is_static {
                statics.insert((id, member.name.clone()), member.default.clone());
            }
        }

        self.types.push(def);
        Ok(id)
    }

    /// Get a type definition
    pub fn get(&self, id: TypeId) -> Option<&TypeDef> {
        self.types.get(id.0)
    }

    /// First registered type with this exact full name
    pub fn type_by_name(&self, full_name: &str) -> Option<TypeId> {
        self.types
            .iter()
            .find(|def| def.full_name == full_name)
            .map(|def| def.id)
    }

    /// Type with this exact full name inside a module
    pub fn type_in_module(&self, module: ModuleId, full_name: &str) -> Option<TypeId> {
        self.types
            .iter()
            .find(|def| def.module == module && def.full_name == full_name)
            .map(|def| def.id)
    }

    /// Types defined by a module, in registration order
    pub fn types_in_module(&self, module: ModuleId) -> Vec<TypeId> {
        self.types
            .iter()
            .filter(|def| def.module == module)
            .map(|def| def.id)
            .collect()
    }

    /// Number of registered types
    pub fn len(&self) -> usize {
        self.types.len()
    }

    /// Whether no type is registered
    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }

    /// Iterate over type definitions
    pub fn iter(&self) -> impl Iterator<Item = &TypeDef> {
        self.types.iter()
    }

    /// Create an instance with every instance field and property of the
    /// hierarchy set to its default value
    pub fn instantiate(&self, id: TypeId) -> Instance {
        let mut slots = FxHashMap::default();
        for ty in walk(self, id) {
            let def = self.def(ty);
            for member in def.fields.iter().chain(def.properties.iter()) {
                if !member.is_static {
                    slots.insert((ty, member.name.clone()), member.default.clone());
                }
            }
        }
        Instance::new(id, slots)
    }

    /// Current value of a static member
    pub fn static_value(&self, id: TypeId, name: &str) -> Option<Value> {
        self.statics.read().get(&(id, name.to_string())).cloned()
    }

    pub(crate) fn def(&self, id: TypeId) -> &TypeDef {
        &self.types[id.0]
    }

    pub(crate) fn statics(&self) -> &RwLock<FxHashMap<SlotKey, Value>> {
        &self.statics
    }
}
