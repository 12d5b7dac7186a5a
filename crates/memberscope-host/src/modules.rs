//! Module table
//!
//! Modules are registered up front; only some are loaded. Loading a
//! registered module by name marks it loaded, while an unknown name fails.

use parking_lot::RwLock;
use tracing::debug;

use memberscope_core::{ReflectError, Result};

/// Module identifier (index into the module table)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ModuleId(pub(crate) usize);

impl ModuleId {
    /// Index into the module table
    pub fn index(self) -> usize {
        self.0
    }
}

/// Registered module
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModuleDef {
    /// Module identifier
    pub id: ModuleId,
    /// Module name
    pub name: String,
}

/// Registered modules and the subset currently loaded
#[derive(Debug, Default)]
pub struct ModuleSet {
    modules: Vec<ModuleDef>,
    /// Loaded modules in load order
    loaded: RwLock<Vec<ModuleId>>,
}

impl ModuleSet {
    /// Create an empty module set
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a module, optionally loading it immediately.
    ///
    /// Registering an existing name returns the existing id.
    pub fn register(&mut self, name: impl Into<String>, preloaded: bool) -> ModuleId {
        let name = name.into();
        let id = match self.find(&name) {
            Some(id) => id,
            None => {
                let id = ModuleId(self.modules.len());
                self.modules.push(ModuleDef { id, name });
                id
            }
        };
        if preloaded {
            self.mark_loaded(id);
        }
        id
    }

    /// Look up a registered module by exact name
    pub fn find(&self, name: &str) -> Option<ModuleId> {
        self.modules.iter().find(|m| m.name == name).map(|m| m.id)
    }

    /// Get a module definition
    pub fn get(&self, id: ModuleId) -> Option<&ModuleDef> {
        self.modules.get(id.0)
    }

    /// Load a registered module
    pub fn load(&self, name: &str) -> Result<ModuleId> {
        let id = self.find(name).ok_or_else(|| ReflectError::ModuleLoad {
            module: name.to_string(),
            reason: "no module with that name is registered".to_string(),
        })?;
        if self.mark_loaded(id) {
            debug!(module = name, "loaded module");
        }
        Ok(id)
    }

    /// Whether a module is loaded
    pub fn is_loaded(&self, id: ModuleId) -> bool {
        self.loaded.read().contains(&id)
    }

    /// Loaded modules in load order
    pub fn loaded(&self) -> Vec<ModuleId> {
        self.loaded.read().clone()
    }

    /// Number of registered modules
    pub fn len(&self) -> usize {
        self.modules.len()
    }

    /// Whether no module is registered
    pub fn is_empty(&self) -> bool {
        self.modules.is_empty()
    }

    /// Iterate over registered modules
    pub fn iter(&self) -> impl Iterator<Item = &ModuleDef> {
        self.modules.iter()
    }

    fn mark_loaded(&self, id: ModuleId) -> bool {
        let mut loaded = self.loaded.write();
        if loaded.contains(&id) {
            return false;
        }
        loaded.push(id);
        true
    }
}
