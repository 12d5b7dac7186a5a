//! Memberscope Host
//!
//! An in-memory host object model for `memberscope-core`.
//!
//! [`TypeRegistry`] holds type definitions grouped into modules and implements
//! both [`MemberProvider`](memberscope_core::MemberProvider) and
//! [`ModuleHost`](memberscope_core::ModuleHost). Instances are plain
//! [`Instance`] values whose slots hold `serde_json::Value`s.
//!
//! A registry can be built in code or from a manifest:
//!
//! ```toml
//! [[modules]]
//! name = "Game.Core"
//!
//! [[types]]
//! name = "Game.Entity"
//! module = "Game.Core"
//! fields = [{ name = "Id", default = 0 }]
//!
//! [[types]]
//! name = "Game.Player"
//! module = "Game.Core"
//! base = "Game.Entity"
//! properties = [{ name = "Name", default = "" }]
//! ```

#![warn(missing_docs)]

pub mod instance;
pub mod manifest;
pub mod modules;
pub mod provider;
pub mod registry;

pub use instance::Instance;
pub use manifest::{Manifest, ManifestError, MemberEntry, ModuleEntry, TypeEntry};
pub use modules::{ModuleDef, ModuleId, ModuleSet};
pub use registry::{MemberDef, RegistryError, TypeDef, TypeId, TypeKind, TypeRegistry};
