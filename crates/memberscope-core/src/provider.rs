//! Provider seam
//!
//! Everything this crate knows about a host object model comes through the
//! two traits defined here. Member metadata travels as [`Member`], a plain
//! descriptor that carries a handle back to its declaring type.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::Result;

// ============================================================================
// Member metadata
// ============================================================================

/// Kind of data member
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum MemberKind {
    /// Storage slot
    Field,
    /// Accessor pair (getter and/or setter)
    Property,
}

/// Member accessibility
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Visibility {
    /// Visible outside the declaring type
    #[default]
    Public,
    /// Private, protected, or internal
    NonPublic,
}

/// Annotation attached to a member by the host.
///
/// The core never interprets markers itself; only
/// [`default_member_predicate`](crate::default_member_predicate) reads them.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Marker {
    /// Excluded from serialization
    NonSerialized,
    /// Deprecated
    Obsolete,
    /// Skipped by the document serializer
    SerializerIgnore,
    /// Hidden from inspector-style tooling
    HiddenFromInspector,
    /// Host-defined tag
    Custom(String),
}

/// Accessibility and binding flags selecting which members a query sees
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct BindingFilter {
    /// Include public members
    pub public: bool,
    /// Include non-public members
    pub non_public: bool,
    /// Include instance members
    pub instance: bool,
    /// Include static members
    #[serde(rename = "static")]
    pub static_: bool,
}

impl BindingFilter {
    /// Public and non-public instance members
    pub const ALL_INSTANCE: Self = Self {
        public: true,
        non_public: true,
        instance: true,
        static_: false,
    };

    /// Public instance members only
    pub const PUBLIC_INSTANCE: Self = Self {
        public: true,
        non_public: false,
        instance: true,
        static_: false,
    };

    /// Every member, instance and static
    pub const ALL: Self = Self {
        public: true,
        non_public: true,
        instance: true,
        static_: true,
    };

    /// Check whether a member with the given accessibility and binding passes
    pub fn admits(&self, visibility: Visibility, is_static: bool) -> bool {
        let accessible = match visibility {
            Visibility::Public => self.public,
            Visibility::NonPublic => self.non_public,
        };
        let bound = if is_static { self.static_ } else { self.instance };
        accessible && bound
    }
}

/// Data member descriptor
#[derive(Debug, Clone, PartialEq)]
pub struct Member<T> {
    /// Raw name as reported by the host (may be synthetic)
    pub name: String,
    /// Type that declares this member
    pub declaring_type: T,
    /// Field or property
    pub kind: MemberKind,
    /// Accessibility
    pub visibility: Visibility,
    /// Type-level rather than instance-level
    pub is_static: bool,
    /// Has a usable getter (always true for fields)
    pub can_read: bool,
    /// Has a usable setter (always true for fields)
    pub can_write: bool,
    /// Host annotations
    pub markers: Vec<Marker>,
}

impl<T> Member<T> {
    /// Create a public instance field
    pub fn field(name: impl Into<String>, declaring_type: T) -> Self {
        Self {
            name: name.into(),
            declaring_type,
            kind: MemberKind::Field,
            visibility: Visibility::Public,
            is_static: false,
            can_read: true,
            can_write: true,
            markers: Vec::new(),
        }
    }

    /// Create a public instance property
    pub fn property(
        name: impl Into<String>,
        declaring_type: T,
        can_read: bool,
        can_write: bool,
    ) -> Self {
        Self {
            name: name.into(),
            declaring_type,
            kind: MemberKind::Property,
            visibility: Visibility::Public,
            is_static: false,
            can_read,
            can_write,
            markers: Vec::new(),
        }
    }

    /// Set accessibility
    pub fn with_visibility(mut self, visibility: Visibility) -> Self {
        self.visibility = visibility;
        self
    }

    /// Mark as static
    pub fn with_static(mut self, is_static: bool) -> Self {
        self.is_static = is_static;
        self
    }

    /// Attach a marker
    pub fn with_marker(mut self, marker: Marker) -> Self {
        self.markers.push(marker);
        self
    }

    /// Check for a marker
    pub fn has_marker(&self, marker: &Marker) -> bool {
        self.markers.contains(marker)
    }

    /// Whether this is a field
    pub fn is_field(&self) -> bool {
        self.kind == MemberKind::Field
    }

    /// Whether this is a property
    pub fn is_property(&self) -> bool {
        self.kind == MemberKind::Property
    }
}

// ============================================================================
// Provider traits
// ============================================================================

/// Reflective access to a host object model.
///
/// `declared_fields` and `declared_properties` return only members declared
/// directly on the queried type. `field` and `property` are single-level
/// lookups whose treatment of ancestors is host-defined; the core only relies
/// on the `declaring_type` they report.
pub trait MemberProvider {
    /// Type handle
    type Type: Clone + PartialEq + fmt::Debug;
    /// Object the host can read from and write to
    type Instance: ?Sized;
    /// Member value
    type Value;

    /// Base type, or `None` at the root
    fn base_type(&self, ty: &Self::Type) -> Option<Self::Type>;

    /// Display name used in errors and logs
    fn type_name(&self, ty: &Self::Type) -> String;

    /// Fields declared directly on `ty`
    fn declared_fields(&self, ty: &Self::Type, filter: BindingFilter) -> Vec<Member<Self::Type>>;

    /// Properties declared directly on `ty`
    fn declared_properties(
        &self,
        ty: &Self::Type,
        filter: BindingFilter,
    ) -> Vec<Member<Self::Type>>;

    /// Single-level field lookup
    fn field(&self, ty: &Self::Type, name: &str, filter: BindingFilter)
        -> Option<Member<Self::Type>>;

    /// Single-level property lookup
    fn property(
        &self,
        ty: &Self::Type,
        name: &str,
        filter: BindingFilter,
    ) -> Option<Member<Self::Type>>;

    /// Runtime type of an instance
    fn type_of(&self, instance: &Self::Instance) -> Self::Type;

    /// Read a member value
    fn get_value(&self, member: &Member<Self::Type>, instance: &Self::Instance)
        -> Result<Self::Value>;

    /// Write a member value
    fn set_value(
        &self,
        member: &Member<Self::Type>,
        instance: &mut Self::Instance,
        value: Self::Value,
    ) -> Result<()>;
}

/// Module-level type discovery
pub trait ModuleHost: MemberProvider {
    /// Module handle
    type Module: Clone + fmt::Debug;

    /// Modules currently loaded, in host order
    fn loaded_modules(&self) -> Vec<Self::Module>;

    /// Load a module by name
    fn load_module(&self, name: &str) -> Result<Self::Module>;

    /// Module that defines `ty`
    fn module_of(&self, ty: &Self::Type) -> Self::Module;

    /// Exact-name type lookup inside a module
    fn type_in(&self, module: &Self::Module, full_name: &str) -> Option<Self::Type>;

    /// Every type defined by a module
    fn all_types(&self, module: &Self::Module) -> Vec<Self::Type>;

    /// Fully-qualified name of a type
    fn full_name(&self, ty: &Self::Type) -> String;

    /// Whether the type is class-kind
    fn is_class(&self, ty: &Self::Type) -> bool;

    /// Whether the type is abstract
    fn is_abstract(&self, ty: &Self::Type) -> bool;
}
