//! Memberscope Core
//!
//! Hierarchy-aware member discovery over an abstract reflection provider.
//!
//! The host object model is reached only through [`MemberProvider`] (types,
//! declared members, value access) and [`ModuleHost`] (module loading and type
//! lookup). On top of that seam this crate provides:
//!
//! - [`walk`]: the leaf-to-root chain of a type
//! - [`find_field_in_hierarchy`] / [`find_property_in_hierarchy`]: lookup that
//!   prefers the most-derived declaring type
//! - [`all_fields`] / [`all_properties`]: lazy, de-duplicated member
//!   enumeration with an optional predicate
//! - [`copy_fields`]: transplant field values between instances
//! - [`value_of_field`] / [`value_of_property`]: single-level value reads
//! - [`resolve_subclass`] / [`resolve_by_name`]: find a type by full name
//!
//! ## Usage
//!
//! ```ignore
//! use memberscope_core::{all_properties_where, default_member_predicate, BindingFilter};
//!
//! for (name, member) in all_properties_where(
//!     &registry,
//!     Some(player),
//!     BindingFilter::ALL_INSTANCE,
//!     default_member_predicate,
//! ) {
//!     println!("{name} declared on {:?}", member.declaring_type);
//! }
//! ```

#![warn(missing_docs)]

pub mod access;
pub mod copy;
pub mod error;
pub mod hierarchy;
pub mod lookup;
pub mod members;
pub mod naming;
pub mod predicate;
pub mod provider;
pub mod resolve;

#[cfg(test)]
mod testing;

pub use access::{field_value, property_value, value_of_field, value_of_property};
pub use copy::copy_fields;
pub use error::{ReflectError, Result};
pub use hierarchy::{depth, is_subclass_of, walk, Hierarchy};
pub use lookup::{find_field_in_hierarchy, find_property_in_hierarchy};
pub use members::{
    all_fields, all_fields_where, all_properties, all_properties_where, fields_of,
    properties_of, visible_properties_of, AcceptAll, Members,
};
pub use naming::{eq_ignore_case, fold_case, normalize_member_name};
pub use predicate::default_member_predicate;
pub use provider::{
    BindingFilter, Marker, Member, MemberKind, MemberProvider, ModuleHost, Visibility,
};
pub use resolve::{resolve_by_name, resolve_subclass};
