//! Reflection errors

use thiserror::Error;

/// Result type for reflection operations
pub type Result<T, E = ReflectError> = std::result::Result<T, E>;

/// Errors raised while reading, writing, or resolving members.
///
/// Lookups that simply find nothing are not errors; they return `None`.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum ReflectError {
    /// A member that must exist on the target type is missing
    #[error("Member not found: {type_name} has no member named '{member}'")]
    MemberNotFound {
        /// Full name of the type that was searched
        type_name: String,
        /// Logical member name
        member: String,
    },

    /// Property has no usable getter
    #[error("Member '{member}' on {type_name} is not readable")]
    NotReadable {
        /// Full name of the declaring type
        type_name: String,
        /// Member name
        member: String,
    },

    /// Property has no usable setter
    #[error("Member '{member}' on {type_name} is not writable")]
    NotWritable {
        /// Full name of the declaring type
        type_name: String,
        /// Member name
        member: String,
    },

    /// Instance does not belong to the member's declaring type family
    #[error("Type mismatch: expected an instance of {expected}, got {actual}")]
    TypeMismatch {
        /// Declaring type of the member
        expected: String,
        /// Runtime type of the instance
        actual: String,
    },

    /// A module could not be loaded
    #[error("Failed to load module '{module}': {reason}")]
    ModuleLoad {
        /// Requested module name
        module: String,
        /// Why the host refused
        reason: String,
    },
}
