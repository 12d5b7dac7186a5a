//! Default visibility policy for copy/display tooling
//!
//! Any `FnMut(&str, &Member<T>) -> bool` can stand in for this predicate.

use crate::provider::{Marker, Member};

/// Accept a member unless it is marked non-serialized, obsolete,
/// serializer-ignored, or hidden from inspectors. Properties must also have
/// both a getter and a setter.
pub fn default_member_predicate<T>(_name: &str, member: &Member<T>) -> bool {
    let excluded = member.markers.iter().any(|marker| {
        matches!(
            marker,
            Marker::NonSerialized
                | Marker::Obsolete
                | Marker::SerializerIgnore
                | Marker::HiddenFromInspector
        )
    });
    if excluded {
        return false;
    }

    if member.is_property() && !(member.can_read && member.can_write) {
        return false;
    }

    true
}
