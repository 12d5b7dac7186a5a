//! Shadow-aware member lookup
//!
//! A provider's single-level `field`/`property` query may report a member
//! declared on an ancestor. These lookups keep walking until they reach the
//! type that declares the member the query returned, so a redeclaration on a
//! more-derived type always wins over an ancestor's.

use crate::hierarchy::walk;
use crate::provider::{BindingFilter, Member, MemberProvider};

/// Find a field, preferring the most-derived declaring type
pub fn find_field_in_hierarchy<P: MemberProvider + ?Sized>(
    provider: &P,
    start: &P::Type,
    name: &str,
    filter: BindingFilter,
) -> Option<Member<P::Type>> {
    find_in_hierarchy(provider, start, |ty| provider.field(ty, name, filter))
}

/// Find a property, preferring the most-derived declaring type
pub fn find_property_in_hierarchy<P: MemberProvider + ?Sized>(
    provider: &P,
    start: &P::Type,
    name: &str,
    filter: BindingFilter,
) -> Option<Member<P::Type>> {
    find_in_hierarchy(provider, start, |ty| provider.property(ty, name, filter))
}

/// Returns the first member whose declaring type is the type it was queried
/// on. When no level satisfies that, the root-level query result is returned.
fn find_in_hierarchy<P, F>(provider: &P, start: &P::Type, lookup: F) -> Option<Member<P::Type>>
where
    P: MemberProvider + ?Sized,
    F: Fn(&P::Type) -> Option<Member<P::Type>>,
{
    let mut found = None;
    for ty in walk(provider, start.clone()) {
        found = lookup(&ty);
        if let Some(member) = &found {
            if member.declaring_type == ty {
                return found;
            }
        }
    }
    found
}
