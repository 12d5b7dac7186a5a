//! Single-value accessors
//!
//! These use the provider's single-level `field`/`property` lookup directly
//! and are not shadow-aware; use [`crate::lookup`] for that.

use crate::error::Result;
use crate::provider::{BindingFilter, MemberProvider};

/// Read a field of `object` as seen from `ty`.
///
/// `Ok(None)` when the object is absent or `ty` has no such field.
pub fn value_of_field<P: MemberProvider + ?Sized>(
    provider: &P,
    object: Option<&P::Instance>,
    ty: &P::Type,
    name: &str,
    filter: BindingFilter,
) -> Result<Option<P::Value>> {
    let Some(object) = object else {
        return Ok(None);
    };
    match provider.field(ty, name, filter) {
        Some(member) => provider.get_value(&member, object).map(Some),
        None => Ok(None),
    }
}

/// Read a property of `object` as seen from `ty`.
///
/// `Ok(None)` when the object is absent or `ty` has no such property.
pub fn value_of_property<P: MemberProvider + ?Sized>(
    provider: &P,
    object: Option<&P::Instance>,
    ty: &P::Type,
    name: &str,
    filter: BindingFilter,
) -> Result<Option<P::Value>> {
    let Some(object) = object else {
        return Ok(None);
    };
    match provider.property(ty, name, filter) {
        Some(member) => provider.get_value(&member, object).map(Some),
        None => Ok(None),
    }
}

/// Read a field using the object's runtime type and all instance members
pub fn field_value<P: MemberProvider + ?Sized>(
    provider: &P,
    object: Option<&P::Instance>,
    name: &str,
) -> Result<Option<P::Value>> {
    let Some(object) = object else {
        return Ok(None);
    };
    let ty = provider.type_of(object);
    value_of_field(provider, Some(object), &ty, name, BindingFilter::ALL_INSTANCE)
}

/// Read a property using the object's runtime type and all instance members
pub fn property_value<P: MemberProvider + ?Sized>(
    provider: &P,
    object: Option<&P::Instance>,
    name: &str,
) -> Result<Option<P::Value>> {
    let Some(object) = object else {
        return Ok(None);
    };
    let ty = provider.type_of(object);
    value_of_property(provider, Some(object), &ty, name, BindingFilter::ALL_INSTANCE)
}
