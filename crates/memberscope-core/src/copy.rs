//! Field value transplant between instances

use tracing::{debug, trace};

use crate::error::{ReflectError, Result};
use crate::members::all_fields;
use crate::naming::{eq_ignore_case, normalize_member_name};
use crate::provider::{BindingFilter, Member, MemberProvider};

/// Copy field values from `source` onto `destination`.
///
/// Only fields declared directly on the source's runtime type are copied.
/// Names in `ignores` are skipped (compared ignoring case). Each remaining
/// value is written to the destination field that [`all_fields`] reports
/// under the same logical name (ignoring case), so a field hidden by a
/// more-derived declaration is never the target. Returns the number of fields written.
///
/// Fails with [`ReflectError::MemberNotFound`] if the destination has no such
/// field; fields copied before the failure keep their new values.
pub fn copy_fields<P, S>(
    provider: &P,
    source: &P::Instance,
    destination: &mut P::Instance,
    ignores: &[S],
) -> Result<usize>
where
    P: MemberProvider + ?Sized,
    S: AsRef<str>,
{
    let source_type = provider.type_of(source);
    let destination_type = provider.type_of(destination);
    let mut copied = 0;

    for field in provider.declared_fields(&source_type, BindingFilter::ALL_INSTANCE) {
        let name = normalize_member_name(&field.name);

        if ignores.iter().any(|ignore| eq_ignore_case(ignore.as_ref(), name)) {
            trace!(field = name, "ignored");
            continue;
        }

        let target = destination_field(provider, &destination_type, name).ok_or_else(|| {
            ReflectError::MemberNotFound {
                type_name: provider.type_name(&destination_type),
                member: name.to_string(),
            }
        })?;

        let value = provider.get_value(&field, source)?;
        provider.set_value(&target, destination, value)?;
        trace!(field = name, "copied");
        copied += 1;
    }

    debug!(
        source = %provider.type_name(&source_type),
        destination = %provider.type_name(&destination_type),
        copied,
        "copied fields"
    );
    Ok(copied)
}

fn destination_field<P: MemberProvider + ?Sized>(
    provider: &P,
    ty: &P::Type,
    name: &str,
) -> Option<Member<P::Type>> {
    // visible names only; a field hidden by a derived redeclaration never matches
    all_fields(provider, Some(ty.clone()), BindingFilter::ALL_INSTANCE)
        .find(|(candidate, _)| eq_ignore_case(candidate, name))
        .map(|(_, member)| member)
}
