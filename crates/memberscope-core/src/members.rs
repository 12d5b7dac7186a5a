//! De-duplicated member enumeration
//!
//! Walks a type's hierarchy most-derived first and yields every logical member
//! name once. Because the walk starts at the leaf, the first occurrence of a
//! name is the most-derived declaration, and later (ancestor) occurrences are
//! suppressed. Names are compared ignoring case.
//!
//! For each declared member, in order:
//! 1. the raw name is normalized ([`normalize_member_name`])
//! 2. the predicate, if any, may reject the member
//! 3. the name is checked against the names already yielded
//!
//! A member rejected by the predicate never claims its name, so an ancestor's
//! member of the same name can still be yielded.

use rustc_hash::FxHashSet;

use crate::hierarchy::{walk, Hierarchy};
use crate::naming::{fold_case, normalize_member_name};
use crate::predicate::default_member_predicate;
use crate::provider::{BindingFilter, Member, MemberKind, MemberProvider};

/// Predicate type used when the caller supplies none
pub type AcceptAll<T> = fn(&str, &Member<T>) -> bool;

fn accept_all<T>(_name: &str, _member: &Member<T>) -> bool {
    true
}

/// Lazy iterator of `(logical name, member)` pairs
pub struct Members<'p, P, F>
where
    P: MemberProvider + ?Sized,
{
    provider: &'p P,
    hierarchy: Option<Hierarchy<'p, P>>,
    kind: MemberKind,
    filter: BindingFilter,
    predicate: F,
    pending: std::vec::IntoIter<Member<P::Type>>,
    seen: FxHashSet<String>,
}

impl<'p, P, F> Members<'p, P, F>
where
    P: MemberProvider + ?Sized,
    F: FnMut(&str, &Member<P::Type>) -> bool,
{
    fn new(
        provider: &'p P,
        start: Option<P::Type>,
        kind: MemberKind,
        filter: BindingFilter,
        predicate: F,
    ) -> Self {
        Self {
            provider,
            hierarchy: start.map(|ty| walk(provider, ty)),
            kind,
            filter,
            predicate,
            pending: Vec::new().into_iter(),
            seen: FxHashSet::default(),
        }
    }

    fn declared(&self, ty: &P::Type) -> Vec<Member<P::Type>> {
        match self.kind {
            MemberKind::Field => self.provider.declared_fields(ty, self.filter),
            MemberKind::Property => self.provider.declared_properties(ty, self.filter),
        }
    }
}

impl<'p, P, F> Iterator for Members<'p, P, F>
where
    P: MemberProvider + ?Sized,
    F: FnMut(&str, &Member<P::Type>) -> bool,
{
    type Item = (String, Member<P::Type>);

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if let Some(member) = self.pending.next() {
                let name = normalize_member_name(&member.name).to_string();
                if !(self.predicate)(&name, &member) {
                    continue;
                }
                if !self.seen.insert(fold_case(&name)) {
                    continue;
                }
                return Some((name, member));
            }

            // Members of the next type are only fetched once the current one is drained
            let ty = self.hierarchy.as_mut()?.next()?;
            self.pending = self.declared(&ty).into_iter();
        }
    }
}

/// All fields visible from `start`, most-derived first
pub fn all_fields<P: MemberProvider + ?Sized>(
    provider: &P,
    start: Option<P::Type>,
    filter: BindingFilter,
) -> Members<'_, P, AcceptAll<P::Type>> {
    Members::new(
        provider,
        start,
        MemberKind::Field,
        filter,
        accept_all::<P::Type> as AcceptAll<P::Type>,
    )
}

/// All fields visible from `start` that pass `predicate`
pub fn all_fields_where<P, F>(
    provider: &P,
    start: Option<P::Type>,
    filter: BindingFilter,
    predicate: F,
) -> Members<'_, P, F>
where
    P: MemberProvider + ?Sized,
    F: FnMut(&str, &Member<P::Type>) -> bool,
{
    Members::new(provider, start, MemberKind::Field, filter, predicate)
}

/// All properties visible from `start`, most-derived first
pub fn all_properties<P: MemberProvider + ?Sized>(
    provider: &P,
    start: Option<P::Type>,
    filter: BindingFilter,
) -> Members<'_, P, AcceptAll<P::Type>> {
    Members::new(
        provider,
        start,
        MemberKind::Property,
        filter,
        accept_all::<P::Type> as AcceptAll<P::Type>,
    )
}

/// All properties visible from `start` that pass `predicate`
pub fn all_properties_where<P, F>(
    provider: &P,
    start: Option<P::Type>,
    filter: BindingFilter,
    predicate: F,
) -> Members<'_, P, F>
where
    P: MemberProvider + ?Sized,
    F: FnMut(&str, &Member<P::Type>) -> bool,
{
    Members::new(provider, start, MemberKind::Property, filter, predicate)
}

/// Fields of an instance's runtime type; `None` yields nothing
pub fn fields_of<'p, P: MemberProvider + ?Sized>(
    provider: &'p P,
    instance: Option<&P::Instance>,
    filter: BindingFilter,
) -> Members<'p, P, AcceptAll<P::Type>> {
    all_fields(provider, instance.map(|i| provider.type_of(i)), filter)
}

/// Properties of an instance's runtime type; `None` yields nothing
pub fn properties_of<'p, P: MemberProvider + ?Sized>(
    provider: &'p P,
    instance: Option<&P::Instance>,
    filter: BindingFilter,
) -> Members<'p, P, AcceptAll<P::Type>> {
    all_properties(provider, instance.map(|i| provider.type_of(i)), filter)
}

/// Readable, writable, unmarked instance properties of an instance
pub fn visible_properties_of<'p, P: MemberProvider + ?Sized>(
    provider: &'p P,
    instance: Option<&P::Instance>,
) -> Members<'p, P, AcceptAll<P::Type>> {
    all_properties_where(
        provider,
        instance.map(|i| provider.type_of(i)),
        BindingFilter::ALL_INSTANCE,
        default_member_predicate::<P::Type> as AcceptAll<P::Type>,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::naming::eq_ignore_case;
    use crate::provider::{Marker, Visibility};
    use crate::testing::{Chain, Obj};
    use std::cell::Cell;

    fn names<I: Iterator<Item = (String, Member<usize>)>>(iter: I) -> Vec<String> {
        iter.map(|(name, _)| name).collect()
    }

    #[test]
    fn test_shadowed_field_yielded_once_from_derived() {
        let chain = Chain::linear(2)
            .with_field(0, Member::field("x", 0))
            .with_field(1, Member::field("x", 0))
            .with_field(1, Member::field("y", 0));

        let fields: Vec<_> = all_fields(&chain, Some(0), BindingFilter::ALL_INSTANCE).collect();
        assert_eq!(fields.len(), 2);
        assert_eq!(fields[0].0, "x");
        assert_eq!(fields[0].1.declaring_type, 0);
        assert_eq!(fields[1].0, "y");
        assert_eq!(fields[1].1.declaring_type, 1);
    }

    #[test]
    fn test_case_insensitive_dedup() {
        let chain = Chain::linear(3)
            .with_field(0, Member::field("score", 0))
            .with_field(1, Member::field("Score", 0))
            .with_field(2, Member::field("SCORE", 0));

        let fields: Vec<_> = all_fields(&chain, Some(0), BindingFilter::ALL_INSTANCE).collect();
        assert_eq!(fields.len(), 1);
        assert_eq!(fields[0].0, "score");
        assert_eq!(fields[0].1.declaring_type, 0);

        for (i, (a, _)) in fields.iter().enumerate() {
            for (b, _) in &fields[i + 1..] {
                assert!(!eq_ignore_case(a, b));
            }
        }
    }

    #[test]
    fn test_synthetic_names_normalized() {
        let chain = Chain::linear(2)
            .with_field(0, Member::field("<Score>k__BackingField", 0))
            .with_field(1, Member::field("Score", 0));

        let fields: Vec<_> = all_fields(&chain, Some(0), BindingFilter::ALL_INSTANCE).collect();
        assert_eq!(fields.len(), 1);
        assert_eq!(fields[0].0, "Score");
        assert_eq!(fields[0].1.name, "<Score>k__BackingField");
    }

    #[test]
    fn test_predicate_sees_logical_name() {
        let chain = Chain::linear(1).with_field(0, Member::field("<Hp>k__BackingField", 0));

        let mut seen = Vec::new();
        let fields: Vec<_> = all_fields_where(
            &chain,
            Some(0),
            BindingFilter::ALL_INSTANCE,
            |name: &str, _: &Member<usize>| {
                seen.push(name.to_string());
                true
            },
        )
        .collect();
        assert_eq!(fields.len(), 1);
        assert_eq!(seen, vec!["Hp".to_string()]);
    }

    #[test]
    fn test_predicate_rejection_does_not_claim_name() {
        // derived `x` is obsolete and filtered; the ancestor's `x` survives
        let chain = Chain::linear(2)
            .with_property(0, Member::property("x", 0, true, true).with_marker(Marker::Obsolete))
            .with_property(1, Member::property("x", 0, true, true));

        let props: Vec<_> = all_properties_where(
            &chain,
            Some(0),
            BindingFilter::ALL_INSTANCE,
            default_member_predicate,
        )
        .collect();
        assert_eq!(props.len(), 1);
        assert_eq!(props[0].1.declaring_type, 1);
    }

    #[test]
    fn test_absent_start_is_empty() {
        let chain = Chain::linear(2).with_field(0, Member::field("x", 0));
        assert_eq!(all_fields(&chain, None, BindingFilter::ALL_INSTANCE).count(), 0);
        assert_eq!(fields_of(&chain, None, BindingFilter::ALL_INSTANCE).count(), 0);
        assert_eq!(visible_properties_of(&chain, None).count(), 0);
    }

    #[test]
    fn test_filter_applies_per_type() {
        let chain = Chain::linear(2)
            .with_field(0, Member::field("a", 0))
            .with_field(1, Member::field("b", 0).with_visibility(Visibility::NonPublic))
            .with_field(1, Member::field("c", 0).with_static(true));

        assert_eq!(names(all_fields(&chain, Some(0), BindingFilter::PUBLIC_INSTANCE)), vec!["a"]);
        assert_eq!(names(all_fields(&chain, Some(0), BindingFilter::ALL_INSTANCE)), vec!["a", "b"]);
        assert_eq!(names(all_fields(&chain, Some(0), BindingFilter::ALL)), vec!["a", "b", "c"]);
    }

    #[test]
    fn test_early_stop_skips_remaining_types() {
        let chain = Chain::linear(3)
            .with_field(0, Member::field("a", 0))
            .with_field(2, Member::field("z", 0));

        // Count predicate calls to observe how far the walk went
        let calls = Cell::new(0);
        let mut fields = all_fields_where(
            &chain,
            Some(0),
            BindingFilter::ALL_INSTANCE,
            |_: &str, _: &Member<usize>| {
                calls.set(calls.get() + 1);
                true
            },
        );
        assert_eq!(fields.next().map(|(n, _)| n), Some("a".to_string()));
        assert_eq!(calls.get(), 1);
        drop(fields);

        let all = names(all_fields(&chain, Some(0), BindingFilter::ALL_INSTANCE));
        assert_eq!(all, vec!["a", "z"]);
    }

    #[test]
    fn test_fields_of_uses_runtime_type() {
        let chain = Chain::linear(2)
            .with_field(0, Member::field("a", 0))
            .with_field(1, Member::field("b", 0));

        let obj = Obj::new(1);
        assert_eq!(names(fields_of(&chain, Some(&obj), BindingFilter::ALL_INSTANCE)), vec!["b"]);
        assert_eq!(names(properties_of(&chain, Some(&obj), BindingFilter::ALL_INSTANCE)).len(), 0);
    }

    #[test]
    fn test_visible_properties_of_default_policy() {
        let chain = Chain::linear(1)
            .with_property(0, Member::property("Name", 0, true, true))
            .with_property(0, Member::property("ReadOnly", 0, true, false))
            .with_property(
                0,
                Member::property("Hidden", 0, true, true).with_marker(Marker::HiddenFromInspector),
            )
            .with_property(
                0,
                Member::property("Secret", 0, true, true).with_visibility(Visibility::NonPublic),
            );

        let obj = Obj::new(0);
        assert_eq!(names(visible_properties_of(&chain, Some(&obj))), vec!["Name", "Secret"]);
    }
}
