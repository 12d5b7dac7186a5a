//! Inheritance chain traversal

use crate::provider::MemberProvider;

/// Lazy leaf-to-root walk over a type's ancestors.
///
/// Yields the start type first, then each base type, and ends after the type
/// that has no base.
pub struct Hierarchy<'p, P: MemberProvider + ?Sized> {
    provider: &'p P,
    next: Option<P::Type>,
}

impl<'p, P: MemberProvider + ?Sized> Iterator for Hierarchy<'p, P> {
    type Item = P::Type;

    fn next(&mut self) -> Option<Self::Item> {
        let current = self.next.take()?;
        self.next = self.provider.base_type(&current);
        Some(current)
    }
}

/// Walk the hierarchy starting at `start`
pub fn walk<P: MemberProvider + ?Sized>(provider: &P, start: P::Type) -> Hierarchy<'_, P> {
    Hierarchy {
        provider,
        next: Some(start),
    }
}

/// Check whether `ty` strictly descends from `ancestor`
pub fn is_subclass_of<P: MemberProvider + ?Sized>(
    provider: &P,
    ty: &P::Type,
    ancestor: &P::Type,
) -> bool {
    walk(provider, ty.clone()).skip(1).any(|t| t == *ancestor)
}

/// Number of types in the chain, including `ty` itself
pub fn depth<P: MemberProvider + ?Sized>(provider: &P, ty: &P::Type) -> usize {
    walk(provider, ty.clone()).count()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::Chain;

    #[test]
    fn test_walk_leaf_to_root() {
        // 0 -> 1 -> 2 -> 3 (root)
        let chain = Chain::linear(4);
        let types: Vec<usize> = walk(&chain, 0).collect();
        assert_eq!(types, vec![0, 1, 2, 3]);
    }

    #[test]
    fn test_walk_root_is_singleton() {
        let chain = Chain::linear(3);
        let types: Vec<usize> = walk(&chain, 2).collect();
        assert_eq!(types, vec![2]);
    }

    #[test]
    fn test_walk_is_fresh_per_call() {
        let chain = Chain::linear(3);
        let mut first = walk(&chain, 0);
        assert_eq!(first.next(), Some(0));
        assert_eq!(walk(&chain, 0).count(), 3);
        assert_eq!(first.next(), Some(1));
    }

    #[test]
    fn test_is_subclass_of_is_strict() {
        let chain = Chain::linear(3);
        assert!(is_subclass_of(&chain, &0, &2));
        assert!(is_subclass_of(&chain, &0, &1));
        assert!(!is_subclass_of(&chain, &0, &0));
        assert!(!is_subclass_of(&chain, &2, &0));
    }

    #[test]
    fn test_depth() {
        let chain = Chain::linear(5);
        assert_eq!(depth(&chain, &0), 5);
        assert_eq!(depth(&chain, &4), 1);
    }
}
