//! Member name handling
//!
//! Hosts may surface compiler-generated names such as `<Score>k__BackingField`
//! for the storage behind an auto-property. Everything above the provider
//! works with the logical name (`Score`) instead.

/// Recover the declared name from a synthetic member name.
///
/// A name starting with `<` is cut down to the text between that `<` and the
/// first `>`. Names without the leading `<`, or without a closing `>`, are
/// returned unchanged.
pub fn normalize_member_name(raw: &str) -> &str {
    let Some(rest) = raw.strip_prefix('<') else {
        return raw;
    };
    match rest.find('>') {
        Some(end) => &rest[..end],
        None => raw,
    }
}

/// Case-folded key used for case-insensitive name comparison.
///
/// Folds one char at a time using simple (one-to-one) uppercase mappings. A
/// char whose uppercase form expands to several chars, such as `ß`, is kept
/// as is, so the key always has the same number of chars as the name.
pub fn fold_case(name: &str) -> String {
    name.chars().map(fold_char).collect()
}

fn fold_char(c: char) -> char {
    let mut upper = c.to_uppercase();
    match (upper.next(), upper.next()) {
        (Some(single), None) => single,
        _ => c,
    }
}

/// Compare two names ignoring case
pub fn eq_ignore_case(a: &str, b: &str) -> bool {
    a == b || fold_case(a) == fold_case(b)
}
