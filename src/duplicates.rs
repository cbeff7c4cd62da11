use std::collections::{BTreeSet, HashSet};
use std::hash::Hash;

/// Returns every value seen at least twice in a single left-to-right scan.
/// A value enters the result once, at its second occurrence.
pub fn duplicates<T, I>(values: I) -> BTreeSet<T>
where
    I: IntoIterator<Item = T>,
    T: Ord + Hash,
{
    let mut seen = HashSet::new();
    let mut duplicated = BTreeSet::new();
    for value in values {
        if seen.contains(&value) {
            duplicated.insert(value);
        } else {
            seen.insert(value);
        }
    }
    duplicated
}
