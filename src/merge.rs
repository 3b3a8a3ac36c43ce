use std::collections::BTreeMap;

/// Layers one configuration object over another of the same shape.
///
/// Only fields that are set in the source overwrite the destination; unset
/// fields leave whatever the destination already holds. Applying several
/// layers in order therefore gives the last layer the highest precedence.
pub trait Merge {
    fn merge_from(&mut self, other: &Self);
}

impl<T: Merge + Clone> Merge for Option<T> {
    fn merge_from(&mut self, other: &Self) {
        let Some(src) = other else {
            return;
        };
        match self {
            Some(dst) => dst.merge_from(src),
            None => *self = Some(src.clone()),
        }
    }
}

/// Any `Some` overwrites, including zero values such as `Some(false)`.
pub fn merge_value<T: Clone>(dst: &mut Option<T>, src: &Option<T>) {
    if src.is_some() {
        dst.clone_from(src);
    }
}

/// Empty strings count as unset.
pub fn merge_string(dst: &mut Option<String>, src: &Option<String>) {
    if let Some(s) = src.as_deref().filter(|s| !s.is_empty()) {
        *dst = Some(s.to_owned());
    }
}

/// A non-empty list replaces the destination wholesale.
pub fn merge_list<T: Clone>(dst: &mut Vec<T>, src: &[T]) {
    if !src.is_empty() {
        *dst = src.to_vec();
    }
}

/// Maps merge key by key; source entries win on collision.
pub fn merge_map<K: Ord + Clone, V: Clone>(
    dst: &mut Option<BTreeMap<K, V>>,
    src: &Option<BTreeMap<K, V>>,
) {
    let Some(src) = src.as_ref().filter(|m| !m.is_empty()) else {
        return;
    };
    dst.get_or_insert_with(BTreeMap::new)
        .extend(src.iter().map(|(k, v)| (k.clone(), v.clone())));
}
