//! Combination-key matching
//!
//! Groups and their value rows are loaded separately and joined here by
//! group id. A group matches a combination iff both hold exactly the same
//! `(attribute_id, attribute_value_id)` pairs: same cardinality, every pair
//! present. Subset and superset never match.

use shared::models::{CombinationKey, FacetGroup, GroupValue};
use std::collections::HashMap;

/// Value pairs of each group, indexed by group id
#[derive(Debug, Default)]
pub struct GroupIndex {
    pairs: HashMap<i64, Vec<(i64, i64)>>,
}

impl GroupIndex {
    pub fn new(values: impl IntoIterator<Item = GroupValue>) -> Self {
        let mut pairs: HashMap<i64, Vec<(i64, i64)>> = HashMap::new();
        for v in values {
            pairs
                .entry(v.group_id)
                .or_default()
                .push((v.attribute_id, v.attribute_value_id));
        }
        Self { pairs }
    }

    /// Stored pairs of a group; a group without value rows is the simple group
    pub fn pairs_of(&self, group_id: i64) -> &[(i64, i64)] {
        self.pairs.get(&group_id).map(Vec::as_slice).unwrap_or(&[])
    }
}

/// First group whose stored pairs equal `combination`
pub fn find_matching<'a, P>(
    groups: &'a [FacetGroup<P>],
    index: &GroupIndex,
    combination: &CombinationKey,
) -> Option<&'a FacetGroup<P>> {
    groups
        .iter()
        .find(|g| combination.matches_pairs(index.pairs_of(g.id)))
}
