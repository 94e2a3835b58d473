//! Combination key
//!
//! Canonical, order-independent encoding of a partial map
//! `attribute_id → attribute_value_id`. A key identifies a facet group
//! (restricted to the attributes controlling that facet) or a variant
//! (the full attribute map).
//!
//! - JSON form: `{"3": 12, "7": 40}`
//! - Storage form: `3:12|7:40` (ascending attribute id, empty string for the simple group)

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Errors raised while building or parsing a combination key
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CombinationError {
    #[error("attribute {attribute_id} is given two values ({first} and {second})")]
    ConflictingValue {
        attribute_id: i64,
        first: i64,
        second: i64,
    },
    #[error("malformed combination key: {0}")]
    Malformed(String),
}

/// Sorted set of `(attribute_id, attribute_value_id)` pairs, one per attribute
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(into = "BTreeMap<i64, i64>", from = "BTreeMap<i64, i64>")]
pub struct CombinationKey(Vec<(i64, i64)>);

impl CombinationKey {
    /// The empty key (simple group)
    pub fn empty() -> Self {
        Self(Vec::new())
    }

    /// Build a key from pairs in any order.
    ///
    /// Repeating an identical pair is tolerated; repeating an attribute with a
    /// different value is rejected.
    pub fn try_from_pairs<I>(pairs: I) -> Result<Self, CombinationError>
    where
        I: IntoIterator<Item = (i64, i64)>,
    {
        let mut pairs: Vec<(i64, i64)> = pairs.into_iter().collect();
        pairs.sort_unstable();
        pairs.dedup();
        if let Some(w) = pairs.windows(2).find(|w| w[0].0 == w[1].0) {
            return Err(CombinationError::ConflictingValue {
                attribute_id: w[0].0,
                first: w[0].1,
                second: w[1].1,
            });
        }
        Ok(Self(pairs))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn pairs(&self) -> &[(i64, i64)] {
        &self.0
    }

    pub fn attribute_ids(&self) -> impl Iterator<Item = i64> + '_ {
        self.0.iter().map(|(a, _)| *a)
    }

    /// Value chosen for `attribute_id`, if the key covers it
    pub fn value_of(&self, attribute_id: i64) -> Option<i64> {
        self.0
            .binary_search_by_key(&attribute_id, |(a, _)| *a)
            .ok()
            .map(|idx| self.0[idx].1)
    }

    /// Sub-key keeping only the attributes accepted by `keep`
    pub fn restrict_to(&self, keep: impl Fn(i64) -> bool) -> Self {
        Self(self.0.iter().copied().filter(|(a, _)| keep(*a)).collect())
    }

    /// Exact set equality against an unordered list of stored pairs.
    ///
    /// Cardinalities must agree: `{A:1}` never matches `{A:1, B:2}`.
    pub fn matches_pairs(&self, pairs: &[(i64, i64)]) -> bool {
        pairs.len() == self.0.len() && pairs.iter().all(|p| self.0.binary_search(p).is_ok())
    }
}

impl fmt::Display for CombinationKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, (attr, value)) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str("|")?;
            }
            write!(f, "{attr}:{value}")?;
        }
        Ok(())
    }
}

impl FromStr for CombinationKey {
    type Err = CombinationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.is_empty() {
            return Ok(Self::empty());
        }
        let pairs = s
            .split('|')
            .map(|part| {
                let (attr, value) = part
                    .split_once(':')
                    .ok_or_else(|| CombinationError::Malformed(s.to_string()))?;
                let attr = attr
                    .parse::<i64>()
                    .map_err(|_| CombinationError::Malformed(s.to_string()))?;
                let value = value
                    .parse::<i64>()
                    .map_err(|_| CombinationError::Malformed(s.to_string()))?;
                Ok((attr, value))
            })
            .collect::<Result<Vec<_>, CombinationError>>()?;
        Self::try_from_pairs(pairs)
    }
}

impl TryFrom<String> for CombinationKey {
    type Error = CombinationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<BTreeMap<i64, i64>> for CombinationKey {
    fn from(map: BTreeMap<i64, i64>) -> Self {
        Self(map.into_iter().collect())
    }
}

impl From<CombinationKey> for BTreeMap<i64, i64> {
    fn from(key: CombinationKey) -> Self {
        key.0.into_iter().collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(pairs: &[(i64, i64)]) -> CombinationKey {
        CombinationKey::try_from_pairs(pairs.iter().copied()).unwrap()
    }

    #[test]
    fn test_order_independent() {
        assert_eq!(key(&[(1, 10), (2, 20)]), key(&[(2, 20), (1, 10)]));
        assert_eq!(key(&[(2, 20), (1, 10)]).to_string(), "1:10|2:20");
    }

    #[test]
    fn test_conflicting_value_rejected() {
        let err = CombinationKey::try_from_pairs([(1, 10), (1, 11)]).unwrap_err();
        assert_eq!(
            err,
            CombinationError::ConflictingValue {
                attribute_id: 1,
                first: 10,
                second: 11
            }
        );
    }

    #[test]
    fn test_repeated_identical_pair_collapses() {
        assert_eq!(key(&[(1, 10), (1, 10)]).len(), 1);
    }

    #[test]
    fn test_matches_pairs_is_cardinality_strict() {
        let single = key(&[(1, 10)]);
        let double = key(&[(1, 10), (2, 20)]);
        assert!(single.matches_pairs(&[(1, 10)]));
        assert!(!single.matches_pairs(&[(1, 10), (2, 20)]));
        assert!(!double.matches_pairs(&[(1, 10)]));
        assert!(double.matches_pairs(&[(2, 20), (1, 10)]));
        assert!(!double.matches_pairs(&[(2, 21), (1, 10)]));
        assert!(CombinationKey::empty().matches_pairs(&[]));
    }

    #[test]
    fn test_restrict_to() {
        let full = key(&[(1, 10), (2, 20), (3, 30)]);
        assert_eq!(full.restrict_to(|a| a != 2), key(&[(1, 10), (3, 30)]));
        assert!(full.restrict_to(|_| false).is_empty());
        assert_eq!(full.value_of(3), Some(30));
        assert_eq!(full.value_of(4), None);
    }

    #[test]
    fn test_parse_storage_form() {
        assert_eq!("".parse::<CombinationKey>().unwrap(), CombinationKey::empty());
        assert_eq!(
            "2:20|1:10".parse::<CombinationKey>().unwrap(),
            key(&[(1, 10), (2, 20)])
        );
        assert!(matches!(
            "1-10".parse::<CombinationKey>(),
            Err(CombinationError::Malformed(_))
        ));
        assert!(matches!(
            "1:x".parse::<CombinationKey>(),
            Err(CombinationError::Malformed(_))
        ));
    }

    #[test]
    fn test_json_is_map() {
        let k = key(&[(7, 40), (3, 12)]);
        let json = serde_json::to_string(&k).unwrap();
        assert_eq!(json, r#"{"3":12,"7":40}"#);
        let back: CombinationKey = serde_json::from_str(r#"{"7":40,"3":12}"#).unwrap();
        assert_eq!(back, k);
    }
}
