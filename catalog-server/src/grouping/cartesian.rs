//! Variant matrix generation

use shared::models::CombinationKey;

/// Cartesian product of `(attribute_id, active value ids)` axes.
///
/// - no axes: no variants (a product without attributes is a simple product)
/// - any axis without values: no variants
///
/// Axes are expanded in ascending attribute id so the output order is stable.
pub fn variant_matrix(axes: &[(i64, Vec<i64>)]) -> Vec<CombinationKey> {
    if axes.is_empty() || axes.iter().any(|(_, values)| values.is_empty()) {
        return Vec::new();
    }

    let mut axes: Vec<&(i64, Vec<i64>)> = axes.iter().collect();
    axes.sort_by_key(|(attr, _)| *attr);

    let mut combos: Vec<Vec<(i64, i64)>> = vec![Vec::new()];
    for (attr, values) in axes {
        let mut next = Vec::with_capacity(combos.len() * values.len());
        for combo in &combos {
            for &value in values {
                let mut extended = combo.clone();
                extended.push((*attr, value));
                next.push(extended);
            }
        }
        combos = next;
    }

    combos
        .into_iter()
        .filter_map(|pairs| CombinationKey::try_from_pairs(pairs).ok())
        .collect()
}
