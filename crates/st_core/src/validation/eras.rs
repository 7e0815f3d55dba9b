use crate::config::EraRule;
use crate::models::Unit;
use std::collections::BTreeSet;

/// Eras shared by every unit; empty when `units` is empty.
pub fn common_eras(units: &[&Unit]) -> BTreeSet<String> {
    let mut iter = units.iter();
    let Some(first) = iter.next() else {
        return BTreeSet::new();
    };
    let mut common = first.eras.clone();
    for unit in iter {
        common.retain(|era| unit.eras.contains(era));
        if common.is_empty() {
            break;
        }
    }
    common
}

/// Every unit shares at least one era with some other unit.
pub fn pairwise_overlap(units: &[&Unit]) -> bool {
    units.iter().enumerate().all(|(i, unit)| {
        units.iter().enumerate().any(|(j, other)| i != j && unit.shares_era_with(other))
    })
}

pub fn compatible(units: &[&Unit], rule: EraRule) -> bool {
    match rule {
        EraRule::CommonEra => !common_eras(units).is_empty(),
        EraRule::PairwiseOverlap => pairwise_overlap(units),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Role;

    fn unit(id: &str, eras: &[&str]) -> Unit {
        Unit::new(id, id, Role::Support, 0, 1, eras.iter().copied())
    }

    #[test]
    fn test_common_eras_is_full_intersection() {
        let a = unit("a", &["Clone Wars"]);
        let b = unit("b", &["Clone Wars", "Reign of the Empire"]);
        let c = unit("c", &["Clone Wars", "Galactic Civil War"]);
        let common = common_eras(&[&a, &b, &c]);
        assert_eq!(common.into_iter().collect::<Vec<_>>(), vec!["Clone Wars"]);
    }

    #[test]
    fn test_chain_passes_pairwise_but_not_common() {
        // a-b share X, b-c share Y, a-c share nothing
        let a = unit("a", &["X"]);
        let b = unit("b", &["X", "Y"]);
        let c = unit("c", &["Y"]);
        let units = [&a, &b, &c];
        assert!(pairwise_overlap(&units));
        assert!(!compatible(&units, EraRule::CommonEra));
        assert!(compatible(&units, EraRule::PairwiseOverlap));
    }

    #[test]
    fn test_isolated_unit_fails_pairwise() {
        let a = unit("a", &["X"]);
        let b = unit("b", &["X"]);
        let c = unit("c", &["Z"]);
        assert!(!pairwise_overlap(&[&a, &b, &c]));
    }
}
