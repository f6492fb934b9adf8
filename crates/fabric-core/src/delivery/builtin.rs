use super::{parse_tiers, DeliveryTiers};
use crate::error::FabricError;

const DELIVERY_TIERS_JSON: &str = include_str!("../../../../tiers/delivery-tiers.json");

/// The builtin delivery tier table.
pub fn default_tiers() -> Result<DeliveryTiers, FabricError> {
    parse_tiers(DELIVERY_TIERS_JSON)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_builtin_tiers_load() {
        let tiers = default_tiers().unwrap();
        assert_eq!(tiers.names(), vec!["До 5 дней", "До 10 дней", "Более 15 дней"]);
        assert_eq!(
            tiers.allowed_cities("До 5 дней").unwrap(),
            &["нижний новгород".to_string()]
        );
    }

    #[test]
    fn test_builtin_tiers_strictly_nested() {
        let tiers = default_tiers().unwrap();
        let sets: Vec<HashSet<&String>> = tiers
            .tiers
            .iter()
            .map(|t| t.cities.iter().collect())
            .collect();
        for pair in sets.windows(2) {
            assert!(pair[0].is_subset(&pair[1]));
            assert!(pair[0].len() < pair[1].len());
        }
    }
}
