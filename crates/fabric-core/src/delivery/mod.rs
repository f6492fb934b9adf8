pub mod builtin;

use crate::catalog::normalize::normalize_text;
use crate::error::FabricError;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::Path;

/// Delivery urgency tiers, fastest first. Each tier's cities include all
/// cities of the tiers before it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DeliveryTiers {
    #[serde(default)]
    pub name: Option<String>,
    pub tiers: Vec<DeliveryTier>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DeliveryTier {
    pub name: String,
    /// Origin cities that can deliver within this tier (normalized).
    pub cities: Vec<String>,
}

impl DeliveryTiers {
    pub fn names(&self) -> Vec<&str> {
        self.tiers.iter().map(|t| t.name.as_str()).collect()
    }

    /// Cities allowed under the named tier.
    pub fn allowed_cities(&self, tier: &str) -> Result<&[String], FabricError> {
        self.tiers
            .iter()
            .find(|t| t.name == tier)
            .map(|t| t.cities.as_slice())
            .ok_or_else(|| FabricError::UnknownTier {
                tier: tier.to_string(),
                available: self.names().iter().map(|s| s.to_string()).collect(),
            })
    }
}

/// Load delivery tiers from a JSON file.
pub fn load_tiers(path: &Path) -> Result<DeliveryTiers, FabricError> {
    let content = std::fs::read_to_string(path).map_err(|e| {
        FabricError::TiersInvalid(format!("failed to read {}: {e}", path.display()))
    })?;
    parse_tiers(&content)
}

/// Parse delivery tiers from a JSON string, normalizing city names.
pub fn parse_tiers(json: &str) -> Result<DeliveryTiers, FabricError> {
    let mut tiers: DeliveryTiers = serde_json::from_str(json)?;
    for tier in &mut tiers.tiers {
        tier.name = tier.name.trim().to_string();
        let mut unique = HashSet::new();
        tier.cities = tier
            .cities
            .iter()
            .map(|c| normalize_text(c))
            .filter(|c| unique.insert(c.clone()))
            .collect();
    }
    validate_tiers(&tiers)?;
    Ok(tiers)
}

/// Validate tier names and the nesting of city sets.
pub fn validate_tiers(tiers: &DeliveryTiers) -> Result<(), FabricError> {
    if tiers.tiers.is_empty() {
        return Err(FabricError::TiersInvalid("no tiers defined".into()));
    }

    let mut seen = HashSet::new();
    for tier in &tiers.tiers {
        if tier.name.is_empty() {
            return Err(FabricError::TiersInvalid(
                "tier name must not be empty".into(),
            ));
        }
        if !seen.insert(tier.name.as_str()) {
            return Err(FabricError::TiersInvalid(format!(
                "duplicate tier '{}'",
                tier.name
            )));
        }
        if tier.cities.is_empty() || tier.cities.iter().any(|c| c.is_empty()) {
            return Err(FabricError::TiersInvalid(format!(
                "tier '{}' must list at least one non-empty city",
                tier.name
            )));
        }
    }

    for pair in tiers.tiers.windows(2) {
        let (faster, slower) = (&pair[0], &pair[1]);
        if let Some(city) = faster.cities.iter().find(|c| !slower.cities.contains(c)) {
            return Err(FabricError::TiersInvalid(format!(
                "city '{}' of tier '{}' is missing from slower tier '{}'",
                city, faster.name, slower.name
            )));
        }
        let faster_count = faster.cities.iter().collect::<HashSet<_>>().len();
        let slower_count = slower.cities.iter().collect::<HashSet<_>>().len();
        if faster_count >= slower_count {
            return Err(FabricError::TiersInvalid(format!(
                "slower tier '{}' must allow more cities than tier '{}'",
                slower.name, faster.name
            )));
        }
    }

    Ok(())
}
