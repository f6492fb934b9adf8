use rust_decimal::Decimal;
use std::collections::HashSet;
use tracing::debug;

use super::currency::CurrencyConverter;
use crate::catalog::Catalog;
use crate::delivery::DeliveryTiers;
use crate::error::FabricError;
use crate::model::{Currency, FabricRecord, PriceUnit};
use crate::request::schema::{EvaluationRequest, FabricMode};

/// A single enabled filter, resolved against the catalog and tier table.
#[derive(Debug, Clone, PartialEq)]
pub enum Predicate {
    /// Record composition must be one of these.
    Composition(HashSet<String>),
    /// Record density range must overlap [min, max].
    DensityOverlap { min: Decimal, max: Decimal },
    /// Converted price in `unit` must lie in [min, max].
    PriceRange {
        unit: PriceUnit,
        currency: Currency,
        converter: CurrencyConverter,
        min: Decimal,
        max: Decimal,
    },
    /// Record city must be one of these.
    City(HashSet<String>),
    /// Record must carry at least one of these colors.
    AnyColor(Vec<String>),
}

impl Predicate {
    pub fn name(&self) -> &'static str {
        match self {
            Predicate::Composition(_) => "fabric",
            Predicate::DensityOverlap { .. } => "density",
            Predicate::PriceRange { .. } => "price",
            Predicate::City(_) => "delivery",
            Predicate::AnyColor(_) => "color",
        }
    }

    /// Missing numeric fields never match a numeric predicate.
    pub fn matches(&self, record: &FabricRecord) -> bool {
        match self {
            Predicate::Composition(compositions) => compositions.contains(&record.composition),
            Predicate::DensityOverlap { min, max } => {
                match (record.min_density, record.max_density) {
                    (Some(rec_min), Some(rec_max)) => rec_max >= *min && rec_min <= *max,
                    _ => false,
                }
            }
            Predicate::PriceRange {
                unit,
                currency,
                converter,
                min,
                max,
            } => match converter.price_rub(record, *unit, *currency) {
                Some(price) => price >= *min && price <= *max,
                None => false,
            },
            Predicate::City(cities) => cities.contains(&record.city),
            Predicate::AnyColor(colors) => record.has_any_color(colors),
        }
    }
}

/// Build the predicates for every enabled filter of a request.
///
/// Disabled filters, and a color filter with nothing selected, contribute
/// no predicate.
pub fn build_predicates(
    catalog: &Catalog,
    request: &EvaluationRequest,
    tiers: &DeliveryTiers,
    converter: &CurrencyConverter,
) -> Result<Vec<Predicate>, FabricError> {
    let mut predicates = Vec::new();

    if request.fabric.enabled {
        let value = request.fabric.value.as_deref().unwrap_or_default();
        let compositions = match request.fabric.mode {
            FabricMode::ByName => compositions_of_name(catalog, value),
            FabricMode::ByComposition => HashSet::from([value.to_string()]),
        };
        predicates.push(Predicate::Composition(compositions));
    }

    if request.density.enabled {
        predicates.push(Predicate::DensityOverlap {
            min: request.density.min,
            max: request.density.max,
        });
    }

    if request.price.enabled {
        predicates.push(Predicate::PriceRange {
            unit: request.price.price_unit(),
            currency: request.price.currency,
            converter: *converter,
            min: request.price.min,
            max: request.price.max,
        });
    }

    if request.delivery.enabled {
        let cities = tiers.allowed_cities(&request.delivery.tier)?;
        predicates.push(Predicate::City(cities.iter().cloned().collect()));
    }

    if request.color.is_active() {
        predicates.push(Predicate::AnyColor(request.color.selected.clone()));
    }

    Ok(predicates)
}

/// Every composition carried by a record with this exact name, so that
/// fabrics of the same make-up surface alongside the named one.
pub fn compositions_of_name(catalog: &Catalog, name: &str) -> HashSet<String> {
    catalog
        .records
        .iter()
        .filter(|r| r.name == name)
        .map(|r| r.composition.clone())
        .collect()
}

/// Apply predicates in sequence, keeping catalog order.
pub fn apply_filters<'a>(
    records: &'a [FabricRecord],
    predicates: &[Predicate],
) -> Vec<&'a FabricRecord> {
    let mut remaining: Vec<&FabricRecord> = records.iter().collect();
    for predicate in predicates {
        let before = remaining.len();
        remaining.retain(|r| predicate.matches(r));
        debug!(
            filter = predicate.name(),
            before,
            after = remaining.len(),
            "filter applied"
        );
    }
    remaining
}
