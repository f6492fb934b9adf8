use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::scoring::{CriterionScores, NormalizedWeights};
use crate::model::{Column, FabricRecord};

/// Catalog prices converted to RUB for display.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct DisplayPrices {
    pub per_meter_rub: Option<Decimal>,
    pub per_kg_rub: Option<Decimal>,
}

/// A record that survived filtering, with its derived columns.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoredRecord {
    pub record: FabricRecord,
    pub prices: DisplayPrices,
    /// Set when scoring ran.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub average_density: Option<Decimal>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub scores: Option<CriterionScores>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ahp_score: Option<f64>,
}

impl ScoredRecord {
    pub fn new(record: FabricRecord, prices: DisplayPrices) -> ScoredRecord {
        ScoredRecord {
            record,
            prices,
            average_density: None,
            scores: None,
            ahp_score: None,
        }
    }

    /// Cell text for a result column. Missing values render empty.
    pub fn cell(&self, column: &Column) -> String {
        let r = &self.record;
        match column {
            Column::Name => r.name.clone(),
            Column::Composition => r.composition.clone(),
            Column::MinDensity => decimal_cell(r.min_density),
            Column::MaxDensity => decimal_cell(r.max_density),
            Column::PricePerMeter => decimal_cell(r.price_per_meter),
            Column::PricePerKg => decimal_cell(r.price_per_kg),
            Column::City => r.city.clone(),
            Column::Color => r.color_raw.clone(),
            Column::Extra(header) => r.extra.get(header).cloned().unwrap_or_default(),
            Column::Colors => r.colors.join(", "),
            Column::PricePerMeterRub => decimal_cell(self.prices.per_meter_rub),
            Column::PricePerKgRub => decimal_cell(self.prices.per_kg_rub),
            Column::AverageDensity => decimal_cell(self.average_density),
            Column::AhpScore => self
                .ahp_score
                .map(|s| format!("{s:.4}"))
                .unwrap_or_default(),
        }
    }
}

fn decimal_cell(value: Option<Decimal>) -> String {
    value.map(|v| v.normalize().to_string()).unwrap_or_default()
}

/// Result of one evaluation pass, ready for tabular display.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Evaluation {
    /// Display columns, in order.
    pub columns: Vec<Column>,
    /// Surviving rows; sorted by AHP score when scoring ran.
    pub rows: Vec<ScoredRecord>,
    /// Normalized weights, present when scoring ran.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub weights: Option<NormalizedWeights>,
    /// Number of records in the catalog before filtering.
    pub catalog_size: usize,
}

impl Evaluation {
    pub fn is_scored(&self) -> bool {
        self.weights.is_some()
    }

    /// Rows rendered as text cells in column order.
    pub fn table(&self) -> Vec<Vec<String>> {
        self.rows
            .iter()
            .map(|row| self.columns.iter().map(|c| row.cell(c)).collect())
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;
    use std::collections::BTreeMap;

    #[test]
    fn test_cells() {
        let mut row = ScoredRecord::new(
            FabricRecord {
                name: "бязь".into(),
                min_density: Some(dec!(120.50)),
                color_raw: "Белый, Синий".into(),
                colors: vec!["белый".into(), "синий".into()],
                extra: BTreeMap::from([("Артикул".to_string(), "A-1".to_string())]),
                ..Default::default()
            },
            DisplayPrices {
                per_meter_rub: Some(dec!(930)),
                per_kg_rub: None,
            },
        );
        row.ahp_score = Some(0.87654);

        assert_eq!(row.cell(&Column::Name), "бязь");
        assert_eq!(row.cell(&Column::MinDensity), "120.5");
        assert_eq!(row.cell(&Column::MaxDensity), "");
        assert_eq!(row.cell(&Column::Color), "Белый, Синий");
        assert_eq!(row.cell(&Column::Colors), "белый, синий");
        assert_eq!(row.cell(&Column::PricePerMeterRub), "930");
        assert_eq!(row.cell(&Column::PricePerKgRub), "");
        assert_eq!(row.cell(&Column::Extra("Артикул".into())), "A-1");
        assert_eq!(row.cell(&Column::Extra("нет".into())), "");
        assert_eq!(row.cell(&Column::AhpScore), "0.8765");
    }
}
