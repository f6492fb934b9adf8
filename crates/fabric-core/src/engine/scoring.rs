use rust_decimal::prelude::ToPrimitive;
use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::debug;

use super::currency::CurrencyConverter;
use super::outcome::ScoredRecord;
use crate::error::FabricError;
use crate::model::{Currency, PriceUnit};
use crate::request::schema::WeightConfig;

/// Distance from the target density at which the density score reaches 0.
pub const DENSITY_TOLERANCE: f64 = 50.0;
/// Distance from the cheapest price at which the price score reaches 0.
pub const PRICE_TOLERANCE: f64 = 300.0;

/// The five ranking criteria, in declaration order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Criterion {
    Material,
    Density,
    Price,
    Delivery,
    Color,
}

impl Criterion {
    pub const ALL: [Criterion; 5] = [
        Criterion::Material,
        Criterion::Density,
        Criterion::Price,
        Criterion::Delivery,
        Criterion::Color,
    ];
}

impl fmt::Display for Criterion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Criterion::Material => write!(f, "Ткань/Состав"),
            Criterion::Density => write!(f, "Плотность"),
            Criterion::Price => write!(f, "Цена"),
            Criterion::Delivery => write!(f, "Срок доставки"),
            Criterion::Color => write!(f, "Цвет"),
        }
    }
}

/// Weights scaled to sum to 1.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct NormalizedWeights {
    pub material: f64,
    pub density: f64,
    pub price: f64,
    pub delivery: f64,
    pub color: f64,
}

impl NormalizedWeights {
    /// Divide each weight by the total. A zero (or non-finite) total has no
    /// meaningful normalization and is rejected.
    pub fn from_config(raw: &WeightConfig) -> Result<NormalizedWeights, FabricError> {
        let total = raw.sum();
        if !total.is_finite() || total <= 0.0 {
            return Err(FabricError::ZeroWeights);
        }
        Ok(NormalizedWeights {
            material: raw.material / total,
            density: raw.density / total,
            price: raw.price / total,
            delivery: raw.delivery / total,
            color: raw.color / total,
        })
    }

    pub fn get(&self, criterion: Criterion) -> f64 {
        match criterion {
            Criterion::Material => self.material,
            Criterion::Density => self.density,
            Criterion::Price => self.price,
            Criterion::Delivery => self.delivery,
            Criterion::Color => self.color,
        }
    }

    pub fn sum(&self) -> f64 {
        Criterion::ALL.iter().map(|c| self.get(*c)).sum()
    }

    /// Criteria by descending weight; equal weights keep declaration order.
    pub fn by_priority(&self) -> Vec<Criterion> {
        let mut criteria = Criterion::ALL.to_vec();
        criteria.sort_by(|a, b| self.get(*b).total_cmp(&self.get(*a)));
        criteria
    }
}

/// Per-criterion scores of one record, each in [0, 1].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CriterionScores {
    pub material: f64,
    pub density: f64,
    pub price: f64,
    pub delivery: f64,
    pub color: f64,
}

impl CriterionScores {
    pub fn get(&self, criterion: Criterion) -> f64 {
        match criterion {
            Criterion::Material => self.material,
            Criterion::Density => self.density,
            Criterion::Price => self.price,
            Criterion::Delivery => self.delivery,
            Criterion::Color => self.color,
        }
    }

    /// Weighted sum of the scores, clamped against rounding drift.
    pub fn combined(&self, weights: &NormalizedWeights) -> f64 {
        Criterion::ALL
            .iter()
            .map(|c| self.get(*c) * weights.get(*c))
            .sum::<f64>()
            .clamp(0.0, 1.0)
    }
}

/// Closeness of `value` to `best`, falling linearly to 0 at `tolerance`.
///
/// A missing value scores 1: absent information is not penalized.
pub fn norm_score(value: Option<f64>, best: f64, tolerance: f64) -> f64 {
    match value {
        Some(v) => (1.0 - (v - best).abs() / tolerance).max(0.0),
        None => 1.0,
    }
}

/// Price basis for the price criterion; present only when price filtering is on.
#[derive(Debug, Clone, Copy)]
pub struct PriceBasis {
    pub unit: PriceUnit,
    pub currency: Currency,
    pub converter: CurrencyConverter,
}

/// Everything the scorer needs besides the rows themselves.
#[derive(Debug, Clone)]
pub struct ScoringContext<'a> {
    pub weights: NormalizedWeights,
    /// Midpoint of the requested density range.
    pub density_target: f64,
    pub price: Option<PriceBasis>,
    /// Selected colors, when the color filter is enabled. An empty
    /// selection scores every row 0.
    pub colors: Option<&'a [String]>,
}

/// Score every row in place: per-criterion scores, average density and
/// the combined AHP score.
pub fn score_rows(rows: &mut [ScoredRecord], ctx: &ScoringContext<'_>) {
    let prices: Vec<Option<f64>> = match &ctx.price {
        Some(basis) => rows
            .iter()
            .map(|row| {
                basis
                    .converter
                    .price_rub(&row.record, basis.unit, basis.currency)
                    .and_then(|p| p.to_f64())
            })
            .collect(),
        None => vec![None; rows.len()],
    };
    let best_price = prices
        .iter()
        .flatten()
        .copied()
        .min_by(|a, b| a.total_cmp(b));

    debug!(
        weights = ?ctx.weights,
        density_target = ctx.density_target,
        best_price = ?best_price,
        rows = rows.len(),
        "scoring rows"
    );

    for (row, price) in rows.iter_mut().zip(prices) {
        let average = row.record.average_density();
        let density = norm_score(
            average.and_then(|d| d.to_f64()),
            ctx.density_target,
            DENSITY_TOLERANCE,
        );
        let price = match (ctx.price.is_some(), best_price) {
            (true, Some(best)) => norm_score(price, best, PRICE_TOLERANCE),
            _ => 1.0,
        };
        let color = match ctx.colors {
            Some(selected) if !row.record.has_any_color(selected) => 0.0,
            _ => 1.0,
        };
        let scores = CriterionScores {
            material: 1.0,
            density,
            price,
            delivery: 1.0,
            color,
        };
        row.average_density = average;
        row.ahp_score = Some(scores.combined(&ctx.weights));
        row.scores = Some(scores);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::outcome::DisplayPrices;
    use crate::model::FabricRecord;
    use rust_decimal::Decimal;

    fn weights(m: f64, d: f64, p: f64, dl: f64, c: f64) -> NormalizedWeights {
        NormalizedWeights::from_config(&WeightConfig {
            material: m,
            density: d,
            price: p,
            delivery: dl,
            color: c,
        })
        .unwrap()
    }

    fn row(density: (i64, i64), price: Option<i64>, colors: &[&str]) -> ScoredRecord {
        ScoredRecord::new(
            FabricRecord {
                min_density: Some(Decimal::from(density.0)),
                max_density: Some(Decimal::from(density.1)),
                price_per_meter: price.map(Decimal::from),
                colors: colors.iter().map(|c| c.to_string()).collect(),
                ..Default::default()
            },
            DisplayPrices::default(),
        )
    }

    #[test]
    fn test_norm_score_bounds() {
        for value in [-1000.0, -50.0, 0.0, 25.0, 49.9, 50.0, 75.0, 1e9] {
            let s = norm_score(Some(value), 0.0, 50.0);
            assert!((0.0..=1.0).contains(&s), "score {s} for {value}");
        }
        assert_eq!(norm_score(Some(10.0), 10.0, 50.0), 1.0);
        assert_eq!(norm_score(Some(35.0), 10.0, 50.0), 0.5);
        assert_eq!(norm_score(Some(100.0), 10.0, 50.0), 0.0);
    }

    #[test]
    fn test_norm_score_missing_is_one() {
        assert_eq!(norm_score(None, 300.0, 50.0), 1.0);
    }

    #[test]
    fn test_normalized_weights_sum_to_one() {
        for raw in [
            (0.2, 0.25, 0.25, 0.15, 0.15),
            (1.0, 1.0, 1.0, 1.0, 1.0),
            (0.0, 0.0, 0.7, 0.0, 0.0),
            (0.01, 0.33, 0.9, 0.07, 0.5),
        ] {
            let w = weights(raw.0, raw.1, raw.2, raw.3, raw.4);
            assert!((w.sum() - 1.0).abs() < 1e-9);
        }
    }

    #[test]
    fn test_zero_weights_rejected() {
        let zero = WeightConfig {
            material: 0.0,
            density: 0.0,
            price: 0.0,
            delivery: 0.0,
            color: 0.0,
        };
        assert!(matches!(
            NormalizedWeights::from_config(&zero),
            Err(FabricError::ZeroWeights)
        ));
    }

    #[test]
    fn test_priority_order_stable_on_ties() {
        let w = weights(0.2, 0.25, 0.25, 0.15, 0.15);
        assert_eq!(
            w.by_priority(),
            vec![
                Criterion::Density,
                Criterion::Price,
                Criterion::Material,
                Criterion::Delivery,
                Criterion::Color,
            ]
        );
    }

    #[test]
    fn test_combined_monotonic_in_each_criterion() {
        let w = weights(0.2, 0.25, 0.25, 0.15, 0.15);
        let base = CriterionScores {
            material: 0.5,
            density: 0.5,
            price: 0.5,
            delivery: 0.5,
            color: 0.5,
        };
        for criterion in Criterion::ALL {
            let mut prev = f64::NEG_INFINITY;
            for step in 0..=10 {
                let mut s = base;
                let v = step as f64 / 10.0;
                match criterion {
                    Criterion::Material => s.material = v,
                    Criterion::Density => s.density = v,
                    Criterion::Price => s.price = v,
                    Criterion::Delivery => s.delivery = v,
                    Criterion::Color => s.color = v,
                }
                let combined = s.combined(&w);
                assert!(combined >= prev);
                assert!((0.0..=1.0).contains(&combined));
                prev = combined;
            }
        }
    }

    #[test]
    fn test_score_rows_density_and_price() {
        let mut rows = vec![
            row((140, 160), Some(100), &[]),
            row((100, 150), Some(250), &[]),
            row((300, 400), Some(700), &[]),
        ];
        let ctx = ScoringContext {
            weights: weights(0.0, 0.5, 0.5, 0.0, 0.0),
            density_target: 150.0,
            price: Some(PriceBasis {
                unit: PriceUnit::PerMeter,
                currency: Currency::Rub,
                converter: CurrencyConverter::default(),
            }),
            colors: None,
        };
        score_rows(&mut rows, &ctx);

        let s0 = rows[0].scores.unwrap();
        assert_eq!(s0.density, 1.0);
        assert_eq!(s0.price, 1.0);
        let s1 = rows[1].scores.unwrap();
        // avg 125, |125-150|/50 = 0.5
        assert_eq!(s1.density, 0.5);
        // |250-100|/300 = 0.5
        assert_eq!(s1.price, 0.5);
        let s2 = rows[2].scores.unwrap();
        assert_eq!(s2.density, 0.0);
        assert_eq!(s2.price, 0.0);

        assert_eq!(rows[0].ahp_score, Some(1.0));
        assert_eq!(rows[1].ahp_score, Some(0.5));
        assert_eq!(rows[2].ahp_score, Some(0.0));
        assert_eq!(rows[1].average_density, Some(Decimal::from(125)));
    }

    #[test]
    fn test_price_disabled_scores_one() {
        let mut rows = vec![row((1, 2), Some(10), &[]), row((1, 2), Some(10000), &[])];
        let ctx = ScoringContext {
            weights: weights(0.2, 0.25, 0.25, 0.15, 0.15),
            density_target: 1.5,
            price: None,
            colors: None,
        };
        score_rows(&mut rows, &ctx);
        assert!(rows.iter().all(|r| r.scores.unwrap().price == 1.0));
        for r in &rows {
            assert!((r.ahp_score.unwrap() - 1.0).abs() < 1e-9);
        }
    }

    #[test]
    fn test_missing_density_scores_one() {
        let mut r = row((1, 2), None, &[]);
        r.record.max_density = None;
        let mut rows = vec![r];
        let ctx = ScoringContext {
            weights: weights(0.0, 1.0, 0.0, 0.0, 0.0),
            density_target: 900.0,
            price: None,
            colors: None,
        };
        score_rows(&mut rows, &ctx);
        assert_eq!(rows[0].scores.unwrap().density, 1.0);
        assert_eq!(rows[0].average_density, None);
    }

    #[test]
    fn test_color_score() {
        let selected = vec!["красный".to_string()];
        let mut rows = vec![row((1, 2), None, &["красный"]), row((1, 2), None, &["синий"])];
        let ctx = ScoringContext {
            weights: weights(0.0, 0.0, 0.0, 0.0, 1.0),
            density_target: 1.5,
            price: None,
            colors: Some(&selected),
        };
        score_rows(&mut rows, &ctx);
        assert_eq!(rows[0].scores.unwrap().color, 1.0);
        assert_eq!(rows[1].scores.unwrap().color, 0.0);

        let ctx = ScoringContext { colors: None, ..ctx };
        score_rows(&mut rows, &ctx);
        assert_eq!(rows[1].scores.unwrap().color, 1.0);

        // Enabled with an empty selection: nothing matches
        let ctx = ScoringContext {
            colors: Some(&[]),
            ..ctx
        };
        score_rows(&mut rows, &ctx);
        assert_eq!(rows[0].scores.unwrap().color, 0.0);
        assert_eq!(rows[1].scores.unwrap().color, 0.0);
    }
}
