use super::outcome::ScoredRecord;
use super::scoring::{Criterion, NormalizedWeights};
use crate::model::Column;

/// Source columns a criterion is judged on.
pub fn criterion_columns(criterion: Criterion) -> Vec<Column> {
    match criterion {
        Criterion::Material => vec![Column::Name, Column::Composition],
        Criterion::Density => vec![Column::MinDensity, Column::MaxDensity],
        Criterion::Price => vec![Column::PricePerMeterRub, Column::PricePerKgRub],
        Criterion::Delivery => vec![Column::City],
        Criterion::Color => vec![Column::Color],
    }
}

/// Columns of a filtered table: the catalog's own columns followed by the
/// derived color list and RUB prices.
pub fn base_columns(source: &[Column]) -> Vec<Column> {
    let mut columns = source.to_vec();
    columns.extend([
        Column::Colors,
        Column::PricePerMeterRub,
        Column::PricePerKgRub,
    ]);
    dedupe_columns(columns)
}

/// Columns of a scored table.
///
/// Columns of the heaviest criterion come first, then the AHP score, then
/// everything else in its original order.
pub fn scored_columns(source: &[Column], weights: &NormalizedWeights) -> Vec<Column> {
    let mut all = base_columns(source);
    all.extend([Column::AverageDensity, Column::AhpScore]);

    let priority: Vec<Column> = weights
        .by_priority()
        .into_iter()
        .flat_map(criterion_columns)
        .collect();
    let rest = all.into_iter().filter(|c| !priority.contains(c));

    let mut ordered = priority.clone();
    ordered.push(Column::AhpScore);
    ordered.extend(rest);
    dedupe_columns(ordered)
}

/// Keep the first occurrence of each column.
pub fn dedupe_columns(columns: Vec<Column>) -> Vec<Column> {
    let mut unique: Vec<Column> = Vec::with_capacity(columns.len());
    for column in columns {
        if !unique.contains(&column) {
            unique.push(column);
        }
    }
    unique
}

/// Sort by AHP score, highest first. Equal scores keep their order.
pub fn sort_by_score(rows: &mut [ScoredRecord]) {
    rows.sort_by(|a, b| {
        let a = a.ahp_score.unwrap_or(0.0);
        let b = b.ahp_score.unwrap_or(0.0);
        b.total_cmp(&a)
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::outcome::DisplayPrices;
    use crate::model::FabricRecord;
    use crate::request::schema::WeightConfig;

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

    #[test]
    fn test_dedupe_keeps_first() {
        let cols = vec![
            Column::City,
            Column::Name,
            Column::City,
            Column::Extra("a".into()),
            Column::Extra("a".into()),
        ];
        assert_eq!(
            dedupe_columns(cols),
            vec![Column::City, Column::Name, Column::Extra("a".into())]
        );
    }

    #[test]
    fn test_base_columns() {
        let mut source = Column::REQUIRED.to_vec();
        source.insert(2, Column::Extra("Артикул".into()));
        let cols = base_columns(&source);
        assert_eq!(cols.len(), 12);
        assert_eq!(cols[2], Column::Extra("Артикул".into()));
        assert_eq!(&cols[9..], &[
            Column::Colors,
            Column::PricePerMeterRub,
            Column::PricePerKgRub,
        ]);
    }

    #[test]
    fn test_scored_columns_follow_weight_priority() {
        let w = weights(0.1, 0.2, 0.9, 0.3, 0.0);
        let cols = scored_columns(&Column::REQUIRED, &w);
        assert_eq!(
            cols,
            vec![
                // price 0.9
                Column::PricePerMeterRub,
                Column::PricePerKgRub,
                // delivery 0.3
                Column::City,
                // density 0.2
                Column::MinDensity,
                Column::MaxDensity,
                // material 0.1
                Column::Name,
                Column::Composition,
                // color 0.0
                Column::Color,
                Column::AhpScore,
                Column::PricePerMeter,
                Column::PricePerKg,
                Column::Colors,
                Column::AverageDensity,
            ]
        );
    }

    #[test]
    fn test_scored_columns_neither_drop_nor_duplicate() {
        let mut source = Column::REQUIRED.to_vec();
        source.push(Column::Extra("Поставщик".into()));
        let w = weights(0.2, 0.25, 0.25, 0.15, 0.15);
        let cols = scored_columns(&source, &w);

        let mut expected = base_columns(&source);
        expected.extend([Column::AverageDensity, Column::AhpScore]);
        assert_eq!(cols.len(), expected.len());
        for c in &expected {
            assert_eq!(cols.iter().filter(|x| *x == c).count(), 1, "{c}");
        }
    }

    #[test]
    fn test_sort_stable_on_equal_scores() {
        let row = |name: &str, score: f64| {
            let mut r = ScoredRecord::new(
                FabricRecord {
                    name: name.into(),
                    ..Default::default()
                },
                DisplayPrices::default(),
            );
            r.ahp_score = Some(score);
            r
        };
        let mut rows = vec![
            row("a", 0.5),
            row("b", 0.9),
            row("c", 0.5),
            row("d", 0.9),
            row("e", 0.1),
            row("f", 0.5),
        ];
        sort_by_score(&mut rows);
        let order: Vec<&str> = rows.iter().map(|r| r.record.name.as_str()).collect();
        assert_eq!(order, vec!["b", "d", "a", "c", "f", "e"]);
    }
}
