use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// One row of the fabric catalog, normalized at load time.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FabricRecord {
    pub name: String,
    pub composition: String,
    /// Grams per square meter.
    pub min_density: Option<Decimal>,
    pub max_density: Option<Decimal>,
    /// Prices as quoted in the catalog, before currency conversion.
    pub price_per_meter: Option<Decimal>,
    pub price_per_kg: Option<Decimal>,
    pub city: String,
    /// The color cell as it appeared in the catalog (trimmed).
    pub color_raw: String,
    pub colors: Vec<String>,
    /// Cells of unrecognized columns, keyed by header text.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub extra: BTreeMap<String, String>,
}

impl FabricRecord {
    /// Quoted price in the given unit.
    pub fn price(&self, unit: PriceUnit) -> Option<Decimal> {
        match unit {
            PriceUnit::PerMeter => self.price_per_meter,
            PriceUnit::PerKg => self.price_per_kg,
        }
    }

    /// Midpoint of the density range; null if either bound is missing or
    /// the midpoint is not representable.
    pub fn average_density(&self) -> Option<Decimal> {
        let (min, max) = (self.min_density?, self.max_density?);
        match min.checked_add(max) {
            Some(sum) => Some(sum / Decimal::TWO),
            None => (min / Decimal::TWO).checked_add(max / Decimal::TWO),
        }
    }

    /// True if any of `selected` is one of this record's colors.
    pub fn has_any_color(&self, selected: &[String]) -> bool {
        selected
            .iter()
            .any(|c| self.colors.iter().any(|own| own == c.trim()))
    }
}

/// A displayable column of the result table.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Column {
    Name,
    Composition,
    MinDensity,
    MaxDensity,
    PricePerMeter,
    PricePerKg,
    City,
    Color,
    /// A catalog column the loader does not interpret.
    Extra(String),
    Colors,
    PricePerMeterRub,
    PricePerKgRub,
    AverageDensity,
    AhpScore,
}

impl Column {
    /// Columns the catalog must provide, in canonical order.
    pub const REQUIRED: [Column; 8] = [
        Column::Name,
        Column::Composition,
        Column::MinDensity,
        Column::MaxDensity,
        Column::PricePerMeter,
        Column::PricePerKg,
        Column::City,
        Column::Color,
    ];

    pub fn label(&self) -> &str {
        match self {
            Column::Name => "Название ткани",
            Column::Composition => "Состав",
            Column::MinDensity => "Мин плотность (г/м2)",
            Column::MaxDensity => "Макс плотность (г/м2)",
            Column::PricePerMeter => "Цена за метр",
            Column::PricePerKg => "Цена за кг",
            Column::City => "Город",
            Column::Color => "Цвет",
            Column::Extra(header) => header,
            Column::Colors => "Цвета",
            Column::PricePerMeterRub => "Цена за метр (в руб)",
            Column::PricePerKgRub => "Цена за кг (в руб)",
            Column::AverageDensity => "Средняя плотность",
            Column::AhpScore => "AHP_оценка",
        }
    }
}

impl fmt::Display for Column {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Currency the catalog prices are quoted in.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Currency {
    #[default]
    Rub,
    Usd,
}

impl fmt::Display for Currency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Currency::Rub => write!(f, "RUB"),
            Currency::Usd => write!(f, "USD"),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PurchaseType {
    #[default]
    Retail,
    Wholesale,
}

impl fmt::Display for PurchaseType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PurchaseType::Retail => write!(f, "retail"),
            PurchaseType::Wholesale => write!(f, "wholesale"),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PriceUnit {
    #[default]
    PerMeter,
    PerKg,
}

impl fmt::Display for PriceUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PriceUnit::PerMeter => write!(f, "per meter"),
            PriceUnit::PerKg => write!(f, "per kg"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn record() -> FabricRecord {
        FabricRecord {
            name: "бязь".into(),
            composition: "хлопок 100%".into(),
            min_density: Some(dec!(100)),
            max_density: Some(dec!(150)),
            price_per_meter: Some(dec!(50)),
            price_per_kg: None,
            city: "москва".into(),
            color_raw: "Красный, синий".into(),
            colors: vec!["красный".into(), "синий".into()],
            extra: BTreeMap::new(),
        }
    }

    #[test]
    fn test_average_density() {
        assert_eq!(record().average_density(), Some(dec!(125)));
        let mut r = record();
        r.max_density = None;
        assert_eq!(r.average_density(), None);
    }

    #[test]
    fn test_average_density_at_decimal_limits() {
        let mut r = record();
        r.min_density = Some(dec!(1));
        r.max_density = Some(Decimal::MAX);
        assert!(r.average_density().is_some());
        r.min_density = Some(Decimal::MAX);
        assert!(r.average_density().is_some());
    }

    #[test]
    fn test_price_by_unit() {
        let r = record();
        assert_eq!(r.price(PriceUnit::PerMeter), Some(dec!(50)));
        assert_eq!(r.price(PriceUnit::PerKg), None);
    }

    #[test]
    fn test_has_any_color() {
        let r = record();
        assert!(r.has_any_color(&["синий".into()]));
        assert!(r.has_any_color(&["зелёный".into(), " красный ".into()]));
        assert!(!r.has_any_color(&["зелёный".into()]));
        assert!(!r.has_any_color(&[]));
    }

    #[test]
    fn test_currency_serde() {
        let c: Currency = serde_json::from_str("\"USD\"").unwrap();
        assert_eq!(c, Currency::Usd);
        assert_eq!(serde_json::to_string(&Currency::Rub).unwrap(), "\"RUB\"");
    }
}
