use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::model::{Currency, PriceUnit, PurchaseType};

/// Parameters for one evaluation pass. Absent sections are disabled.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EvaluationRequest {
    pub fabric: FabricFilter,
    pub density: DensityFilter,
    pub price: PriceFilter,
    pub delivery: DeliveryFilter,
    pub color: ColorFilter,
    pub ahp: AhpConfig,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FabricMode {
    /// Match every composition carried by any record with this name.
    #[default]
    ByName,
    ByComposition,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FabricFilter {
    pub enabled: bool,
    pub mode: FabricMode,
    /// A fabric name or a composition, depending on `mode`.
    pub value: Option<String>,
}

/// Requested density range in g/m². Matches records whose range overlaps it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DensityFilter {
    pub enabled: bool,
    pub min: Decimal,
    pub max: Decimal,
}

impl Default for DensityFilter {
    fn default() -> Self {
        Self {
            enabled: false,
            min: Decimal::from(200),
            max: Decimal::from(400),
        }
    }
}

impl DensityFilter {
    /// Midpoint of the requested range, the density score target.
    ///
    /// Computed in f64, so bounds up to `Decimal::MAX` cannot overflow.
    pub fn target(&self) -> f64 {
        let min = self.min.to_f64().unwrap_or_default();
        let max = self.max.to_f64().unwrap_or_default();
        min / 2.0 + max / 2.0
    }
}

/// Price range in RUB, applied to the converted price of the selected unit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PriceFilter {
    pub enabled: bool,
    pub purchase_type: PurchaseType,
    /// Only consulted for wholesale purchases.
    pub unit: PriceUnit,
    /// Currency the catalog prices are quoted in.
    pub currency: Currency,
    pub min: Decimal,
    pub max: Decimal,
}

impl Default for PriceFilter {
    fn default() -> Self {
        Self {
            enabled: false,
            purchase_type: PurchaseType::Retail,
            unit: PriceUnit::PerMeter,
            currency: Currency::Rub,
            min: Decimal::ZERO,
            max: Decimal::from(2000),
        }
    }
}

impl PriceFilter {
    /// Price column in effect: retail is always per meter.
    pub fn price_unit(&self) -> PriceUnit {
        match self.purchase_type {
            PurchaseType::Retail => PriceUnit::PerMeter,
            PurchaseType::Wholesale => self.unit,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DeliveryFilter {
    pub enabled: bool,
    /// Name of a delivery tier.
    pub tier: String,
}

impl Default for DeliveryFilter {
    fn default() -> Self {
        Self {
            enabled: false,
            tier: "До 5 дней".into(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ColorFilter {
    pub enabled: bool,
    pub selected: Vec<String>,
}

impl ColorFilter {
    /// An enabled filter with nothing selected does not narrow anything.
    pub fn is_active(&self) -> bool {
        self.enabled && !self.selected.is_empty()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AhpConfig {
    pub enabled: bool,
    pub weights: WeightConfig,
}

/// Raw criterion weights, each in [0, 1]. Normalized before use.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WeightConfig {
    pub material: f64,
    pub density: f64,
    pub price: f64,
    pub delivery: f64,
    pub color: f64,
}

impl Default for WeightConfig {
    fn default() -> Self {
        Self {
            material: 0.2,
            density: 0.25,
            price: 0.25,
            delivery: 0.15,
            color: 0.15,
        }
    }
}

impl WeightConfig {
    pub fn sum(&self) -> f64 {
        self.material + self.density + self.price + self.delivery + self.color
    }
}

impl EvaluationRequest {
    /// A request with every section enabled, used as a starting template.
    pub fn template() -> EvaluationRequest {
        EvaluationRequest {
            fabric: FabricFilter {
                enabled: true,
                mode: FabricMode::ByComposition,
                value: Some("хлопок 100%".into()),
            },
            density: DensityFilter {
                enabled: true,
                ..Default::default()
            },
            price: PriceFilter {
                enabled: true,
                ..Default::default()
            },
            delivery: DeliveryFilter {
                enabled: true,
                tier: "До 10 дней".into(),
            },
            color: ColorFilter {
                enabled: true,
                selected: vec!["белый".into()],
            },
            ahp: AhpConfig {
                enabled: true,
                weights: WeightConfig::default(),
            },
        }
    }
}
