use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::FabricError;
use crate::model::{Currency, FabricRecord, PriceUnit};

/// Fixed RUB per USD rate.
pub const USD_RATE: Decimal = Decimal::from_parts(93, 0, 0, false, 0);

/// Converts catalog prices into the display currency (RUB) at a fixed rate.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CurrencyConverter {
    usd_rate: Decimal,
}

impl Default for CurrencyConverter {
    fn default() -> Self {
        Self { usd_rate: USD_RATE }
    }
}

impl CurrencyConverter {
    pub fn new(usd_rate: Decimal) -> Result<Self, FabricError> {
        if usd_rate <= Decimal::ZERO {
            return Err(FabricError::RequestInvalid(format!(
                "exchange rate must be positive, got {usd_rate}"
            )));
        }
        Ok(Self { usd_rate })
    }

    pub fn usd_rate(&self) -> Decimal {
        self.usd_rate
    }

    /// Amount in RUB. RUB amounts pass through unchanged; a conversion that
    /// overflows `Decimal` yields `None`.
    pub fn to_rub(&self, amount: Decimal, from: Currency) -> Option<Decimal> {
        match from {
            Currency::Rub => Some(amount),
            Currency::Usd => {
                let converted = amount.checked_mul(self.usd_rate);
                if converted.is_none() {
                    debug!(%amount, rate = %self.usd_rate, "USD price out of range, treated as missing");
                }
                converted
            }
        }
    }

    /// The record's price in `unit`, converted to RUB.
    pub fn price_rub(&self, record: &FabricRecord, unit: PriceUnit, from: Currency) -> Option<Decimal> {
        record.price(unit).and_then(|p| self.to_rub(p, from))
    }
}
