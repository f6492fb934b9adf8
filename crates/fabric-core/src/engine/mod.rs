pub mod assemble;
pub mod currency;
pub mod filter;
pub mod outcome;
pub mod scoring;

pub use currency::CurrencyConverter;
pub use outcome::{DisplayPrices, Evaluation, ScoredRecord};

use tracing::debug;

use crate::catalog::Catalog;
use crate::delivery::{builtin, DeliveryTiers};
use crate::error::FabricError;
use crate::model::PriceUnit;
use crate::request::prepare_request;
use crate::request::schema::EvaluationRequest;
use scoring::{NormalizedWeights, PriceBasis, ScoringContext};

/// Fixed inputs of the engine that do not change between requests.
#[derive(Debug, Clone)]
pub struct EvaluateOptions {
    pub tiers: DeliveryTiers,
    pub converter: CurrencyConverter,
}

impl EvaluateOptions {
    /// Builtin delivery tiers and the default exchange rate.
    pub fn builtin() -> Result<EvaluateOptions, FabricError> {
        Ok(EvaluateOptions {
            tiers: builtin::default_tiers()?,
            converter: CurrencyConverter::default(),
        })
    }
}

/// Run one evaluation pass: filter, convert prices, score and assemble.
///
/// The catalog is only read. Everything in the returned evaluation is
/// owned by the caller.
pub fn evaluate(
    catalog: &Catalog,
    request: &EvaluationRequest,
    options: &EvaluateOptions,
) -> Result<Evaluation, FabricError> {
    let request = prepare_request(request.clone())?;

    let predicates =
        filter::build_predicates(catalog, &request, &options.tiers, &options.converter)?;
    let survivors = filter::apply_filters(&catalog.records, &predicates);

    let currency = request.price.currency;
    let mut rows: Vec<ScoredRecord> = survivors
        .into_iter()
        .map(|record| {
            let prices = DisplayPrices {
                per_meter_rub: options
                    .converter
                    .price_rub(record, PriceUnit::PerMeter, currency),
                per_kg_rub: options.converter.price_rub(record, PriceUnit::PerKg, currency),
            };
            ScoredRecord::new(record.clone(), prices)
        })
        .collect();

    if !request.ahp.enabled || rows.is_empty() {
        debug!(rows = rows.len(), "returning unscored result");
        return Ok(Evaluation {
            columns: assemble::base_columns(&catalog.columns),
            rows,
            weights: None,
            catalog_size: catalog.len(),
        });
    }

    let weights = NormalizedWeights::from_config(&request.ahp.weights)?;
    let ctx = ScoringContext {
        weights,
        density_target: request.density.target(),
        price: request.price.enabled.then_some(PriceBasis {
            unit: request.price.price_unit(),
            currency,
            converter: options.converter,
        }),
        colors: request
            .color
            .enabled
            .then_some(request.color.selected.as_slice()),
    };
    scoring::score_rows(&mut rows, &ctx);
    assemble::sort_by_score(&mut rows);

    Ok(Evaluation {
        columns: assemble::scored_columns(&catalog.columns, &weights),
        rows,
        weights: Some(weights),
        catalog_size: catalog.len(),
    })
}
