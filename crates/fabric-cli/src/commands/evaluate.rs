use fabric_core::engine::{CurrencyConverter, EvaluateOptions};
use fabric_core::error::FabricError;
use fabric_core::request::load_request;
use fabric_core::request::schema::EvaluationRequest;
use rust_decimal::Decimal;
use std::path::PathBuf;
use tracing::debug;

use super::resolve_tiers;
use crate::output;

pub fn run(
    catalog_file: PathBuf,
    request_file: Option<PathBuf>,
    tiers_file: Option<PathBuf>,
    usd_rate: Option<Decimal>,
    output_format: &str,
    raw: bool,
) -> Result<(), FabricError> {
    let request = match &request_file {
        Some(path) => load_request(path)?,
        None => EvaluationRequest::default(),
    };

    let converter = match usd_rate {
        Some(rate) => CurrencyConverter::new(rate)?,
        None => CurrencyConverter::default(),
    };
    let options = EvaluateOptions {
        tiers: resolve_tiers(tiers_file.as_deref())?,
        converter,
    };
    debug!(usd_rate = %converter.usd_rate(), tiers = options.tiers.tiers.len(), "options resolved");

    let (catalog, evaluation) = fabric_core::evaluate_file(&catalog_file, &request, &options)?;
    output::table::print_warnings(&catalog.warnings);

    match output_format {
        "json" => output::json::print(&evaluation, raw.then_some(catalog))?,
        _ => {
            if raw {
                output::table::print_catalog(catalog);
                println!();
            }
            output::table::print(&evaluation);
        }
    }

    Ok(())
}
