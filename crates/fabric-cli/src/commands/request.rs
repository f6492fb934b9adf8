use fabric_core::engine::scoring::NormalizedWeights;
use fabric_core::error::FabricError;
use fabric_core::request::load_request;
use fabric_core::request::schema::{EvaluationRequest, FabricMode};
use std::path::Path;

use super::resolve_tiers;

pub fn template() -> Result<(), FabricError> {
    let json = serde_json::to_string_pretty(&EvaluationRequest::template())?;
    println!("{json}");
    Ok(())
}

pub fn validate(file: &Path, tiers_file: Option<&Path>) -> Result<(), FabricError> {
    let request = load_request(file)?;
    if request.delivery.enabled {
        resolve_tiers(tiers_file)?.allowed_cities(&request.delivery.tier)?;
    }

    println!("Request '{}' is valid.", file.display());

    let mut enabled = Vec::new();
    if request.fabric.enabled {
        let mode = match request.fabric.mode {
            FabricMode::ByName => "name",
            FabricMode::ByComposition => "composition",
        };
        enabled.push(format!(
            "fabric by {mode} = {}",
            request.fabric.value.as_deref().unwrap_or_default()
        ));
    }
    if request.density.enabled {
        enabled.push(format!(
            "density {}..{} g/m2",
            request.density.min, request.density.max
        ));
    }
    if request.price.enabled {
        enabled.push(format!(
            "price {}..{} RUB {} ({}, catalog in {})",
            request.price.min,
            request.price.max,
            request.price.price_unit(),
            request.price.purchase_type,
            request.price.currency
        ));
    }
    if request.delivery.enabled {
        enabled.push(format!("delivery {}", request.delivery.tier));
    }
    if request.color.enabled {
        if request.color.is_active() {
            enabled.push(format!("color {}", request.color.selected.join(", ")));
        } else {
            enabled.push("color (nothing selected, no effect)".into());
        }
    }

    if enabled.is_empty() {
        println!("  Filters: none");
    } else {
        println!("  Filters:");
        for line in &enabled {
            println!("    {line}");
        }
    }

    if request.ahp.enabled {
        let weights = NormalizedWeights::from_config(&request.ahp.weights)?;
        println!("  Ranking weights (normalized):");
        for criterion in weights.by_priority() {
            println!("    {:<16} {:.3}", criterion.to_string(), weights.get(criterion));
        }
    } else {
        println!("  Ranking: off");
    }

    Ok(())
}
