pub mod schema;

use crate::catalog::normalize::normalize_text;
use crate::error::FabricError;
use rust_decimal::Decimal;
use schema::{EvaluationRequest, WeightConfig};
use std::path::Path;

/// Load an evaluation request from a JSON file.
pub fn load_request(path: &Path) -> Result<EvaluationRequest, FabricError> {
    let content = std::fs::read_to_string(path).map_err(|e| FabricError::RequestLoad {
        path: path.to_path_buf(),
        reason: e.to_string(),
    })?;
    parse_request(&content, path)
}

/// Parse an evaluation request from a JSON string.
pub fn parse_request(json: &str, source: &Path) -> Result<EvaluationRequest, FabricError> {
    let request: EvaluationRequest =
        serde_json::from_str(json).map_err(|e| FabricError::RequestLoad {
            path: source.to_path_buf(),
            reason: e.to_string(),
        })?;
    prepare_request(request)
}

/// Parse an evaluation request from a JSON string (no file path context).
pub fn parse_request_str(json: &str) -> Result<EvaluationRequest, FabricError> {
    let request: EvaluationRequest = serde_json::from_str(json).map_err(FabricError::Json)?;
    prepare_request(request)
}

/// Normalize user-supplied text and validate. Every request entering the
/// engine goes through here.
pub fn prepare_request(mut request: EvaluationRequest) -> Result<EvaluationRequest, FabricError> {
    request.fabric.value = request
        .fabric
        .value
        .as_deref()
        .map(normalize_text)
        .filter(|v| !v.is_empty());
    request.color.selected = request
        .color
        .selected
        .iter()
        .map(|c| normalize_text(c))
        .filter(|c| !c.is_empty())
        .collect();
    request.delivery.tier = request.delivery.tier.trim().to_string();

    validate_request(&request)?;
    Ok(request)
}

/// Validate that a request is well-formed.
pub fn validate_request(request: &EvaluationRequest) -> Result<(), FabricError> {
    if request.fabric.enabled
        && request
            .fabric
            .value
            .as_deref()
            .map_or(true, |v| v.trim().is_empty())
    {
        return Err(FabricError::RequestInvalid(
            "fabric filter is enabled but no value was given".into(),
        ));
    }

    validate_range("density", request.density.min, request.density.max)?;
    validate_range("price", request.price.min, request.price.max)?;

    if request.delivery.enabled && request.delivery.tier.is_empty() {
        return Err(FabricError::RequestInvalid(
            "delivery filter is enabled but no tier was given".into(),
        ));
    }

    validate_weights(&request.ahp.weights)?;
    if request.ahp.enabled && request.ahp.weights.sum() <= 0.0 {
        return Err(FabricError::ZeroWeights);
    }

    Ok(())
}

fn validate_range(what: &str, min: Decimal, max: Decimal) -> Result<(), FabricError> {
    if min.is_sign_negative() || max.is_sign_negative() {
        return Err(FabricError::RequestInvalid(format!(
            "{what} range must not be negative ({min}..{max})"
        )));
    }
    if min > max {
        return Err(FabricError::RequestInvalid(format!(
            "{what} range minimum {min} exceeds maximum {max}"
        )));
    }
    Ok(())
}

fn validate_weights(weights: &WeightConfig) -> Result<(), FabricError> {
    let named = [
        ("material", weights.material),
        ("density", weights.density),
        ("price", weights.price),
        ("delivery", weights.delivery),
        ("color", weights.color),
    ];
    for (name, w) in named {
        if !w.is_finite() || !(0.0..=1.0).contains(&w) {
            return Err(FabricError::RequestInvalid(format!(
                "weight '{name}' must be between 0 and 1, got {w}"
            )));
        }
    }
    Ok(())
}
