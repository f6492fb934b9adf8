use fabric_core::catalog::Catalog;
use fabric_core::engine::Evaluation;
use fabric_core::error::FabricError;

pub fn print(evaluation: &Evaluation, raw: Option<&Catalog>) -> Result<(), FabricError> {
    let json = match raw {
        Some(catalog) => serde_json::to_string_pretty(&serde_json::json!({
            "catalog": catalog,
            "result": evaluation,
        }))?,
        None => serde_json::to_string_pretty(evaluation)?,
    };
    println!("{json}");
    Ok(())
}
