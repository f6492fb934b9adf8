use fabric_core::error::FabricError;
use std::path::Path;

use super::resolve_tiers;

pub fn list(tiers_file: Option<&Path>) -> Result<(), FabricError> {
    let tiers = resolve_tiers(tiers_file)?;

    match tiers.name.as_deref() {
        Some(name) => println!("{name}\n"),
        None => println!("Delivery tiers, fastest first:\n"),
    }

    let width = tiers
        .tiers
        .iter()
        .map(|t| t.name.chars().count())
        .max()
        .unwrap_or(10);
    for tier in &tiers.tiers {
        let padding = width - tier.name.chars().count();
        println!(
            "  {}{}  {}",
            tier.name,
            " ".repeat(padding),
            tier.cities.join(", ")
        );
    }
    println!();

    Ok(())
}
