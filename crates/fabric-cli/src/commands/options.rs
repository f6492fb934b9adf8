use fabric_core::catalog::load_catalog;
use fabric_core::error::FabricError;
use std::path::Path;

use super::resolve_tiers;
use crate::output;

pub fn run(catalog_file: &Path, tiers_file: Option<&Path>) -> Result<(), FabricError> {
    let catalog = load_catalog(catalog_file)?;
    output::table::print_warnings(&catalog.warnings);

    print_list("Fabric names", &catalog.names());
    print_list("Compositions", &catalog.compositions());
    print_list("Colors", &catalog.colors());

    let tiers = resolve_tiers(tiers_file)?;
    println!("Delivery tiers:");
    for name in tiers.names() {
        println!("  {name}");
    }

    Ok(())
}

fn print_list(title: &str, values: &[String]) {
    println!("{title} ({}):", values.len());
    for value in values {
        println!("  {value}");
    }
    println!();
}
