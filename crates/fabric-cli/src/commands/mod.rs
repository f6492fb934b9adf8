pub mod evaluate;
pub mod options;
pub mod request;
pub mod tiers;

use fabric_core::delivery::{self, builtin, DeliveryTiers};
use fabric_core::error::FabricError;
use std::path::Path;

/// Tier table from a file, or the builtin one.
pub fn resolve_tiers(path: Option<&Path>) -> Result<DeliveryTiers, FabricError> {
    match path {
        Some(path) => delivery::load_tiers(path),
        None => builtin::default_tiers(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_resolve_tiers_from_file_or_builtin() {
        let mut file = tempfile::Builder::new().suffix(".json").tempfile().unwrap();
        write!(
            file,
            r#"{{ "tiers": [
                {{ "name": "Сегодня", "cities": ["москва"] }},
                {{ "name": "Неделя", "cities": ["москва", "тверь"] }}
            ] }}"#
        )
        .unwrap();
        file.flush().unwrap();

        let custom = resolve_tiers(Some(file.path())).unwrap();
        assert_eq!(custom.names(), vec!["Сегодня", "Неделя"]);

        let builtin = resolve_tiers(None).unwrap();
        assert_eq!(builtin.names().len(), 3);
    }
}
