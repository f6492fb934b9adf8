use std::path::{Path, PathBuf};
use std::sync::OnceLock;

use super::{load_catalog, Catalog};
use crate::error::FabricError;

static SHARED: OnceLock<(PathBuf, Catalog)> = OnceLock::new();

/// Load the process-wide catalog once and hand out shared references.
///
/// The catalog is read-only for the rest of the process. Asking for a
/// different path after the first load is an error.
pub fn load_shared(path: &Path) -> Result<&'static Catalog, FabricError> {
    if let Some(catalog) = cached_for(path)? {
        return Ok(catalog);
    }
    let catalog = load_catalog(path)?;
    let (cached_path, cached) = SHARED.get_or_init(|| (path.to_path_buf(), catalog));
    // Another thread may have won the race with a different file.
    if cached_path != path {
        return Err(conflict(cached_path, path));
    }
    Ok(cached)
}

fn cached_for(path: &Path) -> Result<Option<&'static Catalog>, FabricError> {
    match SHARED.get() {
        Some((cached_path, catalog)) if cached_path == path => Ok(Some(catalog)),
        Some((cached_path, _)) => Err(conflict(cached_path, path)),
        None => Ok(None),
    }
}

fn conflict(cached: &Path, requested: &Path) -> FabricError {
    FabricError::CacheConflict {
        cached: cached.to_path_buf(),
        requested: requested.to_path_buf(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    // The cache is process-global, so all assertions live in one test.
    #[test]
    fn test_load_once_then_reuse() {
        let mut file = tempfile::Builder::new().suffix(".csv").tempfile().unwrap();
        writeln!(
            file,
            "Название ткани,Состав,Мин плотность (г/м2),Макс плотность (г/м2),Цена за метр,Цена за кг,Город,Цвет"
        )
        .unwrap();
        writeln!(file, "бязь,хлопок,100,150,50,,москва,белый").unwrap();
        file.flush().unwrap();

        let first = load_shared(file.path()).unwrap();
        let second = load_shared(file.path()).unwrap();
        assert!(std::ptr::eq(first, second));
        assert_eq!(first.len(), 1);

        let other = Path::new("/nonexistent/other.csv");
        assert!(matches!(
            load_shared(other),
            Err(FabricError::CacheConflict { .. })
        ));
    }
}
