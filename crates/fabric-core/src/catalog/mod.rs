pub mod cache;
pub mod delimited;
pub mod header;
pub mod normalize;
pub mod workbook;

use crate::error::FabricError;
use crate::model::{Column, FabricRecord};
use normalize::{normalize_text, parse_numeric, split_colors, NumericCell};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::path::Path;
use tracing::{debug, info};

/// A single cell as read from the source file, before interpretation.
#[derive(Debug, Clone, PartialEq)]
pub enum RawCell {
    Empty,
    Text(String),
    Number(f64),
}

impl RawCell {
    pub fn is_empty(&self) -> bool {
        match self {
            RawCell::Empty => true,
            RawCell::Text(s) => s.trim().is_empty(),
            RawCell::Number(_) => false,
        }
    }

    /// Cell content as text; numbers use their shortest form ("150", "0.35").
    pub fn text(&self) -> String {
        match self {
            RawCell::Empty => String::new(),
            RawCell::Text(s) => s.clone(),
            RawCell::Number(f) => f.to_string(),
        }
    }
}

/// A header row plus data rows, as produced by the file readers.
#[derive(Debug, Clone, Default)]
pub struct RawTable {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<RawCell>>,
}

/// A numeric cell that could not be parsed and was loaded as null.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoadWarning {
    /// 1-based row number in the source file, counting the header row.
    pub row: usize,
    pub column: String,
    pub raw: String,
}

/// The canonical, read-only record set.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Catalog {
    /// Source columns in file order.
    pub columns: Vec<Column>,
    pub records: Vec<FabricRecord>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub warnings: Vec<LoadWarning>,
}

/// Supported catalog file formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CatalogFormat {
    Xlsx,
    Xls,
    Ods,
    Csv,
}

impl CatalogFormat {
    pub fn from_path(path: &Path) -> Option<CatalogFormat> {
        let ext = path.extension()?.to_str()?.to_lowercase();
        match ext.as_str() {
            "xlsx" | "xlsm" => Some(CatalogFormat::Xlsx),
            "xls" => Some(CatalogFormat::Xls),
            "ods" => Some(CatalogFormat::Ods),
            "csv" => Some(CatalogFormat::Csv),
            _ => None,
        }
    }
}

/// Load and normalize a catalog file. Format is chosen by extension.
pub fn load_catalog(path: &Path) -> Result<Catalog, FabricError> {
    let format = CatalogFormat::from_path(path).ok_or_else(|| FabricError::CatalogLoad {
        path: path.to_path_buf(),
        reason: "unsupported file extension (expected .xlsx, .xls, .ods or .csv)".into(),
    })?;
    let bytes = std::fs::read(path).map_err(|e| FabricError::CatalogLoad {
        path: path.to_path_buf(),
        reason: e.to_string(),
    })?;
    let catalog = load_catalog_bytes(&bytes, format)?;
    info!(
        path = %path.display(),
        records = catalog.records.len(),
        warnings = catalog.warnings.len(),
        "catalog loaded"
    );
    Ok(catalog)
}

/// Load and normalize a catalog from in-memory file content.
pub fn load_catalog_bytes(bytes: &[u8], format: CatalogFormat) -> Result<Catalog, FabricError> {
    let table = match format {
        CatalogFormat::Csv => delimited::read_csv(bytes)?,
        other => workbook::read_workbook(bytes, other)?,
    };
    build_catalog(&table)
}

/// Interpret a raw table as a catalog.
///
/// Fails only when required columns are missing. Unparseable numbers become
/// null and are reported in `warnings`; fully empty rows are skipped.
pub fn build_catalog(table: &RawTable) -> Result<Catalog, FabricError> {
    let columns = header::resolve_headers(&table.headers);
    let missing = header::missing_required(&columns);
    if !missing.is_empty() {
        return Err(FabricError::MissingColumns(missing));
    }

    let mut records = Vec::with_capacity(table.rows.len());
    let mut warnings = Vec::new();

    for (idx, row) in table.rows.iter().enumerate() {
        if row.iter().all(RawCell::is_empty) {
            continue;
        }
        let row_number = idx + 2;
        let mut record = FabricRecord::default();

        for (col_idx, column) in columns.iter().enumerate() {
            let cell = row.get(col_idx).unwrap_or(&RawCell::Empty);
            let mut number = || numeric_cell(cell, row_number, column, &mut warnings);
            match column {
                Column::Name => record.name = normalize_text(&cell.text()),
                Column::Composition => record.composition = normalize_text(&cell.text()),
                Column::MinDensity => record.min_density = number(),
                Column::MaxDensity => record.max_density = number(),
                Column::PricePerMeter => record.price_per_meter = number(),
                Column::PricePerKg => record.price_per_kg = number(),
                Column::City => record.city = normalize_text(&cell.text()),
                Column::Color => {
                    let raw = cell.text();
                    record.colors = split_colors(&raw);
                    record.color_raw = raw.trim().to_string();
                }
                Column::Extra(header) => {
                    record
                        .extra
                        .insert(header.clone(), cell.text().trim().to_string());
                }
                // Derived columns never come from a header row.
                _ => {}
            }
        }
        records.push(record);
    }

    Ok(Catalog {
        columns,
        records,
        warnings,
    })
}

fn numeric_cell(
    cell: &RawCell,
    row: usize,
    column: &Column,
    warnings: &mut Vec<LoadWarning>,
) -> Option<Decimal> {
    match parse_numeric(cell) {
        NumericCell::Value(v) => Some(v),
        NumericCell::Missing => None,
        NumericCell::Unparseable(raw) => {
            debug!(row, column = %column, raw = %raw, "non-numeric value loaded as null");
            warnings.push(LoadWarning {
                row,
                column: column.label().to_string(),
                raw,
            });
            None
        }
    }
}

impl Catalog {
    /// A catalog over already-normalized records, with the canonical columns.
    pub fn from_records(records: Vec<FabricRecord>) -> Catalog {
        Catalog {
            columns: Column::REQUIRED.to_vec(),
            records,
            warnings: Vec::new(),
        }
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Distinct fabric names, sorted.
    pub fn names(&self) -> Vec<String> {
        distinct(self.records.iter().map(|r| r.name.as_str()))
    }

    /// Distinct compositions, sorted.
    pub fn compositions(&self) -> Vec<String> {
        distinct(self.records.iter().map(|r| r.composition.as_str()))
    }

    /// Distinct color tokens across all records, sorted.
    pub fn colors(&self) -> Vec<String> {
        distinct(
            self.records
                .iter()
                .flat_map(|r| r.colors.iter().map(String::as_str)),
        )
    }
}

fn distinct<'a>(values: impl Iterator<Item = &'a str>) -> Vec<String> {
    values
        .filter(|v| !v.is_empty())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .map(str::to_string)
        .collect()
}
