use std::fmt;
use std::io::{Cursor, Read, Seek};

use calamine::{Data, Ods, Range, Reader, Xls, Xlsx};

use super::{CatalogFormat, RawCell, RawTable};
use crate::error::FabricError;

/// Read the first worksheet of a spreadsheet. Row 1 is the header row.
pub fn read_workbook(bytes: &[u8], format: CatalogFormat) -> Result<RawTable, FabricError> {
    let cursor = Cursor::new(bytes);
    let range = match format {
        CatalogFormat::Xlsx => {
            let workbook: Xlsx<_> = calamine::open_workbook_from_rs(cursor)
                .map_err(|e| FabricError::Workbook(format!("failed to open xlsx: {e}")))?;
            first_sheet(workbook)?
        }
        CatalogFormat::Xls => {
            let workbook: Xls<_> = calamine::open_workbook_from_rs(cursor)
                .map_err(|e| FabricError::Workbook(format!("failed to open xls: {e}")))?;
            first_sheet(workbook)?
        }
        CatalogFormat::Ods => {
            let workbook: Ods<_> = calamine::open_workbook_from_rs(cursor)
                .map_err(|e| FabricError::Workbook(format!("failed to open ods: {e}")))?;
            first_sheet(workbook)?
        }
        CatalogFormat::Csv => {
            return Err(FabricError::Workbook(
                "CSV is not a workbook format".into(),
            ))
        }
    };
    Ok(range_to_table(&range))
}

fn first_sheet<RS, R>(mut workbook: R) -> Result<Range<Data>, FabricError>
where
    RS: Read + Seek,
    R: Reader<RS>,
    R::Error: fmt::Display,
{
    workbook
        .worksheet_range_at(0)
        .ok_or_else(|| FabricError::Workbook("workbook has no worksheets".into()))?
        .map_err(|e| FabricError::Workbook(format!("failed to read first worksheet: {e}")))
}

fn range_to_table(range: &Range<Data>) -> RawTable {
    let mut rows = range.rows();
    let headers = match rows.next() {
        Some(first) => first.iter().map(|c| cell_to_raw(c).text()).collect(),
        None => return RawTable::default(),
    };
    RawTable {
        headers,
        rows: rows.map(|row| row.iter().map(cell_to_raw).collect()).collect(),
    }
}

fn cell_to_raw(cell: &Data) -> RawCell {
    match cell {
        Data::Empty => RawCell::Empty,
        Data::Float(f) => RawCell::Number(*f),
        Data::Int(i) => RawCell::Number(*i as f64),
        Data::String(s) => RawCell::Text(s.clone()),
        _ => RawCell::Text(format!("{cell}")),
    }
}
