use super::{RawCell, RawTable};
use crate::error::FabricError;

/// Read a CSV catalog. The delimiter is `;` when the header line uses
/// semicolons and no commas (common in spreadsheet exports), `,` otherwise.
pub fn read_csv(bytes: &[u8]) -> Result<RawTable, FabricError> {
    let bytes = bytes.strip_prefix(b"\xEF\xBB\xBF").unwrap_or(bytes);
    let mut reader = csv::ReaderBuilder::new()
        .delimiter(detect_delimiter(bytes))
        .flexible(true)
        .from_reader(bytes);

    let headers = reader
        .headers()?
        .iter()
        .map(str::to_string)
        .collect::<Vec<_>>();

    let mut rows = Vec::new();
    for record in reader.records() {
        let record = record?;
        rows.push(
            record
                .iter()
                .map(|field| {
                    if field.trim().is_empty() {
                        RawCell::Empty
                    } else {
                        RawCell::Text(field.to_string())
                    }
                })
                .collect(),
        );
    }

    Ok(RawTable { headers, rows })
}

fn detect_delimiter(bytes: &[u8]) -> u8 {
    let first_line = bytes.split(|b| *b == b'\n').next().unwrap_or_default();
    if first_line.contains(&b';') && !first_line.contains(&b',') {
        b';'
    } else {
        b','
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_read_comma_separated() {
        let data = "Название ткани,Состав,Цвет\nБязь,хлопок,\"красный, синий\"\n";
        let table = read_csv(data.as_bytes()).unwrap();
        assert_eq!(table.headers, vec!["Название ткани", "Состав", "Цвет"]);
        assert_eq!(table.rows.len(), 1);
        assert_eq!(table.rows[0][2], RawCell::Text("красный, синий".into()));
    }

    #[test]
    fn test_read_semicolon_separated_with_bom() {
        let data = "\u{feff}Город;Цена за метр\nМосква;12,5\nКазань;\n";
        let table = read_csv(data.as_bytes()).unwrap();
        assert_eq!(table.headers, vec!["Город", "Цена за метр"]);
        assert_eq!(table.rows[0][1], RawCell::Text("12,5".into()));
        assert_eq!(table.rows[1][1], RawCell::Empty);
    }

    #[test]
    fn test_short_rows_allowed() {
        let data = "a,b,c\n1\n";
        let table = read_csv(data.as_bytes()).unwrap();
        assert_eq!(table.rows[0].len(), 1);
    }
}
