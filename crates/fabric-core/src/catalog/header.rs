use crate::model::Column;

/// Map a header cell to the column it denotes.
///
/// Matching is case-insensitive on the trimmed text. Both the Russian
/// labels of the catalog spreadsheet and short English aliases are
/// recognized; anything else is kept as an extra column.
pub fn recognize_header(raw: &str) -> Column {
    let lower = raw.trim().to_lowercase();
    match lower.as_str() {
        "название ткани" | "название" | "name" | "fabric" => Column::Name,
        "состав" | "composition" => Column::Composition,
        "мин плотность (г/м2)" | "мин плотность" | "min_density" => Column::MinDensity,
        "макс плотность (г/м2)" | "макс плотность" | "max_density" => Column::MaxDensity,
        "цена за метр" | "price_per_meter" => Column::PricePerMeter,
        "цена за кг" | "price_per_kg" => Column::PricePerKg,
        "город" | "city" => Column::City,
        "цвет" | "color" | "colors" => Column::Color,
        _ => Column::Extra(raw.trim().to_string()),
    }
}

/// Resolve a header row into columns, one per cell.
///
/// The first occurrence of a recognized header wins; later duplicates are
/// kept as extra columns. Blank headers are named after their position and
/// repeated extra headers get a numeric suffix, so every column is unique.
pub fn resolve_headers(headers: &[String]) -> Vec<Column> {
    let mut resolved: Vec<Column> = Vec::with_capacity(headers.len());
    for (idx, raw) in headers.iter().enumerate() {
        let column = if raw.trim().is_empty() {
            Column::Extra(format!("Unnamed: {idx}"))
        } else {
            match recognize_header(raw) {
                known if resolved.contains(&known) => Column::Extra(raw.trim().to_string()),
                column => column,
            }
        };
        let column = match column {
            Column::Extra(name) => Column::Extra(unique_extra(name, &resolved)),
            known => known,
        };
        resolved.push(column);
    }
    resolved
}

fn unique_extra(name: String, taken: &[Column]) -> String {
    let is_taken = |candidate: &str| {
        taken
            .iter()
            .any(|c| matches!(c, Column::Extra(h) if h == candidate))
    };
    if !is_taken(&name) {
        return name;
    }
    let mut n = 1;
    loop {
        let candidate = format!("{name}.{n}");
        if !is_taken(&candidate) {
            return candidate;
        }
        n += 1;
    }
}

/// Required columns absent from a resolved header row, by label.
pub fn missing_required(columns: &[Column]) -> Vec<String> {
    Column::REQUIRED
        .iter()
        .filter(|required| !columns.contains(required))
        .map(|c| c.label().to_string())
        .collect()
}
