use fabric_core::catalog::{Catalog, LoadWarning};
use fabric_core::engine::{DisplayPrices, Evaluation, ScoredRecord};
use fabric_core::model::Column;

/// Print an evaluation: a summary line, the ranking weights when scoring
/// ran, then the assembled table.
pub fn print(evaluation: &Evaluation) {
    println!(
        "=== {} of {} fabrics ===\n",
        evaluation.rows.len(),
        evaluation.catalog_size
    );

    if evaluation.rows.is_empty() {
        println!("  No fabrics match the selected filters.\n");
        return;
    }

    if let Some(weights) = &evaluation.weights {
        let priority: Vec<String> = weights
            .by_priority()
            .into_iter()
            .map(|c| format!("{} {:.2}", c, weights.get(c)))
            .collect();
        println!("  Ranked by: {}\n", priority.join(" > "));
    }

    print_grid(&evaluation.columns, &evaluation.table());
    println!();
}

/// Print the unfiltered catalog with its source columns.
pub fn print_catalog(catalog: &Catalog) {
    println!("=== Catalog ({} fabrics) ===\n", catalog.len());
    let rows: Vec<Vec<String>> = catalog
        .records
        .iter()
        .map(|record| {
            let row = ScoredRecord::new(record.clone(), DisplayPrices::default());
            catalog.columns.iter().map(|c| row.cell(c)).collect()
        })
        .collect();
    print_grid(&catalog.columns, &rows);
}

/// Summarize load warnings on stderr.
pub fn print_warnings(warnings: &[LoadWarning]) {
    if warnings.is_empty() {
        return;
    }
    eprintln!(
        "{} non-numeric value(s) loaded as empty:",
        warnings.len()
    );
    for w in warnings.iter().take(10) {
        eprintln!("  row {}, {}: '{}'", w.row, w.column, w.raw);
    }
    if warnings.len() > 10 {
        eprintln!("  ... and {} more", warnings.len() - 10);
    }
}

fn print_grid(columns: &[Column], rows: &[Vec<String>]) {
    let labels: Vec<&str> = columns.iter().map(|c| c.label()).collect();
    let mut widths: Vec<usize> = labels.iter().map(|l| l.chars().count()).collect();
    for row in rows {
        for (width, cell) in widths.iter_mut().zip(row) {
            *width = (*width).max(cell.chars().count());
        }
    }

    println!("  {}", format_line(&labels, &widths));
    let rule: Vec<String> = widths.iter().map(|w| "-".repeat(*w)).collect();
    println!("  {}", rule.join("  "));
    for row in rows {
        let cells: Vec<&str> = row.iter().map(String::as_str).collect();
        println!("  {}", format_line(&cells, &widths));
    }
}

// `{:<width$}` pads by chars, which keeps Cyrillic columns aligned.
fn format_line(cells: &[&str], widths: &[usize]) -> String {
    cells
        .iter()
        .zip(widths)
        .map(|(cell, width)| format!("{cell:<width$}"))
        .collect::<Vec<_>>()
        .join("  ")
        .trim_end()
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_line_pads_cyrillic_by_chars() {
        let line = format_line(&["бязь", "a"], &[6, 3]);
        assert_eq!(line, "бязь    a");
    }
}
