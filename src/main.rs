//! Example CLI: loads a CSV dump of extracted price tables, optionally
//! imports a selection matrix and writes the report to stdout.

use std::env;
use std::fs;
use std::io::Write;

use textbook_price_list::{
    ExtractedTable, ImportOptions, RawDocument, ReportOptions, Session,
};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let mut args = env::args().skip(1);
    let Some(tables_path) = args.next() else {
        println!("Usage: textbook-price-list <extracted-tables.csv> [selection-matrix.csv]");
        return Ok(());
    };

    let document = read_tables_csv(&tables_path)?;
    let mut session = Session::new();
    let db = session.load_document(&tables_path, &document)?;
    println!("Publishers: {}", db.versions().join(", "));
    println!("Price entries: {}", db.len());

    if let Some(matrix_path) = args.next() {
        let bytes = fs::read(&matrix_path)?;
        let summary = session.import_matrix(&bytes, &ImportOptions::default())?;
        println!(
            "Imported {} line items ({} cells skipped)",
            summary.added, summary.skipped
        );
        if let Some(report) = session.export_report(&ReportOptions::default())? {
            std::io::stdout().write_all(&report)?;
        }
    }
    Ok(())
}

/// Reads extracted tables from a CSV dump; a blank record separates tables.
fn read_tables_csv(path: &str) -> Result<RawDocument, Box<dyn std::error::Error>> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_path(path)?;

    let mut tables = Vec::new();
    let mut current: Vec<Vec<Option<String>>> = Vec::new();
    for record in reader.records() {
        let record = record?;
        if record.iter().all(str::is_empty) {
            if !current.is_empty() {
                tables.push(ExtractedTable(std::mem::take(&mut current)));
            }
            continue;
        }
        current.push(
            record
                .iter()
                .map(|cell| {
                    if cell.is_empty() {
                        None
                    } else {
                        Some(cell.to_string())
                    }
                })
                .collect(),
        );
    }
    if !current.is_empty() {
        tables.push(ExtractedTable(current));
    }
    Ok(RawDocument::from_tables(tables))
}
