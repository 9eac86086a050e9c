//! Column location and row classification over extracted tables.

use crate::database::PriceDatabase;
use crate::error::PriceListError;
use crate::raw::{Cell, ExtractedTable, RawDocument};
use crate::types::{BookKey, Category, PUBLISHERS};
use crate::utils::{clean_cell, clean_subject, normalize_price};

/// Keyword marking the grade column in a header cell.
const GRADE_HEADER: &str = "年級";
/// Keywords marking the subject column (科目 or the learning-domain form).
const SUBJECT_HEADERS: [&str; 2] = ["科目", "領域"];
/// Keyword marking the volume column (matches 冊 and 冊別 alike).
const VOLUME_HEADER: &str = "冊";

/// Tables narrower than this in their first row are noise (captions etc.).
const MIN_TABLE_WIDTH: usize = 4;

/// Tuning knobs for the column locator.
#[derive(Debug, Clone, Copy)]
pub struct ScanOptions {
    /// How many leading rows of each table to scan for header cells. Must
    /// be deep enough to reach the header but shallow enough not to pick up
    /// publisher-like text from data rows.
    pub header_scan_rows: usize,
    /// When true, every table is rescanned and newly found publisher
    /// columns accumulate; when false, scanning stops for good once any
    /// publisher has been found and later tables reuse the columns.
    pub rescan_per_table: bool,
}

impl Default for ScanOptions {
    fn default() -> Self {
        Self {
            header_scan_rows: 10,
            rescan_per_table: true,
        }
    }
}

/// Located column roles for one document.
///
/// The defaults reflect the typical layout and stand whenever header
/// detection finds no override.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnMap {
    /// Index of the grade column.
    pub grade: usize,
    /// Index of the subject column.
    pub subject: usize,
    /// Index of the volume column.
    pub volume: usize,
    /// Detected publisher columns as (name, index) pairs, deduplicated by
    /// pair: the same publisher may legitimately repeat at a different
    /// column on another table.
    pub versions: Vec<(String, usize)>,
}

impl Default for ColumnMap {
    fn default() -> Self {
        Self {
            grade: 2,
            subject: 1,
            volume: 3,
            versions: Vec::new(),
        }
    }
}

impl ColumnMap {
    /// Scans the leading rows of one table for publisher names and
    /// grade/subject/volume header keywords, updating the map in place.
    pub fn scan_table(&mut self, table: &ExtractedTable, options: &ScanOptions) {
        let limit = options.header_scan_rows.min(table.rows().len());
        for row in &table.rows()[..limit] {
            for (index, cell) in row.iter().enumerate() {
                let Some(raw) = cell.as_deref() else {
                    continue;
                };
                let text = clean_cell(raw);
                for name in PUBLISHERS {
                    let pair = (name.to_string(), index);
                    if text.contains(name) && !self.versions.contains(&pair) {
                        self.versions.push(pair);
                    }
                }
                if text.contains(GRADE_HEADER) {
                    self.grade = index;
                }
                if SUBJECT_HEADERS.iter().any(|k| text.contains(k)) {
                    self.subject = index;
                }
                if text.contains(VOLUME_HEADER) {
                    self.volume = index;
                }
            }
            if !options.rescan_per_table && !self.versions.is_empty() {
                break;
            }
        }
    }
}

impl RawDocument {
    /// Walks every table of every page and folds classified price rows into
    /// a fresh [`PriceDatabase`].
    ///
    /// A document with zero classified rows is a recognition failure; rows
    /// and tables that fail a precondition are silently skipped.
    pub fn parse_prices(&self, options: &ScanOptions) -> Result<PriceDatabase, PriceListError> {
        let mut columns = ColumnMap::default();
        let mut db = PriceDatabase::default();
        let mut any_accepted = false;

        for table in self.tables() {
            let Some(first) = table.rows().first() else {
                continue;
            };
            if first.len() < MIN_TABLE_WIDTH {
                continue;
            }
            if options.rescan_per_table || columns.versions.is_empty() {
                columns.scan_table(table, options);
            }
            any_accepted |= collect_price_rows(&mut db, table, &columns);
        }

        if !any_accepted {
            return Err(PriceListError::FormatNotRecognized);
        }
        for (name, _) in &columns.versions {
            db.register_version(name);
        }
        Ok(db)
    }
}

/// Folds one table's classified rows into the database; returns whether any
/// row passed the grade/subject preconditions.
pub(crate) fn collect_price_rows(
    db: &mut PriceDatabase,
    table: &ExtractedTable,
    columns: &ColumnMap,
) -> bool {
    let mut any_accepted = false;
    for row in table.rows() {
        let joined: String = row.iter().flatten().map(String::as_str).collect();
        let Some(category) = Category::classify(&joined) else {
            continue;
        };
        let (Some(grade), Some(subject)) = (
            cell_text(row, columns.grade),
            cell_text(row, columns.subject),
        ) else {
            continue;
        };
        any_accepted = true;

        let key = BookKey::new(
            grade,
            clean_subject(&subject),
            cell_text(row, columns.volume).unwrap_or_default(),
        );
        db.touch(key.clone());
        for (publisher, column) in &columns.versions {
            if let Some(cell) = row.get(*column) {
                let price = normalize_price(cell.as_deref());
                db.insert_price(key.clone(), category, publisher.clone(), price);
            }
        }
    }
    any_accepted
}

/// Cleaned text of the cell at `index`, or `None` when the cell is out of
/// range, absent or blank after cleanup.
fn cell_text(row: &[Cell], index: usize) -> Option<String> {
    let raw = row.get(index)?.as_deref()?;
    let cleaned = clean_cell(raw);
    (!cleaned.is_empty()).then_some(cleaned)
}
