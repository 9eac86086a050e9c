//! Bulk import of a subject × grade selection matrix against the database.

use crate::database::PriceDatabase;
use crate::error::PriceListError;
use crate::types::{BookKey, LineItem};
use crate::utils::{clean_cell, grade_label, grade_number};

/// Chinese numerals for grades one through nine, in order.
const GRADE_NUMERALS: [char; 9] = ['一', '二', '三', '四', '五', '六', '七', '八', '九'];

/// Junior-high aliases mapping onto grades seven through nine.
const JUNIOR_ALIASES: [(&str, &str); 3] = [("初一", "7"), ("初二", "8"), ("初三", "9")];

/// Verbatim example selection matrix offered for download; its layout is
/// exactly what [`import_selection_matrix`] expects back.
pub const TEMPLATE_CSV: &str = "\
教科書一覽表,,,,,,
科目/年級,一年級,二年級,三年級,四年級,五年級,六年級
國語,康軒,康軒,南一,康軒,南一,康軒
數學,南一,南一,南一,南一,翰林,南一
生活,翰林,翰林,,,,
健康與體育,翰林,翰林,南一,康軒,南一,南一
自然科學,,,南一,翰林,南一,翰林
社會,,,康軒,康軒,南一,翰林
英語,,,康軒,翰林,翰林,何嘉仁
綜合活動,,,翰林,康軒,康軒,南一
藝術,,,康軒,翰林,康軒,康軒
";

/// Tuning knobs for matrix resolution.
#[derive(Debug, Clone, Copy)]
pub struct ImportOptions {
    /// Match a database subject that contains, or is contained by, the
    /// matrix row's subject label instead of requiring exact equality.
    pub fuzzy_subjects: bool,
    /// Drop combinations where neither category has a positive price; such
    /// a cell means the publisher does not actually offer the unit.
    pub require_priced: bool,
    /// Treat this zero-based row as the grade header instead of
    /// discovering it by keyword scan.
    pub fixed_header_row: Option<usize>,
}

impl Default for ImportOptions {
    fn default() -> Self {
        Self {
            fuzzy_subjects: false,
            require_priced: true,
            fixed_header_row: None,
        }
    }
}

/// What an import run did: line items produced and cells it had to skip.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ImportSummary {
    /// Line items added to the cart.
    pub added: usize,
    /// Matrix cells whose subject had no match in the database.
    pub skipped: usize,
}

/// Resolves a selection matrix file into concrete line items.
///
/// The file is UTF-8 CSV with an optional byte-order mark. Rows before the
/// grade header are ignored; each later row is one subject with one
/// publisher cell per grade column. Cells that resolve to nothing are
/// skipped silently and counted; a file with no recognizable header aborts
/// with zero items.
pub fn import_selection_matrix(
    db: &PriceDatabase,
    bytes: &[u8],
    options: &ImportOptions,
) -> Result<(Vec<LineItem>, ImportSummary), PriceListError> {
    let text = std::str::from_utf8(bytes)?;
    let rows = read_matrix_rows(text)?;

    let header_index = match options.fixed_header_row {
        Some(index) => index,
        None => rows
            .iter()
            .position(|row| row.iter().any(|cell| is_grade_header_cell(cell)))
            .ok_or(PriceListError::MissingGradeHeader)?,
    };
    let header = rows
        .get(header_index)
        .ok_or(PriceListError::MissingGradeHeader)?;

    let grade_columns: Vec<(String, usize)> = header
        .iter()
        .enumerate()
        .filter_map(|(index, cell)| grade_from_header_cell(cell).map(|g| (g, index)))
        .collect();
    if grade_columns.is_empty() {
        return Err(PriceListError::MissingGradeHeader);
    }

    let mut items = Vec::new();
    let mut summary = ImportSummary::default();
    for row in &rows[header_index + 1..] {
        let Some(subject_cell) = row.first() else {
            continue;
        };
        let subject_label = clean_cell(subject_cell);
        if subject_label.is_empty() {
            continue;
        }
        for (grade, column) in &grade_columns {
            let Some(publisher) = row.get(*column).map(|c| clean_cell(c)) else {
                continue;
            };
            if publisher.is_empty() {
                continue;
            }
            let Some(subject) = resolve_subject(db, grade, &subject_label, options.fuzzy_subjects)
            else {
                summary.skipped += 1;
                continue;
            };
            let volumes = db.volumes_for(grade, &subject);
            let Some(volume) = infer_volume(&volumes, grade) else {
                summary.skipped += 1;
                continue;
            };
            let key = BookKey::new(grade.clone(), subject.clone(), volume.clone());
            let (textbook, workbook) = db.prices_for(&key, &publisher);
            if options.require_priced && textbook == 0 && workbook == 0 {
                continue;
            }
            items.push(LineItem::new(
                grade_label(grade),
                subject,
                publisher,
                volume,
                textbook,
                workbook,
            ));
            summary.added += 1;
        }
    }

    Ok((items, summary))
}

/// Reads the raw matrix grid, tolerating ragged row lengths.
fn read_matrix_rows(text: &str) -> Result<Vec<Vec<String>>, PriceListError> {
    let body = text.strip_prefix('\u{feff}').unwrap_or(text);
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(body.as_bytes());
    let mut rows = Vec::new();
    for record in reader.records() {
        let record = record?;
        rows.push(record.iter().map(String::from).collect());
    }
    Ok(rows)
}

/// True for cells that mark the grade header row: 年級 itself or one of the
/// junior-high aliases. A bare numeral is not enough — title rows like
/// 教科書一覽表 contain 一.
fn is_grade_header_cell(cell: &str) -> bool {
    cell.contains("年級") || JUNIOR_ALIASES.iter().any(|(alias, _)| cell.contains(alias))
}

/// Maps one header cell to its grade key: 初一/初二/初三 first, then the
/// first plain Chinese numeral found.
fn grade_from_header_cell(cell: &str) -> Option<String> {
    for (alias, grade) in JUNIOR_ALIASES {
        if cell.contains(alias) {
            return Some(grade.to_string());
        }
    }
    cell.chars().find_map(|ch| {
        GRADE_NUMERALS
            .iter()
            .position(|&n| n == ch)
            .map(|index| (index + 1).to_string())
    })
}

/// Finds the database subject a matrix label refers to, if any.
fn resolve_subject(
    db: &PriceDatabase,
    grade: &str,
    label: &str,
    fuzzy: bool,
) -> Option<String> {
    let subjects = db.subjects_for_grade(grade);
    if subjects.iter().any(|s| s == label) {
        return Some(label.to_string());
    }
    if fuzzy {
        return subjects
            .into_iter()
            .find(|s| s.contains(label) || label.contains(s.as_str()));
    }
    None
}

/// Picks the target volume among the candidates for one (grade, subject).
///
/// With two volumes per grade numbered consecutively by calendar year, the
/// current one carries the digit string grade × 2; when that heuristic
/// finds nothing the first candidate wins.
fn infer_volume(volumes: &[String], grade: &str) -> Option<String> {
    if volumes.is_empty() {
        return None;
    }
    if let Some(number) = grade_number(grade) {
        let marker = (number * 2).to_string();
        if let Some(volume) = volumes.iter().find(|v| v.contains(&marker)) {
            return Some(volume.clone());
        }
    }
    volumes.first().cloned()
}
