#![warn(missing_docs)]
//! Turns extracted textbook price-list tables into a normalized price
//! database, resolves subject × grade publisher selections against it and
//! serializes grouped expense reports as CSV.

mod database;
mod error;
mod import;
mod ordering;
mod parser;
mod raw;
mod report;
mod session;
mod types;
mod utils;

pub use crate::database::{PriceDatabase, PriceRecord};
pub use crate::error::PriceListError;
pub use crate::import::{ImportOptions, ImportSummary, TEMPLATE_CSV, import_selection_matrix};
pub use crate::ordering::{sort_subjects, subject_weight};
pub use crate::parser::{ColumnMap, ScanOptions};
pub use crate::raw::{Cell, DocumentPage, ExtractedTable, RawDocument};
pub use crate::report::{
    Cart, ReportLayout, ReportOptions, grade_totals, grand_total, publisher_totals,
    render_report, report_to_csv,
};
pub use crate::session::Session;
pub use crate::types::*;
pub use crate::utils::normalize_price;
