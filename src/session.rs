//! Explicit session state: the loaded database, the cart and the source id.

use crate::database::PriceDatabase;
use crate::error::PriceListError;
use crate::import::{ImportOptions, ImportSummary, import_selection_matrix};
use crate::parser::ScanOptions;
use crate::raw::RawDocument;
use crate::report::{Cart, ReportOptions, report_to_csv};
use crate::types::{BookKey, LineItem};
use crate::utils::grade_label;

/// One user session: at most one loaded price database plus the cart.
///
/// Every operation runs to completion before the next; there is no
/// concurrency. Reloading a document replaces the database wholesale but
/// never touches line items already in the cart.
#[derive(Debug, Default)]
pub struct Session {
    db: Option<PriceDatabase>,
    cart: Cart,
    loaded_source: Option<String>,
    scan: ScanOptions,
}

impl Session {
    /// Creates an empty session with default scan options.
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an empty session with custom scan options.
    #[inline]
    #[must_use]
    pub fn with_scan_options(scan: ScanOptions) -> Self {
        Self {
            scan,
            ..Self::default()
        }
    }

    /// Parses an extracted document into a fresh price database.
    ///
    /// `source` identifies the input (a path, usually); loading the same
    /// source twice skips the re-parse. On a recognition failure the
    /// previously loaded database stays in place.
    pub fn load_document(
        &mut self,
        source: &str,
        document: &RawDocument,
    ) -> Result<&PriceDatabase, PriceListError> {
        if self.db.is_some() && self.loaded_source.as_deref() == Some(source) {
            return Ok(self.db.as_ref().expect("database present"));
        }
        let db = document.parse_prices(&self.scan)?;
        self.loaded_source = Some(source.to_string());
        Ok(self.db.insert(db))
    }

    /// The currently loaded database, if any.
    #[inline]
    #[must_use]
    pub fn database(&self) -> Option<&PriceDatabase> {
        self.db.as_ref()
    }

    /// The cart of selected line items.
    #[inline]
    #[must_use]
    pub fn cart(&self) -> &Cart {
        &self.cart
    }

    /// Looks up one manual (grade, subject, volume, publisher) selection
    /// and appends it to the cart, returning a copy of the new item.
    pub fn add_selection(
        &mut self,
        grade: &str,
        subject: &str,
        volume: &str,
        publisher: &str,
    ) -> Result<LineItem, PriceListError> {
        let db = self.db.as_ref().ok_or(PriceListError::DatabaseNotLoaded)?;
        let key = BookKey::new(grade, subject, volume);
        let (textbook, workbook) = db.prices_for(&key, publisher);
        let item = LineItem::new(
            grade_label(grade),
            subject,
            publisher,
            volume,
            textbook,
            workbook,
        );
        self.cart.add(item.clone());
        Ok(item)
    }

    /// Imports a selection matrix file, appending every resolved line item.
    pub fn import_matrix(
        &mut self,
        bytes: &[u8],
        options: &ImportOptions,
    ) -> Result<ImportSummary, PriceListError> {
        let db = self.db.as_ref().ok_or(PriceListError::DatabaseNotLoaded)?;
        let (items, summary) = import_selection_matrix(db, bytes, options)?;
        for item in items {
            self.cart.add(item);
        }
        Ok(summary)
    }

    /// Removes the cart item at `index`; out of range is a no-op.
    #[inline]
    pub fn remove_item(&mut self, index: usize) -> Option<LineItem> {
        self.cart.remove(index)
    }

    /// Empties the cart.
    #[inline]
    pub fn clear_cart(&mut self) {
        self.cart.clear();
    }

    /// Serializes the cart as report CSV bytes.
    ///
    /// An empty cart is a no-op and yields `Ok(None)` rather than an empty
    /// file.
    pub fn export_report(
        &self,
        options: &ReportOptions,
    ) -> Result<Option<Vec<u8>>, PriceListError> {
        if self.cart.is_empty() {
            return Ok(None);
        }
        report_to_csv(self.cart.items(), options).map(Some)
    }
}
