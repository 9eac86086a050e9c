//! Raw table rows handed over by the document-extraction engine.
//!
//! The extraction engine itself (PDF or otherwise) is outside this crate;
//! the parser only consumes its output: per page, a list of tables, each an
//! ordered grid of text-or-absent cells.

/// One table cell as extracted: text, or absent.
pub type Cell = Option<String>;

/// One extracted table: ordered rows of ordered cells.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExtractedTable(pub Vec<Vec<Cell>>);

impl ExtractedTable {
    /// Rows of the table.
    #[inline]
    #[must_use]
    pub fn rows(&self) -> &[Vec<Cell>] {
        &self.0
    }

    /// Builds a table from string rows; empty strings become absent cells.
    pub fn from_rows<R, C, S>(rows: R) -> Self
    where
        R: IntoIterator<Item = C>,
        C: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self(
            rows.into_iter()
                .map(|row| {
                    row.into_iter()
                        .map(|cell| {
                            let text = cell.into();
                            if text.is_empty() { None } else { Some(text) }
                        })
                        .collect()
                })
                .collect(),
        )
    }
}

/// Tables extracted from one document page.
#[derive(Debug, Clone, Default)]
pub struct DocumentPage {
    /// Tables in page order.
    pub tables: Vec<ExtractedTable>,
}

/// A whole extracted document, page by page.
#[derive(Debug, Clone, Default)]
pub struct RawDocument {
    /// Pages in document order.
    pub pages: Vec<DocumentPage>,
}

impl RawDocument {
    /// Wraps a flat list of tables as a single-page document.
    #[inline]
    #[must_use]
    pub fn from_tables(tables: Vec<ExtractedTable>) -> Self {
        Self {
            pages: vec![DocumentPage { tables }],
        }
    }

    /// Iterates over every table across all pages, in reading order.
    pub fn tables(&self) -> impl Iterator<Item = &ExtractedTable> {
        self.pages.iter().flat_map(|page| page.tables.iter())
    }
}
