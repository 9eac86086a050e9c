//! Errors raised while parsing price lists and building reports.

/// Error raised while parsing a price list, importing a selection matrix or
/// serializing a report.
#[derive(thiserror::Error, Debug)]
pub enum PriceListError {
    /// I/O error while reading a source file.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    /// CSV read or write error.
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
    /// The input bytes are not valid UTF-8.
    #[error("input is not valid UTF-8")]
    Utf8(#[from] std::str::Utf8Error),
    /// The document yielded no classified price rows at all.
    #[error("price list format not recognized: no textbook or workbook rows found")]
    FormatNotRecognized,
    /// The selection matrix has no row that looks like a grade header.
    #[error("selection matrix has no grade header row")]
    MissingGradeHeader,
    /// An operation that needs a price database ran before any document load.
    #[error("no price list loaded")]
    DatabaseNotLoaded,
}
