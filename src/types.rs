//! Domain types shared across the parser, importer and report builder.

/// Price amount in whole dollars; official price lists never carry cents.
pub type Price = u32;

/// The closed set of publisher names the column locator recognizes.
///
/// The locator never invents names outside this set; a header cell counts as
/// a publisher column when it contains one of these as a substring.
pub const PUBLISHERS: [&str; 12] = [
    "南一",
    "康軒",
    "翰林",
    "育成",
    "佳音",
    "何嘉仁",
    "吉的堡",
    "台灣培生",
    "全華",
    "龍騰",
    "泰宇",
    "三民",
];

/// Composite lookup key for one curriculum unit: grade, subject and volume.
///
/// All three parts are opaque display-cleaned strings; ordering is
/// lexicographic field by field, which makes grouped iteration over a
/// `BTreeMap` deterministic.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct BookKey {
    /// Grade label, usually a single digit but free text in looser inputs.
    pub grade: String,
    /// Subject name with numbering artifacts stripped.
    pub subject: String,
    /// Volume label, unique only within a (grade, subject) pair.
    pub volume: String,
}

impl BookKey {
    /// Builds a key from the three raw parts.
    #[inline]
    pub fn new(
        grade: impl Into<String>,
        subject: impl Into<String>,
        volume: impl Into<String>,
    ) -> Self {
        Self {
            grade: grade.into(),
            subject: subject.into(),
            volume: volume.into(),
        }
    }
}

/// The two priced components of one curriculum unit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Category {
    /// The textbook itself (課本).
    Textbook,
    /// The accompanying workbook (習作).
    Workbook,
}

impl Category {
    /// Keyword whose presence in a row's concatenated text marks the category.
    #[must_use]
    pub const fn keyword(self) -> &'static str {
        match self {
            Self::Textbook => "課本",
            Self::Workbook => "習作",
        }
    }

    /// Classifies a row by its concatenated cell text.
    ///
    /// Textbook takes priority when both keywords appear; rows matching
    /// neither are not price rows.
    #[must_use]
    pub fn classify(row_text: &str) -> Option<Self> {
        if row_text.contains(Self::Textbook.keyword()) {
            Some(Self::Textbook)
        } else if row_text.contains(Self::Workbook.keyword()) {
            Some(Self::Workbook)
        } else {
            None
        }
    }
}

/// One chosen line of the cart: a free-standing value record, not a
/// reference into the price database.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LineItem {
    /// Grade display label, e.g. `1年`.
    pub grade: String,
    /// Subject name.
    pub subject: String,
    /// Chosen publisher.
    pub publisher: String,
    /// Volume label.
    pub volume: String,
    /// Textbook price, zero when the publisher offers none.
    pub textbook_price: Price,
    /// Workbook price, zero when the publisher offers none.
    pub workbook_price: Price,
    /// Sum of the two prices, fixed at construction.
    pub subtotal: Price,
}

impl LineItem {
    /// Builds a line item, computing the subtotal.
    #[inline]
    pub fn new(
        grade: impl Into<String>,
        subject: impl Into<String>,
        publisher: impl Into<String>,
        volume: impl Into<String>,
        textbook_price: Price,
        workbook_price: Price,
    ) -> Self {
        Self {
            grade: grade.into(),
            subject: subject.into(),
            publisher: publisher.into(),
            volume: volume.into(),
            textbook_price,
            workbook_price,
            subtotal: textbook_price + workbook_price,
        }
    }
}
