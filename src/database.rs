//! Normalized price lookup built from classified table rows.

use std::collections::{BTreeMap, BTreeSet};

use crate::ordering::sort_subjects;
use crate::types::{BookKey, Category, Price};
use crate::utils::grade_number;

/// Per-publisher prices for both categories of one curriculum unit.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PriceRecord {
    /// Textbook price per publisher.
    pub textbook: BTreeMap<String, Price>,
    /// Workbook price per publisher.
    pub workbook: BTreeMap<String, Price>,
}

impl PriceRecord {
    fn category(&self, category: Category) -> &BTreeMap<String, Price> {
        match category {
            Category::Textbook => &self.textbook,
            Category::Workbook => &self.workbook,
        }
    }

    fn category_mut(&mut self, category: Category) -> &mut BTreeMap<String, Price> {
        match category {
            Category::Textbook => &mut self.textbook,
            Category::Workbook => &mut self.workbook,
        }
    }
}

/// The normalized lookup of prices keyed by (grade, subject, volume).
///
/// Rebuilt wholesale on every document load; an absent (category, publisher)
/// entry is equivalent to price zero.
#[derive(Debug, Clone, Default)]
pub struct PriceDatabase {
    entries: BTreeMap<BookKey, PriceRecord>,
    versions: Vec<String>,
}

impl PriceDatabase {
    /// Number of (grade, subject, volume) keys in the database.
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True when no row was ever folded in.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Detected publishers in canonical display order (first appearance
    /// across the scanned columns).
    #[inline]
    #[must_use]
    pub fn versions(&self) -> &[String] {
        &self.versions
    }

    /// Price for one (key, category, publisher) cell, zero when absent.
    #[must_use]
    pub fn price(&self, key: &BookKey, category: Category, publisher: &str) -> Price {
        self.entries
            .get(key)
            .and_then(|record| record.category(category).get(publisher))
            .copied()
            .unwrap_or(0)
    }

    /// Textbook and workbook prices for one key and publisher.
    #[must_use]
    pub fn prices_for(&self, key: &BookKey, publisher: &str) -> (Price, Price) {
        (
            self.price(key, Category::Textbook, publisher),
            self.price(key, Category::Workbook, publisher),
        )
    }

    /// Grade labels present in the database, sorted by embedded numeral
    /// with free-text labels falling back to lexicographic order.
    #[must_use]
    pub fn grades(&self) -> Vec<String> {
        let unique: BTreeSet<&str> = self.entries.keys().map(|k| k.grade.as_str()).collect();
        let mut grades: Vec<String> = unique.into_iter().map(String::from).collect();
        grades.sort_by(|a, b| {
            grade_number(a)
                .unwrap_or(0)
                .cmp(&grade_number(b).unwrap_or(0))
                .then_with(|| a.cmp(b))
        });
        grades
    }

    /// Subjects recorded for one grade, in curriculum display order.
    #[must_use]
    pub fn subjects_for_grade(&self, grade: &str) -> Vec<String> {
        let unique: BTreeSet<&str> = self
            .entries
            .keys()
            .filter(|k| k.grade == grade)
            .map(|k| k.subject.as_str())
            .collect();
        let mut subjects: Vec<String> = unique.into_iter().map(String::from).collect();
        sort_subjects(&mut subjects);
        subjects
    }

    /// Volume labels recorded for one (grade, subject), lexicographic.
    #[must_use]
    pub fn volumes_for(&self, grade: &str, subject: &str) -> Vec<String> {
        let unique: BTreeSet<&str> = self
            .entries
            .keys()
            .filter(|k| k.grade == grade && k.subject == subject)
            .map(|k| k.volume.as_str())
            .collect();
        unique.into_iter().map(String::from).collect()
    }

    /// Iterates over every key and its price record.
    pub fn entries(&self) -> impl Iterator<Item = (&BookKey, &PriceRecord)> {
        self.entries.iter()
    }

    /// Ensures an entry exists for the key, even before any price lands.
    pub(crate) fn touch(&mut self, key: BookKey) {
        self.entries.entry(key).or_default();
    }

    /// Records one price cell; a later write for the same cell wins.
    pub(crate) fn insert_price(
        &mut self,
        key: BookKey,
        category: Category,
        publisher: String,
        price: Price,
    ) {
        self.entries
            .entry(key)
            .or_default()
            .category_mut(category)
            .insert(publisher, price);
    }

    /// Appends a publisher to the display order unless already present.
    pub(crate) fn register_version(&mut self, name: &str) {
        if !self.versions.iter().any(|v| v == name) {
            self.versions.push(name.to_string());
        }
    }
}
