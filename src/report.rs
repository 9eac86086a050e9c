//! Cart of selected line items and the fixed-layout expense report.

use crate::error::PriceListError;
use crate::types::{LineItem, Price};
use crate::utils::grade_number;

/// The user's in-progress ordered list of line items awaiting export.
///
/// Items are free-standing values: duplicates are allowed and a later
/// reload of the price list does not touch them.
#[derive(Debug, Clone, Default)]
pub struct Cart {
    items: Vec<LineItem>,
}

impl Cart {
    /// Creates an empty cart.
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends one line item.
    #[inline]
    pub fn add(&mut self, item: LineItem) {
        self.items.push(item);
    }

    /// Removes and returns the item at `index`, if present.
    pub fn remove(&mut self, index: usize) -> Option<LineItem> {
        (index < self.items.len()).then(|| self.items.remove(index))
    }

    /// Drops every item.
    #[inline]
    pub fn clear(&mut self) {
        self.items.clear();
    }

    /// Items in insertion order.
    #[inline]
    #[must_use]
    pub fn items(&self) -> &[LineItem] {
        &self.items
    }

    /// True when nothing has been selected yet.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Number of items in the cart.
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }
}

/// Which of the two fixed report layouts to serialize.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReportLayout {
    /// Five-cell blocks per grade with the grade totals row pinned above
    /// the details.
    TotalsOnTop,
    /// Four-cell blocks per grade separated by a blank column, details
    /// only.
    SpacedBlocks,
}

/// Report serialization options.
#[derive(Debug, Clone, Copy)]
pub struct ReportOptions {
    /// Block layout to emit.
    pub layout: ReportLayout,
    /// Prepend the per-grade and per-publisher totals section.
    pub include_summary: bool,
}

impl Default for ReportOptions {
    fn default() -> Self {
        Self {
            layout: ReportLayout::TotalsOnTop,
            include_summary: false,
        }
    }
}

/// Items of one grade, in insertion order, with their subtotal sum.
#[derive(Debug)]
struct GradeGroup<'a> {
    label: &'a str,
    items: Vec<&'a LineItem>,
    total: Price,
}

/// Partitions items by grade, grades sorted ascending by their embedded
/// numeral with ties broken by label; insertion order kept inside a group.
fn grade_groups(items: &[LineItem]) -> Vec<GradeGroup<'_>> {
    let mut groups: Vec<GradeGroup<'_>> = Vec::new();
    for item in items {
        match groups.iter_mut().find(|g| g.label == item.grade) {
            Some(group) => {
                group.items.push(item);
                group.total += item.subtotal;
            }
            None => groups.push(GradeGroup {
                label: &item.grade,
                items: vec![item],
                total: item.subtotal,
            }),
        }
    }
    groups.sort_by(|a, b| {
        grade_number(a.label)
            .unwrap_or(0)
            .cmp(&grade_number(b.label).unwrap_or(0))
            .then_with(|| a.label.cmp(b.label))
    });
    groups
}

/// Sums subtotals per grade, grades in report order.
#[must_use]
pub fn grade_totals(items: &[LineItem]) -> Vec<(String, Price)> {
    grade_groups(items)
        .into_iter()
        .map(|g| (g.label.to_string(), g.total))
        .collect()
}

/// Sums subtotals per publisher, in order of first appearance in the cart.
#[must_use]
pub fn publisher_totals(items: &[LineItem]) -> Vec<(String, Price)> {
    let mut totals: Vec<(String, Price)> = Vec::new();
    for item in items {
        match totals.iter_mut().find(|(name, _)| *name == item.publisher) {
            Some((_, total)) => *total += item.subtotal,
            None => totals.push((item.publisher.clone(), item.subtotal)),
        }
    }
    totals
}

/// Grand total across every item.
#[must_use]
pub fn grand_total(items: &[LineItem]) -> Price {
    items.iter().map(|item| item.subtotal).sum()
}

/// Renders the report as rows of cells, exactly as they will be written.
#[must_use]
pub fn render_report(items: &[LineItem], options: &ReportOptions) -> Vec<Vec<String>> {
    let groups = grade_groups(items);
    let mut rows = Vec::new();

    if options.include_summary {
        push_summary(&mut rows, items, &groups);
    }

    match options.layout {
        ReportLayout::TotalsOnTop => push_totals_on_top(&mut rows, &groups),
        ReportLayout::SpacedBlocks => push_spaced_blocks(&mut rows, &groups),
    }
    rows
}

/// Serializes the report to CSV bytes, prefixed with a UTF-8 byte-order
/// mark so spreadsheet tools pick the right encoding.
pub fn report_to_csv(
    items: &[LineItem],
    options: &ReportOptions,
) -> Result<Vec<u8>, PriceListError> {
    let mut buffer: Vec<u8> = vec![0xef, 0xbb, 0xbf];
    {
        let mut writer = csv::WriterBuilder::new()
            .flexible(true)
            .from_writer(&mut buffer);
        for row in render_report(items, options) {
            writer.write_record(&row)?;
        }
        writer.flush()?;
    }
    Ok(buffer)
}

/// Leading summary: per-grade totals with the grand total, then
/// per-publisher totals, each as a title row plus a label/amount row pair.
fn push_summary(rows: &mut Vec<Vec<String>>, items: &[LineItem], groups: &[GradeGroup<'_>]) {
    rows.push(vec!["各年級總計".to_string()]);
    let mut labels: Vec<String> = groups.iter().map(|g| g.label.to_string()).collect();
    let mut amounts: Vec<String> = groups.iter().map(|g| g.total.to_string()).collect();
    labels.push("總計".to_string());
    amounts.push(grand_total(items).to_string());
    rows.push(labels);
    rows.push(amounts);

    rows.push(vec!["各版本總計".to_string()]);
    let by_publisher = publisher_totals(items);
    rows.push(by_publisher.iter().map(|(name, _)| name.clone()).collect());
    rows.push(by_publisher.iter().map(|(_, total)| total.to_string()).collect());

    rows.push(blank_row());
}

/// Totals-on-top layout: grade headers, the totals row, one blank row,
/// then 3-row detail blocks with blank rows between them.
fn push_totals_on_top(rows: &mut Vec<Vec<String>>, groups: &[GradeGroup<'_>]) {
    let mut header = Vec::new();
    let mut totals = Vec::new();
    for group in groups {
        header.extend(pad(vec![format!("【{}】", group.label)], 5));
        totals.extend(pad(
            vec![
                "★年級總計".to_string(),
                String::new(),
                String::new(),
                group.total.to_string(),
            ],
            5,
        ));
    }
    rows.push(header);
    rows.push(totals);
    rows.push(blank_row());

    let max_blocks = groups.iter().map(|g| g.items.len()).max().unwrap_or(0);
    for block in 0..max_blocks {
        if block > 0 {
            rows.push(blank_row());
        }
        let mut subject_row = Vec::new();
        let mut version_row = Vec::new();
        let mut volume_row = Vec::new();
        for group in groups {
            match group.items.get(block) {
                Some(item) => {
                    subject_row.extend(pad(
                        labeled("科目", &item.subject, "課本", item.textbook_price),
                        5,
                    ));
                    version_row.extend(pad(
                        labeled("版本", &item.publisher, "習作", item.workbook_price),
                        5,
                    ));
                    volume_row.extend(pad(
                        labeled("冊別", &item.volume, "小計", item.subtotal),
                        5,
                    ));
                }
                None => {
                    subject_row.extend(pad(Vec::new(), 5));
                    version_row.extend(pad(Vec::new(), 5));
                    volume_row.extend(pad(Vec::new(), 5));
                }
            }
        }
        rows.push(subject_row);
        rows.push(version_row);
        rows.push(volume_row);
    }
}

/// Spaced-blocks layout: four-cell blocks with a blank separator column
/// between grades and a blank row between detail blocks.
fn push_spaced_blocks(rows: &mut Vec<Vec<String>>, groups: &[GradeGroup<'_>]) {
    let last = groups.len().saturating_sub(1);
    let mut header = Vec::new();
    for (index, group) in groups.iter().enumerate() {
        header.extend(pad(vec![group.label.to_string()], 4));
        if index < last {
            header.push(String::new());
        }
    }
    rows.push(header);

    let max_blocks = groups.iter().map(|g| g.items.len()).max().unwrap_or(0);
    for block in 0..max_blocks {
        if block > 0 {
            rows.push(blank_row());
        }
        let mut subject_row = Vec::new();
        let mut version_row = Vec::new();
        let mut volume_row = Vec::new();
        for (index, group) in groups.iter().enumerate() {
            match group.items.get(block) {
                Some(item) => {
                    subject_row.extend(labeled(
                        "科目",
                        &item.subject,
                        "課本價格",
                        item.textbook_price,
                    ));
                    version_row.extend(labeled(
                        "版本",
                        &item.publisher,
                        "習作價格",
                        item.workbook_price,
                    ));
                    volume_row.extend(labeled("冊別", &item.volume, "總計金額", item.subtotal));
                }
                None => {
                    subject_row.extend(pad(Vec::new(), 4));
                    version_row.extend(pad(Vec::new(), 4));
                    volume_row.extend(pad(Vec::new(), 4));
                }
            }
            if index < last {
                subject_row.push(String::new());
                version_row.push(String::new());
                volume_row.push(String::new());
            }
        }
        rows.push(subject_row);
        rows.push(version_row);
        rows.push(volume_row);
    }
}

/// One labeled value pair: `label, value, price-label, amount`.
fn labeled(label: &str, value: &str, price_label: &str, amount: Price) -> Vec<String> {
    vec![
        label.to_string(),
        value.to_string(),
        price_label.to_string(),
        amount.to_string(),
    ]
}

/// Pads a cell run with trailing blanks up to the block width.
fn pad(mut cells: Vec<String>, width: usize) -> Vec<String> {
    cells.resize(width, String::new());
    cells
}

/// A visually empty row; a single empty field keeps the CSV writer happy.
fn blank_row() -> Vec<String> {
    vec![String::new()]
}
