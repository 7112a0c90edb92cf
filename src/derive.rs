//! Analysis-time columns computed from stored records. Nothing here is written
//! back to the scrape table.

use std::sync::LazyLock;

use chrono::{Datelike as _, NaiveDate};
use regex::Regex;

use crate::formats::BookRecord;

static YEAR_MONTH: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(\d{4})년\s*(\d{1,2})월").expect("year-month pattern is valid")
});

#[derive(Debug, Clone, PartialEq)]
pub struct BookRow {
    pub title: String,
    pub list_price: f64,
    pub sale_price: f64,
    pub review_count: f64,
    pub sale_index: f64,
    /// `YYYY-MM`, when the date text carries a year and month.
    pub year_month: Option<String>,
    pub year: Option<i32>,
    pub month: Option<u32>,
    pub discount_pct: f64,
}

impl BookRow {
    pub fn from_record(record: &BookRecord) -> Self {
        let list_price = coerce_number(&record.list_price);
        let sale_price = coerce_number(&record.sale_price);
        let year_month = normalize_year_month(&record.published);
        let date = year_month.as_deref().and_then(first_of_month);

        Self {
            title: record.title.clone(),
            list_price,
            sale_price,
            review_count: coerce_number(&record.review_count),
            sale_index: coerce_number(&record.sale_index),
            year_month,
            year: date.map(|d| d.year()),
            month: date.map(|d| d.month()),
            discount_pct: discount_pct(list_price, sale_price),
        }
    }
}

pub fn derive_rows(records: &[BookRecord]) -> Vec<BookRow> {
    records.iter().map(BookRow::from_record).collect()
}

/// Parses a stored numeric-looking field; anything unparseable counts as 0.
pub fn coerce_number(text: &str) -> f64 {
    match text.trim().parse::<f64>() {
        Ok(value) if value.is_finite() => value,
        _ => 0.0,
    }
}

/// `"2025년 11월"` becomes `"2025-11"`.
pub fn normalize_year_month(text: &str) -> Option<String> {
    let caps = YEAR_MONTH.captures(text)?;
    let year = &caps[1];
    let month: u32 = caps[2].parse().ok()?;
    Some(format!("{year}-{month:02}"))
}

fn first_of_month(year_month: &str) -> Option<NaiveDate> {
    let (year, month) = year_month.split_once('-')?;
    NaiveDate::from_ymd_opt(year.parse().ok()?, month.parse().ok()?, 1)
}

pub fn discount_pct(list_price: f64, sale_price: f64) -> f64 {
    let pct = (list_price - sale_price) / list_price * 100.0;
    if pct.is_finite() { pct } else { 0.0 }
}

/// Up to `n` rows with the highest sale index. Ties keep table order.
pub fn top_by_sale_index(rows: &[BookRow], n: usize) -> Vec<&BookRow> {
    let mut ranked: Vec<&BookRow> = rows.iter().collect();
    ranked.sort_by(|a, b| b.sale_index.total_cmp(&a.sale_index));
    ranked.truncate(n);
    ranked
}

/// Book counts per publication year, ascending, for positive years only.
pub fn yearly_counts(rows: &[BookRow]) -> Vec<(i32, usize)> {
    let mut counts = std::collections::BTreeMap::new();
    for year in rows.iter().filter_map(|row| row.year).filter(|year| *year > 0) {
        *counts.entry(year).or_insert(0_usize) += 1;
    }
    counts.into_iter().collect()
}
