//! Filter, sort and aggregate logic shared by every list screen.
//!
//! A list view takes the latest snapshot of a collection (expenses, tasks,
//! goals, mood entries) plus the screen's [`ViewParams`] and derives the
//! visible rows, their order and the summary figures shown above the table.
//! Records are only borrowed; nothing here mutates a snapshot.
//!
//! ## Ordering rules
//!
//! - Numbers compare by value, dates chronologically, text case-insensitively
//! - Descending order reverses the comparison
//! - Invalid keys (`NaN` amounts, missing or unparseable dates) always sort
//!   last, whatever the order
//! - The sort is stable: equal keys keep their snapshot order

use std::cmp::Ordering;
use std::collections::HashMap;

use chrono::NaiveDateTime;
use shared::{CategoryFilter, RecordId, SortOrder, ViewParams};

/// Comparable value extracted from a record for one sort field
#[derive(Debug, Clone, PartialEq)]
pub enum SortKey {
    Number(f64),
    Date(Option<NaiveDateTime>),
    Text(String),
}

impl SortKey {
    fn is_valid(&self) -> bool {
        match self {
            SortKey::Number(value) => !value.is_nan(),
            SortKey::Date(value) => value.is_some(),
            SortKey::Text(_) => true,
        }
    }

    /// Ascending comparison of two valid keys. Keys of different kinds only
    /// occur when a record type mixes them for one field; they order by kind.
    fn compare_valid(&self, other: &SortKey) -> Ordering {
        match (self, other) {
            (SortKey::Number(a), SortKey::Number(b)) => a.partial_cmp(b).unwrap_or(Ordering::Equal),
            (SortKey::Date(a), SortKey::Date(b)) => a.cmp(b),
            (SortKey::Text(a), SortKey::Text(b)) => a.to_lowercase().cmp(&b.to_lowercase()),
            _ => self.kind_rank().cmp(&other.kind_rank()),
        }
    }

    fn kind_rank(&self) -> u8 {
        match self {
            SortKey::Number(_) => 0,
            SortKey::Date(_) => 1,
            SortKey::Text(_) => 2,
        }
    }
}

/// Compare two keys under the given order. Invalid keys go last in both orders.
pub fn compare_keys(a: &SortKey, b: &SortKey, order: SortOrder) -> Ordering {
    match (a.is_valid(), b.is_valid()) {
        (true, true) => {
            let ascending = a.compare_valid(b);
            match order {
                SortOrder::Ascending => ascending,
                SortOrder::Descending => ascending.reverse(),
            }
        }
        (true, false) => Ordering::Less,
        (false, true) => Ordering::Greater,
        (false, false) => Ordering::Equal,
    }
}

/// A record that can be shown in a filtered, sorted list view
pub trait ListRecord {
    /// Closed set of sortable attributes for this record type
    type Field: Copy + PartialEq;

    fn record_id(&self) -> RecordId;

    /// Classification label used by the category filter
    fn category(&self) -> Option<&str>;

    /// Free-text fields matched by the search box
    fn searchable_text(&self) -> Vec<&str>;

    /// Value summed into the list totals; `NaN` when absent or malformed
    fn amount(&self) -> f64;

    fn sort_key(&self, field: Self::Field) -> SortKey;
}

/// Visible rows and summary figures of a list view
#[derive(Debug, Clone)]
pub struct ListView<'a, R> {
    pub records: Vec<&'a R>,
    pub total: f64,
    pub average: f64,
    pub count: usize,
}

impl<'a, R: ListRecord> ListView<'a, R> {
    /// Totals per category over the visible rows, largest first
    pub fn category_breakdown(&self) -> Vec<CategoryTotal> {
        let mut totals: HashMap<String, (f64, usize)> = HashMap::new();
        for record in &self.records {
            let category = record.category().unwrap_or(UNCATEGORIZED).to_string();
            let entry = totals.entry(category).or_insert((0.0, 0));
            entry.0 += finite_or_zero(record.amount());
            entry.1 += 1;
        }

        let mut breakdown: Vec<CategoryTotal> = totals
            .into_iter()
            .map(|(category, (total, count))| CategoryTotal { category, total, count })
            .collect();
        breakdown.sort_by(|a, b| {
            b.total
                .partial_cmp(&a.total)
                .unwrap_or(Ordering::Equal)
                .then_with(|| a.category.cmp(&b.category))
        });
        breakdown
    }
}

/// Label used for records without a category in breakdowns
pub const UNCATEGORIZED: &str = "uncategorized";

#[derive(Debug, Clone, PartialEq)]
pub struct CategoryTotal {
    pub category: String,
    pub total: f64,
    pub count: usize,
}

/// Index-based form of a list view, detached from the snapshot's lifetime
#[derive(Debug, Clone, PartialEq)]
pub struct ViewSummary {
    pub indices: Vec<usize>,
    pub total: f64,
    pub average: f64,
    pub count: usize,
}

impl ViewSummary {
    /// Resolve the indices against the snapshot they were computed from
    pub fn resolve<'a, R>(&self, records: &'a [R]) -> ListView<'a, R> {
        ListView {
            records: self.indices.iter().filter_map(|&index| records.get(index)).collect(),
            total: self.total,
            average: self.average,
            count: self.count,
        }
    }
}

/// Apply search, category filter, sort and aggregation to a snapshot
pub fn apply_view<'a, R: ListRecord>(records: &'a [R], params: &ViewParams<R::Field>) -> ListView<'a, R> {
    summarize_view(records, params).resolve(records)
}

/// Same as [`apply_view`] but returns positions into `records`
pub fn summarize_view<R: ListRecord>(records: &[R], params: &ViewParams<R::Field>) -> ViewSummary {
    let needle = params.search_term.trim().to_lowercase();

    let mut keyed: Vec<(usize, SortKey)> = records
        .iter()
        .enumerate()
        .filter(|(_, record)| matches_filter(*record, &params.filter))
        .filter(|(_, record)| matches_search(*record, &needle))
        .map(|(index, record)| (index, record.sort_key(params.sort_field)))
        .collect();

    // `sort_by` is stable, so equal keys keep snapshot order
    keyed.sort_by(|(_, a), (_, b)| compare_keys(a, b, params.sort_order));

    let indices: Vec<usize> = keyed.into_iter().map(|(index, _)| index).collect();
    let total: f64 = indices.iter().map(|&index| finite_or_zero(records[index].amount())).sum();
    let count = indices.len();
    let average = if count > 0 { total / count as f64 } else { 0.0 };

    ViewSummary {
        indices,
        total,
        average,
        count,
    }
}

fn matches_filter<R: ListRecord>(record: &R, filter: &CategoryFilter) -> bool {
    filter.matches(record.category())
}

fn matches_search<R: ListRecord>(record: &R, lowercase_needle: &str) -> bool {
    if lowercase_needle.is_empty() {
        return true;
    }
    record
        .searchable_text()
        .iter()
        .any(|text| text.to_lowercase().contains(lowercase_needle))
}

fn finite_or_zero(value: f64) -> f64 {
    if value.is_finite() {
        value
    } else {
        0.0
    }
}

/// Caches the last computed view of a snapshot. The cache is keyed on the
/// snapshot revision and the view parameters; either changing forces a
/// recompute.
#[derive(Debug, Clone)]
pub struct MemoizedView<F> {
    cached: Option<(u64, ViewParams<F>, ViewSummary)>,
    recomputations: u64,
}

impl<F: Clone + PartialEq> MemoizedView<F> {
    pub fn new() -> Self {
        Self {
            cached: None,
            recomputations: 0,
        }
    }

    /// Return the view for `records` at `revision`, recomputing only when
    /// the revision or the parameters differ from the cached ones
    pub fn view<'a, R>(&mut self, records: &'a [R], revision: u64, params: &ViewParams<F>) -> ListView<'a, R>
    where
        R: ListRecord<Field = F>,
    {
        let is_fresh = matches!(
            &self.cached,
            Some((cached_revision, cached_params, _)) if *cached_revision == revision && cached_params == params
        );

        if !is_fresh {
            let summary = summarize_view(records, params);
            self.cached = Some((revision, params.clone(), summary));
            self.recomputations += 1;
        }

        match &self.cached {
            Some((_, _, summary)) => summary.resolve(records),
            None => apply_view(records, params),
        }
    }

    /// Drop the cached result
    pub fn clear(&mut self) {
        self.cached = None;
    }

    /// Number of times the view was actually recomputed
    pub fn recomputations(&self) -> u64 {
        self.recomputations
    }
}

impl<F: Clone + PartialEq> Default for MemoizedView<F> {
    fn default() -> Self {
        Self::new()
    }
}
