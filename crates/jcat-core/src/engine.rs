//! Query engine: filter, sort and paginate one snapshot.
//!
//! [`execute`] is pure and synchronous: the same snapshot and query always
//! produce the same page. It never fails; records with missing or
//! malformed fields simply drop out of numeric filters and sink to the end
//! of numeric sorts.
//!
//! # Pipeline
//!
//! ```text
//! records ──► text match ──► structured filters ──► sort (SCI) ──► page window
//! ```

use std::cmp::Ordering;

use crate::parse::{self, normalize_text};
use crate::query::{Category, Direction, Filters, Partition, Query, SciFilters, SortField};
use crate::types::{DatasetId, Record, SciRecord, Snapshot};

/// One page of matches.
#[derive(Debug, Clone, PartialEq)]
pub struct QueryResult<'a> {
    /// Records on the served page, in result order.
    pub items: Vec<&'a Record>,
    /// Matches across all pages.
    pub total: usize,
    /// Page actually served, clamped into range.
    pub page: usize,
    pub page_size: usize,
}

impl QueryResult<'_> {
    pub fn total_pages(&self) -> usize {
        total_pages(self.total, self.page_size)
    }
}

/// `ceil(total / page_size)`, at least 1.
pub fn total_pages(total: usize, page_size: usize) -> usize {
    total.div_ceil(page_size.max(1)).max(1)
}

/// Clamp a requested 1-based page into `[1, total_pages]`.
pub fn clamp_page(requested: usize, total: usize, page_size: usize) -> usize {
    requested.clamp(1, total_pages(total, page_size))
}

/// Run `query` against `snapshot`.
///
/// The snapshot's dataset decides which filter group applies. A query that
/// names a different dataset is still answered, against the snapshot, with
/// a warning.
pub fn execute<'a>(snapshot: &'a Snapshot, query: &Query) -> QueryResult<'a> {
    if query.dataset != snapshot.dataset {
        tracing::warn!(
            query = %query.dataset,
            snapshot = %snapshot.dataset,
            "query dataset does not match snapshot; using snapshot dataset"
        );
    }

    let needle = normalize_text(Some(&query.text));
    let mut matched: Vec<Candidate<'a>> = snapshot
        .records
        .iter()
        .filter(|record| matches_text(record, &needle))
        .filter_map(|record| Candidate::new(record, &query.filters))
        .collect();

    if let (DatasetId::Sci, Some(sort)) = (snapshot.dataset, query.sort) {
        sort_candidates(&mut matched, sort.field, sort.direction);
    }

    let page_size = snapshot.dataset.page_size();
    let total = matched.len();
    let page = clamp_page(query.page, total, page_size);
    let start = (page - 1) * page_size;
    let items = matched
        .into_iter()
        .skip(start)
        .take(page_size)
        .map(|c| c.record)
        .collect();

    tracing::debug!(
        dataset = %snapshot.dataset,
        text = %query.text,
        total,
        page,
        "query executed"
    );

    QueryResult {
        items,
        total,
        page,
        page_size,
    }
}

// ---------------------------------------------------------------------------
// Text match
// ---------------------------------------------------------------------------

fn matches_text(record: &Record, needle: &str) -> bool {
    needle.is_empty()
        || record
            .text_fields()
            .into_iter()
            .any(|field| normalize_text(field).contains(needle))
}

// ---------------------------------------------------------------------------
// Structured filters
// ---------------------------------------------------------------------------

/// A record that passed the filters, with its SCI metrics parsed once so the
/// sort comparator never re-parses strings.
struct Candidate<'a> {
    record: &'a Record,
    metrics: Option<SciMetrics>,
}

impl<'a> Candidate<'a> {
    fn new(record: &'a Record, filters: &Filters) -> Option<Self> {
        match record {
            Record::Sci(r) => {
                let metrics = SciMetrics::from_record(r);
                matches_sci(r, &metrics, &filters.sci).then_some(Candidate {
                    record,
                    metrics: Some(metrics),
                })
            }
            Record::Ei(r) => equals(r.source_type.as_deref(), filters.ei_type.as_deref())
                .then_some(Candidate {
                    record,
                    metrics: None,
                }),
            Record::Ahci(r) => {
                equals(r.web_of_science.as_deref(), filters.ahci_subject.as_deref()).then_some(
                    Candidate {
                        record,
                        metrics: None,
                    },
                )
            }
        }
    }
}

/// Exact equality against an optional constraint.
fn equals(field: Option<&str>, wanted: Option<&str>) -> bool {
    match wanted {
        None => true,
        Some(w) => field == Some(w),
    }
}

fn matches_sci(r: &SciRecord, m: &SciMetrics, f: &SciFilters) -> bool {
    if let Some(category) = &f.category {
        let c = category.as_str();
        let listed = r.search_database.as_deref() == Some(c) || r.sci_list.iter().any(|s| s == c);
        if !listed {
            return false;
        }
    }

    if let Some(band) = f.impact {
        if !m.impact.is_some_and(|v| band.band().contains(v)) {
            return false;
        }
    }

    if let Some(band) = f.self_citation {
        if !m.self_citation.is_some_and(|v| band.band().contains(v)) {
            return false;
        }
    }

    if let Some(partition) = f.partition {
        if m.partition != Some(partition) {
            return false;
        }
    }

    if let Some(wanted) = f.top {
        if m.is_top(f.category.as_ref()) != wanted {
            return false;
        }
    }

    equals(r.esi_subject.as_deref(), f.subject.as_deref())
}

// ---------------------------------------------------------------------------
// SCI metrics
// ---------------------------------------------------------------------------

/// Typed view of the numeric and flag fields of a [`SciRecord`].
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct SciMetrics {
    pub impact: Option<f64>,
    pub self_citation: Option<f64>,
    pub partition: Option<Partition>,
    pub top_a: bool,
    pub top_b: bool,
    pub h_index: Option<f64>,
    pub rank: Option<f64>,
    pub annual_volume: Option<f64>,
    pub china_share: Option<f64>,
}

impl SciMetrics {
    pub fn from_record(r: &SciRecord) -> Self {
        let number = |f: &Option<String>| f.as_deref().and_then(parse::parse_number);
        let percent = |f: &Option<String>| f.as_deref().and_then(parse::parse_percent);

        Self {
            impact: number(&r.impact_factors_e)
                .or_else(|| number(&r.impact_a))
                .or_else(|| number(&r.impact_b)),
            self_citation: percent(&r.self_citation_rate),
            partition: sci_partition(r),
            top_a: parse::is_yes(r.top_a.as_deref()),
            top_b: parse::is_yes(r.top_b.as_deref()),
            h_index: number(&r.hindex),
            rank: r.ranking.as_deref().and_then(parse::parse_rank),
            annual_volume: number(&r.year_num),
            china_share: percent(&r.china_proportion),
        }
    }

    /// Top-tier status as seen through the active category filter: SCIE reads
    /// `topA`, SSCI reads `topB`, anything else accepts either.
    pub fn is_top(&self, category: Option<&Category>) -> bool {
        match category {
            Some(Category::Scie) => self.top_a,
            Some(Category::Ssci) => self.top_b,
            _ => self.top_a || self.top_b,
        }
    }

    pub fn key(&self, field: SortField) -> Option<f64> {
        match field {
            SortField::Impact => self.impact,
            SortField::HIndex => self.h_index,
            SortField::Rank => self.rank,
            SortField::AnnualVolume => self.annual_volume,
            SortField::SelfCitation => self.self_citation,
            SortField::ChinaShare => self.china_share,
        }
    }
}

/// Partition from the first non-blank of `bigPartitionB`, `bigPartitionA`,
/// `fenqu`. Later candidates are not consulted when the first one has no
/// `N区` marker.
fn sci_partition(r: &SciRecord) -> Option<Partition> {
    [&r.big_partition_b, &r.big_partition_a, &r.fenqu]
        .into_iter()
        .filter_map(|f| f.as_deref().map(str::trim))
        .find(|s| !s.is_empty() && *s != "-")
        .and_then(parse::parse_partition)
        .and_then(Partition::new)
}

// ---------------------------------------------------------------------------
// Sort
// ---------------------------------------------------------------------------

/// Stable sort by derived key. Missing keys go last in either direction.
fn sort_candidates(candidates: &mut [Candidate<'_>], field: SortField, direction: Direction) {
    let key = |c: &Candidate<'_>| c.metrics.and_then(|m| m.key(field));
    candidates.sort_by(|a, b| match (key(a), key(b)) {
        (None, None) => Ordering::Equal,
        (None, Some(_)) => Ordering::Greater,
        (Some(_), None) => Ordering::Less,
        (Some(x), Some(y)) => {
            let ord = x.partial_cmp(&y).unwrap_or(Ordering::Equal);
            match direction {
                Direction::Up => ord,
                Direction::Down => ord.reverse(),
            }
        }
    });
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
