//! Query model: what the caller asks the engine for.
//!
//! Filter values come from fixed enumerations and are parsed from the labels
//! the catalog UI shows (`"1-3"`, `"50%以上"`, `"影响指数|down"`, …). The
//! label `"全部"` is the "no constraint" sentinel and parses to `None`.

use phf::phf_map;

use crate::error::QueryError;
use crate::types::DatasetId;

/// Label meaning "no constraint" for every filter.
pub const ANY: &str = "全部";

// ---------------------------------------------------------------------------
// Bands
// ---------------------------------------------------------------------------

/// Half-open numeric interval `[lo, hi)`. An open end is unbounded.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Band {
    pub lo: Option<f64>,
    pub hi: Option<f64>,
}

impl Band {
    pub const fn new(lo: Option<f64>, hi: Option<f64>) -> Self {
        Self { lo, hi }
    }

    pub fn contains(&self, value: f64) -> bool {
        self.lo.map_or(true, |lo| value >= lo) && self.hi.map_or(true, |hi| value < hi)
    }
}

/// Impact-factor bands offered by the SCI filter panel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ImpactBand {
    Below1,
    From1To3,
    From3To5,
    From5To10,
    AtLeast10,
}

impl ImpactBand {
    pub const ALL: [ImpactBand; 5] = [
        ImpactBand::Below1,
        ImpactBand::From1To3,
        ImpactBand::From3To5,
        ImpactBand::From5To10,
        ImpactBand::AtLeast10,
    ];

    pub fn label(self) -> &'static str {
        match self {
            ImpactBand::Below1 => "<1",
            ImpactBand::From1To3 => "1-3",
            ImpactBand::From3To5 => "3-5",
            ImpactBand::From5To10 => "5-10",
            ImpactBand::AtLeast10 => ">10",
        }
    }

    pub fn band(self) -> Band {
        match self {
            ImpactBand::Below1 => Band::new(None, Some(1.0)),
            ImpactBand::From1To3 => Band::new(Some(1.0), Some(3.0)),
            ImpactBand::From3To5 => Band::new(Some(3.0), Some(5.0)),
            ImpactBand::From5To10 => Band::new(Some(5.0), Some(10.0)),
            ImpactBand::AtLeast10 => Band::new(Some(10.0), None),
        }
    }
}

/// Self-citation-rate bands (percent) offered by the SCI filter panel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SelfCitationBand {
    Upto5,
    From5To10,
    From10To20,
    From20To30,
    From30To50,
    AtLeast50,
}

impl SelfCitationBand {
    pub const ALL: [SelfCitationBand; 6] = [
        SelfCitationBand::Upto5,
        SelfCitationBand::From5To10,
        SelfCitationBand::From10To20,
        SelfCitationBand::From20To30,
        SelfCitationBand::From30To50,
        SelfCitationBand::AtLeast50,
    ];

    pub fn label(self) -> &'static str {
        match self {
            SelfCitationBand::Upto5 => "0-5%",
            SelfCitationBand::From5To10 => "5-10%",
            SelfCitationBand::From10To20 => "10-20%",
            SelfCitationBand::From20To30 => "20-30%",
            SelfCitationBand::From30To50 => "30-50%",
            SelfCitationBand::AtLeast50 => "50%以上",
        }
    }

    pub fn band(self) -> Band {
        match self {
            SelfCitationBand::Upto5 => Band::new(Some(0.0), Some(5.0)),
            SelfCitationBand::From5To10 => Band::new(Some(5.0), Some(10.0)),
            SelfCitationBand::From10To20 => Band::new(Some(10.0), Some(20.0)),
            SelfCitationBand::From20To30 => Band::new(Some(20.0), Some(30.0)),
            SelfCitationBand::From30To50 => Band::new(Some(30.0), Some(50.0)),
            SelfCitationBand::AtLeast50 => Band::new(Some(50.0), None),
        }
    }
}

// ---------------------------------------------------------------------------
// Category / partition
// ---------------------------------------------------------------------------

/// SCI index category. SCIE and SSCI are named because they select which
/// top-tier flag applies.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Category {
    Scie,
    Ssci,
    Other(String),
}

impl Category {
    pub fn as_str(&self) -> &str {
        match self {
            Category::Scie => "SCIE",
            Category::Ssci => "SSCI",
            Category::Other(s) => s,
        }
    }
}

impl From<&str> for Category {
    fn from(s: &str) -> Self {
        match s {
            "SCIE" => Category::Scie,
            "SSCI" => Category::Ssci,
            other => Category::Other(other.to_string()),
        }
    }
}

/// Domestic partition, 1 (best) to 4.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Partition(u8);

impl Partition {
    pub fn new(n: u8) -> Option<Self> {
        (1..=4).contains(&n).then_some(Self(n))
    }

    pub fn get(self) -> u8 {
        self.0
    }
}

// ---------------------------------------------------------------------------
// Filters
// ---------------------------------------------------------------------------

/// SCI filter panel. `None` means "全部".
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SciFilters {
    pub category: Option<Category>,
    pub impact: Option<ImpactBand>,
    pub self_citation: Option<SelfCitationBand>,
    pub partition: Option<Partition>,
    pub top: Option<bool>,
    pub subject: Option<String>,
}

/// Every filter of every dataset. Only the group matching the snapshot's
/// dataset is consulted by the engine.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Filters {
    pub sci: SciFilters,
    /// EI `sourceType`.
    pub ei_type: Option<String>,
    /// AHCI `webOfScience`.
    pub ahci_subject: Option<String>,
}

impl Filters {
    pub fn is_unconstrained(&self) -> bool {
        *self == Filters::default()
    }

    /// Set one filter from its panel key and chip label. Keys are
    /// `category`, `impact`, `selfCitation`, `partition`, `top`, `subject`,
    /// `eiType` and `ahciSubject`.
    pub fn set(&mut self, key: &str, label: &str) -> Result<(), QueryError> {
        match key {
            "category" => self.sci.category = parse_exact(label).map(|c| Category::from(c.as_str())),
            "impact" => self.sci.impact = parse_impact(label)?,
            "selfCitation" => self.sci.self_citation = parse_self_citation(label)?,
            "partition" => self.sci.partition = parse_partition_filter(label)?,
            "top" => self.sci.top = parse_top(label)?,
            "subject" => self.sci.subject = parse_exact(label),
            "eiType" => self.ei_type = parse_exact(label),
            "ahciSubject" => self.ahci_subject = parse_exact(label),
            other => return Err(QueryError::UnknownFilter(other.to_string())),
        }
        Ok(())
    }
}

/// Parse a filter label; [`ANY`] and the empty string mean no constraint.
pub fn parse_filter<T>(
    filter: &'static str,
    label: &str,
    parse: impl Fn(&str) -> Option<T>,
) -> Result<Option<T>, QueryError> {
    let label = label.trim();
    if label.is_empty() || label == ANY {
        return Ok(None);
    }
    parse(label).map(Some).ok_or_else(|| QueryError::UnknownValue {
        filter,
        value: label.to_string(),
    })
}

pub fn parse_impact(label: &str) -> Result<Option<ImpactBand>, QueryError> {
    parse_filter("impact", label, |l| {
        ImpactBand::ALL.into_iter().find(|b| b.label() == l)
    })
}

pub fn parse_self_citation(label: &str) -> Result<Option<SelfCitationBand>, QueryError> {
    parse_filter("self-citation", label, |l| {
        SelfCitationBand::ALL.into_iter().find(|b| b.label() == l)
    })
}

/// Accepts `"2"`, `"2区"`, or any label starting with the digit.
pub fn parse_partition_filter(label: &str) -> Result<Option<Partition>, QueryError> {
    parse_filter("partition", label, |l| {
        l.chars()
            .next()
            .and_then(|c| c.to_digit(10))
            .and_then(|d| Partition::new(d as u8))
    })
}

pub fn parse_top(label: &str) -> Result<Option<bool>, QueryError> {
    parse_filter("top", label, |l| match l {
        "是" => Some(true),
        "否" => Some(false),
        _ => None,
    })
}

/// Free-valued equality filters (category, subject, EI type, AHCI subject).
pub fn parse_exact(label: &str) -> Option<String> {
    let label = label.trim();
    (!label.is_empty() && label != ANY).then(|| label.to_string())
}

// ---------------------------------------------------------------------------
// Sort
// ---------------------------------------------------------------------------

/// Derived numeric keys the SCI listing can be ordered by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SortField {
    Impact,
    HIndex,
    Rank,
    AnnualVolume,
    SelfCitation,
    ChinaShare,
}

static SORT_LABELS: phf::Map<&'static str, SortField> = phf_map! {
    "影响指数" => SortField::Impact,
    "H指数" => SortField::HIndex,
    "排名" => SortField::Rank,
    "年发文量" => SortField::AnnualVolume,
    "自引率" => SortField::SelfCitation,
    "国人占比" => SortField::ChinaShare,
};

impl SortField {
    pub fn label(self) -> &'static str {
        match self {
            SortField::Impact => "影响指数",
            SortField::HIndex => "H指数",
            SortField::Rank => "排名",
            SortField::AnnualVolume => "年发文量",
            SortField::SelfCitation => "自引率",
            SortField::ChinaShare => "国人占比",
        }
    }

    pub fn from_label(label: &str) -> Option<Self> {
        SORT_LABELS.get(label).copied()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    /// Ascending (`up`).
    Up,
    /// Descending (`down`).
    Down,
}

impl Direction {
    pub fn label(self) -> &'static str {
        match self {
            Direction::Up => "up",
            Direction::Down => "down",
        }
    }

    pub fn flipped(self) -> Self {
        match self {
            Direction::Up => Direction::Down,
            Direction::Down => Direction::Up,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SortSpec {
    pub field: SortField,
    pub direction: Direction,
}

impl SortSpec {
    pub fn new(field: SortField, direction: Direction) -> Self {
        Self { field, direction }
    }

    /// Parse `"<label>|up"` / `"<label>|down"`. An empty string is no sort.
    /// Any direction other than `down` is ascending.
    pub fn parse(spec: &str) -> Result<Option<SortSpec>, QueryError> {
        let spec = spec.trim();
        if spec.is_empty() {
            return Ok(None);
        }
        let (label, dir) = spec
            .split_once('|')
            .ok_or_else(|| QueryError::MalformedSort(spec.to_string()))?;
        let field = SortField::from_label(label)
            .ok_or_else(|| QueryError::UnknownSortField(label.to_string()))?;
        let direction = if dir == "down" { Direction::Down } else { Direction::Up };
        Ok(Some(SortSpec::new(field, direction)))
    }

    /// Selecting the active field flips its direction; any other field
    /// starts descending.
    pub fn toggle(current: Option<SortSpec>, field: SortField) -> SortSpec {
        match current {
            Some(spec) if spec.field == field => SortSpec::new(field, spec.direction.flipped()),
            _ => SortSpec::new(field, Direction::Down),
        }
    }
}

impl std::fmt::Display for SortSpec {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}|{}", self.field.label(), self.direction.label())
    }
}

// ---------------------------------------------------------------------------
// Query
// ---------------------------------------------------------------------------

/// One request to the engine.
#[derive(Debug, Clone, PartialEq)]
pub struct Query {
    pub dataset: DatasetId,
    /// Free-text needle, already trimmed. Empty matches everything.
    pub text: String,
    pub filters: Filters,
    /// Only honoured for SCI.
    pub sort: Option<SortSpec>,
    /// 1-based requested page; clamped by the engine.
    pub page: usize,
}

impl Query {
    pub fn new(dataset: DatasetId) -> Self {
        Self {
            dataset,
            text: String::new(),
            filters: Filters::default(),
            sort: None,
            page: 1,
        }
    }

    pub fn text(mut self, text: impl AsRef<str>) -> Self {
        self.text = text.as_ref().trim().to_string();
        self
    }

    pub fn filters(mut self, filters: Filters) -> Self {
        self.filters = filters;
        self
    }

    pub fn sort(mut self, sort: Option<SortSpec>) -> Self {
        self.sort = sort;
        self
    }

    pub fn page(mut self, page: usize) -> Self {
        self.page = page;
        self
    }
}

// ---------------------------------------------------------------------------
// Initial state from a query string
// ---------------------------------------------------------------------------

/// Startup dataset and text taken from `?db=EI&q=nature`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InitialState {
    pub dataset: DatasetId,
    pub text: String,
}

impl InitialState {
    /// Unknown `db` values are ignored; `q` is trimmed. A leading `?` is
    /// accepted.
    pub fn from_query_string(qs: &str) -> Self {
        let qs = qs.strip_prefix('?').unwrap_or(qs);
        let mut state = InitialState::default();
        for (key, value) in url::form_urlencoded::parse(qs.as_bytes()) {
            match key.as_ref() {
                "db" => {
                    if let Ok(dataset) = value.parse() {
                        state.dataset = dataset;
                    }
                }
                "q" => state.text = value.trim().to_string(),
                _ => {}
            }
        }
        state
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
