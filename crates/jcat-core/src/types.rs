//! Core types for jcat-core.
//!
//! This module defines the data shared across every layer: the closed set of
//! [`DatasetId`]s, the per-dataset record schemas wrapped in the [`Record`]
//! tagged union, and the immutable [`Snapshot`] the store hands out.
//!
//! Every scalar field is kept as the raw string found in the JSON document.
//! Numbers and booleans are coerced to text on load so that a hand-edited
//! snapshot with `"yearNum": 312` behaves like one with `"yearNum": "312"`.
//! Interpretation happens later, in [`crate::parse`].

use serde::{Deserialize, Deserializer};
use serde_json::Value;

use crate::error::QueryError;

// ---------------------------------------------------------------------------
// DatasetId
// ---------------------------------------------------------------------------

/// Which journal index a snapshot, record, or query belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum DatasetId {
    /// Science Citation Index family (SCIE/SSCI/ESCI/…). The richest schema.
    #[default]
    Sci,
    /// Engineering Index.
    Ei,
    /// Arts & Humanities Citation Index.
    Ahci,
}

impl DatasetId {
    pub const ALL: [DatasetId; 3] = [DatasetId::Sci, DatasetId::Ei, DatasetId::Ahci];

    /// Wire label, as used in query strings and on the `--db` flag.
    pub fn label(self) -> &'static str {
        match self {
            DatasetId::Sci => "SCI",
            DatasetId::Ei => "EI",
            DatasetId::Ahci => "AHCI",
        }
    }

    /// Number of records per result page.
    pub fn page_size(self) -> usize {
        match self {
            DatasetId::Sci => 20,
            DatasetId::Ei => 10,
            DatasetId::Ahci => 10,
        }
    }

    /// Stable slot index, used by the store's per-dataset cells.
    pub(crate) fn index(self) -> usize {
        match self {
            DatasetId::Sci => 0,
            DatasetId::Ei => 1,
            DatasetId::Ahci => 2,
        }
    }
}

impl std::fmt::Display for DatasetId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

impl std::str::FromStr for DatasetId {
    type Err = QueryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "SCI" => Ok(DatasetId::Sci),
            "EI" => Ok(DatasetId::Ei),
            "AHCI" => Ok(DatasetId::Ahci),
            other => Err(QueryError::UnknownDataset(other.to_string())),
        }
    }
}

// ---------------------------------------------------------------------------
// Lenient field decoding
// ---------------------------------------------------------------------------

/// Accept any JSON scalar as text. `null` becomes `None`.
fn lenient_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Option::<Value>::deserialize(deserializer)? {
        None | Some(Value::Null) => None,
        Some(Value::String(s)) => Some(s),
        Some(other) => Some(other.to_string()),
    })
}

/// Accept an array of scalars; anything else is an empty list.
fn lenient_list<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Option::<Value>::deserialize(deserializer)? {
        Some(Value::Array(values)) => values
            .into_iter()
            .filter_map(|v| match v {
                Value::Null => None,
                Value::String(s) => Some(s),
                other => Some(other.to_string()),
            })
            .collect(),
        _ => Vec::new(),
    })
}

// ---------------------------------------------------------------------------
// Record schemas
// ---------------------------------------------------------------------------

/// One journal from the SCI snapshot.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SciRecord {
    #[serde(deserialize_with = "lenient_string")]
    pub periodicals_name: Option<String>,
    #[serde(deserialize_with = "lenient_string")]
    pub chinese_title: Option<String>,
    #[serde(deserialize_with = "lenient_string")]
    pub abbreviation: Option<String>,
    #[serde(deserialize_with = "lenient_string")]
    pub issn: Option<String>,
    #[serde(deserialize_with = "lenient_string")]
    pub e_issn: Option<String>,
    /// Primary index the journal is listed in, e.g. `"SCIE"`.
    #[serde(deserialize_with = "lenient_string")]
    pub search_database: Option<String>,
    /// All indexes the journal is listed in.
    #[serde(deserialize_with = "lenient_list")]
    pub sci_list: Vec<String>,
    #[serde(deserialize_with = "lenient_string")]
    pub impact_factors_e: Option<String>,
    #[serde(deserialize_with = "lenient_string")]
    pub impact_factors_a: Option<String>,
    #[serde(deserialize_with = "lenient_string")]
    pub impact_factors_b: Option<String>,
    /// Lower end of the published impact range.
    #[serde(deserialize_with = "lenient_string")]
    pub impact_a: Option<String>,
    /// Upper end of the published impact range.
    #[serde(deserialize_with = "lenient_string")]
    pub impact_b: Option<String>,
    #[serde(deserialize_with = "lenient_string")]
    pub self_citation_rate: Option<String>,
    #[serde(deserialize_with = "lenient_string")]
    pub big_partition_a: Option<String>,
    #[serde(deserialize_with = "lenient_string")]
    pub big_partition_b: Option<String>,
    #[serde(deserialize_with = "lenient_string")]
    pub fenqu: Option<String>,
    #[serde(deserialize_with = "lenient_string")]
    pub jcr_partition: Option<String>,
    /// `"是"` when the journal is top-tier in the SCIE ranking.
    #[serde(deserialize_with = "lenient_string")]
    pub top_a: Option<String>,
    /// `"是"` when the journal is top-tier in the SSCI ranking.
    #[serde(deserialize_with = "lenient_string")]
    pub top_b: Option<String>,
    #[serde(deserialize_with = "lenient_string")]
    pub esi_subject: Option<String>,
    #[serde(deserialize_with = "lenient_string")]
    pub hindex: Option<String>,
    /// `"<rank>/<out of>"`.
    #[serde(deserialize_with = "lenient_string")]
    pub ranking: Option<String>,
    #[serde(deserialize_with = "lenient_string")]
    pub year_num: Option<String>,
    #[serde(deserialize_with = "lenient_string")]
    pub china_proportion: Option<String>,
    #[serde(deserialize_with = "lenient_string")]
    pub publisher: Option<String>,
    #[serde(deserialize_with = "lenient_string")]
    pub different_countries: Option<String>,
    #[serde(deserialize_with = "lenient_string")]
    pub is_oa: Option<String>,
    /// Inclusion status; anything other than `"是"`/`"-"` means delisted.
    #[serde(deserialize_with = "lenient_string")]
    pub include_i: Option<String>,
    #[serde(deserialize_with = "lenient_string")]
    pub warning_w: Option<String>,
    #[serde(deserialize_with = "lenient_string")]
    pub contribution_connect: Option<String>,
    /// Cover image file name.
    #[serde(deserialize_with = "lenient_string")]
    pub picture: Option<String>,
}

/// One journal or proceedings series from the EI snapshot.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct EiRecord {
    #[serde(deserialize_with = "lenient_string")]
    pub source_title: Option<String>,
    #[serde(deserialize_with = "lenient_string")]
    pub chinese_title: Option<String>,
    #[serde(deserialize_with = "lenient_string")]
    pub source_type: Option<String>,
    #[serde(deserialize_with = "lenient_string")]
    pub ei_issn: Option<String>,
    #[serde(deserialize_with = "lenient_string")]
    pub ei_eissn: Option<String>,
    #[serde(deserialize_with = "lenient_string")]
    pub subject_one: Option<String>,
    #[serde(deserialize_with = "lenient_string")]
    pub subject_two: Option<String>,
    #[serde(deserialize_with = "lenient_string")]
    pub subject_three: Option<String>,
    #[serde(deserialize_with = "lenient_string")]
    pub publisher: Option<String>,
    #[serde(deserialize_with = "lenient_string")]
    pub country_region: Option<String>,
    #[serde(deserialize_with = "lenient_string")]
    pub is_database: Option<String>,
    #[serde(deserialize_with = "lenient_string")]
    pub ei_web: Option<String>,
    /// Cover image file name.
    #[serde(deserialize_with = "lenient_string")]
    pub fiele_a: Option<String>,
}

/// One journal from the AHCI snapshot.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AhciRecord {
    #[serde(deserialize_with = "lenient_string")]
    pub journal_title: Option<String>,
    #[serde(deserialize_with = "lenient_string")]
    pub chinese_title: Option<String>,
    #[serde(deserialize_with = "lenient_string")]
    pub ahci_issn: Option<String>,
    #[serde(deserialize_with = "lenient_string")]
    pub ahci_eissn: Option<String>,
    #[serde(deserialize_with = "lenient_string")]
    pub web_of_science: Option<String>,
    #[serde(deserialize_with = "lenient_string")]
    pub fenqu: Option<String>,
    #[serde(deserialize_with = "lenient_string")]
    pub ahci_languages: Option<String>,
    #[serde(deserialize_with = "lenient_string")]
    pub year_num: Option<String>,
    #[serde(deserialize_with = "lenient_string")]
    pub impact_index: Option<String>,
    #[serde(deserialize_with = "lenient_string")]
    pub ahci_jci: Option<String>,
    #[serde(deserialize_with = "lenient_string")]
    pub publisher: Option<String>,
    #[serde(deserialize_with = "lenient_string")]
    pub is_database: Option<String>,
    #[serde(deserialize_with = "lenient_string")]
    pub ei_web: Option<String>,
    #[serde(deserialize_with = "lenient_string")]
    pub top: Option<String>,
    /// Cover image file name.
    #[serde(deserialize_with = "lenient_string")]
    pub fiele_a: Option<String>,
}

// ---------------------------------------------------------------------------
// Record
// ---------------------------------------------------------------------------

/// A record of any dataset, discriminated by its schema.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Record {
    Sci(SciRecord),
    Ei(EiRecord),
    Ahci(AhciRecord),
}

impl Record {
    /// Decode one snapshot item. Items that are not objects (or whose fields
    /// are structurally unusable) become an empty record of the right kind.
    pub fn decode(dataset: DatasetId, item: Value) -> Record {
        fn or_empty<T: Default + for<'de> Deserialize<'de>>(dataset: DatasetId, item: Value) -> T {
            if !item.is_object() {
                tracing::debug!(%dataset, "snapshot item is not an object; treating as empty");
                return T::default();
            }
            serde_json::from_value(item).unwrap_or_else(|err| {
                tracing::debug!(%dataset, error = %err, "undecodable snapshot item; treating as empty");
                T::default()
            })
        }

        match dataset {
            DatasetId::Sci => Record::Sci(or_empty(dataset, item)),
            DatasetId::Ei => Record::Ei(or_empty(dataset, item)),
            DatasetId::Ahci => Record::Ahci(or_empty(dataset, item)),
        }
    }

    pub fn dataset(&self) -> DatasetId {
        match self {
            Record::Sci(_) => DatasetId::Sci,
            Record::Ei(_) => DatasetId::Ei,
            Record::Ahci(_) => DatasetId::Ahci,
        }
    }

    /// The journal's display title.
    pub fn title(&self) -> Option<&str> {
        match self {
            Record::Sci(r) => r.periodicals_name.as_deref(),
            Record::Ei(r) => r.source_title.as_deref(),
            Record::Ahci(r) => r.journal_title.as_deref(),
        }
    }

    /// Fields searched by free-text queries, in a fixed per-dataset order.
    pub fn text_fields(&self) -> [Option<&str>; 5] {
        match self {
            Record::Sci(r) => [
                r.periodicals_name.as_deref(),
                r.issn.as_deref(),
                r.e_issn.as_deref(),
                r.abbreviation.as_deref(),
                r.chinese_title.as_deref(),
            ],
            Record::Ei(r) => [
                r.source_title.as_deref(),
                r.ei_issn.as_deref(),
                r.ei_eissn.as_deref(),
                r.subject_one.as_deref(),
                r.chinese_title.as_deref(),
            ],
            Record::Ahci(r) => [
                r.journal_title.as_deref(),
                r.ahci_issn.as_deref(),
                r.ahci_eissn.as_deref(),
                r.web_of_science.as_deref(),
                r.chinese_title.as_deref(),
            ],
        }
    }
}

// ---------------------------------------------------------------------------
// Snapshot
// ---------------------------------------------------------------------------

/// Immutable, fully loaded copy of one dataset.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Snapshot {
    pub dataset: DatasetId,
    pub records: Vec<Record>,
    /// Opaque build timestamp shown to users, e.g. `"2024-06-01 08:00"`.
    pub generated_at: Option<String>,
}

impl Snapshot {
    pub fn new(dataset: DatasetId, records: Vec<Record>, generated_at: Option<String>) -> Self {
        Self {
            dataset,
            records,
            generated_at,
        }
    }

    /// Decode a `{ "items": [...], "generatedAt": "..." }` document.
    ///
    /// Only invalid JSON is an error. A missing or non-array `items` yields an
    /// empty snapshot, and a non-string `generatedAt` is ignored.
    pub fn from_json(dataset: DatasetId, bytes: &[u8]) -> Result<Self, serde_json::Error> {
        let doc: Value = serde_json::from_slice(bytes)?;
        let (items, generated_at) = match doc {
            Value::Object(mut map) => {
                let items = match map.remove("items") {
                    Some(Value::Array(items)) => items,
                    _ => Vec::new(),
                };
                let generated_at = match map.remove("generatedAt") {
                    Some(Value::String(s)) if !s.is_empty() => Some(s),
                    _ => None,
                };
                (items, generated_at)
            }
            _ => (Vec::new(), None),
        };

        let records = items
            .into_iter()
            .map(|item| Record::decode(dataset, item))
            .collect();
        Ok(Self::new(dataset, records, generated_at))
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
