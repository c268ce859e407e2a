//! Result cards: the summary shown for each record in a result page.
//!
//! Cards are plain data. [`crate::html`] and [`crate::text`] turn them into
//! markup or terminal lines; nothing here escapes or formats for output.

use jcat_core::parse::{is_blank, is_yes};
use jcat_core::{AhciRecord, EiRecord, Record, SciRecord};

/// Tag shown when a journal has been dropped from its index.
pub const DELISTED: &str = "已被踢库";
/// Tag shown for top-tier journals.
pub const TOP: &str = "TOP";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tag {
    pub label: String,
    /// Rendered as a warning.
    pub alert: bool,
}

impl Tag {
    fn plain(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            alert: false,
        }
    }

    fn alert(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            alert: true,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Card {
    pub title: String,
    /// Absolute cover image URL, if the record names one.
    pub cover: Option<String>,
    pub tags: Vec<Tag>,
    /// `(label, value)` lines; missing values are `"-"`.
    pub meta: Vec<(&'static str, String)>,
}

impl Card {
    pub fn from_record(record: &Record, image_base: &str) -> Card {
        match record {
            Record::Sci(r) => Card {
                title: or_dash(r.periodicals_name.as_deref()),
                cover: cover_url(image_base, r.picture.as_deref()),
                tags: tags(record),
                meta: vec![
                    ("ISSN", or_dash(r.issn.as_deref())),
                    ("e-ISSN", or_dash(r.e_issn.as_deref())),
                    ("影响指数", sci_impact_display(r).unwrap_or_else(|| "-".to_string())),
                    ("学科", or_dash(r.esi_subject.as_deref())),
                ],
            },
            Record::Ei(r) => Card {
                title: or_dash(r.source_title.as_deref()),
                cover: cover_url(image_base, r.fiele_a.as_deref()),
                tags: tags(record),
                meta: vec![
                    ("ISSN", or_dash(r.ei_issn.as_deref())),
                    ("e-ISSN", or_dash(r.ei_eissn.as_deref())),
                    ("学科", or_dash(r.subject_one.as_deref())),
                ],
            },
            Record::Ahci(r) => Card {
                title: or_dash(r.journal_title.as_deref()),
                cover: cover_url(image_base, r.fiele_a.as_deref()),
                tags: tags(record),
                meta: vec![
                    ("ISSN", or_dash(r.ahci_issn.as_deref())),
                    ("e-ISSN", or_dash(r.ahci_eissn.as_deref())),
                    ("学科", or_dash(r.web_of_science.as_deref())),
                ],
            },
        }
    }
}

/// Index, top-tier and delisting tags for a record.
pub fn tags(record: &Record) -> Vec<Tag> {
    let mut tags = Vec::new();
    match record {
        Record::Sci(r) => {
            tags.extend(sci_indexes(r).into_iter().map(Tag::plain));
            if sci_is_top(r) {
                tags.push(Tag::plain(TOP));
            }
            if is_delisted(r.include_i.as_deref()) {
                tags.push(Tag::alert(DELISTED));
            }
        }
        Record::Ei(r) => {
            tags.push(Tag::plain(ei_kind(r)));
            if is_delisted(r.is_database.as_deref()) {
                tags.push(Tag::alert(DELISTED));
            }
        }
        Record::Ahci(r) => {
            tags.push(Tag::plain("A&HCI"));
            if ahci_is_top(r) {
                tags.push(Tag::plain(TOP));
            }
            if is_delisted(r.is_database.as_deref()) {
                tags.push(Tag::alert(DELISTED));
            }
        }
    }
    tags
}

/// `sciList`, or the primary index when the list is empty.
fn sci_indexes(r: &SciRecord) -> Vec<String> {
    if !r.sci_list.is_empty() {
        return r.sci_list.clone();
    }
    non_empty(r.search_database.as_deref())
        .map(|s| vec![s.to_string()])
        .unwrap_or_default()
}

/// Display tags ignore the category filter: either flag makes a journal TOP.
fn sci_is_top(r: &SciRecord) -> bool {
    is_yes(r.top_a.as_deref()) || is_yes(r.top_b.as_deref())
}

fn ahci_is_top(r: &AhciRecord) -> bool {
    is_yes(r.top.as_deref())
}

fn ei_kind(r: &EiRecord) -> String {
    non_empty(r.source_type.as_deref()).unwrap_or("EI").to_string()
}

/// An inclusion flag that is present but neither `是` nor `-`.
pub fn is_delisted(flag: Option<&str>) -> bool {
    !is_blank(flag) && !is_yes(flag)
}

/// `impactA-impactB` when both ends are present, else `impactFactorsE`.
pub(crate) fn sci_impact_display(r: &SciRecord) -> Option<String> {
    match (non_empty(r.impact_a.as_deref()), non_empty(r.impact_b.as_deref())) {
        (Some(a), Some(b)) => Some(format!("{a}-{b}")),
        _ => non_empty(r.impact_factors_e.as_deref()).map(str::to_string),
    }
}

pub(crate) fn cover_url(image_base: &str, image: Option<&str>) -> Option<String> {
    non_empty(image).map(|name| format!("{}/{}", image_base.trim_end_matches('/'), name))
}

pub(crate) fn non_empty(value: Option<&str>) -> Option<&str> {
    value.filter(|s| !s.is_empty())
}

fn or_dash(value: Option<&str>) -> String {
    non_empty(value).unwrap_or("-").to_string()
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
