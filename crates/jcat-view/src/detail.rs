//! Detail view: every labelled field of one record.

use jcat_core::parse::is_blank;
use jcat_core::Record;

use crate::card::{cover_url, non_empty, sci_impact_display, tags, Tag};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DetailRow {
    pub label: &'static str,
    pub value: String,
    /// Spans the full width of the detail grid.
    pub wide: bool,
    /// The value is a URL.
    pub link: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Detail {
    pub title: String,
    pub subtitle: Option<String>,
    pub cover: Option<String>,
    pub tags: Vec<Tag>,
    /// Only rows with a non-blank value.
    pub rows: Vec<DetailRow>,
}

/// Collects rows, dropping blank values.
#[derive(Default)]
struct Rows(Vec<DetailRow>);

impl Rows {
    fn push(&mut self, label: &'static str, value: Option<&str>) -> &mut Self {
        self.add(label, value, false, false)
    }

    fn wide(&mut self, label: &'static str, value: Option<&str>) -> &mut Self {
        self.add(label, value, true, false)
    }

    fn link(&mut self, label: &'static str, value: Option<&str>) -> &mut Self {
        self.add(label, value, true, true)
    }

    fn add(&mut self, label: &'static str, value: Option<&str>, wide: bool, link: bool) -> &mut Self {
        if let (false, Some(value)) = (is_blank(value), value) {
            self.0.push(DetailRow {
                label,
                value: value.to_string(),
                wide,
                link,
            });
        }
        self
    }
}

impl Detail {
    pub fn from_record(record: &Record, image_base: &str) -> Detail {
        let mut rows = Rows::default();
        let (title, subject, image) = match record {
            Record::Sci(r) => {
                let impact = sci_impact_display(r).or_else(|| {
                    non_empty(r.impact_factors_a.as_deref())
                        .or(non_empty(r.impact_factors_b.as_deref()))
                        .map(str::to_string)
                });
                rows.push("中文刊名", r.chinese_title.as_deref())
                    .push("期刊缩写", r.abbreviation.as_deref())
                    .push("ISSN", r.issn.as_deref())
                    .push("e-ISSN", r.e_issn.as_deref())
                    .push("收录库", r.search_database.as_deref())
                    .push("影响指数", impact.as_deref())
                    .push("自引率", r.self_citation_rate.as_deref())
                    .push("国内分区", r.big_partition_b.as_deref())
                    .wide("JCR分区", r.jcr_partition.as_deref())
                    .push("ESI学科", r.esi_subject.as_deref())
                    .push("年发文量", r.year_num.as_deref())
                    .push("国人占比", r.china_proportion.as_deref())
                    .push("H指数", r.hindex.as_deref())
                    .push("出版社", r.publisher.as_deref())
                    .push("国家地区", r.different_countries.as_deref())
                    .push("OA", r.is_oa.as_deref())
                    .push("收录状态", r.include_i.as_deref())
                    .push("风险提示", r.warning_w.as_deref())
                    .link("投稿官网", r.contribution_connect.as_deref());
                (
                    r.periodicals_name.as_deref(),
                    non_empty(r.chinese_title.as_deref()).or(non_empty(r.esi_subject.as_deref())),
                    r.picture.as_deref(),
                )
            }
            Record::Ei(r) => {
                rows.push("中文刊名", r.chinese_title.as_deref())
                    .push("类型", r.source_type.as_deref())
                    .push("ISSN", r.ei_issn.as_deref())
                    .push("e-ISSN", r.ei_eissn.as_deref())
                    .push("学科一", r.subject_one.as_deref())
                    .push("学科二", r.subject_two.as_deref())
                    .push("学科三", r.subject_three.as_deref())
                    .push("出版社", r.publisher.as_deref())
                    .push("国家地区", r.country_region.as_deref())
                    .push("收录状态", r.is_database.as_deref())
                    .link("期刊官网", r.ei_web.as_deref());
                (
                    r.source_title.as_deref(),
                    non_empty(r.chinese_title.as_deref()).or(non_empty(r.subject_one.as_deref())),
                    r.fiele_a.as_deref(),
                )
            }
            Record::Ahci(r) => {
                rows.push("中文刊名", r.chinese_title.as_deref())
                    .push("ISSN", r.ahci_issn.as_deref())
                    .push("e-ISSN", r.ahci_eissn.as_deref())
                    .push("学科", r.web_of_science.as_deref())
                    .push("国内分区", r.fenqu.as_deref())
                    .push("语言", r.ahci_languages.as_deref())
                    .push("年发文量", r.year_num.as_deref())
                    .push("影响指数", r.impact_index.as_deref())
                    .push("JCI", r.ahci_jci.as_deref())
                    .push("出版社", r.publisher.as_deref())
                    .push("收录状态", r.is_database.as_deref())
                    .link("期刊官网", r.ei_web.as_deref());
                (
                    r.journal_title.as_deref(),
                    non_empty(r.chinese_title.as_deref()).or(non_empty(r.web_of_science.as_deref())),
                    r.fiele_a.as_deref(),
                )
            }
        };

        Detail {
            title: non_empty(title).unwrap_or("-").to_string(),
            subtitle: non_empty(subject).map(str::to_string),
            cover: cover_url(image_base, image),
            tags: tags(record),
            rows: rows.0,
        }
    }

    pub fn row(&self, label: &str) -> Option<&DetailRow> {
        self.rows.iter().find(|r| r.label == label)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
