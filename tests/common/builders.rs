//! Test builders: ergonomic constructors for records and snapshots.
//!
//! These builders are designed for readability in test assertions, not for
//! production use. Every setter takes the raw string exactly as it would
//! appear in a snapshot document.

use fake::faker::company::en::CompanyName;
use fake::faker::lorem::en::Word;
use fake::Fake;
use jcat_core::{AhciRecord, DatasetId, EiRecord, Record, SciRecord, Snapshot};

// ---------------------------------------------------------------------------
// SciRecordBuilder
// ---------------------------------------------------------------------------

/// Fluent builder for SCI [`Record`] fixtures.
///
/// ```rust,ignore
/// let record = SciRecordBuilder::new("Cell")
///     .impact("42.5")
///     .categories(&["SCIE"])
///     .partition("1区")
///     .build();
/// ```
pub struct SciRecordBuilder {
    record: SciRecord,
}

impl SciRecordBuilder {
    pub fn new(name: &str) -> Self {
        Self {
            record: SciRecord {
                periodicals_name: Some(name.to_string()),
                ..Default::default()
            },
        }
    }

    pub fn issn(mut self, issn: &str) -> Self {
        self.record.issn = Some(issn.to_string());
        self
    }

    pub fn abbreviation(mut self, abbr: &str) -> Self {
        self.record.abbreviation = Some(abbr.to_string());
        self
    }

    pub fn chinese_title(mut self, title: &str) -> Self {
        self.record.chinese_title = Some(title.to_string());
        self
    }

    /// `impactFactorsE`, the primary impact column.
    pub fn impact(mut self, impact: &str) -> Self {
        self.record.impact_factors_e = Some(impact.to_string());
        self
    }

    pub fn impact_a(mut self, impact: &str) -> Self {
        self.record.impact_factors_a = Some(impact.to_string());
        self
    }

    pub fn impact_b(mut self, impact: &str) -> Self {
        self.record.impact_factors_b = Some(impact.to_string());
        self
    }

    pub fn self_citation(mut self, rate: &str) -> Self {
        self.record.self_citation_rate = Some(rate.to_string());
        self
    }

    /// `bigPartitionB`, the preferred partition column.
    pub fn partition(mut self, label: &str) -> Self {
        self.record.big_partition_b = Some(label.to_string());
        self
    }

    pub fn fenqu(mut self, label: &str) -> Self {
        self.record.fenqu = Some(label.to_string());
        self
    }

    pub fn categories(mut self, list: &[&str]) -> Self {
        self.record.sci_list = list.iter().map(|s| s.to_string()).collect();
        self
    }

    pub fn top_a(mut self, flag: &str) -> Self {
        self.record.top_a = Some(flag.to_string());
        self
    }

    pub fn top_b(mut self, flag: &str) -> Self {
        self.record.top_b = Some(flag.to_string());
        self
    }

    pub fn subject(mut self, subject: &str) -> Self {
        self.record.esi_subject = Some(subject.to_string());
        self
    }

    pub fn hindex(mut self, h: &str) -> Self {
        self.record.hindex = Some(h.to_string());
        self
    }

    pub fn ranking(mut self, ranking: &str) -> Self {
        self.record.ranking = Some(ranking.to_string());
        self
    }

    pub fn year_num(mut self, n: &str) -> Self {
        self.record.year_num = Some(n.to_string());
        self
    }

    pub fn china_share(mut self, share: &str) -> Self {
        self.record.china_proportion = Some(share.to_string());
        self
    }

    pub fn include(mut self, flag: &str) -> Self {
        self.record.include_i = Some(flag.to_string());
        self
    }

    pub fn build(self) -> Record {
        Record::Sci(self.record)
    }
}

// ---------------------------------------------------------------------------
// EI / AHCI
// ---------------------------------------------------------------------------

pub fn ei_record(title: &str, source_type: &str, subject: &str) -> Record {
    Record::Ei(EiRecord {
        source_title: Some(title.to_string()),
        source_type: Some(source_type.to_string()),
        subject_one: Some(subject.to_string()),
        ..Default::default()
    })
}

pub fn ahci_record(title: &str, subject: &str) -> Record {
    Record::Ahci(AhciRecord {
        journal_title: Some(title.to_string()),
        web_of_science: Some(subject.to_string()),
        ..Default::default()
    })
}

pub fn snapshot(dataset: DatasetId, records: Vec<Record>) -> Snapshot {
    Snapshot::new(dataset, records, None)
}

// ---------------------------------------------------------------------------
// Synthetic corpora
// ---------------------------------------------------------------------------

const SUBJECTS: &[&str] = &["Physics", "Chemistry", "Clinical Medicine", "Engineering", "Economics"];
const PARTITIONS: &[&str] = &["1区", "2区", "3区", "4区", "-", ""];
const IMPACTS: &[&str] = &["N/A", "-", "", "<0.1"];

/// `n` SCI records with random names and metrics. Roughly one in eight
/// records has an unparseable impact so that missing-value paths are hit.
pub fn synthetic_sci(n: usize) -> Vec<Record> {
    (0..n)
        .map(|i| {
            let name: String = CompanyName().fake();
            let impact = if (0..8usize).fake::<usize>() == 0 {
                IMPACTS[(0..IMPACTS.len()).fake::<usize>()].to_string()
            } else {
                format!("{:.3}", (0.0..40.0).fake::<f64>())
            };
            SciRecordBuilder::new(&format!("{name} Journal {i}"))
                .issn(&format!("{:04}-{:04}", i % 10_000, (0..10_000u32).fake::<u32>()))
                .impact(&impact)
                .self_citation(&format!("{:.1}%", (0.0..60.0).fake::<f64>()))
                .partition(PARTITIONS[(0..PARTITIONS.len()).fake::<usize>()])
                .categories(if i % 3 == 0 { &["SSCI"] } else { &["SCIE"] })
                .top_a(if i % 5 == 0 { "是" } else { "否" })
                .top_b(if i % 7 == 0 { "是" } else { "否" })
                .subject(SUBJECTS[i % SUBJECTS.len()])
                .hindex(&(0..400u32).fake::<u32>().to_string())
                .ranking(&format!("{}/{}", (1..300u32).fake::<u32>(), 300))
                .year_num(&(10..5000u32).fake::<u32>().to_string())
                .china_share(&format!("{:.2}%", (0.0..80.0).fake::<f64>()))
                .build()
        })
        .collect()
}

/// `n` EI records cycling through a few types.
pub fn synthetic_ei(n: usize) -> Vec<Record> {
    const TYPES: &[&str] = &["Journal", "Conference Proceeding", "Book Series"];
    (0..n)
        .map(|i| {
            let word: String = Word().fake();
            ei_record(&format!("{word} Letters {i}"), TYPES[i % TYPES.len()], SUBJECTS[i % SUBJECTS.len()])
        })
        .collect()
}
