//! Query engine integration harness.
//!
//! # What this covers
//!
//! - **Text match**: case-insensitive substring over each dataset's five
//!   designated fields; an empty needle matches everything.
//! - **Structured filters**: category, impact and self-citation bands,
//!   partition, top-tier (including its coupling to the category filter),
//!   subject, EI type and AHCI subject.
//! - **Missing values**: unparseable numbers drop out of numeric filters and
//!   sink to the end of numeric sorts in both directions.
//! - **Pagination**: per-dataset page sizes and clamping of out-of-range
//!   pages.
//! - **Properties** (proptest): totals without constraints, text-match
//!   soundness, page bounds and sort stability over random corpora.
//!
//! # What this does NOT cover
//!
//! - Loading snapshots (see store_harness)
//! - Rendering (see view_harness)
//!
//! # Running
//!
//! ```sh
//! cargo test --test engine_harness
//! ```

mod common;
use common::*;

use jcat_core::engine::{execute, SciMetrics};
use jcat_core::query::ImpactBand;
use jcat_core::{DatasetId, Direction, Filters, Query, Record, Snapshot, SortField, SortSpec};
use proptest::prelude::*;
use rstest::rstest;

fn load(doc: serde_json::Value, dataset: DatasetId) -> Snapshot {
    Snapshot::from_json(dataset, &to_bytes(&doc)).unwrap()
}

fn sci() -> Snapshot {
    load(sci_document(), DatasetId::Sci)
}

fn filtered(key: &str, label: &str) -> Query {
    let mut filters = Filters::default();
    filters.set(key, label).unwrap();
    Query::new(DatasetId::Sci).filters(filters)
}

fn by(field: SortField, direction: Direction) -> Query {
    Query::new(DatasetId::Sci).sort(Some(SortSpec::new(field, direction)))
}

// ---------------------------------------------------------------------------
// Text match
// ---------------------------------------------------------------------------

#[rstest]
#[case::title_case_insensitive("nature ENERGY", &["Nature Energy"])]
#[case::issn("1000-3290", &["Acta Physica Sinica"])]
#[case::abbreviation("nat energy", &["Nature Energy"])]
#[case::chinese_title("物理", &["Acta Physica Sinica"])]
#[case::surrounding_whitespace("   physical review  ", &["Physical Review Letters"])]
#[case::no_match("zzz", &[])]
fn text_matches_designated_fields(#[case] text: &str, #[case] expected: &[&str]) {
    let snap = sci();
    let result = execute(&snap, &Query::new(DatasetId::Sci).text(text));
    let titles: Vec<_> = result.items.iter().filter_map(|r| r.title()).collect();
    pretty_assertions::assert_eq!(titles, expected);
}

#[test]
fn subject_is_not_a_text_field_for_sci() {
    let snap = sci();
    let result = execute(&snap, &Query::new(DatasetId::Sci).text("Economics"));
    assert_eq!(result.total, 0);
}

#[test]
fn ei_text_searches_subject() {
    let snap = load(ei_document(), DatasetId::Ei);
    let result = execute(&snap, &Query::new(DatasetId::Ei).text("electronics"));
    assert_titles!(result, ["IEEE Sensors Conference"]);
}

// ---------------------------------------------------------------------------
// Filters
// ---------------------------------------------------------------------------

#[rstest]
#[case::category_scie("category", "SCIE", &["Nature Energy", "Acta Physica Sinica", "Physical Review Letters"])]
#[case::category_ssci("category", "SSCI", &["Journal of Economic Surveys"])]
#[case::impact_fallback_to_impact_a("impact", "5-10", &["Journal of Economic Surveys"])]
#[case::impact_band_lower_edge("impact", "3-5", &["Physical Review Letters"])]
#[case::thousands_separator("impact", ">10", &["Nature Energy", "Acta Physica Sinica"])]
#[case::self_citation("selfCitation", "10-20%", &["Physical Review Letters"])]
#[case::partition_first_candidate("partition", "1区", &["Nature Energy", "Physical Review Letters"])]
#[case::partition_from_big_partition_a("partition", "2", &["Journal of Economic Surveys"])]
#[case::partition_from_fenqu("partition", "4区", &["Acta Physica Sinica"])]
#[case::top_any_category("top", "是", &["Nature Energy", "Journal of Economic Surveys", "Physical Review Letters"])]
#[case::not_top("top", "否", &["Acta Physica Sinica"])]
#[case::subject("subject", "Physics", &["Acta Physica Sinica", "Physical Review Letters"])]
#[case::any_is_unconstrained("impact", "全部", &["Nature Energy", "Journal of Economic Surveys", "Acta Physica Sinica", "Physical Review Letters"])]
fn sci_filters(#[case] key: &str, #[case] label: &str, #[case] expected: &[&str]) {
    let snap = sci();
    let result = execute(&snap, &filtered(key, label));
    let titles: Vec<_> = result.items.iter().filter_map(|r| r.title()).collect();
    pretty_assertions::assert_eq!(titles, expected);
}

#[test]
fn top_flag_follows_category_filter() {
    let snap = sci();

    let mut filters = Filters::default();
    filters.set("category", "SSCI").unwrap();
    filters.set("top", "是").unwrap();
    let result = execute(&snap, &Query::new(DatasetId::Sci).filters(filters.clone()));
    assert_titles!(result, ["Journal of Economic Surveys"]);

    filters.set("category", "SCIE").unwrap();
    let result = execute(&snap, &Query::new(DatasetId::Sci).filters(filters));
    assert_titles!(result, ["Nature Energy", "Physical Review Letters"]);
}

#[test]
fn unparseable_impact_is_excluded_by_band_only() {
    let records = vec![
        SciRecordBuilder::new("Unknown").impact("N/A").build(),
        SciRecordBuilder::new("Mid").impact("2.0").build(),
    ];
    let snap = snapshot(DatasetId::Sci, records);

    let result = execute(&snap, &filtered("impact", "1-3"));
    assert_titles!(result, ["Mid"]);

    let result = execute(&snap, &Query::new(DatasetId::Sci));
    assert_eq!(result.total, 2);
}

#[test]
fn band_boundaries_are_half_open() {
    let snap = snapshot(
        DatasetId::Sci,
        vec![SciRecordBuilder::new("Edge").impact("3.0").build()],
    );
    assert_eq!(execute(&snap, &filtered("impact", "3-5")).total, 1);
    assert_eq!(execute(&snap, &filtered("impact", "1-3")).total, 0);
}

#[test]
fn ei_and_ahci_filters() {
    let ei = load(ei_document(), DatasetId::Ei);
    let mut filters = Filters::default();
    filters.set("eiType", "Book Series").unwrap();
    let result = execute(&ei, &Query::new(DatasetId::Ei).filters(filters));
    assert_titles!(result, ["Lecture Notes in Energy"]);

    let ahci = load(ahci_document(), DatasetId::Ahci);
    let mut filters = Filters::default();
    filters.set("ahciSubject", "History").unwrap();
    let result = execute(&ahci, &Query::new(DatasetId::Ahci).filters(filters));
    assert_titles!(result, ["Isis"]);
}

#[test]
fn sci_filters_are_ignored_for_other_datasets() {
    let ahci = load(ahci_document(), DatasetId::Ahci);
    let mut filters = Filters::default();
    filters.set("impact", ">10").unwrap();
    let result = execute(&ahci, &Query::new(DatasetId::Ahci).filters(filters));
    // The non-object item decodes to an empty record and still counts.
    assert_eq!(result.total, 4);
}

// ---------------------------------------------------------------------------
// Sorting
// ---------------------------------------------------------------------------

#[test]
fn sort_by_impact_descending() {
    let snap = sci();
    let result = execute(&snap, &by(SortField::Impact, Direction::Down));
    assert_titles!(
        result,
        ["Nature Energy", "Acta Physica Sinica", "Journal of Economic Surveys", "Physical Review Letters"]
    );
}

#[rstest]
#[case(Direction::Up, &["Nature Energy", "Journal of Economic Surveys", "Acta Physica Sinica", "Physical Review Letters"])]
#[case(Direction::Down, &["Journal of Economic Surveys", "Nature Energy", "Acta Physica Sinica", "Physical Review Letters"])]
fn missing_rank_sorts_last(#[case] direction: Direction, #[case] expected: &[&str]) {
    let snap = sci();
    let result = execute(&snap, &by(SortField::Rank, direction));
    let titles: Vec<_> = result.items.iter().filter_map(|r| r.title()).collect();
    pretty_assertions::assert_eq!(titles, expected);
}

#[test]
fn sort_is_stable_for_equal_keys() {
    let records = vec![
        SciRecordBuilder::new("B").hindex("50").build(),
        SciRecordBuilder::new("A").hindex("50").build(),
        SciRecordBuilder::new("C").hindex("90").build(),
        SciRecordBuilder::new("D").hindex("-").build(),
        SciRecordBuilder::new("E").hindex("50").build(),
    ];
    let snap = snapshot(DatasetId::Sci, records);
    let result = execute(&snap, &by(SortField::HIndex, Direction::Down));
    assert_titles!(result, ["C", "B", "A", "E", "D"]);
    let result = execute(&snap, &by(SortField::HIndex, Direction::Up));
    assert_titles!(result, ["B", "A", "E", "C", "D"]);
}

#[test]
fn sort_is_ignored_outside_sci() {
    let snap = load(ei_document(), DatasetId::Ei);
    let query = Query::new(DatasetId::Ei).sort(Some(SortSpec::new(SortField::Impact, Direction::Up)));
    let result = execute(&snap, &query);
    assert_titles!(result, ["Fuel", "IEEE Sensors Conference", "Lecture Notes in Energy"]);
}

#[test]
fn metrics_parse_percent_and_rank() {
    let snap = sci();
    let Record::Sci(first) = &snap.records[0] else {
        panic!("expected SCI record");
    };
    let m = SciMetrics::from_record(first);
    assert_eq!(m.self_citation, Some(2.1));
    assert_eq!(m.china_share, Some(12.5));
    assert_eq!(m.rank, Some(1.0));
    assert_eq!(m.h_index, Some(120.0));
}

// ---------------------------------------------------------------------------
// Pagination
// ---------------------------------------------------------------------------

#[test]
fn twenty_five_sci_records_span_two_pages() {
    let records = (0..25)
        .map(|i| SciRecordBuilder::new(&format!("J{i:02}")).build())
        .collect();
    let snap = snapshot(DatasetId::Sci, records);

    let first = execute(&snap, &Query::new(DatasetId::Sci).page(1));
    assert_page!(first, page = 1, total = 25, len = 20);
    assert_eq!(first.items[0].title(), Some("J00"));

    let second = execute(&snap, &Query::new(DatasetId::Sci).page(2));
    assert_page!(second, page = 2, total = 25, len = 5);
    assert_eq!(second.items[0].title(), Some("J20"));
}

#[rstest]
#[case::zero(0, 1)]
#[case::beyond(99, 3)]
#[case::last(3, 3)]
fn ei_pages_clamp(#[case] requested: usize, #[case] served: usize) {
    let snap = snapshot(DatasetId::Ei, synthetic_ei(25));
    let result = execute(&snap, &Query::new(DatasetId::Ei).page(requested));
    assert_eq!(result.page, served);
    assert_eq!(result.total_pages(), 3);
}

#[test]
fn empty_result_is_page_one_of_one() {
    let snap = sci();
    let result = execute(&snap, &Query::new(DatasetId::Sci).text("nothing matches").page(5));
    assert_page!(result, page = 1, total = 0, len = 0);
    assert_eq!(result.total_pages(), 1);
}

#[test]
fn snapshot_dataset_wins_over_query_dataset() {
    let snap = load(ahci_document(), DatasetId::Ahci);
    let result = execute(&snap, &Query::new(DatasetId::Sci).text("isis"));
    assert_eq!(result.page_size, DatasetId::Ahci.page_size());
    assert_titles!(result, ["Isis"]);
}

// ---------------------------------------------------------------------------
// Properties
// ---------------------------------------------------------------------------

fn arb_number() -> impl Strategy<Value = String> {
    prop_oneof![
        (0.0f64..100.0).prop_map(|n| format!("{n:.2}")),
        Just("N/A".to_string()),
        Just("-".to_string()),
        Just(String::new()),
    ]
}

fn arb_record() -> impl Strategy<Value = Record> {
    ("[a-zA-Z ]{1,12}", arb_number(), arb_number()).prop_map(|(name, impact, h)| {
        SciRecordBuilder::new(&name).impact(&impact).hindex(&h).build()
    })
}

proptest! {
    #[test]
    fn unconstrained_query_counts_everything(records in prop::collection::vec(arb_record(), 0..60)) {
        let n = records.len();
        let snap = snapshot(DatasetId::Sci, records);
        let result = execute(&snap, &Query::new(DatasetId::Sci));
        prop_assert_eq!(result.total, n);
    }

    #[test]
    fn every_match_contains_the_needle(
        records in prop::collection::vec(arb_record(), 0..60),
        needle in "[a-z]{1,2}",
    ) {
        let snap = snapshot(DatasetId::Sci, records);
        let result = execute(&snap, &Query::new(DatasetId::Sci).text(&needle).page(1));
        for record in &result.items {
            let hit = record
                .text_fields()
                .into_iter()
                .flatten()
                .any(|f| f.to_lowercase().contains(&needle));
            prop_assert!(hit);
        }
    }

    #[test]
    fn served_page_is_always_in_range(
        records in prop::collection::vec(arb_record(), 0..60),
        requested in 0usize..20,
    ) {
        let snap = snapshot(DatasetId::Sci, records);
        let result = execute(&snap, &Query::new(DatasetId::Sci).page(requested));
        let max = result.total.div_ceil(20).max(1);
        prop_assert!(result.page >= 1 && result.page <= max);
        prop_assert!(result.items.len() <= 20);
    }

    #[test]
    fn sorted_keys_are_ordered_with_missing_last(
        records in prop::collection::vec(arb_record(), 0..60),
        down in any::<bool>(),
    ) {
        let direction = if down { Direction::Down } else { Direction::Up };
        let snap = snapshot(DatasetId::Sci, records);
        let result = execute(&snap, &by(SortField::Impact, direction).page(1));
        let keys: Vec<Option<f64>> = result
            .items
            .iter()
            .map(|r| match r {
                Record::Sci(s) => SciMetrics::from_record(s).impact,
                _ => None,
            })
            .collect();
        let first_missing = keys.iter().position(Option::is_none).unwrap_or(keys.len());
        prop_assert!(keys[first_missing..].iter().all(Option::is_none));
        for pair in keys[..first_missing].windows(2) {
            let (a, b) = (pair[0].unwrap(), pair[1].unwrap());
            let ordered = if down { a >= b } else { a <= b };
            prop_assert!(ordered, "keys out of order: {} vs {}", a, b);
        }
    }

    #[test]
    fn impact_band_members_lie_in_band(records in prop::collection::vec(arb_record(), 0..60)) {
        let snap = snapshot(DatasetId::Sci, records);
        let result = execute(&snap, &filtered("impact", ImpactBand::From5To10.label()));
        for record in &result.items {
            let Record::Sci(s) = record else { unreachable!() };
            let impact = SciMetrics::from_record(s).impact.unwrap();
            prop_assert!((5.0..10.0).contains(&impact));
        }
    }
}
