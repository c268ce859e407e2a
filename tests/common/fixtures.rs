//! Snapshot documents used across harnesses.
//!
//! The documents mirror what the snapshot generator writes: camelCase keys,
//! mostly string values, with the occasional bare number, `null` or `"-"`.

use serde_json::{json, Value};

/// Four SCI journals covering the impact fallback chain, an unparseable
/// impact, both top-tier flags and a delisted entry.
pub fn sci_document() -> Value {
    json!({
        "generatedAt": "2024-06-01 08:00",
        "items": [
            {
                "periodicalsName": "Nature Energy",
                "issn": "2058-7546",
                "abbreviation": "NAT ENERGY",
                "sciList": ["SCIE"],
                "impactFactorsE": "56.7",
                "impactA": "49.7",
                "impactB": "60.2",
                "selfCitationRate": "2.1%",
                "bigPartitionB": "工程技术1区",
                "topA": "是",
                "topB": "否",
                "esiSubject": "Engineering",
                "hindex": 120,
                "ranking": "1/119",
                "yearNum": "150",
                "chinaProportion": "12.5%",
                "includeI": "是"
            },
            {
                "periodicalsName": "Journal of Economic Surveys",
                "issn": "0950-0804",
                "sciList": ["SSCI"],
                "impactFactorsE": "N/A",
                "impactA": "6.1",
                "selfCitationRate": "8%",
                "bigPartitionA": "经济学2区",
                "topA": "否",
                "topB": "是",
                "esiSubject": "Economics",
                "ranking": "40/380",
                "includeI": "-"
            },
            {
                "periodicalsName": "Acta Physica Sinica",
                "chineseTitle": "物理学报",
                "issn": "1000-3290",
                "sciList": ["SCIE"],
                "impactFactorsE": "1,0",
                "selfCitationRate": "35.2%",
                "fenqu": "物理4区",
                "esiSubject": "Physics",
                "yearNum": 1800,
                "includeI": "否"
            },
            {
                "periodicalsName": "Physical Review Letters",
                "issn": "0031-9007",
                "sciList": ["SCIE"],
                "impactFactorsE": "3.0",
                "selfCitationRate": "12%",
                "bigPartitionB": "物理1区",
                "topA": "是",
                "esiSubject": "Physics",
                "hindex": "-",
                "chinaProportion": null
            }
        ]
    })
}

pub fn ei_document() -> Value {
    json!({
        "items": [
            { "sourceTitle": "Fuel", "sourceType": "Journal", "eiIssn": "0016-2361", "subjectOne": "Energy", "isDatabase": "是" },
            { "sourceTitle": "IEEE Sensors Conference", "sourceType": "Conference Proceeding", "subjectOne": "Electronics" },
            { "sourceTitle": "Lecture Notes in Energy", "sourceType": "Book Series", "chineseTitle": "能源讲义", "isDatabase": "停止收录" }
        ]
    })
}

pub fn ahci_document() -> Value {
    json!({
        "generatedAt": "2024-05-30",
        "items": [
            { "journalTitle": "Isis", "ahciIssn": "0021-1753", "webOfScience": "History", "top": "是" },
            { "journalTitle": "Poetics Today", "webOfScience": "Literature", "isDatabase": "是" },
            "not an object",
            { "journalTitle": "Journal of Aesthetics", "webOfScience": "Philosophy" }
        ]
    })
}

/// A `{ "items": [...] }` document around arbitrary items.
pub fn document(items: Vec<Value>) -> Value {
    json!({ "items": items })
}

pub fn to_bytes(doc: &Value) -> Vec<u8> {
    serde_json::to_vec(doc).expect("fixture serializes")
}
