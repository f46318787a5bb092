use chrono::{TimeZone, Utc};
use citation_viz::export::{ExportFormat, export_citation_data};
use citation_viz::fetch::{FetchParams, SortOrder, TimeRange};
use citation_viz::records::{CitationDataResponse, HeatmapRecord, PaperRecord, TrendRecord};
use serde_json::Value;

fn dataset() -> CitationDataResponse {
    CitationDataResponse {
        impact_data: vec![
            PaperRecord {
                id: "PPC-7".to_owned(),
                title: "Sleep, memory and the hippocampus".to_owned(),
                publication_date: "2020-05-01".to_owned(),
                total_citation: 12.0,
                subject: Some("neuroscience".to_owned()),
            },
            PaperRecord {
                id: "PPC-9".to_owned(),
                title: "CRISPR screens".to_owned(),
                publication_date: "2021-11-30".to_owned(),
                total_citation: 3.0,
                subject: None,
            },
        ],
        trends_data: vec![TrendRecord {
            year: 2020,
            citations: 15.0,
            papers: 2,
        }],
        heatmap_data: vec![HeatmapRecord {
            year: 2020,
            month: 5,
            citations: 12.0,
        }],
        top_papers_data: Vec::new(),
        metadata: None,
    }
}

fn params() -> FetchParams {
    FetchParams::default()
        .with_time_range(TimeRange::Last10Years)
        .with_subject("neuroscience")
        .with_sort(SortOrder::CitationsDesc)
}

#[test]
fn json_export_nests_datasets_under_citation_data() {
    let at = Utc
        .with_ymd_and_hms(2024, 3, 5, 14, 30, 0)
        .single()
        .expect("timestamp");
    let blob =
        export_citation_data(ExportFormat::Json, &params(), &dataset(), at).expect("export");

    assert_eq!(blob.filename, "citation-analysis-2024-03-05.json");
    assert_eq!(blob.mime_type, "application/json;charset=utf-8");

    let document: Value = serde_json::from_slice(&blob.bytes).expect("json");
    assert_eq!(document["filters"]["timeRange"], "last_10_years");
    assert_eq!(document["filters"]["subject"], "neuroscience");
    assert_eq!(document["filters"]["country"], Value::Null);
    assert_eq!(document["filters"]["sortOption"], "citations_desc");
    assert_eq!(document["filters"]["limit"], 10);
    assert_eq!(document["exportedAt"], "2024-03-05T14:30:00.000Z");
    assert!(document.get("impactData").is_none());
    let citation_data = document["citationData"].clone();
    assert_eq!(citation_data["impactData"].as_array().map(Vec::len), Some(2));
    assert_eq!(citation_data["heatmapData"][0]["month"], 5);
    assert!(citation_data.get("metadata").is_none());

    let reparsed = CitationDataResponse::from_json_value(citation_data).expect("round trip");
    assert_eq!(reparsed.impact_data, dataset().impact_data);
}

#[test]
fn csv_export_lists_impact_papers() {
    let at = Utc
        .with_ymd_and_hms(2024, 12, 31, 23, 0, 0)
        .single()
        .expect("timestamp");
    let blob = export_citation_data(ExportFormat::Csv, &params(), &dataset(), at).expect("export");

    assert_eq!(blob.filename, "citation-analysis-2024-12-31.csv");
    assert_eq!(blob.mime_type, "text/csv;charset=utf-8");
    let text = String::from_utf8(blob.bytes).expect("utf8");
    let lines: Vec<&str> = text.lines().collect();
    assert_eq!(
        lines,
        vec![
            "id,title,publication_date,total_citation,subject",
            "PPC-7,\"Sleep, memory and the hippocampus\",2020-05-01,12,neuroscience",
            "PPC-9,CRISPR screens,2021-11-30,3,",
        ]
    );
}

#[test]
fn empty_dataset_exports_header_only() {
    let at = Utc
        .with_ymd_and_hms(2024, 1, 1, 0, 0, 0)
        .single()
        .expect("timestamp");
    let blob = export_citation_data(
        ExportFormat::Csv,
        &FetchParams::default(),
        &CitationDataResponse::default(),
        at,
    )
    .expect("export");
    assert_eq!(
        String::from_utf8(blob.bytes).expect("utf8"),
        "id,title,publication_date,total_citation,subject\n"
    );
}
