//! Downloadable snapshots of the loaded citation datasets.

use chrono::{DateTime, SecondsFormat, Utc};
use serde::Serialize;
use tracing::debug;

use crate::error::{ChartError, ChartResult};
use crate::fetch::FetchParams;
use crate::records::CitationDataResponse;

const FILENAME_PREFIX: &str = "citation-analysis";
const CSV_HEADER: [&str; 5] = [
    "id",
    "title",
    "publication_date",
    "total_citation",
    "subject",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    /// Filters plus every dataset.
    Json,
    /// Impact papers only, one row each.
    Csv,
}

impl ExportFormat {
    #[must_use]
    pub fn extension(self) -> &'static str {
        match self {
            Self::Json => "json",
            Self::Csv => "csv",
        }
    }

    #[must_use]
    pub fn mime_type(self) -> &'static str {
        match self {
            Self::Json => "application/json;charset=utf-8",
            Self::Csv => "text/csv;charset=utf-8",
        }
    }
}

/// Bytes ready to be offered as a download.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportBlob {
    pub filename: String,
    pub mime_type: &'static str,
    pub bytes: Vec<u8>,
}

/// `citation-analysis-YYYY-MM-DD.<ext>` for the export date.
#[must_use]
pub fn export_filename(format: ExportFormat, exported_at: DateTime<Utc>) -> String {
    format!(
        "{FILENAME_PREFIX}-{}.{}",
        exported_at.format("%Y-%m-%d"),
        format.extension()
    )
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ExportFilters<'a> {
    time_range: &'a str,
    subject: Option<&'a str>,
    country: Option<&'a str>,
    sort_option: &'a str,
    limit: u32,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct JsonExport<'a> {
    filters: ExportFilters<'a>,
    citation_data: &'a CitationDataResponse,
    exported_at: String,
}

/// Serializes the active filters and loaded datasets.
pub fn export_citation_data(
    format: ExportFormat,
    params: &FetchParams,
    data: &CitationDataResponse,
    exported_at: DateTime<Utc>,
) -> ChartResult<ExportBlob> {
    let bytes = match format {
        ExportFormat::Json => export_json(params, data, exported_at)?,
        ExportFormat::Csv => export_csv(data)?,
    };
    let blob = ExportBlob {
        filename: export_filename(format, exported_at),
        mime_type: format.mime_type(),
        bytes,
    };
    debug!(filename = %blob.filename, bytes = blob.bytes.len(), "export ready");
    Ok(blob)
}

fn export_json(
    params: &FetchParams,
    data: &CitationDataResponse,
    exported_at: DateTime<Utc>,
) -> ChartResult<Vec<u8>> {
    let document = JsonExport {
        filters: ExportFilters {
            time_range: params.time_range.as_str(),
            subject: params.subject.as_deref(),
            country: params.country.as_deref(),
            sort_option: params.sort_by.as_str(),
            limit: params.limit,
        },
        citation_data: data,
        exported_at: exported_at.to_rfc3339_opts(SecondsFormat::Millis, true),
    };
    serde_json::to_vec_pretty(&document).map_err(|e| ChartError::Export(e.to_string()))
}

fn export_csv(data: &CitationDataResponse) -> ChartResult<Vec<u8>> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    writer
        .write_record(CSV_HEADER)
        .map_err(|e| ChartError::Export(e.to_string()))?;
    for paper in &data.impact_data {
        let citations = paper.total_citation.to_string();
        writer
            .write_record([
                paper.id.as_str(),
                paper.title.as_str(),
                paper.publication_date.as_str(),
                citations.as_str(),
                paper.subject.as_deref().unwrap_or(""),
            ])
            .map_err(|e| ChartError::Export(e.to_string()))?;
    }
    writer
        .into_inner()
        .map_err(|e| ChartError::Export(e.to_string()))
}
