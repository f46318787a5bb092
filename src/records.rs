//! Validated wire schema for the citation endpoints.
//!
//! Payloads are checked once at the boundary: a row that cannot be decoded
//! fails the whole response with [`FetchError::Shape`], while a dataset key
//! that is absent normalizes to an empty list.

use serde::de::{self, Deserializer};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::core::primitives::parse_iso_date_millis;
use crate::core::DataPoint;
use crate::error::{ChartResult, FetchError, FetchResult};

/// One paper row of `impactData` / `topPapersData`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PaperRecord {
    #[serde(rename = "PPC_Id", alias = "id", deserialize_with = "string_or_number")]
    pub id: String,
    #[serde(rename = "preprint_title", alias = "title", default)]
    pub title: String,
    pub publication_date: String,
    #[serde(default, deserialize_with = "nullable_count")]
    pub total_citation: f64,
    #[serde(rename = "preprint_subject", default)]
    pub subject: Option<String>,
}

impl PaperRecord {
    pub fn to_data_point(&self) -> ChartResult<DataPoint> {
        Ok(DataPoint::new(
            parse_iso_date_millis(&self.publication_date)?,
            self.total_citation,
            self.title.clone(),
            self.id.clone(),
        ))
    }
}

/// Per-year totals of `trendsData`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TrendRecord {
    #[serde(deserialize_with = "integer_or_string")]
    pub year: i64,
    #[serde(default, deserialize_with = "nullable_count")]
    pub citations: f64,
    #[serde(default)]
    pub papers: u64,
}

impl TrendRecord {
    /// Trend points use the year as an ordinal x value.
    #[must_use]
    pub fn to_data_point(&self) -> DataPoint {
        DataPoint::new(
            self.year as f64,
            self.citations,
            format!("{} ({} papers)", self.year, self.papers),
            self.year.to_string(),
        )
    }
}

/// Per-month totals of `heatmapData`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HeatmapRecord {
    #[serde(deserialize_with = "integer_or_string")]
    pub year: i64,
    #[serde(deserialize_with = "integer_or_string")]
    pub month: i64,
    #[serde(default, deserialize_with = "nullable_count")]
    pub citations: f64,
}

/// Unified citation payload with four named datasets.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CitationDataResponse {
    #[serde(default)]
    pub impact_data: Vec<PaperRecord>,
    #[serde(default)]
    pub trends_data: Vec<TrendRecord>,
    #[serde(default)]
    pub heatmap_data: Vec<HeatmapRecord>,
    #[serde(default)]
    pub top_papers_data: Vec<PaperRecord>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metadata: Option<Value>,
}

impl CitationDataResponse {
    pub const IMPACT: &'static str = "impactData";
    pub const TRENDS: &'static str = "trendsData";
    pub const HEATMAP: &'static str = "heatmapData";
    pub const TOP_PAPERS: &'static str = "topPapersData";

    /// Validates a decoded JSON body.
    pub fn from_json_value(value: Value) -> FetchResult<Self> {
        let Value::Object(mut object) = value else {
            return Err(FetchError::shape("citation payload must be a JSON object"));
        };
        let response = Self {
            impact_data: take_rows(&mut object, Self::IMPACT)?,
            trends_data: take_rows(&mut object, Self::TRENDS)?,
            heatmap_data: take_rows(&mut object, Self::HEATMAP)?,
            top_papers_data: take_rows(&mut object, Self::TOP_PAPERS)?,
            metadata: object.remove("metadata"),
        };
        response.validate()?;
        Ok(response)
    }

    fn validate(&self) -> FetchResult<()> {
        for paper in self.impact_data.iter().chain(&self.top_papers_data) {
            parse_iso_date_millis(&paper.publication_date).map_err(|_| {
                FetchError::shape(format!(
                    "paper `{}` has invalid publication_date `{}`",
                    paper.id, paper.publication_date
                ))
            })?;
        }
        if let Some(cell) = self
            .heatmap_data
            .iter()
            .find(|cell| !(1..=12).contains(&cell.month))
        {
            return Err(FetchError::shape(format!(
                "heatmap month {} out of range for year {}",
                cell.month, cell.year
            )));
        }
        Ok(())
    }

    /// Scatter points for the impact dataset.
    pub fn impact_points(&self) -> ChartResult<Vec<DataPoint>> {
        self.impact_data
            .iter()
            .map(PaperRecord::to_data_point)
            .collect()
    }

    #[must_use]
    pub fn trend_points(&self) -> Vec<DataPoint> {
        self.trends_data
            .iter()
            .map(TrendRecord::to_data_point)
            .collect()
    }
}

/// `{ "data": [...] }` envelope used by list endpoints such as `/subjects`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ListEnvelope<T> {
    pub data: Vec<T>,
}

fn take_rows<T: de::DeserializeOwned>(object: &mut Map<String, Value>, key: &str) -> FetchResult<Vec<T>> {
    match object.remove(key) {
        None | Some(Value::Null) => Ok(Vec::new()),
        Some(rows @ Value::Array(_)) => serde_json::from_value(rows)
            .map_err(|err| FetchError::shape(format!("`{key}` rows are malformed: {err}"))),
        Some(_) => Err(FetchError::shape(format!("`{key}` must be an array"))),
    }
}

fn string_or_number<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    match Value::deserialize(deserializer)? {
        Value::String(text) => Ok(text),
        Value::Number(number) => Ok(number.to_string()),
        other => Err(de::Error::custom(format!(
            "expected string or number id, found {other}"
        ))),
    }
}

fn integer_or_string<'de, D: Deserializer<'de>>(deserializer: D) -> Result<i64, D::Error> {
    match Value::deserialize(deserializer)? {
        Value::Number(number) => number
            .as_i64()
            .ok_or_else(|| de::Error::custom(format!("expected integer, found {number}"))),
        Value::String(text) => text
            .trim()
            .parse()
            .map_err(|_| de::Error::custom(format!("expected integer, found `{text}`"))),
        other => Err(de::Error::custom(format!("expected integer, found {other}"))),
    }
}

fn nullable_count<'de, D: Deserializer<'de>>(deserializer: D) -> Result<f64, D::Error> {
    match Option::<f64>::deserialize(deserializer)? {
        Some(value) if !value.is_finite() => Err(de::Error::custom("count must be finite")),
        Some(value) => Ok(value),
        None => Ok(0.0),
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::CitationDataResponse;
    use crate::error::FetchError;

    #[test]
    fn missing_keys_default_to_empty() {
        let response = CitationDataResponse::from_json_value(json!({
            "impactData": [{
                "PPC_Id": 17,
                "preprint_title": "Protein folding",
                "publication_date": "2020-05-01",
                "total_citation": null
            }]
        }))
        .expect("valid payload");
        assert_eq!(response.impact_data[0].id, "17");
        assert_eq!(response.impact_data[0].total_citation, 0.0);
        assert!(response.trends_data.is_empty());
        assert!(response.metadata.is_none());
    }

    #[test]
    fn non_array_dataset_is_a_shape_error() {
        let err = CitationDataResponse::from_json_value(json!({ "trendsData": "oops" }))
            .expect_err("shape error");
        assert!(matches!(err, FetchError::Shape(_)));
    }

    #[test]
    fn string_years_are_accepted() {
        let response = CitationDataResponse::from_json_value(json!({
            "trendsData": [{ "year": "2019", "citations": 12, "papers": 3 }]
        }))
        .expect("valid payload");
        assert_eq!(response.trends_data[0].year, 2019);
    }
}
