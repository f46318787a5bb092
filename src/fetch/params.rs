use serde::{Deserialize, Serialize};

/// Publication window accepted by the analytics endpoints.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum TimeRange {
    #[default]
    #[serde(rename = "all")]
    All,
    #[serde(rename = "last_year")]
    LastYear,
    #[serde(rename = "last_5_years")]
    Last5Years,
    #[serde(rename = "last_10_years")]
    Last10Years,
}

impl TimeRange {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::All => "all",
            Self::LastYear => "last_year",
            Self::Last5Years => "last_5_years",
            Self::Last10Years => "last_10_years",
        }
    }
}

/// Ordering of paper lists.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortOrder {
    #[default]
    CitationsDesc,
    CitationsAsc,
    DateDesc,
    DateAsc,
    TitleAsc,
}

impl SortOrder {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::CitationsDesc => "citations_desc",
            Self::CitationsAsc => "citations_asc",
            Self::DateDesc => "date_desc",
            Self::DateAsc => "date_asc",
            Self::TitleAsc => "title_asc",
        }
    }
}

/// Filters for one `fetch_all` call, serialized as query parameters.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FetchParams {
    pub time_range: TimeRange,
    pub subject: Option<String>,
    pub country: Option<String>,
    pub sort_by: SortOrder,
    pub limit: u32,
}

impl Default for FetchParams {
    fn default() -> Self {
        Self {
            time_range: TimeRange::All,
            subject: None,
            country: None,
            sort_by: SortOrder::CitationsDesc,
            limit: 10,
        }
    }
}

impl FetchParams {
    #[must_use]
    pub fn with_time_range(mut self, time_range: TimeRange) -> Self {
        self.time_range = time_range;
        self
    }

    #[must_use]
    pub fn with_subject(mut self, subject: impl Into<String>) -> Self {
        self.subject = Some(subject.into());
        self
    }

    #[must_use]
    pub fn with_country(mut self, country: impl Into<String>) -> Self {
        self.country = Some(country.into());
        self
    }

    #[must_use]
    pub fn with_sort(mut self, sort_by: SortOrder) -> Self {
        self.sort_by = sort_by;
        self
    }

    #[must_use]
    pub fn with_limit(mut self, limit: u32) -> Self {
        self.limit = limit;
        self
    }

    /// Query pairs in a stable order. Empty subject/country filters are
    /// omitted.
    #[must_use]
    pub fn query_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = vec![("time_range", self.time_range.as_str().to_owned())];
        for (name, value) in [("subject", &self.subject), ("country", &self.country)] {
            if let Some(value) = value.as_deref().filter(|value| !value.trim().is_empty()) {
                pairs.push((name, value.to_owned()));
            }
        }
        pairs.push(("sort_by", self.sort_by.as_str().to_owned()));
        pairs.push(("limit", self.limit.to_string()));
        pairs
    }
}

#[cfg(test)]
mod tests {
    use super::{FetchParams, SortOrder, TimeRange};

    #[test]
    fn query_pairs_skip_empty_filters() {
        let params = FetchParams::default()
            .with_time_range(TimeRange::Last5Years)
            .with_subject("")
            .with_country("Germany")
            .with_sort(SortOrder::DateAsc)
            .with_limit(25);
        assert_eq!(
            params.query_pairs(),
            vec![
                ("time_range", "last_5_years".to_owned()),
                ("country", "Germany".to_owned()),
                ("sort_by", "date_asc".to_owned()),
                ("limit", "25".to_owned()),
            ]
        );
    }

    #[test]
    fn wire_names_match_query_values() {
        let json = serde_json::to_string(&TimeRange::Last10Years).expect("serialize");
        assert_eq!(json, "\"last_10_years\"");
        let sort: SortOrder = serde_json::from_str("\"title_asc\"").expect("deserialize");
        assert_eq!(sort, SortOrder::TitleAsc);
    }
}
