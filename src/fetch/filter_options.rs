use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::{FetchError, FetchResult};
use crate::records::ListEnvelope;

use super::{CachedResource, FetchConfig, Transport};

pub const SUBJECTS_PATH: &str = "/subjects";
pub const ALL_SUBJECTS_LABEL: &str = "All Subjects";

const FALLBACK_SUBJECTS: [&str; 5] = [
    "bioinformatics",
    "molecular biology",
    "neuroscience",
    "genomics",
    "immunology",
];

/// One entry of a filter drop-down. An empty `value` means "no filter".
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterOption {
    pub value: String,
    pub label: String,
}

impl FilterOption {
    #[must_use]
    pub fn all_subjects() -> Self {
        Self {
            value: String::new(),
            label: ALL_SUBJECTS_LABEL.to_owned(),
        }
    }

    #[must_use]
    pub fn subject(value: impl Into<String>) -> Self {
        let value = value.into();
        Self {
            label: title_case(&value),
            value,
        }
    }
}

/// Upper-cases the first letter of every space-separated word.
#[must_use]
pub fn title_case(input: &str) -> String {
    input
        .split(' ')
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect(),
                None => String::new(),
            }
        })
        .collect::<Vec<String>>()
        .join(" ")
}

/// "All Subjects" followed by one option per subject.
#[must_use]
pub fn subject_options<S: AsRef<str>>(subjects: &[S]) -> Vec<FilterOption> {
    std::iter::once(FilterOption::all_subjects())
        .chain(subjects.iter().map(|subject| FilterOption::subject(subject.as_ref())))
        .collect()
}

#[must_use]
pub fn fallback_subject_options() -> Vec<FilterOption> {
    subject_options(&FALLBACK_SUBJECTS)
}

/// Decodes a `{ "data": ["subject", ...] }` body.
pub fn decode_subject_options(body: Value) -> FetchResult<Vec<FilterOption>> {
    let envelope: ListEnvelope<String> = serde_json::from_value(body)
        .map_err(|err| FetchError::shape(format!("subjects payload is malformed: {err}")))?;
    Ok(subject_options(&envelope.data))
}

/// Cached subject list backed by `/subjects`.
pub fn subject_options_resource<T: Transport>(
    transport: T,
    config: &FetchConfig,
) -> CachedResource<Vec<FilterOption>, T> {
    CachedResource::new(
        transport,
        SUBJECTS_PATH,
        decode_subject_options,
        fallback_subject_options(),
        config.cache_ttl(),
        config.retry_policy(),
    )
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::{decode_subject_options, fallback_subject_options, title_case};
    use crate::error::FetchError;

    #[test]
    fn title_cases_each_word() {
        assert_eq!(title_case("molecular biology"), "Molecular Biology");
        assert_eq!(title_case("genomics"), "Genomics");
    }

    #[test]
    fn fallback_starts_with_all_subjects() {
        let options = fallback_subject_options();
        assert_eq!(options.len(), 6);
        assert_eq!(options[0].value, "");
        assert_eq!(options[0].label, "All Subjects");
        assert_eq!(options[2].value, "molecular biology");
        assert_eq!(options[2].label, "Molecular Biology");
    }

    #[test]
    fn non_list_payload_is_a_shape_error() {
        let err = decode_subject_options(json!({ "data": "nope" })).expect_err("shape");
        assert!(matches!(err, FetchError::Shape(_)));
    }
}
