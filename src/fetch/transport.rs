use std::sync::Arc;

use async_trait::async_trait;
use serde_json::Value;

use crate::error::FetchResult;

/// Source of decoded JSON bodies.
///
/// Implementations map transport failures and non-2xx statuses to
/// `FetchError::Network` / `FetchError::Http`; a body that is not JSON is a
/// `FetchError::Shape`.
#[async_trait]
pub trait Transport: Send + Sync {
    async fn get_json(&self, path: &str, query: &[(&'static str, String)]) -> FetchResult<Value>;
}

#[async_trait]
impl<T: Transport + ?Sized> Transport for Arc<T> {
    async fn get_json(&self, path: &str, query: &[(&'static str, String)]) -> FetchResult<Value> {
        (**self).get_json(path, query).await
    }
}

#[cfg(feature = "http-client")]
pub use http::HttpTransport;

#[cfg(feature = "http-client")]
mod http {
    use async_trait::async_trait;
    use serde_json::Value;
    use tracing::trace;

    use super::Transport;
    use crate::error::{FetchError, FetchResult};
    use crate::fetch::FetchConfig;

    /// `reqwest`-backed transport rooted at a base URL.
    #[derive(Debug, Clone)]
    pub struct HttpTransport {
        client: reqwest::Client,
        base_url: String,
    }

    impl HttpTransport {
        #[must_use]
        pub fn new(base_url: impl Into<String>) -> Self {
            Self::with_client(reqwest::Client::new(), base_url)
        }

        #[must_use]
        pub fn from_config(config: &FetchConfig) -> Self {
            Self::new(config.base_url.clone())
        }

        #[must_use]
        pub fn with_client(client: reqwest::Client, base_url: impl Into<String>) -> Self {
            Self {
                client,
                base_url: base_url.into().trim_end_matches('/').to_owned(),
            }
        }

        #[must_use]
        pub fn base_url(&self) -> &str {
            &self.base_url
        }
    }

    #[async_trait]
    impl Transport for HttpTransport {
        async fn get_json(
            &self,
            path: &str,
            query: &[(&'static str, String)],
        ) -> FetchResult<Value> {
            let url = format!("{}{}", self.base_url, path);
            trace!(%url, "GET");
            let response = self
                .client
                .get(&url)
                .query(query)
                .send()
                .await
                .map_err(|err| FetchError::Network(err.to_string()))?;
            let status = response.status();
            if !status.is_success() {
                return Err(FetchError::http(
                    status.as_u16(),
                    status.canonical_reason().unwrap_or("Unknown Status"),
                ));
            }
            response
                .json::<Value>()
                .await
                .map_err(|err| FetchError::shape(format!("response body is not JSON: {err}")))
        }
    }
}
