//! Shared HTTP transport: per-request timeout plus bounded exponential retry

use std::time::Duration;

use backon::{ExponentialBuilder, Retryable};
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::warn;
use url::Url;

use crate::config::ProviderConfig;
use crate::error::ProviderError;

#[derive(Clone)]
pub struct HttpTransport {
    client: reqwest::Client,
    max_retries: usize,
    min_delay: Duration,
}

impl HttpTransport {
    pub fn new(timeout: Duration, max_retries: usize) -> Result<Self, ProviderError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| ProviderError::Transport(e.to_string()))?;
        Ok(Self::with_client(client, max_retries))
    }

    pub fn from_config(config: &ProviderConfig) -> Result<Self, ProviderError> {
        Self::new(config.http_timeout, config.http_retries)
    }

    pub fn with_client(client: reqwest::Client, max_retries: usize) -> Self {
        Self {
            client,
            max_retries,
            min_delay: Duration::from_millis(250),
        }
    }

    /// Override the first backoff delay (tests use a tiny one)
    pub fn with_min_delay(mut self, min_delay: Duration) -> Self {
        self.min_delay = min_delay;
        self
    }

    fn backoff(&self) -> ExponentialBuilder {
        ExponentialBuilder::default()
            .with_min_delay(self.min_delay)
            .with_max_times(self.max_retries)
            .with_jitter()
    }

    pub async fn get_json<T>(&self, url: Url, bearer: Option<&str>) -> Result<T, ProviderError>
    where
        T: DeserializeOwned,
    {
        self.execute(|| {
            let request = self.client.get(url.clone());
            match bearer {
                Some(token) => request.bearer_auth(token),
                None => request,
            }
        })
        .await
    }

    pub async fn post_json<B, T>(
        &self,
        url: Url,
        bearer: Option<&str>,
        body: &B,
    ) -> Result<T, ProviderError>
    where
        B: Serialize + ?Sized + Sync,
        T: DeserializeOwned,
    {
        self.execute(|| {
            let request = self.client.post(url.clone()).json(body);
            match bearer {
                Some(token) => request.bearer_auth(token),
                None => request,
            }
        })
        .await
    }

    async fn execute<T, F>(&self, build: F) -> Result<T, ProviderError>
    where
        T: DeserializeOwned,
        F: Fn() -> reqwest::RequestBuilder,
    {
        let build = &build;
        let attempt = move || async move {
            let response = build().send().await?;
            let status = response.status();
            if !status.is_success() {
                return Err(ProviderError::Status {
                    status: status.as_u16(),
                });
            }
            response
                .json::<T>()
                .await
                .map_err(|e| ProviderError::Malformed(e.to_string()))
        };

        attempt
            .retry(self.backoff())
            .when(ProviderError::is_transient)
            .notify(|err: &ProviderError, delay: Duration| {
                warn!(error = %err, delay_ms = delay.as_millis() as u64, "retrying request");
            })
            .await
    }
}

/// Join `path` onto a base URL that may or may not end in a slash
pub fn endpoint(base: &str, path: &str) -> Result<Url, ProviderError> {
    let joined = format!(
        "{}/{}",
        base.trim_end_matches('/'),
        path.trim_start_matches('/')
    );
    Url::parse(&joined).map_err(|e| ProviderError::Transport(format!("bad url {joined}: {e}")))
}

/// Append `segments` to a base URL, percent-encoding each one so a value
/// containing `/`, `?` or `#` stays a single path segment
pub fn endpoint_segments(base: &str, segments: &[&str]) -> Result<Url, ProviderError> {
    if let Some(bad) = segments.iter().find(|s| matches!(**s, "" | "." | "..")) {
        return Err(ProviderError::Transport(format!("invalid path segment '{bad}'")));
    }
    let mut url = Url::parse(base.trim_end_matches('/'))
        .map_err(|e| ProviderError::Transport(format!("bad url {base}: {e}")))?;
    url.path_segments_mut()
        .map_err(|_| ProviderError::Transport(format!("bad url {base}: cannot be a base")))?
        .pop_if_empty()
        .extend(segments);
    Ok(url)
}
