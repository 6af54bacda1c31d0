pub mod classify;
pub mod fetch;

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::Semaphore;

use crate::config::Config;
use crate::platforms::PlatformSpec;
use crate::report::{ProbeResult, Report};
use crate::scrape;

use self::fetch::{Fetch, FetchOutcome, HttpFetcher};

/// One (platform, username) pair, prepared immediately before dispatch
/// and owned by its task until completion.
#[derive(Debug, Clone)]
pub struct ProbeRequest {
    pub platform: String,
    pub key: String,
    pub url: String,
    pub username: String,
}

impl ProbeRequest {
    pub fn new(spec: &PlatformSpec, username: &str, encoded_username: &str) -> Self {
        Self {
            platform: spec.name.clone(),
            key: spec.key.clone(),
            url: spec.profile_url(encoded_username),
            username: username.to_string(),
        }
    }
}

/// Url-encode a username for template substitution. Spaces and
/// reserved characters are escaped the way a query component would be.
pub fn encode_username(username: &str) -> String {
    url::form_urlencoded::byte_serialize(username.as_bytes()).collect()
}

pub struct ProbeEngine<F: Fetch> {
    fetcher: Arc<F>,
    concurrency: usize,
    timeout: Duration,
}

impl ProbeEngine<HttpFetcher> {
    pub fn new(config: &Config) -> anyhow::Result<Self> {
        Ok(Self::with_fetcher(
            Arc::new(HttpFetcher::new(config.accept_invalid_certs)?),
            config.concurrency,
            Duration::from_secs(config.timeout_secs),
        ))
    }
}

impl<F: Fetch + 'static> ProbeEngine<F> {
    pub fn with_fetcher(fetcher: Arc<F>, concurrency: usize, timeout: Duration) -> Self {
        Self {
            fetcher,
            concurrency: concurrency.max(1),
            timeout,
        }
    }

    /// Probe every platform for `username`. The caller guarantees the
    /// username is trimmed and non-empty.
    ///
    /// Always returns one result per platform, in catalog order,
    /// whatever happens to the individual fetches.
    pub async fn run(&self, username: &str, platforms: &[PlatformSpec]) -> Report {
        let encoded = encode_username(username);
        let gate = Arc::new(Semaphore::new(self.concurrency));

        let mut handles = Vec::with_capacity(platforms.len());
        for spec in platforms {
            let request = ProbeRequest::new(spec, username, &encoded);
            let fetcher = self.fetcher.clone();
            let gate = gate.clone();
            let timeout = self.timeout;
            let fallback = request.clone();

            handles.push((
                fallback,
                tokio::spawn(async move { probe_one(fetcher, gate, request, timeout).await }),
            ));
        }

        let mut results = Vec::with_capacity(handles.len());
        for (request, handle) in handles {
            match handle.await {
                Ok(result) => results.push(result),
                Err(err) => {
                    log::error!("{}: probe task failed: {err}", request.key);
                    results.push(failure_result(request));
                }
            }
        }

        Report::new(results)
    }
}

async fn probe_one<F: Fetch>(
    fetcher: Arc<F>,
    gate: Arc<Semaphore>,
    request: ProbeRequest,
    timeout: Duration,
) -> ProbeResult {
    let outcome = {
        // the permit bounds the network call only; classification and
        // extraction run ungated
        let _permit = gate.acquire().await.expect("admission gate never closes");
        fetcher.fetch(&request.url, timeout).await
    };

    evaluate(request, outcome)
}

/// Turn one fetch outcome into the per-platform verdict. Metadata is
/// extracted for status 200 only.
pub fn evaluate(request: ProbeRequest, outcome: FetchOutcome) -> ProbeResult {
    let found = classify::classify(&outcome, &request.url, &request.username);

    let metadata = match (outcome.status, &outcome.body) {
        (Some(200), Some(body)) => {
            Some(scrape::extract_profile_meta(body)).filter(|meta| meta.has_any_data())
        }
        _ => None,
    };

    log::debug!(
        "{}: status={:?} found={found}",
        request.key,
        outcome.status
    );

    ProbeResult {
        platform: request.platform,
        key: request.key,
        url: request.url,
        status_code: outcome.status,
        found,
        metadata,
    }
}

fn failure_result(request: ProbeRequest) -> ProbeResult {
    ProbeResult {
        platform: request.platform,
        key: request.key,
        url: request.url,
        status_code: None,
        found: false,
        metadata: None,
    }
}
