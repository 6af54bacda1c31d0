use std::future::Future;
use std::time::Duration;

/// Fixed identifying user agent sent with every probe.
pub const USER_AGENT: &str = concat!(
    "Mozilla/5.0 (compatible; userfind/",
    env!("CARGO_PKG_VERSION"),
    ")"
);

/// Normalized result of a single HTTP attempt. Transport faults never
/// escape the fetcher; they surface as the absent-status shape with the
/// original request url.
#[derive(Debug, Clone, PartialEq)]
pub struct FetchOutcome {
    pub status: Option<u16>,
    pub body: Option<String>,
    pub final_url: String,
}

impl FetchOutcome {
    pub fn failure(url: &str) -> Self {
        Self {
            status: None,
            body: None,
            final_url: url.to_string(),
        }
    }

    pub fn is_success(&self) -> bool {
        self.status.is_some()
    }
}

/// Seam between the orchestrator and the network.
pub trait Fetch: Send + Sync {
    fn fetch(&self, url: &str, timeout: Duration) -> impl Future<Output = FetchOutcome> + Send;
}

pub struct HttpFetcher {
    client: reqwest::Client,
}

impl HttpFetcher {
    pub fn new(accept_invalid_certs: bool) -> anyhow::Result<Self> {
        let client = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .danger_accept_invalid_certs(accept_invalid_certs)
            .danger_accept_invalid_hostnames(accept_invalid_certs)
            .pool_idle_timeout(Duration::from_secs(10))
            .build()?;

        Ok(Self { client })
    }
}

impl Fetch for HttpFetcher {
    /// One GET, redirects followed, single attempt. Every transport
    /// fault is folded into `FetchOutcome::failure`.
    async fn fetch(&self, url: &str, timeout: Duration) -> FetchOutcome {
        let resp = match self.client.get(url).timeout(timeout).send().await {
            Ok(resp) => resp,
            Err(err) => {
                log::debug!("{url}: {err}");
                return FetchOutcome::failure(url);
            }
        };

        let status = resp.status().as_u16();
        let final_url = resp.url().to_string();

        // we might get a status, but no readable body
        let bytes = match resp.bytes().await {
            Ok(bytes) => bytes,
            Err(err) => {
                log::debug!("{url}: {err}");
                return FetchOutcome::failure(url);
            }
        };

        FetchOutcome {
            status: Some(status),
            body: Some(String::from_utf8_lossy(&bytes).to_string()),
            final_url,
        }
    }
}
