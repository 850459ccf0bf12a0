use axum::async_trait;
use bytes::Bytes;
use reqwest::header::CONTENT_TYPE;
use reqwest::Client as ReqwestClient;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum FetchError {
    #[error("request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("upstream returned HTTP {0}")]
    Status(u16),
}

/// Raw result of a single outbound GET.
#[derive(Debug, Clone)]
pub struct FetchedPage {
    pub status: u16,
    /// Value of the response `Content-Type` header, if any.
    pub content_type: Option<String>,
    pub body: Bytes,
}

/// Retrieves the raw bytes of a target page. Injected into `AppState` so the
/// handler can be driven without network access.
#[async_trait]
pub trait PageFetcher: Send + Sync {
    async fn fetch(&self, url: &str) -> Result<FetchedPage, FetchError>;
}

/// `PageFetcher` backed by a shared reqwest client. One GET per call, with
/// reqwest's default redirect handling and no timeout or retry.
#[derive(Clone)]
pub struct HttpFetcher {
    client: ReqwestClient,
}

impl HttpFetcher {
    pub fn new(user_agent: &str) -> Result<Self, FetchError> {
        let client = ReqwestClient::builder().user_agent(user_agent).build()?;
        Ok(HttpFetcher { client })
    }
}

#[async_trait]
impl PageFetcher for HttpFetcher {
    async fn fetch(&self, url: &str) -> Result<FetchedPage, FetchError> {
        let response = self.client.get(url).send().await?;

        let status = response.status();
        tracing::info!(url = %url, status = status.as_u16(), "Fetched target page");
        if !status.is_success() {
            return Err(FetchError::Status(status.as_u16()));
        }

        let content_type = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string);

        let body = response.bytes().await?;

        Ok(FetchedPage {
            status: status.as_u16(),
            content_type,
            body,
        })
    }
}
