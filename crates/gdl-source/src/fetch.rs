use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;

use crate::error::{SourceError, SourceResult};

/// Transport used by [`Strategy::RemoteFetch`](crate::Strategy::RemoteFetch).
///
/// Returns the raw response body; parsing and error-document detection are
/// the resolver's job.
#[async_trait]
pub trait DocumentFetcher: Send + Sync {
    async fn fetch(&self, url: &str) -> SourceResult<String>;
}

/// HTTP GET over `reqwest`.
pub struct HttpFetcher {
    client: Client,
    timeout: Duration,
}

impl HttpFetcher {
    pub fn new(timeout: Duration) -> Self {
        Self {
            client: Client::new(),
            timeout,
        }
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }
}

#[async_trait]
impl DocumentFetcher for HttpFetcher {
    async fn fetch(&self, url: &str) -> SourceResult<String> {
        let response = self
            .client
            .get(url)
            .timeout(self.timeout)
            .send()
            .await
            .map_err(|e| SourceError::Fetch {
                url: url.to_string(),
                reason: e.to_string(),
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(SourceError::Fetch {
                url: url.to_string(),
                reason: format!("status {status}"),
            });
        }

        response.text().await.map_err(|e| SourceError::Fetch {
            url: url.to_string(),
            reason: format!("invalid body: {e}"),
        })
    }
}

impl std::fmt::Debug for HttpFetcher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HttpFetcher")
            .field("timeout", &self.timeout)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::StatusCode;
    use axum::{routing::get, Router};
    use tokio::net::TcpListener;

    const CHAR_LIST: &str = "<Chars><Servers/></Chars>";

    async fn serve() -> String {
        let app = Router::new()
            .route("/char/list", get(|| async { CHAR_LIST }))
            .route(
                "/broken",
                get(|| async { (StatusCode::INTERNAL_SERVER_ERROR, "boom") }),
            )
            .route(
                "/slow",
                get(|| async {
                    tokio::time::sleep(Duration::from_secs(5)).await;
                    CHAR_LIST
                }),
            );
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });
        format!("http://{addr}")
    }

    #[tokio::test]
    async fn fetches_body() {
        let base = serve().await;
        let fetcher = HttpFetcher::new(Duration::from_secs(5));
        let body = fetcher.fetch(&format!("{base}/char/list")).await.unwrap();
        assert_eq!(body, CHAR_LIST);
    }

    #[tokio::test]
    async fn non_success_status_is_error() {
        let base = serve().await;
        let fetcher = HttpFetcher::new(Duration::from_secs(5));
        let err = fetcher.fetch(&format!("{base}/broken")).await.unwrap_err();
        match err {
            SourceError::Fetch { reason, .. } => assert!(reason.contains("500")),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[tokio::test]
    async fn slow_response_times_out() {
        let base = serve().await;
        let fetcher = HttpFetcher::new(Duration::from_millis(200));

        let started = std::time::Instant::now();
        let err = fetcher.fetch(&format!("{base}/slow")).await;
        assert!(matches!(err, Err(SourceError::Fetch { .. })));
        assert!(started.elapsed() < Duration::from_secs(4));
    }

    #[tokio::test]
    async fn unreachable_host_is_error() {
        // Bind then drop to get a port with nothing listening.
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let fetcher = HttpFetcher::new(Duration::from_secs(5));
        let err = fetcher.fetch(&format!("http://{addr}/char/list")).await;
        assert!(matches!(err, Err(SourceError::Fetch { .. })));
    }
}
