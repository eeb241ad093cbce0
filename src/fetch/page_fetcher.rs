use crate::fetch::error::FetchError;
use async_trait::async_trait;
use log::{info, warn};
use reqwest::header::USER_AGENT;
use reqwest::Client;
use std::time::Duration;

/// Retrieves the text body of a URL.
///
/// [`HttpPageFetcher`] is the production implementation; anything else (a stub,
/// a recorded fixture, a proxying client) can be plugged into
/// [`crate::WeatherHistory::with_fetcher`].
#[async_trait]
pub trait PageFetcher: Send + Sync {
    /// Fetches `url`, sending `user_agent` as the `User-Agent` header when given.
    async fn fetch_text(&self, url: &str, user_agent: Option<&str>) -> Result<String, FetchError>;
}

/// Plain HTTP fetcher backed by a shared `reqwest::Client`.
///
/// Applies one timeout to every request. Non-2xx responses are errors.
#[derive(Debug, Clone)]
pub struct HttpPageFetcher {
    client: Client,
    timeout: Duration,
}

impl HttpPageFetcher {
    pub fn new(timeout: Duration) -> Result<Self, reqwest::Error> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self { client, timeout })
    }

    fn transport_error(&self, url: &str, error: reqwest::Error) -> FetchError {
        if error.is_timeout() {
            warn!("Request to {} timed out after {:?}", url, self.timeout);
            FetchError::Timeout {
                url: url.to_string(),
                timeout: self.timeout,
            }
        } else {
            FetchError::Network(url.to_string(), error)
        }
    }
}

#[async_trait]
impl PageFetcher for HttpPageFetcher {
    async fn fetch_text(&self, url: &str, user_agent: Option<&str>) -> Result<String, FetchError> {
        info!("Downloading {}", url);

        let mut request = self.client.get(url).timeout(self.timeout);
        if let Some(agent) = user_agent {
            request = request.header(USER_AGENT, agent);
        }

        let response = request
            .send()
            .await
            .map_err(|e| self.transport_error(url, e))?;

        let response = match response.error_for_status() {
            Ok(resp) => resp,
            Err(e) => {
                warn!("HTTP error for {}: {:?}", url, e);
                return Err(match e.status() {
                    Some(status) => FetchError::HttpStatus {
                        url: url.to_string(),
                        status,
                        source: e,
                    },
                    None => FetchError::Network(url.to_string(), e),
                });
            }
        };

        let body = response.text().await.map_err(|e| {
            if e.is_timeout() {
                self.transport_error(url, e)
            } else {
                FetchError::Body(url.to_string(), e)
            }
        })?;

        info!("Downloaded {} bytes from {}", body.len(), url);
        Ok(body)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpListener;

    /// Answers a single request with `response` and hands back the raw request.
    async fn serve_once(response: &'static str) -> (String, tokio::task::JoinHandle<String>) {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let address = listener.local_addr().unwrap();
        let handle = tokio::spawn(async move {
            let (mut socket, _) = listener.accept().await.unwrap();
            let mut buffer = vec![0_u8; 4096];
            let read = socket.read(&mut buffer).await.unwrap();
            socket.write_all(response.as_bytes()).await.unwrap();
            socket.shutdown().await.unwrap();
            String::from_utf8_lossy(&buffer[..read]).to_string()
        });
        (format!("http://{address}/history"), handle)
    }

    #[tokio::test]
    async fn test_body_and_user_agent() {
        let (url, server) = serve_once(
            "HTTP/1.1 200 OK\r\nContent-Type: text/csv\r\nContent-Length: 9\r\nConnection: close\r\n\r\nTimeEDT\r\n",
        )
        .await;

        let fetcher = HttpPageFetcher::new(Duration::from_secs(5)).unwrap();
        let body = fetcher.fetch_text(&url, Some("Mozilla/5.0 test")).await.unwrap();
        let request = server.await.unwrap();

        assert_eq!(body, "TimeEDT\r\n");
        assert!(request
            .to_ascii_lowercase()
            .contains("user-agent: mozilla/5.0 test"));
    }

    #[tokio::test]
    async fn test_error_status_is_reported() {
        let (url, server) = serve_once(
            "HTTP/1.1 503 Service Unavailable\r\nContent-Length: 0\r\nConnection: close\r\n\r\n",
        )
        .await;

        let fetcher = HttpPageFetcher::new(Duration::from_secs(5)).unwrap();
        let result = fetcher.fetch_text(&url, None).await;
        server.await.unwrap();

        match result {
            Err(FetchError::HttpStatus { status, .. }) => assert_eq!(status.as_u16(), 503),
            other => panic!("expected HTTP status error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_unreachable_host_is_a_fetch_error() {
        let fetcher = HttpPageFetcher::new(Duration::from_secs(2)).unwrap();

        // Nothing listens on the discard port locally
        let result = fetcher
            .fetch_text("http://127.0.0.1:9/history", Some("test-agent"))
            .await;

        assert!(matches!(
            result,
            Err(FetchError::Network(..)) | Err(FetchError::Timeout { .. })
        ));
    }

    #[tokio::test]
    async fn test_timeout_is_reported_as_timeout() {
        // Accepts connections but never answers
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let address = listener.local_addr().unwrap();
        let server = tokio::spawn(async move {
            let mut held = Vec::new();
            loop {
                if let Ok((socket, _)) = listener.accept().await {
                    held.push(socket);
                }
            }
        });

        let fetcher = HttpPageFetcher::new(Duration::from_millis(200)).unwrap();
        let result = fetcher
            .fetch_text(&format!("http://{address}/history"), None)
            .await;
        server.abort();

        match result {
            Err(FetchError::Timeout { timeout, .. }) => {
                assert_eq!(timeout, Duration::from_millis(200))
            }
            other => panic!("expected timeout, got {other:?}"),
        }
    }
}
