//! Transport for public key lookups

use std::path::Path;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Certificate, StatusCode};
use thiserror::Error;
use tracing::debug;

use crate::error::{Result, SettingsError};

pub const GITHUB_BASE_URL: &str = "https://github.com";

/// Why a lookup produced no body
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("account not found")]
    NotFound,

    #[error("server returned HTTP {0}")]
    Status(u16),

    #[error("{0}")]
    Http(#[from] reqwest::Error),
}

/// Something that can return the public keys published for an account
#[async_trait]
pub trait KeySource: Send + Sync {
    /// URL the keys for `username` are fetched from
    fn keys_url(&self, username: &str) -> String;

    /// Fetch the raw newline-separated key list
    async fn fetch_keys(&self, username: &str) -> std::result::Result<String, FetchError>;
}

/// Fetches `<base>/<username>.keys` over HTTPS
#[derive(Debug, Clone)]
pub struct GithubKeySource {
    base_url: String,
    client: reqwest::Client,
}

impl GithubKeySource {
    pub fn new() -> Result<Self> {
        Self::builder(GITHUB_BASE_URL, None)
    }

    /// Build a source for an arbitrary base URL, optionally trusting an
    /// extra PEM bundle (older devices ship their own roots)
    pub fn builder(base_url: impl Into<String>, ca_bundle: Option<&Path>) -> Result<Self> {
        let mut builder = reqwest::Client::builder()
            .user_agent(concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")))
            .connect_timeout(Duration::from_secs(5));

        if let Some(path) = ca_bundle {
            let pem = std::fs::read(path)?;
            let certs = Certificate::from_pem_bundle(&pem)
                .map_err(|e| SettingsError::HttpClient(format!("{}: {}", path.display(), e)))?;
            debug!(path = %path.display(), count = certs.len(), "loaded CA bundle");
            for cert in certs {
                builder = builder.add_root_certificate(cert);
            }
        }

        let client = builder
            .build()
            .map_err(|e| SettingsError::HttpClient(e.to_string()))?;

        Ok(Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            client,
        })
    }
}

#[async_trait]
impl KeySource for GithubKeySource {
    fn keys_url(&self, username: &str) -> String {
        format!("{}/{}.keys", self.base_url, urlencoding::encode(username))
    }

    async fn fetch_keys(&self, username: &str) -> std::result::Result<String, FetchError> {
        let url = self.keys_url(username);
        debug!(%url, "requesting public keys");

        let response = self
            .client
            .get(&url)
            .header(reqwest::header::ACCEPT, "text/plain")
            .send()
            .await?;

        match response.status() {
            status if status.is_success() => Ok(response.text().await?),
            StatusCode::NOT_FOUND => Err(FetchError::NotFound),
            status => Err(FetchError::Status(status.as_u16())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpListener;
    use tokio::task::JoinHandle;

    /// Serve one canned HTTP response on localhost and hand back the
    /// request line that was received
    async fn serve_once(status: &'static str, body: &'static str) -> (String, JoinHandle<String>) {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let base_url = format!("http://{}", listener.local_addr().unwrap());

        let handle = tokio::spawn(async move {
            let (mut stream, _) = listener.accept().await.unwrap();
            let mut request = Vec::new();
            let mut buf = [0u8; 1024];
            while !request.windows(4).any(|w| w == b"\r\n\r\n") {
                let n = stream.read(&mut buf).await.unwrap();
                if n == 0 {
                    break;
                }
                request.extend_from_slice(&buf[..n]);
            }

            let response = format!(
                "HTTP/1.1 {}\r\nContent-Type: text/plain\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
                status,
                body.len(),
                body
            );
            stream.write_all(response.as_bytes()).await.unwrap();
            stream.shutdown().await.unwrap();

            String::from_utf8_lossy(&request)
                .lines()
                .next()
                .unwrap_or_default()
                .to_string()
        });

        (base_url, handle)
    }

    #[test]
    fn test_keys_url() {
        let source = GithubKeySource::new().unwrap();
        assert_eq!(source.keys_url("octocat"), "https://github.com/octocat.keys");
    }

    #[test]
    fn test_keys_url_escapes_username() {
        let source = GithubKeySource::builder("http://127.0.0.1:8080/", None).unwrap();
        assert_eq!(
            source.keys_url("a b/../c"),
            "http://127.0.0.1:8080/a%20b%2F..%2Fc.keys"
        );
    }

    #[test]
    fn test_missing_ca_bundle_is_an_error() {
        let result = GithubKeySource::builder(GITHUB_BASE_URL, Some(Path::new("/nonexistent/cert.pem")));
        assert!(matches!(result, Err(SettingsError::Io(_))));
    }

    #[tokio::test]
    async fn test_unreachable_host_is_transport_error() {
        // port 9 (discard) on localhost is closed in test environments
        let source = GithubKeySource::builder("http://127.0.0.1:9", None).unwrap();
        let result = source.fetch_keys("octocat").await;
        assert!(matches!(result, Err(FetchError::Http(_))));
    }

    #[tokio::test]
    async fn test_ok_response_returns_body() {
        let body = "ssh-ed25519 AAAAC3NzaC1lZDI1NTE5AAAAIOMqqnkVzrm0SdG6UOoqKLsabgH5C9okWi0dh2l9GKJl\n";
        let (base_url, server) = serve_once("200 OK", body).await;
        let source = GithubKeySource::builder(base_url, None).unwrap();

        let result = source.fetch_keys("octocat").await.unwrap();

        assert_eq!(result, body);
        assert_eq!(server.await.unwrap(), "GET /octocat.keys HTTP/1.1");
    }

    #[tokio::test]
    async fn test_not_found_response() {
        let (base_url, server) = serve_once("404 Not Found", "Not Found").await;
        let source = GithubKeySource::builder(base_url, None).unwrap();

        let result = source.fetch_keys("nobody").await;

        assert!(matches!(result, Err(FetchError::NotFound)));
        assert_eq!(server.await.unwrap(), "GET /nobody.keys HTTP/1.1");
    }

    #[tokio::test]
    async fn test_server_error_keeps_status_code() {
        let (base_url, server) = serve_once("500 Internal Server Error", "").await;
        let source = GithubKeySource::builder(base_url, None).unwrap();

        let result = source.fetch_keys("octocat").await;

        assert!(matches!(result, Err(FetchError::Status(500))));
        server.await.unwrap();
    }
}
