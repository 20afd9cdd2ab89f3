// tldr API HTTP client.
// Handles transport, response decoding, and failure reporting.

use std::future::Future;
use std::sync::Arc;

use reqwest::{
    Client, Method, StatusCode,
    header::{ACCEPT, HeaderMap, HeaderValue, USER_AGENT},
};
use serde::{Deserialize, Serialize, de::DeserializeOwned};
use tracing::debug;

use crate::error::{Result, TldrError};
use crate::errors::ErrorReporter;

/// An outgoing API request. `path` is relative to the base URL.
#[derive(Debug, Clone, PartialEq)]
pub struct HttpRequest {
    pub method: Method,
    pub path: String,
    pub body: Option<serde_json::Value>,
}

/// Raw response: status plus undecoded body text.
#[derive(Debug, Clone)]
pub struct HttpResponse {
    pub status: StatusCode,
    pub body: String,
}

impl HttpResponse {
    pub fn new(status: StatusCode, body: impl Into<String>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }
}

/// Sends requests to the API. Errors here mean the request never completed.
pub trait Transport: Send + Sync {
    fn send(&self, request: HttpRequest) -> impl Future<Output = Result<HttpResponse>> + Send;
}

/// Production transport backed by reqwest.
pub struct ReqwestTransport {
    client: Client,
    base_url: String,
}

impl ReqwestTransport {
    pub fn new(base_url: &str) -> Result<Self> {
        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
        headers.insert(USER_AGENT, HeaderValue::from_static("tldr-tui"));

        let client = Client::builder()
            .default_headers(headers)
            .build()
            .map_err(TldrError::Network)?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }
}

impl Transport for ReqwestTransport {
    fn send(&self, request: HttpRequest) -> impl Future<Output = Result<HttpResponse>> + Send {
        async move {
            let url = format!("{}{}", self.base_url, request.path);
            let mut builder = self.client.request(request.method, &url);
            // .json() also sets Content-Type: application/json
            if let Some(body) = &request.body {
                builder = builder.json(body);
            }

            let response = builder.send().await?;
            let status = response.status();
            let body = response.text().await?;
            Ok(HttpResponse::new(status, body))
        }
    }
}

/// Acknowledgement body of a mutating call. Empty or unparseable bodies decode
/// to an empty object.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Ack(pub serde_json::Value);

impl Default for Ack {
    fn default() -> Self {
        Ack(serde_json::Value::Object(serde_json::Map::new()))
    }
}

/// Client for the tldr repository API.
///
/// Every failing operation reports a message to the injected [`ErrorReporter`]
/// and also returns the error to the caller.
pub struct RepoClient<T = ReqwestTransport> {
    transport: T,
    reporter: Arc<dyn ErrorReporter>,
}

impl RepoClient<ReqwestTransport> {
    /// Create a client talking to the API at `base_url`.
    pub fn connect(base_url: &str, reporter: Arc<dyn ErrorReporter>) -> Result<Self> {
        let transport = ReqwestTransport::new(base_url)?;
        debug!(base_url = transport.base_url(), "api client ready");
        Ok(Self::new(transport, reporter))
    }
}

impl<T: Transport> RepoClient<T> {
    pub fn new(transport: T, reporter: Arc<dyn ErrorReporter>) -> Self {
        Self {
            transport,
            reporter,
        }
    }

    #[cfg(test)]
    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Send a request and decode the response body.
    pub(crate) async fn request<V: DeserializeOwned + Default, B: Serialize + ?Sized>(
        &self,
        method: Method,
        path: &str,
        body: Option<&B>,
    ) -> Result<V> {
        let body = body.map(serde_json::to_value).transpose()?;
        debug!(%method, path, "sending request");
        let response = self
            .transport
            .send(HttpRequest {
                method,
                path: path.to_string(),
                body,
            })
            .await?;
        decode(response)
    }

    /// Pass `result` through, reporting the message built by `msg` on failure.
    pub(crate) fn reported<V>(
        &self,
        result: Result<V>,
        msg: impl FnOnce(&TldrError) -> String,
    ) -> Result<V> {
        result.inspect_err(|e| self.reporter.report(msg(e)))
    }
}

/// Non-success statuses become errors carrying the body. Success bodies that
/// are empty or not valid JSON decode to `V::default()`.
fn decode<V: DeserializeOwned + Default>(response: HttpResponse) -> Result<V> {
    if !response.status.is_success() {
        return Err(TldrError::Status {
            status: response.status,
            body: response.body,
        });
    }

    if response.body.trim().is_empty() {
        return Ok(V::default());
    }

    match serde_json::from_str(&response.body) {
        Ok(value) => Ok(value),
        Err(e) => {
            debug!(error = %e, "ignoring undecodable response body");
            Ok(V::default())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::testing::RecordingTransport;
    use crate::errors::ErrorSlot;

    #[test]
    fn test_decode_non_success_is_error_with_body() {
        let result: Result<Ack> = decode(HttpResponse::new(
            StatusCode::INTERNAL_SERVER_ERROR,
            r#"{"error":"failed to add repo"}"#,
        ));
        match result {
            Err(TldrError::Status { status, body }) => {
                assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
                assert!(body.contains("failed to add repo"));
            }
            other => panic!("unexpected result: {:?}", other),
        }
    }

    #[test]
    fn test_decode_empty_body_is_empty_success() {
        let ack: Ack = decode(HttpResponse::new(StatusCode::OK, "")).unwrap();
        assert_eq!(ack, Ack::default());
        assert_eq!(ack.0, serde_json::json!({}));
    }

    #[test]
    fn test_decode_garbage_body_is_empty_success() {
        let repos: Vec<crate::api::Repo> =
            decode(HttpResponse::new(StatusCode::OK, "<html>oops</html>")).unwrap();
        assert!(repos.is_empty());
    }

    #[test]
    fn test_decode_json_body() {
        let ack: Ack = decode(HttpResponse::new(StatusCode::CREATED, r#"{"id": 4}"#)).unwrap();
        assert_eq!(ack.0["id"], 4);
    }

    #[test]
    fn test_reqwest_transport_trims_base_url() {
        let transport = ReqwestTransport::new("http://localhost:8080/").unwrap();
        assert_eq!(transport.base_url(), "http://localhost:8080");
    }

    #[tokio::test]
    async fn test_request_without_body_sends_none() {
        let transport = RecordingTransport::replying(StatusCode::OK, "[]");
        let client = RepoClient::new(transport, Arc::new(ErrorSlot::new()));

        let _: Vec<crate::api::Repo> = client
            .request(Method::GET, "/api/repos", None::<&()>)
            .await
            .unwrap();

        let requests = client.transport().requests();
        assert_eq!(requests.len(), 1);
        assert_eq!(requests[0].body, None);
    }

    /// Accept one connection, answer it with `status` and `body`, and hand
    /// back the raw request text.
    async fn serve_once(
        status: &'static str,
        body: &'static str,
    ) -> (String, tokio::task::JoinHandle<String>) {
        use tokio::io::{AsyncReadExt, AsyncWriteExt};

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let base_url = format!("http://{}/", listener.local_addr().unwrap());

        let handle = tokio::spawn(async move {
            let (mut socket, _) = listener.accept().await.unwrap();
            let mut raw = Vec::new();
            let mut chunk = [0u8; 1024];
            loop {
                let n = socket.read(&mut chunk).await.unwrap();
                raw.extend_from_slice(&chunk[..n]);
                let text = String::from_utf8_lossy(&raw).to_string();
                if let Some(end) = text.find("\r\n\r\n") {
                    let length = text[..end]
                        .lines()
                        .find_map(|line| {
                            let (name, value) = line.split_once(':')?;
                            name.eq_ignore_ascii_case("content-length")
                                .then(|| value.trim().parse::<usize>().ok())?
                        })
                        .unwrap_or(0);
                    if raw.len() >= end + 4 + length {
                        break;
                    }
                }
                if n == 0 {
                    break;
                }
            }

            let response = format!(
                "HTTP/1.1 {}\r\ncontent-length: {}\r\nconnection: close\r\n\r\n{}",
                status,
                body.len(),
                body
            );
            socket.write_all(response.as_bytes()).await.unwrap();
            socket.shutdown().await.unwrap();
            String::from_utf8(raw).unwrap()
        });

        (base_url, handle)
    }

    #[tokio::test]
    async fn test_reqwest_transport_sends_json_body() {
        let (base_url, server) = serve_once("201 Created", r#"{"id": 4}"#).await;
        let client = RepoClient::connect(&base_url, Arc::new(ErrorSlot::new())).unwrap();

        let ack = client.add_repo("felipesere/advisor").await.unwrap();

        let raw = server.await.unwrap();
        let lower = raw.to_lowercase();
        assert!(raw.starts_with("POST /api/repos HTTP/1.1\r\n"), "{}", raw);
        assert!(lower.contains("content-type: application/json"));
        assert!(lower.contains("accept: application/json"));
        assert!(lower.contains("user-agent: tldr-tui"));
        assert!(raw.ends_with(r#"{"name":"felipesere/advisor"}"#));
        assert_eq!(ack.0["id"], 4);
    }

    #[tokio::test]
    async fn test_reqwest_transport_keeps_error_body() {
        let (base_url, server) = serve_once("500 Internal Server Error", "boom").await;
        let slot = ErrorSlot::new();
        let client = RepoClient::connect(&base_url, Arc::new(slot.clone())).unwrap();

        let result = client.add_repo("my-repo").await;

        let raw = server.await.unwrap();
        assert!(raw.ends_with(r#"{"name":"my-repo"}"#));
        match result {
            Err(TldrError::Status { status, body }) => {
                assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
                assert_eq!(body, "boom");
            }
            other => panic!("unexpected result: {:?}", other),
        }
        assert_eq!(slot.current().unwrap().msg, "Could not add repo my-repo");
    }

    #[tokio::test]
    async fn test_reqwest_transport_get_has_no_content_type() {
        let (base_url, server) = serve_once("200 OK", "[]").await;
        let client = RepoClient::connect(&base_url, Arc::new(ErrorSlot::new())).unwrap();

        let repos = client.list_repos().await.unwrap();

        let raw = server.await.unwrap();
        assert!(raw.starts_with("GET /api/repos HTTP/1.1\r\n"), "{}", raw);
        assert!(!raw.to_lowercase().contains("content-type:"));
        assert!(repos.is_empty());
    }
}
