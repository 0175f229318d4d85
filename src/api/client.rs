use std::io::Write;

use reqwest::header::{CONTENT_TYPE, HeaderValue, USER_AGENT};
use reqwest::{Client, Method, Request, Url};
use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::debug;

use crate::api::error::{ApiError, ErrorResponse};

pub const DEFAULT_BASE_URL: &str = "https://gamethrive.com/api/v1/";
pub const DEFAULT_USER_AGENT: &str = concat!("gamethrive-rs/", env!("CARGO_PKG_VERSION"));

#[derive(Debug, Clone)]
pub struct GameThriveClient {
    pub base_url: Url,
    pub user_agent: String,
    pub http: Client,
}

impl GameThriveClient {
    /// Client against the public API endpoint.
    pub fn new() -> Result<Self, ApiError> {
        Self::with_base_url(DEFAULT_BASE_URL)
    }

    pub fn with_base_url(base_url: &str) -> Result<Self, ApiError> {
        let mut base_url = Url::parse(base_url)?;
        // Relative paths are appended to the base path, which only works
        // when it ends with a slash.
        if !base_url.path().ends_with('/') {
            let path = format!("{}/", base_url.path());
            base_url.set_path(&path);
        }

        let http = Client::builder().build()?;

        Ok(Self {
            base_url,
            user_agent: DEFAULT_USER_AGENT.to_string(),
            http,
        })
    }

    /// Resolves `path` beneath the base URL. A leading slash does not reset
    /// to the host root.
    pub fn url(&self, path: &str) -> Result<Url, ApiError> {
        Ok(self.base_url.join(path.trim_start_matches('/'))?)
    }

    /// Builds a request with the standard headers and, when given, a JSON body.
    pub fn new_request<B>(
        &self,
        method: Method,
        path: &str,
        body: Option<&B>,
    ) -> Result<Request, ApiError>
    where
        B: Serialize + ?Sized,
    {
        let url = self.url(path)?;

        let mut builder = self
            .http
            .request(method, url)
            .header(USER_AGENT, HeaderValue::from_str(&self.user_agent)?)
            .header(CONTENT_TYPE, HeaderValue::from_static("application/json"));

        if let Some(body) = body {
            let encoded = serde_json::to_vec(body).map_err(ApiError::Encode)?;
            builder = builder.body(encoded);
        }

        Ok(builder.build()?)
    }

    /// Sends the request and returns the full body of a 2xx response.
    /// Any other status is decoded into an [`ErrorResponse`].
    pub async fn execute(&self, request: Request) -> Result<Vec<u8>, ApiError> {
        let method = request.method().clone();
        let url = request.url().clone();
        debug!(%method, %url, "sending request");

        let resp = self.http.execute(request).await?;
        let status = resp.status();
        let body = resp.bytes().await?;
        debug!(status = status.as_u16(), len = body.len(), "received response");

        check_response(method, url, status, &body)?;
        Ok(body.to_vec())
    }

    /// Sends the request and decodes a successful body as JSON.
    pub async fn execute_json<T: DeserializeOwned>(&self, request: Request) -> Result<T, ApiError> {
        let body = self.execute(request).await?;
        serde_json::from_slice(&body).map_err(ApiError::Decode)
    }

    /// Sends the request and copies a successful body verbatim into `sink`.
    pub async fn execute_into<W: Write>(
        &self,
        request: Request,
        sink: &mut W,
    ) -> Result<usize, ApiError> {
        let body = self.execute(request).await?;
        sink.write_all(&body)?;
        Ok(body.len())
    }

    /// Sends the request, reading and dropping a successful body.
    pub async fn execute_discard(&self, request: Request) -> Result<(), ApiError> {
        self.execute(request).await.map(|_| ())
    }
}

/// Accepts any 2xx status; everything else becomes an [`ErrorResponse`].
pub fn check_response(
    method: Method,
    url: Url,
    status: reqwest::StatusCode,
    body: &[u8],
) -> Result<(), ErrorResponse> {
    if status.is_success() {
        return Ok(());
    }
    Err(ErrorResponse::from_body(method, url, status, body))
}

#[cfg(test)]
mod tests {
    use httpmock::MockServer;
    use reqwest::StatusCode;
    use serde::{Deserialize, Serialize};

    use super::*;

    #[derive(Debug, PartialEq, Serialize, Deserialize)]
    #[allow(non_snake_case)]
    struct Foo {
        Bar: String,
    }

    fn body_bytes(req: &Request) -> Vec<u8> {
        req.body()
            .and_then(|b| b.as_bytes())
            .map(|b| b.to_vec())
            .unwrap_or_default()
    }

    #[test]
    fn new_client_uses_defaults() {
        let c = GameThriveClient::new().expect("client");
        assert_eq!(c.base_url.as_str(), DEFAULT_BASE_URL);
        assert_eq!(c.user_agent, DEFAULT_USER_AGENT);
    }

    #[test]
    fn base_url_gets_trailing_slash() {
        let c = GameThriveClient::with_base_url("https://host/api/v1").expect("client");
        assert_eq!(c.base_url.as_str(), "https://host/api/v1/");
        assert_eq!(
            c.url("players/abc/on_session").expect("url").as_str(),
            "https://host/api/v1/players/abc/on_session"
        );
    }

    #[test]
    fn new_request_appends_path_and_sets_headers() {
        let c = GameThriveClient::with_base_url("https://host/api/v1/").expect("client");
        let req = c
            .new_request::<()>(Method::GET, "/foo", None)
            .expect("request");

        assert_eq!(req.url().as_str(), "https://host/api/v1/foo");
        assert!(body_bytes(&req).is_empty());
        assert_eq!(
            req.headers().get(USER_AGENT).expect("user agent"),
            DEFAULT_USER_AGENT
        );
        assert_eq!(
            req.headers().get(CONTENT_TYPE).expect("content type"),
            "application/json"
        );
    }

    #[test]
    fn new_request_encodes_body() {
        let c = GameThriveClient::new().expect("client");
        let body = Foo { Bar: "rocks".into() };
        let req = c
            .new_request(Method::POST, "players", Some(&body))
            .expect("request");

        assert_eq!(*req.method(), Method::POST);
        assert_eq!(body_bytes(&req), br#"{"Bar":"rocks"}"#.to_vec());
    }

    #[test]
    fn check_response_accepts_2xx_only() {
        let url = Url::parse(DEFAULT_BASE_URL).expect("url");
        assert!(check_response(Method::GET, url.clone(), StatusCode::OK, b"").is_ok());
        assert!(check_response(Method::GET, url.clone(), StatusCode::NO_CONTENT, b"").is_ok());
        let err = check_response(Method::GET, url, StatusCode::FOUND, b"").expect_err("302");
        assert_eq!(err.status, StatusCode::FOUND);
    }

    #[tokio::test]
    async fn execute_json_decodes_success_body() {
        let server = MockServer::start_async().await;
        let mock = server
            .mock_async(|when, then| {
                when.method("GET").path("/");
                then.status(200).body(r#"{"Bar":"rocks"}"#);
            })
            .await;

        let c = GameThriveClient::with_base_url(&server.base_url()).expect("client");
        let req = c.new_request::<()>(Method::GET, "/", None).expect("request");
        let foo: Foo = c.execute_json(req).await.expect("decoded");

        mock.assert_async().await;
        assert_eq!(foo, Foo { Bar: "rocks".into() });
    }

    #[tokio::test]
    async fn execute_json_rejects_undecodable_success_body() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method("GET").path("/");
                then.status(200).body("not json");
            })
            .await;

        let c = GameThriveClient::with_base_url(&server.base_url()).expect("client");
        let req = c.new_request::<()>(Method::GET, "/", None).expect("request");
        let err = c.execute_json::<Foo>(req).await.expect_err("not json");
        assert!(matches!(err, ApiError::Decode(_)), "{err:?}");
        assert!(err.response().is_none());
    }

    #[tokio::test]
    async fn execute_into_copies_body_verbatim() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method("GET").path("/raw");
                then.status(200).body("not json at all");
            })
            .await;

        let c = GameThriveClient::with_base_url(&server.base_url()).expect("client");
        let req = c.new_request::<()>(Method::GET, "raw", None).expect("request");
        let mut sink = Vec::new();
        let n = c.execute_into(req, &mut sink).await.expect("copied");

        assert_eq!(n, 15);
        assert_eq!(sink, b"not json at all");
    }

    #[tokio::test]
    async fn execute_surfaces_structured_error() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method("POST").path("/players");
                then.status(400).body(r#"{"errors":["app_id not found."]}"#);
            })
            .await;

        let c = GameThriveClient::with_base_url(&server.base_url()).expect("client");
        let req = c
            .new_request(Method::POST, "players", Some(&Foo { Bar: "x".into() }))
            .expect("request");
        let mut out = Vec::new();
        let err = c.execute_into(req, &mut out).await.expect_err("400");

        let resp = err.response().expect("structured error");
        assert_eq!(resp.status, StatusCode::BAD_REQUEST);
        assert_eq!(resp.method, Method::POST);
        assert_eq!(resp.errors, vec!["app_id not found.".to_string()]);
        assert!(out.is_empty());
    }

    #[tokio::test]
    async fn execute_error_with_empty_body() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method("GET").path("/");
                then.status(400);
            })
            .await;

        let c = GameThriveClient::with_base_url(&server.base_url()).expect("client");
        let req = c.new_request::<()>(Method::GET, "/", None).expect("request");
        let err = c.execute_discard(req).await.expect_err("400");

        let resp = err.response().expect("structured error");
        assert_eq!(resp.status.as_u16(), 400);
        assert!(resp.errors.is_empty());
    }

    #[tokio::test]
    async fn transport_failure_is_http_error() {
        let c = GameThriveClient::with_base_url("http://127.0.0.1:9/").expect("client");
        let req = c.new_request::<()>(Method::GET, "/", None).expect("request");
        let err = c.execute_discard(req).await.expect_err("connection refused");
        assert!(matches!(err, ApiError::Http(_)));
    }
}
