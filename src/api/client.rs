use crate::core::config::Config;
use crate::error::{ApiError, CommandError, ErrorCode};
use crate::utils::error_helpers::{convert_json_error, convert_request_error};
use crate::utils::validation::request_timeout;
use async_trait::async_trait;
use reqwest::{Client, Method, RequestBuilder, Response};
use serde_json::Value;
use std::time::Duration;

const DEFAULT_TIMEOUT_SECS: u64 = 30;
const USER_AGENT: &str = concat!("payrail/", env!("CARGO_PKG_VERSION"));

pub const TENANT_HEADER: &str = "x-tenant-id";
pub const TRACE_HEADER: &str = "x-trace-id";

/// Per-request extras: query pairs in send order and additional headers.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RequestOptions {
    pub query: Vec<(String, String)>,
    pub headers: Vec<(String, String)>,
}

impl RequestOptions {
    pub fn with_query(query: Vec<(String, String)>) -> Self {
        Self {
            query,
            headers: Vec::new(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct HttpResponse {
    pub status: u16,
    pub data: Value,
}

/// Transport seam used by every command.
#[async_trait]
pub trait HttpClient: Send + Sync {
    async fn get(&self, path: &str, opts: RequestOptions) -> Result<HttpResponse, ApiError>;
    async fn post(
        &self,
        path: &str,
        body: Option<Value>,
        opts: RequestOptions,
    ) -> Result<HttpResponse, ApiError>;
    async fn put(
        &self,
        path: &str,
        body: Option<Value>,
        opts: RequestOptions,
    ) -> Result<HttpResponse, ApiError>;
    async fn delete(&self, path: &str, opts: RequestOptions) -> Result<HttpResponse, ApiError>;
}

/// Build the HTTP client for one command execution.
pub fn base_request(config: &Config) -> Result<ReqwestClient, CommandError> {
    config.validate()?;
    ReqwestClient::from_config(config)
}

#[derive(Debug, Clone)]
pub struct ReqwestClient {
    client: Client,
    pub base_url: String,
    /// `0.0` when requests have no timeout
    timeout_secs: f64,
    bearer_token: Option<String>,
    basic_auth: Option<(String, String)>,
    default_headers: Vec<(String, String)>,
}

impl ReqwestClient {
    // Create baseClient with default settings
    pub fn new(base_url: String) -> Result<Self, ApiError> {
        Self::build(base_url, Some(Duration::from_secs(DEFAULT_TIMEOUT_SECS)))
    }

    /// Client for one config. A timeout of `0` disables the request timeout.
    pub fn from_config(config: &Config) -> Result<Self, CommandError> {
        let timeout = match config.http.timeout_secs {
            Some(secs) => request_timeout(secs)
                .map_err(|problem| CommandError::new(ErrorCode::InvalidConfig, problem))?,
            None => Some(Duration::from_secs(DEFAULT_TIMEOUT_SECS)),
        };
        let mut client = Self::build(config.base_url.clone(), timeout)?;

        client.bearer_token = config.credentials.bearer_token.clone();
        if let (Some(id), Some(secret)) = (&config.credentials.credential, &config.credentials.secret)
        {
            client.basic_auth = Some((id.clone(), secret.clone()));
        }

        client.default_headers = config
            .http
            .headers
            .iter()
            .map(|(name, value)| (name.clone(), value.clone()))
            .collect();
        if let Some(tenant) = &config.tenant_id {
            client
                .default_headers
                .push((TENANT_HEADER.to_string(), tenant.clone()));
        }
        if let Some(trace_id) = &config.trace_id {
            client
                .default_headers
                .push((TRACE_HEADER.to_string(), trace_id.clone()));
        }

        Ok(client)
    }

    fn build(base_url: String, timeout: Option<Duration>) -> Result<Self, ApiError> {
        let timeout_secs = timeout.map_or(0.0, |t| t.as_secs_f64());
        let mut builder = Client::builder().user_agent(USER_AGENT);
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder
            .build()
            .map_err(|e| convert_request_error(e, "client_init", timeout_secs))?;

        Ok(ReqwestClient {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            timeout_secs,
            bearer_token: None,
            basic_auth: None,
            default_headers: Vec::new(),
        })
    }

    pub fn is_authenticated(&self) -> bool {
        self.bearer_token.is_some() || self.basic_auth.is_some()
    }

    pub fn build_request(&self, method: Method, path: &str, opts: &RequestOptions) -> RequestBuilder {
        let url = format!("{}{}", self.base_url, path);
        let mut request = self.client.request(method, url);

        if let Some(token) = &self.bearer_token {
            request = request.bearer_auth(token);
        } else if let Some((id, secret)) = &self.basic_auth {
            request = request.basic_auth(id, Some(secret));
        }

        for (name, value) in self.default_headers.iter().chain(opts.headers.iter()) {
            request = request.header(name.as_str(), value.as_str());
        }
        if !opts.query.is_empty() {
            request = request.query(&opts.query);
        }

        request
    }

    async fn send(
        &self,
        method: Method,
        path: &str,
        body: Option<Value>,
        opts: RequestOptions,
    ) -> Result<HttpResponse, ApiError> {
        let mut request = self.build_request(method.clone(), path, &opts);
        if let Some(body) = body {
            request = request.json(&body);
        }

        tracing::debug!("{} {}{}", method, self.base_url, path);
        let response = request
            .send()
            .await
            .map_err(|e| convert_request_error(e, path, self.timeout_secs))?;

        self.handle_response(response, path).await
    }

    pub async fn handle_response(
        &self,
        response: Response,
        endpoint: &str,
    ) -> Result<HttpResponse, ApiError> {
        let status = response.status();

        if status.is_success() {
            let text = response
                .text()
                .await
                .map_err(|e| convert_request_error(e, endpoint, self.timeout_secs))?;
            let data = if text.trim().is_empty() {
                Value::Null
            } else {
                serde_json::from_str(&text)
                    .map_err(|e| convert_json_error(e, status.as_u16(), endpoint))?
            };
            Ok(HttpResponse {
                status: status.as_u16(),
                data,
            })
        } else {
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());

            match status.as_u16() {
                401 | 403 => Err(ApiError::Unauthorized {
                    status: status.as_u16(),
                    endpoint: endpoint.to_string(),
                    server_message: error_text,
                }),
                408 | 504 => Err(ApiError::Timeout {
                    timeout_secs: self.timeout_secs,
                    endpoint: endpoint.to_string(),
                }),
                _ => Err(ApiError::Http {
                    status: status.as_u16(),
                    endpoint: endpoint.to_string(),
                    message: error_text,
                }),
            }
        }
    }
}

#[async_trait]
impl HttpClient for ReqwestClient {
    async fn get(&self, path: &str, opts: RequestOptions) -> Result<HttpResponse, ApiError> {
        self.send(Method::GET, path, None, opts).await
    }

    async fn post(
        &self,
        path: &str,
        body: Option<Value>,
        opts: RequestOptions,
    ) -> Result<HttpResponse, ApiError> {
        self.send(Method::POST, path, body, opts).await
    }

    async fn put(
        &self,
        path: &str,
        body: Option<Value>,
        opts: RequestOptions,
    ) -> Result<HttpResponse, ApiError> {
        self.send(Method::PUT, path, body, opts).await
    }

    async fn delete(&self, path: &str, opts: RequestOptions) -> Result<HttpResponse, ApiError> {
        self.send(Method::DELETE, path, None, opts).await
    }
}

/// Decode a response body into a typed value.
pub fn decode<T>(response: HttpResponse, endpoint: &str) -> Result<T, CommandError>
where
    T: serde::de::DeserializeOwned,
{
    serde_json::from_value(response.data).map_err(|e| {
        CommandError::new(
            ErrorCode::InvalidResponse,
            format!("{} returned an unexpected body: {}", endpoint, e),
        )
        .with_status(response.status)
        .with_source(e)
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use wiremock::matchers::{header, method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[test]
    fn test_client_creation() {
        let client = ReqwestClient::new("http://example.test".to_string());
        assert!(client.is_ok());
    }

    #[test]
    fn test_base_url_trailing_slash_removed() {
        let client =
            ReqwestClient::new("http://example.test/".to_string()).expect("client creation failed");
        assert_eq!(client.base_url, "http://example.test");
    }

    #[test]
    fn test_base_request_rejects_invalid_config() {
        let err = base_request(&Config::new("nope")).unwrap_err();
        assert_eq!(err.code, ErrorCode::InvalidConfig);
    }

    #[test]
    fn test_build_request_without_auth() {
        let client =
            ReqwestClient::new("http://example.test".to_string()).expect("client creation failed");
        let built_request = client
            .build_request(Method::GET, "/payments", &RequestOptions::default())
            .build()
            .expect("Failed to build request");

        assert_eq!(built_request.url().as_str(), "http://example.test/payments");
        assert_eq!(built_request.method(), Method::GET);
        assert!(built_request.headers().get("authorization").is_none());
        assert!(!client.is_authenticated());
    }

    #[test]
    fn test_build_request_with_bearer_tenant_and_trace() {
        let mut config = Config::new("http://example.test")
            .with_bearer_token("tok_123")
            .with_tenant("acme");
        config.trace_id = Some("trace-1".to_string());
        config
            .http
            .headers
            .insert("x-extra".to_string(), "yes".to_string());

        let client = ReqwestClient::from_config(&config).expect("client creation failed");
        let opts = RequestOptions::with_query(vec![("limit".to_string(), "5".to_string())]);
        let built_request = client
            .build_request(Method::GET, "/accounts", &opts)
            .build()
            .expect("Failed to build request");

        let headers = built_request.headers();
        assert_eq!(headers.get("authorization").unwrap(), "Bearer tok_123");
        assert_eq!(headers.get(TENANT_HEADER).unwrap(), "acme");
        assert_eq!(headers.get(TRACE_HEADER).unwrap(), "trace-1");
        assert_eq!(headers.get("x-extra").unwrap(), "yes");
        assert_eq!(built_request.url().query(), Some("limit=5"));
    }

    #[test]
    fn test_bearer_takes_priority_over_basic_auth() {
        let mut config = Config::new("http://example.test").with_bearer_token("tok");
        config.credentials.credential = Some("client".to_string());
        config.credentials.secret = Some("secret".to_string());

        let client = ReqwestClient::from_config(&config).expect("client creation failed");
        let built_request = client
            .build_request(Method::GET, "/clients", &RequestOptions::default())
            .build()
            .unwrap();
        assert_eq!(built_request.headers().get("authorization").unwrap(), "Bearer tok");
    }

    #[tokio::test]
    async fn test_get_decodes_json() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/payments/p_1"))
            .and(header(TENANT_HEADER, "acme"))
            .and(query_param("locale", "en_US"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"id": "p_1"})))
            .expect(1)
            .mount(&server)
            .await;

        let client = ReqwestClient::from_config(&Config::new(server.uri()).with_tenant("acme"))
            .expect("client creation failed");
        let opts = RequestOptions::with_query(vec![("locale".to_string(), "en_US".to_string())]);
        let response = client.get("/payments/p_1", opts).await.unwrap();

        assert_eq!(response.status, 200);
        assert_eq!(response.data, json!({"id": "p_1"}));
    }

    #[tokio::test]
    async fn test_error_statuses_are_classified() {
        let server = MockServer::start().await;
        Mock::given(method("DELETE"))
            .and(path("/recipients/r_1"))
            .respond_with(ResponseTemplate::new(403).set_body_string("forbidden"))
            .mount(&server)
            .await;
        Mock::given(method("POST"))
            .and(path("/transfers"))
            .respond_with(ResponseTemplate::new(422).set_body_string("bad amount"))
            .mount(&server)
            .await;

        let client = ReqwestClient::new(server.uri()).unwrap();

        let err = client
            .delete("/recipients/r_1", RequestOptions::default())
            .await
            .unwrap_err();
        assert!(matches!(err, ApiError::Unauthorized { status: 403, .. }));

        let err = client
            .post("/transfers", Some(json!({})), RequestOptions::default())
            .await
            .unwrap_err();
        match err {
            ApiError::Http {
                status, message, ..
            } => {
                assert_eq!(status, 422);
                assert_eq!(message, "bad amount");
            }
            other => panic!("Expected Http error, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_empty_success_body_is_null() {
        let server = MockServer::start().await;
        Mock::given(method("PUT"))
            .and(path("/accounts/a_1"))
            .respond_with(ResponseTemplate::new(204))
            .mount(&server)
            .await;

        let client = ReqwestClient::new(server.uri()).unwrap();
        let response = client
            .put("/accounts/a_1", Some(json!({"name": "Ops"})), RequestOptions::default())
            .await
            .unwrap();
        assert_eq!(response.status, 204);
        assert_eq!(response.data, Value::Null);
    }

    #[test]
    fn test_oversized_timeout_is_rejected_not_panicking() {
        let mut config = Config::new("http://example.test");
        config.http.timeout_secs = Some(1e30);

        let err = base_request(&config).unwrap_err();
        assert_eq!(err.code, ErrorCode::InvalidConfig);
        let err = ReqwestClient::from_config(&config).unwrap_err();
        assert_eq!(err.code, ErrorCode::InvalidConfig);
    }

    #[tokio::test]
    async fn test_zero_timeout_disables_request_timeout() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/payments/p_1"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(json!({"id": "p_1"}))
                    .set_delay(Duration::from_millis(200)),
            )
            .expect(1)
            .mount(&server)
            .await;

        let mut config = Config::new(server.uri());
        config.http.timeout_secs = Some(0.0);
        let client = base_request(&config).expect("zero timeout is valid");

        let response = client
            .get("/payments/p_1", RequestOptions::default())
            .await
            .unwrap();
        assert_eq!(response.data, json!({"id": "p_1"}));
    }

    #[tokio::test]
    async fn test_sub_second_timeout_is_reported_exactly() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/accounts"))
            .respond_with(ResponseTemplate::new(200).set_delay(Duration::from_secs(2)))
            .mount(&server)
            .await;

        let mut config = Config::new(server.uri());
        config.http.timeout_secs = Some(0.25);
        let client = base_request(&config).unwrap();

        let err = client
            .get("/accounts", RequestOptions::default())
            .await
            .unwrap_err();
        match &err {
            ApiError::Timeout { timeout_secs, .. } => assert_eq!(*timeout_secs, 0.25),
            other => panic!("Expected Timeout error, got {:?}", other),
        }
        assert_eq!(err.to_string(), "Request timed out after 0.25s");
    }

    #[test]
    fn test_decode_reports_invalid_response() {
        let response = HttpResponse {
            status: 200,
            data: json!("not an object"),
        };
        let err = decode::<std::collections::HashMap<String, Value>>(response, "/payments")
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::InvalidResponse);
        assert_eq!(err.status_code, Some(200));
    }
}
