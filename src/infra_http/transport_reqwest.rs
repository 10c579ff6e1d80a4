use super::JarCookieSource;
use crate::domain_model::*;
use crate::domain_port::*;
use reqwest::cookie::Jar;
use reqwest::{Client, Method, Url};
use serde_json::Value;
use std::sync::Arc;
use std::time::Duration;

/// `HttpTransport` over reqwest. Credentialed requests go through a client that
/// shares one cookie jar, so refresh and anti-forgery cookies set by the server
/// are stored and sent back; the other client never touches cookies.
pub struct ReqwestTransport {
    credentialed: Client,
    anonymous: Client,
    jar: Arc<Jar>,
}

impl ReqwestTransport {
    pub fn new(timeout: Duration) -> Result<Self, TransportError> {
        let jar = Arc::new(Jar::default());
        let credentialed = Client::builder()
            .cookie_provider(jar.clone())
            .timeout(timeout)
            .build()
            .map_err(map_error)?;
        let anonymous = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(map_error)?;

        Ok(ReqwestTransport {
            credentialed,
            anonymous,
            jar,
        })
    }

    /// Cookie view of the jar for `base_url`.
    pub fn cookie_source(&self, base_url: &str) -> Result<JarCookieSource, TransportError> {
        let url = Url::parse(base_url).map_err(|e| TransportError::InvalidUrl(e.to_string()))?;
        Ok(JarCookieSource::new(self.jar.clone(), url))
    }
}

#[async_trait::async_trait]
impl HttpTransport for ReqwestTransport {
    async fn send(&self, request: TransportRequest) -> Result<ApiResponse, TransportError> {
        let client = if request.with_credentials {
            &self.credentialed
        } else {
            &self.anonymous
        };

        let mut builder = client.request(method(request.method), &request.url);
        if !request.query.is_empty() {
            builder = builder.query(&request.query);
        }
        for (name, value) in &request.headers {
            builder = builder.header(name.as_str(), value.as_str());
        }
        if let Some(body) = &request.body {
            builder = builder.json(body);
        }

        let response = builder.send().await.map_err(map_error)?;
        let status = response.status().as_u16();
        let bytes = response.bytes().await.map_err(map_error)?;
        tracing::trace!(status, len = bytes.len(), url = %request.url, "response received");

        Ok(ApiResponse::new(status, parse_body(&bytes)))
    }
}

/// Resolves a possibly relative base address (`/api`) against `origin`.
pub fn resolve_base_url(origin: &str, base_url: &str) -> Result<String, TransportError> {
    if let Ok(url) = Url::parse(base_url) {
        return Ok(url.to_string());
    }
    let origin = Url::parse(origin).map_err(|e| TransportError::InvalidUrl(e.to_string()))?;
    origin
        .join(base_url)
        .map(|url| url.to_string())
        .map_err(|e| TransportError::InvalidUrl(e.to_string()))
}

fn method(method: HttpMethod) -> Method {
    match method {
        HttpMethod::Get => Method::GET,
        HttpMethod::Post => Method::POST,
        HttpMethod::Put => Method::PUT,
        HttpMethod::Patch => Method::PATCH,
        HttpMethod::Delete => Method::DELETE,
    }
}

fn parse_body(bytes: &[u8]) -> Value {
    if bytes.is_empty() {
        return Value::Null;
    }
    serde_json::from_slice(bytes)
        .unwrap_or_else(|_| Value::String(String::from_utf8_lossy(bytes).into_owned()))
}

fn map_error(error: reqwest::Error) -> TransportError {
    if error.is_timeout() {
        TransportError::Timeout(error.to_string())
    } else if error.is_connect() {
        TransportError::Connect(error.to_string())
    } else if error.is_builder() {
        TransportError::InvalidUrl(error.to_string())
    } else {
        TransportError::Other(error.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn relative_base_resolves_against_origin() {
        assert_eq!(
            resolve_base_url("http://localhost:8080", "/api").unwrap(),
            "http://localhost:8080/api"
        );
        assert_eq!(
            resolve_base_url("http://ignored", "https://netback.example/api").unwrap(),
            "https://netback.example/api"
        );
        assert!(resolve_base_url("not a url", "/api").is_err());
    }

    #[test]
    fn body_parsing_falls_back_to_text() {
        assert_eq!(parse_body(b""), Value::Null);
        assert_eq!(parse_body(br#"{"access":"T1"}"#), json!({ "access": "T1" }));
        assert_eq!(parse_body(b"Bad Gateway"), json!("Bad Gateway"));
    }
}
