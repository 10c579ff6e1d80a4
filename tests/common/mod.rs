#![allow(dead_code)]

use netback_client::application_impl::*;
use netback_client::domain_model::*;
use netback_client::domain_port::*;
use netback_client::infra::*;
use netback_client::session::Session;
use serde_json::json;
use std::sync::Arc;
use std::time::Duration;

pub const BASE_URL: &str = "http://netback.test/api";
pub const CSRF: &str = "xsrf-1";

pub struct Harness {
    pub client: Arc<ApiClient>,
    pub session: Arc<Session>,
    pub transport: Arc<FakeTransport>,
    pub navigator: Arc<RedirectNavigator>,
}

pub fn harness<F>(responder: F) -> Harness
where
    F: Fn(&TransportRequest) -> Result<ApiResponse, TransportError> + Send + Sync + 'static,
{
    build(
        Arc::new(Session::new()),
        StaticCookies::new().with("XSRF-TOKEN", CSRF),
        Some(Duration::from_secs(30)),
        responder,
    )
}

pub fn build<F>(
    session: Arc<Session>,
    cookies: StaticCookies,
    refresh_wait: Option<Duration>,
    responder: F,
) -> Harness
where
    F: Fn(&TransportRequest) -> Result<ApiResponse, TransportError> + Send + Sync + 'static,
{
    let transport = Arc::new(FakeTransport::new(responder));
    let navigator = Arc::new(RedirectNavigator::new("/"));
    let mut config = ApiClientConfig::new(BASE_URL);
    config.refresh_wait = refresh_wait;

    let client = Arc::new(ApiClient::new(
        config,
        session.clone(),
        transport.clone(),
        Arc::new(cookies),
        navigator.clone(),
    ));

    Harness {
        client,
        session,
        transport,
        navigator,
    }
}

pub fn bearer(request: &TransportRequest) -> Option<&str> {
    request.header("authorization")
}

/// Backend whose access token `T1` has expired: refresh mints `T2`, requests
/// bearing `T2` succeed, everything else is 401.
pub fn expiring_backend(request: &TransportRequest) -> Result<ApiResponse, TransportError> {
    if request.url.ends_with(REFRESH_PATH) {
        return reply(200, json!({ "access": "T2" }));
    }
    match bearer(request) {
        Some("Bearer T2") => reply(200, json!({ "ok": true, "url": request.url })),
        _ => reply(401, json!({ "detail": "token expired" })),
    }
}

/// Backend whose refresh cookie has expired too.
pub fn dead_session_backend(request: &TransportRequest) -> Result<ApiResponse, TransportError> {
    if request.url.ends_with(REFRESH_PATH) {
        return reply(401, json!({ "detail": "Refresh token inválido" }));
    }
    reply(401, json!({ "detail": "token expired" }))
}

pub async fn wait_until(condition: impl Fn() -> bool) {
    for _ in 0..10_000 {
        if condition() {
            return;
        }
        tokio::task::yield_now().await;
    }
    panic!("condition not reached");
}

pub fn token(value: &str) -> AccessToken {
    AccessToken::new(value)
}
