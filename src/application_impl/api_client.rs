use crate::application_port::*;
use crate::domain_model::*;
use crate::domain_port::*;
use crate::session::*;
use crate::settings::Settings;
use serde_json::{Value, json};
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info, warn};

pub const LOGIN_PATH: &str = "/auth/login/";
pub const REFRESH_PATH: &str = "/token/refresh/";
pub const LOGOUT_PATH: &str = "/token/logout/";

const AUTHORIZATION: &str = "Authorization";

#[derive(Debug, Clone)]
pub struct ApiClientConfig {
    pub base_url: String,
    pub with_credentials: bool,
    pub csrf_cookie: String,
    pub csrf_header: String,
    /// Upper bound for a request queued behind an in-flight refresh.
    pub refresh_wait: Option<Duration>,
}

impl ApiClientConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        ApiClientConfig {
            base_url: base_url.into(),
            with_credentials: true,
            csrf_cookie: "XSRF-TOKEN".to_string(),
            csrf_header: "X-CSRF-Token".to_string(),
            refresh_wait: Some(Duration::from_secs(30)),
        }
    }

    pub fn from_settings(settings: &Settings) -> Self {
        ApiClientConfig {
            base_url: settings.api.base_url.clone(),
            with_credentials: settings.api.with_credentials,
            csrf_cookie: settings.auth.csrf_cookie.clone(),
            csrf_header: settings.auth.csrf_header.clone(),
            refresh_wait: Some(settings.auth.refresh_wait()).filter(|d| !d.is_zero()),
        }
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }
}

/// HTTP client that authenticates every call and recovers from an expired
/// access token with a single shared refresh.
pub struct ApiClient {
    config: ApiClientConfig,
    session: Arc<Session>,
    transport: Arc<dyn HttpTransport>,
    cookies: Arc<dyn CookieSource>,
    navigator: Arc<dyn SessionNavigator>,
}

impl ApiClient {
    pub fn new(
        config: ApiClientConfig,
        session: Arc<Session>,
        transport: Arc<dyn HttpTransport>,
        cookies: Arc<dyn CookieSource>,
        navigator: Arc<dyn SessionNavigator>,
    ) -> Self {
        Self {
            config,
            session,
            transport,
            cookies,
            navigator,
        }
    }

    pub fn session(&self) -> &Arc<Session> {
        &self.session
    }

    pub fn state(&self) -> SessionState {
        self.session.state()
    }

    pub fn is_authenticated(&self) -> bool {
        self.session.credentials().is_present()
    }

    pub fn set_credential(&self, token: AccessToken) {
        self.session.credentials().set(token);
    }

    pub fn clear_credential(&self) {
        self.session.credentials().clear();
    }

    #[must_use = "dropping the subscription unsubscribes immediately"]
    pub fn subscribe<F>(&self, observer: F) -> Subscription
    where
        F: Fn(Option<&AccessToken>) + Send + Sync + 'static,
    {
        self.session.credentials().subscribe(observer)
    }

    // region session

    pub async fn login(&self, username: &str, password: &str) -> Result<LoginResponse, ApiError> {
        let mut headers = Vec::new();
        if let Some(csrf) = self.csrf_token() {
            headers.push((self.config.csrf_header.clone(), csrf));
        }

        let request = TransportRequest {
            method: HttpMethod::Post,
            url: self.url(LOGIN_PATH),
            headers,
            query: Vec::new(),
            body: Some(json!({ "username": username, "password": password })),
            with_credentials: true,
        };

        let response = into_result(self.transport.send(request).await?)?;
        let login: LoginResponse = response.decode()?;
        let token = login
            .access
            .clone()
            .filter(|token| !token.as_str().is_empty())
            .ok_or(ApiError::MissingAccessToken)?;

        self.session.credentials().set(token);
        info!(username, "logged in");
        Ok(login)
    }

    /// Best-effort server logout, then drop the local credential. Never fails.
    pub async fn logout(&self) {
        let token = self.session.credentials().get();
        let mut headers = Vec::new();
        if let Some(token) = &token {
            headers.push((AUTHORIZATION.to_string(), token.bearer()));
        }
        if let Some(csrf) = self.csrf_token() {
            headers.push((self.config.csrf_header.clone(), csrf));
        }

        let request = TransportRequest {
            method: HttpMethod::Post,
            url: self.url(LOGOUT_PATH),
            headers,
            query: Vec::new(),
            body: None,
            with_credentials: true,
        };

        match self.transport.send(request).await {
            Ok(response) if response.is_success() => debug!("server session closed"),
            Ok(response) => debug!(status = response.status, "logout rejected by server"),
            Err(error) => debug!(%error, "logout request failed"),
        }

        self.session.credentials().clear();
        info!("logged out");
    }

    // endregion

    // region requests

    pub async fn request(
        &self,
        method: HttpMethod,
        path: &str,
        body: Option<Value>,
        options: Option<RequestOptions>,
    ) -> Result<ApiResponse, ApiError> {
        let mut request = ApiRequest::new(method, path);
        request.body = body;
        request.options = options.unwrap_or_default();
        self.execute(request).await
    }

    /// Sends `request`; on a 401 refreshes the session once and replays it.
    pub async fn execute(&self, request: ApiRequest) -> Result<ApiResponse, ApiError> {
        let mut pending = PendingRequest::new(request);
        let mut token = self.session.credentials().get();

        loop {
            let response = self.dispatch(pending.request(), token.as_ref()).await?;
            if !response.is_unauthorized() {
                return into_result(response);
            }

            if pending.is_retried() {
                warn!(
                    method = %pending.request().method,
                    path = %pending.request().path,
                    "request rejected again after refresh"
                );
                return Err(ApiError::Unauthorized {
                    body: response.body,
                });
            }

            pending = pending.mark_retried();
            match self.renew(token.as_ref()).await? {
                Some(renewed) => token = Some(renewed),
                None => {
                    debug!(path = %pending.request().path, "session ended while request was in flight");
                    return Err(ApiError::Unauthorized {
                        body: response.body,
                    });
                }
            }
        }
    }

    async fn dispatch(
        &self,
        request: &ApiRequest,
        token: Option<&AccessToken>,
    ) -> Result<ApiResponse, ApiError> {
        let mut headers = request.options.headers.clone();
        if let Some(token) = token {
            headers.push((AUTHORIZATION.to_string(), token.bearer()));
        }
        if request.method.is_mutating() {
            if let Some(csrf) = self.csrf_token() {
                headers.push((self.config.csrf_header.clone(), csrf));
            }
        }

        let transport_request = TransportRequest {
            method: request.method,
            url: self.url(&request.path),
            headers,
            query: request.options.query.clone(),
            body: request.body.clone(),
            with_credentials: self.config.with_credentials,
        };

        debug!(method = %request.method, path = %request.path, "sending request");
        self.transport.send(transport_request).await.map_err(|error| {
            warn!(method = %request.method, path = %request.path, %error, "transport failure");
            ApiError::from(error)
        })
    }

    // endregion

    // region refresh

    /// Produces a token to replay a request that was rejected with `rejected`,
    /// or `None` when the session ended while the request was in flight.
    async fn renew(&self, rejected: Option<&AccessToken>) -> Result<Option<AccessToken>, ApiError> {
        let credentials = self.session.credentials();
        // Checked under the refresh lock, so a refresh that just settled is seen
        // together with the credential it left behind.
        let ticket = self.session.refresh().acquire_unless(|| {
            match (credentials.get(), rejected) {
                (Some(current), _) if rejected != Some(&current) => Some(Skip::Replay(current)),
                (None, Some(_)) => Some(Skip::Ended),
                _ => None,
            }
        });

        let lease = match ticket {
            Err(Skip::Replay(current)) => {
                debug!("token changed while request was in flight; replaying");
                return Ok(Some(current));
            }
            Err(Skip::Ended) => return Ok(None),
            Ok(RefreshTicket::Follower(waiter)) => {
                return Ok(Some(waiter.wait(self.config.refresh_wait).await?));
            }
            Ok(RefreshTicket::Leader(lease)) => lease,
        };

        info!("access token rejected; refreshing session");
        let outcome = self.call_refresh().await;
        // The credential is updated before the lease settles.
        match &outcome {
            Ok(token) => {
                credentials.set(token.clone());
                let released = lease.settle(&outcome);
                info!(released, "session refreshed");
            }
            Err(error) => {
                credentials.clear();
                let released = lease.settle(&outcome);
                warn!(%error, released, "session refresh failed; ending session");
                self.navigator.session_ended();
            }
        }
        Ok(Some(outcome?))
    }

    /// Plain credentialed call; bypasses header attachment and interception.
    async fn call_refresh(&self) -> Result<AccessToken, RefreshError> {
        let request = TransportRequest {
            method: HttpMethod::Post,
            url: self.url(REFRESH_PATH),
            headers: Vec::new(),
            query: Vec::new(),
            body: None,
            with_credentials: true,
        };

        let response = self
            .transport
            .send(request)
            .await
            .map_err(RefreshError::Transport)?;
        if !response.is_success() {
            return Err(RefreshError::Rejected {
                status: response.status,
            });
        }

        let body: RefreshResponse = response
            .decode()
            .map_err(|_| RefreshError::MissingAccessToken)?;
        body.access
            .filter(|token| !token.as_str().is_empty())
            .ok_or(RefreshError::MissingAccessToken)
    }

    // endregion

    fn csrf_token(&self) -> Option<String> {
        match self.cookies.cookie(&self.config.csrf_cookie) {
            Ok(value) => value.filter(|v| !v.is_empty()),
            Err(error) => {
                debug!(%error, "anti-forgery cookie unavailable");
                None
            }
        }
    }

    fn url(&self, path: &str) -> String {
        format!(
            "{}/{}",
            self.config.base_url.trim_end_matches('/'),
            path.trim_start_matches('/')
        )
    }
}

/// Reasons a 401 is answered without taking part in a refresh.
enum Skip {
    Replay(AccessToken),
    Ended,
}

fn into_result(response: ApiResponse) -> Result<ApiResponse, ApiError> {
    if response.is_success() {
        Ok(response)
    } else {
        Err(ApiError::Status {
            status: response.status,
            body: response.body,
        })
    }
}
