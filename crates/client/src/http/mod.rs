//! Authenticated API client.
//!
//! Single chokepoint for all Souq REST API traffic. Identity rides in an
//! HttpOnly session cookie managed by the cookie jar; the client never
//! reads or writes it. A separate readable CSRF cookie is echoed back as
//! the `x-csrf-token` header on mutating verbs.
//!
//! # 401 handling
//!
//! On the first `401 Unauthorized` for a request, the client performs
//! exactly one silent call to the token-refresh endpoint and, if that
//! succeeds, retries the original request once with the retry disabled.
//! A failed refresh, or a 401 on the retry, is terminal: the configured
//! [`SessionExpiredHandler`] is invoked with the login URL (carrying a
//! `reason=session_expired` marker) and the caller receives
//! [`ApiError::SessionExpired`] so in-flight state can unwind.

use std::sync::Arc;

use reqwest::cookie::{CookieStore, Jar};
use reqwest::{Method, StatusCode, multipart};
use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::instrument;
use url::Url;

use souq_core::ApiErrorBody;

use crate::config::ClientConfig;
use crate::error::ApiError;

/// Header carrying the echoed CSRF token.
const CSRF_HEADER: &str = "x-csrf-token";
/// Query marker appended to the login URL on terminal auth failure.
const SESSION_EXPIRED_QUERY: &str = "reason=session_expired";

// =============================================================================
// Session-expired policy
// =============================================================================

/// Side-effecting policy invoked on terminal auth failure.
///
/// In a browser-embedded frontend this navigates to the login page; the
/// default implementation only records the redirect target, and tests
/// substitute a capturing handler.
pub trait SessionExpiredHandler: Send + Sync {
    /// Called once per terminal auth failure with the login URL to visit.
    fn session_expired(&self, login_url: &Url);
}

/// Default handler: log the redirect target and do nothing else.
#[derive(Debug, Clone, Copy, Default)]
pub struct LogRedirect;

impl SessionExpiredHandler for LogRedirect {
    fn session_expired(&self, login_url: &Url) {
        tracing::warn!(%login_url, "session expired; redirect to login");
    }
}

// =============================================================================
// Request bodies
// =============================================================================

/// One part of a multipart upload.
///
/// Parts are kept as owned data (not a built `Form`) so the request can be
/// rebuilt if the 401 refresh-and-retry path needs a second attempt.
#[derive(Debug, Clone)]
pub struct FormPart {
    name: String,
    kind: FormPartKind,
}

#[derive(Debug, Clone)]
enum FormPartKind {
    Text(String),
    File {
        file_name: String,
        content_type: Option<String>,
        bytes: Vec<u8>,
    },
}

impl FormPart {
    /// A plain text field.
    #[must_use]
    pub fn text(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            kind: FormPartKind::Text(value.into()),
        }
    }

    /// A file field.
    #[must_use]
    pub fn file(
        name: impl Into<String>,
        file_name: impl Into<String>,
        content_type: Option<&str>,
        bytes: Vec<u8>,
    ) -> Self {
        Self {
            name: name.into(),
            kind: FormPartKind::File {
                file_name: file_name.into(),
                content_type: content_type.map(ToOwned::to_owned),
                bytes,
            },
        }
    }
}

/// Body attached to a request attempt.
enum Payload {
    Json(serde_json::Value),
    Multipart(Vec<FormPart>),
}

// =============================================================================
// ApiClient
// =============================================================================

/// Authenticated API client for the Souq REST API.
///
/// Cheap to clone; all clones share one cookie jar and connection pool.
#[derive(Clone)]
pub struct ApiClient {
    inner: Arc<ApiClientInner>,
}

struct ApiClientInner {
    http: reqwest::Client,
    jar: Arc<Jar>,
    base_url: Url,
    refresh_path: String,
    login_path: String,
    csrf_cookie: String,
    on_session_expired: Box<dyn SessionExpiredHandler>,
}

impl ApiClient {
    /// Create a client with the default (logging) session-expired handler.
    ///
    /// # Panics
    ///
    /// Panics if the HTTP client cannot be created. This should never happen
    /// under normal circumstances as we use standard TLS configuration.
    #[must_use]
    pub fn new(config: &ClientConfig) -> Self {
        Self::with_handler(config, Box::new(LogRedirect))
    }

    /// Create a client with a custom session-expired handler.
    ///
    /// # Panics
    ///
    /// Panics if the HTTP client cannot be created.
    #[must_use]
    pub fn with_handler(config: &ClientConfig, handler: Box<dyn SessionExpiredHandler>) -> Self {
        let jar = Arc::new(Jar::default());
        let http = reqwest::Client::builder()
            .cookie_provider(Arc::clone(&jar))
            .timeout(config.timeout)
            .build()
            .expect("Failed to create HTTP client");

        Self {
            inner: Arc::new(ApiClientInner {
                http,
                jar,
                base_url: config.base_url.clone(),
                refresh_path: config.refresh_path.clone(),
                login_path: config.login_path.clone(),
                csrf_cookie: config.csrf_cookie.clone(),
                on_session_expired: handler,
            }),
        }
    }

    /// Base URL this client talks to.
    #[must_use]
    pub fn base_url(&self) -> &Url {
        &self.inner.base_url
    }

    // =========================================================================
    // HTTP verbs
    // =========================================================================

    /// `GET` an endpoint and deserialize the JSON response.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] on network, HTTP, auth, or parse failure.
    pub async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        self.request(Method::GET, path, None).await
    }

    /// `POST` an optional JSON body to an endpoint.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] on network, HTTP, auth, or parse failure.
    pub async fn post<T, B>(&self, path: &str, body: Option<&B>) -> Result<T, ApiError>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        let payload = body.map(serde_json::to_value).transpose()?.map(Payload::Json);
        self.request(Method::POST, path, payload).await
    }

    /// `PUT` an optional JSON body to an endpoint.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] on network, HTTP, auth, or parse failure.
    pub async fn put<T, B>(&self, path: &str, body: Option<&B>) -> Result<T, ApiError>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        let payload = body.map(serde_json::to_value).transpose()?.map(Payload::Json);
        self.request(Method::PUT, path, payload).await
    }

    /// `DELETE` an endpoint.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] on network, HTTP, auth, or parse failure.
    pub async fn delete<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        self.request(Method::DELETE, path, None).await
    }

    /// `POST` a multipart upload.
    ///
    /// The content type is left to the HTTP layer so the multipart boundary
    /// is encoded correctly; callers must not set one themselves.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] on network, HTTP, auth, or parse failure.
    pub async fn post_multipart<T: DeserializeOwned>(
        &self,
        path: &str,
        parts: Vec<FormPart>,
    ) -> Result<T, ApiError> {
        self.request(Method::POST, path, Some(Payload::Multipart(parts)))
            .await
    }

    /// `PUT` a multipart upload.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] on network, HTTP, auth, or parse failure.
    pub async fn put_multipart<T: DeserializeOwned>(
        &self,
        path: &str,
        parts: Vec<FormPart>,
    ) -> Result<T, ApiError> {
        self.request(Method::PUT, path, Some(Payload::Multipart(parts)))
            .await
    }

    // =========================================================================
    // Request pipeline
    // =========================================================================

    /// Execute a request with the single refresh-and-retry 401 protocol.
    #[instrument(skip(self, payload), fields(method = %method, path = %path))]
    async fn request<T: DeserializeOwned>(
        &self,
        method: Method,
        path: &str,
        payload: Option<Payload>,
    ) -> Result<T, ApiError> {
        // Mirrors the retry flag of the pipeline: true on the first attempt,
        // false on the single post-refresh retry.
        let mut retry = true;

        loop {
            let response = self.attempt(&method, path, payload.as_ref()).await?;
            let status = response.status();

            if status == StatusCode::UNAUTHORIZED {
                if retry && self.refresh_session().await {
                    tracing::debug!("session refreshed; retrying request once");
                    retry = false;
                    continue;
                }
                return Err(self.expire_session());
            }

            if !status.is_success() {
                let body = response.text().await.unwrap_or_default();
                return Err(shape_error(status, &body));
            }

            let body = response.text().await?;
            // Some endpoints respond with an empty body (e.g., deletes);
            // treat that as JSON null so unit-shaped targets still parse.
            let body = if body.is_empty() { "null" } else { body.as_str() };
            return serde_json::from_str(body).map_err(ApiError::Parse);
        }
    }

    /// Build and send one attempt of a request.
    async fn attempt(
        &self,
        method: &Method,
        path: &str,
        payload: Option<&Payload>,
    ) -> Result<reqwest::Response, reqwest::Error> {
        let url = self.endpoint(path);
        let mut request = self.inner.http.request(method.clone(), url);

        // Echo the CSRF cookie on state-changing verbs; absence is fine,
        // enforcement is the server's job.
        if is_mutating(method)
            && let Some(token) = self.csrf_token()
        {
            request = request.header(CSRF_HEADER, token);
        }

        request = match payload {
            Some(Payload::Json(value)) => request.json(value),
            Some(Payload::Multipart(parts)) => request.multipart(build_form(parts)),
            None => request,
        };

        request.send().await
    }

    /// One silent call to the refresh endpoint; true on 2xx.
    async fn refresh_session(&self) -> bool {
        let url = self.endpoint(&self.inner.refresh_path);

        match self.inner.http.post(url).send().await {
            Ok(response) => {
                let ok = response.status().is_success();
                if !ok {
                    tracing::debug!(status = %response.status(), "token refresh rejected");
                }
                ok
            }
            Err(e) => {
                tracing::debug!(error = %e, "token refresh request failed");
                false
            }
        }
    }

    /// Invoke the session-expired policy and produce the terminal error.
    fn expire_session(&self) -> ApiError {
        let login_url = self.login_redirect_url();
        tracing::warn!(%login_url, "unauthorized after refresh-and-retry");
        self.inner.on_session_expired.session_expired(&login_url);
        ApiError::SessionExpired
    }

    /// Login URL carrying the session-expired marker.
    fn login_redirect_url(&self) -> Url {
        let mut url = self.inner.base_url.clone();
        url.set_path(&self.inner.login_path);
        url.set_query(Some(SESSION_EXPIRED_QUERY));
        url
    }

    /// Join an endpoint path onto the base URL.
    ///
    /// Plain string concatenation, not `Url::join`: the base may carry a
    /// path prefix (e.g., `/api`) that absolute-path joining would drop.
    fn endpoint(&self, path: &str) -> String {
        format!(
            "{}{path}",
            self.inner.base_url.as_str().trim_end_matches('/')
        )
    }

    /// Read the CSRF token from the readable cookie, if present.
    fn csrf_token(&self) -> Option<String> {
        let header = self.inner.jar.cookies(&self.inner.base_url)?;
        cookie_value(header.to_str().ok()?, &self.inner.csrf_cookie)
    }
}

// =============================================================================
// Helpers
// =============================================================================

/// Whether a verb requires the CSRF header.
fn is_mutating(method: &Method) -> bool {
    matches!(
        *method,
        Method::POST | Method::PUT | Method::PATCH | Method::DELETE
    )
}

/// Extract a named cookie value from a `Cookie:` header string.
fn cookie_value(header: &str, name: &str) -> Option<String> {
    header.split("; ").find_map(|pair| {
        let (key, value) = pair.split_once('=')?;
        (key == name).then(|| value.to_owned())
    })
}

/// Shape a non-2xx response into an [`ApiError`].
///
/// A structured `{error: {message, details}}` body becomes a combined
/// human-readable message; anything else degrades to `HTTP <status>`.
fn shape_error(status: StatusCode, body: &str) -> ApiError {
    serde_json::from_str::<ApiErrorBody>(body).map_or(ApiError::Http(status), |parsed| {
        ApiError::Api {
            status,
            message: parsed.combined_message(),
        }
    })
}

/// Build a multipart form from owned parts.
fn build_form(parts: &[FormPart]) -> multipart::Form {
    let mut form = multipart::Form::new();

    for part in parts {
        form = match &part.kind {
            FormPartKind::Text(value) => form.text(part.name.clone(), value.clone()),
            FormPartKind::File {
                file_name,
                content_type,
                bytes,
            } => {
                let mut file = multipart::Part::bytes(bytes.clone()).file_name(file_name.clone());
                if let Some(ct) = content_type
                    && let Ok(typed) = multipart::Part::bytes(bytes.clone())
                        .file_name(file_name.clone())
                        .mime_str(ct)
                {
                    file = typed;
                }
                form.part(part.name.clone(), file)
            }
        };
    }

    form
}
