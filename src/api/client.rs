use std::sync::Arc;

use reqwest::{RequestBuilder, Response};
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::debug;

use crate::config::ClientConfig;
use crate::error::{ApiError, ApiResult};
use crate::session::SessionStore;

/// HTTP front door for every backend call. Owns the one `reqwest::Client`
/// for the process and attaches `Authorization: Bearer <token>` whenever the
/// session store holds a token. No retries, no caching, no timeouts beyond
/// the transport defaults.
#[derive(Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base: String,
    session: Arc<SessionStore>,
}

impl ApiClient {
    pub fn new(config: &ClientConfig, session: Arc<SessionStore>) -> ApiResult<Self> {
        let http = reqwest::Client::builder()
            .build()
            .map_err(|e| ApiError::network(e.to_string()))?;
        Ok(Self { http, base: config.api_base(), session })
    }

    pub fn session(&self) -> &Arc<SessionStore> { &self.session }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base, path.trim_start_matches('/'))
    }

    fn bearer(&self, rb: RequestBuilder) -> RequestBuilder {
        match self.session.token() {
            Some(token) => rb.bearer_auth(token),
            None => rb,
        }
    }

    async fn execute<T: DeserializeOwned>(&self, path: &str, rb: RequestBuilder) -> ApiResult<T> {
        debug!(target: "hexabid::api", "request {}", path);
        let resp = rb.send().await?;
        Self::decode(resp).await
    }

    async fn decode<T: DeserializeOwned>(resp: Response) -> ApiResult<T> {
        let status = resp.status();
        if !status.is_success() {
            // FastAPI-style errors carry {"detail": ...}; fall back to raw text.
            let body = resp.text().await.unwrap_or_default();
            let detail = serde_json::from_str::<serde_json::Value>(&body)
                .ok()
                .and_then(|v| v.get("detail").map(|d| match d {
                    serde_json::Value::String(s) => s.clone(),
                    other => other.to_string(),
                }))
                .unwrap_or(body);
            return Err(ApiError::status(status.as_u16(), detail));
        }
        Ok(resp.json::<T>().await?)
    }

    // ---- Session-authenticated calls (the default for every page) ----

    pub async fn get_json<T: DeserializeOwned>(&self, path: &str) -> ApiResult<T> {
        let rb = self.bearer(self.http.get(self.url(path)));
        self.execute(path, rb).await
    }

    pub async fn get_json_query<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, String)],
    ) -> ApiResult<T> {
        let rb = self.bearer(self.http.get(self.url(path)).query(query));
        self.execute(path, rb).await
    }

    pub async fn post_json<T: DeserializeOwned, B: Serialize + ?Sized>(
        &self,
        path: &str,
        body: &B,
    ) -> ApiResult<T> {
        let rb = self.bearer(self.http.post(self.url(path)).json(body));
        self.execute(path, rb).await
    }

    /// POST with no request body (analysis triggers, import, mark-read).
    pub async fn post_empty<T: DeserializeOwned>(&self, path: &str) -> ApiResult<T> {
        let rb = self.bearer(self.http.post(self.url(path)));
        self.execute(path, rb).await
    }

    pub async fn put_empty<T: DeserializeOwned>(&self, path: &str) -> ApiResult<T> {
        let rb = self.bearer(self.http.put(self.url(path)));
        self.execute(path, rb).await
    }

    // ---- Calls made outside an established session ----

    /// GET with an explicitly supplied bearer token; used by session restore
    /// before the store has committed the token.
    pub async fn get_json_with_token<T: DeserializeOwned>(
        &self,
        path: &str,
        token: &str,
    ) -> ApiResult<T> {
        let rb = self.http.get(self.url(path)).bearer_auth(token);
        self.execute(path, rb).await
    }

    /// POST without any credential (login, registration).
    pub async fn post_json_public<T: DeserializeOwned, B: Serialize + ?Sized>(
        &self,
        path: &str,
        body: &B,
    ) -> ApiResult<T> {
        let rb = self.http.post(self.url(path)).json(body);
        self.execute(path, rb).await
    }

    /// POST without credential or body, parameters on the query string
    /// (the public EMD calculator convenience endpoint).
    pub async fn post_query_public<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, String)],
    ) -> ApiResult<T> {
        let rb = self.http.post(self.url(path)).query(query);
        self.execute(path, rb).await
    }
}
