// hr-client/src/http.rs
// Authenticated HTTP client - the single outbound gateway

use std::sync::Arc;
use std::time::Duration;

use reqwest::{Client, Method, RequestBuilder, Response, StatusCode};
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;
use shared::ErrorBody;

use crate::config::ClientConfig;
use crate::navigator::Navigator;
use crate::session::SessionStore;
use crate::{ClientError, ClientResult};

/// HTTP client for the HR backend.
///
/// Every request carries `Authorization: Bearer <token>` when a credential is
/// stored. A `401` on any response clears the credential and sends the
/// navigator to the login route, once per response.
#[derive(Clone)]
pub struct ApiClient {
    client: Client,
    base_url: String,
    session: SessionStore,
    navigator: Arc<dyn Navigator>,
    login_route: String,
}

impl std::fmt::Debug for ApiClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApiClient")
            .field("base_url", &self.base_url)
            .field("login_route", &self.login_route)
            .finish_non_exhaustive()
    }
}

impl ApiClient {
    pub fn new(
        config: &ClientConfig,
        session: SessionStore,
        navigator: Arc<dyn Navigator>,
    ) -> ClientResult<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout))
            .build()?;
        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            session,
            navigator,
            login_route: config.login_route.clone(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn session(&self) -> &SessionStore {
        &self.session
    }

    pub fn navigator(&self) -> &Arc<dyn Navigator> {
        &self.navigator
    }

    pub fn login_route(&self) -> &str {
        &self.login_route
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    fn authorize(&self, req: RequestBuilder) -> RequestBuilder {
        match self.session.get() {
            Some(token) => req.bearer_auth(token),
            None => {
                tracing::warn!("No credential stored, sending request without Authorization");
                req
            }
        }
    }

    async fn execute<T: DeserializeOwned>(&self, req: RequestBuilder) -> ClientResult<T> {
        let response = self.authorize(req).send().await?;
        let status = response.status();

        if status == StatusCode::UNAUTHORIZED {
            self.handle_unauthorized();
            let message = error_message(response).await;
            return Err(ClientError::Unauthorized(Some(message).filter(|m| !m.is_empty())));
        }

        if !status.is_success() {
            let message = error_message(response).await;
            tracing::warn!(status = status.as_u16(), %message, "Request failed");
            return Err(ClientError::Api {
                status: status.as_u16(),
                message,
            });
        }

        let bytes = response.bytes().await?;
        if bytes.iter().all(u8::is_ascii_whitespace) {
            return Ok(serde_json::from_slice(b"null")?);
        }
        Ok(serde_json::from_slice(&bytes)?)
    }

    fn handle_unauthorized(&self) {
        tracing::warn!(route = %self.login_route, "Credential rejected, redirecting to login");
        if let Err(e) = self.session.clear() {
            tracing::error!(error = %e, "Failed to clear rejected credential");
        }
        self.navigator.navigate(&self.login_route);
    }

    pub async fn get<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, String)],
    ) -> ClientResult<T> {
        tracing::debug!(path, "GET");
        let req = self.client.get(self.url(path)).query(query);
        self.execute(req).await
    }

    pub async fn post<T, B>(&self, path: &str, body: &B) -> ClientResult<T>
    where
        T: DeserializeOwned,
        B: Serialize + Sync + ?Sized,
    {
        tracing::debug!(path, "POST");
        let req = self.client.post(self.url(path)).json(body);
        self.execute(req).await
    }

    pub async fn post_empty<T: DeserializeOwned>(&self, path: &str) -> ClientResult<T> {
        tracing::debug!(path, "POST");
        let req = self.client.post(self.url(path));
        self.execute(req).await
    }

    pub async fn put<T, B>(&self, path: &str, body: &B) -> ClientResult<T>
    where
        T: DeserializeOwned,
        B: Serialize + Sync + ?Sized,
    {
        tracing::debug!(path, "PUT");
        let req = self.client.put(self.url(path)).json(body);
        self.execute(req).await
    }

    pub async fn patch<T, B>(&self, path: &str, body: &B) -> ClientResult<T>
    where
        T: DeserializeOwned,
        B: Serialize + Sync + ?Sized,
    {
        tracing::debug!(path, "PATCH");
        let req = self.client.patch(self.url(path)).json(body);
        self.execute(req).await
    }

    pub async fn delete<T: DeserializeOwned>(&self, path: &str) -> ClientResult<T> {
        tracing::debug!(path, "DELETE");
        let req = self.client.delete(self.url(path));
        self.execute(req).await
    }

    /// Request with a method chosen at runtime.
    pub async fn send<T: DeserializeOwned>(
        &self,
        method: Method,
        path: &str,
        body: Option<&Value>,
    ) -> ClientResult<T> {
        tracing::debug!(%method, path, "send");
        let mut req = self.client.request(method, self.url(path));
        if let Some(body) = body {
            req = req.json(body);
        }
        self.execute(req).await
    }
}

/// Error body text: the `{ message }` field when present, the raw text otherwise.
async fn error_message(response: Response) -> String {
    let text = response.text().await.unwrap_or_default();
    serde_json::from_str::<ErrorBody>(&text)
        .map(|body| body.message)
        .unwrap_or(text)
}
