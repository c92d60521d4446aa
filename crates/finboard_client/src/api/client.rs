use std::sync::Arc;

use async_trait::async_trait;
use finboard_core::domain::{Account, Budget, NewTransaction, Transaction, User};
use finboard_core::Config;
use log::{info, warn};
use reqwest::header::HeaderMap;
use reqwest::{Client, Proxy};
use reqwest_middleware::{ClientBuilder, ClientWithMiddleware};
use reqwest_retry::{policies::ExponentialBackoff, RetryTransientMiddleware};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use uuid::Uuid;

use crate::error::{classify, ApiFailure};
use crate::navigation::Navigator;
use crate::notify::Notifier;
use crate::pipeline::Pipeline;
use crate::session::{IdentityFetch, SessionStore};

use super::envelope::{Envelope, ErrorBody, Paginated};
use super::request::ApiRequest;

const DEFAULT_API_BASE: &str = "https://api.finboard.app/v1";

/// HTTP client for the finboard API. Every call runs through both pipeline
/// stages: credentials attached on the way out, failures classified on the
/// way back in.
pub struct ApiClient {
    http: Arc<ClientWithMiddleware>,
    base_url: String,
    session: Arc<SessionStore>,
    pipeline: Pipeline,
}

impl ApiClient {
    pub fn new(
        config: &Config,
        session: Arc<SessionStore>,
        notifier: Arc<dyn Notifier>,
        navigator: Arc<dyn Navigator>,
    ) -> Self {
        let client = Self::build_http_client(config).expect("finboard api client");
        let retry_client = Self::build_retry_client(client);
        let base_url = config
            .api_base
            .clone()
            .unwrap_or_else(|| DEFAULT_API_BASE.to_string());
        let pipeline = Pipeline::standard(Arc::clone(&session), navigator, notifier);

        ApiClient {
            http: Arc::new(retry_client),
            base_url,
            session,
            pipeline,
        }
    }

    fn build_http_client(config: &Config) -> Result<Client, reqwest::Error> {
        let mut builder = Client::builder().default_headers(Self::default_headers());
        if !config.http_proxy.is_empty() {
            builder = builder.proxy(Proxy::http(&config.http_proxy)?);
        }
        if !config.https_proxy.is_empty() {
            builder = builder.proxy(Proxy::https(&config.https_proxy)?);
        }
        builder.build()
    }

    fn build_retry_client(client: Client) -> ClientWithMiddleware {
        // Transient faults (5xx, connect) retry with exponential backoff;
        // 401/403/422 are not transient and reach classification exactly once.
        let retry_policy = ExponentialBackoff::builder().build_with_max_retries(3);
        ClientBuilder::new(client)
            .with(RetryTransientMiddleware::new_with_policy(retry_policy))
            .build()
    }

    fn default_headers() -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert("accept", "application/json".parse().unwrap());
        headers.insert("user-agent", "finboard-dashboard/0.1.0".parse().unwrap());
        headers
    }

    pub fn session(&self) -> Arc<SessionStore> {
        Arc::clone(&self.session)
    }

    /// Run the session bootstrap using this client as the revalidation
    /// transport. Call once at startup.
    pub async fn bootstrap(&self) {
        self.session.initialize_auth(self).await;
    }

    async fn dispatch(&self, request: ApiRequest) -> Result<reqwest::Response, ApiFailure> {
        let ApiRequest {
            method,
            path,
            query,
            body,
            headers: caller_headers,
        } = request;
        let url = format!("{}{}", self.base_url, path);

        let mut headers = caller_headers;
        self.pipeline.prepare(&mut headers, &self.session.snapshot());

        let mut builder = self.http.request(method.clone(), url.as_str()).headers(headers);
        if !query.is_empty() {
            builder = builder.query(&query);
        }
        if let Some(body) = &body {
            builder = builder.json(body);
        }

        info!("Sending {method} request to {url}");
        let response = match builder.send().await {
            Ok(response) => response,
            Err(err) => {
                let failure = ApiFailure::from(err);
                self.pipeline.resolve(&failure);
                return Err(failure);
            }
        };

        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let body = match response.bytes().await {
            Ok(bytes) => serde_json::from_slice::<ErrorBody>(&bytes).unwrap_or_default(),
            Err(_) => ErrorBody::default(),
        };
        let failure = classify(status, body);
        warn!("Request to {url} failed: {failure}");
        self.pipeline.resolve(&failure);
        Err(failure)
    }

    /// Run a call through both pipeline stages and unwrap the success
    /// envelope's payload.
    pub async fn request<T: DeserializeOwned>(&self, request: ApiRequest) -> Result<T, ApiFailure> {
        let response = self.dispatch(request).await?;
        let envelope = response
            .json::<Envelope<T>>()
            .await
            .map_err(ApiFailure::from)?;
        Ok(envelope.data)
    }

    /// Identical pipeline, but the whole list envelope comes back so callers
    /// get the page metadata.
    pub async fn request_paginated<T: DeserializeOwned>(
        &self,
        request: ApiRequest,
    ) -> Result<Paginated<T>, ApiFailure> {
        let response = self.dispatch(request).await?;
        response
            .json::<Paginated<T>>()
            .await
            .map_err(ApiFailure::from)
    }
}

#[derive(Debug, Deserialize)]
struct LoginPayload {
    user: User,
    token: String,
}

// Typed surface consumed by the dashboard views.
impl ApiClient {
    /// Exchange credentials for a session. Commits the session store on
    /// success; the returned identity is for immediate display.
    pub async fn login(&self, email: &str, password: &str) -> Result<User, ApiFailure> {
        let body = serde_json::json!({ "email": email, "password": password });
        let payload: LoginPayload = self
            .request(ApiRequest::post("/auth/login").json(body))
            .await?;
        self.session
            .set_user(payload.user.clone(), payload.token);
        Ok(payload.user)
    }

    pub async fn current_user(&self) -> Result<User, ApiFailure> {
        self.request(ApiRequest::get("/auth/me")).await
    }

    pub async fn accounts(&self) -> Result<Vec<Account>, ApiFailure> {
        self.request(ApiRequest::get("/accounts")).await
    }

    pub async fn account(&self, id: Uuid) -> Result<Account, ApiFailure> {
        self.request(ApiRequest::get(format!("/accounts/{id}"))).await
    }

    pub async fn transactions(
        &self,
        page: u32,
        limit: u32,
    ) -> Result<Paginated<Transaction>, ApiFailure> {
        self.request_paginated(
            ApiRequest::get("/transactions")
                .query("page", page)
                .query("limit", limit),
        )
        .await
    }

    pub async fn create_transaction(
        &self,
        new: &NewTransaction,
    ) -> Result<Transaction, ApiFailure> {
        self.request(ApiRequest::post("/transactions").json(serde_json::json!(new)))
            .await
    }

    pub async fn budgets(&self, month: &str) -> Result<Vec<Budget>, ApiFailure> {
        self.request(ApiRequest::get("/budgets").query("month", month))
            .await
    }
}

#[async_trait]
impl IdentityFetch for ApiClient {
    async fn current_identity(&self) -> Result<User, ApiFailure> {
        self.current_user().await
    }
}
