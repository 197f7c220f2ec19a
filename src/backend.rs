use async_trait::async_trait;
use log::{debug, info};
use reqwest::header::COOKIE;
use reqwest::{Client, RequestBuilder, Response};
use serde_json::Value;
use std::time::Duration;

use crate::config::BackendConfig;
use crate::model::RegistrationData;
use crate::payload::MultipartPayload;
use crate::recipe_form::RecipeUpdater;
use crate::register_form::RegistrationHandler;
use crate::FormError;

/// Client for the recipe backend API
#[derive(Debug, Clone)]
pub struct BackendClient {
    client: Client,
    base_url: String,
    session_id: Option<String>,
}

impl BackendClient {
    pub fn new(config: &BackendConfig) -> Result<Self, FormError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout))
            .build()?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            session_id: None,
        })
    }

    /// Authenticate requests with the `session_id` cookie issued at login
    pub fn with_session(mut self, session_id: impl Into<String>) -> Self {
        self.session_id = Some(session_id.into());
        self
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn authorized(&self, request: RequestBuilder) -> RequestBuilder {
        match &self.session_id {
            Some(session_id) => request.header(COOKIE, format!("session_id={}", session_id)),
            None => request,
        }
    }

    /// `PATCH /api/recipes/{id}/update-with-steps` with the multipart payload
    pub async fn update_recipe(
        &self,
        id: i64,
        payload: &MultipartPayload,
    ) -> Result<(), FormError> {
        let url = format!("{}/api/recipes/{}/update-with-steps", self.base_url, id);
        debug!("Sending {} parts to {}", payload.parts().len(), url);

        let request = self
            .client
            .patch(&url)
            .multipart(reqwest::multipart::Form::from(payload));
        let response = self.authorized(request).send().await?;
        check_status(response).await?;

        info!("Recipe {} updated", id);
        Ok(())
    }

    /// `POST /api/auth/register` with the registration record as JSON
    pub async fn register(&self, data: &RegistrationData) -> Result<(), FormError> {
        let url = format!("{}/api/auth/register", self.base_url);
        let response = self.client.post(&url).json(data).send().await?;
        check_status(response).await?;

        info!("User '{}' registered", data.username);
        Ok(())
    }
}

/// Turn an error status into [`FormError::Submit`], preferring the
/// backend's `{"error": ...}` message over the raw body
async fn check_status(response: Response) -> Result<Response, FormError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let body = response.text().await?;
    let message = serde_json::from_str::<Value>(&body)
        .ok()
        .and_then(|json| json.get("error").and_then(Value::as_str).map(str::to_string))
        .unwrap_or(body);

    Err(FormError::Submit(format!("{}: {}", status, message)))
}

/// [`RecipeUpdater`] that sends the edit form to the backend
#[derive(Debug, Clone)]
pub struct HttpRecipeUpdater {
    client: BackendClient,
}

impl HttpRecipeUpdater {
    pub fn new(client: BackendClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl RecipeUpdater for HttpRecipeUpdater {
    async fn update(&self, id: Option<i64>, payload: MultipartPayload) -> Result<(), FormError> {
        let id = id.ok_or_else(|| FormError::Submit("recipe has no id".to_string()))?;
        self.client.update_recipe(id, &payload).await
    }
}

/// [`RegistrationHandler`] that posts to the backend. Switching to the
/// login form is left to `on_switch`.
pub struct HttpRegistrationHandler<F: Fn() + Send + Sync> {
    client: BackendClient,
    on_switch: F,
}

impl<F: Fn() + Send + Sync> HttpRegistrationHandler<F> {
    pub fn new(client: BackendClient, on_switch: F) -> Self {
        Self { client, on_switch }
    }
}

#[async_trait]
impl<F: Fn() + Send + Sync> RegistrationHandler for HttpRegistrationHandler<F> {
    async fn register(&self, data: RegistrationData) -> Result<(), FormError> {
        self.client.register(&data).await
    }

    fn switch_to_login(&self) {
        (self.on_switch)();
    }
}
