//! Typed HTTP client for the backend REST contract

use tracing::debug;
use uuid::Uuid;
use voiceiq_core::{
    Error, Result, User,
    config::{BackendConfig, UploadConfig},
    types::{
        Ack, ApiErrorBody, AuthResponse, CallDetailResponse, CallListResponse,
        CurrentUserResponse, UploadResponse,
    },
    utils::{format_file_size, validate_upload},
};

/// API client for making HTTP requests to the `VoiceIQ` backend
///
/// A held bearer token is attached to every request except signup and
/// login; with no token held, no request carries one.
#[derive(Debug, Clone)]
pub struct ApiClient {
    client: reqwest::Client,
    base_url: String,
    token: Option<String>,
}

impl ApiClient {
    /// Create a new unauthenticated API client
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: base_url.into(),
            token: None,
        }
    }

    /// Create a client from backend configuration, honoring its timeout
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying HTTP client cannot be built.
    pub fn from_config(backend: &BackendConfig) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(backend.timeout())
            .build()
            .map_err(|e| Error::Configuration {
                message: format!("failed to build HTTP client: {e}"),
            })?;

        Ok(Self {
            client,
            base_url: backend.base_url.clone(),
            token: None,
        })
    }

    /// A clone of this client that authenticates with the given token
    #[must_use]
    pub fn with_token(&self, token: impl Into<String>) -> Self {
        Self {
            client: self.client.clone(),
            base_url: self.base_url.clone(),
            token: Some(token.into()),
        }
    }

    /// Attach the held bearer token, when there is one
    fn authorize(&self, request: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        match &self.token {
            Some(token) => request.bearer_auth(token),
            None => request,
        }
    }

    /// Send a request and decode the response body
    ///
    /// Non-2xx responses surface the backend's error message verbatim when
    /// one is present, else a generic fallback naming the status.
    async fn execute<T>(request: reqwest::RequestBuilder) -> Result<T>
    where
        T: serde::de::DeserializeOwned,
    {
        let response = request
            .send()
            .await
            .map_err(|e| Error::Http(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let message = response
                .json::<ApiErrorBody>()
                .await
                .ok()
                .and_then(ApiErrorBody::into_message)
                .unwrap_or_else(|| format!("request failed with status {status}"));

            return Err(Error::Api {
                status: status.as_u16(),
                message,
            });
        }

        response
            .json::<T>()
            .await
            .map_err(|e| Error::Http(format!("failed to decode response: {e}")))
    }

    /// Create a new account
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP request fails or the backend rejects
    /// the signup.
    pub async fn signup(&self, email: &str, password: &str, name: &str) -> Result<AuthResponse> {
        let url = format!("{}/auth/signup", self.base_url);
        let body = serde_json::json!({
            "email": email,
            "password": password,
            "name": name,
        });

        Self::execute(self.client.post(&url).json(&body)).await
    }

    /// Log in with email and password
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP request fails or the credentials are
    /// rejected.
    pub async fn login(&self, email: &str, password: &str) -> Result<AuthResponse> {
        let url = format!("{}/auth/login", self.base_url);
        let body = serde_json::json!({
            "email": email,
            "password": password,
        });

        Self::execute(self.client.post(&url).json(&body)).await
    }

    /// Invalidate the current token on the backend
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP request fails.
    pub async fn logout(&self) -> Result<Ack> {
        let url = format!("{}/auth/logout", self.base_url);

        Self::execute(self.authorize(self.client.post(&url))).await
    }

    /// Fetch the user belonging to the held token
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP request fails or the token is rejected.
    pub async fn current_user(&self) -> Result<User> {
        let url = format!("{}/auth/me", self.base_url);
        let response: CurrentUserResponse =
            Self::execute(self.authorize(self.client.get(&url))).await?;

        Ok(response.user)
    }

    /// Upload a call recording as a single multipart field named `audio`
    ///
    /// The file is validated against the upload configuration before any
    /// network activity; rejected files never produce a request.
    ///
    /// # Errors
    ///
    /// Returns a validation error for disallowed extensions or oversized
    /// files, or an HTTP/backend error for a failed upload.
    pub async fn upload_call(
        &self,
        filename: &str,
        bytes: Vec<u8>,
        upload: &UploadConfig,
    ) -> Result<UploadResponse> {
        validate_upload(filename, bytes.len() as u64, upload)?;

        debug!(
            filename,
            size = %format_file_size(bytes.len() as u64),
            "uploading call recording"
        );

        let url = format!("{}/upload/call", self.base_url);
        let part = reqwest::multipart::Part::bytes(bytes).file_name(filename.to_string());
        let form = reqwest::multipart::Form::new().part("audio", part);

        Self::execute(self.authorize(self.client.post(&url)).multipart(form)).await
    }

    /// List all calls visible to the current user
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP request fails or the response cannot be
    /// parsed.
    pub async fn list_calls(&self) -> Result<CallListResponse> {
        let url = format!("{}/calls", self.base_url);

        Self::execute(self.authorize(self.client.get(&url))).await
    }

    /// Fetch one call with its scores
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP request fails or the call does not
    /// exist.
    pub async fn get_call(&self, id: Uuid) -> Result<CallDetailResponse> {
        let url = format!("{}/calls/{id}", self.base_url);

        Self::execute(self.authorize(self.client.get(&url))).await
    }

    /// Delete one call
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP request fails or the call does not
    /// exist.
    pub async fn delete_call(&self, id: Uuid) -> Result<Ack> {
        let url = format!("{}/calls/{id}", self.base_url);

        Self::execute(self.authorize(self.client.delete(&url))).await
    }
}
