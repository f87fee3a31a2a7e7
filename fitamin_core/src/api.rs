//! REST client for the Fitamin backend.
//!
//! Every call resolves to an [`ApiResponse`]. Transport failures, timeouts
//! and bodies that are not JSON all collapse into the uniform
//! `{ success: false, message: "Network error" }` response. A JSON body that
//! cannot be decoded is reported as an invalid response instead, so callers
//! only ever branch on `success`.

use crate::auth::{LoginRequest, RegisterRequest};
use crate::config::ApiConfig;
use crate::profile::ProfileUpdate;
use crate::{Error, Result, UserProfile};
use reqwest::{Client, RequestBuilder};
use serde::{Deserialize, Serialize};
use std::time::Duration;

pub const NETWORK_ERROR_MESSAGE: &str = "Network error";
pub const INVALID_RESPONSE_MESSAGE: &str = "Invalid response from backend";

const REGISTER_PATH: &str = "auth/register";
const LOGIN_PATH: &str = "auth/login";
const PROFILE_PATH: &str = "user/profile";

/// Response envelope shared by all endpoints
#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq)]
pub struct ApiResponse {
    #[serde(default)]
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub token: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user: Option<UserProfile>,
}

impl ApiResponse {
    pub fn network_error() -> Self {
        Self {
            success: false,
            message: Some(NETWORK_ERROR_MESSAGE.into()),
            ..Default::default()
        }
    }

    /// Message for display, falling back to a generic one
    pub fn message_or<'a>(&'a self, fallback: &'a str) -> &'a str {
        self.message.as_deref().unwrap_or(fallback)
    }
}

/// HTTP client bound to one backend base URL
#[derive(Clone, Debug)]
pub struct ApiClient {
    http: Client,
    base_url: String,
}

impl ApiClient {
    pub fn new(config: &ApiConfig) -> Result<Self> {
        let http = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| Error::Config(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            http,
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path)
    }

    /// `POST /auth/register`
    pub async fn register(&self, request: &RegisterRequest) -> ApiResponse {
        self.send(self.http.post(self.url(REGISTER_PATH)).json(request))
            .await
    }

    /// `POST /auth/login`
    pub async fn login(&self, request: &LoginRequest) -> ApiResponse {
        self.send(self.http.post(self.url(LOGIN_PATH)).json(request))
            .await
    }

    /// `GET /user/profile`
    pub async fn get_profile(&self, token: &str) -> ApiResponse {
        self.send(self.http.get(self.url(PROFILE_PATH)).bearer_auth(token))
            .await
    }

    /// `PUT /user/profile` with only the fields set in `update`
    pub async fn update_profile(&self, token: &str, update: &ProfileUpdate) -> ApiResponse {
        self.send(
            self.http
                .put(self.url(PROFILE_PATH))
                .bearer_auth(token)
                .json(update),
        )
        .await
    }

    async fn send(&self, request: RequestBuilder) -> ApiResponse {
        match fetch(request).await {
            Ok(body) => decode_response(&body),
            Err(e) => {
                tracing::warn!("Backend request failed: {}", e);
                ApiResponse::network_error()
            }
        }
    }
}

async fn fetch(request: RequestBuilder) -> reqwest::Result<Vec<u8>> {
    let response = request.send().await?;
    let status = response.status();
    let body = response.bytes().await?;
    tracing::debug!("Backend answered {} ({} bytes)", status, body.len());
    Ok(body.to_vec())
}

/// Decode a response body.
///
/// A body that is not JSON at all counts as a network error. A JSON body
/// that does not fit the envelope (for example an unknown enum label) is
/// reported as an invalid response carrying the decode error.
pub fn decode_response(body: &[u8]) -> ApiResponse {
    let value: serde_json::Value = match serde_json::from_slice(body) {
        Ok(value) => value,
        Err(e) => {
            tracing::warn!("Backend returned a non-JSON body: {}", e);
            return ApiResponse::network_error();
        }
    };

    match serde_json::from_value::<ApiResponse>(value) {
        Ok(response) => response,
        Err(e) => {
            tracing::warn!("Backend response did not match the expected shape: {}", e);
            ApiResponse {
                success: false,
                message: Some(format!("{}: {}", INVALID_RESPONSE_MESSAGE, e)),
                ..Default::default()
            }
        }
    }
}

/// Where a displayed profile came from
#[derive(Clone, Debug, PartialEq)]
pub enum ProfileSource {
    /// Fresh from the backend
    Remote(UserProfile),
    /// Backend unavailable; last-known-good local copy
    Cached { profile: UserProfile, reason: String },
    /// Nothing to show
    Unavailable(String),
}

/// Pick the profile to show given a backend response and the cached copy
pub fn resolve_profile(response: ApiResponse, cached: Option<&UserProfile>) -> ProfileSource {
    match (response.success, response.user) {
        (true, Some(user)) => ProfileSource::Remote(user),
        (_, _) => {
            let reason = response
                .message
                .unwrap_or_else(|| "Profile unavailable".to_string());
            match cached {
                Some(profile) => {
                    tracing::info!("Using cached profile: {}", reason);
                    ProfileSource::Cached {
                        profile: profile.clone(),
                        reason,
                    }
                }
                None => ProfileSource::Unavailable(reason),
            }
        }
    }
}
