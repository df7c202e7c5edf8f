//! HTTP client for the Stockholm Direkt API

use std::time::Duration;

use presentation_http::ErrorResponse;
use reqwest::{Client, RequestBuilder, StatusCode};
use serde_json::{Value, json};
use thiserror::Error;
use tracing::debug;

/// Errors returned by [`ApiClient`]
#[derive(Debug, Error)]
pub enum CliError {
    #[error("Request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// The server answered with an error body
    #[error("{message} (HTTP {status})")]
    Api {
        status: u16,
        message: String,
        suggestions: Vec<String>,
    },
}

/// Client for the server's JSON API
#[derive(Debug, Clone)]
pub struct ApiClient {
    http: Client,
    base_url: String,
}

impl ApiClient {
    /// Create a client for the server at `base_url`
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be built.
    pub fn new(base_url: &str) -> Result<Self, CliError> {
        let http = Client::builder()
            .timeout(Duration::from_secs(30))
            .user_agent(concat!("direkt-cli/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }

    /// Send and decode; `204 No Content` yields `Value::Null`
    async fn execute(&self, request: RequestBuilder) -> Result<Value, CliError> {
        let response = request.send().await?;
        let status = response.status();
        debug!(%status, "Response received");

        if status == StatusCode::NO_CONTENT {
            return Ok(Value::Null);
        }

        if status.is_success() {
            return Ok(response.json().await?);
        }

        let text = response.text().await.unwrap_or_default();
        let (message, suggestions) = match serde_json::from_str::<ErrorResponse>(&text) {
            Ok(body) => (body.error, body.suggestions.unwrap_or_default()),
            Err(_) => (text, Vec::new()),
        };

        Err(CliError::Api {
            status: status.as_u16(),
            message,
            suggestions,
        })
    }

    /// `GET /ready`, returning the body for any status
    ///
    /// # Errors
    ///
    /// Returns an error if the server cannot be reached.
    pub async fn status(&self) -> Result<Value, CliError> {
        let response = self.http.get(self.url("/ready")).send().await?;
        Ok(response.json().await?)
    }

    /// `GET /api/stops/search`
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the server reports one.
    pub async fn search(&self, query: &str) -> Result<Value, CliError> {
        self.execute(
            self.http
                .get(self.url("/api/stops/search"))
                .query(&[("q", query)]),
        )
        .await
    }

    /// `GET /api/stops/nearby`
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the server reports one.
    pub async fn nearby(
        &self,
        latitude: f64,
        longitude: f64,
        radius: Option<u32>,
    ) -> Result<Value, CliError> {
        let mut params = vec![
            ("lat", latitude.to_string()),
            ("lon", longitude.to_string()),
        ];
        if let Some(radius) = radius {
            params.push(("radius", radius.to_string()));
        }

        self.execute(self.http.get(self.url("/api/stops/nearby")).query(&params))
            .await
    }

    /// `GET /api/stops/resolve`
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the server reports one.
    pub async fn resolve(&self, name: &str) -> Result<Value, CliError> {
        self.execute(
            self.http
                .get(self.url("/api/stops/resolve"))
                .query(&[("name", name)]),
        )
        .await
    }

    /// `GET /api/trips`
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the server reports one.
    pub async fn trips(
        &self,
        destination: &str,
        latitude: f64,
        longitude: f64,
    ) -> Result<Value, CliError> {
        let params = [
            ("destination", destination.to_string()),
            ("lat", latitude.to_string()),
            ("lon", longitude.to_string()),
        ];
        self.execute(self.http.get(self.url("/api/trips")).query(&params))
            .await
    }

    /// `POST /api/contact`
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the server reports one.
    pub async fn contact(&self, name: &str, email: &str, message: &str) -> Result<Value, CliError> {
        self.execute(
            self.http
                .post(self.url("/api/contact"))
                .json(&json!({ "name": name, "email": email, "message": message })),
        )
        .await
    }
}
