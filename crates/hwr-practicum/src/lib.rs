//! Practicum adapter (homework review statuses).
//!
//! Implements the `hwr-core` ReviewApi port over the `homework_statuses`
//! endpoint.

use async_trait::async_trait;
use reqwest::{header::AUTHORIZATION, StatusCode};
use tracing::{debug, error};

use hwr_core::{config::Config, errors::Error, ports::ReviewApi, Result};

#[derive(Clone)]
pub struct PracticumClient {
    endpoint: String,
    token: String,
    http: reqwest::Client,
}

impl PracticumClient {
    pub fn new(cfg: &Config) -> Result<Self> {
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = cfg.request_timeout {
            builder = builder.timeout(timeout);
        }
        let http = builder
            .build()
            .map_err(|e| Error::Config(format!("не удалось создать HTTP-клиент: {e}")))?;

        Ok(Self {
            endpoint: cfg.endpoint.clone(),
            token: cfg.practicum_token.clone(),
            http,
        })
    }

    fn fail(err: Error) -> Error {
        error!("{err}");
        err
    }
}

impl std::fmt::Debug for PracticumClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PracticumClient")
            .field("endpoint", &self.endpoint)
            .field("token", &"<redacted>")
            .finish_non_exhaustive()
    }
}

#[async_trait]
impl ReviewApi for PracticumClient {
    async fn get_api_answer(&self, from_date: i64) -> Result<serde_json::Value> {
        debug!("Запрос статусов домашних работ from_date={from_date}");

        let resp = self
            .http
            .get(&self.endpoint)
            .header(AUTHORIZATION, format!("OAuth {}", self.token))
            .query(&[("from_date", from_date)])
            .send()
            .await
            .map_err(|e| Self::fail(Error::Transport(e.to_string())))?;

        match resp.status() {
            StatusCode::OK => {}
            StatusCode::SERVICE_UNAVAILABLE => return Err(Self::fail(Error::ServiceUnavailable)),
            other => return Err(Self::fail(Error::UnexpectedStatus(other.as_u16()))),
        }

        let body = resp
            .bytes()
            .await
            .map_err(|e| Self::fail(Error::Transport(e.to_string())))?;

        serde_json::from_slice(&body).map_err(|e| Self::fail(Error::Decode(e)))
    }
}
