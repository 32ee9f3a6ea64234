use reqwest::Method;
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::sync::atomic::{AtomicBool, Ordering};
use yansi::Paint;

use super::ApiError;

static SILENT: AtomicBool = AtomicBool::new(false);

pub fn set_silent(silent: bool) {
    SILENT.store(silent, Ordering::Relaxed);
}

fn log_output(msg: String) {
    if !SILENT.load(Ordering::Relaxed) {
        println!("{}", msg);
    }
}

/// HTTP client for the KVM backend API.
#[derive(Clone, Debug)]
pub struct KvmClient {
    client: reqwest::Client,
    base_url: String,
}

impl KvmClient {
    pub fn new(base_url: impl Into<String>) -> Result<Self, ApiError> {
        let client = reqwest::Client::builder()
            .user_agent(format!("kvm-panel/{}", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| ApiError::Transport(e.to_string()))?;
        Ok(Self::with_client(client, base_url))
    }

    pub fn with_client(client: reqwest::Client, base_url: impl Into<String>) -> Self {
        Self {
            client,
            base_url: crate::config::sanitize_base_url(&base_url.into()),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Echo the request as an equivalent curl command.
    fn log_request(&self, method: &Method, url: &str, params: Option<&[(String, String)]>, body: Option<&Value>) {
        let mut url_for_log = url.to_string();
        if let Some(p) = params {
            if !p.is_empty() {
                let query_string = p
                    .iter()
                    .map(|(k, v)| format!("{}={}", k, v))
                    .collect::<Vec<String>>()
                    .join("&");
                url_for_log = format!("{}?{}", url_for_log, query_string);
            }
        }

        let mut parts = Vec::new();
        parts.push(Paint::new("curl").fg(yansi::Color::Green).bold().to_string());
        parts.push(format!("-X {}", Paint::new(method.as_str()).fg(yansi::Color::Yellow).bold()));
        parts.push(format!("'{}'", Paint::new(&url_for_log).fg(yansi::Color::Cyan)));
        if let Some(d) = body {
            parts.push(format!(
                "{} {}",
                Paint::new("-H").fg(yansi::Color::Magenta),
                Paint::new("'Content-Type: application/json'").fg(yansi::Color::Magenta)
            ));
            let json_str = serde_json::to_string_pretty(d).unwrap_or_default();
            let escaped_json = json_str.replace('\'', "'\\''");
            parts.push(format!(
                "{} {}",
                Paint::new("-d").fg(yansi::Color::Blue),
                Paint::new(format!("'{}'", escaped_json)).fg(yansi::Color::White)
            ));
        }
        log_output(format!("Request:\n{}", parts.join(" ")));
    }

    /// Send one request. Non-2xx statuses become [`ApiError::Application`]
    /// carrying the `detail` of the JSON error body.
    pub(crate) async fn send(
        &self,
        method: Method,
        endpoint: &str,
        body: Option<Value>,
        params: Option<Vec<(String, String)>>,
    ) -> Result<reqwest::Response, ApiError> {
        let url = format!("{}{}", self.base_url, endpoint);
        self.log_request(&method, &url, params.as_deref(), body.as_ref());
        tracing::info!(method = %method, endpoint, ?params, "API Request");

        let mut req = self.client.request(method, &url);
        if let Some(ref p) = params {
            req = req.query(p);
        }
        if let Some(ref b) = body {
            req = req.json(b);
        }

        let resp = req.send().await.map_err(|e| {
            tracing::warn!(%e, endpoint, "API request failed");
            ApiError::Transport(e.to_string())
        })?;

        let status = resp.status();
        tracing::info!(status = status.as_u16(), endpoint, "API Response");
        if status.is_success() {
            return Ok(resp);
        }

        let text = resp.text().await.unwrap_or_default();
        log_output(format!("Response:\n{}", Paint::new(&text).rgb(100, 100, 100)));
        Err(ApiError::Application {
            status: status.as_u16(),
            detail: extract_detail(&text),
        })
    }

    /// Send and decode a JSON body.
    pub(crate) async fn call<T: DeserializeOwned>(
        &self,
        method: Method,
        endpoint: &str,
        body: Option<Value>,
        params: Option<Vec<(String, String)>>,
    ) -> Result<T, ApiError> {
        let resp = self.send(method, endpoint, body, params).await?;
        let bytes = resp.bytes().await.map_err(|e| ApiError::Transport(e.to_string()))?;
        log_output(format!(
            "Response:\n{}",
            Paint::new(String::from_utf8_lossy(&bytes)).rgb(100, 100, 100)
        ));
        serde_json::from_slice(&bytes).map_err(|e| ApiError::Decode(e.to_string()))
    }

    /// Send and ignore whatever a successful response carries.
    pub(crate) async fn call_unit(
        &self,
        method: Method,
        endpoint: &str,
        body: Option<Value>,
        params: Option<Vec<(String, String)>>,
    ) -> Result<(), ApiError> {
        self.send(method, endpoint, body, params).await.map(|_| ())
    }
}

/// Pull the `detail` field out of an error body. Validation errors carry a
/// structured detail; those are shown as compact JSON.
fn extract_detail(body: &str) -> Option<String> {
    let value: Value = serde_json::from_str(body).ok()?;
    match value.get("detail")? {
        Value::String(s) => Some(s.clone()),
        Value::Null => None,
        other => Some(other.to_string()),
    }
}

/// Percent-encode one path segment (VM names may contain spaces).
pub(crate) fn segment(value: &str) -> String {
    urlencoding::encode(value).into_owned()
}
