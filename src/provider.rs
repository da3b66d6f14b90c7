use crate::errors::*;
use crate::static_values::{DEFAULT_NODE_URL, DEFAULT_TIMEOUT_SECS};
use async_trait::async_trait;
use error_stack::{IntoReport, Report, Result, ResultExt};
use log::{debug, trace};
use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashMap;
use std::time::Duration;
use url::Url;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HttpMethod {
    Get,
    Post,
}

/// Transport to a full node. Implementations return the decoded JSON body
/// of a completed round trip and leave interpretation of it to the caller.
#[async_trait]
pub trait NodeRequest: Send + Sync {
    async fn request(
        &self,
        path: &str,
        payload: Value,
        method: HttpMethod,
    ) -> Result<Value, ProviderError>;
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct NodeConfig {
    pub url: String,
    pub timeout_secs: u64,
    pub headers: HashMap<String, String>,
}

impl Default for NodeConfig {
    fn default() -> Self {
        NodeConfig {
            url: DEFAULT_NODE_URL.to_string(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            headers: HashMap::new(),
        }
    }
}

impl NodeConfig {
    pub fn new(url: impl Into<String>) -> Self {
        NodeConfig {
            url: url.into(),
            ..Default::default()
        }
    }

    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.insert(name.into(), value.into());
        self
    }
}

#[derive(Debug, Clone)]
pub struct HttpProvider {
    client: reqwest::Client,
    base: Url,
}

impl HttpProvider {
    pub fn new(config: &NodeConfig) -> Result<HttpProvider, ProviderError> {
        // joining relative paths keeps the last segment only with a trailing slash
        let mut base = config.url.clone();
        if !base.ends_with('/') {
            base.push('/');
        }
        let base = Url::parse(&base)
            .into_report()
            .attach_printable_lazy(|| format!("url: {}", config.url))
            .change_context(ProviderError::Http(HttpErrorKind::Url))?;

        let mut headers = HeaderMap::new();
        for (name, value) in config.headers.iter() {
            let name = HeaderName::from_bytes(name.as_bytes())
                .into_report()
                .attach_printable_lazy(|| format!("header: {}", name))
                .change_context(ProviderError::Http(HttpErrorKind::Config))?;
            let value = HeaderValue::from_str(value)
                .into_report()
                .change_context(ProviderError::Http(HttpErrorKind::Config))?;
            headers.insert(name, value);
        }

        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .default_headers(headers)
            .build()
            .into_report()
            .change_context(ProviderError::Http(HttpErrorKind::Config))?;

        Ok(HttpProvider { client, base })
    }

    pub fn from_url(url: &str) -> Result<HttpProvider, ProviderError> {
        HttpProvider::new(&NodeConfig::new(url))
    }

    pub fn url(&self) -> &Url {
        &self.base
    }
}

#[async_trait]
impl NodeRequest for HttpProvider {
    async fn request(
        &self,
        path: &str,
        payload: Value,
        method: HttpMethod,
    ) -> Result<Value, ProviderError> {
        let url = self
            .base
            .join(path.trim_start_matches('/'))
            .into_report()
            .attach_printable_lazy(|| format!("path: {}", path))
            .change_context(ProviderError::Http(HttpErrorKind::Url))?;

        debug!("{:?} {}", method, url);
        trace!("payload: {}", payload);

        let request = match method {
            HttpMethod::Get => self.client.get(url),
            HttpMethod::Post => self.client.post(url).json(&payload),
        };

        let response = request
            .send()
            .await
            .into_report()
            .change_context(ProviderError::Http(HttpErrorKind::Send))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(Report::new(ProviderError::Http(HttpErrorKind::Status))
                .attach_printable(format!("status {}: {}", status, body)));
        }

        response
            .json::<Value>()
            .await
            .into_report()
            .change_context(ProviderError::Http(HttpErrorKind::Decode))
    }
}
