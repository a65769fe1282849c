use async_trait::async_trait;
use reqwest::{
    Client,
    header::{HeaderMap, HeaderName, HeaderValue},
    redirect::Policy,
};
use serde::{Deserialize, Serialize};
use std::{collections::BTreeMap, fmt::Debug, sync::Arc, time::Duration};

use crate::error::DarkSkyError;

pub const DEFAULT_BASE_URL: &str = "https://api.darksky.net";
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(8);
pub const USER_AGENT: &str = concat!("darksky-rs/", env!("CARGO_PKG_VERSION"));

/// Caller-supplied transport settings. Anything left unset falls back to the
/// defaults in [`TransportOptions::resolve`].
///
/// Example TOML:
/// [transport]
/// timeout_secs = 3.0
/// [transport.headers]
/// X-Trace = "abc"
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TransportOptions {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub base_url: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub timeout_secs: Option<f64>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub follow_redirects: Option<bool>,

    /// Extra headers; a name matching a default header (case-insensitively)
    /// replaces it.
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub headers: BTreeMap<String, String>,
}

/// Transport settings after merging with the defaults.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedTransportOptions {
    pub base_url: String,
    pub timeout: Duration,
    pub follow_redirects: bool,
    /// Keyed by lower-cased header name.
    pub headers: BTreeMap<String, String>,
}

impl TransportOptions {
    pub fn is_empty(&self) -> bool {
        self == &Self::default()
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = Some(base_url.into());
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout_secs = Some(timeout.as_secs_f64());
        self
    }

    pub fn with_follow_redirects(mut self, follow: bool) -> Self {
        self.follow_redirects = Some(follow);
        self
    }

    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.insert(name.into(), value.into());
        self
    }

    /// Merge these options over the defaults, caller values winning.
    pub fn resolve(&self) -> Result<ResolvedTransportOptions, DarkSkyError> {
        let timeout = match self.timeout_secs {
            Some(secs) => Duration::try_from_secs_f64(secs).map_err(|e| {
                DarkSkyError::InvalidConfiguration(format!("timeout_secs = {secs}: {e}"))
            })?,
            None => DEFAULT_TIMEOUT,
        };

        let mut headers = BTreeMap::from([
            ("accept".to_string(), "application/json".to_string()),
            ("user-agent".to_string(), USER_AGENT.to_string()),
        ]);
        for (name, value) in &self.headers {
            headers.insert(name.to_ascii_lowercase(), value.clone());
        }

        Ok(ResolvedTransportOptions {
            base_url: self.base_url.clone().unwrap_or_else(|| DEFAULT_BASE_URL.to_string()),
            timeout,
            follow_redirects: self.follow_redirects.unwrap_or(true),
            headers,
        })
    }
}

/// A handle able to issue a GET against the forecast API.
#[async_trait]
pub trait Transport: Send + Sync + Debug {
    /// GET `path` (relative to the base URL) with the given query pairs and
    /// return the raw response body.
    async fn get(&self, path: &str, query: &[(&'static str, String)]) -> Result<Vec<u8>, DarkSkyError>;
}

/// Builds a [`Transport`] from resolved options. Called at most once per client.
pub trait Connector: Send + Sync + Debug {
    fn connect(&self, options: &ResolvedTransportOptions) -> Result<Arc<dyn Transport>, DarkSkyError>;
}

/// Default connector producing a reqwest-backed [`HttpTransport`].
#[derive(Debug, Clone, Copy, Default)]
pub struct HttpConnector;

impl Connector for HttpConnector {
    fn connect(&self, options: &ResolvedTransportOptions) -> Result<Arc<dyn Transport>, DarkSkyError> {
        Ok(Arc::new(HttpTransport::new(options)?))
    }
}

#[derive(Debug, Clone)]
pub struct HttpTransport {
    base_url: String,
    http: Client,
}

impl HttpTransport {
    pub fn new(options: &ResolvedTransportOptions) -> Result<Self, DarkSkyError> {
        let mut default_headers = HeaderMap::new();
        for (name, value) in &options.headers {
            let header_name = HeaderName::from_bytes(name.as_bytes()).map_err(|e| {
                DarkSkyError::InvalidConfiguration(format!("invalid header name '{name}': {e}"))
            })?;
            let header_value = HeaderValue::from_str(value).map_err(|e| {
                DarkSkyError::InvalidConfiguration(format!("invalid value for header '{name}': {e}"))
            })?;
            default_headers.insert(header_name, header_value);
        }

        let redirect = if options.follow_redirects { Policy::default() } else { Policy::none() };

        let http = Client::builder()
            .default_headers(default_headers)
            .timeout(options.timeout)
            .redirect(redirect)
            .build()
            .map_err(|e| {
                DarkSkyError::InvalidConfiguration(format!("failed to build HTTP client: {e}"))
            })?;

        Ok(Self { base_url: options.base_url.trim_end_matches('/').to_string(), http })
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn get(&self, path: &str, query: &[(&'static str, String)]) -> Result<Vec<u8>, DarkSkyError> {
        let url = format!("{}/{}", self.base_url, path.trim_start_matches('/'));

        let res = self.http.get(&url).query(query).send().await?.error_for_status()?;
        let body = res.bytes().await?;

        Ok(body.to_vec())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolve_without_options_uses_defaults() {
        let resolved = TransportOptions::default().resolve().unwrap();

        assert_eq!(resolved.base_url, "https://api.darksky.net");
        assert_eq!(resolved.timeout, Duration::from_secs(8));
        assert!(resolved.follow_redirects);
        assert_eq!(resolved.headers.get("accept").map(String::as_str), Some("application/json"));
        assert!(resolved.headers["user-agent"].starts_with("darksky-rs/"));
    }

    #[test]
    fn caller_options_win_on_collision() {
        let resolved = TransportOptions::default()
            .with_base_url("http://localhost:9999")
            .with_timeout(Duration::from_millis(1500))
            .with_follow_redirects(false)
            .resolve()
            .unwrap();

        assert_eq!(resolved.base_url, "http://localhost:9999");
        assert_eq!(resolved.timeout, Duration::from_millis(1500));
        assert!(!resolved.follow_redirects);
    }

    #[test]
    fn headers_merge_case_insensitively() {
        let resolved = TransportOptions::default()
            .with_header("User-Agent", "my-app/2.0")
            .with_header("X-Trace", "abc")
            .resolve()
            .unwrap();

        assert_eq!(resolved.headers.len(), 3);
        assert_eq!(resolved.headers["user-agent"], "my-app/2.0");
        assert_eq!(resolved.headers["x-trace"], "abc");
        assert_eq!(resolved.headers["accept"], "application/json");
    }

    #[test]
    fn negative_timeout_is_invalid() {
        let opts = TransportOptions { timeout_secs: Some(-1.0), ..Default::default() };
        let err = opts.resolve().unwrap_err();

        assert!(matches!(err, DarkSkyError::InvalidConfiguration(_)));
        assert!(err.to_string().contains("timeout_secs"));
    }

    #[test]
    fn http_connector_rejects_bad_header_names() {
        let resolved = TransportOptions::default()
            .with_header("bad header", "x")
            .resolve()
            .unwrap();

        let err = HttpConnector.connect(&resolved).unwrap_err();
        assert!(err.to_string().contains("invalid header name 'bad header'"));
    }

    #[test]
    fn http_connector_builds_with_defaults() {
        let resolved = TransportOptions::default().resolve().unwrap();
        assert!(HttpConnector.connect(&resolved).is_ok());
    }
}
