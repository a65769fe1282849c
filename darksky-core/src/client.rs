use serde_json::Value;
use std::{fmt, sync::Arc};
use tokio::sync::OnceCell;
use tracing::{debug, instrument, warn};

use crate::{
    error::DarkSkyError,
    language,
    model::UnitSystem,
    request::ForecastRequest,
    transport::{Connector, HttpConnector, Transport, TransportOptions},
};

/// Entry point of the library: holds the API key and the defaults applied to
/// every [`ForecastRequest`], and owns the (lazily built) transport.
pub struct ForecastClient {
    api_key: String,
    default_units: UnitSystem,
    default_language: String,
    transport_options: TransportOptions,
    connector: Arc<dyn Connector>,
    transport: OnceCell<Arc<dyn Transport>>,
}

impl ForecastClient {
    /// Client with SI units, English summaries and default transport options.
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            default_units: UnitSystem::Si,
            default_language: "en".to_string(),
            transport_options: TransportOptions::default(),
            connector: Arc::new(HttpConnector),
            transport: OnceCell::new(),
        }
    }

    /// Fails with [`DarkSkyError::InvalidConfiguration`] if `default_language`
    /// is not a supported language.
    pub fn with_settings(
        api_key: impl Into<String>,
        default_units: UnitSystem,
        default_language: &str,
        transport_options: TransportOptions,
    ) -> Result<Self, DarkSkyError> {
        if !language::is_language_valid(default_language) {
            return Err(DarkSkyError::InvalidConfiguration(format!(
                "'{default_language}' is not a language the forecast API supports. \
                 Supported languages: {}.",
                language::SUPPORTED_LANGUAGES.join(", ")
            )));
        }

        let mut client = Self::new(api_key);
        client.default_units = default_units;
        client.set_default_language(default_language);
        client.transport_options = transport_options;

        Ok(client)
    }

    /// Replace the factory used to build the transport. Any transport built
    /// so far is dropped.
    pub fn with_connector(mut self, connector: impl Connector + 'static) -> Self {
        self.connector = Arc::new(connector);
        self.transport = OnceCell::new();
        self
    }

    pub fn create_request(&self) -> ForecastRequest<'_> {
        ForecastRequest::new(self)
    }

    /// Issue one GET for `request` and return the decoded JSON document.
    #[instrument(
        skip_all,
        fields(lat = %request.latitude(), lon = %request.longitude(), time_machine = request.time().is_some())
    )]
    pub async fn request(&self, request: &ForecastRequest<'_>) -> Result<Value, DarkSkyError> {
        let uri = self.request_to_uri(request);
        let query = self.request_to_query_parameters(request);
        debug!(?query, "requesting forecast");

        let transport = self.transport().await?;
        let body = transport.get(&uri, &query).await?;

        Ok(serde_json::from_slice(&body)?)
    }

    /// `forecast/{key}/{lat},{lon}` with `,{unix timestamp}` appended for
    /// Time Machine requests.
    pub fn request_to_uri(&self, request: &ForecastRequest<'_>) -> String {
        let mut location = vec![request.latitude().to_string(), request.longitude().to_string()];
        if let Some(time) = request.time() {
            location.push(time.timestamp().to_string());
        }

        format!("forecast/{}/{}", self.api_key, location.join(","))
    }

    /// Query pairs for `request`, in wire order: `lang`, `units`, then the
    /// optional `exclude` and `extend`.
    ///
    /// An override language outside the supported set is ignored and the
    /// default is sent instead. The units override is sent verbatim.
    pub fn request_to_query_parameters(
        &self,
        request: &ForecastRequest<'_>,
    ) -> Vec<(&'static str, String)> {
        let mut lang = self.default_language.clone();
        let mut units = self.default_units.as_str().to_string();

        if let Some(override_lang) = request.language() {
            if language::is_language_valid(override_lang) {
                lang = override_lang.to_lowercase();
            } else {
                warn!(language = override_lang, fallback = %lang, "ignoring unsupported language override");
            }
        }

        if let Some(override_units) = request.units() {
            units = override_units.to_string();
        }

        let mut query = vec![("lang", lang), ("units", units)];

        if !request.excluded_blocks().is_empty() {
            query.push(("exclude", request.excluded_blocks().join(",")));
        }

        if request.is_extended_hourly() {
            query.push(("extend", "hourly".to_string()));
        }

        query
    }

    pub fn is_language_valid(&self, lang: &str) -> bool {
        language::is_language_valid(lang)
    }

    pub fn default_language(&self) -> &str {
        &self.default_language
    }

    /// Lower-cases but does not validate; an unsupported value is sent as-is.
    pub fn set_default_language(&mut self, lang: &str) {
        self.default_language = lang.to_lowercase();
    }

    pub fn default_units(&self) -> UnitSystem {
        self.default_units
    }

    pub fn set_default_units(&mut self, units: UnitSystem) {
        self.default_units = units;
    }

    pub fn transport_options(&self) -> &TransportOptions {
        &self.transport_options
    }

    /// The shared transport, built on first use and reused afterwards.
    pub async fn transport(&self) -> Result<&Arc<dyn Transport>, DarkSkyError> {
        self.transport
            .get_or_try_init(|| async {
                let options = self.transport_options.resolve()?;
                debug!(base_url = %options.base_url, timeout = ?options.timeout, "building transport");
                self.connector.connect(&options)
            })
            .await
    }
}

impl fmt::Debug for ForecastClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ForecastClient")
            .field("api_key", &"<redacted>")
            .field("default_units", &self.default_units)
            .field("default_language", &self.default_language)
            .field("transport_options", &self.transport_options)
            .field("connector", &self.connector)
            .field("transport_initialized", &self.transport.initialized())
            .finish()
    }
}
