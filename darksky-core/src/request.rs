use chrono::{DateTime, Utc};
use serde_json::Value;

use crate::{client::ForecastClient, error::DarkSkyError};

/// Per-call parameters for a forecast, bound to the [`ForecastClient`] that
/// will execute it.
///
/// No setter validates its input; the client resolves (and, for the language,
/// filters) the values when the request runs.
#[derive(Debug, Clone)]
pub struct ForecastRequest<'a> {
    client: &'a ForecastClient,
    latitude: String,
    longitude: String,
    excluded_blocks: Vec<String>,
    extended_hourly: bool,
    language: Option<String>,
    units: Option<String>,
    time: Option<DateTime<Utc>>,
}

impl<'a> ForecastRequest<'a> {
    pub fn new(client: &'a ForecastClient) -> Self {
        Self {
            client,
            latitude: String::new(),
            longitude: String::new(),
            excluded_blocks: Vec::new(),
            extended_hourly: false,
            language: None,
            units: None,
            time: None,
        }
    }

    pub fn with_latitude(mut self, latitude: impl Into<String>) -> Self {
        self.latitude = latitude.into();
        self
    }

    pub fn with_longitude(mut self, longitude: impl Into<String>) -> Self {
        self.longitude = longitude.into();
        self
    }

    /// Blocks to leave out of the response, e.g. `[DataBlock::Minutely, DataBlock::Alerts]`
    /// or plain strings. Replaces any previous list.
    pub fn with_excluded_blocks<I, S>(mut self, blocks: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.excluded_blocks = blocks.into_iter().map(Into::into).collect();
        self
    }

    /// Ask for 168 hours of hourly data instead of 48.
    pub fn with_extended_hourly(mut self, enabled: bool) -> Self {
        self.extended_hourly = enabled;
        self
    }

    pub fn with_language(mut self, language: impl Into<String>) -> Self {
        self.language = Some(language.into());
        self
    }

    pub fn with_units(mut self, units: impl Into<String>) -> Self {
        self.units = Some(units.into());
        self
    }

    /// Turn this into a Time Machine request for the given instant.
    pub fn with_time(mut self, time: impl Into<DateTime<Utc>>) -> Self {
        self.time = Some(time.into());
        self
    }

    pub fn latitude(&self) -> &str {
        &self.latitude
    }

    pub fn longitude(&self) -> &str {
        &self.longitude
    }

    pub fn excluded_blocks(&self) -> &[String] {
        &self.excluded_blocks
    }

    pub fn is_extended_hourly(&self) -> bool {
        self.extended_hourly
    }

    pub fn language(&self) -> Option<&str> {
        self.language.as_deref()
    }

    pub fn units(&self) -> Option<&str> {
        self.units.as_deref()
    }

    pub fn time(&self) -> Option<DateTime<Utc>> {
        self.time
    }

    pub fn client(&self) -> &'a ForecastClient {
        self.client
    }

    /// Shorthand for `client.request(&self)`.
    pub async fn execute(&self) -> Result<Value, DarkSkyError> {
        self.client.request(self).await
    }
}
