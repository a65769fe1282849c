use serde::{Deserialize, Serialize};

/// Unit systems understood by the `units` query parameter.
///
/// The API itself falls back to [`UnitSystem::Imperial`] when no unit is sent;
/// this client always sends one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum UnitSystem {
    /// Picked by the API from the location.
    #[serde(rename = "auto")]
    Auto,
    /// SI, with wind speed in km/h.
    #[serde(rename = "ca")]
    Catalan,
    /// SI, with distances and wind speed in miles.
    #[serde(rename = "uk2")]
    Uk,
    #[serde(rename = "us")]
    Imperial,
    #[serde(rename = "si")]
    Si,
}

impl UnitSystem {
    pub fn as_str(&self) -> &'static str {
        match self {
            UnitSystem::Auto => "auto",
            UnitSystem::Catalan => "ca",
            UnitSystem::Uk => "uk2",
            UnitSystem::Imperial => "us",
            UnitSystem::Si => "si",
        }
    }

    pub const fn all() -> &'static [UnitSystem] {
        &[
            UnitSystem::Auto,
            UnitSystem::Catalan,
            UnitSystem::Uk,
            UnitSystem::Imperial,
            UnitSystem::Si,
        ]
    }
}

impl std::fmt::Display for UnitSystem {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<UnitSystem> for String {
    fn from(units: UnitSystem) -> Self {
        units.as_str().to_string()
    }
}

/// Sections of the forecast document that can be left out of the response.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DataBlock {
    Currently,
    Minutely,
    Hourly,
    Daily,
    Alerts,
    Flags,
}

impl DataBlock {
    pub fn as_str(&self) -> &'static str {
        match self {
            DataBlock::Currently => "currently",
            DataBlock::Minutely => "minutely",
            DataBlock::Hourly => "hourly",
            DataBlock::Daily => "daily",
            DataBlock::Alerts => "alerts",
            DataBlock::Flags => "flags",
        }
    }
}

impl std::fmt::Display for DataBlock {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<DataBlock> for String {
    fn from(block: DataBlock) -> Self {
        block.as_str().to_string()
    }
}
