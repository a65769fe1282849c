//! Core library for the Dark Sky forecast API.
//!
//! This crate defines:
//! - The forecast client and its per-call request builder
//! - Resolution of request overrides against client defaults into URI and query
//! - The transport seam (reqwest by default) and configuration handling
//!
//! It is used by `darksky-cli`, but is meant to be embedded in any async application.
//!
//! ```no_run
//! use darksky_core::{DataBlock, ForecastClient};
//!
//! # async fn run() -> Result<(), darksky_core::DarkSkyError> {
//! let client = ForecastClient::new("my-api-key");
//! let forecast = client
//!     .create_request()
//!     .with_latitude("52.0")
//!     .with_longitude("4.3")
//!     .with_excluded_blocks([DataBlock::Minutely])
//!     .execute()
//!     .await?;
//! println!("{}", forecast["currently"]["summary"]);
//! # Ok(())
//! # }
//! ```

pub mod client;
pub mod config;
pub mod error;
pub mod language;
pub mod model;
pub mod request;
pub mod transport;

pub use client::ForecastClient;
pub use config::Config;
pub use error::DarkSkyError;
pub use language::{SUPPORTED_LANGUAGES, is_language_valid};
pub use model::{DataBlock, UnitSystem};
pub use request::ForecastRequest;
pub use transport::{Connector, HttpConnector, HttpTransport, Transport, TransportOptions};
