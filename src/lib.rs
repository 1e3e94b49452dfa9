mod client;
mod diff;
mod error;
mod logger;
mod parser;
mod poller;
mod sensors;
mod url;

pub use client::{DeviceConfig, SolisClient, SolisClientBuilder, DEFAULT_TIMEOUT};
pub use diff::{diff_records, Change, Event};
pub use error::{Error, Failure, Result};
pub use logger::MessageLogMode;
pub use parser::{parse_status_html, StatusRecord};
pub use poller::{Poller, PollerBuilder, DEFAULT_INTERVAL};
pub use sensors::{sensor, DeviceClass, SensorDescription, StateClass, SENSORS};
pub use url::{normalize_host, status_url};
