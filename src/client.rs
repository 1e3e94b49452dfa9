use std::fmt;
use std::time::Duration;

use reqwest::StatusCode;
use serde::Deserialize;
use tracing::{debug, trace};

use crate::parser::{parse_status_html, StatusRecord};
use crate::url::status_url;
use crate::{Error, Failure, Result};

/// Overall bound on one status request, connection included.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// Connection parameters of one logger.
#[derive(Clone, PartialEq, Eq, Deserialize)]
pub struct DeviceConfig {
    pub host: String,
    pub username: String,
    pub password: String,
}

impl DeviceConfig {
    pub fn new(
        host: impl Into<String>,
        username: impl Into<String>,
        password: impl Into<String>,
    ) -> Self {
        Self {
            host: host.into(),
            username: username.into(),
            password: password.into(),
        }
    }
}

impl fmt::Debug for DeviceConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DeviceConfig")
            .field("host", &self.host)
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .finish()
    }
}

pub struct SolisClientBuilder {
    config: DeviceConfig,
    timeout: Duration,
}

impl SolisClientBuilder {
    pub fn new(config: DeviceConfig) -> Self {
        Self {
            config,
            timeout: DEFAULT_TIMEOUT,
        }
    }

    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn build(self) -> Result<SolisClient> {
        let http = reqwest::Client::builder().timeout(self.timeout).build()?;
        Ok(SolisClient {
            http,
            url: status_url(&self.config.host),
            config: self.config,
        })
    }
}

/// Reads the status page served by a Solis data logger on the local network.
///
/// The client holds no state besides its configuration; every
/// [`load_status`](Self::load_status) call stands alone.
#[derive(Debug)]
pub struct SolisClient {
    http: reqwest::Client,
    url: String,
    config: DeviceConfig,
}

impl SolisClient {
    pub fn builder(config: DeviceConfig) -> SolisClientBuilder {
        SolisClientBuilder::new(config)
    }

    pub fn new(config: DeviceConfig) -> Result<Self> {
        Self::builder(config).build()
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    pub fn config(&self) -> &DeviceConfig {
        &self.config
    }

    /// Fetch the raw status page.
    ///
    /// A 401 means the credentials are wrong and retrying will not help.
    /// Any other failure is reported as [`Error::ConnectionFailed`].
    pub async fn fetch_status_page(&self) -> Result<String> {
        debug!(url = %self.url, "fetching logger status page");
        let resp = self
            .http
            .get(&self.url)
            .basic_auth(&self.config.username, Some(&self.config.password))
            .send()
            .await?;

        match resp.status() {
            StatusCode::OK => Ok(resp.text().await?),
            StatusCode::UNAUTHORIZED => Err(Error::AuthorizationFailed),
            status => {
                debug!(status = status.as_u16(), "unexpected status from logger");
                Err(Error::ConnectionFailed(Failure::Status(status.as_u16())))
            }
        }
    }

    /// Fetch and parse the status page.
    pub async fn load_status(&self) -> Result<StatusRecord> {
        let body = self.fetch_status_page().await?;
        let record = parse_status_html(&body);
        trace!(keys = record.len(), "parsed status page");
        Ok(record)
    }

    /// Load the status once and return the logger serial number, used to
    /// identify the device when it is first set up.
    pub async fn identify(&self) -> Result<Option<String>> {
        let record = self.load_status().await?;
        Ok(record.serial_number().map(str::to_string))
    }
}
