use std::path::PathBuf;
use std::time::Duration;

use tokio::time::{interval, MissedTickBehavior};
use tracing::{debug, info, warn};

use crate::client::SolisClient;
use crate::diff::{diff_records, map_event, Event};
use crate::logger::{MessageLogMode, MessageLogger};
use crate::parser::StatusRecord;
use crate::{Error, Result};

/// Polling cadence used when none is configured.
pub const DEFAULT_INTERVAL: Duration = Duration::from_secs(14);

type StatusCallback = Box<dyn Fn(&StatusRecord) + Send + Sync>;
type EventCallback = Box<dyn Fn(&Event) + Send + Sync>;

pub struct PollerBuilder {
    client: SolisClient,
    interval: Duration,
    status_callbacks: Vec<StatusCallback>,
    event_callbacks: Vec<EventCallback>,
    log_mode: Option<MessageLogMode>,
    log_path: Option<PathBuf>,
}

impl PollerBuilder {
    pub fn new(client: SolisClient) -> Self {
        Self {
            client,
            interval: DEFAULT_INTERVAL,
            status_callbacks: Vec::new(),
            event_callbacks: Vec::new(),
            log_mode: None,
            log_path: None,
        }
    }

    pub fn interval(mut self, interval: Duration) -> Self {
        self.interval = interval;
        self
    }

    /// Called with every successfully loaded record.
    pub fn on_status(mut self, f: impl Fn(&StatusRecord) + Send + Sync + 'static) -> Self {
        self.status_callbacks.push(Box::new(f));
        self
    }

    /// Called for each key that changed since the previous successful poll.
    pub fn on_event(mut self, f: impl Fn(&Event) + Send + Sync + 'static) -> Self {
        self.event_callbacks.push(Box::new(f));
        self
    }

    pub fn message_log(mut self, mode: MessageLogMode, path: impl Into<PathBuf>) -> Self {
        self.log_mode = Some(mode);
        self.log_path = Some(path.into());
        self
    }

    pub fn build(self) -> std::io::Result<Poller> {
        let logger = match (self.log_mode, self.log_path) {
            (Some(mode), Some(path)) => Some(MessageLogger::new(mode, path)?),
            _ => None,
        };

        Ok(Poller {
            client: self.client,
            interval: self.interval,
            previous: None,
            status_callbacks: self.status_callbacks,
            event_callbacks: self.event_callbacks,
            logger,
        })
    }
}

/// Drives a [`SolisClient`] on a fixed cadence.
///
/// Polls never overlap: each one runs to completion (or to the client
/// timeout) before the next tick is awaited.
pub struct Poller {
    client: SolisClient,
    interval: Duration,
    previous: Option<StatusRecord>,
    status_callbacks: Vec<StatusCallback>,
    event_callbacks: Vec<EventCallback>,
    logger: Option<MessageLogger>,
}

impl Poller {
    pub fn builder(client: SolisClient) -> PollerBuilder {
        PollerBuilder::new(client)
    }

    pub fn client(&self) -> &SolisClient {
        &self.client
    }

    /// Last successfully loaded record.
    pub fn last_status(&self) -> Option<&StatusRecord> {
        self.previous.as_ref()
    }

    /// Poll once. On failure the last good record is kept.
    pub async fn refresh(&mut self) -> Result<&StatusRecord> {
        let record = match self.client.load_status().await {
            Ok(record) => record,
            Err(e) => {
                if let Some(ref mut logger) = self.logger {
                    logger.log_error(&e);
                }
                return Err(e);
            }
        };

        if let Some(ref mut logger) = self.logger {
            logger.log_status(&record);
        }

        let empty = StatusRecord::default();
        let changes = diff_records(self.previous.as_ref().unwrap_or(&empty), &record);
        debug!(changes = changes.len(), "status refreshed");

        for change in &changes {
            let event = map_event(change);
            for cb in &self.event_callbacks {
                cb(&event);
            }
        }
        for cb in &self.status_callbacks {
            cb(&record);
        }

        Ok(&*self.previous.insert(record))
    }

    /// Poll until the credentials are rejected.
    ///
    /// The first poll must succeed, otherwise its error is returned right
    /// away. After that connection failures are logged and polling goes on;
    /// [`Error::AuthorizationFailed`] ends the loop.
    pub async fn run(&mut self) -> Result<()> {
        self.refresh().await?;
        info!(url = %self.client.url(), interval = ?self.interval, "polling logger");

        let mut ticker = interval(self.interval.max(Duration::from_millis(1)));
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
        // The first tick completes immediately and the first poll is done.
        ticker.tick().await;

        loop {
            ticker.tick().await;
            match self.refresh().await {
                Ok(_) => {}
                Err(Error::AuthorizationFailed) => {
                    warn!("logger rejected credentials, stopping");
                    return Err(Error::AuthorizationFailed);
                }
                Err(e) => warn!("poll failed: {e}"),
            }
        }
    }
}
