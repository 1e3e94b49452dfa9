use std::fs::{File, OpenOptions};
use std::io::Write;
use std::path::Path;

use chrono::Utc;
use serde_json::{json, Value};
use tracing::warn;

use crate::diff::diff_records;
use crate::parser::StatusRecord;
use crate::Error;

/// What the poll log records for each successful poll.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageLogMode {
    /// Every record in full.
    Full,
    /// The first record in full, then only the changed keys.
    Diffed,
}

/// Append-only NDJSON log of poll results.
pub(crate) struct MessageLogger {
    mode: MessageLogMode,
    file: File,
    previous: Option<StatusRecord>,
}

impl MessageLogger {
    pub fn new(mode: MessageLogMode, path: impl AsRef<Path>) -> std::io::Result<Self> {
        let file = OpenOptions::new().create(true).append(true).open(path)?;
        Ok(Self {
            mode,
            file,
            previous: None,
        })
    }

    pub fn log_status(&mut self, record: &StatusRecord) {
        let ts = Utc::now().to_rfc3339();
        let entry = match (self.mode, &self.previous) {
            (MessageLogMode::Diffed, Some(prev)) => {
                let changes: Vec<Value> = diff_records(prev, record)
                    .into_iter()
                    .map(|c| json!({ "key": c.key, "old": c.old, "new": c.new }))
                    .collect();
                json!({ "ts": ts, "dir": "poll", "ok": true, "changes": changes })
            }
            (MessageLogMode::Diffed, None) => {
                json!({ "ts": ts, "dir": "poll", "ok": true, "full": true, "body": record })
            }
            (MessageLogMode::Full, _) => {
                json!({ "ts": ts, "dir": "poll", "ok": true, "body": record })
            }
        };
        self.write_line(&entry);
        if self.mode == MessageLogMode::Diffed {
            self.previous = Some(record.clone());
        }
    }

    pub fn log_error(&mut self, error: &Error) {
        let entry = json!({
            "ts": Utc::now().to_rfc3339(),
            "dir": "poll",
            "ok": false,
            "error": error.to_string(),
        });
        self.write_line(&entry);
    }

    fn write_line(&mut self, entry: &Value) {
        if let Ok(line) = serde_json::to_string(entry)
            && let Err(e) = writeln!(self.file, "{line}")
        {
            warn!("failed to write poll log entry: {e}");
        }
    }
}
