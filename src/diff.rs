use std::collections::BTreeSet;

use crate::parser::StatusRecord;
use crate::sensors::sensor;

/// One key whose raw value differs between two records.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Change {
    pub key: String,
    pub old: Option<String>,
    pub new: Option<String>,
}

/// Events emitted by the poller when a freshly loaded record differs from
/// the previous one.
#[derive(Debug, Clone, PartialEq)]
pub enum Event {
    SensorChanged {
        key: &'static str,
        value: f64,
        unit: &'static str,
    },
    /// A known sensor disappeared or no longer holds a number.
    SensorUnavailable { key: &'static str },
    ValueChanged { key: String, value: Option<String> },
}

/// Keys added, removed or changed from `previous` to `current`, sorted by key.
pub fn diff_records(previous: &StatusRecord, current: &StatusRecord) -> Vec<Change> {
    let keys: BTreeSet<&str> = previous
        .iter()
        .chain(current.iter())
        .map(|(k, _)| k)
        .collect();

    keys.into_iter()
        .filter_map(|key| {
            let old = previous.get(key);
            let new = current.get(key);
            (old != new).then(|| Change {
                key: key.to_string(),
                old: old.map(str::to_string),
                new: new.map(str::to_string),
            })
        })
        .collect()
}

pub(crate) fn map_event(change: &Change) -> Event {
    let Some(description) = sensor(&change.key) else {
        return Event::ValueChanged {
            key: change.key.clone(),
            value: change.new.clone(),
        };
    };
    match change.new.as_deref().and_then(description.parse) {
        Some(value) => Event::SensorChanged {
            key: description.key,
            value,
            unit: description.unit,
        },
        None => Event::SensorUnavailable {
            key: description.key,
        },
    }
}
