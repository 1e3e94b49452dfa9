use crate::parser::StatusRecord;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeviceClass {
    Power,
    Energy,
    SignalStrength,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StateClass {
    Measurement,
    /// Monotonic counter; a drop means the device reset it (e.g. at midnight).
    TotalIncreasing,
}

/// How to present one status page variable as a numeric sensor.
#[derive(Debug)]
pub struct SensorDescription {
    pub key: &'static str,
    pub name: &'static str,
    pub unit: &'static str,
    pub device_class: DeviceClass,
    pub state_class: StateClass,
    pub parse: fn(&str) -> Option<f64>,
}

impl SensorDescription {
    /// Current reading, or `None` if the key is missing or not numeric.
    pub fn read(&self, record: &StatusRecord) -> Option<f64> {
        record.get(self.key).and_then(self.parse)
    }
}

pub static SENSORS: &[SensorDescription] = &[
    SensorDescription {
        key: "webdata_now_p",
        name: "Power",
        unit: "W",
        device_class: DeviceClass::Power,
        state_class: StateClass::Measurement,
        parse: parse_float,
    },
    SensorDescription {
        key: "webdata_today_e",
        name: "Energy today",
        unit: "kWh",
        device_class: DeviceClass::Energy,
        state_class: StateClass::TotalIncreasing,
        parse: parse_float,
    },
    SensorDescription {
        key: "webdata_total_e",
        name: "Energy total",
        unit: "kWh",
        device_class: DeviceClass::Energy,
        state_class: StateClass::TotalIncreasing,
        parse: parse_float,
    },
    SensorDescription {
        key: "cover_sta_rssi",
        name: "WiFi signal",
        unit: "%",
        device_class: DeviceClass::SignalStrength,
        state_class: StateClass::Measurement,
        parse: parse_percent,
    },
];

pub fn sensor(key: &str) -> Option<&'static SensorDescription> {
    SENSORS.iter().find(|s| s.key == key)
}

fn parse_float(value: &str) -> Option<f64> {
    value.trim().parse::<f64>().ok().filter(|v| v.is_finite())
}

fn parse_percent(value: &str) -> Option<f64> {
    let value = value.trim();
    parse_float(value.strip_suffix('%').unwrap_or(value))
}
