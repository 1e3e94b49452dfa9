use std::collections::HashMap;

use serde::Serialize;

/// Variable name prefixes worth keeping from the status page.
const KEPT_PREFIXES: &[&str] = &["webdata", "cover", "status"];

pub const SERIAL_NUMBER_KEY: &str = "webdata_sn";

/// Flat variable name to raw value mapping scraped from one status page.
///
/// Values are kept as strings; converting them is up to the consumer
/// (see [`crate::SENSORS`]).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct StatusRecord(HashMap<String, String>);

impl StatusRecord {
    pub fn get(&self, key: &str) -> Option<&str> {
        self.0.get(key).map(String::as_str)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.0.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Unique identifier of the logger, if the page reported one.
    pub fn serial_number(&self) -> Option<&str> {
        self.get(SERIAL_NUMBER_KEY).filter(|sn| !sn.is_empty())
    }

    pub fn into_inner(self) -> HashMap<String, String> {
        self.0
    }
}

impl From<HashMap<String, String>> for StatusRecord {
    fn from(map: HashMap<String, String>) -> Self {
        Self(map)
    }
}

/// Scrape `var name = "value";` declarations out of a logger status page.
///
/// Lines that do not look like a declaration are skipped, so an empty or
/// unrelated body yields an empty record. Only the first `=` separates the
/// name from the value; anything after it stays part of the value.
pub fn parse_status_html(body: &str) -> StatusRecord {
    let mut record = HashMap::new();
    for (variable, value) in body.split(is_line_break).filter_map(parse_declaration) {
        if KEPT_PREFIXES.iter().any(|p| variable.starts_with(p)) {
            record.insert(variable.to_string(), value.trim_matches('"').to_string());
        }
    }
    StatusRecord(record)
}

/// Same line boundaries as Python's `str.splitlines`; some loggers emit bare `\r`.
fn is_line_break(c: char) -> bool {
    matches!(
        c,
        '\n' | '\r' | '\x0b' | '\x0c' | '\x1c' | '\x1d' | '\x1e' | '\u{85}' | '\u{2028}' | '\u{2029}'
    )
}

fn parse_declaration(line: &str) -> Option<(&str, &str)> {
    if !line.starts_with("var") {
        return None;
    }
    let (_, statement) = line.split_once(' ')?;
    let statement = statement.split(';').next().unwrap_or_default();
    let (variable, value) = statement.split_once('=')?;
    Some((variable.trim(), value.trim()))
}

#[cfg(test)]
mod tests {
    use super::*;

    const STATUS_PAGE: &str = r#"<html>
<head>
<script type="text/javascript">
var webdata_sn = "1234567890ABCDEF";
var webdata_msvn = "";
var webdata_ssvn = "";
var webdata_pv_type = "";
var webdata_rate_p = "";
var webdata_now_p = "312";
var webdata_today_e = "4.70";
var webdata_total_e = "1534.0";
var webdata_alarm = "";
var webdata_utime = "0";
var cover_mid = "4012345678";
var cover_ver = "MW_08_512_0501_1.82";
var cover_wmode = "STA";
var cover_ap_ssid = "AP_4012345678";
var cover_ap_ip = "10.10.100.254";
var cover_ap_mac = "F0FE6B000000";
var cover_sta_ssid = "HomeNet";
var cover_sta_rssi = "80%";
var cover_sta_ip = "192.168.1.166";
var cover_sta_mac = "F0FE6B000001";
var status_a = "1";
var status_b = "0";
var status_c = "0";
</script>
</head>
</html>
"#;

    #[test]
    fn parses_real_page() {
        let record = parse_status_html(STATUS_PAGE);
        assert_eq!(record.len(), 23);
        assert_eq!(record.get("webdata_now_p"), Some("312"));
        assert_eq!(record.get("webdata_total_e"), Some("1534.0"));
        assert_eq!(record.get("cover_sta_rssi"), Some("80%"));
        assert_eq!(record.get("status_a"), Some("1"));
        assert_eq!(record.get("webdata_alarm"), Some(""));
        assert_eq!(record.serial_number(), Some("1234567890ABCDEF"));
    }

    #[test]
    fn drops_variables_without_kept_prefix() {
        let body = "var webdata_now_p = \"123.4\";\nvar other_thing = \"x\";\nvar cover_sta_rssi = \"80%\";";
        let record = parse_status_html(body);
        let expected: HashMap<String, String> = [
            ("webdata_now_p".to_string(), "123.4".to_string()),
            ("cover_sta_rssi".to_string(), "80%".to_string()),
        ]
        .into();
        assert_eq!(record, StatusRecord::from(expected));
    }

    #[test]
    fn last_duplicate_wins() {
        let body = "var webdata_sn = \"A\";\nvar webdata_now_p = \"1\";\nvar webdata_sn = \"B\";";
        let record = parse_status_html(body);
        assert_eq!(record.get("webdata_sn"), Some("B"));
    }

    #[test]
    fn empty_body_is_empty_record() {
        assert!(parse_status_html("").is_empty());
        assert!(parse_status_html("<html><body>no script</body></html>").is_empty());
    }

    #[test]
    fn indented_declarations_are_ignored() {
        let record = parse_status_html("  var webdata_now_p = \"5\";");
        assert!(record.is_empty());
    }

    #[test]
    fn malformed_lines_are_skipped() {
        let body = "var\nvar webdata_now_p\nvar webdata_today_e \"1\";\nvar webdata_total_e = \"9\";";
        let record = parse_status_html(body);
        assert_eq!(record.len(), 1);
        assert_eq!(record.get("webdata_total_e"), Some("9"));
    }

    #[test]
    fn value_keeps_text_after_second_equals() {
        let record = parse_status_html("var status_msg = \"a=b\";");
        assert_eq!(record.get("status_msg"), Some("a=b"));
    }

    #[test]
    fn trailing_comment_and_unquoted_value() {
        let record = parse_status_html("var webdata_now_p = 42; // watts");
        assert_eq!(record.get("webdata_now_p"), Some("42"));
    }

    #[test]
    fn crlf_line_endings() {
        let record = parse_status_html("var webdata_now_p = \"1\";\r\nvar webdata_sn = \"X\";\r\n");
        assert_eq!(record.get("webdata_now_p"), Some("1"));
        assert_eq!(record.serial_number(), Some("X"));
    }

    #[test]
    fn bare_carriage_return_line_endings() {
        let record = parse_status_html("var webdata_now_p = \"1\";\rvar webdata_sn = \"X\";\r");
        assert_eq!(record.get("webdata_now_p"), Some("1"));
        assert_eq!(record.serial_number(), Some("X"));
    }

    #[test]
    fn other_line_separators() {
        let record = parse_status_html("var status_a = \"1\";\u{2028}var status_b = \"2\";\x0cvar status_c = \"3\";");
        assert_eq!(record.len(), 3);
        assert_eq!(record.get("status_c"), Some("3"));
    }

    #[test]
    fn into_inner_yields_map() {
        let map = parse_status_html("var webdata_now_p = \"7\";").into_inner();
        assert_eq!(map.get("webdata_now_p").map(String::as_str), Some("7"));
        assert_eq!(map.len(), 1);
    }

    #[test]
    fn empty_serial_number_is_none() {
        let record = parse_status_html("var webdata_sn = \"\";");
        assert!(record.contains_key("webdata_sn"));
        assert_eq!(record.serial_number(), None);
    }

    #[test]
    fn parsing_is_deterministic() {
        assert_eq!(parse_status_html(STATUS_PAGE), parse_status_html(STATUS_PAGE));
    }

    #[test]
    fn serializes_as_flat_object() {
        let record = parse_status_html("var webdata_now_p = \"7\";");
        let json = serde_json::to_value(&record).unwrap();
        assert_eq!(json, serde_json::json!({"webdata_now_p": "7"}));
    }
}
