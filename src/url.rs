const SCHEME_PREFIXES: &[&str] = &["http://", "https://", "http:", "https:"];

pub const STATUS_PATH: &str = "/status.html";

/// Strip whitespace, a scheme and trailing separators from a user-supplied host.
pub fn normalize_host(host: &str) -> String {
    let host = host.trim_matches(|c: char| c.is_whitespace() || c == '/' || c == ':');
    // "http://" has already lost its separators here; a bare scheme is no host.
    // This also empties a literal hostname "http" or "https".
    if host == "http" || host == "https" {
        return String::new();
    }
    let host = SCHEME_PREFIXES
        .iter()
        .find_map(|prefix| host.strip_prefix(prefix))
        .unwrap_or(host);
    host.trim_end_matches(['/', ':']).to_string()
}

/// URL of the logger status page. The logger only speaks plain HTTP.
pub fn status_url(host: &str) -> String {
    format!("http://{}{STATUS_PATH}", normalize_host(host))
}
