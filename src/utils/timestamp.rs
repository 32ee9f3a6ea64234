use chrono::{DateTime, NaiveDateTime};

/// Render an ISO-8601 timestamp as `dd.mm.yyyy, HH:MM:SS`. Unparseable
/// input is returned unchanged.
pub fn format_timestamp(raw: &str) -> String {
    const FORMAT: &str = "%d.%m.%Y, %H:%M:%S";
    let raw = raw.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return dt.format(FORMAT).to_string();
    }
    if let Ok(dt) = NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f") {
        return dt.format(FORMAT).to_string();
    }
    raw.to_string()
}
