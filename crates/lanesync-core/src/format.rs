//! Display formatting for the attachment panel.

use chrono::{Local, TimeZone};

const KIB: f64 = 1024.0;
const MIB: f64 = 1024.0 * 1024.0;
const GIB: f64 = 1024.0 * 1024.0 * 1024.0;

/// Render a byte count as B / KB / MB / GB with one decimal place above
/// the smallest unit (12288 -> "12.0 KB").
pub fn human_size(bytes: i64) -> String {
    let b = bytes.max(0) as f64;
    if b < KIB {
        format!("{} B", bytes.max(0))
    } else if b < MIB {
        format!("{:.1} KB", b / KIB)
    } else if b < GIB {
        format!("{:.1} MB", b / MIB)
    } else {
        format!("{:.1} GB", b / GIB)
    }
}

/// Render an epoch-millisecond upload timestamp in the viewer's local time,
/// short month/day hour:minute ("Aug 23, 14:05").
pub fn format_uploaded_at(ms: i64) -> String {
    Local
        .timestamp_millis_opt(ms)
        .single()
        .map(|dt| dt.format("%b %-d, %H:%M").to_string())
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn human_size_units() {
        assert_eq!(human_size(0), "0 B");
        assert_eq!(human_size(512), "512 B");
        assert_eq!(human_size(1536), "1.5 KB");
        assert_eq!(human_size(12288), "12.0 KB");
        assert_eq!(human_size(5 * 1024 * 1024), "5.0 MB");
        assert_eq!(human_size(3 * 1024 * 1024 * 1024), "3.0 GB");
    }

    #[test]
    fn human_size_clamps_negatives() {
        assert_eq!(human_size(-1), "0 B");
    }

    #[test]
    fn uploaded_at_renders_short_local_format() {
        // Local-timezone dependent, so only check the shape.
        let rendered = format_uploaded_at(1_724_400_000_000);
        assert!(rendered.contains(','));
        assert!(rendered.contains(':'));
    }
}
