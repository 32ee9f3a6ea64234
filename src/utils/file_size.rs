const UNITS: [&str; 5] = ["Bytes", "KB", "MB", "GB", "TB"];

/// Human-readable size with binary (1024) steps, at most two decimals.
///
/// The unit is `floor(log_1024(bytes))`, clamped to the last unit, so a
/// petabyte still prints in TB.
pub fn format_file_size(bytes: u64) -> String {
    if bytes == 0 {
        return "0 Bytes".to_string();
    }
    let index = (bytes.ilog(1024) as usize).min(UNITS.len() - 1);
    let value = bytes as f64 / 1024f64.powi(index as i32);
    let rounded = (value * 100.0).round() / 100.0;
    format!("{} {}", rounded, UNITS[index])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_is_special_cased() {
        assert_eq!(format_file_size(0), "0 Bytes");
    }

    #[test]
    fn picks_unit_by_power_of_1024() {
        assert_eq!(format_file_size(1), "1 Bytes");
        assert_eq!(format_file_size(1023), "1023 Bytes");
        assert_eq!(format_file_size(1024), "1 KB");
        assert_eq!(format_file_size(1536), "1.5 KB");
        assert_eq!(format_file_size(1024 * 1024), "1 MB");
        assert_eq!(format_file_size(1_073_741_824), "1 GB");
        assert_eq!(format_file_size(4_700_000_000), "4.38 GB");
    }

    #[test]
    fn clamps_to_terabytes() {
        assert_eq!(format_file_size(1024u64.pow(4)), "1 TB");
        assert_eq!(format_file_size(1024u64.pow(5)), "1024 TB");
    }

    #[test]
    fn rounds_to_two_decimals() {
        // 1234567 / 1024^2 = 1.17737...
        assert_eq!(format_file_size(1_234_567), "1.18 MB");
    }
}
