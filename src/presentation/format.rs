/// Human readable size, e.g. `0 Bytes`, `1.5 KB`, `4 MB`.
pub fn format_file_size(bytes: u64) -> String {
    if bytes == 0 {
        return "0 Bytes".to_string();
    }

    const UNITS: [&str; 4] = ["Bytes", "KB", "MB", "GB"];
    let mut value = bytes as f64;
    let mut unit = 0;
    while value >= 1024.0 && unit < UNITS.len() - 1 {
        value /= 1024.0;
        unit += 1;
    }

    let rounded = (value * 100.0).round() / 100.0;
    let text = format!("{:.2}", rounded);
    let text = text.trim_end_matches('0').trim_end_matches('.');
    format!("{} {}", text, UNITS[unit])
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CaptionUsage {
    Normal,
    Warning,
    Critical,
}

/// How close a caption is to the limit: past 80% warns, past 90% is critical.
pub fn caption_usage(length: usize, max: usize) -> CaptionUsage {
    let used = length.saturating_mul(10);
    if used > max.saturating_mul(9) {
        CaptionUsage::Critical
    } else if used > max.saturating_mul(8) {
        CaptionUsage::Warning
    } else {
        CaptionUsage::Normal
    }
}
