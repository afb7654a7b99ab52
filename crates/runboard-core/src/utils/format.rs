/// Format a distance in kilometers with one decimal place (`120.4`).
pub fn format_distance(km: f64) -> String {
    format!("{:.1}", km)
}

/// Format a percentage with one decimal place (`68.0%`).
pub fn format_percentage(percent: f64) -> String {
    format!("{:.1}%", percent)
}

/// Truncate a string to a maximum number of characters, adding ellipsis if needed
pub fn truncate_string(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else if max_len <= 3 {
        s.chars().take(max_len).collect()
    } else {
        let truncated: String = s.chars().take(max_len - 3).collect();
        format!("{}...", truncated)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_distance() {
        assert_eq!(format_distance(120.4), "120.4");
        assert_eq!(format_distance(340.24), "340.2");
        assert_eq!(format_distance(0.0), "0.0");
        assert_eq!(format_distance(7.0), "7.0");
    }

    #[test]
    fn test_format_percentage() {
        assert_eq!(format_percentage(68.04), "68.0%");
        assert_eq!(format_percentage(120.0), "120.0%");
    }

    #[test]
    fn test_truncate_string() {
        assert_eq!(truncate_string("Hello", 10), "Hello");
        assert_eq!(truncate_string("Hello World", 8), "Hello...");
        assert_eq!(truncate_string("Hi", 2), "Hi");
        assert_eq!(truncate_string("김철수마라톤", 5), "김철...");
    }
}
