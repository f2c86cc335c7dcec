//! CLI output formatting utilities.

/// Output helper for CLI formatting.
pub struct Output;

impl Output {
    /// Print an info message.
    pub fn info(msg: &str) {
        println!(">> {}", msg);
    }

    /// Print a success message.
    pub fn success(msg: &str) {
        println!(">> {}", msg);
    }

    /// Print a warning message.
    pub fn warning(msg: &str) {
        eprintln!("!! {}", msg);
    }

    /// Print an error message.
    pub fn error(msg: &str) {
        eprintln!("!! {}", msg);
    }

    /// Print a header.
    pub fn header(msg: &str) {
        println!("\n{}", msg);
        println!("{}", "=".repeat(msg.len()));
    }

    /// Print a key-value pair.
    pub fn kv(key: &str, value: &str) {
        println!("  {}: {}", key, value);
    }

    /// Print a list item.
    pub fn list_item(msg: &str) {
        println!("  * {}", msg);
    }
}

/// Format duration in seconds to a human-readable string.
pub fn format_duration(seconds: f64) -> String {
    let total_seconds = seconds as u32;
    let minutes = total_seconds / 60;
    let secs = total_seconds % 60;

    if minutes > 0 {
        format!("{}m {}s", minutes, secs)
    } else {
        format!("{}s", secs)
    }
}

/// Truncate content with ellipsis, collapsing newlines.
pub fn content_preview(content: &str, max_len: usize) -> String {
    let content = content.replace('\n', " ");
    if content.chars().count() <= max_len {
        content
    } else {
        let truncated: String = content.chars().take(max_len).collect();
        format!("{}...", truncated)
    }
}
