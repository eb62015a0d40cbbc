//! Formatting of win content for display.
//!
//! Wins are written one per line; display turns each non-empty line into a
//! bullet point, preserving the natural way people write lists.

/// Format win content as bullet lines.
///
/// Splits on newlines, drops empty lines, strips any existing bullet
/// characters, and prefixes each line with a bullet. A single line is
/// returned unchanged.
pub fn format_win_bullets(content: &str) -> String {
    let lines: Vec<&str> = content
        .lines()
        .map(str::trim)
        .filter(|l| !l.is_empty())
        .collect();

    match lines.as_slice() {
        [] => String::new(),
        [single] => (*single).to_string(),
        many => many
            .iter()
            .filter_map(|line| {
                let clean = line
                    .trim_start_matches(['\u{2022}', '-', '*', '+'])
                    .trim_start();
                (!clean.is_empty()).then(|| format!("\u{2022} {clean}"))
            })
            .collect::<Vec<_>>()
            .join("\n"),
    }
}

/// Bullet-format win content, truncated to `max_len` characters for
/// list previews. Appends an ellipsis when truncated.
pub fn format_win_preview(content: &str, max_len: usize) -> String {
    let formatted = format_win_bullets(content);
    if formatted.chars().count() <= max_len {
        return formatted;
    }
    let cut: String = formatted.chars().take(max_len.saturating_sub(3)).collect();
    format!("{}...", cut.trim_end())
}
