//! Styled terminal messages.

use console::style;

/// Check if color output is disabled via `NO_COLOR` env var.
#[must_use]
pub fn is_color_disabled() -> bool {
    std::env::var_os("NO_COLOR").is_some()
}

/// Render a section header.
#[must_use]
pub fn header(text: &str, color: bool) -> String {
    let plain = format!("=== {text} ===");
    if color {
        style(plain).bold().cyan().to_string()
    } else {
        plain
    }
}

/// Render a tag such as `[OK]` or `[ERROR]`.
#[must_use]
pub fn tag(ok: bool, color: bool) -> String {
    let plain = if ok { "[OK]" } else { "[ERROR]" };
    match (color, ok) {
        (false, _) => plain.to_string(),
        (true, true) => style(plain).green().bold().to_string(),
        (true, false) => style(plain).red().bold().to_string(),
    }
}

/// Print a styled header.
pub fn print_header(text: &str) {
    println!("{}", header(text, !is_color_disabled()));
}

/// Print an error message to stderr.
pub fn print_error(text: &str) {
    eprintln!("{} {text}", tag(false, !is_color_disabled()));
}
