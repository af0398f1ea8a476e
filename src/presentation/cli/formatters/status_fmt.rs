use colored::{ColoredString, Colorize};

/// Strips ANSI/OSC escape sequences from backend-supplied text to prevent
/// terminal injection.
#[must_use]
pub fn sanitize_terminal(input: &str) -> String {
    input.chars().filter(|c| *c != '\x1b').collect()
}

#[must_use]
pub fn ok_marker() -> ColoredString {
    "✔".green().bold()
}

#[must_use]
pub fn fail_marker() -> ColoredString {
    "✘".red().bold()
}

#[must_use]
pub fn section_header(title: &str) -> String {
    let display_width = title.chars().count();
    format!("{}\n{}", title.bold().cyan(), "─".repeat(display_width).cyan())
}

pub fn print_section_header(title: &str) {
    println!("{}", section_header(title));
}
