//! Titled notifications on stderr.

use crate::ui;

const RED: &str = "31";
const YELLOW: &str = "33";
const GREEN: &str = "32";

fn paint(code: &str, text: &str) -> String {
    if ui::prefs().notify_color {
        format!("\u{1b}[{code}m{text}\u{1b}[0m")
    } else {
        text.to_string()
    }
}

/// Report a failed action: `{title}: {error chain}`.
pub fn error(title: &str, error: &anyhow::Error) {
    eprintln!("{}: {error:#}", paint(RED, title));
}

pub fn warn(message: &str) {
    if !ui::prefs().quiet {
        eprintln!("{}", paint(YELLOW, message));
    }
}

pub fn success(message: &str) {
    if !ui::prefs().quiet {
        eprintln!("{}", paint(GREEN, message));
    }
}
