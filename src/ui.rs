use colored::Colorize;
use std::io::{self, Write};
use std::sync::atomic::{AtomicBool, Ordering};

static STATUS_TO_STDERR: AtomicBool = AtomicBool::new(false);

/// Send every status line to stderr, leaving stdout for machine-readable output
pub fn route_status_to_stderr() {
    STATUS_TO_STDERR.store(true, Ordering::Relaxed);
}

pub fn status_goes_to_stderr() -> bool {
    STATUS_TO_STDERR.load(Ordering::Relaxed)
}

fn emit(line: String) {
    if status_goes_to_stderr() {
        eprintln!("{line}");
    } else {
        println!("{line}");
    }
}

/// Print a status message with a spinner-like indicator
pub fn status_message(message: &str) {
    emit(format!("{} {} ... ", "⏳".yellow(), message.bright_white()));
    let _ = io::stdout().flush();
}

/// Print a success message
pub fn success_message(message: &str) {
    emit(format!("{} {}", "✅".green(), message.green()));
}

/// Print a warning message
pub fn warning_message(message: &str) {
    emit(format!("{} {}", "⚠️ ".yellow(), message.yellow()));
}

/// Print a section header to separate logical sections of output
pub fn section_header(title: &str) {
    emit(format!("\n{}", format!("==== {title} ====").cyan().bold()));
}

/// Print a simple informational message
pub fn info_message(message: &str) {
    emit(format!("{} {}", "ℹ️ ".blue(), message.blue()));
}

/// Print a labelled block of multi-line text, indented under its label
pub fn detail_block(label: &str, text: &str) {
    emit(format!("  {}", format!("{label}:").cyan()));
    for line in text.lines() {
        emit(format!("    {}", line.dimmed()));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_can_be_routed_to_stderr() {
        route_status_to_stderr();
        assert!(status_goes_to_stderr());
    }
}
