//! Output functions for consistent CLI formatting

use console::style;

/// Display a success step with detail
pub fn step_ok_detail(message: &str, detail: &str) {
    eprintln!("  {} {} ({})", style("[OK]").green(), message, style(detail).dim());
}

/// Display a warning step with hint
pub fn step_warn_hint(message: &str, hint: &str) {
    eprintln!("  {} {} - {}", style("[WARN]").yellow(), message, hint);
}

/// Display an info step
pub fn step_info(message: &str) {
    eprintln!("  {} {}", style("[INFO]").cyan(), message);
}

/// Display a remark/hint
pub fn remark(message: &str) {
    eprintln!("  {}", style(message).dim());
}
