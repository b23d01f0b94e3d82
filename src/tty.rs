//! Terminal I/O utilities for CLI.
//!
//! Provides TTY detection and status output.

use std::io::{self, IsTerminal};

pub fn is_stdin_tty() -> bool {
    io::stdin().is_terminal()
}

pub fn is_stderr_tty() -> bool {
    io::stderr().is_terminal()
}

/// Questions are only asked when a human can answer them.
pub fn can_prompt() -> bool {
    is_stdin_tty() && is_stderr_tty()
}

/// Print status message to stderr if running in a terminal.
pub fn status(message: &str) {
    if is_stderr_tty() {
        eprintln!("{}", message);
    }
}

// log_status! macro is defined in lib.rs (#[macro_export]) and available crate-wide.
