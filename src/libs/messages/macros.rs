//! Message display macros with debug-aware routing.
//!
//! In normal mode messages go straight to the terminal (`println!` /
//! `eprintln!`). In debug mode they are emitted as `tracing` events instead,
//! so they interleave correctly with the library's own debug events.
//!
//! ## Debug Mode Detection
//!
//! Debug mode is on when either variable is set:
//! - **`TASKDESK_DEBUG`**: application-specific switch
//! - **`RUST_LOG`**: standard filter for `tracing-subscriber`
//!
//! ```text
//! msg_info!(..) ──▶ is_debug_mode()? ──yes──▶ tracing::info!
//!                                    └─no───▶ println!
//! ```
//!
//! ## Macro Categories
//!
//! - **`msg_print!`**: plain message
//! - **`msg_success!`** / **`msg_info!`** / **`msg_warning!`**: prefixed messages
//! - **`msg_error!`**: ❌ message on stderr
//! - **`msg_debug!`**: shown only in debug mode
//! - **`msg_error_anyhow!`**: builds an `anyhow::Error`

use std::sync::OnceLock;

/// Environment variable enabling debug output.
pub const DEBUG_ENV: &str = "TASKDESK_DEBUG";

static DEBUG_MODE: OnceLock<bool> = OnceLock::new();

/// Whether debug mode is enabled. Evaluated once per process.
#[doc(hidden)]
pub fn is_debug_mode() -> bool {
    *DEBUG_MODE.get_or_init(|| std::env::var(DEBUG_ENV).is_ok() || std::env::var("RUST_LOG").is_ok())
}

/// Prints a message.
///
/// ```rust,ignore
/// msg_print!(Message::ConfigSaved);
/// msg_print!(Message::TasksHeader(filter.to_string()), true); // surrounded by blank lines
/// ```
#[macro_export]
macro_rules! msg_print {
    ($msg:expr) => {
        if $crate::libs::messages::macros::is_debug_mode() {
            tracing::info!("{}", $msg);
        } else {
            println!("{}", $msg);
        }
    };
    ($msg:expr, true) => {
        if $crate::libs::messages::macros::is_debug_mode() {
            tracing::info!("\n{}\n", $msg);
        } else {
            println!("\n{}\n", $msg);
        }
    };
}

/// Prints a success message with a ✅ prefix.
#[macro_export]
macro_rules! msg_success {
    ($msg:expr) => {
        if $crate::libs::messages::macros::is_debug_mode() {
            tracing::info!("✅ {}", $msg);
        } else {
            println!("✅ {}", $msg);
        }
    };
}

/// Prints an error message with a ❌ prefix to stderr.
#[macro_export]
macro_rules! msg_error {
    ($msg:expr) => {
        if $crate::libs::messages::macros::is_debug_mode() {
            tracing::error!("❌ {}", $msg);
        } else {
            eprintln!("❌ {}", $msg);
        }
    };
}

/// Prints a warning message with a ⚠️ prefix.
#[macro_export]
macro_rules! msg_warning {
    ($msg:expr) => {
        if $crate::libs::messages::macros::is_debug_mode() {
            tracing::warn!("⚠️ {}", $msg);
        } else {
            println!("⚠️  {}", $msg);
        }
    };
}

/// Prints an informational message with an ℹ️ prefix.
#[macro_export]
macro_rules! msg_info {
    ($msg:expr) => {
        if $crate::libs::messages::macros::is_debug_mode() {
            tracing::info!("ℹ️ {}", $msg);
        } else {
            println!("ℹ️  {}", $msg);
        }
    };
}

/// Emits a debug message; silent outside debug mode.
#[macro_export]
macro_rules! msg_debug {
    ($msg:expr) => {
        if $crate::libs::messages::macros::is_debug_mode() {
            tracing::debug!("🔍 {}", $msg);
        }
    };
}

/// Creates an `anyhow::Error` from a message.
#[macro_export]
macro_rules! msg_error_anyhow {
    ($msg:expr) => {
        anyhow::anyhow!("❌ {}", $msg)
    };
}
