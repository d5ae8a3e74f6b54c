//! Message display macros.
//!
//! Every macro routes a [`Message`](super::Message) either to `tracing` (when
//! `WORKPULSE_DEBUG` or `RUST_LOG` is set) or to plain stdout/stderr. The
//! long-running monitor therefore gets structured logs when asked for them,
//! while one-shot commands print clean console output.
//!
//! ```rust,no_run
//! use workpulse::libs::messages::Message;
//! use workpulse::{msg_error, msg_info};
//!
//! msg_info!(Message::ActivitiesLoaded(3));
//! msg_error!(Message::ActivityCloseFailed("disk full".to_string()));
//! ```

use std::sync::OnceLock;

static DEBUG_MODE: OnceLock<bool> = OnceLock::new();

/// Returns `true` when structured logging was requested through the
/// environment. The lookup happens once per process.
#[doc(hidden)]
pub fn is_debug_mode() -> bool {
    *DEBUG_MODE.get_or_init(|| std::env::var("WORKPULSE_DEBUG").is_ok() || std::env::var("RUST_LOG").is_ok())
}

/// Shared body of the `msg_*` macros: `tracing` at `$level` in debug mode,
/// the `$console` printing macro otherwise.
#[doc(hidden)]
#[macro_export]
macro_rules! __msg_emit {
    ($level:ident, $console:ident, $prefix:expr, $msg:expr) => {
        if $crate::libs::messages::macros::is_debug_mode() {
            tracing::$level!("{}{}", $prefix, $msg);
        } else {
            $console!("{}{}", $prefix, $msg);
        }
    };
}

#[macro_export]
macro_rules! msg_print {
    ($msg:expr) => {
        $crate::__msg_emit!(info, println, "", $msg)
    };
    ($msg:expr, true) => {
        $crate::__msg_emit!(info, println, "\n", format!("{}\n", $msg))
    };
}

#[macro_export]
macro_rules! msg_success {
    ($msg:expr) => {
        $crate::__msg_emit!(info, println, "✅ ", $msg)
    };
}

#[macro_export]
macro_rules! msg_error {
    ($msg:expr) => {
        $crate::__msg_emit!(error, eprintln, "❌ ", $msg)
    };
}

#[macro_export]
macro_rules! msg_warning {
    ($msg:expr) => {
        $crate::__msg_emit!(warn, println, "⚠️ ", $msg)
    };
}

#[macro_export]
macro_rules! msg_info {
    ($msg:expr) => {
        $crate::__msg_emit!(info, println, "ℹ️ ", $msg)
    };
}

/// Debug output is dropped unless structured logging is enabled.
#[macro_export]
macro_rules! msg_debug {
    ($msg:expr) => {
        if $crate::libs::messages::macros::is_debug_mode() {
            tracing::debug!("🔍 {}", $msg);
        }
    };
}

#[macro_export]
macro_rules! msg_error_anyhow {
    ($msg:expr) => {
        anyhow::anyhow!("❌ {}", $msg)
    };
}

#[macro_export]
macro_rules! msg_bail_anyhow {
    ($msg:expr) => {
        anyhow::bail!("❌ {}", $msg)
    };
}
