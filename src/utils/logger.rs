/// Debug logging utility
///
/// `env_logger` does the actual output; the macros below add a process-wide switch so
/// the CLI's `--quiet` flag can silence debug chatter without touching `RUST_LOG`.
use std::sync::OnceLock;

// Lets the exported macros reach `log` from crates that do not depend on it
#[doc(hidden)]
pub use log;

static DEBUG_ENABLED: OnceLock<bool> = OnceLock::new();

/// Initialize logging: the env_logger backend plus the debug switch
///
/// Only the first call has any effect.
pub fn init_logging(debug: bool) {
    let _ = DEBUG_ENABLED.set(debug);

    let default_filter = if debug { "debug" } else { "warn" };
    let _ = env_logger::Builder
        ::from_env(env_logger::Env::default().default_filter_or(default_filter))
        .try_init();

    log::debug!("🐛 Debug logging {}", if debug { "enabled" } else { "disabled" });
}

/// Check if debug logging is enabled
///
/// Defaults to enabled when `init_logging` was never called (tests, library users)
pub fn is_debug_enabled() -> bool {
    *DEBUG_ENABLED.get().unwrap_or(&true)
}

/// Debug print macro - only logs if debug output is enabled
#[macro_export]
macro_rules! debug_print {
    ($($arg:tt)*) => {
        if $crate::utils::logger::is_debug_enabled() {
            $crate::utils::logger::log::debug!($($arg)*);
        }
    };
}

/// Debug error print macro - only logs if debug output is enabled
#[macro_export]
macro_rules! debug_eprint {
    ($($arg:tt)*) => {
        if $crate::utils::logger::is_debug_enabled() {
            $crate::utils::logger::log::warn!($($arg)*);
        }
    };
}

/// Always error print macro - for critical errors that should always show
#[macro_export]
macro_rules! always_eprint {
    ($($arg:tt)*) => {
        $crate::utils::logger::log::error!($($arg)*)
    };
}
