//! Debug logging utilities
//!
//! Provides debug logging that only activates in debug builds.
//! In release builds, all debug_log! calls are no-ops.

use std::fs::OpenOptions;
use std::io::Write;
use std::sync::Mutex;

static DEBUG_FILE: Mutex<Option<std::fs::File>> = Mutex::new(None);

/// Log file written next to the working directory
pub const DEBUG_LOG_FILE: &str = "hubtheme-debug.log";

/// Initialize debug logging (only in debug builds)
#[cfg(debug_assertions)]
pub fn init() {
    let mut file_guard = match DEBUG_FILE.lock() {
        Ok(guard) => guard,
        Err(e) => e.into_inner(),
    };
    if file_guard.is_none() {
        if let Ok(file) = OpenOptions::new()
            .create(true)
            .append(true)
            .open(DEBUG_LOG_FILE)
        {
            *file_guard = Some(file);
            drop(file_guard);
            log("=== Debug session started ===");
        }
    }
}

#[cfg(not(debug_assertions))]
pub fn init() {}

/// Log a message to the debug log (only in debug builds)
#[cfg(debug_assertions)]
pub fn log(message: &str) {
    let timestamp = chrono::Local::now().format("%H:%M:%S%.3f");
    let line = format!("[{}] {}\n", timestamp, message);

    if let Ok(mut file_guard) = DEBUG_FILE.lock() {
        if let Some(file) = file_guard.as_mut() {
            let _ = file.write_all(line.as_bytes());
            let _ = file.flush();
        }
    }
}

#[cfg(not(debug_assertions))]
pub fn log(_message: &str) {}

/// Log a message with a category prefix
#[cfg(debug_assertions)]
pub fn log_category(category: &str, message: &str) {
    log(&format!("[{}] {}", category, message));
}

#[cfg(not(debug_assertions))]
pub fn log_category(_category: &str, _message: &str) {}

/// Log the outcome of a resolution and where the id came from
#[cfg(debug_assertions)]
pub fn log_resolve(source: &str, theme_id: &str) {
    log(&format!("[RESOLVE] {} -> {}", source, theme_id));
}

#[cfg(not(debug_assertions))]
pub fn log_resolve(_source: &str, _theme_id: &str) {}

/// Log a theme application to the document
#[cfg(debug_assertions)]
pub fn log_apply(theme_id: &str, mode: &str) {
    log(&format!("[APPLY] {} ({})", theme_id, mode));
}

#[cfg(not(debug_assertions))]
pub fn log_apply(_theme_id: &str, _mode: &str) {}

/// Log a swallowed preference store failure
#[cfg(debug_assertions)]
pub fn log_store_error(operation: &str, key: &str, error: &anyhow::Error) {
    log(&format!("[STORE] {} {} failed: {:#}", operation, key, error));
}

#[cfg(not(debug_assertions))]
pub fn log_store_error(_operation: &str, _key: &str, _error: &anyhow::Error) {}

/// Macro for convenient debug logging
#[macro_export]
macro_rules! debug_log {
    ($($arg:tt)*) => {
        $crate::debug::log(&format!($($arg)*))
    };
}
