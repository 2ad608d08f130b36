//! Helper to set the backtrace env var.

use std::sync::Once;

static INIT: Once = Once::new();

/// Sets `RUST_BACKTRACE=1` unless a value has already been provided.
///
/// Must be called before the async runtime or any other thread is started.
pub fn enable() {
    INIT.call_once(|| {
        if std::env::var_os("RUST_BACKTRACE").is_none() {
            // SAFETY: called from `main` before any other thread is spawned.
            unsafe { std::env::set_var("RUST_BACKTRACE", "1") };
        }
    });
}
