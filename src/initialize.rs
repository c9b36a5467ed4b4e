use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Mutex;

use crate::config::Config;
use crate::error::{check_code, Result};
use crate::sys;

static INITIALIZED: AtomicBool = AtomicBool::new(false);
static INIT_LOCK: Mutex<()> = Mutex::new(());

/// Perform the library's one-time setup with [`Config::default`].
///
/// Returns `true` if the library had already been initialised, in which case
/// nothing is changed.
pub fn initialize() -> Result<bool> {
    initialize_with(&Config::default())
}

/// Perform the library's one-time setup and configure the built-in default
/// generator from `config`.
///
/// Only the first successful call has any effect; later calls return
/// `Ok(true)` without applying their config.
pub fn initialize_with(config: &Config) -> Result<bool> {
    if INITIALIZED.load(Ordering::Acquire) {
        return Ok(true);
    }
    let _guard = INIT_LOCK.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
    if INITIALIZED.load(Ordering::Acquire) {
        return Ok(true);
    }

    check_code(unsafe { sys::igraph_setup() }, "set up library")?;
    unsafe { sys::igraph_rng_configure_builtin(config.rng_kind.rng_type(), config.default_seed) };
    log::info!(
        "Initialized igraph with {} RNG (default seed {})",
        config.rng_kind.name(),
        config.default_seed
    );
    Ok(INITIALIZED.swap(true, Ordering::AcqRel))
}

/// Whether [`initialize`] or [`initialize_with`] has completed.
pub fn is_initialized() -> bool {
    INITIALIZED.load(Ordering::Acquire)
}
