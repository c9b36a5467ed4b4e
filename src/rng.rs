//! Scoped replacement of the library's default random number generator.

use std::cell::RefCell;
use std::fmt;
use std::mem::MaybeUninit;
use std::ptr;

use crate::config::{Config, RngKind};
use crate::error::{check_code, Result};
use crate::sys;

thread_local! {
    /// Generators installed by live scopes on this thread, oldest first.
    static SCOPES: RefCell<Vec<*mut sys::igraph_rng_t>> = const { RefCell::new(Vec::new()) };
}

/// Seeded generator that is the library's default for as long as it lives.
///
/// Creating a scope installs its generator as the current thread's default;
/// dropping it restores whatever was the default before. Scopes nest in LIFO
/// order. If a scope is dropped while a newer one is still alive, the newer
/// one stays the default and later falls back to the most recent scope that
/// is still alive.
///
/// ```
/// use raiigraph::{rng, RngScope};
///
/// let first = {
///     let _scope = RngScope::new(7).unwrap();
///     rng::default_integer(0, 1_000_000)
/// };
/// let _scope = RngScope::new(7).unwrap();
/// assert_eq!(rng::default_integer(0, 1_000_000), first);
/// ```
pub struct RngScope {
    rng: Box<sys::igraph_rng_t>,
}

impl RngScope {
    /// Scope around a [`RngKind::Std`] generator seeded with `seed`.
    pub fn new(seed: u64) -> Result<Self> {
        Self::with_type_and_seed(RngKind::Std, seed)
    }

    /// Scope around a generator of `kind` with the library's fixed initial seed.
    pub fn with_type(kind: RngKind) -> Result<Self> {
        let rng = Self::init(kind)?;
        Ok(Self::install(rng))
    }

    pub fn with_type_and_seed(kind: RngKind, seed: u64) -> Result<Self> {
        let mut rng = Self::init(kind)?;
        if let Err(err) = check_code(unsafe { sys::igraph_rng_seed(&mut rng, seed) }, "seed RNG") {
            unsafe { sys::igraph_rng_destroy(&mut rng) };
            return Err(err);
        }
        Ok(Self::install(rng))
    }

    /// Scope using the generator kind and default seed from `config`.
    pub fn from_config(config: &Config) -> Result<Self> {
        Self::with_type_and_seed(config.rng_kind, config.default_seed)
    }

    fn init(kind: RngKind) -> Result<sys::igraph_rng_t> {
        let mut raw = MaybeUninit::uninit();
        check_code(
            unsafe { sys::igraph_rng_init(raw.as_mut_ptr(), kind.rng_type()) },
            "initialize RNG",
        )?;
        Ok(unsafe { raw.assume_init() })
    }

    fn install(rng: sys::igraph_rng_t) -> Self {
        let mut rng = Box::new(rng);
        let ptr: *mut sys::igraph_rng_t = &mut *rng;
        SCOPES.with(|scopes| scopes.borrow_mut().push(ptr));
        let previous = unsafe { sys::igraph_rng_set_default(ptr) };
        log::debug!(
            "installed {} RNG as default (replacing {})",
            unsafe { sys::igraph_rng_name(ptr) },
            unsafe { sys::igraph_rng_name(previous) }
        );
        Self { rng }
    }

    /// Name of the generator family, e.g. `"std"`.
    pub fn name(&self) -> &'static str {
        unsafe { sys::igraph_rng_name(&*self.rng) }
    }

    /// Whether this scope's generator is the current default.
    pub fn is_default(&self) -> bool {
        ptr::eq(unsafe { sys::igraph_rng_default() }, &*self.rng)
    }

    /// Uniform integer in `[low, high]` from this scope's generator.
    pub fn integer(&mut self, low: i64, high: i64) -> i64 {
        unsafe { sys::igraph_rng_get_integer(&mut *self.rng, low, high) }
    }

    /// Uniform real in `[0, 1)` from this scope's generator.
    pub fn unif01(&mut self) -> f64 {
        unsafe { sys::igraph_rng_get_unif01(&mut *self.rng) }
    }
}

impl Drop for RngScope {
    fn drop(&mut self) {
        let ptr: *mut sys::igraph_rng_t = &mut *self.rng;
        let fallback = SCOPES.with(|scopes| {
            let mut scopes = scopes.borrow_mut();
            if let Some(index) = scopes.iter().rposition(|&p| ptr::eq(p, ptr)) {
                scopes.remove(index);
            }
            scopes.last().copied().unwrap_or(ptr::null_mut())
        });
        unsafe {
            if self.is_default() {
                // A null default selects the thread's built-in generator.
                sys::igraph_rng_set_default(fallback);
                log::debug!("restored previous default RNG");
            }
            sys::igraph_rng_destroy(ptr);
        }
    }
}

impl fmt::Debug for RngScope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RngScope")
            .field("name", &self.name())
            .field("is_default", &self.is_default())
            .finish()
    }
}

/// Uniform integer in `[low, high]` from the current thread's default generator.
pub fn default_integer(low: i64, high: i64) -> i64 {
    // SAFETY: the default is either the built-in generator or one owned by a
    // live scope on this thread.
    unsafe { sys::igraph_rng_get_integer(sys::igraph_rng_default(), low, high) }
}

/// Uniform real in `[0, 1)` from the current thread's default generator.
pub fn default_unif01() -> f64 {
    unsafe { sys::igraph_rng_get_unif01(sys::igraph_rng_default()) }
}
