//! Random number generators and the per-thread default generator.
//!
//! Library routines draw from whatever [`igraph_rng_default`] returns. Each
//! thread starts with a built-in generator; [`igraph_rng_set_default`] swaps
//! in another one and hands back the previous default so it can be restored.

use std::cell::{Cell, UnsafeCell};
use std::fmt;
use std::ptr;
use std::sync::Mutex;

use rand::rngs::StdRng;
use rand::{Rng, RngCore, SeedableRng};
use rand_chacha::ChaCha20Rng;

use super::{fault, igraph_error_t, igraph_integer_t, igraph_real_t, IGRAPH_EINVAL, IGRAPH_ENOMEM, IGRAPH_SUCCESS};

/// Descriptor for a family of generators.
pub struct igraph_rng_type_t {
    pub name: &'static str,
    create: fn(u64) -> Box<dyn RngCore>,
}

impl fmt::Debug for igraph_rng_type_t {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("igraph_rng_type_t").field("name", &self.name).finish()
    }
}

fn create_std(seed: u64) -> Box<dyn RngCore> {
    Box::new(StdRng::seed_from_u64(seed))
}

fn create_chacha20(seed: u64) -> Box<dyn RngCore> {
    Box::new(ChaCha20Rng::seed_from_u64(seed))
}

pub static igraph_rngtype_std: igraph_rng_type_t = igraph_rng_type_t {
    name: "std",
    create: create_std,
};

pub static igraph_rngtype_chacha20: igraph_rng_type_t = igraph_rng_type_t {
    name: "chacha20",
    create: create_chacha20,
};

/// Generator handle.
pub struct igraph_rng_t {
    type_: *const igraph_rng_type_t,
    state: Option<Box<dyn RngCore>>,
    seeded: bool,
}

impl fmt::Debug for igraph_rng_t {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("igraph_rng_t")
            .field("type", &unsafe { self.type_.as_ref() }.map(|t| t.name))
            .field("initialized", &self.state.is_some())
            .field("seeded", &self.seeded)
            .finish()
    }
}

struct BuiltinSeed {
    type_: &'static igraph_rng_type_t,
    seed: u64,
}

static BUILTIN_SEED: Mutex<BuiltinSeed> = Mutex::new(BuiltinSeed {
    type_: &igraph_rngtype_std,
    seed: 0,
});

fn builtin_rng() -> igraph_rng_t {
    let builtin = BUILTIN_SEED.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
    igraph_rng_t {
        type_: builtin.type_,
        state: Some((builtin.type_.create)(builtin.seed)),
        seeded: true,
    }
}

thread_local! {
    static BUILTIN_RNG: UnsafeCell<igraph_rng_t> = UnsafeCell::new(builtin_rng());
    static CURRENT: Cell<*mut igraph_rng_t> = const { Cell::new(ptr::null_mut()) };
}

fn builtin_ptr() -> *mut igraph_rng_t {
    BUILTIN_RNG.with(|cell| cell.get())
}

/// Initialise `rng` with the given type and a fixed default seed of zero.
pub unsafe fn igraph_rng_init(
    rng: *mut igraph_rng_t,
    type_: *const igraph_rng_type_t,
) -> igraph_error_t {
    if type_.is_null() {
        return IGRAPH_EINVAL;
    }
    if !fault::acquire() {
        return IGRAPH_ENOMEM;
    }
    rng.write(igraph_rng_t {
        type_,
        state: Some(((*type_).create)(0)),
        seeded: false,
    });
    IGRAPH_SUCCESS
}

pub unsafe fn igraph_rng_seed(rng: *mut igraph_rng_t, seed: u64) -> igraph_error_t {
    if (*rng).state.is_none() || (*rng).type_.is_null() {
        return IGRAPH_EINVAL;
    }
    if !fault::acquire() {
        return IGRAPH_ENOMEM;
    }
    (*rng).state = Some(((*(*rng).type_).create)(seed));
    (*rng).seeded = true;
    IGRAPH_SUCCESS
}

pub unsafe fn igraph_rng_destroy(rng: *mut igraph_rng_t) {
    (*rng).state = None;
}

/// The generator library routines currently draw from on this thread.
pub unsafe fn igraph_rng_default() -> *mut igraph_rng_t {
    let current = CURRENT.with(|current| current.get());
    if current.is_null() {
        builtin_ptr()
    } else {
        current
    }
}

/// Install `rng` as this thread's default, returning the previous default.
pub unsafe fn igraph_rng_set_default(rng: *mut igraph_rng_t) -> *mut igraph_rng_t {
    let previous = igraph_rng_default();
    CURRENT.with(|current| current.set(rng));
    previous
}

/// Choose the type and seed of the built-in default generator.
///
/// Threads that have not touched their built-in generator yet pick this up on
/// first use; the calling thread's built-in generator is re-created at once.
pub unsafe fn igraph_rng_configure_builtin(type_: &'static igraph_rng_type_t, seed: u64) {
    {
        let mut builtin = BUILTIN_SEED.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
        builtin.type_ = type_;
        builtin.seed = seed;
    }
    *builtin_ptr() = builtin_rng();
    log::debug!("built-in RNG configured as {} with seed {}", type_.name, seed);
}

/// Uniform integer in `[l, h]`.
pub unsafe fn igraph_rng_get_integer(
    rng: *mut igraph_rng_t,
    l: igraph_integer_t,
    h: igraph_integer_t,
) -> igraph_integer_t {
    match (*rng).state.as_mut() {
        Some(state) if l < h => state.gen_range(l..=h),
        _ => l,
    }
}

/// Uniform real in `[0, 1)`.
pub unsafe fn igraph_rng_get_unif01(rng: *mut igraph_rng_t) -> igraph_real_t {
    match (*rng).state.as_mut() {
        Some(state) => state.gen::<f64>(),
        None => 0.0,
    }
}

pub unsafe fn igraph_rng_name(rng: *const igraph_rng_t) -> &'static str {
    match (*rng).type_.as_ref() {
        Some(type_) => type_.name,
        None => "",
    }
}

#[cfg(test)]
mod tests {
    use std::mem::MaybeUninit;

    use super::*;

    unsafe fn seeded(type_: &'static igraph_rng_type_t, seed: u64) -> igraph_rng_t {
        let mut raw = MaybeUninit::uninit();
        assert_eq!(igraph_rng_init(raw.as_mut_ptr(), type_), IGRAPH_SUCCESS);
        let mut rng = raw.assume_init();
        assert_eq!(igraph_rng_seed(&mut rng, seed), IGRAPH_SUCCESS);
        rng
    }

    #[test]
    fn same_seed_same_stream() {
        unsafe {
            let mut a = seeded(&igraph_rngtype_chacha20, 7);
            let mut b = seeded(&igraph_rngtype_chacha20, 7);
            for _ in 0..10 {
                assert_eq!(
                    igraph_rng_get_integer(&mut a, 0, 1_000_000),
                    igraph_rng_get_integer(&mut b, 0, 1_000_000)
                );
            }
            assert_eq!(igraph_rng_name(&a), "chacha20");
            igraph_rng_destroy(&mut a);
            igraph_rng_destroy(&mut b);
        }
    }

    #[test]
    fn set_default_returns_previous() {
        unsafe {
            let builtin = igraph_rng_default();
            let mut mine = seeded(&igraph_rngtype_std, 1);
            let previous = igraph_rng_set_default(&mut mine);
            assert_eq!(previous, builtin);
            assert_eq!(igraph_rng_default(), &mut mine as *mut igraph_rng_t);
            igraph_rng_set_default(previous);
            assert_eq!(igraph_rng_default(), builtin);
            igraph_rng_destroy(&mut mine);
        }
    }

    #[test]
    fn unif01_stays_in_range() {
        unsafe {
            let mut rng = seeded(&igraph_rngtype_std, 3);
            for _ in 0..100 {
                let x = igraph_rng_get_unif01(&mut rng);
                assert!((0.0..1.0).contains(&x));
            }
            igraph_rng_destroy(&mut rng);
        }
    }

    #[test]
    fn seeding_fails_without_budget() {
        unsafe {
            let mut rng = seeded(&igraph_rngtype_std, 3);
            let _guard = fault::fail_after(0);
            assert_eq!(igraph_rng_seed(&mut rng, 4), IGRAPH_ENOMEM);
            igraph_rng_destroy(&mut rng);
        }
    }
}
