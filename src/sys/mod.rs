//! C-shaped surface of the wrapped graph library.
//!
//! Everything in here follows the conventions of the library's C API: handles
//! are plain structs holding raw storage pointers, every fallible function
//! returns an [`igraph_error_t`] status code, and callers are responsible for
//! pairing each successful `*_init` with exactly one `*_destroy`.
//!
//! The safe wrappers in this crate only reach these functions through the
//! [`crate::binding`] traits and the graph/RNG owners, so the layer can be
//! swapped for generated bindings without touching them.
//!
//! Allocation failures can be simulated per thread with [`fault::fail_after`].
#![allow(non_camel_case_types)]
#![allow(non_upper_case_globals)]
#![allow(clippy::missing_safety_doc)]

use std::os::raw::c_int;
use std::sync::atomic::{AtomicBool, Ordering};

pub mod fault;
pub mod graph;
pub mod matrix;
pub mod rng;
pub mod vector;

pub use graph::*;
pub use matrix::*;
pub use rng::*;
pub use vector::*;

/// Integer type used for sizes, indices and integer payloads.
pub type igraph_integer_t = i64;

/// Floating-point payload type.
pub type igraph_real_t = f64;

/// Boolean payload type.
pub type igraph_bool_t = bool;

/// Status code returned by every fallible function.
pub type igraph_error_t = c_int;

pub const IGRAPH_SUCCESS: igraph_error_t = 0;
pub const IGRAPH_FAILURE: igraph_error_t = 1;
pub const IGRAPH_ENOMEM: igraph_error_t = 2;
pub const IGRAPH_EINVAL: igraph_error_t = 4;
pub const IGRAPH_EINVVID: igraph_error_t = 7;
pub const IGRAPH_EOVERFLOW: igraph_error_t = 55;

static SETUP_DONE: AtomicBool = AtomicBool::new(false);

/// One-time library setup. Safe to call repeatedly.
pub unsafe extern "C" fn igraph_setup() -> igraph_error_t {
    if !SETUP_DONE.swap(true, Ordering::AcqRel) {
        log::debug!("igraph library setup complete");
    }
    IGRAPH_SUCCESS
}

/// Human-readable description of a status code.
pub fn igraph_strerror(code: igraph_error_t) -> &'static str {
    match code {
        IGRAPH_SUCCESS => "no error",
        IGRAPH_FAILURE => "failed",
        IGRAPH_ENOMEM => "out of memory",
        IGRAPH_EINVAL => "invalid value",
        IGRAPH_EINVVID => "invalid vertex ID",
        IGRAPH_EOVERFLOW => "integer or buffer overflow",
        _ => "unknown error",
    }
}
