//! Per-element-type bindings to the foreign vector and matrix functions.
//!
//! The library exposes a separate family of free functions for each element
//! type (`igraph_vector_int_*`, `igraph_vector_*`, `igraph_vector_bool_*`, and
//! the same for matrices). A binding is a zero-sized marker type that maps the
//! generic container operations onto one of those families, so
//! [`Vector`](crate::Vector) and [`Matrix`](crate::Matrix) are written once and
//! monomorphised per element type.

use std::fmt::Debug;

use crate::sys::{self, igraph_bool_t, igraph_error_t, igraph_integer_t, Storable};

/// Foreign primitives backing [`Vector`](crate::Vector).
///
/// # Safety
///
/// Implementors must forward to functions that honour the handle protocol:
/// `init`/`init_copy` fully initialise the handle on success and leave it
/// untouched on failure, every other fallible call leaves the handle in its
/// pre-call state on failure, and `begin` points at `size` initialised values.
pub unsafe trait VectorBinding: 'static {
    /// Element type stored in the handle.
    type Value: Storable + PartialEq + Debug;
    /// The foreign handle type.
    type Raw;

    const TYPE_NAME: &'static str;

    unsafe fn init(raw: *mut Self::Raw, size: igraph_integer_t) -> igraph_error_t;
    unsafe fn init_copy(raw: *mut Self::Raw, from: *const Self::Raw) -> igraph_error_t;
    unsafe fn update(raw: *mut Self::Raw, from: *const Self::Raw) -> igraph_error_t;
    unsafe fn resize(raw: *mut Self::Raw, size: igraph_integer_t) -> igraph_error_t;
    unsafe fn reserve(raw: *mut Self::Raw, capacity: igraph_integer_t) -> igraph_error_t;
    unsafe fn resize_min(raw: *mut Self::Raw);
    unsafe fn clear(raw: *mut Self::Raw);
    unsafe fn push_back(raw: *mut Self::Raw, value: Self::Value) -> igraph_error_t;
    unsafe fn pop_back(raw: *mut Self::Raw) -> Self::Value;
    unsafe fn insert(raw: *mut Self::Raw, pos: igraph_integer_t, value: Self::Value) -> igraph_error_t;
    unsafe fn remove(raw: *mut Self::Raw, pos: igraph_integer_t);
    unsafe fn remove_section(raw: *mut Self::Raw, from: igraph_integer_t, to: igraph_integer_t);
    unsafe fn destroy(raw: *mut Self::Raw);
    unsafe fn size(raw: *const Self::Raw) -> igraph_integer_t;
    unsafe fn empty(raw: *const Self::Raw) -> igraph_bool_t;
    unsafe fn capacity(raw: *const Self::Raw) -> igraph_integer_t;
    unsafe fn begin(raw: *const Self::Raw) -> *mut Self::Value;
    unsafe fn end(raw: *const Self::Raw) -> *mut Self::Value;
}

/// Foreign primitives backing [`Matrix`](crate::Matrix).
///
/// # Safety
///
/// Same contract as [`VectorBinding`]; additionally `size == nrow * ncol`
/// after every successful call and storage is column-major.
pub unsafe trait MatrixBinding: 'static {
    type Value: Storable + PartialEq + Debug;
    type Raw;
    /// Binding of the vectors produced by row and column copies.
    type Vector: VectorBinding<Value = Self::Value>;

    const TYPE_NAME: &'static str;

    unsafe fn init(raw: *mut Self::Raw, nrow: igraph_integer_t, ncol: igraph_integer_t) -> igraph_error_t;
    unsafe fn init_copy(raw: *mut Self::Raw, from: *const Self::Raw) -> igraph_error_t;
    unsafe fn update(raw: *mut Self::Raw, from: *const Self::Raw) -> igraph_error_t;
    unsafe fn resize(raw: *mut Self::Raw, nrow: igraph_integer_t, ncol: igraph_integer_t) -> igraph_error_t;
    unsafe fn reserve(raw: *mut Self::Raw, capacity: igraph_integer_t) -> igraph_error_t;
    unsafe fn resize_min(raw: *mut Self::Raw);
    unsafe fn clear(raw: *mut Self::Raw);
    unsafe fn destroy(raw: *mut Self::Raw);
    unsafe fn size(raw: *const Self::Raw) -> igraph_integer_t;
    unsafe fn nrow(raw: *const Self::Raw) -> igraph_integer_t;
    unsafe fn ncol(raw: *const Self::Raw) -> igraph_integer_t;
    unsafe fn capacity(raw: *const Self::Raw) -> igraph_integer_t;
    unsafe fn begin(raw: *const Self::Raw) -> *mut Self::Value;
}

/// Binding for `igraph_integer_t` elements.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Integer {}

/// Binding for `igraph_real_t` elements.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Real {}

/// Binding for `igraph_bool_t` elements.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Boolean {}

macro_rules! impl_vector_binding {
    (
        $marker:ty => $value:ty, $raw:ty, $name:literal;
        $init:path, $init_copy:path, $update:path, $resize:path, $reserve:path,
        $resize_min:path, $clear:path, $push_back:path, $pop_back:path, $insert:path,
        $remove:path, $remove_section:path, $destroy:path, $size:path, $empty:path,
        $capacity:path
    ) => {
        unsafe impl VectorBinding for $marker {
            type Value = $value;
            type Raw = $raw;

            const TYPE_NAME: &'static str = $name;

            unsafe fn init(raw: *mut $raw, size: igraph_integer_t) -> igraph_error_t {
                $init(raw, size)
            }
            unsafe fn init_copy(raw: *mut $raw, from: *const $raw) -> igraph_error_t {
                $init_copy(raw, from)
            }
            unsafe fn update(raw: *mut $raw, from: *const $raw) -> igraph_error_t {
                $update(raw, from)
            }
            unsafe fn resize(raw: *mut $raw, size: igraph_integer_t) -> igraph_error_t {
                $resize(raw, size)
            }
            unsafe fn reserve(raw: *mut $raw, capacity: igraph_integer_t) -> igraph_error_t {
                $reserve(raw, capacity)
            }
            unsafe fn resize_min(raw: *mut $raw) {
                $resize_min(raw)
            }
            unsafe fn clear(raw: *mut $raw) {
                $clear(raw)
            }
            unsafe fn push_back(raw: *mut $raw, value: $value) -> igraph_error_t {
                $push_back(raw, value)
            }
            unsafe fn pop_back(raw: *mut $raw) -> $value {
                $pop_back(raw)
            }
            unsafe fn insert(raw: *mut $raw, pos: igraph_integer_t, value: $value) -> igraph_error_t {
                $insert(raw, pos, value)
            }
            unsafe fn remove(raw: *mut $raw, pos: igraph_integer_t) {
                $remove(raw, pos)
            }
            unsafe fn remove_section(raw: *mut $raw, from: igraph_integer_t, to: igraph_integer_t) {
                $remove_section(raw, from, to)
            }
            unsafe fn destroy(raw: *mut $raw) {
                $destroy(raw)
            }
            unsafe fn size(raw: *const $raw) -> igraph_integer_t {
                $size(raw)
            }
            unsafe fn empty(raw: *const $raw) -> igraph_bool_t {
                $empty(raw)
            }
            unsafe fn capacity(raw: *const $raw) -> igraph_integer_t {
                $capacity(raw)
            }
            unsafe fn begin(raw: *const $raw) -> *mut $value {
                (*raw).stor_begin
            }
            unsafe fn end(raw: *const $raw) -> *mut $value {
                (*raw).end
            }
        }
    };
}

macro_rules! impl_matrix_binding {
    (
        $marker:ty => $value:ty, $raw:ty, $name:literal;
        $init:path, $init_copy:path, $update:path, $resize:path, $reserve:path,
        $resize_min:path, $clear:path, $destroy:path, $size:path, $nrow:path,
        $ncol:path, $capacity:path
    ) => {
        unsafe impl MatrixBinding for $marker {
            type Value = $value;
            type Raw = $raw;
            type Vector = $marker;

            const TYPE_NAME: &'static str = $name;

            unsafe fn init(raw: *mut $raw, nrow: igraph_integer_t, ncol: igraph_integer_t) -> igraph_error_t {
                $init(raw, nrow, ncol)
            }
            unsafe fn init_copy(raw: *mut $raw, from: *const $raw) -> igraph_error_t {
                $init_copy(raw, from)
            }
            unsafe fn update(raw: *mut $raw, from: *const $raw) -> igraph_error_t {
                $update(raw, from)
            }
            unsafe fn resize(raw: *mut $raw, nrow: igraph_integer_t, ncol: igraph_integer_t) -> igraph_error_t {
                $resize(raw, nrow, ncol)
            }
            unsafe fn reserve(raw: *mut $raw, capacity: igraph_integer_t) -> igraph_error_t {
                $reserve(raw, capacity)
            }
            unsafe fn resize_min(raw: *mut $raw) {
                $resize_min(raw)
            }
            unsafe fn clear(raw: *mut $raw) {
                $clear(raw)
            }
            unsafe fn destroy(raw: *mut $raw) {
                $destroy(raw)
            }
            unsafe fn size(raw: *const $raw) -> igraph_integer_t {
                $size(raw)
            }
            unsafe fn nrow(raw: *const $raw) -> igraph_integer_t {
                $nrow(raw)
            }
            unsafe fn ncol(raw: *const $raw) -> igraph_integer_t {
                $ncol(raw)
            }
            unsafe fn capacity(raw: *const $raw) -> igraph_integer_t {
                $capacity(raw)
            }
            unsafe fn begin(raw: *const $raw) -> *mut $value {
                (*raw).data.stor_begin
            }
        }
    };
}

impl_vector_binding!(
    Integer => sys::igraph_integer_t, sys::igraph_vector_int_t, "integer";
    sys::igraph_vector_int_init, sys::igraph_vector_int_init_copy, sys::igraph_vector_int_update,
    sys::igraph_vector_int_resize, sys::igraph_vector_int_reserve, sys::igraph_vector_int_resize_min,
    sys::igraph_vector_int_clear, sys::igraph_vector_int_push_back, sys::igraph_vector_int_pop_back,
    sys::igraph_vector_int_insert, sys::igraph_vector_int_remove, sys::igraph_vector_int_remove_section,
    sys::igraph_vector_int_destroy, sys::igraph_vector_int_size, sys::igraph_vector_int_empty,
    sys::igraph_vector_int_capacity
);

impl_vector_binding!(
    Real => sys::igraph_real_t, sys::igraph_vector_t, "real";
    sys::igraph_vector_init, sys::igraph_vector_init_copy, sys::igraph_vector_update,
    sys::igraph_vector_resize, sys::igraph_vector_reserve, sys::igraph_vector_resize_min,
    sys::igraph_vector_clear, sys::igraph_vector_push_back, sys::igraph_vector_pop_back,
    sys::igraph_vector_insert, sys::igraph_vector_remove, sys::igraph_vector_remove_section,
    sys::igraph_vector_destroy, sys::igraph_vector_size, sys::igraph_vector_empty,
    sys::igraph_vector_capacity
);

impl_vector_binding!(
    Boolean => sys::igraph_bool_t, sys::igraph_vector_bool_t, "boolean";
    sys::igraph_vector_bool_init, sys::igraph_vector_bool_init_copy, sys::igraph_vector_bool_update,
    sys::igraph_vector_bool_resize, sys::igraph_vector_bool_reserve, sys::igraph_vector_bool_resize_min,
    sys::igraph_vector_bool_clear, sys::igraph_vector_bool_push_back, sys::igraph_vector_bool_pop_back,
    sys::igraph_vector_bool_insert, sys::igraph_vector_bool_remove, sys::igraph_vector_bool_remove_section,
    sys::igraph_vector_bool_destroy, sys::igraph_vector_bool_size, sys::igraph_vector_bool_empty,
    sys::igraph_vector_bool_capacity
);

impl_matrix_binding!(
    Integer => sys::igraph_integer_t, sys::igraph_matrix_int_t, "integer";
    sys::igraph_matrix_int_init, sys::igraph_matrix_int_init_copy, sys::igraph_matrix_int_update,
    sys::igraph_matrix_int_resize, sys::igraph_matrix_int_reserve, sys::igraph_matrix_int_resize_min,
    sys::igraph_matrix_int_clear, sys::igraph_matrix_int_destroy, sys::igraph_matrix_int_size,
    sys::igraph_matrix_int_nrow, sys::igraph_matrix_int_ncol, sys::igraph_matrix_int_capacity
);

impl_matrix_binding!(
    Real => sys::igraph_real_t, sys::igraph_matrix_t, "real";
    sys::igraph_matrix_init, sys::igraph_matrix_init_copy, sys::igraph_matrix_update,
    sys::igraph_matrix_resize, sys::igraph_matrix_reserve, sys::igraph_matrix_resize_min,
    sys::igraph_matrix_clear, sys::igraph_matrix_destroy, sys::igraph_matrix_size,
    sys::igraph_matrix_nrow, sys::igraph_matrix_ncol, sys::igraph_matrix_capacity
);

impl_matrix_binding!(
    Boolean => sys::igraph_bool_t, sys::igraph_matrix_bool_t, "boolean";
    sys::igraph_matrix_bool_init, sys::igraph_matrix_bool_init_copy, sys::igraph_matrix_bool_update,
    sys::igraph_matrix_bool_resize, sys::igraph_matrix_bool_reserve, sys::igraph_matrix_bool_resize_min,
    sys::igraph_matrix_bool_clear, sys::igraph_matrix_bool_destroy, sys::igraph_matrix_bool_size,
    sys::igraph_matrix_bool_nrow, sys::igraph_matrix_bool_ncol, sys::igraph_matrix_bool_capacity
);
