//! Column-major matrix handles: a vector handle plus the two dimensions.

use std::ptr;

use super::vector::{self, RawVector, Storable};
use super::{
    igraph_bool_t, igraph_error_t, igraph_integer_t, igraph_real_t, IGRAPH_EINVAL,
    IGRAPH_EOVERFLOW, IGRAPH_SUCCESS,
};

/// Layout shared by all matrix handles. Element `(r, c)` is `data[r + c * nrow]`.
#[repr(C)]
#[derive(Debug)]
pub struct RawMatrix<T> {
    pub data: RawVector<T>,
    pub nrow: igraph_integer_t,
    pub ncol: igraph_integer_t,
}

pub type igraph_matrix_int_t = RawMatrix<igraph_integer_t>;
pub type igraph_matrix_t = RawMatrix<igraph_real_t>;
pub type igraph_matrix_bool_t = RawMatrix<igraph_bool_t>;

fn element_count(nrow: igraph_integer_t, ncol: igraph_integer_t) -> Result<igraph_integer_t, igraph_error_t> {
    if nrow < 0 || ncol < 0 {
        return Err(IGRAPH_EINVAL);
    }
    nrow.checked_mul(ncol).ok_or(IGRAPH_EOVERFLOW)
}

pub(crate) unsafe fn init<T: Storable>(
    m: *mut RawMatrix<T>,
    nrow: igraph_integer_t,
    ncol: igraph_integer_t,
) -> igraph_error_t {
    let count = match element_count(nrow, ncol) {
        Ok(count) => count,
        Err(code) => return code,
    };
    let code = vector::init(ptr::addr_of_mut!((*m).data), count);
    if code != IGRAPH_SUCCESS {
        return code;
    }
    ptr::addr_of_mut!((*m).nrow).write(nrow);
    ptr::addr_of_mut!((*m).ncol).write(ncol);
    IGRAPH_SUCCESS
}

pub(crate) unsafe fn init_copy<T: Storable>(
    to: *mut RawMatrix<T>,
    from: *const RawMatrix<T>,
) -> igraph_error_t {
    let code = vector::init_copy(ptr::addr_of_mut!((*to).data), &(*from).data);
    if code != IGRAPH_SUCCESS {
        return code;
    }
    ptr::addr_of_mut!((*to).nrow).write((*from).nrow);
    ptr::addr_of_mut!((*to).ncol).write((*from).ncol);
    IGRAPH_SUCCESS
}

pub(crate) unsafe fn update<T: Storable>(
    to: *mut RawMatrix<T>,
    from: *const RawMatrix<T>,
) -> igraph_error_t {
    if ptr::eq(to, from) {
        return IGRAPH_SUCCESS;
    }
    let code = vector::update(&mut (*to).data, &(*from).data);
    if code != IGRAPH_SUCCESS {
        return code;
    }
    (*to).nrow = (*from).nrow;
    (*to).ncol = (*from).ncol;
    IGRAPH_SUCCESS
}

pub(crate) unsafe fn resize<T: Storable>(
    m: *mut RawMatrix<T>,
    nrow: igraph_integer_t,
    ncol: igraph_integer_t,
) -> igraph_error_t {
    let count = match element_count(nrow, ncol) {
        Ok(count) => count,
        Err(code) => return code,
    };
    let code = vector::resize(&mut (*m).data, count);
    if code != IGRAPH_SUCCESS {
        return code;
    }
    (*m).nrow = nrow;
    (*m).ncol = ncol;
    IGRAPH_SUCCESS
}

macro_rules! matrix_api {
    (
        $handle:ty;
        $init:ident, $init_copy:ident, $update:ident, $resize:ident, $reserve:ident,
        $resize_min:ident, $clear:ident, $destroy:ident, $size:ident, $nrow:ident,
        $ncol:ident, $capacity:ident
    ) => {
        pub unsafe extern "C" fn $init(m: *mut $handle, nrow: igraph_integer_t, ncol: igraph_integer_t) -> igraph_error_t {
            init(m, nrow, ncol)
        }

        pub unsafe extern "C" fn $init_copy(to: *mut $handle, from: *const $handle) -> igraph_error_t {
            init_copy(to, from)
        }

        pub unsafe extern "C" fn $update(to: *mut $handle, from: *const $handle) -> igraph_error_t {
            update(to, from)
        }

        pub unsafe extern "C" fn $resize(m: *mut $handle, nrow: igraph_integer_t, ncol: igraph_integer_t) -> igraph_error_t {
            resize(m, nrow, ncol)
        }

        pub unsafe extern "C" fn $reserve(m: *mut $handle, capacity: igraph_integer_t) -> igraph_error_t {
            vector::reserve(&mut (*m).data, capacity)
        }

        pub unsafe extern "C" fn $resize_min(m: *mut $handle) {
            vector::resize_min(&mut (*m).data)
        }

        /// Drops all elements and sets both dimensions to zero. Capacity is kept.
        pub unsafe extern "C" fn $clear(m: *mut $handle) {
            vector::clear(&mut (*m).data);
            (*m).nrow = 0;
            (*m).ncol = 0;
        }

        pub unsafe extern "C" fn $destroy(m: *mut $handle) {
            vector::destroy(&mut (*m).data)
        }

        pub unsafe extern "C" fn $size(m: *const $handle) -> igraph_integer_t {
            vector::size(&(*m).data)
        }

        pub unsafe extern "C" fn $nrow(m: *const $handle) -> igraph_integer_t {
            (*m).nrow
        }

        pub unsafe extern "C" fn $ncol(m: *const $handle) -> igraph_integer_t {
            (*m).ncol
        }

        pub unsafe extern "C" fn $capacity(m: *const $handle) -> igraph_integer_t {
            vector::capacity(&(*m).data)
        }
    };
}

matrix_api!(
    igraph_matrix_int_t;
    igraph_matrix_int_init, igraph_matrix_int_init_copy, igraph_matrix_int_update,
    igraph_matrix_int_resize, igraph_matrix_int_reserve, igraph_matrix_int_resize_min,
    igraph_matrix_int_clear, igraph_matrix_int_destroy, igraph_matrix_int_size,
    igraph_matrix_int_nrow, igraph_matrix_int_ncol, igraph_matrix_int_capacity
);

matrix_api!(
    igraph_matrix_t;
    igraph_matrix_init, igraph_matrix_init_copy, igraph_matrix_update,
    igraph_matrix_resize, igraph_matrix_reserve, igraph_matrix_resize_min,
    igraph_matrix_clear, igraph_matrix_destroy, igraph_matrix_size,
    igraph_matrix_nrow, igraph_matrix_ncol, igraph_matrix_capacity
);

matrix_api!(
    igraph_matrix_bool_t;
    igraph_matrix_bool_init, igraph_matrix_bool_init_copy, igraph_matrix_bool_update,
    igraph_matrix_bool_resize, igraph_matrix_bool_reserve, igraph_matrix_bool_resize_min,
    igraph_matrix_bool_clear, igraph_matrix_bool_destroy, igraph_matrix_bool_size,
    igraph_matrix_bool_nrow, igraph_matrix_bool_ncol, igraph_matrix_bool_capacity
);
