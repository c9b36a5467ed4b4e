//! Growable vector handles: `{stor_begin, stor_end, end}`.
//!
//! `stor_begin..stor_end` is the allocation and `stor_begin..end` the live
//! elements. Storage is always fully initialised: fresh slots hold the
//! element's default value, and slots exposed again by `resize` keep whatever
//! was last written there.

use std::alloc::{self, Layout};
use std::mem;
use std::ptr::{self, NonNull};

use super::{
    fault, igraph_bool_t, igraph_error_t, igraph_integer_t, igraph_real_t, IGRAPH_EINVAL,
    IGRAPH_ENOMEM, IGRAPH_EOVERFLOW, IGRAPH_SUCCESS,
};

/// Layout shared by all vector handles.
#[repr(C)]
#[derive(Debug)]
pub struct RawVector<T> {
    pub stor_begin: *mut T,
    pub stor_end: *mut T,
    pub end: *mut T,
}

pub type igraph_vector_int_t = RawVector<igraph_integer_t>;
pub type igraph_vector_t = RawVector<igraph_real_t>;
pub type igraph_vector_bool_t = RawVector<igraph_bool_t>;

/// Element types that can be held in foreign storage.
pub trait Storable: Copy + Default + 'static {}

impl Storable for igraph_integer_t {}
impl Storable for igraph_real_t {}
impl Storable for igraph_bool_t {}

/// Allocate `capacity` default-initialised slots. Zero capacity never allocates.
pub(crate) fn allocate<T: Storable>(capacity: usize) -> Option<NonNull<T>> {
    if capacity == 0 {
        return Some(NonNull::dangling());
    }
    if !fault::acquire() {
        log::trace!(
            "allocation budget exhausted for {} slots of {}",
            capacity,
            std::any::type_name::<T>()
        );
        return None;
    }
    let layout = Layout::array::<T>(capacity).ok()?;
    // SAFETY: `layout` has a non-zero size because capacity > 0 and none of
    // the storable types are zero-sized.
    let begin = NonNull::new(unsafe { alloc::alloc(layout) }.cast::<T>())?;
    for i in 0..capacity {
        // SAFETY: `i < capacity`, so the slot lies inside the new allocation.
        unsafe { begin.as_ptr().add(i).write(T::default()) };
    }
    log::trace!(
        "allocated {} slots of {}",
        capacity,
        std::any::type_name::<T>()
    );
    Some(begin)
}

/// Free storage obtained from [`allocate`].
pub(crate) unsafe fn release<T>(begin: *mut T, capacity: usize) {
    if capacity == 0 || begin.is_null() {
        return;
    }
    if let Ok(layout) = Layout::array::<T>(capacity) {
        alloc::dealloc(begin.cast(), layout);
    }
}

fn distance<T>(from: *const T, to: *const T) -> usize {
    (to as usize - from as usize) / mem::size_of::<T>()
}

unsafe fn stored_len<T>(v: *const RawVector<T>) -> usize {
    distance((*v).stor_begin, (*v).end)
}

unsafe fn allocated_len<T>(v: *const RawVector<T>) -> usize {
    distance((*v).stor_begin, (*v).stor_end)
}

unsafe fn grow_to<T: Storable>(v: *mut RawVector<T>, capacity: usize) -> igraph_error_t {
    let current = allocated_len(v);
    if capacity <= current {
        return IGRAPH_SUCCESS;
    }
    let Some(fresh) = allocate::<T>(capacity) else {
        return IGRAPH_ENOMEM;
    };
    let size = stored_len(v);
    let fresh = fresh.as_ptr();
    ptr::copy_nonoverlapping((*v).stor_begin, fresh, size);
    release((*v).stor_begin, current);
    (*v).stor_begin = fresh;
    (*v).stor_end = fresh.add(capacity);
    (*v).end = fresh.add(size);
    IGRAPH_SUCCESS
}

/// Make room for one more element, doubling the allocation when full.
unsafe fn ensure_spare<T: Storable>(v: *mut RawVector<T>) -> igraph_error_t {
    if (*v).end != (*v).stor_end {
        return IGRAPH_SUCCESS;
    }
    let capacity = allocated_len(v);
    let target = if capacity == 0 {
        Some(1)
    } else {
        capacity.checked_mul(2)
    };
    match target {
        Some(target) => grow_to(v, target),
        None => IGRAPH_EOVERFLOW,
    }
}

pub(crate) unsafe fn init<T: Storable>(v: *mut RawVector<T>, size: igraph_integer_t) -> igraph_error_t {
    let Ok(size) = usize::try_from(size) else {
        return IGRAPH_EINVAL;
    };
    let Some(begin) = allocate::<T>(size) else {
        return IGRAPH_ENOMEM;
    };
    let begin = begin.as_ptr();
    v.write(RawVector {
        stor_begin: begin,
        stor_end: begin.add(size),
        end: begin.add(size),
    });
    IGRAPH_SUCCESS
}

pub(crate) unsafe fn init_copy<T: Storable>(
    to: *mut RawVector<T>,
    from: *const RawVector<T>,
) -> igraph_error_t {
    let size = stored_len(from);
    let code = init(to, size as igraph_integer_t);
    if code != IGRAPH_SUCCESS {
        return code;
    }
    ptr::copy_nonoverlapping((*from).stor_begin, (*to).stor_begin, size);
    IGRAPH_SUCCESS
}

pub(crate) unsafe fn update<T: Storable>(
    to: *mut RawVector<T>,
    from: *const RawVector<T>,
) -> igraph_error_t {
    if ptr::eq(to, from) {
        return IGRAPH_SUCCESS;
    }
    let size = stored_len(from);
    let code = resize(to, size as igraph_integer_t);
    if code != IGRAPH_SUCCESS {
        return code;
    }
    ptr::copy_nonoverlapping((*from).stor_begin, (*to).stor_begin, size);
    IGRAPH_SUCCESS
}

pub(crate) unsafe fn resize<T: Storable>(v: *mut RawVector<T>, size: igraph_integer_t) -> igraph_error_t {
    let Ok(size) = usize::try_from(size) else {
        return IGRAPH_EINVAL;
    };
    let code = grow_to(v, size);
    if code != IGRAPH_SUCCESS {
        return code;
    }
    (*v).end = (*v).stor_begin.add(size);
    IGRAPH_SUCCESS
}

pub(crate) unsafe fn reserve<T: Storable>(v: *mut RawVector<T>, capacity: igraph_integer_t) -> igraph_error_t {
    match usize::try_from(capacity) {
        Ok(capacity) => grow_to(v, capacity),
        Err(_) => IGRAPH_EINVAL,
    }
}

pub(crate) unsafe fn resize_min<T: Storable>(v: *mut RawVector<T>) {
    let size = stored_len(v);
    let capacity = allocated_len(v);
    if size == capacity {
        return;
    }
    // Keeping the larger block is always valid, so a failed shrink is not an error.
    let Some(fresh) = allocate::<T>(size) else {
        return;
    };
    let fresh = fresh.as_ptr();
    ptr::copy_nonoverlapping((*v).stor_begin, fresh, size);
    release((*v).stor_begin, capacity);
    (*v).stor_begin = fresh;
    (*v).stor_end = fresh.add(size);
    (*v).end = fresh.add(size);
}

pub(crate) unsafe fn clear<T>(v: *mut RawVector<T>) {
    (*v).end = (*v).stor_begin;
}

pub(crate) unsafe fn push_back<T: Storable>(v: *mut RawVector<T>, value: T) -> igraph_error_t {
    let code = ensure_spare(v);
    if code != IGRAPH_SUCCESS {
        return code;
    }
    (*v).end.write(value);
    (*v).end = (*v).end.add(1);
    IGRAPH_SUCCESS
}

pub(crate) unsafe fn pop_back<T: Storable>(v: *mut RawVector<T>) -> T {
    debug_assert!(stored_len(v) > 0, "pop_back on an empty vector");
    (*v).end = (*v).end.sub(1);
    (*v).end.read()
}

pub(crate) unsafe fn insert<T: Storable>(
    v: *mut RawVector<T>,
    pos: igraph_integer_t,
    value: T,
) -> igraph_error_t {
    let size = stored_len(v);
    let pos = match usize::try_from(pos) {
        Ok(pos) if pos <= size => pos,
        _ => return IGRAPH_EINVAL,
    };
    let code = ensure_spare(v);
    if code != IGRAPH_SUCCESS {
        return code;
    }
    let begin = (*v).stor_begin;
    ptr::copy(begin.add(pos), begin.add(pos + 1), size - pos);
    begin.add(pos).write(value);
    (*v).end = begin.add(size + 1);
    IGRAPH_SUCCESS
}

pub(crate) unsafe fn remove_section<T>(
    v: *mut RawVector<T>,
    from: igraph_integer_t,
    to: igraph_integer_t,
) {
    let size = stored_len(v);
    let from = from.clamp(0, size as igraph_integer_t) as usize;
    let to = to.clamp(from as igraph_integer_t, size as igraph_integer_t) as usize;
    let begin = (*v).stor_begin;
    ptr::copy(begin.add(to), begin.add(from), size - to);
    (*v).end = begin.add(size - (to - from));
}

pub(crate) unsafe fn destroy<T>(v: *mut RawVector<T>) {
    release((*v).stor_begin, allocated_len(v));
    (*v).stor_begin = ptr::null_mut();
    (*v).stor_end = ptr::null_mut();
    (*v).end = ptr::null_mut();
}

pub(crate) unsafe fn size<T>(v: *const RawVector<T>) -> igraph_integer_t {
    stored_len(v) as igraph_integer_t
}

pub(crate) unsafe fn capacity<T>(v: *const RawVector<T>) -> igraph_integer_t {
    allocated_len(v) as igraph_integer_t
}

macro_rules! vector_api {
    (
        $elem:ty, $handle:ty;
        $init:ident, $init_copy:ident, $update:ident, $resize:ident, $reserve:ident,
        $resize_min:ident, $clear:ident, $push_back:ident, $pop_back:ident, $insert:ident,
        $remove:ident, $remove_section:ident, $destroy:ident, $size:ident, $empty:ident,
        $capacity:ident
    ) => {
        pub unsafe extern "C" fn $init(v: *mut $handle, size: igraph_integer_t) -> igraph_error_t {
            init(v, size)
        }

        pub unsafe extern "C" fn $init_copy(to: *mut $handle, from: *const $handle) -> igraph_error_t {
            init_copy(to, from)
        }

        pub unsafe extern "C" fn $update(to: *mut $handle, from: *const $handle) -> igraph_error_t {
            update(to, from)
        }

        pub unsafe extern "C" fn $resize(v: *mut $handle, size: igraph_integer_t) -> igraph_error_t {
            resize(v, size)
        }

        pub unsafe extern "C" fn $reserve(v: *mut $handle, capacity: igraph_integer_t) -> igraph_error_t {
            reserve(v, capacity)
        }

        pub unsafe extern "C" fn $resize_min(v: *mut $handle) {
            resize_min(v)
        }

        pub unsafe extern "C" fn $clear(v: *mut $handle) {
            clear(v)
        }

        pub unsafe extern "C" fn $push_back(v: *mut $handle, value: $elem) -> igraph_error_t {
            push_back(v, value)
        }

        pub unsafe extern "C" fn $pop_back(v: *mut $handle) -> $elem {
            pop_back(v)
        }

        pub unsafe extern "C" fn $insert(v: *mut $handle, pos: igraph_integer_t, value: $elem) -> igraph_error_t {
            insert(v, pos, value)
        }

        pub unsafe extern "C" fn $remove(v: *mut $handle, elem: igraph_integer_t) {
            remove_section(v, elem, elem + 1)
        }

        pub unsafe extern "C" fn $remove_section(v: *mut $handle, from: igraph_integer_t, to: igraph_integer_t) {
            remove_section(v, from, to)
        }

        pub unsafe extern "C" fn $destroy(v: *mut $handle) {
            destroy(v)
        }

        pub unsafe extern "C" fn $size(v: *const $handle) -> igraph_integer_t {
            size(v)
        }

        pub unsafe extern "C" fn $empty(v: *const $handle) -> igraph_bool_t {
            size(v) == 0
        }

        pub unsafe extern "C" fn $capacity(v: *const $handle) -> igraph_integer_t {
            capacity(v)
        }
    };
}

vector_api!(
    igraph_integer_t, igraph_vector_int_t;
    igraph_vector_int_init, igraph_vector_int_init_copy, igraph_vector_int_update,
    igraph_vector_int_resize, igraph_vector_int_reserve, igraph_vector_int_resize_min,
    igraph_vector_int_clear, igraph_vector_int_push_back, igraph_vector_int_pop_back,
    igraph_vector_int_insert, igraph_vector_int_remove, igraph_vector_int_remove_section,
    igraph_vector_int_destroy, igraph_vector_int_size, igraph_vector_int_empty,
    igraph_vector_int_capacity
);

vector_api!(
    igraph_real_t, igraph_vector_t;
    igraph_vector_init, igraph_vector_init_copy, igraph_vector_update,
    igraph_vector_resize, igraph_vector_reserve, igraph_vector_resize_min,
    igraph_vector_clear, igraph_vector_push_back, igraph_vector_pop_back,
    igraph_vector_insert, igraph_vector_remove, igraph_vector_remove_section,
    igraph_vector_destroy, igraph_vector_size, igraph_vector_empty,
    igraph_vector_capacity
);

vector_api!(
    igraph_bool_t, igraph_vector_bool_t;
    igraph_vector_bool_init, igraph_vector_bool_init_copy, igraph_vector_bool_update,
    igraph_vector_bool_resize, igraph_vector_bool_reserve, igraph_vector_bool_resize_min,
    igraph_vector_bool_clear, igraph_vector_bool_push_back, igraph_vector_bool_pop_back,
    igraph_vector_bool_insert, igraph_vector_bool_remove, igraph_vector_bool_remove_section,
    igraph_vector_bool_destroy, igraph_vector_bool_size, igraph_vector_bool_empty,
    igraph_vector_bool_capacity
);
