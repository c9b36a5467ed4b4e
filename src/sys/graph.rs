//! Graph handles stored as a pair of endpoint vectors.

use std::ptr;

use super::vector::{self, RawVector};
use super::{
    igraph_bool_t, igraph_error_t, igraph_integer_t, igraph_vector_int_t, IGRAPH_EINVAL,
    IGRAPH_EINVVID, IGRAPH_EOVERFLOW, IGRAPH_SUCCESS,
};

/// Graph handle. Edge `e` runs from `from[e]` to `to[e]`.
#[repr(C)]
#[derive(Debug)]
pub struct igraph_t {
    pub n: igraph_integer_t,
    pub directed: igraph_bool_t,
    pub from: igraph_vector_int_t,
    pub to: igraph_vector_int_t,
}

unsafe fn init_endpoints(g: *mut igraph_t, edges: usize) -> igraph_error_t {
    let code = vector::init(ptr::addr_of_mut!((*g).from), edges as igraph_integer_t);
    if code != IGRAPH_SUCCESS {
        return code;
    }
    let code = vector::init(ptr::addr_of_mut!((*g).to), edges as igraph_integer_t);
    if code != IGRAPH_SUCCESS {
        vector::destroy(ptr::addr_of_mut!((*g).from));
    }
    code
}

/// Create a graph with `n` vertices and no edges.
pub unsafe extern "C" fn igraph_empty(
    g: *mut igraph_t,
    n: igraph_integer_t,
    directed: igraph_bool_t,
) -> igraph_error_t {
    if n < 0 {
        return IGRAPH_EINVAL;
    }
    let code = init_endpoints(g, 0);
    if code != IGRAPH_SUCCESS {
        return code;
    }
    ptr::addr_of_mut!((*g).n).write(n);
    ptr::addr_of_mut!((*g).directed).write(directed);
    IGRAPH_SUCCESS
}

/// Create a graph from a flat edge list `[from0, to0, from1, to1, ...]`.
///
/// If `n` does not cover the largest vertex ID in `edges`, the vertex count is
/// raised to fit.
pub unsafe extern "C" fn igraph_create(
    g: *mut igraph_t,
    edges: *const igraph_vector_int_t,
    n: igraph_integer_t,
    directed: igraph_bool_t,
) -> igraph_error_t {
    if n < 0 {
        return IGRAPH_EINVAL;
    }
    let len = vector::size(edges) as usize;
    if len % 2 != 0 {
        return IGRAPH_EINVAL;
    }
    let ids = std::slice::from_raw_parts((*edges).stor_begin, len);
    let mut vertices = n;
    for &id in ids {
        if id < 0 {
            return IGRAPH_EINVVID;
        }
        match id.checked_add(1) {
            Some(needed) => vertices = vertices.max(needed),
            None => return IGRAPH_EOVERFLOW,
        }
    }

    let count = len / 2;
    let code = init_endpoints(g, count);
    if code != IGRAPH_SUCCESS {
        return code;
    }
    for (e, pair) in ids.chunks_exact(2).enumerate() {
        (*g).from.stor_begin.add(e).write(pair[0]);
        (*g).to.stor_begin.add(e).write(pair[1]);
    }
    ptr::addr_of_mut!((*g).n).write(vertices);
    ptr::addr_of_mut!((*g).directed).write(directed);
    IGRAPH_SUCCESS
}

/// Deep-copy `from` into the uninitialised handle `to`.
pub unsafe extern "C" fn igraph_copy(to: *mut igraph_t, from: *const igraph_t) -> igraph_error_t {
    let code = vector::init_copy(ptr::addr_of_mut!((*to).from), &(*from).from);
    if code != IGRAPH_SUCCESS {
        return code;
    }
    let code = vector::init_copy(ptr::addr_of_mut!((*to).to), &(*from).to);
    if code != IGRAPH_SUCCESS {
        vector::destroy(ptr::addr_of_mut!((*to).from));
        return code;
    }
    ptr::addr_of_mut!((*to).n).write((*from).n);
    ptr::addr_of_mut!((*to).directed).write((*from).directed);
    IGRAPH_SUCCESS
}

pub unsafe extern "C" fn igraph_destroy(g: *mut igraph_t) {
    vector::destroy(&mut (*g).from);
    vector::destroy(&mut (*g).to);
}

pub unsafe extern "C" fn igraph_vcount(g: *const igraph_t) -> igraph_integer_t {
    (*g).n
}

pub unsafe extern "C" fn igraph_ecount(g: *const igraph_t) -> igraph_integer_t {
    vector::size(&(*g).from)
}

pub unsafe extern "C" fn igraph_is_directed(g: *const igraph_t) -> igraph_bool_t {
    (*g).directed
}

/// Endpoints of edge `eid`.
pub unsafe extern "C" fn igraph_edge(
    g: *const igraph_t,
    eid: igraph_integer_t,
    from: *mut igraph_integer_t,
    to: *mut igraph_integer_t,
) -> igraph_error_t {
    if eid < 0 || eid >= igraph_ecount(g) {
        return IGRAPH_EINVAL;
    }
    from.write(*(*g).from.stor_begin.add(eid as usize));
    to.write(*(*g).to.stor_begin.add(eid as usize));
    IGRAPH_SUCCESS
}

/// Write all edges into the initialised vector `res`.
///
/// With `bycol == false` the layout is `[from0, to0, from1, to1, ...]`,
/// otherwise all sources come first, followed by all targets.
pub unsafe extern "C" fn igraph_get_edgelist(
    g: *const igraph_t,
    res: *mut igraph_vector_int_t,
    bycol: igraph_bool_t,
) -> igraph_error_t {
    let count = igraph_ecount(g) as usize;
    let code = vector::resize(res, (count * 2) as igraph_integer_t);
    if code != IGRAPH_SUCCESS {
        return code;
    }
    let out: &mut RawVector<igraph_integer_t> = &mut *res;
    for e in 0..count {
        let source = *(*g).from.stor_begin.add(e);
        let target = *(*g).to.stor_begin.add(e);
        if bycol {
            out.stor_begin.add(e).write(source);
            out.stor_begin.add(count + e).write(target);
        } else {
            out.stor_begin.add(2 * e).write(source);
            out.stor_begin.add(2 * e + 1).write(target);
        }
    }
    IGRAPH_SUCCESS
}

#[cfg(test)]
mod tests {
    use std::mem::MaybeUninit;

    use super::*;
    use crate::sys::{igraph_vector_int_destroy, igraph_vector_int_init};

    fn edge_vector(ids: &[igraph_integer_t]) -> igraph_vector_int_t {
        let mut raw = MaybeUninit::uninit();
        unsafe {
            assert_eq!(
                igraph_vector_int_init(raw.as_mut_ptr(), ids.len() as igraph_integer_t),
                IGRAPH_SUCCESS
            );
            let v = raw.assume_init();
            ptr::copy_nonoverlapping(ids.as_ptr(), v.stor_begin, ids.len());
            v
        }
    }

    #[test]
    fn create_grows_vertex_count() {
        let mut edges = edge_vector(&[0, 1, 1, 5]);
        let mut raw = MaybeUninit::uninit();
        unsafe {
            assert_eq!(igraph_create(raw.as_mut_ptr(), &edges, 2, true), IGRAPH_SUCCESS);
            let mut g = raw.assume_init();
            assert_eq!(igraph_vcount(&g), 6);
            assert_eq!(igraph_ecount(&g), 2);
            assert!(igraph_is_directed(&g));

            let (mut from, mut to) = (0, 0);
            assert_eq!(igraph_edge(&g, 1, &mut from, &mut to), IGRAPH_SUCCESS);
            assert_eq!((from, to), (1, 5));
            assert_eq!(igraph_edge(&g, 2, &mut from, &mut to), IGRAPH_EINVAL);

            igraph_destroy(&mut g);
            igraph_vector_int_destroy(&mut edges);
        }
    }

    #[test]
    fn create_rejects_malformed_edges() {
        let mut odd = edge_vector(&[0, 1, 2]);
        let mut negative = edge_vector(&[0, -1]);
        let mut raw = MaybeUninit::uninit();
        unsafe {
            assert_eq!(igraph_create(raw.as_mut_ptr(), &odd, 3, false), IGRAPH_EINVAL);
            assert_eq!(igraph_create(raw.as_mut_ptr(), &negative, 3, false), IGRAPH_EINVVID);
            igraph_vector_int_destroy(&mut odd);
            igraph_vector_int_destroy(&mut negative);
        }
    }
}
