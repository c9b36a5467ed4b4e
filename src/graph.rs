use std::fmt;
use std::mem::{ManuallyDrop, MaybeUninit};
use std::ptr;

use crate::error::{check_code, foreign_size, Result};
use crate::sys;
use crate::vector::IntVector;

/// Owned graph handle.
///
/// Only construction, copying, and basic queries are wrapped; the raw handle
/// is exposed for everything else.
pub struct Graph {
    raw: sys::igraph_t,
}

// SAFETY: the handle exclusively owns its edge storage.
unsafe impl Send for Graph {}
unsafe impl Sync for Graph {}

impl Graph {
    /// Graph with `n` vertices and no edges.
    pub fn new(n: usize, directed: bool) -> Result<Self> {
        let n = foreign_size(n, "create graph")?;
        let mut raw = MaybeUninit::uninit();
        check_code(
            unsafe { sys::igraph_empty(raw.as_mut_ptr(), n, directed) },
            "create graph",
        )?;
        Ok(Self {
            raw: unsafe { raw.assume_init() },
        })
    }

    /// Graph from a flat edge list `[from0, to0, from1, to1, ...]`.
    ///
    /// The vertex count is raised above `n` if an edge refers to a larger ID.
    ///
    /// ```
    /// use raiigraph::{Graph, IntVector};
    ///
    /// let edges = IntVector::from_slice(&[0, 1, 1, 2, 2, 0]).unwrap();
    /// let g = Graph::from_edges(&edges, 3, true).unwrap();
    /// assert_eq!((g.vcount(), g.ecount()), (3, 3));
    /// ```
    pub fn from_edges(edges: &IntVector, n: usize, directed: bool) -> Result<Self> {
        let n = foreign_size(n, "create graph")?;
        let mut raw = MaybeUninit::uninit();
        check_code(
            unsafe { sys::igraph_create(raw.as_mut_ptr(), edges.raw_ptr(), n, directed) },
            "create graph",
        )?;
        let graph = Self {
            raw: unsafe { raw.assume_init() },
        };
        log::debug!(
            "created {} graph with {} vertices and {} edges",
            if directed { "directed" } else { "undirected" },
            graph.vcount(),
            graph.ecount()
        );
        Ok(graph)
    }

    /// Take ownership of an initialised graph handle.
    ///
    /// # Safety
    ///
    /// `raw` must be initialised by the library and owned by nothing else.
    pub unsafe fn from_raw(raw: sys::igraph_t) -> Self {
        Self { raw }
    }

    /// Give up ownership of the handle. The caller must destroy it.
    pub fn into_raw(self) -> sys::igraph_t {
        let this = ManuallyDrop::new(self);
        unsafe { ptr::read(&this.raw) }
    }

    pub fn as_raw(&self) -> &sys::igraph_t {
        &self.raw
    }

    pub fn raw_ptr(&self) -> *const sys::igraph_t {
        &self.raw
    }

    pub fn raw_mut_ptr(&mut self) -> *mut sys::igraph_t {
        &mut self.raw
    }

    pub fn vcount(&self) -> usize {
        unsafe { sys::igraph_vcount(&self.raw) as usize }
    }

    pub fn ecount(&self) -> usize {
        unsafe { sys::igraph_ecount(&self.raw) as usize }
    }

    pub fn is_directed(&self) -> bool {
        unsafe { sys::igraph_is_directed(&self.raw) }
    }

    /// Endpoints of edge `eid` as `(from, to)`.
    pub fn edge(&self, eid: usize) -> Result<(usize, usize)> {
        let eid = foreign_size(eid, "query edge")?;
        let (mut from, mut to) = (0, 0);
        check_code(
            unsafe { sys::igraph_edge(&self.raw, eid, &mut from, &mut to) },
            "query edge",
        )?;
        Ok((from as usize, to as usize))
    }

    /// Flat edge list in the layout accepted by [`Graph::from_edges`].
    pub fn edges(&self) -> Result<IntVector> {
        let mut out = IntVector::new()?;
        check_code(
            unsafe { sys::igraph_get_edgelist(&self.raw, out.raw_mut_ptr(), false) },
            "collect edge list",
        )?;
        Ok(out)
    }

    pub fn try_clone(&self) -> Result<Self> {
        let mut raw = MaybeUninit::uninit();
        check_code(
            unsafe { sys::igraph_copy(raw.as_mut_ptr(), &self.raw) },
            "copy graph",
        )?;
        Ok(Self {
            raw: unsafe { raw.assume_init() },
        })
    }

    /// Replace this graph with a copy of `other`. On failure it is unchanged.
    pub fn assign(&mut self, other: &Self) -> Result<()> {
        *self = other.try_clone()?;
        Ok(())
    }
}

impl Drop for Graph {
    fn drop(&mut self) {
        unsafe { sys::igraph_destroy(&mut self.raw) }
    }
}

impl Default for Graph {
    /// Undirected graph without vertices. Never allocates.
    fn default() -> Self {
        Self::new(0, false).unwrap_or_else(|err| panic!("{}", err))
    }
}

impl Clone for Graph {
    fn clone(&self) -> Self {
        self.try_clone().unwrap_or_else(|err| panic!("{}", err))
    }
}

impl fmt::Debug for Graph {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Graph")
            .field("vcount", &self.vcount())
            .field("ecount", &self.ecount())
            .field("directed", &self.is_directed())
            .finish()
    }
}
