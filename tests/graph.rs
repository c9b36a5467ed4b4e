//! Integration tests for the owning Graph wrapper.

use anyhow::Result;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use raiigraph::sys::{self, fault};
use raiigraph::{Error, Graph, IntVector};

/// Random lower-triangular edge list over `nobs` vertices.
fn random_edges(nobs: usize) -> Result<IntVector> {
    let mut rng = StdRng::seed_from_u64(42);
    let mut edges = IntVector::new()?;
    for o in 0..nobs {
        for o2 in 0..o {
            if rng.gen::<f64>() < 0.2 {
                edges.push(o as i64)?;
                edges.push(o2 as i64)?;
            }
        }
    }
    Ok(edges)
}

// ---------------------------------------------------------------------------
// Construction and copies
// ---------------------------------------------------------------------------

#[test]
fn graph_from_edges_basic_queries() -> Result<()> {
    let _ = env_logger::builder().is_test(true).try_init();
    let nobs = 100;
    let edges = random_edges(nobs)?;
    let nedges = edges.len() / 2;

    let graph = Graph::from_edges(&edges, nobs, true)?;
    assert!(graph.is_directed());
    assert_eq!(graph.ecount(), nedges);
    assert_eq!(graph.vcount(), nobs);
    assert!(!graph.raw_ptr().is_null());

    let g2 = graph.clone();
    assert_eq!(g2.ecount(), nedges);
    assert_eq!(g2.vcount(), nobs);
    assert_ne!(g2.raw_ptr(), graph.raw_ptr());
    assert_ne!(g2.as_raw().from.stor_begin, graph.as_raw().from.stor_begin);

    let mut g3 = Graph::default();
    assert_eq!(g3.vcount(), 0);
    assert_eq!(g3.ecount(), 0);
    g3.assign(&g2)?;
    assert_eq!(g3.vcount(), nobs);
    assert_eq!(g3.ecount(), nedges);

    let moved = g3;
    assert_eq!(moved.ecount(), nedges);
    Ok(())
}

#[test]
fn graph_edges_round_trip() -> Result<()> {
    let edges = IntVector::from_slice(&[0, 1, 1, 2, 3, 0])?;
    let graph = Graph::from_edges(&edges, 4, false)?;
    assert!(!graph.is_directed());
    assert_eq!(graph.edge(2)?, (3, 0));
    assert_eq!(graph.edges()?, edges);
    assert!(matches!(graph.edge(3), Err(Error::InvalidArgument { .. })));
    Ok(())
}

#[test]
fn graph_vertex_count_grows_to_fit_edges() -> Result<()> {
    let edges = IntVector::from_slice(&[0, 9])?;
    let graph = Graph::from_edges(&edges, 2, true)?;
    assert_eq!(graph.vcount(), 10);
    Ok(())
}

#[test]
fn graph_rejects_malformed_edge_lists() -> Result<()> {
    let odd = IntVector::from_slice(&[0, 1, 2])?;
    assert!(matches!(
        Graph::from_edges(&odd, 3, false),
        Err(Error::InvalidArgument { code: sys::IGRAPH_EINVAL, .. })
    ));
    let negative = IntVector::from_slice(&[0, -1])?;
    assert!(matches!(
        Graph::from_edges(&negative, 3, false),
        Err(Error::InvalidArgument { code: sys::IGRAPH_EINVVID, .. })
    ));
    let unrepresentable = IntVector::from_slice(&[0, i64::MAX])?;
    assert!(matches!(
        Graph::from_edges(&unrepresentable, 2, false),
        Err(Error::AllocationFailure { code: sys::IGRAPH_EOVERFLOW, .. })
    ));
    Ok(())
}

#[test]
fn graph_takes_ownership_of_raw_handle() -> Result<()> {
    let mut raw = std::mem::MaybeUninit::uninit();
    raiigraph::check_code(unsafe { sys::igraph_empty(raw.as_mut_ptr(), 100, false) }, "init")?;
    let owner = unsafe { Graph::from_raw(raw.assume_init()) };
    assert_eq!(owner.vcount(), 100);
    assert_eq!(owner.ecount(), 0);
    assert!(!owner.is_directed());
    assert_eq!(format!("{:?}", owner), "Graph { vcount: 100, ecount: 0, directed: false }");
    Ok(())
}

// ---------------------------------------------------------------------------
// Failures
// ---------------------------------------------------------------------------

#[test]
fn graph_failed_copy_leaves_target_unchanged() -> Result<()> {
    let edges = IntVector::from_slice(&[0, 1])?;
    let source = Graph::from_edges(&edges, 2, true)?;
    let mut target = Graph::new(5, false)?;

    // The first endpoint vector copies, the second one fails.
    let _guard = fault::fail_after(1);
    assert!(target.assign(&source).unwrap_err().is_allocation_failure());
    assert_eq!(target.vcount(), 5);
    assert!(!target.is_directed());
    Ok(())
}
