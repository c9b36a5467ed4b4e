//! raiigraph: owning, value-semantic wrappers around igraph-style handles.
//!
//! The wrapped library manages its vectors, matrices, graphs and random number
//! generators through plain structs and free `*_init`/`*_destroy` functions.
//! This crate ties each handle to a Rust owner so it is initialised on
//! construction and destroyed exactly once on drop:
//!
//! - [`Vector`] and [`Matrix`] are generic over a [`binding`] marker
//!   ([`Integer`], [`Real`], [`Boolean`]) selecting the element type's foreign
//!   functions at compile time.
//! - Matrix rows and columns are exposed as [`StridedView`]s whose cursors
//!   track logical offsets instead of addresses.
//! - [`Graph`], [`RngScope`] and [`initialize`] cover the remaining handles
//!   and the one-time library setup.
//!
//! Every allocating operation returns [`Result`]; a failed call leaves the
//! receiver as it was.
pub mod binding;
pub mod config;
pub mod error;
pub mod graph;
pub mod initialize;
pub mod matrix;
pub mod rng;
pub mod strided;
pub mod sys;
pub mod vector;

pub use binding::{Boolean, Integer, MatrixBinding, Real, VectorBinding};
pub use config::{Config, RngKind};
pub use error::{check_code, Error, Result};
pub use graph::Graph;
pub use initialize::{initialize, initialize_with, is_initialized};
pub use matrix::{BoolMatrix, IntMatrix, Matrix, RealMatrix};
pub use rng::RngScope;
pub use strided::{StridedCursor, StridedIter, StridedIterMut, StridedView, StridedViewMut};
pub use vector::{BoolVector, IntVector, RealVector, Vector};
