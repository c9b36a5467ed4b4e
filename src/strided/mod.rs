//! Non-owning views over evenly spaced elements, such as a matrix row.
//!
//! A view is `{start, step, len}`: element `i` lives at `start + i * step`.
//! Positions are tracked as logical offsets from `start` and only turned into
//! an address when an element is actually read, so a cursor may sit past
//! either end of the view without ever forming an out-of-bounds pointer.

mod iter;
mod view;

pub use iter::{StridedCursor, StridedIter, StridedIterMut};
pub use view::{StridedView, StridedViewMut};
