//! Owning wrapper around a foreign column-major matrix handle.

use std::fmt;
use std::marker::PhantomData;
use std::mem::{self, ManuallyDrop, MaybeUninit};
use std::ops::{Deref, DerefMut, Index, IndexMut};
use std::ptr;
use std::slice;

use ndarray::{Array2, ArrayBase, Data, Ix2};

use crate::binding::{Boolean, Integer, MatrixBinding, Real};
use crate::error::{check_code, foreign_size, Error, Result};
use crate::strided::{StridedView, StridedViewMut};
use crate::vector::Vector;

/// Column-major matrix whose storage is owned by a foreign matrix handle.
///
/// Element `(r, c)` lives at linear offset `r + c * nrow`. The linear storage
/// is reachable as a slice through `Deref`; rows and columns are exposed as
/// [`StridedView`]s.
pub struct Matrix<B: MatrixBinding> {
    raw: B::Raw,
    _binding: PhantomData<B>,
}

pub type IntMatrix = Matrix<Integer>;
pub type RealMatrix = Matrix<Real>;
pub type BoolMatrix = Matrix<Boolean>;

// SAFETY: see the matching impls on `Vector`.
unsafe impl<B: MatrixBinding> Send for Matrix<B> {}
unsafe impl<B: MatrixBinding> Sync for Matrix<B> {}

impl<B: MatrixBinding> Matrix<B> {
    /// `nrow x ncol` matrix of default-valued elements.
    pub fn new(nrow: usize, ncol: usize) -> Result<Self> {
        let nr = foreign_size(nrow, "create matrix")?;
        let nc = foreign_size(ncol, "create matrix")?;
        let mut raw = MaybeUninit::<B::Raw>::uninit();
        check_code(unsafe { B::init(raw.as_mut_ptr(), nr, nc) }, "create matrix")?;
        Ok(Self {
            raw: unsafe { raw.assume_init() },
            _binding: PhantomData,
        })
    }

    pub fn filled(nrow: usize, ncol: usize, value: B::Value) -> Result<Self> {
        let mut m = Self::new(nrow, ncol)?;
        m.fill(value);
        Ok(m)
    }

    /// Take ownership of an initialised foreign handle.
    ///
    /// # Safety
    ///
    /// `raw` must be initialised by the library and owned by nothing else.
    pub unsafe fn from_raw(raw: B::Raw) -> Self {
        Self {
            raw,
            _binding: PhantomData,
        }
    }

    /// Give up ownership of the handle. The caller must destroy it.
    pub fn into_raw(self) -> B::Raw {
        let this = ManuallyDrop::new(self);
        unsafe { ptr::read(&this.raw) }
    }

    pub fn as_raw(&self) -> &B::Raw {
        &self.raw
    }

    pub fn raw_ptr(&self) -> *const B::Raw {
        &self.raw
    }

    pub fn raw_mut_ptr(&mut self) -> *mut B::Raw {
        &mut self.raw
    }

    pub fn nrow(&self) -> usize {
        unsafe { B::nrow(&self.raw) as usize }
    }

    pub fn ncol(&self) -> usize {
        unsafe { B::ncol(&self.raw) as usize }
    }

    pub fn shape(&self) -> (usize, usize) {
        (self.nrow(), self.ncol())
    }

    /// Number of elements, `nrow * ncol`.
    pub fn len(&self) -> usize {
        unsafe { B::size(&self.raw) as usize }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn capacity(&self) -> usize {
        unsafe { B::capacity(&self.raw) as usize }
    }

    pub fn as_slice(&self) -> &[B::Value] {
        unsafe { slice::from_raw_parts(B::begin(&self.raw), self.len()) }
    }

    pub fn as_mut_slice(&mut self) -> &mut [B::Value] {
        let len = self.len();
        unsafe { slice::from_raw_parts_mut(B::begin(&self.raw), len) }
    }

    fn offset(&self, row: usize, col: usize) -> Option<usize> {
        let nrow = self.nrow();
        if row < nrow && col < self.ncol() {
            Some(row + col * nrow)
        } else {
            None
        }
    }

    pub fn get(&self, row: usize, col: usize) -> Option<&B::Value> {
        let offset = self.offset(row, col)?;
        self.as_slice().get(offset)
    }

    pub fn get_mut(&mut self, row: usize, col: usize) -> Option<&mut B::Value> {
        let offset = self.offset(row, col)?;
        self.as_mut_slice().get_mut(offset)
    }

    /// Checked `(row, col)` access.
    pub fn at(&self, row: usize, col: usize) -> Result<&B::Value> {
        let len = self.len();
        match self.offset(row, col) {
            Some(offset) => Ok(&self.as_slice()[offset]),
            None => Err(Error::IndexOutOfRange {
                index: row.saturating_add(col.saturating_mul(self.nrow())),
                len,
            }),
        }
    }

    /// Change the dimensions to `nrow x ncol`.
    ///
    /// This resizes the linear storage: values keep their linear offset, not
    /// their `(row, col)` position. Offsets past the old length are set to
    /// `fill`.
    pub fn resize(&mut self, nrow: usize, ncol: usize, fill: B::Value) -> Result<()> {
        let old = self.len();
        let nr = foreign_size(nrow, "resize matrix")?;
        let nc = foreign_size(ncol, "resize matrix")?;
        check_code(unsafe { B::resize(&mut self.raw, nr, nc) }, "resize matrix")?;
        let len = self.len();
        if len > old {
            self.as_mut_slice()[old..].fill(fill);
        }
        Ok(())
    }

    pub fn reserve(&mut self, capacity: usize) -> Result<()> {
        let n = foreign_size(capacity, "reserve matrix capacity")?;
        check_code(unsafe { B::reserve(&mut self.raw, n) }, "reserve matrix capacity")
    }

    pub fn shrink_to_fit(&mut self) {
        unsafe { B::resize_min(&mut self.raw) }
    }

    /// Set both dimensions to zero. The capacity is retained.
    pub fn clear(&mut self) {
        unsafe { B::clear(&mut self.raw) }
    }

    fn strided_start(&self, first: usize, len: usize) -> *mut B::Value {
        let begin = unsafe { B::begin(&self.raw) };
        if len == 0 {
            begin
        } else {
            // SAFETY: callers pass a `first` inside the storage when len > 0.
            unsafe { begin.add(first) }
        }
    }

    /// View of row `r`: `ncol` elements spaced `nrow` apart.
    ///
    /// # Panics
    ///
    /// Panics if `r >= nrow`.
    pub fn row(&self, r: usize) -> StridedView<'_, B::Value> {
        let (nrow, ncol) = self.shape();
        assert!(r < nrow, "row index {} out of bounds for {} rows", r, nrow);
        let start = self.strided_start(r, ncol);
        // SAFETY: r + (ncol - 1) * nrow < nrow * ncol.
        unsafe { StridedView::from_raw_parts(start, nrow, ncol) }
    }

    pub fn row_mut(&mut self, r: usize) -> StridedViewMut<'_, B::Value> {
        let (nrow, ncol) = self.shape();
        assert!(r < nrow, "row index {} out of bounds for {} rows", r, nrow);
        let start = self.strided_start(r, ncol);
        unsafe { StridedViewMut::from_raw_parts(start, nrow, ncol) }
    }

    /// View of column `c`: `nrow` contiguous elements.
    ///
    /// # Panics
    ///
    /// Panics if `c >= ncol`.
    pub fn column(&self, c: usize) -> StridedView<'_, B::Value> {
        let (nrow, ncol) = self.shape();
        assert!(c < ncol, "column index {} out of bounds for {} columns", c, ncol);
        let start = self.strided_start(c * nrow, nrow);
        unsafe { StridedView::from_raw_parts(start, 1, nrow) }
    }

    pub fn column_mut(&mut self, c: usize) -> StridedViewMut<'_, B::Value> {
        let (nrow, ncol) = self.shape();
        assert!(c < ncol, "column index {} out of bounds for {} columns", c, ncol);
        let start = self.strided_start(c * nrow, nrow);
        unsafe { StridedViewMut::from_raw_parts(start, 1, nrow) }
    }

    /// Contiguous copy of row `r`.
    pub fn row_copy(&self, r: usize) -> Result<Vector<B::Vector>> {
        Vector::try_from_iter(self.row(r).iter().copied())
    }

    /// Contiguous copy of column `c`.
    pub fn column_copy(&self, c: usize) -> Result<Vector<B::Vector>> {
        Vector::try_from_iter(self.column(c).iter().copied())
    }

    /// Exchange handles with `other`.
    pub fn swap_with(&mut self, other: &mut Self) {
        mem::swap(&mut self.raw, &mut other.raw);
    }

    /// Move the contents out, leaving a `0 x 0` matrix in place.
    pub fn take(&mut self) -> Self {
        mem::take(self)
    }

    pub fn try_clone(&self) -> Result<Self> {
        let mut raw = MaybeUninit::<B::Raw>::uninit();
        check_code(
            unsafe { B::init_copy(raw.as_mut_ptr(), &self.raw) },
            "copy matrix",
        )?;
        Ok(Self {
            raw: unsafe { raw.assume_init() },
            _binding: PhantomData,
        })
    }

    /// Overwrite with a copy of `other`, dimensions included.
    pub fn assign(&mut self, other: &Self) -> Result<()> {
        check_code(unsafe { B::update(&mut self.raw, &other.raw) }, "assign matrix")
    }

    /// Copy into an `ndarray` matrix with the same `(row, col)` layout.
    pub fn to_ndarray(&self) -> Array2<B::Value> {
        let data = self.as_slice();
        let nrow = self.nrow();
        Array2::from_shape_fn(self.shape(), |(r, c)| data[r + c * nrow])
    }

    /// Copy an `ndarray` matrix of any memory layout.
    pub fn from_ndarray<S>(array: &ArrayBase<S, Ix2>) -> Result<Self>
    where
        S: Data<Elem = B::Value>,
    {
        let (nrow, ncol) = array.dim();
        let mut m = Self::new(nrow, ncol)?;
        for ((r, c), value) in array.indexed_iter() {
            m.as_mut_slice()[r + c * nrow] = *value;
        }
        Ok(m)
    }
}

impl<B: MatrixBinding> Drop for Matrix<B> {
    fn drop(&mut self) {
        unsafe { B::destroy(&mut self.raw) }
    }
}

impl<B: MatrixBinding> Default for Matrix<B> {
    /// `0 x 0` matrix. Nothing is allocated, so this cannot fail.
    fn default() -> Self {
        Self::new(0, 0).unwrap_or_else(|err| panic!("{}", err))
    }
}

impl<B: MatrixBinding> Clone for Matrix<B> {
    fn clone(&self) -> Self {
        self.try_clone().unwrap_or_else(|err| panic!("{}", err))
    }

    fn clone_from(&mut self, source: &Self) {
        self.assign(source).unwrap_or_else(|err| panic!("{}", err))
    }
}

impl<B: MatrixBinding> Deref for Matrix<B> {
    type Target = [B::Value];

    fn deref(&self) -> &Self::Target {
        self.as_slice()
    }
}

impl<B: MatrixBinding> DerefMut for Matrix<B> {
    fn deref_mut(&mut self) -> &mut Self::Target {
        self.as_mut_slice()
    }
}

impl<B: MatrixBinding> Index<(usize, usize)> for Matrix<B> {
    type Output = B::Value;

    fn index(&self, (row, col): (usize, usize)) -> &B::Value {
        let (nrow, ncol) = self.shape();
        assert!(
            row < nrow && col < ncol,
            "index ({}, {}) out of bounds for {}x{} matrix",
            row,
            col,
            nrow,
            ncol
        );
        &self.as_slice()[row + col * nrow]
    }
}

impl<B: MatrixBinding> IndexMut<(usize, usize)> for Matrix<B> {
    fn index_mut(&mut self, (row, col): (usize, usize)) -> &mut B::Value {
        let (nrow, ncol) = self.shape();
        assert!(
            row < nrow && col < ncol,
            "index ({}, {}) out of bounds for {}x{} matrix",
            row,
            col,
            nrow,
            ncol
        );
        &mut self.as_mut_slice()[row + col * nrow]
    }
}

impl<B: MatrixBinding> PartialEq for Matrix<B> {
    fn eq(&self, other: &Self) -> bool {
        self.shape() == other.shape() && self.as_slice() == other.as_slice()
    }
}

impl<B: MatrixBinding> fmt::Debug for Matrix<B> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut rows = f.debug_list();
        for r in 0..self.nrow() {
            rows.entry(&self.row(r));
        }
        rows.finish()
    }
}
