//! Owning wrapper around a foreign vector handle.

use std::fmt;
use std::marker::PhantomData;
use std::mem::{self, ManuallyDrop, MaybeUninit};
use std::ops::{Bound, Deref, DerefMut, RangeBounds};
use std::ptr;
use std::slice;

use num_traits::AsPrimitive;

use crate::binding::{Boolean, Integer, Real, VectorBinding};
use crate::error::{check_code, foreign_size, Error, Result};

/// Growable array whose storage is owned by a foreign vector handle.
///
/// A `Vector` always holds an initialised handle, from construction until it
/// is dropped, and the handle is destroyed exactly once. Moving a `Vector` is
/// a plain Rust move; [`Vector::take`] leaves a fresh empty handle behind.
///
/// Elements are reachable as a slice through `Deref`, so the usual slice
/// methods (`iter`, `iter().rev()`, `sort`, `contains`, ...) apply directly.
/// Slices and strided views borrow the vector, which rules out using them
/// across a call that may reallocate.
///
/// [`Vector::clear`] keeps the allocated capacity.
pub struct Vector<B: VectorBinding> {
    raw: B::Raw,
    _binding: PhantomData<B>,
}

pub type IntVector = Vector<Integer>;
pub type RealVector = Vector<Real>;
pub type BoolVector = Vector<Boolean>;

// SAFETY: the handle exclusively owns its storage and the element types are
// plain `Copy` data, so ownership can move across threads and shared
// references only read.
unsafe impl<B: VectorBinding> Send for Vector<B> {}
unsafe impl<B: VectorBinding> Sync for Vector<B> {}

impl<B: VectorBinding> Vector<B> {
    fn init(size: usize, operation: &'static str) -> Result<Self> {
        let size = foreign_size(size, operation)?;
        let mut raw = MaybeUninit::<B::Raw>::uninit();
        check_code(unsafe { B::init(raw.as_mut_ptr(), size) }, operation)?;
        Ok(Self {
            // SAFETY: a successful init fully initialises the handle.
            raw: unsafe { raw.assume_init() },
            _binding: PhantomData,
        })
    }

    /// Empty vector. Never allocates.
    pub fn new() -> Result<Self> {
        Self::init(0, "create vector")
    }

    /// Vector of `size` default-valued elements.
    pub fn with_size(size: usize) -> Result<Self> {
        Self::init(size, "create vector")
    }

    /// Vector of `size` copies of `value`.
    pub fn filled(size: usize, value: B::Value) -> Result<Self> {
        let mut v = Self::init(size, "create vector")?;
        v.fill(value);
        Ok(v)
    }

    pub fn from_slice(values: &[B::Value]) -> Result<Self> {
        let mut v = Self::init(values.len(), "create vector")?;
        v.copy_from_slice(values);
        Ok(v)
    }

    /// Collect an iterator, growing the handle as needed.
    pub fn try_from_iter<I>(iter: I) -> Result<Self>
    where
        I: IntoIterator<Item = B::Value>,
    {
        let iter = iter.into_iter();
        let mut v = Self::new()?;
        v.reserve(iter.size_hint().0)?;
        for value in iter {
            v.push(value)?;
        }
        Ok(v)
    }

    /// Collect an iterator of another numeric type, converting each element
    /// with `as` semantics.
    ///
    /// ```
    /// use raiigraph::RealVector;
    ///
    /// let v = RealVector::from_iter_cast([1_i32, 2, 3]).unwrap();
    /// assert_eq!(v.as_slice(), &[1.0, 2.0, 3.0]);
    /// ```
    pub fn from_iter_cast<I, S>(iter: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsPrimitive<B::Value>,
    {
        Self::try_from_iter(iter.into_iter().map(|value| value.as_()))
    }

    /// Take ownership of an initialised foreign handle.
    ///
    /// # Safety
    ///
    /// `raw` must be a handle initialised by the library and not owned by
    /// anything else; it will be destroyed when the vector is dropped.
    pub unsafe fn from_raw(raw: B::Raw) -> Self {
        Self {
            raw,
            _binding: PhantomData,
        }
    }

    /// Give up ownership of the handle. The caller must destroy it.
    pub fn into_raw(self) -> B::Raw {
        let this = ManuallyDrop::new(self);
        // SAFETY: `this` is never dropped, so the handle is moved out exactly once.
        unsafe { ptr::read(&this.raw) }
    }

    pub fn as_raw(&self) -> &B::Raw {
        &self.raw
    }

    /// Pointer to the handle, for passing to library functions that read it.
    pub fn raw_ptr(&self) -> *const B::Raw {
        &self.raw
    }

    /// Pointer to the handle, for passing to library functions that modify it.
    ///
    /// The library must leave the handle initialised.
    pub fn raw_mut_ptr(&mut self) -> *mut B::Raw {
        &mut self.raw
    }

    pub fn len(&self) -> usize {
        unsafe { B::size(&self.raw) as usize }
    }

    pub fn is_empty(&self) -> bool {
        unsafe { B::empty(&self.raw) }
    }

    pub fn capacity(&self) -> usize {
        unsafe { B::capacity(&self.raw) as usize }
    }

    pub fn as_slice(&self) -> &[B::Value] {
        // SAFETY: the handle's storage holds `len` initialised values and its
        // begin pointer is non-null and aligned even when nothing is allocated.
        unsafe { slice::from_raw_parts(B::begin(&self.raw), self.len()) }
    }

    pub fn as_mut_slice(&mut self) -> &mut [B::Value] {
        let len = self.len();
        unsafe { slice::from_raw_parts_mut(B::begin(&self.raw), len) }
    }

    /// Checked element access.
    pub fn at(&self, index: usize) -> Result<&B::Value> {
        let len = self.len();
        self.as_slice()
            .get(index)
            .ok_or(Error::IndexOutOfRange { index, len })
    }

    pub fn at_mut(&mut self, index: usize) -> Result<&mut B::Value> {
        let len = self.len();
        self.as_mut_slice()
            .get_mut(index)
            .ok_or(Error::IndexOutOfRange { index, len })
    }

    pub fn front(&self) -> Option<&B::Value> {
        self.as_slice().first()
    }

    pub fn front_mut(&mut self) -> Option<&mut B::Value> {
        self.as_mut_slice().first_mut()
    }

    pub fn back(&self) -> Option<&B::Value> {
        self.as_slice().last()
    }

    pub fn back_mut(&mut self) -> Option<&mut B::Value> {
        self.as_mut_slice().last_mut()
    }

    /// Change the length to `size`. Elements past the old length are set to
    /// `fill`; shrinking keeps the capacity.
    pub fn resize(&mut self, size: usize, fill: B::Value) -> Result<()> {
        let old = self.len();
        let n = foreign_size(size, "resize vector")?;
        check_code(unsafe { B::resize(&mut self.raw, n) }, "resize vector")?;
        if size > old {
            self.as_mut_slice()[old..].fill(fill);
        }
        Ok(())
    }

    /// Shorten the vector to `size` elements. No-op if it is already shorter.
    pub fn truncate(&mut self, size: usize) {
        let len = self.len();
        if size < len {
            unsafe { B::remove_section(&mut self.raw, size as _, len as _) };
        }
    }

    /// Make room for at least `capacity` elements in total. Length and
    /// contents are unchanged.
    pub fn reserve(&mut self, capacity: usize) -> Result<()> {
        let n = foreign_size(capacity, "reserve vector capacity")?;
        check_code(unsafe { B::reserve(&mut self.raw, n) }, "reserve vector capacity")
    }

    /// Release unused capacity. If the smaller block cannot be allocated the
    /// current one is kept.
    pub fn shrink_to_fit(&mut self) {
        unsafe { B::resize_min(&mut self.raw) }
    }

    /// Remove all elements. The capacity is retained.
    pub fn clear(&mut self) {
        unsafe { B::clear(&mut self.raw) }
    }

    /// Append `value`, doubling the capacity when full.
    #[doc(alias = "push_back")]
    pub fn push(&mut self, value: B::Value) -> Result<()> {
        check_code(unsafe { B::push_back(&mut self.raw, value) }, "push to vector")
    }

    #[doc(alias = "pop_back")]
    pub fn pop(&mut self) -> Option<B::Value> {
        if self.is_empty() {
            None
        } else {
            Some(unsafe { B::pop_back(&mut self.raw) })
        }
    }

    /// Insert `value` at `pos`, shifting later elements right. Returns `pos`.
    ///
    /// # Panics
    ///
    /// Panics if `pos > len`.
    pub fn insert(&mut self, pos: usize, value: B::Value) -> Result<usize> {
        self.assert_insert_position(pos);
        check_code(
            unsafe { B::insert(&mut self.raw, pos as _, value) },
            "insert into vector",
        )?;
        Ok(pos)
    }

    /// Insert `count` copies of `value` at `pos`. Returns `pos`.
    pub fn insert_n(&mut self, pos: usize, count: usize, value: B::Value) -> Result<usize> {
        self.assert_insert_position(pos);
        let end = self.open_gap(pos, count)?;
        self.as_mut_slice()[pos..end].fill(value);
        Ok(pos)
    }

    /// Insert a copy of `values` at `pos`. Returns `pos`.
    pub fn insert_slice(&mut self, pos: usize, values: &[B::Value]) -> Result<usize> {
        self.assert_insert_position(pos);
        let end = self.open_gap(pos, values.len())?;
        self.as_mut_slice()[pos..end].copy_from_slice(values);
        Ok(pos)
    }

    /// Insert the items of `iter` at `pos`, in order. Returns `pos`.
    ///
    /// On failure the vector is restored to its previous contents.
    pub fn insert_iter<I>(&mut self, pos: usize, iter: I) -> Result<usize>
    where
        I: IntoIterator<Item = B::Value>,
    {
        self.assert_insert_position(pos);
        let old = self.len();
        for value in iter {
            if let Err(err) = self.push(value) {
                self.truncate(old);
                return Err(err);
            }
        }
        let added = self.len() - old;
        self.as_mut_slice()[pos..].rotate_right(added);
        Ok(pos)
    }

    /// Remove the element at `pos`, shifting later elements left. Returns the
    /// index of the element that followed it.
    ///
    /// # Panics
    ///
    /// Panics if `pos >= len`.
    pub fn erase(&mut self, pos: usize) -> usize {
        let len = self.len();
        assert!(pos < len, "erase index {} out of bounds for length {}", pos, len);
        unsafe { B::remove(&mut self.raw, pos as _) };
        pos
    }

    /// Remove the elements in `range`. Returns the index of the first element
    /// after the removed section.
    pub fn erase_range<R: RangeBounds<usize>>(&mut self, range: R) -> usize {
        let len = self.len();
        let start = match range.start_bound() {
            Bound::Included(&s) => s,
            Bound::Excluded(&s) => s.checked_add(1).unwrap_or(usize::MAX),
            Bound::Unbounded => 0,
        };
        let end = match range.end_bound() {
            Bound::Included(&e) => e.checked_add(1).unwrap_or(usize::MAX),
            Bound::Excluded(&e) => e,
            Bound::Unbounded => len,
        };
        assert!(
            start <= end && end <= len,
            "erase range {}..{} out of bounds for length {}",
            start,
            end,
            len
        );
        unsafe { B::remove_section(&mut self.raw, start as _, end as _) };
        start
    }

    /// Append a copy of `values`.
    pub fn extend_from_slice(&mut self, values: &[B::Value]) -> Result<()> {
        let pos = self.len();
        self.insert_slice(pos, values).map(|_| ())
    }

    /// Exchange handles with `other`. Nothing is copied or reallocated.
    pub fn swap_with(&mut self, other: &mut Self) {
        mem::swap(&mut self.raw, &mut other.raw);
    }

    /// Move the contents out, leaving an empty vector in place.
    pub fn take(&mut self) -> Self {
        mem::take(self)
    }

    /// Deep copy.
    pub fn try_clone(&self) -> Result<Self> {
        let mut raw = MaybeUninit::<B::Raw>::uninit();
        check_code(
            unsafe { B::init_copy(raw.as_mut_ptr(), &self.raw) },
            "copy vector",
        )?;
        Ok(Self {
            raw: unsafe { raw.assume_init() },
            _binding: PhantomData,
        })
    }

    /// Overwrite this vector with a copy of `other`, reusing its storage when
    /// large enough. On failure the contents are unchanged.
    pub fn assign(&mut self, other: &Self) -> Result<()> {
        check_code(unsafe { B::update(&mut self.raw, &other.raw) }, "assign vector")
    }

    fn assert_insert_position(&self, pos: usize) {
        let len = self.len();
        assert!(pos <= len, "insertion index {} out of bounds for length {}", pos, len);
    }

    /// Grow by `count` and shift `pos..` right, returning the end of the gap.
    fn open_gap(&mut self, pos: usize, count: usize) -> Result<usize> {
        let old = self.len();
        let size = old.checked_add(count).unwrap_or(usize::MAX);
        let n = foreign_size(size, "insert into vector")?;
        check_code(unsafe { B::resize(&mut self.raw, n) }, "insert into vector")?;
        self.as_mut_slice().copy_within(pos..old, pos + count);
        Ok(pos + count)
    }
}

impl<B: VectorBinding> Drop for Vector<B> {
    fn drop(&mut self) {
        unsafe { B::destroy(&mut self.raw) }
    }
}

impl<B: VectorBinding> Default for Vector<B> {
    /// Empty vector. An empty handle does not allocate, so this cannot fail.
    fn default() -> Self {
        Self::new().unwrap_or_else(|err| panic!("{}", err))
    }
}

impl<B: VectorBinding> Clone for Vector<B> {
    /// # Panics
    ///
    /// Panics if the copy cannot be allocated; use [`Vector::try_clone`] to
    /// handle that case.
    fn clone(&self) -> Self {
        self.try_clone().unwrap_or_else(|err| panic!("{}", err))
    }

    fn clone_from(&mut self, source: &Self) {
        self.assign(source).unwrap_or_else(|err| panic!("{}", err))
    }
}

impl<B: VectorBinding> Deref for Vector<B> {
    type Target = [B::Value];

    fn deref(&self) -> &Self::Target {
        self.as_slice()
    }
}

impl<B: VectorBinding> DerefMut for Vector<B> {
    fn deref_mut(&mut self) -> &mut Self::Target {
        self.as_mut_slice()
    }
}

impl<B: VectorBinding> PartialEq for Vector<B> {
    fn eq(&self, other: &Self) -> bool {
        self.as_slice() == other.as_slice()
    }
}

impl<B: VectorBinding> PartialEq<[B::Value]> for Vector<B> {
    fn eq(&self, other: &[B::Value]) -> bool {
        self.as_slice() == other
    }
}

impl<B: VectorBinding> fmt::Debug for Vector<B> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.iter()).finish()
    }
}

impl<'a, B: VectorBinding> IntoIterator for &'a Vector<B> {
    type Item = &'a B::Value;
    type IntoIter = slice::Iter<'a, B::Value>;

    fn into_iter(self) -> Self::IntoIter {
        self.as_slice().iter()
    }
}

impl<'a, B: VectorBinding> IntoIterator for &'a mut Vector<B> {
    type Item = &'a mut B::Value;
    type IntoIter = slice::IterMut<'a, B::Value>;

    fn into_iter(self) -> Self::IntoIter {
        self.as_mut_slice().iter_mut()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sys::fault;

    #[test]
    fn insert_iter_rotates_into_place() {
        let mut v = IntVector::from_slice(&[1, 2, 5]).unwrap();
        assert_eq!(v.insert_iter(2, [3, 4]).unwrap(), 2);
        assert_eq!(v.as_slice(), &[1, 2, 3, 4, 5]);
    }

    #[test]
    fn insert_iter_rolls_back_on_failure() {
        let mut v = IntVector::from_slice(&[1, 2]).unwrap();
        // Exactly full, so the first push has to reallocate.
        assert_eq!(v.capacity(), 2);
        let _guard = fault::fail_after(0);
        assert!(v.insert_iter(0, [7, 8, 9]).unwrap_err().is_allocation_failure());
        assert_eq!(v.as_slice(), &[1, 2]);
    }

    #[test]
    fn open_gap_keeps_tail_order() {
        let mut v = RealVector::from_slice(&[0.0, 1.0, 2.0]).unwrap();
        v.insert_n(1, 2, 9.0).unwrap();
        assert_eq!(v.as_slice(), &[0.0, 9.0, 9.0, 1.0, 2.0]);
    }
}
