use std::fmt;
use std::marker::PhantomData;
use std::ops::{Index, IndexMut};
use std::ptr::NonNull;

use super::iter::{StridedCursor, StridedIter, StridedIterMut};

/// Read-only view of `len` elements spaced `step` apart.
///
/// The view borrows the storage it was created from, so the owner cannot be
/// resized, cleared, or dropped while the view or any cursor from it is alive.
pub struct StridedView<'a, T> {
    start: NonNull<T>,
    step: usize,
    len: usize,
    _marker: PhantomData<&'a [T]>,
}

// SAFETY: equivalent to holding `&'a [T]`.
unsafe impl<T: Sync> Send for StridedView<'_, T> {}
unsafe impl<T: Sync> Sync for StridedView<'_, T> {}

/// Resolve `{start, step, len}` against a buffer of `available` elements.
/// Empty views are anchored at the buffer start.
fn locate(available: usize, start: usize, step: usize, len: usize) -> Option<usize> {
    if step == 0 || isize::try_from(step).is_err() {
        return None;
    }
    if len == 0 {
        return Some(0);
    }
    let last = (len - 1).checked_mul(step)?.checked_add(start)?;
    if last < available {
        Some(start)
    } else {
        None
    }
}

impl<'a, T> StridedView<'a, T> {
    /// View `data[start], data[start + step], ...` with `len` elements.
    ///
    /// Returns `None` if `step` is zero or the last element would fall
    /// outside `data`.
    ///
    /// ```
    /// use raiigraph::StridedView;
    ///
    /// let data = [0, 1, 2, 3, 4, 5];
    /// let odd = StridedView::new(&data, 1, 2, 3).unwrap();
    /// assert_eq!(odd.to_vec(), vec![1, 3, 5]);
    /// assert!(StridedView::new(&data, 1, 2, 4).is_none());
    /// ```
    pub fn new(data: &'a [T], start: usize, step: usize, len: usize) -> Option<Self> {
        let first = locate(data.len(), start, step, len)?;
        // SAFETY: `locate` checked that every element lies inside `data`.
        Some(unsafe { Self::from_raw_parts(data.as_ptr().add(first), step, len) })
    }

    /// # Safety
    ///
    /// `start` must be non-null, `step` non-zero, and when `len > 0` each of
    /// `start + i * step` for `i < len` must be valid for reads for `'a`.
    pub unsafe fn from_raw_parts(start: *const T, step: usize, len: usize) -> Self {
        Self {
            start: NonNull::new_unchecked(start as *mut T),
            step,
            len,
            _marker: PhantomData,
        }
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn step(&self) -> usize {
        self.step
    }

    pub fn get(&self, index: usize) -> Option<&'a T> {
        if index < self.len {
            Some(unsafe { &*self.start.as_ptr().add(index * self.step) })
        } else {
            None
        }
    }

    pub fn front(&self) -> Option<&'a T> {
        self.get(0)
    }

    pub fn back(&self) -> Option<&'a T> {
        self.len.checked_sub(1).and_then(|last| self.get(last))
    }

    /// Cursor at the first element.
    pub fn begin(&self) -> StridedCursor<'a, T> {
        StridedCursor::new(self.start, self.step, self.len, 0)
    }

    /// Cursor one past the last element.
    pub fn end(&self) -> StridedCursor<'a, T> {
        StridedCursor::new(self.start, self.step, self.len, self.len)
    }

    pub fn iter(&self) -> StridedIter<'a, T> {
        StridedIter::new(self.begin(), self.end())
    }

    pub fn to_vec(&self) -> Vec<T>
    where
        T: Clone,
    {
        self.iter().cloned().collect()
    }
}

impl<T> Clone for StridedView<'_, T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for StridedView<'_, T> {}

impl<T> Index<usize> for StridedView<'_, T> {
    type Output = T;

    fn index(&self, index: usize) -> &T {
        match self.get(index) {
            Some(value) => value,
            None => panic!(
                "index {} out of bounds for strided view of length {}",
                index, self.len
            ),
        }
    }
}

impl<T: fmt::Debug> fmt::Debug for StridedView<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.iter()).finish()
    }
}

impl<T: PartialEq> PartialEq for StridedView<'_, T> {
    fn eq(&self, other: &Self) -> bool {
        self.len == other.len && self.iter().eq(other.iter())
    }
}

impl<'a, T> IntoIterator for StridedView<'a, T> {
    type Item = &'a T;
    type IntoIter = StridedIter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<'a, T> IntoIterator for &StridedView<'a, T> {
    type Item = &'a T;
    type IntoIter = StridedIter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Mutable view of `len` elements spaced `step` apart.
pub struct StridedViewMut<'a, T> {
    start: NonNull<T>,
    step: usize,
    len: usize,
    _marker: PhantomData<&'a mut [T]>,
}

// SAFETY: equivalent to holding `&'a mut [T]`.
unsafe impl<T: Send> Send for StridedViewMut<'_, T> {}
unsafe impl<T: Sync> Sync for StridedViewMut<'_, T> {}

impl<'a, T> StridedViewMut<'a, T> {
    /// Mutable counterpart of [`StridedView::new`].
    pub fn new(data: &'a mut [T], start: usize, step: usize, len: usize) -> Option<Self> {
        let first = locate(data.len(), start, step, len)?;
        Some(unsafe { Self::from_raw_parts(data.as_mut_ptr().add(first), step, len) })
    }

    /// # Safety
    ///
    /// As for [`StridedView::from_raw_parts`], with the elements valid for
    /// writes and not accessed through any other path for `'a`.
    pub unsafe fn from_raw_parts(start: *mut T, step: usize, len: usize) -> Self {
        Self {
            start: NonNull::new_unchecked(start),
            step,
            len,
            _marker: PhantomData,
        }
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn step(&self) -> usize {
        self.step
    }

    /// Reborrow as a read-only view.
    pub fn as_view(&self) -> StridedView<'_, T> {
        unsafe { StridedView::from_raw_parts(self.start.as_ptr(), self.step, self.len) }
    }

    pub fn into_view(self) -> StridedView<'a, T> {
        unsafe { StridedView::from_raw_parts(self.start.as_ptr(), self.step, self.len) }
    }

    pub fn get(&self, index: usize) -> Option<&T> {
        self.as_view().get(index)
    }

    pub fn get_mut(&mut self, index: usize) -> Option<&mut T> {
        if index < self.len {
            Some(unsafe { &mut *self.start.as_ptr().add(index * self.step) })
        } else {
            None
        }
    }

    pub fn front(&self) -> Option<&T> {
        self.get(0)
    }

    pub fn front_mut(&mut self) -> Option<&mut T> {
        self.get_mut(0)
    }

    pub fn back(&self) -> Option<&T> {
        self.len.checked_sub(1).and_then(|last| self.get(last))
    }

    pub fn back_mut(&mut self) -> Option<&mut T> {
        match self.len.checked_sub(1) {
            Some(last) => self.get_mut(last),
            None => None,
        }
    }

    pub fn iter(&self) -> StridedIter<'_, T> {
        self.as_view().iter()
    }

    pub fn iter_mut(&mut self) -> StridedIterMut<'_, T> {
        StridedIterMut::new(self.start, self.step, self.len)
    }

    pub fn fill(&mut self, value: T)
    where
        T: Clone,
    {
        for slot in self.iter_mut() {
            *slot = value.clone();
        }
    }

    pub fn to_vec(&self) -> Vec<T>
    where
        T: Clone,
    {
        self.as_view().to_vec()
    }
}

impl<T> Index<usize> for StridedViewMut<'_, T> {
    type Output = T;

    fn index(&self, index: usize) -> &T {
        let len = self.len;
        match self.get(index) {
            Some(value) => value,
            None => panic!(
                "index {} out of bounds for strided view of length {}",
                index, len
            ),
        }
    }
}

impl<T> IndexMut<usize> for StridedViewMut<'_, T> {
    fn index_mut(&mut self, index: usize) -> &mut T {
        let len = self.len;
        match self.get_mut(index) {
            Some(value) => value,
            None => panic!(
                "index {} out of bounds for strided view of length {}",
                index, len
            ),
        }
    }
}

impl<T: fmt::Debug> fmt::Debug for StridedViewMut<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.iter()).finish()
    }
}

impl<'a, T> IntoIterator for StridedViewMut<'a, T> {
    type Item = &'a mut T;
    type IntoIter = StridedIterMut<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        StridedIterMut::new(self.start, self.step, self.len)
    }
}

impl<'a, T> IntoIterator for &'a StridedViewMut<'_, T> {
    type Item = &'a T;
    type IntoIter = StridedIter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<'a, T> IntoIterator for &'a mut StridedViewMut<'_, T> {
    type Item = &'a mut T;
    type IntoIter = StridedIterMut<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter_mut()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_zero_step_and_overrun() {
        let data = [1, 2, 3, 4];
        assert!(StridedView::new(&data, 0, 0, 2).is_none());
        assert!(StridedView::new(&data, 2, 2, 2).is_none());
        assert!(StridedView::new(&data, usize::MAX, 2, 2).is_none());
        assert!(StridedView::new(&data, 3, 1, 1).is_some());
    }

    #[test]
    fn empty_view_ignores_start() {
        let data: [f64; 0] = [];
        let view = StridedView::new(&data, 7, 3, 0).unwrap();
        assert!(view.is_empty());
        assert_eq!(view.front(), None);
        assert_eq!(view.back(), None);
        assert_eq!(view.iter().next(), None);
        assert_eq!(view.end() - view.begin(), 0);
    }

    #[test]
    fn mutable_view_writes_through() {
        let mut data = [0_i64; 6];
        let mut view = StridedViewMut::new(&mut data, 1, 2, 3).unwrap();
        view[0] = 10;
        *view.back_mut().unwrap() = 30;
        for (i, slot) in view.iter_mut().enumerate().skip(1).take(1) {
            *slot = 20 + i as i64;
        }
        assert_eq!(view.to_vec(), vec![10, 21, 30]);
        assert_eq!(data, [0, 10, 0, 21, 0, 30]);
    }

    #[test]
    #[should_panic(expected = "out of bounds")]
    fn index_past_end_panics() {
        let data = [1, 2, 3];
        let view = StridedView::new(&data, 0, 1, 3).unwrap();
        let _ = view[3];
    }
}
