use std::cmp::Ordering;
use std::fmt;
use std::iter::FusedIterator;
use std::marker::PhantomData;
use std::ops::{Add, AddAssign, Sub, SubAssign};
use std::ptr::NonNull;

/// Random-access position within a [`StridedView`](super::StridedView).
///
/// Holds a logical element offset from the view's start rather than an
/// address. Cursors can be moved anywhere with `+`/`-`, compared, and
/// subtracted; reading through one is checked against the view bounds.
/// Comparisons and differences are only meaningful between cursors of the
/// same view.
pub struct StridedCursor<'a, T> {
    start: NonNull<T>,
    step: usize,
    len: usize,
    offset: isize,
    _marker: PhantomData<&'a T>,
}

impl<'a, T> StridedCursor<'a, T> {
    pub(crate) fn new(start: NonNull<T>, step: usize, len: usize, position: usize) -> Self {
        Self {
            start,
            step,
            len,
            offset: isize::try_from(position.saturating_mul(step)).unwrap_or(isize::MAX),
            _marker: PhantomData,
        }
    }

    /// Logical position in the view: `0` at the first element, `len` at end.
    pub fn position(&self) -> isize {
        self.offset / self.step as isize
    }

    /// Distance from the view's start, in underlying storage elements.
    pub fn offset(&self) -> isize {
        self.offset
    }

    fn on_step(&self) -> bool {
        self.offset % self.step as isize == 0
    }

    fn in_bounds(&self) -> bool {
        self.offset >= 0 && self.on_step() && (self.position() as usize) < self.len
    }

    // Offsets saturate, so a cursor moved arbitrarily far stays outside the view.
    fn shifted(&self, n: isize) -> isize {
        self.offset.saturating_add(n.saturating_mul(self.step as isize))
    }

    /// The element under the cursor, or `None` when it is outside the view.
    pub fn get(&self) -> Option<&'a T> {
        if self.in_bounds() {
            Some(unsafe { self.get_unchecked() })
        } else {
            None
        }
    }

    /// The element `n` positions away from the cursor.
    pub fn at(&self, n: isize) -> Option<&'a T> {
        (*self + n).get()
    }

    /// # Safety
    ///
    /// The cursor must be within `0..len` of its view.
    pub unsafe fn get_unchecked(&self) -> &'a T {
        &*self.start.as_ptr().offset(self.offset)
    }

    fn same_view(&self, other: &Self) -> bool {
        self.start == other.start && self.step == other.step
    }
}

impl<T> Clone for StridedCursor<'_, T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for StridedCursor<'_, T> {}

impl<T> fmt::Debug for StridedCursor<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StridedCursor")
            .field("step", &self.step)
            .field("len", &self.len)
            .field("offset", &self.offset)
            .finish()
    }
}

impl<T> PartialEq for StridedCursor<'_, T> {
    fn eq(&self, other: &Self) -> bool {
        self.offset == other.offset
    }
}

impl<T> Eq for StridedCursor<'_, T> {}

impl<T> PartialOrd for StridedCursor<'_, T> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<T> Ord for StridedCursor<'_, T> {
    fn cmp(&self, other: &Self) -> Ordering {
        self.offset.cmp(&other.offset)
    }
}

impl<T> AddAssign<isize> for StridedCursor<'_, T> {
    fn add_assign(&mut self, n: isize) {
        self.offset = self.shifted(n);
    }
}

impl<T> SubAssign<isize> for StridedCursor<'_, T> {
    fn sub_assign(&mut self, n: isize) {
        self.offset = self.shifted(n.saturating_neg());
    }
}

impl<'a, T> Add<isize> for StridedCursor<'a, T> {
    type Output = Self;

    fn add(mut self, n: isize) -> Self {
        self += n;
        self
    }
}

impl<'a, T> Add<StridedCursor<'a, T>> for isize {
    type Output = StridedCursor<'a, T>;

    fn add(self, cursor: StridedCursor<'a, T>) -> StridedCursor<'a, T> {
        cursor + self
    }
}

impl<'a, T> Sub<isize> for StridedCursor<'a, T> {
    type Output = Self;

    fn sub(mut self, n: isize) -> Self {
        self -= n;
        self
    }
}

/// Number of steps from `other` to `self`.
impl<'a, T> Sub for StridedCursor<'a, T> {
    type Output = isize;

    fn sub(self, other: Self) -> isize {
        debug_assert!(self.same_view(&other), "cursors belong to different views");
        self.offset.saturating_sub(other.offset) / self.step as isize
    }
}

/// Iterator over a [`StridedView`](super::StridedView), walking from a front
/// cursor towards a back cursor.
pub struct StridedIter<'a, T> {
    front: StridedCursor<'a, T>,
    back: StridedCursor<'a, T>,
}

impl<'a, T> StridedIter<'a, T> {
    /// Iterate over `begin..end`.
    ///
    /// # Panics
    ///
    /// Panics if the cursors come from different views, or do not describe a
    /// forward range inside the view.
    pub fn new(begin: StridedCursor<'a, T>, end: StridedCursor<'a, T>) -> Self {
        assert!(begin.same_view(&end), "cursors belong to different views");
        assert!(
            begin.offset >= 0
                && begin.on_step()
                && end.on_step()
                && begin <= end
                && end.position() as usize <= end.len,
            "cursor range is outside the view"
        );
        Self { front: begin, back: end }
    }
}

impl<T> Clone for StridedIter<'_, T> {
    fn clone(&self) -> Self {
        Self {
            front: self.front,
            back: self.back,
        }
    }
}

impl<T: fmt::Debug> fmt::Debug for StridedIter<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.clone()).finish()
    }
}

impl<'a, T> Iterator for StridedIter<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<&'a T> {
        if self.front == self.back {
            return None;
        }
        // SAFETY: front < back <= len.
        let item = unsafe { self.front.get_unchecked() };
        self.front += 1;
        Some(item)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.len();
        (remaining, Some(remaining))
    }

    fn nth(&mut self, n: usize) -> Option<&'a T> {
        if n >= self.len() {
            self.front = self.back;
            return None;
        }
        self.front += n as isize;
        self.next()
    }

    fn count(self) -> usize {
        self.len()
    }

    fn last(mut self) -> Option<&'a T> {
        self.next_back()
    }
}

impl<'a, T> DoubleEndedIterator for StridedIter<'a, T> {
    fn next_back(&mut self) -> Option<&'a T> {
        if self.front == self.back {
            return None;
        }
        self.back -= 1;
        Some(unsafe { self.back.get_unchecked() })
    }

    fn nth_back(&mut self, n: usize) -> Option<&'a T> {
        if n >= self.len() {
            self.back = self.front;
            return None;
        }
        self.back -= n as isize;
        self.next_back()
    }
}

impl<T> ExactSizeIterator for StridedIter<'_, T> {
    fn len(&self) -> usize {
        (self.back - self.front) as usize
    }
}

impl<T> FusedIterator for StridedIter<'_, T> {}

/// Mutable iterator over a [`StridedViewMut`](super::StridedViewMut).
pub struct StridedIterMut<'a, T> {
    start: NonNull<T>,
    step: usize,
    front: usize,
    back: usize,
    _marker: PhantomData<&'a mut T>,
}

// SAFETY: behaves like `&'a mut [T]` restricted to disjoint elements.
unsafe impl<T: Send> Send for StridedIterMut<'_, T> {}
unsafe impl<T: Sync> Sync for StridedIterMut<'_, T> {}

impl<'a, T> StridedIterMut<'a, T> {
    pub(crate) fn new(start: NonNull<T>, step: usize, len: usize) -> Self {
        Self {
            start,
            step,
            front: 0,
            back: len,
            _marker: PhantomData,
        }
    }

    unsafe fn element(&self, position: usize) -> &'a mut T {
        &mut *self.start.as_ptr().add(position * self.step)
    }
}

impl<T> fmt::Debug for StridedIterMut<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StridedIterMut")
            .field("step", &self.step)
            .field("remaining", &(self.back - self.front))
            .finish()
    }
}

impl<'a, T> Iterator for StridedIterMut<'a, T> {
    type Item = &'a mut T;

    fn next(&mut self) -> Option<&'a mut T> {
        if self.front == self.back {
            return None;
        }
        // SAFETY: each position in front..back is handed out at most once and
        // a non-zero step keeps the elements disjoint.
        let item = unsafe { self.element(self.front) };
        self.front += 1;
        Some(item)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.back - self.front;
        (remaining, Some(remaining))
    }

    fn nth(&mut self, n: usize) -> Option<&'a mut T> {
        self.front = self.front.saturating_add(n).min(self.back);
        self.next()
    }
}

impl<'a, T> DoubleEndedIterator for StridedIterMut<'a, T> {
    fn next_back(&mut self) -> Option<&'a mut T> {
        if self.front == self.back {
            return None;
        }
        self.back -= 1;
        Some(unsafe { self.element(self.back) })
    }
}

impl<T> ExactSizeIterator for StridedIterMut<'_, T> {}

impl<T> FusedIterator for StridedIterMut<'_, T> {}

#[cfg(test)]
mod tests {
    use super::super::StridedView;

    const DATA: [i64; 12] = [0, 1, 2, 3, 4, 5, 6, 7, 8, 9, 10, 11];

    #[test]
    fn cursor_arithmetic() {
        let view = StridedView::new(&DATA, 1, 3, 4).unwrap();
        let begin = view.begin();
        let end = view.end();

        assert_eq!(end - begin, 4);
        assert_eq!(begin - end, -4);
        assert_eq!(begin - begin, 0);
        for k in 0..4 {
            assert_eq!((begin + k).get(), Some(&view[k as usize]));
        }
        assert_eq!((end - 1).get(), Some(&10));
        assert_eq!(2 + begin, begin + 2);

        let mut it = begin;
        it += 3;
        it -= 1;
        assert_eq!(it.position(), 2);
        assert_eq!(it.offset(), 6);
        assert!(begin < it && it < end && end >= it);
    }

    #[test]
    fn cursor_outside_view_is_harmless() {
        let view = StridedView::new(&DATA, 0, 5, 3).unwrap();
        let before = view.begin() - 10;
        let after = view.end() + 100;
        assert_eq!(before.get(), None);
        assert_eq!(after.get(), None);
        assert_eq!(view.end().get(), None);
        assert_eq!(after - before, 113);
        assert_eq!(before.at(10), Some(&0));
    }

    #[test]
    fn cursor_moved_past_overflow_stays_outside() {
        let view = StridedView::new(&DATA[..1], 0, 3, 1).unwrap();
        let far = view.begin() + 6_148_914_691_236_517_206;
        assert_eq!(far.get(), None);
        assert_eq!(far.offset(), isize::MAX);
        assert!(far > view.end());

        let near = view.begin() - isize::MAX;
        assert_eq!(near.get(), None);
        assert_eq!(near.offset(), isize::MIN);
        assert_eq!(view.begin().at(isize::MIN), None);
        assert_eq!(view.begin().at(isize::MAX), None);
    }

    #[test]
    #[should_panic(expected = "outside the view")]
    fn iter_rejects_overflowed_cursor() {
        let view = StridedView::new(&DATA[..1], 0, 3, 1).unwrap();
        let _ = super::StridedIter::new(view.begin(), view.begin() + 6_148_914_691_236_517_206);
    }

    #[test]
    fn nth_skips_in_constant_steps() {
        let view = StridedView::new(&DATA, 0, 2, 6).unwrap();
        let mut iter = view.iter();
        assert_eq!(iter.nth(2), Some(&4));
        assert_eq!(iter.len(), 3);
        assert_eq!(iter.nth_back(1), Some(&8));
        assert_eq!(iter.next_back(), Some(&6));
        assert_eq!(iter.next(), None);
        assert_eq!(iter.nth(5), None);
    }
}
