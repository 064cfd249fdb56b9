use alloc::vec::Vec;
use core::{
    fmt,
    iter::FusedIterator,
    marker::PhantomData,
    mem::{ManuallyDrop, MaybeUninit},
    ptr, slice,
};

use crate::utils::{cold_path, resolve_range};

/// A vector with a fixed capacity stored inside the value itself.
///
/// The buffer is `[MaybeUninit<T>; N]`: exactly the first `len` slots hold
/// live elements, the rest are uninitialized memory that is never read and
/// never dropped. Construction and destruction of individual slots is manual,
/// via placement writes and `drop_in_place`.
///
/// It mirrors the parts of the [`Vec`] API that make sense for a fixed
/// capacity, and panics on any operation that would push `len` past `N`.
/// For a container that grows past its inline capacity instead of panicking,
/// see [`SpillVec`](crate::SpillVec).
///
/// # Examples
///
/// ```
/// use spillvec::InlineVec;
///
/// let mut vec: InlineVec<String, 4> = InlineVec::new();
/// assert_eq!(vec.capacity(), 4);
///
/// vec.push("hello".to_string());
/// vec.push("world".to_string());
/// assert_eq!(vec, ["hello", "world"]);
/// ```
pub struct InlineVec<T, const N: usize> {
    pub(crate) data: [MaybeUninit<T>; N],
    pub(crate) len: usize,
}

impl<T, const N: usize> Drop for InlineVec<T, N> {
    // The buffer is MaybeUninit, so the live prefix must be dropped by hand.
    fn drop(&mut self) {
        if self.len > 0 {
            // SAFETY: the first `len` slots are initialized.
            unsafe {
                ptr::drop_in_place(ptr::slice_from_raw_parts_mut(self.as_mut_ptr(), self.len));
            }
        }
    }
}

/// Creates an [`InlineVec`] containing the arguments.
///
/// The syntax follows [`vec!`](https://doc.rust-lang.org/std/macro.vec.html);
/// the capacity must be given explicitly in the type and the number of
/// elements cannot exceed it.
///
/// # Panics
/// Panics if the number of elements exceeds the capacity.
///
/// # Examples
///
/// ```
/// # use spillvec::{inlinevec, InlineVec};
/// let vec: InlineVec<String, 10> = inlinevec![];
/// let vec: InlineVec<i64, 10> = inlinevec![1; 5];
/// let vec: InlineVec<_, 10> = inlinevec![1, 2, 3, 4];
/// ```
#[macro_export]
macro_rules! inlinevec {
    [] => { $crate::InlineVec::new() };
    [$elem:expr; $n:expr] => { $crate::InlineVec::from_elem($elem, $n) };
    [$($item:expr),+ $(,)?] => { $crate::InlineVec::from_buf([ $($item),+ ]) };
}

impl<T, const N: usize> InlineVec<T, N> {
    /// Constructs a new, empty `InlineVec`.
    ///
    /// No slot is initialized; the whole buffer is reserved inside the value,
    /// so keep `N` modest when the vector lives on the stack.
    #[inline]
    pub const fn new() -> Self {
        Self {
            data: [const { MaybeUninit::uninit() }; N],
            len: 0,
        }
    }

    /// Creates an `InlineVec` by moving the elements of an array into it.
    ///
    /// # Panics
    /// Panics if `P > N`.
    ///
    /// # Examples
    /// ```
    /// # use spillvec::InlineVec;
    /// let vec: InlineVec<i32, 5> = InlineVec::from_buf([1, 2, 3]);
    /// assert_eq!(vec.len(), 3);
    /// ```
    #[inline]
    pub fn from_buf<const P: usize>(arr: [T; P]) -> Self {
        assert!(P <= N, "array length exceeds inline capacity");

        let mut vec = Self::new();
        let arr = ManuallyDrop::new(arr);
        // SAFETY: P <= N, and the source array is forgotten, so ownership of
        // every element moves into the buffer exactly once.
        unsafe {
            ptr::copy_nonoverlapping(arr.as_ptr(), vec.as_mut_ptr(), P);
            vec.len = P;
        }
        vec
    }

    /// Returns the number of live elements.
    #[inline(always)]
    pub const fn len(&self) -> usize {
        self.len
    }

    /// Returns `true` if the vector contains no elements.
    #[inline(always)]
    pub const fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Returns `true` if `len == N`, i.e. the next `push` would panic.
    #[inline(always)]
    pub const fn is_full(&self) -> bool {
        self.len >= N
    }

    /// Returns the fixed capacity `N`.
    #[inline(always)]
    pub const fn capacity(&self) -> usize {
        N
    }

    /// Returns a raw pointer to the first slot of the buffer.
    ///
    /// Only the first `len` slots are initialized.
    #[inline(always)]
    pub const fn as_ptr(&self) -> *const T {
        &raw const self.data as *const T
    }

    /// Returns a raw mutable pointer to the first slot of the buffer.
    #[inline(always)]
    pub const fn as_mut_ptr(&mut self) -> *mut T {
        &raw mut self.data as *mut T
    }

    /// Forces the length of the vector to `new_len`.
    ///
    /// # Safety
    /// - `new_len` must be `<= N`.
    /// - The first `new_len` slots must hold initialized values the vector
    ///   may drop.
    #[inline(always)]
    pub const unsafe fn set_len(&mut self, new_len: usize) {
        debug_assert!(new_len <= N);
        self.len = new_len;
    }

    /// Extracts a slice containing the entire vector.
    #[inline]
    pub const fn as_slice(&self) -> &[T] {
        // SAFETY: the first `len` slots are initialized.
        unsafe { slice::from_raw_parts(self.as_ptr(), self.len) }
    }

    /// Extracts a mutable slice containing the entire vector.
    #[inline]
    pub fn as_mut_slice(&mut self) -> &mut [T] {
        // SAFETY: the first `len` slots are initialized.
        unsafe { slice::from_raw_parts_mut(self.as_mut_ptr(), self.len) }
    }

    /// Appends an element to the back of the vector.
    ///
    /// # Panics
    /// Panics if the vector is full.
    ///
    /// # Examples
    ///
    /// ```
    /// # use spillvec::InlineVec;
    /// let mut vec = InlineVec::<i32, 5>::new();
    /// vec.push(1);
    /// vec.push(2);
    /// assert_eq!(vec, [1, 2]);
    /// ```
    #[inline]
    pub fn push(&mut self, value: T) {
        assert!(self.len < N, "capacity overflow in `push`");
        // SAFETY: just checked len < N.
        unsafe { self.push_unchecked(value) }
    }

    /// Appends an element without the capacity check.
    ///
    /// # Safety
    /// `len < N` must hold before the call.
    #[inline(always)]
    pub unsafe fn push_unchecked(&mut self, value: T) {
        debug_assert!(self.len < N);
        // SAFETY: slot `len` is in bounds and uninitialized.
        unsafe {
            ptr::write(self.as_mut_ptr().add(self.len), value);
        }
        self.len += 1;
    }

    /// Removes the last element and returns it, or `None` if empty.
    ///
    /// # Examples
    ///
    /// ```
    /// # use spillvec::{inlinevec, InlineVec};
    /// let mut vec: InlineVec<_, 5> = inlinevec![1, 2];
    /// assert_eq!(vec.pop(), Some(2));
    /// assert_eq!(vec.pop(), Some(1));
    /// assert_eq!(vec.pop(), None);
    /// ```
    #[inline]
    pub fn pop(&mut self) -> Option<T> {
        if self.len == 0 {
            cold_path();
            None
        } else {
            self.len -= 1;
            // SAFETY: slot `len` was initialized; shrinking first means it is
            // never dropped a second time.
            unsafe { Some(ptr::read(self.as_ptr().add(self.len))) }
        }
    }

    /// Inserts an element at position `index`, shifting everything at or
    /// after it one slot toward the end.
    ///
    /// # Panics
    /// Panics if `index > len` or the vector is full.
    ///
    /// # Examples
    ///
    /// ```
    /// # use spillvec::{inlinevec, InlineVec};
    /// let mut vec: InlineVec<_, 5> = inlinevec![1, 2, 3];
    /// vec.insert(1, 9);
    /// assert_eq!(vec, [1, 9, 2, 3]);
    /// ```
    #[inline]
    pub fn insert(&mut self, index: usize, element: T) {
        assert!(index <= self.len, "insertion index should be <= len");
        assert!(self.len < N, "capacity overflow in `insert`");

        // SAFETY: both preconditions checked above.
        unsafe { self.insert_unchecked(index, element) }
    }

    /// Inserts without bounds or capacity checks.
    ///
    /// # Safety
    /// `index <= len` and `len < N` must hold before the call.
    #[inline(always)]
    pub unsafe fn insert_unchecked(&mut self, index: usize, element: T) {
        debug_assert!(index <= self.len);
        debug_assert!(self.len < N);

        // SAFETY: the shift stays within the first len + 1 slots, and the
        // vacated slot is overwritten before anything can observe it.
        unsafe {
            let slot = self.as_mut_ptr().add(index);
            if index < self.len {
                ptr::copy(slot, slot.add(1), self.len - index);
            }
            ptr::write(slot, element);
        }
        self.len += 1;
    }

    /// Removes the element at `index` and returns it, shifting everything
    /// after it one slot toward the front.
    ///
    /// The element previously at `index + 1` ends up at `index`.
    ///
    /// # Panics
    /// Panics if `index >= len`.
    ///
    /// # Examples
    ///
    /// ```
    /// # use spillvec::{inlinevec, InlineVec};
    /// let mut vec: InlineVec<_, 5> = inlinevec![1, 2, 3];
    /// assert_eq!(vec.remove(1), 2);
    /// assert_eq!(vec, [1, 3]);
    /// ```
    #[inline]
    pub fn remove(&mut self, index: usize) -> T {
        assert!(index < self.len, "removal index should be < len");

        // SAFETY: `index` is in the live prefix; the slot's old value is read
        // out before the tail is shifted over it.
        unsafe {
            let slot = self.as_mut_ptr().add(index);
            let value = ptr::read(slot);
            ptr::copy(slot.add(1), slot, self.len - index - 1);
            self.len -= 1;
            value
        }
    }

    /// Shortens the vector to at most `len` elements, dropping the rest.
    ///
    /// Has no effect when `len >= self.len()`.
    #[inline]
    pub fn truncate(&mut self, len: usize) {
        if self.len > len {
            let drop_len = self.len - len;
            // Shrink before dropping so a panicking Drop cannot expose the
            // half-destroyed tail.
            self.len = len;
            // SAFETY: the abandoned tail slots were initialized.
            unsafe {
                ptr::drop_in_place(ptr::slice_from_raw_parts_mut(
                    self.as_mut_ptr().add(len),
                    drop_len,
                ));
            }
        }
    }

    /// Drops every element, resetting the length to zero.
    #[inline]
    pub fn clear(&mut self) {
        self.truncate(0);
    }

    /// Resizes the vector in place, filling new slots from the closure.
    ///
    /// # Panics
    /// Panics if `new_len > N`.
    ///
    /// # Examples
    /// ```
    /// # use spillvec::{inlinevec, InlineVec};
    /// let mut vec: InlineVec<_, 5> = inlinevec![1, 2, 3, 4];
    /// vec.resize_with(2, Default::default);
    /// assert_eq!(vec, [1, 2]);
    ///
    /// let mut p = 1;
    /// vec.resize_with(5, || { p *= 2; p });
    /// assert_eq!(vec, [1, 2, 2, 4, 8]);
    /// ```
    pub fn resize_with<F: FnMut() -> T>(&mut self, new_len: usize, mut f: F) {
        assert!(new_len <= N, "capacity overflow in `resize_with`");

        if new_len < self.len {
            self.truncate(new_len);
        } else {
            while self.len < new_len {
                // SAFETY: new_len <= N, so the next slot is free. Writing
                // then bumping keeps every live slot initialized even if a
                // later call to `f` panics.
                unsafe { self.push_unchecked(f()) };
            }
        }
    }

    /// Moves every element of `other` onto the end of `self`, leaving `other`
    /// empty. `other` may have a different inline capacity.
    ///
    /// # Panics
    /// Panics if the combined length exceeds `N`.
    ///
    /// # Examples
    /// ```
    /// # use spillvec::{inlinevec, InlineVec};
    /// let mut a: InlineVec<_, 6> = inlinevec![1, 2, 3, 4];
    /// let mut b: InlineVec<_, 4> = inlinevec![5, 6];
    /// a.append(&mut b);
    /// assert_eq!(a, [1, 2, 3, 4, 5, 6]);
    /// assert!(b.is_empty());
    /// ```
    #[inline]
    pub fn append<const P: usize>(&mut self, other: &mut InlineVec<T, P>) {
        let other_len = other.len;
        assert!(self.len + other_len <= N, "capacity overflow in `append`");

        // SAFETY: capacity checked; the source length is zeroed in the same
        // breath, so each element has exactly one owner.
        unsafe {
            ptr::copy_nonoverlapping(
                other.as_ptr(),
                self.as_mut_ptr().add(self.len),
                other_len,
            );
            self.len += other_len;
            other.len = 0;
        }
    }

    /// Moves the contents into a freshly allocated `Vec` with at least the
    /// given capacity, leaving `self` empty.
    ///
    /// This is the spillover primitive: a single allocation, one bitwise move
    /// per element, and the inline slots revert to uninitialized.
    #[inline]
    pub(crate) fn take_into_vec(&mut self, capacity: usize) -> Vec<T> {
        let len = self.len;
        let mut vec: Vec<T> = Vec::with_capacity(if capacity > len { capacity } else { len });

        // SAFETY: the allocation holds at least `len` elements, and zeroing
        // `self.len` forfeits inline ownership of everything copied.
        unsafe {
            ptr::copy_nonoverlapping(self.as_ptr(), vec.as_mut_ptr(), len);
            vec.set_len(len);
            self.len = 0;
        }
        vec
    }

    /// Converts the vector into a [`Vec`] with exactly `len` capacity.
    ///
    /// # Examples
    ///
    /// ```
    /// # use spillvec::{inlinevec, InlineVec};
    /// let vec: InlineVec<_, 5> = inlinevec![1, 2, 3];
    /// let vec = vec.into_vec();
    /// assert_eq!(vec, [1, 2, 3]);
    /// ```
    #[inline]
    pub fn into_vec(mut self) -> Vec<T> {
        let len = self.len;
        self.take_into_vec(len)
    }
}

impl<T: Clone, const N: usize> InlineVec<T, N> {
    /// Creates an `InlineVec` holding `num` clones of `elem`.
    ///
    /// # Panics
    /// Panics if `num > N`.
    #[inline]
    pub fn from_elem(elem: T, num: usize) -> Self {
        assert!(num <= N, "capacity overflow in `from_elem`");

        let mut vec = Self::new();
        if num > 0 {
            for _ in 0..num - 1 {
                // SAFETY: num <= N.
                unsafe { vec.push_unchecked(elem.clone()) };
            }
            // The last slot takes the original, saving one clone.
            unsafe { vec.push_unchecked(elem) };
        }
        vec
    }

    /// Resizes the vector in place, filling new slots with clones of `value`.
    ///
    /// # Panics
    /// Panics if `new_len > N`.
    ///
    /// # Examples
    ///
    /// ```
    /// # use spillvec::{inlinevec, InlineVec};
    /// let mut vec: InlineVec<_, 5> = inlinevec!["hi"];
    /// vec.resize(3, "there");
    /// assert_eq!(vec, ["hi", "there", "there"]);
    ///
    /// vec.resize(1, "");
    /// assert_eq!(vec, ["hi"]);
    /// ```
    pub fn resize(&mut self, new_len: usize, value: T) {
        assert!(new_len <= N, "capacity overflow in `resize`");

        if new_len < self.len {
            self.truncate(new_len);
        } else if new_len > self.len {
            for _ in 0..new_len - self.len - 1 {
                // SAFETY: new_len <= N.
                unsafe { self.push_unchecked(value.clone()) };
            }
            unsafe { self.push_unchecked(value) };
        }
    }

    /// Clones and appends every element of the slice.
    ///
    /// # Panics
    /// Panics if the combined length exceeds `N`.
    pub fn extend_from_slice(&mut self, other: &[T]) {
        assert!(
            self.len + other.len() <= N,
            "capacity overflow in `extend_from_slice`"
        );

        for item in other {
            // SAFETY: capacity checked above.
            unsafe { self.push_unchecked(item.clone()) };
        }
    }
}

impl<T, const N: usize> Default for InlineVec<T, N> {
    #[inline(always)]
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Clone, const N: usize> Clone for InlineVec<T, N> {
    fn clone(&self) -> Self {
        let mut vec = Self::new();
        for item in self.as_slice() {
            // SAFETY: the source fits in N, so the clone does too.
            unsafe { vec.push_unchecked(item.clone()) };
        }
        vec
    }

    fn clone_from(&mut self, source: &Self) {
        self.clear();
        for item in source.as_slice() {
            unsafe { self.push_unchecked(item.clone()) };
        }
    }
}

impl<'a, T: 'a + Clone, const N: usize> Extend<&'a T> for InlineVec<T, N> {
    /// # Panics
    /// Panics on capacity overflow.
    fn extend<I: IntoIterator<Item = &'a T>>(&mut self, iter: I) {
        for item in iter {
            self.push(item.clone());
        }
    }
}

impl<T, const N: usize> Extend<T> for InlineVec<T, N> {
    /// # Panics
    /// Panics on capacity overflow.
    #[inline]
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        for item in iter {
            self.push(item);
        }
    }
}

impl<T, const N: usize> FromIterator<T> for InlineVec<T, N> {
    /// # Panics
    /// Panics if the iterator yields more than `N` items.
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut vec = Self::new();
        vec.extend(iter);
        vec
    }
}

impl<T: Clone, const N: usize> From<&[T]> for InlineVec<T, N> {
    /// # Panics
    /// Panics if the slice is longer than `N`.
    fn from(value: &[T]) -> Self {
        let mut vec = Self::new();
        vec.extend_from_slice(value);
        vec
    }
}

impl<T, const N: usize, const P: usize> From<[T; P]> for InlineVec<T, N> {
    /// # Panics
    /// Panics if `P > N`.
    #[inline]
    fn from(value: [T; P]) -> Self {
        Self::from_buf(value)
    }
}

crate::utils::impl_slice_traits!(InlineVec<T, N>);

impl<T, U, const N: usize> PartialEq<InlineVec<U, N>> for InlineVec<T, N>
where
    T: PartialEq<U>,
{
    #[inline]
    fn eq(&self, other: &InlineVec<U, N>) -> bool {
        PartialEq::eq(self.as_slice(), other.as_slice())
    }
}

/// An iterator that consumes an [`InlineVec`] and yields its items by value.
///
/// # Examples
///
/// ```
/// # use spillvec::{inlinevec, InlineVec};
/// let vec: InlineVec<_, 3> = inlinevec!["1", "2", "3"];
/// let mut iter = vec.into_iter();
///
/// assert_eq!(iter.next(), Some("1"));
/// assert_eq!(iter.next_back(), Some("3"));
/// ```
pub struct IntoIter<T, const N: usize> {
    buf: ManuallyDrop<InlineVec<T, N>>,
    head: usize,
}

impl<T: Clone, const N: usize> Clone for IntoIter<T, N> {
    // Clones only the unyielded window; already-yielded slots are moved-out.
    fn clone(&self) -> Self {
        let mut buf = InlineVec::new();
        for item in self.as_slice() {
            // SAFETY: the window length never exceeds N.
            unsafe { buf.push_unchecked(item.clone()) };
        }
        buf.into_iter()
    }
}

impl<T, const N: usize> IntoIterator for InlineVec<T, N> {
    type Item = T;
    type IntoIter = IntoIter<T, N>;

    #[inline]
    fn into_iter(self) -> Self::IntoIter {
        IntoIter {
            buf: ManuallyDrop::new(self),
            head: 0,
        }
    }
}

impl<T, const N: usize> Iterator for IntoIter<T, N> {
    type Item = T;

    #[inline]
    fn next(&mut self) -> Option<T> {
        if self.head < self.buf.len {
            let idx = self.head;
            self.head += 1;
            // SAFETY: `idx` is inside the not-yet-yielded window; the window
            // bounds move past it, so it is read exactly once.
            unsafe { Some(ptr::read(self.buf.as_ptr().add(idx))) }
        } else {
            None
        }
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        let rest = self.buf.len - self.head;
        (rest, Some(rest))
    }
}

impl<T, const N: usize> DoubleEndedIterator for IntoIter<T, N> {
    #[inline]
    fn next_back(&mut self) -> Option<T> {
        if self.head < self.buf.len {
            self.buf.len -= 1;
            // SAFETY: same window argument as `next`, from the other end.
            unsafe { Some(ptr::read(self.buf.as_ptr().add(self.buf.len))) }
        } else {
            None
        }
    }
}

impl<T, const N: usize> ExactSizeIterator for IntoIter<T, N> {
    #[inline]
    fn len(&self) -> usize {
        self.buf.len - self.head
    }
}

impl<T, const N: usize> FusedIterator for IntoIter<T, N> {}

impl<T, const N: usize> Drop for IntoIter<T, N> {
    fn drop(&mut self) {
        if self.head < self.buf.len {
            // SAFETY: the window head..len still owns its elements.
            unsafe {
                ptr::drop_in_place(ptr::slice_from_raw_parts_mut(
                    self.buf.as_mut_ptr().add(self.head),
                    self.buf.len - self.head,
                ));
            }
        }
    }
}

impl<T, const N: usize> IntoIter<T, N> {
    /// Returns the remaining items as a slice.
    pub fn as_slice(&self) -> &[T] {
        unsafe { slice::from_raw_parts(self.buf.as_ptr().add(self.head), self.len()) }
    }
}

impl<T, const N: usize> Default for IntoIter<T, N> {
    fn default() -> Self {
        InlineVec::new().into_iter()
    }
}

impl<T: fmt::Debug, const N: usize> fmt::Debug for IntoIter<T, N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("IntoIter").field(&self.as_slice()).finish()
    }
}

/// A draining iterator over a range of an [`InlineVec`].
///
/// See [`InlineVec::drain`].
pub struct Drain<'a, T: 'a, const N: usize> {
    vec: ptr::NonNull<InlineVec<T, N>>,
    /// Next index to yield from the front.
    head: usize,
    /// One past the last index still to yield.
    rem_end: usize,
    /// Start of the untouched tail in the original buffer.
    tail_start: usize,
    tail_len: usize,
    _marker: PhantomData<&'a mut InlineVec<T, N>>,
}

impl<T, const N: usize> InlineVec<T, N> {
    /// Removes the given range from the vector and returns a double-ended
    /// iterator over the removed elements.
    ///
    /// When the iterator is dropped, any unconsumed elements of the range are
    /// dropped and the tail is shifted down in a single pass, so removing a
    /// range of `k` elements costs one move per trailing element regardless
    /// of `k`.
    ///
    /// # Panics
    /// Panics if the range is inverted or reaches past `len`.
    ///
    /// # Leaking
    /// If the iterator is leaked instead of dropped, the vector keeps only
    /// the elements before the range; the range itself and the tail are lost
    /// but never double-dropped.
    ///
    /// # Examples
    /// ```
    /// # use spillvec::{inlinevec, InlineVec};
    /// let mut v: InlineVec<_, 8> = inlinevec![0, 1, 2, 3, 4];
    /// let removed: Vec<_> = v.drain(1..3).collect();
    /// assert_eq!(removed, [1, 2]);
    /// assert_eq!(v, [0, 3, 4]);
    /// ```
    pub fn drain<R: core::ops::RangeBounds<usize>>(&mut self, range: R) -> Drain<'_, T, N> {
        let len = self.len;
        let (start, end) = resolve_range(&range, len);
        assert!(start <= end, "drain range start should be <= end");
        assert!(end <= len, "drain range end should be <= len");

        // Truncate to the head section up front: if the Drain is leaked, the
        // vector never touches the range or the tail again.
        self.len = start;

        Drain {
            vec: ptr::NonNull::from(self),
            head: start,
            rem_end: end,
            tail_start: end,
            tail_len: len - end,
            _marker: PhantomData,
        }
    }
}

impl<T, const N: usize> Drain<'_, T, N> {
    /// Returns the remaining unyielded elements as a slice.
    pub fn as_slice(&self) -> &[T] {
        // SAFETY: head..rem_end still owns its elements.
        unsafe {
            slice::from_raw_parts(
                self.vec.as_ref().as_ptr().add(self.head),
                self.rem_end - self.head,
            )
        }
    }
}

impl<T, const N: usize> AsRef<[T]> for Drain<'_, T, N> {
    fn as_ref(&self) -> &[T] {
        self.as_slice()
    }
}

impl<T: fmt::Debug, const N: usize> fmt::Debug for Drain<'_, T, N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Drain").field(&self.as_slice()).finish()
    }
}

impl<T, const N: usize> Iterator for Drain<'_, T, N> {
    type Item = T;

    #[inline]
    fn next(&mut self) -> Option<T> {
        if self.head == self.rem_end {
            return None;
        }
        let idx = self.head;
        self.head += 1;
        // SAFETY: `idx` leaves the unyielded window before the read, so the
        // element is moved out exactly once.
        unsafe { Some(ptr::read(self.vec.as_ref().as_ptr().add(idx))) }
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        let rest = self.rem_end - self.head;
        (rest, Some(rest))
    }
}

impl<T, const N: usize> DoubleEndedIterator for Drain<'_, T, N> {
    #[inline]
    fn next_back(&mut self) -> Option<T> {
        if self.head == self.rem_end {
            return None;
        }
        self.rem_end -= 1;
        // SAFETY: same window argument as `next`, from the other end.
        unsafe { Some(ptr::read(self.vec.as_ref().as_ptr().add(self.rem_end))) }
    }
}

impl<T, const N: usize> ExactSizeIterator for Drain<'_, T, N> {
    #[inline]
    fn len(&self) -> usize {
        self.rem_end - self.head
    }
}

impl<T, const N: usize> FusedIterator for Drain<'_, T, N> {}

impl<T, const N: usize> Drop for Drain<'_, T, N> {
    fn drop(&mut self) {
        /// Shifts the tail down and restores the vector length, even when
        /// dropping a drained element panics.
        struct TailGuard<'r, 'a, T, const N: usize>(&'r mut Drain<'a, T, N>);

        impl<T, const N: usize> Drop for TailGuard<'_, '_, T, N> {
            fn drop(&mut self) {
                let drain = &mut *self.0;
                if drain.tail_len > 0 {
                    // SAFETY: the tail slots were never touched; the target
                    // region `start..start + tail_len` is free because the
                    // drained range has been read out or dropped.
                    unsafe {
                        let vec = drain.vec.as_mut();
                        let start = vec.len;
                        if drain.tail_start != start {
                            ptr::copy(
                                vec.as_ptr().add(drain.tail_start),
                                vec.as_mut_ptr().add(start),
                                drain.tail_len,
                            );
                        }
                        vec.len = start + drain.tail_len;
                    }
                }
            }
        }

        let head = self.head;
        let drop_len = self.rem_end - self.head;
        let guard = TailGuard(self);

        if drop_len > 0 {
            // SAFETY: head..rem_end still owns its elements.
            unsafe {
                let vec = guard.0.vec.as_ptr();
                ptr::drop_in_place(ptr::slice_from_raw_parts_mut(
                    (*vec).as_mut_ptr().add(head),
                    drop_len,
                ));
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::string::{String, ToString};
    use alloc::vec::Vec;
    use core::sync::atomic::{AtomicUsize, Ordering};

    /// An element type that counts its drops in a test-local counter.
    struct Token<'a>(&'a AtomicUsize);

    impl Drop for Token<'_> {
        fn drop(&mut self) {
            self.0.fetch_add(1, Ordering::SeqCst);
        }
    }

    #[test]
    fn push_pop_roundtrip() {
        let mut vec: InlineVec<i32, 4> = InlineVec::new();
        assert!(vec.is_empty());

        vec.push(1);
        vec.push(2);
        vec.push(3);
        assert_eq!(vec.len(), 3);
        assert!(!vec.is_full());

        vec.push(4);
        assert!(vec.is_full());

        assert_eq!(vec.pop(), Some(4));
        assert_eq!(vec.pop(), Some(3));
        assert_eq!(vec, [1, 2]);
    }

    #[test]
    #[should_panic(expected = "capacity overflow")]
    fn push_past_capacity_panics() {
        let mut vec: InlineVec<i32, 2> = inlinevec![1, 2];
        vec.push(3);
    }

    #[test]
    fn insert_shifts_right() {
        let mut vec: InlineVec<_, 8> = inlinevec![0, 1, 2, 3, 4];
        vec.insert(1, 100);
        assert_eq!(vec, [0, 100, 1, 2, 3, 4]);

        vec.insert(6, 7);
        assert_eq!(vec, [0, 100, 1, 2, 3, 4, 7]);
    }

    #[test]
    fn remove_shifts_left() {
        let mut vec: InlineVec<_, 8> = inlinevec![0, 1, 2, 3];
        assert_eq!(vec.remove(1), 1);
        assert_eq!(vec, [0, 2, 3]);
        assert_eq!(vec.remove(2), 3);
        assert_eq!(vec, [0, 2]);
    }

    #[test]
    fn resize_grows_and_shrinks() {
        let mut vec: InlineVec<String, 6> = InlineVec::new();
        vec.resize(3, "x".to_string());
        assert_eq!(vec, ["x", "x", "x"]);

        vec.resize(1, "y".to_string());
        assert_eq!(vec, ["x"]);
    }

    #[test]
    fn drain_middle_shifts_tail_once() {
        let mut vec: InlineVec<_, 8> = inlinevec![0, 1, 2, 3, 4, 5, 6];
        let removed: Vec<_> = vec.drain(1..3).collect();
        assert_eq!(removed, [1, 2]);
        assert_eq!(vec, [0, 3, 4, 5, 6]);
        assert_eq!(vec[1], 3);
    }

    #[test]
    fn drain_unconsumed_drops_range() {
        let drops = AtomicUsize::new(0);
        let mut vec: InlineVec<Token, 8> = InlineVec::new();
        for _ in 0..5 {
            vec.push(Token(&drops));
        }
        vec.drain(1..4);
        assert_eq!(drops.load(Ordering::SeqCst), 3);
        assert_eq!(vec.len(), 2);
        drop(vec);
        assert_eq!(drops.load(Ordering::SeqCst), 5);
    }

    #[test]
    fn drain_back_to_front() {
        let mut vec: InlineVec<_, 8> = inlinevec![0, 1, 2, 3, 4];
        let mut iter = vec.drain(1..4);
        assert_eq!(iter.next_back(), Some(3));
        assert_eq!(iter.next(), Some(1));
        assert_eq!(iter.as_slice(), [2]);
        drop(iter);
        assert_eq!(vec, [0, 4]);
    }

    #[test]
    fn into_iter_drops_unconsumed() {
        let drops = AtomicUsize::new(0);
        let mut vec: InlineVec<Token, 8> = InlineVec::new();
        for _ in 0..4 {
            vec.push(Token(&drops));
        }
        let mut iter = vec.into_iter();
        iter.next();
        iter.next_back();
        assert_eq!(drops.load(Ordering::SeqCst), 2);
        drop(iter);
        assert_eq!(drops.load(Ordering::SeqCst), 4);
    }

    #[test]
    fn construct_and_destroy_counts_match() {
        let drops = AtomicUsize::new(0);
        {
            let mut vec: InlineVec<Token, 8> = InlineVec::new();
            for _ in 0..8 {
                vec.push(Token(&drops));
            }
        }
        assert_eq!(drops.load(Ordering::SeqCst), 8);
    }

    #[test]
    fn remove_destructs_exactly_one() {
        let drops = AtomicUsize::new(0);
        let mut vec: InlineVec<Token, 8> = InlineVec::new();
        for _ in 0..5 {
            vec.push(Token(&drops));
        }
        let token = vec.remove(2);
        assert_eq!(drops.load(Ordering::SeqCst), 0);
        drop(token);
        assert_eq!(drops.load(Ordering::SeqCst), 1);
        assert_eq!(vec.len(), 4);
    }

    #[test]
    fn clear_is_idempotent() {
        let mut vec: InlineVec<_, 4> = inlinevec![1, 2, 3];
        vec.clear();
        assert!(vec.is_empty());
        vec.clear();
        assert!(vec.is_empty());
        assert_eq!(vec.capacity(), 4);
    }

    #[test]
    fn append_moves_everything() {
        let mut a: InlineVec<String, 6> = inlinevec!["a".to_string(), "b".to_string()];
        let mut b: InlineVec<String, 3> = inlinevec!["c".to_string()];
        a.append(&mut b);
        assert_eq!(a, ["a", "b", "c"]);
        assert!(b.is_empty());
    }
}
