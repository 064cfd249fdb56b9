use alloc::vec::Vec;
use core::{fmt, iter::FusedIterator, mem, ptr};

use crate::inline_vec::{self, InlineVec};
use crate::utils::cold_path;
use crate::LengthError;

/// Capacity of the heap allocation created when inline storage overflows.
///
/// Over-allocating past the immediate requirement keeps a burst of pushes
/// right after the spill from reallocating again.
#[inline(always)]
const fn spilled_capacity(required: usize) -> usize {
    required + (required >> 1) + 4
}

/// Largest element count the address space can hold for `T`.
#[inline(always)]
const fn max_elements<T>() -> usize {
    if mem::size_of::<T>() == 0 {
        usize::MAX
    } else {
        isize::MAX as usize / mem::size_of::<T>()
    }
}

/// The storage backing a [`SpillVec`]: inline buffer before the first
/// overflow, plain `Vec` after. There is no arm for going back.
enum Repr<T, const N: usize> {
    Inline(InlineVec<T, N>),
    Spilled(Vec<T>),
}

/// A vector that stores up to `N` elements inline and spills to the heap the
/// first time that capacity is exceeded.
///
/// While inline, elements live in a `[MaybeUninit<T>; N]` buffer inside the
/// value itself and no allocation happens. The first growth past `N` moves
/// every element into a freshly allocated `Vec` in one pass, and from then on
/// the container behaves exactly like that `Vec`. The transition is one way:
/// [`clear`](Self::clear), [`truncate`](Self::truncate) and
/// [`shrink_to_fit`](Self::shrink_to_fit) keep whichever storage mode the
/// vector is already in.
///
/// The element's address therefore changes at most once over the container's
/// lifetime (plus ordinary `Vec` reallocations afterwards), and moving the
/// container itself only invalidates element addresses while it is inline.
///
/// # Examples
///
/// ```
/// use spillvec::SpillVec;
///
/// let mut vec: SpillVec<i32, 4> = SpillVec::new();
/// vec.extend([1, 2, 3, 4]);
/// assert!(vec.is_inline());
///
/// vec.push(5); // Exceeds the inline capacity
/// assert!(vec.is_spilled());
/// assert_eq!(vec, [1, 2, 3, 4, 5]);
/// ```
pub struct SpillVec<T, const N: usize> {
    repr: Repr<T, N>,
}

/// Creates a [`SpillVec`] containing the arguments.
///
/// The syntax follows [`vec!`](https://doc.rust-lang.org/std/macro.vec.html).
/// The result starts inline when the elements fit in `N` and heap-backed
/// otherwise.
///
/// # Examples
///
/// ```
/// # use spillvec::{spillvec, SpillVec};
/// let vec: SpillVec<i32, 4> = spillvec![];
/// let vec: SpillVec<i32, 4> = spillvec![7; 3];
/// let vec: SpillVec<_, 4> = spillvec![1, 2, 3, 4, 5];
/// assert!(vec.is_spilled());
/// ```
#[macro_export]
macro_rules! spillvec {
    [] => { $crate::SpillVec::new() };
    [$elem:expr; $n:expr] => { $crate::SpillVec::from_elem($elem, $n) };
    [$($item:expr),+ $(,)?] => { $crate::SpillVec::from_buf([ $($item),+ ]) };
}

impl<T, const N: usize> SpillVec<T, N> {
    /// Constructs a new, empty `SpillVec` in inline mode.
    #[inline]
    pub const fn new() -> Self {
        Self {
            repr: Repr::Inline(InlineVec::new()),
        }
    }

    /// Constructs an empty `SpillVec` able to hold `capacity` elements
    /// without reallocating.
    ///
    /// Starts inline when `capacity <= N` and heap-backed otherwise.
    #[inline]
    pub fn with_capacity(capacity: usize) -> Self {
        if capacity <= N {
            Self::new()
        } else {
            Self {
                repr: Repr::Spilled(Vec::with_capacity(capacity)),
            }
        }
    }

    /// Wraps an existing `Vec` without copying its elements.
    ///
    /// The result is heap-backed regardless of the vector's length; elements
    /// are never moved into the inline buffer.
    #[inline]
    pub fn from_vec(vec: Vec<T>) -> Self {
        Self {
            repr: Repr::Spilled(vec),
        }
    }

    /// Creates a `SpillVec` by moving the elements of an array into it.
    ///
    /// Inline when `P <= N`, heap-backed otherwise.
    #[inline]
    pub fn from_buf<const P: usize>(arr: [T; P]) -> Self {
        if P <= N {
            Self {
                repr: Repr::Inline(InlineVec::from_buf(arr)),
            }
        } else {
            Self {
                repr: Repr::Spilled(arr.into()),
            }
        }
    }

    /// Returns the number of elements.
    #[inline]
    pub const fn len(&self) -> usize {
        match &self.repr {
            Repr::Inline(buf) => buf.len(),
            Repr::Spilled(vec) => vec.len(),
        }
    }

    /// Returns `true` if the vector contains no elements.
    #[inline]
    pub const fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns the number of elements the vector can hold before its next
    /// reallocation: `N` while inline, the heap capacity after spilling.
    #[inline]
    pub const fn capacity(&self) -> usize {
        match &self.repr {
            Repr::Inline(_) => N,
            Repr::Spilled(vec) => vec.capacity(),
        }
    }

    /// Returns the inline capacity `N`, regardless of the current mode.
    #[inline]
    pub const fn inline_capacity(&self) -> usize {
        N
    }

    /// Returns `true` while elements live in the inline buffer.
    ///
    /// # Examples
    ///
    /// ```
    /// # use spillvec::{spillvec, SpillVec};
    /// let mut vec: SpillVec<_, 2> = spillvec![1, 2];
    /// assert!(vec.is_inline());
    /// vec.push(3);
    /// assert!(!vec.is_inline());
    /// ```
    #[inline]
    pub const fn is_inline(&self) -> bool {
        matches!(&self.repr, Repr::Inline(_))
    }

    /// Returns `true` once the vector has spilled to the heap.
    #[inline]
    pub const fn is_spilled(&self) -> bool {
        matches!(&self.repr, Repr::Spilled(_))
    }

    /// Returns the largest length this element type can reach: the address
    /// space in bytes divided by the element size.
    ///
    /// Growth past this bound panics, or returns [`LengthError`] through
    /// [`try_resize`](Self::try_resize).
    #[inline]
    pub const fn max_len(&self) -> usize {
        max_elements::<T>()
    }

    /// Returns a raw pointer to the first element.
    ///
    /// The pointer targets the inline buffer or the heap allocation depending
    /// on the current mode, and is invalidated by the spill.
    #[inline]
    pub const fn as_ptr(&self) -> *const T {
        match &self.repr {
            Repr::Inline(buf) => buf.as_ptr(),
            Repr::Spilled(vec) => vec.as_ptr(),
        }
    }

    /// Returns a raw mutable pointer to the first element.
    #[inline]
    pub fn as_mut_ptr(&mut self) -> *mut T {
        match &mut self.repr {
            Repr::Inline(buf) => buf.as_mut_ptr(),
            Repr::Spilled(vec) => vec.as_mut_ptr(),
        }
    }

    /// Extracts a slice containing the entire vector.
    #[inline]
    pub const fn as_slice(&self) -> &[T] {
        match &self.repr {
            Repr::Inline(buf) => buf.as_slice(),
            Repr::Spilled(vec) => vec.as_slice(),
        }
    }

    /// Extracts a mutable slice containing the entire vector.
    #[inline]
    pub fn as_mut_slice(&mut self) -> &mut [T] {
        match &mut self.repr {
            Repr::Inline(buf) => buf.as_mut_slice(),
            Repr::Spilled(vec) => vec.as_mut_slice(),
        }
    }

    /// Appends an element to the back of the vector, spilling to the heap if
    /// the inline buffer is full.
    ///
    /// # Examples
    ///
    /// ```
    /// # use spillvec::SpillVec;
    /// let mut vec: SpillVec<i32, 2> = SpillVec::new();
    /// vec.push(1);
    /// vec.push(2);
    /// vec.push(3);
    /// assert!(vec.is_spilled());
    /// assert_eq!(vec, [1, 2, 3]);
    /// ```
    #[inline]
    pub fn push(&mut self, value: T) {
        match &mut self.repr {
            Repr::Inline(buf) => {
                if !buf.is_full() {
                    // SAFETY: just checked there is room.
                    unsafe { buf.push_unchecked(value) };
                } else {
                    cold_path();
                    let mut vec = buf.take_into_vec(spilled_capacity(N));
                    vec.push(value);
                    self.repr = Repr::Spilled(vec);
                }
            }
            Repr::Spilled(vec) => vec.push(value),
        }
    }

    /// Removes the last element and returns it, or `None` if empty.
    ///
    /// Never changes the storage mode.
    #[inline]
    pub fn pop(&mut self) -> Option<T> {
        match &mut self.repr {
            Repr::Inline(buf) => buf.pop(),
            Repr::Spilled(vec) => vec.pop(),
        }
    }

    /// Inserts an element at position `index`, shifting everything at or
    /// after it toward the end. Spills if the inline buffer is full.
    ///
    /// # Panics
    /// Panics if `index > len`.
    ///
    /// # Examples
    ///
    /// ```
    /// # use spillvec::{spillvec, SpillVec};
    /// let mut vec: SpillVec<_, 4> = spillvec![1, 3];
    /// vec.insert(1, 2);
    /// assert_eq!(vec, [1, 2, 3]);
    /// ```
    pub fn insert(&mut self, index: usize, element: T) {
        match &mut self.repr {
            Repr::Inline(buf) => {
                assert!(index <= buf.len(), "insertion index should be <= len");
                if !buf.is_full() {
                    // SAFETY: index checked, room checked.
                    unsafe { buf.insert_unchecked(index, element) };
                } else {
                    cold_path();
                    let mut vec = buf.take_into_vec(spilled_capacity(N));
                    vec.insert(index, element);
                    self.repr = Repr::Spilled(vec);
                }
            }
            Repr::Spilled(vec) => vec.insert(index, element),
        }
    }

    /// Removes the element at `index` and returns it, shifting everything
    /// after it toward the front.
    ///
    /// # Panics
    /// Panics if `index >= len`.
    #[inline]
    pub fn remove(&mut self, index: usize) -> T {
        match &mut self.repr {
            Repr::Inline(buf) => buf.remove(index),
            Repr::Spilled(vec) => vec.remove(index),
        }
    }

    /// Shortens the vector to at most `len` elements, dropping the rest.
    ///
    /// Never changes the storage mode, even when truncating a spilled vector
    /// back below `N`.
    #[inline]
    pub fn truncate(&mut self, len: usize) {
        match &mut self.repr {
            Repr::Inline(buf) => buf.truncate(len),
            Repr::Spilled(vec) => vec.truncate(len),
        }
    }

    /// Drops every element. Mode and capacity are preserved.
    #[inline]
    pub fn clear(&mut self) {
        self.truncate(0);
    }

    /// Reserves capacity for at least `additional` more elements, spilling to
    /// the heap when the inline buffer cannot satisfy the request.
    ///
    /// # Panics
    /// Panics if the required capacity exceeds [`max_len`](Self::max_len).
    ///
    /// # Examples
    ///
    /// ```
    /// # use spillvec::{spillvec, SpillVec};
    /// let mut vec: SpillVec<_, 4> = spillvec![1];
    /// vec.reserve(3);
    /// assert!(vec.is_inline()); // Fits inline
    /// vec.reserve(10);
    /// assert!(vec.is_spilled());
    /// assert!(vec.capacity() >= 11);
    /// ```
    pub fn reserve(&mut self, additional: usize) {
        match &mut self.repr {
            Repr::Inline(buf) => {
                // len <= N, so the subtraction cannot underflow and no sum is
                // formed that could wrap for a huge `additional`.
                if additional > N - buf.len() {
                    cold_path();
                    let required = match buf.len().checked_add(additional) {
                        Some(required) if required <= max_elements::<T>() => required,
                        _ => panic!("capacity overflow in `reserve`"),
                    };
                    let vec = buf.take_into_vec(required);
                    self.repr = Repr::Spilled(vec);
                }
            }
            Repr::Spilled(vec) => vec.reserve(additional),
        }
    }

    /// Like [`reserve`](Self::reserve), but asks the heap allocation for
    /// exactly the requested capacity.
    ///
    /// # Panics
    /// Panics if the required capacity exceeds [`max_len`](Self::max_len).
    pub fn reserve_exact(&mut self, additional: usize) {
        match &mut self.repr {
            Repr::Inline(buf) => {
                if additional > N - buf.len() {
                    cold_path();
                    let required = match buf.len().checked_add(additional) {
                        Some(required) if required <= max_elements::<T>() => required,
                        _ => panic!("capacity overflow in `reserve_exact`"),
                    };
                    let vec = buf.take_into_vec(required);
                    self.repr = Repr::Spilled(vec);
                }
            }
            Repr::Spilled(vec) => vec.reserve_exact(additional),
        }
    }

    /// Releases unused heap capacity. A no-op while inline, and never moves
    /// elements back into the inline buffer.
    #[inline]
    pub fn shrink_to_fit(&mut self) {
        match &mut self.repr {
            Repr::Inline(_) => {}
            Repr::Spilled(vec) => vec.shrink_to_fit(),
        }
    }

    /// Resizes the vector in place, filling new slots from the closure.
    ///
    /// # Panics
    /// Panics if `new_len` exceeds [`max_len`](Self::max_len).
    pub fn resize_with<F: FnMut() -> T>(&mut self, new_len: usize, f: F) {
        assert!(new_len <= self.max_len(), "length overflow in `resize_with`");
        match &mut self.repr {
            Repr::Inline(buf) => {
                if new_len <= N {
                    buf.resize_with(new_len, f);
                } else {
                    cold_path();
                    let mut vec = buf.take_into_vec(new_len);
                    vec.resize_with(new_len, f);
                    self.repr = Repr::Spilled(vec);
                }
            }
            Repr::Spilled(vec) => vec.resize_with(new_len, f),
        }
    }

    /// Moves every element of `other` onto the end of `self`, leaving `other`
    /// empty. The two vectors may have different inline capacities.
    ///
    /// `self` spills if the combined length exceeds `N`; `other` keeps its
    /// current mode.
    ///
    /// # Examples
    ///
    /// ```
    /// # use spillvec::{spillvec, SpillVec};
    /// let mut a: SpillVec<_, 4> = spillvec![1, 2, 3];
    /// let mut b: SpillVec<_, 2> = spillvec![4, 5];
    /// a.append(&mut b);
    /// assert_eq!(a, [1, 2, 3, 4, 5]);
    /// assert!(a.is_spilled());
    /// assert!(b.is_empty());
    /// ```
    pub fn append<const P: usize>(&mut self, other: &mut SpillVec<T, P>) {
        let count = other.len();
        // SAFETY: `other` forfeits ownership of all `count` elements in the
        // same expression, and distinct `&mut` receivers cannot alias.
        unsafe {
            self.append_raw(other.as_ptr(), count);
            match &mut other.repr {
                Repr::Inline(buf) => buf.set_len(0),
                Repr::Spilled(vec) => vec.set_len(0),
            }
        }
    }

    /// Bitwise-appends `count` elements read from `src`.
    ///
    /// # Safety
    /// `src..src + count` must be initialized, must not overlap `self`'s
    /// storage, and the caller must forfeit ownership of those elements.
    unsafe fn append_raw(&mut self, src: *const T, count: usize) {
        match &mut self.repr {
            Repr::Inline(buf) => {
                let len = buf.len();
                if len + count <= N {
                    // SAFETY: fits inline; ownership transferred by contract.
                    unsafe {
                        ptr::copy_nonoverlapping(src, buf.as_mut_ptr().add(len), count);
                        buf.set_len(len + count);
                    }
                } else {
                    cold_path();
                    let mut vec = buf.take_into_vec(spilled_capacity(len + count));
                    // SAFETY: the allocation holds at least len + count.
                    unsafe {
                        ptr::copy_nonoverlapping(src, vec.as_mut_ptr().add(len), count);
                        vec.set_len(len + count);
                    }
                    self.repr = Repr::Spilled(vec);
                }
            }
            Repr::Spilled(vec) => {
                vec.reserve(count);
                let len = vec.len();
                // SAFETY: capacity reserved above.
                unsafe {
                    ptr::copy_nonoverlapping(src, vec.as_mut_ptr().add(len), count);
                    vec.set_len(len + count);
                }
            }
        }
    }

    /// Converts the vector into a plain [`Vec`].
    ///
    /// Free when already spilled; a single allocation and bitwise move when
    /// inline.
    ///
    /// # Examples
    ///
    /// ```
    /// # use spillvec::{spillvec, SpillVec};
    /// let vec: SpillVec<_, 4> = spillvec![1, 2, 3];
    /// assert_eq!(vec.into_vec(), [1, 2, 3]);
    /// ```
    #[inline]
    pub fn into_vec(self) -> Vec<T> {
        match self.repr {
            Repr::Inline(buf) => buf.into_vec(),
            Repr::Spilled(vec) => vec,
        }
    }
}

impl<T: Clone, const N: usize> SpillVec<T, N> {
    /// Creates a `SpillVec` holding `num` clones of `elem`.
    ///
    /// Inline when `num <= N`, heap-backed otherwise.
    pub fn from_elem(elem: T, num: usize) -> Self {
        if num <= N {
            Self {
                repr: Repr::Inline(InlineVec::from_elem(elem, num)),
            }
        } else {
            Self {
                repr: Repr::Spilled(alloc::vec![elem; num]),
            }
        }
    }

    /// Resizes the vector in place, filling new slots with clones of `value`.
    /// Spills when `new_len > N` while inline.
    ///
    /// # Panics
    /// Panics if `new_len` exceeds [`max_len`](Self::max_len).
    ///
    /// # Examples
    ///
    /// ```
    /// # use spillvec::{spillvec, SpillVec};
    /// let mut vec: SpillVec<_, 4> = spillvec![1];
    /// vec.resize(6, 0);
    /// assert_eq!(vec, [1, 0, 0, 0, 0, 0]);
    /// assert!(vec.is_spilled());
    /// ```
    pub fn resize(&mut self, new_len: usize, value: T) {
        assert!(new_len <= self.max_len(), "length overflow in `resize`");
        match &mut self.repr {
            Repr::Inline(buf) => {
                if new_len <= N {
                    buf.resize(new_len, value);
                } else {
                    cold_path();
                    let mut vec = buf.take_into_vec(new_len);
                    vec.resize(new_len, value);
                    self.repr = Repr::Spilled(vec);
                }
            }
            Repr::Spilled(vec) => vec.resize(new_len, value),
        }
    }

    /// Fallible [`resize`](Self::resize): reports a length past
    /// [`max_len`](Self::max_len) as a [`LengthError`] instead of panicking,
    /// leaving the vector unmodified.
    ///
    /// # Examples
    ///
    /// ```
    /// # use spillvec::{spillvec, SpillVec};
    /// let mut vec: SpillVec<u16, 4> = spillvec![1];
    /// let err = vec.try_resize(usize::MAX, 0).unwrap_err();
    /// assert_eq!(err.requested(), usize::MAX);
    /// assert_eq!(vec, [1]); // Untouched
    /// ```
    pub fn try_resize(&mut self, new_len: usize, value: T) -> Result<(), LengthError> {
        if new_len > self.max_len() {
            cold_path();
            return Err(LengthError::new(new_len, self.max_len()));
        }
        self.resize(new_len, value);
        Ok(())
    }

    /// Clones and appends every element of the slice, spilling if needed.
    ///
    /// # Examples
    ///
    /// ```
    /// # use spillvec::{spillvec, SpillVec};
    /// let mut vec: SpillVec<_, 4> = spillvec![1, 2];
    /// vec.extend_from_slice(&[3, 4, 5]);
    /// assert_eq!(vec, [1, 2, 3, 4, 5]);
    /// ```
    pub fn extend_from_slice(&mut self, other: &[T]) {
        match &mut self.repr {
            Repr::Inline(buf) => {
                if buf.len() + other.len() <= N {
                    buf.extend_from_slice(other);
                } else {
                    cold_path();
                    let mut vec = buf.take_into_vec(spilled_capacity(buf.len() + other.len()));
                    vec.extend_from_slice(other);
                    self.repr = Repr::Spilled(vec);
                }
            }
            Repr::Spilled(vec) => vec.extend_from_slice(other),
        }
    }
}

impl<T, const N: usize> Default for SpillVec<T, N> {
    #[inline(always)]
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Clone, const N: usize> Clone for SpillVec<T, N> {
    /// The clone keeps the source's storage mode.
    fn clone(&self) -> Self {
        match &self.repr {
            Repr::Inline(buf) => Self {
                repr: Repr::Inline(buf.clone()),
            },
            Repr::Spilled(vec) => Self {
                repr: Repr::Spilled(vec.clone()),
            },
        }
    }
}

impl<T, const N: usize> Extend<T> for SpillVec<T, N> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        for item in iter {
            self.push(item);
        }
    }
}

impl<'a, T: 'a + Clone, const N: usize> Extend<&'a T> for SpillVec<T, N> {
    fn extend<I: IntoIterator<Item = &'a T>>(&mut self, iter: I) {
        for item in iter {
            self.push(item.clone());
        }
    }
}

impl<T, const N: usize> FromIterator<T> for SpillVec<T, N> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut vec = Self::new();
        vec.extend(iter);
        vec
    }
}

impl<T, const N: usize> From<Vec<T>> for SpillVec<T, N> {
    #[inline]
    fn from(value: Vec<T>) -> Self {
        Self::from_vec(value)
    }
}

impl<T, const N: usize> From<InlineVec<T, N>> for SpillVec<T, N> {
    #[inline]
    fn from(value: InlineVec<T, N>) -> Self {
        Self {
            repr: Repr::Inline(value),
        }
    }
}

impl<T, const N: usize, const P: usize> From<[T; P]> for SpillVec<T, N> {
    #[inline]
    fn from(value: [T; P]) -> Self {
        Self::from_buf(value)
    }
}

impl<T: Clone, const N: usize> From<&[T]> for SpillVec<T, N> {
    fn from(value: &[T]) -> Self {
        let mut vec = Self::new();
        vec.extend_from_slice(value);
        vec
    }
}

crate::utils::impl_slice_traits!(SpillVec<T, N>);

impl<T, U, const N: usize, const P: usize> PartialEq<SpillVec<U, P>> for SpillVec<T, N>
where
    T: PartialEq<U>,
{
    /// Equality compares elements only; storage mode and inline capacity are
    /// ignored.
    #[inline]
    fn eq(&self, other: &SpillVec<U, P>) -> bool {
        PartialEq::eq(self.as_slice(), other.as_slice())
    }
}

/// An iterator that consumes a [`SpillVec`] and yields its items by value.
pub enum IntoIter<T, const N: usize> {
    Inline(inline_vec::IntoIter<T, N>),
    Spilled(alloc::vec::IntoIter<T>),
}

impl<T, const N: usize> IntoIterator for SpillVec<T, N> {
    type Item = T;
    type IntoIter = IntoIter<T, N>;

    #[inline]
    fn into_iter(self) -> Self::IntoIter {
        match self.repr {
            Repr::Inline(buf) => IntoIter::Inline(buf.into_iter()),
            Repr::Spilled(vec) => IntoIter::Spilled(vec.into_iter()),
        }
    }
}

impl<T, const N: usize> IntoIter<T, N> {
    /// Returns the remaining items as a slice.
    pub fn as_slice(&self) -> &[T] {
        match self {
            IntoIter::Inline(iter) => iter.as_slice(),
            IntoIter::Spilled(iter) => iter.as_slice(),
        }
    }
}

impl<T, const N: usize> Iterator for IntoIter<T, N> {
    type Item = T;

    #[inline]
    fn next(&mut self) -> Option<T> {
        match self {
            IntoIter::Inline(iter) => iter.next(),
            IntoIter::Spilled(iter) => iter.next(),
        }
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        match self {
            IntoIter::Inline(iter) => iter.size_hint(),
            IntoIter::Spilled(iter) => iter.size_hint(),
        }
    }
}

impl<T, const N: usize> DoubleEndedIterator for IntoIter<T, N> {
    #[inline]
    fn next_back(&mut self) -> Option<T> {
        match self {
            IntoIter::Inline(iter) => iter.next_back(),
            IntoIter::Spilled(iter) => iter.next_back(),
        }
    }
}

impl<T, const N: usize> ExactSizeIterator for IntoIter<T, N> {
    #[inline]
    fn len(&self) -> usize {
        match self {
            IntoIter::Inline(iter) => iter.len(),
            IntoIter::Spilled(iter) => iter.len(),
        }
    }
}

impl<T, const N: usize> FusedIterator for IntoIter<T, N> {}

impl<T: fmt::Debug, const N: usize> fmt::Debug for IntoIter<T, N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("IntoIter").field(&self.as_slice()).finish()
    }
}

/// A draining iterator over a range of a [`SpillVec`].
///
/// See [`SpillVec::drain`].
pub enum Drain<'a, T: 'a, const N: usize> {
    Inline(inline_vec::Drain<'a, T, N>),
    Spilled(alloc::vec::Drain<'a, T>),
}

impl<T, const N: usize> SpillVec<T, N> {
    /// Removes the given range from the vector and returns a double-ended
    /// iterator over the removed elements. Unconsumed elements are dropped
    /// when the iterator is dropped, and the tail shifts down in one pass.
    ///
    /// Never changes the storage mode.
    ///
    /// # Panics
    /// Panics if the range is inverted or reaches past `len`.
    ///
    /// # Examples
    ///
    /// ```
    /// # use spillvec::{spillvec, SpillVec};
    /// let mut vec: SpillVec<_, 8> = spillvec![0, 1, 2, 3, 4];
    /// let removed: Vec<_> = vec.drain(1..4).collect();
    /// assert_eq!(removed, [1, 2, 3]);
    /// assert_eq!(vec, [0, 4]);
    /// ```
    pub fn drain<R: core::ops::RangeBounds<usize>>(&mut self, range: R) -> Drain<'_, T, N> {
        match &mut self.repr {
            Repr::Inline(buf) => Drain::Inline(buf.drain(range)),
            Repr::Spilled(vec) => Drain::Spilled(vec.drain(range)),
        }
    }
}

impl<T, const N: usize> Drain<'_, T, N> {
    /// Returns the remaining unyielded elements as a slice.
    pub fn as_slice(&self) -> &[T] {
        match self {
            Drain::Inline(drain) => drain.as_slice(),
            Drain::Spilled(drain) => drain.as_slice(),
        }
    }
}

impl<T, const N: usize> AsRef<[T]> for Drain<'_, T, N> {
    fn as_ref(&self) -> &[T] {
        self.as_slice()
    }
}

impl<T, const N: usize> Iterator for Drain<'_, T, N> {
    type Item = T;

    #[inline]
    fn next(&mut self) -> Option<T> {
        match self {
            Drain::Inline(drain) => drain.next(),
            Drain::Spilled(drain) => drain.next(),
        }
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        match self {
            Drain::Inline(drain) => drain.size_hint(),
            Drain::Spilled(drain) => drain.size_hint(),
        }
    }
}

impl<T, const N: usize> DoubleEndedIterator for Drain<'_, T, N> {
    #[inline]
    fn next_back(&mut self) -> Option<T> {
        match self {
            Drain::Inline(drain) => drain.next_back(),
            Drain::Spilled(drain) => drain.next_back(),
        }
    }
}

impl<T, const N: usize> ExactSizeIterator for Drain<'_, T, N> {
    #[inline]
    fn len(&self) -> usize {
        match self {
            Drain::Inline(drain) => drain.len(),
            Drain::Spilled(drain) => drain.len(),
        }
    }
}

impl<T, const N: usize> FusedIterator for Drain<'_, T, N> {}

impl<T: fmt::Debug, const N: usize> fmt::Debug for Drain<'_, T, N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Drain").field(&self.as_slice()).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::string::{String, ToString};
    use alloc::vec;
    use core::sync::atomic::{AtomicUsize, Ordering};

    struct Token<'a>(&'a AtomicUsize);

    impl Drop for Token<'_> {
        fn drop(&mut self) {
            self.0.fetch_add(1, Ordering::SeqCst);
        }
    }

    #[test]
    fn fill_then_overflow_spills_once() {
        let mut vec: SpillVec<u32, 4> = SpillVec::new();
        for i in 0..4 {
            vec.push(i);
            assert!(vec.is_inline());
        }
        assert_eq!(vec.capacity(), 4);

        vec.push(4);
        assert!(vec.is_spilled());
        assert_eq!(vec, [0, 1, 2, 3, 4]);
        assert_eq!(vec.capacity(), spilled_capacity(4));
        assert_eq!(vec.inline_capacity(), 4);
    }

    #[test]
    fn spill_preserves_order_of_moved_elements() {
        let mut vec: SpillVec<String, 3> = SpillVec::new();
        for s in ["a", "b", "c", "d", "e"] {
            vec.push(s.to_string());
        }
        assert!(vec.is_spilled());
        assert_eq!(vec, ["a", "b", "c", "d", "e"]);
    }

    #[test]
    fn transition_is_one_way() {
        let mut vec: SpillVec<u32, 4> = (0..10).collect();
        assert!(vec.is_spilled());

        vec.truncate(2);
        assert!(vec.is_spilled());

        vec.shrink_to_fit();
        assert!(vec.is_spilled());
        assert_eq!(vec.capacity(), 2);

        vec.clear();
        assert!(vec.is_spilled());
        assert!(vec.is_empty());
    }

    #[test]
    fn insert_spills_when_full() {
        let mut vec: SpillVec<_, 3> = spillvec![1, 2, 3];
        vec.insert(0, 0);
        assert!(vec.is_spilled());
        assert_eq!(vec, [0, 1, 2, 3]);

        vec.insert(4, 4);
        assert_eq!(vec, [0, 1, 2, 3, 4]);
    }

    #[test]
    #[should_panic(expected = "insertion index")]
    fn insert_past_len_panics() {
        let mut vec: SpillVec<i32, 4> = spillvec![1];
        vec.insert(2, 9);
    }

    #[test]
    fn remove_in_both_modes() {
        let mut vec: SpillVec<_, 4> = spillvec![1, 2, 3];
        assert_eq!(vec.remove(1), 2);
        assert_eq!(vec, [1, 3]);

        let mut vec: SpillVec<_, 2> = spillvec![1, 2, 3, 4];
        assert!(vec.is_spilled());
        assert_eq!(vec.remove(0), 1);
        assert_eq!(vec, [2, 3, 4]);
    }

    #[test]
    fn pop_keeps_mode() {
        let mut vec: SpillVec<_, 2> = spillvec![1, 2, 3];
        assert_eq!(vec.pop(), Some(3));
        assert_eq!(vec.pop(), Some(2));
        assert_eq!(vec.pop(), Some(1));
        assert_eq!(vec.pop(), None);
        assert!(vec.is_spilled());
    }

    #[test]
    fn every_element_dropped_exactly_once_across_spill() {
        let drops = AtomicUsize::new(0);
        {
            let mut vec: SpillVec<Token, 4> = SpillVec::new();
            for _ in 0..7 {
                vec.push(Token(&drops));
            }
            assert!(vec.is_spilled());
            // The spill moves elements without running destructors.
            assert_eq!(drops.load(Ordering::SeqCst), 0);
        }
        assert_eq!(drops.load(Ordering::SeqCst), 7);
    }

    #[test]
    fn reserve_spills_only_when_needed() {
        let mut vec: SpillVec<u8, 8> = spillvec![1, 2];
        vec.reserve(6);
        assert!(vec.is_inline());

        vec.reserve(7);
        assert!(vec.is_spilled());
        assert!(vec.capacity() >= 9);
        assert_eq!(vec, [1, 2]);
    }

    #[test]
    #[should_panic(expected = "capacity overflow in `reserve`")]
    fn reserve_unsatisfiable_request_panics() {
        let mut vec: SpillVec<u8, 4> = spillvec![1];
        vec.reserve(usize::MAX);
    }

    #[test]
    #[should_panic(expected = "capacity overflow in `reserve_exact`")]
    fn reserve_exact_past_max_len_panics() {
        // Does not wrap usize, but exceeds the addressable element count.
        let mut vec: SpillVec<u64, 4> = spillvec![1];
        vec.reserve_exact(isize::MAX as usize);
    }

    #[test]
    fn shrink_to_fit_is_idempotent() {
        let mut vec: SpillVec<u32, 4> = (0..10).collect();
        vec.truncate(3);
        vec.shrink_to_fit();
        let cap = vec.capacity();
        vec.shrink_to_fit();
        assert_eq!(vec.capacity(), cap);
        assert!(vec.is_spilled());
        assert_eq!(vec, [0, 1, 2]);

        let mut vec: SpillVec<u32, 4> = spillvec![1, 2];
        vec.shrink_to_fit();
        vec.shrink_to_fit();
        assert_eq!(vec.capacity(), 4);
        assert!(vec.is_inline());
    }

    #[test]
    fn resize_with_spills_past_inline_capacity() {
        let mut vec: SpillVec<u32, 4> = spillvec![1, 2];
        vec.resize_with(3, Default::default);
        assert!(vec.is_inline());
        assert_eq!(vec, [1, 2, 0]);

        let mut next = 10;
        vec.resize_with(6, || {
            next += 1;
            next
        });
        assert!(vec.is_spilled());
        assert_eq!(vec, [1, 2, 0, 11, 12, 13]);

        vec.resize_with(2, Default::default);
        assert!(vec.is_spilled());
        assert_eq!(vec, [1, 2]);
    }

    #[test]
    fn with_capacity_picks_mode() {
        let vec: SpillVec<u8, 8> = SpillVec::with_capacity(8);
        assert!(vec.is_inline());

        let vec: SpillVec<u8, 8> = SpillVec::with_capacity(9);
        assert!(vec.is_spilled());
        assert!(vec.capacity() >= 9);
    }

    #[test]
    fn from_vec_stays_heap_backed() {
        let vec: SpillVec<u8, 8> = SpillVec::from_vec(vec![1, 2]);
        assert!(vec.is_spilled());
        assert_eq!(vec, [1, 2]);
    }

    #[test]
    fn resize_across_the_boundary() {
        let mut vec: SpillVec<u8, 4> = spillvec![9];
        vec.resize(3, 0);
        assert!(vec.is_inline());
        assert_eq!(vec, [9, 0, 0]);

        vec.resize(6, 1);
        assert!(vec.is_spilled());
        assert_eq!(vec, [9, 0, 0, 1, 1, 1]);

        vec.resize(2, 0);
        assert!(vec.is_spilled());
        assert_eq!(vec, [9, 0]);
    }

    #[test]
    fn try_resize_rejects_absurd_length() {
        let mut vec: SpillVec<u64, 4> = spillvec![1, 2];
        let err = vec.try_resize(usize::MAX, 0).unwrap_err();
        assert_eq!(err.requested(), usize::MAX);
        assert_eq!(err.max(), vec.max_len());
        assert_eq!(vec, [1, 2]);
        assert!(vec.is_inline());

        assert!(vec.try_resize(3, 7).is_ok());
        assert_eq!(vec, [1, 2, 7]);
    }

    #[test]
    fn append_moves_and_empties_source() {
        let mut a: SpillVec<String, 4> = spillvec!["a".to_string(), "b".to_string()];
        let mut b: SpillVec<String, 2> = spillvec!["c".to_string(), "d".to_string(), "e".to_string()];
        assert!(b.is_spilled());

        a.append(&mut b);
        assert_eq!(a, ["a", "b", "c", "d", "e"]);
        assert!(a.is_spilled());
        assert!(b.is_empty());
        assert!(b.is_spilled());
    }

    #[test]
    fn drain_in_both_modes() {
        let mut vec: SpillVec<_, 8> = spillvec![0, 1, 2, 3, 4];
        let removed: alloc::vec::Vec<_> = vec.drain(1..3).collect();
        assert_eq!(removed, [1, 2]);
        assert_eq!(vec, [0, 3, 4]);
        assert!(vec.is_inline());

        let mut vec: SpillVec<_, 2> = spillvec![0, 1, 2, 3, 4];
        vec.drain(..2);
        assert_eq!(vec, [2, 3, 4]);
        assert!(vec.is_spilled());
    }

    #[test]
    fn equality_ignores_mode_and_inline_capacity() {
        let a: SpillVec<i32, 8> = spillvec![1, 2, 3];
        let b: SpillVec<i32, 2> = spillvec![1, 2, 3];
        assert!(a.is_inline());
        assert!(b.is_spilled());
        assert_eq!(a, b);
        assert_eq!(a, [1, 2, 3]);
    }

    #[test]
    fn clone_preserves_mode() {
        let a: SpillVec<i32, 2> = spillvec![1, 2, 3];
        let b = a.clone();
        assert!(b.is_spilled());
        assert_eq!(a, b);

        let c: SpillVec<i32, 8> = spillvec![1, 2, 3];
        assert!(c.clone().is_inline());
    }

    #[test]
    fn into_iter_yields_everything_in_both_modes() {
        let vec: SpillVec<_, 8> = spillvec![1, 2, 3];
        assert!(vec.iter().eq(&[1, 2, 3]));
        let collected: alloc::vec::Vec<_> = vec.into_iter().collect();
        assert_eq!(collected, [1, 2, 3]);

        let vec: SpillVec<_, 2> = spillvec![1, 2, 3];
        let mut iter = vec.into_iter();
        assert_eq!(iter.next_back(), Some(3));
        assert_eq!(iter.next(), Some(1));
        assert_eq!(iter.len(), 1);
    }

    #[test]
    fn zero_sized_elements() {
        let mut vec: SpillVec<(), 4> = SpillVec::new();
        assert_eq!(vec.max_len(), usize::MAX);
        for _ in 0..10 {
            vec.push(());
        }
        assert_eq!(vec.len(), 10);
        assert!(vec.is_spilled());
        assert_eq!(vec.iter().count(), 10);
        assert_eq!(vec.pop(), Some(()));
        assert_eq!(vec.len(), 9);
    }

    #[test]
    fn pointer_stable_until_spill() {
        let mut vec: SpillVec<u32, 4> = spillvec![1];
        let before = vec.as_ptr();
        vec.push(2);
        vec.push(3);
        vec.push(4);
        assert_eq!(vec.as_ptr(), before);

        vec.push(5);
        assert_ne!(vec.as_ptr(), before);
    }

    #[test]
    #[should_panic]
    fn index_out_of_bounds_panics() {
        let vec: SpillVec<i32, 4> = spillvec![1, 2];
        let _ = vec[2];
    }

    #[test]
    fn extend_from_slice_spills() {
        let mut vec: SpillVec<u8, 4> = spillvec![1, 2];
        vec.extend_from_slice(&[3, 4]);
        assert!(vec.is_inline());

        vec.extend_from_slice(&[5, 6]);
        assert!(vec.is_spilled());
        assert_eq!(vec, [1, 2, 3, 4, 5, 6]);
    }

    #[test]
    fn into_vec_roundtrip() {
        let vec: SpillVec<u8, 4> = spillvec![1, 2, 3];
        let plain = vec.into_vec();
        assert_eq!(plain, [1, 2, 3]);

        let back: SpillVec<u8, 4> = SpillVec::from_vec(plain);
        assert!(back.is_spilled());
        assert_eq!(back, [1, 2, 3]);
    }
}
