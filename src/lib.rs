//! ## Intro
//!
//! A hybrid sequence container that stores up to `N` elements inline, with no
//! heap allocation, and transparently promotes itself to heap-backed storage
//! the first time that inline capacity is exceeded.
//!
//! Small collections dominate performance-sensitive code. Keeping them inside
//! the container itself avoids allocator round-trips and pointer chasing for
//! the common case, while the heap fallback preserves the full semantics and
//! asymptotic behavior of an unbounded `Vec` once a caller genuinely needs
//! more room.
//!
//! ## Containers
//!
//! ### [`SpillVec`]
//!
//! The main type. Starts inline, spills to the heap on overflow:
//!
//! ```
//! # use spillvec::SpillVec;
//! let mut vec: SpillVec<i32, 8> = SpillVec::new();
//! assert!(vec.is_inline());
//! assert_eq!(vec.capacity(), 8);
//!
//! vec.extend(0..10);
//! assert!(vec.is_spilled()); // Now heap-backed
//! assert_eq!(vec.len(), 10);
//! ```
//!
//! The inline-to-heap transition is **one way**: once a `SpillVec` has
//! spilled, it stays heap-backed for the rest of its lifetime. [`clear`],
//! [`shrink_to_fit`] and friends never move elements back into the inline
//! buffer, so iterator-invalidation and capacity behavior after the spill are
//! exactly those of a `Vec`.
//!
//! [`clear`]: SpillVec::clear
//! [`shrink_to_fit`]: SpillVec::shrink_to_fit
//!
//! ### [`InlineVec`]
//!
//! The fixed-capacity building block: a `Vec`-like interface over a
//! `[MaybeUninit<T>; N]` buffer. Panics instead of spilling when full. Useful
//! on its own when the maximum size is known in advance:
//!
//! ```
//! # use spillvec::InlineVec;
//! let mut vec: InlineVec<i32, 10> = InlineVec::new();
//! vec.push(1);
//! vec.push(2);
//! assert_eq!(vec.len(), 2);
//! ```
//!
//! ## Picking the inline capacity
//!
//! `N` is a const generic, so the choice is yours. When there is no obvious
//! domain-specific bound, [`default_inline_capacity`] derives one from the
//! element size: it fills one 64-byte cache line for small elements, falls
//! back to 8 elements for larger ones, and caps the inline region at 10 KiB:
//!
//! ```
//! # use spillvec::{SpillVec, default_inline_capacity};
//! let vec: SpillVec<u64, { default_inline_capacity(size_of::<u64>()) }> = SpillVec::new();
//! assert_eq!(vec.capacity(), 8);
//! ```
//!
//! ## `no_std` support
//!
//! The crate requires only `core` and `alloc`.
//!
//! ## Optional features
//!
//! - `serde` — `Serialize` and `Deserialize` for both containers. The wire
//!   format is a plain sequence, identical in both storage modes.
//! - `std` — [`std::io::Write`] for byte vectors.
//!
//! [`std::io::Write`]: https://doc.rust-lang.org/std/io/trait.Write.html
#![no_std]

extern crate alloc;

mod error;
mod utils;

pub mod inline_vec;
pub mod spill_vec;

#[cfg(feature = "serde")]
mod serde;

#[cfg(feature = "std")]
mod std_io;

pub use error::LengthError;
#[doc(inline)]
pub use inline_vec::InlineVec;
#[doc(inline)]
pub use spill_vec::SpillVec;

/// A [`SpillVec`] with an inline capacity of 8 elements.
///
/// A reasonable default for collections that are almost always tiny but must
/// be able to grow.
///
/// # Examples
///
/// ```
/// # use spillvec::SmallSpillVec;
/// let mut vec: SmallSpillVec<i32> = SmallSpillVec::new();
///
/// vec.extend([1, 2, 3]);
/// assert!(vec.is_inline());
///
/// vec.extend([4, 5, 6, 7, 8, 9]);
/// assert!(vec.is_spilled());
/// assert_eq!(vec.len(), 9);
/// ```
pub type SmallSpillVec<T> = SpillVec<T, 8>;

/// Derives an inline element count from the element size, at compile time.
///
/// The policy targets full utilization of one 64-byte cache line when the
/// element fits within it. Larger elements fall back to a count of 8, capped
/// so the inline region never exceeds 10 KiB; in the capped case the count is
/// the larger of 1 and the byte budget divided by the element size.
/// Zero-sized elements get the fallback count (the buffer occupies no bytes
/// either way).
///
/// Usable directly in const-generic position:
///
/// ```
/// # use spillvec::{SpillVec, default_inline_capacity};
/// assert_eq!(default_inline_capacity(1), 64);
/// assert_eq!(default_inline_capacity(16), 4);
/// assert_eq!(default_inline_capacity(100), 8);
///
/// let vec: SpillVec<[u8; 2048], { default_inline_capacity(2048) }> = SpillVec::new();
/// assert_eq!(vec.capacity(), 5);
/// ```
pub const fn default_inline_capacity(elem_size: usize) -> usize {
    const CACHE_LINE_BYTES: usize = 64;
    const FALLBACK_LEN: usize = 8;
    const MAX_INLINE_BYTES: usize = 10 * 1024;

    if elem_size == 0 {
        FALLBACK_LEN
    } else if elem_size <= CACHE_LINE_BYTES {
        CACHE_LINE_BYTES / elem_size
    } else if elem_size * FALLBACK_LEN <= MAX_INLINE_BYTES {
        FALLBACK_LEN
    } else {
        let count = MAX_INLINE_BYTES / elem_size;
        if count == 0 { 1 } else { count }
    }
}
