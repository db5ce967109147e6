#![no_std]

//! `GrowVec`: a growable vector with pluggable allocators and client-provided
//! fixed buffers.
//!
//! `GrowVec` stores `Copy` elements contiguously and keeps a user-selectable
//! capacity policy. It is built for embedding in lower-level libraries that
//! must not depend on a specific memory allocator or on `std` collections:
//! every allocation goes through an [`Allocator`] capability the caller
//! injects, and a fixed-buffer mode works without any allocator at all.
//!
//! This crate is `no_std` compatible (it depends on `core` and `alloc` only).
//!
//! # Storage Modes
//!
//! - **Allocator-backed**: the vector owns its buffer and grows and shrinks
//!   it through the attached allocator. Created with
//!   [`GrowVec::with_capacity`] (global allocator, default policy) or
//!   [`GrowVec::with_allocator`] (explicit allocator and policy).
//! - **Fixed-buffer**: the vector borrows a caller-supplied buffer and never
//!   reallocates. Created with [`GrowVec::from_buffer`]. Operations that
//!   would exceed the buffer fail with
//!   [`GrowVecError::InsufficientBufferSize`] and leave the vector unchanged.
//!
//! ```
//! use growvec::GrowVec;
//!
//! let mut vec: GrowVec<u32> = GrowVec::with_capacity(2).unwrap();
//!
//! vec.push(1).unwrap();
//! vec.push(2).unwrap();
//! vec.push(3).unwrap(); // grows past the initial capacity
//!
//! assert_eq!(vec.len(), 3);
//! assert_eq!(*vec.get(0).unwrap(), 1);
//! assert_eq!(*vec.get(2).unwrap(), 3);
//! assert!(vec.capacity() >= 3);
//! ```
//!
//! Fixed-buffer mode borrows the storage from the caller:
//!
//! ```
//! use core::mem::MaybeUninit;
//! use growvec::{GrowVec, GrowVecError};
//!
//! let mut buffer = [MaybeUninit::<u32>::uninit(); 2];
//! let mut vec = GrowVec::from_buffer(&mut buffer).unwrap();
//!
//! vec.push(10).unwrap();
//! vec.push(20).unwrap();
//!
//! // The buffer is full; the vector cannot grow.
//! assert!(matches!(
//!     vec.push(30),
//!     Err(GrowVecError::InsufficientBufferSize { .. })
//! ));
//! assert_eq!(vec.len(), 2);
//! ```
//!
//! # Capacity Policy
//!
//! Growth and shrink behavior is controlled per vector:
//!
//! - `growth_factor` (`>= 1.0`): when the buffer must grow to hold a desired
//!   size, the new capacity is `max(1, round(desired * growth_factor))`. A
//!   factor of `1.0` disables over-allocation.
//! - `shrink_threshold` (`0.0..=1.0`): after a deletion, pop, or resize, the
//!   buffer shrinks once `len() < capacity() * shrink_threshold`. A threshold
//!   of `0.0` disables shrinking.
//!
//! The defaults are a growth factor of `2.0` and a shrink threshold of
//! `0.25`. Fixed-buffer vectors are pinned to `1.0` / `0.0`.
//!
//! ```
//! use growvec::{default_allocator, GrowVec};
//!
//! // No over-allocation, no shrinking: capacity tracks the requested size.
//! let mut vec: GrowVec<u8> =
//!     GrowVec::with_allocator(4, default_allocator(), 1.0, 0.0).unwrap();
//!
//! for byte in 0..8 {
//!     vec.push(byte).unwrap();
//! }
//! assert_eq!(vec.capacity(), 8);
//! ```
//!
//! # Ordering Guarantees
//!
//! [`GrowVec::insert_slice`] and [`GrowVec::delete_range`] move the tail of
//! the vector with a single bulk move, so the relative order of all retained
//! elements is always preserved:
//!
//! ```
//! use growvec::GrowVec;
//!
//! let mut vec: GrowVec<i32> = GrowVec::with_capacity(8).unwrap();
//! vec.insert_slice(0, &[1, 2, 3, 4, 5]).unwrap();
//!
//! vec.delete_range(1, 2).unwrap();
//!
//! assert_eq!(vec.len(), 3);
//! assert_eq!(*vec.get(0).unwrap(), 1);
//! assert_eq!(*vec.get(1).unwrap(), 4);
//! assert_eq!(*vec.get(2).unwrap(), 5);
//! ```
//!
//! # Error Handling
//!
//! Every operation returns a `Result`; no failure is silently swallowed.
//! Allocator failures propagate unchanged and abort the triggering operation
//! without modifying the vector. References returned by [`GrowVec::get`] and
//! [`GrowVec::get_mut`] borrow the vector, so the borrow checker enforces
//! that they cannot outlive the next mutating call.
//!
//! # Concurrency
//!
//! `GrowVec` is single-threaded by design: it performs no internal
//! synchronization and is neither `Send` nor `Sync`.

extern crate alloc;

mod allocator;
mod error;
mod vec;

// Re-export public types and traits
pub use allocator::{default_allocator, Allocator, Global};
pub use error::GrowVecError;
pub use vec::GrowVec;
