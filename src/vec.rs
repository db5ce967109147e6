use core::alloc::Layout;
use core::cmp;
use core::fmt;
use core::marker::PhantomData;
use core::mem::{self, ManuallyDrop, MaybeUninit};
use core::ptr::{self, NonNull};

use crate::allocator::{default_allocator, Allocator};
use crate::error::GrowVecError;

const MIN_CAPACITY: usize = 1;
const DEFAULT_GROWTH_FACTOR: f64 = 2.0;
const DEFAULT_SHRINK_THRESHOLD: f64 = 0.25;

/// Storage mode of the backing buffer.
///
/// Owned buffers are managed through the attached allocator and released on
/// destruction. Borrowed buffers belong to the caller and are never moved,
/// resized, or released by the vector.
#[derive(Clone, Copy)]
enum Storage<'a> {
    Owned { allocator: &'a dyn Allocator },
    Borrowed,
}

/// A growable vector of `Copy` elements with a pluggable allocator and an
/// optional fixed-buffer storage mode.
pub struct GrowVec<'a, T> {
    data: NonNull<T>,
    size: usize,
    capacity: usize,
    growth_factor: f64,
    shrink_threshold: f64,
    storage: Storage<'a>,
    _marker: PhantomData<T>,
}

fn array_layout<T>(count: usize) -> Result<Layout, GrowVecError> {
    Layout::array::<T>(count).map_err(|_| GrowVecError::CapacityOverflow { elements: count })
}

impl<'a, T> GrowVec<'a, T> {
    #[must_use]
    pub fn len(&self) -> usize {
        self.size
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.size == 0
    }

    #[must_use]
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Returns `true` if the vector runs in fixed-buffer mode and can never
    /// reallocate.
    #[must_use]
    pub fn is_fixed(&self) -> bool {
        matches!(self.storage, Storage::Borrowed)
    }

    /// Returns the base address of the backing buffer.
    ///
    /// Only valid until the next operation that may reallocate. Fixed-buffer
    /// vectors keep the same address for their whole lifetime.
    #[must_use]
    pub fn as_ptr(&self) -> *const T {
        self.data.as_ptr()
    }

    fn check_bounds(&self, index: usize) -> Result<(), GrowVecError> {
        if index >= self.size {
            return Err(GrowVecError::OutOfRange {
                index,
                size: self.size,
            });
        }
        Ok(())
    }

    fn offset(&self, index: usize) -> *mut T {
        debug_assert!(index <= self.capacity);
        // SAFETY: all callers pass `index <= capacity`, which stays within
        // the allocation obtained for `capacity` elements.
        unsafe { self.data.as_ptr().add(index) }
    }

    fn release(&mut self) -> Result<(), GrowVecError> {
        if let Storage::Owned { allocator } = self.storage {
            if self.capacity != 0 {
                let layout = array_layout::<T>(self.capacity)?;
                allocator.deallocate(self.data.cast(), layout)?;
            }
        }
        Ok(())
    }
}

impl<'a, T: Copy> GrowVec<'a, T> {
    /// Creates an allocator-backed vector with the default policy: the global
    /// allocator, growth factor `2.0` and shrink threshold `0.25`.
    ///
    /// The initial buffer is allocated immediately, sized to the larger of
    /// `capacity` and the minimum capacity of one element.
    ///
    /// # Errors
    ///
    /// Returns `GrowVecError::InvalidArgument` if `T` is zero-sized, and
    /// propagates any allocator failure.
    pub fn with_capacity(capacity: usize) -> Result<Self, GrowVecError> {
        Self::with_allocator(
            capacity,
            default_allocator(),
            DEFAULT_GROWTH_FACTOR,
            DEFAULT_SHRINK_THRESHOLD,
        )
    }

    /// Creates an allocator-backed vector with an explicit allocator and
    /// capacity policy.
    ///
    /// `growth_factor` multiplies the desired size whenever the buffer grows;
    /// `1.0` disables over-allocation. `shrink_threshold` is the fraction of
    /// the capacity the size must fall below before the buffer shrinks; `0.0`
    /// disables shrinking.
    ///
    /// # Errors
    ///
    /// Returns `GrowVecError::InvalidArgument` if `T` is zero-sized,
    /// `growth_factor < 1.0` or `shrink_threshold` lies outside `[0.0, 1.0]`.
    /// Propagates any allocator failure.
    pub fn with_allocator(
        capacity: usize,
        allocator: &'a dyn Allocator,
        growth_factor: f64,
        shrink_threshold: f64,
    ) -> Result<Self, GrowVecError> {
        if mem::size_of::<T>() == 0 {
            return Err(GrowVecError::InvalidArgument {
                parameter: "element type must not be zero-sized",
            });
        }
        if growth_factor < 1.0 {
            return Err(GrowVecError::InvalidArgument {
                parameter: "growth_factor",
            });
        }
        if !(0.0..=1.0).contains(&shrink_threshold) {
            return Err(GrowVecError::InvalidArgument {
                parameter: "shrink_threshold",
            });
        }

        let capacity = cmp::max(MIN_CAPACITY, capacity);
        let layout = array_layout::<T>(capacity)?;
        let data = allocator.allocate(layout)?.cast::<T>();

        Ok(Self {
            data,
            size: 0,
            capacity,
            growth_factor,
            shrink_threshold,
            storage: Storage::Owned { allocator },
            _marker: PhantomData,
        })
    }

    /// Creates a fixed-buffer vector over a caller-supplied buffer.
    ///
    /// The vector never reallocates: its capacity is the buffer length, the
    /// growth factor is fixed at `1.0` and shrinking is disabled. Operations
    /// that would exceed the buffer fail with
    /// `GrowVecError::InsufficientBufferSize`.
    ///
    /// # Errors
    ///
    /// Returns `GrowVecError::InvalidArgument` if `T` is zero-sized or the
    /// buffer is empty.
    pub fn from_buffer(buffer: &'a mut [MaybeUninit<T>]) -> Result<Self, GrowVecError> {
        if mem::size_of::<T>() == 0 {
            return Err(GrowVecError::InvalidArgument {
                parameter: "element type must not be zero-sized",
            });
        }
        if buffer.is_empty() {
            return Err(GrowVecError::InvalidArgument {
                parameter: "buffer",
            });
        }

        let capacity = buffer.len();
        // SAFETY: a slice pointer is never null.
        let data = unsafe { NonNull::new_unchecked(buffer.as_mut_ptr().cast::<T>()) };

        Ok(Self {
            data,
            size: 0,
            capacity,
            growth_factor: 1.0,
            shrink_threshold: 0.0,
            storage: Storage::Borrowed,
            _marker: PhantomData,
        })
    }

    /// Consumes the vector and releases the owned buffer through the
    /// allocator. Fixed-buffer vectors release nothing.
    ///
    /// Dropping the vector releases the buffer as well, but swallows any
    /// allocator failure; use `destroy` to observe it.
    ///
    /// # Errors
    ///
    /// Propagates any failure reported by the allocator's deallocate
    /// operation.
    pub fn destroy(self) -> Result<(), GrowVecError> {
        let mut vec = ManuallyDrop::new(self);
        vec.release()
    }

    /// Returns a reference to the element at `index`.
    ///
    /// # Errors
    ///
    /// Returns `GrowVecError::OutOfRange` if `index >= len()`.
    pub fn get(&self, index: usize) -> Result<&T, GrowVecError> {
        self.check_bounds(index)?;
        // SAFETY: `index < size <= capacity` and the slot is live.
        Ok(unsafe { &*self.offset(index) })
    }

    /// Returns a mutable reference to the element at `index`.
    ///
    /// # Errors
    ///
    /// Returns `GrowVecError::OutOfRange` if `index >= len()`.
    pub fn get_mut(&mut self, index: usize) -> Result<&mut T, GrowVecError> {
        self.check_bounds(index)?;
        // SAFETY: `index < size <= capacity` and the slot is live.
        Ok(unsafe { &mut *self.offset(index) })
    }

    /// Overwrites the element at `index` with `value`.
    ///
    /// # Errors
    ///
    /// Returns `GrowVecError::OutOfRange` if `index >= len()`.
    pub fn assign(&mut self, index: usize, value: T) -> Result<(), GrowVecError> {
        self.check_bounds(index)?;
        // SAFETY: `index < size <= capacity`.
        unsafe { self.offset(index).write(value) };
        Ok(())
    }

    /// Appends one element at the end, growing the buffer if needed.
    ///
    /// # Errors
    ///
    /// Returns `GrowVecError::InsufficientBufferSize` if a fixed-buffer
    /// vector is full; propagates any allocator failure. On error the vector
    /// is unchanged.
    pub fn push(&mut self, value: T) -> Result<(), GrowVecError> {
        if should_grow(self.size + 1, self.capacity) {
            let target = self.grown_capacity(self.size + 1);
            self.reallocate(target)?;
        }

        // SAFETY: `size < capacity` after the growth check.
        unsafe { self.offset(self.size).write(value) };
        self.size += 1;

        Ok(())
    }

    /// Inserts one element at `index`, shifting the tail right by one.
    ///
    /// # Errors
    ///
    /// Same conditions as [`GrowVec::insert_slice`], except that the element
    /// count is always one.
    pub fn insert(&mut self, index: usize, value: T) -> Result<(), GrowVecError> {
        self.insert_slice(index, core::slice::from_ref(&value))
    }

    /// Inserts all elements of `elements` at `index`, shifting the tail right
    /// by `elements.len()` in a single bulk move. `index == len()` appends.
    ///
    /// # Errors
    ///
    /// Returns `GrowVecError::InvalidArgument` if `elements` is empty and
    /// `GrowVecError::OutOfRange` if `index > len()`. Growth failures
    /// propagate and leave the vector unchanged.
    pub fn insert_slice(&mut self, index: usize, elements: &[T]) -> Result<(), GrowVecError> {
        if elements.is_empty() {
            return Err(GrowVecError::InvalidArgument {
                parameter: "elements",
            });
        }
        if index > self.size {
            return Err(GrowVecError::OutOfRange {
                index,
                size: self.size,
            });
        }

        let count = elements.len();
        let desired = self.size + count;
        if should_grow(desired, self.capacity) {
            let target = self.grown_capacity(desired);
            self.reallocate(target)?;
        }

        if index < self.size {
            // SAFETY: the growth check guarantees `size + count <= capacity`.
            unsafe { self.shift_right(index, count) };
        }

        // SAFETY: the gap `[index, index + count)` lies within capacity and
        // `elements` cannot overlap the buffer (it is borrowed immutably
        // while the vector is borrowed mutably).
        unsafe { ptr::copy_nonoverlapping(elements.as_ptr(), self.offset(index), count) };
        self.size += count;

        Ok(())
    }

    /// Removes the element at `index`, shifting the tail left by one.
    ///
    /// # Errors
    ///
    /// Same conditions as [`GrowVec::delete_range`] with a count of one.
    pub fn delete(&mut self, index: usize) -> Result<(), GrowVecError> {
        self.delete_range(index, 1)
    }

    /// Removes `count` contiguous elements starting at `index`, closing the
    /// gap with a single bulk move and shrinking the buffer if the size falls
    /// below the shrink threshold.
    ///
    /// # Errors
    ///
    /// Returns `GrowVecError::InvalidArgument` if `count == 0` and
    /// `GrowVecError::OutOfRange` if the range `[index, index + count)`
    /// extends past `len()`.
    pub fn delete_range(&mut self, index: usize, count: usize) -> Result<(), GrowVecError> {
        if count == 0 {
            return Err(GrowVecError::InvalidArgument { parameter: "count" });
        }
        if index >= self.size || count > self.size - index {
            return Err(GrowVecError::OutOfRange {
                index,
                size: self.size,
            });
        }

        if index + count < self.size {
            // SAFETY: bounds checked above, `index + count <= size`.
            unsafe { self.shift_left(index, count) };
        }

        self.size -= count;
        self.shrink_if_needed()
    }

    /// Removes and returns the last element, shrinking the buffer if the
    /// size falls below the shrink threshold.
    ///
    /// # Errors
    ///
    /// Returns `GrowVecError::OutOfRange` on an empty vector.
    pub fn pop(&mut self) -> Result<T, GrowVecError> {
        if self.size == 0 {
            return Err(GrowVecError::OutOfRange { index: 0, size: 0 });
        }

        // SAFETY: `size >= 1`, so the slot `size - 1` is live.
        let value = unsafe { self.offset(self.size - 1).read() };
        self.size -= 1;
        self.shrink_if_needed()?;

        Ok(value)
    }

    /// Resizes the vector to zero elements.
    ///
    /// # Errors
    ///
    /// Same conditions as [`GrowVec::resize`] with a size of zero.
    pub fn clear(&mut self) -> Result<(), GrowVecError> {
        self.resize(0)
    }

    /// Sets the logical size directly. Slots exposed by growing the size are
    /// not initialized; assign them before reading.
    ///
    /// If the requested size crosses the grow or shrink condition, the buffer
    /// is reallocated to `round(size * growth_factor)` elements before the
    /// size changes. The same formula serves both triggers; the minimum
    /// capacity clamp lives in the reallocation path.
    ///
    /// # Errors
    ///
    /// Returns `GrowVecError::InsufficientBufferSize` if a fixed-buffer
    /// vector would have to grow; propagates any allocator failure. On error
    /// the size is unchanged.
    pub fn resize(&mut self, size: usize) -> Result<(), GrowVecError> {
        if should_grow(size, self.capacity)
            || should_shrink(size, self.capacity, self.shrink_threshold)
        {
            let target = round_half_up(size as f64 * self.growth_factor);
            self.reallocate(target)?;
        }

        self.size = size;
        Ok(())
    }

    /// Grows the buffer to hold at least `capacity` elements. Never shrinks
    /// and never changes the size.
    ///
    /// # Errors
    ///
    /// Returns `GrowVecError::InsufficientBufferSize` if a fixed-buffer
    /// vector would have to grow; propagates any allocator failure.
    pub fn reserve(&mut self, capacity: usize) -> Result<(), GrowVecError> {
        if capacity > self.capacity {
            self.reallocate(capacity)?;
        }
        Ok(())
    }

    /// Reallocates the buffer to exactly `len()` elements, discarding slack
    /// (subject to the minimum capacity of one element).
    ///
    /// # Errors
    ///
    /// Propagates any allocator failure.
    pub fn shrink_to_fit(&mut self) -> Result<(), GrowVecError> {
        self.reallocate(self.size)
    }

    fn shrink_if_needed(&mut self) -> Result<(), GrowVecError> {
        if should_shrink(self.size, self.capacity, self.shrink_threshold) {
            let target = self.grown_capacity(self.size);
            return self.reallocate(target);
        }
        Ok(())
    }

    fn grown_capacity(&self, desired: usize) -> usize {
        cmp::max(
            MIN_CAPACITY,
            round_half_up(desired as f64 * self.growth_factor),
        )
    }

    /// Single choke point for all capacity changes.
    ///
    /// Fixed-buffer vectors never move memory here: the request is only
    /// validated against the fixed capacity. Owned vectors clamp the request
    /// to the minimum capacity and go through the allocator; the capacity
    /// field is updated only after the allocator succeeds, so a failed
    /// reallocation leaves the vector unchanged.
    fn reallocate(&mut self, capacity: usize) -> Result<(), GrowVecError> {
        match self.storage {
            Storage::Borrowed => {
                if self.capacity < capacity {
                    return Err(GrowVecError::InsufficientBufferSize {
                        requested: capacity,
                        capacity: self.capacity,
                    });
                }
                Ok(())
            }
            Storage::Owned { allocator } => {
                let mut capacity = capacity;
                if capacity < MIN_CAPACITY {
                    if self.capacity > MIN_CAPACITY {
                        capacity = MIN_CAPACITY;
                    } else {
                        return Ok(());
                    }
                }

                let old_layout = array_layout::<T>(self.capacity)?;
                let new_layout = array_layout::<T>(capacity)?;
                let data = allocator.reallocate(self.data.cast(), old_layout, new_layout)?;
                self.data = data.cast();
                self.capacity = capacity;
                Ok(())
            }
        }
    }

    /// Shifts the tail `[index, size)` up by `count` positions to open a gap
    /// for insertion. One overlapping-safe bulk move.
    ///
    /// # Safety
    ///
    /// The caller must guarantee `size + count <= capacity`. The gap
    /// `[index, index + count)` is left uninitialized.
    unsafe fn shift_right(&mut self, index: usize, count: usize) {
        debug_assert!(self.size + count <= self.capacity);
        let src = self.offset(index);
        ptr::copy(src, src.add(count), self.size - index);
    }

    /// Shifts the tail `[index + count, size)` down to `index` to close a
    /// gap after deletion. One overlapping-safe bulk move.
    ///
    /// # Safety
    ///
    /// The caller must guarantee `index + count <= size`.
    unsafe fn shift_left(&mut self, index: usize, count: usize) {
        debug_assert!(index + count <= self.size);
        let src = self.offset(index + count);
        ptr::copy(src, self.offset(index), self.size - index - count);
    }
}

fn should_grow(size: usize, capacity: usize) -> bool {
    size > capacity
}

/// Rounds to the nearest integer, halves up. `f64::round` lives in `std`;
/// this stays within `core` arithmetic. `value` is never negative here
/// (sizes scaled by a growth factor `>= 1.0`), so the truncating cast
/// matches round-half-away-from-zero exactly.
fn round_half_up(value: f64) -> usize {
    (value + 0.5) as usize
}

fn should_shrink(size: usize, capacity: usize, threshold: f64) -> bool {
    (size as f64) < (capacity as f64) * threshold
}

impl<T> Drop for GrowVec<'_, T> {
    fn drop(&mut self) {
        // Release failures are observable through `destroy` only.
        let _ = self.release();
    }
}

impl<T> fmt::Debug for GrowVec<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mode = match self.storage {
            Storage::Owned { .. } => "owned",
            Storage::Borrowed => "borrowed",
        };
        write!(
            f,
            "GrowVec {{ size: {:?}, capacity: {:?}, storage: {} }}",
            self.size, self.capacity, mode
        )
    }
}
