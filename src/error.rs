use thiserror::Error;

/// Error types for `GrowVec` operations
#[derive(Error, Debug, PartialEq, Eq, Clone)]
pub enum GrowVecError {
    /// A required argument was invalid (zero-sized element type, empty
    /// buffer, or an out-of-range policy parameter)
    #[error("Invalid argument: {parameter}")]
    InvalidArgument {
        /// Name of the offending parameter
        parameter: &'static str,
    },
    /// An index or range falls outside the current logical size
    #[error("Index out of range: index {index} is beyond vector size {size}")]
    OutOfRange {
        /// Index that was accessed
        index: usize,
        /// Current size of the vector
        size: usize,
    },
    /// A fixed-buffer vector was asked to exceed its fixed capacity
    #[error("Insufficient buffer size: requested {requested} elements, but the fixed buffer holds {capacity}")]
    InsufficientBufferSize {
        /// Number of elements requested
        requested: usize,
        /// Fixed capacity of the buffer
        capacity: usize,
    },
    /// The allocator failed to provide or release memory
    #[error("Allocation failed: {bytes} bytes")]
    AllocationFailed {
        /// Size of the failed request in bytes
        bytes: usize,
    },
    /// The requested element count overflows the addressable layout
    #[error("Capacity overflow: {elements} elements exceed addressable memory")]
    CapacityOverflow {
        /// Element count that overflowed
        elements: usize,
    },
}
