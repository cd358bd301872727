//! Error types for heap registry operations.

use thiserror::Error;

use crate::object::ObjectId;

/// Result type for heap registry operations
pub type HeapResult<T> = Result<T, HeapError>;

/// Errors raised by [`Heap`](crate::Heap) registration operations.
///
/// Edge mutation and collection itself are total and infallible; only
/// explicit registration and removal can fail. A failed operation leaves
/// the heap untouched.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum HeapError {
    /// The object is already registered in the heap
    #[error("object {0} is already registered")]
    DuplicateObject(ObjectId),

    /// The object is not registered in the heap
    #[error("object {0} is not registered")]
    NotFound(ObjectId),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = HeapError::DuplicateObject(ObjectId(3));
        assert_eq!(err.to_string(), "object #3 is already registered");

        let err = HeapError::NotFound(ObjectId(7));
        assert_eq!(err.to_string(), "object #7 is not registered");
    }
}
