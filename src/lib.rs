//! Owned dense N-dimensional arrays with compile-time rank and a
//! type-level memory order.
//!
//! # Core Types
//!
//! - [`DenseArray`]: Value-type container holding N-dimensional data in one
//!   contiguous, exclusively owned buffer
//! - [`Order`] trait and its tags ([`RowMajor`], [`ColMajor`]): Type-level
//!   memory-order policy driving stride derivation, with no runtime
//!   branching on access
//!
//! The rank is a const generic, so the extents and stride table live in
//! fixed-size arrays with no heap metadata, while the extent of each
//! dimension stays a runtime value fixed at construction. Arrays that
//! differ only in their order are distinct types; re-layout between them
//! is the explicit [`DenseArray::to_order`] copy.
//!
//! # Access Paths
//!
//! - Coordinate access: checked [`get`](DenseArray::get) /
//!   [`get_mut`](DenseArray::get_mut) returning [`Result`], panicking
//!   `array[[i, j]]` indexing, and `unsafe` unchecked variants
//! - Linear access: [`get_linear`](DenseArray::get_linear), `array[k]`,
//!   and the full flat view via [`as_slice`](DenseArray::as_slice)
//! - Iteration: double-ended, exact-size slice iterators over the flat
//!   storage, coordinate tuples via [`indices`](DenseArray::indices), and
//!   rayon parallel iterators behind the `parallel` feature
//!
//! Because the storage is contiguous for either order, the array is a
//! drop-in target for generic fill/copy/transform/reduce code written
//! against iterators; only the meaning of the flat sequence differs
//! between the two orders.
//!
//! # Example
//!
//! ```
//! use dense_array::DenseArray;
//!
//! let mut a: DenseArray<f64, 3> = DenseArray::zeros([2, 3, 4]).unwrap();
//! for (i, x) in a.iter_mut().enumerate() {
//!     *x = (i + 1) as f64;
//! }
//! assert_eq!(a.iter().sum::<f64>(), 300.0);
//! assert_eq!(a[[0, 0, 3]], 4.0);
//! ```
//!
//! # Memory Order
//!
//! ```
//! use dense_array::{ColMajor, DenseArray, RowMajor};
//!
//! // Flat data is supplied in the array's own linear order.
//! let row: DenseArray<i32, 2, RowMajor> =
//!     DenseArray::from_vec([2, 3], vec![11, 12, 13, 21, 22, 23]).unwrap();
//! let col: DenseArray<i32, 2, ColMajor> =
//!     DenseArray::from_vec([2, 3], vec![11, 21, 12, 22, 13, 23]).unwrap();
//!
//! // Same logical element at every coordinate.
//! assert_eq!(row[[1, 2]], col[[1, 2]]);
//! assert_eq!(row.strides(), &[3, 1]);
//! assert_eq!(col.strides(), &[1, 2]);
//! ```

mod array;
mod iter;
mod order;

// ============================================================================
// Array type
// ============================================================================
pub use array::DenseArray;

// ============================================================================
// Order policies
// ============================================================================
pub use order::{ColMajor, Order, RowMajor};

// ============================================================================
// Iterators
// ============================================================================
pub use iter::{IndexedIter, Indices};

// ============================================================================
// Error types
// ============================================================================

/// Errors produced by array construction and checked access.
///
/// All failures are local and synchronous; no failing operation leaves an
/// array partially mutated. Rank or order mismatches between two array
/// types are compile errors, not variants here.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DenseError {
    /// Flat buffer length does not match the product of the extents.
    #[error("shape mismatch: {actual} elements supplied for shape {dims:?} ({expected} expected)")]
    ShapeMismatch {
        expected: usize,
        actual: usize,
        dims: Vec<usize>,
    },

    /// A coordinate lies outside the extent of its axis.
    #[error("index {index} out of bounds for axis {axis} with extent {extent}")]
    IndexOutOfBounds {
        axis: usize,
        index: usize,
        extent: usize,
    },

    /// A linear offset lies outside the flat storage.
    #[error("linear index {index} out of bounds for length {len}")]
    LinearOutOfBounds { index: usize, len: usize },

    /// The product of the extents overflows `usize`.
    #[error("extent product overflows usize for shape {dims:?}")]
    SizeOverflow { dims: Vec<usize> },
}

/// Result type for dense array operations.
pub type Result<T> = std::result::Result<T, DenseError>;
