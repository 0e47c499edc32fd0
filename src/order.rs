//! Memory-order policies for dense arrays.
//!
//! The element order of a [`DenseArray`](crate::DenseArray) is part of its
//! type, not a runtime flag: [`RowMajor`] and [`ColMajor`] are zero-sized
//! tags, and stride derivation specializes per tag at compile time. Two
//! arrays that differ only in their order are distinct, non-interconvertible
//! types; converting between them is an explicit re-layout
//! ([`DenseArray::to_order`](crate::DenseArray::to_order)), never a cast.

/// Type-level memory-order policy.
///
/// An order decides which axis varies fastest in linear memory:
///
/// ```text
///  order    | fastest axis | stride formula
/// ----------|--------------|----------------------------------------
///  RowMajor | last (C)     | s[N-1] = 1, s[d] = s[d+1] * dims[d+1]
///  ColMajor | first (F)    | s[0]   = 1, s[d] = s[d-1] * dims[d-1]
/// ```
///
/// For any non-empty shape the maximal coordinate tuple maps to
/// `len - 1`, so both orders address exactly the same contiguous block.
pub trait Order: Copy + Default + 'static {
    /// Name used in diagnostics.
    const NAME: &'static str;

    /// Derive the stride table for the given extents.
    ///
    /// Zero extents are allowed and produce a zero-length array; no
    /// division occurs anywhere in the derivation.
    fn strides<const N: usize>(dims: &[usize; N]) -> [usize; N];

    /// Advance a coordinate tuple one step along this order's linear
    /// (raster) sequence.
    ///
    /// Returns `false` when the tuple wraps back to the origin, i.e. the
    /// previous tuple was the last one in the sequence.
    fn advance<const N: usize>(dims: &[usize; N], indices: &mut [usize; N]) -> bool;
}

/// C-style order: the last coordinate varies fastest in memory.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RowMajor;

/// Fortran-style order: the first coordinate varies fastest in memory.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ColMajor;

impl Order for RowMajor {
    const NAME: &'static str = "row-major";

    #[inline]
    fn strides<const N: usize>(dims: &[usize; N]) -> [usize; N] {
        let mut strides = [1usize; N];
        for d in (0..N.saturating_sub(1)).rev() {
            strides[d] = strides[d + 1] * dims[d + 1];
        }
        strides
    }

    #[inline]
    fn advance<const N: usize>(dims: &[usize; N], indices: &mut [usize; N]) -> bool {
        for d in (0..N).rev() {
            indices[d] += 1;
            if indices[d] < dims[d] {
                return true;
            }
            indices[d] = 0;
        }
        false
    }
}

impl Order for ColMajor {
    const NAME: &'static str = "column-major";

    #[inline]
    fn strides<const N: usize>(dims: &[usize; N]) -> [usize; N] {
        let mut strides = [1usize; N];
        for d in 1..N {
            strides[d] = strides[d - 1] * dims[d - 1];
        }
        strides
    }

    #[inline]
    fn advance<const N: usize>(dims: &[usize; N], indices: &mut [usize; N]) -> bool {
        for d in 0..N {
            indices[d] += 1;
            if indices[d] < dims[d] {
                return true;
            }
            indices[d] = 0;
        }
        false
    }
}
