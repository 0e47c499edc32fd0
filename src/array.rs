//! The owned dense N-dimensional array type.
//!
//! [`DenseArray`] composes a shape (`[usize; N]` extents), a stride table
//! derived from the shape through the [`Order`] policy, and one exclusively
//! owned contiguous `Vec<T>` holding `dims.iter().product()` elements. The
//! stride table is recomputed whenever a new shape is established
//! (construction, re-assignment) and is never mutated independently.

use std::fmt;
use std::marker::PhantomData;
use std::ops::{Index, IndexMut};

use num_traits::{One, Zero};

use crate::order::{Order, RowMajor};
use crate::{DenseError, Result};

/// Product of the extents, with overflow surfaced before any allocation.
fn checked_len<const N: usize>(dims: &[usize; N]) -> Result<usize> {
    dims.iter()
        .try_fold(1usize, |acc, &d| acc.checked_mul(d))
        .ok_or_else(|| DenseError::SizeOverflow {
            dims: dims.to_vec(),
        })
}

/// An owned dense array with compile-time rank and memory order.
///
/// # Type Parameters
/// - `T`: Element type
/// - `N`: Number of dimensions (const generic); extents per dimension are
///   runtime values fixed at construction
/// - `O`: Memory-order policy (default: [`RowMajor`])
///
/// The array has plain value semantics: `clone` is a deep copy, a Rust
/// move transfers ownership of the buffer in constant time, and no two
/// arrays ever alias the same storage.
///
/// # Example
/// ```
/// use dense_array::DenseArray;
///
/// let mut a: DenseArray<f64, 2> = DenseArray::zeros([2, 3]).unwrap();
/// a[[1, 2]] = 6.0;
/// assert_eq!(a[[1, 2]], 6.0);
/// assert_eq!(a.len(), 6);
/// ```
pub struct DenseArray<T, const N: usize, O: Order = RowMajor> {
    data: Vec<T>,
    dims: [usize; N],
    strides: [usize; N],
    _order: PhantomData<O>,
}

impl<T, const N: usize, O: Order> DenseArray<T, N, O> {
    /// Adopt `data` as the flat storage for the given extents.
    ///
    /// The caller supplies the values in this array's own linear order: a
    /// column-major array takes a column-major-ordered buffer. The vector
    /// is taken over without copying.
    ///
    /// # Errors
    /// [`DenseError::ShapeMismatch`] when `data.len()` differs from the
    /// product of the extents.
    pub fn from_vec(dims: [usize; N], data: Vec<T>) -> Result<Self> {
        let len = checked_len(&dims)?;
        if data.len() != len {
            return Err(DenseError::ShapeMismatch {
                expected: len,
                actual: data.len(),
                dims: dims.to_vec(),
            });
        }
        Ok(Self {
            data,
            dims,
            strides: O::strides(&dims),
            _order: PhantomData,
        })
    }

    /// Build an array by calling `f` with every coordinate tuple, visited
    /// in this array's own raster order.
    pub fn from_fn(dims: [usize; N], mut f: impl FnMut([usize; N]) -> T) -> Result<Self> {
        let len = checked_len(&dims)?;
        let mut data = Vec::with_capacity(len);
        let mut idx = [0usize; N];
        for _ in 0..len {
            data.push(f(idx));
            O::advance(&dims, &mut idx);
        }
        Ok(Self {
            data,
            dims,
            strides: O::strides(&dims),
            _order: PhantomData,
        })
    }

    /// Returns the extents, one per dimension.
    #[inline]
    pub fn dims(&self) -> &[usize; N] {
        &self.dims
    }

    /// Returns the extent of dimension `axis`.
    ///
    /// # Panics
    /// Panics if `axis >= N`.
    #[inline]
    pub fn dim(&self, axis: usize) -> usize {
        self.dims[axis]
    }

    /// Returns the stride table.
    #[inline]
    pub fn strides(&self) -> &[usize; N] {
        &self.strides
    }

    /// Returns the linear-offset multiplier for dimension `axis`.
    ///
    /// # Panics
    /// Panics if `axis >= N`.
    #[inline]
    pub fn stride(&self, axis: usize) -> usize {
        self.strides[axis]
    }

    /// Returns the number of dimensions.
    #[inline]
    pub fn ndim(&self) -> usize {
        N
    }

    /// Returns the total number of elements.
    #[inline]
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Returns true if the array holds no elements.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// The flat storage, in this array's own raster order.
    #[inline]
    pub fn as_slice(&self) -> &[T] {
        &self.data
    }

    /// Mutable flat storage.
    #[inline]
    pub fn as_mut_slice(&mut self) -> &mut [T] {
        &mut self.data
    }

    /// Consume the array and return its flat storage.
    #[inline]
    pub fn into_vec(self) -> Vec<T> {
        self.data
    }

    /// Iterate over all elements in memory order.
    ///
    /// The iterator is double-ended and exact-size; `.rev()` traverses the
    /// flat storage back to front.
    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.data.iter()
    }

    /// Mutable iteration over all elements in memory order.
    pub fn iter_mut(&mut self) -> std::slice::IterMut<'_, T> {
        self.data.iter_mut()
    }

    /// Map a coordinate tuple to its linear offset, without checks.
    #[inline]
    fn linear_offset(&self, indices: &[usize; N]) -> usize {
        let mut offset = 0;
        for d in 0..N {
            offset += indices[d] * self.strides[d];
        }
        offset
    }

    /// Map a coordinate tuple to its linear offset.
    ///
    /// # Errors
    /// [`DenseError::IndexOutOfBounds`] naming the first offending axis.
    pub fn offset_of(&self, indices: [usize; N]) -> Result<usize> {
        for d in 0..N {
            if indices[d] >= self.dims[d] {
                return Err(DenseError::IndexOutOfBounds {
                    axis: d,
                    index: indices[d],
                    extent: self.dims[d],
                });
            }
        }
        Ok(self.linear_offset(&indices))
    }

    /// Map a linear offset back to its coordinate tuple (the inverse of
    /// [`offset_of`](Self::offset_of)).
    ///
    /// # Errors
    /// [`DenseError::LinearOutOfBounds`] when `offset >= len()`.
    pub fn coords_of(&self, offset: usize) -> Result<[usize; N]> {
        if offset >= self.data.len() {
            return Err(DenseError::LinearOutOfBounds {
                index: offset,
                len: self.data.len(),
            });
        }
        // offset < len implies every stride >= 1 and every extent >= 1.
        let mut coords = [0usize; N];
        for d in 0..N {
            coords[d] = (offset / self.strides[d]) % self.dims[d];
        }
        Ok(coords)
    }

    /// Checked coordinate access.
    pub fn get(&self, indices: [usize; N]) -> Result<&T> {
        let offset = self.offset_of(indices)?;
        Ok(&self.data[offset])
    }

    /// Checked mutable coordinate access.
    ///
    /// On an out-of-range coordinate the array is left untouched.
    pub fn get_mut(&mut self, indices: [usize; N]) -> Result<&mut T> {
        let offset = self.offset_of(indices)?;
        Ok(&mut self.data[offset])
    }

    /// Coordinate access without bounds checking.
    ///
    /// # Safety
    /// The caller must ensure `indices[d] < dims()[d]` for every axis.
    #[inline]
    pub unsafe fn get_unchecked(&self, indices: [usize; N]) -> &T {
        self.data.get_unchecked(self.linear_offset(&indices))
    }

    /// Mutable coordinate access without bounds checking.
    ///
    /// # Safety
    /// The caller must ensure `indices[d] < dims()[d]` for every axis.
    #[inline]
    pub unsafe fn get_unchecked_mut(&mut self, indices: [usize; N]) -> &mut T {
        let offset = self.linear_offset(&indices);
        self.data.get_unchecked_mut(offset)
    }

    /// Checked linear access, bypassing stride computation.
    pub fn get_linear(&self, offset: usize) -> Result<&T> {
        let len = self.data.len();
        self.data
            .get(offset)
            .ok_or(DenseError::LinearOutOfBounds { index: offset, len })
    }

    /// Checked mutable linear access.
    pub fn get_linear_mut(&mut self, offset: usize) -> Result<&mut T> {
        let len = self.data.len();
        self.data
            .get_mut(offset)
            .ok_or(DenseError::LinearOutOfBounds { index: offset, len })
    }
}

impl<T: Clone, const N: usize, O: Order> DenseArray<T, N, O> {
    /// Create an array with every slot a clone of `value`.
    pub fn from_elem(dims: [usize; N], value: T) -> Result<Self> {
        let len = checked_len(&dims)?;
        Ok(Self {
            data: vec![value; len],
            dims,
            strides: O::strides(&dims),
            _order: PhantomData,
        })
    }

    /// Overwrite every element with `value`.
    pub fn fill(&mut self, value: T) {
        self.data.fill(value);
    }

    /// Re-layout into an array of a different memory order holding the
    /// same logical element at every coordinate.
    ///
    /// This is the only conversion between orders; it always copies.
    pub fn to_order<P: Order>(&self) -> DenseArray<T, N, P> {
        let mut data = Vec::with_capacity(self.data.len());
        let mut idx = [0usize; N];
        for _ in 0..self.data.len() {
            // idx stays in range: advance is called exactly len - 1
            // effective times over a shape this array already satisfies.
            data.push(self.data[self.linear_offset(&idx)].clone());
            P::advance(&self.dims, &mut idx);
        }
        DenseArray {
            data,
            dims: self.dims,
            strides: P::strides(&self.dims),
            _order: PhantomData,
        }
    }
}

impl<T: Default + Clone, const N: usize, O: Order> DenseArray<T, N, O> {
    /// Create a default-initialized array with the given extents.
    pub fn new(dims: [usize; N]) -> Result<Self> {
        Self::from_elem(dims, T::default())
    }

    /// Move the contents out, leaving `self` as the valid empty array
    /// (all extents zero).
    ///
    /// The emptied array supports every query a zero-size array supports
    /// and can be re-assigned later.
    pub fn take(&mut self) -> Self {
        std::mem::take(self)
    }
}

impl<T: Zero + Clone, const N: usize, O: Order> DenseArray<T, N, O> {
    /// Create a zero-filled array with the given extents.
    pub fn zeros(dims: [usize; N]) -> Result<Self> {
        Self::from_elem(dims, T::zero())
    }
}

impl<T: One + Clone, const N: usize, O: Order> DenseArray<T, N, O> {
    /// Create a one-filled array with the given extents.
    pub fn ones(dims: [usize; N]) -> Result<Self> {
        Self::from_elem(dims, T::one())
    }
}

impl<T: Clone, const N: usize, O: Order> Clone for DenseArray<T, N, O> {
    fn clone(&self) -> Self {
        Self {
            data: self.data.clone(),
            dims: self.dims,
            strides: self.strides,
            _order: PhantomData,
        }
    }

    fn clone_from(&mut self, source: &Self) {
        // Reuses the target's buffer when capacities allow.
        self.data.clone_from(&source.data);
        self.dims = source.dims;
        self.strides = source.strides;
    }
}

impl<T: Default + Clone, const N: usize, O: Order> Default for DenseArray<T, N, O> {
    /// The valid empty array: all extents zero, no allocation.
    ///
    /// For `N == 0` the empty product makes this a single-element array.
    fn default() -> Self {
        let dims = [0usize; N];
        let len: usize = dims.iter().product();
        Self {
            data: vec![T::default(); len],
            dims,
            strides: O::strides(&dims),
            _order: PhantomData,
        }
    }
}

impl<T: fmt::Debug, const N: usize, O: Order> fmt::Debug for DenseArray<T, N, O> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DenseArray")
            .field("order", &O::NAME)
            .field("dims", &self.dims)
            .field("strides", &self.strides)
            .field("len", &self.data.len())
            .finish()
    }
}

/// Shape-and-contents equality between arrays of the same rank and order.
impl<T: PartialEq, const N: usize, O: Order> PartialEq for DenseArray<T, N, O> {
    fn eq(&self, other: &Self) -> bool {
        self.dims == other.dims && self.data == other.data
    }
}

impl<T: Eq, const N: usize, O: Order> Eq for DenseArray<T, N, O> {}

impl<T, const N: usize, O: Order> Index<[usize; N]> for DenseArray<T, N, O> {
    type Output = T;

    fn index(&self, indices: [usize; N]) -> &T {
        match self.get(indices) {
            Ok(value) => value,
            Err(e) => panic!("{e}"),
        }
    }
}

impl<T, const N: usize, O: Order> IndexMut<[usize; N]> for DenseArray<T, N, O> {
    fn index_mut(&mut self, indices: [usize; N]) -> &mut T {
        match self.get_mut(indices) {
            Ok(value) => value,
            Err(e) => panic!("{e}"),
        }
    }
}

/// Linear indexing straight into the flat storage.
impl<T, const N: usize, O: Order> Index<usize> for DenseArray<T, N, O> {
    type Output = T;

    #[inline]
    fn index(&self, offset: usize) -> &T {
        &self.data[offset]
    }
}

impl<T, const N: usize, O: Order> IndexMut<usize> for DenseArray<T, N, O> {
    #[inline]
    fn index_mut(&mut self, offset: usize) -> &mut T {
        &mut self.data[offset]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::order::ColMajor;
    use crate::DenseError;

    #[test]
    fn test_zeros() {
        let a: DenseArray<f64, 3> = DenseArray::zeros([2, 3, 4]).unwrap();
        assert_eq!(a.dims(), &[2, 3, 4]);
        assert_eq!(a.strides(), &[12, 4, 1]);
        assert_eq!(a.len(), 24);
        assert_eq!(a.ndim(), 3);
        assert!(a.iter().all(|&x| x == 0.0));
    }

    #[test]
    fn test_from_vec_row_major() {
        let a: DenseArray<i32, 2> =
            DenseArray::from_vec([2, 3], vec![11, 12, 13, 21, 22, 23]).unwrap();
        assert_eq!(a[[0, 0]], 11);
        assert_eq!(a[[0, 2]], 13);
        assert_eq!(a[[1, 0]], 21);
    }

    #[test]
    fn test_from_vec_col_major() {
        let a: DenseArray<i32, 2, ColMajor> =
            DenseArray::from_vec([2, 3], vec![11, 21, 12, 22, 13, 23]).unwrap();
        assert_eq!(a.strides(), &[1, 2]);
        assert_eq!(a[[0, 1]], 12);
        assert_eq!(a[[1, 2]], 23);
    }

    #[test]
    fn test_from_vec_shape_mismatch() {
        let err = DenseArray::<i32, 2>::from_vec([2, 3], vec![1, 2, 3]).unwrap_err();
        assert_eq!(
            err,
            DenseError::ShapeMismatch {
                expected: 6,
                actual: 3,
                dims: vec![2, 3],
            }
        );
    }

    #[test]
    fn test_size_overflow() {
        let err = DenseArray::<u8, 2>::new([usize::MAX, 2]).unwrap_err();
        assert!(matches!(err, DenseError::SizeOverflow { .. }));
    }

    #[test]
    fn test_from_fn_follows_own_raster_order() {
        let row: DenseArray<usize, 2> = DenseArray::from_fn([2, 2], |[i, j]| 10 * i + j).unwrap();
        assert_eq!(row.as_slice(), &[0, 1, 10, 11]);

        let col: DenseArray<usize, 2, ColMajor> =
            DenseArray::from_fn([2, 2], |[i, j]| 10 * i + j).unwrap();
        assert_eq!(col.as_slice(), &[0, 10, 1, 11]);

        // Same logical contents either way.
        for i in 0..2 {
            for j in 0..2 {
                assert_eq!(row[[i, j]], col[[i, j]]);
            }
        }
    }

    #[test]
    fn test_get_out_of_range() {
        let mut a: DenseArray<i32, 2> = DenseArray::zeros([2, 3]).unwrap();
        let before = a.clone();
        let err = a.get_mut([2, 0]).unwrap_err();
        assert_eq!(
            err,
            DenseError::IndexOutOfBounds {
                axis: 0,
                index: 2,
                extent: 2,
            }
        );
        assert_eq!(a, before);
    }

    #[test]
    #[should_panic(expected = "out of bounds")]
    fn test_index_panics_out_of_range() {
        let a: DenseArray<i32, 2> = DenseArray::zeros([2, 3]).unwrap();
        let _ = a[[0, 3]];
    }

    #[test]
    fn test_linear_access() {
        let mut a: DenseArray<f64, 1> = DenseArray::zeros([10]).unwrap();
        for i in 0..10 {
            a[i] = (3 * i) as f64;
        }
        assert_eq!(a[5], 15.0);
        assert!(a.get_linear(10).is_err());
        assert_eq!(*a.get_linear(9).unwrap(), 27.0);
    }

    #[test]
    fn test_offset_roundtrip() {
        let a: DenseArray<u8, 3, ColMajor> = DenseArray::zeros([2, 3, 4]).unwrap();
        for k in 0..a.len() {
            let coords = a.coords_of(k).unwrap();
            assert_eq!(a.offset_of(coords).unwrap(), k);
        }
        assert!(a.coords_of(24).is_err());
    }

    #[test]
    fn test_unchecked_access_matches_checked() {
        let a: DenseArray<usize, 2> = DenseArray::from_fn([3, 4], |[i, j]| i * 4 + j).unwrap();
        for i in 0..3 {
            for j in 0..4 {
                assert_eq!(unsafe { *a.get_unchecked([i, j]) }, *a.get([i, j]).unwrap());
            }
        }
    }

    #[test]
    fn test_clone_independence() {
        let a: DenseArray<i32, 2> = DenseArray::from_vec([2, 2], vec![1, 2, 3, 4]).unwrap();
        let mut b = a.clone();
        b[[0, 0]] = 99;
        assert_eq!(a[[0, 0]], 1);
        assert_eq!(b[[0, 0]], 99);
    }

    #[test]
    fn test_take_leaves_valid_empty_state() {
        let mut a: DenseArray<i32, 2> = DenseArray::from_vec([2, 2], vec![1, 2, 3, 4]).unwrap();
        let b = a.take();
        assert_eq!(b.as_slice(), &[1, 2, 3, 4]);
        assert_eq!(a.len(), 0);
        assert_eq!(a.dims(), &[0, 0]);
        assert!(a.is_empty());
        assert!(a.iter().next().is_none());

        // Re-assignment after the move-out.
        a = DenseArray::from_elem([1, 2], 7).unwrap();
        assert_eq!(a[[0, 1]], 7);
    }

    #[test]
    fn test_clone_from_replaces_shape_and_storage() {
        let src: DenseArray<i32, 2> = DenseArray::from_vec([2, 3], vec![1, 2, 3, 4, 5, 6]).unwrap();
        let mut dst: DenseArray<i32, 2> = DenseArray::zeros([4, 4]).unwrap();
        dst.clone_from(&src);
        assert_eq!(dst, src);

        // Assigning an array equal to itself changes nothing.
        let copy = dst.clone();
        dst.clone_from(&copy);
        assert_eq!(dst, src);
    }

    #[test]
    fn test_zero_extent_array() {
        let a: DenseArray<f32, 2> = DenseArray::zeros([0, 5]).unwrap();
        assert_eq!(a.len(), 0);
        assert!(a.is_empty());
        assert!(a.get([0, 0]).is_err());
        assert!(a.coords_of(0).is_err());
    }

    #[test]
    fn test_rank_zero_is_single_element() {
        let mut a: DenseArray<i32, 0> = DenseArray::zeros([]).unwrap();
        assert_eq!(a.len(), 1);
        *a.get_mut([]).unwrap() = 42;
        assert_eq!(a[[]], 42);
        assert_eq!(a.coords_of(0).unwrap(), []);
    }

    #[test]
    fn test_to_order_preserves_logical_contents() {
        let row: DenseArray<i32, 2> =
            DenseArray::from_vec([2, 3], vec![11, 12, 13, 21, 22, 23]).unwrap();
        let col = row.to_order::<ColMajor>();
        assert_eq!(col.as_slice(), &[11, 21, 12, 22, 13, 23]);
        for i in 0..2 {
            for j in 0..3 {
                assert_eq!(row[[i, j]], col[[i, j]]);
            }
        }
        // Round trip back.
        let back = col.to_order::<RowMajor>();
        assert_eq!(back, row);
    }

    #[test]
    fn test_default_is_empty() {
        let a: DenseArray<f64, 3> = DenseArray::default();
        assert_eq!(a.dims(), &[0, 0, 0]);
        assert!(a.is_empty());
    }

    #[test]
    fn test_fill() {
        let mut a: DenseArray<i32, 2> = DenseArray::zeros([2, 2]).unwrap();
        a.fill(9);
        assert_eq!(a.as_slice(), &[9, 9, 9, 9]);
    }

    #[test]
    fn test_debug_names_the_order() {
        let a: DenseArray<i32, 2, ColMajor> = DenseArray::zeros([2, 3]).unwrap();
        let s = format!("{a:?}");
        assert!(s.contains("column-major"));
        assert!(s.contains("[2, 3]"));
    }

    #[test]
    fn test_arrays_compose_in_containers() {
        // Value semantics alone make arrays usable as container elements,
        // constructed in place from an extent list.
        let mut vv: Vec<DenseArray<f64, 2>> = Vec::new();
        for n in 1..=4 {
            vv.push(DenseArray::from_elem([n, n + 1], n as f64).unwrap());
        }
        assert_eq!(vv[2].dims(), &[3, 4]);
        assert_eq!(vv[3][[3, 4]], 4.0);
    }
}
