//! Iteration over dense arrays.
//!
//! Element iteration is plain slice iteration over the contiguous storage:
//! the same iterator type serves both memory orders, and the sequence it
//! yields is the array's own raster order. Coordinate iteration
//! ([`Indices`]) walks the coordinate tuples in that same sequence, so
//! zipping the two keeps indices and elements aligned.

use std::iter::FusedIterator;
use std::marker::PhantomData;

use crate::array::DenseArray;
use crate::order::Order;

/// Iterator over the coordinate tuples of an array shape, in the order
/// policy's raster sequence.
#[derive(Debug, Clone)]
pub struct Indices<const N: usize, O: Order> {
    dims: [usize; N],
    next: [usize; N],
    remaining: usize,
    _order: PhantomData<O>,
}

impl<const N: usize, O: Order> Iterator for Indices<N, O> {
    type Item = [usize; N];

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }
        let out = self.next;
        O::advance(&self.dims, &mut self.next);
        self.remaining -= 1;
        Some(out)
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<const N: usize, O: Order> ExactSizeIterator for Indices<N, O> {}
impl<const N: usize, O: Order> FusedIterator for Indices<N, O> {}

/// Iterator yielding `(coordinates, &element)` pairs in raster order.
pub struct IndexedIter<'a, T, const N: usize, O: Order> {
    indices: Indices<N, O>,
    elements: std::slice::Iter<'a, T>,
}

impl<'a, T, const N: usize, O: Order> Iterator for IndexedIter<'a, T, N, O> {
    type Item = ([usize; N], &'a T);

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        let idx = self.indices.next()?;
        let value = self.elements.next()?;
        Some((idx, value))
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        self.indices.size_hint()
    }
}

impl<'a, T, const N: usize, O: Order> ExactSizeIterator for IndexedIter<'a, T, N, O> {}
impl<'a, T, const N: usize, O: Order> FusedIterator for IndexedIter<'a, T, N, O> {}

impl<T, const N: usize, O: Order> DenseArray<T, N, O> {
    /// Iterate over the coordinate tuples of this array, in the same
    /// sequence [`iter`](Self::iter) visits the elements.
    pub fn indices(&self) -> Indices<N, O> {
        Indices {
            dims: *self.dims(),
            next: [0; N],
            remaining: self.len(),
            _order: PhantomData,
        }
    }

    /// Iterate over `(coordinates, &element)` pairs in raster order.
    pub fn indexed_iter(&self) -> IndexedIter<'_, T, N, O> {
        IndexedIter {
            indices: self.indices(),
            elements: self.iter(),
        }
    }
}

impl<T, const N: usize, O: Order> IntoIterator for DenseArray<T, N, O> {
    type Item = T;
    type IntoIter = std::vec::IntoIter<T>;

    fn into_iter(self) -> Self::IntoIter {
        self.into_vec().into_iter()
    }
}

impl<'a, T, const N: usize, O: Order> IntoIterator for &'a DenseArray<T, N, O> {
    type Item = &'a T;
    type IntoIter = std::slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<'a, T, const N: usize, O: Order> IntoIterator for &'a mut DenseArray<T, N, O> {
    type Item = &'a mut T;
    type IntoIter = std::slice::IterMut<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter_mut()
    }
}

// ============================================================================
// Rayon parallel iteration support (feature-gated)
// ============================================================================

#[cfg(feature = "parallel")]
mod parallel {
    use rayon::prelude::*;

    use crate::array::DenseArray;
    use crate::order::Order;

    impl<T: Sync, const N: usize, O: Order> DenseArray<T, N, O> {
        /// Parallel iterator over the elements in memory order.
        pub fn par_iter(&self) -> rayon::slice::Iter<'_, T> {
            self.as_slice().par_iter()
        }
    }

    impl<T: Send, const N: usize, O: Order> DenseArray<T, N, O> {
        /// Parallel mutable iterator over the elements in memory order.
        pub fn par_iter_mut(&mut self) -> rayon::slice::IterMut<'_, T> {
            self.as_mut_slice().par_iter_mut()
        }
    }

    impl<'a, T: Sync, const N: usize, O: Order> IntoParallelIterator for &'a DenseArray<T, N, O> {
        type Item = &'a T;
        type Iter = rayon::slice::Iter<'a, T>;

        fn into_par_iter(self) -> Self::Iter {
            self.par_iter()
        }
    }

    impl<'a, T: Send, const N: usize, O: Order> IntoParallelIterator
        for &'a mut DenseArray<T, N, O>
    {
        type Item = &'a mut T;
        type Iter = rayon::slice::IterMut<'a, T>;

        fn into_par_iter(self) -> Self::Iter {
            self.par_iter_mut()
        }
    }
}
