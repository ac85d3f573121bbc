//! LAPACK-style pivot runs and their application.
//!
//! `ipiv[k]` is the row interchanged with row `start + k`. A run describes a
//! permutation only when its interchanges are applied in increasing `k`;
//! `PivotSegment` is the one place that does so.

use crate::rowsw::drowsw_in;

/// A run of interchanges for rows `start..start + ipiv.len()`.
#[derive(Debug, Clone, Copy)]
pub struct PivotSegment<'a> {
    ipiv: &'a [usize],
    start: usize,
}

impl<'a> PivotSegment<'a> {
    pub fn new(ipiv: &'a [usize], start: usize) -> Self {
        Self { ipiv, start }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.ipiv.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.ipiv.is_empty()
    }

    /// Apply the interchanges in order to the first `ncols` columns of `a`.
    ///
    /// Preconditions: `start + k <= ipiv[k]`, and every `ipiv[k]` is a valid
    /// row of `a`.
    pub fn apply(&self, ncols: usize, a: &mut [f64], lda: usize) {
        for (k, &piv) in self.ipiv.iter().enumerate() {
            let row = self.start + k;
            debug_assert!(piv >= row, "pivot {piv} for row {row} points upward");
            if piv != row {
                drowsw_in(ncols, a, lda, row, piv);
            }
        }
    }

    /// Lift sub-panel pivots to panel rows: `ipiv[k] += offset`.
    pub fn rebase(ipiv: &mut [usize], offset: usize) {
        for piv in ipiv.iter_mut() {
            *piv += offset;
        }
    }

    /// Explicit permutation: row `i` of `P * A` is row `perm[i]` of `A`.
    pub fn permutation(&self, m: usize) -> Vec<usize> {
        let mut perm: Vec<usize> = (0..m).collect();
        for (k, &piv) in self.ipiv.iter().enumerate() {
            debug_assert!(piv < m, "pivot {piv} outside {m} rows");
            perm.swap(self.start + k, piv);
        }
        perm
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_apply_is_ordered_composition() {
        // Swaps (0,2) then (1,2) on a single column: [a,b,c] -> [c,b,a] -> [c,a,b]
        let mut col = vec![1.0, 2.0, 3.0];
        PivotSegment::new(&[2, 2], 0).apply(1, &mut col, 3);
        assert_eq!(col, vec![3.0, 1.0, 2.0]);
        assert_eq!(PivotSegment::new(&[2, 2], 0).permutation(3), vec![2, 0, 1]);
    }

    #[test]
    fn test_offset_segment() {
        // rows 4..6 of a 6x2 panel, pivots already panel-absolute
        let mut a: Vec<f64> = (0..12).map(|i| i as f64).collect();
        let seg = PivotSegment::new(&[5, 5], 4);
        seg.apply(2, &mut a, 6);
        assert_eq!(&a[..6], &[0.0, 1.0, 2.0, 3.0, 5.0, 4.0]);
        assert_eq!(&a[6..], &[6.0, 7.0, 8.0, 9.0, 11.0, 10.0]);
        assert_eq!(seg.permutation(6), vec![0, 1, 2, 3, 5, 4]);
    }

    #[test]
    fn test_rebase() {
        let mut ipiv = vec![0, 3, 2];
        PivotSegment::rebase(&mut ipiv, 4);
        assert_eq!(ipiv, vec![4, 7, 6]);
    }

    #[test]
    fn test_permutation_matches_apply() {
        let ipiv = [3, 1, 4, 4, 4];
        let m = 5;
        let seg = PivotSegment::new(&ipiv, 0);
        let mut col: Vec<f64> = (0..m).map(|i| i as f64).collect();
        seg.apply(1, &mut col, m);
        let perm = seg.permutation(m);
        for (x, &p) in col.iter().zip(&perm) {
            assert_eq!(*x, p as f64);
        }
        assert_eq!(seg.len(), 5);
        assert!(!seg.is_empty());
    }
}
