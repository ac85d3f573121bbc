//! Row exchange.
//!
//! Rows of a column-major matrix are strided by the leading dimension, so a
//! row is addressed as "first element + stride".

/// Swap the first `k` elements of two rows held in different matrices.
///
/// `a[0]` and `c[0]` are the first elements of the rows; element `j` sits at
/// `a[j * lda]` and `c[j * ldc]`. Two `&mut` slices cannot alias.
pub fn drowsw(k: usize, a: &mut [f64], lda: usize, c: &mut [f64], ldc: usize) {
    for j in 0..k {
        std::mem::swap(&mut a[j * lda], &mut c[j * ldc]);
    }
}

/// Swap rows `r1` and `r2` of one matrix over its first `k` columns.
#[inline]
pub fn drowsw_in(k: usize, a: &mut [f64], lda: usize, r1: usize, r2: usize) {
    if r1 == r2 {
        return;
    }
    for j in 0..k {
        a.swap(r1 + j * lda, r2 + j * lda);
    }
}
