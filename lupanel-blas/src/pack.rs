//! Packing between panel storage and contiguous scratch blocks.
//!
//! A packed block is column-major with its own leading dimension: `4` for a
//! 4-row block, `sd` (row count rounded up to 4) for a tall one.

/// Copy `rows x cols` from `a` (leading dimension `lda`) into `dst` (`ldd`).
///
/// Rows `rows..ldd` of each packed column are zero-filled so a short block
/// never carries stale values into a later kernel.
pub fn dpack(rows: usize, cols: usize, a: &[f64], lda: usize, dst: &mut [f64], ldd: usize) {
    debug_assert!(rows <= ldd);
    for j in 0..cols {
        let col = &mut dst[j * ldd..(j + 1) * ldd];
        col[..rows].copy_from_slice(&a[j * lda..j * lda + rows]);
        col[rows..].fill(0.0);
    }
}

/// Copy `rows x cols` from packed `src` (leading dimension `lds`) back into `a`.
pub fn dunpack(rows: usize, cols: usize, src: &[f64], lds: usize, a: &mut [f64], lda: usize) {
    for j in 0..cols {
        a[j * lda..j * lda + rows].copy_from_slice(&src[j * lds..j * lds + rows]);
    }
}
