//! BLAS Level 3 microkernels for the 4-column panel boundary.
//!
//! Both kernels work on column-major operands and accumulate one product at
//! a time in increasing `p`, as an unfused multiply and subtract. That is
//! the same order in which a right-looking elimination applies its rank-1
//! updates, so a panel factored through these kernels matches one factored
//! column by column bit for bit.
//!
//! `live[p] == false` drops column `p` of the left operand from the product:
//! a panel column whose pivot was zero contributes no update.

use lupanel_core::simd;

// ============================================================================
// DTRSM: Left, Lower, NoTrans, Unit diagonal
// B := inv(L) * B
// ============================================================================

/// Solve `L * X = B` in place for unit-lower `L` (`k x k`, `k <= 4`).
///
/// `l` is read below the diagonal only; the diagonal and upper part may hold
/// anything (they are the U factor in a packed LU panel). `b` is `k x n`
/// with leading dimension `ldb`. Columns `p` of `L` with `live[p] == false`
/// are treated as zero below the diagonal.
pub fn dtrsm_llnu(
    k: usize,
    n: usize,
    l: &[f64],
    ldl: usize,
    live: &[bool],
    b: &mut [f64],
    ldb: usize,
) {
    debug_assert!(k <= 4, "microkernel handles at most 4 rows, got {k}");
    let live = &live[..k];
    // Forward substitution: row i depends on rows 0..i of the same column.
    for j in 0..n {
        let col = &mut b[j * ldb..j * ldb + k];
        for i in 1..k {
            let mut sum = col[i];
            for p in (0..i).filter(|&p| live[p]) {
                sum -= l[i + p * ldl] * col[p];
            }
            col[i] = sum;
        }
    }
}

// ============================================================================
// DGEMM (subtract): C := C - A * B
// ============================================================================

/// `C[0..m, 0..n] -= A[0..m, 0..k] * B[0..k, 0..n]`, all column-major.
///
/// Intended for one 4-row block of the trailing update at a time; any `m`
/// works. Each column of `C` takes one SIMD axpy pass per live `p`, in
/// increasing `p`.
pub fn dgemm_nn_sub(
    m: usize,
    n: usize,
    k: usize,
    a: &[f64],
    lda: usize,
    live: &[bool],
    b: &[f64],
    ldb: usize,
    c: &mut [f64],
    ldc: usize,
) {
    if m == 0 {
        return;
    }
    let live = &live[..k];
    for j in 0..n {
        let c_col = &mut c[j * ldc..j * ldc + m];
        for p in (0..k).filter(|&p| live[p]) {
            // c - b*a == c + (-b)*a exactly: negation and commutation are exact.
            simd::axpy_f64(-b[p + j * ldb], &a[p * lda..p * lda + m], c_col);
        }
    }
}
