//! Pivoted LU of 4- and 8-column panels.
//!
//! All three kernels run the same right-looking sweep. For every column `j`
//! the pivot has already been found by the previous pass; the column is
//! swapped into place, scaled by the reciprocal pivot, and its rank-1 update
//! is applied to the later columns in the same pass that searches the pivot
//! of column `j + 1`. Lane width only affects the batching inside
//! `simd::scal_rank1_iamax_f64`.
//!
//! A column whose pivot magnitude is exactly 0.0 is singular: it keeps
//! `ipiv[j] = j`, gets `inv_diag[j] = 0.0`, is not scaled and contributes no
//! update. Factoring continues with the next column.

use lupanel_core::simd;
use smallvec::SmallVec;

use crate::rowsw::drowsw_in;

// ============================================================================
// Sweep engine
// ============================================================================

/// Factor the first `w` columns of an `m`-row panel in place.
///
/// Writes `min(m, w)` entries of `ipiv` and `inv_diag`. Row interchanges
/// span all `w` columns. Returns 0, or `j + 1` for the first singular
/// column `j`.
#[allow(clippy::needless_range_loop)]
fn getf2_sweep(
    m: usize,
    w: usize,
    a: &mut [f64],
    lda: usize,
    inv_diag: &mut [f64],
    ipiv: &mut [usize],
) -> i32 {
    let p = m.min(w);
    if p == 0 {
        return 0;
    }

    let mut info = 0;
    let (mut piv, mut piv_val) = simd::iamax_f64(&a[..m]);

    for j in 0..p {
        let jp = j + piv;
        ipiv[j] = jp;

        if piv_val == 0.0 {
            inv_diag[j] = 0.0;
            if info == 0 {
                info = (j + 1) as i32;
            }
            if j + 1 < p {
                let next = (j + 1) * lda;
                (piv, piv_val) = simd::iamax_f64(&a[next + j + 1..next + m]);
            }
            continue;
        }

        if jp != j {
            drowsw_in(w, a, lda, j, jp);
        }

        let inv = 1.0 / a[j + j * lda];
        inv_diag[j] = inv;

        // the last column of the storage may stop right after row m - 1
        let split = ((j + 1) * lda).min(a.len());
        let (head, tail) = a.split_at_mut(split);
        let l = &mut head[j * lda + j + 1..j * lda + m];

        let mut u: SmallVec<[f64; 8]> = SmallVec::new();
        let mut cols: SmallVec<[&mut [f64]; 8]> = SmallVec::new();
        for col in tail.chunks_mut(lda).take(w - j - 1) {
            let (top, below) = col.split_at_mut(j + 1);
            u.push(top[j]);
            cols.push(&mut below[..m - j - 1]);
        }

        (piv, piv_val) = simd::scal_rank1_iamax_f64(inv, l, &u, &mut cols);
    }

    info
}

// ============================================================================
// Fixed width
// ============================================================================

/// LU with partial pivoting of an `m x 4` panel, `m >= 4`.
///
/// `inv_diag` and `ipiv` receive 4 entries each; `ipiv` is 0-based and
/// panel-relative.
pub fn dgetrf_pivot_4(
    m: usize,
    a: &mut [f64],
    lda: usize,
    inv_diag: &mut [f64],
    ipiv: &mut [usize],
) -> i32 {
    assert!(m >= 4, "fixed 4-column kernel needs at least 4 rows, got {m}");
    getf2_sweep(m, 4, a, lda, inv_diag, ipiv)
}

/// LU with partial pivoting of an `m x 8` panel, `m >= 8`.
///
/// Columns 4..8 receive their updates from columns 0..4 as each of those is
/// eliminated, so the result equals two 4-column passes joined by a
/// triangular solve and a rank-4 update.
pub fn dgetrf_pivot_8(
    m: usize,
    a: &mut [f64],
    lda: usize,
    inv_diag: &mut [f64],
    ipiv: &mut [usize],
) -> i32 {
    assert!(m >= 8, "fixed 8-column kernel needs at least 8 rows, got {m}");
    getf2_sweep(m, 8, a, lda, inv_diag, ipiv)
}

// ============================================================================
// Variable width
// ============================================================================

/// LU with partial pivoting of an `m x n` panel, `n <= 4` (larger `n` is
/// clipped to 4), any `m`.
///
/// Only rows `0..m` are ever searched, read or written, and interchanges
/// touch only the `n` panel columns. `m == 0 || n == 0` returns without
/// touching anything.
pub fn dgetrf_pivot_4_vs(
    m: usize,
    a: &mut [f64],
    lda: usize,
    inv_diag: &mut [f64],
    ipiv: &mut [usize],
    n: usize,
) -> i32 {
    if m == 0 || n == 0 {
        return 0;
    }
    getf2_sweep(m, n.min(4), a, lda, inv_diag, ipiv)
}
