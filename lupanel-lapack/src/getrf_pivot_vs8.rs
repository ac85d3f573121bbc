//! Variable-size 8-column driver.
//!
//! Splits the panel at column 4:
//!
//! ```text
//!        0..4      4..n
//!     +--------+--------+
//!  0  | L11\U11|  U12   |   U12 = inv(L11) * A12          (dtrsm_llnu)
//!  4  |  L21   |  A22   |   A22 -= L21 * U12, 4 rows/call (dgemm_nn_sub)
//!     +--------+--------+   then LU of A22 and its pivots lifted by 4
//! ```
//!
//! L, U12 and A22 are packed into the three blocks of a `Scratch` so the
//! microkernels stream contiguous memory. Columns of the first block that
//! were singular are left out of both the solve and the update, as the
//! column-by-column sweep leaves them out.

use lupanel_blas::{dgemm_nn_sub, dpack, dtrsm_llnu, dunpack};
use lupanel_core::{Scratch, StackScratch};

use crate::getrf_pivot::dgetrf_pivot_4_vs;
use crate::pivots::PivotSegment;

/// LU with partial pivoting of an `m x n` panel, `n <= 8` (larger `n` is
/// clipped to 8), any `m`.
///
/// `ipiv` and `inv_diag` need `min(m, n)` entries. Panels of at most 4
/// columns go straight to `dgetrf_pivot_4_vs`. Returns 0, or `j + 1` for the
/// first singular column `j`.
pub fn dgetrf_pivot_8_vs(
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
    let n = n.min(8);
    if n <= 4 {
        return dgetrf_pivot_4_vs(m, a, lda, inv_diag, ipiv, n);
    }

    let nr = n - 4;
    let p1 = m.min(4);
    let right = 4 * lda;

    let mut info = dgetrf_pivot_4_vs(m, a, lda, inv_diag, ipiv, 4);
    PivotSegment::new(&ipiv[..p1], 0).apply(nr, &mut a[right..], lda);

    // A zero reciprocal with a finite diagonal marks a skipped column; an
    // infinite pivot also has a zero reciprocal but was eliminated.
    let mut live = [false; 4];
    for (p, flag) in live.iter_mut().enumerate().take(p1) {
        *flag = inv_diag[p] != 0.0 || a[p + p * lda].is_infinite();
    }

    let mut stack = StackScratch::new();
    let mut scratch = Scratch::for_rows(m, &mut stack);
    if scratch.is_heap() {
        log::debug!(target: "lupanel", "heap scratch for {} rows ({} per block)", m, 4 * scratch.sd());
    }
    let sd = scratch.sd();
    let (lblk, rest) = scratch.as_mut_slice().split_at_mut(4 * sd);
    let (ublk, cblk) = rest.split_at_mut(4 * sd);

    dpack(m, 4, a, lda, lblk, sd);
    dpack(p1, nr, &a[right..], lda, ublk, 4);
    dtrsm_llnu(p1, nr, lblk, sd, &live, ublk, 4);
    dunpack(p1, nr, ublk, 4, &mut a[right..], lda);

    if m > 4 {
        let mt = m - 4;
        let sub = right + 4;

        dpack(mt, nr, &a[sub..], lda, cblk, sd);
        for r in (0..mt).step_by(4) {
            let mr = (mt - r).min(4);
            dgemm_nn_sub(mr, nr, 4, &lblk[4 + r..], sd, &live, ublk, 4, &mut cblk[r..], sd);
        }
        dunpack(mt, nr, cblk, sd, &mut a[sub..], lda);

        let info2 = dgetrf_pivot_4_vs(mt, &mut a[sub..], lda, &mut inv_diag[4..], &mut ipiv[4..], nr);
        if info == 0 && info2 != 0 {
            info = info2 + 4;
        }

        let p2 = mt.min(nr);
        PivotSegment::rebase(&mut ipiv[4..4 + p2], 4);
        PivotSegment::new(&ipiv[4..4 + p2], 4).apply(4, a, lda);
    }

    info
}
