//! `std::simd` lane primitives used by the panel kernels in `lupanel_lapack`.
//!
//! Selected with `--features avx2` (f64x4) or `--features avx512` (f64x8).
//! The API is identical to the stable backend in `simd_lanes.rs`. Every lane
//! performs an unfused multiply followed by a subtract, so both backends
//! produce bitwise identical factors.

use std::simd::cmp::SimdPartialOrd;
use std::simd::num::SimdFloat;

// SIMD vector types selected by feature flag, no runtime branching
#[cfg(feature = "avx512")]
use std::simd::{f64x8 as F64Simd, u64x8 as U64Simd};
#[cfg(not(feature = "avx512"))]
use std::simd::{f64x4 as F64Simd, u64x4 as U64Simd};

// ============================================================================
// Lane counts
// ============================================================================

/// f64 lanes per register (rows of a panel column processed per step).
#[cfg(feature = "avx512")]
pub const F64_LANES: usize = 8;
/// f64 lanes per register (rows of a panel column processed per step).
#[cfg(not(feature = "avx512"))]
pub const F64_LANES: usize = 4;

// ============================================================================
// Running abs-max with row index (pivot search)
// ============================================================================

/// Per-lane running maximum of `|x|` together with the row that produced it.
///
/// Lanes only move on a strict `>`, so each lane keeps the first row at
/// which its maximum appeared. NaN never compares greater and never wins.
struct AbsMax {
    max: F64Simd,
    imx: U64Simd,
    idx: U64Simd,
}

impl AbsMax {
    #[inline(always)]
    fn new() -> Self {
        let mut lanes = [0u64; F64_LANES];
        for (k, lane) in lanes.iter_mut().enumerate() {
            *lane = k as u64;
        }
        Self {
            max: F64Simd::splat(0.0),
            imx: U64Simd::splat(0),
            idx: U64Simd::from_array(lanes),
        }
    }

    #[inline(always)]
    fn push(&mut self, v: F64Simd) {
        let a = v.abs();
        let gt = a.simd_gt(self.max);
        self.max = gt.select(a, self.max);
        self.imx = gt.select(self.idx, self.imx);
        self.idx += U64Simd::splat(F64_LANES as u64);
    }

    /// Reduce across lanes (equal maxima resolve to the lower row), then
    /// continue the scan over the scalar remainder that starts at row `start`.
    #[inline(always)]
    fn finish(self, tail: &[f64], start: usize) -> (usize, f64) {
        let max = self.max.to_array();
        let imx = self.imx.to_array();
        let mut best = 0usize;
        let mut best_val = 0.0f64;
        for k in 0..F64_LANES {
            let row = imx[k] as usize;
            if max[k] > best_val || (max[k] == best_val && best_val > 0.0 && row < best) {
                best = row;
                best_val = max[k];
            }
        }
        for (k, x) in tail.iter().enumerate() {
            let a = x.abs();
            if a > best_val {
                best_val = a;
                best = start + k;
            }
        }
        (best, best_val)
    }
}

// ============================================================================
// scal, axpy, iamax
// ============================================================================

#[inline]
pub fn scal_f64(alpha: f64, x: &mut [f64]) {
    let len = x.len();
    let chunks = len / F64_LANES;
    let alpha_v = F64Simd::splat(alpha);

    for i in 0..chunks {
        let base = i * F64_LANES;
        let xv = F64Simd::from_slice(&x[base..]);
        (xv * alpha_v).copy_to_slice(&mut x[base..base + F64_LANES]);
    }
    for i in (chunks * F64_LANES)..len {
        x[i] *= alpha;
    }
}

#[inline]
pub fn axpy_f64(alpha: f64, x: &[f64], y: &mut [f64]) {
    assert_eq!(x.len(), y.len());
    let len = x.len();
    let chunks = len / F64_LANES;
    let alpha_v = F64Simd::splat(alpha);

    for i in 0..chunks {
        let base = i * F64_LANES;
        let xv = F64Simd::from_slice(&x[base..]);
        let mut yv = F64Simd::from_slice(&y[base..]);
        yv += alpha_v * xv;
        yv.copy_to_slice(&mut y[base..base + F64_LANES]);
    }
    for i in (chunks * F64_LANES)..len {
        y[i] += alpha * x[i];
    }
}

/// Index and magnitude of the strictly largest `|x[i]|`.
///
/// Starts from a maximum of 0.0: an all-zero or all-NaN input returns
/// `(0, 0.0)`. Ties go to the smallest index.
#[inline]
pub fn iamax_f64(x: &[f64]) -> (usize, f64) {
    let chunks = x.len() / F64_LANES;
    let mut acc = AbsMax::new();
    for i in 0..chunks {
        acc.push(F64Simd::from_slice(&x[i * F64_LANES..]));
    }
    let tail = chunks * F64_LANES;
    acc.finish(&x[tail..], tail)
}

// ============================================================================
// Fused scale + rank-1 update + pivot search
// ============================================================================

/// One register-resident sweep over a block of rows.
///
/// For every row `i`: `l[i] *= scale`, then `cols[c][i] -= l[i] * u[c]` for
/// each target column. Returns `iamax_f64` of the updated `cols[0]`, or
/// `(0, 0.0)` when there is no target column.
pub fn scal_rank1_iamax_f64(
    scale: f64,
    l: &mut [f64],
    u: &[f64],
    cols: &mut [&mut [f64]],
) -> (usize, f64) {
    assert_eq!(u.len(), cols.len());
    let len = l.len();
    for col in cols.iter() {
        assert_eq!(col.len(), len);
    }

    let chunks = len / F64_LANES;
    let scale_v = F64Simd::splat(scale);
    let mut acc = AbsMax::new();

    for i in 0..chunks {
        let base = i * F64_LANES;
        let lv = F64Simd::from_slice(&l[base..]) * scale_v;
        lv.copy_to_slice(&mut l[base..base + F64_LANES]);
        for (c, (col, &uc)) in cols.iter_mut().zip(u).enumerate() {
            let cv = F64Simd::from_slice(&col[base..]) - lv * F64Simd::splat(uc);
            cv.copy_to_slice(&mut col[base..base + F64_LANES]);
            if c == 0 {
                acc.push(cv);
            }
        }
    }

    let tail = chunks * F64_LANES;
    for i in tail..len {
        let li = l[i] * scale;
        l[i] = li;
        for (col, &uc) in cols.iter_mut().zip(u) {
            col[i] -= li * uc;
        }
    }

    match cols.first() {
        Some(first) => acc.finish(&first[tail..], tail),
        None => (0, 0.0),
    }
}
