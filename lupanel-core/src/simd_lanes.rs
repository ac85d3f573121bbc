//! Stable-Rust lane primitives: the default backend.
//!
//! Same API surface as `simd.rs`, built from fixed-size `[f64; F64_LANES]`
//! blocks that LLVM vectorizes on its own. Rows that do not fill a block
//! take the scalar remainder loops.

// ============================================================================
// Lane counts
// ============================================================================

/// Rows of a panel column processed per step.
pub const F64_LANES: usize = 4;

type Lanes = [f64; F64_LANES];

#[inline(always)]
fn load(x: &[f64]) -> Lanes {
    let mut v = [0.0; F64_LANES];
    v.copy_from_slice(&x[..F64_LANES]);
    v
}

// ============================================================================
// Running abs-max with row index (pivot search)
// ============================================================================

/// Per-lane running maximum of `|x|` together with the row that produced it.
struct AbsMax {
    max: Lanes,
    imx: [usize; F64_LANES],
    base: usize,
}

impl AbsMax {
    #[inline(always)]
    fn new() -> Self {
        Self {
            max: [0.0; F64_LANES],
            imx: [0; F64_LANES],
            base: 0,
        }
    }

    #[inline(always)]
    fn push(&mut self, v: &[f64]) {
        for k in 0..F64_LANES {
            let a = v[k].abs();
            // strict: NaN and later equal values never replace the lane max
            if a > self.max[k] {
                self.max[k] = a;
                self.imx[k] = self.base + k;
            }
        }
        self.base += F64_LANES;
    }

    #[inline(always)]
    fn finish(self, tail: &[f64], start: usize) -> (usize, f64) {
        let mut best = 0usize;
        let mut best_val = 0.0f64;
        for k in 0..F64_LANES {
            let (val, row) = (self.max[k], self.imx[k]);
            if val > best_val || (val == best_val && best_val > 0.0 && row < best) {
                best = row;
                best_val = val;
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
    for v in x.iter_mut() {
        *v *= alpha;
    }
}

#[inline]
pub fn axpy_f64(alpha: f64, x: &[f64], y: &mut [f64]) {
    assert_eq!(x.len(), y.len());
    for (yi, xi) in y.iter_mut().zip(x) {
        *yi += alpha * xi;
    }
}

/// Index and magnitude of the strictly largest `|x[i]|`.
///
/// Starts from a maximum of 0.0: an all-zero or all-NaN input returns
/// `(0, 0.0)`. Ties go to the smallest index.
#[inline]
pub fn iamax_f64(x: &[f64]) -> (usize, f64) {
    let mut chunks = x.chunks_exact(F64_LANES);
    let mut acc = AbsMax::new();
    for chunk in &mut chunks {
        acc.push(chunk);
    }
    let tail = chunks.remainder();
    acc.finish(tail, x.len() - tail.len())
}

// ============================================================================
// Fused scale + rank-1 update + pivot search
// ============================================================================

/// One sweep over a block of rows.
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
    let mut acc = AbsMax::new();

    for i in 0..chunks {
        let base = i * F64_LANES;
        let mut lv = load(&l[base..]);
        for v in lv.iter_mut() {
            *v *= scale;
        }
        l[base..base + F64_LANES].copy_from_slice(&lv);
        for (c, (col, &uc)) in cols.iter_mut().zip(u).enumerate() {
            let dst = &mut col[base..base + F64_LANES];
            for (d, lk) in dst.iter_mut().zip(&lv) {
                *d -= lk * uc;
            }
            if c == 0 {
                acc.push(dst);
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
