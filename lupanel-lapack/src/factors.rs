//! Reading a factored panel back out.

/// Which panel kernel `getrf_panel` ran.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PanelKernel {
    Fixed4,
    Fixed8,
    Variable4,
    Variable8,
}

/// Summary of one `getrf_panel` call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PanelLu {
    pub kernel: PanelKernel,
    /// Entries written to `ipiv` and `inv_diag`: `min(rows, cols)`.
    pub pivots: usize,
    /// First column whose pivot magnitude was exactly zero.
    pub first_singular: Option<usize>,
}

impl PanelLu {
    #[inline]
    pub fn is_singular(&self) -> bool {
        self.first_singular.is_some()
    }
}

/// Index of the first exact-zero reciprocal pivot.
pub fn first_singular(inv_diag: &[f64]) -> Option<usize> {
    inv_diag.iter().position(|&d| d == 0.0)
}

/// Split an in-place LU panel into explicit factors.
///
/// Returns `(L, U)`, both column-major and densely stored: `L` is
/// `m x min(m, n)` unit lower triangular, `U` is `min(m, n) x n` upper
/// triangular.
pub fn unpack_lu(m: usize, n: usize, a: &[f64], lda: usize) -> (Vec<f64>, Vec<f64>) {
    let k = m.min(n);
    let mut l = vec![0.0; m * k];
    let mut u = vec![0.0; k * n];

    for j in 0..k {
        l[j + j * m] = 1.0;
        for i in j + 1..m {
            l[i + j * m] = a[i + j * lda];
        }
    }
    for j in 0..n {
        for i in 0..k.min(j + 1) {
            u[i + j * k] = a[i + j * lda];
        }
    }
    (l, u)
}
