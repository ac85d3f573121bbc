//! Checked entry point over the raw panel kernels.

use lupanel_core::PanelMut;

use crate::error::LuError;
use crate::factors::{PanelKernel, PanelLu};
use crate::getrf_pivot::{dgetrf_pivot_4, dgetrf_pivot_4_vs, dgetrf_pivot_8};
use crate::getrf_pivot_vs8::dgetrf_pivot_8_vs;

/// Widest panel any kernel accepts.
pub const MAX_PANEL_COLS: usize = 8;

fn select_kernel(rows: usize, cols: usize) -> PanelKernel {
    match cols {
        4 if rows >= 4 => PanelKernel::Fixed4,
        8 if rows >= 8 => PanelKernel::Fixed8,
        0..=4 => PanelKernel::Variable4,
        _ => PanelKernel::Variable8,
    }
}

/// LU with partial pivoting of a panel of at most 8 columns, in place.
///
/// On return the panel holds unit-lower `L` below the diagonal and `U` on
/// and above it; `ipiv[..pivots]` holds 0-based LAPACK-style interchanges and
/// `inv_diag[..pivots]` the reciprocal pivots (0.0 for a singular column).
/// Singular columns are reported in `first_singular`, not as an error.
pub fn getrf_panel(
    panel: &mut PanelMut<'_>,
    inv_diag: &mut [f64],
    ipiv: &mut [usize],
) -> Result<PanelLu, LuError> {
    let (rows, cols, ld) = (panel.rows(), panel.cols(), panel.ld());
    if cols > MAX_PANEL_COLS {
        return Err(LuError::TooWide { cols });
    }
    let required = rows.min(cols);
    if inv_diag.len() < required {
        return Err(LuError::OutputTooShort {
            name: "inv_diag",
            len: inv_diag.len(),
            required,
        });
    }
    if ipiv.len() < required {
        return Err(LuError::OutputTooShort {
            name: "ipiv",
            len: ipiv.len(),
            required,
        });
    }

    lupanel_core::check_backend();

    let kernel = select_kernel(rows, cols);
    log::trace!(target: "lupanel", "getrf_panel {:?}: {}x{} ld {}", kernel, rows, cols, ld);

    let a = panel.as_mut_slice();
    let info = match kernel {
        PanelKernel::Fixed4 => dgetrf_pivot_4(rows, a, ld, inv_diag, ipiv),
        PanelKernel::Fixed8 => dgetrf_pivot_8(rows, a, ld, inv_diag, ipiv),
        PanelKernel::Variable4 => dgetrf_pivot_4_vs(rows, a, ld, inv_diag, ipiv, cols),
        PanelKernel::Variable8 => dgetrf_pivot_8_vs(rows, a, ld, inv_diag, ipiv, cols),
    };

    let first_singular = (info > 0).then(|| (info - 1) as usize);
    if let Some(j) = first_singular {
        log::debug!(target: "lupanel", "column {} has a zero pivot, left unscaled", j);
    }

    Ok(PanelLu {
        kernel,
        pivots: required,
        first_singular,
    })
}

/// `getrf_panel` over a raw column-major slice.
pub fn getrf_panel_slice(
    a: &mut [f64],
    rows: usize,
    cols: usize,
    ld: usize,
    inv_diag: &mut [f64],
    ipiv: &mut [usize],
) -> Result<PanelLu, LuError> {
    let mut panel = PanelMut::new(a, rows, cols, ld)?;
    getrf_panel(&mut panel, inv_diag, ipiv)
}
