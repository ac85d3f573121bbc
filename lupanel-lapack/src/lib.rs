// LAPACK-style kernels take (m, a, lda, inv_diag, ipiv, n): the arity is the API.
#![allow(clippy::too_many_arguments)]

//! # Lupanel LAPACK
//!
//! LU factorization with partial pivoting for 4- and 8-column panels of a
//! column-major matrix, the inner kernel of a blocked `getrf`.
//!
//! - **Row exchange**: `drowsw`, `drowsw_in`
//! - **Fixed width**: `dgetrf_pivot_4` (`m >= 4`), `dgetrf_pivot_8` (`m >= 8`)
//! - **Variable width**: `dgetrf_pivot_4_vs` (`n <= 4`), `dgetrf_pivot_8_vs`
//!   (`n <= 8`), any `m`
//! - **Pivots**: `PivotSegment` applies, rebases and expands `ipiv` runs
//! - **Checked entry point**: `getrf_panel` validates a `PanelMut` and picks
//!   the kernel
//!
//! Every kernel writes `min(m, n)` 0-based pivots (`ipiv[j]` was swapped with
//! row `j`, in increasing `j`) and reciprocal pivots (`inv_diag[j]`, 0.0 for
//! a column whose pivot magnitude is exactly zero), and returns a LAPACK
//! `info`: 0, or `j + 1` for the first such column.
//!
//! ```
//! use lupanel_lapack::{getrf_panel_slice, PivotSegment};
//!
//! // 4x4 column-major
//! let mut a = vec![
//!     1.0, 4.0, 2.0, 0.0,
//!     2.0, 1.0, 0.0, 1.0,
//!     0.0, 3.0, 1.0, 2.0,
//!     1.0, 0.0, 1.0, 3.0,
//! ];
//! let mut inv_diag = [0.0; 4];
//! let mut ipiv = [0usize; 4];
//! let lu = getrf_panel_slice(&mut a, 4, 4, 4, &mut inv_diag, &mut ipiv).unwrap();
//! assert_eq!(lu.first_singular, None);
//! assert_eq!(ipiv[0], 1); // |4| is the largest entry of column 0
//! assert_eq!(a[0], 4.0);
//! assert_eq!(inv_diag[0], 0.25);
//!
//! let perm = PivotSegment::new(&ipiv, 0).permutation(4);
//! assert_eq!(perm[0], 1);
//! ```

pub mod error;
pub mod factors;
pub mod getrf;
pub mod getrf_pivot;
pub mod getrf_pivot_vs8;
pub mod pivots;
pub mod rowsw;

pub use error::LuError;
pub use factors::{first_singular, unpack_lu, PanelKernel, PanelLu};
pub use getrf::{getrf_panel, getrf_panel_slice, MAX_PANEL_COLS};
pub use getrf_pivot::{dgetrf_pivot_4, dgetrf_pivot_4_vs, dgetrf_pivot_8};
pub use getrf_pivot_vs8::dgetrf_pivot_8_vs;
pub use pivots::PivotSegment;
pub use rowsw::{drowsw, drowsw_in};
