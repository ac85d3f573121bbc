// BLAS-style signatures: the dimension and leading-dimension parameters are inherent.
#![allow(clippy::too_many_arguments)]

//! # Lupanel BLAS
//!
//! The small BLAS pieces the 8-wide LU panel driver calls across its
//! 4-column boundary:
//!
//! - **pack**: `dpack` / `dunpack`, panel columns to and from contiguous
//!   scratch blocks.
//! - **Level 3**: `dtrsm_llnu` (unit-lower triangular solve, at most 4 rows)
//!   and `dgemm_nn_sub` (`C -= A * B` rank-k update).
//!
//! ```
//! use lupanel_blas::level3;
//!
//! // L = [[1, 0], [0.5, 1]], B = [2, 3]^T  ->  X = [2, 2]^T
//! let l = [1.0, 0.5, 0.0, 1.0];
//! let mut b = [2.0, 3.0];
//! level3::dtrsm_llnu(2, 1, &l, 2, &[true; 2], &mut b, 2);
//! assert_eq!(b, [2.0, 2.0]);
//! ```

pub mod level3;
pub mod pack;

pub use level3::{dgemm_nn_sub, dtrsm_llnu};
pub use pack::{dpack, dunpack};
