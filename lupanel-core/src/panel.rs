//! Checked column-major panel view.
//!
//! The raw kernels take `(rows, a, lda)` the LAPACK way. `PanelMut` is the
//! validated form of the same triple, built once at the public entry point.

use thiserror::Error;

/// Why a slice cannot be viewed as a panel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum PanelError {
    #[error("leading dimension {ld} is smaller than max(1, rows = {rows})")]
    LeadingDim { ld: usize, rows: usize },

    #[error("panel {rows}x{cols} with ld {ld} needs {required} elements, storage holds {len}")]
    StorageTooShort {
        rows: usize,
        cols: usize,
        ld: usize,
        required: usize,
        len: usize,
    },
}

/// Mutable `rows x cols` column-major view with leading dimension `ld`.
///
/// Element `(i, j)` lives at `data[i + j * ld]`.
#[derive(Debug)]
pub struct PanelMut<'a> {
    data: &'a mut [f64],
    rows: usize,
    cols: usize,
    ld: usize,
}

impl<'a> PanelMut<'a> {
    pub fn new(data: &'a mut [f64], rows: usize, cols: usize, ld: usize) -> Result<Self, PanelError> {
        if ld < rows.max(1) {
            return Err(PanelError::LeadingDim { ld, rows });
        }
        let required = Self::required_len(rows, cols, ld);
        if data.len() < required {
            return Err(PanelError::StorageTooShort {
                rows,
                cols,
                ld,
                required,
                len: data.len(),
            });
        }
        Ok(Self { data, rows, cols, ld })
    }

    /// Minimum storage length for a `rows x cols` panel with leading dimension `ld`.
    #[inline]
    pub fn required_len(rows: usize, cols: usize, ld: usize) -> usize {
        if rows == 0 || cols == 0 {
            0
        } else {
            (cols - 1) * ld + rows
        }
    }

    #[inline]
    pub fn rows(&self) -> usize {
        self.rows
    }

    #[inline]
    pub fn cols(&self) -> usize {
        self.cols
    }

    #[inline]
    pub fn ld(&self) -> usize {
        self.ld
    }

    /// Element `(i, j)`, or `None` outside the panel.
    #[inline]
    pub fn get(&self, i: usize, j: usize) -> Option<f64> {
        if i < self.rows && j < self.cols {
            Some(self.data[i + j * self.ld])
        } else {
            None
        }
    }

    /// Whole backing storage, including padding rows between columns.
    #[inline]
    pub fn as_slice(&self) -> &[f64] {
        &*self.data
    }

    #[inline]
    pub fn as_mut_slice(&mut self) -> &mut [f64] {
        &mut *self.data
    }
}
