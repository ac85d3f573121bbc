use lupanel_core::PanelError;
use thiserror::Error;

/// Rejected `getrf_panel` arguments. Singular columns are not errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum LuError {
    #[error("panel has {cols} columns, the panel kernels handle at most 8")]
    TooWide { cols: usize },

    #[error("{name} holds {len} entries but {required} pivots are produced")]
    OutputTooShort {
        name: &'static str,
        len: usize,
        required: usize,
    },

    #[error(transparent)]
    Panel(#[from] PanelError),
}
