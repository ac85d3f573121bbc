//! # Lupanel Core
//!
//! Shared building blocks for the blocked LU panel kernels.
//!
//! This crate provides:
//! - **SIMD primitives**: scale, axpy, pivot search and the fused
//!   scale + rank-1 update + pivot search sweep used by every panel kernel.
//! - **Panel views**: `PanelMut`, a checked column-major view with a leading
//!   dimension, and its `PanelError`.
//! - **Scratch**: 64-byte aligned packing space, on the stack for small row
//!   counts and on the heap above `K_MAX_STACK`.
//! - **Compute detection**: cached CPU capabilities and the compiled backend.

#![cfg_attr(any(feature = "avx512", feature = "avx2"), feature(portable_simd))]

pub mod compute;
pub mod panel;
pub mod scratch;

// SIMD backend selection: std::simd with avx2/avx512 (nightly), lane arrays otherwise
#[cfg(any(feature = "avx512", feature = "avx2"))]
pub mod simd;
#[cfg(not(any(feature = "avx512", feature = "avx2")))]
#[path = "simd_lanes.rs"]
pub mod simd;

pub use compute::{check_backend, compiled_backend, ComputeCaps, SimdBackend};
pub use panel::{PanelError, PanelMut};
pub use scratch::{Scratch, StackScratch, K_MAX_STACK};
pub use simd::F64_LANES;
