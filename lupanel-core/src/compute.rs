//! Hardware capabilities and the compiled SIMD backend.
//!
//! Backend choice is compile-time only. This module reports which one was
//! built in and whether the running CPU can actually execute it.

use std::sync::OnceLock;

/// Detected compute capabilities of the current hardware.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ComputeCaps {
    pub avx2: bool,
    pub fma: bool,
    pub avx512f: bool,
}

static CAPS: OnceLock<ComputeCaps> = OnceLock::new();
static BACKEND_OK: OnceLock<bool> = OnceLock::new();

/// Detect hardware capabilities (cached after first call).
pub fn detect() -> &'static ComputeCaps {
    CAPS.get_or_init(|| {
        #[cfg(target_arch = "x86_64")]
        {
            ComputeCaps {
                avx2: is_x86_feature_detected!("avx2"),
                fma: is_x86_feature_detected!("fma"),
                avx512f: is_x86_feature_detected!("avx512f"),
            }
        }
        #[cfg(not(target_arch = "x86_64"))]
        {
            ComputeCaps::default()
        }
    })
}

/// Lane backend compiled into `simd`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum SimdBackend {
    /// Stable fixed-size lane arrays, vectorized by LLVM
    #[default]
    Lanes,
    /// `std::simd` f64x4
    Avx2,
    /// `std::simd` f64x8
    Avx512,
}

impl SimdBackend {
    /// Rows batched per step.
    pub fn lanes(self) -> usize {
        match self {
            SimdBackend::Lanes | SimdBackend::Avx2 => 4,
            SimdBackend::Avx512 => 8,
        }
    }

    /// Whether `caps` can run code built for this backend.
    pub fn supported_by(self, caps: &ComputeCaps) -> bool {
        match self {
            SimdBackend::Lanes => true,
            SimdBackend::Avx2 => caps.avx2,
            SimdBackend::Avx512 => caps.avx512f,
        }
    }
}

/// The backend selected by Cargo features at build time.
pub const fn compiled_backend() -> SimdBackend {
    if cfg!(feature = "avx512") {
        SimdBackend::Avx512
    } else if cfg!(feature = "avx2") {
        SimdBackend::Avx2
    } else {
        SimdBackend::Lanes
    }
}

/// Check the compiled backend against the running CPU.
///
/// Logs a warning the first time an unsupported backend is seen; later
/// calls return the cached answer silently.
pub fn check_backend() -> bool {
    *BACKEND_OK.get_or_init(|| {
        let backend = compiled_backend();
        let caps = detect();
        let ok = backend.supported_by(caps);
        if !ok {
            log::warn!(
                target: "lupanel",
                "compiled SIMD backend {:?} is not supported by this CPU ({:?})",
                backend,
                caps
            );
        }
        ok
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    #[cfg_attr(miri, ignore)]
    fn test_detect_is_cached() {
        let a = detect() as *const ComputeCaps;
        let b = detect() as *const ComputeCaps;
        assert_eq!(a, b);
    }

    #[test]
    fn test_compiled_backend_matches_lane_count() {
        assert_eq!(compiled_backend().lanes(), crate::simd::F64_LANES);
    }

    #[test]
    fn test_backend_support_rules() {
        let none = ComputeCaps::default();
        assert!(SimdBackend::Lanes.supported_by(&none));
        assert!(!SimdBackend::Avx2.supported_by(&none));
        assert!(!SimdBackend::Avx512.supported_by(&none));

        let caps = ComputeCaps {
            avx2: true,
            fma: true,
            avx512f: false,
        };
        assert!(SimdBackend::Avx2.supported_by(&caps));
        assert!(!SimdBackend::Avx512.supported_by(&caps));
    }

    #[test]
    #[cfg_attr(miri, ignore)]
    fn test_check_backend_stable() {
        assert_eq!(check_backend(), check_backend());
        if compiled_backend() == SimdBackend::Lanes {
            assert!(check_backend());
        }
    }
}
