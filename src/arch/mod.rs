//! Backend selection and CPU capability checks.
//!
//! The crate compiles exactly one kernel backend:
//!
//! - **Native** — x86_64 SSE2/SSSE3/SSE4 intrinsics, selected when the
//!   `native-intrinsics` feature is enabled on an x86_64 target.
//! - **Portable** — scalar lane loops, selected everywhere else. This is the
//!   reference implementation; the native kernels must agree with it bit for
//!   bit on every input.
//!
//! Selection happens at compile time via `cfg`, so there is no per-call
//! dispatch cost. [`verify_cpu_support`] exists for the native build: the
//! intrinsics assume SSE4.2, and a host started on an older CPU should find
//! out at startup rather than fault mid-computation.

pub(crate) mod kernels;

/// Which kernel backend this build of the crate carries.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Backend {
    /// x86_64 SSE2/SSSE3/SSE4 intrinsics.
    Native,
    /// Scalar lane loops, any target.
    Portable,
}

impl Backend {
    /// Returns the backend compiled into this build.
    pub const fn active() -> Backend {
        #[cfg(all(target_arch = "x86_64", feature = "native-intrinsics"))]
        {
            Backend::Native
        }
        #[cfg(not(all(target_arch = "x86_64", feature = "native-intrinsics")))]
        {
            Backend::Portable
        }
    }

    /// Human-readable description of the backend.
    pub fn description(self) -> &'static str {
        match self {
            Backend::Native => "native (x86_64 SSE2/SSSE3/SSE4, 128-bit)",
            Backend::Portable => "portable (scalar lane loops, 128-bit)",
        }
    }
}

/// Checks that the running CPU supports the compiled backend.
///
/// Always `true` for the portable backend. For the native backend this
/// queries the CPU for SSE4.2 (the highest ISA level the kernels reach for)
/// and logs a warning when it is missing.
///
/// Set `LANES128_ASSUME_CPU=1` to skip the query, e.g. under an emulator
/// whose feature reporting is unreliable.
pub fn verify_cpu_support() -> bool {
    if matches!(Backend::active(), Backend::Portable) {
        return true;
    }

    if std::env::var("LANES128_ASSUME_CPU").map(|v| v == "1").unwrap_or(false) {
        log::info!("LANES128_ASSUME_CPU=1: skipping CPU feature verification");
        return true;
    }

    #[cfg(target_arch = "x86_64")]
    {
        let ok = is_x86_feature_detected!("sse4.2");
        if ok {
            log::debug!("backend: {}", Backend::active().description());
        } else {
            log::warn!(
                "native-intrinsics backend compiled in, but this CPU lacks SSE4.2; \
                 rebuild without the feature or run on newer hardware"
            );
        }
        ok
    }

    #[cfg(not(target_arch = "x86_64"))]
    {
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn active_backend_matches_build() {
        let backend = Backend::active();
        if cfg!(all(target_arch = "x86_64", feature = "native-intrinsics")) {
            assert_eq!(backend, Backend::Native);
        } else {
            assert_eq!(backend, Backend::Portable);
        }
        assert!(!backend.description().is_empty());
    }

    #[test]
    fn portable_build_always_supported() {
        if Backend::active() == Backend::Portable {
            assert!(verify_cpu_support());
        }
    }
}
