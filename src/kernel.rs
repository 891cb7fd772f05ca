//! Exclusive access to the geometry kernel.
//!
//! The kernel owns the glyph outline cache and is not reentrant: a request
//! holds the [`KernelHandle`] lock for the whole of its layer construction.
//! A [`Kernel`] can only be reached through a handle, and every generator made
//! with [`SignGenerator::new`](crate::generator::SignGenerator::new) uses the
//! one [`KernelHandle::shared`] kernel, so at most one construction runs in the
//! process at a time. Sizing, weight mapping and prediction never touch it.

use crate::errors::GenerationError;
use crate::float_types::Real;
use crate::font::face::GlyphCache;
use crate::mesh::Mesh;
use crate::sketch::Sketch;
use crate::sketch::text::TextLayout;
use log::{debug, warn};
use std::panic::{self, AssertUnwindSafe};
use std::sync::{Arc, Mutex, MutexGuard, OnceLock, PoisonError, TryLockError};

/// Counters describing what the kernel has done since it was created.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct KernelStats {
    pub requests: u64,
    pub extrusions: u64,
    pub failures: u64,
}

#[derive(Debug)]
pub struct Kernel {
    glyphs: GlyphCache,
    stats: KernelStats,
}

impl Kernel {
    pub(crate) fn new() -> Self {
        Self {
            glyphs: GlyphCache::new(),
            stats: KernelStats::default(),
        }
    }

    pub const fn stats(&self) -> KernelStats {
        self.stats
    }

    /// Number of glyph outlines currently cached.
    pub fn cached_glyphs(&self) -> usize {
        self.glyphs.len()
    }

    /// Rounded plate outline centred on the origin.
    pub fn plate_profile(
        &mut self,
        width: Real,
        height: Real,
        corner_radius: Real,
        corner_segments: usize,
    ) -> Sketch {
        Sketch::rounded_rectangle(width, height, corner_radius, corner_segments)
    }

    /// Text outline centred on the origin.
    pub fn text_profile<S: AsRef<str>>(&mut self, lines: &[S], layout: &TextLayout) -> Sketch {
        Sketch::text(lines, layout, &mut self.glyphs)
    }

    pub fn extrude(
        &mut self,
        operation: &'static str,
        profile: &Sketch,
        z0: Real,
        height: Real,
    ) -> Result<Mesh, GenerationError> {
        self.stats.extrusions += 1;
        profile
            .extrude(z0, height)
            .map_err(|err| GenerationError::GeometryOperationFailed {
                operation,
                details: err.to_string(),
            })
    }

    /// Run one request against the kernel. A panic inside `f` is reported as
    /// [`GenerationError::GeometryOperationFailed`] for `operation`.
    pub fn run<T>(
        &mut self,
        operation: &'static str,
        f: impl FnOnce(&mut Kernel) -> Result<T, GenerationError>,
    ) -> Result<T, GenerationError> {
        self.stats.requests += 1;
        let result = match panic::catch_unwind(AssertUnwindSafe(|| f(self))) {
            Ok(result) => result,
            Err(payload) => {
                let details = payload
                    .downcast_ref::<&str>()
                    .map(|s| s.to_string())
                    .or_else(|| payload.downcast_ref::<String>().cloned())
                    .unwrap_or_else(|| "kernel panicked".to_string());
                warn!("geometry kernel panicked during {operation}: {details}");
                Err(GenerationError::GeometryOperationFailed { operation, details })
            },
        };
        if result.is_err() {
            self.stats.failures += 1;
        }
        result
    }
}

static SHARED: OnceLock<KernelHandle> = OnceLock::new();

/// Shared, cloneable handle to one [`Kernel`].
#[derive(Debug, Clone)]
pub struct KernelHandle(Arc<Mutex<Kernel>>);

impl Default for KernelHandle {
    fn default() -> Self {
        Self::shared()
    }
}

impl KernelHandle {
    /// The process-wide kernel.
    pub fn shared() -> Self {
        SHARED.get_or_init(Self::new).clone()
    }

    /// A kernel of its own, with separate caches and counters. Builds on it
    /// are not serialized against builds on the shared kernel.
    pub fn new() -> Self {
        Self(Arc::new(Mutex::new(Kernel::new())))
    }

    /// `true` when both handles reach the same kernel.
    pub fn same_kernel(&self, other: &KernelHandle) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }

    /// Block until the kernel is free and take it. A lock poisoned by an
    /// earlier panic is taken over: the kernel only holds caches and counters.
    pub fn acquire(&self) -> MutexGuard<'_, Kernel> {
        let guard = self.0.lock().unwrap_or_else(PoisonError::into_inner);
        debug!("geometry kernel acquired");
        guard
    }

    /// Take the kernel only if nobody else holds it.
    pub fn try_acquire(&self) -> Option<MutexGuard<'_, Kernel>> {
        match self.0.try_lock() {
            Ok(guard) => Some(guard),
            Err(TryLockError::Poisoned(poisoned)) => Some(poisoned.into_inner()),
            Err(TryLockError::WouldBlock) => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn panics_become_geometry_errors() {
        let mut kernel = Kernel::new();
        let result: Result<(), _> = kernel.run("test op", |_| panic!("boom"));
        match result {
            Err(GenerationError::GeometryOperationFailed { operation, details }) => {
                assert_eq!(operation, "test op");
                assert_eq!(details, "boom");
            },
            other => panic!("unexpected {other:?}"),
        }
        assert_eq!(kernel.stats().failures, 1);
    }

    #[test]
    fn poisoned_handle_is_recovered() {
        let handle = KernelHandle::new();
        let clone = handle.clone();
        let _ = std::thread::spawn(move || {
            let _guard = clone.acquire();
            panic!("poison the lock");
        })
        .join();
        assert_eq!(handle.acquire().stats(), KernelStats::default());
    }

    #[test]
    fn shared_handles_reach_one_kernel() {
        assert!(KernelHandle::shared().same_kernel(&KernelHandle::default()));
        assert!(!KernelHandle::new().same_kernel(&KernelHandle::shared()));
    }
}
