//! One-time native-library readiness.
//!
//! The engine's native libraries are loaded exactly once per process. The
//! attempt is guarded by `OnceLock`: the first call records the outcome, all
//! later calls observe it. The Create step reads the readiness signal and
//! fails fast when the libraries are unavailable.

use std::sync::OnceLock;

/// Process-wide one-time load state for the native engine libraries.
pub struct NativeLibs {
    state: OnceLock<bool>,
}

impl NativeLibs {
    pub const fn new() -> Self {
        Self {
            state: OnceLock::new(),
        }
    }

    /// Run the loader if no attempt has been recorded yet and return the
    /// recorded outcome. The first caller wins; later loaders are ignored.
    pub fn load_with(&self, loader: impl FnOnce() -> bool) -> bool {
        *self.state.get_or_init(|| {
            let ok = loader();
            if ok {
                tracing::info!("native engine libraries loaded");
            } else {
                tracing::error!("failed to load the native engine libraries");
            }
            ok
        })
    }

    /// Record a successful load. The engine crate links its native code at
    /// build time, so reaching this call is the readiness signal itself.
    pub fn load_default(&self) -> bool {
        self.load_with(|| true)
    }

    /// Readiness signal. `false` until a load attempt has been recorded.
    pub fn loaded(&self) -> bool {
        self.state.get().copied().unwrap_or(false)
    }
}

impl Default for NativeLibs {
    fn default() -> Self {
        Self::new()
    }
}

/// The process-global load state used by default-constructed controllers.
pub static NATIVE_LIBS: NativeLibs = NativeLibs::new();
