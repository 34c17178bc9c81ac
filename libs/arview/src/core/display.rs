//! Host display queries.
//!
//! Rotation and surface dimensions come from the host windowing layer. The
//! controller reads them at Create time and on configuration changes; the
//! surface coordinator reads the rotation during renderer initialization.

use parking_lot::Mutex;
use std::sync::Arc;

use super::engine::ScreenRotation;

pub trait HostDisplay: Send + Sync {
    /// Current screen rotation.
    fn rotation(&self) -> ScreenRotation;

    /// Pixel dimensions of the drawable surface.
    fn surface_size(&self) -> (u32, u32);
}

/// Fixed-size display whose rotation can be updated by the host. Suitable for
/// tests and headless hosts.
pub struct StaticDisplay {
    rotation: Mutex<ScreenRotation>,
    size: (u32, u32),
}

impl StaticDisplay {
    pub fn new(width: u32, height: u32) -> Arc<Self> {
        Arc::new(Self {
            rotation: Mutex::new(ScreenRotation::default()),
            size: (width, height),
        })
    }

    pub fn set_rotation(&self, rotation: ScreenRotation) {
        *self.rotation.lock() = rotation;
    }
}

impl HostDisplay for StaticDisplay {
    fn rotation(&self) -> ScreenRotation {
        *self.rotation.lock()
    }

    fn surface_size(&self) -> (u32, u32) {
        self.size
    }
}
