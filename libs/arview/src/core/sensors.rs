//! Sensor subsystem handle.
//!
//! Owned by the lifecycle controller, registered with the engine at Create,
//! and released deterministically at Destroy, strictly after the engine
//! handle is dropped.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// Handle on the device sensor subsystem (accelerometer, gyroscope,
/// magnetometer) the engine fuses for tracking.
pub struct SensorsComponent {
    callback_registered: AtomicBool,
    released: AtomicBool,
}

impl SensorsComponent {
    pub fn new() -> Arc<Self> {
        tracing::debug!("SensorsComponent created");
        Arc::new(Self {
            callback_registered: AtomicBool::new(true),
            released: AtomicBool::new(false),
        })
    }

    /// Detach the engine-facing callback. Called before `release` so no
    /// sensor event can reach a dying engine handle.
    pub fn unregister_callback(&self) {
        self.callback_registered.store(false, Ordering::Release);
    }

    /// Release the underlying sensor listeners. Idempotent.
    pub fn release(&self) {
        if self.released.swap(true, Ordering::AcqRel) {
            tracing::debug!("SensorsComponent::release called twice, ignoring");
            return;
        }
        debug_assert!(
            !self.callback_registered.load(Ordering::Acquire),
            "sensors released while the engine callback is still registered"
        );
        tracing::debug!("SensorsComponent released");
    }

    pub fn is_released(&self) -> bool {
        self.released.load(Ordering::Acquire)
    }

    pub fn callback_registered(&self) -> bool {
        self.callback_registered.load(Ordering::Acquire)
    }
}
