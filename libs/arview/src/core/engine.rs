//! Contract for the external AR engine collaborator.
//!
//! The engine (camera capture, 6-DOF tracking, 3D rendering) is a black box
//! behind the [`ArEngine`] trait. The lifecycle runtime only sequences calls
//! against it; it never looks inside.

use std::sync::Arc;

use super::sensors::SensorsComponent;
use super::Result;

/// Screen rotation as reported by the host display.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ScreenRotation {
    #[default]
    Rotation0,
    Rotation90,
    Rotation180,
    Rotation270,
}

impl ScreenRotation {
    pub fn degrees(self) -> u32 {
        match self {
            Self::Rotation0 => 0,
            Self::Rotation90 => 90,
            Self::Rotation180 => 180,
            Self::Rotation270 => 270,
        }
    }
}

/// Rendering backend selector passed to renderer initialization.
///
/// The runtime always initializes with a fixed selector
/// ([`RenderBackend::OpenGlEs2`] by default); the engine decides what that
/// means internally.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RenderBackend {
    #[default]
    OpenGlEs2,
    OpenGlEs3,
}

/// Descriptor for one camera device, as enumerated by the engine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CameraDescriptor {
    pub id: String,
    pub name: String,
}

/// Opaque reference to a piece of scene geometry returned by a hit test.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct GeometryHandle(pub u64);

/// Caller-supplied sink for engine-originated events.
///
/// Registered with the engine once, right after the first successful renderer
/// initialization. All methods default to no-ops so callers implement only
/// what they care about.
pub trait EngineCallback: Send + Sync {
    /// The engine finished its internal startup and is ready for content.
    fn on_engine_ready(&self) {}

    /// An animation attached to a geometry ran to completion.
    fn on_animation_ended(&self, _geometry: GeometryHandle) {}
}

/// The opaque AR engine handle.
///
/// # Thread affinity
///
/// Lifecycle-facing operations (`start_camera`, `pause`, `resume`,
/// `set_screen_rotation`, `hit_test`, registration) are invoked from the UI
/// context. Render-facing operations (`initialize_renderer`,
/// `resize_renderer`, `render`, `reload_textures`) are invoked from the
/// dedicated render context against the same handle. Implementations must
/// tolerate that split, typically with an internal lock, and must not
/// assume `pause`/`resume` cannot overlap an in-flight `render` call.
pub trait ArEngine: Send + Sync {
    /// Enumerate available cameras, in the engine's preference order.
    fn camera_list(&self) -> Vec<CameraDescriptor>;

    fn start_camera(&self, camera: &CameraDescriptor) -> Result<()>;

    /// One-time handshake giving the engine a drawing target, size,
    /// orientation and backend. Idempotency is NOT guaranteed by the engine;
    /// callers gate re-entry themselves.
    fn initialize_renderer(
        &self,
        width: u32,
        height: u32,
        rotation: ScreenRotation,
        backend: RenderBackend,
    ) -> Result<()>;

    /// Resize the renderer viewport.
    fn resize_renderer(&self, width: u32, height: u32);

    /// Render one frame. Frame-rate-paced by the windowing layer.
    fn render(&self) -> Result<()>;

    /// Reload GPU textures after a renderer-preserving surface recreation.
    fn reload_textures(&self) -> Result<()>;

    /// Engine-wide suspend.
    fn pause(&self);

    /// Engine-wide continue.
    fn resume(&self);

    fn set_screen_rotation(&self, rotation: ScreenRotation);

    /// Map 2-D screen coordinates to the geometry rendered at that point,
    /// if any. With `touchable_only` set, only geometry marked touchable is
    /// considered.
    fn hit_test(&self, x: i32, y: i32, touchable_only: bool) -> Result<Option<GeometryHandle>>;

    fn register_sensors(&self, sensors: Arc<SensorsComponent>);

    fn register_callback(&self, callback: Arc<dyn EngineCallback>);
}

/// Constructs the engine handle from the application identity token.
pub trait ArEngineFactory: Send + Sync {
    fn create(&self, app_signature: &str) -> Result<Arc<dyn ArEngine>>;
}
