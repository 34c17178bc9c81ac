//! Injected extension points.
//!
//! What the original design expressed as subclass overrides is a bundle of
//! function-valued fields passed at construction. The controller and the
//! surface coordinator dispatch through these instead of virtual calls.

use std::fmt;
use std::sync::Arc;

use super::engine::{ArEngine, CameraDescriptor, EngineCallback, GeometryHandle};
use super::views::LayoutId;

/// Application-specific scene setup. Invoked exactly once per renderer
/// initialization, on the render context, after the drawing target exists.
pub type ContentLoader = Arc<dyn Fn(&dyn ArEngine) + Send + Sync>;

/// Invoked on the UI context when a touchable geometry is hit.
pub type TouchHandler = Arc<dyn Fn(GeometryHandle) + Send + Sync>;

/// Camera-selection policy over the engine's enumeration. Returning `None`
/// means "run without a camera".
pub type CameraSelector = Arc<dyn Fn(&[CameraDescriptor]) -> Option<CameraDescriptor> + Send + Sync>;

/// Default policy: start the first camera found.
pub fn default_camera_selector() -> CameraSelector {
    Arc::new(|cameras| cameras.first().cloned())
}

/// Caller-supplied behavior bundle for one activity.
pub struct ViewDelegates {
    /// Overlay layout to inflate at Create, if any.
    pub overlay_layout: Option<LayoutId>,

    /// Engine event sink, registered after the first renderer init, if any.
    pub engine_callback: Option<Arc<dyn EngineCallback>>,

    pub content_loader: ContentLoader,

    pub touch_handler: TouchHandler,

    pub camera_selector: CameraSelector,
}

impl ViewDelegates {
    pub fn new() -> Self {
        Self {
            overlay_layout: None,
            engine_callback: None,
            content_loader: Arc::new(|_| {}),
            touch_handler: Arc::new(|_| {}),
            camera_selector: default_camera_selector(),
        }
    }

    pub fn with_overlay_layout(mut self, layout: LayoutId) -> Self {
        self.overlay_layout = Some(layout);
        self
    }

    pub fn with_engine_callback(mut self, callback: Arc<dyn EngineCallback>) -> Self {
        self.engine_callback = Some(callback);
        self
    }

    pub fn with_content_loader(
        mut self,
        loader: impl Fn(&dyn ArEngine) + Send + Sync + 'static,
    ) -> Self {
        self.content_loader = Arc::new(loader);
        self
    }

    pub fn with_touch_handler(
        mut self,
        handler: impl Fn(GeometryHandle) + Send + Sync + 'static,
    ) -> Self {
        self.touch_handler = Arc::new(handler);
        self
    }

    pub fn with_camera_selector(
        mut self,
        selector: impl Fn(&[CameraDescriptor]) -> Option<CameraDescriptor> + Send + Sync + 'static,
    ) -> Self {
        self.camera_selector = Arc::new(selector);
        self
    }
}

impl Default for ViewDelegates {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for ViewDelegates {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ViewDelegates")
            .field("overlay_layout", &self.overlay_layout)
            .field("engine_callback", &self.engine_callback.is_some())
            .finish_non_exhaustive()
    }
}
