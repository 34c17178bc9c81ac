//! Render surface coordinator.
//!
//! Translates surface lifecycle notifications (delivered on the render
//! context) into engine renderer calls, guaranteeing:
//!
//! - renderer initialization exactly once per surface instance, gated by an
//!   atomic init flag that is never reset for that instance's lifetime
//! - the deferred content-load task enqueued exactly once per initialization,
//!   running on the render context after init and before the next frame
//! - texture reload instead of re-init when the surface is recreated with
//!   the native renderer preserved
//! - per-frame failures logged and contained, never terminating the loop

use parking_lot::Mutex;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use super::delegates::ContentLoader;
use super::display::HostDisplay;
use super::engine::{ArEngine, EngineCallback, RenderBackend};
use super::surface::{SurfaceEventSink, SurfaceTaskQueue};

/// Callback sink for one render surface instance.
///
/// A fresh coordinator is built for every surface; the init flag's
/// association expires with the instance.
pub struct SurfaceCoordinator {
    engine: Arc<dyn ArEngine>,
    display: Arc<dyn HostDisplay>,
    backend: RenderBackend,
    engine_callback: Option<Arc<dyn EngineCallback>>,
    content_loader: ContentLoader,
    /// True once renderer initialization has succeeded. Never cleared.
    renderer_initialized: AtomicBool,
    /// Queue into the render context; dropped when the surface is destroyed.
    tasks: Mutex<Option<SurfaceTaskQueue>>,
}

impl SurfaceCoordinator {
    pub fn new(
        engine: Arc<dyn ArEngine>,
        display: Arc<dyn HostDisplay>,
        backend: RenderBackend,
        engine_callback: Option<Arc<dyn EngineCallback>>,
        content_loader: ContentLoader,
        tasks: SurfaceTaskQueue,
    ) -> Arc<Self> {
        Arc::new(Self {
            engine,
            display,
            backend,
            engine_callback,
            content_loader,
            renderer_initialized: AtomicBool::new(false),
            tasks: Mutex::new(Some(tasks)),
        })
    }

    pub fn renderer_initialized(&self) -> bool {
        self.renderer_initialized.load(Ordering::Acquire)
    }

    /// Diagnostic hook; no state effect.
    pub fn on_low_memory(&self) {
        tracing::error!("low memory notification received");
    }

    fn initialize_renderer(&self, width: u32, height: u32) {
        let rotation = self.display.rotation();
        tracing::debug!(
            "initializing renderer: {width}x{height}, rotation {:?}, backend {:?}",
            rotation,
            self.backend
        );
        if let Err(e) = self
            .engine
            .initialize_renderer(width, height, rotation, self.backend)
        {
            tracing::error!("renderer initialization failed: {e}");
            return;
        }
        self.renderer_initialized.store(true, Ordering::Release);

        if let Some(callback) = &self.engine_callback {
            self.engine.register_callback(Arc::clone(callback));
        }

        // Queue content loading behind the current event so rendering can
        // start; it still runs before the next frame is drawn.
        let engine = Arc::clone(&self.engine);
        let loader = Arc::clone(&self.content_loader);
        let queued = match self.tasks.lock().as_ref() {
            Some(queue) => {
                queue.queue_event(Box::new(move || loader(engine.as_ref())));
                true
            }
            None => false,
        };
        if !queued {
            tracing::error!("surface gone before content loading could be queued");
        }
    }
}

impl SurfaceEventSink for SurfaceCoordinator {
    fn on_surface_created(&self, width: u32, height: u32) {
        if !self.renderer_initialized() {
            self.initialize_renderer(width, height);
        } else {
            // Renderer survived the surface recreation; GPU-side textures
            // did not. No resize is synthesized here; the host sends a
            // separate changed notification when dimensions differ.
            tracing::debug!("surface recreated, reloading textures");
            if let Err(e) = self.engine.reload_textures() {
                tracing::error!("texture reload failed: {e}");
            }
        }
    }

    fn on_surface_changed(&self, width: u32, height: u32) {
        tracing::debug!("surface changed: {width}x{height}");
        self.engine.resize_renderer(width, height);
    }

    fn on_draw_frame(&self) {
        // A failed frame must not take the rendering loop down with it.
        if let Err(e) = self.engine.render() {
            tracing::error!("rendering failed: {e}");
        }
    }

    fn on_surface_destroyed(&self) {
        tracing::debug!("surface destroyed, dropping render queue handle");
        *self.tasks.lock() = None;
    }
}
