//! Lifecycle controller.
//!
//! Runs on the UI context and drives activity-level transitions against the
//! engine handle, the sensor handle, the render surface and the optional
//! overlay. The ordering contract:
//!
//! - Create builds sensors, then the engine, then registers sensors with it.
//! - Start resets the surface slot, decides camera start from the paused
//!   flag, and builds a fresh surface + coordinator pair.
//! - Pause suspends the surface before pausing the engine.
//! - Resume resumes the engine, attaches surface and overlay exactly once
//!   (insertion order is compositing order), then resumes the surface.
//! - Stop clears the view stack, which tears the render context down before
//!   Destroy can touch the engine handle.
//! - Destroy releases the engine handle first, the sensor handle second.

use std::sync::Arc;

use super::config::ArViewConfig;
use super::coordinator::SurfaceCoordinator;
use super::delegates::ViewDelegates;
use super::display::HostDisplay;
use super::engine::{ArEngine, ArEngineFactory, RenderBackend};
use super::events::{TouchAction, TouchEvent};
use super::native::{NativeLibs, NATIVE_LIBS};
use super::sensors::SensorsComponent;
use super::surface::RenderSurface;
use super::views::{self, ContentView, View};
use super::{ArViewError, Result};

/// Activity lifecycle state, transitioned only by host-framework callbacks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActivityState {
    Created,
    Started,
    Resumed,
    Paused,
    Stopped,
    Destroyed,
}

/// Binds the host activity lifecycle to the AR engine.
///
/// All methods here run on the UI context. The controller is the single
/// writer for the engine and sensor handles' lifecycles; the render context
/// only invokes render-facing operations against the shared engine handle.
pub struct ArViewController {
    config: ArViewConfig,
    delegates: ViewDelegates,
    factory: Arc<dyn ArEngineFactory>,
    display: Arc<dyn HostDisplay>,
    native: &'static NativeLibs,

    state: Option<ActivityState>,
    /// Whether the activity is currently paused; read by the camera-start
    /// decision at start-time.
    paused: bool,
    finishing: bool,

    engine: Option<Arc<dyn ArEngine>>,
    sensors: Option<Arc<SensorsComponent>>,
    surface: Option<RenderSurface>,
    surface_view: Option<View>,
    coordinator: Option<Arc<SurfaceCoordinator>>,
    overlay: Option<View>,
    content: ContentView,
}

impl ArViewController {
    pub fn new(
        config: ArViewConfig,
        delegates: ViewDelegates,
        factory: Arc<dyn ArEngineFactory>,
        display: Arc<dyn HostDisplay>,
    ) -> Self {
        Self::with_native_libs(config, delegates, factory, display, &NATIVE_LIBS)
    }

    /// Like [`Self::new`] but with an explicit native-load state. Lets tests
    /// exercise the unavailable-libraries path without touching the
    /// process-global state.
    pub fn with_native_libs(
        config: ArViewConfig,
        delegates: ViewDelegates,
        factory: Arc<dyn ArEngineFactory>,
        display: Arc<dyn HostDisplay>,
        native: &'static NativeLibs,
    ) -> Self {
        Self {
            config,
            delegates,
            factory,
            display,
            native,
            state: None,
            paused: false,
            finishing: false,
            engine: None,
            sensors: None,
            surface: None,
            surface_view: None,
            coordinator: None,
            overlay: None,
            content: ContentView::new(),
        }
    }

    // =========================================================================
    // Lifecycle hooks (UI context)
    // =========================================================================

    /// Create: verify native prerequisites, build sensor and engine handles,
    /// inflate the overlay. A failure here terminates the activity gracefully
    /// ([`Self::is_finishing`] turns true); it never panics.
    pub fn on_create(&mut self) {
        tracing::debug!("ArViewController::on_create");
        debug_assert!(self.state.is_none(), "on_create called twice");

        self.engine = None;
        self.surface = None;

        if let Err(e) = self.create_inner() {
            tracing::error!("on_create: failed to create or initialize the engine: {e}");
            self.finish();
            return;
        }
        self.state = Some(ActivityState::Created);
    }

    fn create_inner(&mut self) -> Result<()> {
        if !self.native.load_default() {
            return Err(ArViewError::NativeUnavailable(
                "unsupported platform, failed to load the native libs".into(),
            ));
        }

        let sensors = SensorsComponent::new();
        self.sensors = Some(Arc::clone(&sensors));

        let engine = self.factory.create(&self.config.app_signature)?;
        engine.register_sensors(sensors);
        self.engine = Some(engine);

        if let Some(layout) = self.delegates.overlay_layout {
            match views::inflate(layout) {
                Some(view) => self.overlay = Some(view),
                None => {
                    tracing::error!("error inflating the given overlay layout: {layout:?}");
                }
            }
        }
        Ok(())
    }

    /// Start: install an empty root, run the camera policy unless resuming
    /// from pause, and build a fresh surface/coordinator pair.
    pub fn on_start(&mut self) {
        tracing::debug!("ArViewController::on_start");
        debug_assert!(
            self.state != Some(ActivityState::Destroyed),
            "on_start after destroy"
        );
        if self.finishing {
            return;
        }

        self.surface = None;
        self.surface_view = None;
        self.coordinator = None;
        self.content.install_empty();

        // Camera starts only on a cold start; a restart while paused keeps
        // the camera that is already running.
        if !self.paused {
            self.start_camera();
        }

        let Some(engine) = self.engine.as_ref().map(Arc::clone) else {
            tracing::error!("on_start: no engine handle, skipping surface creation");
            return;
        };

        let (width, height) = self.display.surface_size();
        let surface = match RenderSurface::new(width, height, self.config.frame_interval()) {
            Ok(surface) => surface,
            Err(e) => {
                tracing::error!("error creating views: {e}");
                return;
            }
        };

        let coordinator = SurfaceCoordinator::new(
            engine,
            Arc::clone(&self.display),
            RenderBackend::default(),
            self.delegates.engine_callback.clone(),
            Arc::clone(&self.delegates.content_loader),
            surface.task_queue(),
        );
        let sink: Arc<dyn super::surface::SurfaceEventSink> = coordinator.clone();
        surface.register_sink(sink);
        surface.set_keep_screen_on(true);
        // Touch events reach this surface through on_touch below.

        self.surface_view = Some(View::surface());
        self.surface = Some(surface);
        self.coordinator = Some(coordinator);
        self.state = Some(ActivityState::Started);
    }

    /// Pause: suspend the surface's rendering context first, then pause the
    /// engine, so no frame is drawn against a half-paused engine.
    pub fn on_pause(&mut self) {
        tracing::debug!("ArViewController::on_pause");
        if let Some(surface) = &self.surface {
            surface.on_pause();
        }
        self.paused = true;
        debug_assert!(self.engine.is_some(), "on_pause before engine creation");
        if let Some(engine) = &self.engine {
            engine.pause();
        }
        self.state = Some(ActivityState::Paused);
    }

    /// Resume: resume the engine, attach surface and overlay on first resume
    /// (idempotent), then resume the surface's own execution.
    pub fn on_resume(&mut self) {
        tracing::debug!("ArViewController::on_resume");
        debug_assert!(self.engine.is_some(), "on_resume before engine creation");
        if let Some(engine) = &self.engine {
            engine.resume();
        }
        self.paused = false;

        if let (Some(surface), Some(view)) = (&self.surface, &self.surface_view) {
            if !self.content.is_attached(view.id()) {
                // The windowing layer composites by insertion order, so the
                // surface must go in before the overlay to end up below it.
                tracing::debug!("on_resume: attaching render surface to the content view");
                self.content.attach(view.clone());
                surface.set_media_overlay(true);

                if let Some(overlay) = &self.overlay {
                    if !self.content.is_attached(overlay.id()) {
                        self.content.attach(overlay.clone());
                        self.content.bring_to_front(overlay.id());
                    }
                }

                surface.notify_attached();
            }
            surface.on_resume();
        }
        self.state = Some(ActivityState::Resumed);
    }

    /// Stop: clear the view stack. Dropping the surface shuts its render
    /// context down and joins the thread deterministically.
    pub fn on_stop(&mut self) {
        tracing::debug!("ArViewController::on_stop");
        if self.surface.is_some() {
            self.content.remove_all();
        }
        self.surface = None;
        self.surface_view = None;
        self.coordinator = None;
        self.state = Some(ActivityState::Stopped);
    }

    /// Destroy: release the engine handle, then unregister and release the
    /// sensor handle, then unbind view associations. Safe to call even when
    /// Create failed partway.
    pub fn on_destroy(&mut self) {
        tracing::debug!("ArViewController::on_destroy");
        if let Some(engine) = self.engine.take() {
            drop(engine);
            tracing::debug!("engine handle released");
        }

        if let Some(sensors) = self.sensors.take() {
            tracing::debug!("releasing sensors");
            sensors.unregister_callback();
            sensors.release();
        }

        self.content.unbind();
        self.overlay = None;
        self.state = Some(ActivityState::Destroyed);
    }

    /// Configuration change (rotation): query the display and forward.
    /// Idempotent; no state transition.
    pub fn on_configuration_changed(&self) {
        let rotation = self.display.rotation();
        debug_assert!(
            self.engine.is_some(),
            "configuration change before engine creation"
        );
        if let Some(engine) = &self.engine {
            engine.set_screen_rotation(rotation);
        }
        tracing::debug!("configuration changed: {rotation:?}");
    }

    /// Pointer input. Hit-tests touchable geometry on release only and
    /// dispatches the touched-geometry delegate. Always consumes the event.
    pub fn on_touch(&self, event: &TouchEvent) -> bool {
        if event.action == TouchAction::Up {
            tracing::debug!("touched at ({}, {})", event.x, event.y);
            if let Some(engine) = &self.engine {
                match engine.hit_test(event.x, event.y, true) {
                    Ok(Some(geometry)) => {
                        tracing::debug!("geometry found: {geometry:?}");
                        (self.delegates.touch_handler)(geometry);
                    }
                    Ok(None) => {}
                    Err(e) => tracing::error!("on_touch: {e}"),
                }
            }
        }
        true
    }

    /// Diagnostic hook; logs and forwards to the coordinator.
    pub fn on_low_memory(&self) {
        tracing::error!("low memory");
        if let Some(coordinator) = &self.coordinator {
            coordinator.on_low_memory();
        }
    }

    // =========================================================================
    // Camera-start policy
    // =========================================================================

    /// Start the camera chosen by the camera-selector delegate. A device
    /// without cameras logs a warning and continues; this is not fatal.
    fn start_camera(&self) {
        let Some(engine) = &self.engine else {
            return;
        };
        let cameras = engine.camera_list();
        match (self.delegates.camera_selector)(&cameras) {
            Some(camera) => {
                tracing::info!("starting camera {}", camera.id);
                if let Err(e) = engine.start_camera(&camera) {
                    tracing::error!("failed to start camera {}: {e}", camera.id);
                }
            }
            None => tracing::warn!("no camera found on the device"),
        }
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    pub fn state(&self) -> Option<ActivityState> {
        self.state
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }

    /// True after a fatal setup failure; the host should tear the activity
    /// down without calling further lifecycle hooks.
    pub fn is_finishing(&self) -> bool {
        self.finishing
    }

    pub fn engine(&self) -> Option<&Arc<dyn ArEngine>> {
        self.engine.as_ref()
    }

    pub fn surface(&self) -> Option<&RenderSurface> {
        self.surface.as_ref()
    }

    pub fn content_view(&self) -> &ContentView {
        &self.content
    }

    fn finish(&mut self) {
        self.finishing = true;
    }
}
