//! Lifecycle-coordination runtime for an externally supplied AR engine.
//!
//! Binds a host UI framework's activity lifecycle (create / start / resume /
//! pause / stop / destroy, configuration change, touch input) to an opaque
//! augmented-reality engine accessed through the [`ArEngine`] trait. The
//! engine itself (camera capture, 6-DOF tracking, 3D rendering) is a black
//! box; this crate owns only the ordering contract between the UI context and
//! the dedicated render context:
//!
//! - exactly-once renderer initialization per surface instance
//! - deferred content loading on the render context, after init, before the
//!   next frame
//! - surface-before-engine pause ordering, engine-before-surface resume
//! - insertion-ordered view stacking (surface below overlay)
//! - deterministic teardown with no reliance on a collector pass
//!
//! # Example
//!
//! ```ignore
//! use arview::{ArViewConfig, ArViewController, StaticDisplay, ViewDelegates};
//!
//! let delegates = ViewDelegates::new()
//!     .with_content_loader(|engine| { /* load 3D models */ })
//!     .with_touch_handler(|geometry| println!("touched {geometry:?}"));
//!
//! let mut controller = ArViewController::new(
//!     ArViewConfig::default(),
//!     delegates,
//!     engine_factory,
//!     StaticDisplay::new(1080, 1920),
//! );
//!
//! controller.on_create();
//! controller.on_start();
//! controller.on_resume();
//! // ... host drives the remaining lifecycle hooks ...
//! ```

pub mod core;

pub use core::{
    ActivityState, ArEngine, ArEngineFactory, ArViewConfig, ArViewController, ArViewError,
    CameraDescriptor, ContentView, EngineCallback, GeometryHandle, HostDisplay, LayoutId,
    NativeLibs, RenderBackend, RenderSurface, Result, ScreenRotation, SensorsComponent,
    StaticDisplay, SurfaceCoordinator, SurfaceEventSink, SurfaceTaskQueue, TouchAction,
    TouchEvent, View, ViewDelegates, ViewId, ViewKind,
};

pub use core::observability::init_logging;
