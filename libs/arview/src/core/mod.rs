//! Core lifecycle/threading runtime.
//!
//! Two scheduling domains are synchronized here: the UI context driving the
//! [`controller::ArViewController`] and a dedicated render context driving
//! the [`coordinator::SurfaceCoordinator`] through [`surface::RenderSurface`]
//! notifications.

pub mod config;
pub mod controller;
pub mod coordinator;
pub mod delegates;
pub mod display;
pub mod engine;
pub mod error;
pub mod events;
pub mod native;
pub mod observability;
pub mod sensors;
pub mod surface;
pub mod views;

pub use config::ArViewConfig;
pub use controller::{ActivityState, ArViewController};
pub use coordinator::SurfaceCoordinator;
pub use delegates::{
    default_camera_selector, CameraSelector, ContentLoader, TouchHandler, ViewDelegates,
};
pub use display::{HostDisplay, StaticDisplay};
pub use engine::{
    ArEngine, ArEngineFactory, CameraDescriptor, EngineCallback, GeometryHandle, RenderBackend,
    ScreenRotation,
};
pub use error::{ArViewError, Result};
pub use events::{TouchAction, TouchEvent};
pub use native::{NativeLibs, NATIVE_LIBS};
pub use sensors::SensorsComponent;
pub use surface::{RenderSurface, RenderTask, SurfaceEventSink, SurfaceTaskQueue};
pub use views::{ContentView, LayoutId, View, ViewId, ViewKind};
