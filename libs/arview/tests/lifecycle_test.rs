//! Lifecycle integration test.
//!
//! Drives a full activity lifecycle against a mock engine and verifies the
//! ordering contract between the UI context and the render context:
//!
//! 1. Engine handle created once, before any camera/renderer/sensor call.
//! 2. Renderer initialized exactly once per surface instance; recreation
//!    triggers texture reload, not re-init.
//! 3. Content loading runs exactly once per init, after it, before the next
//!    frame.
//! 4. Surface attachment is idempotent across back-to-back resumes.
//! 5. Camera start follows the paused flag and tolerates an empty camera
//!    list.
//! 6. Hit tests run on release only.
//! 7. (Partial-create destroy safety is covered by unit tests.)
//! 8. A failed frame does not stop the rendering loop.
//!
//! Only public APIs are used; the mock engine lives in this file.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use serial_test::serial;

use arview::{
    ActivityState, ArEngine, ArEngineFactory, ArViewConfig, ArViewController, ArViewError,
    CameraDescriptor, EngineCallback, GeometryHandle, LayoutId, RenderBackend, Result,
    ScreenRotation, SensorsComponent, StaticDisplay, TouchEvent, ViewDelegates, ViewKind,
};

// =============================================================================
// Test-only engine (not part of the crate)
// =============================================================================

#[derive(Default)]
struct MockEngine {
    cameras: Vec<CameraDescriptor>,
    /// Interleaved record of engine-side and loader-side events.
    events: Arc<Mutex<Vec<String>>>,

    camera_starts: AtomicUsize,
    init_count: AtomicUsize,
    reload_count: AtomicUsize,
    render_attempts: AtomicUsize,
    pause_count: AtomicUsize,
    resume_count: AtomicUsize,
    hit_test_count: AtomicUsize,
    fail_renders_remaining: AtomicUsize,

    hit_result: Mutex<Option<GeometryHandle>>,
    rotation: Mutex<Option<ScreenRotation>>,
    sensors: Mutex<Option<Arc<SensorsComponent>>>,
}

impl MockEngine {
    fn push_event(&self, event: &str) {
        self.events.lock().unwrap().push(event.to_string());
    }
}

impl ArEngine for MockEngine {
    fn camera_list(&self) -> Vec<CameraDescriptor> {
        self.cameras.clone()
    }

    fn start_camera(&self, camera: &CameraDescriptor) -> Result<()> {
        self.camera_starts.fetch_add(1, Ordering::SeqCst);
        self.push_event(&format!("camera:{}", camera.id));
        Ok(())
    }

    fn initialize_renderer(
        &self,
        _width: u32,
        _height: u32,
        _rotation: ScreenRotation,
        _backend: RenderBackend,
    ) -> Result<()> {
        self.init_count.fetch_add(1, Ordering::SeqCst);
        self.push_event("init");
        Ok(())
    }

    fn resize_renderer(&self, _width: u32, _height: u32) {}

    fn render(&self) -> Result<()> {
        self.render_attempts.fetch_add(1, Ordering::SeqCst);
        self.push_event("render");
        if self
            .fail_renders_remaining
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |n| n.checked_sub(1))
            .is_ok()
        {
            return Err(ArViewError::Renderer("frame dropped".into()));
        }
        Ok(())
    }

    fn reload_textures(&self) -> Result<()> {
        self.reload_count.fetch_add(1, Ordering::SeqCst);
        self.push_event("reload");
        Ok(())
    }

    fn pause(&self) {
        self.pause_count.fetch_add(1, Ordering::SeqCst);
    }

    fn resume(&self) {
        self.resume_count.fetch_add(1, Ordering::SeqCst);
    }

    fn set_screen_rotation(&self, rotation: ScreenRotation) {
        *self.rotation.lock().unwrap() = Some(rotation);
    }

    fn hit_test(&self, _x: i32, _y: i32, _touchable_only: bool) -> Result<Option<GeometryHandle>> {
        self.hit_test_count.fetch_add(1, Ordering::SeqCst);
        Ok(*self.hit_result.lock().unwrap())
    }

    fn register_sensors(&self, sensors: Arc<SensorsComponent>) {
        *self.sensors.lock().unwrap() = Some(sensors);
    }

    fn register_callback(&self, _callback: Arc<dyn EngineCallback>) {}
}

struct MockFactory {
    engine: Arc<MockEngine>,
    creations: Arc<AtomicUsize>,
}

impl ArEngineFactory for MockFactory {
    fn create(&self, _app_signature: &str) -> Result<Arc<dyn ArEngine>> {
        self.creations.fetch_add(1, Ordering::SeqCst);
        let engine: Arc<dyn ArEngine> = self.engine.clone();
        Ok(engine)
    }
}

// =============================================================================
// Rig
// =============================================================================

struct Rig {
    controller: ArViewController,
    engine: Arc<MockEngine>,
    display: Arc<StaticDisplay>,
    creations: Arc<AtomicUsize>,
    events: Arc<Mutex<Vec<String>>>,
    touches: Arc<Mutex<Vec<GeometryHandle>>>,
}

fn rig_with(cameras: Vec<CameraDescriptor>, delegates: ViewDelegates) -> Rig {
    let events = Arc::new(Mutex::new(Vec::new()));
    let engine = Arc::new(MockEngine {
        cameras,
        events: Arc::clone(&events),
        ..MockEngine::default()
    });
    let creations = Arc::new(AtomicUsize::new(0));
    let factory = Arc::new(MockFactory {
        engine: Arc::clone(&engine),
        creations: Arc::clone(&creations),
    });

    let touches = Arc::new(Mutex::new(Vec::new()));
    let touch_log = Arc::clone(&touches);
    let loader_events = Arc::clone(&events);
    let delegates = delegates
        .with_content_loader(move |_| loader_events.lock().unwrap().push("load".into()))
        .with_touch_handler(move |geometry| touch_log.lock().unwrap().push(geometry));

    let display = StaticDisplay::new(320, 240);
    let config = ArViewConfig {
        app_signature: "test-signature".into(),
        frame_interval_ms: 2,
    };
    let controller = ArViewController::new(config, delegates, factory, display.clone());

    Rig {
        controller,
        engine,
        display,
        creations,
        events,
        touches,
    }
}

fn rig(cameras: Vec<CameraDescriptor>) -> Rig {
    rig_with(cameras, ViewDelegates::new())
}

fn back_camera() -> CameraDescriptor {
    CameraDescriptor {
        id: "0".into(),
        name: "back".into(),
    }
}

fn wait_until(mut cond: impl FnMut() -> bool, what: &str) {
    for _ in 0..500 {
        if cond() {
            return;
        }
        std::thread::sleep(Duration::from_millis(2));
    }
    panic!("timed out waiting for {what}");
}

// =============================================================================
// Tests
// =============================================================================

#[test]
#[serial]
fn test_full_lifecycle_creates_engine_once() {
    let mut rig = rig(vec![back_camera()]);

    rig.controller.on_create();
    assert!(!rig.controller.is_finishing());
    rig.controller.on_start();
    rig.controller.on_resume();

    let engine = Arc::clone(&rig.engine);
    wait_until(
        || engine.render_attempts.load(Ordering::SeqCst) >= 1,
        "first frame",
    );

    rig.controller.on_pause();
    rig.controller.on_resume();
    rig.controller.on_pause();
    rig.controller.on_stop();
    rig.controller.on_destroy();

    assert_eq!(rig.creations.load(Ordering::SeqCst), 1);
    assert_eq!(rig.engine.pause_count.load(Ordering::SeqCst), 2);
    assert_eq!(rig.engine.resume_count.load(Ordering::SeqCst), 2);
    assert_eq!(rig.controller.state(), Some(ActivityState::Destroyed));
    assert!(rig.controller.engine().is_none());

    // Sensors were registered before any renderer call and released at
    // destroy, after the engine handle was dropped by the controller.
    let sensors = rig
        .engine
        .sensors
        .lock()
        .unwrap()
        .clone()
        .expect("sensors registered");
    assert!(sensors.is_released());

    // The first engine-side event is the camera start, preceded by nothing
    // renderer-related.
    let events = rig.events.lock().unwrap().clone();
    assert_eq!(events.first().map(String::as_str), Some("camera:0"));
}

#[test]
#[serial]
fn test_renderer_init_once_reload_on_recreation() {
    let mut rig = rig(vec![back_camera()]);
    rig.controller.on_create();
    rig.controller.on_start();
    rig.controller.on_resume();

    let engine = Arc::clone(&rig.engine);
    wait_until(
        || engine.init_count.load(Ordering::SeqCst) == 1,
        "renderer init",
    );

    // The windowing layer recreated the drawable with the renderer intact.
    rig.controller.surface().expect("surface").notify_recreated();
    wait_until(
        || engine.reload_count.load(Ordering::SeqCst) == 1,
        "texture reload",
    );
    assert_eq!(rig.engine.init_count.load(Ordering::SeqCst), 1);

    rig.controller.on_pause();
    rig.controller.on_stop();
    rig.controller.on_destroy();
}

#[test]
#[serial]
fn test_content_load_runs_once_after_init_before_next_frame() {
    let mut rig = rig(vec![back_camera()]);
    rig.controller.on_create();
    rig.controller.on_start();
    rig.controller.on_resume();

    let events = Arc::clone(&rig.events);
    wait_until(
        || {
            let events = events.lock().unwrap();
            events.iter().any(|e| e == "load") && events.iter().any(|e| e == "render")
        },
        "content load and first frame",
    );

    let events = rig.events.lock().unwrap().clone();
    let init_at = events.iter().position(|e| e == "init").expect("init");
    let load_at = events.iter().position(|e| e == "load").expect("load");
    let render_at = events.iter().position(|e| e == "render").expect("render");
    assert!(init_at < load_at, "load after init: {events:?}");
    assert!(load_at < render_at, "load before first frame: {events:?}");
    assert_eq!(events.iter().filter(|e| *e == "load").count(), 1);

    rig.controller.on_pause();
    rig.controller.on_stop();
    rig.controller.on_destroy();
}

#[test]
#[serial]
fn test_resume_twice_attaches_surface_once() {
    let mut rig = rig_with(
        vec![back_camera()],
        ViewDelegates::new().with_overlay_layout(LayoutId(7)),
    );
    rig.controller.on_create();
    rig.controller.on_start();
    rig.controller.on_resume();
    rig.controller.on_resume();

    let stacking = rig.controller.content_view().stacking_order();
    assert_eq!(stacking, vec![ViewKind::Surface, ViewKind::Overlay]);

    rig.controller.on_pause();
    rig.controller.on_stop();
    rig.controller.on_destroy();
}

#[test]
#[serial]
fn test_restart_while_paused_does_not_restart_camera() {
    let mut rig = rig(vec![back_camera()]);
    rig.controller.on_create();
    rig.controller.on_start();
    rig.controller.on_resume();
    rig.controller.on_pause();
    rig.controller.on_stop();

    // Host restarts the activity before resuming it; the paused flag is
    // still set, so the running camera must not be started again.
    rig.controller.on_start();
    assert_eq!(rig.engine.camera_starts.load(Ordering::SeqCst), 1);

    rig.controller.on_resume();
    rig.controller.on_pause();
    rig.controller.on_stop();
    rig.controller.on_destroy();
}

#[test]
fn test_empty_camera_list_is_not_fatal() {
    let mut rig = rig(Vec::new());
    rig.controller.on_create();
    rig.controller.on_start();

    assert_eq!(rig.controller.state(), Some(ActivityState::Started));
    assert_eq!(rig.engine.camera_starts.load(Ordering::SeqCst), 0);

    rig.controller.on_stop();
    rig.controller.on_destroy();
}

#[test]
fn test_hit_test_on_release_only() {
    let mut rig = rig(vec![back_camera()]);
    rig.controller.on_create();

    *rig.engine.hit_result.lock().unwrap() = Some(GeometryHandle(9));

    assert!(rig.controller.on_touch(&TouchEvent::down(10, 10)));
    assert!(rig.controller.on_touch(&TouchEvent::moved(12, 12)));
    assert_eq!(rig.engine.hit_test_count.load(Ordering::SeqCst), 0);

    assert!(rig.controller.on_touch(&TouchEvent::up(12, 12)));
    assert_eq!(rig.engine.hit_test_count.load(Ordering::SeqCst), 1);
    assert_eq!(rig.touches.lock().unwrap().as_slice(), &[GeometryHandle(9)]);

    // A miss dispatches nothing.
    *rig.engine.hit_result.lock().unwrap() = None;
    rig.controller.on_touch(&TouchEvent::up(300, 300));
    assert_eq!(rig.touches.lock().unwrap().len(), 1);

    rig.controller.on_destroy();
}

#[test]
fn test_configuration_change_forwards_rotation() {
    let mut rig = rig(vec![back_camera()]);
    rig.controller.on_create();

    rig.display.set_rotation(ScreenRotation::Rotation90);
    rig.controller.on_configuration_changed();
    assert_eq!(
        *rig.engine.rotation.lock().unwrap(),
        Some(ScreenRotation::Rotation90)
    );

    rig.controller.on_destroy();
}

#[test]
#[serial]
fn test_render_failure_does_not_stop_the_loop() {
    let mut rig = rig(vec![back_camera()]);
    rig.engine.fail_renders_remaining.store(1, Ordering::SeqCst);

    rig.controller.on_create();
    rig.controller.on_start();
    rig.controller.on_resume();

    let engine = Arc::clone(&rig.engine);
    wait_until(
        || engine.render_attempts.load(Ordering::SeqCst) >= 3,
        "frames after a failed frame",
    );

    rig.controller.on_pause();
    rig.controller.on_stop();
    rig.controller.on_destroy();
}

#[test]
#[serial]
fn test_pause_stops_frames() {
    let mut rig = rig(vec![back_camera()]);
    rig.controller.on_create();
    rig.controller.on_start();
    rig.controller.on_resume();

    let engine = Arc::clone(&rig.engine);
    wait_until(
        || engine.render_attempts.load(Ordering::SeqCst) >= 1,
        "first frame",
    );

    rig.controller.on_pause();
    // Let any in-flight frame complete, then expect silence.
    std::thread::sleep(Duration::from_millis(30));
    let at_pause = rig.engine.render_attempts.load(Ordering::SeqCst);
    std::thread::sleep(Duration::from_millis(40));
    assert_eq!(rig.engine.render_attempts.load(Ordering::SeqCst), at_pause);

    rig.controller.on_resume();
    wait_until(
        || engine.render_attempts.load(Ordering::SeqCst) > at_pause,
        "frames after resume",
    );

    rig.controller.on_pause();
    rig.controller.on_stop();
    rig.controller.on_destroy();
}
