//! The render surface and its dedicated render context.
//!
//! One thread per surface instance processes windowing notifications
//! serially: attach, recreate, resize, pause, resume, shutdown. Cross-context
//! communication is one-directional and queue-based: the UI context enqueues
//! commands and tasks, the render context drains them. The render context
//! never blocks on the UI context.
//!
//! Ordering guarantee: within one loop iteration, commands are handled first,
//! queued tasks second, the draw callback last. A task enqueued while
//! handling surface-created therefore runs strictly after initialization and
//! strictly before the next frame.

use crossbeam_channel::{unbounded, Receiver, Sender};
use parking_lot::Mutex;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread::JoinHandle;
use std::time::Duration;

use super::Result;

/// Callback sink for surface lifecycle notifications.
///
/// Every method is invoked on the render context.
pub trait SurfaceEventSink: Send + Sync + 'static {
    /// The surface gained a drawable. Fires once on first attach, and again
    /// on renderer-preserving recreation.
    fn on_surface_created(&self, width: u32, height: u32);

    /// The drawable changed dimensions.
    fn on_surface_changed(&self, width: u32, height: u32);

    /// Steady-state per-frame callback.
    fn on_draw_frame(&self);

    /// The surface is going away; drop references to it.
    fn on_surface_destroyed(&self);
}

/// A unit of work executed on the render context.
pub type RenderTask = Box<dyn FnOnce() + Send + 'static>;

/// Cloneable handle for enqueueing work onto the render context.
#[derive(Clone)]
pub struct SurfaceTaskQueue {
    pub(crate) tx: Sender<RenderTask>,
}

impl SurfaceTaskQueue {
    pub fn queue_event(&self, task: RenderTask) {
        if self.tx.send(task).is_err() {
            tracing::warn!("render context is gone, dropping queued task");
        }
    }
}

enum SurfaceCommand {
    Attached,
    Recreated,
    Resized(u32, u32),
    Pause,
    Resume,
    Shutdown,
}

type SharedSink = Arc<Mutex<Option<Arc<dyn SurfaceEventSink>>>>;

struct RenderLoop {
    cmd_rx: Receiver<SurfaceCommand>,
    task_rx: Receiver<RenderTask>,
    sink: SharedSink,
    width: u32,
    height: u32,
    frame_interval: Duration,
    started: bool,
    paused: bool,
    shutdown: bool,
}

impl RenderLoop {
    fn run(mut self) {
        tracing::debug!("render context started");
        loop {
            if self.shutdown {
                break;
            }
            if self.started && !self.paused {
                while let Ok(cmd) = self.cmd_rx.try_recv() {
                    self.handle(cmd);
                }
            } else {
                // Idle until the next command; nothing to draw.
                match self.cmd_rx.recv() {
                    Ok(cmd) => self.handle(cmd),
                    Err(_) => break, // surface handle dropped
                }
                continue;
            }
            if self.shutdown {
                break;
            }
            self.drain_tasks();
            if self.started && !self.paused {
                if let Some(sink) = self.sink() {
                    sink.on_draw_frame();
                }
                std::thread::sleep(self.frame_interval);
            }
        }
        if let Some(sink) = self.sink() {
            sink.on_surface_destroyed();
        }
        tracing::debug!("render context exited");
    }

    fn handle(&mut self, cmd: SurfaceCommand) {
        match cmd {
            SurfaceCommand::Attached => {
                if self.started {
                    tracing::debug!("surface already attached, ignoring");
                    return;
                }
                self.started = true;
                if let Some(sink) = self.sink() {
                    sink.on_surface_created(self.width, self.height);
                    sink.on_surface_changed(self.width, self.height);
                }
            }
            SurfaceCommand::Recreated => {
                if !self.started {
                    tracing::debug!("recreate notification before attach, ignoring");
                    return;
                }
                if let Some(sink) = self.sink() {
                    sink.on_surface_created(self.width, self.height);
                }
            }
            SurfaceCommand::Resized(width, height) => {
                self.width = width;
                self.height = height;
                if let Some(sink) = self.sink() {
                    sink.on_surface_changed(width, height);
                }
            }
            SurfaceCommand::Pause => {
                tracing::debug!("render context paused");
                self.paused = true;
            }
            SurfaceCommand::Resume => {
                tracing::debug!("render context resumed");
                self.paused = false;
            }
            SurfaceCommand::Shutdown => {
                self.shutdown = true;
            }
        }
    }

    fn drain_tasks(&self) {
        while let Ok(task) = self.task_rx.try_recv() {
            task();
        }
    }

    fn sink(&self) -> Option<Arc<dyn SurfaceEventSink>> {
        self.sink.lock().clone()
    }
}

/// The drawable surface plus its render context.
///
/// Lives strictly inside one Started → Stopped interval of the activity.
/// Dropping the handle shuts the render context down and joins the thread,
/// so teardown is deterministic rather than left to a collector.
pub struct RenderSurface {
    cmd_tx: Sender<SurfaceCommand>,
    task_tx: Sender<RenderTask>,
    sink: SharedSink,
    thread: Option<JoinHandle<()>>,
    keep_screen_on: AtomicBool,
    media_overlay: AtomicBool,
}

impl RenderSurface {
    pub fn new(width: u32, height: u32, frame_interval: Duration) -> Result<Self> {
        let (cmd_tx, cmd_rx) = unbounded();
        let (task_tx, task_rx) = unbounded();
        let sink: SharedSink = Arc::new(Mutex::new(None));

        let render_loop = RenderLoop {
            cmd_rx,
            task_rx,
            sink: Arc::clone(&sink),
            width,
            height,
            frame_interval,
            started: false,
            paused: false,
            shutdown: false,
        };
        let thread = std::thread::Builder::new()
            .name("arview-render".into())
            .spawn(move || render_loop.run())?;

        Ok(Self {
            cmd_tx,
            task_tx,
            sink,
            thread: Some(thread),
            keep_screen_on: AtomicBool::new(false),
            media_overlay: AtomicBool::new(false),
        })
    }

    /// Register the callback sink receiving surface lifecycle notifications.
    pub fn register_sink(&self, sink: Arc<dyn SurfaceEventSink>) {
        *self.sink.lock() = Some(sink);
    }

    pub fn task_queue(&self) -> SurfaceTaskQueue {
        SurfaceTaskQueue {
            tx: self.task_tx.clone(),
        }
    }

    /// Enqueue a unit of work onto the render context.
    pub fn queue_event(&self, task: RenderTask) {
        self.task_queue().queue_event(task);
    }

    /// The surface entered the view hierarchy; deliver surface-created and
    /// the initial surface-changed, then begin steady-state drawing.
    /// Idempotent: repeated notifications after the first are ignored.
    pub fn notify_attached(&self) {
        self.send(SurfaceCommand::Attached);
    }

    /// The windowing layer recreated the drawable while preserving the
    /// native renderer (e.g. a display mode change). Delivers another
    /// surface-created; the sink decides between re-init and texture reload.
    pub fn notify_recreated(&self) {
        self.send(SurfaceCommand::Recreated);
    }

    pub fn notify_resized(&self, width: u32, height: u32) {
        self.send(SurfaceCommand::Resized(width, height));
    }

    /// Suspend the render context. Queued commands and tasks are kept.
    pub fn on_pause(&self) {
        self.send(SurfaceCommand::Pause);
    }

    /// Resume the render context's own execution.
    pub fn on_resume(&self) {
        self.send(SurfaceCommand::Resume);
    }

    pub fn set_keep_screen_on(&self, keep: bool) {
        self.keep_screen_on.store(keep, Ordering::Relaxed);
    }

    pub fn keep_screen_on(&self) -> bool {
        self.keep_screen_on.load(Ordering::Relaxed)
    }

    /// Composite above the camera preview layer.
    pub fn set_media_overlay(&self, overlay: bool) {
        self.media_overlay.store(overlay, Ordering::Relaxed);
    }

    pub fn is_media_overlay(&self) -> bool {
        self.media_overlay.load(Ordering::Relaxed)
    }

    fn send(&self, cmd: SurfaceCommand) {
        if self.cmd_tx.send(cmd).is_err() {
            tracing::warn!("render context is gone, dropping surface command");
        }
    }
}

impl Drop for RenderSurface {
    fn drop(&mut self) {
        let _ = self.cmd_tx.send(SurfaceCommand::Shutdown);
        if let Some(handle) = self.thread.take() {
            if handle.join().is_err() {
                tracing::error!("render context thread panicked during shutdown");
            }
        }
    }
}
