//! Self-rescheduling frame loop with explicit teardown.

use std::sync::mpsc::{self, Receiver, Sender};
use std::sync::{Arc, RwLock};
use std::time::{Duration, Instant};

use glowfield_core::{SceneConfig, Size, Surface};

use crate::scene::Scene;

/// Outcome of [`Animation::poll`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrameStatus {
    /// A frame was simulated and drawn on the surface.
    Rendered,
    /// The next frame is due after this delay.
    Waiting(Duration),
    /// The loop has been stopped; no further frames will run.
    Stopped,
}

/// Flags shared between the loop and its handles.
#[derive(Debug)]
struct LoopState {
    running: bool,
    /// Whether resize notifications are still accepted.
    observing: bool,
}

/// Cloneable handle that halts an [`Animation`].
#[derive(Debug, Clone)]
pub struct AnimationHandle {
    state: Arc<RwLock<LoopState>>,
}

impl AnimationHandle {
    /// Stop the frame loop and release the resize subscription.
    ///
    /// Safe to call any number of times, including before the first frame.
    pub fn stop(&self) {
        if let Ok(mut state) = self.state.write() {
            if state.running {
                tracing::info!("animation stopped");
            }
            state.running = false;
            state.observing = false;
        }
    }

    pub fn is_stopped(&self) -> bool {
        self.state.read().map(|s| !s.running).unwrap_or(true)
    }
}

/// Delivers surface size changes to a running [`Animation`].
#[derive(Debug, Clone)]
pub struct ResizeObserver {
    state: Arc<RwLock<LoopState>>,
    sender: Sender<Size>,
}

impl ResizeObserver {
    /// Queue a new surface size for the next frame.
    ///
    /// Returns `false` once the animation has stopped observing.
    pub fn notify(&self, size: Size) -> bool {
        let observing = self.state.read().map(|s| s.observing).unwrap_or(false);
        observing && self.sender.send(size).is_ok()
    }
}

/// A scene bound to a surface and driven one frame at a time.
///
/// The host calls [`poll`](Self::poll) from its refresh loop. Each rendered
/// frame schedules exactly one follow-up frame, unless the loop was stopped.
#[derive(Debug)]
pub struct Animation<S: Surface> {
    surface: S,
    scene: Scene,
    state: Arc<RwLock<LoopState>>,
    resize_tx: Sender<Size>,
    resize_rx: Option<Receiver<Size>>,
    next_frame: Option<Instant>,
    /// Whether the host got a `Waiting` since the last rendered frame.
    yielded: bool,
    frame_interval: Duration,
}

/// Seed a scene sized to `surface` and schedule its first frame immediately.
pub fn start<S: Surface>(surface: S, config: &SceneConfig) -> Animation<S> {
    Animation::new(surface, config, Instant::now())
}

impl<S: Surface> Animation<S> {
    /// Like [`start`], with the first frame due at `now`.
    pub fn new(surface: S, config: &SceneConfig, now: Instant) -> Self {
        let scene = Scene::new(surface.size(), config);
        let (resize_tx, resize_rx) = mpsc::channel();
        tracing::info!(
            width = surface.size().width,
            height = surface.size().height,
            "animation started"
        );
        Self {
            surface,
            scene,
            state: Arc::new(RwLock::new(LoopState {
                running: true,
                observing: true,
            })),
            resize_tx,
            resize_rx: Some(resize_rx),
            next_frame: Some(now),
            yielded: true,
            frame_interval: config.frame_interval(),
        }
    }

    /// Handle for stopping the loop from elsewhere.
    pub fn handle(&self) -> AnimationHandle {
        AnimationHandle {
            state: self.state.clone(),
        }
    }

    /// Subscription the host feeds surface resizes into.
    pub fn resize_observer(&self) -> ResizeObserver {
        ResizeObserver {
            state: self.state.clone(),
            sender: self.resize_tx.clone(),
        }
    }

    pub fn stop(&self) {
        self.handle().stop();
    }

    pub fn is_running(&self) -> bool {
        !self.handle().is_stopped()
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn scene(&self) -> &Scene {
        &self.scene
    }

    pub fn scene_mut(&mut self) -> &mut Scene {
        &mut self.scene
    }

    /// Run the scheduled frame if it is due at `now`.
    ///
    /// Two frames are never rendered back to back: a frame that comes due
    /// straight after another first returns `Waiting(Duration::ZERO)` so the
    /// host can service its input even when it cannot keep up.
    pub fn poll(&mut self, now: Instant) -> FrameStatus {
        if !self.is_running() {
            self.release();
            return FrameStatus::Stopped;
        }
        let Some(due) = self.next_frame else {
            return FrameStatus::Stopped;
        };
        if now < due {
            self.yielded = true;
            return FrameStatus::Waiting(due - now);
        }
        if !self.yielded {
            self.yielded = true;
            return FrameStatus::Waiting(Duration::ZERO);
        }

        self.yielded = false;
        self.next_frame = None;
        self.apply_pending_resize();
        self.scene.tick(self.surface.context());

        // Reschedule only while nobody has asked us to stop
        if self.is_running() {
            self.next_frame = Some(now + self.frame_interval);
        } else {
            self.release();
        }
        FrameStatus::Rendered
    }

    /// Apply the most recent queued size, if any.
    fn apply_pending_resize(&mut self) {
        let Some(rx) = &self.resize_rx else {
            return;
        };
        if let Some(size) = rx.try_iter().last()
            && size != self.surface.size()
        {
            tracing::info!(width = size.width, height = size.height, "surface resized");
            self.surface.set_size(size);
            self.scene.resize(size);
        }
    }

    /// Drop the resize subscription and any pending frame.
    fn release(&mut self) {
        self.next_frame = None;
        self.resize_rx = None;
    }
}

impl<S: Surface> Drop for Animation<S> {
    fn drop(&mut self) {
        self.stop();
    }
}
