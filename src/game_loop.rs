//! Frame loop: display refresh → clamped dt → session step → render
//!
//! The loop never sleeps or blocks. A host delivers frame callbacks through a
//! [`FrameScheduler`] and the loop asks for the next one at the end of each
//! frame.

use crate::renderer::{Surface, render_session};
use crate::sim::clock::FrameClock;
use crate::sim::session::Session;

/// Handle for a scheduled frame callback
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FrameRequest(pub i32);

/// Source of "next display refresh" callbacks
pub trait FrameScheduler {
    /// Ask for one more frame. `None` if the host refused.
    fn request_frame(&mut self) -> Option<FrameRequest>;
    fn cancel_frame(&mut self, request: FrameRequest);
}

/// In-process scheduler: the host pulls pending requests itself
#[derive(Debug, Default)]
pub struct ManualScheduler {
    next_id: i32,
    pending: Option<FrameRequest>,
}

impl ManualScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Request to service next, if any
    pub fn take_pending(&mut self) -> Option<FrameRequest> {
        self.pending.take()
    }

    pub fn has_pending(&self) -> bool {
        self.pending.is_some()
    }
}

impl FrameScheduler for ManualScheduler {
    fn request_frame(&mut self) -> Option<FrameRequest> {
        self.next_id = self.next_id.wrapping_add(1);
        let request = FrameRequest(self.next_id);
        self.pending = Some(request);
        Some(request)
    }

    fn cancel_frame(&mut self, request: FrameRequest) {
        if self.pending == Some(request) {
            self.pending = None;
        }
    }
}

/// Owns the session and drives it one display frame at a time
pub struct GameLoop {
    session: Session,
    clock: FrameClock,
    running: bool,
    pending: Option<FrameRequest>,
}

impl GameLoop {
    pub fn new(session: Session) -> Self {
        let clock = FrameClock::new(session.config().max_frame_dt);
        Self {
            session,
            clock,
            running: false,
            pending: None,
        }
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn session_mut(&mut self) -> &mut Session {
        &mut self.session
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Begin scheduling frames; the first delivered frame gets dt = 0
    pub fn start(&mut self, scheduler: &mut dyn FrameScheduler) {
        if self.running {
            return;
        }
        self.running = true;
        self.clock.reset();
        self.pending = scheduler.request_frame();
        log::info!("Game loop started (seed {})", self.session.seed());
    }

    /// Stop scheduling and cancel the outstanding request
    pub fn stop(&mut self, scheduler: &mut dyn FrameScheduler) {
        if !self.running {
            return;
        }
        self.running = false;
        if let Some(request) = self.pending.take() {
            scheduler.cancel_frame(request);
        }
        log::info!(
            "Game loop stopped after {} frames",
            self.session.frame_count()
        );
    }

    /// Run one frame for the refresh at `timestamp_ms`
    ///
    /// Returns the dt fed to the session, or `None` if the loop is stopped.
    pub fn on_frame(
        &mut self,
        timestamp_ms: f64,
        surface: &mut dyn Surface,
        scheduler: &mut dyn FrameScheduler,
    ) -> Option<f32> {
        if !self.running {
            return None;
        }
        self.pending = None;

        let dt = self.clock.advance(timestamp_ms);
        self.session.frame(dt);
        render_session(&mut self.session, surface);

        if self.running {
            self.pending = scheduler.request_frame();
        }
        Some(dt)
    }

    pub fn handle_key(&mut self, key: &str, pressed: bool) {
        self.session.handle_key(key, pressed);
    }
}
