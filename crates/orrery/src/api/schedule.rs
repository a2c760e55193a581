//! Frame scheduling: the host registers one callback per display refresh,
//! the loop re-arms itself after each frame until its token is cancelled.

use std::cell::Cell;
use std::rc::Rc;

use crate::api::error::Result;

/// Host-side frame scheduler (`requestAnimationFrame` in the browser).
pub trait FrameHost {
    type Handle: Copy;

    /// Ask for the frame callback to run once more at the next refresh.
    fn request_frame(&mut self) -> Result<Self::Handle>;

    /// Drop a pending request.
    fn cancel_frame(&mut self, handle: Self::Handle);
}

/// Shared cancellation flag handed out by [`FrameLoop::start`].
#[derive(Debug, Clone, Default)]
pub struct LoopToken {
    cancelled: Rc<Cell<bool>>,
}

impl LoopToken {
    pub fn cancel(&self) {
        self.cancelled.set(true);
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancelled.get()
    }
}

/// Runs until cancelled. Single-threaded; the host calls [`FrameLoop::on_frame`]
/// from its frame callback.
pub struct FrameLoop<H: FrameHost> {
    host: H,
    pending: Option<H::Handle>,
    token: LoopToken,
    frames: u64,
}

impl<H: FrameHost> FrameLoop<H> {
    pub fn new(host: H) -> Self {
        Self {
            host,
            pending: None,
            token: LoopToken::default(),
            frames: 0,
        }
    }

    /// Schedule the first frame. The returned token stops the loop.
    pub fn start(&mut self) -> Result<LoopToken> {
        self.token = LoopToken::default();
        self.pending = Some(self.host.request_frame()?);
        log::info!("Frame loop started");
        Ok(self.token.clone())
    }

    /// Called by the host when a frame fires. Re-arms the next frame and
    /// returns true if this frame should be drawn; false once cancelled.
    pub fn on_frame(&mut self) -> Result<bool> {
        self.pending = None;
        if self.token.is_cancelled() {
            return Ok(false);
        }
        self.frames += 1;
        self.pending = Some(self.host.request_frame()?);
        Ok(true)
    }

    /// Cancel the token and release any pending frame request.
    pub fn cancel(&mut self) {
        self.token.cancel();
        if let Some(handle) = self.pending.take() {
            self.host.cancel_frame(handle);
            log::info!("Frame loop cancelled after {} frames", self.frames);
        }
    }

    pub fn is_running(&self) -> bool {
        self.pending.is_some() && !self.token.is_cancelled()
    }

    /// Frames drawn since start.
    pub fn frames(&self) -> u64 {
        self.frames
    }

    pub fn host(&self) -> &H {
        &self.host
    }
}
