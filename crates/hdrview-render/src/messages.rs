//! Message types for caller <-> render worker communication.
//!
//! The caller sends commands, the worker sends events back. All rendering
//! state changes travel through `RenderMsg` so the worker applies them in
//! submission order.

use hdrview_core::{ColorSpaceTag, Frame};

/// Commands from the caller to the render worker.
#[derive(Debug)]
pub enum RenderMsg {
    /// Reconfigure the output surface for a new target space.
    ///
    /// Tears down the current surface before building the replacement, so
    /// at most one surface exists at any time.
    SetTarget(ColorSpaceTag),

    /// Replace the retained frame and draw it.
    SubmitFrame(Frame),

    /// Redraw the retained frame (or clear if none is held).
    Redraw,

    /// Drain and exit the worker loop.
    Shutdown,
}

/// Events from the render worker back to the caller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RenderEvent {
    /// A submitted frame was accepted and retained.
    FrameReady { width: u32, height: u32 },

    /// A draw finished on the named target.
    DrawCompleted { target: ColorSpaceTag },

    /// A draw was aborted; the retained frame and surface are unchanged.
    DrawFailed { target: ColorSpaceTag, reason: String },
}
