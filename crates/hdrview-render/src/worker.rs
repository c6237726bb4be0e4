//! Dedicated render thread.
//!
//! Owns the device context, the current output surface and the retained
//! frame. All commands are processed strictly in arrival order, so a
//! `SetTarget` followed by `SubmitFrame` always draws on the new surface.

use std::sync::mpsc::{Receiver, Sender, channel};
use std::thread::JoinHandle;

use tracing::{debug, info, warn};

use hdrview_core::{ColorSpaceTag, Frame, TargetSpec};

use crate::messages::{RenderEvent, RenderMsg};
use crate::present::{present, present_clear};
use crate::{RenderContext, SurfaceContext};

/// Handle to the render thread. Dropping it shuts the thread down.
pub struct RenderWorker {
    tx: Sender<RenderMsg>,
    events: Receiver<RenderEvent>,
    join: Option<JoinHandle<()>>,
}

impl RenderWorker {
    /// Spawns the worker with an initial target and surface size.
    ///
    /// The device context is created on the worker thread so every GPU
    /// call happens on one thread for its whole life.
    pub fn spawn(initial: ColorSpaceTag, width: u32, height: u32) -> crate::Result<Self> {
        let (tx, rx) = channel::<RenderMsg>();
        let (event_tx, events) = channel::<RenderEvent>();
        let (ready_tx, ready_rx) = channel::<crate::Result<()>>();

        let join = std::thread::Builder::new()
            .name("hdrview-render".into())
            .spawn(move || {
                let ctx = match RenderContext::new() {
                    Ok(ctx) => ctx,
                    Err(e) => {
                        let _ = ready_tx.send(Err(e));
                        return;
                    }
                };
                let mut handler = WorkerHandler::new(ctx, rx, event_tx, width, height);
                match handler.set_target(initial) {
                    Ok(()) => {
                        let _ = ready_tx.send(Ok(()));
                        handler.run();
                    }
                    Err(e) => {
                        let _ = ready_tx.send(Err(e));
                    }
                }
            })
            .map_err(|e| crate::RenderError::DeviceCreation(e.to_string()))?;

        // Surface startup errors propagate to the caller instead of
        // leaving a dead thread behind.
        match ready_rx.recv() {
            Ok(Ok(())) => Ok(Self {
                tx,
                events,
                join: Some(join),
            }),
            Ok(Err(e)) => {
                let _ = join.join();
                Err(e)
            }
            Err(_) => {
                let _ = join.join();
                Err(crate::RenderError::DeviceCreation(
                    "render thread exited during startup".into(),
                ))
            }
        }
    }

    /// Queues a command for the worker.
    pub fn send(&self, msg: RenderMsg) {
        let _ = self.tx.send(msg);
    }

    /// Blocks for the next worker event.
    pub fn recv_event(&self) -> Option<RenderEvent> {
        self.events.recv().ok()
    }

    /// Returns a queued event without blocking.
    pub fn try_recv_event(&self) -> Option<RenderEvent> {
        self.events.try_recv().ok()
    }
}

impl Drop for RenderWorker {
    fn drop(&mut self) {
        let _ = self.tx.send(RenderMsg::Shutdown);
        if let Some(join) = self.join.take() {
            let _ = join.join();
        }
    }
}

/// Worker-side state: context, current surface, retained frame.
struct WorkerHandler {
    ctx: RenderContext,
    rx: Receiver<RenderMsg>,
    tx: Sender<RenderEvent>,
    surface: Option<SurfaceContext>,
    frame: Option<Frame>,
    width: u32,
    height: u32,
}

impl WorkerHandler {
    fn new(
        ctx: RenderContext,
        rx: Receiver<RenderMsg>,
        tx: Sender<RenderEvent>,
        width: u32,
        height: u32,
    ) -> Self {
        Self {
            ctx,
            rx,
            tx,
            surface: None,
            frame: None,
            width,
            height,
        }
    }

    /// Main loop. Commands are applied one at a time, in order.
    fn run(mut self) {
        while let Ok(msg) = self.rx.recv() {
            match msg {
                RenderMsg::Shutdown => break,
                RenderMsg::SetTarget(tag) => {
                    if let Err(e) = self.set_target(tag) {
                        warn!(target = tag.name(), error = %e, "target switch failed");
                        self.send(RenderEvent::DrawFailed {
                            target: tag,
                            reason: e.to_string(),
                        });
                        continue;
                    }
                    self.redraw();
                }
                RenderMsg::SubmitFrame(frame) => {
                    self.send(RenderEvent::FrameReady {
                        width: frame.width(),
                        height: frame.height(),
                    });
                    self.frame = Some(frame);
                    self.redraw();
                }
                RenderMsg::Redraw => self.redraw(),
            }
        }
        debug!("render worker shutdown");
    }

    fn send(&self, event: RenderEvent) {
        let _ = self.tx.send(event);
    }

    /// Replaces the surface for a new target. The old surface is dropped
    /// before the new one is configured.
    fn set_target(&mut self, tag: ColorSpaceTag) -> crate::Result<()> {
        self.surface = None;
        let spec = TargetSpec::for_tag(tag);
        let surface = SurfaceContext::configure(&self.ctx, spec, self.width, self.height)?;
        info!(target = tag.name(), bits = spec.channel_bits, "surface configured");
        self.surface = Some(surface);
        Ok(())
    }

    /// Draws the retained frame, or clears when none is held yet.
    fn redraw(&mut self) {
        let Some(surface) = &self.surface else {
            return;
        };
        let target = surface.spec().colorspace;
        let result = match &self.frame {
            Some(frame) => present(&self.ctx, surface, frame),
            None => present_clear(&self.ctx, surface),
        };
        match result {
            Ok(()) => self.send(RenderEvent::DrawCompleted { target }),
            Err(e) => self.send(RenderEvent::DrawFailed {
                target,
                reason: e.to_string(),
            }),
        }
    }
}
