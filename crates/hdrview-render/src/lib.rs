//! # hdrview-render
//!
//! wgpu implementation of the frame presenter.
//!
//! # Architecture
//!
//! ```text
//! RenderWorker (dedicated thread, owns everything below)
//!     └── RenderContext   (process-lifetime adapter/device/queue)
//!         └── SurfaceContext  (render target matching one TargetSpec)
//!             └── present()   (per draw: upload planes, build the color
//!                              program, one full-screen quad, release all)
//! ```
//!
//! The host side talks to the worker exclusively through [`RenderMsg`] /
//! [`RenderEvent`] channels; no graphics object ever crosses the channel.
//!
//! # Example
//!
//! ```ignore
//! use hdrview_core::{ColorSpaceTag, TargetSpec};
//! use hdrview_render::{RenderContext, SurfaceContext, present};
//!
//! let ctx = RenderContext::new()?;
//! let spec = TargetSpec::for_tag(ColorSpaceTag::Bt2020Pq);
//! let surface = SurfaceContext::configure(&ctx, spec, 1920, 1080)?;
//! present(&ctx, &surface, &frame)?;
//! ```

#![warn(missing_docs)]

mod context;
mod messages;
mod present;
mod shaders;
mod surface;
mod upload;
mod worker;

pub use context::RenderContext;
pub use messages::{RenderEvent, RenderMsg};
pub use present::{present, present_clear};
pub use surface::SurfaceContext;
pub use upload::{PlaneTexture, SampleKind, upload};
pub use worker::RenderWorker;

use thiserror::Error;

/// Draw-scoped and context-scoped render failures.
///
/// Everything except [`NoAdapter`](RenderError::NoAdapter) and
/// [`DeviceCreation`](RenderError::DeviceCreation) is fatal to one draw
/// only: the presenter releases its resources, logs, and the worker keeps
/// serving subsequent requests.
#[derive(Debug, Error)]
pub enum RenderError {
    /// No GPU adapter available on this machine.
    #[error("no suitable GPU adapter found")]
    NoAdapter,

    /// Adapter refused to create a device.
    #[error("failed to create device: {0}")]
    DeviceCreation(String),

    /// No surface format on the device matches the requested target.
    #[error("no surface configuration matches {channel_bits}-bit {component} channels")]
    Configuration {
        /// Requested bits per channel.
        channel_bits: u8,
        /// Requested component type, as text.
        component: &'static str,
    },

    /// Shader compile or pipeline link failure, with the compiler log.
    #[error("color program failed to build: {0}")]
    Shader(String),

    /// Plane-to-texture transfer failure.
    #[error("plane upload failed: {0}")]
    Upload(String),

    /// Target read-back failed (tests and CLI only).
    #[error("read-back failed: {0}")]
    ReadBack(String),
}

/// Result type alias using [`RenderError`].
pub type Result<T> = std::result::Result<T, RenderError>;
