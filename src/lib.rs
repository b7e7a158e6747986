//! # cursor-mapper
//!
//! Device-independent cursor input mapper for pointing devices.
//!
//! Takes the raw sample stream of one mouse or trackball class device and
//! turns it into calibrated, ordered motion, scroll, and key events:
//! - [`accumulator`] - Raw sample collection between report boundaries
//! - [`mapper`] - Personality resolution and the per-report sync engine
//! - [`rotation`] - Display orientation correction
//! - [`velocity`] - Pointer and wheel acceleration
//!
//! # Architecture
//!
//! ```text
//! raw samples ──> CursorMapper
//!                   ├─> MotionAccumulator   (relative deltas)
//!                   ├─> PositionAccumulator (absolute readings)
//!                   ├─> ScrollAccumulator   (wheel ticks)
//!                   ├─> ButtonAccumulator   (button bitmask)
//!                   └─> sync on report boundary
//!                         ├─> rotation + velocity transforms
//!                         ├─> PointerController (on-screen cursor)
//!                         └─> EventSink (motion / key / reset events)
//! ```
//!
//! One mapper instance serves one device and is driven single-threaded by
//! the reader loop: `configure`, then `process` per raw sample. Everything
//! between two report-boundary samples belongs to one report and is emitted
//! atomically, in order, when the boundary arrives.

#![warn(missing_docs)]
#![warn(clippy::all)]

/// Raw sample accumulators
pub mod accumulator;

/// Reader configuration slice and change flags
pub mod config;

/// Device capabilities and properties
pub mod device;

/// Error types
pub mod error;

/// Output event model and the event sink seam
pub mod event;

/// The cursor input mapper itself
pub mod mapper;

/// Pointer service seam
pub mod pointer;

/// Raw sample model
pub mod raw;

/// Display rotation transforms
pub mod rotation;

/// Velocity smoothing
pub mod velocity;

pub use config::{ConfigChange, ConfigChanges, DisplayViewport, MapperConfig};
pub use device::{DeviceCapabilities, DeviceConfiguration, DeviceContext, RawAbsoluteAxisInfo};
pub use error::{MapperError, Result};
pub use event::{
    ButtonState, DisplayId, EventSink, KeyArgs, MotionAction, MotionArgs, PointerButton, Source,
};
pub use mapper::{CursorMapper, Mode};
pub use pointer::{PointerController, PointerHandle};
pub use raw::{RawEvent, RawEventKind};
pub use rotation::Rotation;
pub use velocity::{VelocityControl, VelocityControlParameters};
