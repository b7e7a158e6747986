//! Raw Sample Model
//!
//! Timestamped samples as delivered by the hardware-facing sample source:
//! per-axis relative deltas, absolute positions, scroll wheel deltas, button
//! transitions, and the report-boundary marker that ends one hardware update
//! cycle. Ordering within a report is only guaranteed per axis.

use crate::event::PointerButton;

/// Event timestamp in nanoseconds, from the raw sample source's clock
pub type EventTime = i64;

/// Relative motion axes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RelativeAxis {
    /// Horizontal relative motion
    X,
    /// Vertical relative motion
    Y,
}

/// Absolute position axes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AbsoluteAxis {
    /// Horizontal absolute position
    X,
    /// Vertical absolute position
    Y,
}

/// Scroll wheel axes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScrollAxis {
    /// Vertical wheel
    Vertical,
    /// Horizontal wheel
    Horizontal,
}

/// Payload of one raw sample
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum RawEventKind {
    /// Relative motion delta on one axis
    Relative {
        /// Axis the delta applies to
        axis: RelativeAxis,
        /// Delta in device units
        value: i32,
    },

    /// Absolute position reading on one axis
    Absolute {
        /// Axis the reading applies to
        axis: AbsoluteAxis,
        /// Position in device units, before min-offset correction
        value: i32,
    },

    /// Scroll wheel delta
    Scroll {
        /// Wheel axis
        axis: ScrollAxis,
        /// Delta in detents (fractional for high-resolution wheels)
        value: f32,
    },

    /// Logical button state transition
    Button {
        /// Button that changed
        button: PointerButton,
        /// New pressed state
        pressed: bool,
    },

    /// Report boundary: all samples for one hardware update cycle have arrived
    ReportSync,
}

/// One timestamped raw sample
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RawEvent {
    /// Hardware event timestamp
    pub when: EventTime,
    /// Time the sample was read from the device
    pub read_time: EventTime,
    /// Sample payload
    pub kind: RawEventKind,
}

impl RawEvent {
    /// Create a raw sample whose read time equals its event time
    pub fn new(when: EventTime, kind: RawEventKind) -> Self {
        Self {
            when,
            read_time: when,
            kind,
        }
    }
}
