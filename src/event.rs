//! Output Event Model
//!
//! Motion and key event descriptors handed to the event sink, plus the logical
//! source classes, button bitmask, and device-info population used by the
//! windowing layer above the mapper. Delivery order as produced must be
//! preserved by the sink; no return value is consulted.

use enumflags2::{bitflags, BitFlags};

use crate::raw::EventTime;

/// Identifier of a display the mapper is bound to
pub type DisplayId = u32;

/// Cursor position value reported when no pointer service position is available
pub const INVALID_CURSOR_POSITION: f32 = f32::NAN;

/// Logical device class presented upstream
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Source {
    /// On-screen pointer device (mouse)
    Mouse,
    /// Pointer-capture relative mouse: raw deltas, no on-screen pointer
    MouseRelative,
    /// Navigation device (trackball)
    Trackball,
    /// Mouse forced to emulate touch injection
    Touchscreen,
}

impl Source {
    /// Whether this source drives the on-screen pointer and reports absolute
    /// cursor coordinates
    pub fn is_pointer_like(self) -> bool {
        matches!(self, Source::Mouse | Source::Touchscreen)
    }
}

/// Logical pointer buttons, one bit each
#[bitflags]
#[repr(u32)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerButton {
    /// Primary button (left)
    Primary = 1 << 0,
    /// Secondary button (right)
    Secondary = 1 << 1,
    /// Tertiary button (middle)
    Tertiary = 1 << 2,
    /// Back side button
    Back = 1 << 3,
    /// Forward side button
    Forward = 1 << 4,
}

/// Bitmask of currently pressed pointer buttons
pub type ButtonState = BitFlags<PointerButton>;

/// Whether the pointer is considered "down" for gesture purposes.
///
/// Only the three main buttons drive DOWN/UP transitions; back and forward
/// synthesize key events instead.
pub fn is_pointer_down(state: ButtonState) -> bool {
    state.intersects(PointerButton::Primary | PointerButton::Secondary | PointerButton::Tertiary)
}

/// Map a button bit to the key code it synthesizes, if any
pub fn button_key_code(button: PointerButton) -> Option<KeyCode> {
    match button {
        PointerButton::Back => Some(KeyCode::Back),
        PointerButton::Forward => Some(KeyCode::Forward),
        _ => None,
    }
}

/// Motion event actions
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MotionAction {
    /// Pointer went down (first main button pressed)
    Down,
    /// Pointer went up (last main button released)
    Up,
    /// Motion while down, or any motion on non-pointer sources
    Move,
    /// Motion while hovering (no main button held)
    HoverMove,
    /// Scroll wheel motion
    Scroll,
    /// One button bit was pressed this report
    ButtonPress,
    /// One button bit was released this report
    ButtonRelease,
}

/// Key event actions
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyAction {
    /// Key pressed
    Down,
    /// Key released
    Up,
}

/// Key codes synthesized from button bits
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyCode {
    /// Navigate back
    Back,
    /// Navigate forward
    Forward,
}

/// Dispatch policy flags attached to a batch of events
#[bitflags]
#[repr(u32)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PolicyFlag {
    /// Activity on an externally attached device should wake the system
    Wake = 1 << 0,
}

/// Policy flag bitmask
pub type PolicyFlags = BitFlags<PolicyFlag>;

/// Per-pointer coordinate and axis values for one motion event
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct PointerCoords {
    /// Absolute X (cursor position for pointer sources, delta otherwise)
    pub x: f32,
    /// Absolute Y (cursor position for pointer sources, delta otherwise)
    pub y: f32,
    /// Relative X delta for this report
    pub relative_x: f32,
    /// Relative Y delta for this report
    pub relative_y: f32,
    /// Pressure: 1.0 while any main button is held, else 0.0
    pub pressure: f32,
    /// Vertical scroll value (set on SCROLL events only)
    pub vscroll: f32,
    /// Horizontal scroll value (set on SCROLL events only)
    pub hscroll: f32,
}

/// A motion event descriptor
#[derive(Debug, Clone, PartialEq)]
pub struct MotionArgs {
    /// Sequence id, unique per mapper
    pub id: u32,
    /// Hardware event time
    pub event_time: EventTime,
    /// Time the triggering sample was read from the device
    pub read_time: EventTime,
    /// Device the event originated from
    pub device_id: i32,
    /// Logical source class
    pub source: Source,
    /// Display the event targets
    pub display_id: DisplayId,
    /// Dispatch policy flags
    pub policy_flags: PolicyFlags,
    /// Motion action
    pub action: MotionAction,
    /// The single button bit a BUTTON_PRESS / BUTTON_RELEASE refers to
    pub action_button: Option<PointerButton>,
    /// Button bitmask as of this event
    pub button_state: ButtonState,
    /// Coordinates and axis values
    pub coords: PointerCoords,
    /// X axis precision
    pub x_precision: f32,
    /// Y axis precision
    pub y_precision: f32,
    /// On-screen cursor X, or [`INVALID_CURSOR_POSITION`]
    pub x_cursor_position: f32,
    /// On-screen cursor Y, or [`INVALID_CURSOR_POSITION`]
    pub y_cursor_position: f32,
    /// Start of the current pressed gesture
    pub down_time: EventTime,
}

/// A key event descriptor synthesized from button bits
#[derive(Debug, Clone, PartialEq)]
pub struct KeyArgs {
    /// Sequence id, unique per mapper
    pub id: u32,
    /// Hardware event time
    pub event_time: EventTime,
    /// Time the triggering sample was read from the device
    pub read_time: EventTime,
    /// Device the event originated from
    pub device_id: i32,
    /// Logical source class
    pub source: Source,
    /// Display the event targets
    pub display_id: DisplayId,
    /// Dispatch policy flags
    pub policy_flags: PolicyFlags,
    /// Key action
    pub action: KeyAction,
    /// Synthesized key code
    pub key_code: KeyCode,
    /// Event time of the key-down
    pub down_time: EventTime,
}

/// Notification that a device's state was reset and consumers must
/// re-synchronize
#[derive(Debug, Clone, PartialEq)]
pub struct DeviceResetArgs {
    /// Sequence id, unique per mapper
    pub id: u32,
    /// Time of the reset
    pub event_time: EventTime,
    /// Device that was reset
    pub device_id: i32,
}

/// Synchronous event-delivery seam.
///
/// The mapper calls the sink once per output event, in emission order, from
/// within the report-boundary handler. Calls are expected to be non-blocking.
pub trait EventSink {
    /// Deliver one motion event
    fn notify_motion(&mut self, args: &MotionArgs);

    /// Deliver one key event
    fn notify_key(&mut self, args: &KeyArgs);

    /// Deliver a device-reset notification
    fn notify_device_reset(&mut self, args: &DeviceResetArgs);
}

/// Axes a device can advertise a motion range for
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MotionAxis {
    /// Absolute X
    X,
    /// Absolute Y
    Y,
    /// Relative X
    RelativeX,
    /// Relative Y
    RelativeY,
    /// Pressure
    Pressure,
    /// Vertical scroll
    VScroll,
    /// Horizontal scroll
    HScroll,
}

/// One advertised motion range
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MotionRange {
    /// Axis the range describes
    pub axis: MotionAxis,
    /// Source the range applies to
    pub source: Source,
    /// Minimum value
    pub min: f32,
    /// Maximum value
    pub max: f32,
    /// Center flat region
    pub flat: f32,
    /// Noise fuzz
    pub fuzz: f32,
    /// Units per output unit
    pub resolution: f32,
}

/// Device description populated by the mapper for upstream consumers
#[derive(Debug, Clone, Default)]
pub struct InputDeviceInfo {
    ranges: Vec<MotionRange>,
}

impl InputDeviceInfo {
    /// Create an empty device description
    pub fn new() -> Self {
        Self::default()
    }

    /// Advertise one motion range
    pub fn add_motion_range(&mut self, range: MotionRange) {
        self.ranges.push(range);
    }

    /// Advertised motion ranges, in insertion order
    pub fn motion_ranges(&self) -> &[MotionRange] {
        &self.ranges
    }
}
