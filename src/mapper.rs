//! Cursor Input Mapper
//!
//! Per-device state machine that turns accumulated raw samples into a
//! calibrated, ordered stream of motion, scroll, and button events. One
//! mapper instance is bound to one physical device; personality (pointer,
//! capture-relative, navigation) and calibration are resolved from
//! configuration, and the sync engine runs once per report boundary.

use tracing::{debug, error, warn};

use crate::accumulator::{
    ButtonAccumulator, MotionAccumulator, PositionAccumulator, ScrollAccumulator,
};
use crate::config::{ConfigChange, ConfigChanges, MapperConfig};
use crate::device::DeviceContext;
use crate::error::Result;
use crate::event::{
    button_key_code, is_pointer_down, ButtonState, DeviceResetArgs, DisplayId, EventSink,
    InputDeviceInfo, KeyAction, KeyArgs, MotionAction, MotionArgs, MotionAxis, MotionRange,
    PointerCoords, PolicyFlag, PolicyFlags, Source, INVALID_CURSOR_POSITION,
};
use crate::pointer::{FadeTransition, PointerHandle, Presentation};
use crate::raw::{EventTime, RawEvent, RawEventKind};
use crate::rotation::{rotate_absolute, rotate_delta, Rotation};
use crate::velocity::{VelocityControl, VelocityControlParameters};

/// Movement threshold for navigation (trackball) devices, in device units.
/// Scale is its reciprocal so one threshold of travel maps to 1.0 output.
pub const TRACKBALL_MOVEMENT_THRESHOLD: f32 = 6.0;

/// Device personality
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    /// On-screen pointer device
    Pointer,
    /// Pointer with capture active: raw deltas, no on-screen pointer.
    /// Reachable only through a capture transition from [`Mode::Pointer`].
    PointerRelative,
    /// Navigation device (trackball)
    Navigation,
}

/// Immutable-between-reconfigurations device parameters
#[derive(Debug, Clone, Copy)]
struct Parameters {
    mode: Mode,
    orientation_aware: bool,
    has_associated_display: bool,
}

impl Default for Parameters {
    fn default() -> Self {
        Self {
            mode: Mode::Pointer,
            orientation_aware: false,
            has_associated_display: false,
        }
    }
}

/// Explicit pressed-gesture state. The released state remembers the last
/// gesture's down time so the report that ends a gesture (and any trailing
/// hover) still carries it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum GestureState {
    Released { last_down_time: EventTime },
    Pressed { down_time: EventTime },
}

impl GestureState {
    fn down_time(self) -> EventTime {
        match self {
            GestureState::Released { last_down_time } => last_down_time,
            GestureState::Pressed { down_time } => down_time,
        }
    }
}

impl Default for GestureState {
    fn default() -> Self {
        GestureState::Released { last_down_time: 0 }
    }
}

/// Per-device cursor input mapper
pub struct CursorMapper {
    device: DeviceContext,

    parameters: Parameters,
    source: Source,

    // Relative motion calibration
    x_scale: f32,
    y_scale: f32,
    x_precision: f32,
    y_precision: f32,

    // Emulated-absolute calibration
    abs_x_scale: f32,
    abs_y_scale: f32,
    abs_x_precision: f32,
    abs_y_precision: f32,

    // Scroll calibration
    v_wheel_scale: f32,
    h_wheel_scale: f32,

    display_id: Option<DisplayId>,
    orientation: Rotation,
    button_state: ButtonState,
    gesture: GestureState,
    generation: u32,
    next_event_id: u32,

    pointer_controller: Option<PointerHandle>,

    pointer_velocity_control: VelocityControl,
    wheel_x_velocity_control: VelocityControl,
    wheel_y_velocity_control: VelocityControl,

    motion_accumulator: MotionAccumulator,
    position_accumulator: PositionAccumulator,
    scroll_accumulator: ScrollAccumulator,
    button_accumulator: ButtonAccumulator,
}

impl CursorMapper {
    /// Create a mapper for one device. Fails only on structurally invalid
    /// capability descriptions (for example an empty absolute axis range).
    pub fn new(device: DeviceContext) -> Result<Self> {
        device.capabilities.validate()?;
        Ok(Self {
            device,
            parameters: Parameters::default(),
            source: Source::Mouse,
            x_scale: 1.0,
            y_scale: 1.0,
            x_precision: 1.0,
            y_precision: 1.0,
            abs_x_scale: 1.0,
            abs_y_scale: 1.0,
            abs_x_precision: 1.0,
            abs_y_precision: 1.0,
            v_wheel_scale: 1.0,
            h_wheel_scale: 1.0,
            display_id: None,
            orientation: Rotation::Deg0,
            button_state: ButtonState::empty(),
            gesture: GestureState::default(),
            generation: 0,
            next_event_id: 0,
            pointer_controller: None,
            pointer_velocity_control: VelocityControl::new(),
            wheel_x_velocity_control: VelocityControl::new(),
            wheel_y_velocity_control: VelocityControl::new(),
            motion_accumulator: MotionAccumulator::new(),
            position_accumulator: PositionAccumulator::new(),
            scroll_accumulator: ScrollAccumulator::new(),
            button_accumulator: ButtonAccumulator::new(),
        })
    }

    /// Logical source class currently presented upstream
    pub fn source(&self) -> Source {
        self.source
    }

    /// Current device personality
    pub fn mode(&self) -> Mode {
        self.parameters.mode
    }

    /// Display this mapper currently emits to, if any
    pub fn associated_display_id(&self) -> Option<DisplayId> {
        self.display_id
    }

    /// Rotation correction currently applied to output
    pub fn orientation(&self) -> Rotation {
        self.orientation
    }

    /// Authoritative last-known button bitmask
    pub fn button_state(&self) -> ButtonState {
        self.button_state
    }

    /// Opaque invalidation token, bumped whenever output geometry changes
    pub fn generation(&self) -> u32 {
        self.generation
    }

    /// Advertise motion ranges for upstream consumers
    pub fn populate_device_info(&self, info: &mut InputDeviceInfo) {
        if self.parameters.mode == Mode::Pointer {
            if let Some(bounds) = self
                .pointer_controller
                .as_ref()
                .and_then(|pc| pc.borrow().bounds())
            {
                info.add_motion_range(MotionRange {
                    axis: MotionAxis::X,
                    source: self.source,
                    min: bounds.min_x,
                    max: bounds.max_x,
                    flat: 0.0,
                    fuzz: 0.0,
                    resolution: 0.0,
                });
                info.add_motion_range(MotionRange {
                    axis: MotionAxis::Y,
                    source: self.source,
                    min: bounds.min_y,
                    max: bounds.max_y,
                    flat: 0.0,
                    fuzz: 0.0,
                    resolution: 0.0,
                });
            }
        } else {
            for axis in [
                MotionAxis::X,
                MotionAxis::Y,
                MotionAxis::RelativeX,
                MotionAxis::RelativeY,
            ] {
                let resolution = match axis {
                    MotionAxis::X | MotionAxis::RelativeX => self.x_scale,
                    _ => self.y_scale,
                };
                info.add_motion_range(MotionRange {
                    axis,
                    source: self.source,
                    min: -1.0,
                    max: 1.0,
                    flat: 0.0,
                    fuzz: 0.0,
                    resolution,
                });
            }
        }

        info.add_motion_range(MotionRange {
            axis: MotionAxis::Pressure,
            source: self.source,
            min: 0.0,
            max: 1.0,
            flat: 0.0,
            fuzz: 0.0,
            resolution: 0.0,
        });

        if self.scroll_accumulator.have_relative_vwheel() {
            info.add_motion_range(MotionRange {
                axis: MotionAxis::VScroll,
                source: self.source,
                min: -1.0,
                max: 1.0,
                flat: 0.0,
                fuzz: 0.0,
                resolution: 0.0,
            });
        }
        if self.scroll_accumulator.have_relative_hwheel() {
            info.add_motion_range(MotionRange {
                axis: MotionAxis::HScroll,
                source: self.source,
                min: -1.0,
                max: 1.0,
                flat: 0.0,
                fuzz: 0.0,
                resolution: 0.0,
            });
        }
    }

    /// Apply configuration. An empty `changes` set means first-time
    /// configuration; otherwise only the flagged aspects are re-resolved.
    /// Configuration inconsistencies are logged and leave state at its last
    /// valid value.
    pub fn configure(
        &mut self,
        when: EventTime,
        config: &MapperConfig,
        changes: ConfigChanges,
        sink: &mut dyn EventSink,
    ) {
        let first_time = changes.is_empty();

        if first_time {
            self.scroll_accumulator.configure(&self.device.capabilities);
            self.position_accumulator
                .configure(&self.device.capabilities);

            self.configure_parameters();

            if self.parameters.mode == Mode::PointerRelative {
                // Capture mode is only reachable via a transition.
                error!(
                    device = %self.device.name,
                    "cannot start a device in pointer-relative mode, starting in pointer mode"
                );
                self.parameters.mode = Mode::Pointer;
            }
            match self.parameters.mode {
                Mode::Pointer | Mode::PointerRelative => {
                    self.source = Source::Mouse;
                    self.x_precision = 1.0;
                    self.y_precision = 1.0;
                    self.x_scale = 1.0;
                    self.y_scale = 1.0;
                    self.pointer_controller = self.device.pointer_controller.clone();
                    if self.pointer_controller.is_none() {
                        warn!(
                            device = %self.device.name,
                            "no pointer controller available, cursor positions will be invalid"
                        );
                    }
                }
                Mode::Navigation => {
                    self.source = Source::Trackball;
                    self.x_precision = TRACKBALL_MOVEMENT_THRESHOLD;
                    self.y_precision = TRACKBALL_MOVEMENT_THRESHOLD;
                    self.x_scale = 1.0 / TRACKBALL_MOVEMENT_THRESHOLD;
                    self.y_scale = 1.0 / TRACKBALL_MOVEMENT_THRESHOLD;
                }
            }

            self.v_wheel_scale = 1.0;
            self.h_wheel_scale = 1.0;
            self.abs_x_precision = 1.0;
            self.abs_y_precision = 1.0;
            self.abs_x_scale = 1.0;
            self.abs_y_scale = 1.0;
        }

        let configure_capture = self.parameters.mode != Mode::Navigation
            && ((first_time && config.pointer_capture)
                || changes.contains(ConfigChange::PointerCapture));
        // A rejected capture toggle must leave everything untouched, so the
        // follow-up blocks key off the actual transition, not the request.
        let mut capture_transitioned = false;
        if configure_capture {
            if config.pointer_capture {
                if self.parameters.mode == Mode::Pointer {
                    self.parameters.mode = Mode::PointerRelative;
                    self.source = Source::MouseRelative;
                    // Keep the pointer controller alive to preserve the
                    // pointer position across capture sessions.
                    if let Some(pc) = &self.pointer_controller {
                        pc.borrow_mut().fade(FadeTransition::Immediate);
                    }
                    debug!(device = %self.device.name, "pointer capture enabled");
                    capture_transitioned = true;
                } else {
                    error!(
                        device = %self.device.name,
                        "cannot request pointer capture, device is not in pointer mode"
                    );
                }
            } else if self.parameters.mode == Mode::PointerRelative {
                self.parameters.mode = Mode::Pointer;
                self.source = Source::Mouse;
                debug!(device = %self.device.name, "pointer capture released");
                capture_transitioned = true;
            } else {
                error!(
                    device = %self.device.name,
                    "cannot release pointer capture, device is not in pointer-relative mode"
                );
            }

            if capture_transitioned {
                self.bump_generation();
                if !first_time {
                    let args = DeviceResetArgs {
                        id: self.next_id(),
                        event_time: when,
                        device_id: self.device.device_id,
                    };
                    sink.notify_device_reset(&args);
                }
            }
        }

        if first_time || changes.contains(ConfigChange::PointerSpeed) || capture_transitioned {
            if self.parameters.mode == Mode::PointerRelative {
                // A capturing consumer gets raw deltas: no acceleration, no
                // scaling, on any of the three filters.
                self.pointer_velocity_control
                    .set_parameters(VelocityControlParameters::FLAT);
                self.wheel_x_velocity_control
                    .set_parameters(VelocityControlParameters::FLAT);
                self.wheel_y_velocity_control
                    .set_parameters(VelocityControlParameters::FLAT);
            } else {
                self.pointer_velocity_control
                    .set_parameters(config.pointer_velocity_control_parameters);
                self.wheel_x_velocity_control
                    .set_parameters(config.wheel_velocity_control_parameters);
                self.wheel_y_velocity_control
                    .set_parameters(config.wheel_velocity_control_parameters);
            }
        }

        if first_time || changes.contains(ConfigChange::ForceMouseAsTouch) || capture_transitioned {
            match self.parameters.mode {
                Mode::PointerRelative => self.source = Source::MouseRelative,
                Mode::Pointer => {
                    self.source = if config.force_mouse_as_touch {
                        Source::Touchscreen
                    } else {
                        Source::Mouse
                    };
                }
                // The touch override never applies to navigation devices.
                Mode::Navigation => {}
            }
        }

        if first_time || changes.contains(ConfigChange::DisplayInfo) || capture_transitioned {
            self.resolve_display(config);
            self.bump_generation();
        }
    }

    fn resolve_display(&mut self, config: &MapperConfig) {
        let is_pointer = self.parameters.mode == Mode::Pointer;
        let owns_pointer = self.pointer_controller.is_some()
            && matches!(self.parameters.mode, Mode::Pointer | Mode::PointerRelative);
        let pointer_display = self
            .pointer_controller
            .as_ref()
            .and_then(|pc| pc.borrow().display_id());

        self.display_id = None;
        if let Some(viewport) = self.device.associated_viewport {
            // Only generate events for the associated display, and leave the
            // binding absent rather than mismatched if the system pointer is
            // currently shown elsewhere.
            let mismatched_pointer_display =
                is_pointer && pointer_display.is_some_and(|id| id != viewport.display_id);
            if !mismatched_pointer_display {
                self.display_id = Some(viewport.display_id);
            }
        } else if owns_pointer {
            // No explicit viewport, but this device controls the pointer.
            self.display_id = pointer_display;
        }

        // Output is produced in the un-rotated display frame. A device that
        // is not orientation-aware needs the inverse display rotation applied
        // here so the downstream per-window rotation restores screen space.
        // Under pointer capture no rotation is applied at all.
        self.orientation = Rotation::Deg0;
        let oriented_device =
            self.parameters.orientation_aware && self.parameters.has_associated_display;
        if !oriented_device && self.parameters.mode != Mode::PointerRelative {
            if let Some(viewport) = self
                .display_id
                .and_then(|id| config.viewport_by_id(id))
            {
                self.orientation = viewport.orientation.inverse();
            }
        }

        if self.position_accumulator.is_supported() {
            if let Some(viewport) = self
                .display_id
                .and_then(|id| config.viewport_by_id(id))
            {
                self.abs_x_scale =
                    viewport.physical_width() as f32 / self.position_accumulator.span_x() as f32;
                self.abs_y_scale =
                    viewport.physical_height() as f32 / self.position_accumulator.span_y() as f32;
                self.abs_x_precision = 1.0 / self.abs_x_scale;
                self.abs_y_precision = 1.0 / self.abs_y_scale;
            }
        }

        debug!(
            device = %self.device.name,
            display_id = ?self.display_id,
            orientation = ?self.orientation,
            "display binding resolved"
        );
    }

    fn configure_parameters(&mut self) {
        self.parameters.mode = Mode::Pointer;
        if let Some(mode) = self.device.configuration.get_string("cursor.mode") {
            match mode {
                "navigation" => self.parameters.mode = Mode::Navigation,
                "pointer" | "default" => {}
                other => warn!(value = other, "invalid value for cursor.mode"),
            }
        }

        self.parameters.orientation_aware = self
            .device
            .configuration
            .get_bool("cursor.orientationAware")
            .unwrap_or(false);

        self.parameters.has_associated_display =
            self.parameters.mode == Mode::Pointer || self.parameters.orientation_aware;
    }

    /// Full device reset: clears runtime state and all accumulators.
    /// Parameters and calibration are untouched; those only change through
    /// [`CursorMapper::configure`].
    pub fn reset(&mut self, when: EventTime) {
        debug!(device = %self.device.name, when, "device reset");
        self.button_state = ButtonState::empty();
        self.gesture = GestureState::default();

        self.pointer_velocity_control.reset();
        self.wheel_x_velocity_control.reset();
        self.wheel_y_velocity_control.reset();

        self.button_accumulator.reset();
        self.motion_accumulator.reset();
        self.position_accumulator.reset();
        self.scroll_accumulator.reset();
    }

    /// Feed one raw sample. A report-boundary sample triggers the sync
    /// engine; everything else only updates the accumulators. Samples that
    /// map to no consumed axis are silently ignored.
    pub fn process(&mut self, raw: &RawEvent, sink: &mut dyn EventSink) {
        self.button_accumulator.process(raw);
        self.motion_accumulator.process(raw);
        self.position_accumulator.process(raw);
        self.scroll_accumulator.process(raw);

        if raw.kind == RawEventKind::ReportSync {
            self.sync(raw.when, raw.read_time, sink);
        }
    }

    fn sync(&mut self, when: EventTime, read_time: EventTime, sink: &mut dyn EventSink) {
        let Some(display_id) = self.display_id else {
            // No target display: hold the report. Accumulators keep their
            // pending deltas so the first report after a display becomes
            // bound catches up on them.
            debug!(device = %self.device.name, "no display bound, holding report");
            return;
        };

        let last_button_state = self.button_state;
        let current_button_state = self.button_accumulator.button_state();
        self.button_state = current_button_state;

        let was_down = is_pointer_down(last_button_state);
        let down = is_pointer_down(current_button_state);
        let down_changed = was_down != down;
        if !was_down && down {
            self.gesture = GestureState::Pressed { down_time: when };
        } else if was_down && !down {
            self.gesture = GestureState::Released {
                last_down_time: self.gesture.down_time(),
            };
        }
        let down_time = self.gesture.down_time();

        let buttons_changed = current_button_state != last_button_state;
        let buttons_pressed = current_button_state & !last_button_state;
        let buttons_released = last_button_state & !current_button_state;

        let mut delta_x = self.motion_accumulator.relative_x() as f32 * self.x_scale;
        let mut delta_y = self.motion_accumulator.relative_y() as f32 * self.y_scale;
        let moved = delta_x != 0.0 || delta_y != 0.0;
        rotate_delta(self.orientation, &mut delta_x, &mut delta_y);

        let mut abs_x = self.position_accumulator.x() as f32 * self.abs_x_scale;
        let mut abs_y = self.position_accumulator.y() as f32 * self.abs_y_scale;
        let moved_abs = self.position_accumulator.moved() && abs_x >= 0.0 && abs_y >= 0.0;
        let span_x = self.position_accumulator.span_x() as f32 * self.abs_x_scale;
        let span_y = self.position_accumulator.span_y() as f32 * self.abs_y_scale;
        rotate_absolute(self.orientation, span_x, span_y, &mut abs_x, &mut abs_y);

        if !moved && moved_abs {
            // Delta emulation: an absolute device that is "grabbed" reports
            // the difference between consecutive readings as relative motion.
            delta_x = self.position_accumulator.delta_x() as f32 * self.x_scale;
            delta_y = self.position_accumulator.delta_y() as f32 * self.y_scale;
            rotate_delta(self.orientation, &mut delta_x, &mut delta_y);
        }

        let mut vscroll = self.scroll_accumulator.relative_vwheel() * self.v_wheel_scale;
        let mut hscroll = self.scroll_accumulator.relative_hwheel() * self.h_wheel_scale;
        let scrolled = vscroll != 0.0 || hscroll != 0.0;

        // Each wheel filter owns a single axis; the pointer filter smooths
        // the delta pair jointly.
        self.wheel_y_velocity_control
            .apply(when, None, Some(&mut vscroll));
        self.wheel_x_velocity_control
            .apply(when, Some(&mut hscroll), None);
        self.pointer_velocity_control
            .apply(when, Some(&mut delta_x), Some(&mut delta_y));

        let mut x_cursor_position = INVALID_CURSOR_POSITION;
        let mut y_cursor_position = INVALID_CURSOR_POSITION;
        let mut coords = PointerCoords::default();

        if self.source.is_pointer_like() {
            if let Some(pc) = self.pointer_controller.clone() {
                let mut pc = pc.borrow_mut();
                if moved || moved_abs || scrolled || buttons_changed {
                    pc.set_presentation(Presentation::Pointer);

                    if moved {
                        pc.move_by(delta_x, delta_y);
                    } else if moved_abs {
                        // Report the actual post-clamp position change so
                        // clamping at screen edges does not inflate deltas.
                        let (prev_x, prev_y) = pc.position();
                        pc.set_position(abs_x, abs_y);
                        let (new_x, new_y) = pc.position();
                        delta_x = new_x - prev_x;
                        delta_y = new_y - prev_y;
                    }

                    if buttons_changed {
                        pc.set_button_state(current_button_state);
                    }

                    pc.unfade(FadeTransition::Immediate);
                }

                let (px, py) = pc.position();
                x_cursor_position = px;
                y_cursor_position = py;
            }

            coords.x = x_cursor_position;
            coords.y = y_cursor_position;
            coords.relative_x = delta_x;
            coords.relative_y = delta_y;
        } else {
            // Capture and navigation sources have no independent absolute
            // position; the delta is duplicated into both coordinate pairs.
            coords.x = delta_x;
            coords.y = delta_y;
            coords.relative_x = delta_x;
            coords.relative_y = delta_y;
        }
        coords.pressure = if down { 1.0 } else { 0.0 };

        // Activity on an external device wakes the system; built-in devices
        // must not wake it from a pocket.
        let mut policy_flags = PolicyFlags::empty();
        if (!buttons_pressed.is_empty() || moved || moved_abs || scrolled)
            && self.device.capabilities.external
        {
            policy_flags |= PolicyFlag::Wake;
        }

        self.synthesize_button_keys(
            KeyAction::Down,
            buttons_pressed,
            when,
            read_time,
            display_id,
            policy_flags,
            sink,
        );

        if down_changed || moved || moved_abs || scrolled || buttons_changed {
            let (x_precision, y_precision) = if !moved && moved_abs {
                (self.abs_x_precision, self.abs_y_precision)
            } else {
                (self.x_precision, self.y_precision)
            };

            let action = if down_changed {
                if down {
                    MotionAction::Down
                } else {
                    MotionAction::Up
                }
            } else if down || !self.source.is_pointer_like() {
                MotionAction::Move
            } else {
                MotionAction::HoverMove
            };

            let template = MotionArgs {
                id: 0,
                event_time: when,
                read_time,
                device_id: self.device.device_id,
                source: self.source,
                display_id,
                policy_flags,
                action,
                action_button: None,
                button_state: current_button_state,
                coords,
                x_precision,
                y_precision,
                x_cursor_position,
                y_cursor_position,
                down_time,
            };

            // Release one bit at a time, in ascending bit order, each event
            // carrying the bitmask after that bit's removal.
            let mut reconstructed = last_button_state;
            for button in buttons_released.iter() {
                reconstructed.remove(button);
                let mut args = template.clone();
                args.id = self.next_id();
                args.action = MotionAction::ButtonRelease;
                args.action_button = Some(button);
                args.button_state = reconstructed;
                sink.notify_motion(&args);
            }

            let mut args = template.clone();
            args.id = self.next_id();
            sink.notify_motion(&args);

            for button in buttons_pressed.iter() {
                reconstructed.insert(button);
                let mut args = template.clone();
                args.id = self.next_id();
                args.action = MotionAction::ButtonPress;
                args.action_button = Some(button);
                args.button_state = reconstructed;
                sink.notify_motion(&args);
            }

            if reconstructed != current_button_state {
                error!(
                    device = %self.device.name,
                    ?reconstructed,
                    current = ?current_button_state,
                    "button bitmask reconstruction mismatch"
                );
                debug_assert_eq!(reconstructed, current_button_state);
            }

            // A trailing hover after UP tells consumers the pointer is
            // hovering now.
            if action == MotionAction::Up && self.source.is_pointer_like() {
                let mut args = template.clone();
                args.id = self.next_id();
                args.action = MotionAction::HoverMove;
                sink.notify_motion(&args);
            }

            if scrolled {
                let mut args = template;
                args.id = self.next_id();
                args.action = MotionAction::Scroll;
                args.coords.vscroll = vscroll;
                args.coords.hscroll = hscroll;
                sink.notify_motion(&args);
            }
        }

        self.synthesize_button_keys(
            KeyAction::Up,
            buttons_released,
            when,
            read_time,
            display_id,
            policy_flags,
            sink,
        );

        self.motion_accumulator.finish_report();
        self.position_accumulator.finish_report();
        self.scroll_accumulator.finish_report();
    }

    #[allow(clippy::too_many_arguments)]
    fn synthesize_button_keys(
        &mut self,
        action: KeyAction,
        buttons: ButtonState,
        when: EventTime,
        read_time: EventTime,
        display_id: DisplayId,
        policy_flags: PolicyFlags,
        sink: &mut dyn EventSink,
    ) {
        for button in buttons.iter() {
            if let Some(key_code) = button_key_code(button) {
                let args = KeyArgs {
                    id: self.next_id(),
                    event_time: when,
                    read_time,
                    device_id: self.device.device_id,
                    source: self.source,
                    display_id,
                    policy_flags,
                    action,
                    key_code,
                    down_time: when,
                };
                sink.notify_key(&args);
            }
        }
    }

    fn bump_generation(&mut self) {
        self.generation = self.generation.wrapping_add(1);
    }

    fn next_id(&mut self) -> u32 {
        self.next_event_id = self.next_event_id.wrapping_add(1);
        self.next_event_id
    }
}
