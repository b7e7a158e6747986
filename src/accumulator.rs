//! Raw Sample Accumulators
//!
//! Four independent collectors of raw samples between report boundaries.
//! Each exposes `process` for incoming samples, `finish_report` to clear
//! per-report state after a boundary has been handled, and `reset` for a full
//! device reset. Samples that do not concern an accumulator are ignored.

use crate::device::DeviceCapabilities;
use crate::event::ButtonState;
use crate::raw::{AbsoluteAxis, RawEvent, RawEventKind, RelativeAxis, ScrollAxis};

/// Relative motion collector: last write wins within a report
#[derive(Debug, Default)]
pub struct MotionAccumulator {
    rel_x: i32,
    rel_y: i32,
}

impl MotionAccumulator {
    /// Create a cleared accumulator
    pub fn new() -> Self {
        Self::default()
    }

    /// Consume one raw sample
    pub fn process(&mut self, raw: &RawEvent) {
        if let RawEventKind::Relative { axis, value } = raw.kind {
            match axis {
                RelativeAxis::X => self.rel_x = value,
                RelativeAxis::Y => self.rel_y = value,
            }
        }
    }

    /// Relative X delta seen since the last clear
    pub fn relative_x(&self) -> i32 {
        self.rel_x
    }

    /// Relative Y delta seen since the last clear
    pub fn relative_y(&self) -> i32 {
        self.rel_y
    }

    /// Clear per-report deltas
    pub fn finish_report(&mut self) {
        self.rel_x = 0;
        self.rel_y = 0;
    }

    /// Full device reset
    pub fn reset(&mut self) {
        self.finish_report();
    }
}

/// Baseline state of one absolute axis
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
enum AxisBaseline {
    /// No reading observed yet; the first one establishes the baseline
    #[default]
    NoBaseline,
    /// A baseline exists; each reading produces a delta from the previous one
    Tracking,
}

#[derive(Debug, Default)]
struct AbsoluteAxisState {
    baseline: AxisBaseline,
    value: i32,
    delta: i32,
}

impl AbsoluteAxisState {
    fn observe(&mut self, value: i32) {
        match self.baseline {
            AxisBaseline::NoBaseline => {
                self.baseline = AxisBaseline::Tracking;
            }
            AxisBaseline::Tracking => {
                self.delta = value - self.value;
            }
        }
        self.value = value;
    }
}

/// Absolute position collector with per-axis baselines.
///
/// `finish_report` clears only the per-report deltas; the last readings and
/// baselines persist so the next report produces deltas from the previous
/// reading, not from zero.
#[derive(Debug, Default)]
pub struct PositionAccumulator {
    x: AbsoluteAxisState,
    y: AbsoluteAxisState,
    min_abs_x: i32,
    min_abs_y: i32,
    span_x: i32,
    span_y: i32,
    has_abs_x: bool,
    has_abs_y: bool,
}

impl PositionAccumulator {
    /// Create an unconfigured accumulator
    pub fn new() -> Self {
        Self::default()
    }

    /// Read axis presence and ranges from the device capabilities
    pub fn configure(&mut self, capabilities: &DeviceCapabilities) {
        self.has_abs_x = capabilities.abs_x.is_some();
        self.has_abs_y = capabilities.abs_y.is_some();
        if let Some(info) = capabilities.abs_x {
            self.min_abs_x = info.min_value;
            self.span_x = info.span();
        }
        if let Some(info) = capabilities.abs_y {
            self.min_abs_y = info.min_value;
            self.span_y = info.span();
        }
    }

    /// Consume one raw sample
    pub fn process(&mut self, raw: &RawEvent) {
        if let RawEventKind::Absolute { axis, value } = raw.kind {
            match axis {
                AbsoluteAxis::X => self.x.observe(value - self.min_abs_x),
                AbsoluteAxis::Y => self.y.observe(value - self.min_abs_y),
            }
        }
    }

    /// Both absolute axes are present on the device
    pub fn is_supported(&self) -> bool {
        self.has_abs_x && self.has_abs_y
    }

    /// At least one axis has observed a reading
    pub fn moved(&self) -> bool {
        self.x.baseline == AxisBaseline::Tracking || self.y.baseline == AxisBaseline::Tracking
    }

    /// Last X reading, min-corrected
    pub fn x(&self) -> i32 {
        self.x.value
    }

    /// Last Y reading, min-corrected
    pub fn y(&self) -> i32 {
        self.y.value
    }

    /// Per-report X delta from the previous reading
    pub fn delta_x(&self) -> i32 {
        self.x.delta
    }

    /// Per-report Y delta from the previous reading
    pub fn delta_y(&self) -> i32 {
        self.y.delta
    }

    /// X axis span in raw units
    pub fn span_x(&self) -> i32 {
        self.span_x
    }

    /// Y axis span in raw units
    pub fn span_y(&self) -> i32 {
        self.span_y
    }

    /// Clear per-report deltas only; readings and baselines persist
    pub fn finish_report(&mut self) {
        self.x.delta = 0;
        self.y.delta = 0;
    }

    /// Full device reset: drop readings and baselines, keep calibration
    pub fn reset(&mut self) {
        self.x = AbsoluteAxisState::default();
        self.y = AbsoluteAxisState::default();
    }
}

/// Scroll wheel collector: deltas accumulate between clears
#[derive(Debug, Default)]
pub struct ScrollAccumulator {
    rel_vwheel: f32,
    rel_hwheel: f32,
    has_vwheel: bool,
    has_hwheel: bool,
}

impl ScrollAccumulator {
    /// Create an unconfigured accumulator
    pub fn new() -> Self {
        Self::default()
    }

    /// Read wheel presence from the device capabilities
    pub fn configure(&mut self, capabilities: &DeviceCapabilities) {
        self.has_vwheel = capabilities.has_vwheel;
        self.has_hwheel = capabilities.has_hwheel;
    }

    /// Consume one raw sample
    pub fn process(&mut self, raw: &RawEvent) {
        if let RawEventKind::Scroll { axis, value } = raw.kind {
            match axis {
                ScrollAxis::Vertical => self.rel_vwheel += value,
                ScrollAxis::Horizontal => self.rel_hwheel += value,
            }
        }
    }

    /// Vertical wheel physically present
    pub fn have_relative_vwheel(&self) -> bool {
        self.has_vwheel
    }

    /// Horizontal wheel physically present
    pub fn have_relative_hwheel(&self) -> bool {
        self.has_hwheel
    }

    /// Vertical delta accumulated since the last clear
    pub fn relative_vwheel(&self) -> f32 {
        self.rel_vwheel
    }

    /// Horizontal delta accumulated since the last clear
    pub fn relative_hwheel(&self) -> f32 {
        self.rel_hwheel
    }

    /// Clear per-report deltas
    pub fn finish_report(&mut self) {
        self.rel_vwheel = 0.0;
        self.rel_hwheel = 0.0;
    }

    /// Full device reset
    pub fn reset(&mut self) {
        self.finish_report();
    }
}

/// Button state collector: each sample overwrites one bit, state persists
/// across reports until changed
#[derive(Debug, Default)]
pub struct ButtonAccumulator {
    state: ButtonState,
}

impl ButtonAccumulator {
    /// Create a cleared accumulator
    pub fn new() -> Self {
        Self::default()
    }

    /// Consume one raw sample
    pub fn process(&mut self, raw: &RawEvent) {
        if let RawEventKind::Button { button, pressed } = raw.kind {
            if pressed {
                self.state.insert(button);
            } else {
                self.state.remove(button);
            }
        }
    }

    /// Currently pressed buttons
    pub fn button_state(&self) -> ButtonState {
        self.state
    }

    /// Full device reset
    pub fn reset(&mut self) {
        self.state = ButtonState::empty();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::device::RawAbsoluteAxisInfo;
    use crate::event::PointerButton;
    use crate::raw::RawEvent;

    fn rel(axis: RelativeAxis, value: i32) -> RawEvent {
        RawEvent::new(0, RawEventKind::Relative { axis, value })
    }

    fn abs(axis: AbsoluteAxis, value: i32) -> RawEvent {
        RawEvent::new(0, RawEventKind::Absolute { axis, value })
    }

    fn scroll(axis: ScrollAxis, value: f32) -> RawEvent {
        RawEvent::new(0, RawEventKind::Scroll { axis, value })
    }

    fn button(button: PointerButton, pressed: bool) -> RawEvent {
        RawEvent::new(0, RawEventKind::Button { button, pressed })
    }

    fn abs_capabilities() -> DeviceCapabilities {
        DeviceCapabilities {
            abs_x: Some(RawAbsoluteAxisInfo {
                min_value: 100,
                max_value: 1100,
            }),
            abs_y: Some(RawAbsoluteAxisInfo {
                min_value: 0,
                max_value: 500,
            }),
            ..Default::default()
        }
    }

    #[test]
    fn test_motion_last_write_wins() {
        let mut acc = MotionAccumulator::new();
        acc.process(&rel(RelativeAxis::X, 3));
        acc.process(&rel(RelativeAxis::X, 7));
        acc.process(&rel(RelativeAxis::Y, -2));
        assert_eq!(acc.relative_x(), 7);
        assert_eq!(acc.relative_y(), -2);

        acc.finish_report();
        assert_eq!(acc.relative_x(), 0);
        assert_eq!(acc.relative_y(), 0);
    }

    #[test]
    fn test_position_first_sample_establishes_baseline() {
        let mut acc = PositionAccumulator::new();
        acc.configure(&abs_capabilities());

        acc.process(&abs(AbsoluteAxis::X, 600));
        assert!(acc.moved());
        assert_eq!(acc.x(), 500); // min-corrected
        assert_eq!(acc.delta_x(), 0);

        acc.process(&abs(AbsoluteAxis::X, 650));
        assert_eq!(acc.x(), 550);
        assert_eq!(acc.delta_x(), 50);
    }

    #[test]
    fn test_position_axis_baselines_are_independent() {
        let mut acc = PositionAccumulator::new();
        acc.configure(&abs_capabilities());

        acc.process(&abs(AbsoluteAxis::X, 600));
        acc.process(&abs(AbsoluteAxis::X, 700));
        assert_eq!(acc.delta_x(), 100);

        // First-ever Y reading must not produce a delta from zero.
        acc.process(&abs(AbsoluteAxis::Y, 400));
        assert_eq!(acc.delta_y(), 0);
        assert_eq!(acc.y(), 400);
    }

    #[test]
    fn test_position_finish_report_keeps_readings() {
        let mut acc = PositionAccumulator::new();
        acc.configure(&abs_capabilities());

        acc.process(&abs(AbsoluteAxis::X, 600));
        acc.process(&abs(AbsoluteAxis::X, 700));
        acc.finish_report();

        assert_eq!(acc.delta_x(), 0);
        assert_eq!(acc.x(), 600);
        assert!(acc.moved());

        // Next reading is a delta from the persisted value, not from zero.
        acc.process(&abs(AbsoluteAxis::X, 720));
        assert_eq!(acc.delta_x(), 20);
    }

    #[test]
    fn test_position_reset_drops_baseline() {
        let mut acc = PositionAccumulator::new();
        acc.configure(&abs_capabilities());

        acc.process(&abs(AbsoluteAxis::X, 600));
        acc.reset();
        assert!(!acc.moved());

        acc.process(&abs(AbsoluteAxis::X, 900));
        assert_eq!(acc.delta_x(), 0);
        assert_eq!(acc.span_x(), 1000);
        assert_eq!(acc.span_y(), 500);
    }

    #[test]
    fn test_position_supported_requires_both_axes() {
        let mut acc = PositionAccumulator::new();
        acc.configure(&DeviceCapabilities {
            abs_x: Some(RawAbsoluteAxisInfo {
                min_value: 0,
                max_value: 100,
            }),
            ..Default::default()
        });
        assert!(!acc.is_supported());

        acc.configure(&abs_capabilities());
        assert!(acc.is_supported());
    }

    #[test]
    fn test_scroll_accumulates_between_clears() {
        let mut acc = ScrollAccumulator::new();
        acc.configure(&DeviceCapabilities {
            has_vwheel: true,
            ..Default::default()
        });

        acc.process(&scroll(ScrollAxis::Vertical, 1.0));
        acc.process(&scroll(ScrollAxis::Vertical, 0.5));
        acc.process(&scroll(ScrollAxis::Horizontal, -1.0));
        assert_eq!(acc.relative_vwheel(), 1.5);
        assert_eq!(acc.relative_hwheel(), -1.0);
        assert!(acc.have_relative_vwheel());
        assert!(!acc.have_relative_hwheel());

        acc.finish_report();
        assert_eq!(acc.relative_vwheel(), 0.0);
        assert_eq!(acc.relative_hwheel(), 0.0);
    }

    #[test]
    fn test_button_state_persists_across_reports() {
        let mut acc = ButtonAccumulator::new();
        acc.process(&button(PointerButton::Primary, true));
        acc.process(&button(PointerButton::Secondary, true));
        assert_eq!(
            acc.button_state(),
            PointerButton::Primary | PointerButton::Secondary
        );

        // No per-report clearing exists for buttons.
        acc.process(&button(PointerButton::Secondary, false));
        assert_eq!(acc.button_state(), ButtonState::from(PointerButton::Primary));

        acc.reset();
        assert!(acc.button_state().is_empty());
    }

    #[test]
    fn test_unrelated_samples_ignored() {
        let mut motion = MotionAccumulator::new();
        let mut position = PositionAccumulator::new();
        let mut buttons = ButtonAccumulator::new();

        motion.process(&abs(AbsoluteAxis::X, 10));
        position.process(&rel(RelativeAxis::X, 10));
        buttons.process(&scroll(ScrollAxis::Vertical, 1.0));

        assert_eq!(motion.relative_x(), 0);
        assert!(!position.moved());
        assert!(buttons.button_state().is_empty());
    }
}
