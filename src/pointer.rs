//! Pointer Service Seam
//!
//! Non-owning interface to the on-screen pointer renderer. The mapper holds a
//! shared handle obtained from the device registry at configuration time and
//! treats every call as synchronous, non-blocking, and idempotent under
//! repetition. An absent handle is a normal state: the mapper then reports
//! invalid cursor coordinates instead of aborting the report.

use std::cell::RefCell;
use std::rc::Rc;

use crate::event::{ButtonState, DisplayId};

/// How the pointer icon is presented
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Presentation {
    /// Regular pointer icon
    Pointer,
    /// Touch-spot presentation
    Spot,
}

/// Fade/unfade transition style
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FadeTransition {
    /// Apply instantly
    Immediate,
    /// Animate gradually
    Gradual,
}

/// Screen-space bounds the pointer position is clamped to
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointerBounds {
    /// Left edge
    pub min_x: f32,
    /// Top edge
    pub min_y: f32,
    /// Right edge
    pub max_x: f32,
    /// Bottom edge
    pub max_y: f32,
}

/// External pointer service contract.
///
/// Implementations own clamping: `set_position` and `move_by` clamp to the
/// current display bounds, and `position` reports the post-clamp location.
#[cfg_attr(test, mockall::automock)]
pub trait PointerController {
    /// Current pointer bounds, if a display is active
    fn bounds(&self) -> Option<PointerBounds>;

    /// Move the pointer by a delta, clamping to bounds
    fn move_by(&mut self, delta_x: f32, delta_y: f32);

    /// Place the pointer at an absolute position, clamping to bounds
    fn set_position(&mut self, x: f32, y: f32);

    /// Current (post-clamp) pointer position
    fn position(&self) -> (f32, f32);

    /// Hide the pointer icon
    fn fade(&mut self, transition: FadeTransition);

    /// Show the pointer icon
    fn unfade(&mut self, transition: FadeTransition);

    /// Switch the presentation style
    fn set_presentation(&mut self, presentation: Presentation);

    /// Mirror the authoritative button state for icon feedback
    fn set_button_state(&mut self, state: ButtonState);

    /// Display the pointer is currently shown on
    fn display_id(&self) -> Option<DisplayId>;
}

/// Shared, non-owning handle to a pointer controller.
///
/// The mapper is single-threaded by contract, so a `Rc<RefCell<..>>` is
/// sufficient; the registry that created the controller keeps it alive for
/// the mapper's lifetime.
pub type PointerHandle = Rc<RefCell<dyn PointerController>>;
