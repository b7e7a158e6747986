//! Reader Configuration
//!
//! The slice of input-reader configuration the cursor mapper consumes:
//! pointer capture request, velocity parameters, the force-mouse-as-touch
//! override, and the display viewport table. A reconfiguration call carries a
//! set of change flags; an empty set means first-time configuration.

use enumflags2::{bitflags, BitFlags};
use serde::{Deserialize, Serialize};

use crate::error::{MapperError, Result};
use crate::event::DisplayId;
use crate::rotation::Rotation;
use crate::velocity::VelocityControlParameters;

/// Which part of the configuration changed in a reconfiguration call
#[bitflags]
#[repr(u32)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigChange {
    /// Pointer capture was requested or released
    PointerCapture = 1 << 0,
    /// Display viewports changed
    DisplayInfo = 1 << 1,
    /// Pointer speed / acceleration settings changed
    PointerSpeed = 1 << 2,
    /// Force-mouse-as-touch toggled
    ForceMouseAsTouch = 1 << 3,
}

/// Set of reconfiguration change flags; empty means first-time configuration
pub type ConfigChanges = BitFlags<ConfigChange>;

/// One display viewport: identity, rotation, and physical extent
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DisplayViewport {
    /// Display identifier
    pub display_id: DisplayId,
    /// Current display rotation
    pub orientation: Rotation,
    /// Physical left edge in output units
    pub physical_left: i32,
    /// Physical top edge in output units
    pub physical_top: i32,
    /// Physical right edge in output units
    pub physical_right: i32,
    /// Physical bottom edge in output units
    pub physical_bottom: i32,
}

impl DisplayViewport {
    /// Physical width in output units
    pub fn physical_width(&self) -> i32 {
        self.physical_right - self.physical_left
    }

    /// Physical height in output units
    pub fn physical_height(&self) -> i32 {
        self.physical_bottom - self.physical_top
    }

    /// Reject viewports with a degenerate physical extent
    pub fn validate(&self) -> Result<()> {
        if self.physical_width() <= 0 || self.physical_height() <= 0 {
            return Err(MapperError::InvalidViewport {
                display_id: self.display_id,
                reason: format!(
                    "physical extent {}x{} is not positive",
                    self.physical_width(),
                    self.physical_height()
                ),
            });
        }
        Ok(())
    }
}

/// Mapper-relevant reader configuration
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct MapperConfig {
    /// Pointer capture requested by a focused consumer
    pub pointer_capture: bool,
    /// Acceleration parameters for pointer motion
    pub pointer_velocity_control_parameters: VelocityControlParameters,
    /// Acceleration parameters for both wheel axes
    pub wheel_velocity_control_parameters: VelocityControlParameters,
    /// Present mouse input as touchscreen input
    pub force_mouse_as_touch: bool,
    /// Known display viewports
    pub display_viewports: Vec<DisplayViewport>,
}

impl MapperConfig {
    /// Look up a viewport by display id
    pub fn viewport_by_id(&self, display_id: DisplayId) -> Option<&DisplayViewport> {
        self.display_viewports
            .iter()
            .find(|viewport| viewport.display_id == display_id)
    }

    /// Structural validation helper for the embedding layer. The mapper
    /// itself never rejects a configuration; semantic inconsistencies are
    /// logged and skipped per the error taxonomy.
    pub fn validate(&self) -> Result<()> {
        self.pointer_velocity_control_parameters.validate()?;
        self.wheel_velocity_control_parameters.validate()?;
        for viewport in &self.display_viewports {
            viewport.validate()?;
        }
        Ok(())
    }
}
