//! Device Context
//!
//! Capability and configuration collaborators queried at configure time:
//! named property lookup, absolute axis ranges, scroll axis presence, and the
//! device's optional viewport association and pointer-service handle. Nothing
//! here is touched on the per-report hot path.

use std::collections::HashMap;

use tracing::warn;

use crate::config::DisplayViewport;
use crate::error::{MapperError, Result};
use crate::pointer::PointerHandle;

/// Named string/boolean device properties from the configuration provider
#[derive(Debug, Clone, Default)]
pub struct DeviceConfiguration {
    properties: HashMap<String, String>,
}

impl DeviceConfiguration {
    /// Create an empty property set
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a property value
    pub fn set(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.properties.insert(key.into(), value.into());
    }

    /// Look up a string property
    pub fn get_string(&self, key: &str) -> Option<&str> {
        self.properties.get(key).map(String::as_str)
    }

    /// Look up a boolean property. Unparseable values are reported and
    /// treated as absent.
    pub fn get_bool(&self, key: &str) -> Option<bool> {
        let value = self.properties.get(key)?;
        match value.as_str() {
            "1" | "true" => Some(true),
            "0" | "false" => Some(false),
            other => {
                warn!(key, value = other, "ignoring unparseable boolean property");
                None
            }
        }
    }
}

/// Raw range of one absolute axis as reported by the device
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RawAbsoluteAxisInfo {
    /// Minimum raw value
    pub min_value: i32,
    /// Maximum raw value
    pub max_value: i32,
}

impl RawAbsoluteAxisInfo {
    /// Axis span in raw units
    pub fn span(&self) -> i32 {
        self.max_value - self.min_value
    }
}

/// Axis presence and ranges reported by the device
#[derive(Debug, Clone, Default)]
pub struct DeviceCapabilities {
    /// Absolute X axis, if present
    pub abs_x: Option<RawAbsoluteAxisInfo>,
    /// Absolute Y axis, if present
    pub abs_y: Option<RawAbsoluteAxisInfo>,
    /// Vertical scroll wheel present
    pub has_vwheel: bool,
    /// Horizontal scroll wheel present
    pub has_hwheel: bool,
    /// Device is externally attached (not built in)
    pub external: bool,
}

impl DeviceCapabilities {
    /// Reject absolute axes whose range cannot be calibrated
    pub fn validate(&self) -> Result<()> {
        if let Some(info) = self.abs_x {
            if info.span() <= 0 {
                return Err(MapperError::InvalidAxisRange {
                    axis: "ABS_X",
                    min: info.min_value,
                    max: info.max_value,
                });
            }
        }
        if let Some(info) = self.abs_y {
            if info.span() <= 0 {
                return Err(MapperError::InvalidAxisRange {
                    axis: "ABS_Y",
                    min: info.min_value,
                    max: info.max_value,
                });
            }
        }
        Ok(())
    }
}

/// Everything the mapper needs to know about its device, fixed at
/// construction
#[derive(Clone)]
pub struct DeviceContext {
    /// Device identifier used in emitted events
    pub device_id: i32,
    /// Human-readable device name, for diagnostics
    pub name: String,
    /// Named device properties
    pub configuration: DeviceConfiguration,
    /// Axis presence and ranges
    pub capabilities: DeviceCapabilities,
    /// Viewport this device is explicitly associated with, if any
    pub associated_viewport: Option<DisplayViewport>,
    /// Pointer service handle from the device registry, if the registry
    /// provides one for this device
    pub pointer_controller: Option<PointerHandle>,
}

impl std::fmt::Debug for DeviceContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DeviceContext")
            .field("device_id", &self.device_id)
            .field("name", &self.name)
            .field("capabilities", &self.capabilities)
            .field("associated_viewport", &self.associated_viewport)
            .field(
                "pointer_controller",
                &self.pointer_controller.as_ref().map(|_| "<handle>"),
            )
            .finish_non_exhaustive()
    }
}
