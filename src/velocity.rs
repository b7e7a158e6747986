//! Velocity Smoothing
//!
//! Stateful acceleration transform applied to pointer and wheel deltas. The
//! numerical model is deliberately simple and not part of the mapper's
//! contract; the mapper only relies on the parameter seam, in particular on
//! the identity parameter set used while pointer capture is active.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{MapperError, Result};
use crate::raw::EventTime;

/// Movement older than this no longer contributes to speed estimation
const MOVEMENT_TIMEOUT_NS: EventTime = 500_000_000;

/// Named parameter set for a velocity control instance
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct VelocityControlParameters {
    /// Base gain applied to every delta
    pub scale: f32,
    /// Speed (units/s) below which no acceleration is applied
    pub low_threshold: f32,
    /// Speed (units/s) above which full acceleration is applied
    pub high_threshold: f32,
    /// Gain multiplier at and above the high threshold
    pub acceleration: f32,
}

impl VelocityControlParameters {
    /// The no-op parameter set: deltas pass through unmodified
    pub const FLAT: Self = Self {
        scale: 1.0,
        low_threshold: 0.0,
        high_threshold: 0.0,
        acceleration: 1.0,
    };

    /// Check that the parameters describe an applicable transform
    pub fn validate(&self) -> Result<()> {
        if !(self.scale > 0.0) {
            return Err(MapperError::InvalidVelocityParameters(format!(
                "scale must be positive, got {}",
                self.scale
            )));
        }
        if !(self.acceleration >= 1.0) {
            return Err(MapperError::InvalidVelocityParameters(format!(
                "acceleration must be at least 1.0, got {}",
                self.acceleration
            )));
        }
        if self.high_threshold < self.low_threshold {
            return Err(MapperError::InvalidVelocityParameters(
                "high threshold below low threshold".to_string(),
            ));
        }
        Ok(())
    }

    fn is_flat(&self) -> bool {
        self.scale == 1.0 && self.acceleration == 1.0
    }
}

impl Default for VelocityControlParameters {
    fn default() -> Self {
        Self::FLAT
    }
}

/// One velocity control instance, exclusively owned by its mapper
#[derive(Debug, Clone)]
pub struct VelocityControl {
    parameters: VelocityControlParameters,
    last_movement_time: Option<EventTime>,
    smoothed_speed: f32,
}

impl VelocityControl {
    /// Create a control with the no-op parameter set
    pub fn new() -> Self {
        Self {
            parameters: VelocityControlParameters::FLAT,
            last_movement_time: None,
            smoothed_speed: 0.0,
        }
    }

    /// Replace the parameter set and drop accumulated speed state
    pub fn set_parameters(&mut self, parameters: VelocityControlParameters) {
        debug!(?parameters, "velocity control reconfigured");
        self.parameters = parameters;
        self.reset();
    }

    /// Current parameter set
    pub fn parameters(&self) -> &VelocityControlParameters {
        &self.parameters
    }

    /// Drop accumulated speed state
    pub fn reset(&mut self) {
        self.last_movement_time = None;
        self.smoothed_speed = 0.0;
    }

    /// Transform a delta pair in place. Axes passed as `None` are untouched,
    /// which lets the two wheel controls each own a single axis.
    pub fn apply(
        &mut self,
        when: EventTime,
        delta_x: Option<&mut f32>,
        delta_y: Option<&mut f32>,
    ) {
        let dx = delta_x.as_ref().map_or(0.0, |v| **v);
        let dy = delta_y.as_ref().map_or(0.0, |v| **v);
        if dx == 0.0 && dy == 0.0 {
            return;
        }

        let gain = if self.parameters.is_flat() {
            1.0
        } else {
            self.parameters.scale * self.acceleration_for(when, dx.hypot(dy))
        };

        if let Some(x) = delta_x {
            *x *= gain;
        }
        if let Some(y) = delta_y {
            *y *= gain;
        }
    }

    fn acceleration_for(&mut self, when: EventTime, magnitude: f32) -> f32 {
        let speed = match self.last_movement_time {
            Some(last) if when > last && when - last < MOVEMENT_TIMEOUT_NS => {
                magnitude / ((when - last) as f32 * 1e-9)
            }
            _ => 0.0,
        };
        self.last_movement_time = Some(when);

        // Exponential smoothing keeps single-report spikes from toggling
        // acceleration on and off.
        self.smoothed_speed = 0.5 * self.smoothed_speed + 0.5 * speed;

        let params = &self.parameters;
        if self.smoothed_speed <= params.low_threshold {
            1.0
        } else if self.smoothed_speed >= params.high_threshold {
            params.acceleration
        } else {
            let t = (self.smoothed_speed - params.low_threshold)
                / (params.high_threshold - params.low_threshold);
            1.0 + t * (params.acceleration - 1.0)
        }
    }
}

impl Default for VelocityControl {
    fn default() -> Self {
        Self::new()
    }
}
