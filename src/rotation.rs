//! Display Rotation Correction
//!
//! Pure coordinate rotation applied to relative deltas and absolute positions
//! so that output is expressed in the display's natural frame. The relative
//! transform only swaps axes and flips signs; the absolute transform
//! additionally reflects about the calibrated span so the origin stays in the
//! same visual corner. Span values are in output units (raw span times the
//! absolute scale).

use serde::{Deserialize, Serialize};

/// Display rotation, counter-clockwise
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Rotation {
    /// No rotation
    #[default]
    Deg0,
    /// 90 degrees
    Deg90,
    /// 180 degrees
    Deg180,
    /// 270 degrees
    Deg270,
}

impl Rotation {
    /// The rotation that undoes this one
    pub fn inverse(self) -> Self {
        match self {
            Rotation::Deg0 => Rotation::Deg0,
            Rotation::Deg90 => Rotation::Deg270,
            Rotation::Deg180 => Rotation::Deg180,
            Rotation::Deg270 => Rotation::Deg90,
        }
    }
}

/// Rotate a relative delta pair in place
pub fn rotate_delta(rotation: Rotation, delta_x: &mut f32, delta_y: &mut f32) {
    let temp = *delta_x;
    match rotation {
        Rotation::Deg0 => {}
        Rotation::Deg90 => {
            *delta_x = *delta_y;
            *delta_y = -temp;
        }
        Rotation::Deg180 => {
            *delta_x = -*delta_x;
            *delta_y = -*delta_y;
        }
        Rotation::Deg270 => {
            *delta_x = -*delta_y;
            *delta_y = temp;
        }
    }
}

/// Rotate an absolute position in place, reflecting about the calibrated span
pub fn rotate_absolute(rotation: Rotation, span_x: f32, span_y: f32, x: &mut f32, y: &mut f32) {
    let temp = *x;
    match rotation {
        Rotation::Deg0 => {}
        Rotation::Deg90 => {
            *x = *y;
            *y = span_x - temp;
        }
        Rotation::Deg180 => {
            *x = span_x - *x;
            *y = span_y - *y;
        }
        Rotation::Deg270 => {
            *x = span_y - *y;
            *y = temp;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_inverse() {
        assert_eq!(Rotation::Deg0.inverse(), Rotation::Deg0);
        assert_eq!(Rotation::Deg90.inverse(), Rotation::Deg270);
        assert_eq!(Rotation::Deg180.inverse(), Rotation::Deg180);
        assert_eq!(Rotation::Deg270.inverse(), Rotation::Deg90);
    }

    #[test]
    fn test_rotate_delta_identity() {
        let (mut x, mut y) = (3.0, -4.0);
        rotate_delta(Rotation::Deg0, &mut x, &mut y);
        assert_eq!((x, y), (3.0, -4.0));
    }

    #[test]
    fn test_rotate_delta_quadrants() {
        let (mut x, mut y) = (3.0, -4.0);
        rotate_delta(Rotation::Deg90, &mut x, &mut y);
        assert_eq!((x, y), (-4.0, -3.0));

        let (mut x, mut y) = (3.0, -4.0);
        rotate_delta(Rotation::Deg180, &mut x, &mut y);
        assert_eq!((x, y), (-3.0, 4.0));

        let (mut x, mut y) = (3.0, -4.0);
        rotate_delta(Rotation::Deg270, &mut x, &mut y);
        assert_eq!((x, y), (4.0, 3.0));
    }

    #[test]
    fn test_rotate_absolute_quadrants() {
        // 100x100 span, point at (10, 30)
        let (mut x, mut y) = (10.0, 30.0);
        rotate_absolute(Rotation::Deg90, 100.0, 100.0, &mut x, &mut y);
        assert_eq!((x, y), (30.0, 90.0));

        let (mut x, mut y) = (10.0, 30.0);
        rotate_absolute(Rotation::Deg180, 100.0, 100.0, &mut x, &mut y);
        assert_eq!((x, y), (90.0, 70.0));

        let (mut x, mut y) = (10.0, 30.0);
        rotate_absolute(Rotation::Deg270, 100.0, 100.0, &mut x, &mut y);
        assert_eq!((x, y), (70.0, 10.0));
    }

    proptest! {
        #[test]
        fn prop_four_quarter_turns_round_trip(
            x in 0.0f32..1000.0,
            y in 0.0f32..1000.0,
            span in 1000.0f32..2000.0,
        ) {
            let (mut rx, mut ry) = (x, y);
            for _ in 0..4 {
                rotate_absolute(Rotation::Deg90, span, span, &mut rx, &mut ry);
            }
            prop_assert!((rx - x).abs() < 1e-3);
            prop_assert!((ry - y).abs() < 1e-3);
        }

        #[test]
        fn prop_delta_rotation_preserves_magnitude(
            x in -500.0f32..500.0,
            y in -500.0f32..500.0,
        ) {
            for rotation in [Rotation::Deg0, Rotation::Deg90, Rotation::Deg180, Rotation::Deg270] {
                let (mut rx, mut ry) = (x, y);
                rotate_delta(rotation, &mut rx, &mut ry);
                prop_assert!((rx.hypot(ry) - x.hypot(y)).abs() < 1e-3);
            }
        }
    }
}
