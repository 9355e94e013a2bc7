use serde::{Deserialize, Serialize};

use super::touch::{TouchPoint, TouchTracker};
use crate::error::GeometryError;

/// Offset of the held touch from the joystick centre.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Polar {
    /// Radians, screen coordinates (y grows downward).
    pub angle: f64,
    /// Clamped to `outer_radius - inner_radius`.
    pub distance: f64,
}

/// Normalized stick deflection; both components lie in [-1, 1].
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StickVector {
    pub x: f64,
    pub y: f64,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct JoystickGeometry {
    pub center_x: f64,
    pub center_y: f64,
    pub inner_radius: f64,
    pub outer_radius: f64,
}

impl JoystickGeometry {
    pub fn validate(&self) -> Result<(), GeometryError> {
        let all = [self.center_x, self.center_y, self.inner_radius, self.outer_radius];
        if all.iter().any(|v| !v.is_finite()) {
            return Err(GeometryError::NonFinite);
        }
        if self.outer_radius <= self.inner_radius {
            return Err(GeometryError::DegenerateJoystick {
                inner: self.inner_radius,
                outer: self.outer_radius,
            });
        }
        Ok(())
    }

    /// A touch qualifies only if it starts strictly inside the outer ring.
    pub fn contains(&self, touch: &TouchPoint) -> bool {
        (touch.x - self.center_x).hypot(touch.y - self.center_y) < self.outer_radius
    }

    /// Travel available to the knob before it is clamped.
    pub fn travel(&self) -> f64 {
        self.outer_radius - self.inner_radius
    }
}

impl Default for JoystickGeometry {
    // Placeholder until the first layout pass.
    fn default() -> Self {
        Self {
            center_x: 0.0,
            center_y: 0.0,
            inner_radius: 1.0,
            outer_radius: 2.0,
        }
    }
}

#[derive(Default, Debug, Clone)]
pub struct Joystick {
    geometry: JoystickGeometry,
    tracker: TouchTracker,
}

impl Joystick {
    pub fn geometry(&self) -> &JoystickGeometry {
        &self.geometry
    }

    /// Replaces the geometry; an invalid one is rejected and the old one kept.
    pub fn set_geometry(&mut self, geometry: JoystickGeometry) -> Result<(), GeometryError> {
        geometry.validate()?;
        self.geometry = geometry;
        Ok(())
    }

    pub fn active_touch(&self) -> Option<TouchPoint> {
        self.tracker.active()
    }

    pub fn touch_start(&mut self, began: &[TouchPoint]) -> Option<TouchPoint> {
        let geometry = &self.geometry;
        self.tracker.try_capture(began, |t| geometry.contains(t))
    }

    pub fn touch_move(&mut self, moved: &[TouchPoint]) -> Option<TouchPoint> {
        self.tracker.try_update(moved)
    }

    pub fn touch_end(&mut self, ended: &[TouchPoint]) -> bool {
        self.tracker.release(ended)
    }

    pub fn polar_value(&self) -> Polar {
        let Some(touch) = self.tracker.active() else {
            return Polar::default();
        };
        let g = &self.geometry;
        let dx = touch.x - g.center_x;
        let dy = touch.y - g.center_y;
        Polar {
            angle: dy.atan2(dx),
            distance: dx.hypot(dy).min(g.travel()),
        }
    }

    pub fn cartesian_value(&self) -> StickVector {
        let Polar { angle, distance } = self.polar_value();
        let travel = self.geometry.travel();
        StickVector {
            x: (distance * angle.cos() / travel).clamp(-1.0, 1.0),
            y: (distance * angle.sin() / travel).clamp(-1.0, 1.0),
        }
    }

    /// Knob position on screen, following the clamped offset.
    pub fn knob_position(&self) -> (f64, f64) {
        let Polar { angle, distance } = self.polar_value();
        (
            self.geometry.center_x + distance * angle.cos(),
            self.geometry.center_y + distance * angle.sin(),
        )
    }
}
