use super::touch::{TouchPoint, TouchTracker};
use crate::error::GeometryError;

/// Half-width, in pixels, of the vertical band in which a touch grabs a slider.
pub const SLIDER_TOUCH_BAND: f64 = 40.0;

/// What a slider commands on the robot; also its wire label.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SliderLabel {
    Elevator,
    Claw,
    Omega,
}

impl SliderLabel {
    pub fn as_str(self) -> &'static str {
        match self {
            SliderLabel::Elevator => "Elevator",
            SliderLabel::Claw => "Claw",
            SliderLabel::Omega => "ω",
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SliderGeometry {
    pub center_x: f64,
    pub top_y: f64,
    pub bottom_y: f64,
}

impl SliderGeometry {
    pub fn validate(&self) -> Result<(), GeometryError> {
        if ![self.center_x, self.top_y, self.bottom_y].iter().all(|v| v.is_finite()) {
            return Err(GeometryError::NonFinite);
        }
        if self.bottom_y <= self.top_y {
            return Err(GeometryError::DegenerateSlider {
                top: self.top_y,
                bottom: self.bottom_y,
            });
        }
        Ok(())
    }

    pub fn center_y(&self) -> f64 {
        (self.top_y + self.bottom_y) / 2.0
    }

    pub fn radius(&self) -> f64 {
        (self.bottom_y - self.top_y) / 2.0
    }

    /// Only horizontal distance matters; any height may grab the slider.
    pub fn contains(&self, touch: &TouchPoint) -> bool {
        (touch.x - self.center_x).abs() < SLIDER_TOUCH_BAND
    }
}

impl Default for SliderGeometry {
    fn default() -> Self {
        Self {
            center_x: 0.0,
            top_y: 0.0,
            bottom_y: 2.0,
        }
    }
}

// f64::signum maps 0.0 to 1.0; a centred touch must read as zero.
fn direction(offset: f64) -> f64 {
    if offset > 0.0 {
        1.0
    } else if offset < 0.0 {
        -1.0
    } else {
        0.0
    }
}

#[derive(Debug, Clone)]
pub struct Slider {
    label: SliderLabel,
    return_on_release: bool,
    geometry: SliderGeometry,
    value: f64,
    tracker: TouchTracker,
}

impl Slider {
    pub fn new(label: SliderLabel, return_on_release: bool) -> Self {
        Self {
            label,
            return_on_release,
            geometry: SliderGeometry::default(),
            value: 0.0,
            tracker: TouchTracker::default(),
        }
    }

    pub fn label(&self) -> SliderLabel {
        self.label
    }

    pub fn geometry(&self) -> &SliderGeometry {
        &self.geometry
    }

    pub fn set_geometry(&mut self, geometry: SliderGeometry) -> Result<(), GeometryError> {
        geometry.validate()?;
        self.geometry = geometry;
        Ok(())
    }

    pub fn value(&self) -> f64 {
        self.value
    }

    pub fn active_touch(&self) -> Option<TouchPoint> {
        self.tracker.active()
    }

    pub fn touch_start(&mut self, began: &[TouchPoint]) -> Option<TouchPoint> {
        let geometry = &self.geometry;
        let captured = self.tracker.try_capture(began, |t| geometry.contains(t))?;
        self.value = self.value_at(captured.y);
        Some(captured)
    }

    pub fn touch_move(&mut self, moved: &[TouchPoint]) -> Option<TouchPoint> {
        let updated = self.tracker.try_update(moved)?;
        self.value = self.value_at(updated.y);
        Some(updated)
    }

    /// End and cancel are treated alike.
    pub fn touch_end(&mut self, ended: &[TouchPoint]) -> bool {
        let released = self.tracker.release(ended);
        if released && self.return_on_release {
            self.value = 0.0;
        }
        released
    }

    fn value_at(&self, touch_y: f64) -> f64 {
        let offset = touch_y - self.geometry.center_y();
        direction(offset) * (offset.abs() / self.geometry.radius()).min(1.0)
    }

    /// Screen y of the knob for the current value.
    pub fn knob_y(&self) -> f64 {
        self.geometry.center_y() + self.value * self.geometry.radius()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f64 = 1e-9;

    fn slider(return_on_release: bool) -> Slider {
        let mut s = Slider::new(SliderLabel::Omega, return_on_release);
        s.set_geometry(SliderGeometry {
            center_x: 200.0,
            top_y: 0.0,
            bottom_y: 100.0,
        })
        .unwrap();
        s
    }

    #[test]
    fn returning_slider_reads_and_resets() {
        let mut s = slider(true);
        s.touch_start(&[TouchPoint::new(1, 200.0, 25.0)]);
        assert!((s.value() + 0.5).abs() < EPS);
        assert!(s.touch_end(&[TouchPoint::new(1, 200.0, 25.0)]));
        assert_eq!(s.value(), 0.0);
    }

    #[test]
    fn sticky_slider_keeps_value_until_next_capture() {
        let mut s = slider(false);
        s.touch_start(&[TouchPoint::new(1, 200.0, 75.0)]);
        assert!((s.value() - 0.5).abs() < EPS);
        s.touch_end(&[TouchPoint::new(1, 200.0, 75.0)]);
        assert!((s.value() - 0.5).abs() < EPS);

        s.touch_start(&[TouchPoint::new(2, 200.0, 0.0)]);
        assert!((s.value() + 1.0).abs() < EPS);
    }

    #[test]
    fn dead_centre_is_exactly_zero() {
        // sign(0) is pinned to 0 rather than f64::signum's 1.0.
        let mut s = slider(false);
        s.touch_start(&[TouchPoint::new(1, 200.0, 50.0)]);
        assert_eq!(s.value(), 0.0);
    }

    #[test]
    fn value_stays_in_unit_range() {
        let mut s = slider(false);
        s.touch_start(&[TouchPoint::new(3, 200.0, 50.0)]);
        for y in -500..=600 {
            s.touch_move(&[TouchPoint::new(3, 210.0, y as f64)]);
            assert!((-1.0..=1.0).contains(&s.value()), "value out of range at y={y}");
        }
        s.touch_move(&[TouchPoint::new(3, 200.0, -1000.0)]);
        assert_eq!(s.value(), -1.0);
        s.touch_move(&[TouchPoint::new(3, 200.0, 1000.0)]);
        assert_eq!(s.value(), 1.0);
    }

    #[test]
    fn captures_anywhere_along_band_even_beyond_track() {
        let mut s = slider(false);
        assert!(s.touch_start(&[TouchPoint::new(1, 200.0 + SLIDER_TOUCH_BAND, 50.0)]).is_none());
        assert!(s.touch_start(&[TouchPoint::new(2, 230.0, -300.0)]).is_some());
        assert_eq!(s.value(), -1.0);
    }

    #[test]
    fn release_of_other_touch_leaves_value() {
        let mut s = slider(true);
        s.touch_start(&[TouchPoint::new(1, 200.0, 100.0)]);
        assert!(!s.touch_end(&[TouchPoint::new(8, 200.0, 100.0)]));
        assert_eq!(s.value(), 1.0);
        assert!(s.active_touch().is_some());
    }

    #[test]
    fn rejects_inverted_track() {
        let mut s = slider(true);
        let err = s
            .set_geometry(SliderGeometry {
                center_x: 0.0,
                top_y: 80.0,
                bottom_y: 80.0,
            })
            .unwrap_err();
        assert_eq!(err, GeometryError::DegenerateSlider { top: 80.0, bottom: 80.0 });
        assert_eq!(s.geometry().bottom_y, 100.0);
    }

    #[test]
    fn knob_follows_value() {
        let mut s = slider(false);
        s.touch_start(&[TouchPoint::new(1, 200.0, 90.0)]);
        assert!((s.knob_y() - 90.0).abs() < EPS);
    }
}
