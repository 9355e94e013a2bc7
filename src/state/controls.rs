use super::joystick::{Joystick, JoystickGeometry};
use super::slider::{Slider, SliderGeometry, SliderLabel};
use super::touch::TouchPoint;
use crate::error::GeometryError;
use crate::model::{ControlSnapshot, SliderValues};
use crate::surface::DrawSurface;

/// Knob radius as a fraction of the joystick's outer ring.
pub const KNOB_RATIO: f64 = 0.4;
const SLIDER_KNOB_RADIUS: f64 = 22.0;

/// Every widget on the control surface. Touch events are offered to the
/// joystick first, then to the sliders left to right.
#[derive(Debug, Clone)]
pub struct Controls {
    pub joystick: Joystick,
    pub sliders: [Slider; 3],
}

impl Default for Controls {
    fn default() -> Self {
        Self {
            joystick: Joystick::default(),
            sliders: [
                Slider::new(SliderLabel::Elevator, false),
                Slider::new(SliderLabel::Claw, false),
                Slider::new(SliderLabel::Omega, true),
            ],
        }
    }
}

impl Controls {
    /// Assigns widget geometry for a `width` x `height` canvas: the stick in
    /// the left half, sliders spread over the right half.
    pub fn layout(&mut self, width: f64, height: f64) -> Result<(), GeometryError> {
        let half = width / 2.0;
        let outer = 0.35 * half.min(height);
        self.joystick.set_geometry(JoystickGeometry {
            center_x: half / 2.0,
            center_y: height / 2.0,
            inner_radius: outer * KNOB_RATIO,
            outer_radius: outer,
        })?;
        let spacing = half / (self.sliders.len() + 1) as f64;
        for (i, slider) in self.sliders.iter_mut().enumerate() {
            slider.set_geometry(SliderGeometry {
                center_x: half + spacing * (i + 1) as f64,
                top_y: height * 0.15,
                bottom_y: height * 0.85,
            })?;
        }
        log::debug!("layout {width}x{height}: stick radius {outer:.1}");
        Ok(())
    }

    pub fn touch_start(&mut self, began: &[TouchPoint]) {
        let mut pending: Vec<TouchPoint> = began.to_vec();
        if let Some(t) = self.joystick.touch_start(&pending) {
            pending.retain(|p| p.identifier != t.identifier);
        }
        for slider in &mut self.sliders {
            if let Some(t) = slider.touch_start(&pending) {
                pending.retain(|p| p.identifier != t.identifier);
            }
        }
    }

    pub fn touch_move(&mut self, moved: &[TouchPoint]) {
        self.joystick.touch_move(moved);
        for slider in &mut self.sliders {
            slider.touch_move(moved);
        }
    }

    /// Handles both `touchend` and `touchcancel`.
    pub fn touch_end(&mut self, ended: &[TouchPoint]) {
        self.joystick.touch_end(ended);
        for slider in &mut self.sliders {
            slider.touch_end(ended);
        }
    }

    pub fn snapshot(&self) -> ControlSnapshot {
        let mut sliders = SliderValues::default();
        for slider in &self.sliders {
            let slot = match slider.label() {
                SliderLabel::Elevator => &mut sliders.elevator,
                SliderLabel::Claw => &mut sliders.claw,
                SliderLabel::Omega => &mut sliders.omega,
            };
            *slot = slider.value();
        }
        ControlSnapshot {
            joystick: self.joystick.cartesian_value(),
            sliders,
        }
    }

    pub fn draw<S: DrawSurface + ?Sized>(&self, surface: &mut S) {
        let g = self.joystick.geometry();
        surface.draw_circle_outline(g.center_x, g.center_y, g.outer_radius);
        let (kx, ky) = self.joystick.knob_position();
        let alpha = if self.joystick.active_touch().is_some() { 0.9 } else { 0.5 };
        surface.draw_filled_circle(kx, ky, g.inner_radius, alpha);

        for slider in &self.sliders {
            let sg = slider.geometry();
            surface.draw_circle_outline(sg.center_x, sg.top_y, SLIDER_KNOB_RADIUS);
            surface.draw_circle_outline(sg.center_x, sg.bottom_y, SLIDER_KNOB_RADIUS);
            let alpha = if slider.active_touch().is_some() { 0.9 } else { 0.5 };
            surface.draw_filled_circle(sg.center_x, slider.knob_y(), SLIDER_KNOB_RADIUS, alpha);
            surface.draw_text(
                slider.label().as_str(),
                sg.center_x,
                sg.top_y - SLIDER_KNOB_RADIUS - 12.0,
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn laid_out() -> Controls {
        let mut c = Controls::default();
        c.layout(1000.0, 600.0).unwrap();
        c
    }

    #[test]
    fn layout_places_widgets_without_overlap() {
        let c = laid_out();
        let g = c.joystick.geometry();
        assert_eq!((g.center_x, g.center_y), (250.0, 300.0));
        assert!((g.outer_radius - 175.0).abs() < 1e-9);
        assert!(g.outer_radius > g.inner_radius);
        let xs: Vec<f64> = c.sliders.iter().map(|s| s.geometry().center_x).collect();
        assert_eq!(xs, vec![625.0, 750.0, 875.0]);
        assert!(xs.iter().all(|x| x - g.center_x > g.outer_radius));
    }

    #[test]
    fn layout_rejects_empty_canvas_and_keeps_previous() {
        let mut c = laid_out();
        assert!(c.layout(0.0, 0.0).is_err());
        assert_eq!(c.joystick.geometry().center_x, 250.0);
    }

    #[test]
    fn one_touch_is_never_shared() {
        let mut c = laid_out();
        // Move slider 0 on top of the joystick so both would accept the touch.
        let g = *c.joystick.geometry();
        c.sliders[0]
            .set_geometry(SliderGeometry {
                center_x: g.center_x,
                top_y: 100.0,
                bottom_y: 500.0,
            })
            .unwrap();
        c.touch_start(&[TouchPoint::new(1, g.center_x, g.center_y)]);
        assert!(c.joystick.active_touch().is_some());
        assert!(c.sliders[0].active_touch().is_none());
    }

    #[test]
    fn multitouch_drives_widgets_independently() {
        let mut c = laid_out();
        c.touch_start(&[
            TouchPoint::new(10, 250.0, 300.0),
            TouchPoint::new(11, 875.0, 40.0),
        ]);
        c.touch_start(&[TouchPoint::new(12, 625.0, 560.0)]);
        c.touch_move(&[TouchPoint::new(10, 250.0 + 500.0, 300.0)]);

        let snap = c.snapshot();
        assert!((snap.joystick.x - 1.0).abs() < 1e-9);
        assert_eq!(snap.sliders.omega, -1.0);
        assert_eq!(snap.sliders.elevator, 1.0);
        assert_eq!(snap.sliders.claw, 0.0);

        c.touch_end(&[TouchPoint::new(11, 0.0, 0.0), TouchPoint::new(12, 0.0, 0.0)]);
        let snap = c.snapshot();
        assert_eq!(snap.sliders.omega, 0.0);
        assert_eq!(snap.sliders.elevator, 1.0);
        assert!((snap.joystick.x - 1.0).abs() < 1e-9);

        c.touch_end(&[TouchPoint::new(10, 0.0, 0.0)]);
        assert_eq!(c.snapshot().joystick, Default::default());
    }
}
