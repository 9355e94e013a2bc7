// Touch correlation shared by every widget.

/// A single touch point in canvas-local pixels.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TouchPoint {
    pub identifier: i32,
    pub x: f64,
    pub y: f64,
}

impl TouchPoint {
    pub fn new(identifier: i32, x: f64, y: f64) -> Self {
        Self { identifier, x, y }
    }
}

/// Holds at most one touch, matched across events by identifier only.
#[derive(Default, Debug, Clone)]
pub struct TouchTracker {
    active: Option<TouchPoint>,
}

impl TouchTracker {
    pub fn active(&self) -> Option<TouchPoint> {
        self.active
    }

    /// Captures the first newly-began touch accepted by `accepts`.
    /// Does nothing while a touch is already held.
    pub fn try_capture<F>(&mut self, began: &[TouchPoint], accepts: F) -> Option<TouchPoint>
    where
        F: Fn(&TouchPoint) -> bool,
    {
        if self.active.is_some() {
            return None;
        }
        let captured = began.iter().copied().find(|t| accepts(t))?;
        self.active = Some(captured);
        Some(captured)
    }

    /// Moves the held touch if `moved` carries its identifier.
    pub fn try_update(&mut self, moved: &[TouchPoint]) -> Option<TouchPoint> {
        let held = self.active.as_mut()?;
        let next = moved.iter().find(|t| t.identifier == held.identifier)?;
        held.x = next.x;
        held.y = next.y;
        Some(*held)
    }

    /// Clears the held touch if `ended` carries its identifier.
    pub fn release(&mut self, ended: &[TouchPoint]) -> bool {
        let Some(held) = self.active else {
            return false;
        };
        if ended.iter().any(|t| t.identifier == held.identifier) {
            self.active = None;
            true
        } else {
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn anywhere(_: &TouchPoint) -> bool {
        true
    }

    #[test]
    fn captures_first_accepted_touch_in_arrival_order() {
        let mut tracker = TouchTracker::default();
        let began = [
            TouchPoint::new(1, 500.0, 0.0),
            TouchPoint::new(2, 10.0, 0.0),
            TouchPoint::new(3, 20.0, 0.0),
        ];
        let captured = tracker.try_capture(&began, |t| t.x < 100.0);
        assert_eq!(captured.map(|t| t.identifier), Some(2));
        assert_eq!(tracker.active().map(|t| t.identifier), Some(2));
    }

    #[test]
    fn capture_is_noop_when_nothing_qualifies() {
        let mut tracker = TouchTracker::default();
        let began = [TouchPoint::new(1, 500.0, 0.0)];
        assert!(tracker.try_capture(&began, |t| t.x < 100.0).is_none());
        assert!(tracker.active().is_none());
    }

    #[test]
    fn capture_while_holding_keeps_original_touch() {
        let mut tracker = TouchTracker::default();
        tracker.try_capture(&[TouchPoint::new(7, 1.0, 1.0)], anywhere);
        for id in 8..12 {
            assert!(tracker.try_capture(&[TouchPoint::new(id, 2.0, 2.0)], anywhere).is_none());
        }
        assert_eq!(tracker.active(), Some(TouchPoint::new(7, 1.0, 1.0)));
    }

    #[test]
    fn update_matches_by_identifier_not_position() {
        let mut tracker = TouchTracker::default();
        tracker.try_capture(&[TouchPoint::new(4, 10.0, 10.0)], anywhere);

        // Another finger lands exactly where ours was; it must not be picked up.
        assert!(tracker.try_update(&[TouchPoint::new(5, 10.0, 10.0)]).is_none());
        assert_eq!(tracker.active(), Some(TouchPoint::new(4, 10.0, 10.0)));

        let moved = tracker.try_update(&[
            TouchPoint::new(5, 0.0, 0.0),
            TouchPoint::new(4, 30.0, -5.0),
        ]);
        assert_eq!(moved, Some(TouchPoint::new(4, 30.0, -5.0)));
    }

    #[test]
    fn update_without_held_touch_does_nothing() {
        let mut tracker = TouchTracker::default();
        assert!(tracker.try_update(&[TouchPoint::new(1, 3.0, 3.0)]).is_none());
        assert!(tracker.active().is_none());
    }

    #[test]
    fn release_of_unknown_identifier_is_noop() {
        let mut tracker = TouchTracker::default();
        tracker.try_capture(&[TouchPoint::new(1, 3.0, 3.0)], anywhere);
        assert!(!tracker.release(&[TouchPoint::new(2, 3.0, 3.0)]));
        assert_eq!(tracker.active(), Some(TouchPoint::new(1, 3.0, 3.0)));
    }

    #[test]
    fn release_clears_and_allows_new_capture() {
        let mut tracker = TouchTracker::default();
        tracker.try_capture(&[TouchPoint::new(1, 3.0, 3.0)], anywhere);
        assert!(tracker.release(&[TouchPoint::new(1, 9.0, 9.0)]));
        assert!(tracker.active().is_none());
        assert!(!tracker.release(&[TouchPoint::new(1, 9.0, 9.0)]));

        let captured = tracker.try_capture(&[TouchPoint::new(2, 4.0, 4.0)], anywhere);
        assert_eq!(captured.map(|t| t.identifier), Some(2));
    }
}
