pub mod controls;
pub mod joystick;
pub mod slider;
pub mod touch;

pub use controls::Controls;
pub use touch::TouchPoint;
