//! Wire model for the control stream.
//! One `ControlSnapshot` is encoded as a JSON text frame per animation tick.

use serde::{Deserialize, Serialize};

use crate::error::StreamError;
pub use crate::state::joystick::StickVector;

#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SliderValues {
    #[serde(rename = "Elevator")]
    pub elevator: f64,
    #[serde(rename = "Claw")]
    pub claw: f64,
    /// Rotation rate.
    #[serde(rename = "ω")]
    pub omega: f64,
}

/// All widget values at one tick. Missing fields decode as zero, matching
/// what the robot-side consumer assumes for a partial message.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ControlSnapshot {
    pub joystick: StickVector,
    pub sliders: SliderValues,
}

impl ControlSnapshot {
    pub fn to_json(&self) -> Result<String, StreamError> {
        Ok(serde_json::to_string(self)?)
    }

    #[cfg(test)]
    pub fn from_json(raw: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(raw)
    }
}
