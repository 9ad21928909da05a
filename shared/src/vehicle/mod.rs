pub mod id;
pub mod transform;

pub use id::*;
pub use transform::*;

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// State of one vehicle as reported in a frame.
///
/// Only the fields the attacks touch are typed. Everything else the dataset
/// stores per vehicle ends up in `extra` and is written back untouched.
#[derive(Debug, Clone, PartialEq, Default, Deserialize, Serialize)]
pub struct VehicleState {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub angle: Option<Coords>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub center: Option<serde_yaml::Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub extent: Option<Coords>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<Coords>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub speed: Option<Scalar>,
    #[serde(flatten)]
    pub extra: BTreeMap<String, serde_yaml::Value>,
}

impl VehicleState {
    pub fn at(location: [f64; 3]) -> Self {
        Self {
            location: Some(location.into()),
            ..Default::default()
        }
    }

    pub fn coordinate(&self, axis: Axis) -> Option<f64> {
        self.location.as_ref().and_then(|l| l.axis(axis))
    }

    /// Full `(x, y, z)` position, or `None` if any component is missing.
    pub fn position(&self) -> Option<[f64; 3]> {
        Some([
            self.coordinate(Axis::X)?,
            self.coordinate(Axis::Y)?,
            self.coordinate(Axis::Z)?,
        ])
    }

    pub fn offset_coordinate(&mut self, axis: Axis, delta: f64) -> bool {
        match self.location.as_mut() {
            Some(location) => location.offset_axis(axis, delta),
            None => false,
        }
    }

    /// Shifts the location by `delta`. All three components must exist,
    /// otherwise the vehicle is left as it was and false is returned.
    pub fn shift_position(&mut self, delta: [f64; 3]) -> bool {
        if self.position().is_none() {
            return false;
        }
        for axis in Axis::ALL.iter() {
            self.offset_coordinate(*axis, delta[axis.index()]);
        }
        true
    }

    /// Shifts only x and y. Works on two element locations as well.
    pub fn shift_planar(&mut self, dx: f64, dy: f64) -> bool {
        if self.coordinate(Axis::X).is_none() || self.coordinate(Axis::Y).is_none() {
            return false;
        }
        self.offset_coordinate(Axis::X, dx);
        self.offset_coordinate(Axis::Y, dy);
        true
    }

    /// Numeric speed. A non-numeric `speed` reads as absent.
    pub fn speed(&self) -> Option<f64> {
        self.speed.as_ref().and_then(Scalar::as_f64)
    }

    pub fn set_speed(&mut self, speed: f64) {
        self.speed = Some(Scalar::Num(speed));
    }

    pub fn yaw(&self) -> Option<f64> {
        self.angle
            .as_ref()
            .and_then(|a| a.component(YAW_INDEX, YAW_KEY))
    }

    pub fn offset_yaw(&mut self, delta: f64) -> bool {
        match self.angle.as_mut() {
            Some(angle) => angle.offset_component(YAW_INDEX, YAW_KEY, delta),
            None => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_shift_position_requires_three_components() {
        let mut vehicle = VehicleState {
            location: Some(Coords::Seq(vec![1.0, 2.0])),
            ..Default::default()
        };
        assert!(!vehicle.shift_position([1.0, 1.0, 1.0]));
        assert_eq!(vehicle.location, Some(Coords::Seq(vec![1.0, 2.0])));

        assert!(vehicle.shift_planar(1.0, -1.0));
        assert_eq!(vehicle.location, Some(Coords::Seq(vec![2.0, 1.0])));
    }

    #[test]
    fn test_yaw_in_both_forms() {
        let mut seq = VehicleState {
            angle: Some(Coords::Seq(vec![0.0, 45.0, 0.0])),
            ..Default::default()
        };
        assert_eq!(seq.yaw(), Some(45.0));
        assert!(seq.offset_yaw(5.0));
        assert_eq!(seq.yaw(), Some(50.0));

        let mut named = BTreeMap::new();
        named.insert("yaw".to_string(), serde_yaml::Value::from(-10.0));
        let mut named = VehicleState {
            angle: Some(Coords::Named(named)),
            ..Default::default()
        };
        assert!(named.offset_yaw(10.0));
        assert_eq!(named.yaw(), Some(0.0));

        let mut legacy = VehicleState {
            angle: Some(Coords::Seq(vec![0.0, 30.0])),
            ..Default::default()
        };
        assert_eq!(legacy.yaw(), Some(30.0));
        assert!(legacy.offset_yaw(1.0));
    }

    #[test]
    fn test_missing_fields_are_absent() {
        let mut vehicle = VehicleState::default();
        assert_eq!(vehicle.position(), None);
        assert_eq!(vehicle.yaw(), None);
        assert!(!vehicle.shift_planar(1.0, 1.0));
        assert!(!vehicle.offset_yaw(1.0));
    }
}
