use serde::{Deserialize, Serialize};
use serde_yaml::Value;
use std::collections::BTreeMap;

/// Sequence index and mapping key of the yaw component of an `angle` field.
///
/// Frames store angles as `[roll, yaw, pitch]`, or as a mapping with a
/// `yaw` key. A legacy two element `[roll, yaw]` form lands on the same index.
pub const YAW_INDEX: usize = 1;
pub const YAW_KEY: &str = "yaw";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Axis {
    X,
    Y,
    Z,
}

impl Axis {
    pub const ALL: [Axis; 3] = [Axis::X, Axis::Y, Axis::Z];

    pub fn index(self) -> usize {
        match self {
            Axis::X => 0,
            Axis::Y => 1,
            Axis::Z => 2,
        }
    }

    pub fn key(self) -> &'static str {
        match self {
            Axis::X => "x",
            Axis::Y => "y",
            Axis::Z => "z",
        }
    }
}

/// A `location`, `angle` or `extent` field as it appears in a frame file.
///
/// Both the positional form `[a, b, c]` and the named form `{x: a, y: b, z: c}`
/// are accepted. Anything else is kept verbatim in `Other` so it survives a
/// round trip, and every accessor treats it as absent.
///
/// The named form keeps every entry as written. Only numeric components are
/// read, so an extra key such as `frame: map` does not hide `x`, `y` and `z`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Coords {
    Seq(Vec<f64>),
    Named(BTreeMap<String, Value>),
    Other(Value),
}

impl Coords {
    pub fn from_xyz(x: f64, y: f64, z: f64) -> Self {
        Coords::Seq(vec![x, y, z])
    }

    pub fn component(&self, index: usize, key: &str) -> Option<f64> {
        match self {
            Coords::Seq(values) => values.get(index).copied(),
            Coords::Named(fields) => fields.get(key).and_then(Value::as_f64),
            Coords::Other(_) => None,
        }
    }

    /// Adds `delta` to one component in place. Returns false when the
    /// component does not exist, in which case nothing changes.
    pub fn offset_component(&mut self, index: usize, key: &str, delta: f64) -> bool {
        match self {
            Coords::Seq(values) => match values.get_mut(index) {
                Some(value) => {
                    *value += delta;
                    true
                }
                None => false,
            },
            Coords::Named(fields) => match fields.get_mut(key) {
                Some(value) => match value.as_f64() {
                    Some(current) => {
                        *value = Value::from(current + delta);
                        true
                    }
                    None => false,
                },
                None => false,
            },
            Coords::Other(_) => false,
        }
    }

    pub fn axis(&self, axis: Axis) -> Option<f64> {
        self.component(axis.index(), axis.key())
    }

    pub fn offset_axis(&mut self, axis: Axis, delta: f64) -> bool {
        self.offset_component(axis.index(), axis.key(), delta)
    }

    pub fn is_recognized(&self) -> bool {
        !matches!(self, Coords::Other(_))
    }
}

/// A scalar field such as `speed`. Numbers are read, anything else is kept
/// verbatim and treated as absent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Scalar {
    Num(f64),
    Other(Value),
}

impl Scalar {
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Scalar::Num(value) => Some(*value),
            Scalar::Other(_) => None,
        }
    }
}

impl From<f64> for Scalar {
    fn from(value: f64) -> Self {
        Scalar::Num(value)
    }
}

impl From<Vec<f64>> for Coords {
    fn from(values: Vec<f64>) -> Self {
        Coords::Seq(values)
    }
}

impl From<[f64; 3]> for Coords {
    fn from(values: [f64; 3]) -> Self {
        Coords::Seq(values.to_vec())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_seq_and_named_agree() {
        let seq = Coords::from_xyz(1.0, 2.0, 3.0);
        let mut named = BTreeMap::new();
        named.insert("x".to_string(), Value::from(1.0));
        named.insert("y".to_string(), Value::from(2));
        named.insert("z".to_string(), Value::from(3.0));
        let named = Coords::Named(named);

        for axis in Axis::ALL.iter() {
            assert_eq!(seq.axis(*axis), named.axis(*axis));
        }
    }

    #[test]
    fn test_offset_missing_component_is_noop() {
        let mut short = Coords::Seq(vec![1.0, 2.0]);
        assert!(!short.offset_axis(Axis::Z, 5.0));
        assert_eq!(short, Coords::Seq(vec![1.0, 2.0]));

        let mut other = Coords::Other(Value::String("n/a".into()));
        assert!(!other.offset_axis(Axis::X, 1.0));
        assert!(!other.is_recognized());
    }

    #[test]
    fn test_untagged_deserialize() {
        let seq: Coords = serde_yaml::from_str("[1, 2.5, -3]").unwrap();
        assert_eq!(seq, Coords::Seq(vec![1.0, 2.5, -3.0]));

        let named: Coords = serde_yaml::from_str("{roll: 0.0, yaw: 90}").unwrap();
        assert_eq!(named.component(YAW_INDEX, YAW_KEY), Some(90.0));

        let other: Coords = serde_yaml::from_str("unknown").unwrap();
        assert!(!other.is_recognized());
    }

    #[test]
    fn test_named_form_with_extra_keys() {
        let mut named: Coords = serde_yaml::from_str("{x: 1, y: 2.5, z: 0, frame: map}").unwrap();
        assert!(named.is_recognized());
        assert_eq!(named.axis(Axis::X), Some(1.0));
        assert_eq!(named.axis(Axis::Y), Some(2.5));
        assert_eq!(named.axis(Axis::Z), Some(0.0));

        assert!(named.offset_axis(Axis::X, 0.5));
        assert_eq!(named.axis(Axis::X), Some(1.5));
        assert!(!named.offset_component(0, "frame", 1.0));
        assert_eq!(named.component(0, "frame"), None);
    }

    #[test]
    fn test_scalar_keeps_non_numbers() {
        let speed: Scalar = serde_yaml::from_str("12").unwrap();
        assert_eq!(speed.as_f64(), Some(12.0));

        let unknown: Scalar = serde_yaml::from_str("n/a").unwrap();
        assert_eq!(unknown, Scalar::Other(Value::String("n/a".into())));
        assert_eq!(unknown.as_f64(), None);
    }
}
