use serde::{Deserialize, Serialize};
use std::fmt;

/// Identifier of a vehicle inside a frame.
///
/// Datasets key vehicles by integer, but hand edited or converted frames
/// sometimes carry the same ids as strings. `loosely_matches` compares the
/// textual forms so `641` and `"641"` name the same vehicle.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum VehicleId {
    Int(i64),
    Str(String),
}

impl VehicleId {
    pub fn loosely_matches(&self, other: &VehicleId) -> bool {
        self == other || self.to_string() == other.to_string()
    }

    /// Converts a config value into an id. Integral floats are accepted so a
    /// `641.0` typed into a scenario file still resolves.
    pub fn from_value(value: &serde_yaml::Value) -> Option<Self> {
        match value {
            serde_yaml::Value::Number(n) => {
                if let Some(i) = n.as_i64() {
                    Some(VehicleId::Int(i))
                } else {
                    n.as_f64()
                        .filter(|f| f.is_finite() && f.fract() == 0.0)
                        .map(|f| VehicleId::Int(f as i64))
                }
            }
            serde_yaml::Value::String(s) => Some(VehicleId::Str(s.clone())),
            _ => None,
        }
    }
}

impl fmt::Display for VehicleId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            VehicleId::Int(id) => write!(f, "{}", id),
            VehicleId::Str(id) => write!(f, "{}", id),
        }
    }
}

impl From<i64> for VehicleId {
    fn from(id: i64) -> Self {
        VehicleId::Int(id)
    }
}

impl From<i32> for VehicleId {
    fn from(id: i32) -> Self {
        VehicleId::Int(id as i64)
    }
}

impl From<&str> for VehicleId {
    fn from(id: &str) -> Self {
        VehicleId::Str(id.to_string())
    }
}

impl From<String> for VehicleId {
    fn from(id: String) -> Self {
        VehicleId::Str(id)
    }
}
