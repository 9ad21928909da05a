use log::debug;
use serde::{Deserialize, Serialize};
use serde_yaml::Value;
use shared::VehicleId;
use std::collections::BTreeMap;

/// The `parameters:` mapping of an attack config.
///
/// Getters never fail: a missing key, or a value of the wrong type, yields the
/// supplied default. Unknown keys are ignored.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(transparent)]
pub struct Parameters(BTreeMap<String, Value>);

impl Parameters {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, key: &str, value: impl Into<Value>) -> Self {
        self.insert(key, value);
        self
    }

    pub fn insert(&mut self, key: &str, value: impl Into<Value>) {
        self.0.insert(key.to_string(), value.into());
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key).filter(|v| !v.is_null())
    }

    /// First present key out of `keys`. Used for renamed parameters.
    pub fn first_of(&self, keys: &[&str]) -> Option<&Value> {
        keys.iter().find_map(|key| self.get(key))
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(|k| k.as_str())
    }

    pub fn f64_or(&self, key: &str, default: f64) -> f64 {
        self.f64_of(&[key], default)
    }

    pub fn f64_of(&self, keys: &[&str], default: f64) -> f64 {
        match self.first_of(keys) {
            None => default,
            Some(value) => value.as_f64().unwrap_or_else(|| {
                debug!("parameter {:?} = {:?} is not a number, using {}", keys, value, default);
                default
            }),
        }
    }

    /// Like `f64_or`, for spreads and bounds: a negative or non-finite value
    /// becomes 0.
    pub fn non_negative_f64_or(&self, key: &str, default: f64) -> f64 {
        let value = self.f64_or(key, default);
        if value.is_finite() && value >= 0.0 {
            value
        } else {
            debug!("parameter {} = {} is not a finite non-negative number, using 0", key, value);
            0.0
        }
    }

    pub fn bool_or(&self, key: &str, default: bool) -> bool {
        match self.get(key) {
            None => default,
            Some(value) => value.as_bool().unwrap_or_else(|| {
                debug!("parameter {} = {:?} is not a bool, using {}", key, value, default);
                default
            }),
        }
    }

    pub fn str_or(&self, key: &str, default: &str) -> String {
        match self.get(key) {
            None => default.to_string(),
            Some(value) => match value.as_str() {
                Some(s) => s.to_string(),
                None => {
                    debug!("parameter {} = {:?} is not a string, using {}", key, value, default);
                    default.to_string()
                }
            },
        }
    }

    pub fn vehicle_id(&self, key: &str) -> Option<VehicleId> {
        self.get(key).and_then(VehicleId::from_value)
    }

    /// A numeric list. Falls back to `default` if any element is not a number.
    pub fn f64_list_or(&self, key: &str, default: &[f64]) -> Vec<f64> {
        let parsed = self.get(key).and_then(|value| {
            value
                .as_sequence()?
                .iter()
                .map(Value::as_f64)
                .collect::<Option<Vec<f64>>>()
        });
        match parsed {
            Some(list) => list,
            None => {
                if self.get(key).is_some() {
                    debug!("parameter {} is not a list of numbers, using {:?}", key, default);
                }
                default.to_vec()
            }
        }
    }
}
