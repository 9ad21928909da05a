use crate::{Attack, FromParameters, Parameters};
use log::{debug, trace};
use rand::rngs::StdRng;
use rand::Rng;
use rand_distr::StandardNormal;
use shared::{Frame, VehicleId};
use std::collections::BTreeMap;
use std::f64::consts::FRAC_1_SQRT_2;

/// Compass labels and the planar unit vector each one drifts along.
pub const DIRECTIONS: [(&str, (f64, f64)); 8] = [
    ("N", (0.0, 1.0)),
    ("S", (0.0, -1.0)),
    ("E", (1.0, 0.0)),
    ("W", (-1.0, 0.0)),
    ("NE", (FRAC_1_SQRT_2, FRAC_1_SQRT_2)),
    ("NW", (-FRAC_1_SQRT_2, FRAC_1_SQRT_2)),
    ("SE", (FRAC_1_SQRT_2, -FRAC_1_SQRT_2)),
    ("SW", (-FRAC_1_SQRT_2, -FRAC_1_SQRT_2)),
];

/// Unit vector for a compass label. Unknown labels map to `(0, 0)`, which
/// turns the positional part of the drift off.
pub fn direction_vector(label: &str) -> (f64, f64) {
    let label = label.trim().to_uppercase();
    DIRECTIONS
        .iter()
        .find(|(name, _)| *name == label)
        .map(|(_, unit)| *unit)
        .unwrap_or((0.0, 0.0))
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DriftMode {
    /// shift grows by exactly `drift_rate` per step
    Linear,
    /// linear trend plus independent Gaussian noise on x and y
    Biased,
}

impl DriftMode {
    fn parse(mode: &str) -> Self {
        match mode {
            "biased" => DriftMode::Biased,
            "linear" => DriftMode::Linear,
            other => {
                debug!("unknown drift mode {:?}, falling back to linear", other);
                DriftMode::Linear
            }
        }
    }
}

/// Cumulative position drift.
///
/// Each targeted vehicle carries its own step counter on this instance. The
/// n-th time a vehicle is targeted its location moves by
/// `direction * drift_rate * n`, so the reported track slowly walks away from
/// ground truth. Counters only reset when the attack is rebuilt.
pub struct DriftAttack {
    drift_rate: f64,
    unit: (f64, f64),
    apply_to_all: bool,
    target_id: Option<VehicleId>,
    yaw_drift: f64,
    mode: DriftMode,
    sigma: f64,
    steps: BTreeMap<VehicleId, u64>,
    rng: StdRng,
}

impl FromParameters for DriftAttack {
    const TYPE_NAME: &'static str = "Drift";

    fn from_parameters(params: &Parameters, rng: StdRng) -> Self {
        let direction = params.str_or("direction", "NE");
        let unit = direction_vector(&direction);
        if unit == (0.0, 0.0) {
            debug!("unknown drift direction {:?}, positions will not drift", direction);
        }
        Self {
            drift_rate: params.f64_or("drift_rate", 0.5),
            unit,
            apply_to_all: params.bool_or("apply_to_all", true),
            target_id: params.vehicle_id("target_id"),
            yaw_drift: params.f64_of(&["yaw_drift_deg_per_frame", "yaw_drift"], 0.0),
            mode: DriftMode::parse(&params.str_or("mode", "linear")),
            sigma: params.non_negative_f64_or("sigma", 0.1),
            steps: BTreeMap::new(),
            rng,
        }
    }
}

impl DriftAttack {
    /// How many times `id` has been drifted by this instance.
    pub fn steps(&self, id: &VehicleId) -> u64 {
        self.steps.get(id).copied().unwrap_or(0)
    }

    fn targets(&self, frame: &Frame) -> Vec<VehicleId> {
        if self.apply_to_all {
            return frame.vehicles.keys().cloned().collect();
        }
        match &self.target_id {
            Some(target) => frame.resolve_id(target).into_iter().collect(),
            None => vec![],
        }
    }

    fn advance(&mut self, id: &VehicleId) -> u64 {
        let step = self.steps.entry(id.clone()).or_insert(0);
        *step += 1;
        *step
    }

    fn shift_for(&mut self, step: u64) -> (f64, f64) {
        let magnitude = self.drift_rate * step as f64;
        let mut shift = (self.unit.0 * magnitude, self.unit.1 * magnitude);
        if self.mode == DriftMode::Biased {
            let nx: f64 = self.rng.sample(StandardNormal);
            let ny: f64 = self.rng.sample(StandardNormal);
            shift.0 += self.sigma * nx;
            shift.1 += self.sigma * ny;
        }
        shift
    }
}

impl Attack for DriftAttack {
    fn kind(&self) -> &'static str {
        "drift"
    }

    fn apply(&mut self, mut frame: Frame) -> Frame {
        if frame.is_empty() {
            return frame;
        }
        let targets = self.targets(&frame);
        if targets.is_empty() {
            debug!("drift target {:?} not in frame", self.target_id);
            return frame;
        }

        for id in targets {
            let step = self.advance(&id);
            let (dx, dy) = self.shift_for(step);
            let vehicle = match frame.vehicles.get_mut(&id) {
                Some(vehicle) => vehicle,
                None => continue,
            };
            if !vehicle.shift_planar(dx, dy) {
                trace!("vehicle {} has no usable location", id);
            }
            if self.yaw_drift != 0.0 && !vehicle.offset_yaw(self.yaw_drift) {
                trace!("vehicle {} has no usable yaw", id);
            }
        }
        frame
    }
}
