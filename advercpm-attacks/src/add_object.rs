use crate::{Attack, FromParameters, Parameters};
use log::debug;
use rand::rngs::StdRng;
use shared::{Coords, Frame, Scalar, VehicleId, VehicleState};

pub const DEFAULT_OBJECT_ID: i64 = 9999;
pub const DEFAULT_EXTENT: [f64; 3] = [4.0, 2.0, 1.5];

/// Fabricates a phantom vehicle `distance_ahead` meters in front of the ego
/// vehicle, but only in frames where the malicious relay is also present.
///
/// The phantom is written under `object_id` and replaces whatever was stored
/// there. Picking an id that cannot collide with real vehicles is up to the
/// caller; nothing here checks it.
#[derive(Debug, Clone)]
pub struct AddObjectAttack {
    ego_id: Option<VehicleId>,
    malicious_id: Option<VehicleId>,
    object_id: VehicleId,
    distance_ahead: f64,
    vel: f64,
    extent: Vec<f64>,
    yaw_in_degrees: bool,
}

impl FromParameters for AddObjectAttack {
    const TYPE_NAME: &'static str = "AddObject";

    fn from_parameters(params: &Parameters, _rng: StdRng) -> Self {
        Self {
            ego_id: params.vehicle_id("ego_id"),
            malicious_id: params.vehicle_id("malicious_id"),
            object_id: params
                .vehicle_id("object_id")
                .unwrap_or(VehicleId::Int(DEFAULT_OBJECT_ID)),
            distance_ahead: params.f64_or("distance_ahead", 10.0),
            vel: params.f64_or("vel", 0.0),
            extent: params.f64_list_or("extent", &DEFAULT_EXTENT),
            yaw_in_degrees: params.bool_or("yaw_in_degrees", false),
        }
    }
}

impl AddObjectAttack {
    fn phantom_for(&self, ego: &VehicleState) -> Option<VehicleState> {
        let [x, y, z] = ego.position()?;
        let mut yaw = ego.yaw()?;
        if self.yaw_in_degrees {
            yaw = yaw.to_radians();
        }
        let location = [
            x + self.distance_ahead * yaw.cos(),
            y + self.distance_ahead * yaw.sin(),
            z,
        ];
        Some(VehicleState {
            angle: ego.angle.clone(),
            center: ego.center.clone(),
            extent: Some(Coords::Seq(self.extent.clone())),
            location: Some(location.into()),
            speed: Some(Scalar::Num(self.vel)),
            ..Default::default()
        })
    }
}

impl Attack for AddObjectAttack {
    fn kind(&self) -> &'static str {
        "add_object"
    }

    fn apply(&mut self, mut frame: Frame) -> Frame {
        let (ego_id, malicious_id) = match (&self.ego_id, &self.malicious_id) {
            (Some(ego), Some(malicious)) => (ego, malicious),
            _ => return frame,
        };
        if !frame.contains(ego_id) || !frame.contains(malicious_id) {
            return frame;
        }

        match self.phantom_for(&frame.vehicles[ego_id]) {
            Some(phantom) => {
                frame.vehicles.insert(self.object_id.clone(), phantom);
            }
            None => debug!("ego {} has no usable location/angle, skipping", ego_id),
        }
        frame
    }
}
