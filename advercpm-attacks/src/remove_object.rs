use crate::{Attack, FromParameters, Parameters};
use log::debug;
use rand::rngs::StdRng;
use rand::seq::IteratorRandom;
use shared::{Frame, VehicleId};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RemoveMode {
    Targeted,
    Random,
    Unknown(String),
}

impl From<&str> for RemoveMode {
    fn from(mode: &str) -> Self {
        match mode {
            "targeted" => RemoveMode::Targeted,
            "random" => RemoveMode::Random,
            other => RemoveMode::Unknown(other.to_string()),
        }
    }
}

/// Omits one vehicle from the frame, either a fixed id or one picked at
/// random. Removed ids are appended to `Frame::removed`.
pub struct RemoveObjectAttack {
    mode: RemoveMode,
    omitted_id: Option<VehicleId>,
    rng: StdRng,
}

impl FromParameters for RemoveObjectAttack {
    const TYPE_NAME: &'static str = "RemoveObject";

    fn from_parameters(params: &Parameters, rng: StdRng) -> Self {
        let mode = RemoveMode::from(params.str_or("mode", "targeted").as_str());
        if let RemoveMode::Unknown(name) = &mode {
            debug!("unknown remove_object mode {:?}, attack will do nothing", name);
        }
        Self {
            mode,
            omitted_id: params.vehicle_id("omitted_id"),
            rng,
        }
    }
}

impl RemoveObjectAttack {
    fn pick(&mut self, frame: &Frame) -> Option<VehicleId> {
        match &self.mode {
            RemoveMode::Targeted => self
                .omitted_id
                .as_ref()
                .filter(|id| frame.contains(id))
                .cloned(),
            RemoveMode::Random => frame.vehicles.keys().choose(&mut self.rng).cloned(),
            RemoveMode::Unknown(_) => None,
        }
    }
}

impl Attack for RemoveObjectAttack {
    fn kind(&self) -> &'static str {
        "remove_object"
    }

    fn apply(&mut self, mut frame: Frame) -> Frame {
        if let Some(id) = self.pick(&frame) {
            debug!("removing vehicle {}", id);
            frame.remove_vehicle(&id);
        }
        frame
    }
}
