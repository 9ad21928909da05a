use crate::{Attack, FromParameters, Parameters};
use log::trace;
use rand::rngs::StdRng;
use rand::Rng;
use rand_distr::StandardNormal;
use shared::Frame;

/// Zero-mean Gaussian noise on every vehicle's position, and optionally on
/// its speed. Each call is independent of the previous ones.
pub struct WhiteNoiseAttack {
    sigma: f64,
    apply_velocity: bool,
    rng: StdRng,
}

impl FromParameters for WhiteNoiseAttack {
    const TYPE_NAME: &'static str = "WhiteNoise";

    fn from_parameters(params: &Parameters, rng: StdRng) -> Self {
        Self {
            sigma: params.non_negative_f64_or("sigma", 0.5),
            apply_velocity: params.bool_or("apply_velocity", false),
            rng,
        }
    }
}

impl WhiteNoiseAttack {
    fn noise(&mut self) -> f64 {
        let z: f64 = self.rng.sample(StandardNormal);
        self.sigma * z
    }
}

impl Attack for WhiteNoiseAttack {
    fn kind(&self) -> &'static str {
        "white_noise"
    }

    fn apply(&mut self, mut frame: Frame) -> Frame {
        for (id, vehicle) in frame.vehicles.iter_mut() {
            if vehicle.position().is_some() {
                let delta = [self.noise(), self.noise(), self.noise()];
                vehicle.shift_position(delta);
            } else {
                trace!("vehicle {} has no usable location", id);
            }

            if self.apply_velocity {
                match vehicle.speed() {
                    Some(speed) => {
                        let noisy = speed + self.noise();
                        vehicle.set_speed(noisy);
                    }
                    None => trace!("vehicle {} has no usable speed", id),
                }
            }
        }
        frame
    }
}
