use crate::{Attack, FromParameters, Parameters};
use log::{debug, trace};
use rand::distributions::Uniform;
use rand::rngs::StdRng;
use rand_distr::{Distribution, Poisson};
use shared::Frame;

/// Largest usable `max_jitter`: the jump range `2 * max_jitter` must stay finite.
const MAX_JITTER_LIMIT: f64 = f64::MAX / 2.0;

/// Rare, large position jumps.
///
/// For every vehicle a Poisson(`lambda`) count is drawn per call. Any
/// non-zero count triggers one uniform jump in `[-max_jitter, max_jitter)`
/// on each axis; the count itself does not scale the jump.
pub struct BurstAttack {
    // None when lambda is not a finite positive number, i.e. bursts never happen
    occurrence: Option<Poisson<f64>>,
    // None when max_jitter is 0
    jitter: Option<Uniform<f64>>,
    rng: StdRng,
}

fn occurrence(lambda: f64) -> Option<Poisson<f64>> {
    if !(lambda.is_finite() && lambda > 0.0) {
        debug!("burst lambda = {}, no bursts will occur", lambda);
        return None;
    }
    Poisson::new(lambda).ok()
}

fn jitter(max_jitter: f64) -> Option<Uniform<f64>> {
    if max_jitter <= 0.0 {
        return None;
    }
    let bound = if (2.0 * max_jitter).is_finite() {
        max_jitter
    } else {
        debug!("burst max_jitter = {} is out of range, using {}", max_jitter, MAX_JITTER_LIMIT);
        MAX_JITTER_LIMIT
    };
    Some(Uniform::new(-bound, bound))
}

impl FromParameters for BurstAttack {
    const TYPE_NAME: &'static str = "Burst";

    fn from_parameters(params: &Parameters, rng: StdRng) -> Self {
        Self {
            occurrence: occurrence(params.f64_or("lambda", 0.2)),
            jitter: jitter(params.non_negative_f64_or("max_jitter", 5.0)),
            rng,
        }
    }
}

impl BurstAttack {
    fn bursts(&mut self) -> bool {
        match &self.occurrence {
            Some(poisson) => poisson.sample(&mut self.rng) >= 1.0,
            None => false,
        }
    }

    fn offset(&mut self) -> f64 {
        match &self.jitter {
            Some(uniform) => uniform.sample(&mut self.rng),
            None => 0.0,
        }
    }
}

impl Attack for BurstAttack {
    fn kind(&self) -> &'static str {
        "burst"
    }

    fn apply(&mut self, mut frame: Frame) -> Frame {
        for (id, vehicle) in frame.vehicles.iter_mut() {
            if !self.bursts() {
                continue;
            }
            let delta = [self.offset(), self.offset(), self.offset()];
            if !vehicle.shift_position(delta) {
                trace!("vehicle {} has no usable location", id);
            }
        }
        frame
    }
}
