//! Adversarial transformations of recorded CPM frames.
//!
//! Every attack implements [`Attack`] and is constructed by name through the
//! [`Registry`]. The driver only ever calls [`available_attacks`],
//! [`build_attack`] and [`Attack::apply`].

pub mod add_object;
pub mod burst;
pub mod drift;
pub mod error;
pub mod params;
pub mod registry;
pub mod remove_object;
pub mod result;
pub mod white_noise;

pub use add_object::AddObjectAttack;
pub use burst::BurstAttack;
pub use drift::{DriftAttack, DriftMode};
pub use error::AttackError;
pub use params::Parameters;
pub use registry::{snake_to_pascal, AttackFactory, Registry, RegistryEntry};
pub use remove_object::{RemoveMode, RemoveObjectAttack};
pub use white_noise::WhiteNoiseAttack;

use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::{Deserialize, Serialize};
use shared::Frame;
use std::collections::BTreeSet;

pub trait Attack: Send {
    /// Name the attack is registered under.
    fn kind(&self) -> &'static str;

    /// Rewrites one frame. Prerequisites that are missing from the frame make
    /// this a no-op rather than an error.
    fn apply(&mut self, frame: Frame) -> Frame;
}

/// Construction half of an attack, used by the registry.
pub trait FromParameters: Sized {
    /// PascalCase name matching the snake_case kind.
    const TYPE_NAME: &'static str;

    fn from_parameters(params: &Parameters, rng: StdRng) -> Self;
}

/// `{type, parameters}` block of the attack config.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct AttackSpec {
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default)]
    pub parameters: Parameters,
}

impl AttackSpec {
    pub fn new(kind: &str, parameters: Parameters) -> Self {
        Self {
            kind: kind.to_string(),
            parameters,
        }
    }
}

pub fn make_rng(seed: Option<u64>) -> StdRng {
    match seed {
        Some(s) => StdRng::seed_from_u64(s),
        None => StdRng::from_entropy(),
    }
}

pub fn available_attacks() -> BTreeSet<&'static str> {
    Registry::builtin().list_available()
}

pub fn build_attack(spec: &AttackSpec, seed: Option<u64>) -> result::BuildResult {
    Registry::builtin().build(&spec.kind, &spec.parameters, seed)
}
