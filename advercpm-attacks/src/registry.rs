use crate::add_object::AddObjectAttack;
use crate::burst::BurstAttack;
use crate::drift::DriftAttack;
use crate::error::AttackError;
use crate::params::Parameters;
use crate::remove_object::RemoveObjectAttack;
use crate::result::*;
use crate::white_noise::WhiteNoiseAttack;
use crate::{make_rng, Attack, FromParameters};
use log::debug;
use rand::rngs::StdRng;
use std::collections::BTreeSet;

pub type AttackFactory = fn(&Parameters, StdRng) -> Box<dyn Attack>;

#[derive(Clone, Copy)]
pub struct RegistryEntry {
    /// snake_case name used in configs, e.g. `white_noise`
    pub kind: &'static str,
    /// PascalCase name of the implementing type, e.g. `WhiteNoise`
    pub type_name: &'static str,
    pub factory: AttackFactory,
}

impl RegistryEntry {
    pub fn new(kind: &'static str, type_name: &'static str, factory: AttackFactory) -> Self {
        Self {
            kind,
            type_name,
            factory,
        }
    }
}

impl std::fmt::Debug for RegistryEntry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RegistryEntry")
            .field("kind", &self.kind)
            .field("type_name", &self.type_name)
            .finish()
    }
}

pub fn construct<T>(params: &Parameters, rng: StdRng) -> Box<dyn Attack>
where
    T: FromParameters + Attack + 'static,
{
    Box::new(T::from_parameters(params, rng))
}

macro_rules! register_attacks {
    ($($kind:literal => $attack:ty),* $(,)?) => {
        &[$(
            RegistryEntry {
                kind: $kind,
                type_name: <$attack as FromParameters>::TYPE_NAME,
                factory: construct::<$attack>,
            }
        ),*]
    };
}

static BUILTIN_ATTACKS: &[RegistryEntry] = register_attacks![
    "add_object" => AddObjectAttack,
    "burst" => BurstAttack,
    "drift" => DriftAttack,
    "remove_object" => RemoveObjectAttack,
    "white_noise" => WhiteNoiseAttack,
];

/// `white_noise` -> `WhiteNoise`. Each part is capitalized and the rest of
/// it lowercased, so `WHITE_noise` maps to the same name.
pub fn snake_to_pascal(name: &str) -> String {
    name.split('_')
        .map(|part| {
            let mut chars = part.chars();
            match chars.next() {
                Some(first) => first
                    .to_uppercase()
                    .chain(chars.flat_map(char::to_lowercase))
                    .collect::<String>(),
                None => String::new(),
            }
        })
        .collect()
}

#[derive(Debug, Clone)]
pub struct Registry {
    entries: Vec<RegistryEntry>,
}

impl Registry {
    pub fn empty() -> Self {
        Self { entries: vec![] }
    }

    pub fn builtin() -> Self {
        Self {
            entries: BUILTIN_ATTACKS.to_vec(),
        }
    }

    /// Adds an entry, replacing any earlier one with the same kind.
    pub fn register(&mut self, entry: RegistryEntry) {
        self.entries.retain(|e| e.kind != entry.kind);
        self.entries.push(entry);
    }

    pub fn list_available(&self) -> BTreeSet<&'static str> {
        self.entries.iter().map(|e| e.kind).collect()
    }

    fn available_names(&self) -> Vec<String> {
        self.list_available().into_iter().map(String::from).collect()
    }

    pub fn resolve(&self, kind: &str) -> ResolveResult {
        let entry = match self.entries.iter().find(|e| e.kind == kind) {
            Some(entry) => entry,
            None => {
                return Err(AttackError::UnknownAttack {
                    kind: kind.to_string(),
                    available: self.available_names(),
                })
            }
        };
        let expected = snake_to_pascal(kind);
        if entry.type_name != expected {
            return Err(AttackError::MissingAttackClass {
                kind: kind.to_string(),
                type_name: expected,
                available: self.available_names(),
            });
        }
        Ok(entry.factory)
    }

    /// Resolves `kind` and constructs it. With `seed` the attack's random
    /// draws are reproducible, without it they come from OS entropy.
    pub fn build(&self, kind: &str, params: &Parameters, seed: Option<u64>) -> BuildResult {
        let factory = self.resolve(kind)?;
        debug!(
            "building attack {} with parameters [{}]",
            kind,
            params.keys().collect::<Vec<_>>().join(", ")
        );
        Ok(factory(params, make_rng(seed)))
    }
}

impl Default for Registry {
    fn default() -> Self {
        Self::builtin()
    }
}
