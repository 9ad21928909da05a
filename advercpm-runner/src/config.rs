use advercpm_attacks::{AttackSpec, Parameters};
use anyhow::{anyhow, bail, Context};
use log::{debug, warn};
use serde::{Deserialize, Serialize};
use serde_yaml::{Mapping, Value};
use shared::{LoggingConfig, VehicleId};
use std::path::{Path, PathBuf};

/// Where bare scenario names are looked up, e.g. `--config attack_drift.yaml`.
pub const EXPERIMENTS_DIR: &str = "config/experiments";

/// Attack kind that leaves the dataset untouched.
pub const NOOP_ATTACK: &str = "noop";

#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct Config {
    pub experiment: ExperimentConfig,
    pub data: DataConfig,
    pub attack: AttackConfig,
    pub simulation: SimulationConfig,
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct ExperimentConfig {
    pub name: String,
    pub description: String,
}

impl Default for ExperimentConfig {
    fn default() -> Self {
        Self {
            name: "baseline".to_string(),
            description: String::new(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct DataConfig {
    pub dataset_path: PathBuf,
    pub output_path: PathBuf,
    pub overwrite: bool,
    /// Extension of frame files; every other file is copied as is.
    pub frame_extension: String,
}

impl Default for DataConfig {
    fn default() -> Self {
        Self {
            dataset_path: PathBuf::from("./datasets/original"),
            output_path: PathBuf::from("./datasets/attacked"),
            overwrite: false,
            frame_extension: "yaml".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct AttackConfig {
    pub enabled: bool,
    #[serde(rename = "type")]
    pub kind: String,
    /// Vehicle folder whose frames get attacked. Falls back to
    /// `parameters.malicious_id`.
    pub malicious_id: Option<VehicleId>,
    pub seed: Option<u64>,
    pub parameters: Parameters,
}

impl Default for AttackConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            kind: NOOP_ATTACK.to_string(),
            malicious_id: None,
            seed: None,
            parameters: Parameters::new(),
        }
    }
}

impl AttackConfig {
    pub fn is_active(&self) -> bool {
        self.enabled && self.kind != NOOP_ATTACK
    }

    pub fn spec(&self) -> AttackSpec {
        AttackSpec::new(&self.kind, self.parameters.clone())
    }

    pub fn malicious_vehicle(&self) -> Option<VehicleId> {
        self.malicious_id
            .clone()
            .or_else(|| self.parameters.vehicle_id("malicious_id"))
    }
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct SimulationConfig {
    /// Cap on attacked frames per malicious vehicle folder.
    pub max_frames: Option<usize>,
}

impl Config {
    /// Built-in defaults, then the default file (if it exists), then the
    /// scenario file, then `a.b.c=value` overrides.
    pub fn load(
        default_path: Option<&Path>,
        scenario_path: Option<&Path>,
        overrides: &[String],
    ) -> anyhow::Result<Self> {
        let mut merged = serde_yaml::to_value(Config::default())?;

        if let Some(path) = default_path {
            if path.exists() {
                merge(&mut merged, read_yaml(path)?);
            } else {
                warn!("default config {:?} not found, using built-in defaults", path);
            }
        }
        if let Some(path) = scenario_path {
            let path = resolve_scenario(path)?;
            debug!("loading scenario {:?}", path);
            merge(&mut merged, read_yaml(&path)?);
        }
        for assignment in overrides {
            apply_override(&mut merged, assignment)?;
        }

        serde_yaml::from_value(merged).context("invalid configuration")
    }

    pub fn write_default(path: &Path) -> anyhow::Result<()> {
        let content = serde_yaml::to_string(&Config::default())?;
        std::fs::write(path, content).with_context(|| format!("writing {:?} failed", path))
    }
}

fn resolve_scenario(path: &Path) -> anyhow::Result<PathBuf> {
    if path.exists() {
        return Ok(path.to_path_buf());
    }
    let in_experiments = Path::new(EXPERIMENTS_DIR).join(path);
    if in_experiments.exists() {
        return Ok(in_experiments);
    }
    bail!("scenario config not found: {:?}", path)
}

fn read_yaml(path: &Path) -> anyhow::Result<Value> {
    let content =
        std::fs::read_to_string(path).with_context(|| format!("reading {:?} failed", path))?;
    if content.trim().is_empty() {
        return Ok(Value::Null);
    }
    serde_yaml::from_str(&content).with_context(|| format!("{:?} is not valid YAML", path))
}

/// Deep merge of mappings. Anything else in `overlay` replaces `base`, except
/// null, which leaves `base` alone.
pub fn merge(base: &mut Value, overlay: Value) {
    match (base, overlay) {
        (_, Value::Null) => {}
        (Value::Mapping(base), Value::Mapping(overlay)) => {
            for (key, value) in overlay {
                match base.get_mut(&key) {
                    Some(existing) => merge(existing, value),
                    None => {
                        base.insert(key, value);
                    }
                }
            }
        }
        (base, overlay) => *base = overlay,
    }
}

fn ensure_mapping(node: &mut Value) -> &mut Mapping {
    if !node.is_mapping() {
        *node = Value::Mapping(Mapping::new());
    }
    match node {
        Value::Mapping(map) => map,
        _ => unreachable!("node was just replaced with a mapping"),
    }
}

/// Applies one `dotted.key=value` assignment. The value is read as a YAML
/// scalar, so `true`, `0.8` and `[1, 2]` keep their types.
pub fn apply_override(root: &mut Value, assignment: &str) -> anyhow::Result<()> {
    let (path, raw) = assignment
        .split_once('=')
        .ok_or_else(|| anyhow!("override {:?} is not key=value", assignment))?;
    let keys: Vec<&str> = path.trim().split('.').collect();
    if keys.iter().any(|key| key.is_empty()) {
        bail!("override {:?} has an empty key", assignment);
    }
    let value = serde_yaml::from_str(raw.trim()).unwrap_or_else(|_| Value::String(raw.to_string()));

    let (last, parents) = match keys.split_last() {
        Some(split) => split,
        None => bail!("override {:?} has no key", assignment),
    };
    let mut node = root;
    for key in parents {
        node = ensure_mapping(node)
            .entry(Value::String(key.to_string()))
            .or_insert_with(|| Value::Mapping(Mapping::new()));
    }
    ensure_mapping(node).insert(Value::String(last.to_string()), value);
    Ok(())
}
