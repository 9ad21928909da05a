use crate::config::Config;
use advercpm_attacks::{build_attack, Attack};
use anyhow::{bail, Context};
use log::{debug, info, trace, warn};
use shared::io::{parse_frame, save_frame};
use shared::VehicleId;
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunSummary {
    pub frames_attacked: usize,
    pub files_copied: usize,
    pub files_skipped: usize,
}

/// Mirrors `dataset_path` into `output_path`, sending every frame of the
/// malicious vehicle's folder through the configured attack.
pub struct Runner {
    config: Config,
    attack: Option<Box<dyn Attack>>,
    malicious: Option<VehicleId>,
}

impl Runner {
    pub fn from_config(config: Config) -> anyhow::Result<Self> {
        let attack = if config.attack.is_active() {
            let attack = build_attack(&config.attack.spec(), config.attack.seed)?;
            info!("attack {} ready", attack.kind());
            Some(attack)
        } else {
            info!("no attack enabled, dataset will be copied unchanged");
            None
        };
        let malicious = config.attack.malicious_vehicle();
        if attack.is_some() && malicious.is_none() {
            warn!("attack.malicious_id is not set, no frames will be attacked");
        }
        Ok(Self {
            config,
            attack,
            malicious,
        })
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn run(&mut self) -> anyhow::Result<RunSummary> {
        let input = self.config.data.dataset_path.clone();
        let output = self.config.data.output_path.clone();
        if !input.is_dir() {
            bail!("dataset path {:?} is not a directory", input);
        }
        if output.starts_with(&input) {
            bail!("output path {:?} lies inside dataset path {:?}", output, input);
        }
        info!(
            "experiment {}: {:?} -> {:?}",
            self.config.experiment.name, input, output
        );

        let mut summary = RunSummary::default();
        self.visit_dir(&input, &output, &mut summary)?;
        info!(
            "done: {} frames attacked, {} files copied, {} skipped",
            summary.frames_attacked, summary.files_copied, summary.files_skipped
        );
        Ok(summary)
    }

    fn is_malicious_folder(&self, dir: &Path) -> bool {
        let malicious = match (&self.attack, &self.malicious) {
            (Some(_), Some(id)) => id,
            _ => return false,
        };
        dir.file_name()
            .and_then(|name| name.to_str())
            .map(|name| malicious.loosely_matches(&VehicleId::from(name)))
            .unwrap_or(false)
    }

    fn is_frame(&self, path: &Path) -> bool {
        path.extension()
            .and_then(|ext| ext.to_str())
            .map(|ext| ext == self.config.data.frame_extension)
            .unwrap_or(false)
    }

    fn visit_dir(&mut self, src: &Path, dst: &Path, summary: &mut RunSummary) -> anyhow::Result<()> {
        fs::create_dir_all(dst).with_context(|| format!("creating {:?} failed", dst))?;
        let mut entries = fs::read_dir(src)
            .with_context(|| format!("listing {:?} failed", src))?
            .map(|entry| entry.map(|entry| entry.path()))
            .collect::<Result<Vec<PathBuf>, _>>()?;
        entries.sort();

        let attack_here = self.is_malicious_folder(src);
        if attack_here {
            info!("attacking frames in {:?}", src);
        }
        let mut attacked_here = 0;

        for path in entries {
            let target = match path.file_name() {
                Some(name) => dst.join(name),
                None => continue,
            };
            if path.is_dir() {
                self.visit_dir(&path, &target, summary)?;
                continue;
            }
            if target.exists() && !self.config.data.overwrite {
                trace!("{:?} exists, skipping", target);
                summary.files_skipped += 1;
                continue;
            }

            let under_cap = self
                .config
                .simulation
                .max_frames
                .map(|max| attacked_here < max)
                .unwrap_or(true);
            if attack_here && under_cap && self.is_frame(&path) && self.attack_frame(&path, &target)? {
                attacked_here += 1;
                summary.frames_attacked += 1;
            } else {
                fs::copy(&path, &target)
                    .with_context(|| format!("copying {:?} to {:?} failed", path, target))?;
                summary.files_copied += 1;
            }
        }
        Ok(())
    }

    /// Returns false when the frame cannot be parsed. The caller copies it
    /// unchanged and the run goes on.
    fn attack_frame(&mut self, path: &Path, target: &Path) -> anyhow::Result<bool> {
        let attack = match self.attack.as_mut() {
            Some(attack) => attack,
            None => bail!("no attack configured"),
        };
        let frame = match parse_frame(path) {
            Ok(frame) => frame,
            Err(e) => {
                warn!("{}, copying it unchanged", e);
                return Ok(false);
            }
        };
        let attacked = attack.apply(frame);
        save_frame(&attacked, target)?;
        debug!("{:?} attacked", path);
        Ok(true)
    }
}
