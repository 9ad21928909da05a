use chrono::Local;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt::Write as _;
use std::fs::{self, File};
use std::io;
use std::path::PathBuf;
use std::sync::Mutex;
use tracing_subscriber::fmt::{self, format::Writer, time::FormatTime};
use tracing_subscriber::prelude::*;
use tracing_subscriber::EnvFilter;

/// The `logging:` section of the run config.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Console level. `RUST_LOG` wins when set.
    pub level: String,
    pub file_level: String,
    /// Base directory of the per-experiment log folders.
    pub dir: PathBuf,
    /// Log file name inside the experiment folder, `null` turns file logging off.
    pub file: Option<String>,
    /// Append `_<YYYY-MM-DD-HH-MM-SS>` to the experiment folder.
    pub timestamp_subdir: bool,
    /// Per-target levels, e.g. `advercpm_attacks: debug`.
    pub level_overrides: BTreeMap<String, String>,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            file_level: "debug".to_string(),
            dir: PathBuf::from("logs"),
            file: Some("run.log".to_string()),
            timestamp_subdir: true,
            level_overrides: BTreeMap::new(),
        }
    }
}

impl LoggingConfig {
    /// `<dir>/<experiment>[_<timestamp>]`
    pub fn run_dir(&self, experiment: &str) -> PathBuf {
        let name = if experiment.trim().is_empty() {
            "run".to_string()
        } else {
            experiment.trim().replace(|c: char| c == '/' || c == '\\', "_")
        };
        let folder = if self.timestamp_subdir {
            format!("{}_{}", name, Local::now().format("%Y-%m-%d-%H-%M-%S"))
        } else {
            name
        };
        self.dir.join(folder)
    }

    /// Filter directives for one sink: the base level, then the overrides.
    pub fn directives(&self, level: &str) -> String {
        let mut directives = vec![level_name(level)];
        for (target, target_level) in &self.level_overrides {
            directives.push(format!("{}={}", target, level_name(target_level)));
        }
        directives.join(",")
    }

    fn filter(&self, level: &str) -> EnvFilter {
        EnvFilter::try_new(self.directives(level)).unwrap_or_else(|e| {
            eprintln!("invalid log level {:?} ({}), using info", level, e);
            EnvFilter::new("info")
        })
    }
}

/// Lowercases a level and maps `warning`, `critical` and `fatal` onto the
/// names the filter understands.
fn level_name(level: &str) -> String {
    let level = level.trim().to_lowercase();
    match level.as_str() {
        "warning" => "warn".to_string(),
        "critical" | "fatal" => "error".to_string(),
        _ => level,
    }
}

struct LocalTime;

impl FormatTime for LocalTime {
    fn format_time(&self, w: &mut Writer<'_>) -> std::fmt::Result {
        write!(w, "[{}]", Local::now().format("%H:%M:%S%.3f"))
    }
}

/// Installs the global logger: console output, plus a log file under
/// `config.run_dir(experiment)` unless `config.file` is null. Records from
/// the `log` macros are forwarded.
///
/// Returns the experiment log folder when a file is written.
pub fn init_logging(config: &LoggingConfig, experiment: &str) -> io::Result<Option<PathBuf>> {
    let console_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| config.filter(&config.level));
    let console = fmt::layer()
        .with_timer(LocalTime)
        .with_filter(console_filter);

    let (file_layer, run_dir) = match &config.file {
        Some(name) => {
            let run_dir = config.run_dir(experiment);
            fs::create_dir_all(&run_dir)?;
            let file = File::create(run_dir.join(name))?;
            let layer = fmt::layer()
                .with_writer(Mutex::new(file))
                .with_ansi(false)
                .with_timer(LocalTime)
                .with_filter(config.filter(&config.file_level));
            (Some(layer), Some(run_dir))
        }
        None => (None, None),
    };

    // a second call keeps the first logger
    let _ = tracing_subscriber::registry()
        .with(console)
        .with(file_layer)
        .try_init();
    Ok(run_dir)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_directives_include_overrides() {
        let mut config = LoggingConfig::default();
        assert_eq!(config.directives("INFO"), "info");

        config
            .level_overrides
            .insert("advercpm_attacks".to_string(), "Debug".to_string());
        config
            .level_overrides
            .insert("shared::io".to_string(), "WARNING".to_string());
        assert_eq!(
            config.directives("critical"),
            "error,advercpm_attacks=debug,shared::io=warn"
        );
    }

    #[test]
    fn test_run_dir_naming() {
        let mut config = LoggingConfig {
            dir: PathBuf::from("logs"),
            timestamp_subdir: false,
            ..Default::default()
        };
        assert_eq!(config.run_dir("drift"), PathBuf::from("logs/drift"));
        assert_eq!(config.run_dir(""), PathBuf::from("logs/run"));
        assert_eq!(config.run_dir("a/b"), PathBuf::from("logs/a_b"));

        config.timestamp_subdir = true;
        let stamped = config.run_dir("drift");
        let folder = stamped.file_name().unwrap().to_str().unwrap();
        assert!(folder.starts_with("drift_"));
        // drift_YYYY-MM-DD-HH-MM-SS
        assert_eq!(folder.len(), "drift_".len() + 19);
    }
}
