use advercpm_attacks::available_attacks;
use advercpm_runner::*;
use clap::Parser;
use log::{error, info};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "advercpm-run", version, about = "Replays a CPM dataset through an adversarial attack")]
struct Args {
    /// Base configuration, skipped if missing
    #[arg(long, default_value = "config/default.yaml")]
    default: PathBuf,
    /// Scenario configuration, also looked up in config/experiments/
    #[arg(long)]
    config: Option<PathBuf>,
    /// Print the registered attack types and exit
    #[arg(long)]
    list_attacks: bool,
    /// Write the built-in defaults to this file and exit
    #[arg(long)]
    write_default: Option<PathBuf>,
    /// Overrides such as attack.parameters.sigma=0.8
    #[arg(last = true)]
    overrides: Vec<String>,
}

fn main() {
    let args = Args::parse();

    if args.list_attacks {
        for kind in available_attacks() {
            println!("{}", kind);
        }
        return;
    }
    if let Some(path) = &args.write_default {
        if let Err(e) = Config::write_default(path) {
            eprintln!("{:#}", e);
            std::process::exit(1);
        }
        return;
    }

    let config = match Config::load(Some(args.default.as_path()), args.config.as_deref(), &args.overrides) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Failed to load config: {:#}", e);
            std::process::exit(1);
        }
    };
    match shared::init_logging(&config.logging, &config.experiment.name) {
        Ok(Some(dir)) => info!("advercpm {}, logs in {:?}", shared::VERSION_STR, dir),
        Ok(None) => info!("advercpm {}", shared::VERSION_STR),
        Err(e) => {
            eprintln!("Failed to set up logging: {}", e);
            std::process::exit(1);
        }
    }

    let result = Runner::from_config(config).and_then(|mut runner| runner.run());
    if let Err(e) = result {
        error!("{:#}", e);
        std::process::exit(1);
    }
}
