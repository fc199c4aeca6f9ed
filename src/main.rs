use std::path::{Path, PathBuf};
use std::process::ExitCode;

use argh::FromArgs;
use log::{error, info};

use galaxy::{presets, AppError, ConfigError, GalaxyController, GalaxyParams};

const DEFAULT_CONFIG: &str = "galaxy.json";

#[derive(FromArgs)]
#[argh(description = "Spiral galaxy particle generator")]
struct Arguments {
    #[argh(option, description = "parameter file to load and save (default: galaxy.json)")]
    config: Option<PathBuf>,

    #[argh(option, short = 'p', description = "start from a built-in preset")]
    preset: Option<String>,

    #[argh(option, short = 'n', description = "override the particle count")]
    count: Option<u32>,

    #[argh(option, description = "seed for reproducible galaxies")]
    seed: Option<u64>,

    #[argh(option, description = "write the resolved parameters to a file and exit")]
    save_config: Option<PathBuf>,

    #[argh(switch, description = "list the built-in presets and exit")]
    list_presets: bool,
}

fn resolve_params(args: &Arguments, config_path: &Path) -> Result<GalaxyParams, ConfigError> {
    let mut params = if let Some(name) = &args.preset {
        presets::find(name)?
    } else if config_path.exists() {
        info!("Loading parameters from {}", config_path.display());
        GalaxyParams::load(config_path)?
    } else if args.config.is_some() {
        // Asked for explicitly, so a missing file is an error
        return Err(std::io::Error::new(
            std::io::ErrorKind::NotFound,
            format!("{} does not exist", config_path.display()),
        )
        .into());
    } else {
        GalaxyParams::default()
    };

    if let Some(count) = args.count {
        params.count = count;
    }
    params.validate()?;
    Ok(params)
}

fn run(args: Arguments) -> Result<(), AppError> {
    if args.list_presets {
        for preset in presets::PRESETS {
            println!("{:<10} {}", preset.name, preset.description);
        }
        return Ok(());
    }

    let config_path = args
        .config
        .clone()
        .unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG));
    let params = resolve_params(&args, &config_path)?;

    if let Some(path) = &args.save_config {
        params.save(path)?;
        info!("Wrote parameters to {}", path.display());
        return Ok(());
    }

    let controller = match args.seed {
        Some(seed) => GalaxyController::seeded(params, seed),
        None => GalaxyController::new(params),
    };

    galaxy::run(controller, config_path)
}

fn main() -> ExitCode {
    let args: Arguments = argh::from_env();

    env_logger::builder()
        .filter_level(log::LevelFilter::Info)
        .parse_default_env()
        .init();

    match run(args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{}", e);
            ExitCode::FAILURE
        }
    }
}
