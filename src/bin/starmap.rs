use std::process::ExitCode;

use clap::Parser;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;
use winit::event_loop::{ControlFlow, EventLoop};

use starmap::app::{App, AppConfig, AppError, MapKind};
use starmap::{build_info, health};

/// Pannable, zoomable star and province maps
#[derive(Debug, Parser)]
#[command(name = "starmap", version)]
struct Cli {
    /// Configuration profile; defaults to APP_PROFILE, then "release"
    #[arg(long)]
    profile: Option<String>,

    /// Map shown at startup, overriding the profile
    #[arg(long, value_enum)]
    map: Option<MapKind>,

    /// Run the health checks and exit
    #[arg(long)]
    health: bool,

    /// Print details for passing health checks too
    #[arg(long, short)]
    verbose: bool,
}

fn init_tracing(health: bool) {
    let fallback = if health {
        "starmap=warn"
    } else {
        "starmap=info,wgpu_core=warn,wgpu_hal=warn"
    };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(fallback)),
        )
        .init();
}

fn run(cli: Cli) -> Result<ExitCode, AppError> {
    let profile = cli.profile.unwrap_or_else(AppConfig::profile_from_env);
    let mut config = AppConfig::load(&profile)?;
    if let Some(map) = cli.map {
        config.scene.initial_map = map;
    }

    info!(version = %build_info::version_string(), %profile, "starmap");

    if cli.health {
        let report = health::run_checks_for(&config);
        health::print_report(&report, cli.verbose);
        return Ok(report.exit_code());
    }

    let event_loop = EventLoop::new()?;
    event_loop.set_control_flow(ControlFlow::Poll);

    let mut app = App::new(config);
    event_loop.run_app(&mut app)?;

    match app.take_error() {
        Some(err) => Err(err),
        None => Ok(ExitCode::SUCCESS),
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.health);

    match run(cli) {
        Ok(code) => code,
        Err(err) => {
            error!(error = %err, "starmap exited with an error");
            ExitCode::FAILURE
        }
    }
}
