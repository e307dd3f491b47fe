mod engine;

use std::process::ExitCode;

use tracing::error;

use engine::cli::Cli;
use engine::config::AppConfig;
use engine::frame_loop;
use engine::graphics::renderer::RecordingRenderer;
use engine::windowing::Windowing;

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => match AppConfig::load(path) {
            Ok(config) => config,
            Err(e) => {
                error!("{e}");
                return ExitCode::FAILURE;
            }
        },
        None => AppConfig::default(),
    };

    let result = if cli.headless {
        frame_loop::run_headless(&config, cli.frames)
    } else {
        match engine::hmd::connect() {
            Ok(session) => Windowing::run_app(
                config,
                session,
                Box::new(RecordingRenderer::new()),
                Box::new(engine::hmd::connect),
            ),
            Err(e) => Err(e),
        }
    };

    if let Err(e) = result {
        error!("fatal: {e}");
        return ExitCode::FAILURE;
    }
    ExitCode::SUCCESS
}
