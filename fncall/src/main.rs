#![allow(clippy::must_use_candidate, clippy::missing_errors_doc)]

mod args;
mod commands;

use args::{Args, Command};
use clap::Parser;
use fncall_config::Config;
use fncall_eval::DatasetManager;
use fncall_telemetry::LogFormat;

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    match args.command {
        Command::Check => check(&args),
        Command::Show { ref tool } => {
            let config = load(&args)?;
            let output = match tool {
                Some(tool) => commands::render_tool(&config, tool)?,
                None => serde_json::to_string_pretty(&config)?,
            };
            println!("{output}");
            Ok(())
        }
        Command::Tools => {
            let config = load(&args)?;
            println!("{}", commands::render_tools(&config.st_tools));
            Ok(())
        }
        Command::Dataset { ref path, ref name } => {
            fncall_telemetry::init(LogFormat::Pretty, &args.log_filter)?;

            let name = name.clone().unwrap_or_else(|| {
                path.file_stem()
                    .map_or_else(|| "dataset".to_owned(), |stem| stem.to_string_lossy().into_owned())
            });
            let dataset = DatasetManager::new(name, path).create_dataset()?;

            println!("{}", serde_json::to_string_pretty(&dataset)?);
            Ok(())
        }
    }
}

/// Load and validate the configuration, then set up logging for its mode
fn load(args: &Args) -> anyhow::Result<Config> {
    let config = Config::read(&args.config)?;
    fncall_telemetry::init(LogFormat::for_prod_mode(config.prod_mode), &args.log_filter)?;

    tracing::info!(config_path = %args.config.display(), "configuration read");

    config.validate()?;
    Ok(config)
}

fn check(args: &Args) -> anyhow::Result<()> {
    let config = Config::read(&args.config)?;
    fncall_telemetry::init(LogFormat::for_prod_mode(config.prod_mode), &args.log_filter)?;

    let issues = config.issues();
    println!("{}", commands::render_issues(&issues));

    commands::check_verdict(&args.config, &issues)
}
