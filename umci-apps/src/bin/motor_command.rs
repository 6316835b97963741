use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;
use tracing::info;
use umci_apps::{utils::init_tracing, ControllerConfig, Error, MotorCommand, MotorCommandExecutor};
use umci_example_drivers::example_driver_table;

/// A umci command line tool.
#[derive(Parser, Debug)]
#[command(name = env!("CARGO_BIN_NAME"))]
struct MotorCommandArgs {
    /// Path to the setting file.
    #[arg(short, long)]
    config_path: Option<PathBuf>,
    #[command(subcommand)]
    command: Option<MotorCommand>,
    /// Prints the default setting as TOML.
    #[arg(long)]
    show_default_config: bool,
}

fn main() -> Result<()> {
    init_tracing();
    let args = MotorCommandArgs::parse();
    info!("ParsedArgs {:?}", args);

    if args.show_default_config {
        print!("{}", toml::to_string(&ControllerConfig::demo())?);
        return Ok(());
    }

    let command = args.command.ok_or(Error::NoCommand)?;
    let config = match umci_apps::utils::get_apps_controller_config(args.config_path) {
        Some(config_path) => ControllerConfig::try_new(config_path)?,
        None => ControllerConfig::demo(),
    };

    let mut controller = config.create_controller(example_driver_table())?;
    let result = MotorCommandExecutor::new().execute(&mut controller, &command);
    controller.shutdown_all();
    Ok(result?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_args() {
        let bin = env!("CARGO_BIN_NAME");
        assert!(MotorCommandArgs::try_parse_from([bin]).is_ok());
        assert!(MotorCommandArgs::try_parse_from([bin, "--show-default-config"]).is_ok());
        assert!(MotorCommandArgs::try_parse_from([bin, "--config-path", "path", "list"]).is_ok());
        assert!(
            MotorCommandArgs::try_parse_from([bin, "set_speed", "bldc1", "1000"]).is_ok()
        );
        assert!(MotorCommandArgs::try_parse_from([bin, "set_speed", "bldc1"]).is_err());
    }
}
