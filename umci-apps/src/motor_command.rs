use std::{
    fs::File,
    io::{BufRead, BufReader},
    path::PathBuf,
};

use clap::{Parser, Subcommand};
use tracing::info;
use umci::{Motor, MotorController, MotorKind, Status};

use crate::Error;

#[derive(Subcommand, Debug, Clone, PartialEq)]
#[command(rename_all = "snake_case")]
pub enum MotorCommand {
    /// List all motors with their status.
    List,
    /// Print the status of a motor.
    Status { name: String },
    /// Move a positional motor to an angle in degrees.
    SetPosition {
        name: String,
        #[arg(allow_negative_numbers = true)]
        degrees: f64,
    },
    /// Print the angle of a positional motor.
    GetPosition { name: String },
    /// Move a stepped motor.
    MoveSteps {
        name: String,
        #[arg(allow_negative_numbers = true)]
        steps: i64,
        #[arg(short, long)]
        backward: bool,
    },
    /// Print the step position of a stepped motor.
    GetStepPosition { name: String },
    /// Set the speed in RPM.
    SetSpeed {
        name: String,
        #[arg(allow_negative_numbers = true)]
        rpm: f64,
    },
    /// Print the speed in RPM.
    GetSpeed { name: String },
    /// Set the rotation direction of a speed/direction motor.
    SetDirection {
        name: String,
        #[arg(long)]
        counterclockwise: bool,
    },
    /// Shut down and remove a motor.
    Remove { name: String },
    /// Load commands from file and execute them.
    LoadCommands { command_file_path: PathBuf },
    /// Run a short routine on every motor according to its kind.
    Demo,
}

/// A single command line as found in a command file.
#[derive(Parser, Debug)]
#[command(no_binary_name = true)]
struct CommandLine {
    #[command(subcommand)]
    command: MotorCommand,
}

impl MotorCommand {
    /// Parses one whitespace-separated command line, e.g. `set_speed bldc1 1000`.
    pub fn parse_line(line: &str) -> Result<Self, Error> {
        CommandLine::try_parse_from(line.split_whitespace())
            .map(|c| c.command)
            .map_err(|e| Error::CommandParseFailure(line.to_owned(), e.to_string()))
    }
}

#[derive(Debug, Default)]
pub struct MotorCommandExecutor {}

impl MotorCommandExecutor {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn execute(
        &self,
        controller: &mut MotorController,
        command: &MotorCommand,
    ) -> Result<(), Error> {
        match command {
            MotorCommand::List => {
                for status in controller.list() {
                    print_status(&status);
                }
            }
            MotorCommand::Status { name } => {
                print_status(&motor(controller, name)?.status());
            }
            MotorCommand::SetPosition { name, degrees } => {
                let accepted = motor(controller, name)?.set_position(*degrees)?;
                check(name, accepted, || format!("set_position {degrees}"))?;
            }
            MotorCommand::GetPosition { name } => {
                println!("{} degrees", motor(controller, name)?.get_position()?);
            }
            MotorCommand::MoveSteps {
                name,
                steps,
                backward,
            } => {
                let accepted = motor(controller, name)?.move_steps(*steps, !*backward)?;
                check(name, accepted, || format!("move_steps {steps}"))?;
            }
            MotorCommand::GetStepPosition { name } => {
                println!("{} steps", motor(controller, name)?.get_step_position()?);
            }
            MotorCommand::SetSpeed { name, rpm } => {
                let accepted = motor(controller, name)?.set_speed(*rpm)?;
                check(name, accepted, || format!("set_speed {rpm}"))?;
            }
            MotorCommand::GetSpeed { name } => {
                println!("{} RPM", motor(controller, name)?.get_speed()?);
            }
            MotorCommand::SetDirection {
                name,
                counterclockwise,
            } => {
                let accepted = motor(controller, name)?.set_direction(!*counterclockwise)?;
                check(name, accepted, || "set_direction".to_owned())?;
            }
            MotorCommand::Remove { name } => {
                if !controller.remove(name) {
                    return Err(Error::NoMotor(name.clone()));
                }
            }
            MotorCommand::LoadCommands { command_file_path } => {
                for line in load_command_file_and_filter(command_file_path.clone())? {
                    let command = MotorCommand::parse_line(&line)?;
                    info!("Executing {}", line);
                    self.execute(controller, &command)?;
                }
            }
            MotorCommand::Demo => {
                for name in controller.names() {
                    let motor = motor(controller, name)?;
                    run_demo(motor)?;
                    print_status(&motor.status());
                }
            }
        }
        Ok(())
    }
}

fn motor<'a>(controller: &'a MotorController, name: &str) -> Result<&'a Motor, Error> {
    controller
        .get(name)
        .ok_or_else(|| Error::NoMotor(name.to_owned()))
}

fn check(name: &str, accepted: bool, operation: impl FnOnce() -> String) -> Result<(), Error> {
    if accepted {
        Ok(())
    } else {
        Err(Error::Rejected(name.to_owned(), operation()))
    }
}

fn print_status(status: &Status) {
    match status.get("name").and_then(|n| n.as_str()) {
        Some(name) => println!("{name}"),
        None => println!("(unnamed)"),
    }
    for (key, value) in status.iter().filter(|(key, _)| *key != "name") {
        println!(" {key} = {value}");
    }
}

fn run_demo(motor: &Motor) -> Result<(), Error> {
    let name = motor.name();
    info!("demo {} motor {name:?}", motor.kind());
    match motor.kind() {
        MotorKind::Positional => {
            for degrees in [0.0, 45.0, 90.0, 135.0, 180.0] {
                check(name, motor.set_position(degrees)?, || {
                    format!("set_position {degrees}")
                })?;
                println!("{name}: {} degrees", motor.get_position()?);
            }
        }
        MotorKind::Stepped => {
            check(name, motor.set_speed(60.0)?, || "set_speed 60".to_owned())?;
            for (steps, forward) in [(200, true), (100, false)] {
                check(name, motor.move_steps(steps, forward)?, || {
                    format!("move_steps {steps}")
                })?;
                println!("{name}: {} steps", motor.get_step_position()?);
            }
        }
        MotorKind::SpeedDirectional => {
            for clockwise in [true, false] {
                check(name, motor.set_direction(clockwise)?, || {
                    "set_direction".to_owned()
                })?;
                let ramp: Vec<f64> = (0..=5).map(|i| f64::from(i) * 1000.0).collect();
                let ramp = if clockwise {
                    ramp
                } else {
                    ramp.into_iter().rev().collect()
                };
                for rpm in ramp {
                    check(name, motor.set_speed(rpm)?, || format!("set_speed {rpm}"))?;
                    println!("{name}: {} RPM", motor.get_speed()?);
                }
            }
        }
    }
    Ok(())
}

/// Reads non-empty lines that are not comments (`#`).
pub fn load_command_file_and_filter(file_path: PathBuf) -> Result<Vec<String>, Error> {
    let file = File::open(&file_path).map_err(|e| Error::NoFile(file_path.clone(), e))?;
    let mut commands = vec![];
    for line in BufReader::new(file).lines() {
        let line = line.map_err(|e| Error::NoFile(file_path.clone(), e))?;
        let trimmed = line.trim();
        if !trimmed.is_empty() && !trimmed.starts_with('#') {
            commands.push(trimmed.to_owned());
        }
    }
    Ok(commands)
}
