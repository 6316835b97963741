use std::io::Write;

use assert_approx_eq::assert_approx_eq;
use serde_json::json;
use umci::MotorController;
use umci_apps::{
    load_command_file_and_filter, ControllerConfig, Error, MotorCommand, MotorCommandExecutor,
};
use umci_example_drivers::example_driver_table;

fn demo_controller() -> MotorController {
    ControllerConfig::demo()
        .create_controller(example_driver_table())
        .unwrap()
}

fn run(controller: &mut MotorController, line: &str) -> Result<(), Error> {
    let command = MotorCommand::parse_line(line)?;
    MotorCommandExecutor::new().execute(controller, &command)
}

#[test]
fn execute_single_commands() {
    let mut controller = demo_controller();
    run(&mut controller, "set_position servo1 200").unwrap();
    assert_approx_eq!(controller.get("servo1").unwrap().get_position().unwrap(), 180.0);

    run(&mut controller, "set_speed stepper1 120").unwrap();
    run(&mut controller, "move_steps stepper1 30").unwrap();
    run(&mut controller, "move_steps stepper1 10 --backward").unwrap();
    let stepper = controller.get("stepper1").unwrap();
    assert_eq!(stepper.get_step_position().unwrap(), 20);
    assert_approx_eq!(stepper.get_speed().unwrap(), 120.0);

    run(&mut controller, "set_direction bldc1 --counterclockwise").unwrap();
    run(&mut controller, "set_speed bldc1 99999").unwrap();
    let status = controller.get("bldc1").unwrap().status();
    assert_eq!(status["speed"], json!(5000.0));
    assert_eq!(status["direction"], json!("counterclockwise"));

    run(&mut controller, "list").unwrap();
    run(&mut controller, "status bldc1").unwrap();
    controller.shutdown_all();
}

#[test]
fn rejected_operation() {
    let mut controller = demo_controller();
    assert!(matches!(
        run(&mut controller, "move_steps stepper1 0"),
        Err(Error::Rejected(name, _)) if name == "stepper1"
    ));
    assert!(matches!(
        run(&mut controller, "set_speed stepper1 -5"),
        Err(Error::Rejected(..))
    ));
    controller.shutdown_all();
}

#[test]
fn unknown_motor_and_wrong_kind() {
    let mut controller = demo_controller();
    assert!(matches!(
        run(&mut controller, "get_speed missing"),
        Err(Error::NoMotor(name)) if name == "missing"
    ));
    assert!(matches!(
        run(&mut controller, "set_position bldc1 10"),
        Err(Error::Umci(umci::Error::CapabilityMismatch { .. }))
    ));
    controller.shutdown_all();
}

#[test]
fn remove_motor() {
    let mut controller = demo_controller();
    run(&mut controller, "remove stepper1").unwrap();
    assert_eq!(controller.names(), vec!["servo1", "bldc1"]);
    assert!(matches!(
        run(&mut controller, "remove stepper1"),
        Err(Error::NoMotor(_))
    ));
    controller.shutdown_all();
}

#[test]
fn demo_routine() {
    let mut controller = demo_controller();
    run(&mut controller, "demo").unwrap();
    assert_approx_eq!(controller.get("servo1").unwrap().get_position().unwrap(), 180.0);
    assert_eq!(
        controller.get("stepper1").unwrap().get_step_position().unwrap(),
        100
    );
    assert_approx_eq!(controller.get("bldc1").unwrap().get_speed().unwrap(), 0.0);
    controller.shutdown_all();
}

#[test]
fn load_sample_commands() {
    let commands = load_command_file_and_filter("config/sample_commands.txt".into()).unwrap();
    assert_eq!(commands.len(), 7);
    assert_eq!(commands[0], "set_position servo1 90");

    let mut controller = demo_controller();
    run(&mut controller, "load_commands config/sample_commands.txt").unwrap();
    assert_approx_eq!(controller.get("servo1").unwrap().get_position().unwrap(), 90.0);
    assert_eq!(
        controller.get("stepper1").unwrap().get_step_position().unwrap(),
        150
    );
    assert_approx_eq!(controller.get("bldc1").unwrap().get_speed().unwrap(), 5000.0);
    controller.shutdown_all();
}

#[test]
fn load_commands_stops_at_first_error() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(file, "set_position servo1 45").unwrap();
    writeln!(file, "spin servo1").unwrap();
    writeln!(file, "set_position servo1 90").unwrap();

    let mut controller = demo_controller();
    let command = MotorCommand::LoadCommands {
        command_file_path: file.path().to_owned(),
    };
    assert!(matches!(
        MotorCommandExecutor::new().execute(&mut controller, &command),
        Err(Error::CommandParseFailure(line, _)) if line == "spin servo1"
    ));
    assert_approx_eq!(controller.get("servo1").unwrap().get_position().unwrap(), 45.0);
    controller.shutdown_all();
}

#[test]
fn missing_command_file() {
    assert!(matches!(
        load_command_file_and_filter("config/no_such_commands.txt".into()),
        Err(Error::NoFile(..))
    ));
}
