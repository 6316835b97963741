use assert_approx_eq::assert_approx_eq;
use serde_json::json;
use umci::{Capability, DriverConfig, Error, MotorController, MotorKind};
use umci_example_drivers::*;

fn config(value: serde_json::Value) -> DriverConfig {
    value.as_object().unwrap().clone()
}

fn new_controller() -> MotorController {
    MotorController::new(example_driver_table())
}

#[test]
fn test_servo_clamps_position() {
    let mut controller = new_controller();
    let servo = controller
        .create(
            "servo1",
            MotorKind::Positional,
            SERVO_DRIVER_NAME,
            &config(json!({ "pin": 18 })),
        )
        .unwrap();
    assert!(servo.is_initialized());
    assert!(servo.set_position(200.0).unwrap());
    assert_approx_eq!(servo.get_position().unwrap(), 180.0);
    assert_eq!(servo.status()["position"], json!(180.0));
}

#[test]
fn test_stepper_rejects_non_positive_steps() {
    let mut controller = new_controller();
    let stepper = controller
        .create(
            "stepper1",
            MotorKind::Stepped,
            STEPPER_DRIVER_NAME,
            &config(json!({ "step_pin": 17, "dir_pin": 27 })),
        )
        .unwrap();
    assert!(stepper.move_steps(200, true).unwrap());
    assert!(!stepper.move_steps(0, true).unwrap());
    assert!(!stepper.move_steps(-10, true).unwrap());
    assert_eq!(stepper.get_step_position().unwrap(), 200);
    assert!(stepper.set_speed(60.0).unwrap());
    assert_approx_eq!(stepper.get_speed().unwrap(), 60.0);
}

#[test]
fn test_bldc_clamps_speed() {
    let mut controller = new_controller();
    let bldc = controller
        .create(
            "bldc1",
            MotorKind::SpeedDirectional,
            BLDC_DRIVER_NAME,
            &config(json!({ "pwm_pin": 22, "max_speed": 5000 })),
        )
        .unwrap();
    assert!(bldc.set_speed(99999.0).unwrap());
    assert_approx_eq!(bldc.get_speed().unwrap(), 5000.0);
    assert!(bldc.set_direction(false).unwrap());
    assert_eq!(bldc.status()["direction"], json!("counterclockwise"));
}

#[test]
fn test_missing_config_is_not_a_creation_failure() {
    let mut controller = new_controller();
    let servo = controller
        .create(
            "servo1",
            MotorKind::Positional,
            SERVO_DRIVER_NAME,
            &DriverConfig::new(),
        )
        .unwrap();
    assert!(!servo.is_initialized());
    assert!(!servo.set_position(90.0).unwrap());
    assert_eq!(controller.list()[0]["initialized"], json!(false));
}

#[test]
fn test_example_driver_kind_mismatch() {
    let mut controller = new_controller();
    let err = controller
        .create(
            "servo1",
            MotorKind::Positional,
            STEPPER_DRIVER_NAME,
            &config(json!({ "step_pin": 17, "dir_pin": 27 })),
        )
        .unwrap_err();
    assert!(matches!(
        err,
        Error::CapabilityMismatch {
            required: Capability::Positional,
            ..
        }
    ));
    assert!(controller.is_empty());
}

#[test]
fn test_list_and_shutdown_all() {
    let mut controller = new_controller();
    controller
        .create(
            "servo1",
            MotorKind::Positional,
            SERVO_DRIVER_NAME,
            &config(json!({ "pin": 18 })),
        )
        .unwrap();
    controller
        .create(
            "stepper1",
            MotorKind::Stepped,
            STEPPER_DRIVER_NAME,
            &config(json!({ "step_pin": 17, "dir_pin": 27, "enable_pin": 22 })),
        )
        .unwrap();
    controller
        .create(
            "bldc1",
            MotorKind::SpeedDirectional,
            BLDC_DRIVER_NAME,
            &config(json!({ "pwm_pin": 22 })),
        )
        .unwrap();

    let list = controller.list();
    assert_eq!(list.len(), 3);
    assert_eq!(list[0]["kind"], json!("positional"));
    assert_eq!(list[1]["enable_pin"], json!(22));
    assert_eq!(list[2]["kind"], json!("speed_directional"));

    controller.shutdown_all();
    assert!(controller.list().is_empty());
    assert!(controller.registry().is_empty());
}
