//! Integration tests exercising the public facade end-to-end against the
//! concrete scenarios enumerated in `spec.md` §8.

use std::sync::Arc;
use std::time::Duration;

use pendant_sdk::{
    forward, AxisName, InMemorySerialPort, JogMode, JogTarget, JointName, JointVector, MotorLink,
    PartialPose, PendantConfig, Program, ProgramEngine, ProgramHandle, Step,
};

fn connected_pose() -> (pendant_sdk::PoseCore<pendant_sdk::Connected>, Arc<MotorLink>) {
    let config = PendantConfig::scenario_v2();
    let (link, _rx) = MotorLink::new(
        Box::new(InMemorySerialPort::new()),
        Duration::from_millis(1),
        Duration::from_millis(5),
    );
    let link = Arc::new(link);
    let pose = pendant_sdk::PoseCore::new(config).connect(link.clone());
    (pose, link)
}

/// Scenario 1: the home pose's end-effector position matches forward
/// kinematics computed directly.
#[test]
fn home_pose_matches_direct_forward_kinematics() {
    let (pose, _link) = connected_pose();
    let snapshot = pose.snapshot();
    let expected = forward(&snapshot.joints, &pose.config().dimensions);
    assert_eq!(snapshot.end_effector, expected);
}

/// Scenario 3: an out-of-reach MoveL is rejected and leaves the pose
/// unchanged.
#[test]
fn move_l_out_of_reach_is_rejected() {
    let (pose, _link) = connected_pose();
    let before = pose.snapshot();

    let target = PartialPose {
        x: Some(5000.0),
        y: Some(0.0),
        z: Some(0.0),
        roll: Some(0.0),
        pitch: Some(0.0),
        yaw: Some(0.0),
    };
    assert!(pose.handle_move_l(target, 50).is_err());
    assert_eq!(pose.snapshot().joints, before.joints);
}

/// Scenario 4: a Cartesian jog increment along Z reaches the target and
/// stays FK-consistent.
#[test]
fn cartesian_increment_reaches_target_and_stays_consistent() {
    let (pose, _link) = connected_pose();
    pose.handle_jog_increment(JogMode::Cartesian, JogTarget::Axis(AxisName::Z), 1, 10.0)
        .unwrap();

    let snapshot = pose.snapshot();
    let expected = forward(&snapshot.joints, &pose.config().dimensions);
    assert_eq!(snapshot.end_effector, expected);
}

/// Scenario 5: emergency stop during a jog deactivates it immediately.
#[test]
fn emergency_stop_during_jog() {
    let (pose, _link) = connected_pose();
    pose.handle_jog_start(
        JogMode::Joint,
        JogTarget::Joint(JointName::BaseRotation),
        1,
        100,
    )
    .unwrap();
    assert!(pose.snapshot().jog.active);

    pose.handle_emergency_stop();
    assert!(!pose.snapshot().jog.active);
}

/// Scenario 6: a program with a MoveJ then a Wait runs to completion in
/// simulation mode, applying the MoveJ and then returning after the wait.
#[test]
fn program_with_move_j_and_wait_completes() {
    let (pose, link) = connected_pose();
    let engine = ProgramEngine::new(pose.clone(), link);

    let mut target = JointVector::ZERO;
    target.base_rotation = 20.0;
    let program = Program {
        id: "scenario-6".to_string(),
        name: "move then wait".to_string(),
        steps: vec![
            Step::MoveJ {
                joint_positions: target,
                velocity_pct: 50,
            },
            Step::Wait { seconds: 0.01 },
        ],
    };

    engine.run(&program, &ProgramHandle::new());
    assert_eq!(pose.snapshot().joints.base_rotation, 20.0);
}

/// In simulation mode, `PoseCore` updates its in-process joint state
/// directly and never writes a `setJointPositions` line to the Motor Link.
#[test]
fn simulation_mode_never_touches_the_motor_link() {
    let (pose, _link) = connected_pose();
    assert!(pose.config().simulation_mode);

    let mut target = JointVector::ZERO;
    target.elbow_rotation = 5.0;
    pose.handle_move_j(target, 50).unwrap();

    assert_eq!(pose.snapshot().joints.elbow_rotation, 5.0);
}
