//! Pose State + Motion Controller: the jog loop and the handlers for
//! jog-start/stop/velocity/increment, moveJ, moveL, home, and emergency
//! stop (`spec.md` §4.3).
//!
//! Grounded on `original_source/pendant/routers/motion.py`'s
//! `handle_jog_start/stop/velocity/increment`, `handle_moveJ/moveL`,
//! `handle_emergency_stop`, `update_joint_position`,
//! `update_cartesian_position`, and `jog_motion_control` for control flow,
//! generalized into explicit `Result` returns and a dedicated jog-loop
//! thread (teacher precedent: `piper-driver`'s IO thread plus
//! `AtomicDriverMode`-style idempotent start/stop) instead of a `print`-
//! logging global-dict `asyncio` task.

use std::marker::PhantomData;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread;
use std::time::{Duration, Instant, SystemTime, UNIX_EPOCH};

use parking_lot::Mutex;
use pendant_kinematics::{forward, inverse_analytic, inverse_differential};
use pendant_motor::MotorLink;
use pendant_types::config::PendantConfig;
use pendant_types::error::PendantError;
use pendant_types::event::Event;
use pendant_types::jog::{JogMode, JogState, JogTarget};
use pendant_types::joint::JointVector;
use pendant_types::pose::EndEffectorPose;
use pendant_types::Result;

use crate::broadcast::BroadcastBus;
use crate::pose::PoseState;

/// An operator-supplied MoveL target: only the axes the operator actually
/// sent are `Some`; the rest are filled in from the current end-effector
/// pose before validation (`spec.md` §4.3 `handle_moveL`: "merge provided
/// axes with current EndEffectorPose to form a full target").
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct PartialPose {
    pub x: Option<f64>,
    pub y: Option<f64>,
    pub z: Option<f64>,
    pub roll: Option<f64>,
    pub pitch: Option<f64>,
    pub yaw: Option<f64>,
}

impl From<EndEffectorPose> for PartialPose {
    /// A fully-specified target (e.g. a `Step::MoveL`'s `position`) as a
    /// `PartialPose` with every axis present.
    fn from(pose: EndEffectorPose) -> Self {
        PartialPose {
            x: Some(pose.x),
            y: Some(pose.y),
            z: Some(pose.z),
            roll: Some(pose.roll),
            pitch: Some(pose.pitch),
            yaw: Some(pose.yaw),
        }
    }
}

impl PartialPose {
    pub fn merge(&self, current: &EndEffectorPose) -> EndEffectorPose {
        EndEffectorPose {
            x: self.x.unwrap_or(current.x),
            y: self.y.unwrap_or(current.y),
            z: self.z.unwrap_or(current.z),
            roll: self.roll.unwrap_or(current.roll),
            pitch: self.pitch.unwrap_or(current.pitch),
            yaw: self.yaw.unwrap_or(current.yaw),
        }
    }
}

fn unix_timestamp() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or(0)
}

fn position_update_event(pose: &PoseState) -> Event {
    Event::PositionUpdate {
        joint_positions: pose.joints,
        ee_position: pose.end_effector,
        timestamp: unix_timestamp(),
    }
}

fn validate_jog_target(mode: JogMode, target: JogTarget) -> Result<()> {
    match (mode, target) {
        (JogMode::Joint, JogTarget::Joint(_)) => Ok(()),
        (JogMode::Cartesian, JogTarget::Axis(_)) => Ok(()),
        _ => Err(PendantError::InvalidInput(
            "jog target does not belong to the given mode".to_string(),
        )),
    }
}

fn max_velocity(config: &PendantConfig, mode: JogMode, target: JogTarget) -> f64 {
    match (mode, target) {
        (JogMode::Joint, JogTarget::Joint(j)) => config.joint_velocities.get(j),
        (JogMode::Cartesian, JogTarget::Axis(a)) => config.axis_velocities.get(a),
        _ => 0.0,
    }
}

/// Disconnected marker: the Motor Link has not yet been attached.
pub struct Disconnected;
/// Connected marker: every handler is callable.
pub struct Connected;

struct Inner {
    config: PendantConfig,
    pose: Mutex<PoseState>,
    link: Mutex<Option<Arc<MotorLink>>>,
    bus: BroadcastBus,
    jog_thread_running: AtomicBool,
    epoch: Instant,
}

impl Inner {
    fn now(&self) -> f64 {
        self.epoch.elapsed().as_secs_f64()
    }

    fn simulation_mode(&self) -> bool {
        self.config.simulation_mode
    }
}

/// The owned, mutex-guarded Pose State record plus its type-state
/// connection marker, grounded on `piper-client::state::machine`'s
/// `Disconnected`/`Standby`/`Active<Mode>` pattern, collapsed to two states
/// since this spec has no MIT/Position mode split.
pub struct PoseCore<State = Disconnected> {
    inner: Arc<Inner>,
    _state: PhantomData<State>,
}

impl<S> Clone for PoseCore<S> {
    fn clone(&self) -> Self {
        PoseCore {
            inner: self.inner.clone(),
            _state: PhantomData,
        }
    }
}

impl PoseCore<Disconnected> {
    /// Construct a fresh core at `config.default_pose`.
    pub fn new(config: PendantConfig) -> Self {
        let end_effector = forward(&config.default_pose, &config.dimensions);
        let pose = PoseState::new(config.default_pose, end_effector);
        PoseCore {
            inner: Arc::new(Inner {
                config,
                pose: Mutex::new(pose),
                link: Mutex::new(None),
                bus: BroadcastBus::new(),
                jog_thread_running: AtomicBool::new(false),
                epoch: Instant::now(),
            }),
            _state: PhantomData,
        }
    }

    /// Attach the Motor Link. In simulation mode the link's `connect` is
    /// not invoked — `spec.md` §6: "Motor Link is never contacted" — but a
    /// link instance (e.g. an in-memory test double) is still stored so
    /// handlers have a uniform code path.
    pub fn connect(self, link: Arc<MotorLink>) -> PoseCore<Connected> {
        if !self.inner.config.simulation_mode {
            link.connect();
        }
        *self.inner.link.lock() = Some(link);
        PoseCore {
            inner: self.inner,
            _state: PhantomData,
        }
    }
}

impl PoseCore<Connected> {
    pub fn config(&self) -> &PendantConfig {
        &self.inner.config
    }

    pub fn bus(&self) -> &BroadcastBus {
        &self.inner.bus
    }

    pub fn snapshot(&self) -> PoseState {
        self.inner.pose.lock().clone()
    }

    fn publish(&self, event: Event) {
        self.inner.bus.publish(event);
    }

    fn link(&self) -> Option<Arc<MotorLink>> {
        self.inner.link.lock().clone()
    }

    /// Issue `setJointPositions`, unless in simulation mode. Any link
    /// failure maps to `PendantError::LinkClosed`/`LinkProtocol`.
    fn send_joint_positions(&self, joints: &JointVector) -> Result<()> {
        if self.inner.simulation_mode() {
            return Ok(());
        }
        let link = self.link().ok_or(PendantError::LinkClosed)?;
        match link.set_joint_positions(joints)? {
            pendant_motor::CommandOutcome::Ok => Ok(()),
            pendant_motor::CommandOutcome::Error(message) => {
                Err(PendantError::LinkProtocol(message))
            }
            pendant_motor::CommandOutcome::Unrecognized(status) => Err(
                PendantError::LinkProtocol(format!("unrecognized response: {status}")),
            ),
        }
    }

    // ---- Jog: continuous ----------------------------------------------

    pub fn handle_jog_start(
        &self,
        mode: JogMode,
        target: JogTarget,
        direction: i8,
        velocity_pct: u8,
    ) -> Result<()> {
        validate_jog_target(mode, target)?;
        let velocity_pct = velocity_pct.clamp(1, 100);
        let max_vel = max_velocity(&self.inner.config, mode, target);
        let target_velocity = direction as f64 * (velocity_pct as f64 / 100.0) * max_vel;

        {
            let mut pose = self.inner.pose.lock();
            pose.jog = JogState {
                active: true,
                mode: Some(mode),
                target: Some(target),
                direction,
                velocity_pct,
                target_velocity,
                last_update_time: self.inner.now(),
            };
        }

        self.ensure_jog_loop_running();
        Ok(())
    }

    pub fn handle_jog_velocity(&self, velocity_pct: u8) {
        let velocity_pct = velocity_pct.clamp(1, 100);
        let mut pose = self.inner.pose.lock();
        if !pose.jog.active {
            return;
        }
        let (mode, target) = match (pose.jog.mode, pose.jog.target) {
            (Some(mode), Some(target)) => (mode, target),
            _ => return,
        };
        let max_vel = max_velocity(&self.inner.config, mode, target);
        pose.jog.velocity_pct = velocity_pct;
        pose.jog.target_velocity =
            pose.jog.direction as f64 * (velocity_pct as f64 / 100.0) * max_vel;
    }

    pub fn handle_jog_stop(&self) {
        {
            let mut pose = self.inner.pose.lock();
            pose.jog.active = false;
            pose.jog.direction = 0;
            pose.jog.target_velocity = 0.0;
        }
        self.publish(Event::JogStop {
            timestamp: unix_timestamp(),
        });
    }

    fn ensure_jog_loop_running(&self) {
        if self
            .inner
            .jog_thread_running
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .is_err()
        {
            return;
        }
        let core = self.clone();
        thread::spawn(move || {
            let tick_period = Duration::from_secs_f64(core.inner.config.update_interval.max(1e-3));
            loop {
                if !core.jog_tick() {
                    break;
                }
                spin_sleep::sleep(tick_period);
            }
            core.inner.jog_thread_running.store(false, Ordering::Release);
        });
    }

    /// Run one jog-loop tick (`spec.md` §4.3). Returns `false` when the
    /// loop should exit (jog is no longer active).
    fn jog_tick(&self) -> bool {
        let (mode, target, continue_running, snapshot) = {
            let mut pose = self.inner.pose.lock();
            if !pose.jog.active {
                return false;
            }
            let now = self.inner.now();
            let dt = now - pose.jog.last_update_time;
            pose.jog.last_update_time = now;
            let delta = pose.jog.target_velocity * dt;

            let (mode, target) = match (pose.jog.mode, pose.jog.target) {
                (Some(mode), Some(target)) => (mode, target),
                _ => return true,
            };

            if delta.abs() < 1e-3 {
                return true;
            }

            match (mode, target) {
                (JogMode::Joint, JogTarget::Joint(joint)) => {
                    let limit = self.inner.config.joint_limits.get(joint);
                    let updated = limit.clamp(pose.joints.get(joint) + delta);
                    pose.joints.set(joint, updated);
                    pose.end_effector = forward(&pose.joints, &self.inner.config.dimensions);
                    (mode, target, true, Some(pose.clone()))
                }
                (JogMode::Cartesian, JogTarget::Axis(axis)) => {
                    let mut arr = pose.end_effector.as_array();
                    arr[axis.index()] += delta;
                    let limit = self.inner.config.workspace_limits.get(axis);
                    arr[axis.index()] = limit.clamp(arr[axis.index()]);
                    let target_pose = EndEffectorPose::from_array(arr);

                    match inverse_differential(
                        &pose.joints,
                        &target_pose,
                        &self.inner.config.dimensions,
                        &self.inner.config.joint_limits,
                    ) {
                        Some(joints) => {
                            pose.joints = joints;
                            pose.end_effector =
                                forward(&pose.joints, &self.inner.config.dimensions);
                            (mode, target, true, Some(pose.clone()))
                        }
                        // DIK did not converge: keep prior state, drop the
                        // tick silently, no broadcast (`spec.md` §7).
                        None => (mode, target, true, None),
                    }
                }
                _ => (mode, target, true, None),
            }
        };
        let _ = (mode, target);

        if let Some(snapshot) = snapshot {
            self.publish(position_update_event(&snapshot));
        }
        continue_running
    }

    // ---- Jog: discrete increment ---------------------------------------

    pub fn handle_jog_increment(
        &self,
        mode: JogMode,
        target: JogTarget,
        direction: i8,
        increment: f64,
    ) -> Result<()> {
        validate_jog_target(mode, target)?;
        let snapped = self.inner.config.jog_increments.snap(mode, increment);
        let delta = direction as f64 * snapped;

        let snapshot = {
            let mut pose = self.inner.pose.lock();
            match (mode, target) {
                (JogMode::Joint, JogTarget::Joint(joint)) => {
                    let limit = self.inner.config.joint_limits.get(joint);
                    let updated = limit.clamp(pose.joints.get(joint) + delta);
                    pose.joints.set(joint, updated);
                    pose.end_effector = forward(&pose.joints, &self.inner.config.dimensions);
                    pose.clone()
                }
                (JogMode::Cartesian, JogTarget::Axis(axis)) => {
                    let mut arr = pose.end_effector.as_array();
                    arr[axis.index()] += delta;
                    let limit = self.inner.config.workspace_limits.get(axis);
                    arr[axis.index()] = limit.clamp(arr[axis.index()]);
                    let target_pose = EndEffectorPose::from_array(arr);

                    let joints = inverse_differential(
                        &pose.joints,
                        &target_pose,
                        &self.inner.config.dimensions,
                        &self.inner.config.joint_limits,
                    )
                    .ok_or(PendantError::NoSolution)?;
                    pose.joints = joints;
                    pose.end_effector = forward(&pose.joints, &self.inner.config.dimensions);
                    pose.clone()
                }
                _ => unreachable!("validated above"),
            }
        };

        self.send_joint_positions(&snapshot.joints)?;
        self.publish(position_update_event(&snapshot));
        Ok(())
    }

    // ---- Discrete moves --------------------------------------------------

    pub fn handle_move_j(&self, joint_positions: JointVector, _velocity_pct: u8) -> Result<()> {
        if let Some((joint, value, limit)) =
            self.inner.config.joint_limits.first_violation(&joint_positions)
        {
            return Err(PendantError::JointLimitViolation {
                joint: joint.to_string(),
                value,
                min: limit.min,
                max: limit.max,
            });
        }

        let end_effector = forward(&joint_positions, &self.inner.config.dimensions);
        let snapshot = {
            let mut pose = self.inner.pose.lock();
            pose.joints = joint_positions;
            pose.end_effector = end_effector;
            pose.clone()
        };

        self.send_joint_positions(&snapshot.joints)?;
        self.publish(position_update_event(&snapshot));
        Ok(())
    }

    pub fn handle_move_l(&self, target: PartialPose, _velocity_pct: u8) -> Result<()> {
        let current_ee = self.inner.pose.lock().end_effector;
        let full_target = target.merge(&current_ee);

        if let Some((axis, value, limit)) =
            self.inner.config.workspace_limits.first_violation(&full_target)
        {
            return Err(PendantError::WorkspaceLimitViolation {
                axis: axis.to_string(),
                value,
                min: limit.min,
                max: limit.max,
            });
        }

        let joints = inverse_analytic(
            &full_target,
            &self.inner.config.dimensions,
            &self.inner.config.joint_limits,
        )?;
        let end_effector = forward(&joints, &self.inner.config.dimensions);

        let snapshot = {
            let mut pose = self.inner.pose.lock();
            pose.joints = joints;
            pose.end_effector = end_effector;
            pose.clone()
        };

        self.send_joint_positions(&snapshot.joints)?;
        self.publish(position_update_event(&snapshot));
        Ok(())
    }

    // ---- Home & emergency stop -------------------------------------------

    pub fn handle_home(&self) -> Result<()> {
        if !self.inner.simulation_mode() {
            let link = self.link().ok_or(PendantError::LinkClosed)?;
            link.send_home()?;
        }

        let joints = self.inner.config.home_pose;
        let end_effector = forward(&joints, &self.inner.config.dimensions);
        let snapshot = {
            let mut pose = self.inner.pose.lock();
            pose.joints = joints;
            pose.end_effector = end_effector;
            pose.clone()
        };

        self.publish(position_update_event(&snapshot));
        Ok(())
    }

    /// Stop any jog, best-effort `estop` to the Motor Link, and broadcast
    /// `emergency_stop` — atomically with respect to other pose mutations,
    /// per `spec.md` §4.3/§5. The `estop` write's outcome is deliberately
    /// ignored: `spec.md` §9 leaves link-disconnected behavior unspecified
    /// and treats the write as best-effort.
    pub fn handle_emergency_stop(&self) {
        {
            let mut pose = self.inner.pose.lock();
            pose.jog.active = false;
            pose.jog.direction = 0;
            pose.jog.target_velocity = 0.0;
        }

        if !self.inner.simulation_mode() {
            if let Some(link) = self.link() {
                let _ = link.send_estop();
            }
        }

        self.publish(Event::EmergencyStop {
            timestamp: unix_timestamp(),
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pendant_motor::InMemorySerialPort;
    use pendant_types::joint::{AxisName, JointName};

    fn test_core() -> PoseCore<Connected> {
        let config = PendantConfig::scenario_v2();
        let (link, _rx) = MotorLink::new(
            Box::new(InMemorySerialPort::new()),
            Duration::from_millis(1),
            Duration::from_millis(5),
        );
        PoseCore::new(config).connect(Arc::new(link))
    }

    #[test]
    fn handle_move_j_updates_pose_and_is_fk_consistent() {
        let core = test_core();
        let mut target = core.snapshot().joints;
        target.base_rotation = 45.0;

        core.handle_move_j(target, 50).unwrap();

        let pose = core.snapshot();
        assert_eq!(pose.joints.base_rotation, 45.0);
        let expected = forward(&pose.joints, &core.config().dimensions);
        assert!((pose.end_effector.x - expected.x).abs() < 1e-6);
        assert!((pose.end_effector.y - expected.y).abs() < 1e-6);
        assert!((pose.end_effector.z - expected.z).abs() < 1e-6);
    }

    #[test]
    fn handle_move_j_rejects_limit_violation_without_state_change() {
        let core = test_core();
        let before = core.snapshot();
        let mut target = before.joints;
        target.shoulder_rotation = 200.0;

        let err = core.handle_move_j(target, 50).unwrap_err();
        assert!(matches!(err, PendantError::JointLimitViolation { .. }));
        assert_eq!(core.snapshot().joints, before.joints);
    }

    #[test]
    fn handle_move_j_is_idempotent() {
        let core = test_core();
        let mut target = core.snapshot().joints;
        target.base_rotation = 30.0;

        core.handle_move_j(target, 50).unwrap();
        let once = core.snapshot();
        core.handle_move_j(target, 50).unwrap();
        let twice = core.snapshot();
        assert_eq!(once.joints, twice.joints);
        assert_eq!(once.end_effector, twice.end_effector);
    }

    /// Scenario 3 from `spec.md` §8: out-of-reach moveL leaves state
    /// unchanged.
    #[test]
    fn handle_move_l_out_of_reach_fails_without_state_change() {
        let core = test_core();
        let before = core.snapshot();

        let target = PartialPose {
            x: Some(2000.0),
            y: Some(0.0),
            z: Some(100.0),
            roll: Some(0.0),
            pitch: Some(0.0),
            yaw: Some(0.0),
        };
        let err = core.handle_move_l(target, 50).unwrap_err();
        assert!(matches!(err, PendantError::OutOfReach { .. }));
        assert_eq!(core.snapshot().joints, before.joints);
    }

    /// Scenario 2 from `spec.md` §8: joint-limit clamp in jog.
    #[test]
    fn jog_increment_clamps_to_joint_limit() {
        let core = test_core();
        {
            let mut pose = core.inner.pose.lock();
            pose.joints.shoulder_rotation = 89.0;
        }

        core.handle_jog_increment(
            JogMode::Joint,
            JogTarget::Joint(JointName::ShoulderRotation),
            1,
            10.0, // snaps to the 10.0 standard increment
        )
        .unwrap();

        assert_eq!(core.snapshot().joints.shoulder_rotation, 90.0);

        // A further positive increment keeps it pinned at the limit.
        core.handle_jog_increment(
            JogMode::Joint,
            JogTarget::Joint(JointName::ShoulderRotation),
            1,
            10.0,
        )
        .unwrap();
        assert_eq!(core.snapshot().joints.shoulder_rotation, 90.0);
    }

    /// Opposite-direction increments from a pose not at a limit net to
    /// exactly zero (`spec.md` §8 round-trip law).
    #[test]
    fn opposite_jog_increments_net_to_zero() {
        let core = test_core();
        let before = core.snapshot().joints.base_rotation;

        core.handle_jog_increment(
            JogMode::Joint,
            JogTarget::Joint(JointName::BaseRotation),
            1,
            5.0,
        )
        .unwrap();
        core.handle_jog_increment(
            JogMode::Joint,
            JogTarget::Joint(JointName::BaseRotation),
            -1,
            5.0,
        )
        .unwrap();

        assert!((core.snapshot().joints.base_rotation - before).abs() < 1e-9);
    }

    /// Scenario 4 from `spec.md` §8: cartesian jog increment via DIK.
    #[test]
    fn cartesian_jog_increment_moves_z_and_stays_fk_consistent() {
        let core = test_core();
        let before = core.snapshot().end_effector;

        core.handle_jog_increment(JogMode::Cartesian, JogTarget::Axis(AxisName::Z), 1, 10.0)
            .unwrap();

        let pose = core.snapshot();
        assert!((pose.end_effector.z - (before.z + 10.0)).abs() < 1e-3);
        let expected = forward(&pose.joints, &core.config().dimensions);
        assert!((pose.end_effector.x - expected.x).abs() < 1e-6);
        assert!((pose.end_effector.z - expected.z).abs() < 1e-6);
    }

    #[test]
    fn handle_home_resets_to_configured_home_pose() {
        let core = test_core();
        let mut target = core.snapshot().joints;
        target.base_rotation = 77.0;
        core.handle_move_j(target, 50).unwrap();

        core.handle_home().unwrap();

        let pose = core.snapshot();
        assert_eq!(pose.joints, core.config().home_pose);
    }

    /// Scenario 5 from `spec.md` §8: emergency stop mid-jog.
    #[test]
    fn emergency_stop_deactivates_jog_and_broadcasts() {
        let core = test_core();
        let (_id, rx) = core.bus().subscribe();

        core.handle_jog_start(
            JogMode::Joint,
            JogTarget::Joint(JointName::BaseRotation),
            1,
            100,
        )
        .unwrap();
        assert!(core.snapshot().jog.active);

        core.handle_emergency_stop();

        assert!(!core.snapshot().jog.active);
        let mut saw_emergency_stop = false;
        while let Ok(event) = rx.try_recv() {
            if matches!(event, Event::EmergencyStop { .. }) {
                saw_emergency_stop = true;
            }
        }
        assert!(saw_emergency_stop);
    }

    #[test]
    fn jog_stop_deactivates_and_broadcasts_jog_stop() {
        let core = test_core();
        let (_id, rx) = core.bus().subscribe();

        core.handle_jog_start(
            JogMode::Joint,
            JogTarget::Joint(JointName::BaseRotation),
            1,
            50,
        )
        .unwrap();
        core.handle_jog_stop();

        let pose = core.snapshot();
        assert!(!pose.jog.active);
        assert_eq!(pose.jog.direction, 0);
        assert_eq!(pose.jog.target_velocity, 0.0);

        let mut saw_jog_stop = false;
        while let Ok(event) = rx.try_recv() {
            if matches!(event, Event::JogStop { .. }) {
                saw_jog_stop = true;
            }
        }
        assert!(saw_jog_stop);
    }
}
