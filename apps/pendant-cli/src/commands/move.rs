//! `move`: a one-shot MoveJ or MoveL, with a confirmation prompt for large
//! joint moves (`crate::safety`).

use clap::Args;
use pendant_sdk::{Connected, PoseCore};

use crate::error::{CliError, Result};
use crate::safety;
use crate::validation::{parse_joint_vector, parse_pose};

/// Move the arm to a target, either in joint space (`--joints`) or
/// Cartesian space (`--pose`). Exactly one of the two must be given.
#[derive(Args, Debug)]
pub struct MoveCommand {
    /// Target joint vector, six comma-separated values in kinematic order
    /// (degrees, mm for the prismatic joint): base,shoulder,d3,elbow,elbow2,ee.
    #[arg(short, long, conflicts_with = "pose")]
    pub joints: Option<String>,

    /// Target Cartesian pose: x,y,z,roll,pitch,yaw (mm/degrees).
    #[arg(short, long, conflicts_with = "joints")]
    pub pose: Option<String>,

    /// Jog/move velocity as a percentage of the configured max (1-100).
    #[arg(long, default_value_t = 50)]
    pub velocity: u8,

    /// Skip the large-move confirmation prompt.
    #[arg(long)]
    pub force: bool,
}

impl MoveCommand {
    pub fn execute(&self, pose: &PoseCore<Connected>) -> Result<()> {
        let before = pose.snapshot().joints;

        match (&self.joints, &self.pose) {
            (Some(joints), None) => {
                let target = parse_joint_vector(joints)?;
                if !self.force && safety::requires_confirmation(&before, &target) {
                    if !safety::confirm_large_move(&before, &target)? {
                        println!("move cancelled");
                        return Ok(());
                    }
                }
                pose.handle_move_j(target, self.velocity)?;
                println!("moveJ ok: {:?}", pose.snapshot().joints);
            }
            (None, Some(target_str)) => {
                let target = parse_pose(target_str)?;
                pose.handle_move_l(target.into(), self.velocity)?;
                println!("moveL ok: {:?}", pose.snapshot().end_effector);
            }
            (None, None) => {
                return Err(CliError::InvalidJoints(
                    "specify exactly one of --joints or --pose".to_string(),
                ))
            }
            (Some(_), Some(_)) => unreachable!("clap enforces conflicts_with"),
        }
        Ok(())
    }
}
