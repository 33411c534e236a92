//! `position`: print the live joint vector and end-effector pose.

use clap::Args;
use pendant_sdk::{Connected, PoseCore};

use crate::error::Result;

#[derive(Args, Debug)]
pub struct PositionCommand {
    /// Print as JSON instead of a human-readable table.
    #[arg(long)]
    pub json: bool,
}

impl PositionCommand {
    pub fn execute(&self, pose: &PoseCore<Connected>) -> Result<()> {
        let snapshot = pose.snapshot();
        if self.json {
            let joints = snapshot.joints;
            let ee = snapshot.end_effector;
            println!(
                "{{\"joints\":{{\"base_rotation\":{},\"shoulder_rotation\":{},\"prismatic_extension\":{},\"elbow_rotation\":{},\"elbow2_rotation\":{},\"end_effector_rotation\":{}}},\"end_effector\":{{\"x\":{},\"y\":{},\"z\":{},\"roll\":{},\"pitch\":{},\"yaw\":{}}}}}",
                joints.base_rotation,
                joints.shoulder_rotation,
                joints.prismatic_extension,
                joints.elbow_rotation,
                joints.elbow2_rotation,
                joints.end_effector_rotation,
                ee.x, ee.y, ee.z, ee.roll, ee.pitch, ee.yaw,
            );
        } else {
            println!("joints:");
            println!("  base_rotation:         {:>10.3}°", snapshot.joints.base_rotation);
            println!("  shoulder_rotation:     {:>10.3}°", snapshot.joints.shoulder_rotation);
            println!("  prismatic_extension:   {:>10.3}mm", snapshot.joints.prismatic_extension);
            println!("  elbow_rotation:        {:>10.3}°", snapshot.joints.elbow_rotation);
            println!("  elbow2_rotation:       {:>10.3}°", snapshot.joints.elbow2_rotation);
            println!("  end_effector_rotation: {:>10.3}°", snapshot.joints.end_effector_rotation);
            println!("end effector:");
            println!(
                "  x={:.3} y={:.3} z={:.3} roll={:.3} pitch={:.3} yaw={:.3}",
                snapshot.end_effector.x,
                snapshot.end_effector.y,
                snapshot.end_effector.z,
                snapshot.end_effector.roll,
                snapshot.end_effector.pitch,
                snapshot.end_effector.yaw,
            );
        }
        Ok(())
    }
}
