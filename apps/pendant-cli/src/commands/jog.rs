//! `jog`: start, stop, or apply one discrete increment to a jog.

use clap::Subcommand;
use pendant_sdk::{Connected, JogMode, JogTarget, PoseCore};

use crate::error::Result;
use crate::validation::{parse_axis_name, parse_joint_name};

#[derive(Subcommand, Debug)]
pub enum JogCommand {
    /// Start a continuous jog on one joint or Cartesian axis.
    Start {
        /// `joint` or `cartesian`.
        #[arg(long)]
        mode: String,
        /// Joint name (joint mode) or axis name (cartesian mode).
        #[arg(long)]
        target: String,
        /// `+1` or `-1`.
        #[arg(long)]
        direction: i8,
        /// 1-100.
        #[arg(long, default_value_t = 50)]
        velocity: u8,
    },
    /// Stop the active jog.
    Stop,
    /// Apply a single discrete increment.
    Increment {
        #[arg(long)]
        mode: String,
        #[arg(long)]
        target: String,
        #[arg(long)]
        direction: i8,
        #[arg(long)]
        increment: f64,
    },
}

fn parse_mode_and_target(mode: &str, target: &str) -> Result<(JogMode, JogTarget)> {
    match mode {
        "joint" => Ok((JogMode::Joint, JogTarget::Joint(parse_joint_name(target)?))),
        "cartesian" => Ok((JogMode::Cartesian, JogTarget::Axis(parse_axis_name(target)?))),
        other => Err(crate::error::CliError::InvalidJoints(format!(
            "unknown jog mode {other:?}, expected \"joint\" or \"cartesian\""
        ))),
    }
}

impl JogCommand {
    pub fn execute(&self, pose: &PoseCore<Connected>) -> Result<()> {
        match self {
            JogCommand::Start {
                mode,
                target,
                direction,
                velocity,
            } => {
                let (mode, target) = parse_mode_and_target(mode, target)?;
                pose.handle_jog_start(mode, target, *direction, *velocity)?;
                println!("jog started");
            }
            JogCommand::Stop => {
                pose.handle_jog_stop();
                println!("jog stopped");
            }
            JogCommand::Increment {
                mode,
                target,
                direction,
                increment,
            } => {
                let (mode, target) = parse_mode_and_target(mode, target)?;
                pose.handle_jog_increment(mode, target, *direction, *increment)?;
                println!("jog increment applied: {:?}", pose.snapshot().joints);
            }
        }
        Ok(())
    }
}
