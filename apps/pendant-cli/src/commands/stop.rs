//! `stop`: emergency stop. Halts any active jog and issues `estop` to the
//! Motor Link, best-effort.

use clap::Args;
use pendant_sdk::{Connected, PoseCore};

use crate::error::Result;

#[derive(Args, Debug)]
pub struct StopCommand;

impl StopCommand {
    pub fn execute(&self, pose: &PoseCore<Connected>) -> Result<()> {
        pose.handle_emergency_stop();
        println!("emergency stop issued");
        Ok(())
    }
}
