//! One-shot mode: load the configuration, connect, run exactly one command,
//! then exit. Each invocation gets its own `PoseCore`/`MotorLink`/
//! `ProgramEngine` triple — there is no session state shared across calls.

use std::sync::Arc;

use pendant_sdk::{Connected, MotorLink, PoseCore, ProgramEngine};

use crate::commands::config::load_config;
use crate::commands::{JogCommand, MoveCommand, PlaybackCommand, PositionCommand, RunCommand, StopCommand, TeachCommand};
use crate::error::Result;
use crate::runtime;

pub struct OneShotMode {
    pose: PoseCore<Connected>,
    #[allow(dead_code)]
    link: Arc<MotorLink>,
    engine: ProgramEngine,
}

impl OneShotMode {
    pub fn new(config_file: Option<&str>) -> Result<Self> {
        let config = load_config(config_file)?;
        let (pose, link) = runtime::connect(config)?;
        let engine = ProgramEngine::new(pose.clone(), link.clone());
        Ok(OneShotMode { pose, link, engine })
    }

    pub fn move_to(&self, args: &MoveCommand) -> Result<()> {
        args.execute(&self.pose)
    }

    pub fn get_position(&self, args: &PositionCommand) -> Result<()> {
        args.execute(&self.pose)
    }

    pub fn stop(&self, args: &StopCommand) -> Result<()> {
        args.execute(&self.pose)
    }

    pub fn jog(&self, args: &JogCommand) -> Result<()> {
        args.execute(&self.pose)
    }

    pub fn home(&self) -> Result<()> {
        self.pose.handle_home()?;
        println!("home ok: {:?}", self.pose.snapshot().joints);
        Ok(())
    }

    pub fn teach(&self, args: &TeachCommand) -> Result<()> {
        args.execute(&self.pose)
    }

    pub fn playback(&self, args: &PlaybackCommand) -> Result<()> {
        args.execute(&self.pose)
    }

    pub fn run_program(&self, args: &RunCommand) -> Result<()> {
        args.execute(&self.pose, &self.engine)
    }
}
