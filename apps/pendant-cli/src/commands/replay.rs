//! `playback`: load poses saved by `teach` and move the arm through them in
//! order, one MoveJ per pose.

use clap::Args;
use pendant_sdk::{Connected, PoseCore, SavedPose};

use crate::error::{CliError, Result};
use crate::safety;
use crate::validation::validate_script_path;

#[derive(Args, Debug)]
pub struct PlaybackCommand {
    /// Pose store file written by `teach`.
    #[arg(short, long)]
    pub input: String,

    /// Only play back the named pose, instead of the whole store in order.
    #[arg(long)]
    pub name: Option<String>,

    /// Velocity percentage for every move.
    #[arg(long, default_value_t = 50)]
    pub velocity: u8,

    /// Skip the large-move confirmation prompt between poses.
    #[arg(long)]
    pub force: bool,
}

impl PlaybackCommand {
    pub fn execute(&self, pose: &PoseCore<Connected>) -> Result<()> {
        validate_script_path(&self.input)?;
        let text = std::fs::read_to_string(&self.input)?;
        let poses: Vec<SavedPose> = serde_json::from_str(&text)?;

        let selected: Vec<&SavedPose> = match &self.name {
            Some(name) => poses.iter().filter(|p| &p.name == name).collect(),
            None => poses.iter().collect(),
        };

        if selected.is_empty() {
            return Err(CliError::InvalidJoints(format!(
                "no saved pose found in {} matching {:?}",
                self.input, self.name
            )));
        }

        for saved in selected {
            let before = pose.snapshot().joints;
            if !self.force && safety::requires_confirmation(&before, &saved.joints) {
                if !safety::confirm_large_move(&before, &saved.joints)? {
                    println!("playback stopped before {:?}", saved.name);
                    return Ok(());
                }
            }
            println!("moving to {:?} ({})", saved.name, saved.id);
            pose.handle_move_j(saved.joints, self.velocity)?;
        }

        println!("playback complete: {:?}", pose.snapshot().joints);
        Ok(())
    }
}
