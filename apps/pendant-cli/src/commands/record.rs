//! `teach`: save the arm's current live pose under a name, appending it to a
//! JSON pose store file. The store format is this CLI's own concern — the
//! motion core has no persistence of its own.

use std::path::{Path, PathBuf};

use clap::Args;
use pendant_sdk::{Connected, PoseCore, SavedPose};

use crate::error::Result;

/// Default location for the saved-pose store.
pub const DEFAULT_POSES_PATH: &str = "poses.json";

fn load_store(path: &Path) -> Result<Vec<SavedPose>> {
    if !path.exists() {
        return Ok(Vec::new());
    }
    let text = std::fs::read_to_string(path)?;
    if text.trim().is_empty() {
        return Ok(Vec::new());
    }
    Ok(serde_json::from_str(&text)?)
}

fn save_store(path: &Path, poses: &[SavedPose]) -> Result<()> {
    let text = serde_json::to_string_pretty(poses)?;
    std::fs::write(path, text)?;
    Ok(())
}

#[derive(Args, Debug)]
pub struct TeachCommand {
    /// A short name for the saved pose.
    #[arg(short, long)]
    pub name: String,

    /// Pose store file to append to (created if missing).
    #[arg(short, long, default_value = DEFAULT_POSES_PATH)]
    pub output: String,

    /// Unix timestamp to stamp the saved pose with (defaults to now).
    #[arg(long)]
    pub timestamp: Option<u64>,
}

impl TeachCommand {
    pub fn execute(&self, pose: &PoseCore<Connected>) -> Result<()> {
        let path: PathBuf = PathBuf::from(&self.output);
        let mut poses = load_store(&path)?;

        let timestamp = self.timestamp.unwrap_or_else(|| {
            std::time::SystemTime::now()
                .duration_since(std::time::UNIX_EPOCH)
                .map(|d| d.as_secs())
                .unwrap_or(0)
        });

        let snapshot = pose.snapshot();
        let saved = SavedPose {
            id: format!("pose-{}", poses.len() + 1),
            name: self.name.clone(),
            timestamp,
            joints: snapshot.joints,
            end_effector: snapshot.end_effector,
        };

        println!("saved pose {:?} as {}", saved.name, saved.id);
        poses.push(saved);
        save_store(&path, &poses)?;
        println!("wrote {} pose(s) to {}", poses.len(), self.output);
        Ok(())
    }
}
