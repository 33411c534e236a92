//! Configuration inspection: the pendant's physical parameters are
//! immutable and read once at startup, so this command is
//! read-only — it loads and prints a `PendantConfig`, it never mutates one.

use std::path::{Path, PathBuf};

use clap::Subcommand;
use pendant_sdk::PendantConfig;

use crate::error::{CliError, Result};

/// Default location for the TOML configuration file, relative to the
/// current working directory.
pub const DEFAULT_CONFIG_PATH: &str = "config/pendant.toml";

/// Load a `PendantConfig` from `path`, or from `DEFAULT_CONFIG_PATH` if
/// `path` is `None`. Falls back to the built-in `scenario_v2` test
/// configuration when no file exists at the resolved path, so the CLI
/// works out of the box in simulation mode without any setup.
pub fn load_config(path: Option<&str>) -> Result<PendantConfig> {
    let resolved: PathBuf = path.map(PathBuf::from).unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_PATH));

    if !resolved.exists() {
        if path.is_some() {
            return Err(CliError::Io(std::io::Error::new(
                std::io::ErrorKind::NotFound,
                format!("config file not found: {}", resolved.display()),
            )));
        }
        tracing::info!(
            path = %resolved.display(),
            "no config file found, falling back to the built-in scenario_v2 configuration"
        );
        return Ok(PendantConfig::scenario_v2());
    }

    let text = std::fs::read_to_string(&resolved)?;
    Ok(PendantConfig::from_toml_str(&text)?)
}

#[derive(Subcommand, Debug)]
pub enum ConfigCommand {
    /// Print the resolved configuration as TOML.
    Show {
        /// Path to a TOML config file (defaults to `config/pendant.toml`).
        #[arg(short, long)]
        file: Option<String>,
    },

    /// Load the configuration and print a human-readable summary.
    Check {
        #[arg(short, long)]
        file: Option<String>,
    },
}

impl ConfigCommand {
    pub fn execute(self) -> Result<()> {
        match self {
            ConfigCommand::Show { file } => Self::show(file.as_deref()),
            ConfigCommand::Check { file } => Self::check(file.as_deref()),
        }
    }

    fn show(file: Option<&str>) -> Result<()> {
        let config = load_config(file)?;
        let toml = toml::to_string_pretty(&config).map_err(|e| CliError::InvalidPose(e.to_string()))?;
        print!("{toml}");
        Ok(())
    }

    fn check(file: Option<&str>) -> Result<()> {
        let path = file.unwrap_or(DEFAULT_CONFIG_PATH);
        let config = load_config(file)?;

        println!("config: {}", if Path::new(path).exists() { path } else { "(built-in scenario_v2)" });
        println!("simulation_mode: {}", config.simulation_mode);
        println!("update_interval: {}s", config.update_interval);
        println!(
            "home_pose: base={} shoulder={} d3={} elbow={} elbow2={} ee={}",
            config.home_pose.base_rotation,
            config.home_pose.shoulder_rotation,
            config.home_pose.prismatic_extension,
            config.home_pose.elbow_rotation,
            config.home_pose.elbow2_rotation,
            config.home_pose.end_effector_rotation,
        );
        println!(
            "dimensions: base_height={} link1={} link2=[{},{}] link3={} link4={} ee_length={}",
            config.dimensions.base_height,
            config.dimensions.link1,
            config.dimensions.link2_min,
            config.dimensions.link2_max,
            config.dimensions.link3,
            config.dimensions.link4,
            config.dimensions.ee_length,
        );
        println!("serial: {}@{} baud", config.serial.port, config.serial.baud_rate);
        Ok(())
    }
}
