//! # Pendant CLI
//!
//! Command-line operator surface for the control pendant.
//!
//! ## Two modes
//!
//! One-shot (recommended for scripting): each invocation connects, runs one
//! command, and exits.
//!
//! ```bash
//! pendant-cli move --joints 0,0,0,0,0,0
//! pendant-cli position
//! ```
//!
//! Shell (recommended for manual operation): one connection held for the
//! whole session.
//!
//! ```bash
//! $ pendant-cli shell
//! pendant> jog start --mode joint --target shoulder --direction 1
//! pendant> jog stop
//! pendant> exit
//! ```

mod commands;
mod error;
mod modes;
mod runtime;
mod safety;
mod utils;
mod validation;

use clap::{Parser, Subcommand};

use commands::{ConfigCommand, JogCommand, MoveCommand, PlaybackCommand, PositionCommand, RunCommand, StopCommand, TeachCommand};
use error::Result;
use modes::oneshot::OneShotMode;
use modes::repl::run_repl;

#[derive(Parser, Debug)]
#[command(name = "pendant-cli")]
#[command(about = "Command-line operator surface for the control pendant", long_about = None)]
#[command(version)]
struct Cli {
    /// Path to a TOML config file (defaults to config/pendant.toml, falling
    /// back to the built-in scenario_v2 configuration).
    #[arg(short, long, global = true)]
    config: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Inspect the resolved configuration.
    #[command(subcommand)]
    Config(ConfigCommand),

    /// One-shot move (MoveJ or MoveL).
    Move(MoveCommand),

    /// Print the live joint vector and end-effector pose.
    Position(PositionCommand),

    /// Emergency stop.
    Stop(StopCommand),

    /// Start/stop/increment a jog.
    #[command(subcommand)]
    Jog(JogCommand),

    /// Return to the configured home pose.
    Home,

    /// Save the current live pose under a name.
    Teach(TeachCommand),

    /// Move through a set of saved poses in order.
    Playback(PlaybackCommand),

    /// Execute a saved program.
    Run(RunCommand),

    /// Launch the interactive shell.
    Shell,
}

fn main() -> Result<()> {
    pendant_sdk::logging::init();

    let cli = Cli::parse();
    let config_file = cli.config.as_deref();

    match cli.command {
        Commands::Config(cmd) => cmd.execute(),

        Commands::Move(args) => {
            let mode = OneShotMode::new(config_file)?;
            mode.move_to(&args)
        }

        Commands::Position(args) => {
            let mode = OneShotMode::new(config_file)?;
            mode.get_position(&args)
        }

        Commands::Stop(args) => {
            let mode = OneShotMode::new(config_file)?;
            mode.stop(&args)
        }

        Commands::Jog(args) => {
            let mode = OneShotMode::new(config_file)?;
            mode.jog(&args)
        }

        Commands::Home => {
            let mode = OneShotMode::new(config_file)?;
            mode.home()
        }

        Commands::Teach(args) => {
            let mode = OneShotMode::new(config_file)?;
            mode.teach(&args)
        }

        Commands::Playback(args) => {
            let mode = OneShotMode::new(config_file)?;
            mode.playback(&args)
        }

        Commands::Run(args) => {
            let mode = OneShotMode::new(config_file)?;
            mode.run_program(&args)
        }

        Commands::Shell => run_repl(config_file),
    }
}
