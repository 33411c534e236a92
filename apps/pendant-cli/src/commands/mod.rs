//! Subcommand argument definitions for the pendant CLI.

pub mod config;
pub mod jog;
pub mod r#move;
pub mod position;
pub mod record;
pub mod replay;
pub mod run;
pub mod stop;

pub use config::ConfigCommand;
pub use jog::JogCommand;
pub use r#move::MoveCommand;
pub use position::PositionCommand;
pub use record::TeachCommand;
pub use replay::PlaybackCommand;
pub use run::RunCommand;
pub use stop::StopCommand;
