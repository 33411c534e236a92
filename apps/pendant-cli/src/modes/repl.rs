//! Interactive shell: one connection held for the whole session, commands
//! read from stdin line by line. Ctrl+C triggers an emergency stop instead
//! of killing the process.

use std::io::{self, Write};
use std::sync::Arc;

use clap::Parser;
use pendant_sdk::{Connected, MotorLink, PoseCore, ProgramEngine};

use crate::commands::config::load_config;
use crate::commands::{JogCommand, MoveCommand, PlaybackCommand, PositionCommand, RunCommand, StopCommand, TeachCommand};
use crate::error::Result;
use crate::runtime;

#[derive(Parser, Debug)]
#[command(name = "", no_binary_name = true)]
enum ReplLine {
    Move(MoveCommand),
    Position(PositionCommand),
    Stop(StopCommand),
    #[command(subcommand)]
    Jog(JogCommand),
    Home,
    Teach(TeachCommand),
    Playback(PlaybackCommand),
    Run(RunCommand),
    Exit,
    Quit,
}

pub fn run_repl(config_file: Option<&str>) -> Result<()> {
    let config = load_config(config_file)?;
    let (pose, link): (PoseCore<Connected>, Arc<MotorLink>) = runtime::connect(config)?;
    let engine = ProgramEngine::new(pose.clone(), link.clone());

    let estop_pose = pose.clone();
    ctrlc::set_handler(move || {
        eprintln!("\nCtrl+C: issuing emergency stop");
        estop_pose.handle_emergency_stop();
    })
    .expect("failed to install Ctrl+C handler");

    println!("pendant shell — type `exit` or press Ctrl+D to leave");
    let stdin = io::stdin();
    loop {
        print!("pendant> ");
        io::stdout().flush().ok();

        let mut line = String::new();
        let bytes_read = stdin.read_line(&mut line)?;
        if bytes_read == 0 {
            println!();
            break;
        }
        let tokens: Vec<&str> = line.split_whitespace().collect();
        if tokens.is_empty() {
            continue;
        }

        match ReplLine::try_parse_from(&tokens) {
            Ok(ReplLine::Exit) | Ok(ReplLine::Quit) => break,
            Ok(ReplLine::Move(args)) => report(args.execute(&pose)),
            Ok(ReplLine::Position(args)) => report(args.execute(&pose)),
            Ok(ReplLine::Stop(args)) => report(args.execute(&pose)),
            Ok(ReplLine::Jog(args)) => report(args.execute(&pose)),
            Ok(ReplLine::Home) => report(pose.handle_home().map(|()| {
                println!("home ok: {:?}", pose.snapshot().joints);
            }).map_err(Into::into)),
            Ok(ReplLine::Teach(args)) => report(args.execute(&pose)),
            Ok(ReplLine::Playback(args)) => report(args.execute(&pose)),
            Ok(ReplLine::Run(args)) => report(args.execute(&pose, &engine)),
            Err(e) => println!("{e}"),
        }
    }

    println!("bye");
    Ok(())
}

fn report(result: Result<()>) {
    if let Err(e) = result {
        println!("error: {e}");
    }
}
