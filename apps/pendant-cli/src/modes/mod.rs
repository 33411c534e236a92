//! Runtime modes: one-shot (connect, run one command, exit) and the
//! interactive shell (one connection held for the whole session).

pub mod oneshot;
pub mod repl;
