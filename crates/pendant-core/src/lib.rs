//! # Pendant Core
//!
//! The Pose State and Motion Controller: the single authoritative record of
//! the arm's joints and end-effector pose, the jog loop, the discrete move
//! handlers, and the Broadcast Bus that fans events out to observers
//! (`spec.md` §4.3, §4.5).
//!
//! Grounded on `piper-driver`'s IO-thread-plus-shared-state shape: a
//! type-stated connection handle (`PoseCore<Disconnected>`/
//! `PoseCore<Connected>`, after `piper-client::state::machine`'s
//! `Disconnected`/`Standby`/`Active<Mode>`), a dedicated background thread
//! gated by an idempotent atomic flag (after `AtomicDriverMode`'s IO-thread
//! start/stop), and a callback-registry-turned-channel broadcast (after
//! `hooks::HookManager`).

pub mod broadcast;
pub mod controller;
pub mod pose;

pub use broadcast::BroadcastBus;
pub use controller::{Connected, Disconnected, PartialPose, PoseCore};
pub use pose::PoseState;
