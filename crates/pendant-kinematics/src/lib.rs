//! # Pendant Kinematics
//!
//! Pure functions over the RRPRRR kinematic chain: forward kinematics,
//! analytic inverse kinematics, and iterative differential inverse
//! kinematics.
//!
//! **Dependency principle**: only depends on `pendant-types`, to keep this
//! crate free of I/O and safe to call from any thread without
//! synchronization.
//!
//! ## Modules
//!
//! - `fk`: forward kinematics (joints → end-effector pose).
//! - `ik`: analytic inverse kinematics (pose → joints, closed-form).
//! - `dik`: differential inverse kinematics (iterative Jacobian solver).

pub mod dik;
pub mod fk;
pub mod ik;

pub use dik::inverse_differential;
pub use fk::forward;
pub use ik::inverse_analytic;
