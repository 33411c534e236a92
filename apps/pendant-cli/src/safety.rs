//! Confirmation gate for large moves, independent of the motion core's own
//! joint-limit enforcement (`pendant_sdk::PoseCore::handle_move_j` rejects
//! out-of-range targets outright; this only asks the operator to confirm
//! targets that are in-range but large).

use pendant_sdk::JointVector;

use crate::utils::prompt_confirmation;

/// Moves whose largest single-joint delta exceeds this many degrees (or mm,
/// for the prismatic joint) ask for confirmation before proceeding.
const LARGE_MOVE_THRESHOLD: f64 = 30.0;

pub fn requires_confirmation(before: &JointVector, after: &JointVector) -> bool {
    before.max_abs_delta(after) > LARGE_MOVE_THRESHOLD
}

/// Prints the move's magnitude and asks the operator to confirm. Defaults
/// to "no" since a large, unconfirmed move is the more dangerous mistake.
pub fn confirm_large_move(before: &JointVector, after: &JointVector) -> std::io::Result<bool> {
    let delta = before.max_abs_delta(after);
    println!("large move detected: max joint delta {delta:.1} (> {LARGE_MOVE_THRESHOLD})");
    prompt_confirmation("proceed?", false)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn small_move_needs_no_confirmation() {
        let before = JointVector::ZERO;
        let mut after = JointVector::ZERO;
        after.base_rotation = 5.0;
        assert!(!requires_confirmation(&before, &after));
    }

    #[test]
    fn large_move_needs_confirmation() {
        let before = JointVector::ZERO;
        let mut after = JointVector::ZERO;
        after.shoulder_rotation = 45.0;
        assert!(requires_confirmation(&before, &after));
    }
}
