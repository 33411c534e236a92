//! Parsing and validation of operator-supplied command-line arguments.

use std::path::Path;

use pendant_sdk::{AxisName, JointName, JointVector};

use crate::error::{CliError, Result};

/// Parses a comma-separated list of six values (degrees/mm, kinematic
/// joint order) into a `JointVector`.
pub fn parse_joint_vector(s: &str) -> Result<JointVector> {
    let values: Vec<f64> = s
        .split(',')
        .map(|part| {
            part.trim()
                .parse::<f64>()
                .map_err(|e| CliError::InvalidJoints(format!("{part:?}: {e}")))
        })
        .collect::<Result<_>>()?;

    if values.len() != 6 {
        return Err(CliError::InvalidJoints(format!(
            "expected 6 joint values, got {}",
            values.len()
        )));
    }
    if values.iter().any(|v| !v.is_finite()) {
        return Err(CliError::InvalidJoints("NaN or infinite value".to_string()));
    }

    Ok(JointVector::from_array([
        values[0], values[1], values[2], values[3], values[4], values[5],
    ]))
}

/// Parses `x,y,z,roll,pitch,yaw` into a full Cartesian target.
pub fn parse_pose(s: &str) -> Result<pendant_sdk::EndEffectorPose> {
    let values: Vec<f64> = s
        .split(',')
        .map(|part| {
            part.trim()
                .parse::<f64>()
                .map_err(|e| CliError::InvalidPose(format!("{part:?}: {e}")))
        })
        .collect::<Result<_>>()?;

    if values.len() != 6 {
        return Err(CliError::InvalidPose(format!(
            "expected x,y,z,roll,pitch,yaw (6 values), got {}",
            values.len()
        )));
    }

    Ok(pendant_sdk::EndEffectorPose {
        x: values[0],
        y: values[1],
        z: values[2],
        roll: values[3],
        pitch: values[4],
        yaw: values[5],
    })
}

pub fn parse_joint_name(s: &str) -> Result<JointName> {
    match s.to_ascii_lowercase().replace('-', "_").as_str() {
        "base_rotation" | "base" => Ok(JointName::BaseRotation),
        "shoulder_rotation" | "shoulder" => Ok(JointName::ShoulderRotation),
        "prismatic_extension" | "prismatic" => Ok(JointName::PrismaticExtension),
        "elbow_rotation" | "elbow" => Ok(JointName::ElbowRotation),
        "elbow2_rotation" | "elbow2" => Ok(JointName::Elbow2Rotation),
        "end_effector_rotation" | "end_effector" | "wrist" => Ok(JointName::EndEffectorRotation),
        other => Err(CliError::UnknownJoint(other.to_string())),
    }
}

pub fn parse_axis_name(s: &str) -> Result<AxisName> {
    match s.to_ascii_lowercase().as_str() {
        "x" => Ok(AxisName::X),
        "y" => Ok(AxisName::Y),
        "z" => Ok(AxisName::Z),
        "roll" => Ok(AxisName::Roll),
        "pitch" => Ok(AxisName::Pitch),
        "yaw" => Ok(AxisName::Yaw),
        other => Err(CliError::UnknownAxis(other.to_string())),
    }
}

/// Confirms a script path exists and is readable before handing it to
/// `serde_json`.
pub fn validate_script_path(path: &str) -> Result<()> {
    let path = Path::new(path);
    if path.as_os_str().is_empty() {
        return Err(CliError::Io(std::io::Error::new(
            std::io::ErrorKind::InvalidInput,
            "script path is empty",
        )));
    }
    std::fs::File::open(path)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_six_joint_values() {
        let jv = parse_joint_vector("1,2,3,4,5,6").unwrap();
        assert_eq!(jv.as_array(), [1.0, 2.0, 3.0, 4.0, 5.0, 6.0]);
    }

    #[test]
    fn rejects_wrong_count() {
        assert!(parse_joint_vector("1,2,3").is_err());
    }

    #[test]
    fn rejects_non_numeric() {
        assert!(parse_joint_vector("1,2,x,4,5,6").is_err());
    }

    #[test]
    fn parses_joint_names_case_insensitively() {
        assert_eq!(parse_joint_name("Shoulder_Rotation").unwrap(), JointName::ShoulderRotation);
        assert_eq!(parse_joint_name("elbow2").unwrap(), JointName::Elbow2Rotation);
    }

    #[test]
    fn rejects_unknown_joint() {
        assert!(parse_joint_name("ankle").is_err());
    }

    #[test]
    fn parses_axis_names() {
        assert_eq!(parse_axis_name("Z").unwrap(), AxisName::Z);
        assert!(parse_axis_name("w").is_err());
    }
}
