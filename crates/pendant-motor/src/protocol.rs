//! Wire shapes for the line-delimited JSON protocol to the motor controller.
//!
//! Grounded on `original_source/pendant/arduino_communication.py`'s
//! `send_joint_command`/`send_jog_command`/`send_home_command`/
//! `send_emergency_stop` request shapes and `process_response`'s status
//! dispatch, per `spec.md` §4.2.

use pendant_types::joint::JointVector;
use serde::Serialize;
use serde_json::Value;

/// A request frame sent to the motor controller, one JSON object per line.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "cmd")]
pub enum Request {
    #[serde(rename = "setJointPositions")]
    SetJointPositions { positions: JointPositions },
    #[serde(rename = "moveJoint")]
    MoveJoint { joint: String, increment: f64 },
    #[serde(rename = "estop")]
    Estop,
    #[serde(rename = "home")]
    Home,
}

impl Request {
    pub fn set_joint_positions(joints: &JointVector) -> Self {
        Request::SetJointPositions {
            positions: JointPositions::from(joints),
        }
    }

    /// Serialize as one line, `\n`-terminated, as the wire framing requires.
    pub fn to_line(&self) -> serde_json::Result<String> {
        let mut line = serde_json::to_string(self)?;
        line.push('\n');
        Ok(line)
    }
}

/// The `j1..j6` wire names for a full joint-position request.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct JointPositions {
    pub j1: f64,
    pub j2: f64,
    pub j3: f64,
    pub j4: f64,
    pub j5: f64,
    pub j6: f64,
}

impl From<&JointVector> for JointPositions {
    fn from(joints: &JointVector) -> Self {
        JointPositions {
            j1: joints.base_rotation,
            j2: joints.shoulder_rotation,
            j3: joints.prismatic_extension,
            j4: joints.elbow_rotation,
            j5: joints.elbow2_rotation,
            j6: joints.end_effector_rotation,
        }
    }
}

/// A response line from the motor controller. Parsed leniently by `status`
/// so an unexpected value becomes `Unrecognized` rather than a parse error
/// (`spec.md` §4.2: `send_command` returns `ok`/`error`/`unrecognized`).
#[derive(Debug, Clone, PartialEq)]
pub enum Response {
    Ok,
    Error { message: String },
    MoveDone,
    HomeDone,
    Unrecognized { status: String },
}

impl Response {
    /// Parse one response line. Fails only if the line is not valid JSON;
    /// an unrecognized `status` value is not an error (`Unrecognized`).
    pub fn parse_line(line: &str) -> serde_json::Result<Response> {
        let value: Value = serde_json::from_str(line)?;
        let status = value.get("status").and_then(Value::as_str).unwrap_or("");
        Ok(match status {
            "ok" => Response::Ok,
            "error" => Response::Error {
                message: value
                    .get("message")
                    .and_then(Value::as_str)
                    .unwrap_or("")
                    .to_string(),
            },
            "move_done" => Response::MoveDone,
            "home_done" => Response::HomeDone,
            other => Response::Unrecognized {
                status: other.to_string(),
            },
        })
    }
}
