use std::collections::BTreeMap;

use crate::angle_at;

/// Named body landmarks a pose source can report.
///
/// The set follows the common 17-landmark convention; only the limb joints
/// in [`Joint::REQUIRED`] take part in angle computation, the rest may ride
/// along in an observation untouched.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "snake_case")
)]
pub enum Joint {
    Nose,
    LeftEye,
    RightEye,
    LeftEar,
    RightEar,
    LeftShoulder,
    RightShoulder,
    LeftElbow,
    RightElbow,
    LeftWrist,
    RightWrist,
    LeftHip,
    RightHip,
    LeftKnee,
    RightKnee,
    LeftAnkle,
    RightAnkle,
}

impl Joint {
    /// The twelve joints that must be present before a frame yields angles:
    /// shoulder, elbow and wrist of both arms; hip, knee and ankle of both
    /// legs.
    pub const REQUIRED: [Joint; 12] = [
        Joint::LeftShoulder,
        Joint::LeftElbow,
        Joint::LeftWrist,
        Joint::RightShoulder,
        Joint::RightElbow,
        Joint::RightWrist,
        Joint::LeftHip,
        Joint::LeftKnee,
        Joint::LeftAnkle,
        Joint::RightHip,
        Joint::RightKnee,
        Joint::RightAnkle,
    ];
}

/// A landmark position in normalized image space.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct JointPosition {
    /// Horizontal position in `0..=1`
    pub x: f64,
    /// Vertical position in `0..=1`; image convention, grows downward
    pub y: f64,
    /// Detection confidence in `0..=1`
    pub confidence: f64,
}

impl JointPosition {
    pub const fn new(x: f64, y: f64, confidence: f64) -> Self {
        Self { x, y, confidence }
    }
}

/// One frame of pose input: whichever joints the source recognized.
///
/// Observations are ephemeral; they arrive one at a time, in arrival order,
/// and are never persisted.
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PoseObservation {
    joints: BTreeMap<Joint, JointPosition>,
}

impl PoseObservation {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a joint for this frame, replacing any earlier position.
    pub fn insert(&mut self, joint: Joint, position: JointPosition) {
        self.joints.insert(joint, position);
    }

    pub fn position(&self, joint: Joint) -> Option<JointPosition> {
        self.joints.get(&joint).copied()
    }

    /// Whether every joint in [`Joint::REQUIRED`] was recognized, at any
    /// confidence.
    pub fn has_required_joints(&self) -> bool {
        Joint::REQUIRED
            .iter()
            .all(|joint| self.joints.contains_key(joint))
    }

    /// Whether every required joint was recognized with confidence strictly
    /// above `min_confidence`. This is the gate a capture action checks
    /// before trusting the frame.
    pub fn is_complete(&self, min_confidence: f64) -> bool {
        Joint::REQUIRED.iter().all(|joint| {
            self.joints
                .get(joint)
                .is_some_and(|position| position.confidence > min_confidence)
        })
    }
}

impl FromIterator<(Joint, JointPosition)> for PoseObservation {
    fn from_iter<I: IntoIterator<Item = (Joint, JointPosition)>>(iter: I) -> Self {
        Self {
            joints: iter.into_iter().collect(),
        }
    }
}

/// The four measured limb angles of one frame, in degrees.
///
/// All four values are always present; a frame that cannot produce all of
/// them produces none at all.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BodyAngles {
    /// Angle at the left elbow between shoulder and wrist
    pub left_arm: f64,
    /// Angle at the right elbow between shoulder and wrist
    pub right_arm: f64,
    /// Angle at the left knee between hip and ankle
    pub left_leg: f64,
    /// Angle at the right knee between hip and ankle
    pub right_leg: f64,
}

impl BodyAngles {
    /// Measure all four limb angles of a frame.
    ///
    /// Returns `None` when any required joint is missing; such frames carry
    /// no usable angles and are skipped by every consumer.
    pub fn from_observation(observation: &PoseObservation) -> Option<Self> {
        Some(Self {
            left_arm: angle_of(
                observation,
                Joint::LeftElbow,
                Joint::LeftShoulder,
                Joint::LeftWrist,
            )?,
            right_arm: angle_of(
                observation,
                Joint::RightElbow,
                Joint::RightShoulder,
                Joint::RightWrist,
            )?,
            left_leg: angle_of(
                observation,
                Joint::LeftKnee,
                Joint::LeftHip,
                Joint::LeftAnkle,
            )?,
            right_leg: angle_of(
                observation,
                Joint::RightKnee,
                Joint::RightHip,
                Joint::RightAnkle,
            )?,
        })
    }
}

fn angle_of(
    observation: &PoseObservation,
    vertex: Joint,
    a: Joint,
    b: Joint,
) -> Option<f64> {
    Some(angle_at(
        observation.position(vertex)?,
        observation.position(a)?,
        observation.position(b)?,
    ))
}
