use pose::BodyAngles;

use crate::Error;

const SQUAT_NAME: &str = "Squat";
const SQUAT_START_LEGS: f64 = 170.0;
const SQUAT_END_LEGS: f64 = 100.0;

const PUSH_UP_NAME: &str = "Push-up";
const PUSH_UP_START_ARMS: f64 = 160.0;
const PUSH_UP_END_ARMS: f64 = 90.0;

/// Angle targets for one end of a movement, in degrees.
///
/// Every channel is optional: a squat constrains only the legs, a push-up
/// only the arms. An absent channel matches any pose.
#[derive(Debug, Clone, Copy, Default, PartialEq, PartialOrd)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PatternAngles {
    pub left_arm: Option<f64>,
    pub right_arm: Option<f64>,
    pub left_leg: Option<f64>,
    pub right_leg: Option<f64>,
}

impl PatternAngles {
    /// No channel constrained; matches everything.
    pub const fn unconstrained() -> Self {
        Self {
            left_arm: None,
            right_arm: None,
            left_leg: None,
            right_leg: None,
        }
    }

    /// Both arm channels at `degrees`, legs free.
    pub const fn arms(degrees: f64) -> Self {
        Self {
            left_arm: Some(degrees),
            right_arm: Some(degrees),
            left_leg: None,
            right_leg: None,
        }
    }

    /// Both leg channels at `degrees`, arms free.
    pub const fn legs(degrees: f64) -> Self {
        Self {
            left_arm: None,
            right_arm: None,
            left_leg: Some(degrees),
            right_leg: Some(degrees),
        }
    }

    pub const fn is_unconstrained(&self) -> bool {
        self.left_arm.is_none()
            && self.right_arm.is_none()
            && self.left_leg.is_none()
            && self.right_leg.is_none()
    }
}

impl From<BodyAngles> for PatternAngles {
    /// Constrain every channel to the measured angles of one frame.
    fn from(angles: BodyAngles) -> Self {
        Self {
            left_arm: Some(angles.left_arm),
            right_arm: Some(angles.right_arm),
            left_leg: Some(angles.left_leg),
            right_leg: Some(angles.right_leg),
        }
    }
}

/// A named movement: angle targets for its two endpoints.
///
/// `start_state` is the extended or rest half, `end_state` the contracted
/// one. Patterns never change once built; recalibrating produces a new
/// pattern. The serialized form is exactly the name, the system flag and
/// the two target sets, and deserializing re-runs the construction check.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(into = "PatternRecord", try_from = "PatternRecord")
)]
pub struct ExercisePattern {
    name: String,
    is_system: bool,
    start_state: PatternAngles,
    end_state: PatternAngles,
}

impl ExercisePattern {
    /// Build a user-created pattern.
    ///
    /// A pattern with no constrained channel in either state would match
    /// every frame as its end and none as its start, so it is rejected
    /// here rather than accepted as one that can never count.
    pub fn custom(
        name: impl Into<String>,
        start_state: PatternAngles,
        end_state: PatternAngles,
    ) -> Result<Self, Error> {
        Self::validated(name.into(), false, start_state, end_state)
    }

    /// Stock squat: legs straight when standing, folded to 100 degrees at
    /// the bottom. Arms are free.
    pub fn squat() -> Self {
        Self {
            name: SQUAT_NAME.to_owned(),
            is_system: true,
            start_state: PatternAngles::legs(SQUAT_START_LEGS),
            end_state: PatternAngles::legs(SQUAT_END_LEGS),
        }
    }

    /// Stock push-up: arms near straight at the top, bent to 90 degrees at
    /// the bottom. Legs are free.
    pub fn push_up() -> Self {
        Self {
            name: PUSH_UP_NAME.to_owned(),
            is_system: true,
            start_state: PatternAngles::arms(PUSH_UP_START_ARMS),
            end_state: PatternAngles::arms(PUSH_UP_END_ARMS),
        }
    }

    fn validated(
        name: String,
        is_system: bool,
        start_state: PatternAngles,
        end_state: PatternAngles,
    ) -> Result<Self, Error> {
        if start_state.is_unconstrained() && end_state.is_unconstrained() {
            return Err(Error::UnconstrainedPattern);
        }

        Ok(Self {
            name,
            is_system,
            start_state,
            end_state,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Whether this is one of the stock patterns rather than a calibrated
    /// one. Stores seed stock patterns once and never delete them.
    pub const fn is_system(&self) -> bool {
        self.is_system
    }

    /// Targets of the extended / rest half of the movement.
    pub const fn start_state(&self) -> PatternAngles {
        self.start_state
    }

    /// Targets of the contracted / active half of the movement.
    pub const fn end_state(&self) -> PatternAngles {
        self.end_state
    }
}

/// Serialized shape of a pattern, what a store actually persists.
#[cfg(feature = "serde")]
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
struct PatternRecord {
    name: String,
    is_system: bool,
    start_state: PatternAngles,
    end_state: PatternAngles,
}

#[cfg(feature = "serde")]
impl From<ExercisePattern> for PatternRecord {
    fn from(pattern: ExercisePattern) -> Self {
        Self {
            name: pattern.name,
            is_system: pattern.is_system,
            start_state: pattern.start_state,
            end_state: pattern.end_state,
        }
    }
}

#[cfg(feature = "serde")]
impl TryFrom<PatternRecord> for ExercisePattern {
    type Error = Error;

    fn try_from(record: PatternRecord) -> Result<Self, Self::Error> {
        Self::validated(
            record.name,
            record.is_system,
            record.start_state,
            record.end_state,
        )
    }
}
