//! Hysteresis detection of one repetition.
//!
//! A repetition is the round trip start pose -> end pose -> start pose.
//! The detector watches the stream of measured angles and keeps one bit of
//! state, the phase:
//!
//! ```notrust
//! NotAtEnd --end pose--> AtEnd --start pose--> NotAtEnd, one repetition
//! ```
//!
//! Matching is tolerance based. The end test requires every constrained
//! channel at or below its target plus tolerance, the start test at or
//! above its target minus tolerance; channels the pattern leaves out
//! always pass. A frame matching neither test leaves the phase as it is,
//! so a noisy frame in the middle of a motion is discarded, not treated as
//! a return to start.

use pose::BodyAngles;

use crate::{ExercisePattern, PatternAngles};

/// Degrees of slack around every pattern target.
pub const TOLERANCE_DEGREES: f64 = 5.0;

/// Which half of the movement the body was last seen in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Phase {
    /// Initial state; the end pose has not been reached since the last
    /// counted repetition.
    #[default]
    NotAtEnd,
    /// The end pose was reached; the next start pose completes the
    /// repetition.
    AtEnd,
}

/// Recognizes completed repetitions of one [`ExercisePattern`].
///
/// The detector only reports the event; whoever owns the session keeps
/// the count. One instance serves one exercise at a time and expects its
/// frames one by one, in arrival order.
#[derive(Debug, Clone)]
pub struct RepDetector {
    pattern: ExercisePattern,
    tolerance: f64,
    phase: Phase,
}

impl RepDetector {
    pub fn new(pattern: ExercisePattern) -> Self {
        Self::with_tolerance(pattern, TOLERANCE_DEGREES)
    }

    pub fn with_tolerance(pattern: ExercisePattern, tolerance: f64) -> Self {
        Self {
            pattern,
            tolerance,
            phase: Phase::NotAtEnd,
        }
    }

    /// Feed the angles of one frame.
    ///
    /// Returns `true` exactly when the frame completes a repetition: it
    /// matches the start pose and the end pose has been seen since the
    /// last count. A frame matching the end pose only arms the detector
    /// and never counts by itself, no matter how often it repeats.
    pub fn observe(&mut self, current: &BodyAngles) -> bool {
        if at_end_state(current, self.pattern.end_state(), self.tolerance) {
            self.phase = Phase::AtEnd;
            return false;
        }

        if at_start_state(current, self.pattern.start_state(), self.tolerance)
            && self.phase == Phase::AtEnd
        {
            self.phase = Phase::NotAtEnd;
            return true;
        }

        false
    }

    /// Switch to another movement. The phase restarts so an armed end
    /// state cannot leak into the new pattern; any count kept by the
    /// caller is theirs to keep.
    pub fn change_pattern(&mut self, pattern: ExercisePattern) {
        self.pattern = pattern;
        self.phase = Phase::NotAtEnd;
    }

    /// Back to the initial phase, as if no frame had been seen.
    pub fn reset(&mut self) {
        self.phase = Phase::NotAtEnd;
    }

    pub const fn phase(&self) -> Phase {
        self.phase
    }

    pub const fn pattern(&self) -> &ExercisePattern {
        &self.pattern
    }

    pub const fn tolerance(&self) -> f64 {
        self.tolerance
    }
}

fn at_end_state(current: &BodyAngles, end: PatternAngles, tolerance: f64) -> bool {
    below_target(current.left_arm, end.left_arm, tolerance)
        && below_target(current.right_arm, end.right_arm, tolerance)
        && below_target(current.left_leg, end.left_leg, tolerance)
        && below_target(current.right_leg, end.right_leg, tolerance)
}

fn at_start_state(current: &BodyAngles, start: PatternAngles, tolerance: f64) -> bool {
    above_target(current.left_arm, start.left_arm, tolerance)
        && above_target(current.right_arm, start.right_arm, tolerance)
        && above_target(current.left_leg, start.left_leg, tolerance)
        && above_target(current.right_leg, start.right_leg, tolerance)
}

// An absent target is an unconstrained channel and passes; both
// boundaries are inclusive.
fn below_target(current: f64, target: Option<f64>, tolerance: f64) -> bool {
    match target {
        Some(target) => current <= target + tolerance,
        None => true,
    }
}

fn above_target(current: f64, target: Option<f64>, tolerance: f64) -> bool {
    match target {
        Some(target) => current >= target - tolerance,
        None => true,
    }
}
