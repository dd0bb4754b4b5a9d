//! Turning two captured poses into a custom pattern.
//!
//! Calibration is user driven: hold the rest pose, capture, hold the
//! active pose, capture again. Each capture is a plain read of the
//! instantaneous angles, gated on every required joint being visible with
//! enough confidence. The two snapshots must differ noticeably in at
//! least one limb, otherwise the pattern built from them could never
//! fire.

use pose::{BodyAngles, PoseObservation};

use crate::{Error, ExercisePattern, PatternAngles};

/// Joints seen at or below this confidence are not trusted for a capture.
pub const MIN_CAPTURE_CONFIDENCE: f64 = 0.5;
/// Two captures must differ by at least this much, in degrees, in at
/// least one channel.
pub const SIMILARITY_THRESHOLD: f64 = 10.0;

#[derive(Debug, Clone)]
pub struct CalibrationOptions {
    /// Per-joint confidence a frame must exceed before it may be captured
    pub min_confidence: f64,
    /// Minimum degrees between the two captures in at least one channel
    pub similarity_threshold: f64,
}

impl CalibrationOptions {
    pub const fn new() -> Self {
        Self {
            min_confidence: MIN_CAPTURE_CONFIDENCE,
            similarity_threshold: SIMILARITY_THRESHOLD,
        }
    }

    pub const fn set_min_confidence(mut self, min_confidence: f64) -> Self {
        self.min_confidence = min_confidence;
        self
    }

    pub const fn set_similarity_threshold(mut self, similarity_threshold: f64) -> Self {
        self.similarity_threshold = similarity_threshold;
        self
    }
}

impl Default for CalibrationOptions {
    fn default() -> Self {
        Self::new()
    }
}

/// Whether a capture on this frame would succeed; the predicate a UI
/// binds its capture button to.
pub fn ready_for_capture(observation: &PoseObservation, opt: &CalibrationOptions) -> bool {
    observation.is_complete(opt.min_confidence)
}

/// Read the instantaneous angles of one frame.
///
/// Refused unless every required joint is present with confidence above
/// [`min_confidence`](CalibrationOptions::min_confidence). A refused
/// capture is recoverable; the user tries again on a better frame.
pub fn capture_snapshot(
    observation: &PoseObservation,
    opt: &CalibrationOptions,
) -> Result<BodyAngles, Error> {
    if !observation.is_complete(opt.min_confidence) {
        log::debug!("capture refused, pose incomplete");
        return Err(Error::PoseIncomplete);
    }

    BodyAngles::from_observation(observation).ok_or(Error::PoseIncomplete)
}

/// Combine two captured snapshots into a new user pattern.
///
/// Refused when start and end lie within
/// [`similarity_threshold`](CalibrationOptions::similarity_threshold) of
/// each other in all four channels at once; a single channel at or above
/// the threshold already tells the poses apart. The built pattern
/// constrains every channel in both states and carries no system flag.
pub fn build_pattern(
    name: impl Into<String>,
    start: &BodyAngles,
    end: &BodyAngles,
    opt: &CalibrationOptions,
) -> Result<ExercisePattern, Error> {
    if poses_similar(start, end, opt.similarity_threshold) {
        return Err(Error::PosesTooSimilar);
    }

    ExercisePattern::custom(name, PatternAngles::from(*start), PatternAngles::from(*end))
}

fn poses_similar(start: &BodyAngles, end: &BodyAngles, threshold: f64) -> bool {
    (start.left_arm - end.left_arm).abs() < threshold
        && (start.right_arm - end.right_arm).abs() < threshold
        && (start.left_leg - end.left_leg).abs() < threshold
        && (start.right_leg - end.right_leg).abs() < threshold
}

#[cfg(test)]
mod tests {
    use super::*;

    use crate::Session;
    use pose::{Joint, JointPosition};

    fn observation(arms: f64, legs: f64, confidence: f64) -> PoseObservation {
        let limbs = [
            (
                Joint::LeftElbow,
                Joint::LeftShoulder,
                Joint::LeftWrist,
                (0.3, 0.3),
                arms,
            ),
            (
                Joint::RightElbow,
                Joint::RightShoulder,
                Joint::RightWrist,
                (0.7, 0.3),
                arms,
            ),
            (
                Joint::LeftKnee,
                Joint::LeftHip,
                Joint::LeftAnkle,
                (0.3, 0.7),
                legs,
            ),
            (
                Joint::RightKnee,
                Joint::RightHip,
                Joint::RightAnkle,
                (0.7, 0.7),
                legs,
            ),
        ];

        let mut observation = PoseObservation::new();
        for (vertex, first, second, (x, y), degrees) in limbs {
            let spread = degrees.to_radians();
            observation.insert(vertex, JointPosition::new(x, y, confidence));
            observation.insert(first, JointPosition::new(x, y - 0.1, confidence));
            observation.insert(
                second,
                JointPosition::new(x + 0.1 * spread.sin(), y - 0.1 * spread.cos(), confidence),
            );
        }

        observation
    }

    fn body(left_arm: f64, right_arm: f64, left_leg: f64, right_leg: f64) -> BodyAngles {
        BodyAngles {
            left_arm,
            right_arm,
            left_leg,
            right_leg,
        }
    }

    #[test]
    fn capture_reads_the_instantaneous_angles() {
        let opt = CalibrationOptions::new();

        let captured = capture_snapshot(&observation(90.0, 170.0, 0.9), &opt).unwrap();

        assert!((captured.left_arm - 90.0).abs() < 1e-6);
        assert!((captured.right_arm - 90.0).abs() < 1e-6);
        assert!((captured.left_leg - 170.0).abs() < 1e-6);
        assert!((captured.right_leg - 170.0).abs() < 1e-6);
    }

    #[test]
    fn capture_refused_below_the_confidence_threshold() {
        let opt = CalibrationOptions::new();
        let blurry = observation(90.0, 170.0, 0.4);

        assert!(!ready_for_capture(&blurry, &opt));
        assert_eq!(capture_snapshot(&blurry, &opt), Err(Error::PoseIncomplete));
    }

    #[test]
    fn capture_refused_at_exactly_the_confidence_threshold() {
        let opt = CalibrationOptions::new();
        let borderline = observation(90.0, 170.0, 0.5);

        assert!(!ready_for_capture(&borderline, &opt));
        assert_eq!(
            capture_snapshot(&borderline, &opt),
            Err(Error::PoseIncomplete)
        );

        let clear = observation(90.0, 170.0, 0.51);
        assert!(ready_for_capture(&clear, &opt));
        assert!(capture_snapshot(&clear, &opt).is_ok());
    }

    #[test]
    fn capture_refused_when_a_joint_is_missing() {
        let opt = CalibrationOptions::new();
        let incomplete: PoseObservation = Joint::REQUIRED
            .into_iter()
            .filter(|joint| *joint != Joint::LeftWrist)
            .map(|joint| (joint, JointPosition::new(0.5, 0.5, 0.9)))
            .collect();

        assert!(!ready_for_capture(&incomplete, &opt));
        assert_eq!(
            capture_snapshot(&incomplete, &opt),
            Err(Error::PoseIncomplete)
        );
    }

    #[test]
    fn near_identical_poses_are_rejected() {
        let opt = CalibrationOptions::new();
        let start = body(90.0, 90.0, 90.0, 90.0);
        let end = body(92.0, 91.0, 89.0, 93.0);

        assert_eq!(
            build_pattern("Wiggle", &start, &end, &opt),
            Err(Error::PosesTooSimilar)
        );
    }

    #[test]
    fn one_channel_at_the_threshold_is_distinct() {
        let opt = CalibrationOptions::new();
        let start = body(90.0, 90.0, 90.0, 90.0);
        // left arm delta is exactly the threshold, the rest stays close
        let end = body(100.0, 90.0, 89.0, 93.0);

        let pattern = build_pattern("Curl", &start, &end, &opt).unwrap();

        assert_eq!(pattern.name(), "Curl");
        assert!(!pattern.is_system());
    }

    #[test]
    fn built_pattern_constrains_every_channel() {
        let opt = CalibrationOptions::new();
        let start = body(160.0, 160.0, 170.0, 170.0);
        let end = body(90.0, 90.0, 170.0, 170.0);

        let pattern = build_pattern("Press", &start, &end, &opt).unwrap();

        assert_eq!(pattern.start_state().left_arm, Some(160.0));
        assert_eq!(pattern.start_state().right_leg, Some(170.0));
        assert_eq!(pattern.end_state().left_arm, Some(90.0));
        assert_eq!(pattern.end_state().right_leg, Some(170.0));
    }

    #[test]
    fn custom_similarity_threshold_is_respected() {
        let opt = CalibrationOptions::new().set_similarity_threshold(3.0);
        let start = body(90.0, 90.0, 90.0, 90.0);
        let end = body(93.0, 90.0, 90.0, 90.0);

        assert!(build_pattern("Shrug", &start, &end, &opt).is_ok());
    }

    #[test]
    fn calibrated_pattern_counts_repetitions() {
        let opt = CalibrationOptions::new();
        let start = capture_snapshot(&observation(160.0, 170.0, 0.9), &opt).unwrap();
        let end = capture_snapshot(&observation(60.0, 90.0, 0.9), &opt).unwrap();
        let pattern = build_pattern("Burpee", &start, &end, &opt).unwrap();

        let mut session = Session::new(pattern);
        session.observe(&observation(160.0, 170.0, 0.9));
        session.observe(&observation(60.0, 90.0, 0.9));
        session.observe(&observation(160.0, 170.0, 0.9));

        assert_eq!(session.count(), 1);
    }
}
