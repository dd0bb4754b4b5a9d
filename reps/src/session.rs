use pose::{BodyAngles, PoseObservation};

use crate::{ExercisePattern, RepDetector};

/// One in-progress exercise: a detector plus the repetition count it has
/// produced so far.
///
/// The session is the single owner of the count; the detector underneath
/// only reports events. Pausing, restarting and pattern switches are
/// decided here. One session per exercise, fed one frame at a time in
/// arrival order; nothing inside locks, so the caller serializes calls
/// onto a single logical owner.
#[derive(Debug, Clone)]
pub struct Session {
    detector: RepDetector,
    count: u32,
    paused: bool,
}

impl Session {
    pub fn new(pattern: ExercisePattern) -> Self {
        Self::with_detector(RepDetector::new(pattern))
    }

    /// Wrap a preconfigured detector, e.g. one with a custom tolerance.
    pub fn with_detector(detector: RepDetector) -> Self {
        log::info!(
            "counting session started, pattern: {}",
            detector.pattern().name()
        );

        Self {
            detector,
            count: 0,
            paused: false,
        }
    }

    /// Feed one pose frame.
    ///
    /// A paused session drops the frame before anything is computed.
    /// Frames missing a required joint are skipped silently and leave
    /// every bit of state untouched. Returns `true` when the frame
    /// completed a repetition.
    pub fn observe(&mut self, observation: &PoseObservation) -> bool {
        if self.paused {
            return false;
        }

        match BodyAngles::from_observation(observation) {
            Some(angles) => self.observe_angles(&angles),
            None => {
                log::debug!("frame skipped, required joints missing");
                false
            }
        }
    }

    /// Feed a frame whose angles were already measured.
    pub fn observe_angles(&mut self, angles: &BodyAngles) -> bool {
        if self.paused {
            return false;
        }

        let completed = self.detector.observe(angles);
        if completed {
            self.count += 1;
            log::debug!(
                "repetition {} of {}",
                self.count,
                self.detector.pattern().name()
            );
        }

        completed
    }

    /// Repetitions counted since the last [`reset`](Self::reset).
    pub const fn count(&self) -> u32 {
        self.count
    }

    pub const fn is_paused(&self) -> bool {
        self.paused
    }

    /// Stop consuming frames. Pausing mid-movement is safe: dropped frames
    /// never reach the detector, so no transition is lost or duplicated
    /// when counting resumes.
    pub fn pause(&mut self) {
        self.paused = true;
    }

    pub fn resume(&mut self) {
        self.paused = false;
    }

    /// Count a different movement from the next frame on.
    ///
    /// The detector phase restarts so an armed end state cannot carry
    /// over; the count accumulated so far stays.
    pub fn change_pattern(&mut self, pattern: ExercisePattern) {
        log::info!("pattern changed to {}", pattern.name());
        self.detector.change_pattern(pattern);
    }

    /// Start over: count to zero, detector back to its initial phase.
    /// The pause flag is left as it is.
    pub fn reset(&mut self) {
        self.count = 0;
        self.detector.reset();
    }

    pub const fn detector(&self) -> &RepDetector {
        &self.detector
    }
}
