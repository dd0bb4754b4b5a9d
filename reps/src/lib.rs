//! # Repetition counting
//!
//! Counts repetitions of a bodyweight exercise from a stream of pose
//! frames. A movement is described by an [`ExercisePattern`]: two partial
//! sets of limb-angle targets, one for the extended end of the motion and
//! one for the contracted end.
//!
//! ```notrust
//! pose frames -> BodyAngles -> RepDetector -> Session count
//! ```
//!
//! Counting is a two-state hysteresis. A frame within tolerance of the
//! `end` targets arms the detector; the next frame within tolerance of the
//! `start` targets fires one repetition and disarms it again. Frames that
//! match neither side change nothing, so jitter at either extreme of the
//! motion cannot double count.
//!
//! Custom patterns come out of [`build_pattern`], fed with two snapshots
//! the user captured live. The stock Squat and Push-up patterns are put
//! into a [`PatternStore`] once by [`seed_system_patterns`].
//!
//! The crate never installs a logger; it talks to the `log` facade and the
//! embedding application decides where that goes.

mod calibration;
mod detector;
mod pattern;
mod session;
mod store;

pub use self::calibration::*;
pub use self::detector::*;
pub use self::pattern::*;
pub use self::session::*;
pub use self::store::*;

/// The recoverable refusals of this crate.
///
/// Everything the engine meets mid-stream, missing joints, low confidence,
/// frames matching neither pose, is skipped silently instead of raised;
/// the stream simply continues with the next frame. What remains are the
/// refusals a user can act on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    /// A capture was attempted on a frame where some required joint is
    /// missing or seen with too little confidence.
    #[error("pose incomplete, not every required joint is visible clearly enough")]
    PoseIncomplete,
    /// The two captured poses lie within the similarity threshold of each
    /// other in every channel; a pattern built from them would never fire.
    #[error("captured poses are too similar to tell apart")]
    PosesTooSimilar,
    /// The pattern constrains no channel in either state and can never
    /// detect anything.
    #[error("pattern constrains no angle")]
    UnconstrainedPattern,
}
