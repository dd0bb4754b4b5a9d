//! Body-pose observations and the joint-angle geometry on top of them.
//!
//! A pose source (camera + pose estimation, outside this workspace) emits one
//! [`PoseObservation`] per frame: the joints it recognized, each with a
//! normalized position and a confidence score. This crate turns such a frame
//! into the four limb angles ([`BodyAngles`]) that the repetition engine
//! matches patterns against.
//!
//! Everything here is pure computation; frames with missing joints simply
//! yield no angles.

mod angle;
mod observation;

pub use self::angle::*;
pub use self::observation::*;
