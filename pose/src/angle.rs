//! Planar angle at a joint.
//!
//! The angle at a joint is taken between the two rays leaving it toward its
//! neighbouring landmarks:
//!
//! ```norust
//! θ = acos((v1 · v2) / (|v1| * |v2|))
//! ```
//!
//! where:
//!
//! - v1 – vector from the vertex joint to the first distal joint;
//! - v2 – vector from the vertex joint to the second distal joint;
//! - θ – angle between the rays in degrees.
//!
//! Image coordinates grow downward, so every `y` is flipped (`1 - y`) before
//! the vectors are built; the anatomical convention expects up as positive.

use crate::JointPosition;

/// Angle in degrees at `vertex` between the rays toward `a` and `b`.
///
/// Total over all inputs. Coincident points yield exactly `0`, whether they
/// degenerate a ray to zero magnitude or make the two rays identical, and
/// the cosine is clamped to `-1..=1` so rounding can never push `acos` into
/// NaN. The result is always within `0..=180`.
pub fn angle_at(vertex: JointPosition, a: JointPosition, b: JointPosition) -> f64 {
    let (vx, vy) = (vertex.x, 1.0 - vertex.y);
    let (ax, ay) = (a.x, 1.0 - a.y);
    let (bx, by) = (b.x, 1.0 - b.y);

    let v1 = (ax - vx, ay - vy);
    let v2 = (bx - vx, by - vy);

    // identical rays enclose no angle; acos of the rounded ratio would
    // report a sliver of one
    if v1 == v2 {
        return 0.0;
    }

    let dot = v1.0 * v2.0 + v1.1 * v2.1;
    let mag1 = (v1.0 * v1.0 + v1.1 * v1.1).sqrt();
    let mag2 = (v2.0 * v2.0 + v2.1 * v2.1).sqrt();

    if mag1 == 0.0 || mag2 == 0.0 {
        return 0.0;
    }

    let degrees = (dot / (mag1 * mag2)).clamp(-1.0, 1.0).acos().to_degrees();

    // acos never leaves the principal range; guard against rounding anyway
    if degrees > 180.0 {
        return 360.0 - degrees;
    }

    degrees
}
