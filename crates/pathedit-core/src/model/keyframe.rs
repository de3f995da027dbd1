use serde::{Deserialize, Serialize};

use super::{KeyframeId, SegmentId};

/// A speed-profile sample attached to a segment.
///
/// `x_pos` is the fraction of the segment (0..1), `y_pos` the speed value.
/// Keyframes within a segment are kept sorted ascending by `x_pos`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Keyframe {
    pub uid: KeyframeId,
    pub x_pos: f64,
    pub y_pos: f64,
}

impl Keyframe {
    pub fn new(uid: KeyframeId, x_pos: f64, y_pos: f64) -> Self {
        Self { uid, x_pos, y_pos }
    }
}

/// A keyframe position naming the segment that owns it.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct KeyframePos {
    pub segment: SegmentId,
    pub x_pos: f64,
    pub y_pos: f64,
}

impl KeyframePos {
    pub fn new(segment: SegmentId, x_pos: f64, y_pos: f64) -> Self {
        Self {
            segment,
            x_pos,
            y_pos,
        }
    }
}
