use serde::{Deserialize, Serialize};

use super::{ControlId, Keyframe, KeyframeId, SegmentId};

/// Shape of a segment: a straight line (2 controls) or a cubic Bezier
/// curve (4 controls).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SegmentVariant {
    Linear,
    Cubic,
}

/// One piece of a path: 2 or 4 control handles plus speed keyframes.
///
/// `controls[0]` and `controls[last]` always refer to end controls; any
/// middle handles refer to plain controls. The first handle is shared with
/// the previous segment's last handle when the segment is not the first of
/// its path.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Segment {
    pub uid: SegmentId,
    pub controls: Vec<ControlId>,
    pub speed_profiles: Vec<Keyframe>,
}

impl Segment {
    pub fn new(uid: SegmentId, first: ControlId, middle: Vec<ControlId>, last: ControlId) -> Self {
        let mut controls = Vec::with_capacity(middle.len() + 2);
        controls.push(first);
        controls.extend(middle);
        controls.push(last);
        Self {
            uid,
            controls,
            speed_profiles: Vec::new(),
        }
    }

    pub fn first(&self) -> ControlId {
        self.controls[0]
    }

    pub fn last(&self) -> ControlId {
        self.controls[self.controls.len() - 1]
    }

    pub fn set_last(&mut self, id: ControlId) {
        let idx = self.controls.len() - 1;
        self.controls[idx] = id;
    }

    /// Handles of the interior controls (empty for linear segments).
    pub fn middle(&self) -> &[ControlId] {
        &self.controls[1..self.controls.len() - 1]
    }

    pub fn is_linear(&self) -> bool {
        self.controls.len() == 2
    }

    pub fn is_cubic(&self) -> bool {
        self.controls.len() == 4
    }

    /// Re-sorts keyframes ascending by `x_pos`, keeping insertion order for
    /// equal positions.
    pub fn sort_keyframes(&mut self) {
        self.speed_profiles
            .sort_by(|a, b| a.x_pos.total_cmp(&b.x_pos));
    }

    pub fn keyframe_index(&self, uid: KeyframeId) -> Option<usize> {
        self.speed_profiles.iter().position(|kf| kf.uid == uid)
    }
}
