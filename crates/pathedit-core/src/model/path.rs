use serde::{Deserialize, Serialize};

use super::{ControlId, PathId, Segment, SegmentId};

/// An ordered sequence of continuity-linked segments.
///
/// Continuity invariant: for consecutive segments `s[i]` and `s[i + 1]`,
/// `s[i].last() == s[i + 1].first()`. Commands may break this transiently
/// inside their own bodies but must restore it before returning.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Path {
    pub uid: PathId,
    pub name: String,
    pub visible: bool,
    pub segments: Vec<Segment>,
}

impl Path {
    pub fn new(uid: PathId, name: impl Into<String>) -> Self {
        Self {
            uid,
            name: name.into(),
            visible: true,
            segments: Vec::new(),
        }
    }

    /// Ordered control handles of the whole path, with shared endpoints
    /// appearing once.
    pub fn control_ids(&self) -> Vec<ControlId> {
        let mut ids = Vec::new();
        for (i, segment) in self.segments.iter().enumerate() {
            if i == 0 {
                ids.extend(segment.controls.iter().copied());
            } else {
                // first control is shared with the previous segment
                ids.extend(segment.controls.iter().skip(1).copied());
            }
        }
        ids
    }

    pub fn segment_index(&self, uid: SegmentId) -> Option<usize> {
        self.segments.iter().position(|s| s.uid == uid)
    }

    pub fn segment(&self, uid: SegmentId) -> Option<&Segment> {
        self.segments.iter().find(|s| s.uid == uid)
    }

    pub fn segment_mut(&mut self, uid: SegmentId) -> Option<&mut Segment> {
        self.segments.iter_mut().find(|s| s.uid == uid)
    }
}
