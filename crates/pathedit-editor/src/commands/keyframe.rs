//! Speed keyframe commands: add, move (mergeable), remove.

use pathedit_core::{
    Document, Keyframe, KeyframeId, KeyframePos, Path, PathId, SegmentId,
};

fn take_keyframe(path: &mut Path, segment: SegmentId, kf: KeyframeId) -> Option<Keyframe> {
    let segment = path.segment_mut(segment)?;
    let at = segment.keyframe_index(kf)?;
    Some(segment.speed_profiles.remove(at))
}

fn put_keyframe(path: &mut Path, pos: KeyframePos, mut kf: Keyframe) {
    kf.x_pos = pos.x_pos;
    kf.y_pos = pos.y_pos;
    if let Some(segment) = path.segment_mut(pos.segment) {
        segment.speed_profiles.push(kf);
        segment.sort_keyframes();
    }
}

/// Creates a keyframe at the given position and inserts it into the owning
/// segment's sorted profile list.
#[derive(Debug, Clone)]
pub struct AddKeyframe {
    path: PathId,
    pos: KeyframePos,
    kf: Option<Keyframe>,
}

impl AddKeyframe {
    pub fn new(path: PathId, pos: KeyframePos) -> Self {
        Self {
            path,
            pos,
            kf: None,
        }
    }

    /// The created keyframe, available after execution.
    pub fn keyframe(&self) -> Option<&Keyframe> {
        self.kf.as_ref()
    }

    pub fn execute(&mut self, doc: &mut Document) -> bool {
        if doc
            .path(self.path)
            .and_then(|p| p.segment(self.pos.segment))
            .is_none()
        {
            return false;
        }
        let kf = Keyframe::new(doc.alloc_keyframe_id(), self.pos.x_pos, self.pos.y_pos);
        self.kf = Some(kf.clone());
        if let Some(path) = doc.path_mut(self.path) {
            put_keyframe(path, self.pos, kf);
        }
        true
    }

    pub fn undo(&mut self, doc: &mut Document) {
        if let (Some(path), Some(kf)) = (doc.path_mut(self.path), self.kf.as_ref()) {
            take_keyframe(path, self.pos.segment, kf.uid);
        }
    }

    pub fn redo(&mut self, doc: &mut Document) {
        if let (Some(path), Some(kf)) = (doc.path_mut(self.path), self.kf.clone()) {
            put_keyframe(path, self.pos, kf);
        }
    }
}

/// Moves a keyframe to a new position, possibly across segments.
///
/// The current owner is rediscovered by scanning the whole path rather than
/// trusting a cached segment. Mergeable on the same keyframe identity,
/// keeping only the original pre-move position for undo.
#[derive(Debug, Clone)]
pub struct MoveKeyframe {
    path: PathId,
    new_pos: KeyframePos,
    kf: KeyframeId,
    old_pos: Option<KeyframePos>,
}

impl MoveKeyframe {
    pub fn new(path: PathId, new_pos: KeyframePos, kf: KeyframeId) -> Self {
        Self {
            path,
            new_pos,
            kf,
            old_pos: None,
        }
    }

    pub fn execute(&mut self, doc: &mut Document) -> bool {
        let path = match doc.path_mut(self.path) {
            Some(path) => path,
            None => return false,
        };
        let mut removed = None;
        for segment in &mut path.segments {
            if let Some(at) = segment.keyframe_index(self.kf) {
                let kf = segment.speed_profiles.remove(at);
                removed = Some((segment.uid, kf));
                break;
            }
        }
        let (segment, kf) = match removed {
            Some(found) => found,
            None => return false,
        };
        self.old_pos = Some(KeyframePos::new(segment, kf.x_pos, kf.y_pos));
        put_keyframe(path, self.new_pos, kf);
        true
    }

    pub fn undo(&mut self, doc: &mut Document) {
        let old_pos = match self.old_pos {
            Some(pos) => pos,
            None => return,
        };
        if let Some(path) = doc.path_mut(self.path) {
            if let Some(kf) = take_keyframe(path, self.new_pos.segment, self.kf) {
                put_keyframe(path, old_pos, kf);
            }
        }
    }

    pub fn redo(&mut self, doc: &mut Document) {
        let old_pos = match self.old_pos {
            Some(pos) => pos,
            None => return,
        };
        if let Some(path) = doc.path_mut(self.path) {
            if let Some(kf) = take_keyframe(path, old_pos.segment, self.kf) {
                put_keyframe(path, self.new_pos, kf);
            }
        }
    }

    pub fn merge(&mut self, other: &MoveKeyframe) -> bool {
        if self.kf != other.kf {
            return false;
        }
        self.new_pos = other.new_pos;
        true
    }
}

/// Removes a keyframe, recording its exact index so undo reinserts it at
/// the original slot without re-sorting.
#[derive(Debug, Clone)]
pub struct RemoveKeyframe {
    path: PathId,
    kf: KeyframeId,
    segment: Option<SegmentId>,
    old_index: usize,
    removed: Option<Keyframe>,
}

impl RemoveKeyframe {
    pub fn new(path: PathId, kf: KeyframeId) -> Self {
        Self {
            path,
            kf,
            segment: None,
            old_index: 0,
            removed: None,
        }
    }

    pub fn execute(&mut self, doc: &mut Document) -> bool {
        let path = match doc.path_mut(self.path) {
            Some(path) => path,
            None => return false,
        };
        for segment in &mut path.segments {
            if let Some(at) = segment.keyframe_index(self.kf) {
                self.removed = Some(segment.speed_profiles.remove(at));
                self.segment = Some(segment.uid);
                self.old_index = at;
                return true;
            }
        }
        false
    }

    pub fn undo(&mut self, doc: &mut Document) {
        if let (Some(segment), Some(removed)) = (self.segment, self.removed.clone()) {
            if let Some(segment) = doc.path_mut(self.path).and_then(|p| p.segment_mut(segment)) {
                // back into the exact original slot, no re-sort
                segment.speed_profiles.insert(self.old_index, removed);
            }
        }
    }

    pub fn redo(&mut self, doc: &mut Document) {
        if let Some(segment) = self.segment {
            if let Some(segment) = doc.path_mut(self.path).and_then(|p| p.segment_mut(segment)) {
                if self.old_index < segment.speed_profiles.len() {
                    segment.speed_profiles.remove(self.old_index);
                }
            }
        }
    }
}
