use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use super::{
    Control, ControlId, EntityRef, Keyframe, KeyframeId, Path, PathId, SegmentId,
};

/// The editable document: all paths, the control arena, and the selection.
///
/// The document is the sole owner of every control reachable from its
/// paths. Segments hold [`ControlId`] handles into the arena, which is what
/// lets two adjacent segments share one endpoint without aliasing.
///
/// Controls created by commands are detached from the arena on undo with
/// [`Document::take_control`] and re-attached on redo, so their identity
/// (handle and value) survives undo/redo cycles.
#[derive(Debug, Clone, Default)]
pub struct Document {
    pub paths: Vec<Path>,
    controls: HashMap<ControlId, Control>,
    selected: Vec<EntityRef>,
    next_uid: u64,
}

impl Document {
    pub fn new() -> Self {
        Self::default()
    }

    fn alloc(&mut self) -> u64 {
        self.next_uid += 1;
        self.next_uid
    }

    pub fn alloc_segment_id(&mut self) -> SegmentId {
        SegmentId(self.alloc())
    }

    pub fn alloc_keyframe_id(&mut self) -> KeyframeId {
        KeyframeId(self.alloc())
    }

    /// Creates a middle control value with a fresh handle. The control is
    /// not in the arena until [`Document::insert_control`] adopts it.
    pub fn create_control(&mut self, x: f64, y: f64) -> Control {
        let uid = ControlId(self.alloc());
        Control::new(uid, x, y)
    }

    /// Creates an end control value with a fresh handle.
    pub fn create_end_control(&mut self, x: f64, y: f64, heading: f64) -> Control {
        let uid = ControlId(self.alloc());
        Control::end(uid, x, y, heading)
    }

    /// Creates an empty path value with a fresh handle. The path is not in
    /// the document until pushed onto `paths`.
    pub fn create_path(&mut self, name: impl Into<String>) -> Path {
        let uid = PathId(self.alloc());
        Path::new(uid, name)
    }

    /// Adopts a control into the arena under its own handle.
    pub fn insert_control(&mut self, control: Control) {
        self.controls.insert(control.uid, control);
    }

    /// Removes a control from the arena and returns it, preserving its
    /// handle for later re-insertion.
    pub fn take_control(&mut self, id: ControlId) -> Option<Control> {
        self.controls.remove(&id)
    }

    pub fn control(&self, id: ControlId) -> Option<&Control> {
        self.controls.get(&id)
    }

    pub fn control_mut(&mut self, id: ControlId) -> Option<&mut Control> {
        self.controls.get_mut(&id)
    }

    pub fn path(&self, uid: PathId) -> Option<&Path> {
        self.paths.iter().find(|p| p.uid == uid)
    }

    pub fn path_mut(&mut self, uid: PathId) -> Option<&mut Path> {
        self.paths.iter_mut().find(|p| p.uid == uid)
    }

    pub fn path_index(&self, uid: PathId) -> Option<usize> {
        self.paths.iter().position(|p| p.uid == uid)
    }

    /// The path whose segments reference the given control, if any.
    pub fn path_of_control(&self, id: ControlId) -> Option<&Path> {
        self.paths
            .iter()
            .find(|p| p.segments.iter().any(|s| s.controls.contains(&id)))
    }

    pub fn selected(&self) -> &[EntityRef] {
        &self.selected
    }

    /// Replaces the selection, e.g. with the affected entities of an
    /// undone or redone command.
    pub fn set_selected(&mut self, entities: Vec<EntityRef>) {
        self.selected = entities;
    }

    /// Deep copy of the reachable model state, used for equality checks
    /// and external persistence.
    pub fn snapshot(&self) -> DocumentSnapshot {
        let paths = self
            .paths
            .iter()
            .map(|path| PathSnapshot {
                uid: path.uid,
                name: path.name.clone(),
                visible: path.visible,
                segments: path
                    .segments
                    .iter()
                    .map(|segment| SegmentSnapshot {
                        uid: segment.uid,
                        controls: segment
                            .controls
                            .iter()
                            .filter_map(|id| {
                                let control = self.control(*id).cloned();
                                if control.is_none() {
                                    tracing::warn!(?id, "snapshot: dangling control handle");
                                }
                                control
                            })
                            .collect(),
                        speed_profiles: segment.speed_profiles.clone(),
                    })
                    .collect(),
            })
            .collect();
        DocumentSnapshot { paths }
    }
}

/// Snapshot of document state for deep comparison and persistence.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DocumentSnapshot {
    pub paths: Vec<PathSnapshot>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PathSnapshot {
    pub uid: PathId,
    pub name: String,
    pub visible: bool,
    pub segments: Vec<SegmentSnapshot>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SegmentSnapshot {
    pub uid: SegmentId,
    pub controls: Vec<Control>,
    pub speed_profiles: Vec<Keyframe>,
}
