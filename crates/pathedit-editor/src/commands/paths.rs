//! Whole-path commands: add a path, and bulk removal of paths and end
//! controls.

use std::collections::HashSet;

use pathedit_core::{Control, ControlId, Document, EntityRef, Path, PathId, Segment};

/// Appends a path to the document.
///
/// Any controls the path's segments reference must be passed alongside so
/// the command can adopt them into the document arena (and detach them
/// again on undo).
#[derive(Debug, Clone)]
pub struct AddPath {
    uid: PathId,
    path: Option<Path>,
    control_ids: Vec<ControlId>,
    controls: Vec<Control>,
    forward: bool,
}

impl AddPath {
    pub fn new(path: Path, controls: Vec<Control>) -> Self {
        debug_assert!(
            {
                let referenced: HashSet<ControlId> = path
                    .segments
                    .iter()
                    .flat_map(|s| s.controls.iter().copied())
                    .collect();
                controls.iter().all(|c| referenced.contains(&c.uid))
            },
            "every provided control must be referenced by the path"
        );
        Self {
            uid: path.uid,
            path: Some(path),
            control_ids: controls.iter().map(|c| c.uid).collect(),
            controls,
            forward: false,
        }
    }

    pub fn path_id(&self) -> PathId {
        self.uid
    }

    pub fn execute(&mut self, doc: &mut Document) -> bool {
        let path = match self.path.take() {
            Some(path) => path,
            None => return false,
        };
        for control in self.controls.drain(..) {
            doc.insert_control(control);
        }
        doc.paths.push(path);
        self.forward = true;
        true
    }

    pub fn undo(&mut self, doc: &mut Document) {
        if let Some(at) = doc.path_index(self.uid) {
            self.path = Some(doc.paths.remove(at));
        }
        self.controls = self
            .control_ids
            .iter()
            .filter_map(|id| doc.take_control(*id))
            .collect();
        self.forward = false;
    }

    pub fn redo(&mut self, doc: &mut Document) {
        self.execute(doc);
    }

    pub fn entities(&self) -> Vec<EntityRef> {
        if !self.forward {
            return Vec::new();
        }
        let mut entities = vec![EntityRef::Path(self.uid)];
        entities.extend(self.control_ids.iter().map(|id| EntityRef::Control(*id)));
        entities
    }
}

#[derive(Debug, Clone)]
struct RemovedPath {
    index: usize,
    path: Option<Path>,
    control_ids: Vec<ControlId>,
    stash: Vec<Control>,
}

#[derive(Debug, Clone)]
struct RemovedSegment {
    path: PathId,
    index: usize,
    segment: Option<Segment>,
    link_needed: bool,
    detached_ids: Vec<ControlId>,
    stash: Vec<Control>,
}

/// Removes a mixed set of paths and end controls.
///
/// Whole-path removals are drained first so controls of an already-removed
/// path are not processed separately. Removing an end control removes the
/// segment it terminates; when that segment was not the first of its path,
/// the preceding segment's last handle is relinked to the removed segment's
/// last, and the relink is recorded so undo restores the original
/// two-segment topology.
#[derive(Debug, Clone)]
pub struct RemovePathsAndEndControls {
    removal_paths: Vec<PathId>,
    removal_end_controls: Vec<(PathId, ControlId)>,
    affected_paths: Vec<RemovedPath>,
    affected_segments: Vec<RemovedSegment>,
    entities: Vec<EntityRef>,
    forward: bool,
}

impl RemovePathsAndEndControls {
    /// Resolves the removal targets against the current document. Targets
    /// that do not resolve (stale handles, middle controls) are ignored;
    /// check [`RemovePathsAndEndControls::has_targets`] before executing.
    pub fn new(doc: &Document, targets: &[EntityRef]) -> Self {
        let mut remaining: HashSet<EntityRef> = targets.iter().copied().collect();
        let mut removal_paths = Vec::new();
        let mut removal_end_controls = Vec::new();

        for path in &doc.paths {
            if remaining.remove(&EntityRef::Path(path.uid)) {
                removal_paths.push(path.uid);
            } else {
                // end controls of a removed path are covered by the path itself
                for id in path.control_ids() {
                    let is_end = doc.control(id).is_some_and(|c| c.is_end());
                    if is_end && remaining.remove(&EntityRef::Control(id)) {
                        removal_end_controls.push((path.uid, id));
                    }
                }
            }
        }

        Self {
            removal_paths,
            removal_end_controls,
            affected_paths: Vec::new(),
            affected_segments: Vec::new(),
            entities: Vec::new(),
            forward: false,
        }
    }

    /// Whether any target resolved to something removable.
    pub fn has_targets(&self) -> bool {
        !self.removal_paths.is_empty() || !self.removal_end_controls.is_empty()
    }

    /// The entities the execution removed from the canvas.
    pub fn removed_entities(&self) -> &[EntityRef] {
        &self.entities
    }

    pub fn execute(&mut self, doc: &mut Document) -> bool {
        for uid in self.removal_paths.clone() {
            self.remove_path(doc, uid);
        }
        for (path, control) in self.removal_end_controls.clone() {
            self.remove_control(doc, path, control);
        }
        self.forward = true;
        !(self.affected_paths.is_empty() && self.affected_segments.is_empty())
    }

    fn remove_path(&mut self, doc: &mut Document, uid: PathId) -> bool {
        let index = match doc.path_index(uid) {
            Some(index) => index,
            None => return false,
        };
        let path = doc.paths.remove(index);
        let control_ids = path.control_ids();
        let stash: Vec<Control> = control_ids
            .iter()
            .filter_map(|id| doc.take_control(*id))
            .collect();

        self.entities.push(EntityRef::Path(uid));
        self.entities
            .extend(control_ids.iter().map(|id| EntityRef::Control(*id)));
        self.affected_paths.push(RemovedPath {
            index,
            path: Some(path),
            control_ids,
            stash,
        });
        true
    }

    fn remove_control(&mut self, doc: &mut Document, path_uid: PathId, control: ControlId) -> bool {
        let removal = {
            let path = match doc.path_mut(path_uid) {
                Some(path) => path,
                None => return false,
            };
            let mut removal = None;
            for index in 0..path.segments.len() {
                let is_first_control = path.segments[index].first() == control;
                let is_last_segment = index + 1 == path.segments.len();
                let is_last_control_of_last = is_last_segment && path.segments[index].last() == control;
                if !(is_first_control || is_last_control_of_last) {
                    continue;
                }

                let is_first_segment = index == 0;
                let is_only_segment = path.segments.len() == 1;
                let link_needed = is_first_control && !is_first_segment;
                if link_needed {
                    let last = path.segments[index].last();
                    path.segments[index - 1].set_last(last);
                }

                let segment = path.segments.remove(index);
                let controls = &segment.controls;
                let detached_ids: Vec<ControlId> = if is_only_segment {
                    controls.clone()
                } else if is_first_control {
                    // the last control survives as the next segment's first
                    controls[..controls.len() - 1].to_vec()
                } else {
                    // the first control survives as the previous segment's last
                    controls[1..].to_vec()
                };
                removal = Some((index, segment, link_needed, detached_ids));
                break;
            }
            removal
        };

        let (index, segment, link_needed, detached_ids) = match removal {
            Some(removal) => removal,
            None => return false,
        };
        let stash: Vec<Control> = detached_ids
            .iter()
            .filter_map(|id| doc.take_control(*id))
            .collect();
        self.entities
            .extend(detached_ids.iter().map(|id| EntityRef::Control(*id)));
        self.affected_segments.push(RemovedSegment {
            path: path_uid,
            index,
            segment: Some(segment),
            link_needed,
            detached_ids,
            stash,
        });
        true
    }

    pub fn undo(&mut self, doc: &mut Document) {
        self.forward = false;

        for removed in self.affected_paths.iter_mut().rev() {
            for control in removed.stash.drain(..) {
                doc.insert_control(control);
            }
            if let Some(path) = removed.path.take() {
                doc.paths.insert(removed.index, path);
            }
        }

        for removed in self.affected_segments.iter_mut().rev() {
            for control in removed.stash.drain(..) {
                doc.insert_control(control);
            }
            if let Some(segment) = removed.segment.take() {
                if let Some(path) = doc.path_mut(removed.path) {
                    let first = segment.first();
                    path.segments.insert(removed.index, segment);
                    if removed.link_needed {
                        path.segments[removed.index - 1].set_last(first);
                    }
                }
            }
        }
    }

    pub fn redo(&mut self, doc: &mut Document) {
        self.forward = true;

        for removed in self.affected_paths.iter_mut() {
            if removed.index < doc.paths.len() {
                let path = doc.paths.remove(removed.index);
                removed.stash = removed
                    .control_ids
                    .iter()
                    .filter_map(|id| doc.take_control(*id))
                    .collect();
                removed.path = Some(path);
            }
        }

        for removed in self.affected_segments.iter_mut() {
            if let Some(path) = doc.path_mut(removed.path) {
                if removed.index < path.segments.len() {
                    let segment = path.segments.remove(removed.index);
                    if removed.link_needed {
                        let last = segment.last();
                        path.segments[removed.index - 1].set_last(last);
                    }
                    removed.segment = Some(segment);
                }
            }
            removed.stash = removed
                .detached_ids
                .iter()
                .filter_map(|id| doc.take_control(*id))
                .collect();
        }
    }

    pub fn entities(&self) -> Vec<EntityRef> {
        if self.forward {
            Vec::new()
        } else {
            self.entities.clone()
        }
    }
}
