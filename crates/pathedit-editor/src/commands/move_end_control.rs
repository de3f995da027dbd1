//! Relocates an end control before or after another entity, possibly
//! across path boundaries, re-deriving the affected segment lists.

use std::collections::HashSet;

use pathedit_core::{ControlId, Control, Document, EntityRef, PathId, Segment};

use crate::error::CommandError;

/// Where the moving control lands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveDestination {
    /// Relative to a whole path: `Before` appends to the end of the
    /// preceding path, `After` prepends to this path.
    Path(PathId),
    /// Relative to another control in its flattened path list.
    Control(ControlId),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveOrder {
    Before,
    After,
}

/// Moves an end control to a new position in the flattened control list of
/// its own or another path, then re-derives the segment lists.
///
/// Reconstruction rule: every end control closes the previous segment and
/// opens the next; a run of plain controls between two end controls becomes
/// that segment's middles, collapsed to none when shorter than 2 and
/// clipped to its first and last when longer. Controls dropped by the rule
/// are detached from the document and reported as side-effected entities.
///
/// Construction fails when either anchor does not resolve; a constructed
/// command is always safe to execute.
#[derive(Debug, Clone)]
pub struct MoveEndControl {
    moving: ControlId,
    destination: MoveDestination,
    order: MoveOrder,
    source_path: PathId,
    dest_path: PathId,
    source_before: Vec<Segment>,
    dest_before: Vec<Segment>,
    source_after: Vec<Segment>,
    dest_after: Vec<Segment>,
    dropped: Vec<ControlId>,
    stash: Vec<Control>,
    entities: Vec<EntityRef>,
}

impl MoveEndControl {
    pub fn new(
        doc: &Document,
        moving: ControlId,
        destination: MoveDestination,
        order: MoveOrder,
    ) -> Result<Self, CommandError> {
        if destination == MoveDestination::Control(moving) {
            return Err(CommandError::SelfDestination);
        }
        let source = doc
            .path_of_control(moving)
            .ok_or(CommandError::DetachedControl(moving))?;
        debug_assert!(
            doc.control(moving).is_some_and(|c| c.is_end()),
            "only end controls can be moved"
        );

        let (dest_path, dest_before) = match destination {
            MoveDestination::Path(uid) => {
                let at = doc.path_index(uid).ok_or(CommandError::UnknownPath(uid))?;
                let path = match order {
                    MoveOrder::Before if at > 0 => &doc.paths[at - 1],
                    MoveOrder::Before => return Err(CommandError::NoPrecedingPath),
                    MoveOrder::After => &doc.paths[at],
                };
                (path.uid, path.segments.clone())
            }
            MoveDestination::Control(id) => {
                let path = doc
                    .path_of_control(id)
                    .ok_or(CommandError::DetachedControl(id))?;
                (path.uid, path.segments.clone())
            }
        };

        Ok(Self {
            moving,
            destination,
            order,
            source_path: source.uid,
            dest_path,
            source_before: source.segments.clone(),
            dest_before,
            source_after: Vec::new(),
            dest_after: Vec::new(),
            dropped: Vec::new(),
            stash: Vec::new(),
            entities: Vec::new(),
        })
    }

    pub fn execute(&mut self, doc: &mut Document) -> bool {
        let mut entities: Vec<EntityRef> = Vec::new();
        let same_path = self.source_path == self.dest_path;

        let mut source_list = match doc.path(self.source_path) {
            Some(path) => path.control_ids(),
            None => return false,
        };
        match source_list.iter().position(|id| *id == self.moving) {
            Some(at) => {
                source_list.remove(at);
            }
            None => return false,
        }

        if same_path {
            self.insert_moving(&mut source_list);
            let segments = self.build_segments(doc, &source_list, &mut entities);
            self.source_after = segments.clone();
            self.dest_after = Vec::new();
            if let Some(path) = doc.path_mut(self.source_path) {
                path.segments = segments;
            }
        } else {
            let segments = self.build_segments(doc, &source_list, &mut entities);
            self.source_after = segments.clone();
            if let Some(path) = doc.path_mut(self.source_path) {
                path.segments = segments;
            }

            let mut dest_list = match doc.path(self.dest_path) {
                Some(path) => path.control_ids(),
                None => return false,
            };
            self.insert_moving(&mut dest_list);
            let segments = self.build_segments(doc, &dest_list, &mut entities);
            self.dest_after = segments.clone();
            if let Some(path) = doc.path_mut(self.dest_path) {
                path.segments = segments;
            }
        }

        entities.push(EntityRef::Control(self.moving));
        self.entities = entities;

        // Anything referenced before but not after has left the canvas.
        let mut after_refs: HashSet<ControlId> = HashSet::new();
        for segment in self.source_after.iter().chain(self.dest_after.iter()) {
            after_refs.extend(segment.controls.iter().copied());
        }
        let mut seen: HashSet<ControlId> = HashSet::new();
        self.dropped = self
            .source_before
            .iter()
            .chain(self.dest_before.iter())
            .flat_map(|segment| segment.controls.iter().copied())
            .filter(|id| !after_refs.contains(id) && seen.insert(*id))
            .collect();
        self.stash = self
            .dropped
            .iter()
            .filter_map(|id| doc.take_control(*id))
            .collect();
        true
    }

    pub fn undo(&mut self, doc: &mut Document) {
        for control in self.stash.drain(..) {
            doc.insert_control(control);
        }
        if let Some(path) = doc.path_mut(self.source_path) {
            path.segments = self.source_before.clone();
        }
        if self.dest_path != self.source_path {
            if let Some(path) = doc.path_mut(self.dest_path) {
                path.segments = self.dest_before.clone();
            }
        }
    }

    pub fn redo(&mut self, doc: &mut Document) {
        if let Some(path) = doc.path_mut(self.source_path) {
            path.segments = self.source_after.clone();
        }
        if self.dest_path != self.source_path {
            if let Some(path) = doc.path_mut(self.dest_path) {
                path.segments = self.dest_after.clone();
            }
        }
        self.stash = self
            .dropped
            .iter()
            .filter_map(|id| doc.take_control(*id))
            .collect();
    }

    fn insert_moving(&self, list: &mut Vec<ControlId>) {
        match self.destination {
            MoveDestination::Path(_) => {
                let at = match self.order {
                    MoveOrder::Before => list.len(),
                    MoveOrder::After => 0,
                };
                list.insert(at, self.moving);
            }
            MoveDestination::Control(id) => match list.iter().position(|x| *x == id) {
                Some(at) => {
                    let at = match self.order {
                        MoveOrder::Before => at,
                        MoveOrder::After => at + 1,
                    };
                    list.insert(at, self.moving);
                }
                None => {
                    tracing::warn!(destination = ?id, "move end control: destination not in path")
                }
            },
        }
    }

    /// Re-derives a segment list from a flattened control list, reporting
    /// every control the clip/collapse rule discards.
    fn build_segments(
        &self,
        doc: &mut Document,
        list: &[ControlId],
        entities: &mut Vec<EntityRef>,
    ) -> Vec<Segment> {
        let mut segments: Vec<Segment> = Vec::new();
        let mut first: Option<ControlId> = None;
        let mut middle: Vec<ControlId> = Vec::new();

        for id in list {
            let is_end = doc.control(*id).is_some_and(|c| c.is_end());
            if is_end {
                if let Some(first_id) = first {
                    if middle.len() < 2 {
                        // no fewer than 2 middle controls
                        entities.extend(middle.drain(..).map(EntityRef::Control));
                    } else if middle.len() > 2 {
                        // no more than 2 middle controls
                        entities.extend(
                            middle[1..middle.len() - 1]
                                .iter()
                                .map(|id| EntityRef::Control(*id)),
                        );
                        middle = vec![middle[0], middle[middle.len() - 1]];
                    }
                    segments.push(Segment::new(
                        doc.alloc_segment_id(),
                        first_id,
                        std::mem::take(&mut middle),
                        *id,
                    ));
                }
                first = Some(*id);
                middle.clear();
            } else {
                middle.push(*id);
            }
        }

        entities.extend(middle.drain(..).map(EntityRef::Control));
        if let Some(first_id) = first {
            if segments.last().map(|s| s.last()) != Some(first_id) {
                entities.push(EntityRef::Control(first_id));
            }
        }
        segments
    }

    pub fn entities(&self) -> Vec<EntityRef> {
        self.entities.clone()
    }
}
