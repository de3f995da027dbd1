//! Structural segment commands: append, convert between linear and cubic,
//! and split at a new end control.

use pathedit_core::{
    Control, ControlId, Document, EntityRef, PathId, Segment, SegmentId, SegmentVariant,
};

/// Appends a new segment to the end of a path.
///
/// The linear variant joins the previous last endpoint (or a fresh origin
/// endpoint on an empty path) to `end`. The cubic variant synthesizes two
/// middle controls: mirrored around the origin for an empty path, otherwise
/// the tangent-continuity mirror of the previous segment's second-to-last
/// control plus the midpoint of the shared endpoint and `end`.
#[derive(Debug, Clone)]
pub struct AddSegment {
    path: PathId,
    end: Option<Control>,
    variant: SegmentVariant,
    segment: Option<Segment>,
    created: Vec<ControlId>,
    stash: Vec<Control>,
    entities: Vec<EntityRef>,
    forward: bool,
}

impl AddSegment {
    /// `end` must be an end control value not yet adopted by the document.
    pub fn new(path: PathId, end: Control, variant: SegmentVariant) -> Self {
        debug_assert!(end.is_end(), "segment must end at an end control");
        Self {
            path,
            end: Some(end),
            variant,
            segment: None,
            created: Vec::new(),
            stash: Vec::new(),
            entities: Vec::new(),
            forward: false,
        }
    }

    /// Handle of the appended segment, available after execution.
    pub fn segment_id(&self) -> Option<SegmentId> {
        self.segment.as_ref().map(|s| s.uid)
    }

    pub fn execute(&mut self, doc: &mut Document) -> bool {
        let end = match self.end.take() {
            Some(end) => end,
            None => return false,
        };
        let end_id = end.uid;

        // Everything needed from the previous segment, read before mutating.
        let prev = match doc.path(self.path) {
            Some(path) => path
                .segments
                .last()
                .map(|seg| (seg.last(), seg.controls[seg.controls.len() - 2])),
            None => {
                tracing::warn!(path = ?self.path, "add segment: unknown path");
                return false;
            }
        };

        let mut created: Vec<Control> = Vec::new();
        let segment = match (self.variant, prev) {
            (SegmentVariant::Linear, Some((last_id, _))) => {
                self.entities = vec![EntityRef::Control(end_id)];
                Segment::new(doc.alloc_segment_id(), last_id, Vec::new(), end_id)
            }
            (SegmentVariant::Linear, None) => {
                let origin = doc.create_end_control(0.0, 0.0, 0.0);
                let segment = Segment::new(doc.alloc_segment_id(), origin.uid, Vec::new(), end_id);
                created.push(origin);
                self.entities = vec![EntityRef::Control(end_id)];
                segment
            }
            (SegmentVariant::Cubic, Some((p0_id, tangent_id))) => {
                let (p0, tangent) = match (doc.control(p0_id), doc.control(tangent_id)) {
                    (Some(p0), Some(tangent)) => (p0.pos(), tangent.pos()),
                    _ => {
                        tracing::warn!(path = ?self.path, "add segment: dangling endpoint");
                        return false;
                    }
                };
                let p1_pos = p0.mirror(tangent);
                let p2_pos = p0.midpoint(end.pos());
                let p1 = doc.create_control(p1_pos.x, p1_pos.y);
                let p2 = doc.create_control(p2_pos.x, p2_pos.y);
                let segment = Segment::new(
                    doc.alloc_segment_id(),
                    p0_id,
                    vec![p1.uid, p2.uid],
                    end_id,
                );
                self.entities = vec![
                    EntityRef::Control(p1.uid),
                    EntityRef::Control(p2.uid),
                    EntityRef::Control(end_id),
                ];
                created.push(p1);
                created.push(p2);
                segment
            }
            (SegmentVariant::Cubic, None) => {
                let p0 = doc.create_end_control(0.0, 0.0, 0.0);
                let p1 = doc.create_control(p0.x, end.y);
                let p2 = doc.create_control(end.x, p0.y);
                let segment = Segment::new(
                    doc.alloc_segment_id(),
                    p0.uid,
                    vec![p1.uid, p2.uid],
                    end_id,
                );
                self.entities = vec![
                    EntityRef::Control(p0.uid),
                    EntityRef::Control(p1.uid),
                    EntityRef::Control(p2.uid),
                    EntityRef::Control(end_id),
                ];
                created.push(p0);
                created.push(p1);
                created.push(p2);
                segment
            }
        };

        created.push(end);
        self.created = created.iter().map(|c| c.uid).collect();
        for control in created {
            doc.insert_control(control);
        }

        if let Some(path) = doc.path_mut(self.path) {
            path.segments.push(segment.clone());
        }
        self.segment = Some(segment);
        self.forward = true;
        true
    }

    pub fn undo(&mut self, doc: &mut Document) {
        if let Some(path) = doc.path_mut(self.path) {
            path.segments.pop();
        }
        self.stash = self
            .created
            .iter()
            .filter_map(|id| doc.take_control(*id))
            .collect();
        self.forward = false;
    }

    pub fn redo(&mut self, doc: &mut Document) {
        for control in self.stash.drain(..) {
            doc.insert_control(control);
        }
        if let Some(segment) = self.segment.as_ref() {
            if let Some(path) = doc.path_mut(self.path) {
                path.segments.push(segment.clone());
            }
        }
        self.forward = true;
    }

    pub fn entities(&self) -> Vec<EntityRef> {
        if self.forward {
            self.entities.clone()
        } else {
            Vec::new()
        }
    }
}

/// Converts a segment between 2 and 4 controls in place.
///
/// To-curve synthesizes middle controls from neighbor tangents (mirrored
/// through the shared endpoints, always forced to plain controls) or falls
/// back to the segment midpoint where no neighbor exists. Records full
/// before/after control lists for exact undo/redo.
#[derive(Debug, Clone)]
pub struct ConvertSegment {
    path: PathId,
    segment: SegmentId,
    variant: SegmentVariant,
    previous_controls: Vec<ControlId>,
    new_controls: Vec<ControlId>,
    stash: Vec<Control>,
    forward: bool,
}

impl ConvertSegment {
    pub fn new(path: PathId, segment: SegmentId, variant: SegmentVariant) -> Self {
        Self {
            path,
            segment,
            variant,
            previous_controls: Vec::new(),
            new_controls: Vec::new(),
            stash: Vec::new(),
            forward: false,
        }
    }

    pub fn execute(&mut self, doc: &mut Document) -> bool {
        let (index, controls) = match doc.path(self.path) {
            Some(path) => match path.segment_index(self.segment) {
                Some(index) => (index, path.segments[index].controls.clone()),
                None => return false,
            },
            None => return false,
        };
        self.previous_controls = controls.clone();
        let first = controls[0];
        let last = controls[controls.len() - 1];

        match self.variant {
            SegmentVariant::Linear => {
                if controls.len() == 2 {
                    return false;
                }
                self.new_controls = vec![first, last];
            }
            SegmentVariant::Cubic => {
                let (prev_tangent, next_tangent) = match doc.path(self.path) {
                    Some(path) => {
                        let prev = index.checked_sub(1).map(|i| {
                            let seg = &path.segments[i];
                            seg.controls[seg.controls.len() - 2]
                        });
                        let next = path.segments.get(index + 1).map(|seg| seg.controls[1]);
                        (prev, next)
                    }
                    None => (None, None),
                };
                let (p0, p3) = match (doc.control(first), doc.control(last)) {
                    (Some(first), Some(last)) => (first.pos(), last.pos()),
                    _ => return false,
                };
                let fallback = p0.midpoint(p3);
                let p1 = prev_tangent
                    .and_then(|id| doc.control(id))
                    .map(|c| p0.mirror(c.pos()))
                    .unwrap_or(fallback);
                let p2 = next_tangent
                    .and_then(|id| doc.control(id))
                    .map(|c| p3.mirror(c.pos()))
                    .unwrap_or(fallback);
                // always plain controls, even when the mirror source was an endpoint
                let c1 = doc.create_control(p1.x, p1.y);
                let c2 = doc.create_control(p2.x, p2.y);
                self.new_controls = vec![first, c1.uid, c2.uid, last];
                doc.insert_control(c1);
                doc.insert_control(c2);
            }
        }

        // detach the middles that are no longer referenced
        for id in &controls[1..controls.len() - 1] {
            if let Some(control) = doc.take_control(*id) {
                self.stash.push(control);
            }
        }
        if let Some(segment) = doc
            .path_mut(self.path)
            .and_then(|p| p.segment_mut(self.segment))
        {
            segment.controls = self.new_controls.clone();
        }
        self.forward = true;
        true
    }

    pub fn undo(&mut self, doc: &mut Document) {
        let to = self.previous_controls.clone();
        let from = self.new_controls.clone();
        self.swap_controls(doc, &to, &from);
        self.forward = false;
    }

    pub fn redo(&mut self, doc: &mut Document) {
        let to = self.new_controls.clone();
        let from = self.previous_controls.clone();
        self.swap_controls(doc, &to, &from);
        self.forward = true;
    }

    fn swap_controls(&mut self, doc: &mut Document, to: &[ControlId], from: &[ControlId]) {
        for id in from {
            if !to.contains(id) {
                if let Some(control) = doc.take_control(*id) {
                    self.stash.push(control);
                }
            }
        }
        for id in to {
            if !from.contains(id) {
                if let Some(at) = self.stash.iter().position(|c| c.uid == *id) {
                    doc.insert_control(self.stash.remove(at));
                }
            }
        }
        if let Some(segment) = doc
            .path_mut(self.path)
            .and_then(|p| p.segment_mut(self.segment))
        {
            segment.controls = to.to_vec();
        }
    }

    /// The interior controls of the segment in its current direction.
    pub fn entities(&self) -> Vec<EntityRef> {
        let list = if self.forward {
            &self.new_controls
        } else {
            &self.previous_controls
        };
        if list.len() < 2 {
            return Vec::new();
        }
        list[1..list.len() - 1]
            .iter()
            .map(|id| EntityRef::Control(*id))
            .collect()
    }
}

/// Splits a segment in two at a new end control.
///
/// A linear segment `[A, B]` becomes `[A, M]` and `[M, B]`. A cubic
/// segment derives the two new middle controls as midpoints between the
/// original middles and the insertion point.
#[derive(Debug, Clone)]
pub struct SplitSegment {
    path: PathId,
    segment: SegmentId,
    point: Option<Control>,
    previous_controls: Vec<ControlId>,
    new_controls: Vec<ControlId>,
    new_segment: Option<Segment>,
    created: Vec<ControlId>,
    stash: Vec<Control>,
    entities: Vec<EntityRef>,
    forward: bool,
}

impl SplitSegment {
    /// `point` must be an end control value not yet adopted by the document.
    pub fn new(path: PathId, segment: SegmentId, point: Control) -> Self {
        debug_assert!(point.is_end(), "split point must be an end control");
        Self {
            path,
            segment,
            point: Some(point),
            previous_controls: Vec::new(),
            new_controls: Vec::new(),
            new_segment: None,
            created: Vec::new(),
            stash: Vec::new(),
            entities: Vec::new(),
            forward: false,
        }
    }

    /// Handle of the inserted segment, available after execution.
    pub fn new_segment_id(&self) -> Option<SegmentId> {
        self.new_segment.as_ref().map(|s| s.uid)
    }

    pub fn execute(&mut self, doc: &mut Document) -> bool {
        let point = match self.point.take() {
            Some(point) => point,
            None => return false,
        };
        let point_id = point.uid;

        let (index, controls) = match doc.path(self.path) {
            Some(path) => match path.segment_index(self.segment) {
                Some(index) => (index, path.segments[index].controls.clone()),
                None => return false,
            },
            None => return false,
        };
        self.previous_controls = controls.clone();

        let new_segment = match controls.len() {
            2 => {
                let old_last = controls[1];
                doc.insert_control(point);
                self.created = vec![point_id];
                self.entities = vec![EntityRef::Control(point_id)];
                Segment::new(doc.alloc_segment_id(), point_id, Vec::new(), old_last)
            }
            4 => {
                let (p1, p2) = match (doc.control(controls[1]), doc.control(controls[2])) {
                    (Some(p1), Some(p2)) => (p1.pos(), p2.pos()),
                    _ => return false,
                };
                let a_pos = p1.midpoint(point.pos());
                let c_pos = p2.midpoint(point.pos());
                let a = doc.create_control(a_pos.x, a_pos.y);
                let c = doc.create_control(c_pos.x, c_pos.y);
                self.created = vec![a.uid, point_id, c.uid];
                self.entities = vec![
                    EntityRef::Control(a.uid),
                    EntityRef::Control(point_id),
                    EntityRef::Control(c.uid),
                ];
                let segment = Segment::new(
                    doc.alloc_segment_id(),
                    point_id,
                    vec![c.uid, controls[2]],
                    controls[3],
                );
                let a_uid = a.uid;
                doc.insert_control(a);
                doc.insert_control(c);
                doc.insert_control(point);
                if let Some(original) = doc
                    .path_mut(self.path)
                    .and_then(|p| p.segment_mut(self.segment))
                {
                    original.controls = vec![controls[0], controls[1], a_uid, point_id];
                }
                segment
            }
            _ => return false,
        };

        if controls.len() == 2 {
            if let Some(original) = doc
                .path_mut(self.path)
                .and_then(|p| p.segment_mut(self.segment))
            {
                original.set_last(point_id);
            }
        }

        if let Some(path) = doc.path_mut(self.path) {
            path.segments.insert(index + 1, new_segment.clone());
            self.new_controls = path.segments[index].controls.clone();
        }
        self.new_segment = Some(new_segment);
        self.forward = true;
        true
    }

    pub fn undo(&mut self, doc: &mut Document) {
        if let Some(new_segment) = self.new_segment.as_ref() {
            if let Some(path) = doc.path_mut(self.path) {
                if let Some(at) = path.segment_index(new_segment.uid) {
                    path.segments.remove(at);
                }
                if let Some(original) = path.segment_mut(self.segment) {
                    original.controls = self.previous_controls.clone();
                }
            }
        }
        self.stash = self
            .created
            .iter()
            .filter_map(|id| doc.take_control(*id))
            .collect();
        self.forward = false;
    }

    pub fn redo(&mut self, doc: &mut Document) {
        for control in self.stash.drain(..) {
            doc.insert_control(control);
        }
        if let Some(new_segment) = self.new_segment.as_ref() {
            if let Some(path) = doc.path_mut(self.path) {
                if let Some(at) = path.segment_index(self.segment) {
                    if let Some(original) = path.segment_mut(self.segment) {
                        original.controls = self.new_controls.clone();
                    }
                    path.segments.insert(at + 1, new_segment.clone());
                }
            }
        }
        self.forward = true;
    }

    pub fn entities(&self) -> Vec<EntityRef> {
        if self.forward {
            self.entities.clone()
        } else {
            Vec::new()
        }
    }
}
