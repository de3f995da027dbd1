//! Drag command for one control plus any attached followers.

use pathedit_core::{ControlId, Document, EntityRef, Vector};

/// Translates `main` to an absolute position and shifts every follower by
/// the same delta.
///
/// The main control moves absolutely while followers move relatively, which
/// matters when the main control does not start exactly at `from`.
/// Mergeable: consecutive drags of the same main control with the same
/// ordered follower set collapse into one, keeping the original `from` so a
/// single undo returns to the state before the first drag.
#[derive(Debug, Clone)]
pub struct DragControls {
    main: ControlId,
    from: Vector,
    to: Vector,
    followers: Vec<ControlId>,
}

impl DragControls {
    pub fn new(main: ControlId, from: Vector, to: Vector, followers: Vec<ControlId>) -> Self {
        Self {
            main,
            from,
            to,
            followers,
        }
    }

    pub fn execute(&mut self, doc: &mut Document) -> bool {
        let delta = self.to - self.from;
        for id in &self.followers {
            match doc.control_mut(*id) {
                Some(control) => control.translate(delta),
                None => tracing::warn!(follower = ?id, "drag: unknown follower control"),
            }
        }
        if let Some(control) = doc.control_mut(self.main) {
            control.set_pos(self.to);
        }
        true
    }

    pub fn undo(&mut self, doc: &mut Document) {
        let delta = self.from - self.to;
        for id in &self.followers {
            if let Some(control) = doc.control_mut(*id) {
                control.translate(delta);
            }
        }
        if let Some(control) = doc.control_mut(self.main) {
            control.set_pos(self.from);
        }
    }

    pub fn redo(&mut self, doc: &mut Document) {
        self.execute(doc);
    }

    pub fn merge(&mut self, other: &DragControls) -> bool {
        if self.main != other.main || self.followers != other.followers {
            return false;
        }
        self.to = other.to;
        true
    }

    pub fn entities(&self) -> Vec<EntityRef> {
        let mut entities = vec![EntityRef::Control(self.main)];
        entities.extend(self.followers.iter().map(|id| EntityRef::Control(*id)));
        entities
    }
}
