//! Generic property updates over paths and controls.

use pathedit_core::{Document, EntityRef};

/// A partial update: only the `Some` fields are applied.
///
/// `name` and `visible` apply to paths; `x`, `y`, `visible` and `heading`
/// apply to controls (`heading` only to end controls).
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PropertyPatch {
    pub name: Option<String>,
    pub visible: Option<bool>,
    pub x: Option<f64>,
    pub y: Option<f64>,
    pub heading: Option<f64>,
}

impl PropertyPatch {
    /// Overrides this patch with every field `later` sets.
    fn overlay(&mut self, later: &PropertyPatch) {
        if later.name.is_some() {
            self.name = later.name.clone();
        }
        if later.visible.is_some() {
            self.visible = later.visible;
        }
        if later.x.is_some() {
            self.x = later.x;
        }
        if later.y.is_some() {
            self.y = later.y;
        }
        if later.heading.is_some() {
            self.heading = later.heading;
        }
    }

    /// Fills fields this patch leaves unset from `other`, keeping existing
    /// values. Used when merging recorded previous values: the earliest
    /// recording wins.
    fn fill_missing(&mut self, other: &PropertyPatch) {
        if self.name.is_none() {
            self.name = other.name.clone();
        }
        if self.visible.is_none() {
            self.visible = other.visible;
        }
        if self.x.is_none() {
            self.x = other.x;
        }
        if self.y.is_none() {
            self.y = other.y;
        }
        if self.heading.is_none() {
            self.heading = other.heading;
        }
    }
}

/// Applies a property patch to a list of entities, recording per-target
/// previous values for exact undo.
///
/// Returns `false` from execution when no field actually changed on any
/// target. Mergeable with a later update on the same target list.
#[derive(Debug, Clone)]
pub struct UpdateProperties {
    targets: Vec<EntityRef>,
    patch: PropertyPatch,
    previous: Vec<PropertyPatch>,
    interactive: bool,
}

impl UpdateProperties {
    pub fn new(targets: Vec<EntityRef>, patch: PropertyPatch) -> Self {
        Self {
            targets,
            patch,
            previous: Vec::new(),
            interactive: false,
        }
    }

    /// Like [`UpdateProperties::new`] but the targets participate in
    /// selection highlighting after undo/redo.
    pub fn interactive(targets: Vec<EntityRef>, patch: PropertyPatch) -> Self {
        Self {
            interactive: true,
            ..Self::new(targets, patch)
        }
    }

    pub fn execute(&mut self, doc: &mut Document) -> bool {
        let mut changed = false;
        self.previous.clear();
        for target in &self.targets {
            let (target_changed, previous) = apply_patch(doc, *target, &self.patch);
            changed = changed || target_changed;
            self.previous.push(previous);
        }
        changed
    }

    pub fn undo(&mut self, doc: &mut Document) {
        for (target, previous) in self.targets.iter().zip(self.previous.iter()) {
            apply_patch(doc, *target, previous);
        }
    }

    pub fn redo(&mut self, doc: &mut Document) {
        for target in &self.targets {
            apply_patch(doc, *target, &self.patch);
        }
    }

    pub fn merge(&mut self, other: &UpdateProperties) -> bool {
        if self.targets != other.targets {
            return false;
        }
        for (mine, theirs) in self.previous.iter_mut().zip(other.previous.iter()) {
            mine.fill_missing(theirs);
        }
        self.patch.overlay(&other.patch);
        true
    }

    pub fn entities(&self) -> Option<Vec<EntityRef>> {
        self.interactive.then(|| self.targets.clone())
    }
}

/// Applies the patch to one entity, returning whether anything changed and
/// a patch of the overwritten values (only fields that apply to the
/// entity's kind are recorded).
fn apply_patch(doc: &mut Document, target: EntityRef, patch: &PropertyPatch) -> (bool, PropertyPatch) {
    let mut previous = PropertyPatch::default();
    let mut changed = false;
    match target {
        EntityRef::Path(uid) => {
            let path = match doc.path_mut(uid) {
                Some(path) => path,
                None => {
                    tracing::warn!(path = ?uid, "update properties: unknown path");
                    return (false, previous);
                }
            };
            if let Some(name) = &patch.name {
                previous.name = Some(path.name.clone());
                if path.name != *name {
                    path.name = name.clone();
                    changed = true;
                }
            }
            if let Some(visible) = patch.visible {
                previous.visible = Some(path.visible);
                if path.visible != visible {
                    path.visible = visible;
                    changed = true;
                }
            }
        }
        EntityRef::Control(id) => {
            let control = match doc.control_mut(id) {
                Some(control) => control,
                None => {
                    tracing::warn!(control = ?id, "update properties: unknown control");
                    return (false, previous);
                }
            };
            if let Some(x) = patch.x {
                previous.x = Some(control.x);
                if control.x != x {
                    control.x = x;
                    changed = true;
                }
            }
            if let Some(y) = patch.y {
                previous.y = Some(control.y);
                if control.y != y {
                    control.y = y;
                    changed = true;
                }
            }
            if let Some(visible) = patch.visible {
                previous.visible = Some(control.visible);
                if control.visible != visible {
                    control.visible = visible;
                    changed = true;
                }
            }
            if let Some(heading) = patch.heading {
                if let Some(current) = control.heading() {
                    previous.heading = Some(current);
                    if current != heading {
                        control.set_heading(heading);
                        changed = true;
                    }
                }
            }
        }
    }
    (changed, previous)
}
