//! Concrete editing commands over the path model.
//!
//! Commands form a closed union: one struct per kind, wrapped by
//! [`PathCommand`] which dispatches `execute`/`undo`/`redo` and exposes the
//! capability checks the history engine needs (mergeability, affected
//! entities). All commands follow the same contract:
//!
//! - `execute(&mut self, doc) -> bool` performs the mutation; `false` means
//!   "no effect" and the engine discards the command.
//! - `undo`/`redo` are exact inverses. Where `execute` created new objects
//!   (segments, controls), the command retains them and `redo` reinstates
//!   the retained objects instead of reallocating, so handles held by other
//!   commands stay valid.
//! - `merge` absorbs a same-kind command executed shortly after this one;
//!   after a successful merge this command alone reproduces the combined
//!   effect.

mod drag;
mod keyframe;
mod move_end_control;
mod paths;
mod properties;
mod segment;

pub use drag::DragControls;
pub use keyframe::{AddKeyframe, MoveKeyframe, RemoveKeyframe};
pub use move_end_control::{MoveDestination, MoveEndControl, MoveOrder};
pub use paths::{AddPath, RemovePathsAndEndControls};
pub use properties::{PropertyPatch, UpdateProperties};
pub use segment::{AddSegment, ConvertSegment, SplitSegment};

use pathedit_core::{Document, EntityRef};

/// The closed set of undoable commands.
#[derive(Debug, Clone)]
pub enum PathCommand {
    AddSegment(AddSegment),
    ConvertSegment(ConvertSegment),
    SplitSegment(SplitSegment),
    DragControls(DragControls),
    MoveEndControl(MoveEndControl),
    AddKeyframe(AddKeyframe),
    MoveKeyframe(MoveKeyframe),
    RemoveKeyframe(RemoveKeyframe),
    AddPath(AddPath),
    RemovePathsAndEndControls(RemovePathsAndEndControls),
    UpdateProperties(UpdateProperties),
}

impl PathCommand {
    /// Performs the mutation. Returns `false` when the command had no
    /// effect and must not be recorded.
    pub fn execute(&mut self, doc: &mut Document) -> bool {
        match self {
            PathCommand::AddSegment(cmd) => cmd.execute(doc),
            PathCommand::ConvertSegment(cmd) => cmd.execute(doc),
            PathCommand::SplitSegment(cmd) => cmd.execute(doc),
            PathCommand::DragControls(cmd) => cmd.execute(doc),
            PathCommand::MoveEndControl(cmd) => cmd.execute(doc),
            PathCommand::AddKeyframe(cmd) => cmd.execute(doc),
            PathCommand::MoveKeyframe(cmd) => cmd.execute(doc),
            PathCommand::RemoveKeyframe(cmd) => cmd.execute(doc),
            PathCommand::AddPath(cmd) => cmd.execute(doc),
            PathCommand::RemovePathsAndEndControls(cmd) => cmd.execute(doc),
            PathCommand::UpdateProperties(cmd) => cmd.execute(doc),
        }
    }

    /// Exact inverse of the last `execute`/`redo`.
    pub fn undo(&mut self, doc: &mut Document) {
        match self {
            PathCommand::AddSegment(cmd) => cmd.undo(doc),
            PathCommand::ConvertSegment(cmd) => cmd.undo(doc),
            PathCommand::SplitSegment(cmd) => cmd.undo(doc),
            PathCommand::DragControls(cmd) => cmd.undo(doc),
            PathCommand::MoveEndControl(cmd) => cmd.undo(doc),
            PathCommand::AddKeyframe(cmd) => cmd.undo(doc),
            PathCommand::MoveKeyframe(cmd) => cmd.undo(doc),
            PathCommand::RemoveKeyframe(cmd) => cmd.undo(doc),
            PathCommand::AddPath(cmd) => cmd.undo(doc),
            PathCommand::RemovePathsAndEndControls(cmd) => cmd.undo(doc),
            PathCommand::UpdateProperties(cmd) => cmd.undo(doc),
        }
    }

    /// Re-applies the command, reusing any objects `execute` created.
    pub fn redo(&mut self, doc: &mut Document) {
        match self {
            PathCommand::AddSegment(cmd) => cmd.redo(doc),
            PathCommand::ConvertSegment(cmd) => cmd.redo(doc),
            PathCommand::SplitSegment(cmd) => cmd.redo(doc),
            PathCommand::DragControls(cmd) => cmd.redo(doc),
            PathCommand::MoveEndControl(cmd) => cmd.redo(doc),
            PathCommand::AddKeyframe(cmd) => cmd.redo(doc),
            PathCommand::MoveKeyframe(cmd) => cmd.redo(doc),
            PathCommand::RemoveKeyframe(cmd) => cmd.redo(doc),
            PathCommand::AddPath(cmd) => cmd.redo(doc),
            PathCommand::RemovePathsAndEndControls(cmd) => cmd.redo(doc),
            PathCommand::UpdateProperties(cmd) => cmd.redo(doc),
        }
    }

    /// Whether this command kind can coalesce with a repeat of itself.
    pub fn is_mergeable(&self) -> bool {
        matches!(
            self,
            PathCommand::DragControls(_)
                | PathCommand::MoveKeyframe(_)
                | PathCommand::UpdateProperties(_)
        )
    }

    /// Attempts to absorb `other` into this command. Both commands must
    /// already be executed.
    pub fn merge(&mut self, other: &PathCommand) -> bool {
        match (self, other) {
            (PathCommand::DragControls(cmd), PathCommand::DragControls(other)) => cmd.merge(other),
            (PathCommand::MoveKeyframe(cmd), PathCommand::MoveKeyframe(other)) => cmd.merge(other),
            (PathCommand::UpdateProperties(cmd), PathCommand::UpdateProperties(other)) => {
                cmd.merge(other)
            }
            _ => false,
        }
    }

    /// The entities a UI should highlight after the last transition, or
    /// `None` when the command does not participate in selection.
    pub fn entities(&self) -> Option<Vec<EntityRef>> {
        match self {
            PathCommand::AddSegment(cmd) => Some(cmd.entities()),
            PathCommand::ConvertSegment(cmd) => Some(cmd.entities()),
            PathCommand::SplitSegment(cmd) => Some(cmd.entities()),
            PathCommand::DragControls(cmd) => Some(cmd.entities()),
            PathCommand::MoveEndControl(cmd) => Some(cmd.entities()),
            PathCommand::AddPath(cmd) => Some(cmd.entities()),
            PathCommand::RemovePathsAndEndControls(cmd) => Some(cmd.entities()),
            PathCommand::UpdateProperties(cmd) => cmd.entities(),
            PathCommand::AddKeyframe(_)
            | PathCommand::MoveKeyframe(_)
            | PathCommand::RemoveKeyframe(_) => None,
        }
    }
}

impl From<AddSegment> for PathCommand {
    fn from(cmd: AddSegment) -> Self {
        PathCommand::AddSegment(cmd)
    }
}

impl From<ConvertSegment> for PathCommand {
    fn from(cmd: ConvertSegment) -> Self {
        PathCommand::ConvertSegment(cmd)
    }
}

impl From<SplitSegment> for PathCommand {
    fn from(cmd: SplitSegment) -> Self {
        PathCommand::SplitSegment(cmd)
    }
}

impl From<DragControls> for PathCommand {
    fn from(cmd: DragControls) -> Self {
        PathCommand::DragControls(cmd)
    }
}

impl From<MoveEndControl> for PathCommand {
    fn from(cmd: MoveEndControl) -> Self {
        PathCommand::MoveEndControl(cmd)
    }
}

impl From<AddKeyframe> for PathCommand {
    fn from(cmd: AddKeyframe) -> Self {
        PathCommand::AddKeyframe(cmd)
    }
}

impl From<MoveKeyframe> for PathCommand {
    fn from(cmd: MoveKeyframe) -> Self {
        PathCommand::MoveKeyframe(cmd)
    }
}

impl From<RemoveKeyframe> for PathCommand {
    fn from(cmd: RemoveKeyframe) -> Self {
        PathCommand::RemoveKeyframe(cmd)
    }
}

impl From<AddPath> for PathCommand {
    fn from(cmd: AddPath) -> Self {
        PathCommand::AddPath(cmd)
    }
}

impl From<RemovePathsAndEndControls> for PathCommand {
    fn from(cmd: RemovePathsAndEndControls) -> Self {
        PathCommand::RemovePathsAndEndControls(cmd)
    }
}

impl From<UpdateProperties> for PathCommand {
    fn from(cmd: UpdateProperties) -> Self {
        PathCommand::UpdateProperties(cmd)
    }
}
