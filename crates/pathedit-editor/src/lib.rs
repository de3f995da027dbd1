//! # PathEdit Editor
//!
//! The editing engine over the `pathedit-core` model: a closed set of
//! undoable commands ([`commands::PathCommand`]) and the
//! [`history::CommandHistory`] that executes them, coalesces drag-style
//! repeats into one history frame, and tracks unsaved steps.
//!
//! Control flow: the caller builds a concrete command bound to live model
//! handles and hands it to [`history::CommandHistory::execute`]. The engine
//! runs it, decides whether to merge it into the still-pending frame or
//! commit a new one, and clears the redo lineage. Undo and redo delegate to
//! the command's own exact inverse; commands retain the objects their
//! execution created so redo reinstates them by identity instead of
//! reallocating.

pub mod commands;
pub mod error;
pub mod history;

pub use commands::{
    AddKeyframe, AddPath, AddSegment, ConvertSegment, DragControls, MoveDestination, MoveEndControl,
    MoveKeyframe, MoveOrder, PathCommand, PropertyPatch, RemoveKeyframe,
    RemovePathsAndEndControls, SplitSegment, UpdateProperties,
};
pub use error::CommandError;
pub use history::CommandHistory;
