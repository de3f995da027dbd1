//! Error types for command construction.
//!
//! Commands whose constructor must resolve anchors in the document return
//! `Result<Self, CommandError>`; a command that constructed successfully is
//! always safe to execute. Execution-time misses are not errors: they are
//! silent no-ops signalled by `execute()` returning `false`.

use pathedit_core::{ControlId, PathId};
use thiserror::Error;

/// A command anchor could not be resolved at construction time.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CommandError {
    /// The control is not referenced by any path in the document.
    #[error("control {0:?} is not attached to any path")]
    DetachedControl(ControlId),

    /// The path is not part of the document.
    #[error("path {0:?} is not part of the document")]
    UnknownPath(PathId),

    /// A control cannot be moved relative to itself.
    #[error("a control cannot be moved relative to itself")]
    SelfDestination,

    /// Moving before the first path of the document.
    #[error("no path precedes the destination path")]
    NoPrecedingPath,
}
