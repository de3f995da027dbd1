//! The structural path model.
//!
//! Every entity carries a small copyable handle allocated from the owning
//! [`Document`]'s counter. Segments reference controls by [`ControlId`]
//! instead of holding copies, so a shared endpoint between two adjacent
//! segments is expressed as the same handle appearing in both control lists.

mod control;
mod document;
mod keyframe;
mod path;
mod segment;

pub use control::{Control, ControlKind};
pub use document::{Document, DocumentSnapshot, PathSnapshot, SegmentSnapshot};
pub use keyframe::{Keyframe, KeyframePos};
pub use path::Path;
pub use segment::{Segment, SegmentVariant};

use serde::{Deserialize, Serialize};

/// Handle of a control point in the document arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ControlId(pub u64);

/// Identity of a segment within a path.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct SegmentId(pub u64);

/// Identity of a path within a document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct PathId(pub u64);

/// Identity of a speed keyframe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct KeyframeId(pub u64);

/// Reference to a selectable entity: a whole path or a single control.
///
/// Used for the selection set and for bulk removal targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EntityRef {
    Path(PathId),
    Control(ControlId),
}
