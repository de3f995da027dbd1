//! # PathEdit Core
//!
//! Structural model for robot motion paths: 2D control points, 2- or
//! 4-control curve segments, continuity-linked paths, and per-segment speed
//! keyframes. A [`Document`](model::Document) owns every control through an
//! arena of stable handles, so two adjacent segments can share an endpoint
//! by handle equality instead of aliased references.
//!
//! The editing commands and undo/redo history live in the companion
//! `pathedit-editor` crate; this crate only defines the state they mutate.

pub mod math;
pub mod model;

pub use math::Vector;
pub use model::{
    Control, ControlId, ControlKind, Document, DocumentSnapshot, EntityRef, Keyframe, KeyframeId,
    KeyframePos, Path, PathId, PathSnapshot, Segment, SegmentId, SegmentSnapshot, SegmentVariant,
};
